use super::{LatLng, Place};
use crate::config::GeocodingConfig;
use crate::error::{AppError, IntoRequestFailed};
use serde::Deserialize;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Free-text to coordinate lookup.
///
/// Implementations block; callers that must not stall the event loop go
/// through [`spawn_search`].
pub trait Geocoder: Send + Sync {
    fn search(&self, query: &str) -> Result<Place, AppError>;
}

/// One entry of a Nominatim `format=json` response. Coordinates arrive as strings.
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
    display_name: String,
}

/// Geocoder backed by OpenStreetMap's Nominatim search endpoint.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl NominatimGeocoder {
    pub fn from_config(config: &GeocodingConfig) -> anyhow::Result<Self> {
        // Nominatim's usage policy rejects requests without a user agent
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl Geocoder for NominatimGeocoder {
    fn search(&self, query: &str) -> Result<Place, AppError> {
        let query = validate_query(query)?;
        let url = reqwest::Url::parse_with_params(
            &self.endpoint,
            &[("format", "json"), ("q", query), ("limit", "1")],
        )
        .or_request_failed()?;

        debug!(%url, "geocoding request");
        let response = self.client.get(url).send().or_request_failed()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::RequestFailed(format!("HTTP {status}")));
        }

        let hits: Vec<NominatimHit> = response.json().or_request_failed()?;
        best_match(query, hits)
    }
}

/// Trimmed query, or `InvalidInput` when nothing is left.
pub fn validate_query(query: &str) -> Result<&str, AppError> {
    let trimmed = query.trim();
    if trimmed.is_empty() {
        return Err(AppError::invalid_input("search term"));
    }
    Ok(trimmed)
}

fn best_match(query: &str, hits: Vec<NominatimHit>) -> Result<Place, AppError> {
    let Some(hit) = hits.into_iter().next() else {
        return Err(AppError::NotFound {
            query: query.to_string(),
        });
    };

    let lat: f64 = hit
        .lat
        .trim()
        .parse()
        .map_err(|_| AppError::RequestFailed(format!("malformed latitude '{}'", hit.lat)))?;
    let lng: f64 = hit
        .lon
        .trim()
        .parse()
        .map_err(|_| AppError::RequestFailed(format!("malformed longitude '{}'", hit.lon)))?;

    let position = LatLng::new(lat, lng);
    if !position.is_finite() {
        return Err(AppError::RequestFailed(format!(
            "non-finite coordinates '{}', '{}'",
            hit.lat, hit.lon
        )));
    }

    Ok(Place {
        position,
        display_name: hit.display_name,
    })
}

/// Runs the lookup on a background thread and hands back the receiving end.
/// Exactly one message is sent.
pub fn spawn_search(
    geocoder: Arc<dyn Geocoder>,
    query: String,
) -> mpsc::Receiver<Result<Place, AppError>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        info!(query = %query, "searching location");
        let result = geocoder.search(&query);
        if let Err(ref e) = result {
            warn!(query = %query, error = %e, "location search failed");
        }
        let _ = tx.send(result);
    });

    rx
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct FixedGeocoder(Result<Place, AppError>);

    impl Geocoder for FixedGeocoder {
        fn search(&self, _query: &str) -> Result<Place, AppError> {
            self.0.clone()
        }
    }

    fn parse_hits(json: &str) -> Vec<NominatimHit> {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_best_match_takes_first_hit() {
        let hits = parse_hits(
            r#"[
                {"lat": "48.8566", "lon": "2.3522", "display_name": "Paris, France", "importance": 0.9},
                {"lat": "33.66", "lon": "-95.55", "display_name": "Paris, Texas"}
            ]"#,
        );

        let place = best_match("Paris", hits).unwrap();
        assert_eq!(
            place,
            Place {
                position: LatLng::new(48.8566, 2.3522),
                display_name: "Paris, France".to_string(),
            }
        );
    }

    #[test]
    fn test_empty_response_is_not_found() {
        let result = best_match("Atlantis", parse_hits("[]"));
        assert_eq!(
            result,
            Err(AppError::NotFound {
                query: "Atlantis".to_string()
            })
        );
    }

    #[test]
    fn test_malformed_coordinate_is_request_failure() {
        let hits = parse_hits(r#"[{"lat": "north", "lon": "2.0", "display_name": "x"}]"#);
        assert!(matches!(
            best_match("x", hits),
            Err(AppError::RequestFailed(_))
        ));
    }

    #[test]
    fn test_non_finite_coordinates_are_request_failure() {
        for (lat, lon) in [("nan", "2.0"), ("48.0", "inf"), ("-infinity", "NaN")] {
            let json = format!(r#"[{{"lat": "{lat}", "lon": "{lon}", "display_name": "x"}}]"#);
            assert!(
                matches!(best_match("x", parse_hits(&json)), Err(AppError::RequestFailed(_))),
                "{lat}, {lon} should be rejected"
            );
        }
    }

    #[test]
    fn test_validate_query_rejects_blank() {
        assert_eq!(
            validate_query("   "),
            Err(AppError::invalid_input("search term"))
        );
        assert_eq!(validate_query("  Tokyo "), Ok("Tokyo"));
    }

    #[test]
    fn test_spawn_search_delivers_result() {
        let place = Place {
            position: LatLng::new(35.6762, 139.6503),
            display_name: "Tokyo, Japan".to_string(),
        };
        let geocoder: Arc<dyn Geocoder> = Arc::new(FixedGeocoder(Ok(place.clone())));

        let rx = spawn_search(geocoder, "Tokyo".to_string());
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result, Ok(place));
    }

    #[test]
    fn test_spawn_search_delivers_error() {
        let geocoder: Arc<dyn Geocoder> =
            Arc::new(FixedGeocoder(Err(AppError::request_failed("offline"))));

        let rx = spawn_search(geocoder, "Oslo".to_string());
        let result = rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert_eq!(result, Err(AppError::RequestFailed("offline".to_string())));
    }
}
