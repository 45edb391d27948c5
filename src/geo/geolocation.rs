use super::LatLng;
use crate::config::{GeolocationConfig, GeolocationKind};
use crate::error::{AppError, IntoRequestFailed};
use anyhow::anyhow;
use reqwest::StatusCode;
use serde::Deserialize;
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::Duration;
use tracing::{info, warn};

/// Source of the device's current position.
pub trait GeolocationProvider: Send + Sync {
    fn locate(&self) -> Result<LatLng, AppError>;
}

/// Approximate position from the public IP address (ip-api.com schema).
pub struct IpGeolocation {
    client: reqwest::blocking::Client,
    endpoint: String,
}

#[derive(Debug, Deserialize)]
struct IpLookupResponse {
    status: String,
    #[serde(default)]
    lat: Option<f64>,
    #[serde(default)]
    lon: Option<f64>,
    #[serde(default)]
    message: Option<String>,
}

impl IpGeolocation {
    pub fn from_config(config: &GeolocationConfig) -> anyhow::Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("pin-tui/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }
}

impl GeolocationProvider for IpGeolocation {
    fn locate(&self) -> Result<LatLng, AppError> {
        let response = self.client.get(&self.endpoint).send().or_request_failed()?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AppError::PermissionDenied(format!(
                    "lookup service refused the request ({})",
                    response.status()
                )));
            }
            status if !status.is_success() => {
                return Err(AppError::RequestFailed(format!("HTTP {status}")));
            }
            _ => {}
        }

        let body: IpLookupResponse = response.json().or_request_failed()?;
        position_from_response(body)
    }
}

fn position_from_response(body: IpLookupResponse) -> Result<LatLng, AppError> {
    if body.status != "success" {
        let reason = body
            .message
            .unwrap_or_else(|| "position unavailable".to_string());
        return Err(AppError::RequestFailed(reason));
    }

    match (body.lat, body.lon) {
        (Some(lat), Some(lng)) => {
            let position = LatLng::new(lat, lng);
            if !position.is_finite() {
                return Err(AppError::request_failed("position is not a finite coordinate"));
            }
            Ok(position)
        }
        _ => Err(AppError::request_failed("position unavailable")),
    }
}

/// Always reports the same configured position.
pub struct FixedGeolocation(pub LatLng);

impl GeolocationProvider for FixedGeolocation {
    fn locate(&self) -> Result<LatLng, AppError> {
        Ok(self.0)
    }
}

/// Location access turned off by the user.
pub struct DisabledGeolocation;

impl GeolocationProvider for DisabledGeolocation {
    fn locate(&self) -> Result<LatLng, AppError> {
        Err(AppError::PermissionDenied(
            "location access is disabled in config".to_string(),
        ))
    }
}

pub fn provider_from_config(
    config: &GeolocationConfig,
) -> anyhow::Result<Arc<dyn GeolocationProvider>> {
    let provider: Arc<dyn GeolocationProvider> = match config.provider {
        GeolocationKind::Ip => Arc::new(IpGeolocation::from_config(config)?),
        GeolocationKind::Fixed => {
            let position = config
                .position
                .ok_or_else(|| anyhow!("geolocation.provider = \"fixed\" needs geolocation.position"))?;
            Arc::new(FixedGeolocation(position.into()))
        }
        GeolocationKind::Disabled => Arc::new(DisabledGeolocation),
    };
    Ok(provider)
}

/// Runs the provider on a background thread. Exactly one message is sent.
pub fn spawn_locate(
    provider: Arc<dyn GeolocationProvider>,
) -> mpsc::Receiver<Result<LatLng, AppError>> {
    let (tx, rx) = mpsc::channel();

    thread::spawn(move || {
        info!("requesting current location");
        let result = provider.locate();
        if let Err(ref e) = result {
            warn!(error = %e, "geolocation failed");
        }
        let _ = tx.send(result);
    });

    rx
}
