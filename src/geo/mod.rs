pub mod geocoding;
pub mod geolocation;

use serde::{Deserialize, Serialize};
use std::fmt;

pub use geocoding::{Geocoder, NominatimGeocoder, spawn_search};
pub use geolocation::{
    DisabledGeolocation, FixedGeolocation, GeolocationProvider, IpGeolocation, provider_from_config,
    spawn_locate,
};

/// A WGS84 coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

impl LatLng {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Clamp latitude to the poles and wrap longitude into [-180, 180].
    pub fn normalized(self) -> Self {
        let lng = if (-180.0..=180.0).contains(&self.lng) {
            self.lng
        } else {
            (self.lng + 180.0).rem_euclid(360.0) - 180.0
        };
        Self {
            lat: self.lat.clamp(-90.0, 90.0),
            lng,
        }
    }

    /// Both components are real numbers (no NaN or infinity).
    pub fn is_finite(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Short "lat, lng" label with four decimals.
    pub fn short_label(&self) -> String {
        format!("{:.4}, {:.4}", self.lat, self.lng)
    }
}

impl fmt::Display for LatLng {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.lat, self.lng)
    }
}

impl From<[f64; 2]> for LatLng {
    fn from(pair: [f64; 2]) -> Self {
        Self::new(pair[0], pair[1])
    }
}

/// Best match returned by the geocoder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    pub position: LatLng,
    pub display_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_label_uses_four_decimals() {
        let pos = LatLng::new(40.0, -73.9);
        assert_eq!(pos.short_label(), "40.0000, -73.9000");
    }

    #[test]
    fn test_normalized_wraps_longitude() {
        let pos = LatLng::new(95.0, 190.0).normalized();
        assert_eq!(pos.lat, 90.0);
        assert!((pos.lng - -170.0).abs() < 1e-9);

        let east = LatLng::new(0.0, 180.0).normalized();
        assert_eq!(east.lng, 180.0);
    }

    #[test]
    fn test_is_finite() {
        assert!(LatLng::new(-33.8688, 151.2093).is_finite());
        assert!(!LatLng::new(f64::NAN, 0.0).is_finite());
        assert!(!LatLng::new(0.0, f64::INFINITY).is_finite());
    }

    #[test]
    fn test_from_pair() {
        let pos: LatLng = [48.8566, 2.3522].into();
        assert_eq!(pos, LatLng::new(48.8566, 2.3522));
    }
}
