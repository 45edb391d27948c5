use anyhow::{Result, bail};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::map::view::{DEFAULT_CENTER, DEFAULT_ZOOM};
use crate::utils::paths::get_config_path;

pub const DEFAULT_GEOCODING_ENDPOINT: &str = "https://nominatim.openstreetmap.org/search";
pub const DEFAULT_GEOLOCATION_ENDPOINT: &str = "http://ip-api.com/json";

/// Initial camera position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapConfig {
    #[serde(default = "default_center")]
    pub center: [f64; 2],

    #[serde(default = "default_zoom")]
    pub zoom: u8,
}

fn default_center() -> [f64; 2] {
    [DEFAULT_CENTER.lat, DEFAULT_CENTER.lng]
}

fn default_zoom() -> u8 {
    DEFAULT_ZOOM
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocodingConfig {
    #[serde(default = "default_geocoding_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_geocoding_endpoint() -> String {
    DEFAULT_GEOCODING_ENDPOINT.to_string()
}

fn default_user_agent() -> String {
    format!("pin-tui/{}", env!("CARGO_PKG_VERSION"))
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for GeocodingConfig {
    fn default() -> Self {
        Self {
            endpoint: default_geocoding_endpoint(),
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Where "current location" comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeolocationKind {
    #[default]
    Ip,
    Fixed,
    Disabled,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeolocationConfig {
    #[serde(default)]
    pub provider: GeolocationKind,

    #[serde(default = "default_geolocation_endpoint")]
    pub endpoint: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Only read when `provider = "fixed"`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<[f64; 2]>,
}

fn default_geolocation_endpoint() -> String {
    DEFAULT_GEOLOCATION_ENDPOINT.to_string()
}

impl Default for GeolocationConfig {
    fn default() -> Self {
        Self {
            provider: GeolocationKind::default(),
            endpoint: default_geolocation_endpoint(),
            timeout_secs: default_timeout_secs(),
            position: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_theme")]
    pub theme: String,

    #[serde(default)]
    pub map: MapConfig,

    #[serde(default)]
    pub geocoding: GeocodingConfig,

    #[serde(default)]
    pub geolocation: GeolocationConfig,
}

fn default_theme() -> String {
    "default".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            map: MapConfig::default(),
            geocoding: GeocodingConfig::default(),
            geolocation: GeolocationConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&get_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// TOML accepts `nan` and `inf`; coordinates must be real numbers.
    pub fn validate(&self) -> Result<()> {
        if !self.map.center.iter().all(|v| v.is_finite()) {
            bail!("map.center must be two finite numbers, got {:?}", self.map.center);
        }
        if let Some(position) = self.geolocation.position
            && !position.iter().all(|v| v.is_finite())
        {
            bail!("geolocation.position must be two finite numbers, got {position:?}");
        }
        Ok(())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.theme, "default");
        assert_eq!(config.map.zoom, 13);
        assert_eq!(config.map.center, [40.7128, -74.0060]);
        assert_eq!(config.geolocation.provider, GeolocationKind::Ip);
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        assert!(toml_str.contains("theme"));
        assert!(toml_str.contains("[geocoding]"));
        assert!(!toml_str.contains("position"));
    }

    #[test]
    fn test_config_deserialization() {
        let toml_str = r#"
        theme = "dark"
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.theme, "dark");
        assert_eq!(config.geocoding.endpoint, DEFAULT_GEOCODING_ENDPOINT);
    }

    #[test]
    fn test_fixed_geolocation_deserialization() {
        let toml_str = r#"
        [geolocation]
        provider = "fixed"
        position = [64.1466, -21.9426]
        "#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.geolocation.provider, GeolocationKind::Fixed);
        assert_eq!(config.geolocation.position, Some([64.1466, -21.9426]));
        assert_eq!(config.geolocation.timeout_secs, 10);
    }

    #[test]
    fn test_unknown_provider_is_rejected() {
        let toml_str = r#"
        [geolocation]
        provider = "gps"
        "#;

        assert!(toml::from_str::<Config>(toml_str).is_err());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config.theme, "default");
    }

    #[test]
    fn test_non_finite_coordinates_are_rejected_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        fs::write(&path, "[map]\ncenter = [nan, 0.0]\n").unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("map.center"));

        fs::write(
            &path,
            "[geolocation]\nprovider = \"fixed\"\nposition = [10.0, inf]\n",
        )
        .unwrap();
        let err = Config::load_from(&path).unwrap_err();
        assert!(err.to_string().contains("geolocation.position"));

        fs::write(&path, "[map]\ncenter = [64.1466, -21.9426]\n").unwrap();
        assert_eq!(Config::load_from(&path).unwrap().map.center, [64.1466, -21.9426]);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.theme = "light".to_string();
        config.map.zoom = 5;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.theme, "light");
        assert_eq!(loaded.map.zoom, 5);
    }
}
