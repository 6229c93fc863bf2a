use dotenv::dotenv;
use std::env;

use crate::fetch::tiles::OSM_TILE_URL;
use crate::map::LatLng;

const DEFAULT_DATA: &str = "data/locations.json";
const DEFAULT_CENTER: LatLng = LatLng::new(38.6270, -90.1994);
const DEFAULT_ZOOM: f64 = 12.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dataset location: a file path or an http(s) URL
    pub data_source: String,

    // Initial map view
    pub center: LatLng,
    pub zoom: f64,

    /// Base map tile server, with `{z}`, `{x}` and `{y}` placeholders
    pub tile_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_source: DEFAULT_DATA.to_string(),
            center: DEFAULT_CENTER,
            zoom: DEFAULT_ZOOM,
            tile_url: OSM_TILE_URL.to_string(),
        }
    }
}

impl Config {
    /// Read `OLDSTL_*` variables, after loading a `.env` file if present.
    /// Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let number = |key: &str, fallback: f64| {
            lookup(key)
                .and_then(|value| value.trim().parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(fallback)
        };

        Self {
            data_source: lookup("OLDSTL_DATA")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.data_source),
            center: LatLng::new(
                number("OLDSTL_CENTER_LAT", defaults.center.lat),
                number("OLDSTL_CENTER_LNG", defaults.center.lng),
            ),
            zoom: number("OLDSTL_ZOOM", defaults.zoom),
            tile_url: lookup("OLDSTL_TILES")
                .filter(|value| !value.trim().is_empty())
                .unwrap_or(defaults.tile_url),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults_when_unset() {
        let config = Config::from_lookup(|_| None);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides_and_bad_values() {
        let vars: HashMap<&str, &str> = [
            ("OLDSTL_DATA", "https://example.org/locations.json"),
            ("OLDSTL_CENTER_LAT", "37.77"),
            ("OLDSTL_CENTER_LNG", "west"),
            ("OLDSTL_ZOOM", " 14 "),
            ("OLDSTL_TILES", "http://tiles.local/{z}/{x}/{y}.png"),
        ]
        .into_iter()
        .collect();

        let config = Config::from_lookup(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.data_source, "https://example.org/locations.json");
        assert_eq!(config.center, LatLng::new(37.77, DEFAULT_CENTER.lng));
        assert_eq!(config.zoom, 14.0);
        assert_eq!(config.tile_url, "http://tiles.local/{z}/{x}/{y}.png");
    }
}
