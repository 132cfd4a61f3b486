//! Configuration schema definitions

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    /// Geo-fence editor settings
    #[serde(default)]
    pub fence: FenceConfig,

    /// Read-only position map settings
    #[serde(default)]
    pub position_view: PositionViewConfig,

    /// Tile provider settings
    #[serde(default)]
    pub tiles: TileConfig,

    /// Locale and formatting settings
    #[serde(default)]
    pub display: DisplayConfig,

    /// Logging settings
    #[serde(default)]
    pub telemetry: TelemetrySection,
}

impl ConfigSchema {
    /// Reject values that parse but cannot be used.
    pub fn validate(&self) -> Result<()> {
        let fence = &self.fence;
        if !(-90.0..=90.0).contains(&fence.fallback_latitude) || fence.fallback_latitude == 0.0 {
            return Err(Error::invalid_config_value(
                "fence.fallback_latitude",
                "must be non-zero and within [-90, 90]",
            ));
        }
        if !(-180.0..=180.0).contains(&fence.fallback_longitude) || fence.fallback_longitude == 0.0 {
            return Err(Error::invalid_config_value(
                "fence.fallback_longitude",
                "must be non-zero and within [-180, 180]",
            ));
        }
        if !(fence.default_radius_m > 0.0) {
            return Err(Error::invalid_config_value("fence.default_radius_m", "must be positive"));
        }
        if fence.zoom > MAX_ZOOM {
            return Err(Error::invalid_config_value("fence.zoom", format!("must be at most {MAX_ZOOM}")));
        }
        if self.position_view.zoom > MAX_ZOOM {
            return Err(Error::invalid_config_value(
                "position_view.zoom",
                format!("must be at most {MAX_ZOOM}"),
            ));
        }
        if self.tiles.subdomains.is_empty() && self.tiles.url_template.contains("{s}") {
            return Err(Error::invalid_config_value(
                "tiles.subdomains",
                "template uses {s} but no subdomains are configured",
            ));
        }
        Ok(())
    }
}

/// Highest zoom level the tile provider serves.
pub const MAX_ZOOM: u8 = 20;

/// Geo-fence editor configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FenceConfig {
    /// Latitude written back when the fields hold no usable center
    #[serde(default = "default_fallback_latitude")]
    pub fallback_latitude: f64,

    /// Longitude written back when the fields hold no usable center
    #[serde(default = "default_fallback_longitude")]
    pub fallback_longitude: f64,

    /// Zoom level used whenever the editor re-centres
    #[serde(default = "default_fence_zoom")]
    pub zoom: u8,

    /// Circle radius shown until the radius field holds a usable value
    #[serde(default = "default_radius_m")]
    pub default_radius_m: f64,

    /// Delay before the first reconciliation, letting the map finish loading
    #[serde(default = "default_bootstrap_delay_ms")]
    pub bootstrap_delay_ms: u64,
}

impl Default for FenceConfig {
    fn default() -> Self {
        Self {
            fallback_latitude: default_fallback_latitude(),
            fallback_longitude: default_fallback_longitude(),
            zoom: default_fence_zoom(),
            default_radius_m: default_radius_m(),
            bootstrap_delay_ms: default_bootstrap_delay_ms(),
        }
    }
}

impl FenceConfig {
    /// Bootstrap delay as a duration
    pub fn bootstrap_delay(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.bootstrap_delay_ms)
    }
}

// Beijing
fn default_fallback_latitude() -> f64 {
    39.9042
}

fn default_fallback_longitude() -> f64 {
    116.4074
}

fn default_fence_zoom() -> u8 {
    13
}

fn default_radius_m() -> f64 {
    100.0
}

fn default_bootstrap_delay_ms() -> u64 {
    100
}

/// Read-only position map configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PositionViewConfig {
    /// Zoom level used when the view is first mounted
    #[serde(default = "default_position_zoom")]
    pub zoom: u8,
}

impl Default for PositionViewConfig {
    fn default() -> Self {
        Self {
            zoom: default_position_zoom(),
        }
    }
}

fn default_position_zoom() -> u8 {
    15
}

/// Tile provider configuration
///
/// The template understands `{s}`, `{x}`, `{y}` and `{z}` placeholders.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileConfig {
    /// URL template for a single tile
    #[serde(default = "default_url_template")]
    pub url_template: String,

    /// Subdomain characters substituted for `{s}`
    #[serde(default = "default_subdomains")]
    pub subdomains: String,

    /// Attribution shown on the map
    #[serde(default = "default_attribution")]
    pub attribution: String,
}

impl Default for TileConfig {
    fn default() -> Self {
        Self {
            url_template: default_url_template(),
            subdomains: default_subdomains(),
            attribution: default_attribution(),
        }
    }
}

impl TileConfig {
    /// Expand the template for one tile.
    ///
    /// Subdomains rotate on `|x + y|` so neighbouring tiles spread across hosts.
    pub fn url_for(&self, x: i64, y: i64, z: u8) -> String {
        let subdomains: Vec<char> = self.subdomains.chars().collect();
        let subdomain = if subdomains.is_empty() {
            String::new()
        } else {
            let index = (x + y).unsigned_abs() as usize % subdomains.len();
            subdomains[index].to_string()
        };

        self.url_template
            .replace("{s}", &subdomain)
            .replace("{x}", &x.to_string())
            .replace("{y}", &y.to_string())
            .replace("{z}", &z.to_string())
    }
}

fn default_url_template() -> String {
    "https://webrd0{s}.is.autonavi.com/appmaptile?lang=zh_cn&size=1&scale=1&style=8&x={x}&y={y}&z={z}"
        .to_string()
}

fn default_subdomains() -> String {
    "1234".to_string()
}

fn default_attribution() -> String {
    "© Amap".to_string()
}

/// Display configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// BCP 47 style locale tag, e.g. `en-US` or `zh-CN`
    #[serde(default = "default_locale")]
    pub locale: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
        }
    }
}

fn default_locale() -> String {
    "en-US".to_string()
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetrySection {
    /// Default filter when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for TelemetrySection {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Interaction switches for a map widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct MapOptions {
    pub zoom_control: bool,
    pub box_zoom: bool,
    pub double_click_zoom: bool,
    pub keyboard: bool,
    pub scroll_wheel_zoom: bool,
    pub tap: bool,
    pub dragging: bool,
    pub touch_zoom: bool,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self::interactive()
    }
}

impl MapOptions {
    /// Every interaction enabled, as used by the geo-fence editor.
    pub fn interactive() -> Self {
        Self {
            zoom_control: true,
            box_zoom: true,
            double_click_zoom: true,
            keyboard: true,
            scroll_wheel_zoom: true,
            tap: true,
            dragging: true,
            touch_zoom: true,
        }
    }

    /// Static preview: no interaction apart from an optional zoom control.
    pub fn static_preview(zoom_control: bool) -> Self {
        Self {
            zoom_control,
            box_zoom: false,
            double_click_zoom: false,
            keyboard: false,
            scroll_wheel_zoom: false,
            tap: false,
            dragging: false,
            touch_zoom: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let schema = ConfigSchema::default();
        assert_eq!(schema.fence.fallback_latitude, 39.9042);
        assert_eq!(schema.fence.fallback_longitude, 116.4074);
        assert_eq!(schema.fence.zoom, 13);
        assert_eq!(schema.position_view.zoom, 15);
        assert_eq!(schema.fence.bootstrap_delay().as_millis(), 100);
        assert!(schema.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let schema: ConfigSchema = toml::from_str(
            r#"
            [fence]
            fallback_latitude = 31.2304
            fallback_longitude = 121.4737
            "#,
        )
        .unwrap();

        assert_eq!(schema.fence.fallback_latitude, 31.2304);
        assert_eq!(schema.fence.zoom, 13);
        assert_eq!(schema.display.locale, "en-US");
    }

    #[test]
    fn test_validate_rejects_zero_fallback() {
        let mut schema = ConfigSchema::default();
        schema.fence.fallback_latitude = 0.0;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_radius() {
        let mut schema = ConfigSchema::default();
        schema.fence.default_radius_m = -5.0;
        assert!(schema.validate().is_err());

        schema.fence.default_radius_m = f64::NAN;
        assert!(schema.validate().is_err());
    }

    #[test]
    fn test_tile_url_rotates_subdomains() {
        let tiles = TileConfig::default();
        assert_eq!(
            tiles.url_for(0, 0, 1),
            "https://webrd01.is.autonavi.com/appmaptile?lang=zh_cn&size=1&scale=1&style=8&x=0&y=0&z=1"
        );
        assert!(tiles.url_for(1, 2, 3).starts_with("https://webrd04."));
        assert!(tiles.url_for(2, 2, 3).starts_with("https://webrd01."));
        assert!(tiles.url_for(-3, 1, 3).starts_with("https://webrd03."));
    }

    #[test]
    fn test_map_options() {
        assert!(MapOptions::interactive().dragging);
        let preview = MapOptions::static_preview(true);
        assert!(preview.zoom_control);
        assert!(!preview.dragging && !preview.scroll_wheel_zoom);
    }
}
