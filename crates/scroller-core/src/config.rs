use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrollerConfig {
    /// Attribute on a trigger element naming the region it scrolls to
    #[serde(default = "default_attribute_link")]
    pub attribute_link: String,
    /// Attribute marking a region element
    #[serde(default = "default_attribute_area")]
    pub attribute_area: String,
    /// Attribute on a trigger element carrying a duration override
    #[serde(default = "default_attribute_duration")]
    pub attribute_duration: String,
    /// Default animation duration in milliseconds
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,
    /// Extra pixels added to every animated vertical write.
    /// At least one rendering engine rounds the write down and stops 1px short.
    #[serde(default = "default_overshoot_px")]
    pub overshoot_px: f64,
    /// Frame rate for hosts that pace frames themselves
    #[serde(default = "default_frame_rate")]
    pub frame_rate: u32,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ScrollerConfig {
    fn default() -> Self {
        Self {
            attribute_link: default_attribute_link(),
            attribute_area: default_attribute_area(),
            attribute_duration: default_attribute_duration(),
            duration_ms: default_duration_ms(),
            overshoot_px: default_overshoot_px(),
            frame_rate: default_frame_rate(),
            log_level: default_log_level(),
        }
    }
}

fn default_attribute_link() -> String {
    "data-scroller-link".to_string()
}

fn default_attribute_area() -> String {
    "data-scroller-area".to_string()
}

fn default_attribute_duration() -> String {
    "data-scroller-duration".to_string()
}

fn default_duration_ms() -> u64 {
    500
}

fn default_overshoot_px() -> f64 {
    1.0
}

fn default_frame_rate() -> u32 {
    60
}

fn default_log_level() -> String {
    "info".to_string()
}

impl ScrollerConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`, returning defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            Self::from_toml_str(&content)
        } else {
            debug!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/scroller/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("scroller")
            .join("config.toml")
    }

    /// Selector that finds the element of region `name`
    pub fn selector_for(&self, name: &str) -> String {
        crate::region::area_selector(&self.attribute_area, name)
    }

    /// Attributes a trigger element carries to scroll to `name`
    pub fn trigger_attributes(&self, name: &str, duration_ms: Option<u64>) -> String {
        let mut attrs = format!("{}=\"{}\"", self.attribute_link, name);
        if let Some(ms) = duration_ms {
            attrs.push_str(&format!(" {}=\"{}\"", self.attribute_duration, ms));
        }
        attrs
    }

    #[inline]
    pub fn default_duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Interval between frames for `frame_rate`, never shorter than 1ms
    #[inline]
    pub fn frame_interval(&self) -> Duration {
        if self.frame_rate == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis((1000 / self.frame_rate as u64).max(1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScrollerConfig::default();
        assert_eq!(config.attribute_link, "data-scroller-link");
        assert_eq!(config.attribute_area, "data-scroller-area");
        assert_eq!(config.attribute_duration, "data-scroller-duration");
        assert_eq!(config.default_duration(), Duration::from_millis(500));
        assert_eq!(config.overshoot_px, 1.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config =
            ScrollerConfig::from_toml_str("duration_ms = 800\nattribute_area = \"data-section\"")
                .unwrap();
        assert_eq!(config.duration_ms, 800);
        assert_eq!(config.attribute_area, "data-section");
        assert_eq!(config.attribute_link, "data-scroller-link");
        assert_eq!(config.frame_rate, 60);
    }

    #[test]
    fn test_invalid_toml() {
        let err = ScrollerConfig::from_toml_str("duration_ms = \"slow\"").unwrap_err();
        assert!(matches!(err, crate::Error::Config(_)));
    }

    #[test]
    fn test_selector_for() {
        let config = ScrollerConfig::default();
        assert_eq!(config.selector_for("pricing"), "[data-scroller-area='pricing']");
    }

    #[test]
    fn test_trigger_attributes() {
        let mut config = ScrollerConfig::default();
        assert_eq!(config.trigger_attributes("faq", None), "data-scroller-link=\"faq\"");

        config.attribute_link = "data-goto".to_string();
        config.attribute_duration = "data-ms".to_string();
        assert_eq!(
            config.trigger_attributes("pricing", Some(250)),
            "data-goto=\"pricing\" data-ms=\"250\""
        );
    }

    #[test]
    fn test_frame_interval() {
        let mut config = ScrollerConfig::default();
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        config.frame_rate = 0;
        assert_eq!(config.frame_interval(), Duration::from_millis(16));
        config.frame_rate = 30;
        assert_eq!(config.frame_interval(), Duration::from_millis(33));
    }

    #[test]
    fn test_frame_interval_above_1000fps_is_nonzero() {
        let mut config = ScrollerConfig {
            frame_rate: 2000,
            ..Default::default()
        };
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
        config.frame_rate = u32::MAX;
        assert_eq!(config.frame_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join(format!("scroller-config-{}", std::process::id()));
        let path = dir.join("config.toml");
        let config = ScrollerConfig {
            duration_ms: 1200,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        let loaded = ScrollerConfig::load_from(&path).unwrap();
        assert_eq!(loaded, config);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let path = std::env::temp_dir().join("scroller-does-not-exist").join("config.toml");
        let config = ScrollerConfig::load_from(&path).unwrap();
        assert_eq!(config, ScrollerConfig::default());
    }
}
