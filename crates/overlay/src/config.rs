//! Overlay tunables, loaded read-only from YAML

use crate::geometry::{MinimumSize, WindowBounds};
use crate::resize::DEFAULT_BORDER_THICKNESS;
use crate::{OverlayError, OverlayResult};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Environment variable overriding the config file location
pub const CONFIG_PATH_ENV: &str = "VNC_OVERLAY_CONFIG";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OverlayConfig {
    /// Resize border thickness in pixels
    pub border_thickness: i32,
    pub min_width: i32,
    pub min_height: i32,
    /// Pause after dropping always-on-top, before switching focus
    pub pre_switch_delay_ms: u64,
    /// Pause after switching focus, before injecting the click
    pub post_switch_delay_ms: u64,
    pub opacity_percent: i32,
    /// Forward clicks on the render surface to the window underneath
    pub click_through: bool,
    /// Width of the opaque results panel on the right side
    pub panel_width: i32,
    pub initial_bounds: WindowBounds,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            border_thickness: DEFAULT_BORDER_THICKNESS,
            min_width: MinimumSize::MIN_WIDTH,
            min_height: MinimumSize::MIN_HEIGHT,
            pre_switch_delay_ms: 50,
            post_switch_delay_ms: 50,
            opacity_percent: 100,
            click_through: true,
            panel_width: 320,
            initial_bounds: WindowBounds::new(100, 100, 1280, 720),
        }
    }
}

impl OverlayConfig {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> OverlayResult<Self> {
        if !path.exists() {
            tracing::debug!("No overlay config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)?;
        let config = Self::from_yaml(&text)?;
        tracing::info!("Loaded overlay config from {}", path.display());
        Ok(config)
    }

    pub fn from_yaml(text: &str) -> OverlayResult<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// `VNC_OVERLAY_CONFIG`, else `%APPDATA%\VNCompanion\overlay.yml`
    pub fn default_path() -> Option<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Some(PathBuf::from(path));
        }
        std::env::var_os("APPDATA")
            .map(|dir| PathBuf::from(dir).join("VNCompanion").join("overlay.yml"))
    }

    pub fn validate(&self) -> OverlayResult<()> {
        if self.min_width < 1 || self.min_height < 1 {
            return Err(OverlayError::Config(format!(
                "minimum size must be positive, got {}x{}",
                self.min_width, self.min_height
            )));
        }
        if self.border_thickness < 0 {
            return Err(OverlayError::Config(format!(
                "border thickness must not be negative, got {}",
                self.border_thickness
            )));
        }
        let bounds = self.initial_bounds;
        if bounds.width < self.min_width || bounds.height < self.min_height {
            return Err(OverlayError::Config(format!(
                "initial bounds {}x{} are below the {}x{} minimum",
                bounds.width, bounds.height, self.min_width, self.min_height
            )));
        }
        if self.panel_width < 0 {
            return Err(OverlayError::Config(format!(
                "panel width must not be negative, got {}",
                self.panel_width
            )));
        }
        Ok(())
    }

    pub fn min_size(&self) -> MinimumSize {
        MinimumSize::new(self.min_width, self.min_height)
    }

    pub fn pre_switch_delay(&self) -> Duration {
        Duration::from_millis(self.pre_switch_delay_ms)
    }

    pub fn post_switch_delay(&self) -> Duration {
        Duration::from_millis(self.post_switch_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_observed_design() {
        let config = OverlayConfig::default();
        assert_eq!(config.border_thickness, 8);
        assert_eq!(config.min_size(), MinimumSize::new(400, 300));
        assert_eq!(config.pre_switch_delay(), Duration::from_millis(50));
        assert_eq!(config.post_switch_delay(), Duration::from_millis(50));
        assert!(config.click_through);
    }

    #[test]
    fn test_partial_yaml_keeps_other_defaults() {
        let config = OverlayConfig::from_yaml("borderThickness: 6\nclickThrough: false\n").unwrap();
        assert_eq!(config.border_thickness, 6);
        assert!(!config.click_through);
        assert_eq!(config.min_width, 400);
        assert_eq!(config.panel_width, 320);
    }

    #[test]
    fn test_initial_bounds_from_yaml() {
        let yaml = "initialBounds:\n  x: 10\n  y: 20\n  width: 900\n  height: 700\n";
        let config = OverlayConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.initial_bounds, WindowBounds::new(10, 20, 900, 700));
    }

    #[test]
    fn test_rejects_non_positive_minimum() {
        let err = OverlayConfig::from_yaml("minWidth: 0\n").unwrap_err();
        assert!(matches!(err, OverlayError::Config(_)), "got {err:?}");
    }

    #[test]
    fn test_rejects_initial_bounds_below_minimum() {
        let err = OverlayConfig::from_yaml("initialBounds: {width: 50, height: 40}\n").unwrap_err();
        assert!(matches!(err, OverlayError::Config(_)), "got {err:?}");

        let err = OverlayConfig::from_yaml("initialBounds: {width: 1280, height: 299}\n").unwrap_err();
        assert!(matches!(err, OverlayError::Config(_)), "got {err:?}");

        let yaml = "minWidth: 40\nminHeight: 30\ninitialBounds: {width: 50, height: 40}\n";
        let config = OverlayConfig::from_yaml(yaml).unwrap();
        assert_eq!(config.initial_bounds, WindowBounds::new(0, 0, 50, 40));
    }

    #[test]
    fn test_malformed_yaml_is_an_error() {
        let err = OverlayConfig::from_yaml("borderThickness: [1, 2\n").unwrap_err();
        assert!(matches!(err, OverlayError::Yaml(_)), "got {err:?}");
    }

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = OverlayConfig::load(&dir.path().join("overlay.yml")).unwrap();
        assert_eq!(config, OverlayConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "opacityPercent: 80").unwrap();
        writeln!(file, "postSwitchDelayMs: 0").unwrap();

        let config = OverlayConfig::load(file.path()).unwrap();
        assert_eq!(config.opacity_percent, 80);
        assert_eq!(config.post_switch_delay(), Duration::ZERO);
    }
}
