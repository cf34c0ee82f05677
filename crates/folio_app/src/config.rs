//! Folio configuration file handling
//!
//! Settings live in `folio.toml`:
//! - `[scroll]` - smoothed-scroll engine tuning and frame lag smoothing
//! - `[contact]` - email relay credentials and timing
//! - `[storage]` - where the theme preference is persisted
//!
//! Every field has a default, so an empty or missing file is valid. Relay
//! credentials can be supplied through the environment instead of the file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_animation::{Easing, LagSmoothing, SmoothScrollConfig};

use crate::error::{AppError, Result};

/// Environment variable overriding `contact.service_id`
pub const ENV_SERVICE_ID: &str = "FOLIO_EMAILJS_SERVICE_ID";
/// Environment variable overriding `contact.template_id`
pub const ENV_TEMPLATE_ID: &str = "FOLIO_EMAILJS_TEMPLATE_ID";
/// Environment variable overriding `contact.public_key`
pub const ENV_PUBLIC_KEY: &str = "FOLIO_EMAILJS_PUBLIC_KEY";

/// Default EmailJS REST endpoint
pub const DEFAULT_RELAY_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

// =============================================================================
// folio.toml
// =============================================================================

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FolioConfig {
    pub scroll: ScrollSettings,
    pub contact: ContactSettings,
    pub storage: StorageSettings,
}

impl FolioConfig {
    /// Load `path`, falling back to defaults when the file does not exist
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FolioConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply relay credential overrides from the process environment
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Apply relay credential overrides from `lookup`. Empty values are ignored.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let fields = [
            (ENV_SERVICE_ID, &mut self.contact.service_id),
            (ENV_TEMPLATE_ID, &mut self.contact.template_id),
            (ENV_PUBLIC_KEY, &mut self.contact.public_key),
        ];
        for (key, field) in fields {
            if let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) {
                *field = value;
            }
        }
        self
    }

    fn validate(&self) -> Result<()> {
        if !(self.scroll.duration_ms.is_finite() && self.scroll.duration_ms > 0.0) {
            return Err(AppError::Config(format!(
                "scroll.duration_ms must be positive, got {}",
                self.scroll.duration_ms
            )));
        }
        if !self.scroll.wheel_multiplier.is_finite() {
            return Err(AppError::Config("scroll.wheel_multiplier must be finite".into()));
        }
        Easing::from_name(&self.scroll.easing)?;
        if self.contact.timeout_secs == 0 {
            return Err(AppError::Config("contact.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }
}

/// `[scroll]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScrollSettings {
    pub duration_ms: f32,
    /// Curve name, e.g. `"smooth"` or `"power2.out"`
    pub easing: String,
    pub smooth_wheel: bool,
    pub smooth_touch: bool,
    pub wheel_multiplier: f32,
    pub touch_breakpoint_px: f32,
    /// Clamp long frame gaps instead of jumping ahead
    pub lag_smoothing: bool,
}

impl Default for ScrollSettings {
    fn default() -> Self {
        let engine = SmoothScrollConfig::default();
        Self {
            duration_ms: engine.duration_ms,
            easing: "smooth".to_string(),
            smooth_wheel: engine.smooth_wheel,
            smooth_touch: engine.smooth_touch,
            wheel_multiplier: engine.wheel_multiplier,
            touch_breakpoint_px: engine.touch_breakpoint_px,
            lag_smoothing: false,
        }
    }
}

impl ScrollSettings {
    pub fn to_engine_config(&self) -> Result<SmoothScrollConfig> {
        Ok(SmoothScrollConfig {
            duration_ms: self.duration_ms,
            easing: Easing::from_name(&self.easing)?,
            smooth_wheel: self.smooth_wheel,
            smooth_touch: self.smooth_touch,
            wheel_multiplier: self.wheel_multiplier,
            touch_breakpoint_px: self.touch_breakpoint_px,
        })
    }

    pub fn lag_smoothing(&self) -> Option<LagSmoothing> {
        self.lag_smoothing.then(LagSmoothing::default)
    }
}

/// `[contact]`
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ContactSettings {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
    pub endpoint: String,
    pub timeout_secs: u64,
    /// How long the "sent" confirmation stays up
    pub dismiss_after_ms: f32,
}

impl Default for ContactSettings {
    fn default() -> Self {
        Self {
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            endpoint: DEFAULT_RELAY_ENDPOINT.to_string(),
            timeout_secs: 15,
            dismiss_after_ms: 4000.0,
        }
    }
}

impl ContactSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Whether all three relay credentials are present
    pub fn has_credentials(&self) -> bool {
        !self.service_id.is_empty() && !self.template_id.is_empty() && !self.public_key.is_empty()
    }
}

/// `[storage]`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageSettings {
    /// JSON file holding the theme flag
    pub theme_file: Option<PathBuf>,
}

impl StorageSettings {
    /// Configured theme file, or `<config_dir>/folio/prefs.json`
    pub fn theme_path(&self) -> PathBuf {
        if let Some(path) = &self.theme_file {
            return path.clone();
        }
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("folio")
            .join("prefs.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = FolioConfig::from_toml_str("").unwrap();
        assert_eq!(config, FolioConfig::default());
        assert_eq!(config.scroll.duration_ms, 1200.0);
        assert!(!config.scroll.lag_smoothing);
        assert_eq!(config.contact.dismiss_after_ms, 4000.0);
        assert_eq!(config.contact.endpoint, DEFAULT_RELAY_ENDPOINT);
    }

    #[test]
    fn test_partial_tables() {
        let config = FolioConfig::from_toml_str(
            r#"
            [scroll]
            duration_ms = 800
            easing = "power2.out"

            [contact]
            service_id = "service_x"
            "#,
        )
        .unwrap();

        assert_eq!(config.scroll.duration_ms, 800.0);
        assert!(config.scroll.smooth_wheel);
        assert_eq!(config.contact.service_id, "service_x");
        assert!(config.contact.template_id.is_empty());

        let engine = config.scroll.to_engine_config().unwrap();
        assert_eq!(engine.easing, Easing::Power2Out);
        assert_eq!(engine.touch_breakpoint_px, 768.0);
    }

    #[test]
    fn test_invalid_values_rejected() {
        assert!(matches!(
            FolioConfig::from_toml_str("[scroll]\nduration_ms = 0"),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            FolioConfig::from_toml_str("[scroll]\neasing = \"wobble\""),
            Err(AppError::Animation(_))
        ));
        assert!(matches!(
            FolioConfig::from_toml_str("[scroll\n"),
            Err(AppError::Toml(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let config = FolioConfig::default().with_overrides(|key| match key {
            ENV_SERVICE_ID => Some("svc".to_string()),
            ENV_TEMPLATE_ID => Some("  ".to_string()),
            ENV_PUBLIC_KEY => Some("pk".to_string()),
            _ => None,
        });

        assert_eq!(config.contact.service_id, "svc");
        assert!(config.contact.template_id.is_empty());
        assert_eq!(config.contact.public_key, "pk");
        assert!(!config.contact.has_credentials());
    }

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = FolioConfig::load(&dir.path().join("folio.toml")).unwrap();
        assert_eq!(config, FolioConfig::default());
    }

    #[test]
    fn test_theme_path_override() {
        let storage = StorageSettings {
            theme_file: Some(PathBuf::from("/tmp/prefs.json")),
        };
        assert_eq!(storage.theme_path(), PathBuf::from("/tmp/prefs.json"));
        assert!(StorageSettings::default().theme_path().ends_with("folio/prefs.json"));
    }

    #[test]
    fn test_lag_smoothing_toggle() {
        let mut scroll = ScrollSettings::default();
        assert_eq!(scroll.lag_smoothing(), None);
        scroll.lag_smoothing = true;
        assert_eq!(scroll.lag_smoothing(), Some(LagSmoothing::default()));
    }
}
