//! The plugin's `config.json` schema.

use std::time::Duration;

use serde::Deserialize;

/// Default pause after each injected step, in milliseconds.
pub const DEFAULT_STEP_DELAY_MS: u64 = 100;

/// Modifiers implied by the legacy `HotKey` field.
const LEGACY_MODIFIERS: &str = "ctrl+shift";

/// On-disk shape. Unknown keys are ignored so several plugins can share a file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfig {
    /// Full descriptor, e.g. "Shift+Ctrl+P".
    #[serde(default)]
    pub hotkey: Option<String>,
    /// Legacy bare key name; Ctrl+Shift are implied.
    #[serde(rename = "HotKey", default)]
    pub legacy_hotkey: Option<String>,
    /// Pause after each injected step.
    #[serde(default)]
    pub step_delay_ms: Option<u64>,
    /// Suppress auto-repeat notifications.
    #[serde(default)]
    pub no_repeat: Option<bool>,
}

impl RawConfig {
    /// Resolve into a validated config, or describe what is wrong.
    pub fn resolve(self) -> Result<PluginConfig, String> {
        let descriptor = match (self.hotkey, self.legacy_hotkey) {
            (Some(h), None) => h,
            (None, Some(key)) => {
                let key = key.trim();
                if key.is_empty() {
                    return Err("\"HotKey\" must name a key".to_string());
                }
                format!("{LEGACY_MODIFIERS}+{key}")
            }
            (Some(_), Some(_)) => {
                return Err("set either \"hotkey\" or the legacy \"HotKey\", not both".to_string());
            }
            (None, None) => return Err("missing \"hotkey\"".to_string()),
        };
        Ok(PluginConfig {
            descriptor,
            step_delay_ms: self.step_delay_ms.unwrap_or(DEFAULT_STEP_DELAY_MS),
            no_repeat: self.no_repeat.unwrap_or(true),
        })
    }
}

/// Validated plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginConfig {
    /// Effective hotkey descriptor. Not parsed here; malformed descriptors
    /// surface when the hotkey is registered.
    descriptor: String,
    /// Pause after each injected step.
    step_delay_ms: u64,
    /// Suppress auto-repeat notifications.
    no_repeat: bool,
}

impl PluginConfig {
    /// A config for `descriptor` with default tunables.
    pub fn new(descriptor: impl Into<String>) -> Self {
        Self {
            descriptor: descriptor.into(),
            step_delay_ms: DEFAULT_STEP_DELAY_MS,
            no_repeat: true,
        }
    }

    /// The hotkey descriptor string to register.
    pub fn descriptor(&self) -> &str {
        &self.descriptor
    }

    /// Pause after each injected step.
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Whether auto-repeat notifications are suppressed.
    pub fn no_repeat(&self) -> bool {
        self.no_repeat
    }
}
