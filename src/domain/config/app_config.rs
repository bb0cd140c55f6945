//! Application configuration value object

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;
use crate::domain::platform::Platform;

/// Default settle delay between activation and the paste chord
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 300;
/// Upper bound accepted for the settle delay
pub const MAX_SETTLE_DELAY_MS: u64 = 5_000;
pub const DEFAULT_MAX_DEPTH: usize = 3;
pub const MAX_MAX_DEPTH: usize = 8;
pub const DEFAULT_MAX_NODES: usize = 512;
pub const MAX_MAX_NODES: usize = 10_000;

/// Type-name fragments of block-based terminals
pub const DEFAULT_MODERN_TOKENS: &[&str] = &[
    "terminal.block",
    "BlockTerminal",
    "TerminalBlock",
    "reworked",
    "TerminalOutputView",
];

/// Type-name fragments of widget-based terminals
pub const DEFAULT_CLASSIC_TOKENS: &[&str] = &[
    "jediterm",
    "JediTerm",
    "JBTerminalWidget",
    "ShellTerminalWidget",
    "TtyConnector",
];

/// Synthetic paste fallback settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PasteConfig {
    pub enabled: Option<bool>,
    pub platform: Option<String>,
    pub settle_delay_ms: Option<u64>,
    pub keystroke_tool: Option<String>,
}

/// Bounds for object-graph traversal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProbeConfig {
    pub max_depth: Option<usize>,
    pub max_nodes: Option<usize>,
}

/// Engine classifier token sets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub modern_tokens: Option<Vec<String>>,
    pub classic_tokens: Option<Vec<String>>,
}

/// WezTerm host settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeztermConfig {
    pub binary: Option<String>,
    pub pane_id: Option<u64>,
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    pub notify: Option<bool>,
    pub paste: Option<PasteConfig>,
    pub probe: Option<ProbeConfig>,
    pub classifier: Option<ClassifierConfig>,
    pub wezterm: Option<WeztermConfig>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            notify: Some(false),
            paste: Some(PasteConfig {
                enabled: Some(true),
                platform: Some("windows".to_string()),
                settle_delay_ms: Some(DEFAULT_SETTLE_DELAY_MS),
                keystroke_tool: Some("enigo".to_string()),
            }),
            probe: Some(ProbeConfig {
                max_depth: Some(DEFAULT_MAX_DEPTH),
                max_nodes: Some(DEFAULT_MAX_NODES),
            }),
            classifier: Some(ClassifierConfig {
                modern_tokens: Some(owned(DEFAULT_MODERN_TOKENS)),
                classic_tokens: Some(owned(DEFAULT_CLASSIC_TOKENS)),
            }),
            wezterm: Some(WeztermConfig {
                binary: Some("wezterm".to_string()),
                pane_id: None,
            }),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            notify: other.notify.or(self.notify),
            paste: merge_section(self.paste, other.paste, |b, o| PasteConfig {
                enabled: o.enabled.or(b.enabled),
                platform: o.platform.or(b.platform),
                settle_delay_ms: o.settle_delay_ms.or(b.settle_delay_ms),
                keystroke_tool: o.keystroke_tool.or(b.keystroke_tool),
            }),
            probe: merge_section(self.probe, other.probe, |b, o| ProbeConfig {
                max_depth: o.max_depth.or(b.max_depth),
                max_nodes: o.max_nodes.or(b.max_nodes),
            }),
            classifier: merge_section(self.classifier, other.classifier, |b, o| {
                ClassifierConfig {
                    modern_tokens: o.modern_tokens.or(b.modern_tokens),
                    classic_tokens: o.classic_tokens.or(b.classic_tokens),
                }
            }),
            wezterm: merge_section(self.wezterm, other.wezterm, |b, o| WeztermConfig {
                binary: o.binary.or(b.binary),
                pane_id: o.pane_id.or(b.pane_id),
            }),
        }
    }

    /// Check every set value; unset values are always valid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(paste) = &self.paste {
            if let Some(platform) = &paste.platform {
                platform.parse::<Platform>()?;
            }
            if let Some(delay) = paste.settle_delay_ms {
                if delay > MAX_SETTLE_DELAY_MS {
                    return Err(ConfigError::ValidationError {
                        key: "paste.settle_delay_ms".to_string(),
                        message: format!("Must be at most {} ms", MAX_SETTLE_DELAY_MS),
                    });
                }
            }
        }

        if let Some(probe) = &self.probe {
            check_range("probe.max_depth", probe.max_depth, MAX_MAX_DEPTH)?;
            check_range("probe.max_nodes", probe.max_nodes, MAX_MAX_NODES)?;
        }

        let modern = self.modern_tokens();
        let classic = self.classic_tokens();
        if let Some(token) = modern.iter().find(|t| classic.contains(t)) {
            return Err(ConfigError::ValidationError {
                key: "classifier".to_string(),
                message: format!("Token '{}' appears in both modern and classic sets", token),
            });
        }
        if modern.iter().chain(classic.iter()).any(|t| t.is_empty()) {
            return Err(ConfigError::ValidationError {
                key: "classifier".to_string(),
                message: "Tokens must not be empty".to_string(),
            });
        }

        Ok(())
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get paste fallback switch, or true if not set
    pub fn paste_enabled_or_default(&self) -> bool {
        self.paste.as_ref().and_then(|p| p.enabled).unwrap_or(true)
    }

    /// Get the platform on which synthetic paste is sanctioned, or Windows
    pub fn paste_platform_or_default(&self) -> Platform {
        self.paste
            .as_ref()
            .and_then(|p| p.platform.as_deref())
            .and_then(|s| s.parse().ok())
            .unwrap_or(Platform::Windows)
    }

    pub fn settle_delay_ms_or_default(&self) -> u64 {
        self.paste
            .as_ref()
            .and_then(|p| p.settle_delay_ms)
            .map(|ms| ms.min(MAX_SETTLE_DELAY_MS))
            .unwrap_or(DEFAULT_SETTLE_DELAY_MS)
    }

    /// Get keystroke tool preference, or "enigo" if not set
    pub fn keystroke_tool_or_default(&self) -> &str {
        self.paste
            .as_ref()
            .and_then(|p| p.keystroke_tool.as_deref())
            .unwrap_or("enigo")
    }

    pub fn max_depth_or_default(&self) -> usize {
        self.probe
            .as_ref()
            .and_then(|p| p.max_depth)
            .filter(|d| (1..=MAX_MAX_DEPTH).contains(d))
            .unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn max_nodes_or_default(&self) -> usize {
        self.probe
            .as_ref()
            .and_then(|p| p.max_nodes)
            .filter(|n| (1..=MAX_MAX_NODES).contains(n))
            .unwrap_or(DEFAULT_MAX_NODES)
    }

    /// Modern tokens, or the built-in set if not configured
    pub fn modern_tokens(&self) -> Vec<String> {
        self.classifier
            .as_ref()
            .and_then(|c| c.modern_tokens.clone())
            .unwrap_or_else(|| owned(DEFAULT_MODERN_TOKENS))
    }

    /// Classic tokens, or the built-in set if not configured
    pub fn classic_tokens(&self) -> Vec<String> {
        self.classifier
            .as_ref()
            .and_then(|c| c.classic_tokens.clone())
            .unwrap_or_else(|| owned(DEFAULT_CLASSIC_TOKENS))
    }

    pub fn wezterm_binary_or_default(&self) -> &str {
        self.wezterm
            .as_ref()
            .and_then(|w| w.binary.as_deref())
            .unwrap_or("wezterm")
    }

    pub fn wezterm_pane_id(&self) -> Option<u64> {
        self.wezterm.as_ref().and_then(|w| w.pane_id)
    }
}

fn owned(tokens: &[&str]) -> Vec<String> {
    tokens.iter().map(|t| t.to_string()).collect()
}

fn merge_section<T>(base: Option<T>, other: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, other) {
        (None, None) => None,
        (Some(b), None) => Some(b),
        (None, Some(o)) => Some(o),
        (Some(b), Some(o)) => Some(merge(b, o)),
    }
}

fn check_range(key: &str, value: Option<usize>, max: usize) -> Result<(), ConfigError> {
    match value {
        Some(v) if v == 0 || v > max => Err(ConfigError::ValidationError {
            key: key.to_string(),
            message: format!("Must be between 1 and {}", max),
        }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_have_expected_values() {
        let config = AppConfig::defaults();
        assert_eq!(config.notify, Some(false));
        assert!(config.paste_enabled_or_default());
        assert_eq!(config.paste_platform_or_default(), Platform::Windows);
        assert_eq!(config.settle_delay_ms_or_default(), 300);
        assert_eq!(config.keystroke_tool_or_default(), "enigo");
        assert_eq!(config.max_depth_or_default(), 3);
        assert_eq!(config.max_nodes_or_default(), 512);
        assert_eq!(config.wezterm_binary_or_default(), "wezterm");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_has_all_none() {
        let config = AppConfig::empty();
        assert!(config.notify.is_none());
        assert!(config.paste.is_none());
        assert!(config.probe.is_none());
        assert!(config.classifier.is_none());
        assert!(config.wezterm.is_none());
    }

    #[test]
    fn empty_falls_back_to_builtin_values() {
        let config = AppConfig::empty();
        assert!(!config.notify_or_default());
        assert!(config.paste_enabled_or_default());
        assert_eq!(config.modern_tokens().len(), DEFAULT_MODERN_TOKENS.len());
        assert_eq!(config.classic_tokens().len(), DEFAULT_CLASSIC_TOKENS.len());
    }

    #[test]
    fn merge_other_takes_precedence() {
        let base = AppConfig {
            notify: Some(false),
            paste: Some(PasteConfig {
                platform: Some("windows".to_string()),
                settle_delay_ms: Some(300),
                ..Default::default()
            }),
            ..Default::default()
        };

        let other = AppConfig {
            notify: Some(true),
            paste: Some(PasteConfig {
                platform: Some("linux".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };

        let merged = base.merge(other);

        assert_eq!(merged.notify, Some(true));
        assert_eq!(merged.paste_platform_or_default(), Platform::Linux);
        assert_eq!(merged.settle_delay_ms_or_default(), 300); // Kept from base
    }

    #[test]
    fn merge_preserves_base_when_other_is_none() {
        let merged = AppConfig::defaults().merge(AppConfig::empty());
        assert_eq!(merged, AppConfig::defaults());
    }

    #[test]
    fn invalid_platform_falls_back_to_windows() {
        let config = AppConfig {
            paste: Some(PasteConfig {
                platform: Some("plan9".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.paste_platform_or_default(), Platform::Windows);
        assert!(config.validate().is_err());
    }

    #[test]
    fn out_of_range_probe_limits_use_defaults() {
        let config = AppConfig {
            probe: Some(ProbeConfig {
                max_depth: Some(0),
                max_nodes: Some(MAX_MAX_NODES + 1),
            }),
            ..Default::default()
        };
        assert_eq!(config.max_depth_or_default(), DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_nodes_or_default(), DEFAULT_MAX_NODES);
        assert!(config.validate().is_err());
    }

    #[test]
    fn settle_delay_is_capped() {
        let config = AppConfig {
            paste: Some(PasteConfig {
                settle_delay_ms: Some(60_000),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(config.settle_delay_ms_or_default(), MAX_SETTLE_DELAY_MS);
        assert!(config.validate().is_err());
    }

    #[test]
    fn overlapping_tokens_are_rejected() {
        let config = AppConfig {
            classifier: Some(ClassifierConfig {
                modern_tokens: Some(vec!["Terminal".to_string()]),
                classic_tokens: Some(vec!["Terminal".to_string()]),
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn empty_token_is_rejected() {
        let config = AppConfig {
            classifier: Some(ClassifierConfig {
                modern_tokens: Some(vec![String::new()]),
                classic_tokens: None,
            }),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builtin_token_sets_are_disjoint() {
        for token in DEFAULT_MODERN_TOKENS {
            assert!(!DEFAULT_CLASSIC_TOKENS.contains(token));
        }
    }
}
