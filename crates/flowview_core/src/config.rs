//! Session configuration.
//!
//! # Responsibility
//! - Collect layout policy and view thresholds in one deserializable value.
//! - Validate values before a session is mounted.
//!
//! # Invariants
//! - Every field has a default; an empty JSON object is a valid config.

use crate::layout::policy::LayoutPolicy;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Duration;

const DEFAULT_MOBILE_BREAKPOINT: f64 = 768.0;
const DEFAULT_RESIZE_DEBOUNCE_MS: u64 = 250;

/// Configuration parse/validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    Malformed(String),
    Invalid(String),
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(message) => write!(f, "malformed flow view config: {message}"),
            Self::Invalid(message) => write!(f, "invalid flow view config: {message}"),
        }
    }
}

impl Error for ConfigError {}

/// Tunables for one mounted flow view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FlowViewConfig {
    pub layout: LayoutPolicy,
    /// Container widths below this render the mobile list.
    pub mobile_breakpoint: f64,
    /// Quiescence window for resize-driven re-layout.
    pub resize_debounce_ms: u64,
}

impl Default for FlowViewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutPolicy::default(),
            mobile_breakpoint: DEFAULT_MOBILE_BREAKPOINT,
            resize_debounce_ms: DEFAULT_RESIZE_DEBOUNCE_MS,
        }
    }
}

impl FlowViewConfig {
    /// Parses and validates a JSON config. Blank input yields defaults.
    pub fn from_json_str(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self =
            serde_json::from_str(raw).map_err(|err| ConfigError::Malformed(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.layout.check().map_err(ConfigError::Invalid)?;
        if !self.mobile_breakpoint.is_finite() || self.mobile_breakpoint < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "mobileBreakpoint must be a non-negative number, got {}",
                self.mobile_breakpoint
            )));
        }
        Ok(())
    }

    pub fn resize_window(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    /// Whether `container_width` selects the mobile list.
    pub fn is_mobile(&self, container_width: f64) -> bool {
        container_width < self.mobile_breakpoint
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, FlowViewConfig};

    #[test]
    fn blank_and_empty_object_yield_defaults() {
        assert_eq!(
            FlowViewConfig::from_json_str("  ").unwrap(),
            FlowViewConfig::default()
        );
        assert_eq!(
            FlowViewConfig::from_json_str("{}").unwrap(),
            FlowViewConfig::default()
        );
    }

    #[test]
    fn partial_layout_override_keeps_other_defaults() {
        let config =
            FlowViewConfig::from_json_str(r#"{"layout": {"nodesPerRow": 3}, "resizeDebounceMs": 100}"#)
                .unwrap();
        assert_eq!(config.layout.nodes_per_row, 3);
        assert!(config.layout.serpentine);
        assert_eq!(config.resize_window().as_millis(), 100);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let err = FlowViewConfig::from_json_str(r#"{"layout": {"nodesPerRow": 0}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = FlowViewConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ConfigError::Malformed(_)));
    }

    #[test]
    fn breakpoint_selects_mobile() {
        let config = FlowViewConfig::default();
        assert!(config.is_mobile(375.0));
        assert!(!config.is_mobile(1024.0));
    }
}
