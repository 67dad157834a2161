//! Auto-submit configuration
//!
//! Defaults match the player's page markup. A host page may pass an options
//! object to `initializeForm`; the log level can also be raised from the URL
//! with `?log=debug`.

use serde::Deserialize;
use tracing::Level;
use wasm_bindgen::JsValue;

/// Which form to arm and how
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Config {
    pub form_id: String,
    pub control_name: String,
    pub control_type: String,
    pub submit_selector: String,
    pub trigger_event: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_id: "volume_form".to_string(),
            control_name: "volume".to_string(),
            control_type: "range".to_string(),
            submit_selector: "button[type='submit']".to_string(),
            trigger_event: "change".to_string(),
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Read a JS options object; missing keys keep their defaults
    pub fn from_js(options: JsValue) -> Result<Self, JsValue> {
        if options.is_undefined() || options.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(options).map_err(Into::into)
    }

    /// Apply `log=` from a location search string (`?a=b&log=debug`)
    #[must_use]
    pub fn with_query_overrides(mut self, search: &str) -> Self {
        let level = search
            .trim_start_matches('?')
            .split('&')
            .find_map(|p| p.strip_prefix("log="));
        if let Some(level) = level.filter(|l| !l.is_empty()) {
            self.log_level = level.to_string();
        }
        self
    }

    /// Parsed log level, `INFO` when unrecognised
    pub fn max_level(&self) -> Level {
        self.log_level.parse().unwrap_or(Level::INFO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_player_markup() {
        let config = Config::default();
        assert_eq!(config.form_id, "volume_form");
        assert_eq!(config.control_name, "volume");
        assert_eq!(config.trigger_event, "change");
        assert_eq!(config.max_level(), Level::INFO);
    }

    #[test]
    fn test_partial_options_keep_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"formId": "balance_form", "controlName": "balance"}"#)
                .unwrap();
        assert_eq!(config.form_id, "balance_form");
        assert_eq!(config.control_name, "balance");
        assert_eq!(config.submit_selector, "button[type='submit']");
    }

    #[test]
    fn test_query_override() {
        let config = Config::default().with_query_overrides("?page=2&log=debug");
        assert_eq!(config.max_level(), Level::DEBUG);

        let config = Config::default().with_query_overrides("?log=");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_unknown_level_falls_back_to_info() {
        let config = Config::default().with_query_overrides("log=loud");
        assert_eq!(config.max_level(), Level::INFO);
    }
}
