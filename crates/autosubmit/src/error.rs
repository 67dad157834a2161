//! Error types for setup and delivery
//!
//! Setup errors are fatal to activation and cross the wasm boundary as a JS
//! `Error`. Delivery errors never leave the crate: they are logged and dropped.

use wasm_bindgen::{JsCast, JsValue};

/// Markup did not satisfy the form contract
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SetupError {
    #[error("no global `window` exists")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("form not found: no element with id `{id}`")]
    FormNotFound { id: String },
    #[error("element `{id}` is not a form")]
    NotAForm { id: String },
    #[error("slider not found: form has no control named `{name}`")]
    ControlNotFound { name: String },
    #[error("control `{name}` is not a slider (found {found})")]
    NotASlider { name: String, found: String },
    #[error("submit button not found: nothing matches `{selector}`")]
    SubmitNotFound { selector: String },
    #[error("DOM error: {0}")]
    Dom(String),
}

impl From<SetupError> for JsValue {
    fn from(err: SetupError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

/// A single auto-submit request failed
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeliveryError {
    #[error("could not snapshot form: {0}")]
    Snapshot(String),
    #[error("could not build request: {0}")]
    Request(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("could not spawn request task: {0}")]
    Spawn(String),
}

/// Best-effort human readable text for a thrown JS value
pub fn describe_js(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_error_messages_name_the_missing_piece() {
        let err = SetupError::ControlNotFound { name: "volume".into() };
        assert_eq!(err.to_string(), "slider not found: form has no control named `volume`");

        let err = SetupError::NotASlider { name: "volume".into(), found: "text".into() };
        assert!(err.to_string().contains("found text"));
    }

    #[test]
    fn test_delivery_status_message() {
        assert_eq!(DeliveryError::Status(502).to_string(), "server responded with status 502");
    }
}
