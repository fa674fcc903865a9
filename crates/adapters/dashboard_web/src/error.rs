//! Errors raised while booting the page helpers.

use wasm_bindgen::JsValue;

/// The browser environment is missing something the page needs.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Not running in a window (e.g. inside a worker).
    #[error("no global window")]
    NoWindow,

    /// The window has no document.
    #[error("window has no document")]
    NoDocument,

    /// A JS call failed.
    #[error("JS error: {0}")]
    Js(String),
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        js_sys::Error::new(&err.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_display_missing_window() {
        assert_eq!(WebError::NoWindow.to_string(), "no global window");
    }

    #[test]
    fn should_display_js_failure() {
        let err = WebError::Js("TypeError".to_string());
        assert_eq!(err.to_string(), "JS error: TypeError");
    }
}
