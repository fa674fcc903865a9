//! Page configuration — embedded JSON document plus `<body data-*>` overrides.
//!
//! ```html
//! <script type="application/json" id="wardboard-config">
//!   {"refresh": {"interval_ms": 15000}}
//! </script>
//! <body data-log-filter="debug">
//! ```

use wardboard_app::config::{DashboardConfig, OVERRIDE_KEYS};
use wardboard_app::error::ConfigError;
use web_sys::Document;

/// Id of the optional element holding the JSON configuration document.
pub const CONFIG_ELEMENT_ID: &str = "wardboard-config";

/// Load the configuration declared by the page.
///
/// # Errors
///
/// Returns a [`ConfigError`] if the embedded document is malformed or a
/// value is invalid.
pub fn load_page_config(document: &Document) -> Result<DashboardConfig, ConfigError> {
    let embedded = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content());
    let overrides: Vec<(&str, String)> = document
        .body()
        .map(|body| {
            OVERRIDE_KEYS
                .iter()
                .filter_map(|key| {
                    body.get_attribute(&format!("data-{key}"))
                        .map(|value| (*key, value))
                })
                .collect()
        })
        .unwrap_or_default();
    DashboardConfig::load(embedded.as_deref(), overrides)
}
