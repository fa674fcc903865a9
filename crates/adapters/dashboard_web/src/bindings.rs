//! `HospitalUtils` — the dashboard kit exposed to page scripts.
//!
//! Inline scripts reach the helpers through `window.HospitalUtils`:
//!
//! ```js
//! HospitalUtils.showToast("Bed added", "success");
//! const bed = await HospitalUtils.apiRequest("/api/beds/add", {
//!   method: "POST",
//!   body: { ward_id: 3, bed_number: "B-12" },
//! });
//! ```

use std::collections::BTreeMap;
use std::rc::Rc;
use std::time::Duration;

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};
use wardboard_app::error::RequestError;
use wardboard_app::ports::Method;
use wardboard_app::services::api_client::RequestOptions;
use wardboard_domain::stats::DashboardStats;
use wardboard_domain::toast::{ToastId, ToastKind};
use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::WebKit;
use crate::dom::DomButton;

/// Request options as passed from JS: `{ method, headers, body }`.
///
/// A string `body` is sent verbatim; any other JSON value is serialized.
/// Other fetch options (`credentials`, `cache`, ...) are not supported and
/// are dropped with a warning.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct JsRequestOptions {
    method: Option<String>,
    headers: BTreeMap<String, String>,
    body: Option<serde_json::Value>,
    #[serde(flatten)]
    unsupported: BTreeMap<String, IgnoredAny>,
}

impl JsRequestOptions {
    /// Decode the options object handed to `apiRequest`.
    fn from_js(options: JsValue) -> Result<RequestOptions, RequestError> {
        if options.is_undefined() || options.is_null() {
            return Ok(RequestOptions::default());
        }
        serde_wasm_bindgen::from_value::<Self>(options)
            .map_err(|err| RequestError::InvalidOptions(err.to_string()))
            .and_then(Self::into_options)
    }

    fn into_options(self) -> Result<RequestOptions, RequestError> {
        if !self.unsupported.is_empty() {
            let keys: Vec<&str> = self.unsupported.keys().map(String::as_str).collect();
            tracing::warn!(?keys, "ignoring unsupported request options");
        }
        let method = match self.method {
            Some(name) => name
                .parse::<Method>()
                .map_err(|err| RequestError::InvalidOptions(err.to_string()))?,
            None => Method::Get,
        };
        let mut options = RequestOptions::default().method(method);
        for (name, value) in self.headers {
            options = options.header(name, value);
        }
        match self.body {
            None | Some(serde_json::Value::Null) => {}
            Some(serde_json::Value::String(text)) => options = options.body(text),
            Some(value) => options = options.body(value.to_string()),
        }
        Ok(options)
    }
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

/// Kind named by a page script; absent means success, unknown means info.
fn toast_kind(kind: Option<&str>) -> ToastKind {
    match kind.map(str::parse::<ToastKind>) {
        None => ToastKind::Success,
        Some(Ok(kind)) => kind,
        Some(Err(err)) => {
            tracing::warn!(error = %err, "falling back to info toast");
            ToastKind::Info
        }
    }
}

/// Page helpers callable from JS.
#[wasm_bindgen]
pub struct HospitalUtils {
    kit: Rc<WebKit>,
}

impl HospitalUtils {
    pub(crate) fn new(kit: Rc<WebKit>) -> Self {
        Self { kit }
    }
}

#[wasm_bindgen]
impl HospitalUtils {
    /// Show a toast. `kind` defaults to `"success"`, `durationMs` to the
    /// configured duration. Returns the toast id.
    #[wasm_bindgen(js_name = showToast)]
    pub fn show_toast(&self, message: &str, kind: Option<String>, duration_ms: Option<u32>) -> u32 {
        let kind = toast_kind(kind.as_deref());
        let duration = duration_ms.map(|ms| Duration::from_millis(u64::from(ms)));
        self.kit.notify(message, kind, duration).get()
    }

    /// Remove a toast immediately.
    #[wasm_bindgen(js_name = dismissToast)]
    pub fn dismiss_toast(&self, id: u32) {
        self.kit.notifier().dismiss(ToastId::new(id));
    }

    /// Format a timestamp for the viewer's locale.
    #[wasm_bindgen(js_name = formatDate)]
    pub fn format_date(&self, input: &str) -> String {
        self.kit.format_date(input)
    }

    /// Call `callback` only if the user confirms `message`.
    #[wasm_bindgen(js_name = confirmAction)]
    pub fn confirm_action(&self, message: &str, callback: &js_sys::Function) {
        self.kit.confirm_action(message, || {
            if let Err(err) = callback.call0(&JsValue::NULL) {
                tracing::warn!(error = ?err, "confirm callback threw");
            }
        });
    }

    /// Enter or leave the loading state on a button.
    #[wasm_bindgen(js_name = setLoading)]
    pub fn set_loading(&self, element: Element, is_loading: bool) {
        self.kit.set_loading(&DomButton::new(element), is_loading);
    }

    /// Send a JSON request. Resolves with the parsed body; rejects (after
    /// showing an error toast) on failure, including unusable options.
    #[wasm_bindgen(js_name = apiRequest)]
    pub fn api_request(&self, url: String, options: JsValue) -> js_sys::Promise {
        let kit = Rc::clone(&self.kit);
        let options = JsRequestOptions::from_js(options);
        wasm_bindgen_futures::future_to_promise(async move {
            let options = options.map_err(|err| {
                kit.report_request_failure(&url, &err);
                js_error(&err.to_string())
            })?;
            let body: serde_json::Value = kit
                .api_request(&url, options)
                .await
                .map_err(|err: RequestError| js_error(&err.to_string()))?;
            body.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
                .map_err(JsValue::from)
        })
    }

    /// Write `{ total_beds, occupied_beds, available_beds }` onto the page.
    ///
    /// # Errors
    ///
    /// Rejects objects that do not have the three counts.
    #[wasm_bindgen(js_name = updateDashboardStats)]
    pub fn update_dashboard_stats(&self, stats: JsValue) -> Result<(), JsValue> {
        let stats: DashboardStats = serde_wasm_bindgen::from_value(stats)?;
        self.kit.update_dashboard_stats(&stats);
        Ok(())
    }

    /// Start polling bed statistics; `false` outside dashboard pages.
    #[wasm_bindgen(js_name = setupAutoRefresh)]
    pub fn setup_auto_refresh(&self) -> bool {
        self.kit.setup_auto_refresh()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(json: &str) -> Result<RequestOptions, RequestError> {
        serde_json::from_str::<JsRequestOptions>(json)
            .unwrap()
            .into_options()
    }

    #[test]
    fn should_default_to_get_without_body() {
        let options = options("{}").unwrap();
        assert_eq!(options, RequestOptions::get());
    }

    #[test]
    fn should_serialize_object_bodies() {
        let options = options(r#"{"method":"post","body":{"ward_id":3}}"#).unwrap();
        assert_eq!(options.method, Method::Post);
        assert_eq!(options.body.as_deref(), Some(r#"{"ward_id":3}"#));
    }

    #[test]
    fn should_send_string_bodies_verbatim() {
        let options = options(r#"{"method":"PUT","body":"{\"a\":1}"}"#).unwrap();
        assert_eq!(options.body.as_deref(), Some(r#"{"a":1}"#));
    }

    #[test]
    fn should_carry_caller_headers() {
        let options = options(r#"{"headers":{"X-CSRF-Token":"t0k"}}"#).unwrap();
        assert_eq!(
            options.headers,
            vec![("X-CSRF-Token".to_string(), "t0k".to_string())]
        );
    }

    #[test]
    fn should_reject_unknown_method_as_request_failure() {
        let err = options(r#"{"method":"HEAD"}"#).unwrap_err();
        assert!(matches!(err, RequestError::InvalidOptions(_)));
        assert_eq!(
            err.to_string(),
            "invalid request options: unsupported HTTP method `HEAD`"
        );
    }

    #[test]
    fn should_drop_unsupported_fetch_options() {
        let parsed: JsRequestOptions =
            serde_json::from_str(r#"{"method":"POST","credentials":"include","cache":"no-store"}"#)
                .unwrap();
        assert_eq!(
            parsed.unsupported.keys().collect::<Vec<_>>(),
            vec!["cache", "credentials"]
        );
        assert_eq!(parsed.into_options().unwrap(), RequestOptions::post());
    }

    #[test]
    fn should_default_missing_toast_kind_to_success() {
        assert_eq!(toast_kind(None), ToastKind::Success);
        assert_eq!(toast_kind(Some("error")), ToastKind::Error);
    }

    #[test]
    fn should_fall_back_to_info_for_unknown_toast_kind() {
        assert_eq!(toast_kind(Some("danger")), ToastKind::Info);
        assert_eq!(toast_kind(Some("")), ToastKind::Info);
    }
}
