//! # wardboard-adapter-web
//!
//! Composition root for the dashboard page, compiled to WASM.
//!
//! ## Responsibilities
//! - Implement every `wardboard-app` port with browser APIs (DOM, `fetch`,
//!   `setTimeout`, `window.confirm`) and render toasts with Leptos
//! - Read the page configuration and install console logging
//! - Build the [`WebKit`] once and expose it to page scripts as
//!   `window.HospitalUtils`
//! - On page ready: start bed-statistics polling and wire form loading states

use std::error::Error as _;
use std::rc::Rc;

use chrono::Local;
use wardboard_app::config::DashboardConfig;
use wardboard_app::kit::DashboardKit;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};

pub mod bindings;
pub mod config;
pub mod dom;
pub mod error;
pub mod http;
pub mod locale;
pub mod logging;
pub mod scheduler;
pub mod toast;

use bindings::HospitalUtils;
use dom::{BrowserDialog, DomForms, DomPage};
use error::WebError;
use http::GlooHttp;
use scheduler::BrowserScheduler;
use toast::LeptosToasts;

/// The dashboard kit wired to browser ports.
pub type WebKit =
    DashboardKit<GlooHttp, DomPage, LeptosToasts, BrowserDialog, BrowserScheduler, Local>;

/// Name of the global the kit is exposed under.
const GLOBAL_NAME: &str = "HospitalUtils";

/// WASM entry point, run when the module is instantiated.
///
/// # Errors
///
/// Fails outside a window context or if the kit cannot be exposed.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or(WebError::NoWindow)?;
    let document = window.document().ok_or(WebError::NoDocument)?;

    let (config, config_error) = match config::load_page_config(&document) {
        Ok(config) => (config, None),
        Err(err) => (DashboardConfig::default(), Some(err)),
    };
    logging::init(&config.logging.filter);
    if let Some(err) = config_error {
        let detail = err.source().map(ToString::to_string);
        tracing::warn!(error = %err, detail = ?detail, "using default configuration");
    }

    let toasts = LeptosToasts::new();
    let kit = Rc::new(WebKit::new(
        config,
        locale::browser_locale(&window),
        Local,
        GlooHttp,
        DomPage::new(window.clone(), document.clone()),
        toasts.clone(),
        BrowserDialog::new(window.clone()),
        BrowserScheduler,
    ));
    expose(&window, &kit)?;

    let ready_document = document.clone();
    when_ready(&document, move || {
        toasts.mount();
        kit.on_page_ready(&DomForms::new(window, ready_document));
        tracing::debug!("dashboard helpers ready");
    });
    Ok(())
}

/// Publish the kit as `window.HospitalUtils`.
fn expose(window: &Window, kit: &Rc<WebKit>) -> Result<(), WebError> {
    let utils = JsValue::from(HospitalUtils::new(Rc::clone(kit)));
    js_sys::Reflect::set(window, &JsValue::from_str(GLOBAL_NAME), &utils)
        .map_err(|err| WebError::Js(format!("{err:?}")))?;
    Ok(())
}

/// Run `f` once the document is parsed (immediately if it already is).
fn when_ready(document: &Document, f: impl FnOnce() + 'static) {
    let state = js_sys::Reflect::get(document, &JsValue::from_str("readyState"))
        .ok()
        .and_then(|value| value.as_string());
    if state.as_deref() != Some("loading") {
        f();
        return;
    }
    let on_ready = Closure::once(f);
    if let Err(err) = document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
    {
        tracing::error!(error = ?err, "failed to wait for DOMContentLoaded");
    }
    on_ready.forget();
}
