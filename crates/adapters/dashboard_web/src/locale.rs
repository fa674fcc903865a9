//! Viewer locale read from the browser.

use wardboard_domain::locale::DisplayLocale;
use web_sys::Window;

/// Locale preset for `navigator.language`.
///
/// Dates are shown in [`chrono::Local`], which asks the JS `Date` API for the
/// offset of each timestamp.
pub fn browser_locale(window: &Window) -> DisplayLocale {
    let tag = window
        .navigator()
        .language()
        .unwrap_or_else(|| "en-US".to_string());
    DisplayLocale::from_tag(&tag)
}
