//! DOM-backed ports: page, buttons, forms and the native confirm dialog.

use std::rc::Rc;

use wardboard_app::ports::forms::{RestoreHandler, SubmitHandler};
use wardboard_app::ports::{Dialog, FormRegistry, LoadingControl, PageView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, PageTransitionEvent, Window};

/// Attribute holding a button's label while it shows the spinner.
const PRESERVED_LABEL_ATTR: &str = "data-original-text";

/// Selector of the button submitting a form.
const SUBMIT_BUTTON: &str = r#"button[type="submit"]"#;

/// Selector of submit buttons that have entered the loading state at least once.
const BUSY_SUBMIT_BUTTONS: &str = r#"button[type="submit"][data-original-text]"#;

/// The current document and its location.
#[derive(Debug, Clone)]
pub struct DomPage {
    window: Window,
    document: Document,
}

impl DomPage {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl PageView for DomPage {
    fn path(&self) -> String {
        self.window.location().pathname().unwrap_or_default()
    }

    fn set_text(&self, element_id: &str, text: &str) -> bool {
        match self.document.get_element_by_id(element_id) {
            Some(element) => {
                element.set_text_content(Some(text));
                true
            }
            None => false,
        }
    }
}

/// Any element used as a button; its label is its inner HTML.
#[derive(Debug, Clone)]
pub struct DomButton(Element);

impl DomButton {
    pub fn new(element: Element) -> Self {
        Self(element)
    }
}

impl LoadingControl for DomButton {
    fn label(&self) -> String {
        self.0.inner_html()
    }

    fn set_label(&self, markup: &str) {
        self.0.set_inner_html(markup);
    }

    fn set_disabled(&self, disabled: bool) {
        let result = if disabled {
            self.0.set_attribute("disabled", "")
        } else {
            self.0.remove_attribute("disabled")
        };
        if let Err(err) = result {
            tracing::warn!(error = ?err, disabled, "failed to toggle disabled attribute");
        }
    }

    fn preserved_label(&self) -> Option<String> {
        self.0.get_attribute(PRESERVED_LABEL_ATTR)
    }

    fn preserve_label(&self, markup: &str) {
        if let Err(err) = self.0.set_attribute(PRESERVED_LABEL_ATTR, markup) {
            tracing::warn!(error = ?err, "failed to preserve button label");
        }
    }
}

fn query_all(root: &Document, selector: &str) -> Vec<Element> {
    let Ok(nodes) = root.query_selector_all(selector) else {
        return Vec::new();
    };
    (0..nodes.length())
        .filter_map(|index| nodes.item(index))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// The `<form>` elements present when the page finished loading.
///
/// Listeners are attached for the lifetime of the page.
#[derive(Debug, Clone)]
pub struct DomForms {
    window: Window,
    document: Document,
}

impl DomForms {
    pub fn new(window: Window, document: Document) -> Self {
        Self { window, document }
    }
}

impl FormRegistry for DomForms {
    type Button = DomButton;

    fn on_submit(&self, handler: SubmitHandler<DomButton>) -> usize {
        let mut wired = 0;
        for form in query_all(&self.document, "form") {
            let handler = Rc::clone(&handler);
            let target = form.clone();
            let on_submit = Closure::<dyn FnMut(web_sys::Event)>::new(move |_: web_sys::Event| {
                let button = target
                    .query_selector(SUBMIT_BUTTON)
                    .ok()
                    .flatten()
                    .map(DomButton::new);
                handler(button);
            });
            if form
                .add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
                .is_ok()
            {
                wired += 1;
            }
            on_submit.forget();
        }
        wired
    }

    fn on_restore(&self, handler: RestoreHandler<DomButton>) {
        let document = self.document.clone();
        let on_pageshow =
            Closure::<dyn FnMut(PageTransitionEvent)>::new(move |event: PageTransitionEvent| {
                if !event.persisted() {
                    return;
                }
                let buttons = query_all(&document, BUSY_SUBMIT_BUTTONS)
                    .into_iter()
                    .map(DomButton::new)
                    .collect();
                handler(buttons);
            });
        if let Err(err) = self
            .window
            .add_event_listener_with_callback("pageshow", on_pageshow.as_ref().unchecked_ref())
        {
            tracing::warn!(error = ?err, "failed to listen for page restores");
        }
        on_pageshow.forget();
    }
}

/// The blocking `window.confirm` prompt.
#[derive(Debug, Clone)]
pub struct BrowserDialog {
    window: Window,
}

impl BrowserDialog {
    pub fn new(window: Window) -> Self {
        Self { window }
    }
}

impl Dialog for BrowserDialog {
    fn confirm(&self, message: &str) -> bool {
        self.window.confirm_with_message(message).unwrap_or(false)
    }
}
