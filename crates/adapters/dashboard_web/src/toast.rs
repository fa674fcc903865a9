//! Toast host rendered with Leptos, driven through the toast surface port.

use leptos::prelude::*;
use wardboard_app::ports::ToastSurface;
use wardboard_domain::toast::{Toast, ToastId};

/// A toast on screen, possibly sliding out.
#[derive(Debug, Clone, PartialEq)]
struct ToastEntry {
    toast: Toast,
    leaving: bool,
}

/// Reactive list of displayed toasts.
///
/// Updates made before [`mount`](Self::mount) are rendered once mounted.
#[derive(Clone)]
pub struct LeptosToasts {
    entries: ArcRwSignal<Vec<ToastEntry>>,
}

impl Default for LeptosToasts {
    fn default() -> Self {
        Self::new()
    }
}

impl LeptosToasts {
    pub fn new() -> Self {
        Self {
            entries: ArcRwSignal::new(Vec::new()),
        }
    }

    /// Render the toast host at the end of `<body>`.
    pub fn mount(&self) {
        let entries = self.entries.clone();
        leptos::mount::mount_to_body(move || view! { <ToastHost entries/> });
    }
}

impl ToastSurface for LeptosToasts {
    fn clear(&self) {
        self.entries.set(Vec::new());
    }

    fn show(&self, toast: &Toast) {
        self.entries.update(|list| {
            list.push(ToastEntry {
                toast: toast.clone(),
                leaving: false,
            });
        });
    }

    fn begin_exit(&self, id: ToastId) {
        self.entries.update(|list| {
            if let Some(entry) = list.iter_mut().find(|entry| entry.toast.id == id) {
                entry.leaving = true;
            }
        });
    }

    fn remove(&self, id: ToastId) {
        self.entries.update(|list| {
            list.retain(|entry| entry.toast.id != id);
        });
    }
}

/// Renders every displayed toast; clicking one dismisses it.
#[component]
fn ToastHost(entries: ArcRwSignal<Vec<ToastEntry>>) -> impl IntoView {
    let list = entries.clone();
    view! {
        <div class="toast-host">
            {move || {
                list.get()
                    .into_iter()
                    .map(|entry| {
                        let id = entry.toast.id;
                        let entries = entries.clone();
                        let style = if entry.leaving { entry.toast.exit_style() } else { String::new() };
                        let class = entry.toast.class_name();
                        view! {
                            <div
                                class=class
                                style=style
                                role="status"
                                on:click=move |_| {
                                    entries.update(|list| list.retain(|e| e.toast.id != id));
                                }
                            >
                                {entry.toast.message}
                            </div>
                        }
                    })
                    .collect_view()
            }}
        </div>
    }
}
