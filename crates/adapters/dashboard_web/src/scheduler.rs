//! Scheduler backed by the browser event loop.

use std::future::Future;
use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use wardboard_app::ports::{LocalTask, Scheduler};

/// Spawns onto the page's event loop and sleeps with `setTimeout`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserScheduler;

impl Scheduler for BrowserScheduler {
    fn spawn(&self, task: LocalTask) {
        leptos::task::spawn_local(task);
    }

    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + 'static {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        TimeoutFuture::new(millis)
    }
}
