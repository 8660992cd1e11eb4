//! Quiescence-window debouncing for container resize events.
//!
//! Time is supplied by the caller as a monotonic offset, which keeps the
//! debouncer a pure state machine that hosts and tests can drive alike.

use log::debug;
use std::time::Duration;

/// Default quiescence window before a resize triggers re-layout.
pub const DEFAULT_RESIZE_WINDOW: Duration = Duration::from_millis(250);

#[derive(Clone, Copy, Debug, PartialEq)]
struct PendingResize {
    width: f64,
    last_event_at: Duration,
}

/// Collapses bursts of resize events into one recomputation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResizeDebouncer {
    window: Duration,
    pending: Option<PendingResize>,
}

impl Default for ResizeDebouncer {
    fn default() -> Self {
        Self::new(DEFAULT_RESIZE_WINDOW)
    }
}

impl ResizeDebouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            pending: None,
        }
    }

    /// Records a resize, superseding any pending one and restarting the window.
    pub fn on_resize(&mut self, width: f64, now: Duration) {
        if self.pending.is_some() {
            debug!("event=resize_debounce module=layout status=superseded width={width}");
        }
        self.pending = Some(PendingResize {
            width,
            last_event_at: now,
        });
    }

    /// Returns the settled width once the window has elapsed since the latest
    /// resize, clearing it. Returns `None` while events are still arriving.
    pub fn poll(&mut self, now: Duration) -> Option<f64> {
        let pending = self.pending?;
        if now.saturating_sub(pending.last_event_at) < self.window {
            return None;
        }
        self.pending = None;
        debug!(
            "event=resize_debounce module=layout status=ok width={}",
            pending.width
        );
        Some(pending.width)
    }

    /// Time left before a pending resize settles.
    pub fn remaining(&self, now: Duration) -> Option<Duration> {
        self.pending.map(|pending| {
            self.window
                .saturating_sub(now.saturating_sub(pending.last_event_at))
        })
    }

    /// Drops any pending recomputation.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
