//! FFI use-case API for the embedding host.
//!
//! # Responsibility
//! - Expose the mount call and view intents to the host via FRB.
//! - Hand render output to the host as a JSON payload envelope.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - A failed mount still yields a handle that renders the error placeholder.
//! - The host performs network requests; this layer only receives results.

use flowview_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, DismissTrigger,
    FlowView, FlowViewConfig, RenderOutput, StaticSource,
};
use log::warn;
use std::time::Duration;

const PROCESS_SOURCE_NAME: &str = "process_steps";
const PROJECT_SOURCE_NAME: &str = "projects";

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Result of one host-side fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourcePayload {
    /// Response body when the request succeeded.
    pub body: Option<String>,
    /// Failure description when it did not.
    pub error: Option<String>,
}

impl SourcePayload {
    fn into_source(self, name: &str) -> StaticSource {
        match self.body {
            Some(body) => StaticSource::ok(name, body),
            None => StaticSource::failed(
                name,
                self.error
                    .unwrap_or_else(|| "no response body".to_string()),
            ),
        }
    }
}

/// Render envelope returned by every view call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowViewResponse {
    /// `false` when the view shows the error placeholder.
    pub ok: bool,
    /// Human-readable diagnostics message.
    pub message: String,
    /// Serialized render output (`status`, `surface`, `panel`).
    pub payload_json: String,
}

impl FlowViewResponse {
    fn from_output(output: &RenderOutput, message: impl Into<String>) -> Self {
        match serde_json::to_string(output) {
            Ok(payload_json) => Self {
                ok: !output.is_error(),
                message: message.into(),
                payload_json,
            },
            Err(err) => Self {
                ok: false,
                message: format!("render serialization failed: {err}"),
                payload_json: String::new(),
            },
        }
    }
}

/// One mounted flow view owned by the host.
#[flutter_rust_bridge::frb(opaque)]
pub struct FlowViewHandle {
    view: FlowView,
}

impl FlowViewHandle {
    /// Builds the view from host fetch results and the container width.
    ///
    /// # FFI contract
    /// - Sync call; parsing and layout only.
    /// - Blank `config_json` selects defaults; invalid config falls back to
    ///   defaults with a warning log.
    /// - Never panics; a failed load yields an error-state handle.
    #[flutter_rust_bridge::frb(sync)]
    pub fn mount(
        config_json: String,
        process: SourcePayload,
        projects: SourcePayload,
        container_width: f64,
    ) -> FlowViewHandle {
        let config = FlowViewConfig::from_json_str(&config_json).unwrap_or_else(|err| {
            warn!("event=config_load module=ffi status=degraded error={err}");
            FlowViewConfig::default()
        });
        let view = FlowView::mount(
            config,
            &process.into_source(PROCESS_SOURCE_NAME),
            &projects.into_source(PROJECT_SOURCE_NAME),
            container_width,
        );
        FlowViewHandle { view }
    }

    /// Current render output.
    #[flutter_rust_bridge::frb(sync)]
    pub fn render(&self) -> FlowViewResponse {
        self.respond(if self.view.is_failed() {
            "Process flow unavailable."
        } else {
            "Rendered."
        })
    }

    /// Opens the panel on a flowchart node or list item.
    #[flutter_rust_bridge::frb(sync)]
    pub fn select_step(&mut self, step_id: String) -> FlowViewResponse {
        let changed = self
            .view
            .session_mut()
            .is_some_and(|session| session.select_step(step_id.trim()));
        self.respond(change_message(changed, "Step selected."))
    }

    /// Follows a next-step link inside the open panel.
    #[flutter_rust_bridge::frb(sync)]
    pub fn navigate_to(&mut self, step_id: String) -> FlowViewResponse {
        let changed = self
            .view
            .session_mut()
            .is_some_and(|session| session.navigate_to(step_id.trim()));
        self.respond(change_message(changed, "Navigated."))
    }

    /// Applies a dismiss gesture: `cancel_key|escape|outside_click|close_button`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn dismiss(&mut self, trigger: String) -> FlowViewResponse {
        let Some(trigger) = DismissTrigger::from_raw(&trigger) else {
            return self.respond(format!("Unknown dismiss trigger `{}`.", trigger.trim()));
        };
        let changed = self
            .view
            .session_mut()
            .is_some_and(|session| session.dismiss(trigger));
        self.respond(change_message(changed, "Panel closed."))
    }

    /// Queues a container resize at host monotonic time `now_ms`.
    #[flutter_rust_bridge::frb(sync)]
    pub fn notify_resize(&mut self, width: f64, now_ms: u64) {
        if let Some(session) = self.view.session_mut() {
            session.notify_resize(width, Duration::from_millis(now_ms));
        }
    }

    /// Returns fresh output once a queued resize has settled.
    #[flutter_rust_bridge::frb(sync)]
    pub fn poll_resize(&mut self, now_ms: u64) -> Option<FlowViewResponse> {
        let relaid = self
            .view
            .session_mut()
            .is_some_and(|session| session.poll_resize(Duration::from_millis(now_ms)));
        relaid.then(|| self.respond("Layout updated."))
    }

    /// Whether a queued resize has not settled yet.
    #[flutter_rust_bridge::frb(sync)]
    pub fn resize_pending(&self) -> bool {
        self.view
            .session()
            .is_some_and(|session| session.resize_pending())
    }

    /// Milliseconds until a queued resize settles; `None` when nothing is queued.
    #[flutter_rust_bridge::frb(sync)]
    pub fn resize_delay_ms(&self, now_ms: u64) -> Option<u64> {
        self.view
            .session()
            .and_then(|session| session.resize_delay(Duration::from_millis(now_ms)))
            .map(|delay| u64::try_from(delay.as_millis()).unwrap_or(u64::MAX))
    }

    fn respond(&self, message: impl Into<String>) -> FlowViewResponse {
        FlowViewResponse::from_output(&self.view.render(), message)
    }
}

fn change_message(changed: bool, message: &str) -> String {
    if changed {
        message.to_string()
    } else {
        "No change.".to_string()
    }
}
