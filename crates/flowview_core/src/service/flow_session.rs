//! Mounted flow view session.
//!
//! # Responsibility
//! - Run the mount sequence: joint fetch, model build, initial layout.
//! - Own every piece of per-view state and pass the immutable dataset
//!   explicitly to layout, selection and projection code.
//!
//! # Invariants
//! - The dataset never changes after mount.
//! - `layout` always matches `container_width` and the configured policy.
//! - Selection changes only through explicit intents.

use crate::config::FlowViewConfig;
use crate::index::project_index::ProjectIndex;
use crate::ingest::loader::{load_dataset, Dataset, LoadError};
use crate::ingest::source::RecordSource;
use crate::layout::debounce::ResizeDebouncer;
use crate::layout::{compute_layout, FlowLayout};
use crate::model::process::ProcessModel;
use crate::selection::controller::{DismissTrigger, SelectionController, ViewIntent};
use crate::view::{render, RenderOutput};
use log::{error, info};
use std::time::Duration;
use uuid::Uuid;

/// One successfully mounted flow view.
#[derive(Debug, Clone)]
pub struct FlowSession {
    session_id: Uuid,
    config: FlowViewConfig,
    dataset: Dataset,
    selection: SelectionController,
    debouncer: ResizeDebouncer,
    container_width: f64,
    layout: FlowLayout,
}

impl FlowSession {
    /// Loads both sources and builds a session for `container_width`.
    ///
    /// # Errors
    /// - Returns `LoadError` when the process data is unavailable or invalid.
    pub fn mount(
        config: FlowViewConfig,
        process_source: &dyn RecordSource,
        project_source: &dyn RecordSource,
        container_width: f64,
    ) -> Result<Self, LoadError> {
        let dataset = load_dataset(process_source, project_source)?;
        Ok(Self::from_dataset(config, dataset, container_width))
    }

    /// Builds a session around an already loaded dataset.
    pub fn from_dataset(config: FlowViewConfig, dataset: Dataset, container_width: f64) -> Self {
        let session_id = Uuid::new_v4();
        let layout = compute_layout(&config.layout, container_width, dataset.process.len());
        let debouncer = ResizeDebouncer::new(config.resize_window());
        info!(
            "event=session_mount module=service status=ok session_id={} steps={} container_width={}",
            session_id,
            dataset.process.len(),
            container_width
        );

        Self {
            session_id,
            config,
            dataset,
            selection: SelectionController::new(),
            debouncer,
            container_width,
            layout,
        }
    }

    /// Id correlating this session's log events.
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    pub fn config(&self) -> &FlowViewConfig {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn process(&self) -> &ProcessModel {
        &self.dataset.process
    }

    pub fn index(&self) -> &ProjectIndex {
        &self.dataset.index
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn layout(&self) -> &FlowLayout {
        &self.layout
    }

    pub fn container_width(&self) -> f64 {
        self.container_width
    }

    pub fn select_step(&mut self, id: &str) -> bool {
        self.selection.select_step(&self.dataset.process, id)
    }

    pub fn navigate_to(&mut self, id: &str) -> bool {
        self.selection.navigate_to(&self.dataset.process, id)
    }

    pub fn close(&mut self) -> bool {
        self.selection.close()
    }

    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        self.selection.dismiss(trigger)
    }

    pub fn apply(&mut self, intent: &ViewIntent) -> bool {
        self.selection.apply(&self.dataset.process, intent)
    }

    /// Queues a container resize; layout is recomputed by `poll_resize`.
    pub fn notify_resize(&mut self, width: f64, now: Duration) {
        self.debouncer.on_resize(width, now);
    }

    /// Applies a settled resize. Returns whether the layout was recomputed.
    pub fn poll_resize(&mut self, now: Duration) -> bool {
        match self.debouncer.poll(now) {
            Some(width) => {
                self.relayout(width);
                true
            }
            None => false,
        }
    }

    pub fn resize_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    /// Time until a queued resize settles, for scheduling the next poll.
    pub fn resize_delay(&self, now: Duration) -> Option<Duration> {
        self.debouncer.remaining(now)
    }

    /// Recomputes layout for `width` immediately, dropping any queued resize.
    pub fn relayout(&mut self, width: f64) {
        self.debouncer.cancel();
        self.container_width = width;
        self.layout = compute_layout(&self.config.layout, width, self.dataset.process.len());
    }

    /// Projects the current state for the renderer.
    pub fn render(&self) -> RenderOutput {
        render(
            &self.dataset,
            &self.layout,
            &self.selection,
            &self.config,
            self.container_width,
        )
    }
}

/// Mount outcome: a live session or the failure that replaced it.
#[derive(Debug, Clone)]
pub enum FlowView {
    Ready(Box<FlowSession>),
    Failed(LoadError),
}

impl FlowView {
    /// Runs the mount sequence, turning a load failure into the error state.
    pub fn mount(
        config: FlowViewConfig,
        process_source: &dyn RecordSource,
        project_source: &dyn RecordSource,
        container_width: f64,
    ) -> Self {
        match FlowSession::mount(config, process_source, project_source, container_width) {
            Ok(session) => Self::Ready(Box::new(session)),
            Err(err) => {
                error!("event=session_mount module=service status=error error={err}");
                Self::Failed(err)
            }
        }
    }

    pub fn session(&self) -> Option<&FlowSession> {
        match self {
            Self::Ready(session) => Some(session.as_ref()),
            Self::Failed(_) => None,
        }
    }

    pub fn session_mut(&mut self) -> Option<&mut FlowSession> {
        match self {
            Self::Ready(session) => Some(session.as_mut()),
            Self::Failed(_) => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    /// Renders the session, or the error placeholder after a failed mount.
    pub fn render(&self) -> RenderOutput {
        match self {
            Self::Ready(session) => session.render(),
            Self::Failed(err) => RenderOutput::error(err),
        }
    }
}
