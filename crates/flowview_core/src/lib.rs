//! Data-binding and interaction-state engine for the process flow view.
//! This crate is the single source of truth for flow invariants; renderers
//! consume its projections and feed user intents back into it.

pub mod config;
pub mod index;
pub mod ingest;
pub mod layout;
pub mod logging;
pub mod model;
pub mod selection;
pub mod service;
pub mod view;

pub use config::{ConfigError, FlowViewConfig};
pub use index::project_index::{ProjectIndex, StageSummary};
pub use ingest::loader::{load_dataset, Dataset, LoadError};
pub use ingest::record::{parse_progress, parse_project, parse_step, split_list, RawRecord};
pub use ingest::source::{parse_envelope, FileSource, RecordSource, SourceError, StaticSource};
pub use layout::connector::{Connector, ConnectorDirection};
pub use layout::debounce::ResizeDebouncer;
pub use layout::policy::LayoutPolicy;
pub use layout::{compute_layout, FlowLayout, NodeBox, Point};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::process::{ModelError, ProcessModel};
pub use model::project::{Project, ProjectStatus};
pub use model::step::{Step, StepId, StepKind};
pub use selection::controller::{DismissTrigger, PanelState, SelectionController, ViewIntent};
pub use service::flow_session::{FlowSession, FlowView};
pub use view::{render, RenderOutput, Surface};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
