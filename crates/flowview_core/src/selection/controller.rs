//! Selection/navigation state machine.

use crate::model::process::ProcessModel;
use crate::model::step::{Step, StepId};
use log::debug;
use serde::Serialize;

/// Detail panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "stepId", rename_all = "snake_case")]
pub enum PanelState {
    #[default]
    Closed,
    Open(StepId),
}

/// User gestures that dismiss an open panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DismissTrigger {
    /// Keyboard cancel key (Escape).
    CancelKey,
    /// Click outside the panel content.
    OutsideClick,
    /// Explicit close button.
    CloseButton,
}

impl DismissTrigger {
    /// Parses a host-provided trigger name.
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "cancel_key" | "escape" => Some(Self::CancelKey),
            "outside_click" => Some(Self::OutsideClick),
            "close_button" => Some(Self::CloseButton),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CancelKey => "cancel_key",
            Self::OutsideClick => "outside_click",
            Self::CloseButton => "close_button",
        }
    }
}

/// Intent events raised by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewIntent {
    /// A flowchart node or list item was picked.
    Select(StepId),
    /// A next-step link inside the open panel was followed.
    Navigate(StepId),
    Dismiss(DismissTrigger),
}

/// Owner of the panel state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionController {
    state: PanelState,
}

impl SelectionController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PanelState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, PanelState::Open(_))
    }

    /// Id of the step shown in the panel, if open.
    pub fn active_step_id(&self) -> Option<&str> {
        match &self.state {
            PanelState::Open(id) => Some(id.as_str()),
            PanelState::Closed => None,
        }
    }

    /// Step shown in the panel, if open.
    pub fn active_step<'a>(&self, process: &'a ProcessModel) -> Option<&'a Step> {
        self.active_step_id().and_then(|id| process.get(id))
    }

    /// Opens the panel on `id` from any state.
    ///
    /// Unknown ids leave the state untouched. Returns whether the state changed.
    pub fn select_step(&mut self, process: &ProcessModel, id: &str) -> bool {
        if !process.contains(id) {
            debug!("event=selection_change module=selection status=ignored reason=unknown_step");
            return false;
        }
        let next = PanelState::Open(id.to_string());
        if self.state == next {
            return false;
        }
        debug!("event=selection_change module=selection status=ok step_id={id}");
        self.state = next;
        true
    }

    /// Re-targets the panel through a next-step link.
    ///
    /// Same transition as `select_step`; links are only enumerated for
    /// resolvable targets, see [`SelectionController::next_step_links`].
    pub fn navigate_to(&mut self, process: &ProcessModel, id: &str) -> bool {
        self.select_step(process, id)
    }

    /// Closes the panel. Idempotent.
    pub fn close(&mut self) -> bool {
        if self.state == PanelState::Closed {
            return false;
        }
        debug!("event=selection_change module=selection status=closed");
        self.state = PanelState::Closed;
        true
    }

    /// Applies a dismiss gesture; every trigger closes an open panel.
    pub fn dismiss(&mut self, trigger: DismissTrigger) -> bool {
        if !self.is_open() {
            return false;
        }
        debug!(
            "event=selection_change module=selection status=dismissed trigger={}",
            trigger.as_str()
        );
        self.close()
    }

    /// Dispatches one view intent.
    pub fn apply(&mut self, process: &ProcessModel, intent: &ViewIntent) -> bool {
        match intent {
            ViewIntent::Select(id) => self.select_step(process, id),
            ViewIntent::Navigate(id) => self.navigate_to(process, id),
            ViewIntent::Dismiss(trigger) => self.dismiss(*trigger),
        }
    }

    /// Actionable next-step links of the open step, resolved once.
    pub fn next_step_links<'a>(&self, process: &'a ProcessModel) -> Vec<&'a Step> {
        self.active_step(process)
            .map(|step| process.resolved_next_steps(step))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::{DismissTrigger, PanelState, SelectionController, ViewIntent};
    use crate::model::process::ProcessModel;
    use crate::model::step::{Step, StepKind};

    fn process() -> ProcessModel {
        let mut first = Step::new("s1", "Intake", StepKind::Step);
        first.next_steps = vec!["s2".into(), "missing".into()];
        ProcessModel::new(vec![first, Step::new("s2", "Approve", StepKind::Gateway)]).unwrap()
    }

    #[test]
    fn starts_closed() {
        let controller = SelectionController::new();
        assert_eq!(controller.state(), &PanelState::Closed);
        assert!(!controller.is_open());
    }

    #[test]
    fn unknown_selection_is_noop() {
        let process = process();
        let mut controller = SelectionController::new();
        controller.select_step(&process, "s1");

        assert!(!controller.select_step(&process, "nope"));
        assert_eq!(controller.active_step_id(), Some("s1"));
    }

    #[test]
    fn navigate_retargets_open_panel() {
        let process = process();
        let mut controller = SelectionController::new();
        controller.apply(&process, &ViewIntent::Select("s1".into()));

        let links: Vec<&str> = controller
            .next_step_links(&process)
            .iter()
            .map(|s| s.id.as_str())
            .collect();
        assert_eq!(links, vec!["s2"]);

        assert!(controller.apply(&process, &ViewIntent::Navigate("s2".into())));
        assert_eq!(controller.state(), &PanelState::Open("s2".into()));
    }

    #[test]
    fn every_dismiss_trigger_closes() {
        let process = process();
        for trigger in [
            DismissTrigger::CancelKey,
            DismissTrigger::OutsideClick,
            DismissTrigger::CloseButton,
        ] {
            let mut controller = SelectionController::new();
            controller.select_step(&process, "s2");
            assert!(controller.dismiss(trigger));
            assert_eq!(controller.state(), &PanelState::Closed);
            assert!(!controller.dismiss(trigger));
        }
    }

    #[test]
    fn dismiss_trigger_parses_host_names() {
        assert_eq!(
            DismissTrigger::from_raw("Escape"),
            Some(DismissTrigger::CancelKey)
        );
        assert_eq!(
            DismissTrigger::from_raw("outside_click"),
            Some(DismissTrigger::OutsideClick)
        );
        assert_eq!(DismissTrigger::from_raw("swipe"), None);
    }
}
