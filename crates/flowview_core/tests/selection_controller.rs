use flowview_core::{DismissTrigger, PanelState, ProcessModel, SelectionController, Step, StepKind};
use proptest::prelude::*;

fn process() -> ProcessModel {
    ProcessModel::new(
        (1..=8)
            .map(|n| {
                let kind = if n % 2 == 0 {
                    StepKind::Gateway
                } else {
                    StepKind::Step
                };
                Step::new(format!("s{n}"), format!("Step {n}"), kind)
            })
            .collect(),
    )
    .unwrap()
}

#[test]
fn close_is_idempotent_from_any_state() {
    let process = process();
    let mut controller = SelectionController::new();

    controller.close();
    assert_eq!(controller.state(), &PanelState::Closed);
    controller.close();
    assert_eq!(controller.state(), &PanelState::Closed);

    controller.select_step(&process, "s4");
    assert!(controller.close());
    assert!(!controller.close());
    assert_eq!(controller.state(), &PanelState::Closed);
}

#[test]
fn dismiss_while_closed_is_noop() {
    let mut controller = SelectionController::new();
    assert!(!controller.dismiss(DismissTrigger::CancelKey));
    assert_eq!(controller.state(), &PanelState::Closed);
}

proptest! {
    #[test]
    fn unknown_ids_leave_state_unchanged(open_first in any::<bool>(), id in "[a-z]{1,6}") {
        let process = process();
        prop_assume!(!process.contains(&id));

        let mut controller = SelectionController::new();
        if open_first {
            controller.select_step(&process, "s2");
        }
        let before = controller.state().clone();

        prop_assert!(!controller.select_step(&process, &id));
        prop_assert!(!controller.navigate_to(&process, &id));
        prop_assert_eq!(controller.state(), &before);
    }

    #[test]
    fn known_ids_open_regardless_of_prior_state(prior in 0usize..9, target in 1usize..=8) {
        let process = process();
        let mut controller = SelectionController::new();
        if prior > 0 {
            controller.select_step(&process, &format!("s{prior}"));
        }

        let id = format!("s{target}");
        controller.select_step(&process, &id);
        prop_assert_eq!(controller.state(), &PanelState::Open(id));
    }
}
