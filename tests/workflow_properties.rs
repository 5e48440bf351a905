// Property-based tests for the workflow
// Cursor and restore invariants under arbitrary operator input

use proptest::prelude::*;
use proptest_derive::Arbitrary;
use std::collections::BTreeMap;
use std::rc::Rc;

use team_labeling_workflow::catalog::{CatalogSnapshot, WorkspaceInfo};
use team_labeling_workflow::workflow::types::{ClassDescriptor, UserDescriptor, UserRole};
use team_labeling_workflow::{InMemoryMetadataStore, StepEvent, Workflow};

// One thing an operator can do to a step
#[derive(Debug, Clone, Arbitrary)]
enum OperatorAction {
    Workspace(
        #[proptest(strategy = "1u32..=4")] u32,
        #[proptest(strategy = "workspace_strategy()")] Option<u64>,
    ),
    Classes(
        #[proptest(strategy = "1u32..=4")] u32,
        #[proptest(strategy = "class_names_strategy()")] Vec<String>,
    ),
    Reviewers(
        #[proptest(strategy = "1u32..=4")] u32,
        #[proptest(strategy = "user_ids_strategy()")] Vec<u64>,
    ),
    Labelers(
        #[proptest(strategy = "1u32..=4")] u32,
        #[proptest(strategy = "user_ids_strategy()")] Vec<u64>,
    ),
    Confirm(#[proptest(strategy = "1u32..=4")] u32),
}

// Includes a workspace the catalog does not know
fn workspace_strategy() -> impl Strategy<Value = Option<u64>> {
    prop_oneof![Just(None), Just(Some(10)), Just(Some(20)), Just(Some(99))]
}

fn class_names_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(
        prop_oneof![
            Just("car".to_string()),
            Just("person".to_string()),
            Just("bus".to_string()),
        ],
        0..4,
    )
}

fn user_ids_strategy() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..=5, 0..4)
}

fn catalog() -> Rc<CatalogSnapshot> {
    Rc::new(CatalogSnapshot {
        workspaces: vec![
            WorkspaceInfo { id: 10, team_id: 1, name: "Streets".to_string() },
            WorkspaceInfo { id: 20, team_id: 2, name: "Harbor".to_string() },
        ],
        classes: vec![
            ClassDescriptor::new("car", "rectangle").with_color("#FF0000"),
            ClassDescriptor::new("person", "polygon"),
        ],
        users: vec![
            UserDescriptor { id: 1, login: "anna".to_string(), role: UserRole::Reviewer, team_ids: vec![1, 2] },
            UserDescriptor { id: 2, login: "bob".to_string(), role: UserRole::Annotator, team_ids: vec![1] },
            UserDescriptor { id: 3, login: "cleo".to_string(), role: UserRole::Manager, team_ids: vec![2] },
            UserDescriptor { id: 4, login: "dev".to_string(), role: UserRole::Annotator, team_ids: vec![2] },
        ],
    })
}

fn workflow(step_count: u32) -> Workflow<InMemoryMetadataStore> {
    let catalog = catalog();
    Workflow::new(step_count, InMemoryMetadataStore::new(), |_| CatalogSnapshot::selectors(&catalog)).unwrap()
}

// Steps outside the workflow are rejected with an error; that is fine here
fn apply(workflow: &mut Workflow<InMemoryMetadataStore>, action: &OperatorAction) {
    let _ = match action.clone() {
        OperatorAction::Workspace(step, id) => workflow.dispatch(step, StepEvent::WorkspaceSelected(id)),
        OperatorAction::Classes(step, names) => workflow.dispatch(step, StepEvent::ClassesSelected(names)),
        OperatorAction::Reviewers(step, ids) => workflow.dispatch(step, StepEvent::ReviewersSelected(ids)),
        OperatorAction::Labelers(step, ids) => workflow.dispatch(step, StepEvent::LabelersSelected(ids)),
        OperatorAction::Confirm(step) => workflow.confirm(step).map(|_| ()),
    };
}

proptest! {
    #[test]
    fn cursor_stays_in_bounds_and_never_decreases(
        step_count in 1u32..=4,
        actions in prop::collection::vec(any::<OperatorAction>(), 0..40)
    ) {
        let mut workflow = workflow(step_count);
        let mut previous = workflow.active_step();
        let mut save_was_enabled = workflow.save_enabled();

        for action in &actions {
            apply(&mut workflow, action);

            let cursor = workflow.active_step();
            prop_assert!((1..=step_count).contains(&cursor));
            prop_assert!(cursor >= previous);
            prop_assert!(cursor <= previous + 1);

            // Every step up to the cursor is active, none beyond it
            for step in workflow.steps() {
                prop_assert_eq!(step.is_active(), step.step_number() <= cursor);
            }

            // Saving, once available, stays available and needs the last step
            // unless there is only one
            prop_assert!(!save_was_enabled || workflow.save_enabled());
            if workflow.save_enabled() && step_count > 1 {
                prop_assert_eq!(cursor, step_count);
            }

            previous = cursor;
            save_was_enabled = workflow.save_enabled();
        }
    }

    #[test]
    fn restoring_a_record_reproduces_it(
        filled in prop::collection::vec(any::<OperatorAction>(), 0..20),
        noise in prop::collection::vec(any::<OperatorAction>(), 0..20)
    ) {
        let mut source = workflow(4);
        for action in &filled {
            apply(&mut source, action);
        }
        let records: BTreeMap<u32, _> = source.to_records();

        // The target has its own unrelated edits, all of which get replaced
        let mut target = workflow(4);
        for action in &noise {
            apply(&mut target, action);
        }
        let restored = target.from_records(&records);

        prop_assert_eq!(restored, vec![1, 2, 3, 4]);
        prop_assert_eq!(target.to_records(), records);
    }
}
