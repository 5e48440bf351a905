use serde::{Deserialize, Serialize};
use statig::prelude::*;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CursorEvent {
    Advance { to: u32 },
}

/// Shared storage for the cursor machine: the number of steps never changes
#[derive(Debug, Default)]
pub struct StepCursor {
    step_count: u32,
}

#[state_machine(initial = "State::active(1)")]
impl StepCursor {
    #[state]
    fn active(&mut self, step: &mut u32, event: &CursorEvent) -> Outcome<State> {
        match event {
            CursorEvent::Advance { to } => {
                if *to < 1 || *to > self.step_count {
                    tracing::warn!(
                        requested = %to,
                        step_count = %self.step_count,
                        "Step number is out of range"
                    );
                    return Handled;
                }
                if *to != *step + 1 {
                    tracing::debug!(
                        requested = %to,
                        active_step = %step,
                        "Cursor only moves to the step after the active one"
                    );
                    return Handled;
                }
                tracing::info!(from = %step, to = %to, "Setting active workflow step");
                Transition(State::active(*to))
            }
        }
    }
}

/// Forward-only cursor over steps `1..=step_count`, one step at a time
pub struct Cursor {
    machine: StateMachine<StepCursor>,
    step_count: u32,
}

impl Cursor {
    pub fn new(step_count: u32) -> Self {
        Self {
            machine: StepCursor { step_count }.state_machine(),
            step_count,
        }
    }

    pub fn current(&self) -> u32 {
        match self.machine.state() {
            State::Active { step } => *step,
        }
    }

    pub fn step_count(&self) -> u32 {
        self.step_count
    }

    pub fn contains(&self, step_number: u32) -> bool {
        (1..=self.step_count).contains(&step_number)
    }

    /// Try to move to `to`; only the next step is accepted.
    /// Returns whether the cursor moved.
    pub fn advance(&mut self, to: u32) -> bool {
        let before = self.current();
        self.machine.handle(&CursorEvent::Advance { to });
        self.current() != before
    }
}
