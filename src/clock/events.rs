use serde::Serialize;

use super::countdown::ModeKind;

/// Boundary events produced by a clock tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClockEvent {
    TrackFinished,
    CycleComplete { finished: ModeKind, next: ModeKind },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

impl RunState {
    pub fn from_flag(running: bool) -> Self {
        if running {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }
}
