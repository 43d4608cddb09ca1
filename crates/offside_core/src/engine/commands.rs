//! Collaborator commands
//!
//! Discrete intents forwarded by whatever drives the engine (a UI, the CLI,
//! a test). Commands are queued and applied atomically at the start of the
//! next `step()`, or applied immediately through `MatchEngine::apply`.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum MatchCommand {
    /// Full restart from any phase
    Restart,
    /// Leave `OffsideCalled` with an indirect free kick
    ResumeAfterOffside,
    /// Leave `GoalScored` without waiting for the pause
    ResumeAfterGoal,
    /// Flip the presentation debug flag
    ToggleDebug,
}

/// Whether a command changed anything.
///
/// `Ignored` is the no-op for a command issued in a phase it does not
/// apply to; it is never an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommandOutcome {
    Applied,
    Ignored,
}

impl CommandOutcome {
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, CommandOutcome::Applied)
    }
}

impl From<bool> for CommandOutcome {
    fn from(applied: bool) -> Self {
        if applied {
            CommandOutcome::Applied
        } else {
            CommandOutcome::Ignored
        }
    }
}

/// Pending commands (FIFO). One is taken per tick.
#[derive(Debug, Default, Clone)]
pub struct CommandQueue {
    queue: VecDeque<MatchCommand>,
}

impl CommandQueue {
    pub fn new() -> Self {
        Self { queue: VecDeque::new() }
    }

    pub fn enqueue(&mut self, cmd: MatchCommand) {
        self.queue.push_back(cmd);
    }

    pub fn pop_front(&mut self) -> Option<MatchCommand> {
        self.queue.pop_front()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}
