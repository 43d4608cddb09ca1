//! Match events
//!
//! Everything notable a tick produced, for collaborators that narrate or
//! record a match. The engine keeps a bounded backlog; `drain` hands it over.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::geometry::Vec2;
use super::kick::KickKind;
use super::match_state::MatchPhase;
use super::types::{GoalSide, TeamSide};

/// Oldest events are dropped past this many undrained entries.
pub const EVENT_BACKLOG: usize = 4096;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum MatchEvent {
    Kick {
        tick: u64,
        kicker: usize,
        team: TeamSide,
        #[serde(flatten)]
        kind: KickKind,
        velocity: Vec2,
    },
    PassReceived {
        tick: u64,
        from: usize,
        to: usize,
        team: TeamSide,
    },
    PossessionChanged {
        tick: u64,
        from: Option<usize>,
        to: Option<usize>,
    },
    OffsideCalled {
        tick: u64,
        receiver: usize,
        second_last_defender: usize,
        line_x: f32,
    },
    Goal {
        tick: u64,
        side: GoalSide,
        scoring_team: TeamSide,
        home: u32,
        away: u32,
    },
    PlayResumed {
        tick: u64,
        from: MatchPhase,
    },
    Restarted {
        tick: u64,
    },
}

impl MatchEvent {
    pub fn tick(&self) -> u64 {
        match *self {
            MatchEvent::Kick { tick, .. }
            | MatchEvent::PassReceived { tick, .. }
            | MatchEvent::PossessionChanged { tick, .. }
            | MatchEvent::OffsideCalled { tick, .. }
            | MatchEvent::Goal { tick, .. }
            | MatchEvent::PlayResumed { tick, .. }
            | MatchEvent::Restarted { tick } => tick,
        }
    }
}

/// Running totals over every event ever pushed, drained or not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EventTotals {
    pub kicks: u64,
    pub passes_received: u64,
    pub offside_calls: u64,
    pub goals: u64,
    pub restarts: u64,
}

impl EventTotals {
    fn record(&mut self, event: &MatchEvent) {
        match event {
            MatchEvent::Kick { .. } => self.kicks += 1,
            MatchEvent::PassReceived { .. } => self.passes_received += 1,
            MatchEvent::OffsideCalled { .. } => self.offside_calls += 1,
            MatchEvent::Goal { .. } => self.goals += 1,
            MatchEvent::Restarted { .. } => self.restarts += 1,
            MatchEvent::PossessionChanged { .. } | MatchEvent::PlayResumed { .. } => {}
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: VecDeque<MatchEvent>,
    dropped: u64,
    totals: EventTotals,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: MatchEvent) {
        self.totals.record(&event);
        if self.events.len() == EVENT_BACKLOG {
            self.events.pop_front();
            self.dropped += 1;
        }
        self.events.push_back(event);
    }

    pub fn drain(&mut self) -> Vec<MatchEvent> {
        self.events.drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost to the backlog bound since construction.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn totals(&self) -> EventTotals {
        self.totals
    }

    pub fn iter(&self) -> impl Iterator<Item = &MatchEvent> {
        self.events.iter()
    }
}
