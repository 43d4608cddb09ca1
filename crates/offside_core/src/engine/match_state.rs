//! Match phase, score and the active offside call.
//!
//! Transitions:
//! - `Playing -> OffsideCalled` on an offside verdict, left by an explicit resume
//! - `Playing -> GoalScored` on a goal, left after a tick-counted pause or a resume
//! - any phase -> `Playing` on restart
//!
//! Every transition method refuses (returns `false`/`None`) when called from
//! a phase it does not apply to, so commands issued at the wrong moment are
//! no-ops.

use serde::{Deserialize, Serialize};

use super::offside::{OffsideAssessment, OffsideVerdict};
use super::types::{GoalSide, TeamSide};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchPhase {
    #[default]
    Playing,
    OffsideCalled,
    GoalScored,
}

impl MatchPhase {
    /// Ball and agents hold still in this phase.
    #[inline]
    pub fn is_frozen(self) -> bool {
        !matches!(self, MatchPhase::Playing)
    }

    pub fn name(self) -> &'static str {
        match self {
            MatchPhase::Playing => "playing",
            MatchPhase::OffsideCalled => "offside_called",
            MatchPhase::GoalScored => "goal_scored",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Scoreboard {
    pub home: u32,
    pub away: u32,
}

impl Scoreboard {
    pub fn get(&self, team: TeamSide) -> u32 {
        match team {
            TeamSide::Home => self.home,
            TeamSide::Away => self.away,
        }
    }

    pub fn credit(&mut self, team: TeamSide) {
        match team {
            TeamSide::Home => self.home += 1,
            TeamSide::Away => self.away += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.home + self.away
    }
}

/// A standing offside call, kept until play resumes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OffsideCall {
    pub receiver: usize,
    pub second_last_defender: usize,
    pub line_x: f32,
    pub assessment: OffsideAssessment,
    pub called_at: u64,
}

impl OffsideCall {
    /// Only a verdict that names both agents and the line can stand.
    pub fn from_verdict(verdict: &OffsideVerdict, tick: u64) -> Option<Self> {
        if !verdict.is_offside {
            return None;
        }
        Some(Self {
            receiver: verdict.receiver?,
            second_last_defender: verdict.second_last_defender?,
            line_x: verdict.line_x?,
            assessment: verdict.assessment?,
            called_at: tick,
        })
    }

    #[inline]
    pub fn highlights(&self, track_id: usize) -> bool {
        track_id == self.receiver || track_id == self.second_last_defender
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchState {
    phase: MatchPhase,
    score: Scoreboard,
    offside_call: Option<OffsideCall>,
    last_goal: Option<GoalSide>,
    /// Ticks spent in the current phase
    phase_ticks: u32,
    /// Presentation only
    debug: bool,
}

impl MatchState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn score(&self) -> Scoreboard {
        self.score
    }

    pub fn offside_call(&self) -> Option<&OffsideCall> {
        self.offside_call.as_ref()
    }

    pub fn last_goal(&self) -> Option<GoalSide> {
        self.last_goal
    }

    pub fn phase_ticks(&self) -> u32 {
        self.phase_ticks
    }

    pub fn debug(&self) -> bool {
        self.debug
    }

    pub fn is_highlighted(&self, track_id: usize) -> bool {
        self.offside_call.is_some_and(|call| call.highlights(track_id))
    }

    fn enter(&mut self, phase: MatchPhase) {
        self.phase = phase;
        self.phase_ticks = 0;
    }

    /// Count one frozen tick.
    pub fn tick_pause(&mut self) -> u32 {
        self.phase_ticks = self.phase_ticks.saturating_add(1);
        self.phase_ticks
    }

    /// `Playing -> OffsideCalled`.
    pub fn call_offside(&mut self, verdict: &OffsideVerdict, tick: u64) -> Option<OffsideCall> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        let call = OffsideCall::from_verdict(verdict, tick)?;
        self.offside_call = Some(call);
        self.enter(MatchPhase::OffsideCalled);
        Some(call)
    }

    /// `Playing -> GoalScored`, crediting the team that scored.
    pub fn score_goal(&mut self, side: GoalSide) -> Option<TeamSide> {
        if self.phase != MatchPhase::Playing {
            return None;
        }
        let scorer = side.scoring_team();
        self.score.credit(scorer);
        self.last_goal = Some(side);
        self.enter(MatchPhase::GoalScored);
        Some(scorer)
    }

    /// `OffsideCalled -> Playing`, handing back the call that was cleared.
    pub fn resume_from_offside(&mut self) -> Option<OffsideCall> {
        if self.phase != MatchPhase::OffsideCalled {
            return None;
        }
        let call = self.offside_call.take();
        self.enter(MatchPhase::Playing);
        call
    }

    /// `GoalScored -> Playing`.
    pub fn resume_from_goal(&mut self) -> bool {
        if self.phase != MatchPhase::GoalScored {
            return false;
        }
        self.enter(MatchPhase::Playing);
        true
    }

    /// Back to kickoff from anywhere. The debug flag survives.
    pub fn restart(&mut self) {
        self.score = Scoreboard::default();
        self.offside_call = None;
        self.last_goal = None;
        self.enter(MatchPhase::Playing);
    }

    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }
}
