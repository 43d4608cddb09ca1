//! Read-only match view
//!
//! An owned copy of everything a renderer needs, built between ticks. It
//! shares nothing with the engine, so it can be sent to another thread and
//! never shows a half-finished tick.

use serde::Serialize;

use super::geometry::Vec2;
use super::match_state::{MatchPhase, Scoreboard};
use super::offside::OffsideAssessment;
use super::types::{Role, TeamSide};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentView {
    pub track_id: usize,
    pub team: TeamSide,
    pub role: Role,
    pub slot: u8,
    pub position: Vec2,
    pub velocity: Vec2,
    pub target: Vec2,
    pub has_ball: bool,
    pub highlighted: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Oldest first
    pub trail: Vec<Vec2>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OffsideCallView {
    pub line_x: f32,
    pub receiver: usize,
    pub second_last_defender: usize,
    pub assessment: OffsideAssessment,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchView {
    pub tick: u64,
    pub phase: MatchPhase,
    pub score: Scoreboard,
    pub debug: bool,
    pub holder: Option<usize>,
    pub pass_in_progress: bool,
    pub agents: Vec<AgentView>,
    pub ball: BallView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offside: Option<OffsideCallView>,
}

impl MatchView {
    pub fn agent(&self, track_id: usize) -> Option<&AgentView> {
        self.agents.get(track_id)
    }

    pub fn holders(&self) -> usize {
        self.agents.iter().filter(|a| a.has_ball).count()
    }

    pub fn highlighted(&self) -> Vec<usize> {
        self.agents.iter().filter(|a| a.highlighted).map(|a| a.track_id).collect()
    }

    pub fn team(&self, team: TeamSide) -> impl Iterator<Item = &AgentView> {
        self.agents.iter().filter(move |a| a.team == team)
    }
}
