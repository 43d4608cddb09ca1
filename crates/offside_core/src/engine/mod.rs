//! Simulation and adjudication engine.

pub mod agent;
pub mod ball;
pub mod commands;
pub mod config;
pub mod debug_flags;
pub mod events;
pub mod formation;
pub mod geometry;
pub mod kick;
pub mod match_engine;
pub mod match_state;
pub mod offside;
pub mod possession;
pub mod steering;
pub mod types;
pub mod view;

pub use agent::{Agent, RosterEntry};
pub use ball::Ball;
pub use commands::{CommandOutcome, MatchCommand};
pub use events::{EventTotals, MatchEvent};
pub use geometry::Vec2;
pub use kick::KickKind;
pub use match_engine::{MatchCounters, MatchEngine, MatchPlan, StagedScenario};
pub use match_state::{MatchPhase, OffsideCall, Scoreboard};
pub use offside::{explanation_lines, OffsideAssessment, OffsideVerdict};
pub use possession::{AgentMark, PassSnapshot, PossessionTracker};
pub use types::{GoalSide, Role, TeamSide};
pub use view::{AgentView, BallView, MatchView, OffsideCallView};
