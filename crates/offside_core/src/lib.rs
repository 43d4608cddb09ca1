//! # offside_core - Two-Team Match Simulator with Offside Adjudication
//!
//! Fixed-tick simulation of two teams of eleven agents chasing a ball on a
//! rectangular pitch. The engine owns every piece of mutable state and
//! exposes a pure step-and-query contract:
//!
//! - `MatchEngine::step()` advances one frame
//! - `MatchEngine::view()` returns an immutable snapshot for rendering
//! - `MatchEngine::apply()` takes restart / resume / debug commands
//!
//! Offside is judged at the instant a pass is received, against the
//! positions captured when the pass was struck.
//!
//! ## Features
//! - Deterministic (same seed = same match)
//! - Role-driven formation targeting (GK / DEF / MID / FWD)
//! - Ball physics with friction, speed cap, bounces and goal detection
//! - Match state machine (Playing / OffsideCalled / GoalScored)

// Simulation APIs pass a lot of shared state around
#![allow(clippy::too_many_arguments)]

pub mod engine;
pub mod error;

pub use engine::config::{EngineConfig, KickConfig, PhysicsConfig, PitchConfig, TimingConfig};
pub use engine::{
    AgentView, BallView, CommandOutcome, GoalSide, MatchCommand, MatchEngine, MatchEvent,
    MatchPhase, MatchPlan, MatchView, OffsideAssessment, OffsideVerdict, PassSnapshot, Role,
    RosterEntry, TeamSide, Vec2,
};
pub use error::{EngineError, Result};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Agents per team.
pub const PLAYERS_PER_TEAM: usize = 11;

/// Agents on the pitch.
pub const TOTAL_PLAYERS: usize = PLAYERS_PER_TEAM * 2;
