use thiserror::Error;

use crate::engine::TeamSide;

/// Construction-time failures.
///
/// Once a `MatchEngine` exists nothing it does can fail; every variant here
/// is raised while validating a plan, a roster or a configuration.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid team index: {0} (expected 0 or 1)")]
    InvalidTeamIndex(u8),

    #[error("Invalid team size for {team:?}: expected {expected}, found {found}")]
    InvalidTeamSize { team: TeamSide, expected: usize, found: usize },

    #[error("Invalid roster slot {slot} for {team:?}: slots run 1-11")]
    InvalidSlot { team: TeamSide, slot: u8 },

    #[error("Duplicate roster slot {slot} for {team:?}")]
    DuplicateSlot { team: TeamSide, slot: u8 },

    #[error("Home position of {team:?} slot {slot} is off the pitch: ({x}, {y})")]
    HomeOffPitch { team: TeamSide, slot: u8, x: f32, y: f32 },

    #[error("Invalid config `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("Unknown config profile: {0}")]
    UnknownProfile(String),

    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl EngineError {
    pub(crate) fn config(field: &'static str, reason: impl Into<String>) -> Self {
        EngineError::InvalidConfig { field, reason: reason.into() }
    }
}

pub type Result<T> = std::result::Result<T, EngineError>;
