//! Closed enumerations shared across the engine: team, role, goal side.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::PLAYERS_PER_TEAM;

/// Team identity. Home is team 0 and attacks towards increasing x;
/// Away is team 1 and attacks towards decreasing x.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TeamSide {
    #[default]
    Home,
    Away,
}

impl TeamSide {
    pub const BOTH: [TeamSide; 2] = [TeamSide::Home, TeamSide::Away];

    /// Numeric team id (0 = Home, 1 = Away)
    #[inline]
    pub const fn index(self) -> u8 {
        match self {
            TeamSide::Home => 0,
            TeamSide::Away => 1,
        }
    }

    pub fn from_index(index: u8) -> Result<Self> {
        match index {
            0 => Ok(TeamSide::Home),
            1 => Ok(TeamSide::Away),
            other => Err(EngineError::InvalidTeamIndex(other)),
        }
    }

    /// Team owning a track id (0-10: Home, 11-21: Away)
    #[inline]
    pub const fn from_track_id(track_id: usize) -> Self {
        if track_id < PLAYERS_PER_TEAM {
            TeamSide::Home
        } else {
            TeamSide::Away
        }
    }

    #[inline]
    pub const fn opponent(self) -> Self {
        match self {
            TeamSide::Home => TeamSide::Away,
            TeamSide::Away => TeamSide::Home,
        }
    }

    /// Sign of the x axis this team attacks along.
    #[inline]
    pub const fn attack_direction(self) -> f32 {
        match self {
            TeamSide::Home => 1.0,
            TeamSide::Away => -1.0,
        }
    }

    /// `a` is strictly closer to this team's target goal line than `b`.
    #[inline]
    pub fn is_ahead(self, a: f32, b: f32) -> bool {
        match self {
            TeamSide::Home => a > b,
            TeamSide::Away => a < b,
        }
    }

    /// x of the goal line this team attacks.
    #[inline]
    pub fn attacked_goal_line(self, pitch_width: f32) -> f32 {
        match self {
            TeamSide::Home => pitch_width,
            TeamSide::Away => 0.0,
        }
    }

    /// x of the goal line this team defends.
    #[inline]
    pub fn own_goal_line(self, pitch_width: f32) -> f32 {
        self.opponent().attacked_goal_line(pitch_width)
    }

    /// Mirror a fraction of pitch width into this team's attacking frame.
    ///
    /// Formation anchors are written for Home; Away reads them as `1 - f`.
    #[inline]
    pub fn mirror_fraction(self, fraction: f32) -> f32 {
        match self {
            TeamSide::Home => fraction,
            TeamSide::Away => 1.0 - fraction,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Goalkeeper,
    Defender,
    Midfielder,
    Forward,
}

impl Role {
    pub const fn short_code(self) -> &'static str {
        match self {
            Role::Goalkeeper => "GK",
            Role::Defender => "DEF",
            Role::Midfielder => "MID",
            Role::Forward => "FWD",
        }
    }

    /// Roles a kicker looks for when choosing a pass target.
    #[inline]
    pub const fn is_pass_target(self) -> bool {
        matches!(self, Role::Midfielder | Role::Forward)
    }
}

/// Which goal mouth the ball crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSide {
    /// x < 0, the goal Home defends
    Left,
    /// x > width, the goal Away defends
    Right,
}

impl GoalSide {
    pub const fn defending_team(self) -> TeamSide {
        match self {
            GoalSide::Left => TeamSide::Home,
            GoalSide::Right => TeamSide::Away,
        }
    }

    pub const fn scoring_team(self) -> TeamSide {
        self.defending_team().opponent()
    }
}
