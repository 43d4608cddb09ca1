//! # Engine Configuration
//!
//! Every numeric constant the simulation uses lives here, grouped by
//! concern and supplied once at construction time.
//!
//! ## Presets
//! ```rust
//! use offside_core::engine::config::EngineConfig;
//!
//! let classic = EngineConfig::default();
//! let arcade = EngineConfig::arcade();
//! assert!(arcade.physics.max_ball_speed > classic.physics.max_ball_speed);
//! ```
//!
//! ## Environment Variables
//!
//! - `OFFSIDE_PROFILE`: select a preset (classic, arcade, training)

mod kick_config;
mod physics_config;
mod pitch_config;
mod timing_config;

pub use kick_config::KickConfig;
pub use physics_config::PhysicsConfig;
pub use pitch_config::PitchConfig;
pub use timing_config::TimingConfig;

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{EngineError, Result};

pub const PROFILE_ENV_VAR: &str = "OFFSIDE_PROFILE";

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineConfig {
    pub pitch: PitchConfig,
    pub physics: PhysicsConfig,
    pub kick: KickConfig,
    pub timing: TimingConfig,
}

impl EngineConfig {
    /// Baseline tuning (default)
    pub fn classic() -> Self {
        Self::default()
    }

    /// Quicker ball, harder kicks, more passing
    pub fn arcade() -> Self {
        let mut cfg = Self::default();
        cfg.physics.max_ball_speed = 7.0;
        cfg.physics.max_player_speed = 1.9;
        cfg.kick.kick_power = 5.5;
        cfg.kick.pass_probability = 0.8;
        cfg.timing.goal_pause_ticks = 45;
        cfg
    }

    /// Slowed down for studying offside calls; calls clear themselves
    pub fn training() -> Self {
        let mut cfg = Self::default();
        cfg.physics.max_ball_speed = 4.0;
        cfg.physics.max_player_speed = 1.0;
        cfg.kick.kick_power = 3.0;
        cfg.kick.pass_probability = 0.85;
        cfg.timing.goal_pause_ticks = 90;
        cfg.timing.offside_auto_resume_ticks = Some(120);
        cfg
    }

    /// Look a preset up by name.
    pub fn preset(name: &str) -> Result<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "classic" | "default" => Ok(Self::classic()),
            "arcade" => Ok(Self::arcade()),
            "training" => Ok(Self::training()),
            other => Err(EngineError::UnknownProfile(other.to_string())),
        }
    }

    /// Preset named by `OFFSIDE_PROFILE`, falling back to classic when the
    /// variable is unset or names nothing known.
    pub fn from_env_or_default() -> Self {
        match env::var(PROFILE_ENV_VAR) {
            Ok(name) => Self::preset(&name).unwrap_or_else(|err| {
                log::warn!("{}; using classic profile", err);
                Self::classic()
            }),
            Err(_) => Self::classic(),
        }
    }

    /// Parse from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        self.pitch.validate()?;
        self.physics.validate()?;
        self.kick.validate()?;
        self.timing.validate()?;
        Ok(())
    }
}

// ========== Validation helpers ==========

pub(crate) fn ensure_positive(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must be positive, got {}", value)))
    }
}

pub(crate) fn ensure_non_negative(field: &'static str, value: f32) -> Result<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must not be negative, got {}", value)))
    }
}

pub(crate) fn ensure_unit(field: &'static str, value: f32) -> Result<()> {
    ensure_within(field, value, 0.0, 1.0)
}

pub(crate) fn ensure_within(field: &'static str, value: f32, min: f32, max: f32) -> Result<()> {
    if value.is_finite() && value >= min && value <= max {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("must be {}-{}, got {}", min, max, value)))
    }
}

pub(crate) fn ensure_ordered(field: &'static str, range: (f32, f32)) -> Result<()> {
    if range.0.is_finite() && range.1.is_finite() && range.0 <= range.1 {
        Ok(())
    } else {
        Err(EngineError::config(field, format!("range {:?} is not ordered", range)))
    }
}
