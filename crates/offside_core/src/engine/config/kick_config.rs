use serde::{Deserialize, Serialize};

use super::{ensure_non_negative, ensure_ordered, ensure_positive, ensure_unit};
use crate::error::Result;

/// Kick and dribble tuning.
///
/// Ranges are sampled uniformly by the engine's seeded generator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KickConfig {
    pub kick_power: f32,
    /// Chance a new kicker passes to a teammate instead of kicking forward
    pub pass_probability: f32,
    /// Added to each component of the unit pass direction
    pub pass_jitter: f32,
    pub pass_power_factor: (f32, f32),
    pub forward_power_factor: (f32, f32),
    /// Lateral component of a forward kick, as a multiple of kick power
    pub forward_lateral_factor: f32,
    /// Chance per tick that a dribbler pushes the ball ahead and lets go
    pub dribble_release_probability: f32,
    /// Forward share of kick power on a dribble release
    pub release_forward_factor: f32,
    /// How much of the dribbler's own velocity the released ball inherits
    pub release_carry_factor: f32,
    /// Ball velocity relative to the dribbler while carrying
    pub dribble_follow_factor: f32,
}

impl Default for KickConfig {
    fn default() -> Self {
        Self {
            kick_power: 4.0,
            pass_probability: 0.7,
            pass_jitter: 0.1,
            pass_power_factor: (0.9, 1.1),
            forward_power_factor: (0.8, 1.2),
            forward_lateral_factor: 0.25,
            dribble_release_probability: 0.05,
            release_forward_factor: 0.7,
            release_carry_factor: 1.5,
            dribble_follow_factor: 1.1,
        }
    }
}

impl KickConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        ensure_positive("kick.kick_power", self.kick_power)?;
        ensure_unit("kick.pass_probability", self.pass_probability)?;
        ensure_non_negative("kick.pass_jitter", self.pass_jitter)?;
        ensure_ordered("kick.pass_power_factor", self.pass_power_factor)?;
        ensure_ordered("kick.forward_power_factor", self.forward_power_factor)?;
        ensure_non_negative("kick.forward_lateral_factor", self.forward_lateral_factor)?;
        ensure_unit("kick.dribble_release_probability", self.dribble_release_probability)?;
        ensure_non_negative("kick.release_forward_factor", self.release_forward_factor)?;
        ensure_non_negative("kick.release_carry_factor", self.release_carry_factor)?;
        ensure_non_negative("kick.dribble_follow_factor", self.dribble_follow_factor)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(KickConfig::default().validate().is_ok());
    }

    #[test]
    fn test_probability_out_of_range() {
        let kick = KickConfig { pass_probability: 1.5, ..KickConfig::default() };
        assert!(kick.validate().is_err());
    }
}
