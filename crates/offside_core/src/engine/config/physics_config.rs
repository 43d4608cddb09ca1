use serde::{Deserialize, Serialize};

use super::{ensure_ordered, ensure_positive, ensure_unit};
use crate::error::{EngineError, Result};

/// Movement and ball physics, per tick.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Velocity multiplier applied to a free ball every tick (< 1)
    pub friction: f32,
    pub max_ball_speed: f32,
    pub max_player_speed: f32,
    /// Per-agent pace multiplier, drawn once at creation
    pub speed_variance: (f32, f32),
    /// Fraction of speed kept after bouncing off a boundary
    pub bounce_restitution: f32,
    pub player_radius: f32,
    pub ball_radius: f32,
    /// Agents closer than this to their target stop steering and coast
    pub arrival_threshold: f32,
    /// Velocity multiplier while coasting
    pub idle_damping: f32,
    /// Floor for normalisation denominators
    pub min_normalize_distance: f32,
    /// Ball positions kept for drawing a trail
    pub trail_capacity: usize,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            friction: 0.97,
            max_ball_speed: 5.0,
            max_player_speed: 1.5,
            speed_variance: (0.8, 1.1),
            bounce_restitution: 0.5,
            player_radius: 10.0,
            ball_radius: 5.0,
            arrival_threshold: 5.0,
            idle_damping: 0.8,
            min_normalize_distance: 0.1,
            trail_capacity: 50,
        }
    }
}

impl PhysicsConfig {
    /// Centre distance under which an agent is touching the ball.
    #[inline]
    pub fn contact_distance(&self) -> f32 {
        self.player_radius + self.ball_radius
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_unit("physics.friction", self.friction)?;
        if self.friction <= 0.0 {
            return Err(EngineError::config("physics.friction", "must be in (0, 1]"));
        }
        ensure_positive("physics.max_ball_speed", self.max_ball_speed)?;
        ensure_positive("physics.max_player_speed", self.max_player_speed)?;
        ensure_ordered("physics.speed_variance", self.speed_variance)?;
        ensure_positive("physics.speed_variance", self.speed_variance.0)?;
        ensure_unit("physics.bounce_restitution", self.bounce_restitution)?;
        ensure_positive("physics.player_radius", self.player_radius)?;
        ensure_positive("physics.ball_radius", self.ball_radius)?;
        ensure_positive("physics.arrival_threshold", self.arrival_threshold)?;
        ensure_unit("physics.idle_damping", self.idle_damping)?;
        ensure_positive("physics.min_normalize_distance", self.min_normalize_distance)?;
        Ok(())
    }
}
