//! Pitch dimensions and the derived bounds every component clamps to.

use serde::{Deserialize, Serialize};

use super::{ensure_positive, ensure_within};
use crate::engine::geometry::Vec2;
use crate::error::{EngineError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PitchConfig {
    /// Goal line to goal line
    pub width: f32,
    /// Touchline to touchline
    pub height: f32,
    /// Height of the goal mouth band, centred on `height / 2`
    pub goal_mouth_height: f32,
    /// Agents stay inside `[margin, size - margin]`
    pub agent_margin: f32,
    /// Where a bounced ball is clamped back to
    pub ball_margin: f32,
    /// Distance from the goal line the keeper guards from
    pub keeper_line_offset: f32,
    /// Depth of the box the keeper comes out into
    pub keeper_box_depth: f32,
    /// Keeper only comes out when the ball is further than this from both touchlines
    pub keeper_box_inset: f32,
}

impl Default for PitchConfig {
    fn default() -> Self {
        Self {
            width: 800.0,
            height: 600.0,
            goal_mouth_height: 100.0,
            agent_margin: 10.0,
            ball_margin: 5.0,
            keeper_line_offset: 30.0,
            keeper_box_depth: 120.0,
            keeper_box_inset: 150.0,
        }
    }
}

impl PitchConfig {
    #[inline]
    pub fn half_width(&self) -> f32 {
        self.width / 2.0
    }

    #[inline]
    pub fn half_height(&self) -> f32 {
        self.height / 2.0
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.half_width(), self.half_height())
    }

    #[inline]
    pub fn goal_top(&self) -> f32 {
        self.half_height() - self.goal_mouth_height / 2.0
    }

    #[inline]
    pub fn goal_bottom(&self) -> f32 {
        self.half_height() + self.goal_mouth_height / 2.0
    }

    /// Strictly inside the goal mouth band (posts are not in).
    #[inline]
    pub fn in_goal_mouth(&self, y: f32) -> bool {
        y > self.goal_top() && y < self.goal_bottom()
    }

    #[inline]
    pub fn agent_min(&self) -> Vec2 {
        Vec2::new(self.agent_margin, self.agent_margin)
    }

    #[inline]
    pub fn agent_max(&self) -> Vec2 {
        Vec2::new(self.width - self.agent_margin, self.height - self.agent_margin)
    }

    #[inline]
    pub fn clamp_agent(&self, pos: Vec2) -> Vec2 {
        pos.clamp_to(self.agent_min(), self.agent_max())
    }

    #[inline]
    pub fn contains_agent(&self, pos: Vec2) -> bool {
        pos.x >= self.agent_margin
            && pos.x <= self.width - self.agent_margin
            && pos.y >= self.agent_margin
            && pos.y <= self.height - self.agent_margin
    }

    #[inline]
    pub fn contains_ball(&self, pos: Vec2) -> bool {
        pos.x >= 0.0 && pos.x <= self.width && pos.y >= 0.0 && pos.y <= self.height
    }

    /// Scale for layout constants authored against an 800x600 pitch.
    #[inline]
    pub fn vertical_scale(&self) -> f32 {
        self.height / 600.0
    }

    pub(crate) fn validate(&self) -> Result<()> {
        ensure_positive("pitch.width", self.width)?;
        ensure_positive("pitch.height", self.height)?;
        ensure_positive("pitch.goal_mouth_height", self.goal_mouth_height)?;
        ensure_within("pitch.goal_mouth_height", self.goal_mouth_height, 0.0, self.height)?;
        // Clamp bounds on both axes must stay ordered
        let half_short_side = self.half_width().min(self.half_height());
        ensure_within("pitch.agent_margin", self.agent_margin, 0.0, half_short_side)?;
        ensure_within("pitch.ball_margin", self.ball_margin, 0.0, half_short_side)?;
        ensure_within("pitch.keeper_line_offset", self.keeper_line_offset, 0.0, self.half_width())?;
        ensure_within("pitch.keeper_box_depth", self.keeper_box_depth, 0.0, self.half_width())?;
        if self.keeper_box_inset * 2.0 >= self.height {
            return Err(EngineError::config(
                "pitch.keeper_box_inset",
                format!("{} leaves no band on a pitch {} high", self.keeper_box_inset, self.height),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_mouth_band() {
        let pitch = PitchConfig::default();
        assert!((pitch.goal_top() - 250.0).abs() < 1e-6);
        assert!((pitch.goal_bottom() - 350.0).abs() < 1e-6);
        assert!(pitch.in_goal_mouth(300.0));
        assert!(!pitch.in_goal_mouth(250.0));
        assert!(!pitch.in_goal_mouth(350.0));
    }

    #[test]
    fn test_clamp_agent() {
        let pitch = PitchConfig::default();
        assert_eq!(pitch.clamp_agent(Vec2::new(0.0, 700.0)), Vec2::new(10.0, 590.0));
        assert!(pitch.contains_agent(Vec2::new(10.0, 590.0)));
        assert!(!pitch.contains_agent(Vec2::new(9.9, 300.0)));
    }

    #[test]
    fn test_rejects_oversized_goal() {
        let pitch = PitchConfig { goal_mouth_height: 700.0, ..PitchConfig::default() };
        assert!(pitch.validate().is_err());
    }

    #[test]
    fn test_rejects_margins_wider_than_narrow_pitch() {
        // Tall and narrow: margins fit the height but not the width
        let narrow = PitchConfig {
            width: 100.0,
            keeper_line_offset: 20.0,
            keeper_box_depth: 40.0,
            ..PitchConfig::default()
        };
        assert!(narrow.validate().is_ok());

        let ball = PitchConfig { ball_margin: 60.0, ..narrow.clone() };
        assert!(matches!(
            ball.validate(),
            Err(EngineError::InvalidConfig { field, .. }) if field == "pitch.ball_margin"
        ));

        let agent = PitchConfig { agent_margin: 60.0, ..narrow };
        assert!(agent.validate().is_err());
    }
}
