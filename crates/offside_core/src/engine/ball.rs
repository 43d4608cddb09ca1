//! Ball state and per-tick physics
//!
//! `Ball::advance` integrates one tick:
//! 1. record the pre-move position in the trail
//! 2. move by velocity, then apply friction
//! 3. cap speed by rescaling the velocity vector
//! 4. resolve the goal lines (goal or bounce) and the touchlines (bounce)

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use super::config::{PhysicsConfig, PitchConfig};
use super::geometry::Vec2;
use super::types::GoalSide;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub position: Vec2,
    pub velocity: Vec2,
    /// Recent positions, oldest first; rendering only
    trail: VecDeque<Vec2>,
    trail_capacity: usize,
}

impl Ball {
    pub fn new(position: Vec2, trail_capacity: usize) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            trail: VecDeque::with_capacity(trail_capacity),
            trail_capacity,
        }
    }

    /// Ball at rest on the centre spot.
    pub fn at_center(pitch: &PitchConfig, physics: &PhysicsConfig) -> Self {
        Self::new(pitch.center(), physics.trail_capacity)
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn trail(&self) -> &VecDeque<Vec2> {
        &self.trail
    }

    /// Put the ball dead at `position` (free kick spot, kickoff).
    pub fn place(&mut self, position: Vec2) {
        self.position = position;
        self.velocity = Vec2::ZERO;
    }

    /// Back to the centre spot with the trail wiped.
    pub fn reset(&mut self, pitch: &PitchConfig) {
        self.place(pitch.center());
        self.trail.clear();
    }

    fn record_trail(&mut self) {
        if self.trail_capacity == 0 {
            return;
        }
        if self.trail.len() == self.trail_capacity {
            self.trail.pop_front();
        }
        self.trail.push_back(self.position);
    }

    /// Advance one tick. Returns the goal mouth crossed, if any.
    ///
    /// On a goal the ball is left where it crossed; the caller owns the
    /// restart. Everything else is a bounce.
    pub fn advance(&mut self, pitch: &PitchConfig, physics: &PhysicsConfig) -> Option<GoalSide> {
        self.record_trail();

        self.position += self.velocity;
        self.velocity = self.velocity * physics.friction;
        self.velocity = self.velocity.clamp_length(physics.max_ball_speed);

        if self.position.x < 0.0 || self.position.x > pitch.width {
            if pitch.in_goal_mouth(self.position.y) {
                let side = if self.position.x < 0.0 { GoalSide::Left } else { GoalSide::Right };
                return Some(side);
            }
            self.velocity.x = -self.velocity.x * physics.bounce_restitution;
            self.position.x =
                self.position.x.clamp(pitch.ball_margin, pitch.width - pitch.ball_margin);
        }

        if self.position.y < 0.0 || self.position.y > pitch.height {
            self.velocity.y = -self.velocity.y * physics.bounce_restitution;
            self.position.y =
                self.position.y.clamp(pitch.ball_margin, pitch.height - pitch.ball_margin);
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configs() -> (PitchConfig, PhysicsConfig) {
        (PitchConfig::default(), PhysicsConfig::default())
    }

    #[test]
    fn test_friction_decays_velocity() {
        let (pitch, physics) = configs();
        let mut ball = Ball::at_center(&pitch, &physics);
        ball.velocity = Vec2::new(2.0, 0.0);
        assert_eq!(ball.advance(&pitch, &physics), None);
        assert!((ball.position.x - 402.0).abs() < 1e-4);
        assert!((ball.velocity.x - 1.94).abs() < 1e-4);
    }

    #[test]
    fn test_speed_capped_after_advance() {
        let (pitch, physics) = configs();
        let mut ball = Ball::at_center(&pitch, &physics);
        ball.velocity = Vec2::new(30.0, 40.0);
        ball.advance(&pitch, &physics);
        assert!(ball.speed() <= physics.max_ball_speed + 1e-4);
        // Direction survives the cap
        assert!((ball.velocity.y / ball.velocity.x - 4.0 / 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_goal_on_right() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(798.0, 300.0), 10);
        ball.velocity = Vec2::new(5.0, 0.0);
        assert_eq!(ball.advance(&pitch, &physics), Some(GoalSide::Right));
    }

    #[test]
    fn test_goal_on_left() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(2.0, 320.0), 10);
        ball.velocity = Vec2::new(-5.0, 0.0);
        assert_eq!(ball.advance(&pitch, &physics), Some(GoalSide::Left));
    }

    #[test]
    fn test_goal_line_outside_mouth_bounces() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(798.0, 100.0), 10);
        ball.velocity = Vec2::new(4.0, 0.0);
        assert_eq!(ball.advance(&pitch, &physics), None);
        assert!((ball.position.x - (pitch.width - pitch.ball_margin)).abs() < 1e-4);
        // Reversed with half the energy (after friction)
        assert!((ball.velocity.x + 4.0 * 0.97 * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_touchline_bounce() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(400.0, 2.0), 10);
        ball.velocity = Vec2::new(0.0, -4.0);
        assert_eq!(ball.advance(&pitch, &physics), None);
        assert!((ball.position.y - pitch.ball_margin).abs() < 1e-4);
        assert!(ball.velocity.y > 0.0);
        assert!((ball.velocity.y - 4.0 * 0.97 * 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_touchline_in_goal_band_x_still_bounces() {
        // Leaving over the top touchline never scores, whatever x is
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(400.0, 598.0), 10);
        ball.velocity = Vec2::new(0.0, 4.0);
        assert_eq!(ball.advance(&pitch, &physics), None);
        assert!(pitch.contains_ball(ball.position));
    }

    #[test]
    fn test_trail_is_bounded() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(pitch.center(), 3);
        ball.velocity = Vec2::new(1.0, 0.0);
        for _ in 0..10 {
            ball.advance(&pitch, &physics);
        }
        assert_eq!(ball.trail().len(), 3);
        // Oldest first
        let xs: Vec<f32> = ball.trail().iter().map(|p| p.x).collect();
        assert!(xs[0] < xs[1] && xs[1] < xs[2]);
    }

    #[test]
    fn test_reset_clears_trail() {
        let (pitch, physics) = configs();
        let mut ball = Ball::new(Vec2::new(100.0, 100.0), 5);
        ball.velocity = Vec2::new(1.0, 1.0);
        ball.advance(&pitch, &physics);
        ball.reset(&pitch);
        assert_eq!(ball.position, pitch.center());
        assert_eq!(ball.velocity, Vec2::ZERO);
        assert!(ball.trail().is_empty());
    }
}
