//! Steering helpers
//!
//! Velocities are produced directly (no acceleration model): an agent
//! either heads for its target at full pace or coasts to a stop.

use crate::engine::geometry::Vec2;

/// Seek: full speed towards `target`.
///
/// `floor` bounds the normalisation denominator so a zero offset yields a
/// zero velocity instead of NaN.
#[inline]
pub fn seek(current: Vec2, target: Vec2, speed: f32, floor: f32) -> Vec2 {
    if speed <= 0.0 {
        return Vec2::ZERO;
    }
    current.direction_to(target, floor) * speed
}

/// Idle damping: shed a fixed share of the current velocity.
#[inline]
pub fn damp(velocity: Vec2, factor: f32) -> Vec2 {
    velocity * factor
}

/// Seek while further than `arrival_threshold` from the target, otherwise
/// damp the current velocity.
pub fn seek_or_damp(
    current: Vec2,
    velocity: Vec2,
    target: Vec2,
    speed: f32,
    arrival_threshold: f32,
    damping: f32,
    floor: f32,
) -> Vec2 {
    let distance = current.distance(target).max(floor);
    if distance > arrival_threshold {
        seek(current, target, speed, floor)
    } else {
        damp(velocity, damping)
    }
}
