//! Kick selection and dribbling.
//!
//! Pure functions of the kicker, the roster and the engine's generator.
//! Nothing here touches the ball; the possession tracker applies the
//! returned velocity.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::config::KickConfig;
use super::geometry::Vec2;

/// What a new kicker does with the ball.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Kick {
    /// Aimed at a teammate
    Pass { target: usize, velocity: Vec2 },
    /// Struck towards the attacked goal line
    Forward { velocity: Vec2 },
}

impl Kick {
    pub fn velocity(&self) -> Vec2 {
        match *self {
            Kick::Pass { velocity, .. } | Kick::Forward { velocity } => velocity,
        }
    }

    pub fn kind(&self) -> KickKind {
        match *self {
            Kick::Pass { target, .. } => KickKind::Pass { target },
            Kick::Forward { .. } => KickKind::Forward,
        }
    }
}

/// How the ball left a player's foot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum KickKind {
    Pass { target: usize },
    Forward,
    DribbleRelease,
}

/// Dribbler's touch on the ball this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DribbleTouch {
    /// Pushed ahead; possession ends
    Release { velocity: Vec2 },
    /// Kept at the dribbler's feet
    Carry { velocity: Vec2 },
}

impl DribbleTouch {
    pub fn velocity(&self) -> Vec2 {
        match *self {
            DribbleTouch::Release { velocity } | DribbleTouch::Carry { velocity } => velocity,
        }
    }
}

#[inline]
fn sample<R: Rng>(rng: &mut R, (lo, hi): (f32, f32)) -> f32 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

#[inline]
fn jitter<R: Rng>(rng: &mut R, amount: f32) -> f32 {
    sample(rng, (-amount, amount))
}

/// Teammates the kicker may pass to, in roster order.
pub fn pass_candidates<'a>(kicker: &Agent, agents: &'a [Agent]) -> Vec<&'a Agent> {
    agents
        .iter()
        .filter(|a| a.team == kicker.team && a.track_id != kicker.track_id && a.role.is_pass_target())
        .collect()
}

/// Pick and shape the kick for a player who has just won the ball.
///
/// No pass is attempted (and no pass roll drawn) when nobody is eligible.
pub fn choose_kick<R: Rng>(
    kicker: &Agent,
    agents: &[Agent],
    rng: &mut R,
    cfg: &KickConfig,
    floor: f32,
) -> Kick {
    let candidates = pass_candidates(kicker, agents);
    if !candidates.is_empty() && rng.gen::<f32>() < cfg.pass_probability {
        if let Some(target) = candidates.choose(rng) {
            let mut dir = kicker.position.direction_to(target.position, floor);
            dir.x += jitter(rng, cfg.pass_jitter);
            dir.y += jitter(rng, cfg.pass_jitter);
            let vx = dir.x * cfg.kick_power * sample(rng, cfg.pass_power_factor);
            let vy = dir.y * cfg.kick_power * sample(rng, cfg.pass_power_factor);
            return Kick::Pass { target: target.track_id, velocity: Vec2::new(vx, vy) };
        }
    }

    let attack = kicker.team.attack_direction();
    let vx = attack * cfg.kick_power * sample(rng, cfg.forward_power_factor);
    let vy = jitter(rng, cfg.forward_lateral_factor) * cfg.kick_power;
    Kick::Forward { velocity: Vec2::new(vx, vy) }
}

/// One dribbling touch: occasionally push the ball ahead, otherwise keep
/// it just in front of the dribbler.
pub fn dribble<R: Rng>(dribbler: &Agent, rng: &mut R, cfg: &KickConfig) -> DribbleTouch {
    if rng.gen::<f32>() < cfg.dribble_release_probability {
        let push = dribbler.team.attack_direction() * cfg.kick_power * cfg.release_forward_factor;
        let velocity = Vec2::new(
            push + dribbler.velocity.x * cfg.release_carry_factor,
            dribbler.velocity.y * cfg.release_carry_factor,
        );
        DribbleTouch::Release { velocity }
    } else {
        DribbleTouch::Carry { velocity: dribbler.velocity * cfg.dribble_follow_factor }
    }
}
