//! Possession & Pass Tracking
//!
//! One authoritative transition per tick, run after every agent has moved:
//!
//! 1. Find the single agent in contact with the ball: the current holder if
//!    it still touches it, otherwise the nearest touching agent (lower track
//!    id on a tie)
//! 2. No contact: a holder loses the ball
//! 3. Holder in contact: dribble (carry, or occasionally push ahead and let go)
//! 4. Anyone else: judge a pass reception for offside, then take possession
//!    and, if this is a new kicker, kick and snapshot the pass
//!
//! Because only one agent can be resolved per tick, at most one agent ever
//! holds the ball.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::ball::Ball;
use super::config::EngineConfig;
use super::events::{EventLog, MatchEvent};
use super::geometry::Vec2;
use super::kick::{self, DribbleTouch, KickKind};
use super::offside::{self, OffsideVerdict};
use super::types::TeamSide;

/// Where one agent stood when a pass was struck.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentMark {
    pub track_id: usize,
    pub team: TeamSide,
    pub position: Vec2,
}

/// Frozen picture of the pitch at the moment of a kick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassSnapshot {
    pub kicker: usize,
    pub kicking_team: TeamSide,
    pub ball_position: Vec2,
    pub agents: Vec<AgentMark>,
}

impl PassSnapshot {
    pub fn new(kicker: usize, kicking_team: TeamSide, ball_position: Vec2, agents: Vec<AgentMark>) -> Self {
        Self { kicker, kicking_team, ball_position, agents }
    }

    pub fn capture(kicker: &Agent, ball_position: Vec2, agents: &[Agent]) -> Self {
        let marks = agents
            .iter()
            .map(|a| AgentMark { track_id: a.track_id, team: a.team, position: a.position })
            .collect();
        Self::new(kicker.track_id, kicker.team, ball_position, marks)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PossessionTracker {
    pub(crate) holder: Option<usize>,
    pub(crate) last_kicker: Option<usize>,
    /// Present exactly while a pass is in progress
    pub(crate) pass: Option<PassSnapshot>,
}

impl PossessionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn holder(&self) -> Option<usize> {
        self.holder
    }

    pub fn last_kicker(&self) -> Option<usize> {
        self.last_kicker
    }

    pub fn pass(&self) -> Option<&PassSnapshot> {
        self.pass.as_ref()
    }

    #[inline]
    pub fn pass_in_progress(&self) -> bool {
        self.pass.is_some()
    }

    /// Team of the current holder.
    pub fn team_in_possession(&self) -> Option<TeamSide> {
        self.holder.map(TeamSide::from_track_id)
    }

    pub fn end_pass(&mut self) {
        self.pass = None;
    }

    /// Install a pass directly (staged scenarios and tests).
    pub fn begin_pass(&mut self, snapshot: PassSnapshot) {
        self.last_kicker = Some(snapshot.kicker);
        self.pass = Some(snapshot);
    }

    /// Hand the ball to `track_id` without kicking.
    pub fn give(&mut self, track_id: usize) {
        self.holder = Some(track_id);
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// The one agent whose contact with the ball counts this tick.
    pub fn contact(&self, agents: &[Agent], ball: &Ball, cfg: &EngineConfig) -> Option<usize> {
        if let Some(holder) = self.holder.and_then(|id| agents.get(id)) {
            if holder.touches(ball.position, &cfg.physics) {
                return Some(holder.track_id);
            }
        }

        let mut best: Option<(usize, f32)> = None;
        for agent in agents {
            if !agent.touches(ball.position, &cfg.physics) {
                continue;
            }
            let d = agent.distance_to(ball.position);
            if best.map_or(true, |(_, bd)| d < bd) {
                best = Some((agent.track_id, d));
            }
        }
        best.map(|(id, _)| id)
    }

    /// Run this tick's possession transition.
    ///
    /// Returns an offside verdict when a pass reception is offside; the
    /// tracker is then left exactly as it was so the call can be replayed.
    pub fn resolve<R: Rng>(
        &mut self,
        agents: &[Agent],
        ball: &mut Ball,
        cfg: &EngineConfig,
        rng: &mut R,
        tick: u64,
        events: &mut EventLog,
    ) -> Option<OffsideVerdict> {
        let Some(id) = self.contact(agents, ball, cfg) else {
            if let Some(previous) = self.holder.take() {
                events.push(MatchEvent::PossessionChanged { tick, from: Some(previous), to: None });
            }
            return None;
        };
        let agent = agents.get(id)?;

        if self.holder == Some(id) {
            self.dribble(agent, ball, cfg, rng, tick, events);
            return None;
        }

        let last_kicker = self.last_kicker.and_then(|k| agents.get(k));
        let receiving_pass = self.pass.is_some()
            && last_kicker.is_some_and(|k| k.team == agent.team && k.track_id != id);
        if receiving_pass {
            let verdict = offside::evaluate(self.pass.as_ref(), agent, &cfg.pitch);
            if verdict.is_offside {
                return Some(verdict);
            }
            if let Some(kicker) = last_kicker {
                log::debug!("tick {}: agent {} receives from agent {}", tick, id, kicker.track_id);
                events.push(MatchEvent::PassReceived {
                    tick,
                    from: kicker.track_id,
                    to: id,
                    team: agent.team,
                });
            }
        }

        let previous = self.holder.replace(id);
        events.push(MatchEvent::PossessionChanged { tick, from: previous, to: Some(id) });

        if last_kicker.is_some_and(|k| k.team != agent.team) {
            self.end_pass();
        }

        if self.last_kicker != Some(id) {
            self.last_kicker = Some(id);
            let kick = kick::choose_kick(agent, agents, rng, &cfg.kick, cfg.physics.min_normalize_distance);
            ball.velocity = kick.velocity();
            self.pass = Some(PassSnapshot::capture(agent, ball.position, agents));
            log::debug!("tick {}: agent {} kicks ({:?})", tick, id, kick.kind());
            events.push(MatchEvent::Kick {
                tick,
                kicker: id,
                team: agent.team,
                kind: kick.kind(),
                velocity: ball.velocity,
            });
        }

        None
    }

    fn dribble<R: Rng>(
        &mut self,
        dribbler: &Agent,
        ball: &mut Ball,
        cfg: &EngineConfig,
        rng: &mut R,
        tick: u64,
        events: &mut EventLog,
    ) {
        let touch = kick::dribble(dribbler, rng, &cfg.kick);
        ball.velocity = touch.velocity();
        if let DribbleTouch::Release { velocity } = touch {
            self.holder = None;
            log::debug!("tick {}: agent {} pushes the ball ahead", tick, dribbler.track_id);
            events.push(MatchEvent::Kick {
                tick,
                kicker: dribbler.track_id,
                team: dribbler.team,
                kind: KickKind::DribbleRelease,
                velocity,
            });
            events.push(MatchEvent::PossessionChanged {
                tick,
                from: Some(dribbler.track_id),
                to: None,
            });
        }
    }
}
