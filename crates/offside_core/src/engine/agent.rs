//! Simulated players
//!
//! An `Agent` is pure kinematic state plus identity. Who holds the ball and
//! who is highlighted are owned by the engine (possession tracker and match
//! state) and only appear on agents through the query view, so no two
//! agents can ever both claim the ball.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::{PhysicsConfig, PitchConfig};
use super::geometry::Vec2;
use super::steering;
use super::types::{Role, TeamSide};
use crate::error::{EngineError, Result};
use crate::PLAYERS_PER_TEAM;

/// One line of a team sheet: who plays where.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterEntry {
    /// 0 = Home, 1 = Away
    pub team: u8,
    pub role: Role,
    /// Jersey / formation slot, 1-11
    pub slot: u8,
    pub home: Vec2,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    /// Index into the engine roster (0-10 Home, 11-21 Away)
    pub track_id: usize,
    pub team: TeamSide,
    pub role: Role,
    pub slot: u8,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Formation anchor; restarts put the agent back here
    pub home_position: Vec2,
    /// Current steering goal
    pub target_position: Vec2,
    /// Individual pace multiplier
    pub speed_factor: f32,
}

impl Agent {
    pub fn new(
        track_id: usize,
        team: TeamSide,
        role: Role,
        slot: u8,
        home_position: Vec2,
        speed_factor: f32,
    ) -> Self {
        Self {
            track_id,
            team,
            role,
            slot,
            position: home_position,
            velocity: Vec2::ZERO,
            home_position,
            target_position: home_position,
            speed_factor,
        }
    }

    #[inline]
    pub fn speed(&self, physics: &PhysicsConfig) -> f32 {
        physics.max_player_speed * self.speed_factor
    }

    /// Set velocity for the current `target_position`.
    pub fn steer(&mut self, physics: &PhysicsConfig) {
        self.velocity = steering::seek_or_damp(
            self.position,
            self.velocity,
            self.target_position,
            self.speed(physics),
            physics.arrival_threshold,
            physics.idle_damping,
            physics.min_normalize_distance,
        );
    }

    /// Move by velocity and clamp into the agent bounds.
    pub fn integrate(&mut self, pitch: &PitchConfig) {
        self.position = pitch.clamp_agent(self.position + self.velocity);
    }

    #[inline]
    pub fn distance_to(&self, point: Vec2) -> f32 {
        self.position.distance(point)
    }

    #[inline]
    pub fn touches(&self, ball_position: Vec2, physics: &PhysicsConfig) -> bool {
        self.distance_to(ball_position) < physics.contact_distance()
    }

    pub fn reset_to_home(&mut self) {
        self.position = self.home_position;
        self.target_position = self.home_position;
        self.velocity = Vec2::ZERO;
    }
}

/// Validate a team sheet and turn it into agents ordered Home 1-11 then
/// Away 1-11, drawing each agent's pace from `rng`.
pub fn build_agents<R: Rng>(
    roster: &[RosterEntry],
    pitch: &PitchConfig,
    physics: &PhysicsConfig,
    rng: &mut R,
) -> Result<Vec<Agent>> {
    let mut ordered: Vec<(TeamSide, &RosterEntry)> = Vec::with_capacity(roster.len());
    for entry in roster {
        let team = TeamSide::from_index(entry.team)?;
        if !(1..=PLAYERS_PER_TEAM as u8).contains(&entry.slot) {
            return Err(EngineError::InvalidSlot { team, slot: entry.slot });
        }
        if !pitch.contains_agent(entry.home) {
            return Err(EngineError::HomeOffPitch {
                team,
                slot: entry.slot,
                x: entry.home.x,
                y: entry.home.y,
            });
        }
        ordered.push((team, entry));
    }

    for team in TeamSide::BOTH {
        let found = ordered.iter().filter(|(t, _)| *t == team).count();
        if found != PLAYERS_PER_TEAM {
            return Err(EngineError::InvalidTeamSize { team, expected: PLAYERS_PER_TEAM, found });
        }
        let mut seen = [false; PLAYERS_PER_TEAM + 1];
        for (_, entry) in ordered.iter().filter(|(t, _)| *t == team) {
            let slot = entry.slot as usize;
            if seen[slot] {
                return Err(EngineError::DuplicateSlot { team, slot: entry.slot });
            }
            seen[slot] = true;
        }
    }

    ordered.sort_by_key(|(team, entry)| (team.index(), entry.slot));

    let (lo, hi) = physics.speed_variance;
    let agents = ordered
        .into_iter()
        .enumerate()
        .map(|(track_id, (team, entry))| {
            let speed_factor = if hi > lo { rng.gen_range(lo..hi) } else { lo };
            Agent::new(track_id, team, entry.role, entry.slot, entry.home, speed_factor)
        })
        .collect();

    Ok(agents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::formation::default_roster;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn build(roster: &[RosterEntry]) -> Result<Vec<Agent>> {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        build_agents(roster, &PitchConfig::default(), &PhysicsConfig::default(), &mut rng)
    }

    #[test]
    fn test_default_roster_builds_22() {
        let agents = build(&default_roster(&PitchConfig::default())).unwrap();
        assert_eq!(agents.len(), 22);
        for (i, agent) in agents.iter().enumerate() {
            assert_eq!(agent.track_id, i);
            assert_eq!(agent.team, TeamSide::from_track_id(i));
            assert_eq!(agent.slot as usize, i % PLAYERS_PER_TEAM + 1);
            assert!(agent.speed_factor >= 0.8 && agent.speed_factor < 1.1);
            assert_eq!(agent.position, agent.home_position);
        }
    }

    #[test]
    fn test_roster_order_is_normalised() {
        let mut roster = default_roster(&PitchConfig::default());
        roster.reverse();
        let agents = build(&roster).unwrap();
        assert_eq!(agents[0].team, TeamSide::Home);
        assert_eq!(agents[0].slot, 1);
        assert_eq!(agents[21].team, TeamSide::Away);
        assert_eq!(agents[21].slot, 11);
    }

    #[test]
    fn test_short_team_rejected() {
        let mut roster = default_roster(&PitchConfig::default());
        roster.pop();
        assert!(matches!(
            build(&roster),
            Err(EngineError::InvalidTeamSize { team: TeamSide::Away, expected: 11, found: 10 })
        ));
    }

    #[test]
    fn test_bad_team_index_rejected() {
        let mut roster = default_roster(&PitchConfig::default());
        roster[3].team = 2;
        assert!(matches!(build(&roster), Err(EngineError::InvalidTeamIndex(2))));
    }

    #[test]
    fn test_duplicate_slot_rejected() {
        let mut roster = default_roster(&PitchConfig::default());
        roster[2].slot = roster[1].slot;
        assert!(matches!(build(&roster), Err(EngineError::DuplicateSlot { .. })));
    }

    #[test]
    fn test_home_off_pitch_rejected() {
        let mut roster = default_roster(&PitchConfig::default());
        roster[0].home = Vec2::new(-50.0, 300.0);
        assert!(matches!(build(&roster), Err(EngineError::HomeOffPitch { .. })));
    }

    #[test]
    fn test_steer_and_integrate_stays_in_bounds() {
        let pitch = PitchConfig::default();
        let physics = PhysicsConfig::default();
        let mut agent = Agent::new(0, TeamSide::Home, Role::Defender, 2, Vec2::new(11.0, 11.0), 1.0);
        agent.target_position = Vec2::new(-100.0, -100.0);
        for _ in 0..20 {
            agent.steer(&physics);
            agent.integrate(&pitch);
        }
        assert!(pitch.contains_agent(agent.position));
        assert_eq!(agent.position, Vec2::new(10.0, 10.0));
    }

    #[test]
    fn test_idle_agent_coasts_to_stop() {
        let pitch = PitchConfig::default();
        let physics = PhysicsConfig::default();
        let mut agent =
            Agent::new(0, TeamSide::Home, Role::Midfielder, 6, Vec2::new(300.0, 300.0), 1.0);
        agent.velocity = Vec2::new(1.0, 0.0);
        agent.target_position = agent.position;
        agent.steer(&physics);
        assert!((agent.velocity.x - 0.8).abs() < 1e-6);
        agent.integrate(&pitch);
        assert!((agent.position.x - 300.8).abs() < 1e-4);
    }

    #[test]
    fn test_touches_uses_radii() {
        let physics = PhysicsConfig::default();
        let agent = Agent::new(0, TeamSide::Home, Role::Forward, 9, Vec2::new(100.0, 100.0), 1.0);
        assert!(agent.touches(Vec2::new(114.9, 100.0), &physics));
        assert!(!agent.touches(Vec2::new(115.0, 100.0), &physics));
    }
}
