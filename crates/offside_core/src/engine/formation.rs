//! Formation Model
//!
//! Pure targeting policy: where each agent wants to be this tick, given the
//! ball and which team (if any) holds it.
//!
//! - Goalkeeper: guards the goal mouth, comes out only for a ball inside
//!   its own box
//! - The two agents of each team nearest the ball chase it
//! - Everyone else takes a role anchor, which depends on whether the team
//!   is attacking or defending
//!
//! Anchors are written for Home (attacking +x) as fractions of pitch width
//! and mirrored for Away. Lateral spreads are authored for a 600-high pitch
//! and scaled by `PitchConfig::vertical_scale`.

use super::agent::{Agent, RosterEntry};
use super::config::PitchConfig;
use super::geometry::Vec2;
use super::types::{Role, TeamSide};

/// Agents per team that chase the ball instead of holding shape.
pub const CHASERS_PER_TEAM: usize = 2;

/// The forward who stays up when the team defends.
pub const STRIKER_SLOT: u8 = 9;

/// Role anchor: x as a fraction of width (Home frame), y as a spread around
/// the half-height keyed on roster slot.
#[derive(Debug, Clone, Copy, PartialEq)]
struct RoleAnchor {
    x_fraction: f32,
    /// Slot whose spread is zero
    pivot_slot: u8,
    /// Spread per slot away from the pivot (600-high pitch units)
    spread: f32,
}

impl RoleAnchor {
    const fn new(x_fraction: f32, pivot_slot: u8, spread: f32) -> Self {
        Self { x_fraction, pivot_slot, spread }
    }

    fn lateral_offset(&self, slot: u8, scale: f32) -> f32 {
        (slot as f32 - self.pivot_slot as f32) * self.spread * scale
    }

    fn x_for(&self, team: TeamSide, pitch: &PitchConfig) -> f32 {
        pitch.width * team.mirror_fraction(self.x_fraction)
    }
}

const ATTACK_DEFENDER: RoleAnchor = RoleAnchor::new(0.3, 2, 100.0);
const ATTACK_MIDFIELDER: RoleAnchor = RoleAnchor::new(0.6, 6, 80.0);
const ATTACK_FORWARD: RoleAnchor = RoleAnchor::new(0.8, 9, 120.0);

const DEFEND_DEFENDER: RoleAnchor = RoleAnchor::new(0.15, 2, 100.0);
const DEFEND_MIDFIELDER: RoleAnchor = RoleAnchor::new(0.35, 6, 60.0);
const DEFEND_STRIKER: RoleAnchor = RoleAnchor::new(0.6, STRIKER_SLOT, 0.0);
const DEFEND_FORWARD: RoleAnchor = RoleAnchor::new(0.4, 9, 100.0);

/// Defenders keep at least this far off the touchlines when defending.
const DEFEND_LINE_TOUCHLINE_GAP: f32 = 100.0;
/// Defenders shuffle this far towards a ball outside it.
const DEFEND_LINE_SHIFT: f32 = 50.0;
/// Defending midfielders sit this share of the way from the ball's y to the centre.
const DEFEND_MIDFIELD_CENTRE_PULL: f32 = 0.5;

/// Whether `team` plays in attacking shape.
///
/// With nobody in possession the ball's half decides.
pub fn is_attacking(
    team: TeamSide,
    ball: Vec2,
    team_in_possession: Option<TeamSide>,
    pitch: &PitchConfig,
) -> bool {
    match team_in_possession {
        Some(holder) => holder == team,
        None => team.is_ahead(ball.x, pitch.half_width()),
    }
}

/// Track ids of the `CHASERS_PER_TEAM` agents of `team` nearest the ball.
///
/// Ordered by distance ascending; equal distances keep roster order.
pub fn chasers(team: TeamSide, agents: &[Agent], ball: Vec2) -> Vec<usize> {
    let mut by_distance: Vec<(usize, f32)> = agents
        .iter()
        .filter(|agent| agent.team == team)
        .map(|agent| (agent.track_id, agent.distance_to(ball)))
        .collect();
    by_distance.sort_by(|a, b| a.1.total_cmp(&b.1));
    by_distance.into_iter().take(CHASERS_PER_TEAM).map(|(id, _)| id).collect()
}

/// Where the goalkeeper stands.
pub fn goalkeeper_target(team: TeamSide, ball: Vec2, pitch: &PitchConfig) -> Vec2 {
    let in_band =
        ball.y > pitch.keeper_box_inset && ball.y < pitch.height - pitch.keeper_box_inset;
    match team {
        TeamSide::Home => {
            if ball.x < pitch.keeper_box_depth && in_band {
                return Vec2::new(ball.x.min(pitch.keeper_box_depth), ball.y);
            }
            Vec2::new(pitch.keeper_line_offset, pitch.half_height())
        }
        TeamSide::Away => {
            let box_edge = pitch.width - pitch.keeper_box_depth;
            if ball.x > box_edge && in_band {
                return Vec2::new(ball.x.max(box_edge), ball.y);
            }
            Vec2::new(pitch.width - pitch.keeper_line_offset, pitch.half_height())
        }
    }
}

/// Shape position for a field player who is not chasing.
pub fn anchor_target(agent: &Agent, ball: Vec2, attacking: bool, pitch: &PitchConfig) -> Vec2 {
    let scale = pitch.vertical_scale();
    let mid_y = pitch.half_height();
    let team = agent.team;

    if attacking {
        let anchor = match agent.role {
            Role::Defender => ATTACK_DEFENDER,
            Role::Midfielder => ATTACK_MIDFIELDER,
            Role::Forward => ATTACK_FORWARD,
            Role::Goalkeeper => return goalkeeper_target(team, ball, pitch),
        };
        return Vec2::new(anchor.x_for(team, pitch), mid_y + anchor.lateral_offset(agent.slot, scale));
    }

    match agent.role {
        Role::Defender => {
            let anchor = DEFEND_DEFENDER;
            let gap = DEFEND_LINE_TOUCHLINE_GAP * scale;
            let shift = DEFEND_LINE_SHIFT * scale;
            let mut y = (mid_y + anchor.lateral_offset(agent.slot, scale)).clamp(gap, pitch.height - gap);
            if ball.y < y - shift {
                y -= shift;
            } else if ball.y > y + shift {
                y += shift;
            }
            Vec2::new(anchor.x_for(team, pitch), y)
        }
        Role::Midfielder => {
            let anchor = DEFEND_MIDFIELDER;
            let cover_y = ball.y + (mid_y - ball.y) * DEFEND_MIDFIELD_CENTRE_PULL;
            Vec2::new(anchor.x_for(team, pitch), cover_y + anchor.lateral_offset(agent.slot, scale))
        }
        Role::Forward => {
            let anchor = if agent.slot == STRIKER_SLOT { DEFEND_STRIKER } else { DEFEND_FORWARD };
            Vec2::new(anchor.x_for(team, pitch), mid_y + anchor.lateral_offset(agent.slot, scale))
        }
        Role::Goalkeeper => goalkeeper_target(team, ball, pitch),
    }
}

/// Steering goal for agent `track_id` this tick.
///
/// Pure: reads the roster and the ball, mutates nothing.
pub fn target_for(
    track_id: usize,
    agents: &[Agent],
    ball: Vec2,
    team_in_possession: Option<TeamSide>,
    pitch: &PitchConfig,
) -> Vec2 {
    let Some(agent) = agents.get(track_id) else {
        return pitch.center();
    };

    if agent.role == Role::Goalkeeper {
        return goalkeeper_target(agent.team, ball, pitch);
    }

    if chasers(agent.team, agents, ball).contains(&track_id) {
        return ball;
    }

    let attacking = is_attacking(agent.team, ball, team_in_possession, pitch);
    anchor_target(agent, ball, attacking, pitch)
}

/// Targets for the whole roster, all computed from the same state.
pub fn targets_for_all(
    agents: &[Agent],
    ball: Vec2,
    team_in_possession: Option<TeamSide>,
    pitch: &PitchConfig,
) -> Vec<Vec2> {
    let home_chasers = chasers(TeamSide::Home, agents, ball);
    let away_chasers = chasers(TeamSide::Away, agents, ball);

    agents
        .iter()
        .map(|agent| {
            if agent.role == Role::Goalkeeper {
                return goalkeeper_target(agent.team, ball, pitch);
            }
            let team_chasers = match agent.team {
                TeamSide::Home => &home_chasers,
                TeamSide::Away => &away_chasers,
            };
            if team_chasers.contains(&agent.track_id) {
                return ball;
            }
            let attacking = is_attacking(agent.team, ball, team_in_possession, pitch);
            anchor_target(agent, ball, attacking, pitch)
        })
        .collect()
}

/// Kickoff layout: GK, four defenders, three midfielders, three forwards
/// per team, Away mirrored across halfway.
pub fn default_roster(pitch: &PitchConfig) -> Vec<RosterEntry> {
    let w = pitch.width;
    let h = pitch.height;
    let s = pitch.vertical_scale();
    let wide = 150.0 * s;
    let inside = 75.0 * s;

    // (role, slot, x as fraction of width for Home, y)
    let layout: [(Role, u8, f32, f32); 11] = [
        (Role::Goalkeeper, 1, 0.0625, h / 2.0),
        (Role::Defender, 2, 0.1875, wide),
        (Role::Defender, 3, 0.1875, h / 2.0 - inside),
        (Role::Defender, 4, 0.1875, h / 2.0 + inside),
        (Role::Defender, 5, 0.1875, h - wide),
        (Role::Midfielder, 6, 0.375, wide),
        (Role::Midfielder, 7, 0.375, h / 2.0),
        (Role::Midfielder, 8, 0.375, h - wide),
        (Role::Forward, 9, 0.5625, wide),
        (Role::Forward, 10, 0.5625, h / 2.0),
        (Role::Forward, 11, 0.5625, h - wide),
    ];

    let mut roster = Vec::with_capacity(layout.len() * 2);
    for team in TeamSide::BOTH {
        for (role, slot, x_fraction, y) in layout {
            roster.push(RosterEntry {
                team: team.index(),
                role,
                slot,
                home: Vec2::new(w * team.mirror_fraction(x_fraction), y),
            });
        }
    }
    roster
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::agent::build_agents;
    use crate::engine::config::PhysicsConfig;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn pitch() -> PitchConfig {
        PitchConfig::default()
    }

    fn roster_agents() -> Vec<Agent> {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        build_agents(&default_roster(&pitch()), &pitch(), &PhysicsConfig::default(), &mut rng)
            .unwrap()
    }

    fn agent_with(team: TeamSide, role: Role, slot: u8) -> Agent {
        Agent::new(0, team, role, slot, Vec2::new(400.0, 300.0), 1.0)
    }

    fn assert_near(actual: Vec2, expected: Vec2) {
        assert!(
            actual.distance(expected) < 1e-3,
            "expected {:?}, got {:?}",
            expected,
            actual
        );
    }

    #[test]
    fn test_default_roster_matches_kickoff_layout() {
        let roster = default_roster(&pitch());
        assert_eq!(roster.len(), 22);
        assert_eq!(roster[0].home, Vec2::new(50.0, 300.0));
        assert_eq!(roster[1].home, Vec2::new(150.0, 150.0));
        assert_eq!(roster[9].home, Vec2::new(450.0, 300.0));
        assert_eq!(roster[11].home, Vec2::new(750.0, 300.0));
        assert_eq!(roster[20].home, Vec2::new(350.0, 300.0));
    }

    #[test]
    fn test_attacking_by_possession_and_ball_half() {
        let p = pitch();
        let ball = Vec2::new(300.0, 300.0);
        assert!(is_attacking(TeamSide::Home, ball, Some(TeamSide::Home), &p));
        assert!(!is_attacking(TeamSide::Away, ball, Some(TeamSide::Home), &p));
        // Loose ball in Home's half: Away is on the attack
        assert!(!is_attacking(TeamSide::Home, ball, None, &p));
        assert!(is_attacking(TeamSide::Away, ball, None, &p));
        // Loose ball exactly on halfway: nobody attacks
        let centre = Vec2::new(400.0, 300.0);
        assert!(!is_attacking(TeamSide::Home, centre, None, &p));
        assert!(!is_attacking(TeamSide::Away, centre, None, &p));
    }

    #[test]
    fn test_goalkeeper_holds_line() {
        let p = pitch();
        assert_eq!(goalkeeper_target(TeamSide::Home, Vec2::new(400.0, 300.0), &p), Vec2::new(30.0, 300.0));
        assert_eq!(goalkeeper_target(TeamSide::Away, Vec2::new(400.0, 300.0), &p), Vec2::new(770.0, 300.0));
    }

    #[test]
    fn test_goalkeeper_comes_out_in_box() {
        let p = pitch();
        assert_eq!(goalkeeper_target(TeamSide::Home, Vec2::new(80.0, 260.0), &p), Vec2::new(80.0, 260.0));
        assert_eq!(goalkeeper_target(TeamSide::Away, Vec2::new(720.0, 340.0), &p), Vec2::new(720.0, 340.0));
        // Wide of the band: stays home
        assert_eq!(goalkeeper_target(TeamSide::Home, Vec2::new(80.0, 100.0), &p), Vec2::new(30.0, 300.0));
    }

    #[test]
    fn test_two_nearest_chase() {
        let p = pitch();
        let agents = roster_agents();
        // Ball right next to Home slot 10 (track 9) and near slot 9 (track 8)
        let ball = Vec2::new(450.0, 280.0);
        let home = chasers(TeamSide::Home, &agents, ball);
        assert_eq!(home.len(), 2);
        assert_eq!(home[0], 9);
        assert_eq!(target_for(9, &agents, ball, None, &p), ball);
        assert_eq!(target_for(home[1], &agents, ball, None, &p), ball);
    }

    #[test]
    fn test_chaser_ties_keep_roster_order() {
        let mut agents = roster_agents();
        let ball = Vec2::new(400.0, 300.0);
        // Put three Home agents at the same distance
        agents[5].position = Vec2::new(390.0, 300.0);
        agents[6].position = Vec2::new(410.0, 300.0);
        agents[7].position = Vec2::new(400.0, 310.0);
        assert_eq!(chasers(TeamSide::Home, &agents, ball), vec![5, 6]);
    }

    #[test]
    fn test_goalkeeper_never_chases() {
        let p = pitch();
        let mut agents = roster_agents();
        let ball = Vec2::new(300.0, 300.0);
        agents[0].position = Vec2::new(301.0, 300.0);
        // Counted among the nearest, but keeps its own policy
        assert!(chasers(TeamSide::Home, &agents, ball).contains(&0));
        assert_eq!(target_for(0, &agents, ball, None, &p), Vec2::new(30.0, 300.0));
    }

    #[test]
    fn test_attacking_anchors() {
        let p = pitch();
        let ball = Vec2::ZERO;
        let def = anchor_target(&agent_with(TeamSide::Home, Role::Defender, 3), ball, true, &p);
        assert_near(def, Vec2::new(240.0, 400.0));
        let mid = anchor_target(&agent_with(TeamSide::Away, Role::Midfielder, 7), ball, true, &p);
        assert_near(mid, Vec2::new(320.0, 380.0));
        let fwd = anchor_target(&agent_with(TeamSide::Home, Role::Forward, 10), ball, true, &p);
        assert_near(fwd, Vec2::new(640.0, 420.0));
    }

    #[test]
    fn test_defending_line_shifts_towards_ball() {
        let p = pitch();
        let agent = agent_with(TeamSide::Home, Role::Defender, 2);
        // Slot 2 sits on the half-height; ball well above pulls it up
        let t = anchor_target(&agent, Vec2::new(500.0, 100.0), false, &p);
        assert_near(t, Vec2::new(120.0, 250.0));
        let t = anchor_target(&agent, Vec2::new(500.0, 320.0), false, &p);
        assert_near(t, Vec2::new(120.0, 300.0));
        // Slot 5 would be at 600; clamped to 500, then shifted up
        let wide = agent_with(TeamSide::Home, Role::Defender, 5);
        let t = anchor_target(&wide, Vec2::new(500.0, 100.0), false, &p);
        assert_near(t, Vec2::new(120.0, 450.0));
    }

    #[test]
    fn test_defending_midfield_blends_towards_centre() {
        let p = pitch();
        let agent = agent_with(TeamSide::Away, Role::Midfielder, 6);
        let t = anchor_target(&agent, Vec2::new(300.0, 100.0), false, &p);
        assert_near(t, Vec2::new(520.0, 200.0));
    }

    #[test]
    fn test_defending_forwards() {
        let p = pitch();
        let striker = anchor_target(&agent_with(TeamSide::Home, Role::Forward, 9), Vec2::ZERO, false, &p);
        assert_near(striker, Vec2::new(480.0, 300.0));
        let other = anchor_target(&agent_with(TeamSide::Away, Role::Forward, 11), Vec2::ZERO, false, &p);
        assert_near(other, Vec2::new(480.0, 500.0));
    }

    #[test]
    fn test_targets_for_all_matches_single_lookup() {
        let p = pitch();
        let agents = roster_agents();
        let ball = Vec2::new(520.0, 210.0);
        let all = targets_for_all(&agents, ball, Some(TeamSide::Away), &p);
        assert_eq!(all.len(), agents.len());
        for agent in &agents {
            assert_eq!(all[agent.track_id], target_for(agent.track_id, &agents, ball, Some(TeamSide::Away), &p));
        }
    }

    #[test]
    fn test_target_for_unknown_id_is_safe() {
        let p = pitch();
        let agents = roster_agents();
        assert_eq!(target_for(99, &agents, Vec2::ZERO, None, &p), p.center());
    }
}
