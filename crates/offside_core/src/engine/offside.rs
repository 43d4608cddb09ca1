//! Offside Adjudication
//!
//! Judged when a pass is received, against the positions frozen in the
//! `PassSnapshot` taken when it was struck. The receiver is judged on its
//! live position.
//!
//! ## Rules
//! The receiver is offside when ALL of these hold (strictly; level is
//! onside):
//! 1. It is in the opponent's half
//! 2. It is nearer the attacked goal line than the second-last defender
//! 3. It is nearer the attacked goal line than the ball was at the pass
//!
//! Defenders are ordered by distance to the goal line being attacked, so
//! whoever is physically last (usually the goalkeeper) is first and the
//! second entry sets the line.

use serde::{Deserialize, Serialize};

use super::agent::Agent;
use super::config::PitchConfig;
use super::possession::{AgentMark, PassSnapshot};

/// Rule summary shown next to a call.
pub const EXPLANATION_LINES: [&str; 4] = [
    "Offside Rule in Football:",
    "1. Player must be in opponent's half",
    "2. Player must be ahead of the ball when passed",
    "3. Player must be ahead of the second-last defender",
];

pub fn explanation_lines() -> &'static [&'static str] {
    &EXPLANATION_LINES
}

/// The three conditions, each judged on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct OffsideAssessment {
    pub in_opponent_half: bool,
    pub beyond_second_last_defender: bool,
    pub ahead_of_ball: bool,
}

impl OffsideAssessment {
    #[inline]
    pub fn all_hold(&self) -> bool {
        self.in_opponent_half && self.beyond_second_last_defender && self.ahead_of_ball
    }

    /// One line per condition with its result, in rule-summary order.
    pub fn explain(&self) -> Vec<String> {
        let mark = |held: bool| if held { "yes" } else { "no" };
        vec![
            format!("{}: {}", EXPLANATION_LINES[1], mark(self.in_opponent_half)),
            format!("{}: {}", EXPLANATION_LINES[2], mark(self.ahead_of_ball)),
            format!("{}: {}", EXPLANATION_LINES[3], mark(self.beyond_second_last_defender)),
        ]
    }
}

/// Result of one adjudication.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OffsideVerdict {
    pub is_offside: bool,
    /// Track id of the second-last defender at the pass, when one exists
    pub second_last_defender: Option<usize>,
    pub receiver: Option<usize>,
    /// x of the second-last defender at the pass
    pub line_x: Option<f32>,
    /// Condition breakdown; absent when there was no pass to judge
    pub assessment: Option<OffsideAssessment>,
}

impl OffsideVerdict {
    /// Nothing to judge.
    pub fn onside() -> Self {
        Self::default()
    }
}

/// Opponents of the kicking team at the pass, nearest the attacked goal
/// line first.
pub fn defenders_by_depth<'a>(snapshot: &'a PassSnapshot, pitch: &PitchConfig) -> Vec<&'a AgentMark> {
    let attacking = snapshot.kicking_team;
    let goal_line = attacking.attacked_goal_line(pitch.width);
    let mut defenders: Vec<&AgentMark> =
        snapshot.agents.iter().filter(|mark| mark.team != attacking).collect();
    defenders.sort_by(|a, b| {
        let da = (goal_line - a.position.x).abs();
        let db = (goal_line - b.position.x).abs();
        da.total_cmp(&db)
    });
    defenders
}

/// The defender setting the offside line, if at least two defended.
pub fn second_last_defender<'a>(snapshot: &'a PassSnapshot, pitch: &PitchConfig) -> Option<&'a AgentMark> {
    defenders_by_depth(snapshot, pitch).get(1).copied()
}

/// Judge `receiver` against the pass in `snapshot`.
pub fn evaluate(
    snapshot: Option<&PassSnapshot>,
    receiver: &Agent,
    pitch: &PitchConfig,
) -> OffsideVerdict {
    let Some(snapshot) = snapshot else {
        return OffsideVerdict::onside();
    };

    let attacking = snapshot.kicking_team;
    let x = receiver.position.x;
    let line = second_last_defender(snapshot, pitch);

    let assessment = OffsideAssessment {
        in_opponent_half: attacking.is_ahead(x, pitch.half_width()),
        beyond_second_last_defender: line.is_some_and(|d| attacking.is_ahead(x, d.position.x)),
        ahead_of_ball: attacking.is_ahead(x, snapshot.ball_position.x),
    };

    OffsideVerdict {
        is_offside: assessment.all_hold(),
        second_last_defender: line.map(|d| d.track_id),
        receiver: Some(receiver.track_id),
        line_x: line.map(|d| d.position.x),
        assessment: Some(assessment),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::geometry::Vec2;
    use crate::engine::types::{Role, TeamSide};

    fn mark(track_id: usize, team: TeamSide, x: f32) -> AgentMark {
        AgentMark { track_id, team, position: Vec2::new(x, 300.0) }
    }

    fn receiver_at(team: TeamSide, x: f32) -> Agent {
        let id = if team == TeamSide::Home { 9 } else { 20 };
        Agent::new(id, team, Role::Forward, 10, Vec2::new(x, 300.0), 1.0)
    }

    /// Home kicks; Away keeper at 760 and a second defender at `line`.
    fn home_pass(ball_x: f32, line: f32) -> PassSnapshot {
        PassSnapshot {
            kicker: 6,
            kicking_team: TeamSide::Home,
            ball_position: Vec2::new(ball_x, 300.0),
            agents: vec![
                mark(6, TeamSide::Home, ball_x),
                mark(11, TeamSide::Away, 760.0),
                mark(12, TeamSide::Away, line),
                mark(13, TeamSide::Away, 300.0),
            ],
        }
    }

    #[test]
    fn test_offside_when_all_conditions_hold() {
        let pitch = PitchConfig::default();
        let v = evaluate(Some(&home_pass(500.0, 550.0)), &receiver_at(TeamSide::Home, 600.0), &pitch);
        assert!(v.is_offside);
        assert_eq!(v.second_last_defender, Some(12));
        assert_eq!(v.receiver, Some(9));
        assert_eq!(v.line_x, Some(550.0));
        let a = v.assessment.unwrap();
        assert!(a.in_opponent_half && a.beyond_second_last_defender && a.ahead_of_ball);
    }

    #[test]
    fn test_behind_defender_is_onside() {
        let pitch = PitchConfig::default();
        let v = evaluate(Some(&home_pass(500.0, 550.0)), &receiver_at(TeamSide::Home, 540.0), &pitch);
        assert!(!v.is_offside);
        assert!(!v.assessment.unwrap().beyond_second_last_defender);
    }

    #[test]
    fn test_behind_ball_is_onside() {
        let pitch = PitchConfig::default();
        let v = evaluate(Some(&home_pass(650.0, 550.0)), &receiver_at(TeamSide::Home, 600.0), &pitch);
        assert!(!v.is_offside);
        let a = v.assessment.unwrap();
        assert!(a.beyond_second_last_defender);
        assert!(!a.ahead_of_ball);
    }

    #[test]
    fn test_own_half_is_never_offside() {
        let pitch = PitchConfig::default();
        // Defenders and ball all deep in Home's half
        let v = evaluate(Some(&home_pass(100.0, 120.0)), &receiver_at(TeamSide::Home, 350.0), &pitch);
        assert!(!v.is_offside);
        assert!(!v.assessment.unwrap().in_opponent_half);
    }

    #[test]
    fn test_level_with_defender_is_onside() {
        let pitch = PitchConfig::default();
        let v = evaluate(Some(&home_pass(500.0, 600.0)), &receiver_at(TeamSide::Home, 600.0), &pitch);
        assert!(!v.is_offside);
    }

    #[test]
    fn test_level_with_ball_is_onside() {
        let pitch = PitchConfig::default();
        let v = evaluate(Some(&home_pass(600.0, 550.0)), &receiver_at(TeamSide::Home, 600.0), &pitch);
        assert!(!v.is_offside);
    }

    #[test]
    fn test_fewer_than_two_defenders() {
        let pitch = PitchConfig::default();
        let snapshot = PassSnapshot {
            kicker: 6,
            kicking_team: TeamSide::Home,
            ball_position: Vec2::new(420.0, 300.0),
            agents: vec![mark(6, TeamSide::Home, 420.0), mark(11, TeamSide::Away, 760.0)],
        };
        let v = evaluate(Some(&snapshot), &receiver_at(TeamSide::Home, 780.0), &pitch);
        assert!(!v.is_offside);
        assert_eq!(v.second_last_defender, None);
        assert_eq!(v.line_x, None);
    }

    #[test]
    fn test_no_snapshot_is_onside() {
        let pitch = PitchConfig::default();
        let v = evaluate(None, &receiver_at(TeamSide::Home, 780.0), &pitch);
        assert_eq!(v, OffsideVerdict::onside());
        assert!(v.assessment.is_none());
    }

    #[test]
    fn test_away_attacks_towards_zero() {
        let pitch = PitchConfig::default();
        let snapshot = PassSnapshot {
            kicker: 17,
            kicking_team: TeamSide::Away,
            ball_position: Vec2::new(300.0, 300.0),
            agents: vec![
                mark(17, TeamSide::Away, 300.0),
                mark(0, TeamSide::Home, 40.0),
                mark(1, TeamSide::Home, 250.0),
                mark(2, TeamSide::Home, 200.0),
            ],
        };
        let v = evaluate(Some(&snapshot), &receiver_at(TeamSide::Away, 180.0), &pitch);
        assert!(v.is_offside);
        // Keeper at 40 is last, 200 is second-last
        assert_eq!(v.second_last_defender, Some(2));
        assert_eq!(v.line_x, Some(200.0));

        let v = evaluate(Some(&snapshot), &receiver_at(TeamSide::Away, 220.0), &pitch);
        assert!(!v.is_offside);
    }

    #[test]
    fn test_depth_order_ignores_roster_order() {
        let pitch = PitchConfig::default();
        let snapshot = home_pass(500.0, 550.0);
        let depth: Vec<usize> = defenders_by_depth(&snapshot, &pitch).iter().map(|m| m.track_id).collect();
        assert_eq!(depth, vec![11, 12, 13]);
    }

    #[test]
    fn test_explain_reports_each_condition() {
        let a = OffsideAssessment {
            in_opponent_half: true,
            beyond_second_last_defender: false,
            ahead_of_ball: true,
        };
        let lines = a.explain();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with("yes"));
        assert!(lines[2].ends_with("no"));
        assert_eq!(explanation_lines()[0], "Offside Rule in Football:");
    }
}
