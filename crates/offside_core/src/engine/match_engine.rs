//! Match Engine
//!
//! Owns every piece of mutable match state and drives it one tick at a time.
//!
//! ## Tick order (Playing)
//! 1. Apply at most one queued command
//! 2. Advance the ball; a goal ends the tick
//! 3. Compute every agent's target from the same pre-move state
//! 4. Steer and move every agent
//! 5. Resolve possession once; an offside verdict freezes play
//!
//! Frozen phases only count pause ticks. Randomness comes from one seeded
//! ChaCha8 generator, so a seed fully determines a match.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use super::agent::{build_agents, Agent, RosterEntry};
use super::ball::Ball;
use super::commands::{CommandOutcome, CommandQueue, MatchCommand};
use super::config::EngineConfig;
use super::debug_flags::match_debug_enabled;
use super::events::{EventLog, MatchEvent};
use super::formation::{self, default_roster};
use super::geometry::Vec2;
use super::match_state::{MatchPhase, MatchState, Scoreboard};
use super::offside::OffsideVerdict;
use super::possession::{PassSnapshot, PossessionTracker};
use super::types::{GoalSide, Role, TeamSide};
use super::view::{AgentView, BallView, MatchView, OffsideCallView};
use crate::error::Result;

/// Everything needed to build a match.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchPlan {
    pub seed: u64,
    #[serde(default)]
    pub config: EngineConfig,
    /// Custom team sheets; the kickoff layout when absent
    #[serde(default)]
    pub roster: Option<Vec<RosterEntry>>,
}

impl MatchPlan {
    pub fn new(seed: u64) -> Self {
        Self { seed, config: EngineConfig::default(), roster: None }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_roster(mut self, roster: Vec<RosterEntry>) -> Self {
        self.roster = Some(roster);
        self
    }
}

/// Engine-lifetime totals (restarts do not clear them).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MatchCounters {
    pub ticks: u64,
    pub kicks: u64,
    pub passes_received: u64,
    pub offside_calls: u64,
    pub goals: u64,
    pub restarts: u64,
}

/// Agents placed by `stage_offside_scenario`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StagedScenario {
    pub passer: usize,
    pub runner: usize,
    pub defenders: Vec<usize>,
    pub keeper: usize,
}

pub struct MatchEngine {
    rng: ChaCha8Rng,
    seed: u64,
    config: EngineConfig,
    agents: Vec<Agent>,
    ball: Ball,
    possession: PossessionTracker,
    state: MatchState,
    commands: CommandQueue,
    events: EventLog,
    tick: u64,
}

impl MatchEngine {
    /// Validate the plan and set up the kickoff.
    pub fn new(plan: MatchPlan) -> Result<Self> {
        plan.config.validate()?;

        let mut rng = ChaCha8Rng::seed_from_u64(plan.seed);
        let roster = match plan.roster {
            Some(roster) => roster,
            None => default_roster(&plan.config.pitch),
        };
        let agents = build_agents(&roster, &plan.config.pitch, &plan.config.physics, &mut rng)?;
        let ball = Ball::at_center(&plan.config.pitch, &plan.config.physics);

        log::info!(
            "match engine ready: seed {}, pitch {}x{}, {} agents",
            plan.seed,
            plan.config.pitch.width,
            plan.config.pitch.height,
            agents.len()
        );

        Ok(Self {
            rng,
            seed: plan.seed,
            config: plan.config,
            agents,
            ball,
            possession: PossessionTracker::new(),
            state: MatchState::new(),
            commands: CommandQueue::new(),
            events: EventLog::new(),
            tick: 0,
        })
    }

    // ========== Accessors ==========

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> MatchPhase {
        self.state.phase()
    }

    pub fn score(&self) -> Scoreboard {
        self.state.score()
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn possession(&self) -> &PossessionTracker {
        &self.possession
    }

    pub fn debug(&self) -> bool {
        self.state.debug()
    }

    pub fn counters(&self) -> MatchCounters {
        let totals = self.events.totals();
        MatchCounters {
            ticks: self.tick,
            kicks: totals.kicks,
            passes_received: totals.passes_received,
            offside_calls: totals.offside_calls,
            goals: totals.goals,
            restarts: totals.restarts,
        }
    }

    // ========== Stepping ==========

    /// Advance one tick.
    pub fn step(&mut self) {
        if let Some(cmd) = self.commands.pop_front() {
            self.apply(cmd);
        }

        self.tick += 1;

        match self.state.phase() {
            MatchPhase::Playing => self.play_tick(),
            MatchPhase::OffsideCalled => {
                let waited = self.state.tick_pause();
                if let Some(limit) = self.config.timing.offside_auto_resume_ticks {
                    if waited >= limit {
                        self.resume_after_offside();
                    }
                }
            }
            MatchPhase::GoalScored => {
                let waited = self.state.tick_pause();
                if waited >= self.config.timing.goal_pause_ticks {
                    self.resume_after_goal();
                }
            }
        }
    }

    pub fn step_n(&mut self, ticks: u32) {
        for _ in 0..ticks {
            self.step();
        }
    }

    fn play_tick(&mut self) {
        if let Some(side) = self.ball.advance(&self.config.pitch, &self.config.physics) {
            self.on_goal(side);
            return;
        }

        log::trace!(
            "tick {}: ball ({:.1}, {:.1}) v=({:.2}, {:.2})",
            self.tick,
            self.ball.position.x,
            self.ball.position.y,
            self.ball.velocity.x,
            self.ball.velocity.y
        );

        if let Some(verdict) = self.step_agents() {
            self.on_offside(&verdict);
        }

        if match_debug_enabled() {
            log::debug!(
                "[MATCH] tick={} holder={:?} last_kicker={:?} pass={}",
                self.tick,
                self.possession.holder(),
                self.possession.last_kicker(),
                self.possession.pass_in_progress()
            );
        }
    }

    /// Target, steer and move every agent, then resolve ball contact.
    ///
    /// Returns the verdict when a pass was received offside.
    pub fn step_agents(&mut self) -> Option<OffsideVerdict> {
        let pitch = &self.config.pitch;
        let physics = &self.config.physics;
        let targets = formation::targets_for_all(
            &self.agents,
            self.ball.position,
            self.possession.team_in_possession(),
            pitch,
        );

        for (agent, target) in self.agents.iter_mut().zip(targets) {
            agent.target_position = target;
            agent.steer(physics);
            agent.integrate(pitch);
        }

        self.possession.resolve(
            &self.agents,
            &mut self.ball,
            &self.config,
            &mut self.rng,
            self.tick,
            &mut self.events,
        )
    }

    fn on_goal(&mut self, side: GoalSide) {
        let Some(scorer) = self.state.score_goal(side) else {
            return;
        };
        let score = self.state.score();
        log::info!(
            "GOAL for {:?} at tick {} ({} - {})",
            scorer,
            self.tick,
            score.home,
            score.away
        );
        self.events.push(MatchEvent::Goal {
            tick: self.tick,
            side,
            scoring_team: scorer,
            home: score.home,
            away: score.away,
        });
        self.ball.reset(&self.config.pitch);
        self.possession.clear();
    }

    fn on_offside(&mut self, verdict: &OffsideVerdict) {
        let Some(call) = self.state.call_offside(verdict, self.tick) else {
            return;
        };
        log::info!(
            "OFFSIDE at tick {}: agent {} beyond agent {} (line x={:.1})",
            self.tick,
            call.receiver,
            call.second_last_defender,
            call.line_x
        );
        self.events.push(MatchEvent::OffsideCalled {
            tick: self.tick,
            receiver: call.receiver,
            second_last_defender: call.second_last_defender,
            line_x: call.line_x,
        });
    }

    // ========== Commands ==========

    /// Queue a command for the start of the next tick.
    pub fn queue_command(&mut self, cmd: MatchCommand) {
        self.commands.enqueue(cmd);
    }

    pub fn pending_commands(&self) -> usize {
        self.commands.len()
    }

    /// Apply a command now.
    pub fn apply(&mut self, cmd: MatchCommand) -> CommandOutcome {
        let outcome = match cmd {
            MatchCommand::Restart => self.restart(),
            MatchCommand::ResumeAfterOffside => self.resume_after_offside(),
            MatchCommand::ResumeAfterGoal => self.resume_after_goal(),
            MatchCommand::ToggleDebug => self.toggle_debug(),
        };
        log::debug!("command {:?}: {:?}", cmd, outcome);
        outcome
    }

    /// Full restart: score to zero, everyone home, ball on the spot.
    pub fn restart(&mut self) -> CommandOutcome {
        self.state.restart();
        self.reset_positions();
        log::info!("match restarted at tick {}", self.tick);
        self.events.push(MatchEvent::Restarted { tick: self.tick });
        CommandOutcome::Applied
    }

    /// Clear the offside call and take the free kick where the receiver stands.
    pub fn resume_after_offside(&mut self) -> CommandOutcome {
        let Some(call) = self.state.resume_from_offside() else {
            return CommandOutcome::Ignored;
        };
        self.possession.end_pass();
        let spot = self
            .agents
            .get(call.receiver)
            .map(|agent| agent.position)
            .unwrap_or(self.ball.position);
        self.ball.place(spot);
        log::info!("play resumed after offside: free kick at ({:.1}, {:.1})", spot.x, spot.y);
        self.events.push(MatchEvent::PlayResumed { tick: self.tick, from: MatchPhase::OffsideCalled });
        CommandOutcome::Applied
    }

    /// Kick off again after a goal.
    pub fn resume_after_goal(&mut self) -> CommandOutcome {
        if !self.state.resume_from_goal() {
            return CommandOutcome::Ignored;
        }
        self.reset_positions();
        log::info!("kickoff after goal at tick {}", self.tick);
        self.events.push(MatchEvent::PlayResumed { tick: self.tick, from: MatchPhase::GoalScored });
        CommandOutcome::Applied
    }

    /// Presentation only; the simulation ignores it.
    pub fn toggle_debug(&mut self) -> CommandOutcome {
        let on = self.state.toggle_debug();
        log::info!("debug view {}", if on { "on" } else { "off" });
        CommandOutcome::Applied
    }

    fn reset_positions(&mut self) {
        for agent in &mut self.agents {
            agent.reset_to_home();
        }
        self.ball.reset(&self.config.pitch);
        self.possession.clear();
    }

    // ========== Query ==========

    /// Owned snapshot of the whole match.
    pub fn view(&self) -> MatchView {
        let holder = self.possession.holder();
        let agents = self
            .agents
            .iter()
            .map(|agent| AgentView {
                track_id: agent.track_id,
                team: agent.team,
                role: agent.role,
                slot: agent.slot,
                position: agent.position,
                velocity: agent.velocity,
                target: agent.target_position,
                has_ball: holder == Some(agent.track_id),
                highlighted: self.state.is_highlighted(agent.track_id),
            })
            .collect();

        let offside = self.state.offside_call().map(|call| OffsideCallView {
            line_x: call.line_x,
            receiver: call.receiver,
            second_last_defender: call.second_last_defender,
            assessment: call.assessment,
        });

        MatchView {
            tick: self.tick,
            phase: self.state.phase(),
            score: self.state.score(),
            debug: self.state.debug(),
            holder,
            pass_in_progress: self.possession.pass_in_progress(),
            agents,
            ball: BallView {
                position: self.ball.position,
                velocity: self.ball.velocity,
                trail: self.ball.trail().iter().copied().collect(),
            },
            offside,
        }
    }

    /// Hand over everything that happened since the last drain.
    pub fn drain_events(&mut self) -> Vec<MatchEvent> {
        self.events.drain()
    }

    // ========== Staging ==========

    /// Put the ball dead at `position` (clamped onto the pitch).
    pub fn place_ball(&mut self, position: Vec2) {
        let pitch = &self.config.pitch;
        let max = Vec2::new(pitch.width, pitch.height);
        self.ball.place(position.clamp_to(Vec2::ZERO, max));
    }

    /// Set the ball loose from `position` at `velocity` (capped to the ball's
    /// top speed). Whoever held it loses it; no kick is credited.
    pub fn strike_ball(&mut self, position: Vec2, velocity: Vec2) {
        self.place_ball(position);
        self.ball.velocity = velocity.clamp_length(self.config.physics.max_ball_speed);
        if let Some(from) = self.possession.holder() {
            self.events.push(MatchEvent::PossessionChanged { tick: self.tick, from: Some(from), to: None });
        }
        self.possession.clear();
    }

    /// Move one agent, at rest, to `position` (clamped into agent bounds).
    pub fn place_agent(&mut self, track_id: usize, position: Vec2) -> bool {
        let spot = self.config.pitch.clamp_agent(position);
        let Some(agent) = self.agents.get_mut(track_id) else {
            return false;
        };
        agent.position = spot;
        agent.target_position = spot;
        agent.velocity = Vec2::ZERO;
        true
    }

    /// Start a pass as if `kicker` had just struck it from the ball's spot.
    pub fn begin_pass(&mut self, kicker: usize) -> bool {
        let Some(agent) = self.agents.get(kicker) else {
            return false;
        };
        let snapshot = PassSnapshot::capture(agent, self.ball.position, &self.agents);
        self.possession.begin_pass(snapshot);
        true
    }

    fn first_of(&self, team: TeamSide, role: Role) -> Option<usize> {
        self.agents.iter().find(|a| a.team == team && a.role == role).map(|a| a.track_id)
    }

    /// Restart and lay out the classic offside teaching situation: Home
    /// midfielder on the ball just past halfway, a Home forward deep in the
    /// Away half, the Away back line level in front of its keeper.
    pub fn stage_offside_scenario(&mut self) -> Option<StagedScenario> {
        let pitch = self.config.pitch.clone();
        let s = pitch.vertical_scale();
        let passer = self.first_of(TeamSide::Home, Role::Midfielder)?;
        let runner = self.first_of(TeamSide::Home, Role::Forward)?;
        let keeper = self.first_of(TeamSide::Away, Role::Goalkeeper)?;
        let defenders: Vec<usize> = self
            .agents
            .iter()
            .filter(|a| a.team == TeamSide::Away && a.role == Role::Defender)
            .map(|a| a.track_id)
            .collect();

        self.restart();

        let ball_spot = Vec2::new(pitch.half_width() + 50.0, pitch.half_height());
        self.place_ball(ball_spot);
        self.place_agent(passer, Vec2::new(pitch.half_width() + 50.0, pitch.half_height() + 50.0 * s));
        self.possession.give(passer);
        self.place_agent(runner, Vec2::new(pitch.width - 150.0, pitch.half_height()));
        for (i, &id) in defenders.iter().enumerate() {
            let y = pitch.half_height() - 120.0 * s + 80.0 * s * i as f32;
            self.place_agent(id, Vec2::new(pitch.width - 250.0, y));
        }
        self.place_agent(keeper, Vec2::new(pitch.width - 50.0, pitch.half_height()));

        log::info!(
            "offside scenario staged: passer {}, runner {}, back line {:?}, keeper {}",
            passer,
            runner,
            defenders,
            keeper
        );

        Some(StagedScenario { passer, runner, defenders, keeper })
    }
}
