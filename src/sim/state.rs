//! Game state and presentation-facing events

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::drive::{
    Cutscene, DriveState, DriveSummary, GameOverSummary, GameStatus, PlayOutcome, PlayResult,
};
use super::entity::{EntityStore, RECEIVER_COUNT};
use super::flight::{Ball, Flight, plan_throw};
use super::quarterback::held_ball_position;
use super::routes::receiver_velocity;
use crate::consts::*;
use crate::cues::{AudioCue, HapticCue, cues_for};
use crate::settings::Settings;

/// Everything the presentation layer may react to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum GameEvent {
    DriveStarted { line_of_scrimmage: f32 },
    Snap { down: u8, line_of_scrimmage: f32 },
    Throw { receiver: usize, target: Vec2, duration: f32 },
    Outcome(PlayOutcome),
    Cutscene(Cutscene),
    Audio(AudioCue),
    Haptic(HapticCue),
    GameOver(GameOverSummary),
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct GameState {
    pub entities: EntityStore,
    pub ball: Ball,
    pub drive: DriveState,
    pub settings: Settings,
    /// Sim seconds since creation; ball flight and cutscenes sample this
    pub clock: f32,
    /// Seconds since the current play was snapped
    pub play_elapsed: f32,
    /// Camera shake intensity 0-1 (visual only)
    pub screen_shake: f32,
    /// Pending events, drained by the presentation layer
    pub events: Vec<GameEvent>,
    rng: Pcg32,
}

impl GameState {
    /// Create a game sitting on the menu, seeded for reproducible catches
    pub fn new(seed: u64) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed))
    }

    /// Create a game with a fresh random seed
    pub fn from_entropy() -> Self {
        Self::with_rng(Pcg32::from_rng(&mut rand::rng()))
    }

    fn with_rng(rng: Pcg32) -> Self {
        let drive = DriveState::new();
        let entities = EntityStore::new(drive.line_of_scrimmage);
        let mut ball = Ball::default();
        ball.hold_at(held_ball_position(&entities.qb));
        Self {
            entities,
            ball,
            drive,
            settings: Settings::default(),
            clock: 0.0,
            play_elapsed: 0.0,
            screen_shake: 0.0,
            events: Vec::new(),
            rng,
        }
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Begin a new drive from the menu or the game over screen
    pub fn start_game(&mut self) {
        if self.drive.status == GameStatus::Playing {
            return;
        }
        self.drive.kickoff();
        self.reset_play();
        self.events.push(GameEvent::DriveStarted {
            line_of_scrimmage: self.drive.line_of_scrimmage,
        });
        self.events.push(GameEvent::Cutscene(Cutscene::Start));
    }

    /// Line everyone up on the current line of scrimmage and clear play state
    pub fn reset_play(&mut self) {
        self.entities.line_up(self.drive.line_of_scrimmage);
        self.ball = Ball::default();
        self.ball.hold_at(held_ball_position(&self.entities.qb));
        self.play_elapsed = 0.0;
        self.drive.prepare_next_play();
        log::debug!(
            "Lined up at {} for {}",
            self.drive.line_of_scrimmage,
            self.drive.down_and_distance()
        );
    }

    /// Put the ball in play if lined up
    pub fn snap(&mut self) {
        if self.drive.snap() {
            log::debug!("Snap: {}", self.drive.down_and_distance());
            self.events.push(GameEvent::Snap {
                down: self.drive.down,
                line_of_scrimmage: self.drive.line_of_scrimmage,
            });
        }
    }

    /// Throw to the receiver at `receiver`, optionally toward a pointed-at spot.
    ///
    /// Ignored unless the play is live and no pass is already in the air.
    pub fn throw_ball(&mut self, receiver: usize, aim: Option<Vec2>) -> bool {
        if !self.drive.play.is_live() || self.ball.in_flight() || receiver >= RECEIVER_COUNT {
            return false;
        }

        let route_vel = receiver_velocity(&self.entities, receiver, self.drive.line_of_scrimmage);
        let from = self.ball.pos;
        let plan = plan_throw(
            from,
            self.entities.receivers[receiver].body.pos,
            route_vel,
            aim,
        );

        log::debug!(
            "Throw to receiver {} at ({:.1}, {:.1}), {:.2}s in the air",
            receiver,
            plan.target.x,
            plan.target.y,
            plan.duration
        );

        self.ball.flight = Some(Flight {
            start: from,
            target: plan.target,
            start_height: self.ball.height,
            target_height: CATCH_HEIGHT,
            start_time: self.clock,
            duration: plan.duration,
            peak_height: plan.peak_height,
            receiver,
        });
        self.events.push(GameEvent::Throw {
            receiver,
            target: plan.target,
            duration: plan.duration,
        });
        self.push_audio(AudioCue::Throw);
        self.push_haptic(HapticCue::Light);
        true
    }

    /// Hand a play result to the drive and queue whatever followed from it
    pub fn resolve_play(&mut self, result: PlayResult) -> Option<PlayOutcome> {
        let outcome = self.drive.resolve(result)?;
        self.events.push(GameEvent::Outcome(outcome));

        let (audio, haptic) = cues_for(&result, &outcome);
        if let Some(audio) = audio {
            self.push_audio(audio);
        }
        self.push_haptic(haptic);

        if self.drive.cutscene.is_active() {
            self.events.push(GameEvent::Cutscene(self.drive.cutscene));
        }

        match outcome {
            PlayOutcome::Touchdown { .. } => self.add_shake(0.5),
            PlayOutcome::Sack { .. } => self.add_shake(0.6),
            PlayOutcome::Interception { .. } | PlayOutcome::TurnoverOnDowns => self.add_shake(0.3),
            _ => {}
        }

        if let Some(summary) = self.drive.game_over {
            self.events.push(GameEvent::GameOver(summary));
        }
        Some(outcome)
    }

    /// Uniform roll in [0, 1) for the catch contest
    pub(crate) fn roll(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn push_audio(&mut self, cue: AudioCue) {
        if self.settings.audio {
            self.events.push(GameEvent::Audio(cue));
        }
    }

    fn push_haptic(&mut self, cue: HapticCue) {
        if self.settings.haptics {
            self.events.push(GameEvent::Haptic(cue));
        }
    }

    fn add_shake(&mut self, amount: f32) {
        if self.settings.effective_screen_shake() {
            self.screen_shake = (self.screen_shake + amount).min(1.0);
        }
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn summary(&self) -> DriveSummary {
        self.drive.summary()
    }
}
