//! Drive state machine: downs, field position, score, and play lifecycle
//!
//! `DriveState` is the only writer of drive data. A play moves
//! `PreSnap -> Live -> Resolving -> PreSnap`; `resolve` only acts on a live
//! play, which makes the phase itself the once-per-play latch.

use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Menu,
    Playing,
    GameOver,
}

/// Camera sequence the presentation layer should run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cutscene {
    #[default]
    None,
    Start,
    Touchdown,
    Sack,
    Interception,
}

impl Cutscene {
    pub fn duration(self) -> f32 {
        match self {
            Cutscene::None => 0.0,
            Cutscene::Start => CUTSCENE_START_DURATION,
            Cutscene::Touchdown => CUTSCENE_TOUCHDOWN_DURATION,
            Cutscene::Sack => CUTSCENE_SACK_DURATION,
            Cutscene::Interception => CUTSCENE_INTERCEPTION_DURATION,
        }
    }

    pub fn is_active(self) -> bool {
        self != Cutscene::None
    }
}

/// Raw result of a play, before drive rules are applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayResult {
    Catch { z: f32 },
    Incomplete,
    Interception { z: f32 },
    Sack { tackle_z: f32 },
}

/// What a play meant for the drive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayOutcome {
    Touchdown { points: u32, score: u32 },
    FirstDown { line_of_scrimmage: f32, gain: f32 },
    ShortCompletion { gain: f32, down: u8, yards_to_go: f32 },
    Incomplete { down: u8 },
    Interception { z: f32 },
    Sack { yards_lost: f32, down: u8 },
    TurnoverOnDowns,
}

impl PlayOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlayOutcome::Touchdown { .. } => "touchdown",
            PlayOutcome::FirstDown { .. } => "first-down",
            PlayOutcome::ShortCompletion { .. } => "short-completion",
            PlayOutcome::Incomplete { .. } => "incomplete",
            PlayOutcome::Interception { .. } => "interception",
            PlayOutcome::Sack { .. } => "sack",
            PlayOutcome::TurnoverOnDowns => "turnover-on-downs",
        }
    }

    /// Whether this outcome ends the drive (and the game)
    pub fn drive_end(&self) -> Option<DriveEnd> {
        match self {
            PlayOutcome::Touchdown { .. } => Some(DriveEnd::Touchdown),
            PlayOutcome::Interception { .. } => Some(DriveEnd::Interception),
            PlayOutcome::TurnoverOnDowns => Some(DriveEnd::TurnoverOnDowns),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriveEnd {
    Touchdown,
    Interception,
    TurnoverOnDowns,
}

impl DriveEnd {
    pub fn as_str(self) -> &'static str {
        match self {
            DriveEnd::Touchdown => "touchdown",
            DriveEnd::Interception => "interception",
            DriveEnd::TurnoverOnDowns => "turnover-on-downs",
        }
    }
}

/// Final result shown on the game over screen
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GameOverSummary {
    pub reason: DriveEnd,
    pub score: u32,
    pub won: bool,
}

impl GameOverSummary {
    pub fn message(&self) -> String {
        match self.reason {
            DriveEnd::Touchdown => format!("TOUCHDOWN! You win - final score {}", self.score),
            DriveEnd::Interception => format!("Intercepted! Game over - final score {}", self.score),
            DriveEnd::TurnoverOnDowns => {
                format!("Turnover on downs! Game over - final score {}", self.score)
            }
        }
    }
}

/// Lifecycle of the current play
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PlayPhase {
    /// Lined up, waiting for the snap
    PreSnap,
    /// Ball is live
    Live,
    /// Whistle blown; next play lines up when `reset_in` runs out
    Resolving { outcome: PlayOutcome, reset_in: f32 },
}

impl PlayPhase {
    pub fn is_live(&self) -> bool {
        matches!(self, PlayPhase::Live)
    }
}

/// HUD snapshot of the drive
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DriveSummary {
    pub down: u8,
    pub yards_to_go: f32,
    pub line_of_scrimmage: f32,
    pub first_down_marker: f32,
    pub score: u32,
    pub sack_timer: u32,
    pub cutscene: Cutscene,
    pub status: GameStatus,
    pub label: String,
}

/// First down marker for a line of scrimmage
pub fn first_down_marker_for(los: f32) -> f32 {
    (los + FIRST_DOWN_DISTANCE).min(ENDZONE_Z - 1.0)
}

fn ordinal(n: u8) -> &'static str {
    match n {
        1 => "1st",
        2 => "2nd",
        3 => "3rd",
        _ => "4th",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriveState {
    /// Always within 1..=MAX_DOWNS
    pub down: u8,
    pub line_of_scrimmage: f32,
    pub first_down_marker: f32,
    /// Never below 1
    pub yards_to_go: f32,
    pub score: u32,
    /// Whole seconds before the pocket collapses
    pub sack_timer: u32,
    sack_clock: f32,
    pub cutscene: Cutscene,
    pub cutscene_elapsed: f32,
    pub status: GameStatus,
    pub play: PlayPhase,
    pub game_over: Option<GameOverSummary>,
}

impl Default for DriveState {
    fn default() -> Self {
        Self::new()
    }
}

impl DriveState {
    /// Drive waiting on the menu
    pub fn new() -> Self {
        Self {
            down: 1,
            line_of_scrimmage: KICKOFF_LOS,
            first_down_marker: first_down_marker_for(KICKOFF_LOS),
            yards_to_go: FIRST_DOWN_DISTANCE,
            score: 0,
            sack_timer: SACK_TIMER_START,
            sack_clock: 0.0,
            cutscene: Cutscene::None,
            cutscene_elapsed: 0.0,
            status: GameStatus::Menu,
            play: PlayPhase::PreSnap,
            game_over: None,
        }
    }

    /// Start a fresh drive from the kickoff spot
    pub fn kickoff(&mut self) {
        *self = Self::new();
        self.status = GameStatus::Playing;
        self.start_cutscene(Cutscene::Start);
        log::info!(
            "Drive starts at {} ({})",
            self.line_of_scrimmage,
            self.down_and_distance()
        );
    }

    /// Put the ball in play. Returns false unless lined up and playing.
    pub fn snap(&mut self) -> bool {
        if self.status != GameStatus::Playing || self.play != PlayPhase::PreSnap {
            return false;
        }
        self.play = PlayPhase::Live;
        true
    }

    /// Clear per-play state ahead of the next snap
    pub fn prepare_next_play(&mut self) {
        self.sack_timer = SACK_TIMER_START;
        self.sack_clock = 0.0;
        self.play = PlayPhase::PreSnap;
    }

    /// Count the sack timer down in whole-second steps.
    ///
    /// Returns true once it has run out during a live play.
    pub fn tick_sack_timer(&mut self, dt: f32) -> bool {
        if !self.play.is_live() {
            return false;
        }
        self.sack_clock += dt;
        while self.sack_clock >= SACK_TIMER_INTERVAL {
            self.sack_clock -= SACK_TIMER_INTERVAL;
            self.sack_timer = self.sack_timer.saturating_sub(1);
        }
        self.sack_timer == 0
    }

    /// Count down the post-play delay. Returns true when the next play should line up.
    pub fn tick_reset(&mut self, dt: f32) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        match &mut self.play {
            PlayPhase::Resolving { reset_in, .. } => {
                *reset_in -= dt;
                *reset_in <= 0.0
            }
            _ => false,
        }
    }

    pub fn start_cutscene(&mut self, cutscene: Cutscene) {
        self.cutscene = cutscene;
        self.cutscene_elapsed = 0.0;
    }

    /// Advance the running cutscene. Returns true while one is still playing.
    pub fn advance_cutscene(&mut self, dt: f32) -> bool {
        if !self.cutscene.is_active() {
            return false;
        }
        self.cutscene_elapsed += dt;
        if self.cutscene_elapsed >= self.cutscene.duration() {
            self.skip_cutscene();
            return false;
        }
        true
    }

    pub fn skip_cutscene(&mut self) {
        self.cutscene = Cutscene::None;
        self.cutscene_elapsed = 0.0;
    }

    /// Apply a play result to the drive.
    ///
    /// Only the first result of a live play counts; anything after that is
    /// ignored and returns `None`.
    pub fn resolve(&mut self, result: PlayResult) -> Option<PlayOutcome> {
        if self.status != GameStatus::Playing || !self.play.is_live() {
            return None;
        }

        let outcome = match result {
            PlayResult::Catch { z } => self.complete_pass(z),
            PlayResult::Incomplete => {
                if self.advance_down() {
                    PlayOutcome::Incomplete { down: self.down }
                } else {
                    PlayOutcome::TurnoverOnDowns
                }
            }
            PlayResult::Interception { z } => PlayOutcome::Interception { z },
            PlayResult::Sack { tackle_z } => self.sack(tackle_z),
        };

        self.play = PlayPhase::Resolving {
            outcome,
            reset_in: RESET_DELAY,
        };

        let cutscene = match (result, outcome) {
            (_, PlayOutcome::Touchdown { .. }) => Cutscene::Touchdown,
            (PlayResult::Sack { .. }, _) => Cutscene::Sack,
            (PlayResult::Interception { .. }, _) => Cutscene::Interception,
            _ => Cutscene::None,
        };
        if cutscene.is_active() {
            self.start_cutscene(cutscene);
        }

        log::info!(
            "Play result {:?} -> {} ({})",
            result,
            outcome.as_str(),
            self.down_and_distance()
        );

        if let Some(reason) = outcome.drive_end() {
            self.status = GameStatus::GameOver;
            let summary = GameOverSummary {
                reason,
                score: self.score,
                won: reason == DriveEnd::Touchdown,
            };
            log::info!("{}", summary.message());
            self.game_over = Some(summary);
        }

        Some(outcome)
    }

    /// Move to the next down. False when downs are exhausted.
    fn advance_down(&mut self) -> bool {
        if self.down >= MAX_DOWNS {
            return false;
        }
        self.down += 1;
        true
    }

    fn complete_pass(&mut self, z: f32) -> PlayOutcome {
        let gain = z - self.line_of_scrimmage;

        if z >= ENDZONE_Z - TOUCHDOWN_MARGIN {
            self.score += TOUCHDOWN_POINTS;
            return PlayOutcome::Touchdown {
                points: TOUCHDOWN_POINTS,
                score: self.score,
            };
        }

        if z >= self.first_down_marker {
            self.line_of_scrimmage = z;
            self.first_down_marker = first_down_marker_for(z);
            self.yards_to_go = FIRST_DOWN_DISTANCE.min(ENDZONE_Z - z).max(1.0);
            self.down = 1;
            return PlayOutcome::FirstDown {
                line_of_scrimmage: z,
                gain,
            };
        }

        if !self.advance_down() {
            return PlayOutcome::TurnoverOnDowns;
        }
        self.yards_to_go = (self.first_down_marker - z).max(1.0);
        self.line_of_scrimmage = z;
        PlayOutcome::ShortCompletion {
            gain,
            down: self.down,
            yards_to_go: self.yards_to_go,
        }
    }

    fn sack(&mut self, tackle_z: f32) -> PlayOutcome {
        let tackle_z = tackle_z.min(self.line_of_scrimmage);
        let yards_lost = self.line_of_scrimmage - tackle_z;

        if !self.advance_down() {
            return PlayOutcome::TurnoverOnDowns;
        }
        self.line_of_scrimmage = tackle_z;
        self.yards_to_go = (self.yards_to_go + yards_lost).max(1.0);
        PlayOutcome::Sack {
            yards_lost,
            down: self.down,
        }
    }

    /// "3rd & 7", or "1st & Goal" once the marker sits at the goal line
    pub fn down_and_distance(&self) -> String {
        if self.first_down_marker >= ENDZONE_Z - 1.0 {
            format!("{} & Goal", ordinal(self.down))
        } else {
            format!("{} & {}", ordinal(self.down), self.yards_to_go.ceil() as i32)
        }
    }

    pub fn summary(&self) -> DriveSummary {
        DriveSummary {
            down: self.down,
            yards_to_go: self.yards_to_go,
            line_of_scrimmage: self.line_of_scrimmage,
            first_down_marker: self.first_down_marker,
            score: self.score,
            sack_timer: self.sack_timer,
            cutscene: self.cutscene,
            status: self.status,
            label: self.down_and_distance(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn live_drive() -> DriveState {
        let mut drive = DriveState::new();
        drive.kickoff();
        drive.skip_cutscene();
        assert!(drive.snap());
        drive
    }

    /// Finish the current play and line up the next one
    fn next_play(drive: &mut DriveState) {
        drive.prepare_next_play();
        assert!(drive.snap());
    }

    #[test]
    fn test_kickoff_state() {
        let mut drive = DriveState::new();
        assert_eq!(drive.status, GameStatus::Menu);
        drive.kickoff();
        assert_eq!(drive.status, GameStatus::Playing);
        assert_eq!(drive.cutscene, Cutscene::Start);
        assert_eq!(drive.line_of_scrimmage, KICKOFF_LOS);
        assert_eq!(drive.first_down_marker, KICKOFF_LOS + 10.0);
        assert_eq!(drive.down_and_distance(), "1st & 10");
    }

    #[test]
    fn test_scenario_first_down() {
        let mut drive = live_drive();
        assert_eq!(drive.first_down_marker, -5.0);

        let outcome = drive.resolve(PlayResult::Catch { z: 0.0 }).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::FirstDown {
                line_of_scrimmage: 0.0,
                gain: 15.0
            }
        );
        assert_eq!(drive.line_of_scrimmage, 0.0);
        assert_eq!(drive.first_down_marker, 10.0);
        assert_eq!(drive.yards_to_go, 10.0);
        assert_eq!(drive.down, 1);
    }

    #[test]
    fn test_scenario_turnover_on_downs_after_incomplete() {
        let mut drive = live_drive();
        drive.down = 4;
        let outcome = drive.resolve(PlayResult::Incomplete).unwrap();
        assert_eq!(outcome, PlayOutcome::TurnoverOnDowns);
        assert_eq!(drive.status, GameStatus::GameOver);
        assert_eq!(drive.down, 4);
        let summary = drive.game_over.unwrap();
        assert_eq!(summary.reason.as_str(), "turnover-on-downs");
        assert!(!summary.won);
    }

    #[test]
    fn test_scenario_touchdown_wins() {
        let mut drive = live_drive();
        let outcome = drive.resolve(PlayResult::Catch { z: 23.0 }).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::Touchdown {
                points: 7,
                score: 7
            }
        );
        assert_eq!(drive.score, 7);
        assert_eq!(drive.cutscene, Cutscene::Touchdown);
        assert_eq!(drive.status, GameStatus::GameOver);
        let summary = drive.game_over.unwrap();
        assert!(summary.won);
        assert!(summary.message().contains("win"));
    }

    #[test]
    fn test_short_completion() {
        let mut drive = live_drive();
        let outcome = drive.resolve(PlayResult::Catch { z: -10.0 }).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::ShortCompletion {
                gain: 5.0,
                down: 2,
                yards_to_go: 5.0
            }
        );
        assert_eq!(drive.line_of_scrimmage, -10.0);
        assert_eq!(drive.first_down_marker, -5.0);
        assert_eq!(drive.down_and_distance(), "2nd & 5");
    }

    #[test]
    fn test_short_completion_on_fourth_down_turns_over() {
        let mut drive = live_drive();
        drive.down = 4;
        assert_eq!(
            drive.resolve(PlayResult::Catch { z: -10.0 }),
            Some(PlayOutcome::TurnoverOnDowns)
        );
        assert_eq!(drive.status, GameStatus::GameOver);
    }

    #[test]
    fn test_interception_ends_game_on_any_down() {
        let mut drive = live_drive();
        assert_eq!(drive.down, 1);
        drive.resolve(PlayResult::Interception { z: 0.0 });
        assert_eq!(drive.status, GameStatus::GameOver);
        assert_eq!(drive.cutscene, Cutscene::Interception);
        assert_eq!(drive.game_over.unwrap().reason, DriveEnd::Interception);
    }

    #[test]
    fn test_sack_loses_yards() {
        let mut drive = live_drive();
        let outcome = drive.resolve(PlayResult::Sack { tackle_z: -22.0 }).unwrap();
        assert_eq!(
            outcome,
            PlayOutcome::Sack {
                yards_lost: 7.0,
                down: 2
            }
        );
        assert_eq!(drive.line_of_scrimmage, -22.0);
        assert_eq!(drive.yards_to_go, 17.0);
        assert_eq!(drive.first_down_marker, -5.0);
        assert_eq!(drive.cutscene, Cutscene::Sack);
    }

    #[test]
    fn test_second_result_in_same_play_ignored() {
        let mut drive = live_drive();
        assert!(drive.resolve(PlayResult::Sack { tackle_z: -20.0 }).is_some());
        let before = drive.clone();
        assert_eq!(drive.resolve(PlayResult::Interception { z: 0.0 }), None);
        assert_eq!(drive, before);
    }

    #[test]
    fn test_no_result_before_snap() {
        let mut drive = DriveState::new();
        drive.kickoff();
        assert_eq!(drive.resolve(PlayResult::Incomplete), None);
    }

    #[test]
    fn test_sack_timer_counts_whole_seconds() {
        let mut drive = live_drive();
        assert!(!drive.tick_sack_timer(0.6));
        assert_eq!(drive.sack_timer, SACK_TIMER_START);
        assert!(!drive.tick_sack_timer(0.6));
        assert_eq!(drive.sack_timer, SACK_TIMER_START - 1);
        assert!(drive.tick_sack_timer(10.0));
        assert_eq!(drive.sack_timer, 0);
    }

    #[test]
    fn test_reset_delay() {
        let mut drive = live_drive();
        drive.resolve(PlayResult::Incomplete);
        assert!(!drive.tick_reset(RESET_DELAY / 2.0));
        assert!(drive.tick_reset(RESET_DELAY));
    }

    #[test]
    fn test_prepare_next_play_idempotent() {
        let mut drive = live_drive();
        drive.tick_sack_timer(2.5);
        drive.resolve(PlayResult::Incomplete);
        drive.prepare_next_play();
        let once = drive.clone();
        drive.prepare_next_play();
        assert_eq!(drive, once);
    }

    #[test]
    fn test_cutscene_runs_for_duration() {
        let mut drive = DriveState::new();
        drive.kickoff();
        assert!(drive.advance_cutscene(CUTSCENE_START_DURATION / 2.0));
        assert!(!drive.advance_cutscene(CUTSCENE_START_DURATION));
        assert_eq!(drive.cutscene, Cutscene::None);
    }

    #[test]
    fn test_goal_to_go_label() {
        let mut drive = live_drive();
        drive.resolve(PlayResult::Catch { z: 18.0 });
        assert_eq!(drive.first_down_marker, ENDZONE_Z - 1.0);
        assert_eq!(drive.yards_to_go, 7.0);
        assert_eq!(drive.down_and_distance(), "1st & Goal");
    }

    fn play_result() -> impl Strategy<Value = PlayResult> {
        prop_oneof![
            (-20.0f32..21.0).prop_map(|z| PlayResult::Catch { z }),
            Just(PlayResult::Incomplete),
            (-33.0f32..0.0).prop_map(|tackle_z| PlayResult::Sack { tackle_z }),
        ]
    }

    proptest! {
        #[test]
        fn prop_down_stays_in_range(results in proptest::collection::vec(play_result(), 1..30)) {
            let mut drive = live_drive();
            for result in results {
                let before_los = drive.line_of_scrimmage;
                let outcome = drive.resolve(result);
                prop_assert!((1..=MAX_DOWNS).contains(&drive.down));
                if let Some(PlayOutcome::FirstDown { .. }) = outcome {
                    prop_assert_eq!(
                        drive.first_down_marker,
                        (drive.line_of_scrimmage + 10.0).min(ENDZONE_Z - 1.0)
                    );
                    prop_assert!(drive.line_of_scrimmage >= before_los);
                }
                prop_assert!(drive.yards_to_go >= 1.0);
                if drive.status != GameStatus::Playing {
                    break;
                }
                next_play(&mut drive);
            }
        }
    }
}
