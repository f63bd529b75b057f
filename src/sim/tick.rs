//! Per-frame simulation step
//!
//! Frame order: cutscene -> shake decay -> sack timer -> quarterback ->
//! linemen -> receivers -> defenders -> ball flight. Each stage reads what
//! earlier stages committed this frame.

use glam::Vec2;

use super::drive::{GameStatus, PlayPhase, PlayResult};
use super::entity::Assignment;
use super::flight::{FlightResult, resolve_arrival};
use super::quarterback::{held_ball_position, merge_intent, move_quarterback};
use super::routes::{update_defenders, update_linemen, update_receivers};
use super::state::GameState;
use crate::consts::*;

/// Pass request from the player
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowRequest {
    /// Receiver slot
    pub receiver: usize,
    /// World point the player pointed at, if any
    pub aim: Option<Vec2>,
}

/// Input for a single frame
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Virtual joystick intent, each axis in [-1, 1]
    pub stick: Vec2,
    /// Keyboard intent, each axis in [-1, 1]
    pub keys: Vec2,
    pub throw: Option<ThrowRequest>,
    /// Start a drive from the menu / game over screen
    pub start: bool,
    pub skip_cutscene: bool,
    /// Idle/demo mode - autopilot plays quarterback
    pub idle_mode: bool,
}

/// Advance the game by `dt` seconds of wall-clock time
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    let dt = dt.max(0.0);

    if input.start {
        state.start_game();
    }
    if state.drive.status == GameStatus::Menu {
        return;
    }
    state.clock += dt;

    // Cutscenes freeze the field
    if state.drive.cutscene.is_active() {
        if input.skip_cutscene || state.settings.skip_cutscenes {
            state.drive.skip_cutscene();
        } else if state.drive.advance_cutscene(dt) {
            return;
        }
    }
    if state.drive.status == GameStatus::GameOver {
        return;
    }

    // Decay screen shake
    state.screen_shake *= 0.9;
    if state.screen_shake < 0.01 {
        state.screen_shake = 0.0;
    }

    match state.drive.play {
        PlayPhase::PreSnap => state.snap(),
        PlayPhase::Resolving { .. } => {
            if state.drive.tick_reset(dt) {
                state.reset_play();
            }
            return;
        }
        PlayPhase::Live => {}
    }
    if !state.drive.play.is_live() {
        return;
    }
    state.play_elapsed += dt;

    let input = if input.idle_mode {
        autopilot(state, input)
    } else {
        input.clone()
    };

    // Pocket collapses when the sack timer runs out
    if state.drive.tick_sack_timer(dt) && !state.ball.in_flight() {
        let tackle_z = state.entities.qb.pos.y;
        state.resolve_play(PlayResult::Sack { tackle_z });
        return;
    }

    let los = state.drive.line_of_scrimmage;

    if !state.ball.in_flight() {
        let intent = merge_intent(input.stick, input.keys);
        move_quarterback(&mut state.entities.qb, intent, los, dt);
        state.ball.hold_at(held_ball_position(&state.entities.qb));
        if let Some(req) = input.throw {
            state.throw_ball(req.receiver, req.aim);
        }
    }

    update_linemen(&mut state.entities, los, dt);
    update_receivers(&mut state.entities, los, dt);

    let in_flight = state.ball.in_flight();
    if let Some(qb) = update_defenders(&mut state.entities, los, in_flight, dt) {
        state.resolve_play(PlayResult::Sack { tackle_z: qb.y });
        return;
    }

    update_ball_flight(state);
}

/// Move the ball along its arc and settle the pass once it arrives
fn update_ball_flight(state: &mut GameState) {
    let (t, pos, height) = match &state.ball.flight {
        Some(flight) => {
            let t = flight.progress(state.clock);
            let (pos, height) = flight.sample(t);
            (t, pos, height)
        }
        None => return,
    };
    state.ball.pos = pos;
    state.ball.height = height;
    if t < 1.0 {
        return;
    }

    let Some(flight) = state.ball.flight.take() else {
        return;
    };
    let receiver = &state.entities.receivers[flight.receiver];
    let (receiver_pos, open) = (receiver.body.pos, receiver.open);
    let roll = state.roll();

    let result = match resolve_arrival(pos, receiver_pos, open, roll) {
        FlightResult::Incomplete => PlayResult::Incomplete,
        FlightResult::Caught { at } => PlayResult::Catch { z: at.y },
        FlightResult::Intercepted { at } => PlayResult::Interception { z: at.y },
    };
    state.resolve_play(result);
}

/// Demo quarterback: slide away from pressure, hit an open receiver, and
/// get rid of the ball to the best-separated man once a rusher closes in
/// or the play drags on
fn autopilot(state: &GameState, input: &TickInput) -> TickInput {
    let mut input = input.clone();
    let qb = state.entities.qb.pos;

    let nearest_rusher = state
        .entities
        .defenders
        .iter()
        .filter(|d| d.assignment == Assignment::Rusher)
        .map(|d| d.body.pos)
        .min_by(|a, b| {
            a.distance(qb)
                .partial_cmp(&b.distance(qb))
                .unwrap_or(std::cmp::Ordering::Equal)
        });
    input.stick = nearest_rusher
        .map(|r| (qb - r).normalize_or_zero())
        .unwrap_or(Vec2::ZERO);
    input.keys = Vec2::ZERO;

    if state.ball.in_flight() || input.throw.is_some() {
        return input;
    }

    let store = &state.entities;
    let separation = |slot: usize| {
        let pos = store.receivers[slot].body.pos;
        store
            .covering_defender(slot)
            .map(|d| d.body.pos.distance(pos))
            .unwrap_or(f32::MAX)
    };
    let deepest_open = store
        .receivers
        .iter()
        .enumerate()
        .filter(|(_, r)| r.open)
        .max_by(|(_, a), (_, b)| {
            a.body
                .pos
                .y
                .partial_cmp(&b.body.pos.y)
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|(i, _)| i);
    let most_separated = (0..store.receivers.len()).max_by(|&a, &b| {
        separation(a)
            .partial_cmp(&separation(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let pressured = nearest_rusher.is_some_and(|r| r.distance(qb) <= AUTOPILOT_PRESSURE_RADIUS);
    let mut target = None;
    if state.play_elapsed >= AUTOPILOT_MIN_HOLD {
        target = deepest_open;
    }
    if target.is_none() && (pressured || state.play_elapsed >= AUTOPILOT_MAX_HOLD) {
        target = most_separated;
    }

    input.throw = target.map(|receiver| ThrowRequest {
        receiver,
        aim: None,
    });
    input
}
