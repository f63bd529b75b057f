//! Ball flight: throw targeting, parabolic trajectory, and catch resolution

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::clamp_span;

/// An active pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flight {
    pub start: Vec2,
    pub target: Vec2,
    pub start_height: f32,
    pub target_height: f32,
    /// Sim clock when the ball left the QB's hand
    pub start_time: f32,
    /// Seconds from release to arrival (always > 0)
    pub duration: f32,
    pub peak_height: f32,
    /// Receiver slot the pass was thrown to
    pub receiver: usize,
}

impl Flight {
    /// Normalized progress at sim time `now`, clamped to [0, 1]
    pub fn progress(&self, now: f32) -> f32 {
        ((now - self.start_time) / self.duration).clamp(0.0, 1.0)
    }

    /// Ground position and height at progress `t`
    pub fn sample(&self, t: f32) -> (Vec2, f32) {
        if t >= 1.0 {
            return (self.target, self.target_height);
        }
        if t <= 0.0 {
            return (self.start, self.start_height);
        }
        let ground = self.start + (self.target - self.start) * t;
        let base = self.start_height + (self.target_height - self.start_height) * t;
        (ground, base + 4.0 * self.peak_height * t * (1.0 - t))
    }
}

/// The football
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub height: f32,
    /// At most one pass is ever in the air
    pub flight: Option<Flight>,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: Vec2::ZERO,
            height: HELD_BALL_HEIGHT,
            flight: None,
        }
    }
}

impl Ball {
    pub fn in_flight(&self) -> bool {
        self.flight.is_some()
    }

    /// Pin the ball to the passer's hand
    pub fn hold_at(&mut self, pos: Vec2) {
        self.pos = pos;
        self.height = HELD_BALL_HEIGHT;
    }
}

/// Where and how a pass will travel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThrowPlan {
    pub target: Vec2,
    pub duration: f32,
    pub peak_height: f32,
}

/// Work out the aim point for a pass from `from` to a receiver.
///
/// The pass leads the receiver along `route_vel` by `LEAD_FRACTION` of the
/// estimated flight time, so the receiver is still running when it lands.
/// A pointed-at `aim` ahead of the receiver along the route adds extra lead.
/// The result is clamped to the field and kept a yard short of the goal line
/// unless the receiver is already beyond that.
pub fn plan_throw(from: Vec2, receiver_pos: Vec2, route_vel: Vec2, aim: Option<Vec2>) -> ThrowPlan {
    let lead_time = from.distance(receiver_pos) / BALL_SPEED;
    let mut target = receiver_pos + route_vel * lead_time * LEAD_FRACTION;

    if let Some(aim) = aim {
        let dir = route_vel.normalize_or_zero();
        let ahead = (aim - receiver_pos).dot(dir);
        if ahead > 0.0 && ahead <= CLICK_LEAD_MAX {
            target += dir * ahead * CLICK_LEAD_BIAS;
        }
    }

    let max_z = (ENDZONE_Z - 1.0).max(receiver_pos.y);
    let target = Vec2::new(
        clamp_span(target.x, -FIELD_HALF_WIDTH, FIELD_HALF_WIDTH),
        clamp_span(target.y, FIELD_MIN_Z, max_z),
    );

    let distance = from.distance(target);
    ThrowPlan {
        target,
        duration: (distance / BALL_SPEED).max(MIN_FLIGHT_TIME),
        peak_height: distance * ARC_PEAK_RATIO,
    }
}

/// Chance a receiver hauls in a catchable ball
pub fn catch_probability(open: bool) -> f32 {
    if open {
        CATCH_PROB_OPEN
    } else {
        CATCH_PROB_COVERED
    }
}

/// How a pass ended
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightResult {
    Incomplete,
    Caught { at: Vec2 },
    Intercepted { at: Vec2 },
}

/// Decide a pass that has arrived. `roll` is uniform in [0, 1).
pub fn resolve_arrival(ball_pos: Vec2, receiver_pos: Vec2, open: bool, roll: f32) -> FlightResult {
    if ball_pos.distance(receiver_pos) > CATCH_RADIUS {
        FlightResult::Incomplete
    } else if roll < catch_probability(open) {
        FlightResult::Caught { at: receiver_pos }
    } else {
        FlightResult::Intercepted { at: receiver_pos }
    }
}
