//! Gridiron Blitz - an arcade football drive simulator
//!
//! Core modules:
//! - `sim`: Play simulation (entities, routes/coverage, ball flight, down tracking)
//! - `cues`: Audio/haptic cue tags handed to the presentation layer
//! - `settings`: Player preferences that shape cue and shake output
//!
//! Coordinates are 2D ground positions: `x` is lateral, `y` is downfield
//! (the offense always drives toward +y). Ball height is tracked separately.

pub mod cues;
pub mod settings;
pub mod sim;

pub use cues::{AudioCue, CueSink, HapticCue};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Field geometry
    pub const FIELD_HALF_WIDTH: f32 = 26.0;
    pub const FIELD_MIN_Z: f32 = -35.0;
    pub const FIELD_MAX_Z: f32 = 35.0;
    /// Goal line the offense is driving toward
    pub const ENDZONE_Z: f32 = 25.0;

    /// Drive rules
    pub const KICKOFF_LOS: f32 = -15.0;
    pub const FIRST_DOWN_DISTANCE: f32 = 10.0;
    pub const MAX_DOWNS: u8 = 4;
    /// A catch this close to the goal line counts as a touchdown
    pub const TOUCHDOWN_MARGIN: f32 = 3.0;
    pub const TOUCHDOWN_POINTS: u32 = 7;

    /// Quarterback
    pub const QB_SPEED: f32 = 8.0;
    /// Lateral margin inside the sideline for the pocket
    pub const POCKET_SIDE_MARGIN: f32 = 1.0;
    /// Pocket floor sits this far above the back of the field
    pub const POCKET_BACK_MARGIN: f32 = 2.0;
    /// QB may not get closer than this to the LOS
    pub const POCKET_LOS_MARGIN: f32 = 1.0;
    pub const QB_DEPTH: f32 = 5.0;
    /// Ball offset from QB while held (lateral, downfield)
    pub const HELD_BALL_OFFSET: (f32, f32) = (0.4, 0.3);
    pub const HELD_BALL_HEIGHT: f32 = 1.8;

    /// Receivers
    pub const ROUTE_SPEED: f32 = 9.0;
    /// Outward lateral drift during the stem (fraction of route speed)
    pub const STEM_OUTWARD_BIAS: f32 = 0.15;
    pub const POST_CORNER_BREAK_DEPTH: f32 = 12.0;
    pub const OUT_SLANT_BREAK_DEPTH: f32 = 6.0;
    pub const RECEIVER_SPLIT: f32 = 14.0;
    pub const CATCH_HEIGHT: f32 = 1.2;

    /// Defenders
    pub const RUSH_SPEED: f32 = 5.5;
    /// Rushers stay within this distance past the LOS
    pub const RUSH_ZONE_DEPTH: f32 = 3.0;
    pub const SACK_RADIUS: f32 = 1.2;
    pub const COVER_SPEED: f32 = 7.0;
    /// Corners never drop further behind the LOS than this
    pub const COVER_BAND_BACK: f32 = 2.0;
    /// Receiver counts as open beyond this distance from its corner
    pub const OPEN_DISTANCE: f32 = 4.0;
    pub const SAFETY_DRIFT_SPEED: f32 = 2.0;
    pub const SAFETY_ENDZONE_MARGIN: f32 = 2.0;
    pub const RUSHER_OFFSET: (f32, f32) = (3.0, 2.0);
    pub const CORNER_DEPTH: f32 = 5.0;
    pub const SAFETY_DEPTH: f32 = 14.0;

    /// Offensive line
    pub const LINEMAN_SPLIT: f32 = 2.0;
    pub const ENGAGE_RADIUS: f32 = 6.0;
    pub const BLOCK_SPEED: f32 = 3.0;
    /// Linemen hold between the LOS and this far past it
    pub const BLOCK_ZONE_DEPTH: f32 = 2.0;

    /// Ball flight
    pub const BALL_SPEED: f32 = 28.0;
    /// Fraction of the receiver's projected travel the throw leads by
    pub const LEAD_FRACTION: f32 = 0.95;
    /// Pointing further ahead than this along the route gives no extra lead
    pub const CLICK_LEAD_MAX: f32 = 8.0;
    pub const CLICK_LEAD_BIAS: f32 = 0.5;
    pub const ARC_PEAK_RATIO: f32 = 0.15;
    pub const MIN_FLIGHT_TIME: f32 = 0.2;
    pub const CATCH_RADIUS: f32 = 3.0;
    pub const CATCH_PROB_OPEN: f32 = 0.85;
    pub const CATCH_PROB_COVERED: f32 = 0.35;

    /// Timing (seconds)
    pub const SACK_TIMER_START: u32 = 5;
    /// Sack timer counts down once per interval of real time
    pub const SACK_TIMER_INTERVAL: f32 = 1.0;
    pub const RESET_DELAY: f32 = 1.5;
    pub const CUTSCENE_START_DURATION: f32 = 2.0;
    pub const CUTSCENE_TOUCHDOWN_DURATION: f32 = 3.0;
    pub const CUTSCENE_SACK_DURATION: f32 = 1.5;
    pub const CUTSCENE_INTERCEPTION_DURATION: f32 = 2.0;

    /// Demo autopilot
    pub const AUTOPILOT_MIN_HOLD: f32 = 1.2;
    /// Throws regardless of coverage once a rusher is this close
    pub const AUTOPILOT_PRESSURE_RADIUS: f32 = 3.0;
    pub const AUTOPILOT_MAX_HOLD: f32 = 2.5;
}

/// Clamp `v` into `[min, max]`, pinning to `min` when the span is inverted
#[inline]
pub fn clamp_span(v: f32, min: f32, max: f32) -> f32 {
    v.min(max).max(min)
}

/// Clamp a ground position to the playing field
#[inline]
pub fn clamp_to_field(pos: Vec2) -> Vec2 {
    use consts::*;
    Vec2::new(
        clamp_span(pos.x, -FIELD_HALF_WIDTH, FIELD_HALF_WIDTH),
        clamp_span(pos.y, FIELD_MIN_Z, FIELD_MAX_Z),
    )
}

/// Heading (radians) of a ground direction, 0 = facing downfield
#[inline]
pub fn heading_of(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use consts::*;

    #[test]
    fn test_clamp_span_inverted() {
        assert_eq!(clamp_span(5.0, 0.0, 10.0), 5.0);
        assert_eq!(clamp_span(-5.0, 0.0, 10.0), 0.0);
        // Inverted span pins to the floor instead of panicking
        assert_eq!(clamp_span(7.0, 3.0, 1.0), 3.0);
    }

    #[test]
    fn test_clamp_to_field() {
        let p = clamp_to_field(Vec2::new(100.0, -100.0));
        assert_eq!(p, Vec2::new(FIELD_HALF_WIDTH, FIELD_MIN_Z));
    }

    #[test]
    fn test_heading_of() {
        assert!(heading_of(Vec2::new(0.0, 1.0)).abs() < 1e-6);
        assert!((heading_of(Vec2::new(1.0, 0.0)) - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }
}
