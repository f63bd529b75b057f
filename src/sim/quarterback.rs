//! Quarterback movement inside the pocket

use glam::Vec2;

use super::entity::Entity;
use crate::clamp_span;
use crate::consts::*;

/// Merge two input sources, keeping whichever is stronger on each axis
pub fn merge_intent(a: Vec2, b: Vec2) -> Vec2 {
    let pick = |p: f32, q: f32| if q.abs() > p.abs() { q } else { p };
    Vec2::new(pick(a.x, b.x), pick(a.y, b.y)).clamp(Vec2::NEG_ONE, Vec2::ONE)
}

/// Pocket bounds as (min, max) corners for a given line of scrimmage
pub fn pocket_bounds(los: f32) -> (Vec2, Vec2) {
    let half = FIELD_HALF_WIDTH - POCKET_SIDE_MARGIN;
    let floor = FIELD_MIN_Z + POCKET_BACK_MARGIN;
    let ceiling = (los - POCKET_LOS_MARGIN).max(floor);
    (Vec2::new(-half, floor), Vec2::new(half, ceiling))
}

/// Move the quarterback by `intent` and keep the quarterback in the pocket
pub fn move_quarterback(qb: &mut Entity, intent: Vec2, los: f32, dt: f32) {
    let intent = intent.clamp(Vec2::NEG_ONE, Vec2::ONE);
    let (min, max) = pocket_bounds(los);
    let next = qb.pos + intent * QB_SPEED * dt.max(0.0);
    qb.pos = Vec2::new(
        clamp_span(next.x, min.x, max.x),
        clamp_span(next.y, min.y, max.y),
    );
}

/// Where the ball sits while the quarterback holds it
pub fn held_ball_position(qb: &Entity) -> Vec2 {
    qb.pos + Vec2::new(HELD_BALL_OFFSET.0, HELD_BALL_OFFSET.1)
}
