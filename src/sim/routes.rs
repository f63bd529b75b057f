//! Route running, coverage, pass rush and blocking
//!
//! Every pass reads positions committed by earlier passes in the same frame
//! and writes only the entities it owns.

use glam::Vec2;

use super::entity::{Assignment, EntityStore, RouteKind, Side};
use crate::consts::*;
use crate::{clamp_span, heading_of};

/// Break direction mix as (lateral, downfield) fractions of route speed
const CORNER_BREAK: (f32, f32) = (0.7, 0.7);
const POST_BREAK: (f32, f32) = (0.55, 0.85);
const OUT_BREAK: (f32, f32) = (0.95, 0.15);
const SLANT_BREAK: (f32, f32) = (0.6, 0.6);

/// Velocity a receiver wants this frame.
///
/// During the stem the receiver runs downfield drifting toward its sideline.
/// Past the break depth it cuts away from its corner: toward the sideline
/// (corner / out) when the corner sits inside, toward the middle (post /
/// slant) when the corner sits outside. Re-evaluated every frame, so the
/// break flips if the corner crosses over.
pub fn route_velocity(
    route: RouteKind,
    side: Side,
    pos: Vec2,
    defender_x: Option<f32>,
    los: f32,
) -> Vec2 {
    let outward = side.sign();

    if pos.y - los < route.break_depth() {
        return Vec2::new(outward * STEM_OUTWARD_BIAS, 1.0) * ROUTE_SPEED;
    }

    let away = match defender_x {
        Some(dx) if pos.x > dx => 1.0,
        Some(dx) if pos.x < dx => -1.0,
        _ => outward,
    };
    let breaking_out = away == outward;

    let (lateral, downfield) = match (route, breaking_out) {
        (RouteKind::PostCorner, true) => CORNER_BREAK,
        (RouteKind::PostCorner, false) => POST_BREAK,
        (RouteKind::OutSlant, true) => OUT_BREAK,
        (RouteKind::OutSlant, false) => SLANT_BREAK,
    };
    Vec2::new(away * lateral, downfield) * ROUTE_SPEED
}

/// Route velocity for the receiver at `slot`, read against its corner
pub fn receiver_velocity(store: &EntityStore, slot: usize, los: f32) -> Vec2 {
    let r = &store.receivers[slot];
    let defender_x = store.covering_defender(slot).map(|d| d.body.pos.x);
    route_velocity(r.route, r.side, r.body.pos, defender_x, los)
}

/// Step from `pos` toward `target` without overshooting
fn seek(pos: Vec2, target: Vec2, speed: f32, dt: f32) -> Vec2 {
    let to = target - pos;
    let step = speed * dt;
    let dist = to.length();
    if dist <= step {
        target
    } else {
        pos + to / dist * step
    }
}

fn clamp_lateral(x: f32) -> f32 {
    clamp_span(x, -FIELD_HALF_WIDTH, FIELD_HALF_WIDTH)
}

/// Advance both receivers along their routes
pub fn update_receivers(store: &mut EntityStore, los: f32, dt: f32) {
    for slot in 0..store.receivers.len() {
        let vel = receiver_velocity(store, slot, los);
        let body = &mut store.receivers[slot].body;
        let next = body.pos + vel * dt;
        body.pos = Vec2::new(
            clamp_lateral(next.x),
            clamp_span(next.y, FIELD_MIN_Z, ENDZONE_Z - 1.0),
        );
        body.heading = heading_of(vel);
    }
}

/// Advance every defender by assignment.
///
/// Corners refresh their receiver's open flag. Returns the quarterback's
/// position if a rusher reached the quarterback while no ball is in the air.
pub fn update_defenders(
    store: &mut EntityStore,
    los: f32,
    ball_in_flight: bool,
    dt: f32,
) -> Option<Vec2> {
    let EntityStore {
        qb,
        receivers,
        defenders,
        ..
    } = store;

    let mut sacked_at = None;
    for d in defenders.iter_mut() {
        let before = d.body.pos;
        match d.assignment {
            Assignment::Rusher => {
                let next = seek(before, qb.pos, RUSH_SPEED, dt);
                d.body.pos = Vec2::new(
                    clamp_lateral(next.x),
                    clamp_span(next.y, FIELD_MIN_Z, los + RUSH_ZONE_DEPTH),
                );
                if !ball_in_flight
                    && sacked_at.is_none()
                    && d.body.pos.distance(qb.pos) <= SACK_RADIUS
                {
                    sacked_at = Some(qb.pos);
                }
            }
            Assignment::Corner { receiver } => {
                let target = &mut receivers[receiver];
                let next = seek(before, target.body.pos, COVER_SPEED, dt);
                d.body.pos = Vec2::new(
                    clamp_lateral(next.x),
                    clamp_span(next.y, los - COVER_BAND_BACK, ENDZONE_Z),
                );
                target.open = d.body.pos.distance(target.body.pos) > OPEN_DISTANCE;
            }
            Assignment::Safety => {
                let next_y = before.y + SAFETY_DRIFT_SPEED * dt;
                d.body.pos.y = next_y.min(ENDZONE_Z - SAFETY_ENDZONE_MARGIN);
            }
        }
        let moved = d.body.pos - before;
        if moved != Vec2::ZERO {
            d.body.heading = heading_of(moved);
        }
    }
    sacked_at
}

/// Linemen pick up the nearest rusher inside their engagement radius.
///
/// Blocking is positional only: rushers are not slowed or stopped.
pub fn update_linemen(store: &mut EntityStore, los: f32, dt: f32) {
    let EntityStore {
        defenders, linemen, ..
    } = store;

    for l in linemen.iter_mut() {
        let nearest = defenders
            .iter()
            .filter(|d| d.assignment == Assignment::Rusher)
            .map(|d| d.body.pos)
            .min_by(|a, b| {
                a.distance(l.pos)
                    .partial_cmp(&b.distance(l.pos))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let Some(rusher) = nearest else { continue };
        if rusher.distance(l.pos) > ENGAGE_RADIUS {
            continue;
        }

        let next = seek(l.pos, rusher, BLOCK_SPEED, dt);
        l.pos = Vec2::new(
            clamp_lateral(next.x),
            clamp_span(next.y, los, los + BLOCK_ZONE_DEPTH),
        );
        let facing = rusher - l.pos;
        if facing != Vec2::ZERO {
            l.heading = heading_of(facing);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityStore;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn test_stem_runs_downfield_drifting_out() {
        let v = route_velocity(RouteKind::PostCorner, Side::Left, Vec2::new(-14.0, 3.0), Some(-14.0), 0.0);
        assert!(v.y > 0.0);
        assert!(v.x < 0.0, "left receiver drifts toward the left sideline");
        assert!(v.x.abs() < v.y.abs());
    }

    #[test]
    fn test_post_corner_breaks_away_from_defender() {
        let pos = Vec2::new(-14.0, POST_CORNER_BREAK_DEPTH + 1.0);
        // Corner inside (toward middle) -> break to the corner (outside)
        let v = route_velocity(RouteKind::PostCorner, Side::Left, pos, Some(-10.0), 0.0);
        assert!(v.x < 0.0);
        // Corner outside -> break to the post (inside)
        let v = route_velocity(RouteKind::PostCorner, Side::Left, pos, Some(-18.0), 0.0);
        assert!(v.x > 0.0);
        assert!(v.y > v.x, "post stays mostly vertical");
    }

    #[test]
    fn test_out_slant_mirrors_on_right_side() {
        let pos = Vec2::new(14.0, OUT_SLANT_BREAK_DEPTH + 0.5);
        // Corner inside -> out route toward the right sideline, flat
        let out = route_velocity(RouteKind::OutSlant, Side::Right, pos, Some(10.0), 0.0);
        assert!(out.x > 0.0);
        assert!(out.x > out.y);
        // Corner outside -> slant to the middle
        let slant = route_velocity(RouteKind::OutSlant, Side::Right, pos, Some(17.0), 0.0);
        assert!(slant.x < 0.0);
    }

    #[test]
    fn test_break_depth_measured_from_los() {
        // Same absolute position, different LOS: stem vs break
        let pos = Vec2::new(14.0, 10.0);
        let stem = route_velocity(RouteKind::OutSlant, Side::Right, pos, Some(10.0), 8.0);
        let brk = route_velocity(RouteKind::OutSlant, Side::Right, pos, Some(10.0), 0.0);
        assert!((stem.y - ROUTE_SPEED).abs() < 1e-4);
        assert!(brk.y < stem.y);
    }

    #[test]
    fn test_receivers_stop_short_of_endzone() {
        let mut store = EntityStore::new(20.0);
        for _ in 0..600 {
            update_receivers(&mut store, 20.0, DT);
        }
        for r in &store.receivers {
            assert!(r.body.pos.y <= ENDZONE_Z - 1.0);
            assert!(r.body.pos.x.abs() <= FIELD_HALF_WIDTH);
        }
    }

    #[test]
    fn test_corner_sets_open_flag() {
        let mut store = EntityStore::new(0.0);
        store.receivers[0].body.pos = Vec2::new(-14.0, 0.0);
        store.defenders[2].body.pos = Vec2::new(-14.0, 20.0);
        update_defenders(&mut store, 0.0, false, DT);
        assert!(store.receivers[0].open);

        store.defenders[2].body.pos = Vec2::new(-14.0, 1.0);
        update_defenders(&mut store, 0.0, false, DT);
        assert!(!store.receivers[0].open);
    }

    #[test]
    fn test_rusher_reaching_qb_is_a_sack() {
        let mut store = EntityStore::new(0.0);
        store.defenders[0].body.pos = store.qb.pos + Vec2::new(0.5, 0.5);
        let sack = update_defenders(&mut store, 0.0, false, DT);
        assert_eq!(sack, Some(store.qb.pos));
    }

    #[test]
    fn test_no_sack_while_ball_in_flight() {
        let mut store = EntityStore::new(0.0);
        store.defenders[0].body.pos = store.qb.pos;
        assert_eq!(update_defenders(&mut store, 0.0, true, DT), None);
    }

    #[test]
    fn test_rusher_closes_on_qb() {
        let mut store = EntityStore::new(0.0);
        let before = store.defenders[0].body.pos.distance(store.qb.pos);
        update_defenders(&mut store, 0.0, false, 0.1);
        let after = store.defenders[0].body.pos.distance(store.qb.pos);
        assert!((before - after - RUSH_SPEED * 0.1).abs() < 1e-3);
    }

    #[test]
    fn test_safety_drifts_but_stays_short_of_endzone() {
        let mut store = EntityStore::new(5.0);
        let start = store.defenders[4].body.pos.y;
        update_defenders(&mut store, 5.0, false, 1.0);
        assert!((store.defenders[4].body.pos.y - (start + SAFETY_DRIFT_SPEED)).abs() < 1e-4);
        for _ in 0..50 {
            update_defenders(&mut store, 5.0, false, 1.0);
        }
        assert!(store.defenders[4].body.pos.y <= ENDZONE_Z - SAFETY_ENDZONE_MARGIN);
    }

    #[test]
    fn test_lineman_engages_rusher_in_range() {
        let mut store = EntityStore::new(0.0);
        let before = store.linemen[0].pos;
        update_linemen(&mut store, 0.0, 0.1);
        assert_ne!(store.linemen[0].pos, before);
        assert!(store.linemen[0].pos.y >= 0.0 && store.linemen[0].pos.y <= BLOCK_ZONE_DEPTH);
    }

    #[test]
    fn test_lineman_ignores_distant_rushers() {
        let mut store = EntityStore::new(0.0);
        store.defenders[0].body.pos = Vec2::new(-20.0, 20.0);
        store.defenders[1].body.pos = Vec2::new(20.0, 20.0);
        let before = store.linemen.clone();
        update_linemen(&mut store, 0.0, 0.1);
        assert_eq!(store.linemen, before);
    }
}
