//! Entity state for every player on the field
//!
//! Entities are created once and repositioned at the start of each play.
//! `EntityStore` owns all of them; AI passes borrow it mutably one at a time.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::{clamp_span, clamp_to_field};

/// Stable entity identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

/// What an entity does on the field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Quarterback,
    Receiver,
    Defender,
    Lineman,
}

/// Which sideline a receiver lines up toward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Lateral sign pointing toward this sideline
    pub fn sign(self) -> f32 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Route a receiver runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteKind {
    /// Long stem, breaks to the corner or the post
    PostCorner,
    /// Short stem, breaks to the flat or slants inside
    OutSlant,
}

impl RouteKind {
    /// Stem length measured from the line of scrimmage
    pub fn break_depth(self) -> f32 {
        match self {
            RouteKind::PostCorner => POST_CORNER_BREAK_DEPTH,
            RouteKind::OutSlant => OUT_SLANT_BREAK_DEPTH,
        }
    }
}

/// Defensive assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Assignment {
    /// Chases the quarterback
    Rusher,
    /// Mirrors the receiver at this slot
    Corner { receiver: usize },
    /// Deep help, covers nobody directly
    Safety,
}

/// Position and facing shared by every entity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub role: Role,
    pub pos: Vec2,
    /// Radians, 0 = facing downfield
    pub heading: f32,
}

impl Entity {
    fn new(id: u32, role: Role) -> Self {
        Self {
            id: EntityId(id),
            role,
            pos: Vec2::ZERO,
            heading: 0.0,
        }
    }

    /// Place at a field position, facing `heading`
    fn place(&mut self, pos: Vec2, heading: f32) {
        self.pos = clamp_to_field(pos);
        self.heading = heading;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receiver {
    pub body: Entity,
    pub route: RouteKind,
    pub side: Side,
    /// Set by the covering corner each frame
    pub open: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Defender {
    pub body: Entity,
    pub assignment: Assignment,
}

pub const RECEIVER_COUNT: usize = 2;
pub const DEFENDER_COUNT: usize = 5;
pub const LINEMAN_COUNT: usize = 2;

/// Every player on the field
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityStore {
    pub qb: Entity,
    pub receivers: [Receiver; RECEIVER_COUNT],
    pub defenders: [Defender; DEFENDER_COUNT],
    pub linemen: [Entity; LINEMAN_COUNT],
}

impl EntityStore {
    /// Create the roster lined up on `los`
    pub fn new(los: f32) -> Self {
        let receiver = |id, route, side| Receiver {
            body: Entity::new(id, Role::Receiver),
            route,
            side,
            open: false,
        };
        let defender = |id, assignment| Defender {
            body: Entity::new(id, Role::Defender),
            assignment,
        };

        let mut store = Self {
            qb: Entity::new(1, Role::Quarterback),
            receivers: [
                receiver(2, RouteKind::PostCorner, Side::Left),
                receiver(3, RouteKind::OutSlant, Side::Right),
            ],
            defenders: [
                defender(4, Assignment::Rusher),
                defender(5, Assignment::Rusher),
                defender(6, Assignment::Corner { receiver: 0 }),
                defender(7, Assignment::Corner { receiver: 1 }),
                defender(8, Assignment::Safety),
            ],
            linemen: [Entity::new(9, Role::Lineman), Entity::new(10, Role::Lineman)],
        };
        store.line_up(los);
        store
    }

    /// Reposition everyone for a snap at `los`
    pub fn line_up(&mut self, los: f32) {
        use std::f32::consts::PI;

        let pocket_floor = FIELD_MIN_Z + POCKET_BACK_MARGIN;
        let qb_z = clamp_span(los - QB_DEPTH, pocket_floor, los - POCKET_LOS_MARGIN);
        self.qb.place(Vec2::new(0.0, qb_z), 0.0);

        for r in &mut self.receivers {
            r.body.place(Vec2::new(r.side.sign() * RECEIVER_SPLIT, los), 0.0);
            r.open = false;
        }

        for (i, l) in self.linemen.iter_mut().enumerate() {
            let x = if i == 0 { -LINEMAN_SPLIT } else { LINEMAN_SPLIT };
            l.place(Vec2::new(x, los), 0.0);
        }

        let mut rusher_slot = 0;
        for d in &mut self.defenders {
            let pos = match d.assignment {
                Assignment::Rusher => {
                    let x = if rusher_slot == 0 { -RUSHER_OFFSET.0 } else { RUSHER_OFFSET.0 };
                    rusher_slot += 1;
                    Vec2::new(x, los + RUSHER_OFFSET.1)
                }
                Assignment::Corner { receiver } => {
                    let side = self.receivers[receiver].side.sign();
                    Vec2::new(side * RECEIVER_SPLIT, los + CORNER_DEPTH)
                }
                Assignment::Safety => Vec2::new(
                    0.0,
                    (los + SAFETY_DEPTH).min(ENDZONE_Z - SAFETY_ENDZONE_MARGIN),
                ),
            };
            d.body.place(pos, PI);
        }
    }

    /// Corner assigned to the receiver at `slot`
    pub fn covering_defender(&self, slot: usize) -> Option<&Defender> {
        self.defenders
            .iter()
            .find(|d| d.assignment == Assignment::Corner { receiver: slot })
    }

    /// All entities in id order, for rendering
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        std::iter::once(&self.qb)
            .chain(self.receivers.iter().map(|r| &r.body))
            .chain(self.defenders.iter().map(|d| &d.body))
            .chain(self.linemen.iter())
    }

    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.iter().find(|e| e.id == id)
    }
}
