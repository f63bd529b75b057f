//! Play simulation module
//!
//! All gameplay logic lives here. No rendering, audio, or input capture:
//! - Frame-driven by a wall-clock `dt`
//! - Single writer per concern (drive data only changes in `drive`)
//! - Presentation learns about changes through `GameEvent`s

pub mod drive;
pub mod entity;
pub mod flight;
pub mod quarterback;
pub mod routes;
pub mod state;
pub mod tick;

pub use drive::{
    Cutscene, DriveEnd, DriveState, DriveSummary, GameOverSummary, GameStatus, PlayOutcome,
    PlayPhase, PlayResult, first_down_marker_for,
};
pub use entity::{Assignment, Entity, EntityId, EntityStore, Receiver, Role, RouteKind, Side};
pub use flight::{Ball, Flight, FlightResult, ThrowPlan, catch_probability, plan_throw};
pub use quarterback::merge_intent;
pub use routes::route_velocity;
pub use state::{GameEvent, GameState};
pub use tick::{ThrowRequest, TickInput, tick};
