//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded, injectable RNG only
//! - Frame dt capped before integration
//! - Stable update order (left before right, tilted before horizontal)
//! - No rendering or input-device dependencies

pub mod ai;
pub mod collision;
pub mod events;
pub mod material;
pub mod segment;
pub mod state;
pub mod tick;

pub use collision::{
    CollisionResult, ball_box_collision, ball_capsule_collision, collide_horizontal_paddle,
    collide_vertical_paddle, reflect_velocity,
};
pub use events::{EventScheduler, GameEvent, SchedulerTick};
pub use material::{Material, MaterialTable};
pub use segment::Segment;
pub use state::{Ball, HorizontalPaddle, Player, RoundPhase, Side, VerticalPaddle};
pub use tick::{Match, MatchSnapshot, PlayerSnapshot};
