//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only (wind is the single consumer)
//! - No rendering or platform dependencies

pub mod ball;
pub mod dynamics;
pub mod map;
pub mod session;
pub mod shot;
pub mod terrain;
pub mod wind;

pub use ball::Ball;
pub use dynamics::{ContactEvent, step_ball};
pub use map::CourseMap;
pub use session::{MatchMode, MatchSession, Outcome, Seat, SeatState, TickInput, Turn};
pub use shot::{ShotInput, launch};
pub use terrain::{Surface, TerrainProps};
pub use wind::Wind;
