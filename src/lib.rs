//! Fairway - a deterministic 2D golf simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (terrain, wind, ball physics, match control)
//! - `link`: Fixed-layout wire records and non-blocking polling for a
//!   remote shot source
//!
//! The simulation is a fixed-timestep, single-threaded state machine.
//! All randomness comes from a seeded PCG stream owned by the session,
//! so two runs with the same seed and inputs produce the same trajectories.

pub mod link;
pub mod sim;

pub use sim::{Ball, CourseMap, MatchSession, ShotInput, Surface, TerrainProps, Wind};

use glam::Vec2;

/// Simulation tuning constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// World dimensions: square course of MAP_SIZE x MAP_SIZE tiles
    pub const MAP_SIZE: u32 = 32;
    pub const TILE_SIZE: f32 = 20.0;
    pub const WORLD_SIZE: f32 = MAP_SIZE as f32 * TILE_SIZE;

    /// Downward acceleration on the height axis (world units/s²)
    pub const GRAVITY_ACCEL: f32 = 800.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 6.0;
    /// Stationary ball within this distance of the hole counts as holed
    pub const HOLE_CAPTURE_RADIUS: f32 = 15.0;

    /// Launch tuning
    pub const LAUNCH_SCALE: f32 = 4.0;
    /// Vertical component scale applied to the lofted part of a launch
    pub const Z_SCALE: f32 = 0.6;
    /// Launch speed multiplier when hitting out of sand
    pub const SAND_LAUNCH_PENALTY: f32 = 0.45;
    /// Upstream clamp on shot power (max drag distance in world units)
    pub const MAX_DRAG_DISTANCE: f32 = 150.0;
    /// Vertical launch speed above which the ball leaves the ground
    pub const AIRBORNE_LAUNCH_EPS: f32 = 1.0;

    /// Wind
    pub const MAX_WIND_STRENGTH: f32 = 50.0;
    /// Fraction of the target/applied gap closed per tick
    pub const WIND_SMOOTHNESS: f32 = 0.25;
    /// Wind acceleration multiplier for a grounded (rolling) ball
    pub const GROUND_WIND_FACTOR: f32 = 0.08;
    /// Seconds between wind reseeds: uniform in [MIN, MIN + SPREAD)
    pub const WIND_RESEED_MIN: f32 = 3.0;
    pub const WIND_RESEED_SPREAD: f32 = 3.0;

    /// Spin / aerodynamics
    pub const MAGNUS_COEF: f32 = 0.0012;
    pub const MAGNUS_MAX: f32 = 10.0;
    pub const SPIN_AIR_DAMP: f32 = 0.996;
    pub const SPIN_GROUND_DAMP: f32 = 0.985;
    pub const AIR_DRAG_COEF: f32 = 1.6;

    /// Ground contact
    /// Height above which the ball counts as airborne
    pub const AIRBORNE_EPS: f32 = 1.0;
    /// Vertical speed below which ground contact kills vertical motion
    pub const REST_VERTICAL_SPEED: f32 = 6.0;
    /// Minimum descent speed for a bounce to trigger
    pub const BOUNCE_MIN_DESCENT: f32 = 10.0;
    /// Rebound speed above which the ball is airborne again after a bounce
    pub const BOUNCE_AIRBORNE_MIN: f32 = 4.0;
    /// Lateral speed below which a sand landing stops the ball outright
    pub const SAND_STOP_SPEED: f32 = 40.0;
    /// Lateral velocity retained by a fast sand landing
    pub const SAND_RETENTION: f32 = 0.06;
    /// Velocity retained (and reversed) by a wall bounce-back
    pub const WALL_RESTITUTION: f32 = 0.25;

    /// Stop thresholds
    /// Lateral speed below which a grounded ball fully stops
    pub const STOP_SPEED: f32 = 2.0;
    /// Lateral speed below which lateral motion alone is killed
    pub const LOW_SPEED_KILL: f32 = 4.5;
    /// Height below which the ball is treated as resting on the ground
    pub const GROUNDED_EPS: f32 = 0.05;
    /// Vertical speed below which vertical motion is negligible
    pub const VERTICAL_STOP_EPS: f32 = 0.2;

    /// Ticks between state snapshots sent to a remote observer (1 s at 60 Hz)
    pub const SNAPSHOT_INTERVAL_TICKS: u64 = 60;
}

/// Clamp a world position into the playable rectangle
#[inline]
pub fn clamp_to_world(pos: Vec2) -> Vec2 {
    pos.clamp(Vec2::ZERO, Vec2::splat(consts::WORLD_SIZE - 1.0))
}
