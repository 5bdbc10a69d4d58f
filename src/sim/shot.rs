//! Shot launcher
//!
//! Converts an aim/power/loft input into an initial velocity and spin
//! state. The surface under the ball scales the launch, and the ball
//! picks up an automatic spin bias unless the player dialed spin in by
//! hand, in which case the bias accumulates on top of it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::terrain::TerrainProps;
use crate::consts::*;

/// A single shot request, from the UI drag gesture or a remote command
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShotInput {
    /// Aim direction; does not need to be normalized
    pub dir: Vec2,
    /// Drag power, expected in [0, MAX_DRAG_DISTANCE]
    pub power: f32,
    /// Loft angle in degrees
    pub loft_deg: f32,
}

/// Automatic backspin bias as a fraction of launch speed
const AUTO_BACKSPIN: f32 = 0.02;
/// Automatic sidespin bias opposing the aim direction
const AUTO_SIDESPIN: f32 = 0.01;
/// Accumulation rate when the player set spin manually
const MANUAL_ACCUM: f32 = 0.25;
/// Per-axis spin clamps as fractions of launch speed
const SIDESPIN_CLAMP: f32 = 0.08;
const BACKSPIN_CLAMP: f32 = 0.25;

/// Launch a ball. `terrain` is the surface under the ball at the moment
/// of the stroke.
pub fn launch(ball: &mut Ball, terrain: &TerrainProps, input: &ShotInput) {
    // Degenerate aim defaults to "away from viewer"
    let dir = input.dir.try_normalize().unwrap_or(Vec2::NEG_Y);

    let mut base = input.power * LAUNCH_SCALE * terrain.launch_factor;
    if terrain.is_sand {
        base *= SAND_LAUNCH_PENALTY;
    }

    let loft = input.loft_deg.to_radians();
    let horizontal = base * loft.cos();
    ball.vel = dir * horizontal;
    ball.v_height = base * loft.sin() * Z_SCALE;

    if ball.user_set_spin {
        ball.spin.y += base * AUTO_BACKSPIN * MANUAL_ACCUM;
        ball.spin.x += -dir.x * base * AUTO_SIDESPIN * MANUAL_ACCUM;
    } else {
        ball.spin.y = base * AUTO_BACKSPIN;
        ball.spin.x = -dir.x * base * AUTO_SIDESPIN;
    }
    ball.spin.x = ball.spin.x.clamp(-base * SIDESPIN_CLAMP, base * SIDESPIN_CLAMP);
    ball.spin.y = ball.spin.y.clamp(-base * BACKSPIN_CLAMP, base * BACKSPIN_CLAMP);

    ball.in_air = ball.v_height > AIRBORNE_LAUNCH_EPS;
    ball.is_moving = true;

    // Anchor only when the stroke starts from the ground, so a hazard
    // rollback mid-bounce still returns to the true last stable spot
    if ball.height <= 0.0 {
        ball.anchor = ball.pos;
    }

    ball.user_set_spin = false;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fairway() -> TerrainProps {
        TerrainProps::default()
    }

    #[test]
    fn test_full_power_lofted_shot() {
        let mut ball = Ball::at_rest(Vec2::new(300.0, 300.0));
        let input = ShotInput {
            dir: Vec2::new(0.0, -1.0),
            power: 100.0,
            loft_deg: 45.0,
        };
        launch(&mut ball, &fairway(), &input);

        assert!(ball.is_moving);
        assert!(ball.in_air);
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.vel.x, 0.0);
        assert!(ball.v_height > 0.0);
        // 400 * cos(45°) laterally, 400 * sin(45°) * Z_SCALE vertically
        assert!((ball.vel.length() - 400.0 * 0.5f32.sqrt()).abs() < 0.1);
        assert!((ball.v_height - 400.0 * 0.5f32.sqrt() * Z_SCALE).abs() < 0.1);
    }

    #[test]
    fn test_degenerate_aim_defaults_away_from_viewer() {
        let mut ball = Ball::at_rest(Vec2::ZERO);
        let input = ShotInput {
            dir: Vec2::ZERO,
            power: 50.0,
            loft_deg: 0.0,
        };
        launch(&mut ball, &fairway(), &input);
        assert!(ball.vel.y < 0.0);
        assert_eq!(ball.vel.x, 0.0);
    }

    #[test]
    fn test_sand_penalty() {
        let sand = crate::sim::Surface::Sand.props();
        let mut from_sand = Ball::at_rest(Vec2::ZERO);
        let mut from_grass = Ball::at_rest(Vec2::ZERO);
        let input = ShotInput {
            dir: Vec2::X,
            power: 100.0,
            loft_deg: 0.0,
        };

        launch(&mut from_sand, &sand, &input);
        launch(&mut from_grass, &fairway(), &input);

        let expected = 100.0 * LAUNCH_SCALE * sand.launch_factor * SAND_LAUNCH_PENALTY;
        assert!((from_sand.vel.length() - expected).abs() < 0.1);
        assert!(from_sand.vel.length() < from_grass.vel.length());
    }

    #[test]
    fn test_flat_shot_stays_grounded() {
        let mut ball = Ball::at_rest(Vec2::ZERO);
        let input = ShotInput {
            dir: Vec2::X,
            power: 30.0,
            loft_deg: 0.0,
        };
        launch(&mut ball, &fairway(), &input);
        assert!(!ball.in_air);
        assert!(ball.is_moving);
    }

    #[test]
    fn test_auto_spin_replaced_vs_accumulated() {
        let input = ShotInput {
            dir: Vec2::X,
            power: 100.0,
            loft_deg: 45.0,
        };
        let base = 100.0 * LAUNCH_SCALE;

        let mut auto = Ball::at_rest(Vec2::ZERO);
        launch(&mut auto, &fairway(), &input);
        assert!((auto.spin.y - base * AUTO_BACKSPIN).abs() < 1e-3);
        assert!((auto.spin.x - (-base * AUTO_SIDESPIN)).abs() < 1e-3);

        let mut manual = Ball::at_rest(Vec2::ZERO);
        manual.add_spin(Vec2::new(0.0, 3.0));
        launch(&mut manual, &fairway(), &input);
        // Accumulated on top of the manual value, at the reduced rate
        assert!((manual.spin.y - (3.0 + base * AUTO_BACKSPIN * MANUAL_ACCUM)).abs() < 1e-3);
        // Consumed by this shot
        assert!(!manual.user_set_spin);
    }

    #[test]
    fn test_spin_clamped_per_axis() {
        let mut ball = Ball::at_rest(Vec2::ZERO);
        ball.add_spin(Vec2::new(-500.0, 500.0));
        let input = ShotInput {
            dir: Vec2::X,
            power: 100.0,
            loft_deg: 45.0,
        };
        launch(&mut ball, &fairway(), &input);

        let base = 100.0 * LAUNCH_SCALE;
        assert!(ball.spin.x.abs() <= base * SIDESPIN_CLAMP + 1e-3);
        assert!(ball.spin.y.abs() <= base * BACKSPIN_CLAMP + 1e-3);
    }

    #[test]
    fn test_anchor_not_taken_mid_air() {
        let mut ball = Ball::at_rest(Vec2::new(10.0, 10.0));
        ball.height = 5.0;
        ball.pos = Vec2::new(200.0, 200.0);
        let input = ShotInput {
            dir: Vec2::X,
            power: 50.0,
            loft_deg: 30.0,
        };
        launch(&mut ball, &fairway(), &input);
        // Anchor still points at the grounded position
        assert_eq!(ball.anchor, Vec2::new(10.0, 10.0));
    }
}
