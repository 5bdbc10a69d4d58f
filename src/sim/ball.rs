//! Ball state
//!
//! A single point-mass sphere: lateral position/velocity in the world
//! plane, a height axis above it, and a spin vector. The anchor field
//! is the rollback target for hazard and wall contacts.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    /// Lateral position in world space
    pub pos: Vec2,
    /// Height above the ground plane
    pub height: f32,
    /// Lateral velocity
    pub vel: Vec2,
    /// Vertical velocity along the height axis
    pub v_height: f32,
    /// Spin state; x/y couple into the Magnus term while airborne
    pub spin: Vec3,
    pub radius: f32,
    /// Persists through the instant the height crosses zero so bounce
    /// boundaries do not flicker between grounded and airborne
    pub in_air: bool,
    /// When false, every velocity component is exactly zero
    pub is_moving: bool,
    /// Last stable grounded position; rollback anchor for hazards/walls
    pub anchor: Vec2,
    /// Loft angle for the next shot, degrees
    pub loft_deg: f32,
    /// Set when spin was adjusted explicitly; the next launch accumulates
    /// onto it instead of replacing it
    pub user_set_spin: bool,
}

impl Ball {
    /// A ball at rest on the tee
    pub fn at_rest(pos: Vec2) -> Self {
        Self {
            pos,
            height: 0.0,
            vel: Vec2::ZERO,
            v_height: 0.0,
            spin: Vec3::ZERO,
            radius: BALL_RADIUS,
            in_air: false,
            is_moving: false,
            anchor: pos,
            loft_deg: 45.0,
            user_set_spin: false,
        }
    }

    /// Manual spin adjustment ahead of a shot. Marks the spin as
    /// user-set so the launcher augments rather than replaces it.
    pub fn add_spin(&mut self, delta: Vec2) {
        self.spin.x += delta.x;
        self.spin.y += delta.y;
        self.user_set_spin = true;
    }

    /// Adjust loft, clamped to the playable range
    pub fn adjust_loft(&mut self, delta_deg: f32) {
        self.loft_deg = (self.loft_deg + delta_deg).clamp(0.0, 75.0);
    }

    pub fn lateral_speed(&self) -> f32 {
        self.vel.length()
    }

    /// Zero all motion and settle on the ground
    pub fn halt(&mut self) {
        self.vel = Vec2::ZERO;
        self.v_height = 0.0;
        self.in_air = false;
        self.is_moving = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_rest_upholds_stop_invariant() {
        let ball = Ball::at_rest(Vec2::new(90.0, 490.0));
        assert!(!ball.is_moving);
        assert_eq!(ball.vel, Vec2::ZERO);
        assert_eq!(ball.v_height, 0.0);
        assert_eq!(ball.anchor, ball.pos);
    }

    #[test]
    fn test_add_spin_marks_user_set() {
        let mut ball = Ball::at_rest(Vec2::ZERO);
        ball.add_spin(Vec2::new(-1.0, 1.0));
        ball.add_spin(Vec2::new(-1.0, 0.0));
        assert!(ball.user_set_spin);
        assert_eq!(ball.spin.x, -2.0);
        assert_eq!(ball.spin.y, 1.0);
    }

    #[test]
    fn test_loft_clamped() {
        let mut ball = Ball::at_rest(Vec2::ZERO);
        ball.adjust_loft(100.0);
        assert_eq!(ball.loft_deg, 75.0);
        ball.adjust_loft(-200.0);
        assert_eq!(ball.loft_deg, 0.0);
    }
}
