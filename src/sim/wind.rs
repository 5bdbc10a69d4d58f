//! Stochastic wind field
//!
//! One wind instance per match session, shared read-only by every ball.
//! Direction and target strength are redrawn on a random interval; the
//! applied strength eases toward the target every tick so the force the
//! ball feels is gusty but never discontinuous.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Wind {
    /// Unit direction the wind blows toward
    pub dir: Vec2,
    /// Strength the current gust is heading for
    pub target_strength: f32,
    /// Smoothed strength actually applied to balls
    pub applied_strength: f32,
    /// Seconds until the next reseed
    pub timer: f32,
}

impl Wind {
    /// Session-start state: a gentle easterly about to pick up
    pub fn calm() -> Self {
        Self {
            dir: Vec2::X,
            target_strength: 0.0,
            applied_strength: 0.0,
            timer: 4.0,
        }
    }

    /// Advance one tick. Reseeds direction/target when the timer
    /// expires; always eases the applied strength toward the target.
    pub fn advance(&mut self, dt: f32, rng: &mut Pcg32) {
        self.timer -= dt;
        if self.timer <= 0.0 {
            let angle = rng.random_range(0.0..std::f32::consts::TAU);
            self.dir = Vec2::new(angle.cos(), angle.sin());
            self.target_strength = rng.random_range(0.0..MAX_WIND_STRENGTH);
            self.timer = rng.random_range(WIND_RESEED_MIN..WIND_RESEED_MIN + WIND_RESEED_SPREAD);
        }
        self.applied_strength += (self.target_strength - self.applied_strength) * WIND_SMOOTHNESS;
    }

    /// Acceleration applied to an airborne ball this tick
    pub fn acceleration(&self) -> Vec2 {
        self.dir * self.applied_strength
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_applied_strength_approaches_target() {
        let mut wind = Wind::calm();
        wind.target_strength = 40.0;
        wind.timer = 100.0; // no reseed during the test
        let mut rng = Pcg32::seed_from_u64(1);

        let mut prev_gap = (wind.target_strength - wind.applied_strength).abs();
        for _ in 0..50 {
            wind.advance(SIM_DT, &mut rng);
            let gap = (wind.target_strength - wind.applied_strength).abs();
            // Monotone approach, no overshoot
            assert!(gap <= prev_gap);
            assert!(wind.applied_strength <= wind.target_strength);
            prev_gap = gap;
        }
        // Asymptotic, not instantaneous: one step closes only a fraction
        assert!(wind.applied_strength > 0.0);
    }

    #[test]
    fn test_first_step_is_not_instantaneous() {
        let mut wind = Wind::calm();
        wind.target_strength = 40.0;
        wind.timer = 100.0;
        let mut rng = Pcg32::seed_from_u64(1);

        wind.advance(SIM_DT, &mut rng);
        assert!((wind.applied_strength - 40.0 * WIND_SMOOTHNESS).abs() < 1e-5);
    }

    #[test]
    fn test_reseed_bounds() {
        let mut wind = Wind::calm();
        let mut rng = Pcg32::seed_from_u64(7);

        // Run long enough to cross many reseed intervals
        for _ in 0..(60 * 60) {
            wind.advance(SIM_DT, &mut rng);
            assert!((0.0..=MAX_WIND_STRENGTH).contains(&wind.target_strength));
            assert!(wind.timer <= WIND_RESEED_MIN + WIND_RESEED_SPREAD);
            // Direction stays a unit vector through reseeds
            assert!((wind.dir.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_deterministic_given_seed() {
        let mut a = Wind::calm();
        let mut b = Wind::calm();
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);

        for _ in 0..600 {
            a.advance(SIM_DT, &mut rng_a);
            b.advance(SIM_DT, &mut rng_b);
        }
        assert_eq!(a.dir, b.dir);
        assert_eq!(a.applied_strength, b.applied_strength);
    }
}
