//! Per-tick ball dynamics
//!
//! Semi-implicit Euler integration plus a terrain-response state machine
//! evaluated once per fixed tick. Must stay deterministic: no RNG, no
//! time sources, nothing but the ball, the map, and the wind sample.

use super::ball::Ball;
use super::map::CourseMap;
use super::wind::Wind;
use crate::consts::*;

/// Terrain contact resolved during a tick, reported for logging and
/// match bookkeeping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactEvent {
    /// Landed in a hazard: rolled back to the anchor, stroke over
    HazardPenalty,
    /// Slow sand landing, stopped outright
    SandStop,
    /// Fast sand landing, lateral velocity heavily damped
    SandRetained,
    /// Hit a wall: rolled back to the anchor and reflected
    WallBounce,
    /// Rebounded off a bouncy surface
    Bounce,
}

/// Advance one ball by one fixed timestep. No-op while at rest.
/// Returns the terrain contact resolved this tick, if any.
pub fn step_ball(ball: &mut Ball, map: &CourseMap, wind: &Wind, dt: f32) -> Option<ContactEvent> {
    if !ball.is_moving {
        return None;
    }

    let mut event = None;
    let mut bounced = false;

    // Semi-implicit Euler: gravity first, then positions from the
    // updated velocities
    ball.v_height -= GRAVITY_ACCEL * dt;
    ball.pos += ball.vel * dt;
    ball.height += ball.v_height * dt;

    // The in_air flag persists through the instant the height crosses
    // zero, so a bounce does not flicker between regimes
    let airborne = ball.height > AIRBORNE_EPS || ball.in_air;

    let wind_scale = if airborne { 1.0 } else { GROUND_WIND_FACTOR };
    ball.vel += wind.acceleration() * dt * wind_scale;

    if airborne {
        // Magnus coupling: backspin/topspin bends the lateral track
        let magnus_x = (-ball.spin.y * ball.vel.y * MAGNUS_COEF).clamp(-MAGNUS_MAX, MAGNUS_MAX);
        let magnus_y = (ball.spin.y * ball.vel.x * MAGNUS_COEF).clamp(-MAGNUS_MAX, MAGNUS_MAX);
        ball.vel.x += magnus_x;
        ball.vel.y += magnus_y;
    }

    let spin_damp = if airborne { SPIN_AIR_DAMP } else { SPIN_GROUND_DAMP };
    ball.spin *= spin_damp;

    let terrain = map.terrain_at(ball.pos);

    if ball.height <= 0.0 {
        ball.height = 0.0;
        if ball.v_height.abs() < REST_VERTICAL_SPEED {
            ball.v_height = 0.0;
            ball.in_air = false;
        }

        if terrain.is_hazard {
            // Penalty: back to the last stable spot, stroke over
            ball.pos = ball.anchor;
            ball.halt();
            return Some(ContactEvent::HazardPenalty);
        }

        if terrain.is_sand {
            if ball.lateral_speed() < SAND_STOP_SPEED {
                ball.halt();
                event = Some(ContactEvent::SandStop);
            } else {
                ball.vel *= SAND_RETENTION;
                ball.v_height = 0.0;
                ball.in_air = false;
                event = Some(ContactEvent::SandRetained);
            }
            // Sand does not roll back
            ball.anchor = ball.pos;
        } else if terrain.is_solid {
            // Bounce-back off the wall from the last stable spot
            ball.pos = ball.anchor;
            ball.vel *= -WALL_RESTITUTION;
            ball.v_height = 0.0;
            ball.in_air = false;
            event = Some(ContactEvent::WallBounce);
        } else {
            ball.vel *= terrain.roll_damping;

            // Only a ball descending from flight rebounds; a grounded
            // ball reaccumulates more than BOUNCE_MIN_DESCENT of
            // gravity every tick and must not hop in place
            if airborne && terrain.bounce_factor > 0.01 && ball.v_height < -BOUNCE_MIN_DESCENT {
                ball.v_height = -ball.v_height * terrain.bounce_factor;
                ball.in_air = ball.v_height > BOUNCE_AIRBORNE_MIN;
                bounced = true;
                event = Some(ContactEvent::Bounce);
            } else {
                ball.v_height = 0.0;
                ball.in_air = false;
            }

            if !ball.in_air {
                ball.anchor = ball.pos;
            }
        }
    }

    if airborne && !bounced {
        ball.vel -= ball.vel * AIR_DRAG_COEF * dt;
    }

    // Rolling friction, re-sampled at the possibly updated position
    if ball.height <= 0.0 && !ball.in_air && ball.vel != glam::Vec2::ZERO {
        let rolling = map.terrain_at(ball.pos);
        ball.vel *= rolling.roll_damping;
    }

    ball.pos = crate::clamp_to_world(ball.pos);

    let speed = ball.lateral_speed();
    if speed < STOP_SPEED && ball.height <= GROUNDED_EPS && ball.v_height.abs() < VERTICAL_STOP_EPS
    {
        ball.halt();
    } else if speed < LOW_SPEED_KILL && ball.height <= GROUNDED_EPS && !ball.in_air {
        // Kill lateral creep only; vertical resolution finishes on a
        // later tick and the full stop above ends the stroke
        ball.vel = glam::Vec2::ZERO;
    }

    event
}
