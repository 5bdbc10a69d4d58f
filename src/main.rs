//! Headless demo runner
//!
//! Loads a course map (or the generated fallback), plays a short solo
//! session with scripted shots, and logs the results. Exercises the
//! simulation end to end without any rendering.

use glam::Vec2;

use fairway::consts::*;
use fairway::sim::{CourseMap, MatchMode, MatchSession, Seat, SeatState, ShotInput, TickInput};

/// Give up on a hole after this much simulated time
const MAX_SIM_SECONDS: u32 = 120;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let map_path = std::env::args().nth(1).unwrap_or_else(|| "golf_map.ppm".into());
    let map = CourseMap::load_or_fallback(&map_path);

    let mut session = MatchSession::new(map, MatchMode::Solo, 0xFA12_4A7);

    let Some(hole) = session.map().find_hole() else {
        log::error!("Map has no hole; nothing to play");
        return;
    };
    log::info!(
        "Tee at ({:.0}, {:.0}), hole at ({:.0}, {:.0})",
        session.ball(Seat::Player).pos.x,
        session.ball(Seat::Player).pos.y,
        hole.x,
        hole.y
    );

    for _ in 0..(MAX_SIM_SECONDS * 60) {
        if session.seat_state(Seat::Player) == SeatState::Finished {
            break;
        }

        let input = if session.can_shoot(Seat::Player) {
            // Naive caddie: aim straight at the hole, power from the
            // remaining distance, flatten the loft when close
            let ball = session.ball(Seat::Player);
            let to_hole = hole - ball.pos;
            let dist = to_hole.length();
            let shot = ShotInput {
                dir: to_hole.try_normalize().unwrap_or(Vec2::NEG_Y),
                power: (dist * 0.35).min(MAX_DRAG_DISTANCE),
                loft_deg: if dist < 80.0 { 10.0 } else { 45.0 },
            };
            TickInput {
                player_shot: Some(shot),
                ..Default::default()
            }
        } else {
            TickInput::default()
        };

        session.tick(&input, SIM_DT);
    }

    match session.seat_state(Seat::Player) {
        SeatState::Finished => log::info!(
            "Holed out in {} strokes",
            session.strokes(Seat::Player)
        ),
        _ => log::warn!(
            "Gave up after {} strokes; ball at ({:.0}, {:.0})",
            session.strokes(Seat::Player),
            session.ball(Seat::Player).pos.x,
            session.ball(Seat::Player).pos.y
        ),
    }
}
