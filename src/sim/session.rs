//! Match control
//!
//! Owns the two independently simulated balls, the shared wind field,
//! and the course map. Arbitrates whose turn is active, detects holed
//! balls, and decides the match outcome by stroke count. Solo play runs
//! through the same per-ball update with the turn logic short-circuited.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::dynamics::{ContactEvent, step_ball};
use super::map::CourseMap;
use super::shot::{ShotInput, launch};
use super::wind::Wind;
use crate::consts::*;
use crate::link::StateSnapshot;

/// Match participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Seat {
    Player,
    Opponent,
}

impl Seat {
    pub fn other(self) -> Seat {
        match self {
            Seat::Player => Seat::Opponent,
            Seat::Opponent => Seat::Player,
        }
    }

    fn index(self) -> usize {
        match self {
            Seat::Player => 0,
            Seat::Opponent => 1,
        }
    }
}

/// Derived per-seat state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatState {
    /// Stationary, awaiting a shot
    Idle,
    InMotion,
    /// Holed out; terminal for the hole
    Finished,
}

/// Active-turn indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Turn {
    Player,
    Opponent,
    /// Both participants have holed out
    Complete,
}

/// Match outcome by stroke count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    PlayerWins,
    OpponentWins,
    Tie,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// One participant playing the hole alone
    Solo,
    /// Two participants competing on the same hole
    HeadToHead,
}

/// Shots offered to the session this tick. A seat whose shot is not
/// accepted simply stays idle; there is no error.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub player_shot: Option<ShotInput>,
    pub opponent_shot: Option<ShotInput>,
}

/// One hole of golf: map, wind, both balls, and the turn machinery
#[derive(Debug, Clone)]
pub struct MatchSession {
    mode: MatchMode,
    map: CourseMap,
    hole: Option<Vec2>,
    start: Vec2,
    seed: u64,
    rng: Pcg32,
    wind: Wind,
    balls: [Ball; 2],
    strokes: [u32; 2],
    finished: [bool; 2],
    turn: Turn,
    ticks: u64,
}

impl MatchSession {
    pub fn new(map: CourseMap, mode: MatchMode, seed: u64) -> Self {
        let start = map.find_start();
        let hole = map.find_hole();
        if hole.is_none() {
            log::warn!("Course map has no hole marker; nobody can finish");
        }
        Self {
            mode,
            hole,
            start,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            wind: Wind::calm(),
            balls: [Ball::at_rest(start), Ball::at_rest(start)],
            strokes: [0, 0],
            finished: [false, false],
            turn: Turn::Player,
            ticks: 0,
            map,
        }
    }

    /// Reinitialize the hole: balls back to the tee, fresh stroke
    /// counts, player's honor. The RNG stream restarts from the seed so
    /// a restarted session replays identically.
    pub fn restart(&mut self) {
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.wind = Wind::calm();
        self.balls = [Ball::at_rest(self.start), Ball::at_rest(self.start)];
        self.strokes = [0, 0];
        self.finished = [false, false];
        self.turn = Turn::Player;
        self.ticks = 0;
        log::info!("Match restarted");
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn map(&self) -> &CourseMap {
        &self.map
    }

    pub fn wind(&self) -> &Wind {
        &self.wind
    }

    pub fn turn(&self) -> Turn {
        self.turn
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn ball(&self, seat: Seat) -> &Ball {
        &self.balls[seat.index()]
    }

    /// Mutable ball access for pre-shot adjustments (loft, manual spin)
    pub fn ball_mut(&mut self, seat: Seat) -> &mut Ball {
        &mut self.balls[seat.index()]
    }

    pub fn strokes(&self, seat: Seat) -> u32 {
        self.strokes[seat.index()]
    }

    pub fn seat_state(&self, seat: Seat) -> SeatState {
        if self.finished[seat.index()] {
            SeatState::Finished
        } else if self.balls[seat.index()].is_moving {
            SeatState::InMotion
        } else {
            SeatState::Idle
        }
    }

    /// Whether `seat` may take a shot right now
    pub fn can_shoot(&self, seat: Seat) -> bool {
        if self.seat_state(seat) != SeatState::Idle {
            return false;
        }
        match self.mode {
            MatchMode::Solo => seat == Seat::Player,
            MatchMode::HeadToHead => match self.turn {
                Turn::Player => seat == Seat::Player,
                Turn::Opponent => seat == Seat::Opponent,
                Turn::Complete => false,
            },
        }
    }

    /// Offer a shot for a seat. Returns whether it was accepted.
    pub fn try_shot(&mut self, seat: Seat, shot: &ShotInput) -> bool {
        if !self.can_shoot(seat) {
            return false;
        }

        // Power is clamped upstream of the launcher
        let shot = ShotInput {
            power: shot.power.clamp(0.0, MAX_DRAG_DISTANCE),
            ..*shot
        };

        let idx = seat.index();
        let terrain = self.map.terrain_at(self.balls[idx].pos);
        launch(&mut self.balls[idx], &terrain, &shot);
        self.strokes[idx] += 1;
        log::info!(
            "{seat:?} stroke {}: power {:.0}, loft {:.0}",
            self.strokes[idx],
            shot.power,
            shot.loft_deg
        );

        // Turn passes unless the other seat already holed out
        if self.mode == MatchMode::HeadToHead && !self.finished[seat.other().index()] {
            self.turn = match seat.other() {
                Seat::Player => Turn::Player,
                Seat::Opponent => Turn::Opponent,
            };
        }
        true
    }

    /// Advance the session by one fixed tick
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.ticks += 1;
        self.wind.advance(dt, &mut self.rng);

        if let Some(shot) = &input.player_shot {
            self.try_shot(Seat::Player, shot);
        }
        if let Some(shot) = &input.opponent_shot {
            self.try_shot(Seat::Opponent, shot);
        }

        let active = match self.mode {
            MatchMode::Solo => &mut self.balls[..1],
            MatchMode::HeadToHead => &mut self.balls[..],
        };
        for (idx, ball) in active.iter_mut().enumerate() {
            if let Some(event) = step_ball(ball, &self.map, &self.wind, dt) {
                match event {
                    ContactEvent::HazardPenalty => {
                        log::info!("Seat {idx} found the hazard; back to the anchor")
                    }
                    ContactEvent::WallBounce => log::debug!("Seat {idx} bounced off a wall"),
                    _ => {}
                }
            }
        }

        self.settle();
    }

    /// Holed-ball detection and turn re-evaluation, once per tick
    fn settle(&mut self) {
        let Some(hole) = self.hole else {
            return;
        };

        for seat in [Seat::Player, Seat::Opponent] {
            let idx = seat.index();
            if self.mode == MatchMode::Solo && seat == Seat::Opponent {
                continue;
            }
            if !self.finished[idx]
                && !self.balls[idx].is_moving
                && self.balls[idx].pos.distance(hole) < HOLE_CAPTURE_RADIUS
            {
                // Permanent for the remainder of the hole
                self.finished[idx] = true;
                log::info!("{seat:?} holed out in {} strokes", self.strokes[idx]);
            }
        }

        if self.mode == MatchMode::Solo {
            return;
        }

        if self.finished[0] && self.finished[1] {
            self.turn = Turn::Complete;
            return;
        }

        // A turn pointing at a finished seat flips to the unfinished one
        // the same tick, so finishing never stalls the other participant
        self.turn = match self.turn {
            Turn::Player if self.finished[Seat::Player.index()] => Turn::Opponent,
            Turn::Opponent if self.finished[Seat::Opponent.index()] => Turn::Player,
            t => t,
        };
    }

    /// Match outcome once both participants have finished
    pub fn outcome(&self) -> Option<Outcome> {
        match self.mode {
            MatchMode::Solo => self.finished[0].then_some(Outcome::PlayerWins),
            MatchMode::HeadToHead => {
                if !(self.finished[0] && self.finished[1]) {
                    return None;
                }
                Some(match self.strokes[0].cmp(&self.strokes[1]) {
                    std::cmp::Ordering::Less => Outcome::PlayerWins,
                    std::cmp::Ordering::Greater => Outcome::OpponentWins,
                    std::cmp::Ordering::Equal => Outcome::Tie,
                })
            }
        }
    }

    /// Fixed-layout state record for a remote observer of `seat`
    pub fn snapshot(&self, seat: Seat) -> StateSnapshot {
        let idx = seat.index();
        let ball = &self.balls[idx];
        let hole = self.hole.unwrap_or(Vec2::splat(-1.0));
        StateSnapshot {
            ball_x: ball.pos.x,
            ball_y: ball.pos.y,
            ball_z: ball.height,
            hole_x: hole.x,
            hole_y: hole.y,
            wind_x: self.wind.dir.x,
            wind_y: self.wind.dir.y,
            wind_strength: self.wind.applied_strength,
            strokes: self.strokes[idx] as i32,
            stopped: (!ball.is_moving) as u8,
            won: self.finished[idx] as u8,
            _pad: [0; 2],
        }
    }
}
