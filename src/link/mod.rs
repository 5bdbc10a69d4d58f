//! Wire contracts for a remote shot source
//!
//! A remote decision process observes one seat through fixed-layout
//! state snapshots and answers with fixed-layout shot commands. The
//! transport is whatever the caller hands in (a named pipe, a socket, a
//! test buffer); this module only owns the record layouts, the
//! whole-record polling rule, and the snapshot cadence.
//!
//! A missing, partial, or unreadable record is "no command this tick",
//! never an error. A stalled remote simply leaves its seat idle.

use std::io::{self, Read, Write};

use bytemuck::{Pod, Zeroable};
use glam::Vec2;

use crate::consts::SNAPSHOT_INTERVAL_TICKS;
use crate::sim::ShotInput;

/// Connection state of the remote channel, owned by the caller and
/// queried rather than read from ambient globals
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LinkStatus {
    #[default]
    Disconnected,
    Connected,
}

/// State record sent toward the remote observer.
///
/// Layout is fixed at 40 bytes: eight f32 fields, an i32 stroke count,
/// two byte flags, and two bytes of explicit tail padding (the peer
/// unpacks `8fi??xx`).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct StateSnapshot {
    pub ball_x: f32,
    pub ball_y: f32,
    pub ball_z: f32,
    pub hole_x: f32,
    pub hole_y: f32,
    pub wind_x: f32,
    pub wind_y: f32,
    pub wind_strength: f32,
    pub strokes: i32,
    /// 1 when the ball is stationary
    pub stopped: u8,
    /// 1 when this seat has holed out
    pub won: u8,
    pub _pad: [u8; 2],
}

/// Shot command received from the remote source. Fixed 24-byte layout,
/// six f32 fields.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShotCommand {
    pub dir_x: f32,
    pub dir_y: f32,
    pub loft_deg: f32,
    pub power: f32,
    pub spin_x: f32,
    pub spin_y: f32,
}

impl ShotCommand {
    /// Split into the launcher input and the optional manual spin delta
    pub fn into_shot(self) -> (ShotInput, Option<Vec2>) {
        let spin = Vec2::new(self.spin_x, self.spin_y);
        let spin = (spin != Vec2::ZERO).then_some(spin);
        (
            ShotInput {
                dir: Vec2::new(self.dir_x, self.dir_y),
                power: self.power,
                loft_deg: self.loft_deg,
            },
            spin,
        )
    }
}

/// Non-blocking reader of whole shot-command records
#[derive(Debug)]
pub struct CommandReader<R> {
    source: R,
    status: LinkStatus,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        Self {
            source,
            status: LinkStatus::Disconnected,
        }
    }

    /// Connection state, proven by the first whole record received
    pub fn status(&self) -> LinkStatus {
        self.status
    }

    /// Poll once for a command. Records are read in whole-record units
    /// only; `WouldBlock`, EOF, short reads, and transport errors all
    /// mean "no command this tick".
    pub fn poll(&mut self) -> Option<ShotCommand> {
        let mut buf = [0u8; size_of::<ShotCommand>()];
        match self.source.read(&mut buf) {
            Ok(n) if n == buf.len() => {
                if self.status == LinkStatus::Disconnected {
                    self.status = LinkStatus::Connected;
                    log::info!("Remote shot source connected");
                }
                Some(bytemuck::pod_read_unaligned(&buf))
            }
            Ok(0) => None,
            Ok(n) => {
                log::debug!("Discarding partial shot command ({n} bytes)");
                None
            }
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => None,
            Err(e) => {
                log::warn!("Shot command read failed: {e}");
                None
            }
        }
    }
}

/// Rate-limited snapshot sender: at most one record per interval while
/// the observed ball is idle
#[derive(Debug)]
pub struct SnapshotWriter<W> {
    sink: W,
    last_sent_tick: Option<u64>,
}

impl<W: Write> SnapshotWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            last_sent_tick: None,
        }
    }

    /// Send `snapshot` if the cadence allows it. Returns whether a
    /// record went out.
    pub fn maybe_send(&mut self, tick: u64, snapshot: &StateSnapshot) -> io::Result<bool> {
        if let Some(last) = self.last_sent_tick {
            if tick.saturating_sub(last) < SNAPSHOT_INTERVAL_TICKS {
                return Ok(false);
            }
        }
        self.sink.write_all(bytemuck::bytes_of(snapshot))?;
        self.last_sent_tick = Some(tick);
        Ok(true)
    }
}
