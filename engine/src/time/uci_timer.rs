//! Parsed form of a UCI `go` command: the raw clock/limit parameters
//! before the time manager turns them into soft/hard deadlines.

use corvid_core::BitMove;

/// Per-side clock state as reported by `go wtime/btime/winc/binc/movestogo`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ClockState {
    pub time_msec: [i64; 2],
    pub inc_msec: [i64; 2],
    pub moves_to_go: u32,
}

impl ClockState {
    pub fn is_blank(&self) -> bool {
        self.time_msec == [0, 0] && self.inc_msec == [0, 0]
    }
}

/// Everything `go` can carry, as parsed from the command line and not yet
/// turned into deadlines — that's [`super::TimeManager::init`]'s job.
#[derive(Clone, Debug, Default)]
pub struct UciGoLimits {
    pub clock: Option<ClockState>,
    pub move_time_msec: Option<u64>,
    pub depth: Option<u16>,
    pub nodes: Option<u64>,
    pub mate: Option<u16>,
    pub infinite: bool,
    pub ponder: bool,
    pub search_moves: Vec<BitMove>,
}

impl UciGoLimits {
    pub fn blank() -> UciGoLimits {
        UciGoLimits::default()
    }

    /// `true` when the clock-driven time manager should be consulted at
    /// all; depth/nodes/movetime/infinite/mate searches never soft-stop.
    pub fn use_time_management(&self) -> Option<ClockState> {
        if self.move_time_msec.is_some() || self.depth.is_some() || self.nodes.is_some() || self.infinite {
            None
        } else {
            self.clock.filter(|c| !c.is_blank())
        }
    }
}
