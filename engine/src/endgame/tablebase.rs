//! Tablebase collaborator interface. The search probes at the root (to
//! filter/replace root move scores) and at leaves once the piece count
//! drops to the configured probe limit and the halfmove clock is zero;
//! both call sites go through this trait so a real Syzygy prober can be
//! dropped in later without touching `search`.

use corvid_core::Board;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum WdlResult {
    Loss,
    BlessedLoss,
    Draw,
    CursedWin,
    Win,
}

pub trait TablebaseProber: Send + Sync {
    /// Largest piece count this prober can answer for. `0` means "never
    /// probe" and lets the search skip the call entirely.
    fn max_pieces(&self) -> u32;

    fn probe_wdl(&self, board: &Board) -> Option<WdlResult>;

    /// Distance to zeroing (capture or pawn move), in plies, or `None` if
    /// unavailable.
    fn probe_dtz(&self, board: &Board) -> Option<i32>;
}

/// Default collaborator: always unavailable, so `max_pieces() == 0` lets
/// every call site skip probing without a single conditional at the
/// probe's actual call site.
pub struct NullProber;

impl TablebaseProber for NullProber {
    fn max_pieces(&self) -> u32 {
        0
    }

    fn probe_wdl(&self, _board: &Board) -> Option<WdlResult> {
        None
    }

    fn probe_dtz(&self, _board: &Board) -> Option<i32> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use corvid_core::Board;

    #[test]
    fn null_prober_never_answers() {
        let prober = NullProber;
        let board = Board::start_pos();
        assert_eq!(prober.max_pieces(), 0);
        assert_eq!(prober.probe_wdl(&board), None);
        assert_eq!(prober.probe_dtz(&board), None);
    }
}
