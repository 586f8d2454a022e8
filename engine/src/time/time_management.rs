//! Turns a [`UciGoLimits`] clock into a soft deadline (stop starting new
//! iterative-deepening iterations past this) and a hard deadline (abort
//! mid-search immediately), following the grounding repo's "hypothetical
//! moves-to-go" minimisation.

use std::time::Instant;

use corvid_core::Player;

use super::uci_timer::ClockState;

const MOVE_HORIZON: i64 = 50;
const MAX_RATIO: f64 = 6.32;
const STEAL_RATIO: f64 = 0.34;
const MIN_THINKING_MSEC: i64 = 20;
const SLOW_MOVER: i64 = 22;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Calc {
    Ideal,
    Max,
}

impl Calc {
    fn max_ratio(self) -> f64 {
        match self {
            Calc::Ideal => 1.0,
            Calc::Max => MAX_RATIO,
        }
    }

    fn steal_ratio(self) -> f64 {
        match self {
            Calc::Ideal => 0.0,
            Calc::Max => STEAL_RATIO,
        }
    }
}

pub struct TimeManager {
    start: Instant,
    ideal_msec: i64,
    maximum_msec: i64,
    move_overhead_msec: i64,
}

impl TimeManager {
    pub fn new(move_overhead_msec: i64) -> TimeManager {
        TimeManager {
            start: Instant::now(),
            ideal_msec: 0,
            maximum_msec: 0,
            move_overhead_msec,
        }
    }

    pub fn init(&mut self, start: Instant, clock: &ClockState, turn: Player, ply: u16) {
        let my_time = clock.time_msec[turn as usize].max(MIN_THINKING_MSEC);
        let my_inc = clock.inc_msec[turn as usize];
        let moves_to_go = clock.moves_to_go as i64;

        let mut ideal_time = my_time;
        let mut max_time = my_time;

        let max_mtg = if moves_to_go == 0 { MOVE_HORIZON } else { moves_to_go.min(MOVE_HORIZON) };

        for hyp_mtg in 1..=max_mtg {
            let overhead = self.move_overhead_msec * (2 + hyp_mtg.min(40));
            let hyp_my_time = (my_time + my_inc * (hyp_mtg - 1) - overhead).max(0);

            let t1 = MIN_THINKING_MSEC
                + Self::remaining(hyp_my_time, hyp_mtg, ply as i64, SLOW_MOVER, Calc::Ideal);
            let t2 = MIN_THINKING_MSEC
                + Self::remaining(hyp_my_time, hyp_mtg, ply as i64, SLOW_MOVER - 5, Calc::Max);

            ideal_time = ideal_time.min(t1);
            max_time = max_time.min(t2);
        }

        self.start = start;
        self.ideal_msec = ideal_time;
        self.maximum_msec = max_time;
    }

    fn move_importance(ply: i64) -> f64 {
        const X_SCALE: f64 = 6.85;
        const X_SHIFT: f64 = 64.5;
        const SKEW: f64 = 0.171;
        let exp = ((ply as f64 - X_SHIFT) / X_SCALE).exp();
        (1.0 + exp).powf(-SKEW) + f64::MIN_POSITIVE
    }

    fn remaining(my_time: i64, moves_to_go: i64, move_num: i64, slow_mover: i64, calc: Calc) -> i64 {
        let move_importance = Self::move_importance(move_num) * slow_mover as f64 / 100.0;
        let mut other_moves_importance = 0.0;
        for i in 1..moves_to_go {
            other_moves_importance += Self::move_importance(move_num + 2 * i);
        }

        let ratio1 = (calc.max_ratio() * move_importance) / (calc.max_ratio() * move_importance + other_moves_importance);
        let ratio2 = (move_importance + calc.steal_ratio() * other_moves_importance) / (move_importance + other_moves_importance);

        (my_time as f64 * ratio1.min(ratio2)) as i64
    }

    pub fn ideal_msec(&self) -> i64 {
        self.ideal_msec
    }

    pub fn maximum_msec(&self) -> i64 {
        self.maximum_msec
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensible_budget_for_blitz_clock() {
        let clock = ClockState {
            time_msec: [120_000, 120_000],
            inc_msec: [6_000, 6_000],
            moves_to_go: 0,
        };
        let mut tm = TimeManager::new(10);
        tm.init(Instant::now(), &clock, Player::White, 0);
        assert!(tm.ideal_msec() > 0);
        assert!(tm.maximum_msec() >= tm.ideal_msec());
    }

    #[test]
    fn low_time_still_gets_minimum_thinking_time() {
        let clock = ClockState {
            time_msec: [50, 50],
            inc_msec: [0, 0],
            moves_to_go: 1,
        };
        let mut tm = TimeManager::new(10);
        tm.init(Instant::now(), &clock, Player::White, 40);
        assert!(tm.ideal_msec() >= MIN_THINKING_MSEC);
    }
}
