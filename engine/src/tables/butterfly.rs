//! "Butterfly" history: how often has (side to move, from, to) been the
//! best quiet move, regardless of position? The oldest and cheapest move-
//! ordering signal, indexed purely by move rather than by board context.

use corvid_core::{BitMove, Player};

use super::{stat_bonus, update_stat};

const MAX_HISTORY: i32 = 16_384;

pub struct ButterflyHistory {
    table: Box<[[i16; 64]; 64 * 2]>,
}

impl ButterflyHistory {
    pub fn new() -> ButterflyHistory {
        ButterflyHistory {
            table: Box::new([[0i16; 64]; 64 * 2]),
        }
    }

    #[inline]
    fn slot(&mut self, player: Player, mv: BitMove) -> &mut i16 {
        let row = mv.get_src().0 as usize + (player as usize) * 64;
        &mut self.table[row][mv.get_dest().0 as usize]
    }

    pub fn get(&self, player: Player, mv: BitMove) -> i16 {
        let row = mv.get_src().0 as usize + (player as usize) * 64;
        self.table[row][mv.get_dest().0 as usize]
    }

    pub fn update(&mut self, player: Player, mv: BitMove, depth: u8, good: bool) {
        let bonus = if good { stat_bonus(depth) } else { -stat_bonus(depth) };
        update_stat(self.slot(player, mv), bonus, MAX_HISTORY);
    }
}

impl Default for ButterflyHistory {
    fn default() -> Self {
        ButterflyHistory::new()
    }
}
