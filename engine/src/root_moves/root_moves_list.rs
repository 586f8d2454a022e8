use corvid_core::board::movegen::generate_legal;
use corvid_core::core::score::NEG_INFINITE;
use corvid_core::{BitMove, Board, Value};

#[derive(Clone)]
pub struct RootMove {
    pub bit_move: BitMove,
    pub score: Value,
    pub previous_score: Value,
    pub pv: Vec<BitMove>,
    pub sel_depth: u16,
}

impl RootMove {
    fn new(bit_move: BitMove) -> RootMove {
        RootMove {
            bit_move,
            score: NEG_INFINITE,
            previous_score: NEG_INFINITE,
            pv: vec![bit_move],
            sel_depth: 0,
        }
    }
}

#[derive(Clone)]
pub struct RootMoveList {
    moves: Vec<RootMove>,
}

impl RootMoveList {
    /// All legal root moves, optionally filtered down to a UCI
    /// `searchmoves` subset or the tablebase-filtered set.
    pub fn generate(board: &Board, restrict_to: Option<&[BitMove]>) -> RootMoveList {
        let legal = generate_legal(board);
        let mut moves = Vec::with_capacity(legal.len());
        for &mv in legal.iter() {
            if restrict_to.map_or(true, |allowed| allowed.contains(&mv)) {
                moves.push(RootMove::new(mv));
            }
        }
        RootMoveList { moves }
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, RootMove> {
        self.moves.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, RootMove> {
        self.moves.iter_mut()
    }

    pub fn find_mut(&mut self, mv: BitMove) -> Option<&mut RootMove> {
        self.moves.iter_mut().find(|m| m.bit_move == mv)
    }

    pub fn best(&self) -> &RootMove {
        &self.moves[0]
    }

    /// Stockfish-style stable sort by current score, falling back to the
    /// previous iteration's score to break ties — keeps ordering sane
    /// across moves that haven't been re-searched yet this iteration.
    pub fn sort(&mut self) {
        self.moves
            .sort_by(|a, b| (b.score, b.previous_score).cmp(&(a.score, a.previous_score)));
    }

    pub fn rotate_first_to(&mut self, mv: BitMove) {
        if let Some(pos) = self.moves.iter().position(|m| m.bit_move == mv) {
            self.moves[0..=pos].rotate_right(1);
        }
    }
}

impl std::ops::Index<usize> for RootMoveList {
    type Output = RootMove;
    fn index(&self, i: usize) -> &RootMove {
        &self.moves[i]
    }
}

impl std::ops::IndexMut<usize> for RootMoveList {
    fn index_mut(&mut self, i: usize) -> &mut RootMove {
        &mut self.moves[i]
    }
}
