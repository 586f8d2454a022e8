//! Tapered score primitives: a signed centipawn `Value`, and a packed
//! middlegame/endgame `Score` pair that add and subtract lane-wise.

use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

pub type Value = i32;

pub const ZERO: Value = 0;
pub const DRAW: Value = 0;
pub const MATE: Value = 31000;
pub const INFINITE: Value = 32001;
pub const NEG_INFINITE: Value = -32001;
pub const NONE: Value = 32002;
pub const MAX_PLY_I32: i32 = 246;
pub const MATE_IN_MAX_PLY: Value = MATE - MAX_PLY_I32;
pub const MATED_IN_MAX_PLY: Value = -MATE + MAX_PLY_I32;

pub const PAWN_MG: Value = 171;
pub const KNIGHT_MG: Value = 764;
pub const BISHOP_MG: Value = 826;
pub const ROOK_MG: Value = 1282;
pub const QUEEN_MG: Value = 2526;

pub const PAWN_EG: Value = 240;
pub const KNIGHT_EG: Value = 848;
pub const BISHOP_EG: Value = 891;
pub const ROOK_EG: Value = 1373;
pub const QUEEN_EG: Value = 2646;

/// Middlegame/endgame values for each `PieceType` (`None` and `All` unused).
pub const PIECE_VALS_MG: [Value; 8] = [0, PAWN_MG, KNIGHT_MG, BISHOP_MG, ROOK_MG, QUEEN_MG, 0, 0];
pub const PIECE_VALS_EG: [Value; 8] = [0, PAWN_EG, KNIGHT_EG, BISHOP_EG, ROOK_EG, QUEEN_EG, 0, 0];

#[inline]
pub fn piecetype_value(pt: super::PieceType, endgame: bool) -> Value {
    let vals = if endgame { &PIECE_VALS_EG } else { &PIECE_VALS_MG };
    vals[pt as usize]
}

/// Mid-game / end-game score pair, added and subtracted lane-wise.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Score(pub Value, pub Value);

impl Score {
    pub const ZERO: Score = Score(0, 0);

    #[inline]
    pub fn make(mg: Value, eg: Value) -> Self {
        Score(mg, eg)
    }

    #[inline]
    pub fn mg(self) -> Value {
        self.0
    }

    #[inline]
    pub fn eg(self) -> Value {
        self.1
    }
}

impl Add for Score {
    type Output = Score;
    fn add(self, rhs: Score) -> Score {
        Score(self.0 + rhs.0, self.1 + rhs.1)
    }
}

impl AddAssign for Score {
    fn add_assign(&mut self, rhs: Score) {
        self.0 += rhs.0;
        self.1 += rhs.1;
    }
}

impl Sub for Score {
    type Output = Score;
    fn sub(self, rhs: Score) -> Score {
        Score(self.0 - rhs.0, self.1 - rhs.1)
    }
}

impl SubAssign for Score {
    fn sub_assign(&mut self, rhs: Score) {
        self.0 -= rhs.0;
        self.1 -= rhs.1;
    }
}

impl Neg for Score {
    type Output = Score;
    fn neg(self) -> Score {
        Score(-self.0, -self.1)
    }
}

impl std::ops::Mul<i32> for Score {
    type Output = Score;
    fn mul(self, rhs: i32) -> Score {
        Score(self.0 * rhs, self.1 * rhs)
    }
}

/// `MATE - ply`: the score of giving mate at `ply` plies from the root.
#[inline]
pub fn mate_in(ply: u16) -> Value {
    MATE - ply as Value
}

/// `-MATE + ply`: the score of being mated at `ply` plies from the root.
#[inline]
pub fn mated_in(ply: u16) -> Value {
    -MATE + ply as Value
}
