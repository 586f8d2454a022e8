//! Zero-cost, compile-time dispatch tags. Move generation is written once,
//! generically, and monomorphised per (player, phase) call site instead of
//! branching on an enum inside the hot loop.

use super::{GenTypes, Player};

pub trait PlayerTrait {
    fn player() -> Player;
    fn opp() -> Player;
}

pub struct WhiteType;
pub struct BlackType;

impl PlayerTrait for WhiteType {
    #[inline(always)]
    fn player() -> Player {
        Player::White
    }
    #[inline(always)]
    fn opp() -> Player {
        Player::Black
    }
}

impl PlayerTrait for BlackType {
    #[inline(always)]
    fn player() -> Player {
        Player::Black
    }
    #[inline(always)]
    fn opp() -> Player {
        Player::White
    }
}

pub trait GenTypeTrait {
    fn gen_type() -> GenTypes;
}

pub struct AllGenType;
pub struct CapturesGenType;
pub struct QuietsGenType;
pub struct QuietChecksGenType;
pub struct EvasionsGenType;
pub struct NonEvasionsGenType;

impl GenTypeTrait for AllGenType {
    fn gen_type() -> GenTypes {
        GenTypes::All
    }
}
impl GenTypeTrait for CapturesGenType {
    fn gen_type() -> GenTypes {
        GenTypes::Captures
    }
}
impl GenTypeTrait for QuietsGenType {
    fn gen_type() -> GenTypes {
        GenTypes::Quiets
    }
}
impl GenTypeTrait for QuietChecksGenType {
    fn gen_type() -> GenTypes {
        GenTypes::QuietChecks
    }
}
impl GenTypeTrait for EvasionsGenType {
    fn gen_type() -> GenTypes {
        GenTypes::Evasions
    }
}
impl GenTypeTrait for NonEvasionsGenType {
    fn gen_type() -> GenTypes {
        GenTypes::NonEvasions
    }
}
