//! Bit masks and small constants shared across the core crate.

pub const PLAYER_CNT: usize = 2;
pub const PIECE_TYPE_CNT: usize = 8;
pub const PIECE_CNT: usize = 16;
pub const SQ_CNT: usize = 64;
pub const FILE_CNT: usize = 8;
pub const RANK_CNT: usize = 8;
pub const TOTAL_CASTLING_CNT: usize = 4;
pub const ALL_CASTLING_RIGHTS: usize = 16;

pub const NORTH: i8 = 8;
pub const SOUTH: i8 = -8;
pub const EAST: i8 = 1;
pub const WEST: i8 = -1;
pub const NORTH_EAST: i8 = 9;
pub const NORTH_WEST: i8 = 7;
pub const SOUTH_EAST: i8 = -7;
pub const SOUTH_WEST: i8 = -9;

pub const FILE_A: u64 = 0x0101_0101_0101_0101;
pub const FILE_B: u64 = FILE_A << 1;
pub const FILE_C: u64 = FILE_A << 2;
pub const FILE_D: u64 = FILE_A << 3;
pub const FILE_E: u64 = FILE_A << 4;
pub const FILE_F: u64 = FILE_A << 5;
pub const FILE_G: u64 = FILE_A << 6;
pub const FILE_H: u64 = FILE_A << 7;

pub const FILE_BB: [u64; FILE_CNT] = [
    FILE_A, FILE_B, FILE_C, FILE_D, FILE_E, FILE_F, FILE_G, FILE_H,
];

pub const RANK_1: u64 = 0x0000_0000_0000_00FF;
pub const RANK_2: u64 = RANK_1 << 8;
pub const RANK_3: u64 = RANK_1 << 16;
pub const RANK_4: u64 = RANK_1 << 24;
pub const RANK_5: u64 = RANK_1 << 32;
pub const RANK_6: u64 = RANK_1 << 40;
pub const RANK_7: u64 = RANK_1 << 48;
pub const RANK_8: u64 = RANK_1 << 56;

pub const RANK_BB: [u64; RANK_CNT] = [
    RANK_1, RANK_2, RANK_3, RANK_4, RANK_5, RANK_6, RANK_7, RANK_8,
];

pub const FILE_DISPLAYS: [char; FILE_CNT] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];
pub const RANK_DISPLAYS: [char; RANK_CNT] = ['1', '2', '3', '4', '5', '6', '7', '8'];

/// Squares not on the A or H file — used to mask off wraparound in pawn/knight/king attacks.
pub const NOT_FILE_A: u64 = !FILE_A;
pub const NOT_FILE_H: u64 = !FILE_H;

pub const CASTLE_RIGHTS_WHITE_K: u8 = 0b0001;
pub const CASTLE_RIGHTS_WHITE_Q: u8 = 0b0010;
pub const CASTLE_RIGHTS_BLACK_K: u8 = 0b0100;
pub const CASTLE_RIGHTS_BLACK_Q: u8 = 0b1000;
pub const ALL_CASTLE_RIGHTS: u8 = 0b1111;
