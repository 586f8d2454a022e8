//! Error types for the parts of the core crate that can fail on bad input:
//! FEN parsing and UCI-style move text. Move generation and search never
//! fail — a position is either well-formed or rejected at construction.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FenError {
    #[error("FEN must have 6 space-separated fields, found {0}")]
    WrongFieldCount(usize),

    #[error("piece placement field has {0} ranks, expected 8")]
    WrongRankCount(usize),

    #[error("rank {0} does not sum to 8 files: \"{1}\"")]
    RankFileCountMismatch(u8, String),

    #[error("unrecognised piece character '{0}'")]
    UnknownPieceChar(char),

    #[error("invalid side-to-move field \"{0}\", expected \"w\" or \"b\"")]
    BadSideToMove(String),

    #[error("invalid castling rights field \"{0}\"")]
    BadCastlingRights(String),

    #[error("invalid en-passant square \"{0}\"")]
    BadEnPassantSquare(String),

    #[error("invalid half-move clock \"{0}\"")]
    BadHalfMoveClock(String),

    #[error("invalid full-move number \"{0}\"")]
    BadFullMoveNumber(String),

    #[error("position has no king for {0}")]
    MissingKing(&'static str),

    #[error("position has more than one king for {0}")]
    MultipleKings(&'static str),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoveParseError {
    #[error("move text \"{0}\" is not in long algebraic form")]
    BadFormat(String),

    #[error("\"{0}\" is not a legal move in the current position")]
    Illegal(String),
}
