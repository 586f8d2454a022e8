//! The root move list: the set of moves searched at the root, each
//! carrying its own score and PV, sorted after every iteration so the
//! move ordering the UCI front end sees is always the search's current
//! best guess.

pub mod root_moves_list;

pub use self::root_moves_list::{RootMove, RootMoveList};
