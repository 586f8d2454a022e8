//! Staged move ordering: a state machine that hands the search loop one
//! move at a time, cheapest-to-generate stage first, so alpha-beta cutoffs
//! happen before expensive stages are even generated.

pub mod pick;

pub use self::pick::{MovePicker, PickStage};
