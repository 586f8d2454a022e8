//! The endgame tablebase collaborator seam. Real Syzygy file parsing is
//! out of scope; what lives here is the interface the search calls and a
//! no-op implementation of it.

pub mod tablebase;

pub use self::tablebase::{NullProber, TablebaseProber, WdlResult};
