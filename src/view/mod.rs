//! View model module
//!
//! Pure projections of the session state that clients render.

pub mod board;
pub mod ring;

// Re-export main types
pub use board::{BoardView, CountdownView, HeaderView, IndicatorView, SectionView, TileState, TileView};
pub use ring::RingView;
