//! Breakout: ball, paddle, five rows of blocks
//!
//! Pure simulation in normalized field coordinates. Cosmetic reactions to
//! the events emitted here live in [`crate::juice`].

mod state;
mod tick;

pub use state::{
    Ball, Block, Borders, GameEvent, GamePhase, Paddle, Surface, TickInput, World,
};
pub use tick::tick;
