//! Flappy: bird, pipes, scrolling ground and parallax background
//!
//! Pure simulation in scaled pixels. Cosmetic reactions to the events
//! emitted here live in [`crate::juice`].

mod state;
mod tick;

pub use state::{
    Bird, GameEvent, GamePhase, Pipe, Scroller, TickInput, World, BIRD_H, BIRD_W, BIRD_X,
    GROUND_H, GROUND_REPEAT, PIPE_W,
};
pub use tick::tick;
