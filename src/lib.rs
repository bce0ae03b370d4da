//! Tiny Arcade - a breakout clone and a flappy clone as a pure simulation core
//!
//! Core modules:
//! - `geom`: axis-aligned rectangles and the overlap test everything collides through
//! - `config`: screen scaling and data-driven tuning
//! - `breakout`: ball/paddle/block world and its per-frame update
//! - `flappy`: bird/pipe/ground world and its per-frame update
//! - `tween`: scalar easing primitive for the cosmetic layer
//! - `juice`: event-driven cosmetic reactions (never gameplay-affecting)
//!
//! The simulation is deterministic: seeded RNG only, no wall-clock reads, and
//! a host-supplied `dt` scales all motion. A rendering host drives
//! `tick(world, input, dt)` at its own frame rate and reads state afterwards.

pub mod breakout;
pub mod config;
pub mod flappy;
pub mod geom;
pub mod juice;
pub mod tween;

pub use config::{FlappyTuning, ScreenConfig};
pub use geom::Rect;

/// Game configuration constants
pub mod consts {
    /// Breakout block grid (normalized field coordinates, y up)
    pub const BLOCK_COLS: usize = 10;
    pub const BLOCK_ROWS: usize = 5;
    pub const BLOCK_W: f32 = 0.09;
    pub const BLOCK_H: f32 = 0.05;
    pub const BLOCK_X0: f32 = 0.05;
    pub const BLOCK_Y0: f32 = 0.65;

    /// Ball spawn point and serve speed (field units per second)
    pub const BALL_SIZE: f32 = 0.03;
    pub const BALL_SERVE_X: f32 = 0.5;
    pub const BALL_SERVE_Y: f32 = 0.3;
    pub const BALL_SERVE_VY: f32 = 0.4;

    /// Paddle geometry (center anchored near the floor)
    pub const PADDLE_W: f32 = 0.15;
    pub const PADDLE_H: f32 = 0.03;
    pub const PADDLE_Y: f32 = 0.05;
    /// Horizontal deflection added per unit of off-center paddle contact
    pub const PADDLE_SPIN: f32 = 0.1;

    /// Wall thickness for the left/right/top borders
    pub const BORDER_THICKNESS: f32 = 0.02;

    /// Countdown between a breakout reset and the serve (seconds)
    pub const SERVE_DELAY: f32 = 2.0;
}
