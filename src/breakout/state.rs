//! Breakout game state
//!
//! All coordinates are normalized field units: x and y in [0,1], y growing
//! upward. A presentation layer maps field units to pixels; nothing here
//! knows about screens.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::geom::Rect;

/// Where the game is in its serve cycle. There is no lose condition: the
/// ball bounces off the floor too, so the only phases are the post-reset
/// countdown and play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Frozen during the countdown after a reset
    NotStarted,
    /// Ball in motion
    Running,
}

/// Surfaces the ball can bounce off
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    LeftBorder,
    RightBorder,
    TopBorder,
    Floor,
    Paddle,
    Block,
}

/// Gameplay events for the cosmetic layer. Physics never reads these; the
/// host drains them after each tick and feeds them to the juice consumer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Bounced(Surface),
    BlockDestroyed { id: u32, at: Vec2 },
    /// Emitted on reset so drop-in animations can start
    BlocksSpawned,
}

/// Per-tick input commands
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Pointer x in field units; recenters the paddle
    pub paddle_x: Option<f32>,
    /// Rebuild the level
    pub reset: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Ball {
    pub rect: Rect,
    /// Field units per second, mutated only by collision response
    pub vel: Vec2,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    fn new() -> Self {
        Self {
            rect: Rect::from_center(
                Vec2::new(0.5, PADDLE_Y),
                Vec2::new(PADDLE_W, PADDLE_H),
            ),
        }
    }

    /// Recenter on a pointer position, kept inside the field
    pub fn set_center_x(&mut self, x: f32) {
        self.rect.pos.x = (x - self.rect.size.x / 2.0).clamp(0.0, 1.0 - self.rect.size.x);
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Block {
    pub id: u32,
    pub rect: Rect,
}

/// The three walls. The floor is open; the ball reflects at y = 0 instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Borders {
    pub left: Rect,
    pub right: Rect,
    pub top: Rect,
}

impl Borders {
    fn standard() -> Self {
        Self {
            left: Rect::new(0.0, 0.0, BORDER_THICKNESS, 1.0),
            right: Rect::new(1.0 - BORDER_THICKNESS, 0.0, BORDER_THICKNESS, 1.0),
            top: Rect::new(0.0, 1.0 - BORDER_THICKNESS, 1.0, BORDER_THICKNESS),
        }
    }
}

/// The whole breakout world, advanced by [`super::tick`]
#[derive(Debug, Clone)]
pub struct World {
    pub phase: GamePhase,
    /// Seconds left before `NotStarted` flips to `Running`
    pub countdown: f32,
    pub ball: Ball,
    pub paddle: Paddle,
    pub blocks: Vec<Block>,
    pub borders: Borders,
    /// Blocks destroyed this run
    pub score: u32,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(seed: u64) -> Self {
        let mut world = Self {
            phase: GamePhase::NotStarted,
            countdown: SERVE_DELAY,
            ball: Ball {
                rect: Rect::from_center(
                    Vec2::new(BALL_SERVE_X, BALL_SERVE_Y),
                    Vec2::splat(BALL_SIZE),
                ),
                vel: Vec2::ZERO,
            },
            paddle: Paddle::new(),
            blocks: Vec::new(),
            borders: Borders::standard(),
            score: 0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        world.reset();
        world
    }

    /// Allocate a stable entity id
    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Rebuild the level: full block grid, ball back at the serve point with
    /// a fresh serve velocity, countdown restarted.
    pub fn reset(&mut self) {
        self.phase = GamePhase::NotStarted;
        self.countdown = SERVE_DELAY;
        self.score = 0;
        self.next_id = 1;

        self.blocks.clear();
        for row in 0..BLOCK_ROWS {
            for col in 0..BLOCK_COLS {
                let id = self.next_entity_id();
                self.blocks.push(Block {
                    id,
                    rect: Rect::new(
                        BLOCK_X0 + BLOCK_W * col as f32,
                        BLOCK_Y0 + BLOCK_H * row as f32,
                        BLOCK_W,
                        BLOCK_H,
                    ),
                });
            }
        }

        let serve_vx = self.rng.random::<f32>() - 0.4;
        self.ball = Ball {
            rect: Rect::from_center(
                Vec2::new(BALL_SERVE_X, BALL_SERVE_Y),
                Vec2::splat(BALL_SIZE),
            ),
            vel: Vec2::new(serve_vx, BALL_SERVE_VY),
        };
        self.paddle.set_center_x(0.5);

        self.events.clear();
        self.events.push(GameEvent::BlocksSpawned);
        log::info!(
            "breakout: reset with {} blocks, serving in {SERVE_DELAY}s",
            self.blocks.len()
        );
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
