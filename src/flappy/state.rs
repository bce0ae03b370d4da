//! Flappy game state
//!
//! Coordinates are pixels with y growing upward. Every distance is
//! pre-multiplied by the screen scale when the world is built, so the tick
//! code never touches the scale again.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::config::{FlappyTuning, ScreenConfig};
use crate::geom::Rect;

/// Sprite dimensions at scale 1 (reference pixels)
pub const BIRD_W: f32 = 17.0;
pub const BIRD_H: f32 = 12.0;
/// Bird's fixed horizontal position
pub const BIRD_X: f32 = 20.0;
pub const PIPE_W: f32 = 24.0;
pub const GROUND_H: f32 = 24.0;
/// Ground tile repeat length at scale 1
pub const GROUND_REPEAT: f32 = 24.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menu; the first flap starts the run
    NotStarted,
    Running,
    /// Terminal: one more tap returns to the menu
    GameOver,
}

/// Gameplay events for the cosmetic layer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    Flapped,
    Scored { pipe_id: u32, total: u32 },
    PipeSpawned { id: u32 },
    GameOver,
}

/// Per-tick input commands
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// The tap: starts a run, flaps mid-run, leaves the game-over screen
    pub flap: bool,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Bird {
    pub rect: Rect,
    /// Vertical speed (px/s); gravity integrates it, a flap overwrites it
    pub vel_y: f32,
}

impl Bird {
    fn at_start(config: &ScreenConfig) -> Self {
        let s = config.scale;
        Self {
            rect: Rect::new(
                BIRD_X * s,
                config.field_height() / 2.0,
                BIRD_W * s,
                BIRD_H * s,
            ),
            vel_y: 0.0,
        }
    }
}

/// A pipe pair. The gap between the halves is where the bird fits through.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pipe {
    pub id: u32,
    pub top: Rect,
    pub bottom: Rect,
    /// Set exactly once, when the pipe passes the bird
    pub scored: bool,
}

impl Pipe {
    pub fn new(id: u32, x: f32, gap_bottom: f32, gap_extent: f32, width: f32, field_height: f32) -> Self {
        let gap_top = gap_bottom + gap_extent;
        Self {
            id,
            top: Rect::new(x, gap_top, width, (field_height - gap_top).max(0.0)),
            bottom: Rect::new(x, 0.0, width, gap_bottom),
            scored: false,
        }
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.top.left()
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.top.right()
    }

    /// The open interval the bird can pass through (bottom, top)
    pub fn gap(&self) -> (f32, f32) {
        (self.bottom.top(), self.top.bottom())
    }

    /// Move both halves left or right by the same amount
    pub fn shift(&mut self, dx: f32) {
        self.top.pos.x += dx;
        self.bottom.pos.x += dx;
    }
}

/// A two-image scroller for the ground strip and the parallax background.
/// The pair is never destroyed or respawned; when the lead image scrolls
/// out it is teleported back by one repeat length.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scroller {
    /// X of the lead image, in (-repeat, 0] once scrolling
    pub x: f32,
    /// One image width
    pub width: f32,
    /// Teleport distance
    pub repeat: f32,
    /// Leftward speed (px/s)
    pub speed: f32,
}

impl Scroller {
    pub fn new(width: f32, repeat: f32, speed: f32) -> Self {
        Self {
            x: 0.0,
            width,
            repeat,
            speed,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.x -= self.speed * dt;
        while self.x <= -self.repeat {
            self.x += self.repeat;
        }
    }

    /// X of the trailing image of the pair
    pub fn second_x(&self) -> f32 {
        self.x + self.width
    }
}

/// The whole flappy world, advanced by [`super::tick`]
#[derive(Debug, Clone)]
pub struct World {
    pub config: ScreenConfig,
    /// Tuning with the screen scale already baked in
    pub tuning: FlappyTuning,
    pub phase: GamePhase,
    pub score: u32,
    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub ground: Scroller,
    pub background: Scroller,
    /// Seconds until the next pipe spawn
    pub spawn_timer: f32,
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(config: &ScreenConfig, tuning: FlappyTuning, seed: u64) -> Self {
        let scaled = tuning.scaled(config.scale);
        let s = config.scale;
        Self {
            config: *config,
            tuning: scaled,
            phase: GamePhase::NotStarted,
            score: 0,
            bird: Bird::at_start(config),
            pipes: Vec::new(),
            ground: Scroller::new(config.field_width(), GROUND_REPEAT * s, scaled.scroll_speed),
            // The background parallaxes at half the foreground speed and
            // recycles on its own width
            background: Scroller::new(
                config.field_width(),
                config.field_width(),
                scaled.scroll_speed * 0.5,
            ),
            spawn_timer: 0.0,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Back to the menu with a fresh field. Config and tuning are kept.
    pub fn reset(&mut self, seed: u64) {
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.bird = Bird::at_start(&self.config);
        self.pipes.clear();
        self.ground.x = 0.0;
        self.background.x = 0.0;
        self.spawn_timer = 0.0;
        self.seed = seed;
        self.rng = Pcg32::seed_from_u64(seed);
        self.events.clear();
        self.next_id = 1;
        log::info!("flappy: back to menu (seed {seed})");
    }

    pub(crate) fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Spawn a pipe at the right edge with a random gap placement, clamped
    /// away from the ground and the ceiling
    pub(crate) fn spawn_pipe(&mut self) {
        let s = self.config.scale;
        let lo = GROUND_H * s + self.tuning.gap_margin;
        let hi = self.config.field_height() - self.tuning.gap_margin - self.tuning.gap_extent;
        let gap_bottom = if hi > lo {
            self.rng.random_range(lo..hi)
        } else {
            lo
        };
        let id = self.next_entity_id();
        self.pipes.push(Pipe::new(
            id,
            self.config.field_width(),
            gap_bottom,
            self.tuning.gap_extent,
            PIPE_W * s,
            self.config.field_height(),
        ));
        self.events.push(GameEvent::PipeSpawned { id });
        log::debug!("flappy: pipe {id} spawned, gap bottom {gap_bottom:.1}");
    }

    /// Collision strip for the ground. The scroller's x offset is tile
    /// alignment only; the strip always spans the field.
    pub fn ground_rect(&self) -> Rect {
        Rect::new(
            0.0,
            0.0,
            self.config.field_width(),
            GROUND_H * self.config.scale,
        )
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
