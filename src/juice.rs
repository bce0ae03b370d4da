//! Cosmetic reactions ("juice")
//!
//! Consumes gameplay events after the physics step and animates purely
//! visual state: block jiggles and drop-ins, ball squash/flash/trail,
//! particle bursts, paddle eyes, wing frames. Nothing here feeds back into
//! the simulation; deleting this module would leave scoring and game-over
//! behavior untouched.
//!
//! The host loop is expected to run, per frame:
//! 1. `tick(world, input, dt)`
//! 2. `juice.process_events(&world.drain_events(), &world)`
//! 3. `juice.advance(dt, &world)`
//! and then read the `*Fx` state alongside the sim state when drawing.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::breakout;
use crate::flappy;
use crate::tween::{Easing, Tween};

/// Maximum number of trail points to keep (newest first)
pub const TRAIL_LENGTH: usize = 20;
/// Seconds between trail samples
const TRAIL_INTERVAL: f32 = 0.01;
/// Hard cap on live particles; the oldest make room
pub const MAX_PARTICLES: usize = 256;
/// Particles per destruction burst
const BURST_COUNT: usize = 24;
/// How far above its slot a block starts its drop-in (field units)
const DROP_START_OFFSET: f32 = 0.35;
/// Eye anchor distance from the paddle ends (field units)
const EYE_INSET: f32 = 0.01;

/// The proper entity colors, and white for the untinted look
pub mod palette {
    pub type Color = [f32; 4];
    pub const WHITE: Color = [1.0, 1.0, 1.0, 1.0];
    pub const BALL: Color = [0.8, 0.8, 0.3, 1.0];
    pub const PADDLE: Color = [0.3, 0.8, 0.3, 1.0];
    pub const BLOCK: Color = [0.6, 0.3, 0.1, 1.0];
    pub const BORDER: Color = [0.5, 0.1, 0.1, 1.0];
}

fn lerp_color(from: palette::Color, to: palette::Color, t: f32) -> palette::Color {
    let t = t.clamp(0.0, 1.0);
    [
        from[0] + (to[0] - from[0]) * t,
        from[1] + (to[1] - from[1]) * t,
        from[2] + (to[2] - from[2]) * t,
        from[3] + (to[3] - from[3]) * t,
    ]
}

/// Independent experiment switches, one per key of the debug keyboard row.
/// Physics never reads any of these.
#[derive(Debug, Clone, Copy, Default)]
pub struct Toggles {
    /// Easing for the staggered block drop-in; `None` places blocks instantly
    pub drop: Option<Easing>,
    /// Randomize each block's drop duration
    pub random_stagger: bool,
    /// Ball squash and white flash on bounce
    pub ball_react: bool,
    /// Rotate the ball sprite to its heading
    pub ball_turn: bool,
    /// Ball trail ribbon
    pub trail: bool,
    /// Blocks jiggle on any bounce
    pub block_react: bool,
    /// Per-entity palette instead of plain white
    pub proper_colors: bool,
    /// Shrink-and-fade removal instead of popping out
    pub anim_block_remove: bool,
    /// Googly eyes on the paddle
    pub eyes: bool,
    /// Eyes track the ball
    pub eyes_follow: bool,
    /// Particle burst on block destruction
    pub particles: bool,
}

/// One sample of the ball trail (newest first)
#[derive(Debug, Clone, Copy)]
pub struct TrailPoint {
    pub pos: Vec2,
    /// Travel direction in degrees at sample time
    pub heading: f32,
}

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
}

/// Pupil rotations for the paddle eyes, 0 = looking straight up
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Eyes {
    pub left_rotate: f32,
    pub right_rotate: f32,
}

/// Cosmetic ball attributes layered over the sim ball
#[derive(Debug, Clone)]
pub struct BallFx {
    pub scale: f32,
    pub rotate: f32,
    /// White flash intensity, 1 right after a bounce
    pub flash: f32,
    scale_tween: Option<Tween>,
    flash_tween: Option<Tween>,
}

impl Default for BallFx {
    fn default() -> Self {
        Self {
            scale: 1.0,
            rotate: 0.0,
            flash: 0.0,
            scale_tween: None,
            flash_tween: None,
        }
    }
}

/// Cosmetic state tracked per live block
#[derive(Debug, Clone)]
pub struct BlockFx {
    pub id: u32,
    pub scale: f32,
    pub rotate: f32,
    /// Drop-in offset above the resting position. The sim hitbox sits at the
    /// final position from the first tick, so a dropping block is already
    /// collidable.
    pub drop_offset: f32,
    scale_tween: Option<Tween>,
    rotate_tween: Option<Tween>,
    drop_tween: Option<Tween>,
}

impl BlockFx {
    fn new(id: u32) -> Self {
        Self {
            id,
            scale: 1.0,
            rotate: 0.0,
            drop_offset: 0.0,
            scale_tween: None,
            rotate_tween: None,
            drop_tween: None,
        }
    }

    fn cancel(&mut self) {
        self.scale = 1.0;
        self.rotate = 0.0;
        self.drop_offset = 0.0;
        self.scale_tween = None;
        self.rotate_tween = None;
        self.drop_tween = None;
    }
}

/// A destroyed block shrinking and fading out; it has no hitbox any more
#[derive(Debug, Clone)]
pub struct BlockRemoval {
    pub at: Vec2,
    pub scale: f32,
    pub alpha: f32,
    progress: Tween,
}

impl BlockRemoval {
    fn new(at: Vec2) -> Self {
        Self {
            at,
            scale: 1.0,
            alpha: 1.0,
            progress: Tween::new(1.0, 0.0, 0.5, Easing::OutQuad),
        }
    }

    fn advance(&mut self, dt: f32) {
        self.progress.advance(dt);
        let p = self.progress.value();
        self.scale = 0.1 + 0.9 * p;
        self.alpha = p;
    }

    fn finished(&self) -> bool {
        self.progress.finished()
    }
}

/// Advance an optional tween into its target slot, dropping it when done
fn step(tween: &mut Option<Tween>, dt: f32, target: &mut f32) {
    if let Some(t) = tween {
        t.advance(dt);
        *target = t.value();
        if t.finished() {
            *tween = None;
        }
    }
}

/// Pupil rotation so the eye looks at the target
fn look_angle(eye: Vec2, target: Vec2) -> f32 {
    let d = target - eye;
    d.y.atan2(d.x).to_degrees() - 90.0
}

/// Event consumer and animation driver for breakout
#[derive(Debug)]
pub struct BreakoutJuice {
    pub toggles: Toggles,
    pub ball: BallFx,
    pub blocks: Vec<BlockFx>,
    pub removals: Vec<BlockRemoval>,
    pub trail: Vec<TrailPoint>,
    pub particles: Vec<Particle>,
    pub eyes: Option<Eyes>,
    rng: Pcg32,
    trail_timer: f32,
}

impl BreakoutJuice {
    pub fn new(seed: u64) -> Self {
        Self {
            toggles: Toggles::default(),
            ball: BallFx::default(),
            blocks: Vec::new(),
            removals: Vec::new(),
            trail: Vec::new(),
            particles: Vec::new(),
            eyes: None,
            rng: Pcg32::seed_from_u64(seed),
            trail_timer: 0.0,
        }
    }

    /// React to this tick's events. Call after the physics step.
    pub fn process_events(&mut self, events: &[breakout::GameEvent], world: &breakout::World) {
        for event in events {
            match *event {
                breakout::GameEvent::BlocksSpawned => self.on_blocks_spawned(world),
                breakout::GameEvent::BlockDestroyed { id, at } => self.on_block_destroyed(id, at),
                breakout::GameEvent::Bounced(_) => self.on_bounce(),
            }
        }
    }

    fn on_bounce(&mut self) {
        if self.toggles.ball_react {
            self.ball.scale = 1.5;
            self.ball.scale_tween = Some(Tween::new(1.5, 1.0, 0.1, Easing::OutBounce));
            self.ball.flash = 1.0;
            self.ball.flash_tween = Some(Tween::new(1.0, 0.0, 0.05, Easing::Linear));
        }
        if self.toggles.block_react {
            for fx in &mut self.blocks {
                let spin = 10.0 * (self.rng.random::<f32>() - 0.5);
                fx.rotate = spin;
                fx.rotate_tween = Some(Tween::new(spin, 0.0, 0.05, Easing::OutBounce));
                let squash = 1.0 + (self.rng.random::<f32>() - 0.5) / 8.0;
                fx.scale = squash;
                fx.scale_tween = Some(Tween::new(squash, 1.0, 0.05, Easing::OutBounce));
            }
        }
    }

    fn on_block_destroyed(&mut self, id: u32, at: Vec2) {
        self.blocks.retain(|fx| fx.id != id);
        if self.toggles.anim_block_remove {
            self.removals.push(BlockRemoval::new(at));
        }
        if self.toggles.particles {
            self.spawn_burst(at);
        }
    }

    /// A reset tore the level down: cancel everything in flight, then build
    /// fresh per-block state, with drop-in tweens if enabled
    fn on_blocks_spawned(&mut self, world: &breakout::World) {
        self.cancel_all();
        let mut blocks = Vec::with_capacity(world.blocks.len());
        for block in &world.blocks {
            let mut fx = BlockFx::new(block.id);
            if let Some(easing) = self.toggles.drop {
                let duration = if self.toggles.random_stagger {
                    self.rng.random::<f32>() / 2.0
                } else {
                    0.5
                };
                fx.drop_offset = DROP_START_OFFSET;
                fx.drop_tween = Some(Tween::new(DROP_START_OFFSET, 0.0, duration, easing));
            }
            blocks.push(fx);
        }
        self.blocks = blocks;
    }

    fn spawn_burst(&mut self, at: Vec2) {
        for _ in 0..BURST_COUNT {
            if self.particles.len() >= MAX_PARTICLES {
                self.particles.remove(0);
            }
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self.rng.random_range(0.1..0.5);
            self.particles.push(Particle {
                pos: at,
                vel: Vec2::new(angle.cos(), angle.sin()) * speed,
                life: self.rng.random_range(0.5..1.0),
                size: self.rng.random_range(0.005..0.015),
            });
        }
    }

    /// Advance every animation by dt. Call once per tick, after
    /// `process_events`.
    pub fn advance(&mut self, dt: f32, world: &breakout::World) {
        step(&mut self.ball.scale_tween, dt, &mut self.ball.scale);
        step(&mut self.ball.flash_tween, dt, &mut self.ball.flash);
        self.ball.rotate = if self.toggles.ball_turn {
            world.ball.vel.y.atan2(world.ball.vel.x).to_degrees()
        } else {
            0.0
        };

        for fx in &mut self.blocks {
            step(&mut fx.rotate_tween, dt, &mut fx.rotate);
            step(&mut fx.scale_tween, dt, &mut fx.scale);
            step(&mut fx.drop_tween, dt, &mut fx.drop_offset);
        }

        for removal in &mut self.removals {
            removal.advance(dt);
        }
        self.removals.retain(|r| !r.finished());

        if self.toggles.trail {
            self.trail_timer -= dt;
            if self.trail_timer < 0.0 {
                let heading = world.ball.vel.y.atan2(world.ball.vel.x).to_degrees();
                self.trail.insert(
                    0,
                    TrailPoint {
                        pos: world.ball.rect.center(),
                        heading,
                    },
                );
                self.trail.truncate(TRAIL_LENGTH);
                self.trail_timer = TRAIL_INTERVAL;
            }
        } else if !self.trail.is_empty() {
            self.trail.clear();
        }

        for particle in &mut self.particles {
            particle.pos += particle.vel * dt;
            particle.vel *= 0.98;
            particle.life -= dt * 1.5;
            particle.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);

        self.eyes = if self.toggles.eyes {
            let mut eyes = self.eyes.unwrap_or_default();
            if self.toggles.eyes_follow {
                let ball = world.ball.rect.center();
                let paddle = &world.paddle.rect;
                let eye_y = paddle.center_y();
                let left = Vec2::new(paddle.left() + EYE_INSET, eye_y);
                let right = Vec2::new(paddle.right() - EYE_INSET, eye_y);
                eyes.left_rotate = look_angle(left, ball);
                eyes.right_rotate = look_angle(right, ball);
            }
            Some(eyes)
        } else {
            None
        };
    }

    /// Cancel every in-flight animation; used on level teardown
    pub fn cancel_all(&mut self) {
        self.ball = BallFx::default();
        for fx in &mut self.blocks {
            fx.cancel();
        }
        self.removals.clear();
        self.particles.clear();
        self.trail.clear();
        self.trail_timer = 0.0;
    }

    /// Current ball tint: the flash fades back to the base color
    pub fn ball_color(&self) -> palette::Color {
        let base = if self.toggles.proper_colors {
            palette::BALL
        } else {
            palette::WHITE
        };
        lerp_color(base, palette::WHITE, self.ball.flash)
    }

    pub fn block_color(&self) -> palette::Color {
        if self.toggles.proper_colors {
            palette::BLOCK
        } else {
            palette::WHITE
        }
    }

    pub fn paddle_color(&self) -> palette::Color {
        if self.toggles.proper_colors {
            palette::PADDLE
        } else {
            palette::WHITE
        }
    }

    pub fn border_color(&self) -> palette::Color {
        if self.toggles.proper_colors {
            palette::BORDER
        } else {
            palette::WHITE
        }
    }
}

/// Wing frame picked from vertical velocity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WingFrame {
    #[default]
    Up,
    Mid,
    Down,
}

/// Audio events for a host that has a mixer; a host without one simply
/// never drains these, and nothing else changes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    Flap,
    Score,
    Die,
}

/// Event consumer and presentation state for flappy
#[derive(Debug, Default)]
pub struct FlappyJuice {
    pub wing: WingFrame,
    cues: Vec<SoundCue>,
}

impl FlappyJuice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn process_events(&mut self, events: &[flappy::GameEvent]) {
        for event in events {
            match event {
                flappy::GameEvent::Flapped => {
                    self.wing = WingFrame::Down;
                    self.cues.push(SoundCue::Flap);
                }
                flappy::GameEvent::Scored { .. } => self.cues.push(SoundCue::Score),
                flappy::GameEvent::GameOver => self.cues.push(SoundCue::Die),
                flappy::GameEvent::PipeSpawned { .. } => {}
            }
        }
    }

    /// Pick the wing frame from fall speed; a flap holds the down frame
    /// until the bird starts falling
    pub fn advance(&mut self, world: &flappy::World) {
        let dive = -5.0 * 60.0 * world.config.scale;
        if world.bird.vel_y < dive {
            self.wing = WingFrame::Up;
        } else if world.bird.vel_y < 0.0 {
            self.wing = WingFrame::Mid;
        }
    }

    /// Sound cues queued since the last drain
    pub fn drain_cues(&mut self) -> Vec<SoundCue> {
        std::mem::take(&mut self.cues)
    }
}
