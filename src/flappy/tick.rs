//! Per-frame flappy update
//!
//! Order within a tick: dt clamp, scrollers, bird integration, pipe
//! movement, spawn timer, scoring, off-screen cull, terminal collisions.
//! Scoring runs before the cull so a fast tick cannot carry a pipe past the
//! bird and off the screen unscored.

use super::state::{GameEvent, GamePhase, TickInput, World};

/// Advance the world by `dt` seconds. A zero `dt` changes nothing.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    match world.phase {
        GamePhase::NotStarted => {
            if input.flap {
                world.phase = GamePhase::Running;
                flap(world);
                log::info!("flappy: run started");
            }
        }
        GamePhase::GameOver => {
            if input.flap {
                let seed = world.seed.wrapping_add(1);
                world.reset(seed);
            }
        }
        GamePhase::Running => {
            if input.flap {
                flap(world);
            }
            update_running(world, dt);
        }
    }
}

fn flap(world: &mut World) {
    world.bird.vel_y = world.tuning.flap_impulse;
    world.events.push(GameEvent::Flapped);
}

fn update_running(world: &mut World, dt: f32) {
    // Slow frames step at most max_dt of simulated time so the bird cannot
    // tunnel through a pipe in one jump
    let dt = dt.min(world.tuning.max_dt);
    if dt <= 0.0 {
        return;
    }

    world.background.advance(dt);
    world.ground.advance(dt);

    // Gravity, terminal fall speed, then position
    let bird = &mut world.bird;
    bird.vel_y += world.tuning.gravity * dt;
    bird.vel_y = bird.vel_y.max(world.tuning.terminal_velocity);
    bird.rect.pos.y += bird.vel_y * dt;

    let scroll = world.tuning.scroll_speed * dt;
    for pipe in &mut world.pipes {
        pipe.shift(-scroll);
    }

    world.spawn_timer -= dt;
    if world.spawn_timer < 0.0 {
        world.spawn_pipe();
        world.spawn_timer = world.tuning.spawn_interval;
    }

    // Score first, cull second
    let bird_x = world.bird.rect.left();
    let mut score = world.score;
    for pipe in &mut world.pipes {
        if !pipe.scored && pipe.right() < bird_x {
            pipe.scored = true;
            score += 1;
            world.events.push(GameEvent::Scored {
                pipe_id: pipe.id,
                total: score,
            });
            log::debug!("flappy: score {score}");
        }
    }
    world.score = score;
    world.pipes.retain(|p| p.right() >= 0.0);

    // Terminal collisions: ground, then either pipe half
    let bird_rect = world.bird.rect;
    let mut dead = bird_rect.overlaps(&world.ground_rect());
    if !dead {
        dead = world
            .pipes
            .iter()
            .any(|p| bird_rect.overlaps(&p.top) || bird_rect.overlaps(&p.bottom));
    }
    if dead {
        world.phase = GamePhase::GameOver;
        world.events.push(GameEvent::GameOver);
        log::info!("flappy: game over at score {}", world.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FlappyTuning, ScreenConfig};
    use crate::flappy::state::{Pipe, GROUND_H, PIPE_W};
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    /// Running world at scale 1 with the bird mid-field and no pipes
    fn running_world(seed: u64) -> World {
        let config = ScreenConfig::new(288.0, 384.0);
        let mut world = World::new(&config, FlappyTuning::relaxed(), seed);
        world.phase = GamePhase::Running;
        // Push the first spawn far away so tests control their own pipes
        world.spawn_timer = 1000.0;
        world.bird.rect.pos.y = 300.0;
        world
    }

    fn flap_input() -> TickInput {
        TickInput { flap: true }
    }

    #[test]
    fn test_gravity_integration_exact_step() {
        let mut world = running_world(0);
        world.bird.vel_y = 0.0;

        tick(&mut world, &TickInput::default(), DT);

        // vy = g*dt = -9.8*60/60 per unit scale; y moves by vy*dt
        assert!((world.bird.vel_y - (-9.8)).abs() < 1e-3);
        assert!((world.bird.rect.pos.y - (300.0 - 9.8 / 60.0)).abs() < 1e-3);
    }

    #[test]
    fn test_fall_speed_clamped_to_terminal() {
        let mut world = running_world(0);
        world.bird.rect.pos.y = 1.0e6;
        for _ in 0..600 {
            tick(&mut world, &TickInput::default(), DT);
        }
        assert_eq!(world.bird.vel_y, world.tuning.terminal_velocity);
    }

    #[test]
    fn test_large_dt_is_clamped() {
        let mut world = running_world(0);
        let start_y = world.bird.rect.pos.y;

        tick(&mut world, &TickInput::default(), 10.0);

        // One clamped step, not ten seconds of fall
        let max_dt = world.tuning.max_dt;
        let expected_vy = world.tuning.gravity * max_dt;
        assert!((world.bird.vel_y - expected_vy).abs() < 1e-2);
        assert!((world.bird.rect.pos.y - (start_y + expected_vy * max_dt)).abs() < 1e-2);
    }

    #[test]
    fn test_flap_overwrites_fall_speed() {
        let mut world = running_world(0);
        world.bird.vel_y = -400.0;

        tick(&mut world, &flap_input(), DT);

        // Impulse applies first, then one gravity step
        let expected = world.tuning.flap_impulse + world.tuning.gravity * DT;
        assert!((world.bird.vel_y - expected).abs() < 1e-2);
        assert!(world.drain_events().contains(&GameEvent::Flapped));
    }

    #[test]
    fn test_pipe_scores_exactly_once() {
        let mut world = running_world(0);
        // Pipe right edge at 50, bird at 60: already passed, not yet scored
        world.bird.rect.pos.x = 60.0;
        world.pipes.push(Pipe::new(1, 50.0 - PIPE_W, 100.0, 90.0, PIPE_W, 384.0));

        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.score, 1);
        assert!(world.pipes[0].scored);
        assert!(
            world
                .drain_events()
                .contains(&GameEvent::Scored { pipe_id: 1, total: 1 })
        );

        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.score, 1);
        let events = world.drain_events();
        assert!(!events.iter().any(|e| matches!(e, GameEvent::Scored { .. })));
    }

    #[test]
    fn test_unpassed_pipe_does_not_score() {
        let mut world = running_world(0);
        // Right edge still ahead of the bird, gap around the bird's height
        world.pipes.push(Pipe::new(1, world.bird.rect.left() + 1.0, 280.0, 90.0, PIPE_W, 384.0));

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.score, 0);
        assert!(!world.pipes[0].scored);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_scoring_happens_before_cull() {
        let mut world = running_world(0);
        // The pipe leaves the screen this very tick, still unscored
        world.pipes.push(Pipe::new(1, -PIPE_W + 0.5, 100.0, 90.0, PIPE_W, 384.0));

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.score, 1);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_ground_collision_ends_the_run() {
        let mut world = running_world(0);
        world.bird.rect.pos.y = GROUND_H + 1.0;
        world.bird.vel_y = -600.0;

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.phase, GamePhase::GameOver);
        assert!(world.drain_events().contains(&GameEvent::GameOver));
    }

    #[test]
    fn test_pipe_collision_ends_the_run() {
        let mut world = running_world(0);
        // Gap well above the bird: it meets the bottom half head-on
        world.pipes.push(Pipe::new(1, world.bird.rect.right() - 1.0, 350.0, 30.0, PIPE_W, 384.0));

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_no_updates_after_game_over() {
        let mut world = running_world(0);
        world.phase = GamePhase::GameOver;
        let before_y = world.bird.rect.pos.y;
        let before_score = world.score;

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.bird.rect.pos.y, before_y);
        assert_eq!(world.score, before_score);
        assert_eq!(world.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_tap_leaves_game_over_for_menu() {
        let mut world = running_world(0);
        world.phase = GamePhase::GameOver;
        world.score = 9;

        tick(&mut world, &flap_input(), DT);

        assert_eq!(world.phase, GamePhase::NotStarted);
        assert_eq!(world.score, 0);
        assert!(world.pipes.is_empty());
    }

    #[test]
    fn test_menu_waits_for_first_flap() {
        let config = ScreenConfig::new(288.0, 384.0);
        let mut world = World::new(&config, FlappyTuning::relaxed(), 0);
        let start_y = world.bird.rect.pos.y;

        for _ in 0..10 {
            tick(&mut world, &TickInput::default(), DT);
        }
        assert_eq!(world.phase, GamePhase::NotStarted);
        assert_eq!(world.bird.rect.pos.y, start_y);

        tick(&mut world, &flap_input(), DT);
        assert_eq!(world.phase, GamePhase::Running);
    }

    #[test]
    fn test_spawn_timer_produces_and_rearms() {
        let mut world = running_world(0);
        world.bird.rect.pos.y = 300.0;
        world.spawn_timer = 0.0;

        tick(&mut world, &TickInput::default(), DT);

        assert_eq!(world.pipes.len(), 1);
        assert!((world.spawn_timer - world.tuning.spawn_interval).abs() < 1e-6);
        // A freshly spawned pipe sits at the right edge
        assert_eq!(world.pipes[0].left(), world.config.field_width());

        // The timer holds off the next spawn
        tick(&mut world, &TickInput::default(), DT);
        assert_eq!(world.pipes.len(), 1);
    }

    #[test]
    fn test_update_zero_dt_changes_nothing() {
        let mut world = running_world(0);
        world.pipes.push(Pipe::new(1, 200.0, 100.0, 90.0, PIPE_W, 384.0));
        let before = world.clone();

        tick(&mut world, &TickInput::default(), 0.0);

        assert_eq!(world.bird.rect, before.bird.rect);
        assert_eq!(world.bird.vel_y, before.bird.vel_y);
        assert_eq!(world.score, before.score);
        assert_eq!(world.phase, before.phase);
        assert_eq!(world.pipes.len(), before.pipes.len());
        assert_eq!(world.spawn_timer, before.spawn_timer);
        assert!(world.drain_events().is_empty());
    }

    proptest! {
        /// Whatever the frame pacing and flapping pattern, the bird never
        /// falls faster than the configured terminal velocity.
        #[test]
        fn prop_terminal_velocity_bounds_fall(
            steps in proptest::collection::vec((0.0f32..0.2, any::<bool>()), 1..200),
        ) {
            let mut world = running_world(11);
            world.bird.rect.pos.y = 1.0e7;
            for (dt, do_flap) in steps {
                tick(&mut world, &TickInput { flap: do_flap }, dt);
                prop_assert!(world.bird.vel_y >= world.tuning.terminal_velocity - 1e-3);
            }
        }
    }
}
