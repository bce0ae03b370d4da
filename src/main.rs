//! Tiny Arcade entry point
//!
//! There is no renderer here: a host toolkit is expected to own the window
//! and call into the library per frame. This binary runs both games headless
//! at a fixed 60 Hz for a few simulated seconds, driving them with trivial
//! scripted input, and logs what happened. Useful as a smoke test and as a
//! reference for the host-side call order.

use tiny_arcade::breakout;
use tiny_arcade::config::{FlappyTuning, ScreenConfig};
use tiny_arcade::flappy;
use tiny_arcade::juice::{BreakoutJuice, FlappyJuice};
use tiny_arcade::tween::Easing;

const DT: f32 = 1.0 / 60.0;

fn main() {
    env_logger::init();
    log::info!("tiny-arcade headless demo");

    demo_breakout();
    demo_flappy();
}

fn demo_breakout() {
    let mut world = breakout::World::new(7);
    let mut juice = BreakoutJuice::new(7);
    juice.toggles.drop = Some(Easing::OutBounce);
    juice.toggles.trail = true;
    juice.toggles.block_react = true;
    juice.toggles.proper_colors = true;

    let mut input = breakout::TickInput::default();
    for _ in 0..(30 * 60) {
        // Keep the paddle under the ball
        input.paddle_x = Some(world.ball.rect.center_x());
        breakout::tick(&mut world, &input, DT);

        let events = world.drain_events();
        juice.process_events(&events, &world);
        juice.advance(DT, &world);
    }

    println!(
        "breakout: destroyed {} of 50 blocks in 30s of play",
        world.score
    );
}

fn demo_flappy() {
    let config = ScreenConfig::new(288.0, 384.0);
    let mut world = flappy::World::new(&config, FlappyTuning::relaxed(), 42);
    let mut juice = FlappyJuice::new();

    for _ in 0..(60 * 60) {
        // Aim for the next gap, or mid-field before any pipe shows up
        let target = world
            .pipes
            .iter()
            .find(|p| !p.scored)
            .map(|p| {
                let (gap_bottom, gap_top) = p.gap();
                (gap_bottom + gap_top) / 2.0
            })
            .unwrap_or(config.field_height() / 2.0);
        let flap = world.bird.rect.center_y() < target && world.bird.vel_y < 0.0;

        flappy::tick(&mut world, &flappy::TickInput { flap }, DT);

        let events = world.drain_events();
        juice.process_events(&events);
        juice.advance(&world);
        let _ = juice.drain_cues();

        if world.phase == flappy::GamePhase::GameOver {
            break;
        }
    }

    println!("flappy: scored {} before going down", world.score);
}
