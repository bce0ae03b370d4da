//! Per-frame breakout update
//!
//! Order within a tick: input, countdown, integration, border bounces,
//! paddle bounce, block destruction. At most one block dies per tick and the
//! removed block is never touched again in the same tick.

use super::state::{GameEvent, GamePhase, Surface, TickInput, World};
use crate::consts::PADDLE_SPIN;

/// Advance the world by `dt` seconds. A zero `dt` changes nothing.
pub fn tick(world: &mut World, input: &TickInput, dt: f32) {
    if input.reset {
        world.reset();
        return;
    }
    if let Some(x) = input.paddle_x {
        world.paddle.set_center_x(x);
    }

    match world.phase {
        GamePhase::NotStarted => {
            if dt > 0.0 {
                world.countdown -= dt;
                if world.countdown <= 0.0 {
                    world.phase = GamePhase::Running;
                    log::info!("breakout: serving");
                }
            }
        }
        GamePhase::Running => update_running(world, dt),
    }
}

fn update_running(world: &mut World, dt: f32) {
    if dt <= 0.0 {
        return;
    }

    world.ball.rect.pos += world.ball.vel * dt;

    bounce_borders(world);
    bounce_paddle(world);
    destroy_first_block(world);
}

/// Reflect off whichever wall the ball overlaps, clamping the ball flush to
/// the wall edge so it cannot tunnel or stick. At most one wall per tick.
fn bounce_borders(world: &mut World) {
    let borders = world.borders;
    let ball = &mut world.ball;

    if ball.rect.overlaps(&borders.right) {
        ball.vel.x = -ball.vel.x.abs();
        ball.rect.pos.x = borders.right.left() - ball.rect.size.x;
        world.events.push(GameEvent::Bounced(Surface::RightBorder));
    } else if ball.rect.overlaps(&borders.left) {
        ball.vel.x = ball.vel.x.abs();
        ball.rect.pos.x = borders.left.right();
        world.events.push(GameEvent::Bounced(Surface::LeftBorder));
    } else if ball.rect.overlaps(&borders.top) {
        ball.vel.y = -ball.vel.y.abs();
        ball.rect.pos.y = borders.top.bottom() - ball.rect.size.y;
        world.events.push(GameEvent::Bounced(Surface::TopBorder));
    } else if ball.rect.bottom() < 0.0 {
        // Open floor: there is no lose condition, the ball comes back up
        ball.vel.y = ball.vel.y.abs();
        ball.rect.pos.y = 0.0;
        world.events.push(GameEvent::Bounced(Surface::Floor));
    }
}

/// Any overlap reflects upward and adds spin from the contact offset. There
/// is no approach-direction check: an overlap always sends the ball up.
fn bounce_paddle(world: &mut World) {
    if !world.ball.rect.overlaps(&world.paddle.rect) {
        return;
    }
    let offset =
        (world.ball.rect.center_x() - world.paddle.rect.center_x()) / world.paddle.rect.size.x;
    world.ball.vel.y = world.ball.vel.y.abs();
    world.ball.vel.x += PADDLE_SPIN * offset;
    world.events.push(GameEvent::Bounced(Surface::Paddle));
}

/// Destroy the first block overlapping the ball, reflecting along the axis
/// with the smaller normalized penetration. At most one block per tick.
fn destroy_first_block(world: &mut World) {
    let ball = world.ball.rect;
    let vel = world.ball.vel;
    let Some(idx) = world.blocks.iter().position(|b| b.rect.overlaps(&ball)) else {
        return;
    };
    let block = world.blocks.remove(idx);

    // Leading-edge penetration per axis, normalized by the block extent
    let y_pen = if vel.y > 0.0 {
        ball.top() - block.rect.bottom()
    } else {
        block.rect.top() - ball.bottom()
    };
    let x_pen = if vel.x > 0.0 {
        ball.right() - block.rect.left()
    } else {
        block.rect.right() - ball.left()
    };
    let y_overlap = y_pen / block.rect.size.y;
    let x_overlap = x_pen / block.rect.size.x;

    if x_overlap < y_overlap {
        world.ball.vel.x = -world.ball.vel.x;
    } else {
        world.ball.vel.y = -world.ball.vel.y;
    }

    world.score += 1;
    world.events.push(GameEvent::Bounced(Surface::Block));
    world.events.push(GameEvent::BlockDestroyed {
        id: block.id,
        at: block.rect.center(),
    });
    log::debug!(
        "breakout: block {} destroyed, {} left",
        block.id,
        world.blocks.len()
    );
}
