//! Scalar property tweens for the cosmetic layer
//!
//! A toolkit animation object would fire callbacks into gameplay code; this
//! is the same idea as a pure value generator instead, so physics stays
//! tween-free and the juice layer owns all animation state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Easing {
    #[default]
    Linear,
    OutQuad,
    OutBounce,
    OutElastic,
}

impl Easing {
    /// Map linear progress in [0,1] to eased progress
    pub fn apply(self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::OutQuad => t * (2.0 - t),
            Easing::OutBounce => out_bounce(t),
            Easing::OutElastic => out_elastic(t),
        }
    }
}

/// Piecewise parabolas, the classic Penner constants
fn out_bounce(t: f32) -> f32 {
    const N: f32 = 7.5625;
    const D: f32 = 2.75;
    if t < 1.0 / D {
        N * t * t
    } else if t < 2.0 / D {
        let t = t - 1.5 / D;
        N * t * t + 0.75
    } else if t < 2.5 / D {
        let t = t - 2.25 / D;
        N * t * t + 0.9375
    } else {
        let t = t - 2.625 / D;
        N * t * t + 0.984375
    }
}

fn out_elastic(t: f32) -> f32 {
    use std::f32::consts::TAU;
    if t <= 0.0 {
        0.0
    } else if t >= 1.0 {
        1.0
    } else {
        let period = 0.3;
        2.0_f32.powf(-10.0 * t) * ((t - period / 4.0) * TAU / period).sin() + 1.0
    }
}

/// A scalar animated from `start` to `end` over a fixed duration
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Tween {
    pub start: f32,
    pub end: f32,
    pub duration: f32,
    pub elapsed: f32,
    pub easing: Easing,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration: duration.max(1e-4),
            elapsed: 0.0,
            easing,
        }
    }

    pub fn advance(&mut self, dt: f32) {
        self.elapsed = (self.elapsed + dt).min(self.duration);
    }

    pub fn value(&self) -> f32 {
        let t = self.elapsed / self.duration;
        self.start + (self.end - self.start) * self.easing.apply(t)
    }

    pub fn finished(&self) -> bool {
        self.elapsed >= self.duration
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easings_hit_both_endpoints() {
        for easing in [
            Easing::Linear,
            Easing::OutQuad,
            Easing::OutBounce,
            Easing::OutElastic,
        ] {
            assert!(easing.apply(0.0).abs() < 1e-4, "{easing:?} at 0");
            assert!((easing.apply(1.0) - 1.0).abs() < 1e-4, "{easing:?} at 1");
        }
    }

    #[test]
    fn test_out_quad_decelerates() {
        // First half covers more than half the distance
        assert!(Easing::OutQuad.apply(0.5) > 0.5);
    }

    #[test]
    fn test_tween_advances_and_finishes() {
        let mut tween = Tween::new(2.0, 4.0, 0.5, Easing::Linear);
        assert_eq!(tween.value(), 2.0);
        tween.advance(0.25);
        assert!((tween.value() - 3.0).abs() < 1e-5);
        assert!(!tween.finished());
        tween.advance(1.0);
        assert!(tween.finished());
        assert!((tween.value() - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_zero_duration_is_instant() {
        let mut tween = Tween::new(0.0, 1.0, 0.0, Easing::OutBounce);
        tween.advance(0.001);
        assert!(tween.finished());
        assert!((tween.value() - 1.0).abs() < 1e-4);
    }
}
