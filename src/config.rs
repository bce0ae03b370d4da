//! Screen scaling and data-driven tuning
//!
//! The scale is computed once into an immutable [`ScreenConfig`] that worlds
//! take at construction; no ambient global. The flappy constants live in a
//! serde-loadable [`FlappyTuning`] with one preset per historical build.

use serde::{Deserialize, Serialize};

/// Reference playfield size the art was authored against (pixels)
pub const BG_WIDTH: f32 = 288.0;
pub const BG_HEIGHT: f32 = 384.0;

/// Immutable screen parameters, computed once at startup
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// Uniform factor mapping reference pixels to window pixels
    pub scale: f32,
}

impl ScreenConfig {
    /// Fit the reference playfield inside the window, preserving aspect
    pub fn new(width: f32, height: f32) -> Self {
        let ws = width / BG_WIDTH;
        let hs = height / BG_HEIGHT;
        let scale = ws.min(hs);
        log::info!("screen {width}x{height} scale={scale:.3}");
        Self {
            width,
            height,
            scale,
        }
    }

    /// Playfield extent actually covered by the scaled art
    pub fn field_width(&self) -> f32 {
        BG_WIDTH * self.scale
    }

    pub fn field_height(&self) -> f32 {
        BG_HEIGHT * self.scale
    }
}

/// Flappy tuning constants, in reference pixels and seconds.
///
/// Distances and speeds are per unit of screen scale; [`FlappyTuning::scaled`]
/// bakes the scale in when a world is built. Two presets are shipped,
/// matching the two builds this game went through; `relaxed` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FlappyTuning {
    /// Downward acceleration (px/s^2, negative)
    pub gravity: f32,
    /// Most negative fall speed the bird can reach (px/s)
    pub terminal_velocity: f32,
    /// Upward velocity set by a flap (px/s)
    pub flap_impulse: f32,
    /// Leftward scroll speed for pipes and ground (px/s)
    pub scroll_speed: f32,
    /// Seconds between pipe spawns
    pub spawn_interval: f32,
    /// Vertical extent of the gap between pipe halves (px)
    pub gap_extent: f32,
    /// Clearance keeping gaps away from ground and ceiling (px)
    pub gap_margin: f32,
    /// Upper bound on dt so slow frames cannot tunnel (seconds)
    pub max_dt: f32,
}

impl FlappyTuning {
    /// The first build: frequent pipes, floaty frame-based constants
    /// converted to per-second form
    pub fn classic() -> Self {
        Self {
            gravity: -0.3 * 60.0 * 60.0,
            terminal_velocity: -10.0 * 60.0,
            flap_impulse: 5.5 * 60.0,
            scroll_speed: 2.0 * 60.0,
            spawn_interval: 1.5,
            gap_extent: 3.5 * 24.0,
            gap_margin: 50.0,
            max_dt: 1.0 / 30.0,
        }
    }

    /// The later dt-scaled build: sparse pipes, heavier fall
    pub fn relaxed() -> Self {
        Self {
            gravity: -9.8 * 60.0,
            terminal_velocity: -20.0 * 60.0,
            flap_impulse: 5.0 * 60.0,
            scroll_speed: 2.0 * 60.0,
            spawn_interval: 5.0,
            gap_extent: 2.5 * 36.0,
            gap_margin: 50.0,
            max_dt: 1.0 / 30.0,
        }
    }

    /// Multiply every distance-valued field by the screen scale.
    /// Timers are left alone.
    pub fn scaled(self, scale: f32) -> Self {
        Self {
            gravity: self.gravity * scale,
            terminal_velocity: self.terminal_velocity * scale,
            flap_impulse: self.flap_impulse * scale,
            scroll_speed: self.scroll_speed * scale,
            gap_extent: self.gap_extent * scale,
            gap_margin: self.gap_margin * scale,
            ..self
        }
    }

    /// Load tuning overrides from a JSON document. Missing fields fall back
    /// to the `relaxed` preset.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl Default for FlappyTuning {
    fn default() -> Self {
        Self::relaxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_window_has_unit_scale() {
        let config = ScreenConfig::new(288.0, 384.0);
        assert!((config.scale - 1.0).abs() < 1e-6);
        assert!((config.field_width() - 288.0).abs() < 1e-6);
    }

    #[test]
    fn test_scale_fits_smaller_axis() {
        // Twice as wide as the reference aspect: height limits the scale
        let config = ScreenConfig::new(1152.0, 768.0);
        assert!((config.scale - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_scaled_leaves_timers_alone() {
        let t = FlappyTuning::relaxed().scaled(0.75);
        assert!((t.gravity - (-9.8 * 60.0 * 0.75)).abs() < 1e-3);
        assert!((t.spawn_interval - 5.0).abs() < 1e-6);
        assert!((t.max_dt - 1.0 / 30.0).abs() < 1e-6);
    }

    #[test]
    fn test_presets_differ_where_the_builds_did() {
        let classic = FlappyTuning::classic();
        let relaxed = FlappyTuning::relaxed();
        assert!(classic.spawn_interval < relaxed.spawn_interval);
        assert_ne!(classic.gravity, relaxed.gravity);
    }

    #[test]
    fn test_from_json_partial_override() {
        let t = FlappyTuning::from_json(r#"{"spawn_interval": 2.0}"#).unwrap();
        assert!((t.spawn_interval - 2.0).abs() < 1e-6);
        // Everything else stays at the default preset
        assert_eq!(t.gravity, FlappyTuning::relaxed().gravity);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(FlappyTuning::from_json("not json").is_err());
    }
}
