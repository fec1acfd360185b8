//! Tilt Pong - two paddles per side, gravity and burning paddles
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, events, round flow)
//! - `settings`: Data-driven field geometry and tuning
//! - `error`: Caller-misuse errors surfaced by the simulation

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{Result, SimError};
pub use settings::{MatchMode, Settings};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Frame delta cap (bounds step size on slow frames)
    pub const MAX_FRAME_DT: f32 = 1.0 / 30.0;

    /// Playing field bounds
    pub const FIELD_LEFT: f32 = 280.0;
    pub const FIELD_RIGHT: f32 = 1260.0;
    pub const FIELD_BOTTOM: f32 = 140.0;
    pub const FIELD_TOP: f32 = 700.0;

    /// Downward acceleration (units/s²)
    pub const GRAVITY: f32 = -1400.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 12.0;
    pub const BALL_BASE_SPEED: f32 = 650.0;
    pub const BALL_MAX_SPEED: f32 = 1600.0;
    /// Launch angle is sampled from ±this range (radians)
    pub const LAUNCH_ANGLE_RANGE: f32 = 0.35;
    /// Launches stay mostly horizontal
    pub const LAUNCH_VERTICAL_FACTOR: f32 = 0.3;

    /// Energy loss applied after every paddle bounce
    pub const BALL_BOUNCE_DAMP: f32 = 0.98;
    /// Energy loss on top/bottom walls (lossier than paddles)
    pub const WALL_BOUNCE_DAMP: f32 = 0.85;
    /// Extra push-out distance after a contact so it doesn't re-trigger
    pub const CONTACT_EPSILON: f32 = 0.5;
    /// Minimum vertical kick from a horizontal paddle
    pub const HORIZONTAL_UPKICK: f32 = 520.0;
    /// Rally intensity: applied to both axes on any paddle hit in a tick
    pub const RALLY_BOOST: f32 = 1.01;

    /// Tilted paddle defaults
    pub const VERT_PADDLE_LENGTH: f32 = 170.0;
    pub const VERT_PADDLE_THICKNESS: f32 = 18.0;
    pub const VERT_PADDLE_TILT_DEG: f32 = 30.0;
    /// Distance from the goal line to the tilted paddle centre
    pub const VERT_PADDLE_INSET: f32 = 60.0;
    pub const VERT_PADDLE_SPEED: f32 = 900.0;

    /// Horizontal paddle defaults
    pub const HOR_PADDLE_WIDTH: f32 = 100.0;
    pub const HOR_PADDLE_THICKNESS: f32 = 18.0;
    /// Height of the horizontal paddle above the field bottom
    pub const HOR_PADDLE_ELEVATION: f32 = 220.0;
    /// Gap kept between the horizontal paddle range and the centre line
    pub const HOR_PADDLE_CENTER_GAP: f32 = 40.0;
    /// Spawn offset from the outer end of the paddle's range
    pub const HOR_PADDLE_START_OFFSET: f32 = 50.0;
    pub const HOR_PADDLE_SPEED: f32 = 900.0;

    /// Auto-control dead zones
    pub const AI_VERTICAL_DEAD_ZONE: f32 = 10.0;
    pub const AI_HORIZONTAL_DEAD_ZONE: f32 = 8.0;

    /// Event timing (seconds)
    pub const EVENT_INTERVAL: f32 = 10.0;
    pub const EVENT_WARNING_TIME: f32 = 1.0;
    pub const FIRE_STUN_DURATION: f32 = 3.0;
    pub const EVENT_MESSAGE_TTL: f32 = 2.0;

    /// Pre-round countdown (seconds)
    pub const COUNTDOWN_DURATION: f32 = 3.0;
}

/// Unit vector in the direction of `v`, or zero for a zero-length vector
#[inline]
pub fn direction_or_zero(v: Vec2) -> Vec2 {
    let len = v.length();
    if len == 0.0 { Vec2::ZERO } else { v / len }
}

/// Sanitize a frame delta: non-finite or negative becomes 0, large is capped.
/// A cap that isn't positive and finite falls back to [`consts::MAX_FRAME_DT`].
#[inline]
pub fn sanitize_dt(dt: f32, max_dt: f32) -> f32 {
    if !dt.is_finite() || dt < 0.0 {
        return 0.0;
    }
    let cap = if max_dt.is_finite() && max_dt > 0.0 {
        max_dt
    } else {
        consts::MAX_FRAME_DT
    };
    dt.min(cap)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_or_zero() {
        assert_eq!(direction_or_zero(Vec2::ZERO), Vec2::ZERO);
        let d = direction_or_zero(Vec2::new(3.0, 4.0));
        assert!((d - Vec2::new(0.6, 0.8)).length() < 1e-6);
    }

    #[test]
    fn test_sanitize_dt() {
        assert_eq!(sanitize_dt(f32::NAN, 0.1), 0.0);
        assert_eq!(sanitize_dt(f32::INFINITY, 0.1), 0.0);
        assert_eq!(sanitize_dt(-0.5, 0.1), 0.0);
        assert_eq!(sanitize_dt(0.5, 0.1), 0.1);
        assert_eq!(sanitize_dt(0.05, 0.1), 0.05);
    }

    #[test]
    fn test_sanitize_dt_with_bad_cap() {
        assert_eq!(sanitize_dt(0.5, -0.5), consts::MAX_FRAME_DT);
        assert_eq!(sanitize_dt(0.5, f32::NAN), consts::MAX_FRAME_DT);
        assert_eq!(sanitize_dt(0.5, 0.0), consts::MAX_FRAME_DT);
        assert_eq!(sanitize_dt(0.01, -0.5), 0.01);
        assert_eq!(sanitize_dt(-0.1, -0.5), 0.0);
    }
}
