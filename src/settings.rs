//! Match settings and tuning
//!
//! Defaults come from [`crate::consts`]; a host can override any of them
//! from JSON before the match is created. Settings are fixed for the
//! lifetime of a match.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{Result, SimError};
use crate::sim::Side;

/// Who controls which side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum MatchMode {
    /// Left is human, right is auto-controlled
    #[default]
    VersusCpu,
    /// Both sides are human
    TwoPlayer,
    /// Both sides are auto-controlled (attract/demo loop)
    Demo,
}

impl MatchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchMode::VersusCpu => "VersusCpu",
            MatchMode::TwoPlayer => "TwoPlayer",
            MatchMode::Demo => "Demo",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "cpu" | "versuscpu" | "vs-cpu" => Some(MatchMode::VersusCpu),
            "pvp" | "twoplayer" | "2p" => Some(MatchMode::TwoPlayer),
            "demo" => Some(MatchMode::Demo),
            _ => None,
        }
    }

    /// Whether the player on `side` starts auto-controlled
    pub fn is_auto(&self, side: Side) -> bool {
        match self {
            MatchMode::VersusCpu => side == Side::Right,
            MatchMode::TwoPlayer => false,
            MatchMode::Demo => true,
        }
    }
}

/// Field geometry and simulation tuning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub mode: MatchMode,

    // === Field ===
    pub field_left: f32,
    pub field_right: f32,
    pub field_bottom: f32,
    pub field_top: f32,

    // === Ball ===
    pub gravity: f32,
    pub ball_radius: f32,
    pub ball_base_speed: f32,
    pub ball_max_speed: f32,
    pub launch_angle_range: f32,
    pub launch_vertical_factor: f32,

    // === Bounces ===
    pub bounce_damp: f32,
    pub wall_damp: f32,
    pub contact_epsilon: f32,
    pub horizontal_upkick: f32,
    pub rally_boost: f32,

    // === Tilted paddle ===
    pub vert_length: f32,
    pub vert_thickness: f32,
    pub vert_tilt_deg: f32,
    pub vert_inset: f32,
    pub vert_speed: f32,

    // === Horizontal paddle ===
    pub horz_width: f32,
    pub horz_thickness: f32,
    pub horz_elevation: f32,
    pub horz_center_gap: f32,
    pub horz_start_offset: f32,
    pub horz_speed: f32,

    // === Auto control ===
    pub ai_vertical_dead_zone: f32,
    pub ai_horizontal_dead_zone: f32,

    // === Events ===
    pub event_interval: f32,
    pub event_warning_time: f32,
    pub fire_stun_duration: f32,
    pub event_message_ttl: f32,

    // === Rounds ===
    pub countdown_duration: f32,
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mode: MatchMode::default(),

            field_left: FIELD_LEFT,
            field_right: FIELD_RIGHT,
            field_bottom: FIELD_BOTTOM,
            field_top: FIELD_TOP,

            gravity: GRAVITY,
            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_max_speed: BALL_MAX_SPEED,
            launch_angle_range: LAUNCH_ANGLE_RANGE,
            launch_vertical_factor: LAUNCH_VERTICAL_FACTOR,

            bounce_damp: BALL_BOUNCE_DAMP,
            wall_damp: WALL_BOUNCE_DAMP,
            contact_epsilon: CONTACT_EPSILON,
            horizontal_upkick: HORIZONTAL_UPKICK,
            rally_boost: RALLY_BOOST,

            vert_length: VERT_PADDLE_LENGTH,
            vert_thickness: VERT_PADDLE_THICKNESS,
            vert_tilt_deg: VERT_PADDLE_TILT_DEG,
            vert_inset: VERT_PADDLE_INSET,
            vert_speed: VERT_PADDLE_SPEED,

            horz_width: HOR_PADDLE_WIDTH,
            horz_thickness: HOR_PADDLE_THICKNESS,
            horz_elevation: HOR_PADDLE_ELEVATION,
            horz_center_gap: HOR_PADDLE_CENTER_GAP,
            horz_start_offset: HOR_PADDLE_START_OFFSET,
            horz_speed: HOR_PADDLE_SPEED,

            ai_vertical_dead_zone: AI_VERTICAL_DEAD_ZONE,
            ai_horizontal_dead_zone: AI_HORIZONTAL_DEAD_ZONE,

            event_interval: EVENT_INTERVAL,
            event_warning_time: EVENT_WARNING_TIME,
            fire_stun_duration: FIRE_STUN_DURATION,
            event_message_ttl: EVENT_MESSAGE_TTL,

            countdown_duration: COUNTDOWN_DURATION,
            max_frame_dt: MAX_FRAME_DT,
        }
    }
}

impl Settings {
    /// Default settings with a given mode
    pub fn with_mode(mode: MatchMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    /// Parse settings from JSON. Missing fields fall back to defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Check that every value keeps the field geometry and the frame clock sane.
    pub fn validate(&self) -> Result<()> {
        let invalid = |field, reason| Err(SimError::InvalidSettings { field, reason });

        let values = [
            ("field_left", self.field_left),
            ("field_right", self.field_right),
            ("field_bottom", self.field_bottom),
            ("field_top", self.field_top),
            ("gravity", self.gravity),
            ("launch_angle_range", self.launch_angle_range),
            ("launch_vertical_factor", self.launch_vertical_factor),
            ("bounce_damp", self.bounce_damp),
            ("wall_damp", self.wall_damp),
            ("contact_epsilon", self.contact_epsilon),
            ("horizontal_upkick", self.horizontal_upkick),
            ("rally_boost", self.rally_boost),
            ("vert_tilt_deg", self.vert_tilt_deg),
            ("vert_inset", self.vert_inset),
            ("horz_elevation", self.horz_elevation),
            ("horz_start_offset", self.horz_start_offset),
            ("ai_vertical_dead_zone", self.ai_vertical_dead_zone),
            ("ai_horizontal_dead_zone", self.ai_horizontal_dead_zone),
            ("event_warning_time", self.event_warning_time),
            ("fire_stun_duration", self.fire_stun_duration),
            ("event_message_ttl", self.event_message_ttl),
            ("countdown_duration", self.countdown_duration),
        ];
        for (field, value) in values {
            if !value.is_finite() {
                return invalid(field, "must be finite");
            }
        }

        let positive = [
            ("ball_radius", self.ball_radius),
            ("ball_base_speed", self.ball_base_speed),
            ("ball_max_speed", self.ball_max_speed),
            ("rally_boost", self.rally_boost),
            ("vert_length", self.vert_length),
            ("vert_thickness", self.vert_thickness),
            ("vert_speed", self.vert_speed),
            ("horz_width", self.horz_width),
            ("horz_thickness", self.horz_thickness),
            ("horz_speed", self.horz_speed),
            ("horz_center_gap", self.horz_center_gap),
            ("event_interval", self.event_interval),
            ("max_frame_dt", self.max_frame_dt),
        ];
        for (field, value) in positive {
            // NaN fails this too
            if !(value.is_finite() && value > 0.0) {
                return invalid(field, "must be positive and finite");
            }
        }

        let non_negative = [
            ("launch_angle_range", self.launch_angle_range),
            ("launch_vertical_factor", self.launch_vertical_factor),
            ("bounce_damp", self.bounce_damp),
            ("wall_damp", self.wall_damp),
            ("contact_epsilon", self.contact_epsilon),
            ("horizontal_upkick", self.horizontal_upkick),
            ("ai_vertical_dead_zone", self.ai_vertical_dead_zone),
            ("ai_horizontal_dead_zone", self.ai_horizontal_dead_zone),
            ("event_warning_time", self.event_warning_time),
            ("fire_stun_duration", self.fire_stun_duration),
            ("event_message_ttl", self.event_message_ttl),
            ("countdown_duration", self.countdown_duration),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return invalid(field, "must not be negative");
            }
        }

        if self.field_right <= self.field_left {
            return invalid("field_right", "must be right of field_left");
        }
        if self.field_top <= self.field_bottom {
            return invalid("field_top", "must be above field_bottom");
        }
        if self.vert_length > self.field_top - self.field_bottom {
            return invalid("vert_length", "must fit the field height");
        }
        for side in [Side::Left, Side::Right] {
            let (min_x, max_x) = self.horizontal_range(side);
            if min_x > max_x {
                return invalid("horz_width", "leaves no room between wall and centre gap");
            }
        }
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.field_left + self.field_right) / 2.0
    }

    #[inline]
    pub fn center_y(&self) -> f32 {
        (self.field_bottom + self.field_top) / 2.0
    }

    /// Legal x-range of the horizontal paddle on `side`.
    /// Left range ends strictly left of centre, right starts strictly right.
    pub fn horizontal_range(&self, side: Side) -> (f32, f32) {
        let half_w = self.horz_width / 2.0;
        match side {
            Side::Left => (
                self.field_left + half_w,
                self.center_x() - self.horz_center_gap,
            ),
            Side::Right => (
                self.center_x() + self.horz_center_gap,
                self.field_right - half_w,
            ),
        }
    }
}
