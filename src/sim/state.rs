//! Simulation entities
//!
//! Ball, the two paddle variants and the player that owns a pair of them.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::ai;
use super::material::Material;
use super::segment::Segment;
use crate::settings::Settings;

/// Which half of the field a player defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }

    /// Slot in a `[left, right]` pair
    #[inline]
    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }
}

/// Current phase of the round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Ball parked at centre, paddles movable, events frozen
    Countdown,
    /// Active gameplay
    Playing,
    /// Everything frozen except the last-event message
    Paused,
}

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    /// A ball at rest at `pos`
    pub fn new(pos: Vec2, radius: f32) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            radius,
        }
    }

    /// Park the ball at `pos` with no velocity (between rounds)
    pub fn park(&mut self, pos: Vec2) {
        self.pos = pos;
        self.vel = Vec2::ZERO;
    }

    /// Put the ball at field centre and launch it toward a random side at a
    /// shallow random angle
    pub fn reset<R: Rng>(&mut self, settings: &Settings, rng: &mut R) {
        self.pos = Vec2::new(settings.center_x(), settings.center_y());

        let direction = if rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let range = settings.launch_angle_range;
        let angle: f32 = if range > 0.0 {
            rng.random_range(-range..=range)
        } else {
            0.0
        };
        self.vel = Vec2::new(
            direction * settings.ball_base_speed * angle.cos(),
            settings.ball_base_speed * angle.sin() * settings.launch_vertical_factor,
        );
    }

    /// Integrate gravity and position, then clamp speed to `max_speed`
    pub fn update(&mut self, dt: f32, gravity: f32, max_speed: f32) {
        self.vel.y += gravity * dt;
        self.pos += self.vel * dt;

        let speed = self.vel.length();
        if speed > max_speed {
            self.vel = self.vel / speed * max_speed;
        }
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

/// The tilted paddle: a capsule leaning toward the field centre
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerticalPaddle {
    pub side: Side,
    /// Centre
    pub pos: Vec2,
    pub length: f32,
    pub thickness: f32,
    /// Tilt from horizontal in degrees (mirrored on the right side)
    pub tilt_deg: f32,
    pub speed: f32,
    pub min_y: f32,
    pub max_y: f32,
    pub material: Material,
    pub enabled: bool,
    pub burned_out: bool,
}

impl VerticalPaddle {
    pub fn new(side: Side, settings: &Settings, material: Material) -> Self {
        let x = match side {
            Side::Left => settings.field_left + settings.vert_inset,
            Side::Right => settings.field_right - settings.vert_inset,
        };
        let half = settings.vert_length / 2.0;
        Self {
            side,
            pos: Vec2::new(x, settings.center_y()),
            length: settings.vert_length,
            thickness: settings.vert_thickness,
            tilt_deg: settings.vert_tilt_deg,
            speed: settings.vert_speed,
            min_y: settings.field_bottom + half,
            max_y: settings.field_top - half,
            material,
            enabled: true,
            burned_out: false,
        }
    }

    /// Tilt angle in radians: θ on the left, 180° − θ on the right
    pub fn angle(&self) -> f32 {
        match self.side {
            Side::Left => self.tilt_deg.to_radians(),
            Side::Right => (180.0 - self.tilt_deg).to_radians(),
        }
    }

    /// Current centreline of the capsule
    pub fn segment(&self) -> Segment {
        Segment::centered(self.pos, self.length, self.angle())
    }

    /// Capsule radius
    #[inline]
    pub fn radius(&self) -> f32 {
        self.thickness / 2.0
    }

    /// Move vertically by `move_dir * speed * dt`, clamped to the field
    pub fn update(&mut self, dt: f32, move_dir: f32) {
        if !self.enabled || self.burned_out {
            return;
        }
        self.pos.y = (self.pos.y + move_dir * self.speed * dt).clamp(self.min_y, self.max_y);
    }

    /// Select a material. Also clears `burned_out`, even when re-selecting
    /// the same material.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.burned_out = false;
    }
}

/// The horizontal paddle: an axis-aligned box sliding along a fixed height
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HorizontalPaddle {
    pub side: Side,
    /// Centre (y never changes)
    pub pos: Vec2,
    pub width: f32,
    pub thickness: f32,
    pub speed: f32,
    pub min_x: f32,
    pub max_x: f32,
    pub material: Material,
    pub enabled: bool,
    pub burned_out: bool,
}

impl HorizontalPaddle {
    pub fn new(side: Side, settings: &Settings, material: Material) -> Self {
        let (min_x, max_x) = settings.horizontal_range(side);
        let x = match side {
            Side::Left => min_x + settings.horz_start_offset,
            Side::Right => max_x - settings.horz_start_offset,
        };
        Self {
            side,
            pos: Vec2::new(x.clamp(min_x, max_x), settings.field_bottom + settings.horz_elevation),
            width: settings.horz_width,
            thickness: settings.horz_thickness,
            speed: settings.horz_speed,
            min_x,
            max_x,
            material,
            enabled: true,
            burned_out: false,
        }
    }

    #[inline]
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.thickness / 2.0)
    }

    /// Move horizontally by `move_dir * speed * dt`, clamped to this side's range
    pub fn update(&mut self, dt: f32, move_dir: f32) {
        if !self.enabled || self.burned_out {
            return;
        }
        self.pos.x = (self.pos.x + move_dir * self.speed * dt).clamp(self.min_x, self.max_x);
    }

    /// Select a material. Also clears `burned_out`.
    pub fn set_material(&mut self, material: Material) {
        self.material = material;
        self.burned_out = false;
    }
}

/// One side's controller: a paddle pair, score, intents and stun
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub side: Side,
    pub vert: VerticalPaddle,
    pub horz: HorizontalPaddle,
    pub score: u32,
    /// Vertical paddle intent in [-1, 1]
    pub move_vert: f32,
    /// Horizontal paddle intent in [-1, 1]
    pub move_horz: f32,
    /// Seconds of forced disable remaining
    pub stun_timer: f32,
    pub is_auto: bool,
}

impl Player {
    pub fn new(side: Side, settings: &Settings, material: &Material, is_auto: bool) -> Self {
        Self {
            side,
            vert: VerticalPaddle::new(side, settings, material.clone()),
            horz: HorizontalPaddle::new(side, settings, material.clone()),
            score: 0,
            move_vert: 0.0,
            move_horz: 0.0,
            stun_timer: 0.0,
            is_auto,
        }
    }

    /// Both paddles always share a material
    pub fn material(&self) -> &Material {
        &self.vert.material
    }

    pub fn set_material(&mut self, material: &Material) {
        self.vert.set_material(material.clone());
        self.horz.set_material(material.clone());
    }

    /// Set movement intents, clamped to [-1, 1]. Non-finite input means "stop".
    pub fn set_movement(&mut self, vert: f32, horz: f32) {
        let sanitize = |v: f32| if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 };
        self.move_vert = sanitize(vert);
        self.move_horz = sanitize(horz);
    }

    /// Stun never shortens: the timer becomes max(current, duration)
    pub fn set_stun(&mut self, duration: f32) {
        self.stun_timer = self.stun_timer.max(duration);
    }

    #[inline]
    pub fn is_stunned(&self) -> bool {
        self.stun_timer > 0.0
    }

    pub fn set_burned_out(&mut self, burned_out: bool) {
        self.vert.burned_out = burned_out;
        self.horz.burned_out = burned_out;
    }

    /// Clear per-round afflictions (burn and stun); score is kept
    pub fn clear_afflictions(&mut self) {
        self.set_burned_out(false);
        self.stun_timer = 0.0;
        self.vert.enabled = true;
        self.horz.enabled = true;
    }

    /// Advance stun, pick intents (auto control if enabled) and move paddles
    pub fn update(&mut self, dt: f32, ball: &Ball, settings: &Settings) {
        if self.is_stunned() {
            self.stun_timer = (self.stun_timer - dt).max(0.0);
            self.vert.enabled = false;
            self.horz.enabled = false;
            self.move_vert = 0.0;
            self.move_horz = 0.0;
        } else {
            self.vert.enabled = true;
            self.horz.enabled = true;

            if self.is_auto {
                let (vert, horz) = ai::auto_intents(ball, &self.vert, &self.horz, settings);
                self.move_vert = vert;
                self.move_horz = horz;
            }
        }

        self.vert.update(dt, self.move_vert);
        self.horz.update(dt, self.move_horz);
    }
}
