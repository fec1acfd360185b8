//! Round controller
//!
//! Owns every piece of simulation state and advances it one frame at a
//! time: countdown → playing ⇄ paused, with a reset back to countdown on
//! every goal. Hosts only talk to the simulation through [`Match`].

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::collision::{collide_horizontal_paddle, collide_vertical_paddle};
use super::events::{EventScheduler, GameEvent};
use super::material::MaterialTable;
use super::state::{Ball, Player, RoundPhase, Side};
use crate::error::Result;
use crate::sanitize_dt;
use crate::settings::Settings;

/// A match between two players. `R` is the single random source for ball
/// launches and event picks; inject a seeded one for reproducible runs.
#[derive(Debug, Clone)]
pub struct Match<R: Rng = Pcg32> {
    settings: Settings,
    materials: MaterialTable,
    rng: R,
    /// Left then right
    pub players: [Player; 2],
    pub ball: Ball,
    pub scheduler: EventScheduler,
    pub phase: RoundPhase,
    /// Seconds left in the countdown
    pub countdown: f32,
    pub last_event_message: String,
    /// Seconds the last-event message stays visible
    pub last_event_ttl: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl Match<Pcg32> {
    /// Create a match with a seeded PCG random source
    pub fn new(settings: Settings, materials: MaterialTable, seed: u64) -> Result<Self> {
        log::info!("Match created with seed: {}", seed);
        Self::with_rng(settings, materials, Pcg32::seed_from_u64(seed))
    }
}

impl<R: Rng> Match<R> {
    /// Create a match drawing randomness from `rng`. Fails on settings that
    /// [`Settings::validate`] rejects.
    pub fn with_rng(settings: Settings, materials: MaterialTable, rng: R) -> Result<Self> {
        settings.validate()?;
        let material = materials.default_material().clone();
        let players = [
            Player::new(Side::Left, &settings, &material, settings.mode.is_auto(Side::Left)),
            Player::new(Side::Right, &settings, &material, settings.mode.is_auto(Side::Right)),
        ];
        let center = Vec2::new(settings.center_x(), settings.center_y());
        let scheduler = EventScheduler::new(
            vec![GameEvent::Fire {
                stun_duration: settings.fire_stun_duration,
            }],
            settings.event_interval,
            settings.event_warning_time,
        );

        let mut state = Self {
            ball: Ball::new(center, settings.ball_radius),
            countdown: settings.countdown_duration,
            settings,
            materials,
            rng,
            players,
            scheduler,
            phase: RoundPhase::Countdown,
            last_event_message: String::new(),
            last_event_ttl: 0.0,
            time_ticks: 0,
        };
        state.reset_round();
        log::info!("Match started in {} mode", state.settings.mode.as_str());
        Ok(state)
    }

    /// Advance the simulation by one frame.
    ///
    /// `dt` is capped at `settings.max_frame_dt`; negative or non-finite
    /// values are treated as a zero-length frame.
    pub fn advance(&mut self, dt: f32) {
        let raw_dt = dt;
        let dt = sanitize_dt(dt, self.settings.max_frame_dt);
        if dt == 0.0 && raw_dt != 0.0 {
            log::warn!("Rejected frame dt {}", raw_dt);
        }

        self.time_ticks += 1;

        // The last-event message decays in every phase
        if self.last_event_ttl > 0.0 {
            self.last_event_ttl = (self.last_event_ttl - dt).max(0.0);
        }

        match self.phase {
            RoundPhase::Paused => {}
            RoundPhase::Countdown => self.step_countdown(dt),
            RoundPhase::Playing => self.step_playing(dt),
        }
    }

    fn step_countdown(&mut self, dt: f32) {
        self.countdown -= dt;
        if self.countdown <= 0.0 {
            self.countdown = 0.0;
            self.phase = RoundPhase::Playing;
            self.ball.reset(&self.settings, &mut self.rng);
            log::debug!("Countdown over, ball launched with velocity {:?}", self.ball.vel);
        }

        // Paddles stay movable so players can pre-position
        for player in self.players.iter_mut() {
            player.update(dt, &self.ball, &self.settings);
        }
    }

    fn step_playing(&mut self, dt: f32) {
        let tick = self.scheduler.update(dt, &mut self.rng);
        if let Some(event) = tick.fired {
            event.apply(&mut self.players);
            self.last_event_message = format!("event: {}", event.name());
            self.last_event_ttl = self.settings.event_message_ttl;
            log::info!("Event fired: {}", event.name());
        }

        for player in self.players.iter_mut() {
            player.update(dt, &self.ball, &self.settings);
        }

        self.ball.update(dt, self.settings.gravity, self.settings.ball_max_speed);
        resolve_walls(&mut self.ball, &self.settings);

        let mut hit = false;
        for player in &self.players {
            hit |= collide_vertical_paddle(&mut self.ball, &player.vert, &self.settings);
        }
        for player in &self.players {
            hit |= collide_horizontal_paddle(&mut self.ball, &player.horz, &self.settings);
        }
        if hit {
            self.ball.vel *= self.settings.rally_boost;
        }

        let (x, radius) = (self.ball.pos.x, self.ball.radius);
        if x + radius < self.settings.field_left {
            self.score(Side::Right);
        } else if x - radius > self.settings.field_right {
            self.score(Side::Left);
        }
    }

    fn score(&mut self, side: Side) {
        let player = &mut self.players[side.index()];
        player.score += 1;
        log::info!(
            "Goal for {} ({} - {})",
            side.as_str(),
            self.players[0].score,
            self.players[1].score
        );
        self.reset_round();
    }

    /// Park the ball, clear burns and stuns, and restart the countdown.
    /// Scores are kept.
    pub fn reset_round(&mut self) {
        let center = Vec2::new(self.settings.center_x(), self.settings.center_y());
        self.ball.park(center);
        self.phase = RoundPhase::Countdown;
        self.countdown = self.settings.countdown_duration;
        for player in self.players.iter_mut() {
            player.clear_afflictions();
        }
        log::debug!("Round reset");
    }

    /// Playing ⇄ paused. Ignored during the countdown.
    pub fn toggle_pause(&mut self) {
        self.phase = match self.phase {
            RoundPhase::Playing => RoundPhase::Paused,
            RoundPhase::Paused => RoundPhase::Playing,
            RoundPhase::Countdown => RoundPhase::Countdown,
        };
    }

    /// Set a player's movement intents (clamped to [-1, 1])
    pub fn set_movement(&mut self, side: Side, vert: f32, horz: f32) {
        self.players[side.index()].set_movement(vert, horz);
    }

    /// Select a material for both of a player's paddles. Unknown names fail
    /// and leave the match untouched.
    pub fn set_material(&mut self, side: Side, name: &str) -> Result<()> {
        let material = self.materials.get(name)?;
        self.players[side.index()].set_material(material);
        log::debug!("{} player now uses {}", side.as_str(), name);
        Ok(())
    }

    /// Hand a side to auto control or back to the host. Handing it back
    /// drops the last auto intents so the paddles wait for host input.
    pub fn set_auto(&mut self, side: Side, is_auto: bool) {
        let player = &mut self.players[side.index()];
        if player.is_auto && !is_auto {
            player.set_movement(0.0, 0.0);
        }
        player.is_auto = is_auto;
        log::debug!("{} player auto control: {}", side.as_str(), is_auto);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn materials(&self) -> &MaterialTable {
        &self.materials
    }

    pub fn player(&self, side: Side) -> &Player {
        &self.players[side.index()]
    }

    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// "3", "2", "1" while counting down
    pub fn countdown_label(&self) -> Option<String> {
        if self.phase == RoundPhase::Countdown && self.countdown > 0.0 {
            Some(format!("{}", self.countdown.ceil() as u32))
        } else {
            None
        }
    }

    /// The last fired event's message while it's still visible
    pub fn last_event_message(&self) -> Option<&str> {
        (self.last_event_ttl > 0.0).then_some(self.last_event_message.as_str())
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> MatchSnapshot {
        MatchSnapshot {
            phase: self.phase,
            countdown_label: self.countdown_label(),
            ball: self.ball.clone(),
            players: [
                PlayerSnapshot::from(&self.players[0]),
                PlayerSnapshot::from(&self.players[1]),
            ],
            warning_active: self.scheduler.warning_active(),
            warning_text: self.scheduler.warning_text().to_string(),
            last_event_message: self.last_event_message().map(str::to_string),
            last_event_ttl: self.last_event_ttl,
            time_ticks: self.time_ticks,
        }
    }
}

/// Top/bottom walls: clamp inside and bounce away with extra damping
fn resolve_walls(ball: &mut Ball, settings: &Settings) {
    if ball.pos.y - ball.radius <= settings.field_bottom {
        ball.pos.y = settings.field_bottom + ball.radius + settings.contact_epsilon;
        ball.vel.y = ball.vel.y.abs() * settings.wall_damp;
    } else if ball.pos.y + ball.radius >= settings.field_top {
        ball.pos.y = settings.field_top - ball.radius - settings.contact_epsilon;
        ball.vel.y = -ball.vel.y.abs() * settings.wall_damp;
    }
}

/// Tilted paddle as seen by a renderer
#[derive(Debug, Clone, Serialize)]
pub struct VerticalPaddleSnapshot {
    pub center: Vec2,
    pub start: Vec2,
    pub end: Vec2,
    pub thickness: f32,
    pub material: String,
    pub enabled: bool,
    pub burned_out: bool,
}

/// Horizontal paddle as seen by a renderer
#[derive(Debug, Clone, Serialize)]
pub struct HorizontalPaddleSnapshot {
    pub center: Vec2,
    pub width: f32,
    pub thickness: f32,
    pub material: String,
    pub enabled: bool,
    pub burned_out: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerSnapshot {
    pub side: Side,
    pub score: u32,
    pub stun_timer: f32,
    pub is_auto: bool,
    pub vertical: VerticalPaddleSnapshot,
    pub horizontal: HorizontalPaddleSnapshot,
}

impl From<&Player> for PlayerSnapshot {
    fn from(player: &Player) -> Self {
        let segment = player.vert.segment();
        Self {
            side: player.side,
            score: player.score,
            stun_timer: player.stun_timer,
            is_auto: player.is_auto,
            vertical: VerticalPaddleSnapshot {
                center: player.vert.pos,
                start: segment.a,
                end: segment.b,
                thickness: player.vert.thickness,
                material: player.vert.material.name.clone(),
                enabled: player.vert.enabled,
                burned_out: player.vert.burned_out,
            },
            horizontal: HorizontalPaddleSnapshot {
                center: player.horz.pos,
                width: player.horz.width,
                thickness: player.horz.thickness,
                material: player.horz.material.name.clone(),
                enabled: player.horz.enabled,
                burned_out: player.horz.burned_out,
            },
        }
    }
}

/// Everything a host needs to draw a frame
#[derive(Debug, Clone, Serialize)]
pub struct MatchSnapshot {
    pub phase: RoundPhase,
    pub countdown_label: Option<String>,
    pub ball: Ball,
    /// Left then right
    pub players: [PlayerSnapshot; 2],
    pub warning_active: bool,
    pub warning_text: String,
    pub last_event_message: Option<String>,
    pub last_event_ttl: f32,
    pub time_ticks: u64,
}

impl MatchSnapshot {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}
