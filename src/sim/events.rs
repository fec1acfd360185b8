//! Timed random field events
//!
//! Every interval the scheduler fires one event picked uniformly from its
//! registry. The pick happens when the warning window opens, so hosts can
//! announce it; the picked event stays pending until the interval expires.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::state::Player;

/// A field event. New kinds are new variants; the scheduler only ever
/// dispatches through [`GameEvent::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Burns every burnable paddle and stuns its owner
    Fire { stun_duration: f32 },
}

impl GameEvent {
    pub fn name(&self) -> &'static str {
        match self {
            GameEvent::Fire { .. } => "fire on the field",
        }
    }

    /// Apply the event to both players
    pub fn apply(&self, players: &mut [Player]) {
        match *self {
            GameEvent::Fire { stun_duration } => {
                for player in players.iter_mut() {
                    if player.material().burnable {
                        player.set_burned_out(true);
                        player.set_stun(stun_duration);
                        log::info!(
                            "{} paddles burned ({}), stunned for {:.1}s",
                            player.side.as_str(),
                            player.material().name,
                            stun_duration
                        );
                    }
                }
            }
        }
    }
}

/// What the scheduler did during one update
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchedulerTick {
    /// Warning window opened with this event pending
    pub warned: Option<GameEvent>,
    /// Interval expired and this event must be applied
    pub fired: Option<GameEvent>,
}

/// Interval timer with a warning window
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventScheduler {
    registry: Vec<GameEvent>,
    interval: f32,
    warning_time: f32,
    /// Seconds until the next event fires
    next_event_in: f32,
    warning_active: bool,
    warning_timer: f32,
    warning_text: String,
    pending: Option<GameEvent>,
}

impl EventScheduler {
    pub fn new(registry: Vec<GameEvent>, interval: f32, warning_time: f32) -> Self {
        Self {
            registry,
            interval,
            warning_time,
            next_event_in: interval,
            warning_active: false,
            warning_timer: 0.0,
            warning_text: String::new(),
            pending: None,
        }
    }

    /// Uniform pick from the registry
    fn pick<R: Rng>(&self, rng: &mut R) -> Option<GameEvent> {
        if self.registry.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.registry.len());
        Some(self.registry[index])
    }

    /// Advance timers. At most one event fires per call.
    pub fn update<R: Rng>(&mut self, dt: f32, rng: &mut R) -> SchedulerTick {
        let mut tick = SchedulerTick::default();
        self.next_event_in -= dt;

        if !self.warning_active && self.next_event_in <= self.warning_time {
            self.warning_active = true;
            self.warning_timer = self.warning_time;
            self.pending = self.pick(rng);
            if let Some(event) = self.pending {
                self.warning_text = format!("{} in {:.1}s", event.name(), self.warning_time);
                log::debug!("Event warning: {}", event.name());
            }
            tick.warned = self.pending;
        }

        if self.warning_active {
            self.warning_timer -= dt;
            if self.warning_timer <= 0.0 {
                self.warning_active = false;
            }
        }

        if self.next_event_in <= 0.0 {
            self.next_event_in = self.interval;
            let event = match self.pending.take() {
                Some(event) => Some(event),
                None => {
                    log::warn!("Event interval expired with nothing pending, picking now");
                    self.pick(rng)
                }
            };
            tick.fired = event;
        }

        tick
    }

    pub fn warning_active(&self) -> bool {
        self.warning_active
    }

    pub fn warning_text(&self) -> &str {
        &self.warning_text
    }

    pub fn pending(&self) -> Option<GameEvent> {
        self.pending
    }

    pub fn next_event_in(&self) -> f32 {
        self.next_event_in
    }

    pub fn registry(&self) -> &[GameEvent] {
        &self.registry
    }
}
