//! Auto control: a reactive ball follower.
//!
//! Stateless. Intents are a pure function of the ball and the paddle pair.

use super::state::{Ball, HorizontalPaddle, VerticalPaddle};
use crate::settings::Settings;

/// Step toward `target` from `current`, holding still inside `dead_zone`
#[inline]
fn follow(target: f32, current: f32, dead_zone: f32) -> f32 {
    if target > current + dead_zone {
        1.0
    } else if target < current - dead_zone {
        -1.0
    } else {
        0.0
    }
}

/// (vertical, horizontal) intents that chase the ball.
///
/// The tilted paddle tracks the ball's height; the horizontal paddle tracks
/// the ball's x clamped into its own legal range.
pub fn auto_intents(
    ball: &Ball,
    vert: &VerticalPaddle,
    horz: &HorizontalPaddle,
    settings: &Settings,
) -> (f32, f32) {
    let vertical = follow(ball.pos.y, vert.pos.y, settings.ai_vertical_dead_zone);
    let target_x = ball.pos.x.clamp(horz.min_x, horz.max_x);
    let horizontal = follow(target_x, horz.pos.x, settings.ai_horizontal_dead_zone);
    (vertical, horizontal)
}
