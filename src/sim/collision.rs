//! Collision detection and response against paddles
//!
//! Two shapes: the tilted paddle is a capsule (segment + radius), the
//! horizontal paddle is an axis-aligned box. Detection produces a
//! [`CollisionResult`]; response mutates only the ball. Both responses are
//! deterministic for a given ball state and material.

use glam::Vec2;

use super::segment::Segment;
use super::state::{Ball, HorizontalPaddle, VerticalPaddle};
use crate::direction_or_zero;
use crate::settings::Settings;

/// Normal used when the ball centre sits exactly on the paddle centreline
pub const FALLBACK_NORMAL: Vec2 = Vec2::new(1.0, 0.0);

/// Result of a collision check
#[derive(Debug, Clone)]
pub struct CollisionResult {
    /// Whether a collision occurred
    pub hit: bool,
    /// Closest point on the paddle surface model (if hit)
    pub point: Vec2,
    /// Unit normal pointing from the paddle toward the ball
    pub normal: Vec2,
    /// Penetration depth (for position correction)
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            point: Vec2::ZERO,
            normal: Vec2::ZERO,
            penetration: 0.0,
        }
    }
}

/// Standard reflection: v' = v - 2(v·n)n
#[inline]
pub fn reflect_velocity(velocity: Vec2, normal: Vec2) -> Vec2 {
    velocity - 2.0 * velocity.dot(normal) * normal
}

/// Check a ball against a capsule around `segment`.
///
/// Touching counts as a hit. A ball centred on the segment gets
/// [`FALLBACK_NORMAL`].
pub fn ball_capsule_collision(
    ball_pos: Vec2,
    ball_radius: f32,
    segment: &Segment,
    capsule_radius: f32,
) -> CollisionResult {
    let (closest, _t) = segment.closest_point(ball_pos);
    let offset = ball_pos - closest;
    let dist = offset.length();
    let reach = ball_radius + capsule_radius;

    if dist > reach {
        return CollisionResult::miss();
    }

    let mut normal = direction_or_zero(offset);
    if normal == Vec2::ZERO {
        normal = FALLBACK_NORMAL;
    }

    CollisionResult {
        hit: true,
        point: closest,
        normal,
        penetration: reach - dist,
    }
}

/// Check a ball against an axis-aligned box (`half` = half extents).
///
/// The normal is always vertical: up when the ball centre is at or above
/// the box centre, down otherwise, even for side hits.
pub fn ball_box_collision(ball_pos: Vec2, ball_radius: f32, center: Vec2, half: Vec2) -> CollisionResult {
    let expanded = half + Vec2::splat(ball_radius);
    let delta = ball_pos - center;

    if delta.x.abs() > expanded.x || delta.y.abs() > expanded.y {
        return CollisionResult::miss();
    }

    let normal = if ball_pos.y >= center.y { Vec2::Y } else { Vec2::NEG_Y };
    let surface_y = center.y + normal.y * half.y;

    CollisionResult {
        hit: true,
        point: Vec2::new(ball_pos.x, surface_y),
        normal,
        penetration: expanded.y - delta.y.abs(),
    }
}

/// Bounce the ball off a tilted paddle. Returns whether it hit.
///
/// Response order: push out, reflect, bounce, power, tangential friction,
/// global damping.
pub fn collide_vertical_paddle(ball: &mut Ball, paddle: &VerticalPaddle, settings: &Settings) -> bool {
    if paddle.burned_out {
        return false;
    }

    let result = ball_capsule_collision(ball.pos, ball.radius, &paddle.segment(), paddle.radius());
    if !result.hit {
        return false;
    }

    let n = result.normal;
    ball.pos += n * (result.penetration + settings.contact_epsilon);

    let material = &paddle.material;
    let mut reflected = reflect_velocity(ball.vel, n);
    reflected *= material.bounce;
    reflected *= material.power;

    // Friction only bites along the surface
    let tangent = n.perp();
    let tangential = reflected.dot(tangent);
    reflected -= tangent * tangential * material.friction;

    ball.vel = reflected * settings.bounce_damp;
    true
}

/// Bounce the ball off a horizontal paddle. Returns whether it hit.
///
/// The ball is moved out along the contact normal. Its vertical velocity is
/// forced upward to `|vy| + upkick` from whichever face it hit, so the ball
/// can't settle on the paddle.
pub fn collide_horizontal_paddle(ball: &mut Ball, paddle: &HorizontalPaddle, settings: &Settings) -> bool {
    if paddle.burned_out {
        return false;
    }

    let half = paddle.half_extents();
    let result = ball_box_collision(ball.pos, ball.radius, paddle.pos, half);
    if !result.hit {
        return false;
    }

    let n = result.normal;
    ball.pos.y = paddle.pos.y + n.y * (half.y + ball.radius + settings.contact_epsilon);

    let material = &paddle.material;
    let reflected = reflect_velocity(ball.vel, n);

    let vy = (reflected.y.abs() + settings.horizontal_upkick) * material.bounce * material.power;
    let vx = reflected.x * material.bounce * (1.0 - material.friction);

    ball.vel = Vec2::new(vx, vy) * settings.bounce_damp;
    true
}
