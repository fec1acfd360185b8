use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use tilt_pong::consts::*;
use tilt_pong::sim::{Match, MaterialTable, RoundPhase, Side};
use tilt_pong::{MatchMode, Settings, SimError};

fn two_player_match(seed: u64) -> Match {
    Match::new(
        Settings::with_mode(MatchMode::TwoPlayer),
        MaterialTable::default(),
        seed,
    )
    .unwrap()
}

fn run_countdown(state: &mut Match) {
    while state.phase() == RoundPhase::Countdown {
        state.advance(MAX_FRAME_DT);
    }
}

fn center(state: &Match) -> Vec2 {
    Vec2::new(state.settings().center_x(), state.settings().center_y())
}

/// Advance while holding the ball still at the centre, so no rally or goal
/// interferes with the event clock
fn advance_with_parked_ball(state: &mut Match, dt: f32) {
    let c = center(state);
    state.ball.pos = c;
    state.ball.vel = Vec2::ZERO;
    state.advance(dt);
}

#[test]
fn test_goal_on_right_scores_for_left() {
    let mut state = two_player_match(1);
    run_countdown(&mut state);

    let r = state.ball.radius;
    state.ball.pos = Vec2::new(state.settings().field_right + r + 20.0, center(&state).y);
    state.ball.vel = Vec2::ZERO;
    state.advance(1.0 / 60.0);

    assert_eq!(state.player(Side::Left).score, 1);
    assert_eq!(state.player(Side::Right).score, 0);
    assert_eq!(state.phase(), RoundPhase::Countdown);
    assert_eq!(state.ball.pos, center(&state));
    assert_eq!(state.ball.vel, Vec2::ZERO);
    assert_eq!(state.countdown_label().as_deref(), Some("3"));
}

#[test]
fn test_goal_on_left_scores_for_right_and_scores_persist() {
    let mut state = two_player_match(2);
    state.players[1].score = 4;
    run_countdown(&mut state);

    let r = state.ball.radius;
    state.ball.pos = Vec2::new(state.settings().field_left - r - 20.0, center(&state).y);
    state.ball.vel = Vec2::ZERO;
    state.advance(1.0 / 60.0);

    assert_eq!(state.player(Side::Right).score, 5);
    assert_eq!(state.player(Side::Left).score, 0);
    assert_eq!(state.phase(), RoundPhase::Countdown);
}

#[test]
fn test_free_fall_matches_kinematics() {
    let mut state = two_player_match(3);
    run_countdown(&mut state);

    let start = center(&state);
    state.ball.pos = start;
    state.ball.vel = Vec2::ZERO;

    let dt = 1.0 / 600.0;
    let steps = 180;
    for _ in 0..steps {
        state.advance(dt);
    }

    let g = state.settings().gravity;
    let t = dt * steps as f32;
    assert!((state.ball.vel.y - g * t).abs() < 0.05, "vy = {}", state.ball.vel.y);
    assert_eq!(state.ball.vel.x, 0.0);
    assert_eq!(state.ball.pos.x, start.x);
    // Semi-implicit Euler lands within g*dt*t of the closed form
    let expected_y = start.y + g * t * t / 2.0;
    assert!(
        (state.ball.pos.y - expected_y).abs() <= g.abs() * dt * t,
        "y = {}, expected ~{}",
        state.ball.pos.y,
        expected_y
    );
}

#[test]
fn test_fire_burns_wood_stuns_and_material_repairs() {
    let mut state = two_player_match(4);
    state.set_material(Side::Right, "steel").unwrap();
    run_countdown(&mut state);

    let dt = 1.0 / 60.0;
    let mut warned = false;
    let mut frames = 0;
    while state.last_event_message().is_none() {
        advance_with_parked_ball(&mut state, dt);
        warned |= state.scheduler.warning_active();
        frames += 1;
        assert!(frames < 700, "no event within one interval");
    }
    assert!(warned);
    assert_eq!(state.last_event_message(), Some("event: fire on the field"));
    assert_eq!(state.scheduler.warning_text(), "fire on the field in 1.0s");

    let left = state.player(Side::Left);
    assert!(left.vert.burned_out && left.horz.burned_out);
    assert!(left.stun_timer > FIRE_STUN_DURATION - 2.0 * dt);
    assert!(!left.vert.enabled && !left.horz.enabled);

    let right = state.player(Side::Right);
    assert!(!right.vert.burned_out && !right.horz.burned_out);
    assert_eq!(right.stun_timer, 0.0);

    // Stunned: intents are ignored
    let stuck = state.player(Side::Left).vert.pos;
    state.set_movement(Side::Left, 1.0, 1.0);
    advance_with_parked_ball(&mut state, dt);
    assert_eq!(state.player(Side::Left).vert.pos, stuck);

    // Stun wears off but the burned paddles stay inert
    for _ in 0..200 {
        advance_with_parked_ball(&mut state, dt);
    }
    let left = state.player(Side::Left);
    assert_eq!(left.stun_timer, 0.0);
    assert!(left.vert.enabled && left.vert.burned_out);
    state.set_movement(Side::Left, 1.0, 1.0);
    advance_with_parked_ball(&mut state, dt);
    assert_eq!(state.player(Side::Left).vert.pos, stuck);

    // Re-selecting any material repairs
    state.set_material(Side::Left, "wood").unwrap();
    state.set_movement(Side::Left, 1.0, 1.0);
    advance_with_parked_ball(&mut state, dt);
    let left = state.player(Side::Left);
    assert!(!left.vert.burned_out && !left.horz.burned_out);
    assert!(left.vert.pos.y > stuck.y);
}

#[test]
fn test_round_reset_clears_burns_and_stuns() {
    let mut state = two_player_match(5);
    run_countdown(&mut state);
    state.players[0].set_burned_out(true);
    state.players[0].set_stun(2.0);
    state.players[1].score = 2;

    state.reset_round();

    let left = state.player(Side::Left);
    assert!(!left.vert.burned_out && !left.horz.burned_out);
    assert_eq!(left.stun_timer, 0.0);
    assert_eq!(state.player(Side::Right).score, 2);
    assert_eq!(state.phase(), RoundPhase::Countdown);
    assert_eq!(state.ball.vel, Vec2::ZERO);
}

#[test]
fn test_events_frozen_outside_play() {
    let mut state = two_player_match(6);
    let start = state.scheduler.next_event_in();
    for _ in 0..30 {
        state.advance(MAX_FRAME_DT);
    }
    assert_eq!(state.phase(), RoundPhase::Countdown);
    assert_eq!(state.scheduler.next_event_in(), start);

    run_countdown(&mut state);
    state.toggle_pause();
    for _ in 0..30 {
        state.advance(MAX_FRAME_DT);
    }
    assert_eq!(state.scheduler.next_event_in(), start);
}

#[test]
fn test_injected_rng_is_reproducible() {
    let make = || {
        Match::with_rng(
            Settings::with_mode(MatchMode::Demo),
            MaterialTable::default(),
            Pcg64::seed_from_u64(77),
        )
        .unwrap()
    };
    let mut a = make();
    let mut b = make();
    for _ in 0..3000 {
        a.advance(1.0 / 60.0);
        b.advance(1.0 / 60.0);
    }
    assert_eq!(a.ball, b.ball);
    assert_eq!(a.players[0].score, b.players[0].score);
    assert_eq!(a.players[1].score, b.players[1].score);
}

#[test]
fn test_demo_match_stays_finite_and_in_bounds() {
    let mut state = Match::new(
        Settings::with_mode(MatchMode::Demo),
        MaterialTable::default(),
        2024,
    )
    .unwrap();
    state.set_material(Side::Left, "rubber").unwrap();
    let settings = state.settings().clone();
    for _ in 0..(60 * 90) {
        state.advance(1.0 / 60.0);
        assert!(state.ball.pos.is_finite() && state.ball.vel.is_finite());
        assert!(state.ball.pos.y >= settings.field_bottom);
        assert!(state.ball.pos.y <= settings.field_top);
        for player in &state.players {
            let half = player.vert.length / 2.0;
            assert!(player.vert.pos.y >= settings.field_bottom + half - 1e-3);
            assert!(player.vert.pos.y <= settings.field_top - half + 1e-3);
        }
        assert!(state.players[0].horz.pos.x < settings.center_x());
        assert!(state.players[1].horz.pos.x > settings.center_x());
    }
}

#[test]
fn test_out_of_range_settings_never_start_a_match() {
    for json in [
        r#"{ "vert_length": 700.0 }"#,
        r#"{ "max_frame_dt": -0.5 }"#,
        r#"{ "horz_center_gap": -100.0 }"#,
    ] {
        assert!(
            matches!(Settings::from_json(json), Err(SimError::InvalidSettings { .. })),
            "accepted {}",
            json
        );
    }

    let mut settings = Settings::with_mode(MatchMode::TwoPlayer);
    settings.horz_center_gap = -100.0;
    assert!(Match::new(settings, MaterialTable::default(), 9).is_err());
}
