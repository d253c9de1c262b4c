//! Computer-controlled paddle
//!
//! Predicts where the ball will cross the paddle's row by unfolding side-wall
//! reflections into one straight run of horizontal travel, then folding that run
//! back into the playable width. Perfect prediction is softened by a random aim
//! error that stays fixed for a few seconds at a time.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{AiParams, Ball, Court, MatchState, Paddle, Side};

/// X where the ball should meet `me`'s row, without aim error.
///
/// When the ball is moving away, its path is extended to the opponent's row and
/// back. Returns `None` when no prediction is possible (the ball is not moving
/// vertically, or the court is too narrow to play in).
pub fn predict_destination(ball: &Ball, me: &Paddle, opponent: &Paddle, court: Court) -> Option<i32> {
    let vel = ball.vel();
    if vel.y == 0.0 {
        return None;
    }

    let r = ball.radius;
    let play_width = court.width as f32 - 2.0 * r;
    if play_width <= 0.0 {
        return None;
    }

    let (x, y) = (ball.pos.x, ball.pos.y);
    let my_y = me.center_y() as f32;
    let opp_y = opponent.center_y() as f32;

    let my_dist = (y - my_y).abs();
    let opp_dist = (y - opp_y).abs();
    let paddle_dist = (my_y - opp_y).abs();

    let coming = (my_y < y && vel.y < 0.0) || (my_y > y && vel.y > 0.0);
    let vertical = if coming { my_dist } else { opp_dist + paddle_dist };
    let total = vertical / vel.y.abs() * vel.x.abs();

    let wall_dist = if ball.going_left() {
        x - r
    } else {
        play_width - x + r
    };

    // Travel left over after the first wall, folded into the playable width
    let remains = (total - wall_dist) % play_width;
    let bounces = (total / play_width) as i64;

    let left = if bounces % 2 == 0 {
        !ball.going_left()
    } else {
        ball.going_left()
    };

    let destination = if bounces == 0 {
        x + total * vel.x.signum()
    } else if left {
        r + remains
    } else {
        (r + play_width) - remains
    };

    Some(destination as i32)
}

/// Aim error in `[-w + w/10, w - w/10)` for paddle width `w`.
///
/// The generator is re-seeded from the match seed, the paddle row, the ball's
/// velocity and a coarse time bucket, so the error holds steady while the
/// ball keeps its course instead of shaking the paddle every tick.
pub fn aim_jitter(state: &MatchState, me: &Paddle) -> i32 {
    let width = me.width();
    let span = 2 * width - width / 5;
    if span <= 0 {
        return 0;
    }

    let vel = state.ball.vel();
    let bucket = state.time_ticks / state.config.aim_bucket_ticks().max(1);
    let key = (me.center_y() as f32 + vel.x + vel.y) as i64 + bucket as i64;
    let seed = state.seed ^ (key as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15);

    let mut rng = Pcg32::seed_from_u64(seed);
    rng.random_range(0..span) - width + width / 10
}

/// Steer `side`'s paddle for one tick
pub fn drive(state: &mut MatchState, side: Side, params: AiParams) {
    let court = state.court;

    if state.ball.is_serving() {
        let me = state.paddle_mut(side);
        me.destination = court.mid_x();
        me.step_handicapped();
        return;
    }

    let view: &MatchState = state;
    let (me, opponent) = (view.paddle(side), view.paddle(side.opponent()));
    let Some(mut destination) = predict_destination(&view.ball, me, opponent, court) else {
        return;
    };
    if params.imprecise {
        destination = destination.saturating_add(aim_jitter(view, me));
    }

    let me = state.paddle_mut(side);
    me.destination = destination;
    me.step_handicapped();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use crate::consts::*;
    use glam::Vec2;
    use std::f32::consts::PI;

    fn state() -> MatchState {
        let mut state = MatchState::new(Court::new(200, 400), SimConfig::default(), 42);
        state.ball.serve_counter = 0;
        state
    }

    #[test]
    fn test_direct_prediction_without_bounces() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        state.ball.set_angle(PI / 2.0 - 0.1); // down and slightly right

        let vel = state.ball.vel();
        let blue_y = state.blue.center_y() as f32;
        let total = (blue_y - 200.0) / vel.y.abs() * vel.x.abs();
        assert!(total < 200.0 - 2.0 * BALL_RADIUS - 100.0 + BALL_RADIUS);

        let predicted = predict_destination(&state.ball, &state.blue, &state.red, state.court);
        assert_eq!(predicted, Some((100.0 + total) as i32));
    }

    #[test]
    fn test_direct_prediction_moving_left() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        state.ball.set_angle(PI / 2.0 + 0.1);

        let vel = state.ball.vel();
        let blue_y = state.blue.center_y() as f32;
        let total = (blue_y - 200.0) / vel.y.abs() * vel.x.abs();

        let predicted = predict_destination(&state.ball, &state.blue, &state.red, state.court);
        assert_eq!(predicted, Some((100.0 - total) as i32));
    }

    #[test]
    fn test_prediction_folds_one_bounce() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        // Travel passes the right wall but stays under one playable width
        state.ball.set_angle(PI / 3.0);

        let vel = state.ball.vel();
        let blue_y = state.blue.center_y() as f32;
        let total = (blue_y - 200.0) / vel.y.abs() * vel.x.abs();
        let play_width = 200.0 - 2.0 * BALL_RADIUS;
        let wall_dist = play_width - 100.0 + BALL_RADIUS;
        assert!(total > wall_dist && total < play_width);

        // Zero full-width bounces still projects straight, even past the wall
        let predicted = predict_destination(&state.ball, &state.blue, &state.red, state.court);
        assert_eq!(predicted, Some((100.0 + total) as i32));
    }

    #[test]
    fn test_prediction_with_full_width_bounce() {
        let mut state = state();
        state.ball.pos = Vec2::new(50.0, 30.0);
        state.ball.set_angle(ANGLE_BOUND); // shallowest rightward heading

        let vel = state.ball.vel();
        let blue_y = state.blue.center_y() as f32;
        let total = (blue_y - 30.0) / vel.y.abs() * vel.x.abs();
        let play_width = 200.0 - 2.0 * BALL_RADIUS;
        let bounces = (total / play_width) as i64;
        assert!(bounces >= 1);

        let remains = (total - (play_width - 50.0 + BALL_RADIUS)) % play_width;
        // Heading right: an even bounce count is measured from the left wall
        let expected = if bounces % 2 == 0 {
            BALL_RADIUS + remains
        } else {
            (BALL_RADIUS + play_width) - remains
        };

        let predicted = predict_destination(&state.ball, &state.blue, &state.red, state.court);
        assert_eq!(predicted, Some(expected as i32));
    }

    #[test]
    fn test_receding_ball_uses_round_trip_distance() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        state.ball.set_angle(3.0 * PI / 2.0 + 0.05); // up, away from blue

        let vel = state.ball.vel();
        let red_y = state.red.center_y() as f32;
        let blue_y = state.blue.center_y() as f32;
        let total = ((200.0 - red_y) + (blue_y - red_y)) / vel.y.abs() * vel.x.abs();
        assert!(total < 200.0 - 2.0 * BALL_RADIUS - 100.0 + BALL_RADIUS);

        let predicted = predict_destination(&state.ball, &state.blue, &state.red, state.court);
        assert_eq!(predicted, Some((100.0 + total) as i32));
    }

    #[test]
    fn test_no_prediction_in_narrow_court() {
        let mut state = state();
        state.set_court(6, 400);
        assert_eq!(
            predict_destination(&state.ball, &state.blue, &state.red, state.court),
            None
        );
    }

    #[test]
    fn test_jitter_is_bounded_and_stable() {
        let mut state = state();
        let width = PADDLE_WIDTH;
        for tick in 0..2000 {
            state.time_ticks = tick;
            state.ball.set_angle(tick as f32 * 0.37);
            let jitter = aim_jitter(&state, &state.blue);
            assert!(jitter >= -width + width / 10);
            assert!(jitter < width - width / 10);
        }

        state.time_ticks = 10;
        let first = aim_jitter(&state, &state.red);
        state.time_ticks = 20;
        assert_eq!(aim_jitter(&state, &state.red), first);
    }

    #[test]
    fn test_serving_ball_recenters_ai() {
        let mut state = state();
        state.ball.serve_counter = 30;
        state.red.rect.offset_x(-50);

        drive(&mut state, Side::Red, AiParams::default());
        assert_eq!(state.red.destination, 100);
        assert_eq!(state.red.center_x(), 54);
    }

    #[test]
    fn test_drive_moves_toward_prediction() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        state.ball.set_angle(PI / 2.0 - 0.3);
        let expected = predict_destination(&state.ball, &state.blue, &state.red, state.court);

        drive(&mut state, Side::Blue, AiParams { imprecise: false });
        assert_eq!(Some(state.blue.destination), expected);
        let expected = expected.unwrap();
        assert_eq!(state.blue.center_x(), 100 + (expected - 100).clamp(-4, 4));
    }

    #[test]
    fn test_no_prediction_without_vertical_motion() {
        let mut state = state();
        state.ball.pos = Vec2::new(100.0, 200.0);
        state.ball.set_speed(0.0);
        assert_eq!(state.ball.vel().y, 0.0);
        assert_eq!(predict_destination(&state.ball, &state.blue, &state.red, state.court), None);

        state.blue.destination = 37;
        let rect = state.blue.rect;
        drive(&mut state, Side::Blue, AiParams::default());
        assert_eq!(state.blue.destination, 37);
        assert_eq!(state.blue.rect, rect);
    }
}
