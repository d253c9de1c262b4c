//! Fixed timestep simulation tick
//!
//! Core game loop that advances the match deterministically. Order within a
//! tick is fixed: round reset, ball, paddles, miss check, bounces.

use super::ai;
use super::collision::resolve_bounces;
use super::state::{AiParams, GameEvent, MatchState, PaddleController, Side};

/// Input applied at the start of a tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// New destination for the red paddle (ignored while AI-controlled)
    pub red_destination: Option<i32>,
    /// New destination for the blue paddle (ignored while AI-controlled)
    pub blue_destination: Option<i32>,
    /// Pause toggle
    pub toggle_pause: bool,
}

/// Advance the match by one fixed timestep.
///
/// Events raised during the tick replace those of the previous one in
/// `state.events`.
pub fn tick(state: &mut MatchState, input: &TickInput) {
    state.events.clear();

    for (side, destination) in [
        (Side::Red, input.red_destination),
        (Side::Blue, input.blue_destination),
    ] {
        if let Some(x) = destination {
            let paddle = state.paddle_mut(side);
            if paddle.controller.is_human() {
                paddle.destination = x;
            }
        }
    }

    if input.toggle_pause {
        state.toggle_pause();
    }

    // Nothing to simulate on an empty court, while paused, or after the match
    if state.court.is_degenerate() || state.is_paused() || state.is_over() {
        return;
    }

    // The reset consumes the tick so the serve delay starts in full
    if state.new_round {
        state.next_round();
        state.new_round = false;
        return;
    }

    state.time_ticks += 1;

    let prev_y = state.ball.pos.y;
    state.ball.advance(state.court);
    // Shake it up if the ball made no vertical progress
    if state.ball.pos.y == prev_y {
        state.ball.randomize_angle(&mut state.rng);
    }

    for side in [Side::Red, Side::Blue] {
        match controller_for(state, side) {
            PaddleController::Human => state.paddle_mut(side).step_full(),
            PaddleController::Ai(params) => ai::drive(state, side, params),
        }
    }

    check_miss(state);

    let hit = resolve_bounces(
        &mut state.ball,
        &state.red,
        &state.blue,
        state.court,
        &mut state.events,
    );
    if hit.is_some() {
        let speed = state.ball.speed() + state.config.ball_speed_increment;
        state.ball.set_speed(speed);
    }
}

/// The title demo plays both sides itself
fn controller_for(state: &MatchState, side: Side) -> PaddleController {
    let controller = state.paddle(side).controller;
    if state.title_showing() && controller.is_human() {
        PaddleController::Ai(AiParams {
            imprecise: state.config.ai_jitter,
        })
    } else {
        controller
    }
}

/// Ball past the bottom edge costs blue a life, past the top edge costs red one
fn check_miss(state: &mut MatchState) {
    let y = state.ball.pos.y;
    let loser = if y >= state.court.height as f32 {
        Side::Blue
    } else if y <= 0.0 {
        Side::Red
    } else {
        return;
    };

    state.new_round = true;
    let paddle = state.paddle_mut(loser);
    paddle.lose_life();
    let lives = paddle.lives();

    if lives > 0 || state.title_showing() {
        log::debug!("{:?} missed, {} lives left", loser, lives);
        state.events.push(GameEvent::Miss);
    } else {
        log::info!("{:?} wins", loser.opponent());
        state.events.push(GameEvent::Win);
    }
}
