//! Pointer input mapping
//!
//! Turns raw touch/trackball coordinates into paddle destinations, join-in
//! requests and pause toggles. Call between ticks.
//!
//! Layout (recomputed every round and on resize):
//! - red zone: top eighth of the court
//! - blue zone: bottom eighth of the court
//! - pause zone: square in the middle, half-size `min(w/4, h/4)`

use serde::{Deserialize, Serialize};

use crate::consts::SCROLL_SENSITIVITY;
use crate::sim::state::bound;
use crate::sim::{MatchState, PaddleController, Side};

/// Touch event phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TouchAction {
    Down,
    Move,
    Up,
}

/// One pointer of a (multi-)touch event, in court pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Apply a touch event. Returns false if the match ignores touches right now
/// (title demo or match over).
pub fn handle_touch(state: &mut MatchState, points: &[TouchPoint], action: TouchAction) -> bool {
    if !state.is_running() || state.title_showing() {
        return false;
    }

    for point in points {
        let (tx, ty) = (point.x as i32, point.y as i32);

        if state.blue.controller.is_human() && state.blue.touch_zone.contains(tx, ty) {
            state.blue.destination = tx;
        } else if state.red.controller.is_human() && state.red.touch_zone.contains(tx, ty) {
            state.red.destination = tx;
        } else if action == TouchAction::Down && state.pause_zone.contains(tx, ty) {
            state.toggle_pause();
            log::debug!("Pause toggled by touch, now {:?}", state.run_state());
        }

        // Touching an AI paddle's zone hands it to the player
        if action == TouchAction::Down {
            let joiner = [Side::Blue, Side::Red].into_iter().find(|&side| {
                let paddle = state.paddle(side);
                !paddle.controller.is_human() && paddle.touch_zone.contains(tx, ty)
            });
            if let Some(side) = joiner {
                state.set_controller(side, PaddleController::Human);
                log::info!("{:?} joined in", side);
            }
        }
    }

    true
}

/// Apply trackball motion. The trackball always drives blue and takes it
/// over from the AI on first use.
pub fn handle_trackball(state: &mut MatchState, action: TouchAction, dx: f32) -> bool {
    if !state.is_running() || state.title_showing() {
        return false;
    }

    let width = state.court.width as f32;
    let blue = &mut state.blue;
    if !blue.controller.is_human() {
        blue.controller = PaddleController::Human;
        blue.destination = blue.center_x();
    }

    if action == TouchAction::Move {
        let target = blue.destination as f32 + SCROLL_SENSITIVITY * dx;
        blue.destination = bound(target, 0.0, width) as i32;
    }

    true
}
