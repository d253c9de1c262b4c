//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Fixed per-tick ordering (red before blue)
//! - No rendering or platform dependencies

pub mod ai;
pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use ai::{aim_jitter, predict_destination};
pub use collision::{ball_paddle_collision, ball_wall_collision, push_out_of_paddle, resolve_bounces};
pub use geometry::{Rect, bound_angle, clamp_to_arc, in_permitted_arc};
pub use state::{
    AiParams, Ball, BallView, Court, GameEvent, MatchState, Paddle, PaddleController, PaddleView,
    RunState, Side, Snapshot, Winner,
};
pub use tick::{TickInput, tick};
