//! Paddle Duel - fixed-tick simulation core for a two-paddle ball game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddles, collisions, AI, match state)
//! - `input`: Touch/trackball mapping onto paddle destinations
//! - `config`: Data-driven game tuning

pub mod config;
pub mod input;
pub mod sim;

pub use config::SimConfig;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use std::f32::consts::PI;

    /// Fixed simulation rate
    pub const TICKS_PER_SECOND: u32 = 30;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 4.0;
    pub const BALL_BASE_SPEED: f32 = 4.0;
    /// Added to ball speed on every paddle hit
    pub const BALL_SPEED_INCREMENT: f32 = 1.0;
    /// Ticks the ball blinks in place after a round reset
    pub const SERVE_DELAY_TICKS: u32 = 60;

    /// Margin kept between the ball's heading and the horizontal axis (20°)
    pub const ANGLE_BOUND: f32 = PI / 9.0;
    /// Maximum spin added by an edge hit on a paddle
    pub const SALT: f32 = 4.0 * PI / 9.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 40;
    pub const PADDLE_THICKNESS: i32 = 10;
    pub const PADDLE_SPEED: i32 = 4;
    pub const PADDLE_HANDICAP: i32 = 0;
    pub const STARTING_LIVES: u32 = 3;

    /// Gap between the court edge and each paddle row
    pub const PADDING: i32 = 3;

    /// Trackball movement multiplier (pixels per trackball unit)
    pub const SCROLL_SENSITIVITY: f32 = 80.0;

    /// The AI re-rolls its aim error once per this many seconds
    pub const AIM_BUCKET_SECONDS: u64 = 10;
}

/// Normalize angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Velocity vector for a scalar speed travelling along `angle`
#[inline]
pub fn velocity_from(speed: f32, angle: f32) -> Vec2 {
    Vec2::new(speed * angle.cos(), speed * angle.sin())
}
