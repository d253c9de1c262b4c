//! Game tuning
//!
//! Every field falls back to the compile-time default in [`crate::consts`], so a
//! partial JSON document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Simulation tuning parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // === Timing ===
    /// Ticks per second the host drives `tick` at
    pub ticks_per_second: u32,
    /// Ticks the ball waits (blinking) at the start of a round
    pub serve_delay_ticks: u32,

    // === Ball ===
    pub ball_radius: f32,
    /// Ball speed at the start of every round
    pub ball_base_speed: f32,
    /// Speed added on every paddle hit
    pub ball_speed_increment: f32,

    // === Paddles ===
    pub paddle_width: i32,
    pub paddle_thickness: i32,
    pub paddle_speed: i32,
    /// Subtracted from `paddle_speed` when the AI moves
    pub paddle_handicap: i32,
    /// Gap between court edge and paddle row
    pub padding: i32,
    pub starting_lives: u32,

    // === AI ===
    /// Add a bounded random error to the AI's predicted intercept
    pub ai_jitter: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            ticks_per_second: TICKS_PER_SECOND,
            serve_delay_ticks: SERVE_DELAY_TICKS,

            ball_radius: BALL_RADIUS,
            ball_base_speed: BALL_BASE_SPEED,
            ball_speed_increment: BALL_SPEED_INCREMENT,

            paddle_width: PADDLE_WIDTH,
            paddle_thickness: PADDLE_THICKNESS,
            paddle_speed: PADDLE_SPEED,
            paddle_handicap: PADDLE_HANDICAP,
            padding: PADDING,
            starting_lives: STARTING_LIVES,

            ai_jitter: true,
        }
    }
}

impl SimConfig {
    /// Parse a (possibly partial) JSON config and sanitize it
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config.sanitized())
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Replace values the simulation cannot run with by their defaults
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();

        if self.ticks_per_second == 0 {
            log::warn!("ticks_per_second must be positive, using {}", defaults.ticks_per_second);
            self.ticks_per_second = defaults.ticks_per_second;
        }
        if !(self.ball_radius.is_finite() && self.ball_radius > 0.0) {
            log::warn!("ball_radius {} is invalid, using {}", self.ball_radius, defaults.ball_radius);
            self.ball_radius = defaults.ball_radius;
        }
        if !(self.ball_base_speed.is_finite() && self.ball_base_speed > 0.0) {
            log::warn!(
                "ball_base_speed {} is invalid, using {}",
                self.ball_base_speed,
                defaults.ball_base_speed
            );
            self.ball_base_speed = defaults.ball_base_speed;
        }
        if !(self.ball_speed_increment.is_finite() && self.ball_speed_increment >= 0.0) {
            // Speed must never shrink within a round
            log::warn!(
                "ball_speed_increment {} is invalid, using {}",
                self.ball_speed_increment,
                defaults.ball_speed_increment
            );
            self.ball_speed_increment = defaults.ball_speed_increment;
        }
        if self.paddle_width < 2 {
            log::warn!("paddle_width {} is too small, using {}", self.paddle_width, defaults.paddle_width);
            self.paddle_width = defaults.paddle_width;
        }
        if self.paddle_thickness < 1 {
            log::warn!(
                "paddle_thickness {} is too small, using {}",
                self.paddle_thickness,
                defaults.paddle_thickness
            );
            self.paddle_thickness = defaults.paddle_thickness;
        }
        if self.paddle_speed < 1 {
            log::warn!("paddle_speed {} is too small, using {}", self.paddle_speed, defaults.paddle_speed);
            self.paddle_speed = defaults.paddle_speed;
        }
        if self.paddle_handicap < 0 || self.paddle_handicap >= self.paddle_speed {
            log::warn!(
                "paddle_handicap {} must be in [0, {}), using 0",
                self.paddle_handicap,
                self.paddle_speed
            );
            self.paddle_handicap = 0;
        }
        if self.padding < 0 {
            log::warn!("padding {} is negative, using {}", self.padding, defaults.padding);
            self.padding = defaults.padding;
        }
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be positive, using {}", defaults.starting_lives);
            self.starting_lives = defaults.starting_lives;
        }

        self
    }

    /// Ticks per AI aim bucket
    pub fn aim_bucket_ticks(&self) -> u64 {
        AIM_BUCKET_SECONDS * self.ticks_per_second as u64
    }
}
