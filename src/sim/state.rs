//! Match state and core simulation types
//!
//! Everything a tick reads or writes lives in [`MatchState`]; the presentation
//! layer only ever sees a [`Snapshot`].

use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::push_out_of_paddle;
use super::geometry::{Rect, bound_angle, bound_angle_offset};
use crate::config::SimConfig;
use crate::consts::SALT;
use crate::{normalize_angle, velocity_from};

/// `max(lo, min(x, hi))`; unlike `f32::clamp` this never panics on an inverted range
#[inline]
pub(crate) fn bound(x: f32, lo: f32, hi: f32) -> f32 {
    lo.max(x.min(hi))
}

/// Playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub width: i32,
    pub height: i32,
}

impl Court {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// A court with no area cannot be simulated
    pub fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub fn mid_x(&self) -> i32 {
        self.width / 2
    }

    #[inline]
    pub fn mid_y(&self) -> i32 {
        self.height / 2
    }
}

/// Which paddle: red defends the top edge, blue the bottom edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Red,
    Blue,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Red => Side::Blue,
            Side::Blue => Side::Red,
        }
    }
}

/// Run state; `Stopped` is a pause
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RunState {
    Running,
    Stopped,
}

/// Match outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Winner {
    /// Match still in progress (or title demo)
    None,
    Red,
    Blue,
    /// Both sides ran out of lives
    Draw,
}

/// Fire-and-forget signals for sound hooks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    PaddleHit,
    /// A side lost a life but is still alive (or the title demo is running)
    Miss,
    /// A side lost its last life
    Win,
}

/// Tuning for a computer-controlled paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiParams {
    /// Add a bounded random error to the predicted intercept
    pub imprecise: bool,
}

impl Default for AiParams {
    fn default() -> Self {
        Self { imprecise: true }
    }
}

/// Who steers a paddle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleController {
    /// Destination written from outside (touch, trackball, TickInput)
    Human,
    /// Destination written by the predictor every tick
    Ai(AiParams),
}

impl PaddleController {
    pub fn is_human(&self) -> bool {
        matches!(self, PaddleController::Human)
    }
}

/// The ball
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    pub pos: Vec2,
    pub radius: f32,
    /// Ticks left before the ball starts moving
    pub serve_counter: u32,
    vel: Vec2,
    speed: f32,
    /// Heading in [0, 2π), always inside a permitted arc
    angle: f32,
}

impl Ball {
    pub fn new(config: &SimConfig) -> Self {
        let mut ball = Self {
            pos: Vec2::ZERO,
            radius: config.ball_radius,
            serve_counter: 0,
            vel: Vec2::ZERO,
            speed: config.ball_base_speed,
            angle: 0.0,
        };
        ball.set_angle(PI / 2.0);
        ball
    }

    #[inline]
    pub fn vel(&self) -> Vec2 {
        self.vel
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    /// Center the ball, pick a new heading, restore base speed and start the serve delay
    pub fn reset(&mut self, court: Court, config: &SimConfig, rng: &mut impl Rng) {
        self.pos = Vec2::new(court.mid_x() as f32, court.mid_y() as f32);
        self.speed = config.ball_base_speed;
        self.randomize_angle(rng);
        self.serve_counter = config.serve_delay_ticks;
    }

    pub fn randomize_angle(&mut self, rng: &mut impl Rng) {
        let angle = TAU * rng.random::<f32>();
        self.set_angle(angle);
    }

    /// Set heading, wrapped into [0, 2π) and clamped into its arc
    pub fn set_angle(&mut self, angle: f32) {
        self.angle = bound_angle(normalize_angle(angle));
        self.vel = velocity_from(self.speed, self.angle);
    }

    pub fn set_speed(&mut self, speed: f32) {
        self.speed = speed;
        self.vel = velocity_from(self.speed, self.angle);
    }

    pub fn is_serving(&self) -> bool {
        self.serve_counter > 0
    }

    /// Blink while serving: visible on odd tens of the counter
    pub fn is_visible(&self) -> bool {
        self.serve_counter == 0 || (self.serve_counter / 10) % 2 == 1
    }

    pub fn going_up(&self) -> bool {
        self.angle >= PI
    }

    pub fn going_down(&self) -> bool {
        !self.going_up()
    }

    pub fn going_left(&self) -> bool {
        self.angle <= 3.0 * PI / 2.0 && self.angle > PI / 2.0
    }

    pub fn going_right(&self) -> bool {
        !self.going_left()
    }

    /// One tick of motion; serving balls only count down
    pub fn advance(&mut self, court: Court) {
        if self.serve_counter > 0 {
            self.serve_counter -= 1;
            return;
        }
        self.pos.x = bound(self.pos.x + self.vel.x, self.radius, court.width as f32 - self.radius);
        self.pos.y += self.vel.y;
    }

    /// Mirror horizontal motion off a side wall
    pub fn bounce_wall(&mut self) {
        self.set_angle(3.0 * PI - self.angle);
    }

    /// Mirror vertical motion off a paddle, add spin from the hit offset and
    /// push the ball back outside the paddle
    pub fn bounce_paddle(&mut self, paddle: &Paddle) {
        let reflected = (if self.going_up() {
            4.0 * PI - self.angle
        } else {
            2.0 * PI - self.angle
        }) % TAU;

        let salted = self.salt(reflected, paddle);
        push_out_of_paddle(self, paddle);
        self.set_angle(salted);
    }

    /// Spin proportional to how far from the paddle center the ball struck
    fn salt(&self, angle: f32, paddle: &Paddle) -> f32 {
        let cx = paddle.rect.center_x() as f32;
        let half_width = (paddle.width() / 2) as f32;
        let change = if self.going_up() {
            SALT * ((cx - self.pos.x) / half_width)
        } else {
            SALT * ((self.pos.x - cx) / half_width)
        };
        bound_angle_offset(angle, change)
    }
}

/// A paddle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub side: Side,
    pub rect: Rect,
    /// Screen area whose touches steer this paddle
    pub touch_zone: Rect,
    /// X the paddle center is moving toward
    pub destination: i32,
    pub controller: PaddleController,
    speed: i32,
    handicap: i32,
    lives: u32,
}

impl Paddle {
    pub fn new(side: Side, court: Court, config: &SimConfig) -> Self {
        let mut paddle = Self {
            side,
            rect: Rect::default(),
            touch_zone: Rect::default(),
            destination: court.mid_x(),
            controller: PaddleController::Ai(AiParams {
                imprecise: config.ai_jitter,
            }),
            speed: config.paddle_speed,
            handicap: config.paddle_handicap,
            lives: config.starting_lives,
        };
        paddle.reset(court, config);
        paddle
    }

    /// Top edge of this side's row
    fn row_top(side: Side, court: Court, config: &SimConfig) -> i32 {
        match side {
            Side::Red => config.padding,
            Side::Blue => court
                .height
                .saturating_sub(config.padding)
                .saturating_sub(config.paddle_thickness),
        }
    }

    fn zone_for(side: Side, court: Court) -> Rect {
        match side {
            Side::Red => Rect::new(0, 0, court.width, court.height / 8),
            Side::Blue => {
                let top = (7 * i64::from(court.height) / 8) as i32;
                Rect::new(0, top, court.width, court.height)
            }
        }
    }

    /// Round start: recenter, aim at the middle; lives and controller are kept
    pub fn reset(&mut self, court: Court, config: &SimConfig) {
        let mid = court.mid_x();
        let top = Self::row_top(self.side, court, config);
        let half = config.paddle_width / 2;
        self.rect = Rect::new(mid - half, top, mid + half, top + config.paddle_thickness);
        self.touch_zone = Self::zone_for(self.side, court);
        self.destination = mid;
    }

    /// Court resized mid-round: move to the new row, keep horizontal position
    pub fn fit_court(&mut self, court: Court, config: &SimConfig) {
        self.rect.set_top(Self::row_top(self.side, court, config));
        self.touch_zone = Self::zone_for(self.side, court);
        self.destination = self.destination.clamp(0, court.width.max(0));
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.rect.width()
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        self.rect.center_x()
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        self.rect.center_y()
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn handicap(&self) -> i32 {
        self.handicap
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    /// Ignored unless positive
    pub fn set_speed(&mut self, speed: i32) {
        if speed > 0 {
            self.speed = speed;
        }
    }

    /// Ignored unless `0 <= handicap < speed`
    pub fn set_handicap(&mut self, handicap: i32) {
        if (0..self.speed).contains(&handicap) {
            self.handicap = handicap;
        }
    }

    pub fn is_living(&self) -> bool {
        self.lives > 0
    }

    pub fn lose_life(&mut self) {
        self.lives = self.lives.saturating_sub(1);
    }

    pub(crate) fn restore_lives(&mut self, lives: u32) {
        self.lives = lives;
    }

    /// Move the center at most `step` pixels toward `destination`, never past it
    pub fn step(&mut self, step: i32) {
        let cx = self.center_x();
        let dx = cx.abs_diff(self.destination).min(step.max(0) as u32) as i32;

        if self.destination < cx {
            self.rect.offset_x(-dx);
        } else if self.destination > cx {
            self.rect.offset_x(dx);
        }
    }

    pub fn step_full(&mut self) {
        self.step(self.speed);
    }

    pub fn step_handicapped(&mut self) {
        self.step(self.speed - self.handicap);
    }
}

/// Complete match state (single owner, advanced by [`super::tick`])
#[derive(Debug, Clone)]
pub struct MatchState {
    pub court: Court,
    pub config: SimConfig,
    pub ball: Ball,
    pub red: Paddle,
    pub blue: Paddle,
    /// Touching here toggles pause
    pub pause_zone: Rect,
    /// Simulation tick counter (advanced ticks only)
    pub time_ticks: u64,
    /// Events raised by the most recent tick
    pub events: Vec<GameEvent>,
    /// Seed for aim jitter and serve angles
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) new_round: bool,
    current: RunState,
    last: RunState,
    title_showing: bool,
}

impl MatchState {
    /// Create a running match with the opening round already served
    pub fn new(court: Court, config: SimConfig, seed: u64) -> Self {
        let config = config.sanitized();
        let mut state = Self {
            court,
            ball: Ball::new(&config),
            red: Paddle::new(Side::Red, court, &config),
            blue: Paddle::new(Side::Blue, court, &config),
            config,
            pause_zone: Rect::default(),
            time_ticks: 0,
            events: Vec::new(),
            seed,
            rng: Pcg32::seed_from_u64(seed),
            new_round: false,
            current: RunState::Running,
            last: RunState::Stopped,
            title_showing: false,
        };
        state.next_round();
        state
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Red => &self.red,
            Side::Blue => &self.blue,
        }
    }

    pub fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Red => &mut self.red,
            Side::Blue => &mut self.blue,
        }
    }

    pub fn set_controller(&mut self, side: Side, controller: PaddleController) {
        self.paddle_mut(side).controller = controller;
    }

    /// Reset ball and paddles for a new round; lives are untouched
    pub(crate) fn next_round(&mut self) {
        self.pause_zone = Self::pause_zone_for(self.court);
        self.red.reset(self.court, &self.config);
        self.blue.reset(self.court, &self.config);
        self.ball.reset(self.court, &self.config, &mut self.rng);
        log::debug!(
            "New round: red={} blue={} lives",
            self.red.lives(),
            self.blue.lives()
        );
    }

    fn pause_zone_for(court: Court) -> Rect {
        let min = (court.width / 4).min(court.height / 4);
        let (xmid, ymid) = (court.mid_x(), court.mid_y());
        Rect::new(xmid - min, ymid - min, xmid + min, ymid + min)
    }

    /// Restore lives and start over, leaving a pause only if one was requested
    pub fn new_game(&mut self) {
        let lives = self.config.starting_lives;
        self.red.restore_lives(lives);
        self.blue.restore_lives(lives);
        self.next_round();
        self.new_round = false;
        self.resume();
        log::info!("New game: {} lives each", lives);
    }

    /// Apply a new playfield size; safe to call at any time
    pub fn set_court(&mut self, width: i32, height: i32) {
        self.court = Court::new(width, height);
        self.pause_zone = Self::pause_zone_for(self.court);
        self.red.fit_court(self.court, &self.config);
        self.blue.fit_court(self.court, &self.config);

        let r = self.ball.radius;
        self.ball.pos.x = bound(self.ball.pos.x, r, width as f32 - r);
        self.ball.pos.y = bound(self.ball.pos.y, 0.0, height as f32);
        log::debug!("Court resized to {}x{}", width, height);
    }

    pub fn run_state(&self) -> RunState {
        self.current
    }

    pub fn is_paused(&self) -> bool {
        self.current == RunState::Stopped
    }

    /// Pause unless the title demo is showing
    pub fn pause(&mut self) {
        if !self.title_showing && self.current != RunState::Stopped {
            self.last = self.current;
            self.current = RunState::Stopped;
        }
    }

    /// Return to the state held before the pause
    pub fn resume(&mut self) {
        if self.current == RunState::Stopped {
            self.current = match self.last {
                RunState::Stopped => RunState::Running,
                last => last,
            };
            self.last = RunState::Stopped;
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.resume();
        } else {
            self.pause();
        }
    }

    pub fn title_showing(&self) -> bool {
        self.title_showing
    }

    /// The demo still costs lives, so leaving it restores them for a fresh match
    pub fn set_show_title(&mut self, showing: bool) {
        if self.title_showing && !showing {
            let lives = self.config.starting_lives;
            self.red.restore_lives(lives);
            self.blue.restore_lives(lives);
        }
        self.title_showing = showing;
    }

    /// True while ticks still advance the match
    pub fn is_running(&self) -> bool {
        self.title_showing || (self.red.is_living() && self.blue.is_living())
    }

    pub fn is_over(&self) -> bool {
        !self.is_running()
    }

    pub fn winner(&self) -> Winner {
        if self.is_running() {
            return Winner::None;
        }
        match (self.red.is_living(), self.blue.is_living()) {
            (true, false) => Winner::Red,
            (false, true) => Winner::Blue,
            _ => Winner::Draw,
        }
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            ball: BallView {
                x: self.ball.pos.x,
                y: self.ball.pos.y,
                radius: self.ball.radius,
                visible: self.ball.is_visible(),
                speed: self.ball.speed(),
            },
            red: PaddleView::from(&self.red),
            blue: PaddleView::from(&self.blue),
            run_state: self.current,
            title_showing: self.title_showing,
            winner: self.winner(),
            events: self.events.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BallView {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub visible: bool,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaddleView {
    pub side: Side,
    pub rect: Rect,
    pub lives: u32,
    pub human: bool,
}

impl From<&Paddle> for PaddleView {
    fn from(paddle: &Paddle) -> Self {
        Self {
            side: paddle.side,
            rect: paddle.rect,
            lives: paddle.lives(),
            human: paddle.controller.is_human(),
        }
    }
}

/// Everything a renderer or sound layer needs after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub ball: BallView,
    pub red: PaddleView,
    pub blue: PaddleView,
    pub run_state: RunState,
    pub title_showing: bool,
    pub winner: Winner,
    pub events: Vec<GameEvent>,
}
