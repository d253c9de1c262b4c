//! Collision detection and response
//!
//! Side walls mirror the ball's horizontal motion. Paddles mirror its vertical
//! motion, add spin, and push the ball back out so it cannot stick inside.

use super::state::{Ball, Court, GameEvent, Paddle, Side};

/// True if the ball touches (or has been clamped against) a side wall
pub fn ball_wall_collision(ball: &Ball, court: Court) -> bool {
    ball.pos.x <= ball.radius || ball.pos.x >= court.width as f32 - ball.radius
}

/// Swept test: the paddle's vertical extent is grown by the ball radius on both
/// sides because a fast ball moves several pixels per tick
pub fn ball_paddle_collision(ball: &Ball, paddle: &Paddle) -> bool {
    let r = paddle.rect;
    let (x, y) = (ball.pos.x, ball.pos.y);
    x >= r.left as f32
        && x <= r.right as f32
        && y >= r.top as f32 - ball.radius
        && y <= r.bottom as f32 + ball.radius
}

/// Move the ball just outside the paddle's near face; no-op outside its span
pub fn push_out_of_paddle(ball: &mut Ball, paddle: &Paddle) {
    let r = paddle.rect;
    if ball.pos.x < r.left as f32 || ball.pos.x > r.right as f32 {
        return;
    }

    if ball.pos.y < r.top as f32 {
        ball.pos.y = ball.pos.y.min(r.top as f32 - ball.radius);
    } else if ball.pos.y > r.bottom as f32 {
        ball.pos.y = ball.pos.y.max(r.bottom as f32 + ball.radius);
    }
}

/// Bounce off a side wall, then nudge one pixel inward so the same wall does
/// not trigger again next tick
fn bounce_off_wall(ball: &mut Ball) {
    ball.bounce_wall();
    if ball.pos.x == ball.radius {
        ball.pos.x += 1.0;
    } else {
        ball.pos.x -= 1.0;
    }
}

/// Resolve wall and paddle bounces for the post-move position.
///
/// Only the paddle the ball is heading toward is tested. Returns the side whose
/// paddle was hit, if any.
pub fn resolve_bounces(
    ball: &mut Ball,
    red: &Paddle,
    blue: &Paddle,
    court: Court,
    events: &mut Vec<GameEvent>,
) -> Option<Side> {
    if ball_wall_collision(ball, court) {
        bounce_off_wall(ball);
        events.push(GameEvent::WallHit);
        log::debug!("Wall hit at ({:.1}, {:.1})", ball.pos.x, ball.pos.y);
    }

    let target = if ball.going_up() { red } else { blue };
    if ball_paddle_collision(ball, target) {
        ball.bounce_paddle(target);
        events.push(GameEvent::PaddleHit);
        log::debug!("{:?} paddle hit at x={:.1}", target.side, ball.pos.x);
        return Some(target.side);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SimConfig;
    use glam::Vec2;
    use std::f32::consts::PI;

    fn court() -> Court {
        Court::new(200, 400)
    }

    fn setup() -> (Ball, Paddle, Paddle) {
        let config = SimConfig::default();
        (
            Ball::new(&config),
            Paddle::new(Side::Red, court(), &config),
            Paddle::new(Side::Blue, court(), &config),
        )
    }

    #[test]
    fn test_paddle_collision_uses_radius_margin() {
        let (mut ball, _, blue) = setup();
        // Blue occupies y 387..397, x 80..120
        ball.pos = Vec2::new(100.0, 383.0);
        assert!(ball_paddle_collision(&ball, &blue));
        ball.pos = Vec2::new(100.0, 382.0);
        assert!(!ball_paddle_collision(&ball, &blue));
        ball.pos = Vec2::new(121.0, 390.0);
        assert!(!ball_paddle_collision(&ball, &blue));
    }

    #[test]
    fn test_push_out_above_paddle() {
        let (mut ball, _, blue) = setup();
        ball.pos = Vec2::new(100.0, 385.0);
        push_out_of_paddle(&mut ball, &blue);
        assert_eq!(ball.pos.y, 383.0);
    }

    #[test]
    fn test_push_out_below_paddle() {
        let (mut ball, red, _) = setup();
        // Red occupies y 3..13
        ball.pos = Vec2::new(100.0, 15.0);
        push_out_of_paddle(&mut ball, &red);
        assert_eq!(ball.pos.y, 17.0);
    }

    #[test]
    fn test_push_out_is_noop_outside_span() {
        let (mut ball, _, blue) = setup();
        ball.pos = Vec2::new(10.0, 385.0);
        push_out_of_paddle(&mut ball, &blue);
        assert_eq!(ball.pos, Vec2::new(10.0, 385.0));

        // Idempotent inside the span
        ball.pos = Vec2::new(100.0, 385.0);
        push_out_of_paddle(&mut ball, &blue);
        push_out_of_paddle(&mut ball, &blue);
        assert_eq!(ball.pos.y, 383.0);
    }

    #[test]
    fn test_wall_bounce_nudges_inward() {
        let (mut ball, red, blue) = setup();
        let mut events = Vec::new();
        ball.set_angle(3.0 * PI / 4.0);
        ball.pos = Vec2::new(ball.radius, 200.0);

        let hit = resolve_bounces(&mut ball, &red, &blue, court(), &mut events);
        assert_eq!(hit, None);
        assert_eq!(events, vec![GameEvent::WallHit]);
        assert_eq!(ball.pos.x, ball.radius + 1.0);
        assert!(ball.going_right());
    }

    #[test]
    fn test_right_wall_bounce() {
        let (mut ball, red, blue) = setup();
        let mut events = Vec::new();
        ball.set_angle(PI / 4.0);
        ball.pos = Vec2::new(196.0, 200.0);

        resolve_bounces(&mut ball, &red, &blue, court(), &mut events);
        assert_eq!(ball.pos.x, 195.0);
        assert!(ball.going_left());
    }

    #[test]
    fn test_only_approached_paddle_is_tested() {
        let (mut ball, red, blue) = setup();
        let mut events = Vec::new();
        // Overlapping blue but heading up, away from it
        ball.set_angle(3.0 * PI / 2.0);
        ball.pos = Vec2::new(100.0, 390.0);

        assert_eq!(resolve_bounces(&mut ball, &red, &blue, court(), &mut events), None);
        assert!(events.is_empty());

        ball.set_angle(PI / 2.0);
        assert_eq!(
            resolve_bounces(&mut ball, &red, &blue, court(), &mut events),
            Some(Side::Blue)
        );
        assert_eq!(events, vec![GameEvent::PaddleHit]);
        assert!(ball.going_up());
    }
}
