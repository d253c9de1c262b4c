//! Angle bounding and integer rectangles
//!
//! Angles follow screen convention: 0 points right, π/2 points down (+y) and
//! 3π/2 points up. The ball's heading always lives in one of two arcs:
//! - lower half: [BOUND, π - BOUND] (moving down)
//! - upper half: [π + BOUND, 2π - BOUND] (moving up)

use std::f32::consts::PI;

use serde::{Deserialize, Serialize};

use crate::consts::ANGLE_BOUND;

/// Clamp `angle` into the upper (`top = true`) or lower arc
#[inline]
pub fn clamp_to_arc(angle: f32, top: bool) -> f32 {
    if top {
        angle.clamp(PI + ANGLE_BOUND, 2.0 * PI - ANGLE_BOUND)
    } else {
        angle.clamp(ANGLE_BOUND, PI - ANGLE_BOUND)
    }
}

/// Clamp `angle` into the arc of the half it already lies in
#[inline]
pub fn bound_angle(angle: f32) -> f32 {
    clamp_to_arc(angle, angle >= PI)
}

/// Add `change` to `angle`, keeping the result on the half `angle` started on
#[inline]
pub fn bound_angle_offset(angle: f32, change: f32) -> f32 {
    clamp_to_arc(angle + change, angle >= PI)
}

/// True if `angle` lies inside one of the two permitted arcs
pub fn in_permitted_arc(angle: f32) -> bool {
    let lower = (ANGLE_BOUND..=PI - ANGLE_BOUND).contains(&angle);
    let upper = (PI + ANGLE_BOUND..=2.0 * PI - ANGLE_BOUND).contains(&angle);
    lower || upper
}

/// Axis-aligned integer rectangle (right/bottom exclusive for containment)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> i32 {
        ((i64::from(self.left) + i64::from(self.right)) >> 1) as i32
    }

    #[inline]
    pub fn center_y(&self) -> i32 {
        ((i64::from(self.top) + i64::from(self.bottom)) >> 1) as i32
    }

    pub fn is_empty(&self) -> bool {
        self.left >= self.right || self.top >= self.bottom
    }

    /// Half-open point test; empty rects contain nothing
    pub fn contains(&self, x: i32, y: i32) -> bool {
        !self.is_empty() && x >= self.left && x < self.right && y >= self.top && y < self.bottom
    }

    /// Shift horizontally by `dx`
    pub fn offset_x(&mut self, dx: i32) {
        self.left += dx;
        self.right += dx;
    }

    /// Move vertically so the top edge sits at `top`, keeping height
    pub fn set_top(&mut self, top: i32) {
        let height = self.height();
        self.top = top;
        self.bottom = top + height;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_to_lower_arc() {
        assert_eq!(clamp_to_arc(0.0, false), ANGLE_BOUND);
        assert_eq!(clamp_to_arc(PI, false), PI - ANGLE_BOUND);
        assert_eq!(clamp_to_arc(PI / 2.0, false), PI / 2.0);
    }

    #[test]
    fn test_clamp_to_upper_arc() {
        assert_eq!(clamp_to_arc(PI, true), PI + ANGLE_BOUND);
        assert_eq!(clamp_to_arc(2.0 * PI, true), 2.0 * PI - ANGLE_BOUND);
        assert_eq!(clamp_to_arc(3.0 * PI / 2.0, true), 3.0 * PI / 2.0);
    }

    #[test]
    fn test_bound_angle_uses_starting_half() {
        // Nearly horizontal leftward, lower half
        assert_eq!(bound_angle(PI - 0.01), PI - ANGLE_BOUND);
        // Exactly π counts as the upper half
        assert_eq!(bound_angle(PI), PI + ANGLE_BOUND);
    }

    #[test]
    fn test_offset_cannot_cross_halves() {
        // A large positive spin on a downward angle stays downward
        let a = bound_angle_offset(PI / 2.0, PI);
        assert_eq!(a, PI - ANGLE_BOUND);
        // A large negative spin on an upward angle stays upward
        let a = bound_angle_offset(3.0 * PI / 2.0, -PI);
        assert_eq!(a, PI + ANGLE_BOUND);
    }

    #[test]
    fn test_rect_centers_and_contains() {
        let r = Rect::new(80, 3, 120, 13);
        assert_eq!(r.center_x(), 100);
        assert_eq!(r.center_y(), 8);
        assert!(r.contains(80, 3));
        assert!(!r.contains(120, 3));
        assert!(!r.contains(100, 13));
        assert!(!Rect::new(0, 0, 0, 10).contains(0, 0));
    }

    #[test]
    fn test_rect_moves() {
        let mut r = Rect::new(80, 3, 120, 13);
        r.offset_x(-5);
        assert_eq!((r.left, r.right), (75, 115));
        r.set_top(50);
        assert_eq!((r.top, r.bottom), (50, 60));
    }
}
