//! Collision detection and wall response for circular bodies
//!
//! Everything on the playfield is a circle inside an axis-aligned box, so
//! this stays small: circle/circle overlap plus per-axis wall handling.

use glam::Vec2;

/// Axis-aligned playfield bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            width: crate::consts::PLAYFIELD_WIDTH,
            height: crate::consts::PLAYFIELD_HEIGHT,
        }
    }
}

impl Bounds {
    /// Clamp a circle's centre so the whole circle stays inside
    pub fn clamp_circle(&self, pos: Vec2, radius: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(radius, self.width - radius),
            pos.y.clamp(radius, self.height - radius),
        )
    }

    /// Whether a circle's centre lies within `[radius, extent - radius]` on both axes
    pub fn contains_circle(&self, pos: Vec2, radius: f32) -> bool {
        pos.x >= radius
            && pos.x <= self.width - radius
            && pos.y >= radius
            && pos.y <= self.height - radius
    }
}

/// Circle/circle overlap. Touching circles do not collide.
#[inline]
pub fn circles_overlap(a_pos: Vec2, a_radius: f32, b_pos: Vec2, b_radius: f32) -> bool {
    a_pos.distance(b_pos) < a_radius + b_radius
}

/// Advance one axis with wall reflection
///
/// Returns the new coordinate and the (possibly negated) heading component.
/// If the tentative coordinate reaches either wall, the heading flips and the
/// step is recomputed from the old coordinate.
#[inline]
pub fn reflect_axis(pos: f32, heading: f32, speed: f32, radius: f32, extent: f32) -> (f32, f32) {
    let tentative = pos + heading * speed;
    if tentative <= radius || tentative >= extent - radius {
        let heading = -heading;
        (pos + heading * speed, heading)
    } else {
        (tentative, heading)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 15.0, Vec2::new(20.0, 0.0), 15.0));
        assert!(!circles_overlap(Vec2::ZERO, 15.0, Vec2::new(40.0, 0.0), 15.0));
    }

    #[test]
    fn test_touching_circles_do_not_collide() {
        assert!(!circles_overlap(Vec2::ZERO, 15.0, Vec2::new(30.0, 0.0), 15.0));
        assert!(!circles_overlap(Vec2::ZERO, 15.0, Vec2::new(0.0, 30.0), 15.0));
    }

    #[test]
    fn test_reflect_axis_free_movement() {
        let (pos, heading) = reflect_axis(100.0, 1.0, 3.0, 15.0, 800.0);
        assert!((pos - 103.0).abs() < 0.001);
        assert_eq!(heading, 1.0);
    }

    #[test]
    fn test_reflect_axis_bounces_off_far_wall() {
        // 784 + 3 = 787 crosses 800 - 15 = 785
        let (pos, heading) = reflect_axis(784.0, 1.0, 3.0, 15.0, 800.0);
        assert_eq!(heading, -1.0);
        assert!((pos - 781.0).abs() < 0.001);
    }

    #[test]
    fn test_reflect_axis_bounces_off_near_wall() {
        let (pos, heading) = reflect_axis(16.0, -0.5, 3.0, 15.0, 600.0);
        assert_eq!(heading, 0.5);
        assert!((pos - 17.5).abs() < 0.001);
    }

    #[test]
    fn test_clamp_circle() {
        let bounds = Bounds::default();
        let clamped = bounds.clamp_circle(Vec2::new(-50.0, 900.0), 15.0);
        assert_eq!(clamped, Vec2::new(15.0, 585.0));
        assert!(bounds.contains_circle(clamped, 15.0));
    }
}
