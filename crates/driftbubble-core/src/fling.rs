//! Fling projection: turning a release velocity into a resting target and
//! spring parameters.
//!
//! A flung bubble always comes to rest against the horizontal edge its
//! velocity points toward. Its vertical travel is the release velocity
//! carried for the settle duration, eased by how far the bubble already is
//! from the left edge of the screen.

use crate::config::MotionConfig;
use crate::geometry::{rect_is_finite, size_is_valid};
use kurbo::{Point, Rect, Size, Vec2};

/// Spring parameters and resting point computed for a fling.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlingProjection {
    /// Resting center of the bubble.
    pub target: Point,
    /// Settle duration in seconds.
    pub duration: f64,
    /// Spring damping ratio.
    pub damping: f64,
    /// Initial spring velocity, in units of the distance to travel.
    pub initial_velocity: f64,
}

impl FlingProjection {
    /// A projection that leaves the bubble where it is.
    pub fn stationary(center: Point, motion: &MotionConfig) -> Self {
        Self {
            target: center,
            duration: motion.min_duration,
            damping: motion.max_damping,
            initial_velocity: 0.0,
        }
    }
}

/// Settle duration for a release speed, within `[min_duration, max_duration]`.
pub fn settle_duration(speed: f64, motion: &MotionConfig) -> f64 {
    let range = motion.max_duration - motion.min_duration;
    (speed / motion.reference_speed * range).clamp(motion.min_duration, motion.max_duration)
}

/// Spring damping for a release speed, within `[min_damping, max_damping]`.
pub fn settle_damping(speed: f64, motion: &MotionConfig) -> f64 {
    let range = motion.max_damping - motion.min_damping;
    (1.0 - speed / motion.reference_speed * range).clamp(motion.min_damping, motion.max_damping)
}

/// Horizontal resting center: flush against the edge the velocity points to.
pub fn target_x(vx: f64, half_width: f64, bounds: Rect) -> f64 {
    if vx > 0.0 {
        bounds.x1 - half_width
    } else {
        bounds.x0 + half_width
    }
}

/// Vertical resting center, kept inside the vertical bounds.
pub fn target_y(
    center: Point,
    vy: f64,
    duration: f64,
    half_height: f64,
    bounds: Rect,
    screen_width: f64,
) -> f64 {
    let eased = (screen_width - center.x) / screen_width;
    let projected = center.y + vy * duration * eased;
    let lo = bounds.y0 + half_height;
    let hi = bounds.y1 - half_height;
    if lo > hi {
        return hi;
    }
    projected.clamp(lo, hi)
}

/// Initial spring velocity: the release velocity scaled per axis by
/// `duration / screen dimension`, combined as a Euclidean norm.
pub fn initial_spring_velocity(velocity: Vec2, duration: f64, screen: Size) -> f64 {
    let vx = velocity.x * duration / screen.width;
    let vy = velocity.y * duration / screen.height;
    vx.hypot(vy)
}

/// Project a fling from the release velocity and the bubble's current center.
///
/// Any non-finite or degenerate input yields a stationary projection at
/// `center` so no invalid number reaches the animation sink.
pub fn project(
    velocity: Vec2,
    center: Point,
    size: Size,
    bounds: Rect,
    screen: Size,
    motion: &MotionConfig,
) -> FlingProjection {
    let degenerate = !velocity.is_finite()
        || !center.is_finite()
        || !size_is_valid(size)
        || !rect_is_finite(bounds)
        || !size_is_valid(screen)
        || screen.width <= 0.0
        || screen.height <= 0.0;
    if degenerate {
        log::debug!("Degenerate fling input, staying at {:?}", center);
        return FlingProjection::stationary(center, motion);
    }

    let speed = velocity.hypot();
    let duration = settle_duration(speed, motion);
    let damping = settle_damping(speed, motion);
    let target = Point::new(
        target_x(velocity.x, size.width / 2.0, bounds),
        target_y(center, velocity.y, duration, size.height / 2.0, bounds, screen.width),
    );

    FlingProjection {
        target,
        duration,
        damping,
        initial_velocity: initial_spring_velocity(velocity, duration, screen),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn screen() -> Size {
        Size::new(400.0, 800.0)
    }

    fn bounds() -> Rect {
        Rect::new(0.0, 0.0, 400.0, 800.0)
    }

    fn size() -> Size {
        Size::new(80.0, 80.0)
    }

    #[test]
    fn test_fling_to_right_edge() {
        let motion = MotionConfig::default();
        let p = project(Vec2::new(800.0, 0.0), Point::new(200.0, 400.0), size(), bounds(), screen(), &motion);
        assert!((p.target.x - 360.0).abs() < f64::EPSILON);
        assert!((p.target.y - 400.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_fling_to_left_edge() {
        let motion = MotionConfig::default();
        let p = project(Vec2::new(-300.0, 0.0), Point::new(200.0, 400.0), size(), bounds(), screen(), &motion);
        assert!((p.target.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vertical_projection_is_eased() {
        let motion = MotionConfig::default();
        // speed 2000 -> duration clamps to 0.3; eased by (400 - 100) / 400.
        let p = project(Vec2::new(0.0, 2000.0), Point::new(100.0, 200.0), size(), bounds(), screen(), &motion);
        let expected = 200.0 + 2000.0 * 0.3 * 0.75;
        assert!((p.target.y - expected).abs() < 1e-9);
        // vx == 0 is not "pointing right", so the bubble goes left.
        assert!((p.target.x - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_vertical_projection_clamped() {
        let motion = MotionConfig::default();
        let p = project(Vec2::new(10.0, 50_000.0), Point::new(100.0, 700.0), size(), bounds(), screen(), &motion);
        assert!((p.target.y - 760.0).abs() < f64::EPSILON);
        let p = project(Vec2::new(10.0, -50_000.0), Point::new(100.0, 100.0), size(), bounds(), screen(), &motion);
        assert!((p.target.y - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_duration_and_damping_ranges() {
        let motion = MotionConfig::default();
        for speed in [0.0, 1.0, 500.0, 2000.0, 3000.0, 4000.0, 1e6, f64::MAX] {
            let d = settle_duration(speed, &motion);
            let k = settle_damping(speed, &motion);
            assert!((0.3..=0.6).contains(&d), "duration {} for speed {}", d, speed);
            assert!((0.3..=0.5).contains(&k), "damping {} for speed {}", k, speed);
        }
        assert!((settle_duration(0.0, &motion) - 0.3).abs() < f64::EPSILON);
        assert!((settle_duration(1e6, &motion) - 0.6).abs() < f64::EPSILON);
        assert!((settle_damping(0.0, &motion) - 0.5).abs() < f64::EPSILON);
        assert!((settle_damping(1e6, &motion) - 0.3).abs() < f64::EPSILON);
    }

    #[test]
    fn test_initial_velocity() {
        let v = initial_spring_velocity(Vec2::new(800.0, 0.0), 0.3, screen());
        assert!((v - 0.6).abs() < 1e-12);
        let v = initial_spring_velocity(Vec2::new(400.0, 800.0), 0.5, screen());
        assert!((v - 2f64.sqrt() * 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_deterministic() {
        let motion = MotionConfig::default();
        let a = project(Vec2::new(1234.5, -987.6), Point::new(123.0, 456.0), size(), bounds(), screen(), &motion);
        let b = project(Vec2::new(1234.5, -987.6), Point::new(123.0, 456.0), size(), bounds(), screen(), &motion);
        assert_eq!(a.target.x.to_bits(), b.target.x.to_bits());
        assert_eq!(a.target.y.to_bits(), b.target.y.to_bits());
        assert_eq!(a.duration.to_bits(), b.duration.to_bits());
        assert_eq!(a.damping.to_bits(), b.damping.to_bits());
        assert_eq!(a.initial_velocity.to_bits(), b.initial_velocity.to_bits());
    }

    #[test]
    fn test_nan_velocity_is_stationary() {
        let motion = MotionConfig::default();
        let center = Point::new(150.0, 300.0);
        let p = project(Vec2::new(f64::NAN, 10.0), center, size(), bounds(), screen(), &motion);
        assert_eq!(p.target, center);
        assert!(p.initial_velocity.abs() < f64::EPSILON);
        assert!(p.duration.is_finite() && p.damping.is_finite());
    }

    #[test]
    fn test_zero_screen_is_stationary() {
        let motion = MotionConfig::default();
        let center = Point::new(150.0, 300.0);
        let p = project(Vec2::new(500.0, 10.0), center, size(), bounds(), Size::ZERO, &motion);
        assert_eq!(p.target, center);
    }
}
