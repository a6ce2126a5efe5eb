//! Planar geometry for joint angles and limb vectors.

use nalgebra::Vector2;

use crate::types::Position2D;

/// Floor on the shoulder-hip distance used as normalization scale.
pub const MIN_TORSO_SCALE: f64 = 0.01;

/// Angle at vertex `b` between rays b→a and b→c, in degrees.
///
/// Uses the dot-product cosine rule with the cosine clamped to [-1, 1].
/// A zero-length ray yields 0.
pub fn angle_at(a: Position2D, b: Position2D, c: Position2D) -> f64 {
    let ba = Vector2::new(a.x - b.x, a.y - b.y);
    let bc = Vector2::new(c.x - b.x, c.y - b.y);

    let norms = ba.norm() * bc.norm();
    if norms < 1e-10 {
        return 0.0;
    }

    let cos = (ba.dot(&bc) / norms).clamp(-1.0, 1.0);
    cos.acos().to_degrees()
}

/// Torso-length normalization scale for a side, floored at [`MIN_TORSO_SCALE`].
pub fn torso_scale(shoulder: Position2D, hip: Position2D) -> f64 {
    shoulder.distance_to(&hip).max(MIN_TORSO_SCALE)
}

/// Offset from `b` to `a`, rescaled by the torso-length scale.
pub fn scaled_offset(a: Position2D, b: Position2D, scale: f64) -> [f64; 2] {
    [(a.x - b.x) / scale, (a.y - b.y) / scale]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_right_angle() {
        let a = Position2D::new(0.0, 1.0);
        let b = Position2D::origin();
        let c = Position2D::new(1.0, 0.0);
        assert!((angle_at(a, b, c) - 90.0).abs() < 1e-10);
    }

    #[test]
    fn test_straight_angle() {
        let a = Position2D::new(0.0, 1.0);
        let b = Position2D::origin();
        let c = Position2D::new(0.0, -1.0);
        assert!((angle_at(a, b, c) - 180.0).abs() < 1e-10);
    }

    #[test]
    fn test_angle_symmetric_in_rays() {
        let a = Position2D::new(2.0, 1.5);
        let b = Position2D::new(0.5, -0.25);
        let c = Position2D::new(-1.0, 3.0);
        assert!((angle_at(a, b, c) - angle_at(c, b, a)).abs() < 1e-12);
    }

    #[test]
    fn test_zero_length_ray_is_zero() {
        let b = Position2D::new(1.0, 1.0);
        let c = Position2D::new(2.0, 3.0);
        assert_eq!(angle_at(b, b, c), 0.0);
        assert_eq!(angle_at(c, b, b), 0.0);
    }

    #[test]
    fn test_collinear_same_direction() {
        let a = Position2D::new(1.0, 1.0);
        let b = Position2D::origin();
        let c = Position2D::new(2.0, 2.0);
        assert!(angle_at(a, b, c).abs() < 1e-6);
    }

    #[test]
    fn test_torso_scale_floor() {
        let p = Position2D::new(0.5, 0.5);
        assert_eq!(torso_scale(p, p), MIN_TORSO_SCALE);

        let shoulder = Position2D::new(0.0, 1.0);
        let hip = Position2D::origin();
        assert!((torso_scale(shoulder, hip) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_scaled_offset() {
        let a = Position2D::new(1.0, 3.0);
        let b = Position2D::new(0.0, 1.0);
        let v = scaled_offset(a, b, 2.0);
        assert_eq!(v, [0.5, 1.0]);
    }
}
