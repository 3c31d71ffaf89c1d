//! Vector helpers used to offset strokes.

use crate::{vector, Point, Vector};

/// Lengths under which a vector is considered degenerate.
const DEGENERATE_LENGTH: f32 = 1e-6;

/// Rotates a vector by 90 degrees (towards positive y for a vector pointing towards positive x).
#[inline]
pub fn perpendicular(v: Vector) -> Vector {
    vector(-v.y, v.x)
}

/// Normalizes a vector, returning the zero vector instead of NaNs for degenerate input.
#[inline]
pub fn normalize_or_zero(v: Vector) -> Vector {
    let length = v.length();
    if length < DEGENERATE_LENGTH {
        return Vector::zero();
    }

    v / length
}

/// Unit normal of the segment `from -> to`, or zero if both points are equal.
#[inline]
pub fn segment_normal(from: Point, to: Point) -> Vector {
    perpendicular(normalize_or_zero(to - from))
}

#[test]
fn perpendicular_is_orthogonal() {
    let v = vector(3.0, -2.0);
    assert_eq!(perpendicular(v).dot(v), 0.0);
    assert_eq!(perpendicular(vector(1.0, 0.0)), vector(0.0, 1.0));
}

#[test]
fn normalize_degenerate() {
    assert_eq!(normalize_or_zero(Vector::zero()), Vector::zero());
    let n = normalize_or_zero(vector(0.0, 5.0));
    assert_eq!(n, vector(0.0, 1.0));
}

#[test]
fn segment_normals() {
    use crate::point;

    let n = segment_normal(point(0.0, 0.0), point(4.0, 0.0));
    assert_eq!(n, vector(0.0, 1.0));
    assert_eq!(segment_normal(point(1.0, 1.0), point(1.0, 1.0)), Vector::zero());
}
