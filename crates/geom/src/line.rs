use crate::{point, vector, Point, Vector};

/// Determinant magnitude under which two lines are treated as parallel.
///
/// The line equations are normalized, so this is the sine of the angle between them.
pub const PARALLEL_EPSILON: f32 = 1e-5;

/// A linear segment.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineSegment {
    pub from: Point,
    pub to: Point,
}

impl LineSegment {
    /// Sample the segment at t (expecting t between 0 and 1).
    #[inline]
    pub fn sample(&self, t: f32) -> Point {
        self.from.lerp(self.to, t)
    }

    #[inline]
    pub fn to_vector(&self) -> Vector {
        self.to - self.from
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.to_vector().length()
    }

    /// Returns this segment moved by a vector.
    #[inline]
    pub fn translate(&self, by: Vector) -> Self {
        LineSegment {
            from: self.from + by,
            to: self.to + by,
        }
    }

    /// The implicit equation of the line going through both endpoints.
    ///
    /// Returns `None` if the endpoints are equal.
    pub fn equation(&self) -> Option<LineEquation> {
        let a = self.from.y - self.to.y;
        let b = self.to.x - self.from.x;
        let c = self.from.x * self.to.y - self.to.x * self.from.y;

        if a == 0.0 && b == 0.0 {
            return None;
        }

        Some(LineEquation::new(a, b, c))
    }

    /// Intersection of the infinite lines supporting the two segments.
    pub fn line_intersection(&self, other: &Self) -> Option<Point> {
        self.equation()?.intersection(&other.equation()?)
    }
}

/// A line defined by the equation
/// `a * x + b * y + c = 0; a * a + b * b = 1`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct LineEquation {
    a: f32,
    b: f32,
    c: f32,
}

impl LineEquation {
    pub fn new(a: f32, b: f32, c: f32) -> Self {
        debug_assert!(a != 0.0 || b != 0.0);
        let div = 1.0 / f32::sqrt(a * a + b * b);
        LineEquation {
            a: a * div,
            b: b * div,
            c: c * div,
        }
    }

    #[inline]
    pub fn a(&self) -> f32 {
        self.a
    }

    #[inline]
    pub fn b(&self) -> f32 {
        self.b
    }

    #[inline]
    pub fn c(&self) -> f32 {
        self.c
    }

    #[inline]
    pub fn signed_distance_to_point(&self, p: &Point) -> f32 {
        self.a * p.x + self.b * p.y + self.c
    }

    #[inline]
    pub fn normal(&self) -> Vector {
        vector(self.a, self.b)
    }

    /// Solves the 2x2 system with Cramer's rule.
    ///
    /// Returns `None` when the lines are parallel or nearly so.
    pub fn intersection(&self, other: &Self) -> Option<Point> {
        let det = self.a * other.b - other.a * self.b;
        if det.abs() < PARALLEL_EPSILON {
            return None;
        }

        let inv_det = 1.0 / det;
        Some(point(
            (self.b * other.c - other.b * self.c) * inv_det,
            (other.a * self.c - self.a * other.c) * inv_det,
        ))
    }
}

/// Intersects the infinite lines supporting `l1` and `l2`.
///
/// Returns `None` if the lines are parallel or if one of the segments is a single point.
#[inline]
pub fn line_intersect(l1: &LineSegment, l2: &LineSegment) -> Option<Point> {
    l1.line_intersection(l2)
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point, b: Point, epsilon: f32) -> bool {
    f32::abs(a.x - b.x) <= epsilon && f32::abs(a.y - b.y) <= epsilon
}

#[test]
fn equation_contains_endpoints() {
    let segment = LineSegment {
        from: point(1.0, 2.0),
        to: point(-4.0, 7.5),
    };
    let eq = segment.equation().unwrap();

    assert!(eq.signed_distance_to_point(&segment.from).abs() < 1e-5);
    assert!(eq.signed_distance_to_point(&segment.to).abs() < 1e-5);
    assert!((eq.normal().length() - 1.0).abs() < 1e-5);
}

#[test]
fn intersection_rotated() {
    use core::f32::consts::PI;
    let epsilon = 0.0001;
    let count: u32 = 100;

    for i in 0..count {
        for j in 0..count {
            if i % (count / 2) == j % (count / 2) {
                // avoid the colinear case.
                continue;
            }

            let angle1 = i as f32 / (count as f32) * 2.0 * PI;
            let angle2 = j as f32 / (count as f32) * 2.0 * PI;

            let l1 = LineSegment {
                from: point(10.0 * angle1.cos(), 10.0 * angle1.sin()),
                to: point(-10.0 * angle1.cos(), -10.0 * angle1.sin()),
            };

            let l2 = LineSegment {
                from: point(10.0 * angle2.cos(), 10.0 * angle2.sin()),
                to: point(-10.0 * angle2.cos(), -10.0 * angle2.sin()),
            };

            let p = line_intersect(&l1, &l2).unwrap();
            assert!(fuzzy_eq_point(p, point(0.0, 0.0), epsilon));
        }
    }
}

#[test]
fn intersection_outside_of_segments() {
    let l1 = LineSegment {
        from: point(0.0, 0.0),
        to: point(1.0, 0.0),
    };
    let l2 = LineSegment {
        from: point(5.0, 3.0),
        to: point(5.0, 4.0),
    };

    assert!(fuzzy_eq_point(line_intersect(&l1, &l2).unwrap(), point(5.0, 0.0), 1e-5));
}

#[test]
fn parallel_lines() {
    let l1 = LineSegment {
        from: point(0.0, 0.0),
        to: point(10.0, 0.0),
    };
    let l2 = l1.translate(vector(0.0, 1.0));

    assert!(line_intersect(&l1, &l2).is_none());
    // Colinear.
    assert!(line_intersect(&l1, &l1.translate(vector(3.0, 0.0))).is_none());
}

#[test]
fn parallel_decision_ignores_segment_length() {
    let lines = |slope: f32, scale: f32| {
        let l1 = LineSegment {
            from: point(0.0, 0.0),
            to: point(10.0 * scale, 0.0),
        };
        let l2 = LineSegment {
            from: point(0.0, scale),
            to: point(10.0 * scale, scale * (1.0 + 10.0 * slope)),
        };
        (l1, l2)
    };

    for scale in [0.001, 1.0, 1000.0] {
        let (l1, l2) = lines(1e-6, scale);
        assert!(line_intersect(&l1, &l2).is_none(), "scale {}", scale);

        let (l1, l2) = lines(1e-3, scale);
        let p = line_intersect(&l1, &l2).unwrap();
        assert!((p.x / scale + 1000.0).abs() < 1.0, "scale {}: {:?}", scale, p);
    }
}

#[test]
fn degenerate_segment() {
    let p = LineSegment {
        from: point(2.0, 2.0),
        to: point(2.0, 2.0),
    };
    let l = LineSegment {
        from: point(0.0, 0.0),
        to: point(0.0, 10.0),
    };

    assert!(p.equation().is_none());
    assert!(line_intersect(&p, &l).is_none());
}
