use crate::{Point, Vector};

/// `n!` as a float.
///
/// Bézier segments handled here are at most cubic, so the values stay tiny and exact.
pub fn factorial(n: u32) -> f32 {
    (2..=n).fold(1.0, |acc, k| acc * k as f32)
}

/// The binomial coefficient `C(n, i) = n! / (i! (n - i)!)`.
pub fn binomial(n: u32, i: u32) -> f32 {
    debug_assert!(i <= n);
    factorial(n) / (factorial(i) * factorial(n - i))
}

/// Sample a Bézier segment at `t` (expecting t between 0 and 1).
///
/// The degree of the segment is `ctrl.len() + 1`: no control point is a line, one is a
/// quadratic curve and two are a cubic curve. The position is the Bernstein sum
/// `Σ C(n, i) tⁱ (1 - t)ⁿ⁻ⁱ vᵢ` where `v₀ = from`, `vₙ = to` and the control points sit in
/// between.
pub fn bezier_point(from: Point, to: Point, ctrl: &[Point], t: f32) -> Point {
    let n = ctrl.len() as u32 + 1;
    if n == 1 {
        return from.lerp(to, t);
    }

    let one_t = 1.0 - t;
    let mut sum = Vector::zero();
    for i in 0..=n {
        let v = if i == 0 {
            from
        } else if i == n {
            to
        } else {
            ctrl[(i - 1) as usize]
        };

        let weight = binomial(n, i) * t.powi(i as i32) * one_t.powi((n - i) as i32);
        sum += v.to_vector() * weight;
    }

    sum.to_point()
}

#[cfg(test)]
fn fuzzy_eq_point(a: Point, b: Point, epsilon: f32) -> bool {
    (a - b).length() <= epsilon
}

#[test]
fn binomial_rows() {
    assert_eq!(factorial(0), 1.0);
    assert_eq!(factorial(3), 6.0);

    assert_eq!(binomial(2, 0), 1.0);
    assert_eq!(binomial(2, 1), 2.0);
    assert_eq!(binomial(2, 2), 1.0);

    assert_eq!(binomial(3, 0), 1.0);
    assert_eq!(binomial(3, 1), 3.0);
    assert_eq!(binomial(3, 2), 3.0);
    assert_eq!(binomial(3, 3), 1.0);
}

#[test]
fn linear_sample() {
    use crate::point;

    let p = bezier_point(point(0.0, 0.0), point(10.0, 4.0), &[], 0.25);
    assert!(fuzzy_eq_point(p, point(2.5, 1.0), 1e-6));
}

#[test]
fn quadratic_matches_closed_form() {
    use crate::point;

    let from = point(0.0, 0.0);
    let ctrl = point(5.0, 10.0);
    let to = point(10.0, 0.0);

    for i in 0..=10 {
        let t = i as f32 / 10.0;
        let one_t = 1.0 - t;
        let expected = (from.to_vector() * (one_t * one_t)
            + ctrl.to_vector() * (2.0 * one_t * t)
            + to.to_vector() * (t * t))
            .to_point();

        assert!(fuzzy_eq_point(bezier_point(from, to, &[ctrl], t), expected, 1e-4));
    }

    assert!(fuzzy_eq_point(bezier_point(from, to, &[ctrl], 0.5), point(5.0, 5.0), 1e-5));
}

#[test]
fn cubic_endpoints() {
    use crate::point;

    let from = point(1.0, 2.0);
    let to = point(-3.0, 7.0);
    let ctrl = [point(4.0, 4.0), point(0.0, -8.0)];

    assert!(fuzzy_eq_point(bezier_point(from, to, &ctrl, 0.0), from, 1e-6));
    assert!(fuzzy_eq_point(bezier_point(from, to, &ctrl, 1.0), to, 1e-6));

    // A cubic with evenly spread control points on a line is that line.
    let straight = [point(1.0, 1.0), point(2.0, 2.0)];
    let p = bezier_point(point(0.0, 0.0), point(3.0, 3.0), &straight, 0.5);
    assert!(fuzzy_eq_point(p, point(1.5, 1.5), 1e-5));
}
