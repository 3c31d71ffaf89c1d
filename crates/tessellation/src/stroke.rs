//! Path stroking.
//!
//! A path is first flattened into a sequence of points, each carrying the style of the edge
//! it belongs to. Every point then emits one vertex per rail, offset along the miter of its
//! two adjacent segments, and consecutive points are joined by bands. Repeated points, such
//! as the first sample of a curve, are offset like their neighbours and produce empty bands.
//! Path ends are butt caps.
//!
//! ## Counts
//!
//! With `n` flattened points, a hard stroke (zero penumbra) produces `2n` vertices and
//! `6(n - 1)` indices, an antialiased stroke `4n` vertices and `18(n - 1)` indices.

use crate::error::{GeometryBuilderError, TessellationResult};
use crate::geom::utils::segment_normal;
use crate::geom::{bezier_point, line_intersect, LineSegment};
use crate::geometry_builder::{with_geometry, Count, GeometryBuilder, MeshVertex, VertexId};
use crate::math::{Point, Vector};
use crate::path::{EdgeKind, EdgeStyle, Path};
use crate::ring::{add_bands, rail_color, stroke_rails};

/// A point of a flattened path with the style of the edge that produced it.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlattenedPoint {
    pub position: Point,
    pub style: EdgeStyle,
}

/// Iterator over the points of a flattened path.
///
/// The first point is the `move_to` point and takes the style of the first edge. Lines
/// produce their end point, curves produce `quality` samples at `t = 0, dt, 2 dt, ..., 1`.
/// Empty paths produce nothing.
#[derive(Clone)]
pub struct Flattened<'l> {
    path: &'l Path,
    edge: usize,
    step: u32,
    started: bool,
}

impl<'l> Flattened<'l> {
    pub fn new(path: &'l Path) -> Self {
        Flattened {
            path,
            edge: 0,
            step: 0,
            started: false,
        }
    }
}

impl<'l> Iterator for Flattened<'l> {
    type Item = FlattenedPoint;

    fn next(&mut self) -> Option<FlattenedPoint> {
        let edges = self.path.edges();
        let points = self.path.points();

        if !self.started {
            self.started = true;
            let first = edges.first()?;
            return Some(FlattenedPoint {
                position: points[0],
                style: first.style,
            });
        }

        let edge = edges.get(self.edge)?;
        let from = points[self.edge];
        let to = points[self.edge + 1];
        let style = edge.style;

        let step = self.step;
        let last = edge.flattened_len() - 1;
        if step >= last {
            self.edge += 1;
            self.step = 0;
        } else {
            self.step += 1;
        }

        let position = if step >= last {
            to
        } else if step == 0 {
            from
        } else {
            let t = step as f32 * style.dt;
            match edge.kind {
                EdgeKind::Line => from.lerp(to, t),
                EdgeKind::Quadratic { ctrl } => bezier_point(from, to, &[ctrl], t),
                EdgeKind::Cubic { ctrl1, ctrl2 } => bezier_point(from, to, &[ctrl1, ctrl2], t),
            }
        };

        Some(FlattenedPoint { position, style })
    }
}

/// Flattens a path.
pub fn flatten(path: &Path) -> Flattened {
    Flattened::new(path)
}

/// Vertex and index counts of a path stroke.
///
/// Saturates at `u32::MAX`.
pub fn path_count(path: &Path) -> Count {
    let n = path.flattened_len();
    if n == 0 {
        return Count::ZERO;
    }

    let rails: u32 = if path.penumbra() > 0.0 { 4 } else { 2 };
    Count {
        vertices: rails.saturating_mul(n),
        indices: (6 * (rails - 1)).saturating_mul(n - 1),
    }
}

/// Offsets `p` by `d` along the left side of the polyline `prev -> p -> next`.
///
/// Interior points use the intersection of the two offset segments. When they are parallel
/// or degenerate, the point is offset along the normal of the outgoing segment (or the
/// incoming one if the outgoing segment is degenerate).
pub fn miter_offset(prev: Option<Point>, p: Point, next: Option<Point>, d: f32) -> Point {
    let incoming = prev.map(|a| segment_normal(a, p));
    let outgoing = next.map(|b| segment_normal(p, b));

    if let (Some(a), Some(b), Some(n1), Some(n2)) = (prev, next, incoming, outgoing) {
        let l1 = LineSegment {
            from: a + n1 * d,
            to: p + n1 * d,
        };
        let l2 = LineSegment {
            from: p + n2 * d,
            to: b + n2 * d,
        };
        if let Some(intersection) = line_intersect(&l1, &l2) {
            return intersection;
        }
    }

    let normal = match (outgoing, incoming) {
        (Some(n), _) if n != Vector::zero() => n,
        (_, Some(n)) => n,
        (Some(n), None) => n,
        (None, None) => Vector::zero(),
    };

    p + normal * d
}

/// Tessellates the stroke of a path.
///
/// Empty paths produce nothing, not even a `begin_geometry`.
pub fn stroke_path(path: &Path, output: &mut dyn GeometryBuilder) -> TessellationResult<Count> {
    let n = path.flattened_len();
    if n == 0 {
        return Ok(Count::ZERO);
    }

    log::trace!("stroke path: {} points, penumbra {}", n, path.penumbra());

    let count = with_geometry(output, |output| stroke_points(path, n, output))?;
    debug_assert_eq!(count, path_count(path));

    Ok(count)
}

fn stroke_points(
    path: &Path,
    n: u32,
    output: &mut dyn GeometryBuilder,
) -> Result<(), GeometryBuilderError> {
    let penumbra = path.penumbra();
    let mut points = flatten(path);

    let mut current = match points.next() {
        Some(point) => point,
        None => return Ok(()),
    };
    // Last position different from the current one.
    let mut prev: Option<Point> = None;
    let mut prev_first: Option<(VertexId, u32)> = None;
    let mut index = 0;

    loop {
        let next = points.next();
        let u = index as f32 / (n - 1) as f32;
        let rails = stroke_rails(current.style.half_width(), penumbra);
        let next_position = match next {
            Some(point) if point.position != current.position => Some(point.position),
            Some(_) => points
                .clone()
                .map(|point| point.position)
                .find(|&position| position != current.position),
            None => None,
        };

        let mut first = VertexId::INVALID;
        for rail in &rails {
            let position = miter_offset(prev, current.position, next_position, rail.offset);
            let id = output.add_vertex(MeshVertex {
                position,
                color: rail_color(current.style.stroke_color, rail),
                uv: [u, rail.v],
            })?;
            if first == VertexId::INVALID {
                first = id;
            }
        }

        if let Some((a, rail_count)) = prev_first {
            debug_assert_eq!(rail_count, rails.len() as u32);
            add_bands(output, a, first, rail_count)?;
        }
        prev_first = Some((first, rails.len() as u32));

        match next {
            Some(next) => {
                if next.position != current.position {
                    prev = Some(current.position);
                }
                current = next;
                index += 1;
            }
            None => break,
        }
    }

    debug_assert_eq!(index + 1, n);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_builder::{Counter, Recorder};
    use crate::math::point;
    use crate::path::{Canvas, Color};

    fn approx_eq(a: Point, b: Point) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn flatten_lines_and_curves() {
        let mut canvas = Canvas::new();
        canvas.set_curve_quality(5).unwrap();
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.line_to(4.0, 0.0).unwrap();
        canvas.quadratic_curve_to(6.0, 0.0, 8.0, 0.0).unwrap();

        let points: Vec<Point> = flatten(&canvas.paths()[0]).map(|p| p.position).collect();
        assert_eq!(points.len(), 7);
        assert_eq!(points.len() as u32, canvas.paths()[0].flattened_len());
        assert_eq!(points[0], point(0.0, 0.0));
        assert_eq!(points[1], point(4.0, 0.0));
        // The curve starts with t = 0.
        assert_eq!(points[2], point(4.0, 0.0));
        assert!(approx_eq(points[3], point(5.0, 0.0)));
        assert!(approx_eq(points[4], point(6.0, 0.0)));
        assert!(approx_eq(points[5], point(7.0, 0.0)));
        assert_eq!(points[6], point(8.0, 0.0));
    }

    #[test]
    fn flatten_styles() {
        let mut canvas = Canvas::new();
        canvas.set_stroke_color(Color::WHITE);
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.set_stroke_color(Color::BLACK);
        canvas.set_curve_quality(3).unwrap();
        canvas.bezier_curve_to(1.0, 1.0, 2.0, 1.0, 3.0, 0.0).unwrap();
        canvas.set_stroke_color(Color::WHITE);
        canvas.line_to(4.0, 0.0).unwrap();

        let colors: Vec<Color> = flatten(&canvas.paths()[0])
            .map(|p| p.style.stroke_color)
            .collect();
        // The move_to point takes the style of the first edge.
        assert_eq!(
            colors,
            vec![Color::BLACK, Color::BLACK, Color::BLACK, Color::BLACK, Color::WHITE]
        );
    }

    #[test]
    fn empty_path() {
        let mut canvas = Canvas::new();
        canvas.move_to(1.0, 1.0).unwrap();
        let path = &canvas.paths()[0];
        assert_eq!(flatten(path).count(), 0);

        let mut counter = Counter::new();
        assert_eq!(stroke_path(path, &mut counter), Ok(Count::ZERO));
        assert_eq!(path_count(path), Count::ZERO);
    }

    #[test]
    fn single_segment_counts() {
        let mut canvas = Canvas::new();
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.line_to(10.0, 0.0).unwrap();
        canvas.set_penumbra(1.0).unwrap();
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.line_to(10.0, 0.0).unwrap();

        let mut counter = Counter::new();
        let hard = stroke_path(&canvas.paths()[0], &mut counter).unwrap();
        assert_eq!(hard, Count::new(4, 6));
        let soft = stroke_path(&canvas.paths()[1], &mut counter).unwrap();
        assert_eq!(soft, Count::new(8, 18));
    }

    #[test]
    fn curve_samples_include_both_ends() {
        let mut canvas = Canvas::new();
        canvas.set_curve_quality(20).unwrap();
        canvas.move_to(10.0, 10.0).unwrap();
        canvas.quadratic_curve_to(50.0, 80.0, 90.0, 10.0).unwrap();
        let path = &canvas.paths()[0];

        assert_eq!(flatten(path).count(), 21);
        assert_eq!(path_count(path), Count::new(42, 120));

        let mut counter = Counter::new();
        assert_eq!(stroke_path(path, &mut counter), Ok(Count::new(42, 120)));
    }

    #[test]
    fn repeated_points_are_offset_like_their_neighbours() {
        let mut canvas = Canvas::new();
        canvas.set_stroke_width(2.0).unwrap();
        canvas.set_curve_quality(3).unwrap();
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.quadratic_curve_to(5.0, 0.0, 10.0, 0.0).unwrap();
        canvas.quadratic_curve_to(10.0, 5.0, 10.0, 10.0).unwrap();

        let mut output = Recorder::default();
        stroke_path(&canvas.paths()[0], &mut output).unwrap();
        let positions: Vec<Point> = output.vertices.iter().map(|v| v.position).collect();
        assert_eq!(positions.len(), 14);

        // The move_to point and the first curve sample share a butt cap.
        assert_eq!(positions[0], point(0.0, 1.0));
        assert_eq!(positions[1], point(0.0, -1.0));
        assert_eq!(positions[2], point(0.0, 1.0));
        assert_eq!(positions[3], point(0.0, -1.0));

        // Both samples of the corner use the same miter.
        assert!(approx_eq(positions[6], point(9.0, 1.0)));
        assert!(approx_eq(positions[7], point(11.0, -1.0)));
        assert_eq!(positions[8], positions[6]);
        assert_eq!(positions[9], positions[7]);
        assert!(positions.iter().all(|p| p.x.is_finite() && p.y.is_finite()));
    }

    #[test]
    fn miter_square_corner() {
        // Left side of a path going right then down (y pointing down) is the outside.
        let p = miter_offset(
            Some(point(0.0, 0.0)),
            point(10.0, 0.0),
            Some(point(10.0, 10.0)),
            -1.0,
        );
        assert!(approx_eq(p, point(11.0, -1.0)));

        let p = miter_offset(
            Some(point(0.0, 0.0)),
            point(10.0, 0.0),
            Some(point(10.0, 10.0)),
            1.0,
        );
        assert!(approx_eq(p, point(9.0, 1.0)));
    }

    #[test]
    fn miter_collinear_fallback() {
        let p = miter_offset(
            Some(point(0.0, 0.0)),
            point(1.0, 0.0),
            Some(point(2.0, 0.0)),
            0.5,
        );
        assert!(p.x.is_finite() && p.y.is_finite());
        assert!(approx_eq(p, point(1.0, 0.5)));

        // Doubling back on itself.
        let p = miter_offset(
            Some(point(0.0, 0.0)),
            point(1.0, 0.0),
            Some(point(0.0, 0.0)),
            0.5,
        );
        assert!(p.x.is_finite() && p.y.is_finite());

        // Repeated points.
        let p = miter_offset(
            Some(point(1.0, 0.0)),
            point(1.0, 0.0),
            Some(point(1.0, 0.0)),
            0.5,
        );
        assert_eq!(p, point(1.0, 0.0));
    }

    #[test]
    fn collinear_path_is_finite() {
        let mut canvas = Canvas::new();
        canvas.set_penumbra(0.5).unwrap();
        canvas.move_to(0.0, 0.0).unwrap();
        canvas.line_to(1.0, 0.0).unwrap();
        canvas.line_to(2.0, 0.0).unwrap();
        canvas.line_to(2.0, 0.0).unwrap();

        let mut counter = Counter::new();
        let count = stroke_path(&canvas.paths()[0], &mut counter).unwrap();
        assert_eq!(count, Count::new(16, 54));
    }

    #[test]
    fn endpoints_are_butt() {
        let p = miter_offset(None, point(0.0, 0.0), Some(point(10.0, 0.0)), 2.0);
        assert_eq!(p, point(0.0, 2.0));
        let p = miter_offset(Some(point(0.0, 0.0)), point(10.0, 0.0), None, -2.0);
        assert_eq!(p, point(10.0, -2.0));
    }
}
