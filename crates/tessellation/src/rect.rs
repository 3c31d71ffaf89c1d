//! Axis-aligned rectangles.
//!
//! The outline has four samples, clockwise from the top-left corner (y pointing down).
//! Offsetting a corner moves it along its diagonal so that both adjacent sides move by the
//! same distance, which makes every join a square miter.

use crate::error::TessellationResult;
use crate::geometry_builder::{with_geometry, Count, GeometryBuilder};
use crate::math::{point, vector, Box2D, Point, Vector};
use crate::path::Rect;
use crate::ring::{
    add_closed_shape, closed_shape_count, outer_extent, ClosedShape, Interior, SequentialRing,
    UvBox,
};

const DIAGONALS: [Vector; 4] = [
    Vector::new(-1.0, -1.0),
    Vector::new(1.0, -1.0),
    Vector::new(1.0, 1.0),
    Vector::new(-1.0, 1.0),
];

/// Vertex and index counts of a rectangle.
pub fn rect_count(rect: &Rect) -> Count {
    closed_shape_count(4, Interior::Quad, &rect.style)
}

/// The rectangle with a positive size.
pub(crate) fn normalized_bounds(origin: Point, w: f32, h: f32) -> Box2D {
    Box2D::from_points([origin, origin + vector(w, h)])
}

pub fn tessellate_rect(rect: &Rect, output: &mut dyn GeometryBuilder) -> TessellationResult<Count> {
    log::trace!("rect {:?} {:?}", rect.origin, rect.size);

    let bounds = normalized_bounds(rect.origin, rect.size.width, rect.size.height);
    let corners = [
        bounds.min,
        point(bounds.max.x, bounds.min.y),
        bounds.max,
        point(bounds.min.x, bounds.max.y),
    ];
    // Insetting further than the middle would flip the outline.
    let min_offset = -0.5 * bounds.width().min(bounds.height());
    let position = |slot: u32, d: f32| {
        corners[slot as usize] + DIAGONALS[slot as usize] * d.max(min_offset)
    };

    let outer = outer_extent(&rect.style);
    let shape = ClosedShape {
        ring: &SequentialRing { len: 4 },
        interior: Interior::Quad,
        center: bounds.center(),
        style: &rect.style,
        uvs: UvBox::new(bounds.inflate(outer, outer)),
        position: &position,
    };

    let count = with_geometry(output, |output| add_closed_shape(output, &shape))?;
    debug_assert_eq!(count, rect_count(rect));

    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry_builder::{Counter, Recorder};
    use crate::path::{Canvas, Color};

    fn rect_with(setup: impl FnOnce(&mut Canvas)) -> Rect {
        let mut canvas = Canvas::new();
        setup(&mut canvas);
        canvas.rect(10.0, 20.0, 30.0, 40.0).unwrap();
        canvas.rects()[0]
    }

    #[test]
    fn counts() {
        let cases: [(fn(&mut Canvas), Count); 6] = [
            (|_| {}, Count::new(8, 24)),
            (|c| c.set_penumbra(1.0).unwrap(), Count::new(16, 72)),
            (|c| c.begin_fill(), Count::new(12, 30)),
            (
                |c| {
                    c.begin_fill();
                    c.set_penumbra(1.0).unwrap();
                },
                Count::new(20, 78),
            ),
            (
                |c| {
                    c.begin_fill();
                    c.set_stroke_width(0.0).unwrap();
                },
                Count::new(4, 6),
            ),
            (
                |c| {
                    c.begin_fill();
                    c.set_stroke_width(0.0).unwrap();
                    c.set_penumbra(1.0).unwrap();
                },
                Count::new(8, 30),
            ),
        ];

        for (setup, expected) in cases {
            let rect = rect_with(setup);
            assert_eq!(rect_count(&rect), expected);

            let mut counter = Counter::new();
            assert_eq!(tessellate_rect(&rect, &mut counter), Ok(expected));
            assert_eq!(counter.count(), expected);
        }
    }

    #[test]
    fn hard_stroke_positions() {
        let rect = rect_with(|c| c.set_stroke_width(2.0).unwrap());
        let mut output = Recorder::default();
        tessellate_rect(&rect, &mut output).unwrap();

        let positions: Vec<Point> = output.vertices.iter().map(|v| v.position).collect();
        assert_eq!(
            positions,
            vec![
                point(9.0, 19.0),
                point(11.0, 21.0),
                point(41.0, 19.0),
                point(39.0, 21.0),
                point(41.0, 61.0),
                point(39.0, 59.0),
                point(9.0, 61.0),
                point(11.0, 59.0),
            ]
        );

        assert_eq!(output.vertices[0].uv, [0.0, 0.0]);
        assert_eq!(output.vertices[4].uv, [1.0, 1.0]);
        assert!(output.indices.iter().all(|&i| i < 8));
    }

    #[test]
    fn fill_colors() {
        let rect = rect_with(|c| {
            c.set_fill_color(Color::new(0.0, 1.0, 0.0, 1.0));
            c.set_stroke_width(0.0).unwrap();
            c.set_penumbra(2.0).unwrap();
            c.begin_fill();
        });
        let mut output = Recorder::default();
        tessellate_rect(&rect, &mut output).unwrap();

        // Transparent outline, opaque inset.
        assert_eq!(output.vertices[0].position, point(10.0, 20.0));
        assert_eq!(output.vertices[0].color.a, 0.0);
        assert_eq!(output.vertices[1].position, point(12.0, 22.0));
        assert_eq!(output.vertices[1].color, Color::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn negative_size() {
        let mut canvas = Canvas::new();
        canvas.rect(40.0, 60.0, -30.0, -40.0).unwrap();
        let mut output = Recorder::default();
        tessellate_rect(&canvas.rects()[0], &mut output).unwrap();
        assert_eq!(output.vertices[0].position, point(9.5, 19.5));
    }
}
