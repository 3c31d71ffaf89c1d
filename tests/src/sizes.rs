use crate::{build_scene, init_logger, MeshBuffers};
use quill::path::{Canvas, Color};
use quill::tessellation::{mesh_size, render, tessellate, Count, Counter, MeshEstimator};

fn check(canvas: &Canvas) {
    let expected = mesh_size(canvas);

    let mut counter = Counter::new();
    assert_eq!(tessellate(canvas, &mut counter), Ok(expected));
    assert_eq!(counter.count(), expected);

    let mut buffers = MeshBuffers::new(expected.vertices, expected.indices);
    let mut mesh = buffers.descriptor().unwrap();
    assert_eq!(render(canvas, &mut mesh), Ok(expected));
    assert_eq!(mesh.count(), expected);
    drop(mesh);

    for i in 0..expected.indices as usize {
        assert!(buffers.index(i) < expected.vertices);
    }
}

#[test]
fn estimates_match_every_style() {
    init_logger();

    let widths = [0.0, 0.5, 1.0, 3.0, 12.0];
    let penumbras = [0.0, 0.25, 1.0, 8.0];
    let qualities = [2, 3, 7, 16];
    let ellipse_qualities = [3, 4, 5, 9, 32];

    for &width in &widths {
        for &penumbra in &penumbras {
            for &fill in &[false, true] {
                let mut canvas = Canvas::new();
                canvas.set_stroke_width(width).unwrap();
                canvas.set_penumbra(penumbra).unwrap();
                canvas.set_fill_color(Color::new(0.2, 0.4, 0.6, 1.0));
                if fill {
                    canvas.begin_fill();
                }

                for (i, (&quality, &ellipse_quality)) in
                    qualities.iter().zip(ellipse_qualities.iter().cycle()).enumerate()
                {
                    let f = i as f32 * 40.0;
                    canvas.set_curve_quality(quality).unwrap();
                    canvas.set_ellipse_quality(ellipse_quality).unwrap();

                    canvas.move_to(f, 0.0).unwrap();
                    canvas.quadratic_curve_to(f + 10.0, 20.0, f + 20.0, 0.0).unwrap();
                    canvas.bezier_curve_to(f, 10.0, f + 5.0, 30.0, f + 30.0, 30.0).unwrap();
                    canvas.line_to(f, 0.0).unwrap();

                    canvas.rect(f, 40.0, 30.0, 20.0).unwrap();
                    canvas.rect(f, 70.0, -4.0, 2.0).unwrap();
                    canvas.rounded_rect(f, 80.0, 30.0, 20.0, 5.0).unwrap();
                    canvas.rounded_rect(f, 110.0, 2.0, 2.0, 10.0).unwrap();
                    canvas.ellipse(f, 130.0, 15.0, 6.0).unwrap();
                    canvas.circle(f, 150.0, 1.0).unwrap();
                }
                canvas.set_ellipse_quality(ellipse_qualities[4]).unwrap();
                canvas.ellipse(0.0, 0.0, 3.0, 3.0).unwrap();

                check(&canvas);
            }
        }
    }
}

#[test]
fn estimator_sums_the_primitive_kinds() {
    let mut canvas = Canvas::new();
    build_scene(&mut canvas, 12).unwrap();

    let estimator = MeshEstimator::from_canvas(&canvas);
    let sum = estimator.paths() + estimator.rects() + estimator.rounded_rects() + estimator.ellipses();
    assert_eq!(estimator.total(), sum);
    assert_eq!(mesh_size(&canvas), sum);

    check(&canvas);
}

#[test]
fn large_scene() {
    init_logger();

    let mut canvas = Canvas::new();
    build_scene(&mut canvas, 200).unwrap();
    let size = mesh_size(&canvas);
    assert!(size.vertices > u16::MAX as u32);

    check(&canvas);
}

#[test]
fn too_small_by_one() {
    let mut canvas = Canvas::new();
    build_scene(&mut canvas, 3).unwrap();
    let size = mesh_size(&canvas);

    let mut buffers = MeshBuffers::new(size.vertices, size.indices - 1);
    let mut mesh = buffers.descriptor().unwrap();
    assert!(render(&canvas, &mut mesh).is_err());
    assert_eq!(mesh.count(), Count::ZERO);

    let mut buffers = MeshBuffers::new(size.vertices - 1, size.indices);
    let mut mesh = buffers.descriptor().unwrap();
    assert!(render(&canvas, &mut mesh).is_err());
    assert_eq!(mesh.count(), Count::ZERO);
}
