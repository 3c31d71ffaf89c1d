use crate::{init_logger, MeshBuffers, VERTEX_SIZE};
use quill::path::{Canvas, Color, Style};
use quill::tessellation::{
    mesh_size, render, Count, IndexFormat, IndexLayout, MeshDescriptor, VertexLayout,
};

#[test]
fn curve_and_filled_ellipse() {
    init_logger();

    let mut canvas = Canvas::new();
    canvas.set_stroke_width(2.0).unwrap();
    canvas.set_curve_quality(20).unwrap();
    canvas.move_to(10.0, 10.0).unwrap();
    canvas.quadratic_curve_to(50.0, 80.0, 90.0, 10.0).unwrap();

    canvas.set_ellipse_quality(32).unwrap();
    canvas.set_fill_color(Color::new(0.0, 1.0, 0.0, 1.0));
    canvas.begin_fill();
    canvas.ellipse(50.0, 50.0, 30.0, 20.0).unwrap();
    canvas.end_fill();

    // Path: the anchor and 20 curve samples, hard stroke. Ellipse: 32 samples, stroke ring
    // plus fan.
    let size = mesh_size(&canvas);
    assert_eq!(size, Count::new(42 + 64 + 33, 120 + 192 + 96));
    assert_eq!(size, Count::new(139, 408));

    // Exactly sized buffers inside larger allocations, to detect overflows.
    let guard = 64;
    let vertex_bytes = size.vertices as usize * VERTEX_SIZE;
    let index_bytes = size.indices as usize * 2;
    let mut vertices = vec![0xEEu8; vertex_bytes + guard];
    let mut indices = vec![0xEEu8; index_bytes + guard];

    let mut mesh = MeshDescriptor::interleaved(
        &mut vertices[..vertex_bytes],
        VertexLayout::PACKED_INTERLEAVED,
        &mut indices[..index_bytes],
        IndexLayout::packed(IndexFormat::U16),
    )
    .unwrap();
    assert_eq!(mesh.capacity(), size);

    assert_eq!(render(&canvas, &mut mesh), Ok(size));
    assert_eq!(mesh.vertex_count(), size.vertices);
    assert_eq!(mesh.index_count(), size.indices);
    drop(mesh);

    assert!(vertices[vertex_bytes..].iter().all(|&b| b == 0xEE));
    assert!(indices[index_bytes..].iter().all(|&b| b == 0xEE));

    for index in indices[..index_bytes].chunks(2) {
        let index = u16::from_ne_bytes([index[0], index[1]]) as u32;
        assert!(index < size.vertices);
    }

    for vertex in vertices[..vertex_bytes].chunks(VERTEX_SIZE) {
        let x = f32::from_ne_bytes([vertex[0], vertex[1], vertex[2], vertex[3]]);
        let y = f32::from_ne_bytes([vertex[4], vertex[5], vertex[6], vertex[7]]);
        assert!(x.is_finite() && y.is_finite());
    }

    log::info!("rendered {:?}", size);
}

#[test]
fn colors_and_uvs() {
    init_logger();

    let mut canvas = Canvas::new();
    canvas.set_stroke_color(Color::new(1.0, 0.0, 0.0, 1.0));
    canvas.set_penumbra(0.5).unwrap();
    canvas.move_to(0.0, 0.0).unwrap();
    canvas.line_to(10.0, 0.0).unwrap();
    canvas.line_to(20.0, 0.0).unwrap();

    let size = mesh_size(&canvas);
    assert_eq!(size, Count::new(12, 36));

    let mut buffers = MeshBuffers::new(size.vertices, size.indices);
    let mut mesh = buffers
        .descriptor()
        .unwrap()
        .with_tint(Color::new(1.0, 1.0, 1.0, 0.5));
    render(&canvas, &mut mesh).unwrap();
    drop(mesh);

    // Outer rails are transparent, inner rails carry the tinted color.
    assert_eq!(buffers.color(0), 0x00FF_0000);
    assert_eq!(buffers.color(1), 0x7FFF_0000);
    assert_eq!(buffers.color(2), 0x7FFF_0000);
    assert_eq!(buffers.color(3), 0x00FF_0000);

    // u runs along the path, v across it.
    assert_eq!(buffers.uv(0), [0.0, 0.0]);
    assert_eq!(buffers.uv(4), [0.5, 0.0]);
    assert_eq!(buffers.uv(11), [1.0, 1.0]);
    // Penumbra covers the whole half width, both inner rails sit on the outline.
    assert_eq!(buffers.uv(1), [0.0, 0.5]);
    assert_eq!(buffers.position(1), buffers.position(2));
}

#[test]
fn style_snapshot_isolation() {
    let mut canvas = Canvas::new();
    canvas.move_to(0.0, 0.0).unwrap();
    canvas.line_to(10.0, 0.0).unwrap();

    canvas.set_stroke_color(Color::WHITE);
    canvas.set_stroke_width(4.0).unwrap();
    canvas.set_curve_quality(2).unwrap();
    canvas.line_to(20.0, 0.0).unwrap();

    let size = mesh_size(&canvas);
    let mut buffers = MeshBuffers::new(size.vertices, size.indices);
    let mut mesh = buffers.descriptor().unwrap();
    render(&canvas, &mut mesh).unwrap();
    drop(mesh);

    // First point, width 1, black.
    assert_eq!(buffers.position(0), [0.0, 0.5]);
    assert_eq!(buffers.position(1), [0.0, -0.5]);
    assert_eq!(buffers.color(0), 0xFF00_0000);
    // Middle point belongs to the first edge.
    assert_eq!(buffers.color(2), 0xFF00_0000);
    // Last point, width 4, white.
    assert_eq!(buffers.position(4), [20.0, 2.0]);
    assert_eq!(buffers.position(5), [20.0, -2.0]);
    assert_eq!(buffers.color(4), 0xFFFF_FFFF);
}

#[test]
fn degenerate_path() {
    let mut canvas = Canvas::new();
    canvas.move_to(5.0, 5.0).unwrap();
    assert_eq!(mesh_size(&canvas), Count::ZERO);

    let mut buffers = MeshBuffers::new(0, 0);
    let mut mesh = buffers.descriptor().unwrap();
    assert_eq!(render(&canvas, &mut mesh), Ok(Count::ZERO));
}

#[test]
fn clear_is_idempotent() {
    let mut canvas = Canvas::new();
    crate::build_scene(&mut canvas, 5).unwrap();
    assert_ne!(mesh_size(&canvas), Count::ZERO);

    canvas.clear();
    assert_eq!(mesh_size(&canvas), Count::ZERO);
    assert_eq!(canvas.style(), &Style::default());

    canvas.clear();
    assert_eq!(mesh_size(&canvas), Count::ZERO);
    assert_eq!(canvas.style(), &Style::default());

    // Still usable for the next frame.
    crate::build_scene(&mut canvas, 5).unwrap();
    let size = mesh_size(&canvas);
    let mut buffers = MeshBuffers::new(size.vertices, size.indices);
    let mut mesh = buffers.descriptor().unwrap();
    assert_eq!(render(&canvas, &mut mesh), Ok(size));
}

#[test]
fn argb_round_trip() {
    for k in 0..=255u32 {
        let v = k as f32 / 255.0;
        let packed = Color::new(v, v, v, v).to_argb();
        assert_eq!(packed, k << 24 | k << 16 | k << 8 | k);
    }
}
