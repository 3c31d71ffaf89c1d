extern crate quill;
extern crate quill_tests;
#[macro_use]
extern crate criterion;

use criterion::Criterion;
use quill::path::Canvas;
use quill::tessellation::{mesh_size, render, tessellate, Counter};
use quill_tests::{build_scene, MeshBuffers};

const N: u32 = 100;

fn scene() -> Canvas {
    let mut canvas = Canvas::new();
    build_scene(&mut canvas, N).unwrap();

    canvas
}

fn estimate(bench: &mut Criterion) {
    let canvas = scene();
    bench.bench_function("mesh_size", |b| {
        b.iter(|| std::hint::black_box(mesh_size(&canvas)))
    });
}

fn count(bench: &mut Criterion) {
    let canvas = scene();
    let mut counter = Counter::new();
    bench.bench_function("tessellate into a counter", |b| {
        b.iter(|| {
            counter.reset();
            std::hint::black_box(tessellate(&canvas, &mut counter).unwrap())
        })
    });
}

fn write(bench: &mut Criterion) {
    let canvas = scene();
    let size = mesh_size(&canvas);
    let mut buffers = MeshBuffers::new(size.vertices, size.indices);
    bench.bench_function("render into preallocated buffers", |b| {
        b.iter(|| {
            let mut mesh = buffers.descriptor().unwrap();
            std::hint::black_box(render(&canvas, &mut mesh).unwrap())
        })
    });
}

fn build(bench: &mut Criterion) {
    let mut canvas = Canvas::new();
    bench.bench_function("build and clear a scene", |b| {
        b.iter(|| {
            build_scene(&mut canvas, N).unwrap();
            canvas.clear();
        })
    });
}

criterion_group!(tessellation, estimate, count, write, build);
criterion_main!(tessellation);
