use crate::build_scene;
use quill::path::allocator::CALLBACK_ALIGNMENT;
use quill::path::{CallbackAllocator, Canvas, CanvasError, Style};
use quill::tessellation::{mesh_size, Count};

use std::alloc::{self, Layout};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

/// Host side heap that keeps track of every live block.
#[derive(Default, Debug)]
struct Tracker {
    live: HashMap<usize, Layout>,
    allocations: usize,
    exhausted: bool,
}

type Shared = Rc<RefCell<Tracker>>;

fn layout(size: usize) -> Layout {
    Layout::from_size_align(size.max(1), CALLBACK_ALIGNMENT).unwrap()
}

fn allocate(size: usize, tracker: &mut Shared) -> *mut u8 {
    let mut tracker = tracker.borrow_mut();
    if tracker.exhausted {
        return std::ptr::null_mut();
    }

    let layout = layout(size);
    let ptr = unsafe { alloc::alloc(layout) };
    if !ptr.is_null() {
        tracker.live.insert(ptr as usize, layout);
        tracker.allocations += 1;
    }

    ptr
}

fn resize(ptr: *mut u8, size: usize, tracker: &mut Shared) -> *mut u8 {
    let mut tracker = tracker.borrow_mut();
    if tracker.exhausted {
        return std::ptr::null_mut();
    }

    let old = tracker.live.remove(&(ptr as usize)).expect("resizing an unknown block");
    let new_ptr = unsafe { alloc::realloc(ptr, old, size.max(1)) };
    if new_ptr.is_null() {
        tracker.live.insert(ptr as usize, old);
    } else {
        tracker.live.insert(new_ptr as usize, layout(size));
    }

    new_ptr
}

fn release(ptr: *mut u8, tracker: &mut Shared) {
    let layout = tracker
        .borrow_mut()
        .live
        .remove(&(ptr as usize))
        .expect("releasing an unknown block");
    unsafe { alloc::dealloc(ptr, layout) }
}

fn tracked_canvas() -> (Canvas<CallbackAllocator<Shared>>, Shared) {
    let tracker = Shared::default();
    let alloc = unsafe { CallbackAllocator::new(allocate, resize, release, tracker.clone()) };
    let canvas = Canvas::with_allocator(alloc, Style::DEFAULT).unwrap();

    (canvas, tracker)
}

#[test]
fn every_block_is_released() {
    let (mut canvas, tracker) = tracked_canvas();
    build_scene(&mut canvas, 20).unwrap();

    assert!(tracker.borrow().allocations > 0);
    assert!(!tracker.borrow().live.is_empty());

    drop(canvas);
    assert!(tracker.borrow().live.is_empty());
}

#[test]
fn clear_keeps_the_primitive_lists() {
    let (mut canvas, tracker) = tracked_canvas();
    build_scene(&mut canvas, 20).unwrap();
    canvas.clear();

    // Paths, rects, rounded rects and ellipses.
    assert_eq!(tracker.borrow().live.len(), 4);

    // A second frame of the same size does not need the lists to grow.
    let before = tracker.borrow().allocations;
    for _ in 0..20 {
        canvas.rect(0.0, 0.0, 1.0, 1.0).unwrap();
    }
    assert_eq!(tracker.borrow().allocations, before);

    drop(canvas);
    assert!(tracker.borrow().live.is_empty());
}

#[test]
fn exhaustion_leaves_the_canvas_usable() {
    let (mut canvas, tracker) = tracked_canvas();
    canvas.move_to(0.0, 0.0).unwrap();

    tracker.borrow_mut().exhausted = true;

    // The path has room for its first point but no edge list yet.
    assert_eq!(canvas.line_to(10.0, 0.0), Err(CanvasError::OutOfMemory));
    assert_eq!(canvas.rect(0.0, 0.0, 5.0, 5.0), Err(CanvasError::OutOfMemory));
    assert_eq!(canvas.ellipse(0.0, 0.0, 5.0, 5.0), Err(CanvasError::OutOfMemory));
    assert_eq!(canvas.paths().len(), 1);
    assert_eq!(canvas.paths()[0].points().len(), 1);
    assert!(canvas.paths()[0].edges().is_empty());
    assert!(canvas.rects().is_empty());
    assert_eq!(mesh_size(&canvas), Count::ZERO);

    tracker.borrow_mut().exhausted = false;

    canvas.line_to(10.0, 0.0).unwrap();
    canvas.rect(0.0, 0.0, 5.0, 5.0).unwrap();
    assert_eq!(mesh_size(&canvas), Count::new(4 + 8, 6 + 24));

    drop(canvas);
    assert!(tracker.borrow().live.is_empty());
}
