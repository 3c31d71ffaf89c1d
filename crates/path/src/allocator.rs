//! Pluggable memory source for the canvas primitive lists.

use core::alloc::Layout;
use core::ptr::NonNull;

/// Alignment every [`CallbackAllocator`] block must honor.
pub const CALLBACK_ALIGNMENT: usize = 16;

/// Memory source used by a [`Canvas`](crate::Canvas) for all of its primitive storage.
///
/// # Safety
///
/// Implementations must return blocks that are valid for reads and writes of the requested
/// size and aligned to the requested alignment, and must keep them valid until they are
/// resized or released.
pub unsafe trait Allocator {
    /// Returns a new block, or `None` if the allocator is exhausted.
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>>;

    /// Grows or shrinks a block, preserving its contents up to the smaller size.
    ///
    /// On failure the old block is left untouched and `None` is returned.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with layout `old`.
    unsafe fn resize(
        &mut self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>>;

    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator with this layout and must not be
    /// used afterwards.
    unsafe fn release(&mut self, ptr: NonNull<u8>, layout: Layout);
}

/// Forwards to the global allocator.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SystemAllocator;

unsafe impl Allocator for SystemAllocator {
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.size() == 0 {
            return NonNull::new(layout.align() as *mut u8);
        }

        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    unsafe fn resize(
        &mut self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        if old.size() == 0 {
            let layout = Layout::from_size_align(new_size, old.align()).ok()?;
            return self.allocate(layout);
        }
        if new_size == 0 {
            self.release(ptr, old);
            return NonNull::new(old.align() as *mut u8);
        }

        NonNull::new(std::alloc::realloc(ptr.as_ptr(), old, new_size))
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() != 0 {
            std::alloc::dealloc(ptr.as_ptr(), layout);
        }
    }
}

/// Callback signature for allocations: `(size, user_data) -> block or null`.
pub type AllocateFn<U> = fn(usize, &mut U) -> *mut u8;
/// Callback signature for resizes: `(block, new_size, user_data) -> block or null`.
pub type ResizeFn<U> = fn(*mut u8, usize, &mut U) -> *mut u8;
/// Callback signature for releases: `(block, user_data)`.
pub type ReleaseFn<U> = fn(*mut u8, &mut U);

/// An allocator made of three plain functions and an opaque user data value.
///
/// This is the shape host environments usually provide (a C allocator, a scripting runtime
/// heap, an arena). The callbacks only receive sizes, so every block they return must be
/// aligned to [`CALLBACK_ALIGNMENT`].
pub struct CallbackAllocator<U> {
    allocate: AllocateFn<U>,
    resize: ResizeFn<U>,
    release: ReleaseFn<U>,
    user_data: U,
}

impl<U> CallbackAllocator<U> {
    /// # Safety
    ///
    /// The callbacks must behave like `malloc`, `realloc` and `free`: returned blocks are
    /// at least as large as requested, aligned to [`CALLBACK_ALIGNMENT`], and stay valid until
    /// resized or released. A null return signals exhaustion and, for `resize`, leaves the
    /// original block valid.
    pub unsafe fn new(
        allocate: AllocateFn<U>,
        resize: ResizeFn<U>,
        release: ReleaseFn<U>,
        user_data: U,
    ) -> Self {
        CallbackAllocator {
            allocate,
            resize,
            release,
            user_data,
        }
    }

    pub fn user_data(&self) -> &U {
        &self.user_data
    }

    pub fn user_data_mut(&mut self) -> &mut U {
        &mut self.user_data
    }

    pub fn into_user_data(self) -> U {
        self.user_data
    }
}

unsafe impl<U> Allocator for CallbackAllocator<U> {
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        if layout.align() > CALLBACK_ALIGNMENT {
            log::warn!("alignment {} is not supported by the callback allocator", layout.align());
            return None;
        }

        let ptr = NonNull::new((self.allocate)(layout.size(), &mut self.user_data))?;
        debug_assert_eq!(ptr.as_ptr() as usize % CALLBACK_ALIGNMENT, 0);

        Some(ptr)
    }

    unsafe fn resize(
        &mut self,
        ptr: NonNull<u8>,
        old: Layout,
        new_size: usize,
    ) -> Option<NonNull<u8>> {
        debug_assert!(old.align() <= CALLBACK_ALIGNMENT);
        let ptr = NonNull::new((self.resize)(ptr.as_ptr(), new_size, &mut self.user_data))?;
        debug_assert_eq!(ptr.as_ptr() as usize % CALLBACK_ALIGNMENT, 0);

        Some(ptr)
    }

    unsafe fn release(&mut self, ptr: NonNull<u8>, _layout: Layout) {
        (self.release)(ptr.as_ptr(), &mut self.user_data)
    }
}

impl<U: core::fmt::Debug> core::fmt::Debug for CallbackAllocator<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_struct("CallbackAllocator")
            .field("user_data", &self.user_data)
            .finish()
    }
}

#[test]
fn system_allocator_resize_keeps_contents() {
    let mut alloc = SystemAllocator;
    let layout = Layout::array::<u32>(4).unwrap();
    let ptr = alloc.allocate(layout).unwrap();
    unsafe {
        let words = ptr.cast::<u32>().as_ptr();
        for i in 0..4 {
            words.add(i).write(i as u32 * 10);
        }

        let grown = alloc.resize(ptr, layout, 32).unwrap();
        let words = grown.cast::<u32>().as_ptr();
        for i in 0..4 {
            assert_eq!(words.add(i).read(), i as u32 * 10);
        }

        alloc.release(grown, Layout::array::<u32>(8).unwrap());
    }
}

#[test]
fn callback_allocator_reports_exhaustion() {
    fn allocate(_: usize, calls: &mut u32) -> *mut u8 {
        *calls += 1;
        core::ptr::null_mut()
    }
    fn resize(_: *mut u8, _: usize, _: &mut u32) -> *mut u8 {
        core::ptr::null_mut()
    }
    fn release(_: *mut u8, _: &mut u32) {}

    let mut alloc = unsafe { CallbackAllocator::new(allocate, resize, release, 0u32) };
    assert!(alloc.allocate(Layout::new::<u64>()).is_none());
    assert!(alloc.allocate(Layout::from_size_align(64, 64).unwrap()).is_none());
    assert_eq!(*alloc.user_data(), 1);
}
