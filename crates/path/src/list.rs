use crate::allocator::Allocator;
use crate::error::AllocError;

use core::alloc::Layout;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};
use core::slice;

const MIN_CAPACITY: usize = 4;

/// A growable array backed by an external [`Allocator`].
///
/// The list does not own its allocator. Every method that touches memory takes it as a
/// parameter and it must always be the same allocator for a given list. The list does not
/// free its memory on drop, the owner must call [`RawList::release`].
pub(crate) struct RawList<T> {
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    _marker: PhantomData<T>,
}

impl<T> RawList<T> {
    pub const fn new() -> Self {
        RawList {
            ptr: NonNull::dangling(),
            len: 0,
            capacity: if mem::size_of::<T>() == 0 { usize::MAX } else { 0 },
            _marker: PhantomData,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Makes room for `additional` more elements, at least doubling the capacity.
    pub fn reserve<A: Allocator>(
        &mut self,
        alloc: &mut A,
        additional: usize,
    ) -> Result<(), AllocError> {
        let required = self.len.checked_add(additional).ok_or(AllocError)?;
        if required <= self.capacity {
            return Ok(());
        }

        let new_capacity = required
            .max(self.capacity.saturating_mul(2))
            .max(MIN_CAPACITY);
        let new_layout = Layout::array::<T>(new_capacity).map_err(|_| AllocError)?;

        let ptr = if self.capacity == 0 {
            alloc.allocate(new_layout)
        } else {
            let old_layout = Layout::array::<T>(self.capacity).map_err(|_| AllocError)?;
            unsafe { alloc.resize(self.ptr.cast(), old_layout, new_layout.size()) }
        };

        self.ptr = ptr.ok_or(AllocError)?.cast();
        self.capacity = new_capacity;

        Ok(())
    }

    pub fn push<A: Allocator>(&mut self, alloc: &mut A, value: T) -> Result<(), AllocError> {
        self.reserve(alloc, 1)?;
        unsafe {
            self.ptr.as_ptr().add(self.len).write(value);
        }
        self.len += 1;

        Ok(())
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        unsafe { slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        unsafe { slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    #[inline]
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    #[inline]
    pub fn last_mut(&mut self) -> Option<&mut T> {
        self.as_mut_slice().last_mut()
    }

    /// Drops the elements and keeps the memory.
    pub fn clear(&mut self) {
        let elements: *mut [T] = self.as_mut_slice();
        self.len = 0;
        unsafe {
            ptr::drop_in_place(elements);
        }
    }

    /// Drops the elements and gives the memory back to the allocator.
    pub fn release<A: Allocator>(&mut self, alloc: &mut A) {
        self.clear();
        if mem::size_of::<T>() != 0 && self.capacity != 0 {
            if let Ok(layout) = Layout::array::<T>(self.capacity) {
                unsafe {
                    alloc.release(self.ptr.cast(), layout);
                }
            }
        }
        *self = RawList::new();
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for RawList<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}
