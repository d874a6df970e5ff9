//! Aligned heap storage for a single erased value.
//!
//! [`allocate`] requests exactly `Layout::new::<T>()` from the global
//! allocator and moves the value into it. [`release`] hands the memory back
//! given the same layout, which callers recover from the value's
//! [`WrapVtable`].
//!
//! Zero-sized types never touch the allocator: they live at a dangling,
//! well-aligned address, and releasing them is a no-op.
//!
//! [`WrapVtable`]: crate::wrap::vtable::WrapVtable

use alloc::alloc::{alloc, dealloc, handle_alloc_error};
use core::{alloc::Layout, ptr::NonNull};

use crate::util::Erased;

/// Moves `value` into a fresh allocation sized and aligned for `T` and
/// returns the erased pointer to it.
///
/// Allocation failure is fatal and goes through [`handle_alloc_error`].
#[inline]
pub(crate) fn allocate<T>(value: T) -> NonNull<Erased> {
    let layout = Layout::new::<T>();

    let ptr: NonNull<T> = if layout.size() == 0 {
        NonNull::dangling()
    } else {
        // SAFETY: The layout has a non-zero size, checked above.
        let raw: *mut u8 = unsafe { alloc(layout) };
        match NonNull::new(raw.cast::<T>()) {
            Some(ptr) => ptr,
            None => handle_alloc_error(layout),
        }
    };

    // SAFETY: `ptr` is non-null, aligned for `T` and valid for writes of
    // `size_of::<T>()` bytes, either because it was just allocated with
    // `Layout::new::<T>()` or because `T` is zero-sized.
    unsafe {
        ptr.as_ptr().write(value);
    }

    ptr.cast::<Erased>()
}

/// Releases storage obtained from [`allocate`] without running any
/// destructor.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. `ptr` was returned by [`allocate`] for a type `T` whose layout is
///    `layout`.
/// 2. The storage has not been released before, and `ptr` is not used after
///    this call.
/// 3. The value inside has already been dropped or moved out.
#[inline]
pub(crate) unsafe fn release(ptr: NonNull<Erased>, layout: Layout) {
    if layout.size() == 0 {
        return;
    }

    // SAFETY:
    // 1. The pointer came from `alloc` with this exact layout (guaranteed by
    //    the caller)
    // 2. It is released exactly once (guaranteed by the caller)
    unsafe {
        dealloc(ptr.as_ptr().cast::<u8>(), layout);
    }
}
