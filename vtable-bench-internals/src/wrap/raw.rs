//! Type-erased, single-owner wrapper.
//!
//! This module encapsulates the `data` and `vtable` fields of [`RawWrap`],
//! ensuring they are only visible within this module. This visibility
//! restriction guarantees the safety invariant: **either both pointers are
//! present and `vtable` describes the value behind `data`, or both are
//! absent**.
//!
//! # Safety Invariant
//!
//! The pointers can only be set together by [`RawWrap::new`], which allocates
//! the value through [`storage::allocate`] and the vtable through
//! [`Box::into_raw`]. The only way to clear them is to move both into another
//! [`RawWrap`] at once ([`RawWrap::take`]) or to destroy the wrapper.
//!
//! # Lifecycle
//!
//! A [`RawWrap`] is either *valid* (owns a value and its vtable) or *empty*
//! (moved-from). Empty wrappers are only good for being dropped, which does
//! nothing, or for being overwritten with [`RawWrap::take_from`].

use alloc::boxed::Box;
use core::{any::TypeId, ptr::NonNull};

use crate::{
    handlers::SpeakHandler,
    util::Erased,
    wrap::{storage, vtable::WrapVtable},
};

/// An owning, type-erased handle to a heap-allocated value and the dispatch
/// table built for it.
///
/// There is intentionally no [`Clone`] implementation: a [`RawWrap`] is the
/// sole owner of both of its allocations.
pub struct RawWrap {
    /// Pointer to the value, allocated with its exact layout.
    ///
    /// # Safety
    ///
    /// The following safety invariants are guaranteed to be upheld as long as
    /// this struct exists:
    ///
    /// 1. `data.is_some() == vtable.is_some()`.
    /// 2. If present, the pointer was returned by [`storage::allocate`]
    ///    for the `T` that `vtable` was instantiated with.
    /// 3. If present, the pointee is initialized, except during the execution
    ///    of the `Drop` implementation.
    data: Option<NonNull<Erased>>,

    /// Pointer to this wrapper's own dispatch table.
    ///
    /// # Safety
    ///
    /// If present, the pointer was created from a `Box<WrapVtable>` using
    /// [`Box::into_raw`] and is not shared with any other [`RawWrap`].
    vtable: Option<NonNull<WrapVtable>>,
}

impl RawWrap {
    /// Creates a new [`RawWrap`] owning `value`, which will speak through the
    /// handler `H`.
    ///
    /// The value is moved into storage sized and aligned for `T`, and a new
    /// [`WrapVtable`] is allocated for this wrapper alone.
    #[inline]
    pub fn new<T, H>(value: T) -> Self
    where
        T: 'static,
        H: SpeakHandler<T>,
    {
        let data = storage::allocate(value);

        let vtable: *mut WrapVtable = Box::into_raw(Box::new(WrapVtable::new::<T, H>()));
        // SAFETY: `Box::into_raw` returns a non-null pointer
        let vtable: NonNull<WrapVtable> = unsafe { NonNull::new_unchecked(vtable) };

        Self {
            data: Some(data),
            vtable: Some(vtable),
        }
    }

    /// Creates an empty [`RawWrap`], the same state a wrapper is left in
    /// after its contents have been taken.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            data: None,
            vtable: None,
        }
    }

    /// Returns `true` if this wrapper has been moved from.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_none() || self.vtable.is_none()
    }

    /// Moves the value and its vtable out into a new [`RawWrap`], leaving
    /// `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            data: self.data.take(),
            vtable: self.vtable.take(),
        }
    }

    /// Move-assigns `source` into `self`.
    ///
    /// Whatever `self` owned before is destroyed first. Afterwards `self`
    /// holds what `source` held and `source` is empty.
    #[inline]
    pub fn take_from(&mut self, source: &mut RawWrap) {
        *self = source.take();
    }

    /// Returns the dispatch table, if the wrapper is valid.
    #[inline]
    fn vtable(&self) -> Option<&WrapVtable> {
        let vtable = self.vtable?;
        // SAFETY: The pointer came from `Box::into_raw` and stays allocated
        // until `self` is dropped or emptied, which cannot happen while the
        // returned reference borrows `self`.
        Some(unsafe { vtable.as_ref() })
    }

    /// Returns the [`TypeId`] of the stored value, or [`None`] if empty.
    #[inline]
    pub fn type_id(&self) -> Option<TypeId> {
        self.vtable().map(WrapVtable::type_id)
    }

    /// Returns the [`core::any::type_name`] of the stored value, or [`None`]
    /// if empty.
    #[inline]
    pub fn type_name(&self) -> Option<&'static str> {
        self.vtable().map(WrapVtable::type_name)
    }

    /// Asks the stored value to speak.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    #[inline]
    pub fn speak(&self) -> char {
        let (Some(data), Some(vtable)) = (self.data, self.vtable()) else {
            panic!("speak called on a moved-from RawWrap");
        };

        // SAFETY:
        // 1. The vtable is the one created alongside `data` in `RawWrap::new`.
        // 2. `data` is initialized and only shared borrows exist while `self`
        //    is borrowed.
        unsafe { vtable.speak(data) }
    }

    /// Asks the stored value to speak without checking that the wrapper is
    /// valid.
    ///
    /// This is the call the benchmark measures: one load of the vtable
    /// pointer and one indirect call.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The wrapper is not empty.
    #[inline]
    pub unsafe fn speak_unchecked(&self) -> char {
        debug_assert!(!self.is_empty());

        // SAFETY: The wrapper is not empty (guaranteed by the caller), so both
        // pointers are present.
        let data = unsafe { self.data.unwrap_unchecked() };
        // SAFETY: Same as above.
        let vtable = unsafe { self.vtable.unwrap_unchecked() };
        // SAFETY: The pointer came from `Box::into_raw` and stays allocated
        // while `self` is borrowed.
        let vtable: &WrapVtable = unsafe { vtable.as_ref() };

        // SAFETY:
        // 1. The vtable is the one created alongside `data` in `RawWrap::new`.
        // 2. `data` is initialized and only shared borrows exist while `self`
        //    is borrowed.
        unsafe { vtable.speak(data) }
    }

    /// Returns a reference to the stored value if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        if self.type_id()? == TypeId::of::<T>() {
            // SAFETY: The wrapper is not empty and the type was just checked.
            Some(unsafe { self.downcast_unchecked::<T>() })
        } else {
            None
        }
    }

    /// Returns a reference to the stored value as a `T` without checking its
    /// type.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. The wrapper is not empty.
    /// 2. The type `T` matches the actual type of the stored value.
    #[inline]
    pub unsafe fn downcast_unchecked<T: 'static>(&self) -> &T {
        // Debug assertion to catch type mismatches in case of bugs
        debug_assert_eq!(self.type_id(), Some(TypeId::of::<T>()));

        // SAFETY: The wrapper is not empty (guaranteed by the caller).
        let data = unsafe { self.data.unwrap_unchecked() };
        // SAFETY: Converting the pointer to a reference is sound because:
        // - The pointer is non-null, aligned for `T` and initialized (guaranteed
        //   by the invariants on `RawWrap`)
        // - The type `T` matches the stored type (guaranteed by the caller)
        // - The lifetime is tied to the borrow of `self`
        unsafe { data.cast::<T>().as_ref() }
    }
}

impl Default for RawWrap {
    #[inline]
    fn default() -> Self {
        Self::empty()
    }
}

impl core::ops::Drop for RawWrap {
    #[inline]
    fn drop(&mut self) {
        let (Some(data), Some(vtable)) = (self.data.take(), self.vtable.take()) else {
            return;
        };

        // SAFETY: The pointer came from `Box::into_raw` in `RawWrap::new` and
        // is owned by this wrapper alone, so it is reclaimed exactly once.
        let vtable: Box<WrapVtable> = unsafe { Box::from_raw(vtable.as_ptr()) };

        // SAFETY:
        // 1. The vtable was created alongside `data` in `RawWrap::new`.
        // 2. The value is initialized and is not used afterwards, as we are in
        //    the drop function.
        unsafe {
            vtable.destroy(data);
        }

        // SAFETY:
        // 1. `data` came from `storage::allocate::<T>` and `vtable.layout()` is
        //    `Layout::new::<T>()`.
        // 2. The storage is released exactly once, here.
        // 3. The value was destroyed above.
        unsafe {
            storage::release(data, vtable.layout());
        }
    }
}

impl core::fmt::Debug for RawWrap {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self.type_name() {
            Some(type_name) => f.debug_tuple("RawWrap").field(&type_name).finish(),
            None => f.write_str("RawWrap(<empty>)"),
        }
    }
}
