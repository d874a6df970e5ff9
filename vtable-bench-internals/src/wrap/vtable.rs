//! Vtable for type-erased wrapper operations.
//!
//! This module contains the [`WrapVtable`] which lets [`RawWrap`] destroy and
//! query a value whose concrete type `T` has been erased. The vtable stores
//! function pointers to thunks that were instantiated with that `T`.
//!
//! This module encapsulates the fields of [`WrapVtable`] so they cannot be
//! accessed directly. This visibility restriction guarantees the safety
//! invariant: **the vtable's type parameters must match the actual type of the
//! value it is paired with**.
//!
//! # Safety Invariant
//!
//! A [`WrapVtable`] can only be created through [`WrapVtable::new`], which
//! instantiates every thunk with the same `T` and `H` at compile time.
//!
//! Unlike a compiler-generated vtable, each [`RawWrap`] allocates its own copy
//! of the table. The copies for one `T` are identical, so sharing a single
//! table would only change the allocation count.
//!
//! [`RawWrap`]: crate::wrap::RawWrap

use core::{alloc::Layout, any::TypeId, ptr::NonNull};

use crate::{handlers::SpeakHandler, util::Erased};

/// Vtable for type-erased wrapper operations.
///
/// # Safety Invariant
///
/// The fields `destroy` and `speak` are guaranteed to point to the functions
/// defined below instantiated with the value type `T` (and handler `H`) used
/// to create this [`WrapVtable`], and `layout` is `Layout::new::<T>()`.
pub(crate) struct WrapVtable {
    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`WrapVtable`].
    type_id: fn() -> TypeId,
    /// Gets the [`core::any::type_name`] of the value type.
    type_name: fn() -> &'static str,
    /// Layout of the value type, needed to release its storage.
    layout: Layout,
    /// Runs the destructor of the `T` pointed to, in place.
    destroy: unsafe fn(NonNull<Erased>),
    /// Asks the `T` pointed to to speak through the handler `H`.
    speak: unsafe fn(NonNull<Erased>) -> char,
}

impl WrapVtable {
    /// Creates a new [`WrapVtable`] for the value type `T` and the handler
    /// type `H`.
    pub(super) const fn new<T: 'static, H: SpeakHandler<T>>() -> Self {
        Self {
            type_id: TypeId::of::<T>,
            type_name: core::any::type_name::<T>,
            layout: Layout::new::<T>(),
            destroy: destroy::<T>,
            speak: speak::<T, H>,
        }
    }

    /// Gets the [`TypeId`] of the value type that was used to create this
    /// [`WrapVtable`].
    #[inline]
    pub(super) fn type_id(&self) -> TypeId {
        (self.type_id)()
    }

    /// Gets the [`core::any::type_name`] of the value type that was used to
    /// create this [`WrapVtable`].
    #[inline]
    pub(super) fn type_name(&self) -> &'static str {
        (self.type_name)()
    }

    /// Gets the layout the value's storage was allocated with.
    #[inline]
    pub(super) fn layout(&self) -> Layout {
        self.layout
    }

    /// Runs the destructor of the value pointed to by `ptr` without releasing
    /// its storage.
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`WrapVtable`] must be a vtable for the type of the value
    ///    stored at `ptr`.
    /// 2. The value is initialized and is not used again after this call,
    ///    other than releasing its storage.
    #[inline]
    pub(super) unsafe fn destroy(&self, ptr: NonNull<Erased>) {
        // SAFETY: We know that `self.destroy` points to the function
        // `destroy::<T>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe {
            (self.destroy)(ptr);
        }
    }

    /// Calls the [`H::speak`] function used when creating this
    /// [`WrapVtable`].
    ///
    /// [`H::speak`]: SpeakHandler::speak
    ///
    /// # Safety
    ///
    /// The caller must ensure:
    ///
    /// 1. This [`WrapVtable`] must be a vtable for the type of the value
    ///    stored at `ptr`.
    /// 2. The value is initialized and not mutably aliased for the duration
    ///    of the call.
    #[inline]
    pub(super) unsafe fn speak(&self, ptr: NonNull<Erased>) -> char {
        // SAFETY: We know that `self.speak` points to the function
        // `speak::<T, H>` below. That function's safety requirements are upheld:
        // 1. Guaranteed by the caller
        // 2. Guaranteed by the caller
        unsafe { (self.speak)(ptr) }
    }
}

/// Drops the `T` pointed to by `ptr` in place.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual type of the value stored at `ptr`.
/// 2. The value is initialized and is not used again after this call.
unsafe fn destroy<T: 'static>(ptr: NonNull<Erased>) {
    let ptr: NonNull<T> = ptr.cast::<T>();
    // SAFETY: The pointer is aligned, initialized and has the right type as
    // guaranteed by the caller, and nothing reads it afterwards.
    unsafe {
        core::ptr::drop_in_place(ptr.as_ptr());
    }
}

/// Makes the `T` pointed to by `ptr` speak through the handler `H`.
///
/// # Safety
///
/// The caller must ensure:
///
/// 1. The type `T` matches the actual type of the value stored at `ptr`.
/// 2. The value is initialized and not mutably aliased for the duration of
///    the call.
unsafe fn speak<T: 'static, H: SpeakHandler<T>>(ptr: NonNull<Erased>) -> char {
    // SAFETY:
    // 1. Guaranteed by the caller
    // 2. Guaranteed by the caller
    let value: &T = unsafe { ptr.cast::<T>().as_ref() };
    H::speak(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Echo;
    impl SpeakHandler<char> for Echo {
        fn speak(value: &char) -> char {
            *value
        }
    }
    impl SpeakHandler<u64> for Echo {
        fn speak(value: &u64) -> char {
            char::from_digit((*value % 10) as u32, 10).unwrap_or('?')
        }
    }

    #[test]
    fn test_wrap_vtable_type_id() {
        let vtable = WrapVtable::new::<char, Echo>();
        assert_eq!(vtable.type_id(), TypeId::of::<char>());
        assert_eq!(vtable.type_name(), "char");
    }

    #[test]
    fn test_wrap_vtable_layout() {
        let vtable = WrapVtable::new::<u64, Echo>();
        assert_eq!(vtable.layout(), Layout::new::<u64>());
    }

    #[test]
    fn test_wrap_vtable_speak() {
        let vtable = WrapVtable::new::<u64, Echo>();
        let mut value: u64 = 1234;
        let ptr = NonNull::from(&mut value).cast::<Erased>();

        // SAFETY: The vtable was created for `u64` and `ptr` points to a live `u64`.
        let first = unsafe { vtable.speak(ptr) };
        // SAFETY: Same as above.
        let second = unsafe { vtable.speak(ptr) };

        assert_eq!(first, '4');
        assert_eq!(first, second);
    }
}
