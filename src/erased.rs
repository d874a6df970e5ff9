//! Animals behind the hand-built vtable.
//!
//! The `Dog` and `Cat` in this module are plain structs: they implement no
//! shared trait and carry no vtable pointer. [`Wrap`] erases them into a
//! [`RawWrap`], which owns the value in its own allocation and resolves
//! `speak` through a function-pointer table built at construction time.
//!
//! ```
//! use vtable_bench::erased::{Dog, Wrap};
//!
//! let mut first = Wrap::new(Dog::new(3));
//! assert_eq!(first.speak(), 'k');
//!
//! let second = first.take();
//! assert!(first.is_empty());
//! assert_eq!(second.speak(), 'k');
//! ```

use alloc::vec::Vec;

use vtable_bench_internals::{RawWrap, handlers::SpeakHandler};

use crate::{
    animal::Species,
    draws::{Draw, Draws},
};

/// A dog that barks at a fixed index. Not polymorphic on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dog {
    idx: usize,
}

impl Dog {
    /// Creates a dog speaking at `idx`.
    pub const fn new(idx: usize) -> Self {
        Self { idx }
    }

    /// Returns the character at this dog's index in [`BARK`].
    ///
    /// [`BARK`]: crate::animal::BARK
    #[inline]
    pub fn speak(&self) -> char {
        Species::Dog.speak_at(self.idx)
    }

    /// Returns the stored index.
    pub const fn index(&self) -> usize {
        self.idx
    }
}

/// A cat that meows at a fixed index. Not polymorphic on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cat {
    idx: usize,
}

impl Cat {
    /// Creates a cat speaking at `idx`.
    pub const fn new(idx: usize) -> Self {
        Self { idx }
    }

    /// Returns the character at this cat's index in [`MEOW`].
    ///
    /// [`MEOW`]: crate::animal::MEOW
    #[inline]
    pub fn speak(&self) -> char {
        Species::Cat.speak_at(self.idx)
    }

    /// Returns the stored index.
    pub const fn index(&self) -> usize {
        self.idx
    }
}

/// Handler that forwards the erased `speak` call to the inherent `speak`
/// method of [`Dog`] and [`Cat`].
#[derive(Debug, Clone, Copy)]
pub struct Inherent;

impl SpeakHandler<Dog> for Inherent {
    #[inline]
    fn speak(value: &Dog) -> char {
        value.speak()
    }
}

impl SpeakHandler<Cat> for Inherent {
    #[inline]
    fn speak(value: &Cat) -> char {
        value.speak()
    }
}

/// An owning, move-only handle to an erased animal.
///
/// A `Wrap` is either valid or, after [`Wrap::take`], an empty shell that can
/// only be dropped or refilled with [`Wrap::take_from`]. Dropping a valid
/// `Wrap` runs the animal's destructor exactly once; dropping an empty one
/// does nothing.
#[derive(Debug, Default)]
pub struct Wrap {
    raw: RawWrap,
}

impl Wrap {
    /// Erases `value`, which speaks through its inherent `speak` method.
    #[inline]
    pub fn new<T>(value: T) -> Self
    where
        T: 'static,
        Inherent: SpeakHandler<T>,
    {
        Self::with_handler::<T, Inherent>(value)
    }

    /// Erases `value`, which speaks through the handler `H`.
    #[inline]
    pub fn with_handler<T, H>(value: T) -> Self
    where
        T: 'static,
        H: SpeakHandler<T>,
    {
        Self {
            raw: RawWrap::new::<T, H>(value),
        }
    }

    /// Creates an empty wrapper.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            raw: RawWrap::empty(),
        }
    }

    /// Returns `true` if this wrapper has been moved from.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Moves the animal out into a new wrapper, leaving `self` empty.
    #[inline]
    pub fn take(&mut self) -> Self {
        Self {
            raw: self.raw.take(),
        }
    }

    /// Move-assigns `source` into `self`, destroying whatever `self` held.
    #[inline]
    pub fn take_from(&mut self, source: &mut Wrap) {
        self.raw.take_from(&mut source.raw);
    }

    /// Asks the animal to speak.
    ///
    /// # Panics
    ///
    /// Panics if the wrapper is empty.
    #[inline]
    pub fn speak(&self) -> char {
        self.raw.speak()
    }

    /// Asks the animal to speak without checking that the wrapper is valid.
    ///
    /// # Safety
    ///
    /// The wrapper must not be empty.
    #[inline]
    pub unsafe fn speak_unchecked(&self) -> char {
        // SAFETY: The wrapper is not empty (guaranteed by the caller).
        unsafe { self.raw.speak_unchecked() }
    }

    /// Returns a reference to the animal if it is a `T`.
    #[inline]
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        self.raw.downcast_ref::<T>()
    }

    /// Returns the kind of the stored animal, or [`None`] if the wrapper is
    /// empty or holds something other than a [`Dog`] or a [`Cat`].
    pub fn species(&self) -> Option<Species> {
        if self.downcast_ref::<Dog>().is_some() {
            Some(Species::Dog)
        } else if self.downcast_ref::<Cat>().is_some() {
            Some(Species::Cat)
        } else {
            None
        }
    }

    /// Returns the stored index of a [`Dog`] or [`Cat`].
    pub fn index(&self) -> Option<usize> {
        self.downcast_ref::<Dog>()
            .map(Dog::index)
            .or_else(|| self.downcast_ref::<Cat>().map(Cat::index))
    }
}

/// Wraps the animal described by `draw`.
#[inline]
pub fn make(draw: Draw) -> Wrap {
    match draw.species {
        Species::Dog => Wrap::new(Dog::new(draw.index)),
        Species::Cat => Wrap::new(Cat::new(draw.index)),
    }
}

/// Builds one wrapped animal per draw, in order.
pub fn build(draws: Draws) -> Vec<Wrap> {
    let wraps: Vec<Wrap> = draws.map(make).collect();
    tracing::debug!(len = wraps.len(), "built erased collection");
    wraps
}
