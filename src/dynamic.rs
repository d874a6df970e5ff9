//! Animals behind native trait objects.
//!
//! Each element is a separately boxed `Dog` or `Cat`, and `speak` is resolved
//! through the compiler-generated vtable carried by the `Box<dyn Animal>`.

use alloc::{boxed::Box, vec::Vec};

use crate::{
    animal::Species,
    draws::{Draw, Draws},
};

/// The shared capability of every animal in a dynamic collection.
pub trait Animal {
    /// Returns the character at this animal's index in its sound.
    fn speak(&self) -> char;

    /// Returns the concrete kind of this animal.
    fn species(&self) -> Species;

    /// Returns the stored index.
    fn index(&self) -> usize;
}

/// A dog that barks at a fixed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dog {
    idx: usize,
}

impl Dog {
    /// Creates a dog speaking at `idx`.
    pub const fn new(idx: usize) -> Self {
        Self { idx }
    }
}

impl Animal for Dog {
    fn speak(&self) -> char {
        Species::Dog.speak_at(self.idx)
    }

    fn species(&self) -> Species {
        Species::Dog
    }

    fn index(&self) -> usize {
        self.idx
    }
}

/// A cat that meows at a fixed index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cat {
    idx: usize,
}

impl Cat {
    /// Creates a cat speaking at `idx`.
    pub const fn new(idx: usize) -> Self {
        Self { idx }
    }
}

impl Animal for Cat {
    fn speak(&self) -> char {
        Species::Cat.speak_at(self.idx)
    }

    fn species(&self) -> Species {
        Species::Cat
    }

    fn index(&self) -> usize {
        self.idx
    }
}

/// Boxes the animal described by `draw`.
#[inline]
pub fn make(draw: Draw) -> Box<dyn Animal> {
    match draw.species {
        Species::Dog => Box::new(Dog::new(draw.index)),
        Species::Cat => Box::new(Cat::new(draw.index)),
    }
}

/// Builds one boxed animal per draw, in order.
pub fn build(draws: Draws) -> Vec<Box<dyn Animal>> {
    let animals: Vec<Box<dyn Animal>> = draws.map(make).collect();
    tracing::debug!(len = animals.len(), "built dynamic collection");
    animals
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dog_and_cat_speak() {
        let dog: Box<dyn Animal> = Box::new(Dog::new(3));
        let cat: Box<dyn Animal> = Box::new(Cat::new(3));

        assert_eq!(dog.speak(), 'k');
        assert_eq!(cat.speak(), 'w');
        assert_eq!(dog.species(), Species::Dog);
        assert_eq!(cat.species(), Species::Cat);
    }

    #[test]
    fn test_make_follows_draw() {
        let animal = make(Draw {
            species: Species::Cat,
            index: 9,
        });
        assert_eq!(animal.species(), Species::Cat);
        assert_eq!(animal.index(), 9);
        assert_eq!(animal.speak(), Species::Cat.speak_at(9));
    }

    #[test]
    fn test_build_len() {
        for count in [0, 1, 5, 300] {
            let animals = build(Draws::new(0, count));
            assert_eq!(animals.len(), count);
        }
    }

    #[test]
    fn test_build_matches_draws() {
        let animals = build(Draws::new(0, 64));
        for (animal, draw) in animals.iter().zip(Draws::new(0, 64)) {
            assert_eq!(animal.species(), draw.species);
            assert_eq!(animal.index(), draw.index);
        }
    }
}
