//! The two kinds of animal and what they say.
//!
//! Both dispatch strategies speak from the same constant strings, so a `Dog`
//! at index `i` produces the same character whichever collection it lives in.

/// What a dog says. Indexed by the dog's stored index.
pub const BARK: &str = "barkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkbarkb";

/// What a cat says. Indexed by the cat's stored index.
pub const MEOW: &str = "meowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowmeowm";

/// Exclusive upper bound of the indices drawn when building a collection.
pub const INDEX_BOUND: usize = 32;

/// The concrete kind of an animal, independent of how it is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    /// Speaks from [`BARK`].
    Dog,
    /// Speaks from [`MEOW`].
    Cat,
}

impl Species {
    /// Returns the constant string this species speaks from.
    #[inline]
    pub const fn sound(self) -> &'static str {
        match self {
            Species::Dog => BARK,
            Species::Cat => MEOW,
        }
    }

    /// Returns the character this species says at `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx` is not smaller than the length of [`Species::sound`].
    #[inline]
    pub fn speak_at(self, idx: usize) -> char {
        char::from(self.sound().as_bytes()[idx])
    }
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Species::Dog => f.write_str("dog"),
            Species::Cat => f.write_str("cat"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sounds_cover_every_drawn_index() {
        assert_eq!(BARK.len(), 101);
        assert_eq!(MEOW.len(), 101);
        assert!(BARK.len() > INDEX_BOUND);
        assert!(BARK.is_ascii() && MEOW.is_ascii());
    }

    #[test]
    fn test_speak_at() {
        assert_eq!(Species::Dog.speak_at(0), 'b');
        assert_eq!(Species::Dog.speak_at(7), 'k');
        assert_eq!(Species::Cat.speak_at(3), 'w');
        assert_eq!(Species::Cat.speak_at(100), 'm');
    }
}
