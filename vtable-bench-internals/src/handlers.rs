//! Handlers that define how an erased value speaks.
//!
//! The wrapper never requires its stored type to implement a shared trait.
//! Instead, a handler type is chosen at construction time and its
//! [`SpeakHandler::speak`] function is baked into the vtable. This keeps the
//! stored values plain structs with no dispatch machinery of their own.

/// Trait for routing the erased `speak` call to a concrete type.
///
/// # Examples
///
/// ```
/// use vtable_bench_internals::{RawWrap, handlers::SpeakHandler};
///
/// struct Parrot {
///     word: &'static str,
/// }
///
/// struct FirstLetter;
///
/// impl SpeakHandler<Parrot> for FirstLetter {
///     fn speak(value: &Parrot) -> char {
///         value.word.chars().next().unwrap_or(' ')
///     }
/// }
///
/// let wrap = RawWrap::new::<Parrot, FirstLetter>(Parrot { word: "hello" });
/// assert_eq!(wrap.speak(), 'h');
/// ```
pub trait SpeakHandler<T>: 'static {
    /// Returns the character the value produces when asked to speak.
    fn speak(value: &T) -> char;
}
