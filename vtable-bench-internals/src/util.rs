//! Internal utility types.

/// Marker type standing in for the concrete type of an erased value.
///
/// A `NonNull<Erased>` points at a value of some type `T` that only the
/// accompanying vtable knows about. Using a distinct marker type (rather than
/// `u8` or `()`) keeps erased pointers from being confused with byte buffers
/// in signatures.
pub(crate) struct Erased;
