//! Module containing the type-erased wrapper

mod raw;
pub(crate) mod storage;
pub(crate) mod vtable;

pub use self::raw::RawWrap;
