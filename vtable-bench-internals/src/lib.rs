#![no_std]
#![forbid(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::missing_docs_in_private_items,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
#![allow(rustdoc::private_intra_doc_links)]
//! Internal implementation crate for [`vtable-bench`].
//!
//! # Overview
//!
//! This crate contains the type-erased wrapper that the benchmark compares
//! against native trait objects. Instead of relying on `dyn Trait`, the
//! wrapper allocates its value by hand, constructs it in place, and resolves
//! behavior through a function-pointer table that it builds itself.
//!
//! # Architecture
//!
//! - **[`wrap`]**: Type-erased, single-owner storage
//!   - [`RawWrap`]: Owned wrapper holding an untyped data pointer and a
//!     pointer to its own dispatch table
//!   - [`WrapVtable`]: Function pointers instantiated for one concrete type
//!   - [`storage`]: Aligned allocation and release of the erased value
//!
//! - **[`handlers`]**: The [`SpeakHandler`] trait that tells the vtable how a
//!   concrete type speaks
//!
//! # Safety Strategy
//!
//! When a `Dog` is erased to an untyped pointer, the only thing that still
//! knows it is a `Dog` is the vtable built next to it. The crate keeps the two
//! in sync through:
//!
//! - **Module-based encapsulation**: the pointer fields of [`RawWrap`] are
//!   private to a single file, so the pairing of data and vtable can only be
//!   established by [`RawWrap::new`] and only be broken by moving both
//!   pointers out together
//! - **Monomorphized thunks**: every vtable entry is a generic function
//!   instantiated with the same `T` the data was written as
//! - **Documented vtable contracts**: every `unsafe` vtable method states when
//!   it can be called
//!
//! [`vtable-bench`]: https://docs.rs/vtable-bench
//! [`wrap`]: crate::wrap
//! [`storage`]: crate::wrap::storage
//! [`WrapVtable`]: crate::wrap::vtable::WrapVtable
//! [`SpeakHandler`]: handlers::SpeakHandler

extern crate alloc;

pub mod handlers;
mod util;
mod wrap;

pub use wrap::RawWrap;
