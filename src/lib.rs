#![deny(
    missing_docs,
    clippy::alloc_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::std_instead_of_core,
    clippy::missing_safety_doc,
    clippy::undocumented_unsafe_blocks,
    clippy::multiple_unsafe_ops_per_block,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! A microbenchmark of two ways to call a method on a heterogeneous
//! collection.
//!
//! ## Overview
//!
//! Both strategies store the same animals, a random mix of dogs and cats, and
//! ask each of them to `speak`, which returns one character of a fixed string
//! at the animal's index:
//!
//! - **[`dynamic`]**: `Vec<Box<dyn Animal>>`, dispatched through the vtables
//!   the compiler generates for trait objects.
//! - **[`erased`]**: `Vec<Wrap>`, where each [`Wrap`] owns a plain struct in
//!   its own allocation and dispatches through a function-pointer table it
//!   built itself. The unsafe machinery lives in the
//!   [`vtable-bench-internals`] crate.
//!
//! The [`driver`] builds each collection from the same seeded [`Draws`] and
//! times one full pass of `speak` over it with a [`ScopeTimer`], printing one
//! line per pass:
//!
//! ```text
//! dynamic: 0.842s
//! static: 0.611s
//! ```
//!
//! ## Quick Example
//!
//! ```
//! use vtable_bench::{draws::Draws, dynamic, erased};
//!
//! let animals = dynamic::build(Draws::new(0, 16));
//! let wraps = erased::build(Draws::new(0, 16));
//!
//! for (animal, wrap) in animals.iter().zip(&wraps) {
//!     assert_eq!(animal.speak(), wrap.speak());
//! }
//! ```
//!
//! ## Configuration
//!
//! See [`config`] for the `VTABLE_BENCH` environment variable. Logging goes
//! through [`tracing`]; the binary prints it to standard error when
//! `RUST_LOG` asks for it.
//!
//! [`vtable-bench-internals`]: vtable_bench_internals
//! [`Wrap`]: erased::Wrap
//! [`Draws`]: draws::Draws
//! [`ScopeTimer`]: timing::ScopeTimer

extern crate alloc;

pub mod animal;
pub mod config;
pub mod draws;
pub mod driver;
pub mod dynamic;
pub mod erased;
pub mod timing;

pub use config::BenchConfig;
