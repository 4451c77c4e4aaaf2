//! # inplace_fn: Allocation-Free Function Wrappers
//!
//! [`InplaceFunction`] is a polymorphic function wrapper, like a
//! `Box<dyn FnMut>`, that stores its target inline in a fixed-size buffer and
//! never allocates. It suits code paths where the heap is unavailable or too
//! slow: embedded firmware, real-time callbacks, interrupt handlers.
//!
//! ## Core Concept
//!
//! Storing a callable selects, per concrete type, an *invoker* that calls it
//! and a *manager* that drops, moves or clones it. The wrapper keeps those two
//! function pointers next to the inline storage and forgets the concrete type.
//! A callable that does not fit the storage is a build error, never a runtime
//! fallback.
//!
//! ## Quick Start
//!
//! ```rust
//! use inplace_fn::{EmptyFunctionError, InplaceFunction};
//! use inplace_fn::space::S4;
//!
//! let mut on_tick: InplaceFunction<fn(u32) -> u32, S4> = InplaceFunction::empty();
//! assert_eq!(on_tick.call(1), Err(EmptyFunctionError));
//!
//! let step = 10;
//! on_tick.set(move |now: u32| now + step);
//! assert_eq!(on_tick.call(1), Ok(11));
//! ```
//!
//! ## Configuration
//!
//! Everything is fixed at compile time by the type parameters of
//! `InplaceFunction<Sig, Space, Mode>`:
//!
//! - **`Sig`**: the call signature, spelled as a function pointer type
//!   (`fn()`, `fn(u8) -> bool`, up to eight arguments).
//! - **`Space`**: any type; its size is the capacity and its alignment the
//!   storage alignment. See [`space`] for ready-made spaces. Defaults to
//!   [`space::DefaultSpace`], 32 bytes with 16-byte alignment.
//! - **`Mode`**: [`Copyable`] (default) implements [`Clone`] and requires
//!   `Clone` targets, [`MoveOnly`] accepts any target but cannot be cloned.
//!
//! ### Feature Flags
//!
//! - **`std`** (enabled by default)
//!   - Links to the standard library
//!   - Disable for `#![no_std]` environments: `default-features = false`
//!
//! - **`tracing`** (optional)
//!   - Emits `tracing` events at `TRACE` level when targets are stored,
//!     moved, cloned, swapped or destroyed
//!
//! ## Widening
//!
//! A function can be moved or cloned into one with a larger storage:
//!
//! ```rust
//! use inplace_fn::InplaceFunction;
//! use inplace_fn::space::{S1, S8};
//!
//! let id = 3usize;
//! let mut small: InplaceFunction<fn() -> usize, S1> = InplaceFunction::new(move || id);
//!
//! let mut copy: InplaceFunction<fn() -> usize, S8> = small.resize_cloned();
//! let mut moved: InplaceFunction<fn() -> usize, S8> = InplaceFunction::empty();
//! moved.move_from(&mut small);
//!
//! assert_eq!(copy.call(), Ok(3));
//! assert_eq!(moved.call(), Ok(3));
//! assert!(small.is_empty());
//! ```
//!
//! ## Build-Time Rejections
//!
//! Misconfigurations never reach runtime. A target with an alignment the
//! storage cannot honor does not build:
//!
//! ```compile_fail
//! use inplace_fn::InplaceFunction;
//! use inplace_fn::space::{Aligned, A1};
//!
//! let wide = 1u64;
//! let f: InplaceFunction<fn() -> u64, Aligned<A1, 64>> = InplaceFunction::new(move || wide);
//! ```
//!
//! Neither does a copyable function around a target that cannot be cloned:
//!
//! ```compile_fail
//! use inplace_fn::InplaceFunction;
//!
//! struct Handle(u32);
//!
//! let handle = Handle(1);
//! let f: InplaceFunction<fn() -> u32> = InplaceFunction::new(move || {
//!     let handle = &handle;
//!     handle.0
//! });
//! ```
//!
//! Use [`MoveOnly`] for those:
//!
//! ```rust
//! use inplace_fn::{InplaceFunction, MoveOnly};
//! use inplace_fn::space::DefaultSpace;
//!
//! struct Handle(u32);
//!
//! let handle = Handle(1);
//! let mut f: InplaceFunction<fn() -> u32, DefaultSpace, MoveOnly> =
//!     InplaceFunction::new(move || {
//!         let handle = &handle;
//!         handle.0
//!     });
//! assert_eq!(f.call(), Ok(1));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(missing_docs)]
#![deny(clippy::as_conversions)]

#[cfg(all(test, not(feature = "std")))]
extern crate std;

mod erased;
mod error;
mod function;
mod signature;
pub mod space;
mod trace;

pub use crate::erased::{Copyable, CopyableOp, Manage, Manager, Mode, MoveOnly, MoveOnlyOp};
pub use crate::error::EmptyFunctionError;
pub use crate::function::{InplaceFunction, Null};
pub use crate::signature::{Callable, Signature};
