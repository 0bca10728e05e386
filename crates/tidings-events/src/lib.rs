//! Tidings Events - typed, in-process listener registries.
//!
//! This crate provides:
//! - [`Callback`], a shareable wrapper around one listener function
//! - [`CallbackRegistry`], the ordered listener list of one event category
//! - [`ScopedListener`], a registration that is removed when dropped
//! - [`Registries`], the context that owns one registry per category
//!
//! # Architecture
//!
//! A category is a marker type plus an argument signature, written as a
//! tuple: `(String,)`, `(u32, u32)`, `()`. Each distinct pair gets its own
//! registry, with its own identifiers, starting at `1`. Tuple payloads are
//! owned and cloned once per listener; [`Ref<T>`] broadcasts a borrowed `&T`
//! instead.
//!
//! Producers broadcast with [`CallbackRegistry::invoke`]. Consumers register
//! either manually ([`CallbackRegistry::add`] / [`CallbackRegistry::remove`])
//! or through a [`ScopedListener`].
//!
//! Everything runs synchronously on the calling thread. Registries are built
//! on `Rc` and `RefCell` and are therefore confined to one thread by the
//! compiler.
//!
//! # Example
//!
//! ```rust
//! use tidings_events::{Registries, ScopedListener};
//!
//! struct Saved;
//!
//! let registries = Registries::new();
//! let saved = registries.registry::<Saved, (String,)>();
//!
//! let first = saved.add(|path: String| println!("A saw {path}"));
//! {
//!     let _second = ScopedListener::<Saved, (String,)>::new(&registries, |path: String| {
//!         println!("B saw {path}");
//!     });
//!     saved.invoke(("a.txt".to_owned(),)); // A, then B
//! }
//! saved.invoke(("b.txt".to_owned(),)); // A only
//!
//! assert!(saved.remove(first));
//! assert!(!saved.remove(first));
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

mod callback;
mod context;
mod id;
mod macros;
mod registry;
mod scoped;
mod signature;

pub use callback::Callback;
pub use context::Registries;
pub use id::ListenerId;
pub use registry::{CallbackRegistry, RegistrySettings};
pub use scoped::ScopedListener;
pub use signature::{IntoListener, Ref, Signature};
