//! Prelude module - commonly used types for convenient import.
//!
//! Use `use tidings_events::prelude::*;` to import all essential types.
//!
//! # Example
//!
//! ```rust
//! use tidings_events::prelude::*;
//!
//! category! {
//!     pub Tick(u64) => TickListeners, ScopedTickListener;
//! }
//!
//! let registries = Registries::new();
//! let _listener = ScopedTickListener::new(&registries, |n: u64| println!("tick {n}"));
//! registries.invoke::<Tick, (u64,)>((1,));
//! ```

// Registry context
pub use crate::Registries;

// Registries and handles
pub use crate::{CallbackRegistry, ListenerId, RegistrySettings, ScopedListener};

// Callbacks and signatures
pub use crate::{Callback, IntoListener, Ref, Signature};

// Category declaration
pub use crate::category;
