//! Callback wrapper.

use std::fmt;
use std::rc::Rc;

use crate::signature::{IntoListener, Signature};

/// One listener function of signature `S`, ready to be invoked.
///
/// Cloning a `Callback` is cheap and shares the wrapped function.
pub struct Callback<S: Signature> {
    func: Rc<S::Listener>,
}

impl<S: Signature> Callback<S> {
    /// Wrap a closure or function.
    ///
    /// ```rust
    /// use tidings_events::Callback;
    ///
    /// let greet = Callback::<(String,)>::new(|name: String| println!("hello {name}"));
    /// greet.call(("world".to_owned(),));
    /// ```
    pub fn new(func: impl IntoListener<S>) -> Self {
        Self {
            func: func.into_listener(),
        }
    }

    /// Forward `args` to the wrapped function.
    pub fn call(&self, args: S::Args<'_>) {
        S::apply(&self.func, args);
    }

    /// `true` if both callbacks wrap the same function allocation.
    #[must_use]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.func, &other.func)
    }
}

impl<S: Signature> Clone for Callback<S> {
    fn clone(&self) -> Self {
        Self {
            func: Rc::clone(&self.func),
        }
    }
}

impl<S: Signature> fmt::Debug for Callback<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Callback")
            .field("signature", &std::any::type_name::<S>())
            .finish_non_exhaustive()
    }
}
