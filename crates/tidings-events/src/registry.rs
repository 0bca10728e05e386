//! Per-category listener registry.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::marker::PhantomData;
use std::panic::{self, AssertUnwindSafe};

use tidings_config::RegistrySection;
use tracing::{debug, trace, warn};

use crate::callback::Callback;
use crate::id::ListenerId;
use crate::signature::{IntoListener, Signature};

/// Behaviour knobs shared by every registry built from one context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySettings {
    /// Catch listener panics and keep broadcasting. Off by default.
    pub isolate_panics: bool,
    /// Warn once a registry holds more listeners than this. `0` disables.
    pub warn_listener_count: usize,
    /// Entries reserved when the registry is created.
    pub initial_capacity: usize,
}

impl Default for RegistrySettings {
    fn default() -> Self {
        Self::from(&RegistrySection::default())
    }
}

impl From<&RegistrySection> for RegistrySettings {
    fn from(section: &RegistrySection) -> Self {
        Self {
            isolate_panics: section.isolate_panics,
            warn_listener_count: section.warn_listener_count,
            initial_capacity: section.initial_capacity,
        }
    }
}

/// Ordered `(identifier, callback)` entries for one category tag `T` and
/// argument signature `S`.
///
/// The tag is a marker type that only serves to tell apart registries with
/// the same signature. Two registries with different tags never share
/// listeners or identifiers.
///
/// A registry is single-threaded: it is neither `Send` nor `Sync`.
///
/// # Re-entrancy
///
/// [`invoke`](Self::invoke) works on a snapshot of the entries taken when the
/// broadcast starts. Listeners may add, remove, or broadcast again from
/// inside their own invocation:
/// - a listener added during a broadcast is first called by the next one;
/// - a listener removed during a broadcast is still called by the current
///   one if it was registered when that broadcast started.
pub struct CallbackRegistry<T: 'static, S: Signature> {
    entries: RefCell<Vec<(ListenerId, Callback<S>)>>,
    last_id: Cell<u64>,
    over_threshold: Cell<bool>,
    settings: RegistrySettings,
    _tag: PhantomData<fn() -> T>,
}

impl<T: 'static, S: Signature> CallbackRegistry<T, S> {
    /// Create an empty registry with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::with_settings(RegistrySettings::default())
    }

    /// Create an empty registry with the given settings.
    #[must_use]
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            entries: RefCell::new(Vec::with_capacity(settings.initial_capacity)),
            last_id: Cell::new(0),
            over_threshold: Cell::new(false),
            settings,
            _tag: PhantomData,
        }
    }

    /// Register a listener and return its identifier.
    ///
    /// # Panics
    ///
    /// Panics if this registry has already issued `u64::MAX` identifiers.
    pub fn add(&self, listener: impl IntoListener<S>) -> ListenerId {
        self.add_callback(Callback::new(listener))
    }

    /// Register an already wrapped callback and return its identifier.
    ///
    /// # Panics
    ///
    /// Panics if this registry has already issued `u64::MAX` identifiers.
    pub fn add_callback(&self, callback: Callback<S>) -> ListenerId {
        let id = self.next_id();
        let len = {
            let mut entries = self.entries.borrow_mut();
            entries.push((id, callback));
            entries.len()
        };

        debug!(category = self.category(), listener_id = %id, "Listener registered");
        self.check_threshold(len);
        id
    }

    /// Remove the listener registered under `id`.
    ///
    /// Returns `true` if it was found and removed, `false` if it was already
    /// removed, never issued, or is [`ListenerId::INVALID`].
    pub fn remove(&self, id: ListenerId) -> bool {
        if !id.is_valid() {
            return false;
        }

        // The callback is dropped after the borrow ends; its captures may
        // touch this registry from their own `Drop`.
        let removed = {
            let mut entries = self.entries.borrow_mut();
            let position = entries.iter().position(|(entry_id, _)| *entry_id == id);
            position.map(|index| entries.remove(index))
        };

        let Some(_callback) = removed else {
            trace!(category = self.category(), listener_id = %id, "Listener not registered");
            return false;
        };

        debug!(category = self.category(), listener_id = %id, "Listener unregistered");
        let len = self.len();
        if len <= self.settings.warn_listener_count {
            self.over_threshold.set(false);
        }
        true
    }

    /// Call every registered listener with `args`, in registration order.
    ///
    /// Each listener receives its own clone of `args`.
    ///
    /// # Panics
    ///
    /// A panicking listener's panic is propagated to the caller and the
    /// remaining listeners are not called, unless the registry was created
    /// with [`RegistrySettings::isolate_panics`] set.
    #[allow(clippy::needless_pass_by_value)]
    pub fn invoke(&self, args: S::Args<'_>) {
        let snapshot = self.entries.borrow().clone();
        if snapshot.is_empty() {
            trace!(category = self.category(), "No listeners for broadcast");
            return;
        }

        trace!(
            category = self.category(),
            listener_count = snapshot.len(),
            "Broadcasting"
        );

        for (id, callback) in &snapshot {
            let call_args = args.clone();
            if self.settings.isolate_panics {
                let result = panic::catch_unwind(AssertUnwindSafe(|| callback.call(call_args)));
                if let Err(payload) = result {
                    warn!(
                        category = self.category(),
                        listener_id = %id,
                        panic = panic_message(payload.as_ref()),
                        "Listener panicked"
                    );
                }
            } else {
                callback.call(call_args);
            }
        }
    }

    /// `true` if no listener is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// `true` if `id` is currently registered.
    #[must_use]
    pub fn contains(&self, id: ListenerId) -> bool {
        self.entries.borrow().iter().any(|(entry_id, _)| *entry_id == id)
    }

    /// Currently registered identifiers, in registration order.
    #[must_use]
    pub fn ids(&self) -> Vec<ListenerId> {
        self.entries.borrow().iter().map(|(id, _)| *id).collect()
    }

    /// Type name of the category tag.
    #[must_use]
    pub fn category(&self) -> &'static str {
        std::any::type_name::<T>()
    }

    /// Settings this registry was created with.
    #[must_use]
    pub fn settings(&self) -> &RegistrySettings {
        &self.settings
    }

    fn next_id(&self) -> ListenerId {
        let next = self
            .last_id
            .get()
            .checked_add(1)
            .expect("listener identifier space exhausted");
        self.last_id.set(next);
        ListenerId::from_raw(next)
    }

    fn check_threshold(&self, len: usize) {
        let limit = self.settings.warn_listener_count;
        if limit == 0 || len <= limit || self.over_threshold.get() {
            return;
        }
        self.over_threshold.set(true);
        warn!(
            category = self.category(),
            listener_count = len,
            limit,
            "Listener count above threshold, possible leak"
        );
    }
}

impl<T: 'static, S: Signature> Default for CallbackRegistry<T, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static, S: Signature> fmt::Debug for CallbackRegistry<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CallbackRegistry")
            .field("category", &self.category())
            .field("listener_count", &self.len())
            .field("last_id", &self.last_id.get())
            .finish()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        *s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "<non-string panic payload>"
    }
}
