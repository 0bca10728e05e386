//! Scope-bound listener registration.

use std::fmt;
use std::rc::Rc;

use tracing::trace;

use crate::context::Registries;
use crate::id::ListenerId;
use crate::registry::CallbackRegistry;
use crate::signature::{IntoListener, Signature};

/// A listener registration that is removed when the handle is dropped.
///
/// The handle exclusively owns its registration: it is neither `Clone` nor
/// `Copy`, so exactly one removal happens, on drop or through
/// [`release`](Self::release), whichever comes first.
///
/// ```rust
/// use tidings_events::{Registries, ScopedListener};
///
/// struct Tick;
///
/// let registries = Registries::new();
/// {
///     let _listener = ScopedListener::<Tick, ()>::new(&registries, || println!("tick"));
///     assert_eq!(registries.registry::<Tick, ()>().len(), 1);
/// }
/// assert!(registries.registry::<Tick, ()>().is_empty());
/// ```
#[must_use = "dropping a ScopedListener immediately unregisters its listener"]
pub struct ScopedListener<T: 'static, S: Signature> {
    registry: Rc<CallbackRegistry<T, S>>,
    id: ListenerId,
}

impl<T: 'static, S: Signature> ScopedListener<T, S> {
    /// Register `listener` with the `(T, S)` registry of `registries`.
    pub fn new(registries: &Registries, listener: impl IntoListener<S>) -> Self {
        Self::attach(registries.registry::<T, S>(), listener)
    }

    /// Register `listener` with an explicit registry.
    pub fn attach(registry: Rc<CallbackRegistry<T, S>>, listener: impl IntoListener<S>) -> Self {
        let id = registry.add(listener);
        Self { registry, id }
    }

    /// Identifier of the owned registration.
    #[must_use]
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// The registry this handle is registered with.
    #[must_use]
    pub fn registry(&self) -> &Rc<CallbackRegistry<T, S>> {
        &self.registry
    }

    /// Unregister now instead of at scope end.
    ///
    /// Returns the result of the registry's `remove`.
    pub fn release(mut self) -> bool {
        let id = std::mem::replace(&mut self.id, ListenerId::INVALID);
        self.registry.remove(id)
    }
}

impl<T: 'static, S: Signature> Drop for ScopedListener<T, S> {
    fn drop(&mut self) {
        if !self.id.is_valid() {
            return;
        }
        let id = std::mem::replace(&mut self.id, ListenerId::INVALID);
        if !self.registry.remove(id) {
            trace!(
                category = self.registry.category(),
                listener_id = %id,
                "Scoped listener already gone"
            );
        }
    }
}

impl<T: 'static, S: Signature> fmt::Debug for ScopedListener<T, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedListener")
            .field("category", &self.registry.category())
            .field("id", &self.id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use tidings_test::Recorder;

    struct Resize;

    type ResizeListener = ScopedListener<Resize, (u32, u32)>;

    #[test]
    fn test_registers_on_new_and_removes_on_drop() {
        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();
        registry.add(|_: u32, _: u32| {});
        assert_eq!(registry.len(), 1);

        let handle = ResizeListener::new(&registries, |_: u32, _: u32| {});
        assert_eq!(registry.len(), 2);
        assert!(registry.contains(handle.id()));

        let id = handle.id();
        drop(handle);
        assert_eq!(registry.len(), 1);
        assert!(!registry.contains(id));
    }

    #[test]
    fn test_only_entry_leaves_registry_empty() {
        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();

        {
            let _handle = ResizeListener::new(&registries, |_: u32, _: u32| {});
            assert!(!registry.is_empty());
        }
        assert!(registry.is_empty());
    }

    #[test]
    fn test_handle_receives_broadcasts_while_alive() {
        let registries = Registries::new();
        let recorder = Recorder::<(u32, u32)>::new();
        let rec = recorder.clone();
        let handle = ResizeListener::new(&registries, move |w: u32, h: u32| {
            rec.record("resize", (w, h));
        });

        registries.invoke::<Resize, (u32, u32)>((640, 480));
        drop(handle);
        registries.invoke::<Resize, (u32, u32)>((800, 600));

        assert_eq!(recorder.calls(), vec![("resize", (640, 480))]);
    }

    #[test]
    fn test_release_removes_once() {
        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();
        let handle = ResizeListener::attach(Rc::clone(&registry), |_: u32, _: u32| {});

        assert!(handle.release());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_drop_after_manual_remove_is_harmless() {
        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();
        let handle = ResizeListener::new(&registries, |_: u32, _: u32| {});
        let other = registry.add(|_: u32, _: u32| {});

        assert!(registry.remove(handle.id()));
        drop(handle);

        assert_eq!(registry.ids(), vec![other]);
    }

    #[test]
    fn test_handles_removed_independently() {
        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();

        let first = ResizeListener::new(&registries, |_: u32, _: u32| {});
        let second = ResizeListener::new(&registries, |_: u32, _: u32| {});
        assert_ne!(first.id(), second.id());

        let second_id = second.id();
        drop(first);
        assert_eq!(registry.ids(), vec![second_id]);
    }

    #[test]
    fn test_removed_on_early_return_and_unwind() {
        fn register_and_bail(registries: &Registries, fail: bool) -> Result<(), &'static str> {
            let _handle = ResizeListener::new(registries, |_: u32, _: u32| {});
            if fail {
                return Err("bail");
            }
            Ok(())
        }

        fn register_and_panic(registries: &Registries) {
            let _handle = ResizeListener::new(registries, |_: u32, _: u32| {});
            panic!("scope unwinds");
        }

        let registries = Registries::new();
        let registry = registries.registry::<Resize, (u32, u32)>();

        assert!(register_and_bail(&registries, true).is_err());
        assert!(registry.is_empty());
        assert!(register_and_bail(&registries, false).is_ok());
        assert!(registry.is_empty());

        let unwound = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            register_and_panic(&registries);
        }));
        assert!(unwound.is_err());
        assert!(registry.is_empty());
    }

    #[test]
    fn test_listener_can_drop_its_own_handle() {
        let registries = Registries::new();
        let slot: Rc<Cell<Option<ResizeListener>>> = Rc::new(Cell::new(None));
        let recorder = Recorder::<u32>::new();

        let inner = Rc::clone(&slot);
        let rec = recorder.clone();
        slot.set(Some(ResizeListener::new(&registries, move |w: u32, _: u32| {
            rec.record("self-removing", w);
            drop(inner.take());
        })));

        registries.invoke::<Resize, (u32, u32)>((1, 1));
        registries.invoke::<Resize, (u32, u32)>((2, 2));

        assert_eq!(recorder.calls(), vec![("self-removing", 1)]);
        assert!(registries.registry::<Resize, (u32, u32)>().is_empty());
    }
}
