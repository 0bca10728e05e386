//! Registry context: one registry per (category, signature) pair.

use std::any::{Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use tidings_config::Config;
use tracing::debug;

use crate::registry::{CallbackRegistry, RegistrySettings};
use crate::scoped::ScopedListener;
use crate::signature::{IntoListener, Signature};

/// Owner of every category registry in a program.
///
/// Create one at startup and hand clones to the code that produces or
/// consumes events. Clones share the same registries. A registry is created
/// the first time it is asked for and then kept for as long as the context
/// (or anyone holding the registry itself) is alive.
///
/// ```rust
/// use tidings_events::Registries;
///
/// struct Saved;
///
/// let registries = Registries::new();
/// let saved = registries.registry::<Saved, (String,)>();
/// let id = saved.add(|path: String| println!("saved {path}"));
///
/// saved.invoke(("notes.txt".to_owned(),));
/// assert!(saved.remove(id));
///
/// // Same pair, same instance.
/// assert!(registries.registry::<Saved, (String,)>().is_empty());
/// ```
#[derive(Clone, Default)]
pub struct Registries {
    inner: Rc<Inner>,
}

#[derive(Default)]
struct Inner {
    settings: RegistrySettings,
    registries: RefCell<HashMap<TypeId, Rc<dyn Any>>>,
}

impl Registries {
    /// Create an empty context with default registry settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty context whose registries use `settings`.
    #[must_use]
    pub fn with_settings(settings: RegistrySettings) -> Self {
        Self {
            inner: Rc::new(Inner {
                settings,
                registries: RefCell::new(HashMap::new()),
            }),
        }
    }

    /// Create an empty context from loaded configuration.
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self::with_settings(RegistrySettings::from(&config.registry))
    }

    /// Get the registry for tag `T` and signature `S`, creating it on first
    /// access.
    #[must_use]
    pub fn registry<T: 'static, S: Signature>(&self) -> Rc<CallbackRegistry<T, S>> {
        let key = TypeId::of::<CallbackRegistry<T, S>>();

        let existing = self.inner.registries.borrow().get(&key).cloned();
        if let Some(Ok(registry)) = existing.map(|any| any.downcast::<CallbackRegistry<T, S>>()) {
            return registry;
        }

        let registry = Rc::new(CallbackRegistry::<T, S>::with_settings(
            self.inner.settings.clone(),
        ));
        self.inner
            .registries
            .borrow_mut()
            .insert(key, Rc::clone(&registry) as Rc<dyn Any>);

        debug!(
            category = registry.category(),
            signature = std::any::type_name::<S>(),
            "Category registry created"
        );
        registry
    }

    /// Register `listener` with the `(T, S)` registry for the lifetime of the
    /// returned handle.
    pub fn listen<T: 'static, S: Signature>(
        &self,
        listener: impl IntoListener<S>,
    ) -> ScopedListener<T, S> {
        ScopedListener::new(self, listener)
    }

    /// Broadcast `args` on the `(T, S)` registry.
    pub fn invoke<T: 'static, S: Signature>(&self, args: S::Args<'_>) {
        self.registry::<T, S>().invoke(args);
    }

    /// Number of registries created so far.
    #[must_use]
    pub fn category_count(&self) -> usize {
        self.inner.registries.borrow().len()
    }

    /// Settings applied to every registry this context creates.
    #[must_use]
    pub fn settings(&self) -> &RegistrySettings {
        &self.inner.settings
    }
}

impl fmt::Debug for Registries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registries")
            .field("category_count", &self.category_count())
            .field("settings", &self.inner.settings)
            .finish()
    }
}
