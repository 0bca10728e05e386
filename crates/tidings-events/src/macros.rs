//! Category declaration macro.

/// Declare one or more event categories.
///
/// Each declaration expands to a zero-sized tag struct plus two aliases: the
/// category's [`CallbackRegistry`](crate::CallbackRegistry) and its
/// [`ScopedListener`](crate::ScopedListener). A parenthesised list of types
/// declares an owned tuple signature; a single `&T` declares the borrowed
/// [`Ref<T>`](crate::Ref) signature.
///
/// ```rust
/// use tidings_events::{Ref, Registries, category};
///
/// category! {
///     /// A script file started sourcing.
///     pub SourcingStarted(&str) => SourcingStartedListeners, ScopedSourcingStartedListener;
///
///     /// Progress update as (done, total).
///     pub Progress(u64, u64) => ProgressListeners, ScopedProgressListener;
/// }
///
/// let registries = Registries::new();
/// let _watch = ScopedSourcingStartedListener::new(&registries, |path: &str| {
///     println!("sourcing {path}");
/// });
///
/// let path = String::from("init.tcl");
/// let started = registries.registry::<SourcingStarted, Ref<str>>();
/// started.invoke((path.as_str(),));
/// ```
#[macro_export]
macro_rules! category {
    (@declare [$(#[$meta:meta])*] $vis:vis $tag:ident [$sig:ty] $listeners:ident $scoped:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
        $vis struct $tag;

        #[doc = concat!("Listener registry for [`", stringify!($tag), "`].")]
        $vis type $listeners = $crate::CallbackRegistry<$tag, $sig>;

        #[doc = concat!("Scoped listener for [`", stringify!($tag), "`].")]
        $vis type $scoped = $crate::ScopedListener<$tag, $sig>;
    };

    () => {};

    (
        $(#[$meta:meta])*
        $vis:vis $tag:ident ( & $arg:ty ) => $listeners:ident, $scoped:ident;
        $($rest:tt)*
    ) => {
        $crate::category!(@declare [$(#[$meta])*] $vis $tag [$crate::Ref<$arg>] $listeners $scoped);
        $crate::category!($($rest)*);
    };

    (
        $(#[$meta:meta])*
        $vis:vis $tag:ident ( $($arg:ty),* $(,)? ) => $listeners:ident, $scoped:ident;
        $($rest:tt)*
    ) => {
        $crate::category!(@declare [$(#[$meta])*] $vis $tag [($($arg,)*)] $listeners $scoped);
        $crate::category!($($rest)*);
    };
}
