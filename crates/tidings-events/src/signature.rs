//! Argument signatures for listeners.
//!
//! A signature is a tuple of payload types. `(A, B)` means every listener of
//! the category is a `Fn(A, B)` and every broadcast supplies one `A` and one
//! `B`. Tuples of arity 0 through 8 are supported.
//!
//! Tuple payloads are owned and `'static`: each listener receives its own
//! clone of the broadcast arguments, so a broadcast to `n` listeners clones
//! the payload `n` times. To broadcast a borrowed value without cloning or
//! owning it, use [`Ref<T>`]: listeners are `Fn(&T)` and the broadcast takes
//! `(&T,)` for any lifetime.

use std::marker::PhantomData;
use std::rc::Rc;

/// Shape of the arguments a category's listeners accept.
///
/// Implemented for owned tuples and for [`Ref<T>`]. The implementing type is
/// only a key: the value actually handed to a broadcast is [`Args`].
///
/// [`Args`]: Signature::Args
pub trait Signature: 'static {
    /// Arguments of one broadcast. Cloned once per listener.
    type Args<'a>: Clone;

    /// The unsized listener type, `dyn Fn(A, B, ..)`.
    type Listener: ?Sized + 'static;

    /// Call `listener` with the arguments unpacked into positional arguments.
    fn apply(listener: &Self::Listener, args: Self::Args<'_>);
}

/// Conversion of a closure or function into a shared listener of signature `S`.
pub trait IntoListener<S: Signature> {
    /// Box the function into the shared listener representation.
    fn into_listener(self) -> Rc<S::Listener>;
}

/// Signature of a category whose single payload is borrowed.
///
/// Listeners are `Fn(&T)` for every lifetime and broadcasts take `(&T,)`, so
/// a local value can be broadcast without cloning it:
///
/// ```rust
/// use tidings_events::{Ref, Registries};
///
/// struct Sourcing;
///
/// let registries = Registries::new();
/// let _watch = registries.listen::<Sourcing, Ref<str>>(|path: &str| println!("sourcing {path}"));
///
/// let path = String::from("init.tcl");
/// registries.invoke::<Sourcing, Ref<str>>((path.as_str(),));
/// ```
pub struct Ref<T: ?Sized>(PhantomData<fn(&T)>);

impl<T: ?Sized + 'static> Signature for Ref<T> {
    type Args<'a> = (&'a T,);
    type Listener = dyn for<'a> Fn(&'a T);

    fn apply(listener: &Self::Listener, args: Self::Args<'_>) {
        let (value,) = args;
        listener(value);
    }
}

impl<Func, T> IntoListener<Ref<T>> for Func
where
    Func: for<'a> Fn(&'a T) + 'static,
    T: ?Sized + 'static,
{
    fn into_listener(self) -> Rc<dyn for<'a> Fn(&'a T)> {
        Rc::new(self)
    }
}

macro_rules! impl_signature {
    ($($ty:ident $arg:ident),*) => {
        impl<$($ty: Clone + 'static),*> Signature for ($($ty,)*) {
            type Args<'a> = Self;
            type Listener = dyn Fn($($ty),*);

            #[allow(clippy::let_unit_value)]
            fn apply(listener: &Self::Listener, args: Self::Args<'_>) {
                let ($($arg,)*) = args;
                listener($($arg),*);
            }
        }

        impl<Func, $($ty: Clone + 'static),*> IntoListener<($($ty,)*)> for Func
        where
            Func: Fn($($ty),*) + 'static,
        {
            fn into_listener(self) -> Rc<dyn Fn($($ty),*)> {
                Rc::new(self)
            }
        }
    };
}

impl_signature!();
impl_signature!(A a);
impl_signature!(A a, B b);
impl_signature!(A a, B b, C c);
impl_signature!(A a, B b, C c, D d);
impl_signature!(A a, B b, C c, D d, E e);
impl_signature!(A a, B b, C c, D d, E e, F f);
impl_signature!(A a, B b, C c, D d, E e, F f, G g);
impl_signature!(A a, B b, C c, D d, E e, F f, G g, H h);
