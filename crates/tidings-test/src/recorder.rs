//! Call recorder for listener tests.

use std::cell::RefCell;
use std::rc::Rc;

/// Shared, ordered log of listener calls.
///
/// Clones share the same log, so a clone can be moved into a listener while
/// the test keeps the original for assertions.
#[derive(Debug)]
pub struct Recorder<T> {
    calls: Rc<RefCell<Vec<(&'static str, T)>>>,
}

impl<T> Recorder<T> {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    /// Append one call.
    pub fn record(&self, label: &'static str, value: T) {
        self.calls.borrow_mut().push((label, value));
    }

    /// Number of calls recorded so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.calls.borrow().len()
    }

    /// Labels of all calls, in call order.
    #[must_use]
    pub fn labels(&self) -> Vec<&'static str> {
        self.calls.borrow().iter().map(|(label, _)| *label).collect()
    }

    /// Forget every recorded call.
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

impl<T: Clone> Recorder<T> {
    /// All calls, in call order.
    #[must_use]
    pub fn calls(&self) -> Vec<(&'static str, T)> {
        self.calls.borrow().clone()
    }
}

impl<T: 'static> Recorder<T> {
    /// A single-argument listener that records each value under `label`.
    #[must_use]
    pub fn sink(&self, label: &'static str) -> impl Fn(T) + use<T> {
        let recorder = self.clone();
        move |value: T| recorder.record(label, value)
    }
}

impl<T: 'static> Recorder<T> {
    /// A listener for borrowed payloads that records an owned copy of each
    /// value under `label`.
    #[must_use]
    pub fn borrowed_sink<B>(&self, label: &'static str) -> impl Fn(&B) + use<T, B>
    where
        B: ToOwned<Owned = T> + ?Sized + 'static,
    {
        let recorder = self.clone();
        move |value: &B| recorder.record(label, value.to_owned())
    }
}

impl<T> Clone for Recorder<T> {
    fn clone(&self) -> Self {
        Self {
            calls: Rc::clone(&self.calls),
        }
    }
}

impl<T> Default for Recorder<T> {
    fn default() -> Self {
        Self::new()
    }
}
