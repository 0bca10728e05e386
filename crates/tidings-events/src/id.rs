//! Listener identifiers.

use std::fmt;

/// Identifier returned by registration, used to request removal.
///
/// Identifiers are issued per registry starting at `1`, strictly increasing,
/// and never reused. `0` is reserved as [`ListenerId::INVALID`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ListenerId(u64);

impl ListenerId {
    /// The reserved "no registration" identifier. Never issued.
    pub const INVALID: Self = Self(0);

    /// Build an identifier from its raw value.
    ///
    /// Removal with an identifier that was never issued is a no-op, so this
    /// is safe to expose.
    #[must_use]
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// `false` only for [`ListenerId::INVALID`].
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 != 0
    }
}

impl Default for ListenerId {
    fn default() -> Self {
        Self::INVALID
    }
}

impl From<ListenerId> for u64 {
    fn from(id: ListenerId) -> Self {
        id.0
    }
}

impl fmt::Display for ListenerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener:{}", self.0)
    }
}
