//! Version identifiers.
//!
//! Every version in a history is addressed by a [`VersionId`]. Identifiers are
//! plain integers assigned by whoever records the history; the layout engine
//! only requires them to be unique within a graph.

use std::fmt;

use serde::Deserialize;

/// Identifier of a single version in a version history.
///
/// # Examples
///
/// ```
/// # use vertree_core::identifier::VersionId;
/// let id = VersionId::new(42);
/// assert_eq!(id.get(), 42);
/// assert_eq!(id.to_string(), "42");
/// assert!(VersionId::ROOT.is_root());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
#[serde(transparent)]
pub struct VersionId(u64);

impl VersionId {
    /// The implicit root of every version history.
    pub const ROOT: VersionId = VersionId(0);

    /// Creates a version identifier from its raw value.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw integer value.
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns `true` if this is [`VersionId::ROOT`].
    pub fn is_root(self) -> bool {
        self == Self::ROOT
    }
}

impl From<u64> for VersionId {
    fn from(raw: u64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
