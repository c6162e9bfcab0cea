//! Version data structures.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Message reported for versions whose `message.txt` is missing.
pub const NO_MESSAGE: &str = "(no message)";

/// Sequential identifier of a version. Version 0 is created by `init`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct VersionId(u64);

impl VersionId {
    /// The initial, empty version.
    pub const INITIAL: VersionId = VersionId(0);

    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the raw id.
    pub fn get(self) -> u64 {
        self.0
    }

    /// The id allocated after this one, or `None` when ids are exhausted.
    pub fn next(self) -> Option<Self> {
        self.0.checked_add(1).map(Self)
    }

    /// The id before this one, or `None` for version 0.
    pub fn prev(self) -> Option<Self> {
        self.0.checked_sub(1).map(Self)
    }
}

impl std::fmt::Display for VersionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for VersionId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl FromStr for VersionId {
    type Err = StoreError;

    /// Decimal digits with an optional leading `+`. Surrounding whitespace
    /// is not accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u64>()
            .map(Self)
            .map_err(|_| StoreError::InvalidVersionNumber(s.to_string()))
    }
}

/// An immutable version record.
///
/// File contents are not held in memory; read them through
/// [`VersionStore::read_file`](crate::VersionStore::read_file).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    /// Sequential id of this version.
    pub id: VersionId,

    /// Full message text. The first line is the summary.
    pub message: String,

    /// Names of the files captured in this version, sorted.
    pub files: Vec<String>,
}

impl Version {
    /// First line of the message.
    pub fn summary(&self) -> &str {
        summary_of(&self.message)
    }

    /// Check if this version captured a specific file.
    pub fn contains_file(&self, name: &str) -> bool {
        self.files.iter().any(|f| f == name)
    }
}

/// First line of a message.
pub(crate) fn summary_of(message: &str) -> &str {
    message.lines().next().unwrap_or("")
}
