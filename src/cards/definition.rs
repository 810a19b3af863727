//! Card identifiers - indices into the catalog.
//!
//! Prompt cards and response cards live in separate catalog sequences, so
//! each kind gets its own index newtype. A `Deck` is generic over the kind
//! through the `CardIndex` trait.

use serde::{Deserialize, Serialize};

/// An index into one of the catalog's card sequences.
pub trait CardIndex: Copy + Eq + std::fmt::Debug {
    /// Wrap a raw catalog index.
    fn from_raw(raw: u32) -> Self;

    /// The raw catalog index.
    fn raw(self) -> u32;

    /// The raw index as a `usize` for slice access.
    fn index(self) -> usize {
        self.raw() as usize
    }
}

/// Index of a prompt card (the card with blanks, read by the judge).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PromptId(pub u32);

impl PromptId {
    /// Create a new prompt ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl CardIndex for PromptId {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for PromptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Prompt({})", self.0)
    }
}

/// Index of a response card (held in hands and submitted).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResponseId(pub u32);

impl ResponseId {
    /// Create a new response ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }
}

impl CardIndex for ResponseId {
    fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for ResponseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Response({})", self.0)
    }
}
