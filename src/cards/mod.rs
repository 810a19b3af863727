//! Card system: indices, catalog, and decks.
//!
//! ## Key Types
//!
//! - `PromptId` / `ResponseId`: Indices into the catalog's two card lists
//! - `CardCatalog`: Immutable card text and blank marker, loaded once
//! - `Deck`: Per-game shuffled draw pile that reshuffles itself when emptied

pub mod catalog;
pub mod deck;
pub mod definition;

pub use catalog::CardCatalog;
pub use deck::Deck;
pub use definition::{CardIndex, PromptId, ResponseId};
