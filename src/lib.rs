//! # czar
//!
//! Session engine for a judge-rotating, fill-in-the-blank party card game.
//!
//! Every round one player is the judge. The judge reveals a prompt card with
//! zero or more blanks; everyone else plays response cards from their hand
//! to fill them. Once every non-judge has played, the judge picks a winner,
//! who scores a point and becomes the next judge.
//!
//! ## Design Principles
//!
//! 1. **Plain-Data Sessions**: A `GameSession` holds card indices, never
//!    text. It clones cheaply (`im-rs`), encodes with `bincode`, and is
//!    checked against a catalog on restore.
//!
//! 2. **All-or-Nothing Operations**: Every operation validates before it
//!    mutates. A rejected call leaves the session unchanged.
//!
//! 3. **One Lock per Game**: The registry serializes each game's operations
//!    behind its own mutex. Separate games proceed in parallel.
//!
//! ## Modules
//!
//! - `core`: Player identities, RNG, configuration, errors
//! - `cards`: Card catalog, prompt and response indices, reshuffling decks
//! - `session`: The per-game state machine, rendering, view state, records
//! - `registry`: Concurrent lobby of named games and seated identities

pub mod core;
pub mod cards;
pub mod session;
pub mod registry;

// Re-export commonly used types
pub use crate::core::{
    GameError, GameResult, CatalogError, SnapshotError,
    GameRng, GameRngState,
    PlayerIdentity,
    RenderStyle, SessionConfig,
};

pub use crate::cards::{CardCatalog, CardIndex, Deck, PromptId, ResponseId};

pub use crate::session::{
    GameSession, RoundOutcome,
    PlayerRecord, Submission,
    ViewState, HandCard, RenderedSubmission, ScoreLine, WinnerBadge,
    render_submission,
};

pub use crate::registry::{AvatarProvider, FallbackStyle, GravatarAvatars, Seat, SessionRegistry};
