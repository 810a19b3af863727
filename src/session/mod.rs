//! Game sessions: the per-game state machine and its derived reads.
//!
//! ## Key Types
//!
//! - `GameSession`: Decks, players, prompt, judge, submissions, round
//! - `PlayerRecord`: Hand, wins, display name, avatar
//! - `Submission`: Cards a player played this round
//! - `ViewState`: One player's rendered view of a game
//!
//! Sessions hold catalog indices only. Operations that need card text take
//! the shared `CardCatalog` by reference, which keeps a session plain data
//! that can be cloned, encoded and restored.

pub mod game;
pub mod player;
pub mod render;
pub mod snapshot;
pub mod view;

pub use game::{GameSession, RoundOutcome};
pub use player::{PlayerRecord, Submission};
pub use render::render_submission;
pub use view::{HandCard, RenderedSubmission, ScoreLine, ViewState, WinnerBadge};
