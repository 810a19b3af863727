//! Lobby and session registry.
//!
//! - `SessionRegistry`: Game names → sessions, identities → seats
//! - `AvatarProvider`: Display name → avatar reference

pub mod avatar;
pub mod sessions;

pub use avatar::{AvatarProvider, FallbackStyle, GravatarAvatars};
pub use sessions::{Seat, SessionRegistry};
