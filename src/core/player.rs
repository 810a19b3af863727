//! Player identification.
//!
//! A `PlayerIdentity` is the opaque, per-browser token the identity provider
//! issues. It is distinct from the display name a player picks when joining a
//! game: identities are globally unique, display names only within a game.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque player identity.
///
/// ```
/// use czar::core::PlayerIdentity;
///
/// let a = PlayerIdentity::new();
/// let b = PlayerIdentity::new();
/// assert_ne!(a, b);
///
/// let parsed: PlayerIdentity = a.to_string().parse().unwrap();
/// assert_eq!(parsed, a);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerIdentity(pub Uuid);

impl PlayerIdentity {
    /// Mint a fresh random identity.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wrap an existing UUID (for identities persisted by the caller).
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// The underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for PlayerIdentity {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for PlayerIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for PlayerIdentity {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}
