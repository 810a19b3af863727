//! The session registry: the only sharing boundary between games.
//!
//! `SessionRegistry` maps game names to sessions and player identities to
//! seats. Each session sits behind its own mutex; every state-machine call
//! holds exactly one game's lock for load → operate → store, so submissions
//! and resolutions for one game never interleave while other games proceed
//! in parallel. The maps themselves are concurrent and never held across a
//! session lock.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::avatar::{AvatarProvider, GravatarAvatars};
use crate::cards::{CardCatalog, ResponseId};
use crate::core::{GameError, GameResult, GameRng, PlayerIdentity, SessionConfig, SnapshotError};
use crate::session::{GameSession, RoundOutcome, ViewState};

/// Where an identity is playing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seat {
    pub game: String,
    pub name: String,
}

/// Concurrent map of games and player seats.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use czar::cards::CardCatalog;
/// use czar::core::SessionConfig;
/// use czar::registry::SessionRegistry;
///
/// let catalog = CardCatalog::new(
///     vec!["Why _?".to_string()],
///     (0..20).map(|i| format!("Card {}", i)).collect(),
///     "_",
/// ).unwrap();
/// let registry = SessionRegistry::new(Arc::new(catalog), SessionConfig::default().with_seed(1));
///
/// let ada = registry.issue_identity();
/// registry.host_game("friday", ada, "Ada").unwrap();
/// registry.ensure_dealt("friday", "Ada").unwrap();
///
/// let view = registry.current_view_state("friday", ada).unwrap();
/// assert!(view.is_judge);
/// assert_eq!(view.hand.len(), 10);
/// ```
pub struct SessionRegistry {
    catalog: Arc<CardCatalog>,
    config: SessionConfig,
    avatars: Box<dyn AvatarProvider>,
    games: DashMap<String, Arc<Mutex<GameSession>>>,
    identities: DashMap<PlayerIdentity, Seat>,
    rng: Mutex<GameRng>,
}

impl SessionRegistry {
    /// Create an empty registry with Gravatar avatars.
    #[must_use]
    pub fn new(catalog: Arc<CardCatalog>, config: SessionConfig) -> Self {
        let avatars = GravatarAvatars::new(config.avatar_size);
        let rng = GameRng::from_seed_or_entropy(config.seed);
        Self {
            catalog,
            config,
            avatars: Box::new(avatars),
            games: DashMap::new(),
            identities: DashMap::new(),
            rng: Mutex::new(rng),
        }
    }

    /// Replace the avatar service.
    #[must_use]
    pub fn with_avatars(mut self, avatars: impl AvatarProvider + 'static) -> Self {
        self.avatars = Box::new(avatars);
        self
    }

    #[must_use]
    pub fn catalog(&self) -> &Arc<CardCatalog> {
        &self.catalog
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    // === Lookup ===

    /// Mint a fresh player identity.
    #[must_use]
    pub fn issue_identity(&self) -> PlayerIdentity {
        PlayerIdentity::new()
    }

    /// Resolve an identity to its seat.
    pub fn seat(&self, identity: PlayerIdentity) -> GameResult<Seat> {
        self.identities
            .get(&identity)
            .map(|seat| seat.clone())
            .ok_or_else(|| GameError::not_found(format!("unknown player {}", identity)))
    }

    /// Names of all games, sorted.
    #[must_use]
    pub fn game_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.games.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    #[must_use]
    pub fn contains_game(&self, game: &str) -> bool {
        self.games.contains_key(game)
    }

    fn session(&self, game: &str) -> GameResult<Arc<Mutex<GameSession>>> {
        // Clone the handle so the map shard is released before locking.
        self.games
            .get(game)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| GameError::not_found(format!("no game named '{}'", game)))
    }

    /// Run `f` on a game under its lock.
    fn with_session<T>(
        &self,
        game: &str,
        f: impl FnOnce(&mut GameSession) -> GameResult<T>,
    ) -> GameResult<T> {
        let session = self.session(game)?;
        let mut guard = session.lock();
        f(&mut *guard)
    }

    /// Read a game under its lock.
    pub fn read<T>(&self, game: &str, f: impl FnOnce(&GameSession) -> T) -> GameResult<T> {
        let session = self.session(game)?;
        let guard = session.lock();
        Ok(f(&*guard))
    }

    /// Check `identity` is seated in `game`.
    fn seated_in(&self, game: &str, identity: PlayerIdentity) -> GameResult<Seat> {
        let seat = self.seat(identity)?;
        if seat.game != game {
            return Err(GameError::not_found(format!(
                "player {} is not seated in game '{}'",
                identity, game
            )));
        }
        Ok(seat)
    }

    // === Lobby ===

    /// Create a game with freshly shuffled decks and no players.
    pub fn create_game(&self, name: &str) -> GameResult<()> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::invalid("game name must not be empty"));
        }

        match self.games.entry(name.to_string()) {
            Entry::Occupied(_) => {
                debug!(game = name, "Rejected create: name taken");
                Err(GameError::conflict(format!("game '{}' already exists", name)))
            }
            Entry::Vacant(slot) => {
                let rng = self.rng.lock().fork();
                let session = GameSession::new(name, &self.catalog, self.config.hand_size, rng);
                slot.insert(Arc::new(Mutex::new(session)));
                info!(game = name, "Game created");
                Ok(())
            }
        }
    }

    /// Seat `identity` in `game` as `display_name`.
    ///
    /// The first player into a fresh game becomes its judge. If the identity
    /// was seated in another game, its seat moves here and its player record
    /// leaves that game, so the round there is not left waiting on it.
    pub fn join_game(&self, game: &str, identity: PlayerIdentity, display_name: &str) -> GameResult<()> {
        let display_name = display_name.trim();
        let avatar = self.avatars.avatar_for(display_name);

        self.with_session(game, |session| {
            session.add_player(identity, display_name, avatar)
        })?;

        let seat = Seat {
            game: game.to_string(),
            name: display_name.to_string(),
        };
        if let Some(previous) = self.identities.insert(identity, seat) {
            debug!(%identity, from = %previous.game, to = game, "Player moved games");
            // One game lock at a time: the new seat is settled before the old
            // game is touched.
            if let Err(err) = self.with_session(&previous.game, |old| old.remove_player(identity)) {
                debug!(%identity, game = %previous.game, %err, "Previous seat already gone");
            }
        }
        Ok(())
    }

    /// Create a game and seat its first player (who becomes judge).
    pub fn host_game(&self, game: &str, identity: PlayerIdentity, display_name: &str) -> GameResult<()> {
        if display_name.trim().is_empty() {
            return Err(GameError::invalid("display name must not be empty"));
        }
        self.create_game(game)?;
        self.join_game(game.trim(), identity, display_name)
    }

    // === State machine ===

    /// Deal a hand (and the first prompt) if not yet dealt.
    pub fn ensure_dealt(&self, game: &str, display_name: &str) -> GameResult<usize> {
        self.with_session(game, |session| session.ensure_dealt(display_name))
    }

    /// `identity`'s rendered view of `game`.
    pub fn current_view_state(&self, game: &str, identity: PlayerIdentity) -> GameResult<ViewState> {
        self.seated_in(game, identity)?;
        self.with_session(game, |session| {
            session.view_state(&self.catalog, &self.config.render, identity)
        })
    }

    /// Submit response cards for the current prompt.
    pub fn submit(&self, game: &str, identity: PlayerIdentity, chosen: &[ResponseId]) -> GameResult<()> {
        self.seated_in(game, identity)?;
        self.with_session(game, |session| session.submit(&self.catalog, identity, chosen))
    }

    /// Whether the judge of `game` can pick a winner.
    pub fn can_resolve(&self, game: &str) -> GameResult<bool> {
        self.read(game, GameSession::can_resolve)
    }

    /// The judge (`identity`) picks `winner` and the game advances a round.
    pub fn resolve_round(
        &self,
        game: &str,
        identity: PlayerIdentity,
        winner: PlayerIdentity,
    ) -> GameResult<RoundOutcome> {
        self.seated_in(game, identity)?;
        self.with_session(game, |session| {
            session.resolve_round(&self.catalog, identity, winner)
        })
    }

    // === Persistence boundary ===

    /// Encode a game's current state.
    ///
    /// The session is cloned under its lock and encoded after release.
    pub fn snapshot(&self, game: &str) -> Result<Vec<u8>, SnapshotError> {
        let copy = self.read(game, GameSession::clone)?;
        let bytes = copy.to_bytes()?;
        debug!(game, bytes = bytes.len(), "Snapshot taken");
        Ok(bytes)
    }

    /// Register a game from a record and re-seat its players.
    ///
    /// The record must fit this registry's catalog and hold a consistent
    /// game. A name already in use, or a recorded player already seated in
    /// some game here, is a `Conflict`. Returns the restored game's name.
    pub fn restore(&self, bytes: &[u8]) -> Result<String, SnapshotError> {
        let session = GameSession::from_bytes(bytes)?;
        session.check_invariants()?;
        session.check_catalog(&self.catalog)?;

        let name = session.name().to_string();
        let seats: Vec<(PlayerIdentity, Seat)> = session
            .players()
            .map(|p| {
                (
                    p.identity(),
                    Seat {
                        game: name.clone(),
                        name: p.display_name().to_string(),
                    },
                )
            })
            .collect();

        match self.games.entry(name.clone()) {
            Entry::Occupied(_) => {
                return Err(GameError::conflict(format!("game '{}' already exists", name)).into());
            }
            Entry::Vacant(slot) => {
                if let Some((identity, _)) = seats.iter().find(|(id, _)| self.identities.contains_key(id)) {
                    return Err(GameError::conflict(format!(
                        "player {} is already seated in another game",
                        identity
                    ))
                    .into());
                }
                slot.insert(Arc::new(Mutex::new(session)));
            }
        }
        for (identity, seat) in seats {
            self.identities.insert(identity, seat);
        }

        info!(game = %name, "Game restored");
        Ok(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedAvatars;

    impl AvatarProvider for FixedAvatars {
        fn avatar_for(&self, display_name: &str) -> String {
            format!("avatar://{}", display_name)
        }
    }

    fn registry() -> SessionRegistry {
        let catalog = CardCatalog::new(
            vec!["Why _?".to_string()],
            (0..30).map(|i| format!("Card {}", i)).collect(),
            "_",
        )
        .unwrap();
        SessionRegistry::new(Arc::new(catalog), SessionConfig::default().with_seed(3)).with_avatars(FixedAvatars)
    }

    #[test]
    fn test_create_game_conflict() {
        let registry = registry();

        registry.create_game("G1").unwrap();
        let err = registry.create_game(" G1 ").unwrap_err();

        assert!(matches!(err, GameError::Conflict(_)));
        assert_eq!(registry.game_names(), vec!["G1".to_string()]);
    }

    #[test]
    fn test_create_game_requires_name() {
        let registry = registry();
        let err = registry.create_game("  ").unwrap_err();
        assert!(matches!(err, GameError::InvalidAction(_)));
        assert_eq!(registry.game_count(), 0);
    }

    #[test]
    fn test_join_records_seat_and_avatar() {
        let registry = registry();
        let ada = registry.issue_identity();
        registry.host_game("G1", ada, "Ada").unwrap();

        assert_eq!(
            registry.seat(ada).unwrap(),
            Seat {
                game: "G1".to_string(),
                name: "Ada".to_string(),
            }
        );
        let avatar = registry
            .read("G1", |s| s.player("Ada").unwrap().avatar().to_string())
            .unwrap();
        assert_eq!(avatar, "avatar://Ada");
    }

    #[test]
    fn test_join_missing_game() {
        let registry = registry();
        let err = registry.join_game("nope", registry.issue_identity(), "Ada").unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
    }

    #[test]
    fn test_host_game_rejects_empty_name_without_creating() {
        let registry = registry();
        let err = registry.host_game("G1", registry.issue_identity(), " ").unwrap_err();

        assert!(matches!(err, GameError::InvalidAction(_)));
        assert!(!registry.contains_game("G1"));
    }

    #[test]
    fn test_failed_join_keeps_old_seat() {
        let registry = registry();
        let ada = registry.issue_identity();
        registry.host_game("G1", ada, "Ada").unwrap();
        registry.host_game("G2", registry.issue_identity(), "Bob").unwrap();

        let err = registry.join_game("G2", ada, "Bob").unwrap_err();
        assert!(matches!(err, GameError::Conflict(_)));
        assert_eq!(registry.seat(ada).unwrap().game, "G1");
    }

    #[test]
    fn test_identity_moves_between_games() {
        let registry = registry();
        let ada = registry.issue_identity();
        registry.host_game("G1", ada, "Ada").unwrap();
        registry.create_game("G2").unwrap();

        registry.join_game("G2", ada, "Ada").unwrap();

        assert_eq!(registry.seat(ada).unwrap().game, "G2");
        let err = registry.current_view_state("G1", ada).unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
        assert_eq!(registry.read("G1", GameSession::player_count).unwrap(), 0);
        assert_eq!(registry.read("G2", |s| s.judge()).unwrap(), Some(ada));
    }

    #[test]
    fn test_unknown_identity() {
        let registry = registry();
        registry.create_game("G1").unwrap();

        let err = registry.seat(PlayerIdentity::new()).unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));

        let err = registry
            .submit("G1", PlayerIdentity::new(), &[ResponseId::new(0)])
            .unwrap_err();
        assert!(matches!(err, GameError::NotFound(_)));
    }

    #[test]
    fn test_can_resolve_missing_game() {
        let registry = registry();
        assert!(matches!(registry.can_resolve("nope"), Err(GameError::NotFound(_))));
    }

    #[test]
    fn test_snapshot_and_restore() {
        let source = registry();
        let ada = source.issue_identity();
        source.host_game("G1", ada, "Ada").unwrap();
        source.ensure_dealt("G1", "Ada").unwrap();
        let bytes = source.snapshot("G1").unwrap();

        let target = registry();
        assert_eq!(target.restore(&bytes).unwrap(), "G1");
        assert_eq!(target.seat(ada).unwrap().name, "Ada");
        assert_eq!(
            target.current_view_state("G1", ada).unwrap(),
            source.current_view_state("G1", ada).unwrap()
        );

        let err = target.restore(&bytes).unwrap_err();
        assert!(matches!(err, SnapshotError::Game(GameError::Conflict(_))));
    }
}
