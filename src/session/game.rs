//! The game-session state machine.
//!
//! A `GameSession` holds everything one game needs: both decks, the player
//! records in join order, the current prompt, the judge, this round's
//! submissions and the round counter. Each operation is a single in-memory
//! transition; callers serialize access per game (see `SessionRegistry`).
//!
//! ## Round lifecycle
//!
//! 1. Players join; the first joiner is the judge.
//! 2. `ensure_dealt` lazily deals a hand and the first prompt.
//! 3. Every non-judge player `submit`s cards for the prompt's blanks.
//! 4. Once everyone has submitted (`can_resolve`), the judge calls
//!    `resolve_round`: the winner scores and becomes the next judge, a new
//!    prompt is drawn, and every player except the outgoing judge is
//!    replenished.
//!
//! Every operation validates before it mutates, so a rejected call leaves
//! the session untouched.

use im::Vector;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::player::{PlayerRecord, Submission};
use crate::cards::{CardCatalog, Deck, PromptId, ResponseId};
use crate::core::{GameError, GameResult, GameRng, PlayerIdentity};

/// What a successful `resolve_round` did.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundOutcome {
    /// The round number after resolution.
    pub round: u32,
    /// Display name of the round winner.
    pub winner: String,
    /// Identity of the new judge (the winner).
    pub new_judge: PlayerIdentity,
    /// Cards each replenished player received.
    pub cards_replenished: usize,
}

/// State of one game shared by N players.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameSession {
    name: String,
    prompt_deck: Deck<PromptId>,
    response_deck: Deck<ResponseId>,
    /// Join order.
    players: Vector<PlayerRecord>,
    current_prompt: Option<PromptId>,
    judge: Option<PlayerIdentity>,
    submissions: FxHashMap<PlayerIdentity, Submission>,
    round: u32,
    last_round_winner: Option<String>,
    hand_size: usize,
    rng: GameRng,
}

impl GameSession {
    /// Create a game with freshly shuffled decks and no players.
    #[must_use]
    pub fn new(name: impl Into<String>, catalog: &CardCatalog, hand_size: usize, mut rng: GameRng) -> Self {
        let prompt_deck = Deck::new(catalog.prompt_count(), &mut rng);
        let response_deck = Deck::new(catalog.response_count(), &mut rng);

        Self {
            name: name.into(),
            prompt_deck,
            response_deck,
            players: Vector::new(),
            current_prompt: None,
            judge: None,
            submissions: FxHashMap::default(),
            round: 0,
            last_round_winner: None,
            hand_size,
            rng,
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.round
    }

    #[must_use]
    pub fn hand_size(&self) -> usize {
        self.hand_size
    }

    /// `None` until the first player joins.
    #[must_use]
    pub fn judge(&self) -> Option<PlayerIdentity> {
        self.judge
    }

    #[must_use]
    pub fn is_judge(&self, identity: PlayerIdentity) -> bool {
        self.judge == Some(identity)
    }

    /// `None` until the first deal.
    #[must_use]
    pub fn current_prompt(&self) -> Option<PromptId> {
        self.current_prompt
    }

    #[must_use]
    pub fn last_round_winner(&self) -> Option<&str> {
        self.last_round_winner.as_deref()
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Players in join order.
    pub fn players(&self) -> impl Iterator<Item = &PlayerRecord> {
        self.players.iter()
    }

    #[must_use]
    pub fn player(&self, display_name: &str) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.display_name() == display_name)
    }

    #[must_use]
    pub fn player_by_identity(&self, identity: PlayerIdentity) -> Option<&PlayerRecord> {
        self.players.iter().find(|p| p.identity() == identity)
    }

    #[must_use]
    pub fn submissions(&self) -> &FxHashMap<PlayerIdentity, Submission> {
        &self.submissions
    }

    #[must_use]
    pub fn submission(&self, identity: PlayerIdentity) -> Option<&Submission> {
        self.submissions.get(&identity)
    }

    #[must_use]
    pub fn has_submitted(&self, identity: PlayerIdentity) -> bool {
        self.submissions.contains_key(&identity)
    }

    /// Non-judge players who have not submitted this round, in join order.
    #[must_use]
    pub fn pending_players(&self) -> Vec<&PlayerRecord> {
        self.players
            .iter()
            .filter(|p| !self.is_judge(p.identity()) && !self.has_submitted(p.identity()))
            .collect()
    }

    #[must_use]
    pub fn prompt_deck(&self) -> &Deck<PromptId> {
        &self.prompt_deck
    }

    #[must_use]
    pub fn response_deck(&self) -> &Deck<ResponseId> {
        &self.response_deck
    }

    fn position_by_name(&self, display_name: &str) -> Option<usize> {
        self.players.iter().position(|p| p.display_name() == display_name)
    }

    fn position_by_identity(&self, identity: PlayerIdentity) -> Option<usize> {
        self.players.iter().position(|p| p.identity() == identity)
    }

    fn seated_position(&self, identity: PlayerIdentity) -> GameResult<usize> {
        self.position_by_identity(identity).ok_or_else(|| {
            GameError::not_found(format!("player {} is not in game '{}'", identity, self.name))
        })
    }

    // === Lobby ===

    /// Seat a new player with an empty hand and no wins.
    ///
    /// The first player to join a fresh game becomes the judge. Display names
    /// are unique within a game; a taken name is rejected rather than merged.
    pub fn add_player(
        &mut self,
        identity: PlayerIdentity,
        display_name: &str,
        avatar: impl Into<String>,
    ) -> GameResult<()> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(GameError::invalid("display name must not be empty"));
        }
        if self.position_by_name(display_name).is_some() {
            debug!(game = %self.name, player = display_name, "Rejected join: name taken");
            return Err(GameError::conflict(format!(
                "name '{}' is already taken in game '{}'",
                display_name, self.name
            )));
        }
        if self.position_by_identity(identity).is_some() {
            debug!(game = %self.name, player = display_name, "Rejected join: identity already seated");
            return Err(GameError::conflict(format!(
                "player {} has already joined game '{}'",
                identity, self.name
            )));
        }

        self.players
            .push_back(PlayerRecord::new(identity, display_name, avatar));
        if self.judge.is_none() {
            self.judge = Some(identity);
        }

        info!(
            game = %self.name,
            player = display_name,
            players = self.players.len(),
            judge = self.is_judge(identity),
            "Player joined"
        );
        Ok(())
    }

    /// Unseat a player, returning their record.
    ///
    /// Their submission for this round is discarded. If they were judge, the
    /// role passes to the next player in join order; that player's own
    /// submission, if any, goes back into their hand.
    pub fn remove_player(&mut self, identity: PlayerIdentity) -> GameResult<PlayerRecord> {
        let pos = self.seated_position(identity)?;
        let record = self.players.remove(pos);
        self.submissions.remove(&identity);

        if self.is_judge(identity) {
            self.judge = if self.players.is_empty() {
                None
            } else {
                Some(self.players[pos % self.players.len()].identity())
            };
            if let Some(next) = self.judge {
                if let Some(returned) = self.submissions.remove(&next) {
                    if let Some(next_pos) = self.position_by_identity(next) {
                        for &card in returned.cards() {
                            self.players[next_pos].receive(card);
                        }
                    }
                }
            }
        }

        info!(
            game = %self.name,
            player = record.display_name(),
            players = self.players.len(),
            "Player left"
        );
        Ok(record)
    }

    // === Dealing ===

    /// Deal a hand to a player whose hand is empty, and the first prompt if
    /// none is showing. Idempotent: a non-empty hand is left alone.
    ///
    /// Returns the number of response cards dealt.
    pub fn ensure_dealt(&mut self, display_name: &str) -> GameResult<usize> {
        let pos = self.position_by_name(display_name).ok_or_else(|| {
            GameError::not_found(format!("no player named '{}' in game '{}'", display_name, self.name))
        })?;

        let mut dealt = 0;
        if self.players[pos].hand().is_empty() {
            for _ in 0..self.hand_size {
                let card = self.response_deck.draw(&mut self.rng);
                self.players[pos].receive(card);
            }
            dealt = self.hand_size;
            debug!(game = %self.name, player = display_name, cards = dealt, "Dealt hand");
        }

        if self.current_prompt.is_none() {
            let prompt = self.prompt_deck.draw(&mut self.rng);
            self.current_prompt = Some(prompt);
            debug!(game = %self.name, %prompt, "Dealt first prompt");
        }

        Ok(dealt)
    }

    // === Submission ===

    /// Play response cards for the current prompt.
    ///
    /// Requires a non-judge player who has not submitted this round, and
    /// exactly as many cards as the prompt has blanks (one for a prompt
    /// without blanks), all currently in hand.
    pub fn submit(
        &mut self,
        catalog: &CardCatalog,
        identity: PlayerIdentity,
        chosen: &[ResponseId],
    ) -> GameResult<()> {
        let pos = self.seated_position(identity)?;
        let player_name = self.players[pos].display_name().to_string();

        let rejected = |reason: String| {
            debug!(game = %self.name, player = %player_name, %reason, "Rejected submission");
            GameError::invalid(reason)
        };

        if self.is_judge(identity) {
            return Err(rejected("the judge does not submit cards".to_string()));
        }
        if self.has_submitted(identity) {
            return Err(rejected("already submitted this round".to_string()));
        }
        let prompt = self
            .current_prompt
            .ok_or_else(|| rejected("no prompt has been dealt yet".to_string()))?;

        let required = catalog.required_responses(prompt);
        if chosen.len() != required {
            return Err(rejected(format!(
                "prompt needs {} card(s), got {}",
                required,
                chosen.len()
            )));
        }
        if let Some(card) = chosen.iter().find(|&&c| !catalog.contains_response(c)) {
            return Err(rejected(format!("{} is not in the catalog", card)));
        }
        if !self.players[pos].take_cards(chosen) {
            return Err(rejected("chosen cards are not all in hand".to_string()));
        }

        self.submissions.insert(identity, Submission::new(chosen));
        info!(
            game = %self.name,
            player = %player_name,
            submitted = self.submissions.len(),
            expected = self.players.len().saturating_sub(1),
            "Submission recorded"
        );
        Ok(())
    }

    // === Resolution ===

    /// True once every player other than the judge has submitted.
    ///
    /// False while there are no submissions at all, so a lone player can
    /// never resolve a round.
    #[must_use]
    pub fn can_resolve(&self) -> bool {
        !self.submissions.is_empty() && self.submissions.len() == self.players.len().saturating_sub(1)
    }

    /// The judge picks `winner`'s submission and the game advances a round.
    ///
    /// Clears submissions, draws the next prompt, credits the winner, hands
    /// the judge role to the winner, and gives every player except the
    /// outgoing judge one card per blank of the finished prompt.
    pub fn resolve_round(
        &mut self,
        catalog: &CardCatalog,
        caller: PlayerIdentity,
        winner: PlayerIdentity,
    ) -> GameResult<RoundOutcome> {
        self.seated_position(caller)?;

        let rejected = |reason: String| {
            debug!(game = %self.name, round = self.round, %reason, "Rejected resolution");
            GameError::invalid(reason)
        };

        let outgoing_judge = match self.judge {
            Some(judge) if judge == caller => judge,
            _ => return Err(rejected("only the judge can pick a winner".to_string())),
        };
        if !self.can_resolve() {
            return Err(rejected(format!(
                "waiting on {} player(s) to submit",
                self.pending_players().len()
            )));
        }
        if !self.has_submitted(winner) {
            return Err(rejected(format!("player {} did not submit this round", winner)));
        }
        let winner_pos = self.seated_position(winner)?;
        let finished_prompt = self
            .current_prompt
            .ok_or_else(|| rejected("no prompt has been dealt yet".to_string()))?;
        let blanks = catalog.required_responses(finished_prompt);

        self.submissions.clear();
        self.current_prompt = Some(self.prompt_deck.draw(&mut self.rng));

        let winner_name = {
            let record = &mut self.players[winner_pos];
            record.record_win();
            record.display_name().to_string()
        };
        self.last_round_winner = Some(winner_name.clone());
        self.judge = Some(winner);
        self.round += 1;

        for _ in 0..blanks {
            for player in self.players.iter_mut() {
                if player.identity() != outgoing_judge {
                    player.receive(self.response_deck.draw(&mut self.rng));
                }
            }
        }

        info!(
            game = %self.name,
            round = self.round,
            winner = %winner_name,
            replenished = blanks,
            "Round resolved"
        );
        Ok(RoundOutcome {
            round: self.round,
            winner: winner_name,
            new_judge: winner,
            cards_replenished: blanks,
        })
    }
}
