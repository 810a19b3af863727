//! Binary session records for the persistence boundary.
//!
//! A record is the whole `GameSession`, RNG position included, encoded with
//! `bincode`. Records carry catalog indices, not card text, so a decoded
//! session is checked against the catalog it will be played with, and its
//! structural invariants are checked before anyone plays it.

use rustc_hash::FxHashSet;

use super::game::GameSession;
use crate::cards::CardCatalog;
use crate::core::{GameError, GameResult, SnapshotError};

impl GameSession {
    /// Encode this session as a binary record.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        bincode::serialize(self).map_err(SnapshotError::Encode)
    }

    /// Decode a session record.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        bincode::deserialize(bytes).map_err(SnapshotError::Decode)
    }

    /// Check every card index in this session fits `catalog`.
    ///
    /// Covers both decks, the prompt, every hand and every submission.
    /// Submissions must also hold as many cards as the prompt requires.
    pub fn check_catalog(&self, catalog: &CardCatalog) -> GameResult<()> {
        if self.prompt_deck().catalog_size() != catalog.prompt_count()
            || self.response_deck().catalog_size() != catalog.response_count()
        {
            return Err(GameError::invalid(format!(
                "game '{}' was recorded against a different catalog",
                self.name()
            )));
        }
        if !self.prompt_deck().is_partial_permutation() {
            return Err(GameError::invalid("prompt deck is not a permutation of the catalog"));
        }
        if !self.response_deck().is_partial_permutation() {
            return Err(GameError::invalid("response deck is not a permutation of the catalog"));
        }
        if self.current_prompt().is_some_and(|p| !catalog.contains_prompt(p)) {
            return Err(GameError::invalid("current prompt is outside the catalog"));
        }

        let held = self.players().flat_map(|p| p.hand().iter());
        let submitted = self.submissions().values().flat_map(|s| s.cards().iter());
        if let Some(card) = held.chain(submitted).find(|&&c| !catalog.contains_response(c)) {
            return Err(GameError::invalid(format!("{} is outside the catalog", card)));
        }

        if !self.submissions().is_empty() {
            let prompt = self
                .current_prompt()
                .ok_or_else(|| GameError::invalid("submissions recorded before any prompt"))?;
            let required = catalog.required_responses(prompt);
            if self.submissions().values().any(|s| s.len() != required) {
                return Err(GameError::invalid(format!(
                    "a submission does not hold the {} card(s) the prompt needs",
                    required
                )));
            }
        }
        Ok(())
    }

    /// Check the structural invariants of a decoded session.
    ///
    /// - Display names and identities are unique.
    /// - A game with players has a judge, and the judge is seated.
    /// - Every submitter is seated and is not the judge.
    pub fn check_invariants(&self) -> GameResult<()> {
        let mut names = FxHashSet::default();
        let mut identities = FxHashSet::default();
        for player in self.players() {
            if !names.insert(player.display_name()) {
                return Err(GameError::invalid(format!(
                    "name '{}' appears twice",
                    player.display_name()
                )));
            }
            if !identities.insert(player.identity()) {
                return Err(GameError::invalid(format!(
                    "player {} appears twice",
                    player.identity()
                )));
            }
        }

        match self.judge() {
            Some(judge) if !identities.contains(&judge) => {
                return Err(GameError::invalid(format!("judge {} is not seated", judge)));
            }
            None if self.player_count() > 0 => {
                return Err(GameError::invalid("game has players but no judge"));
            }
            _ => {}
        }

        for &submitter in self.submissions().keys() {
            if !identities.contains(&submitter) {
                return Err(GameError::invalid(format!("submitter {} is not seated", submitter)));
            }
            if self.is_judge(submitter) {
                return Err(GameError::invalid("the judge has a submission"));
            }
        }
        Ok(())
    }
}
