//! Derived, per-player read of a game.
//!
//! `ViewState` is everything a presentation layer needs to draw one player's
//! page: the prompt with visible blanks, their own hand, whether they are the
//! judge, whether an action form applies, and the scoreboard. The judge also
//! sees every rendered submission, ordered by text so the order does not give
//! away who played what.

use serde::{Deserialize, Serialize};

use super::game::GameSession;
use super::render::render_submission;
use crate::cards::{CardCatalog, ResponseId};
use crate::core::{GameError, GameResult, PlayerIdentity, RenderStyle};

/// A card in the viewer's hand.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandCard {
    pub id: ResponseId,
    pub text: String,
}

/// A filled-in prompt shown to the judge.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderedSubmission {
    /// Who to name as winner if this one is picked.
    pub player: PlayerIdentity,
    pub text: String,
}

/// One row of the scoreboard.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreLine {
    pub name: String,
    pub avatar: String,
    pub wins: u32,
    pub is_judge: bool,
    pub submitted: bool,
}

/// Last round's winner, for the banner.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinnerBadge {
    pub name: String,
    pub avatar: String,
}

/// One player's view of a game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub game: String,
    pub player_name: String,
    pub player_avatar: String,
    pub round: u32,
    /// Prompt text with blanks shown as the placeholder. `None` before the first deal.
    pub prompt: Option<String>,
    /// Cards a submission must contain (0 before the first deal).
    pub required_responses: usize,
    pub hand: Vec<HandCard>,
    pub is_judge: bool,
    /// Judge: a winner can be picked. Others: a submission is still due.
    pub show_form: bool,
    /// The viewer's own filled-in prompt, once submitted.
    pub own_submission: Option<String>,
    /// Judge only: every submission this round.
    pub submissions: Vec<RenderedSubmission>,
    /// All players in join order.
    pub scoreboard: Vec<ScoreLine>,
    pub last_round_winner: Option<WinnerBadge>,
}

impl GameSession {
    /// Build `identity`'s view of this game.
    pub fn view_state(
        &self,
        catalog: &CardCatalog,
        style: &RenderStyle,
        identity: PlayerIdentity,
    ) -> GameResult<ViewState> {
        let player = self.player_by_identity(identity).ok_or_else(|| {
            GameError::not_found(format!("player {} is not in game '{}'", identity, self.name()))
        })?;
        let is_judge = self.is_judge(identity);
        let prompt = self.current_prompt();

        let hand = player
            .hand()
            .iter()
            .map(|&id| HandCard {
                id,
                text: catalog.response_text(id).to_string(),
            })
            .collect();

        let own_submission = match (prompt, self.submission(identity)) {
            (Some(prompt), Some(submission)) => {
                Some(render_submission(catalog, style, prompt, submission.cards()))
            }
            _ => None,
        };

        let mut submissions: Vec<RenderedSubmission> = match prompt {
            Some(prompt) if is_judge => self
                .submissions()
                .iter()
                .map(|(&player, submission)| RenderedSubmission {
                    player,
                    text: render_submission(catalog, style, prompt, submission.cards()),
                })
                .collect(),
            _ => Vec::new(),
        };
        submissions.sort_by(|a, b| a.text.cmp(&b.text).then(a.player.cmp(&b.player)));

        let show_form = if is_judge {
            self.can_resolve()
        } else {
            !self.has_submitted(identity)
        };

        let scoreboard = self
            .players()
            .map(|p| ScoreLine {
                name: p.display_name().to_string(),
                avatar: p.avatar().to_string(),
                wins: p.wins(),
                is_judge: self.is_judge(p.identity()),
                submitted: self.has_submitted(p.identity()),
            })
            .collect();

        let last_round_winner = self
            .last_round_winner()
            .and_then(|name| self.player(name))
            .map(|p| WinnerBadge {
                name: p.display_name().to_string(),
                avatar: p.avatar().to_string(),
            });

        Ok(ViewState {
            game: self.name().to_string(),
            player_name: player.display_name().to_string(),
            player_avatar: player.avatar().to_string(),
            round: self.round(),
            prompt: prompt.map(|p| catalog.prompt_display(p, &style.blank_placeholder)),
            required_responses: prompt.map_or(0, |p| catalog.required_responses(p)),
            hand,
            is_judge,
            show_form,
            own_submission,
            submissions,
            scoreboard,
            last_round_winner,
        })
    }
}
