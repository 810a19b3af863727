//! Card catalog - the process-wide card text.
//!
//! The `CardCatalog` is loaded once at startup and never mutated. Games
//! refer to cards by index (`PromptId`, `ResponseId`) and look text up here.
//! Share it between games as `Arc<CardCatalog>`.

use std::path::Path;

use serde::Deserialize;

use super::definition::{CardIndex, PromptId, ResponseId};
use crate::core::CatalogError;

/// Immutable prompt and response card text plus the blank marker.
///
/// ## Example
///
/// ```
/// use czar::cards::{CardCatalog, PromptId, ResponseId};
///
/// let catalog = CardCatalog::new(
///     vec!["I drink to forget _.".to_string(), "Why am I sticky?".to_string()],
///     vec!["A bag of cats.".to_string()],
///     "_",
/// ).unwrap();
///
/// assert_eq!(catalog.blank_count(PromptId::new(0)), 1);
/// assert_eq!(catalog.required_responses(PromptId::new(1)), 1);
/// assert_eq!(catalog.response_text(ResponseId::new(0)), "A bag of cats.");
/// ```
#[derive(Clone, Debug)]
pub struct CardCatalog {
    prompts: Vec<String>,
    responses: Vec<String>,
    blank_marker: String,
}

/// On-disk catalog layout.
#[derive(Deserialize)]
struct CatalogFile {
    black_cards: Vec<String>,
    white_cards: Vec<String>,
    blank: String,
}

impl CardCatalog {
    /// Build a catalog, rejecting empty card lists and an empty blank marker.
    pub fn new(
        prompts: Vec<String>,
        responses: Vec<String>,
        blank_marker: impl Into<String>,
    ) -> Result<Self, CatalogError> {
        let blank_marker = blank_marker.into();
        if prompts.is_empty() {
            return Err(CatalogError::EmptyPrompts);
        }
        if responses.is_empty() {
            return Err(CatalogError::EmptyResponses);
        }
        if blank_marker.is_empty() {
            return Err(CatalogError::EmptyBlankMarker);
        }

        Ok(Self {
            prompts,
            responses,
            blank_marker,
        })
    }

    /// Parse `{"black_cards": [..], "white_cards": [..], "blank": ".."}`.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let file: CatalogFile = serde_json::from_str(text)?;
        let catalog = Self::new(file.black_cards, file.white_cards, file.blank)?;
        tracing::info!(
            prompts = catalog.prompt_count(),
            responses = catalog.response_count(),
            "Loaded card catalog"
        );
        Ok(catalog)
    }

    /// Read and parse a catalog file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Number of prompt cards.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.prompts.len()
    }

    /// Number of response cards.
    #[must_use]
    pub fn response_count(&self) -> usize {
        self.responses.len()
    }

    /// The token marking a blank inside prompt text.
    #[must_use]
    pub fn blank_marker(&self) -> &str {
        &self.blank_marker
    }

    /// Check a prompt index is inside the catalog.
    #[must_use]
    pub fn contains_prompt(&self, id: PromptId) -> bool {
        id.index() < self.prompts.len()
    }

    /// Check a response index is inside the catalog.
    #[must_use]
    pub fn contains_response(&self, id: ResponseId) -> bool {
        id.index() < self.responses.len()
    }

    /// Prompt text, blank markers included.
    ///
    /// Panics if the index is outside the catalog; decks only ever
    /// produce in-range indices.
    #[must_use]
    pub fn prompt_text(&self, id: PromptId) -> &str {
        &self.prompts[id.index()]
    }

    /// Response text.
    ///
    /// Panics if the index is outside the catalog.
    #[must_use]
    pub fn response_text(&self, id: ResponseId) -> &str {
        &self.responses[id.index()]
    }

    /// Number of blank markers in a prompt.
    #[must_use]
    pub fn blank_count(&self, id: PromptId) -> usize {
        self.prompt_text(id).matches(self.blank_marker.as_str()).count()
    }

    /// Response cards a submission to this prompt must contain.
    ///
    /// A prompt with no blanks still takes exactly one response, appended
    /// after the prompt text.
    #[must_use]
    pub fn required_responses(&self, id: PromptId) -> usize {
        self.blank_count(id).max(1)
    }

    /// Prompt text with every blank marker replaced by `placeholder`.
    #[must_use]
    pub fn prompt_display(&self, id: PromptId, placeholder: &str) -> String {
        self.prompt_text(id).replace(self.blank_marker.as_str(), placeholder)
    }
}
