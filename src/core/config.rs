//! Session configuration.
//!
//! Callers configure the engine at startup by providing:
//! - `RenderStyle`: How filled-in prompts are marked up
//! - `SessionConfig`: Hand size, avatar size, RNG seed and render style
//!
//! Both deserialize from JSON with every field optional.

use serde::{Deserialize, Serialize};

/// Hand size dealt to a player with an empty hand.
pub const DEFAULT_HAND_SIZE: usize = 10;

/// Avatar image edge length in pixels.
pub const DEFAULT_AVATAR_SIZE: u32 = 50;

/// Markup used when rendering cards for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Inserted before a response card's text.
    pub emphasis_open: String,

    /// Inserted after a response card's text.
    pub emphasis_close: String,

    /// Shown in place of each blank marker before a prompt is filled in.
    pub blank_placeholder: String,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            emphasis_open: "<strong>".to_string(),
            emphasis_close: "</strong>".to_string(),
            blank_placeholder: "______".to_string(),
        }
    }
}

impl RenderStyle {
    /// Plain text style, no markup around responses.
    #[must_use]
    pub fn plain() -> Self {
        Self {
            emphasis_open: String::new(),
            emphasis_close: String::new(),
            ..Self::default()
        }
    }

    /// Wrap response text in the emphasis markers.
    #[must_use]
    pub fn emphasize(&self, text: &str) -> String {
        format!("{}{}{}", self.emphasis_open, text, self.emphasis_close)
    }
}

/// Engine configuration shared by every game in a registry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Cards dealt to a player whose hand is empty.
    pub hand_size: usize,

    /// Edge length requested from the avatar service.
    pub avatar_size: u32,

    /// Seed for the registry RNG. `None` seeds from OS entropy.
    /// Same seed produces the same deck orders for the same sequence of games.
    pub seed: Option<u64>,

    /// Display markup.
    pub render: RenderStyle,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            hand_size: DEFAULT_HAND_SIZE,
            avatar_size: DEFAULT_AVATAR_SIZE,
            seed: None,
            render: RenderStyle::default(),
        }
    }
}

impl SessionConfig {
    /// Parse a config from JSON. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Set a fixed seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Set the hand size.
    #[must_use]
    pub fn with_hand_size(mut self, hand_size: usize) -> Self {
        assert!(hand_size > 0, "Hand size must be at least 1");
        self.hand_size = hand_size;
        self
    }

    /// Set the avatar size.
    #[must_use]
    pub fn with_avatar_size(mut self, size: u32) -> Self {
        self.avatar_size = size;
        self
    }

    /// Set the render style.
    #[must_use]
    pub fn with_render(mut self, render: RenderStyle) -> Self {
        self.render = render;
        self
    }
}
