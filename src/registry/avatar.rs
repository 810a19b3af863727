//! Avatar references for display names.
//!
//! The avatar service is an external collaborator; the engine only stores
//! whatever reference string it returns. `GravatarAvatars` is the default:
//! it hashes the display name into a Gravatar URL with a generated fallback
//! image, so every name gets a stable picture without an account.

use sha2::{Digest, Sha256};

/// Maps a display name to an image reference.
pub trait AvatarProvider: Send + Sync {
    fn avatar_for(&self, display_name: &str) -> String;
}

/// Generated image Gravatar serves for names without an account.
///
/// A closed set, so the query string never carries arbitrary text.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FallbackStyle {
    #[default]
    MonsterId,
    Identicon,
    Wavatar,
    Retro,
    Robohash,
    MysteryPerson,
    Blank,
}

impl FallbackStyle {
    pub const ALL: [FallbackStyle; 7] = [
        FallbackStyle::MonsterId,
        FallbackStyle::Identicon,
        FallbackStyle::Wavatar,
        FallbackStyle::Retro,
        FallbackStyle::Robohash,
        FallbackStyle::MysteryPerson,
        FallbackStyle::Blank,
    ];

    /// The `d=` query value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FallbackStyle::MonsterId => "monsterid",
            FallbackStyle::Identicon => "identicon",
            FallbackStyle::Wavatar => "wavatar",
            FallbackStyle::Retro => "retro",
            FallbackStyle::Robohash => "robohash",
            FallbackStyle::MysteryPerson => "mp",
            FallbackStyle::Blank => "blank",
        }
    }
}

/// Gravatar URLs keyed by the SHA-256 of the lowercased display name.
#[derive(Clone, Debug)]
pub struct GravatarAvatars {
    size: u32,
    fallback: FallbackStyle,
}

impl GravatarAvatars {
    /// Avatars of `size` pixels with the monsterid fallback.
    #[must_use]
    pub fn new(size: u32) -> Self {
        Self {
            size,
            fallback: FallbackStyle::default(),
        }
    }

    #[must_use]
    pub fn with_fallback(mut self, fallback: FallbackStyle) -> Self {
        self.fallback = fallback;
        self
    }
}

impl AvatarProvider for GravatarAvatars {
    fn avatar_for(&self, display_name: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(display_name.trim().to_lowercase().as_bytes());
        format!(
            "https://www.gravatar.com/avatar/{:x}?d={}&s={}",
            hasher.finalize(),
            self.fallback.as_str(),
            self.size
        )
    }
}
