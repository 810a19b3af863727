//! Core engine types: identities, RNG, configuration, errors.
//!
//! This module contains the building blocks shared by the card, session and
//! registry layers.

pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use config::{RenderStyle, SessionConfig, DEFAULT_AVATAR_SIZE, DEFAULT_HAND_SIZE};
pub use error::{CatalogError, GameError, GameResult, SnapshotError};
pub use player::PlayerIdentity;
pub use rng::{GameRng, GameRngState};
