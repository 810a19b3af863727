//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use czar::cards::CardCatalog;
use czar::core::{GameRng, PlayerIdentity, SessionConfig};
use czar::registry::SessionRegistry;
use czar::session::GameSession;
use tracing_subscriber::EnvFilter;

/// Route engine logs to the test harness. Set `RUST_LOG=czar=debug` to see them.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// A catalog whose prompts all have `blanks` blanks, with `responses` cards.
pub fn catalog_with_blanks(blanks: usize, prompts: usize, responses: usize) -> CardCatalog {
    let prompt_text = |i: usize| {
        let mut text = format!("Prompt {}", i);
        for _ in 0..blanks {
            text.push_str(" _ and");
        }
        text.push('.');
        text
    };
    CardCatalog::new(
        (0..prompts).map(prompt_text).collect(),
        (0..responses).map(|i| format!("Response {}.", i)).collect(),
        "_",
    )
    .unwrap()
}

/// Standard one-blank catalog with plenty of cards.
pub fn catalog() -> CardCatalog {
    catalog_with_blanks(1, 8, 60)
}

/// A session with `names` joined and dealt, first name as judge.
pub fn dealt_session(catalog: &CardCatalog, names: &[&str], seed: u64) -> (GameSession, Vec<PlayerIdentity>) {
    let mut session = GameSession::new("G1", catalog, 10, GameRng::new(seed));
    let ids = names
        .iter()
        .map(|name| {
            let id = PlayerIdentity::new();
            session.add_player(id, name, format!("avatar://{}", name)).unwrap();
            session.ensure_dealt(name).unwrap();
            id
        })
        .collect();
    (session, ids)
}

/// First `count` cards of a player's hand.
pub fn first_cards(session: &GameSession, id: PlayerIdentity, count: usize) -> Vec<czar::cards::ResponseId> {
    session
        .player_by_identity(id)
        .unwrap()
        .hand()
        .iter()
        .take(count)
        .copied()
        .collect()
}

/// Every non-judge player submits the first cards of their hand.
pub fn submit_all(session: &mut GameSession, catalog: &CardCatalog, ids: &[PlayerIdentity]) {
    let prompt = session.current_prompt().unwrap();
    let required = catalog.required_responses(prompt);
    for &id in ids {
        if session.is_judge(id) {
            continue;
        }
        let cards = first_cards(session, id, required);
        session.submit(catalog, id, &cards).unwrap();
    }
}

pub fn registry(catalog: CardCatalog, seed: u64) -> SessionRegistry {
    SessionRegistry::new(Arc::new(catalog), SessionConfig::default().with_seed(seed))
}
