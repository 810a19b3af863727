//! Round throughput: submit, resolve, render and snapshot.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use czar::cards::CardCatalog;
use czar::core::{GameRng, PlayerIdentity, RenderStyle};
use czar::session::GameSession;

fn bench_catalog() -> CardCatalog {
    CardCatalog::new(
        (0..90).map(|i| format!("Prompt {} needs _ and _.", i)).collect(),
        (0..460).map(|i| format!("Response card {}.", i)).collect(),
        "_",
    )
    .unwrap()
}

fn seated_session(catalog: &CardCatalog, players: usize) -> (GameSession, Vec<PlayerIdentity>) {
    let mut session = GameSession::new("bench", catalog, 10, GameRng::new(42));
    let ids: Vec<PlayerIdentity> = (0..players).map(|_| PlayerIdentity::new()).collect();
    for (i, &id) in ids.iter().enumerate() {
        let name = format!("P{}", i);
        session.add_player(id, &name, "").unwrap();
        session.ensure_dealt(&name).unwrap();
    }
    (session, ids)
}

fn play_round(session: &mut GameSession, catalog: &CardCatalog, ids: &[PlayerIdentity]) {
    let required = catalog.required_responses(session.current_prompt().unwrap());
    let judge = session.judge().unwrap();
    for &id in ids {
        if id == judge {
            continue;
        }
        let cards: Vec<_> = session
            .player_by_identity(id)
            .unwrap()
            .hand()
            .iter()
            .take(required)
            .copied()
            .collect();
        session.submit(catalog, id, &cards).unwrap();
    }
    let winner = *ids.iter().find(|&&id| id != judge).unwrap();
    session.resolve_round(catalog, judge, winner).unwrap();
}

fn bench_rounds(c: &mut Criterion) {
    let catalog = bench_catalog();
    let (session, ids) = seated_session(&catalog, 8);

    c.bench_function("round_8_players", |b| {
        let mut session = session.clone();
        b.iter(|| play_round(black_box(&mut session), &catalog, &ids))
    });
}

fn bench_view_state(c: &mut Criterion) {
    let catalog = bench_catalog();
    let (mut session, ids) = seated_session(&catalog, 8);
    for &id in &ids[1..] {
        let cards: Vec<_> = session.player_by_identity(id).unwrap().hand().iter().take(2).copied().collect();
        session.submit(&catalog, id, &cards).unwrap();
    }
    let style = RenderStyle::default();

    c.bench_function("judge_view_state", |b| {
        b.iter(|| session.view_state(&catalog, &style, black_box(ids[0])).unwrap())
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let catalog = bench_catalog();
    let (session, _) = seated_session(&catalog, 8);

    c.bench_function("snapshot_encode", |b| b.iter(|| black_box(&session).to_bytes().unwrap()));

    let bytes = session.to_bytes().unwrap();
    c.bench_function("snapshot_decode", |b| {
        b.iter(|| GameSession::from_bytes(black_box(&bytes)).unwrap())
    });
}

criterion_group!(benches, bench_rounds, bench_view_state, bench_snapshot);
criterion_main!(benches);
