use chute_ledger::core::{ActionKind, GameAction};
use chute_ledger::rules::{legal_kinds, Engine};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

/// Play `turns` turns of move, play, effect, draw, end.
fn played(turns: usize) -> Engine {
    let mut engine = Engine::new(Some("bench"));
    engine.setup_game(4, 10, 10).expect("setup");

    for _ in 0..turns {
        let Some(player) = engine.state().current_player() else {
            break;
        };
        engine.submit(GameAction::move_pawn(player)).expect("move");

        let card = engine.state().player(player).and_then(|p| p.hand.first()).map(|c| c.id);
        if let Some(card) = card {
            if legal_kinds(engine.state()).contains(&ActionKind::PlayCard) {
                engine.submit(GameAction::play_card(player, card)).expect("play");
                engine.submit(GameAction::card_effect(player, card, None)).expect("effect");
            }
        }
        if legal_kinds(engine.state()).contains(&ActionKind::DrawCard) {
            engine.submit(GameAction::draw_card(player)).expect("draw");
        }
        engine.submit(GameAction::end_turn(player)).expect("end turn");
    }
    engine
}

fn replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    for turns in [10usize, 100, 400] {
        let engine = played(turns);
        let log: Vec<GameAction> = engine.state().log().iter().cloned().collect();

        group.bench_function(BenchmarkId::new("replay_from", turns), |b| {
            b.iter(|| black_box(Engine::replay_from(None, &log).expect("replay")))
        });

        group.bench_function(BenchmarkId::new("save_json", turns), |b| {
            b.iter(|| black_box(engine.save().expect("save")))
        });

        let bytes = engine.save_bytes().expect("save");
        group.bench_function(BenchmarkId::new("restore_bytes", turns), |b| {
            let mut target = Engine::new(None);
            b.iter(|| target.restore_bytes(black_box(&bytes)).expect("restore"))
        });
    }
    group.finish();
}

criterion_group!(benches, replay);
criterion_main!(benches);
