//! Decision pipeline benchmarks
//!
//! Run with: cargo bench --bench decision_bench

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use duel_ai::{
    ActionKind, AiConfig, CombatantSnapshot, DecisionController, DefuzzMethod, FuzzyEngine,
    StandardRules,
};

fn snapshots() -> (CombatantSnapshot, CombatantSnapshot) {
    let ai = CombatantSnapshot::new("samurai", 100, 100)
        .with_hp(55)
        .with_stamina(70);
    let opponent = CombatantSnapshot::new("tank", 120, 100)
        .with_hp(80)
        .with_stamina(40)
        .with_cooldown(2);
    (ai, opponent)
}

fn bench_score_actions(c: &mut Criterion) {
    let (ai, opponent) = snapshots();
    let mut group = c.benchmark_group("score_actions");

    for method in [DefuzzMethod::Centroid, DefuzzMethod::Max] {
        let engine = FuzzyEngine::standard(method).expect("standard engine builds");
        group.bench_function(format!("{:?}", method).to_lowercase(), |b| {
            b.iter(|| engine.score_actions(black_box(&ai), black_box(&opponent), 0.4, 0.7, 0.5))
        });
    }

    group.finish();
}

fn bench_select_action(c: &mut Criterion) {
    let (ai, opponent) = snapshots();
    let engine = Arc::new(FuzzyEngine::standard(DefuzzMethod::Centroid).expect("standard engine builds"));
    let mut controller =
        DecisionController::with_seed(engine, Arc::new(StandardRules::new()), AiConfig::default(), 42);
    for action in [ActionKind::StrikeLight, ActionKind::Guard, ActionKind::StrikeLight, ActionKind::Guard] {
        controller.record_opponent_action(action);
    }

    c.bench_function("select_action", |b| {
        b.iter(|| controller.select_action(black_box(&ai), black_box(&opponent)))
    });
}

criterion_group!(benches, bench_score_actions, bench_select_action);
criterion_main!(benches);
