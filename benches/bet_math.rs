//! Benchmarks for the per-keystroke bet math.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use zest_markets::bet::math::{calculate_bet_returns, format_cents_to_reais, safe_parse_float};
use zest_markets::bet::{BetEvent, BetFlowState};
use zest_markets::types::Outcome;

fn bench_calculate_bet_returns(c: &mut Criterion) {
    let mut group = c.benchmark_group("calculate_bet_returns");

    for price in [0.01, 0.5, 0.99].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(price), price, |b, &price| {
            b.iter(|| calculate_bet_returns(black_box(123.45), black_box(price)));
        });
    }

    group.finish();
}

fn bench_safe_parse_float(c: &mut Criterion) {
    let mut group = c.benchmark_group("safe_parse_float");

    // What the amount field holds while the user types "1.234,56"
    for typed in ["1", "1234", "1234,", "1234,5", "1234,56", "abc"].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(typed), typed, |b, &typed| {
            b.iter(|| safe_parse_float(black_box(typed)));
        });
    }

    group.finish();
}

fn bench_keystroke(c: &mut Criterion) {
    let ready = BetFlowState::new()
        .next(&BetEvent::ExpandOutcome(Outcome::Yes))
        .next(&BetEvent::SelectOutcome(Outcome::Yes));

    c.bench_function("keystroke_to_payout_text", |b| {
        b.iter(|| {
            let state = ready.next(&BetEvent::SetAmount(black_box("250,75").into()));
            let quote = state.quote(black_box(0.65)).unwrap_or_default();
            black_box(format_cents_to_reais(quote.payout_cents, true))
        });
    });
}

criterion_group!(
    benches,
    bench_calculate_bet_returns,
    bench_safe_parse_float,
    bench_keystroke
);
criterion_main!(benches);
