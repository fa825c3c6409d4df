use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use leaderboard_terminal::charts::ChartSet;
use leaderboard_terminal::pins::PinSet;
use leaderboard_terminal::pipeline::{SearchFields, SortKey, SortSpec, ranked_view};
use leaderboard_terminal::standings::parse_standings_str;
use leaderboard_terminal::table::build_table;

fn sample_csv(players: usize) -> String {
    let mut out = String::from(
        "Rank,Player,Model,Prompt,Rating_Mu,Rating_Sigma,Wins,Draws,Losses,Games,Win_Rate\n",
    );
    for idx in 0..players {
        let wins = (idx * 7) % 40;
        let draws = idx % 5;
        let losses = 40 - wins;
        let games = wins + draws + losses;
        out.push_str(&format!(
            "{},player_{idx},model-{},\"prompt text number {idx}\",{:.3},{:.3},{wins},{draws},{losses},{games},{}\n",
            idx + 1,
            idx % 6,
            35.0 - idx as f64 * 0.05,
            1.0 + (idx % 9) as f64 * 0.1,
            wins * 100 / games.max(1),
        ));
    }
    out
}

fn bench_parse(c: &mut Criterion) {
    let csv = sample_csv(500);
    c.bench_function("standings_parse_500", |b| {
        b.iter(|| {
            let rows = parse_standings_str(black_box(&csv)).unwrap();
            black_box(rows.len());
        })
    });
}

fn bench_pipeline(c: &mut Criterion) {
    let rows = parse_standings_str(&sample_csv(500)).unwrap();
    let pins = PinSet::from_names(["player_42", "player_7", "player_300"]);

    c.bench_function("ranked_view_search_sort_pin", |b| {
        b.iter(|| {
            let view = ranked_view(
                black_box(&rows),
                black_box("model-3"),
                SearchFields::default(),
                SortSpec::desc(SortKey::RatingMu),
                &pins,
            );
            black_box(view.len());
        })
    });

    c.bench_function("render_table_and_charts", |b| {
        b.iter(|| {
            let view = ranked_view(&rows, "", SearchFields::default(), SortSpec::default(), &pins);
            let table = build_table(&view, &pins);
            let charts = ChartSet::build(&view);
            black_box((table, charts));
        })
    });
}

criterion_group!(benches, bench_parse, bench_pipeline);
criterion_main!(benches);
