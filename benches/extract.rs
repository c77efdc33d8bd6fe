// benches/extract.rs
use criterion::{criterion_group, criterion_main, Criterion, black_box};

use nba_salary_scrape::{
    core::normalize,
    model::Season,
    specs::{bbref, hoopshype},
    stats,
};

const PLAYERS: usize = 600;

fn hoopshype_page() -> String {
    let mut doc = String::from("<table><tr><th>Player</th><th>2024/25</th></tr>");
    for i in 0..PLAYERS {
        doc.push_str(&format!(
            "<tr><td><img alt=\"LAL\"><a href=\"#\">Player {i}</a></td>\
             <td>${},000</td><td>${}.5M</td><td>-</td><td>850K</td></tr>",
            1_000 + i, i % 50
        ));
    }
    doc.push_str("</table>");
    doc
}

fn bbref_page() -> String {
    let mut doc = String::from("<table id=\"contracts\"><tbody>");
    for i in 0..PLAYERS {
        if i % 20 == 0 {
            doc.push_str("<tr class=\"thead\"><th>Rk</th><th>Player</th></tr>");
        }
        doc.push_str(&format!(
            "<tr><th>{i}</th><td><a>Player {i}</a></td><td><a>BOS</a></td>\
             <td>${},000</td><td>$1,000,000</td><td></td><td></td><td></td><td></td><td>${},000</td></tr>",
            2_000 + i, 9_000 + i
        ));
    }
    doc.push_str("</tbody></table>");
    doc
}

fn bench_extract(c: &mut Criterion) {
    let season = Season(2025);
    let hh = hoopshype_page();
    let br = bbref_page();

    c.bench_function("normalize_mixed", |b| {
        b.iter(|| {
            for t in ["$55,761,216", "48.7M", "850K", "-", "N/A", "  $1,157,153 "] {
                black_box(normalize(black_box(t)));
            }
        })
    });

    c.bench_function("hoopshype_extract", |b| {
        b.iter(|| {
            let rows = hoopshype::extract(black_box(&hh), season);
            black_box(rows.len())
        })
    });

    c.bench_function("bbref_extract", |b| {
        b.iter(|| {
            let rows = bbref::extract(black_box(&br), season);
            black_box(rows.len())
        })
    });

    let rows = hoopshype::extract(&hh, season);
    c.bench_function("team_summary", |b| {
        b.iter(|| black_box(stats::team_salary_summary(black_box(&rows), season).len()))
    });
}

criterion_group!(benches, bench_extract);
criterion_main!(benches);
