//! Benchmarks for navigation and search.
//!
//! Run with: cargo bench -p tenfoot-widgets

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use tenfoot_core::event::{KeyCode, KeyEvent};
use tenfoot_core::input::Direction;
use tenfoot_widgets::fuzzy::{self, FuzzyMatcher};
use tenfoot_widgets::nav_grid::{
    GridOptions, GridShape, NavigationGrid, TraversalFlags, compute_next_index,
};

// ============================================================================
// Traversal
// ============================================================================

fn bench_traversal(c: &mut Criterion) {
    let mut group = c.benchmark_group("nav/traversal");
    let flags = TraversalFlags {
        wrap_horizontal: true,
        wrap_vertical: true,
        section_break: Some(40),
    };

    for (items, cols) in [(12, 3), (500, 6), (10_000, 8)] {
        let shape = GridShape::new(items, cols);
        group.bench_with_input(
            BenchmarkId::new("sweep", format!("{items}x{cols}")),
            &shape,
            |b, &shape| {
                b.iter(|| {
                    let mut index = 0;
                    for direction in Direction::ALL {
                        if let Some(next) =
                            compute_next_index(index, direction, shape, flags).target()
                        {
                            index = next;
                        }
                    }
                    black_box(index)
                })
            },
        );
    }
    group.finish();
}

fn bench_grid_keys(c: &mut Criterion) {
    let keys = [
        KeyEvent::new(KeyCode::Right),
        KeyEvent::new(KeyCode::Down),
        KeyEvent::new(KeyCode::Char('a')),
        KeyEvent::new(KeyCode::Up),
    ];
    let mut grid: NavigationGrid =
        NavigationGrid::new(500, 6, GridOptions::default().wrap_horizontal(true));

    c.bench_function("nav/grid/handle_key", |b| {
        b.iter(|| {
            let mut current = 250;
            for key in &keys {
                current = grid.handle_key(current, key).next_index;
            }
            black_box(current)
        })
    });
}

// ============================================================================
// Search
// ============================================================================

fn library(size: usize) -> Vec<String> {
    const WORDS: [&str; 8] = [
        "Dark", "Souls", "Legend", "Star", "Valley", "Craft", "Hollow", "Knight",
    ];
    (0..size)
        .map(|i| {
            format!(
                "{} {} {i}",
                WORDS[i % WORDS.len()],
                WORDS[(i / WORDS.len()) % WORDS.len()]
            )
        })
        .collect()
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("fuzzy/search");
    let matcher = FuzzyMatcher::default();

    for size in [100, 1_000, 5_000] {
        let titles = library(size);
        for query in ["star", "hk", "valley craft"] {
            group.bench_with_input(
                BenchmarkId::new(query, size),
                &titles,
                |b, titles| b.iter(|| black_box(matcher.search(titles, query, |t| t.as_str()))),
            );
        }
    }
    group.finish();
}

fn bench_score(c: &mut Criterion) {
    c.bench_function("fuzzy/score/subsequence", |b| {
        b.iter(|| black_box(fuzzy::score(black_box("cs2"), black_box("Counter-Strike 2"))))
    });
}

criterion_group!(benches, bench_traversal, bench_grid_keys, bench_search, bench_score);
criterion_main!(benches);
