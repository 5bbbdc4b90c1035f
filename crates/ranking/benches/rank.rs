//! Benchmarks for the ranking pipeline
//!
//! Run with: cargo bench --package ranking
//!
//! Uses a synthetic catalog sized like a large deployment (low thousands of
//! items, tens of users).

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use data_loader::UserFeedback;
use ranking::{rank, ItemModel, ItemRatings, Rankable, SimilarityMatrix};

const ITEMS: usize = 1_000;
const USERS: usize = 40;

#[derive(Clone)]
struct Item {
    id: String,
    title: String,
}

impl Rankable for Item {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }
}

fn catalog() -> Vec<Item> {
    (0..ITEMS)
        .map(|i| Item {
            id: if i % 3 == 0 { format!("paper-{}-v2", i / 3) } else { format!("paper-{}", i) },
            title: format!("Paper {}", i),
        })
        .collect()
}

fn feedback() -> Vec<UserFeedback> {
    (0..USERS)
        .map(|u| {
            let ratings: Vec<(String, f64)> = (0..ITEMS)
                .filter(|i| (u * 7 + i * 13) % 5 == 0)
                .map(|i| (format!("paper-{}", i), ((u + i) % 9) as f64 / 2.0 + 0.5))
                .collect();
            UserFeedback::new(format!("user-{}", u), ratings)
        })
        .collect()
}

fn bench_rank(c: &mut Criterion) {
    let items = catalog();
    let feedback = feedback();

    c.bench_function("rank_full_catalog", |b| {
        b.iter(|| {
            let ranked = rank(black_box(items.clone()), black_box(&feedback), black_box("user-0"));
            black_box(ranked)
        })
    });
}

fn bench_similarity_matrix(c: &mut Criterion) {
    let ratings = ItemRatings::from_feedback(&feedback());

    c.bench_function("similarity_matrix", |b| {
        b.iter(|| {
            let matrix = SimilarityMatrix::build(black_box(&ratings));
            black_box(matrix)
        })
    });
}

fn bench_build_model(c: &mut Criterion) {
    let feedback = feedback();

    c.bench_function("item_model_from_feedback", |b| {
        b.iter(|| {
            let model = ItemModel::from_feedback(black_box(&feedback));
            black_box(model)
        })
    });
}

criterion_group!(benches, bench_rank, bench_similarity_matrix, bench_build_model);
criterion_main!(benches);
