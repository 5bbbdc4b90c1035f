//! Item-item cosine similarity.
//!
//! ## Algorithm
//! For every unordered pair of rated items:
//! 1. Dot product over users who rated both
//! 2. Divide by the product of each item's norm over *all* its ratings
//! 3. Keep the pair (both directions) only if the result is positive
//!
//! Rows are computed in parallel with Rayon. Every pair's value depends only
//! on the two vectors, so the matrix is the same as a sequential build.

use crate::vectors::{ItemRatings, RatingVector};
use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// Cosine similarity of two rating vectors
///
/// Returns 0 when the vectors share no rater, when the dot product is
/// exactly zero, or when the result would not be finite.
pub fn cosine_similarity(left: &RatingVector, right: &RatingVector) -> f64 {
    // Walk the smaller vector; shared users are still visited in ascending
    // user order, so the sum is bit-identical for (a, b) and (b, a).
    let (small, large) = if left.len() <= right.len() {
        (left, right)
    } else {
        (right, left)
    };

    let dot_product: f64 = small
        .iter()
        .filter_map(|(user_id, a)| large.get(user_id).map(|b| a * b))
        .sum();

    if dot_product == 0.0 {
        return 0.0;
    }

    let left_magnitude: f64 = left.values().map(|v| v * v).sum();
    let right_magnitude: f64 = right.values().map(|v| v * v).sum();
    let denominator = (left_magnitude * right_magnitude).sqrt();

    let similarity = dot_product / denominator;
    if similarity.is_finite() { similarity } else { 0.0 }
}

/// Sparse symmetric similarity matrix. Absent pairs mean 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityMatrix {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl SimilarityMatrix {
    /// Compute every positive pairwise similarity. O(N^2 * U).
    #[instrument(skip_all, fields(items = ratings.len()))]
    pub fn build(ratings: &ItemRatings) -> Self {
        let items: Vec<(&str, &RatingVector)> = ratings.iter().collect();
        let rows = &items;

        let pairs: Vec<(usize, usize, f64)> = (0..items.len())
            .into_par_iter()
            .flat_map_iter(move |i| {
                (i + 1..rows.len()).filter_map(move |j| {
                    let similarity = cosine_similarity(rows[i].1, rows[j].1);
                    (similarity > 0.0).then_some((i, j, similarity))
                })
            })
            .collect();

        let mut matrix = Self::default();
        for (i, j, similarity) in pairs {
            let (first, second) = (items[i].0, items[j].0);
            matrix.insert(first, second, similarity);
            matrix.insert(second, first, similarity);
        }

        debug!("Stored {} positive item pairs", matrix.pair_count());
        matrix
    }

    fn insert(&mut self, a: &str, b: &str, similarity: f64) {
        self.entries
            .entry(a.to_string())
            .or_default()
            .insert(b.to_string(), similarity);
    }

    /// Similarity of `a` and `b`, 0 when not stored
    pub fn get(&self, a: &str, b: &str) -> f64 {
        self.entries
            .get(a)
            .and_then(|row| row.get(b))
            .copied()
            .unwrap_or(0.0)
    }

    /// Every item with positive similarity to `key`
    pub fn neighbors(&self, key: &str) -> Option<&BTreeMap<String, f64>> {
        self.entries.get(key)
    }

    /// Number of unordered pairs stored
    pub fn pair_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum::<usize>() / 2
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
