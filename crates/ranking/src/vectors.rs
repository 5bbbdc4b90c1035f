//! Rating vectors and popularity.
//!
//! Turns the feedback table into one vector per canonical item
//! (user -> rating), and derives the mean-rating popularity fallback.

use crate::normalize::normalize;
use data_loader::{UserFeedback, UserId};
use std::collections::BTreeMap;
use tracing::debug;

/// Ratings one item received, keyed by user
pub type RatingVector = BTreeMap<UserId, f64>;

/// Per-item rating vectors for every canonical key that appears in feedback
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemRatings {
    vectors: BTreeMap<String, RatingVector>,
}

impl ItemRatings {
    /// Aggregate the whole feedback table
    ///
    /// Raw ids are normalized first. When one user rates two ids that share a
    /// canonical key, the rating processed later overwrites the earlier one.
    pub fn from_feedback(feedback: &[UserFeedback]) -> Self {
        let mut vectors: BTreeMap<String, RatingVector> = BTreeMap::new();

        for entry in feedback {
            for (raw_id, rating) in entry.ratings.iter() {
                vectors
                    .entry(normalize(raw_id).to_string())
                    .or_default()
                    .insert(entry.user_id.clone(), rating);
            }
        }

        debug!("Built {} rating vectors from {} feedback entries", vectors.len(), feedback.len());
        Self { vectors }
    }

    pub fn get(&self, key: &str) -> Option<&RatingVector> {
        self.vectors.get(key)
    }

    /// Canonical keys in ascending order
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.vectors.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &RatingVector)> + '_ {
        self.vectors.iter().map(|(key, vector)| (key.as_str(), vector))
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Mean rating per item
    pub fn popularity(&self) -> Popularity {
        let means = self
            .vectors
            .iter()
            .filter(|(_, vector)| !vector.is_empty())
            .map(|(key, vector)| (key.clone(), mean(vector)))
            .collect();

        Popularity { means }
    }
}

/// Arithmetic mean of a non-empty vector, finite whenever its ratings are
fn mean(vector: &RatingVector) -> f64 {
    let count = vector.len() as f64;
    let total: f64 = vector.values().sum();
    if total.is_finite() {
        return total / count;
    }

    // The plain sum overflowed: sum pre-scaled values and keep the result
    // inside the range of the ratings themselves.
    let scaled: f64 = vector.values().map(|rating| rating / count).sum();
    let (low, high) = vector
        .values()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(low, high), &rating| {
            (low.min(rating), high.max(rating))
        });
    scaled.max(low).min(high)
}

/// Cold-start fallback: the arithmetic mean of every rating an item got
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Popularity {
    means: BTreeMap<String, f64>,
}

impl Popularity {
    /// Mean rating, or `None` when no one rated the item
    pub fn get(&self, key: &str) -> Option<f64> {
        self.means.get(key).copied()
    }

    /// Mean rating, 0 for unknown items
    pub fn score(&self, key: &str) -> f64 {
        self.get(key).unwrap_or(0.0)
    }
}
