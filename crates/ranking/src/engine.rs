//! The ranking engine: feedback in, ordered catalog out.
//!
//! ## Pipeline
//! 1. Normalize raw ids to canonical keys
//! 2. Build per-item rating vectors
//! 3. Compute the item-item similarity matrix
//! 4. Compute popularity (mean rating) per item
//! 5. Score each item: the user's own rating, else a neighbor-weighted
//!    prediction, else popularity
//! 6. Sort by score descending, then by title
//!
//! Nothing is cached between calls to [`rank`]; every call derives all of
//! the above from its arguments.

use crate::normalize::normalize;
use crate::predict::{ActiveRatings, ScoreBasis, predict};
use crate::similarity::SimilarityMatrix;
use crate::traits::Rankable;
use crate::vectors::{ItemRatings, Popularity};
use data_loader::UserFeedback;
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// An item with the score it was ranked by
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredItem<T> {
    pub item: T,
    pub canonical_key: String,
    pub score: f64,
    pub basis: ScoreBasis,
}

/// Stages 1-4 of the pipeline, built from one feedback table
#[derive(Debug, Clone, Default)]
pub struct ItemModel {
    ratings: ItemRatings,
    similarities: SimilarityMatrix,
    popularity: Popularity,
}

impl ItemModel {
    #[instrument(skip_all, fields(entries = feedback.len()))]
    pub fn from_feedback(feedback: &[UserFeedback]) -> Self {
        let ratings = ItemRatings::from_feedback(feedback);
        let similarities = SimilarityMatrix::build(&ratings);
        let popularity = ratings.popularity();

        Self {
            ratings,
            similarities,
            popularity,
        }
    }

    pub fn ratings(&self) -> &ItemRatings {
        &self.ratings
    }

    pub fn similarities(&self) -> &SimilarityMatrix {
        &self.similarities
    }

    pub fn popularity(&self) -> &Popularity {
        &self.popularity
    }

    /// Score one raw item id for the active user
    pub fn score(&self, item_id: &str, active: &ActiveRatings) -> (f64, ScoreBasis) {
        let key = normalize(item_id);
        match active.get(key) {
            Some(rating) => (rating, ScoreBasis::Direct),
            None => {
                let prediction = predict(key, active, &self.similarities, &self.popularity);
                (prediction.score, prediction.basis)
            }
        }
    }

    /// Score and sort every item. Variants stay separate rows.
    pub fn score_items<T: Rankable>(&self, items: Vec<T>, active: &ActiveRatings) -> Vec<ScoredItem<T>> {
        let mut scored: Vec<ScoredItem<T>> = items
            .into_iter()
            .map(|item| {
                let canonical_key = normalize(item.id()).to_string();
                let (score, basis) = self.score(item.id(), active);
                ScoredItem {
                    item,
                    canonical_key,
                    // -0.0 becomes 0.0 so the two zeros tie under total_cmp
                    score: if score == 0.0 { 0.0 } else { score },
                    basis,
                }
            })
            .collect();

        scored.sort_by(compare_scored);
        scored
    }
}

/// Score descending, then title ascending by code point
fn compare_scored<T: Rankable>(left: &ScoredItem<T>, right: &ScoredItem<T>) -> Ordering {
    right
        .score
        .total_cmp(&left.score)
        .then_with(|| left.item.title().cmp(right.item.title()))
}

/// Rank `items` for `active_user_id`, returning them with their scores
#[instrument(skip(items, feedback), fields(items = items.len(), entries = feedback.len()))]
pub fn rank_with_scores<T: Rankable>(
    items: Vec<T>,
    feedback: &[UserFeedback],
    active_user_id: &str,
) -> Vec<ScoredItem<T>> {
    let model = ItemModel::from_feedback(feedback);
    let active = ActiveRatings::for_user(feedback, active_user_id);

    debug!(
        "Active user {} has {} ratings, {} similar pairs known",
        active_user_id,
        active.len(),
        model.similarities().pair_count()
    );

    model.score_items(items, &active)
}

/// Reorder `items` by predicted affinity for `active_user_id`, highest first
///
/// The result is a permutation of `items`: nothing is added, dropped or
/// deduplicated.
pub fn rank<T: Rankable>(items: Vec<T>, feedback: &[UserFeedback], active_user_id: &str) -> Vec<T> {
    rank_with_scores(items, feedback, active_user_id)
        .into_iter()
        .map(|scored| scored.item)
        .collect()
}
