//! Score prediction for items the active user has not rated.

use crate::normalize::normalize;
use crate::similarity::SimilarityMatrix;
use crate::vectors::Popularity;
use data_loader::UserFeedback;
use std::collections::BTreeMap;

/// The active user's ratings, keyed by canonical item key
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActiveRatings {
    ratings: BTreeMap<String, f64>,
}

impl ActiveRatings {
    /// The ratings of the first entry whose id is `user_id`
    ///
    /// Later entries for the same user still feed the rating vectors but are
    /// not part of the profile. Within the entry, colliding variant ids keep
    /// the last rating. An unknown user yields an empty profile.
    pub fn for_user(feedback: &[UserFeedback], user_id: &str) -> Self {
        feedback
            .iter()
            .find(|entry| entry.user_id == user_id)
            .map(|entry| entry.ratings.iter().collect())
            .unwrap_or_default()
    }

    /// The user's own rating of a canonical item
    pub fn get(&self, key: &str) -> Option<f64> {
        self.ratings.get(key).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.ratings.iter().map(|(key, rating)| (key.as_str(), *rating))
    }

    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for ActiveRatings {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut ratings = BTreeMap::new();
        for (key, rating) in iter {
            let key: String = key.into();
            ratings.insert(normalize(&key).to_string(), rating);
        }
        Self { ratings }
    }
}

/// Which signal produced an item's score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBasis {
    /// The active user rated the item
    Direct,
    /// Similarity-weighted average over `count` rated neighbors
    Neighbors { count: usize },
    /// Mean rating across all users
    Popularity,
    /// Nobody rated the item; score is 0
    NoSignal,
}

/// A predicted score and where it came from
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Prediction {
    pub score: f64,
    pub basis: ScoreBasis,
}

/// Predict the active user's score for a canonical item they have not rated
///
/// Neighbors are the user's rated items with positive similarity to the
/// candidate. With none, the candidate's popularity is returned (0 when it
/// was never rated).
pub fn predict(
    candidate: &str,
    active: &ActiveRatings,
    similarities: &SimilarityMatrix,
    popularity: &Popularity,
) -> Prediction {
    let mut numerator = 0.0;
    let mut normalization = 0.0;
    let mut count = 0;

    if let Some(row) = similarities.neighbors(candidate) {
        for (rated_key, rating) in active.iter() {
            let similarity = row.get(rated_key).copied().unwrap_or(0.0);
            if similarity > 0.0 {
                numerator += similarity * rating;
                normalization += similarity.abs();
                count += 1;
            }
        }
    }

    if count == 0 || normalization == 0.0 {
        return fallback(candidate, popularity);
    }

    let score = numerator / normalization;
    if score.is_finite() {
        Prediction {
            score,
            basis: ScoreBasis::Neighbors { count },
        }
    } else {
        fallback(candidate, popularity)
    }
}

fn fallback(candidate: &str, popularity: &Popularity) -> Prediction {
    match popularity.get(candidate) {
        Some(score) => Prediction {
            score,
            basis: ScoreBasis::Popularity,
        },
        None => Prediction {
            score: 0.0,
            basis: ScoreBasis::NoSignal,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vectors::ItemRatings;

    fn model(feedback: &[UserFeedback]) -> (SimilarityMatrix, Popularity) {
        let ratings = ItemRatings::from_feedback(feedback);
        (SimilarityMatrix::build(&ratings), ratings.popularity())
    }

    #[test]
    fn test_active_ratings_normalize_keys() {
        let feedback = vec![
            UserFeedback::new("other", [("alpha", 1.0)]),
            UserFeedback::new("active", [("alpha-v2", 3.0), ("beta-v3", 2.0), ("alpha", 5.0)]),
        ];
        let active = ActiveRatings::for_user(&feedback, "active");

        assert_eq!(active.len(), 2);
        assert_eq!(active.get("alpha"), Some(5.0));
        assert_eq!(active.get("beta"), Some(2.0));
    }

    #[test]
    fn test_only_first_entry_forms_the_profile() {
        let feedback = vec![
            UserFeedback::new("active", [("a", 1.0)]),
            UserFeedback::new("active", [("a", 5.0), ("b", 3.0)]),
        ];
        let active = ActiveRatings::for_user(&feedback, "active");

        assert_eq!(active.len(), 1);
        assert_eq!(active.get("a"), Some(1.0));
        assert_eq!(active.get("b"), None);
    }

    #[test]
    fn test_unknown_user_is_empty() {
        let feedback = vec![UserFeedback::new("someone", [("alpha", 5.0)])];
        assert!(ActiveRatings::for_user(&feedback, "ghost").is_empty());
    }

    #[test]
    fn test_weighted_average_of_neighbors() {
        let feedback = vec![
            UserFeedback::new("active", [("alpha", 5.0)]),
            UserFeedback::new("neighbor", [("alpha", 4.0), ("gamma", 5.0)]),
        ];
        let (similarities, popularity) = model(&feedback);
        let active = ActiveRatings::for_user(&feedback, "active");

        let prediction = predict("gamma", &active, &similarities, &popularity);

        // A single neighbor: the weighted average is just its rating.
        assert!((prediction.score - 5.0).abs() < 1e-12);
        assert_eq!(prediction.basis, ScoreBasis::Neighbors { count: 1 });
    }

    #[test]
    fn test_two_neighbors_weighting() {
        let active: ActiveRatings = [("a", 4.0), ("b-v2", 2.0)].into_iter().collect();

        let feedback = vec![
            UserFeedback::new("u1", [("a", 1.0), ("c", 1.0)]),
            UserFeedback::new("u2", [("b", 1.0), ("c", 1.0), ("a", 1.0)]),
        ];
        let (similarities, popularity) = model(&feedback);
        let s_a = similarities.get("c", "a");
        let s_b = similarities.get("c", "b");

        let prediction = predict("c", &active, &similarities, &popularity);
        let expected = (s_a * 4.0 + s_b * 2.0) / (s_a + s_b);
        assert!((prediction.score - expected).abs() < 1e-12);
        assert_eq!(prediction.basis, ScoreBasis::Neighbors { count: 2 });
    }

    #[test]
    fn test_falls_back_to_popularity() {
        let feedback = vec![
            UserFeedback::new("active", [("alpha", 5.0)]),
            UserFeedback::new("critic", [("beta", 2.0), ("gamma", 3.0)]),
        ];
        let (similarities, popularity) = model(&feedback);
        let active = ActiveRatings::for_user(&feedback, "active");

        let prediction = predict("beta", &active, &similarities, &popularity);
        assert_eq!(prediction.score, 2.0);
        assert_eq!(prediction.basis, ScoreBasis::Popularity);
    }

    #[test]
    fn test_unrated_candidate_scores_zero() {
        let feedback = vec![UserFeedback::new("active", [("delta", 3.5)])];
        let (similarities, popularity) = model(&feedback);
        let active = ActiveRatings::for_user(&feedback, "active");

        let prediction = predict("epsilon", &active, &similarities, &popularity);
        assert_eq!(prediction.score, 0.0);
        assert_eq!(prediction.basis, ScoreBasis::NoSignal);
    }

    #[test]
    fn test_empty_profile_uses_popularity() {
        let feedback = vec![
            UserFeedback::new("a", [("x", 1.0), ("y", 3.0)]),
            UserFeedback::new("b", [("x", 3.0)]),
        ];
        let (similarities, popularity) = model(&feedback);

        let prediction = predict("x", &ActiveRatings::default(), &similarities, &popularity);
        assert_eq!(prediction.score, 2.0);
        assert_eq!(prediction.basis, ScoreBasis::Popularity);
    }
}
