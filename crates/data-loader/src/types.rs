//! Core domain types for the paper catalog and the feedback table.
//!
//! Papers are the catalog items the ranking engine orders. Each one carries
//! a deck of cards that the reader swipes through; the engine only looks at
//! `id` and `title`. Feedback entries are per-user rating maps keyed by raw
//! paper identifiers (variant ids like `graph-rag-v2` included).

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// Type Aliases
// =============================================================================

/// Identifier of a catalog entry, possibly carrying a `-v<digits>` variant suffix
pub type PaperId = String;

/// Identifier of a user in the feedback table
pub type UserId = String;

// =============================================================================
// Paper-related Types
// =============================================================================

/// Where a paper summary comes from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub title: String,
    pub url: String,
}

/// One swipeable card of a paper summary.
///
/// Serialized with an internal `"type"` tag, e.g.
/// `{"type": "tradeoff", "good": "...", "bad": "..."}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Card {
    Hook { text: String },
    Intuition { text: String },
    Method { steps: Vec<String> },
    Tradeoff { good: String, bad: String },
    Who {
        #[serde(rename = "do")]
        audience: String,
        skip: String,
    },
    Source { title: String, url: String },
}

impl Card {
    /// The tag this card is serialized under
    pub fn kind(&self) -> &'static str {
        match self {
            Card::Hook { .. } => "hook",
            Card::Intuition { .. } => "intuition",
            Card::Method { .. } => "method",
            Card::Tradeoff { .. } => "tradeoff",
            Card::Who { .. } => "who",
            Card::Source { .. } => "source",
        }
    }
}

/// A catalog entry: one paper summary with its card deck
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paper {
    pub id: PaperId,
    pub title: String,
    pub topic: String,
    pub source: Source,
    pub cards: Vec<Card>,
}

// =============================================================================
// Seed Types (on-disk catalog format)
// =============================================================================

/// The good/bad pair of a tradeoff card
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tradeoff {
    pub good: String,
    pub bad: String,
}

/// Who should read the paper and who can skip it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Audience {
    #[serde(rename = "do")]
    pub audience: String,
    pub skip: String,
}

/// Card contents of a seed, one field per card kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedCardFields {
    pub hook: String,
    pub intuition: String,
    pub method: Vec<String>,
    pub tradeoff: Tradeoff,
    pub who: Audience,
}

/// A paper as stored in `paper_seeds.json`, before variant expansion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedPaper {
    pub id: PaperId,
    pub title: String,
    pub topic: String,
    pub source: Source,
    pub cards: SeedCardFields,
}

// =============================================================================
// Feedback Types
// =============================================================================

/// A user's ratings keyed by raw paper id, in document order.
///
/// This is a list rather than a map on purpose: when two raw ids collapse to
/// the same canonical key, the one that comes later wins, and "later" must
/// mean the order the ratings were written in. Duplicate keys are kept too.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ratings(Vec<(PaperId, f64)>);

impl Ratings {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Append a rating. Earlier ratings for the same id are kept.
    pub fn insert(&mut self, paper_id: impl Into<PaperId>, rating: f64) {
        self.0.push((paper_id.into(), rating));
    }

    /// The last rating written for exactly this raw id
    pub fn get(&self, paper_id: &str) -> Option<f64> {
        self.0
            .iter()
            .rev()
            .find(|(id, _)| id == paper_id)
            .map(|&(_, rating)| rating)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.0.iter().map(|(id, rating)| (id.as_str(), *rating))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<PaperId>> FromIterator<(K, f64)> for Ratings {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(id, rating)| (id.into(), rating)).collect())
    }
}

impl Serialize for Ratings {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, rating) in &self.0 {
            map.serialize_entry(id, rating)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Ratings {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct RatingsVisitor;

        impl<'de> Visitor<'de> for RatingsVisitor {
            type Value = Ratings;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map from paper id to numeric rating")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Ratings, A::Error> {
                let mut ratings = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((id, rating)) = access.next_entry::<PaperId, f64>()? {
                    ratings.push((id, rating));
                }
                Ok(Ratings(ratings))
            }
        }

        deserializer.deserialize_map(RatingsVisitor)
    }
}

/// One row of the feedback table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserFeedback {
    pub user_id: UserId,
    pub ratings: Ratings,
}

impl UserFeedback {
    pub fn new<K: Into<PaperId>>(
        user_id: impl Into<UserId>,
        ratings: impl IntoIterator<Item = (K, f64)>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            ratings: ratings.into_iter().collect(),
        }
    }
}
