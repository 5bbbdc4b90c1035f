//! # Ranking Crate
//!
//! Item-based collaborative filtering that orders the paper catalog for one
//! reader.
//!
//! ## Components
//!
//! - **normalize**: Collapse variant ids (`graph-rag-v2`) to canonical keys
//! - **vectors**: Per-item rating vectors and mean-rating popularity
//! - **similarity**: Cosine similarity matrix over co-rated users
//! - **predict**: Neighbor-weighted score prediction with popularity fallback
//! - **engine**: `rank`, `rank_with_scores` and the reusable `ItemModel`
//! - **traits**: `Rankable`, implemented by `data_loader::Paper`
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{demo_feedback, Dataset, ACTIVE_USER_ID};
//! use ranking::rank;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"), 3)?;
//! let feedback = demo_feedback();
//! let ranked = rank(dataset.papers().to_vec(), &feedback, ACTIVE_USER_ID);
//! ```
//!
//! The engine is total: every input produces a permutation of the items,
//! and every score is finite for finite ratings.

pub mod normalize;
pub mod traits;
pub mod vectors;
pub mod similarity;
pub mod predict;
pub mod engine;

// Re-export main types
pub use engine::{rank, rank_with_scores, ItemModel, ScoredItem};
pub use normalize::normalize;
pub use predict::{predict, ActiveRatings, Prediction, ScoreBasis};
pub use similarity::{cosine_similarity, SimilarityMatrix};
pub use traits::Rankable;
pub use vectors::{ItemRatings, Popularity, RatingVector};
