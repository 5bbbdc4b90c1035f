//! # Data Loader Crate
//!
//! This crate loads the paper catalog and the reader feedback table that
//! the ranking engine consumes.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (Paper, Card, SeedPaper, Ratings, UserFeedback)
//! - **parser**: Decode the JSON data files
//! - **seeds**: Expand each seed into its catalog variants
//! - **index**: `Dataset`, lookups and validation
//! - **fixtures**: The demo feedback table
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::Dataset;
//! use std::path::Path;
//!
//! let dataset = Dataset::load_from_files(Path::new("data"), 3)?;
//! let paper = dataset.get_paper("graph-rag-v2").unwrap();
//! let ratings = dataset.get_user_ratings("demo-owner");
//!
//! println!("{} has {} ratings", paper.title, ratings.len());
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod seeds;
pub mod index;
pub mod fixtures;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use fixtures::{demo_feedback, ACTIVE_USER_ID};
pub use index::Dataset;
pub use seeds::expand_seeds;
pub use types::{
    // Type aliases
    PaperId,
    UserId,
    // Core types
    Audience,
    Card,
    Paper,
    Ratings,
    SeedCardFields,
    SeedPaper,
    Source,
    Tradeoff,
    UserFeedback,
};
