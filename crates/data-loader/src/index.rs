//! Dataset building and validation.
//!
//! A [`Dataset`] owns the expanded paper catalog and the feedback table, and
//! keeps an id index over the papers for lookups from the CLI.

use crate::error::{DataLoadError, Result};
use crate::fixtures::demo_feedback;
use crate::parser;
use crate::seeds::expand_seeds;
use crate::types::*;
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info};

/// Seed catalog file name inside the data directory
pub const SEEDS_FILE: &str = "paper_seeds.json";

/// Optional feedback table file name inside the data directory
pub const FEEDBACK_FILE: &str = "feedback.json";

/// The loaded catalog plus feedback table
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub(crate) papers: Vec<Paper>,
    pub(crate) feedback: Vec<UserFeedback>,
    /// Position of each paper in `papers`, by id
    pub(crate) paper_index: HashMap<PaperId, usize>,
}

impl Dataset {
    /// Creates a new, empty Dataset
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a dataset from values already in memory. Does not validate.
    ///
    /// If two papers share an id, lookups by id return the first.
    pub fn from_parts(papers: Vec<Paper>, feedback: Vec<UserFeedback>) -> Self {
        let mut paper_index = HashMap::with_capacity(papers.len());
        for (position, paper) in papers.iter().enumerate() {
            paper_index.entry(paper.id.clone()).or_insert(position);
        }

        Self {
            papers,
            feedback,
            paper_index,
        }
    }

    /// Load the catalog and feedback table from a data directory
    ///
    /// Steps:
    /// 1. Parse `paper_seeds.json` and `feedback.json` in parallel
    /// 2. Fall back to the demo feedback table when `feedback.json` is absent
    /// 3. Expand seeds into `variants_per_seed` papers each
    /// 4. Validate
    pub fn load_from_files(data_dir: &Path, variants_per_seed: usize) -> Result<Self> {
        info!("Loading paper catalog from {:?}", data_dir);

        let seeds_path = data_dir.join(SEEDS_FILE);
        let feedback_path = data_dir.join(FEEDBACK_FILE);

        let (seeds, feedback) = rayon::join(
            || parser::parse_seed_papers(&seeds_path),
            || {
                if feedback_path.exists() {
                    parser::parse_feedback(&feedback_path)
                } else {
                    debug!("No {} found, using the demo feedback table", FEEDBACK_FILE);
                    Ok(demo_feedback())
                }
            },
        );

        let seeds = seeds?;
        let feedback = feedback?;

        let papers = expand_seeds(&seeds, variants_per_seed);
        info!(
            "Loaded {} seeds ({} papers), {} feedback entries",
            seeds.len(),
            papers.len(),
            feedback.len()
        );

        let dataset = Self::from_parts(papers, feedback);
        dataset.validate()?;

        Ok(dataset)
    }

    pub fn papers(&self) -> &[Paper] {
        &self.papers
    }

    pub fn feedback(&self) -> &[UserFeedback] {
        &self.feedback
    }

    /// Get a paper by its exact (variant) id
    pub fn get_paper(&self, id: &str) -> Option<&Paper> {
        self.paper_index.get(id).map(|&position| &self.papers[position])
    }

    /// Every user in the feedback table, in order of first appearance
    pub fn user_ids(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.feedback
            .iter()
            .map(|entry| entry.user_id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// All raw ratings a user gave, across every entry, in document order
    pub fn get_user_ratings(&self, user_id: &str) -> Vec<(&str, f64)> {
        self.feedback
            .iter()
            .filter(|entry| entry.user_id == user_id)
            .flat_map(|entry| entry.ratings.iter())
            .collect()
    }

    /// (papers, distinct users, total ratings)
    pub fn counts(&self) -> (usize, usize, usize) {
        let total_ratings = self.feedback.iter().map(|entry| entry.ratings.len()).sum();
        (self.papers.len(), self.user_ids().len(), total_ratings)
    }

    /// Validate data integrity
    ///
    /// Rating values are only required to be finite; the range is not bounded.
    pub fn validate(&self) -> Result<()> {
        let mut ids = HashSet::with_capacity(self.papers.len());
        for paper in &self.papers {
            if !ids.insert(paper.id.as_str()) {
                return Err(DataLoadError::DuplicateId {
                    id: paper.id.clone(),
                });
            }
            if paper.title.trim().is_empty() {
                return Err(DataLoadError::InvalidValue {
                    field: "title".to_string(),
                    value: format!("<empty> (paper {})", paper.id),
                });
            }
            if !paper.source.url.starts_with("http") {
                return Err(DataLoadError::InvalidValue {
                    field: "source.url".to_string(),
                    value: paper.source.url.clone(),
                });
            }
        }

        for entry in &self.feedback {
            if entry.user_id.is_empty() {
                return Err(DataLoadError::ValidationError(
                    "feedback entry with empty userId".to_string(),
                ));
            }
            for (paper_id, rating) in entry.ratings.iter() {
                if !rating.is_finite() {
                    return Err(DataLoadError::InvalidValue {
                        field: format!("rating {}/{}", entry.user_id, paper_id),
                        value: rating.to_string(),
                    });
                }
            }
        }

        Ok(())
    }
}
