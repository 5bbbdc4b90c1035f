//! Checks the catalog shipped in the repository's `data/` directory.

use data_loader::{Card, Dataset, ACTIVE_USER_ID};
use std::collections::HashSet;
use std::path::PathBuf;

fn data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../data")
}

#[test]
fn test_shipped_catalog_loads() {
    let dataset = Dataset::load_from_files(&data_dir(), 3).unwrap();
    let (papers, users, ratings) = dataset.counts();

    assert_eq!(papers % 3, 0);
    assert!(papers >= 3);
    assert_eq!(users, 7);
    assert_eq!(ratings, 36);
    assert!(!dataset.get_user_ratings(ACTIVE_USER_ID).is_empty());
}

#[test]
fn test_shipped_papers_have_five_cards_and_sources() {
    let dataset = Dataset::load_from_files(&data_dir(), 2).unwrap();

    for paper in dataset.papers() {
        assert_eq!(paper.cards.len(), 5, "paper {}", paper.id);
        assert!(matches!(paper.cards[0], Card::Hook { .. }));
        assert!(paper.source.url.starts_with("http"));
        assert!(!paper.source.title.is_empty());
    }
}

#[test]
fn test_shipped_topics_are_labeled() {
    let dataset = Dataset::load_from_files(&data_dir(), 1).unwrap();
    let topics: HashSet<&str> = dataset.papers().iter().map(|p| p.topic.as_str()).collect();
    assert!(topics.len() > 1);
}
