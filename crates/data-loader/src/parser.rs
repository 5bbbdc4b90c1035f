//! Parsers for the JSON data files.
//!
//! - `paper_seeds.json`: array of [`SeedPaper`]
//! - `feedback.json`: array of [`UserFeedback`], each `{"userId": ..., "ratings": {...}}`

use crate::error::{DataLoadError, Result};
use crate::types::*;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, ErrorKind};
use std::path::Path;

/// Open `path` and decode its whole contents as JSON
fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })?;

    serde_json::from_reader(BufReader::new(file)).map_err(|e| DataLoadError::ParseError {
        file: file_label(path),
        reason: e.to_string(),
    })
}

fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the seed catalog
pub fn parse_seed_papers(path: &Path) -> Result<Vec<SeedPaper>> {
    read_json(path)
}

/// Parse the feedback table
///
/// Each entry's ratings keep the key order of the JSON object.
pub fn parse_feedback(path: &Path) -> Result<Vec<UserFeedback>> {
    read_json(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_parse_feedback() {
        let file = write_temp(
            r#"[
                {"userId": "active", "ratings": {"alpha": 5}},
                {"userId": "neighbor", "ratings": {"alpha": 4, "gamma": 5}}
            ]"#,
        );

        let feedback = parse_feedback(file.path()).unwrap();
        assert_eq!(feedback.len(), 2);
        assert_eq!(feedback[1].user_id, "neighbor");
        assert_eq!(feedback[1].ratings.get("gamma"), Some(5.0));
    }

    #[test]
    fn test_parse_seed_papers() {
        let file = write_temp(
            r#"[{
                "id": "flashattention",
                "title": "FlashAttention",
                "topic": "Inference",
                "source": {"title": "arXiv", "url": "https://arxiv.org/abs/2205.14135"},
                "cards": {
                    "hook": "Attention is memory bound.",
                    "intuition": "Tile it so it stays in SRAM.",
                    "method": ["tile", "fuse", "recompute"],
                    "tradeoff": {"good": "fast", "bad": "needs custom kernels"},
                    "who": {"do": "GPU people", "skip": "CPU-only"}
                }
            }]"#,
        );

        let seeds = parse_seed_papers(file.path()).unwrap();
        assert_eq!(seeds.len(), 1);
        assert_eq!(seeds[0].cards.method.len(), 3);
        assert_eq!(seeds[0].cards.who.audience, "GPU people");
    }

    #[test]
    fn test_missing_file() {
        let result = parse_feedback(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(DataLoadError::FileNotFound { .. })));
    }

    #[test]
    fn test_malformed_json() {
        let file = write_temp(r#"[{"userId": "active", "ratings": {"alpha": "five"}}]"#);

        let result = parse_feedback(file.path());
        match result {
            Err(DataLoadError::ParseError { reason, .. }) => assert!(reason.contains("line")),
            other => panic!("expected parse error, got {:?}", other),
        }
    }
}
