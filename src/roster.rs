//! Loading the list of usernames to check.

use std::{io, path::{Path, PathBuf}};

use thiserror::Error;
use tracing::debug;

pub const DEFAULT_ROSTER_FILE: &str = "friends.txt";

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("could not read roster file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Reads the roster at `path`. Every line is trimmed and blank lines are skipped, order is kept.
/// Identifiers are not validated or deduplicated.
pub async fn load_roster(path: &Path) -> Result<Vec<String>, RosterError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| RosterError::Read {
            path: path.to_path_buf(),
            source,
        })?;

    let roster = parse_roster(&content);
    debug!("Loaded {} usernames from {}", roster.len(), path.display());
    Ok(roster)
}

pub fn parse_roster(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use anyhow::Result;
    use tempfile::{tempdir, NamedTempFile};

    use super::{load_roster, parse_roster, RosterError};

    #[tokio::test]
    async fn test_load_roster_trims_and_skips_blank_lines() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "  alice\n\nbob  \r\n   \n\tcarol\t\n")?;

        let roster = load_roster(file.path()).await?;

        assert_eq!(roster, vec!["alice", "bob", "carol"]);
        assert!(roster.iter().all(|v| v.trim() == v));
        Ok(())
    }

    #[tokio::test]
    async fn test_load_roster_keeps_duplicates_and_order() -> Result<()> {
        let mut file = NamedTempFile::new()?;
        write!(file, "zed\nalice\nzed")?;

        let roster = load_roster(file.path()).await?;

        assert_eq!(roster, vec!["zed", "alice", "zed"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_load_roster_missing_file() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("friends.txt");

        let err = load_roster(&path).await.unwrap_err();

        let RosterError::Read { path: failed, source } = &err;
        assert_eq!(failed, &path);
        assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
        assert!(err.to_string().contains("friends.txt"));
        Ok(())
    }

    #[test]
    fn test_parse_roster_empty() {
        assert!(parse_roster("").is_empty());
        assert!(parse_roster("\n  \n\t\n").is_empty());
    }

    #[test]
    fn test_parse_roster_counts_non_blank_lines() {
        let content = "a\n \nb\nc\n\n d \n";
        let expected = content.lines().filter(|l| !l.trim().is_empty()).count();
        assert_eq!(parse_roster(content).len(), expected);
    }
}
