// src/io.rs
//! Batch file I/O: input items and the sparse feature file.

use std::fs;
use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};

/// One item per line; reading stops at the first zero-length line or EOF.
pub fn read_items(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("reading items from {}", path.display()))?;
    let mut items = Vec::new();
    for line in content.lines() {
        if line.is_empty() {
            break;
        }
        items.push(line.to_string());
    }
    Ok(items)
}

/// One sparse line per item, batch order preserved. An empty batch produces
/// an empty file.
pub fn write_feature_file(path: &Path, lines: &[String]) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("creating feature file {}", path.display()))?;
    for line in lines {
        writeln!(file, "{line}")
            .with_context(|| format!("writing feature file {}", path.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn reading_stops_at_first_blank_line() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "الاول\nالثاني\n\nمهمل\n").unwrap();
        let items = read_items(file.path()).unwrap();
        assert_eq!(items, vec!["الاول", "الثاني"]);
    }

    #[test]
    fn empty_input_is_an_empty_batch() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert!(read_items(file.path()).unwrap().is_empty());
    }

    #[test]
    fn feature_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("features.txt");
        write_feature_file(&path, &["0 1:2".to_string(), "0".to_string()]).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "0 1:2\n0\n");
    }
}
