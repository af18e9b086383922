//! Extraction of the marked TODO section from a daily entry.

use std::fs::File;
use std::io::{BufRead, BufReader, ErrorKind};
use std::path::Path;

use anyhow::{Context, Result};

use crate::domain::format::EntryFormat;

/// Collect the non-blank lines between the first start marker and the next end marker.
///
/// Without a start marker nothing is returned. A missing end marker captures everything after
/// the start marker.
pub fn extract_section<R: BufRead>(reader: R, format: &EntryFormat) -> Result<Vec<String>> {
    let mut captured = Vec::new();
    let mut inside = false;

    for line in reader.lines() {
        let line = line.context("failed to read daily entry")?;
        let marker = line.trim();
        if !inside {
            inside = marker == format.todo_start();
            continue;
        }
        if marker == format.todo_end() {
            break;
        }
        if !marker.is_empty() {
            captured.push(line);
        }
    }

    Ok(captured)
}

/// Extract the TODO section from a file, treating a missing file as an empty section.
pub fn extract_from_path(path: &Path, format: &EntryFormat) -> Result<Vec<String>> {
    let file = match File::open(path) {
        Ok(file) => file,
        Err(err) if err.kind() == ErrorKind::NotFound => {
            tracing::debug!(path = %path.display(), "entry vanished before it could be read");
            return Ok(Vec::new());
        }
        Err(err) => {
            return Err(err)
                .with_context(|| format!("failed to open daily entry {}", path.display()));
        }
    };
    extract_section(BufReader::new(file), format)
        .with_context(|| format!("failed to extract TODO section from {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn extract(input: &str) -> Vec<String> {
        extract_section(Cursor::new(input), &EntryFormat::default()).unwrap()
    }

    #[test]
    fn captures_between_markers_without_blanks() {
        let input = "# March  3, 2024\n\n## TODO\n\n<!-- [TODO_START] -->\n\n* [ ] one\n\n  * [X] two\n\n<!-- [TODO_END] -->\n\n---\n";
        assert_eq!(extract(input), vec!["* [ ] one", "  * [X] two"]);
    }

    #[test]
    fn no_start_marker_yields_nothing() {
        assert!(extract("* [ ] stray\n<!-- [TODO_END] -->\n").is_empty());
        assert!(extract("").is_empty());
    }

    #[test]
    fn missing_end_marker_captures_rest() {
        let input = "<!-- [TODO_START] -->\n* [ ] a\n* [ ] b\n";
        assert_eq!(extract(input), vec!["* [ ] a", "* [ ] b"]);
    }

    #[test]
    fn content_after_end_marker_is_ignored() {
        let input = "<!-- [TODO_START] -->\n* [ ] a\n<!-- [TODO_END] -->\n* [ ] after\n<!-- [TODO_START] -->\n* [ ] again\n";
        assert_eq!(extract(input), vec!["* [ ] a"]);
    }

    #[test]
    fn markers_tolerate_surrounding_whitespace_and_crlf() {
        let input = "  <!-- [TODO_START] -->  \r\n* [ ] a\r\n   \r\n\t<!-- [TODO_END] -->\r\n";
        assert_eq!(extract(input), vec!["* [ ] a"]);
    }

    #[test]
    fn missing_file_is_empty() {
        let temp = tempfile::tempdir().unwrap();
        let lines =
            extract_from_path(&temp.path().join("nope.md"), &EntryFormat::default()).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn reads_from_file() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("daily.md");
        std::fs::write(&path, "<!-- [TODO_START] -->\n* [ ] file task\n<!-- [TODO_END] -->").unwrap();
        let lines = extract_from_path(&path, &EntryFormat::default()).unwrap();
        assert_eq!(lines, vec!["* [ ] file task"]);
    }
}
