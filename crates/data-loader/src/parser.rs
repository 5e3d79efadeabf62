//! Parser for record dump files.
//!
//! Two layouts are accepted for `users.json` and `events.json`:
//! - a single JSON array of documents
//! - newline-delimited JSON, one document per line (the `mongoexport` default)

use crate::error::{DataLoadError, Result};
use crate::types::{EventRecord, UserRecord};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(DataLoadError::FileNotFound {
            path: path.display().to_string(),
        });
    }
    Ok(fs::read_to_string(path)?)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Decode a dump held in memory.
///
/// `file` is only used for error messages.
pub fn parse_documents<T: DeserializeOwned>(content: &str, file: &str) -> Result<Vec<T>> {
    let trimmed = content.trim_start();
    if trimmed.is_empty() {
        return Ok(Vec::new());
    }

    if trimmed.starts_with('[') {
        return serde_json::from_str(trimmed).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            reason: e.to_string(),
        });
    }

    let mut documents = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue; // Skip empty lines
        }
        let document = serde_json::from_str(line_trimmed).map_err(|e| DataLoadError::ParseError {
            file: file.to_string(),
            reason: format!("line {}: {}", idx + 1, e),
        })?;
        documents.push(document);
    }
    Ok(documents)
}

/// Parse the users dump
pub fn parse_users(path: &Path) -> Result<Vec<UserRecord>> {
    let content = read_file(path)?;
    parse_documents(&content, &file_name(path))
}

/// Parse the events dump
pub fn parse_events(path: &Path) -> Result<Vec<EventRecord>> {
    let content = read_file(path)?;
    parse_documents(&content, &file_name(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_array_layout() {
        let users: Vec<UserRecord> =
            parse_documents(r#"[{"id": "u1"}, {"_id": {"$oid": "u2"}}]"#, "users.json").unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[1].id, "u2");
    }

    #[test]
    fn test_parse_line_layout() {
        let content = "{\"id\": \"e1\", \"isActive\": true}\n\n{\"id\": \"e2\"}\n";
        let events: Vec<EventRecord> = parse_documents(content, "events.json").unwrap();
        assert_eq!(events.len(), 2);
        assert!(events[0].is_active);
        assert!(!events[1].is_active);
    }

    #[test]
    fn test_parse_error_reports_line() {
        let content = "{\"id\": \"e1\"}\nnot json\n";
        let err = parse_documents::<EventRecord>(content, "events.json").unwrap_err();
        match err {
            DataLoadError::ParseError { file, reason } => {
                assert_eq!(file, "events.json");
                assert!(reason.starts_with("line 2"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_dump() {
        let events: Vec<EventRecord> = parse_documents("   \n", "events.json").unwrap();
        assert!(events.is_empty());
    }

    #[test]
    fn test_missing_file() {
        let err = parse_users(Path::new("/definitely/not/here/users.json")).unwrap_err();
        assert!(matches!(err, DataLoadError::FileNotFound { .. }));
    }
}
