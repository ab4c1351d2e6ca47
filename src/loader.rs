/*!
 * Task List Loader
 * Reads task names from a plain text file, one per line, seeding a default
 * list when the file is missing
 */

use crate::core::errors::Result;
use crate::core::limits::DEFAULT_TASK_NAMES;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

/// Load task names from `path`
///
/// Lines are trimmed and blank lines skipped. A missing file is created with
/// the default list first.
pub fn load_task_names(path: impl AsRef<Path>) -> Result<Vec<String>> {
    let path = path.as_ref();

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            warn!(path = %path.display(), "Task list missing, seeding defaults");
            seed_default(path)?
        }
        Err(e) => return Err(e.into()),
    };

    let names = parse_task_names(&contents);
    info!(path = %path.display(), count = names.len(), "Task list loaded");
    Ok(names)
}

/// Split file contents into trimmed, non-blank names
pub fn parse_task_names(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}

fn seed_default(path: &Path) -> Result<String> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let contents = DEFAULT_TASK_NAMES.join("\n");
    fs::write(path, &contents)?;
    Ok(contents)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skips_blank_lines() {
        let names = parse_task_names("  Lab \n\n\t\nVocab\r\nAnki");
        assert_eq!(names, vec!["Lab", "Vocab", "Anki"]);
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_task_names("").is_empty());
        assert!(parse_task_names("\n  \n").is_empty());
    }

    #[test]
    fn test_missing_file_seeded_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.txt");

        let names = load_task_names(&path).unwrap();
        assert_eq!(names, DEFAULT_TASK_NAMES.to_vec());

        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(
            written,
            "CSE 325 Lab\nCSE 335 C++ Project\nSpanish Vocab\nJapanese N5 Anki"
        );
    }

    #[test]
    fn test_existing_file_not_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.txt");
        fs::write(&path, "Thesis\n\nGym\n").unwrap();

        assert_eq!(load_task_names(&path).unwrap(), vec!["Thesis", "Gym"]);
        assert_eq!(fs::read_to_string(&path).unwrap(), "Thesis\n\nGym\n");
    }

    #[test]
    fn test_unreadable_path_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory cannot be read as a task list
        let err = load_task_names(dir.path()).unwrap_err();
        assert!(matches!(err, crate::core::errors::AppError::Io(_)));
    }
}
