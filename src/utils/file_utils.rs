use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::shared::error::{CollectorError, CollectorResult};

/// Creates `dir` (and parents) unless it already exists.
/// Returns `true` when something was created.
pub fn ensure_dir(dir: &Path) -> CollectorResult<bool> {
    if dir.is_dir() {
        return Ok(false);
    }

    fs::create_dir_all(dir).map_err(|source| match source.kind() {
        ErrorKind::PermissionDenied => CollectorError::PermissionDenied {
            path: dir.to_path_buf(),
        },
        _ => CollectorError::Io {
            path: dir.to_path_buf(),
            source,
        },
    })?;

    Ok(true)
}

/// Names of the plain files in `dir`, in the order the OS lists them.
/// Subdirectories and entries whose type can't be read are skipped.
pub fn list_file_names(dir: &Path) -> CollectorResult<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|_| CollectorError::DirectoryNotFound {
        path: dir.to_path_buf(),
    })?;

    let names = entries
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .map(|entry| entry.file_name().to_string_lossy().to_string())
        .collect();

    Ok(names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{create_dir_all, remove_dir_all, File};

    fn scratch(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("snapcollect_fu_{}_{}", name, std::process::id()));
        let _ = remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_ensure_dir_reports_creation_once() {
        let dir = scratch("ensure").join("nested");
        assert!(ensure_dir(&dir).unwrap());
        assert!(!ensure_dir(&dir).unwrap());
        assert!(dir.is_dir());
        let _ = remove_dir_all(dir.parent().unwrap());
    }

    #[test]
    fn test_list_file_names_skips_directories() {
        let dir = scratch("list");
        create_dir_all(dir.join("sub")).unwrap();
        File::create(dir.join("a.jpg")).unwrap();

        let names = list_file_names(&dir).unwrap();
        assert_eq!(names, vec!["a.jpg".to_string()]);
        let _ = remove_dir_all(&dir);
    }

    #[test]
    fn test_list_missing_dir_is_not_found() {
        let dir = scratch("missing");
        match list_file_names(&dir) {
            Err(CollectorError::DirectoryNotFound { path }) => assert_eq!(path, dir),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
