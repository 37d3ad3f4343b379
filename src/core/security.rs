//! Upload path validation.
//!
//! Tools that upload local files must pass the path through
//! [`validate_path`] before handing it to the executor. When a root directory
//! is configured, the canonical path (symlinks resolved) must lie inside it.

use std::io;
use std::path::{Path, PathBuf};

use crate::core::config::SecurityConfig;

/// Errors that can occur during path validation
#[derive(Debug, thiserror::Error)]
pub enum PathSecurityError {
    #[error("Path '{path}' is outside allowed root directory '{root}'")]
    OutsideRootDirectory { path: PathBuf, root: PathBuf },

    #[error("Path does not exist: '{path}'")]
    PathNotFound { path: PathBuf },

    #[error("Path is not a regular file: '{path}'")]
    NotAFile { path: PathBuf },

    #[error("IO error for path '{path}': {error}")]
    IoError { path: PathBuf, error: io::Error },
}

/// Validate that `input_path` names an existing file inside the configured root.
///
/// Returns the canonical path on success.
pub fn validate_path(
    input_path: &str,
    security: &SecurityConfig,
) -> Result<PathBuf, PathSecurityError> {
    let canonical_path = canonicalize(Path::new(input_path))?;

    if !canonical_path.is_file() {
        return Err(PathSecurityError::NotAFile {
            path: canonical_path,
        });
    }

    let Some(root) = &security.root_path else {
        return Ok(canonical_path);
    };

    let canonical_root = canonicalize(root)?;
    if !canonical_path.starts_with(&canonical_root) {
        return Err(PathSecurityError::OutsideRootDirectory {
            path: canonical_path,
            root: canonical_root,
        });
    }

    Ok(canonical_path)
}

fn canonicalize(path: &Path) -> Result<PathBuf, PathSecurityError> {
    path.canonicalize().map_err(|e| {
        if e.kind() == io::ErrorKind::NotFound {
            PathSecurityError::PathNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PathSecurityError::IoError {
                path: path.to_path_buf(),
                error: e,
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn security(root: Option<PathBuf>) -> SecurityConfig {
        SecurityConfig { root_path: root }
    }

    #[test]
    fn test_no_root_allows_existing_files() {
        let temp_dir = TempDir::new().unwrap();
        let invoice = temp_dir.path().join("invoice.xml");
        fs::write(&invoice, "<Invoice/>").unwrap();

        let result = validate_path(invoice.to_str().unwrap(), &security(None));
        assert!(result.is_ok());
    }

    #[test]
    fn test_file_within_root() {
        let temp_dir = TempDir::new().unwrap();
        let invoice = temp_dir.path().join("invoice.pdf");
        fs::write(&invoice, "%PDF").unwrap();

        let config = security(Some(temp_dir.path().to_path_buf()));
        assert!(validate_path(invoice.to_str().unwrap(), &config).is_ok());
    }

    #[test]
    fn test_file_outside_root() {
        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let outside = outside_dir.path().join("secrets.txt");
        fs::write(&outside, "x").unwrap();

        let config = security(Some(root_dir.path().to_path_buf()));
        let result = validate_path(outside.to_str().unwrap(), &config);
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_traversal_blocked() {
        let temp_dir = TempDir::new().unwrap();
        let subdir = temp_dir.path().join("uploads");
        fs::create_dir(&subdir).unwrap();
        fs::write(temp_dir.path().join("other.xml"), "x").unwrap();

        let config = security(Some(subdir.clone()));
        let traversal = subdir.join("../other.xml");
        let result = validate_path(traversal.to_str().unwrap(), &config);
        assert!(matches!(
            result,
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }

    #[test]
    fn test_missing_file_and_directory_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.xml");

        let config = security(None);
        assert!(matches!(
            validate_path(missing.to_str().unwrap(), &config),
            Err(PathSecurityError::PathNotFound { .. })
        ));
        assert!(matches!(
            validate_path(temp_dir.path().to_str().unwrap(), &config),
            Err(PathSecurityError::NotAFile { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_out_of_root_blocked() {
        use std::os::unix::fs::symlink;

        let root_dir = TempDir::new().unwrap();
        let outside_dir = TempDir::new().unwrap();
        let target = outside_dir.path().join("target.xml");
        let link = root_dir.path().join("link.xml");
        fs::write(&target, "x").unwrap();
        symlink(&target, &link).unwrap();

        let config = security(Some(root_dir.path().to_path_buf()));
        assert!(matches!(
            validate_path(link.to_str().unwrap(), &config),
            Err(PathSecurityError::OutsideRootDirectory { .. })
        ));
    }
}
