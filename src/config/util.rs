//! Configuration utility functions.

use std::path::{Path, PathBuf};

/// Find config file by searching upward from current directory
///
/// Starts from cwd and walks up parent directories until finding `config_name`
/// Returns the absolute path to the config file if found
///
/// # Example
/// ```text
/// /home/user/web/src/assets/  ← cwd
/// /home/user/web/mapprep.toml ← found!
/// ```
pub fn find_config_file(config_name: &Path) -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    find_config_file_from(&cwd, config_name)
}

/// Same as [`find_config_file`], starting from `start` instead of cwd.
pub fn find_config_file_from(start: &Path, config_name: &Path) -> Option<PathBuf> {
    if config_name.is_absolute() {
        return config_name.exists().then(|| config_name.to_path_buf());
    }

    let mut current = start;
    loop {
        let candidate = current.join(config_name);
        if candidate.exists() {
            return Some(candidate);
        }

        match current.parent() {
            Some(parent) => current = parent,
            None => return None,
        }
    }
}

/// Resolve `path` against `root` unless it is already absolute.
pub fn resolve_against(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_upward() {
        let temp = tempfile::TempDir::new().unwrap();
        let nested = temp.path().join("src").join("assets");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("mapprep.toml"), "").unwrap();

        let found = find_config_file_from(&nested, Path::new("mapprep.toml")).unwrap();
        assert_eq!(found, temp.path().join("mapprep.toml"));
    }

    #[test]
    fn test_find_config_missing() {
        let temp = tempfile::TempDir::new().unwrap();
        assert!(find_config_file_from(temp.path(), Path::new("no-such-mapprep.toml")).is_none());
    }

    #[test]
    fn test_resolve_against() {
        let root = Path::new("/site");
        assert_eq!(
            resolve_against(root, Path::new("a/b.svg")),
            PathBuf::from("/site/a/b.svg")
        );
        assert_eq!(
            resolve_against(root, Path::new("/abs.svg")),
            PathBuf::from("/abs.svg")
        );
    }
}
