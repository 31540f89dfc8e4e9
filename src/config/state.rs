// Application state module
// Read-only state shared across request tasks

use std::path::PathBuf;

use super::types::Config;
use crate::error::Error;

/// Application state, immutable once the server starts.
#[derive(Debug)]
pub struct AppState {
    pub config: Config,
    /// Canonicalized root directory; the containment check for every
    /// request path is performed against this prefix.
    pub root: PathBuf,
}

impl AppState {
    /// Resolve the root directory and build the shared state.
    ///
    /// Fails when the configured root does not exist or is not a directory.
    pub fn new(config: Config) -> Result<Self, Error> {
        let root = config
            .server
            .root_dir
            .canonicalize()
            .map_err(|_| Error::RootDirectory(config.server.root_dir.clone()))?;

        if !root.is_dir() {
            return Err(Error::RootDirectory(config.server.root_dir.clone()));
        }

        Ok(Self { config, root })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_root(root: &std::path::Path) -> Config {
        let mut cfg = Config::load_from("nonexistent-test-config").unwrap();
        cfg.server.root_dir = root.to_path_buf();
        cfg
    }

    #[test]
    fn resolves_existing_directory() {
        let dir = std::env::temp_dir();
        let state = AppState::new(config_with_root(&dir)).unwrap();
        assert!(state.root.is_absolute());
    }

    #[test]
    fn rejects_missing_directory() {
        let missing = std::env::temp_dir().join("localserve-no-such-dir");
        let err = AppState::new(config_with_root(&missing)).unwrap_err();
        assert!(matches!(err, Error::RootDirectory(_)));
    }
}
