use anyhow::Result;
use std::path::{Path, PathBuf};

/// Well-known paths for config and input files.
pub struct PathManager {
    config_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("reelport");
        Ok(Self { config_dir })
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    /// Default watchlist export path under the configured exports directory.
    pub fn watchlist_csv(exports_dir: &Path) -> PathBuf {
        exports_dir.join("watchlist.csv")
    }

    /// Default ratings export path under the configured exports directory.
    pub fn ratings_csv(exports_dir: &Path) -> PathBuf {
        exports_dir.join("ratings.csv")
    }
}
