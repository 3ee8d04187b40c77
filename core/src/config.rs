use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::gesture::DEFAULT_DRAG_THRESHOLD;

const CONFIG_FILE_NAME: &str = "config.json";
const DEFAULT_DIR_NAME: &str = ".swipetodo";

/// Display units covered by one terminal row when a mouse drag is fed to
/// the drag interpreter. Two rows clear the default threshold, one does not.
pub const DEFAULT_ROW_HEIGHT: f64 = 32.0;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    #[serde(skip)]
    pub data_dir: PathBuf,
    pub drag_threshold: f64,
    pub row_height: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DIR_NAME),
            drag_threshold: DEFAULT_DRAG_THRESHOLD,
            row_height: DEFAULT_ROW_HEIGHT,
        }
    }
}

impl Config {
    /// Loads `config.json` from `data_dir` (or `~/.swipetodo`), falling back
    /// to defaults when the file does not exist.
    pub fn load(data_dir: Option<PathBuf>) -> Result<Self> {
        let data_dir = match data_dir {
            Some(dir) => dir,
            None => default_data_dir()?,
        };
        let mut config = Self::load_file(&data_dir.join(CONFIG_FILE_NAME))?;
        config.data_dir = data_dir;
        Ok(config)
    }

    fn load_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if !self.drag_threshold.is_finite() || self.drag_threshold < 0.0 {
            return Err(anyhow!("drag_threshold must be a non-negative number"));
        }
        if !self.row_height.is_finite() || self.row_height <= 0.0 {
            return Err(anyhow!("row_height must be a positive number"));
        }
        Ok(())
    }

    pub fn log_path(&self) -> PathBuf {
        self.data_dir.join("swipetodo.log")
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let home_dir = dirs::home_dir()
        .ok_or_else(|| anyhow!("Could not determine home directory"))?;
    Ok(home_dir.join(DEFAULT_DIR_NAME))
}
