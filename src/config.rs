use crate::prelude::*;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "colonies.json";

/// Settings read from `colonies.json` in the save directory. Every field is optional.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    pub dimension: i32,
    /// Territory radius, in blocks, of newly founded colonies. At most
    /// [`MAX_RADIUS`](crate::colony::MAX_RADIUS).
    pub colony_radius: u32,
    pub save_file_prefix: String,
}
impl Default for Config {
    fn default() -> Self {
        Self {
            dimension: 0,
            colony_radius: 100,
            save_file_prefix: "colonies".to_owned(),
        }
    }
}
impl Config {
    pub fn load(save_dir: impl AsRef<Path>) -> Result<Self> {
        let path = save_dir.as_ref().join(CONFIG_FILE);
        match std::fs::read(&path) {
            Ok(buf) => {
                let config: Self = serde_json::from_slice(&buf)?;
                if config.colony_radius > crate::colony::MAX_RADIUS {
                    return Err(Error::RadiusOutOfRange(config.colony_radius));
                }
                Ok(config)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("no {} found, using defaults", path.display());
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
    pub fn save_path(&self, save_dir: impl AsRef<Path>) -> PathBuf {
        save_dir.as_ref().join(format!("{}-{}.dat", self.save_file_prefix, self.dimension))
    }
}
