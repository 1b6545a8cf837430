//! Locally persisted guest profile, used when no account name is configured.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("guest profile io: {0}")]
    Io(#[from] io::Error),
    #[error("guest profile {path} is not valid RON: {message}")]
    Decode { path: PathBuf, message: String },
    #[error("could not encode guest profile: {0}")]
    Encode(String),
    #[error("no platform config directory available")]
    NoConfigDir,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestProfile {
    pub id: String,
    pub display_name: String,
    pub created_at_secs: u64,
}

/// `<config dir>/merge_drop/guest.ron`
pub fn default_profile_path() -> Result<PathBuf, IdentityError> {
    dirs::config_dir()
        .map(|dir| dir.join("merge_drop").join("guest.ron"))
        .ok_or(IdentityError::NoConfigDir)
}

impl GuestProfile {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R, created_at_secs: u64) -> Self {
        Self {
            id: format!("{:016x}", rng.gen::<u64>()),
            display_name: format!("Guest-{:06}", rng.gen_range(0..1_000_000u32)),
            created_at_secs,
        }
    }

    pub fn load(path: &Path) -> Result<Self, IdentityError> {
        let text = fs::read_to_string(path)?;
        ron::from_str(&text).map_err(|e| IdentityError::Decode {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), IdentityError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let text = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| IdentityError::Encode(e.to_string()))?;
        fs::write(path, text)?;
        Ok(())
    }

    /// Reads the profile at `path`, creating and saving a fresh one when absent.
    /// A corrupt file is reported, not overwritten.
    pub fn load_or_create<R: Rng + ?Sized>(path: &Path, rng: &mut R) -> Result<Self, IdentityError> {
        match Self::load(path) {
            Ok(profile) => Ok(profile),
            Err(IdentityError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                let created = SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_secs())
                    .unwrap_or(0);
                let profile = Self::generate(rng, created);
                profile.save(path)?;
                Ok(profile)
            }
            Err(e) => Err(e),
        }
    }
}
