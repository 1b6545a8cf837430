//! Who is playing: a configured name or a locally persisted guest.

use bevy::prelude::*;
use rand::thread_rng;
use std::path::PathBuf;

use crate::core::config::{GameConfig, PlayerSection};

pub mod guest;

pub use guest::{default_profile_path, GuestProfile, IdentityError};

const LOG_TARGET: &str = "identity";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentitySource {
    Guest,
    /// Name supplied by an outside provider (currently only `player.name` in config).
    Provider(String),
}

#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct PlayerIdentity {
    pub display_name: String,
    pub source: IdentitySource,
}

impl PlayerIdentity {
    pub fn guest(profile: &GuestProfile) -> Self {
        Self {
            display_name: profile.display_name.clone(),
            source: IdentitySource::Guest,
        }
    }

    pub fn is_guest(&self) -> bool {
        self.source == IdentitySource::Guest
    }
}

/// Config override first, then the stored guest profile. Profile failures
/// fall back to an unsaved guest so the game always has a name.
pub fn resolve_identity(cfg: &PlayerSection) -> PlayerIdentity {
    if let Some(name) = cfg.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        return PlayerIdentity {
            display_name: name.to_string(),
            source: IdentitySource::Provider("config".into()),
        };
    }
    let mut rng = thread_rng();
    let path = match &cfg.guest_profile {
        Some(p) => Ok(PathBuf::from(p)),
        None => default_profile_path(),
    };
    match path.and_then(|p| GuestProfile::load_or_create(&p, &mut rng)) {
        Ok(profile) => PlayerIdentity::guest(&profile),
        Err(e) => {
            warn!(target: LOG_TARGET, "guest profile unavailable ({e}); using a temporary guest");
            PlayerIdentity::guest(&GuestProfile::generate(&mut rng, 0))
        }
    }
}

fn setup_identity(mut commands: Commands, cfg: Res<GameConfig>) {
    let identity = resolve_identity(&cfg.player);
    info!(target: LOG_TARGET, "playing as {} ({:?})", identity.display_name, identity.source);
    commands.insert_resource(identity);
}

pub struct IdentityPlugin;
impl Plugin for IdentityPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_identity);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_name_wins() {
        let cfg = PlayerSection {
            name: Some("  ada ".into()),
            guest_profile: None,
        };
        let id = resolve_identity(&cfg);
        assert_eq!(id.display_name, "ada");
        assert_eq!(id.source, IdentitySource::Provider("config".into()));
    }

    #[test]
    fn blank_name_falls_back_to_guest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("guest.ron");
        let cfg = PlayerSection {
            name: Some("   ".into()),
            guest_profile: Some(path.display().to_string()),
        };
        let id = resolve_identity(&cfg);
        assert!(id.is_guest());
        let again = resolve_identity(&cfg);
        assert_eq!(id, again);
    }
}
