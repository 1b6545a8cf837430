pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod identity;
pub mod rendering;

// Curated re-exports
pub use app::game::GamePlugin;
pub use crate::core::config::{GameConfig, WindowConfig};
pub use gameplay::{GameOverSummary, GameplayPlugin, SubmissionStatus};
pub use identity::{PlayerIdentity, IdentitySource};
