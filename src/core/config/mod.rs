pub mod config;

pub use config::{
    ArenaSection, CapacitySection, DebugSection, DropSection, GameConfig, GameOverSection,
    LeaderboardSection, PhysicsSection, PlayerSection, RenderSection, WindowConfig,
    ConfigLoadReport, log_config_report,
};
