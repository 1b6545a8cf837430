use bevy::prelude::*;

use merge_drop::core::config::ConfigLoadReport;
use merge_drop::{GameConfig, GamePlugin};

const CONFIG_LAYERS: [&str; 2] = ["assets/config/game.ron", "assets/config/game.local.ron"];

fn main() {
    // Missing or broken layers fall back to defaults; problems are logged at startup.
    let (cfg, used, errors) = GameConfig::load_layered(CONFIG_LAYERS);
    let report = ConfigLoadReport::new(&cfg, used, errors);

    let mut app = App::new();
    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: cfg.window.title.clone(),
            resolution: (cfg.window.width, cfg.window.height).into(),
            resizable: true,
            ..default()
        }),
        ..default()
    }));
    cfg.insert_resources(&mut app);
    app.insert_resource(report).add_plugins(GamePlugin).run();
}
