use bevy::prelude::*;
use game_core::{ArenaConfig, CapacityConfig, DropConfig, GameOverConfig, Level};
use game_physics::PhysicsConfig;
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
    pub title: String,
}
impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 540.0,
            height: 860.0,
            title: "Merge Drop".into(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ArenaSection {
    pub width: f32,
    pub height: f32,
    pub wall_thickness: f32,
    pub spawn_margin: f32,
    pub boundary_margin: f32,
}
impl Default for ArenaSection {
    fn default() -> Self {
        let a = ArenaConfig::default();
        Self {
            width: a.width,
            height: a.height,
            wall_thickness: a.wall_thickness,
            spawn_margin: a.spawn_margin,
            boundary_margin: a.boundary_margin,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct PhysicsSection {
    pub pixels_per_meter: f32,
    pub gravity_y: f32,
    pub restitution: f32,
    pub friction: f32,
    pub wall_friction: f32,
    pub linear_damping: f32,
}
impl Default for PhysicsSection {
    fn default() -> Self {
        let p = PhysicsConfig::default();
        Self {
            pixels_per_meter: p.pixels_per_meter,
            gravity_y: p.gravity.y,
            restitution: p.ball_restitution,
            friction: p.ball_friction,
            wall_friction: p.wall_friction,
            linear_damping: p.linear_damping,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DropSection {
    pub cooldown_secs: f32,
}
impl Default for DropSection {
    fn default() -> Self {
        Self {
            cooldown_secs: DropConfig::default().cooldown_secs,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct GameOverSection {
    pub poll_interval_secs: f32,
    pub rest_velocity_epsilon: f32,
    pub settle_grace_secs: f32,
}
impl Default for GameOverSection {
    fn default() -> Self {
        let g = GameOverConfig::default();
        Self {
            poll_interval_secs: g.poll_interval_secs,
            rest_velocity_epsilon: g.rest_velocity_epsilon,
            settle_grace_secs: g.settle_grace_secs,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct CapacitySection {
    pub max_balls: usize,
    pub evict_count: usize,
}
impl Default for CapacitySection {
    fn default() -> Self {
        let c = CapacityConfig::default();
        Self {
            max_balls: c.max_balls,
            evict_count: c.evict_count,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct RenderSection {
    /// Overlay catalog images on balls when the files exist.
    pub use_images: bool,
    pub shake_decay: f32,
    pub show_boundary_line: bool,
}
impl Default for RenderSection {
    fn default() -> Self {
        Self {
            use_images: true,
            shake_decay: 12.0,
            show_boundary_line: true,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct PlayerSection {
    /// Display name override; skips the guest profile when set.
    pub name: Option<String>,
    /// Guest profile location; defaults to the platform config dir.
    pub guest_profile: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct LeaderboardSection {
    /// Base URL of the leaderboard service, e.g. `http://127.0.0.1:8787`. None disables submission.
    pub url: Option<String>,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct DebugSection {
    pub log_interval: f32,
}
impl Default for DebugSection {
    fn default() -> Self {
        Self { log_interval: 5.0 }
    }
}

#[derive(Debug, Deserialize, Resource, Clone, PartialEq, Default)]
#[serde(default)]
pub struct GameConfig {
    pub window: WindowConfig,
    pub arena: ArenaSection,
    pub physics: PhysicsSection,
    pub drop: DropSection,
    pub game_over: GameOverSection,
    pub capacity: CapacitySection,
    pub render: RenderSection,
    pub player: PlayerSection,
    pub leaderboard: LeaderboardSection,
    pub debug: DebugSection,
}

impl GameConfig {
    /// Merge RON files in order (later maps override earlier keys).
    /// Returns (config, files used, errors); never fails, falling back to defaults.
    pub fn load_layered<P, I>(paths: I) -> (Self, Vec<String>, Vec<String>)
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = P>,
    {
        use ron::value::Value;
        let mut merged: Option<Value> = None;
        let mut used = Vec::new();
        let mut errors = Vec::new();
        fn merge_value(base: &mut Value, overlay: Value) {
            match (base, overlay) {
                (Value::Map(bm), Value::Map(om)) => {
                    for (k, v) in om.into_iter() {
                        let mut incoming = Some(v);
                        for (ek, ev) in bm.iter_mut() {
                            if *ek == k {
                                if let Some(val) = incoming.take() {
                                    merge_value(ev, val);
                                }
                                break;
                            }
                        }
                        if let Some(val) = incoming {
                            bm.insert(k, val);
                        }
                    }
                }
                (b, o) => *b = o,
            }
        }
        for p in paths {
            let path_ref = p.as_ref();
            if !path_ref.exists() {
                continue;
            }
            match fs::read_to_string(path_ref) {
                Ok(txt) => match ron::from_str::<Value>(&txt) {
                    Ok(val) => {
                        if let Some(cur) = &mut merged {
                            merge_value(cur, val);
                        } else {
                            merged = Some(val);
                        }
                        used.push(path_ref.display().to_string());
                    }
                    Err(e) => errors.push(format!("{}: parse error: {e}", path_ref.display())),
                },
                Err(e) => errors.push(format!("{}: read error: {e}", path_ref.display())),
            }
        }
        match merged {
            Some(val) => match val.into_rust::<GameConfig>() {
                Ok(cfg) => (cfg, used, errors),
                Err(e) => {
                    errors.push(format!(
                        "failed to deserialize merged config; using defaults: {e}"
                    ));
                    (GameConfig::default(), used, errors)
                }
            },
            None => (GameConfig::default(), used, errors),
        }
    }

    pub fn validate(&self) -> Vec<String> {
        let mut w = Vec::new();
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            w.push("window dimensions must be > 0".into());
        }
        let widest = Level::MAX.radius() * 2.0;
        if self.arena.width < widest {
            w.push(format!(
                "arena.width {} narrower than the largest ball ({widest})",
                self.arena.width
            ));
        }
        if self.arena.height <= 0.0 || self.arena.wall_thickness <= 0.0 {
            w.push("arena.height and arena.wall_thickness must be > 0".into());
        }
        if self.arena.boundary_margin <= self.arena.spawn_margin {
            w.push(format!(
                "arena.boundary_margin {} must exceed spawn_margin {}; every drop would start below the line",
                self.arena.boundary_margin, self.arena.spawn_margin
            ));
        }
        if self.arena.boundary_margin >= self.arena.height {
            w.push("arena.boundary_margin puts the game-over line below the floor".into());
        }
        if self.physics.gravity_y >= 0.0 {
            w.push(format!(
                "physics.gravity_y is {}; balls will not fall (typical configs use negative for downward)",
                self.physics.gravity_y
            ));
        }
        if !(0.0..=1.0).contains(&self.physics.restitution) {
            w.push(format!(
                "physics.restitution {} outside 0..1",
                self.physics.restitution
            ));
        }
        if self.physics.pixels_per_meter <= 0.0 {
            w.push("physics.pixels_per_meter must be > 0".into());
        }
        if self.drop.cooldown_secs < 0.0 {
            w.push("drop.cooldown_secs negative -> treated as 0".into());
        }
        if self.game_over.poll_interval_secs <= 0.0 {
            w.push("game_over.poll_interval_secs must be > 0".into());
        }
        if self.game_over.rest_velocity_epsilon <= 0.0 {
            w.push("game_over.rest_velocity_epsilon must be > 0; no ball can ever be at rest".into());
        }
        if self.capacity.max_balls == 0 {
            w.push("capacity.max_balls is 0; every ball would be evicted".into());
        }
        if self.capacity.evict_count == 0 || self.capacity.evict_count > self.capacity.max_balls {
            w.push(format!(
                "capacity.evict_count {} should be in 1..={}",
                self.capacity.evict_count, self.capacity.max_balls
            ));
        }
        if let Some(url) = &self.leaderboard.url {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                w.push(format!("leaderboard.url {url:?} is not an http(s) URL"));
            }
        }
        if self.debug.log_interval <= 0.0 {
            w.push("debug.log_interval must be > 0".into());
        }
        w
    }

    pub fn arena_config(&self) -> ArenaConfig {
        ArenaConfig {
            width: self.arena.width,
            height: self.arena.height,
            wall_thickness: self.arena.wall_thickness,
            spawn_margin: self.arena.spawn_margin,
            boundary_margin: self.arena.boundary_margin,
        }
    }

    pub fn physics_config(&self) -> PhysicsConfig {
        PhysicsConfig {
            pixels_per_meter: self.physics.pixels_per_meter,
            gravity: Vec2::new(0.0, self.physics.gravity_y),
            ball_restitution: self.physics.restitution,
            ball_friction: self.physics.friction,
            wall_friction: self.physics.wall_friction,
            linear_damping: self.physics.linear_damping,
        }
    }

    pub fn drop_config(&self) -> DropConfig {
        DropConfig {
            cooldown_secs: self.drop.cooldown_secs.max(0.0),
        }
    }

    pub fn game_over_config(&self) -> GameOverConfig {
        GameOverConfig {
            poll_interval_secs: self.game_over.poll_interval_secs.max(0.01),
            rest_velocity_epsilon: self.game_over.rest_velocity_epsilon,
            settle_grace_secs: self.game_over.settle_grace_secs.max(0.0),
        }
    }

    pub fn capacity_config(&self) -> CapacityConfig {
        CapacityConfig {
            max_balls: self.capacity.max_balls,
            evict_count: self.capacity.evict_count,
        }
    }

    /// Inserts the config and every crate-level resource derived from it.
    pub fn insert_resources(&self, app: &mut App) {
        app.insert_resource(self.clone())
            .insert_resource(self.arena_config())
            .insert_resource(self.physics_config())
            .insert_resource(self.drop_config())
            .insert_resource(self.game_over_config())
            .insert_resource(self.capacity_config());
    }
}

/// What `load_layered` found at startup; logged once the log plugin is up.
#[derive(Resource, Debug, Clone, Default)]
pub struct ConfigLoadReport {
    pub used: Vec<String>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ConfigLoadReport {
    pub fn new(cfg: &GameConfig, used: Vec<String>, errors: Vec<String>) -> Self {
        Self {
            used,
            errors,
            warnings: cfg.validate(),
        }
    }
}

pub fn log_config_report(report: Option<Res<ConfigLoadReport>>) {
    let Some(report) = report else {
        return;
    };
    if report.used.is_empty() {
        warn!(target: "config", "no config files found; running on defaults");
    } else {
        info!(target: "config", "loaded config layers: {}", report.used.join(", "));
    }
    for e in &report.errors {
        error!(target: "config", "{e}");
    }
    for w in &report.warnings {
        warn!(target: "config", "{w}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_validate_clean() {
        let cfg = GameConfig::default();
        assert!(cfg.validate().is_empty(), "{:?}", cfg.validate());
        assert_eq!(cfg.arena_config(), ArenaConfig::default());
        assert_eq!(cfg.capacity_config(), CapacityConfig::default());
    }

    #[test]
    fn partial_ron_keeps_other_defaults() {
        let cfg: GameConfig = ron::from_str("(drop: (cooldown_secs: 1.5))").unwrap();
        assert_eq!(cfg.drop.cooldown_secs, 1.5);
        assert_eq!(cfg.window, WindowConfig::default());
    }

    #[test]
    fn negative_values_are_clamped_when_derived() {
        let mut cfg = GameConfig::default();
        cfg.drop.cooldown_secs = -1.0;
        cfg.game_over.poll_interval_secs = 0.0;
        assert_eq!(cfg.drop_config().cooldown_secs, 0.0);
        assert!(cfg.game_over_config().poll_interval_secs > 0.0);
        assert_eq!(cfg.validate().len(), 2);
    }
}
