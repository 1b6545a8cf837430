use std::path::PathBuf;

use bevy::prelude::*;
use game_core::{Ball, Level};

use crate::core::config::GameConfig;

/// Shared unit-circle mesh plus one material (and optional image) per level.
#[derive(Resource, Debug, Clone)]
pub struct BallVisuals {
    pub circle: Handle<Mesh>,
    pub materials: Vec<Handle<ColorMaterial>>,
    pub images: Vec<Option<Handle<Image>>>,
}

impl BallVisuals {
    pub fn material(&self, level: Level) -> Handle<ColorMaterial> {
        self.materials
            .get(level.index())
            .cloned()
            .unwrap_or_default()
    }

    pub fn image(&self, level: Level) -> Option<Handle<Image>> {
        self.images.get(level.index()).cloned().flatten()
    }
}

pub fn level_color(level: Level) -> Color {
    let [r, g, b] = level.config().color;
    Color::srgb(r, g, b)
}

/// Marks the visual child of a ball. The collider stays on the parent so the
/// child can be scaled freely.
#[derive(Component, Debug, Clone, Copy)]
pub struct BallVisual;

/// Where the asset server reads from: `BEVY_ASSET_ROOT`, then `CARGO_MANIFEST_DIR`,
/// then the executable's directory, each joined with `assets`.
pub fn asset_root(env: impl Fn(&str) -> Option<String>, exe: Option<PathBuf>) -> PathBuf {
    let base = env("BEVY_ASSET_ROOT")
        .or_else(|| env("CARGO_MANIFEST_DIR"))
        .map(PathBuf::from)
        .or_else(|| exe.and_then(|p| p.parent().map(PathBuf::from)))
        .unwrap_or_default();
    base.join("assets")
}

fn image_on_disk(rel: &str) -> bool {
    #[cfg(not(target_arch = "wasm32"))]
    {
        let root = asset_root(|k| std::env::var(k).ok(), std::env::current_exe().ok());
        root.join(rel).exists()
    }
    #[cfg(target_arch = "wasm32")]
    {
        let _ = rel;
        true
    }
}

pub fn setup_ball_visuals(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    asset_server: Res<AssetServer>,
    cfg: Res<GameConfig>,
) {
    let circle = meshes.add(Circle::new(0.5));
    let mut level_materials = Vec::with_capacity(Level::COUNT);
    let mut images = Vec::with_capacity(Level::COUNT);
    let mut missing = Vec::new();
    for level in Level::all() {
        level_materials.push(materials.add(level_color(level)));
        let path = level.config().image;
        if cfg.render.use_images && image_on_disk(path) {
            images.push(Some(asset_server.load(path)));
        } else {
            if cfg.render.use_images {
                missing.push(path);
            }
            images.push(None);
        }
    }
    if !missing.is_empty() {
        warn!(
            target: "render",
            "{} ball images missing, drawing flat colors for them: {}",
            missing.len(),
            missing.join(", ")
        );
    }
    commands.insert_resource(BallVisuals {
        circle,
        materials: level_materials,
        images,
    });
}

pub fn attach_ball_visuals(
    mut commands: Commands,
    visuals: Option<Res<BallVisuals>>,
    new_balls: Query<(Entity, &Ball), Added<Ball>>,
) {
    let Some(visuals) = visuals else {
        return;
    };
    for (entity, ball) in &new_balls {
        let diameter = ball.radius() * 2.0;
        commands.entity(entity).with_children(|parent| {
            parent.spawn((
                BallVisual,
                Mesh2d(visuals.circle.clone()),
                MeshMaterial2d(visuals.material(ball.level)),
                Transform::from_scale(Vec3::new(diameter, diameter, 1.0)),
            ));
            if let Some(image) = visuals.image(ball.level) {
                parent.spawn((
                    BallVisual,
                    Sprite {
                        image,
                        custom_size: Some(Vec2::splat(diameter)),
                        ..default()
                    },
                    Transform::from_xyz(0.0, 0.0, 0.1),
                ));
            }
        });
    }
}
