use bevy::prelude::*;
use game_core::{ArenaConfig, GameSession};

use super::balls::BallVisuals;
use crate::core::config::GameConfig;
use crate::gameplay::CursorWorld;

/// Ball about to be dropped; follows the cursor along the spawn line.
#[derive(Component, Debug, Clone, Copy)]
pub struct CurrentPreview;

/// Ball after the current one, shown beside the field.
#[derive(Component, Debug, Clone, Copy)]
pub struct NextPreview;

#[derive(Component, Debug, Clone, Copy)]
pub struct BoundaryLine;

const NEXT_PREVIEW_SCALE: f32 = 0.6;

pub fn spawn_previews(
    mut commands: Commands,
    visuals: Res<BallVisuals>,
    arena: Res<ArenaConfig>,
    cfg: Res<GameConfig>,
) {
    commands.spawn((
        CurrentPreview,
        Mesh2d(visuals.circle.clone()),
        MeshMaterial2d(Handle::<ColorMaterial>::default()),
        Transform::from_xyz(0.0, arena.spawn_y(), 1.0),
        Name::new("CurrentPreview"),
    ));
    commands.spawn((
        NextPreview,
        Mesh2d(visuals.circle.clone()),
        MeshMaterial2d(Handle::<ColorMaterial>::default()),
        Transform::from_xyz(arena.half_width() + 40.0, arena.spawn_y(), 1.0),
        Name::new("NextPreview"),
    ));
    if cfg.render.show_boundary_line {
        commands.spawn((
            BoundaryLine,
            Sprite {
                color: Color::srgba(0.9, 0.2, 0.2, 0.6),
                custom_size: Some(Vec2::new(arena.width, 2.0)),
                ..default()
            },
            Transform::from_xyz(0.0, arena.boundary_y(), 0.5),
            Name::new("BoundaryLine"),
        ));
    }
}

#[allow(clippy::type_complexity)]
pub fn update_previews(
    session: Res<GameSession>,
    arena: Res<ArenaConfig>,
    cursor: Res<CursorWorld>,
    visuals: Res<BallVisuals>,
    mut current: Query<
        (&mut Transform, &mut MeshMaterial2d<ColorMaterial>, &mut Visibility),
        (With<CurrentPreview>, Without<NextPreview>),
    >,
    mut next: Query<
        (&mut Transform, &mut MeshMaterial2d<ColorMaterial>, &mut Visibility),
        (With<NextPreview>, Without<CurrentPreview>),
    >,
) {
    let visible = if session.is_over() {
        Visibility::Hidden
    } else {
        Visibility::Inherited
    };

    let level = session.current_level();
    for (mut tr, mut mat, mut vis) in &mut current {
        let x = cursor.0.map_or(tr.translation.x, |p| p.x);
        tr.translation.x = arena.clamp_drop_x(x, level.radius());
        tr.translation.y = arena.spawn_y();
        tr.scale = Vec3::new(level.radius() * 2.0, level.radius() * 2.0, 1.0);
        let handle = visuals.material(level);
        if mat.0 != handle {
            mat.0 = handle;
        }
        vis.set_if_neq(visible);
    }

    let level = session.next_level();
    for (mut tr, mut mat, mut vis) in &mut next {
        let d = level.radius() * 2.0 * NEXT_PREVIEW_SCALE;
        tr.scale = Vec3::new(d, d, 1.0);
        let handle = visuals.material(level);
        if mat.0 != handle {
            mat.0 = handle;
        }
        vis.set_if_neq(visible);
    }
}
