use bevy::prelude::*;
use bevy_rapier2d::prelude::*;
use game_core::{ArenaConfig, Boundary, BoundarySide};

use crate::PhysicsConfig;

const WALL_NAME: [&str; 3] = ["WallFloor", "WallLeft", "WallRight"];
const WALL_SIDE: [BoundarySide; 3] = [BoundarySide::Floor, BoundarySide::Left, BoundarySide::Right];

/// Spawns the open-topped play field: a floor and two side walls.
pub fn spawn_boundaries(
    mut commands: Commands,
    arena: Res<ArenaConfig>,
    physics: Res<PhysicsConfig>,
    mut done: Local<bool>,
) {
    if *done {
        return;
    }
    *done = true;

    let half_w = arena.half_width();
    let half_h = arena.half_height();
    let t = arena.wall_thickness * 0.5;
    let wall_color = Color::srgba(0.25, 0.45, 0.70, 0.65);

    let floor = (Vec2::new(0.0, -half_h - t), Vec2::new(half_w + 2.0 * t, t));
    let side_half = Vec2::new(t, half_h + 2.0 * t);
    let left = (Vec2::new(-half_w - t, t), side_half);
    let right = (Vec2::new(half_w + t, t), side_half);

    for (index, (center, half_extents)) in [floor, left, right].into_iter().enumerate() {
        commands
            .spawn((
                Name::new(WALL_NAME[index]),
                Boundary { side: WALL_SIDE[index] },
                RigidBody::Fixed,
                Collider::cuboid(half_extents.x, half_extents.y),
                Friction::coefficient(physics.wall_friction),
                Transform::from_translation(center.extend(0.0)),
                GlobalTransform::default(),
                Visibility::default(),
            ))
            .with_children(|parent| {
                parent.spawn((
                    Sprite {
                        color: wall_color,
                        custom_size: Some(half_extents * 2.0),
                        ..Default::default()
                    },
                    Transform::from_translation(Vec3::new(0.0, 0.0, 0.1)),
                ));
            });
    }
}
