use bevy::prelude::*;
use game_core::ShakeEffect;

use crate::core::config::GameConfig;

#[derive(Component, Debug, Clone)]
pub struct GameCamera {
    pub shake_intensity: f32,
    pub shake_decay_rate: f32,
    pub shake_offset: Vec2,
}

impl Default for GameCamera {
    fn default() -> Self {
        Self {
            shake_intensity: 0.0,
            shake_decay_rate: 12.0,
            shake_offset: Vec2::ZERO,
        }
    }
}

pub fn spawn_camera(mut commands: Commands, cfg: Res<GameConfig>) {
    commands.spawn((
        Camera2d,
        GameCamera {
            shake_decay_rate: cfg.render.shake_decay.max(0.1),
            ..default()
        },
        Name::new("GameCamera"),
    ));
}

/// Strongest pending shake wins; shakes do not stack.
pub fn apply_shake_effects(
    mut shake_events: EventReader<ShakeEffect>,
    mut query: Query<&mut GameCamera>,
) {
    let Some(strongest) = shake_events
        .read()
        .map(|ev| ev.intensity)
        .reduce(f32::max)
    else {
        return;
    };
    for mut cam in &mut query {
        cam.shake_intensity = cam.shake_intensity.max(strongest);
    }
}

pub fn update_camera_shake(
    time: Res<Time>,
    mut query: Query<(&mut GameCamera, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let t = time.elapsed_secs();
    for (mut cam, mut tr) in &mut query {
        if cam.shake_intensity > 0.0001 {
            cam.shake_intensity = (cam.shake_intensity - cam.shake_decay_rate * dt).max(0.0);
            let x = (t * 17.0).sin();
            let y = (t * 23.0).cos();
            cam.shake_offset = Vec2::new(x, y) * cam.shake_intensity;
        } else {
            cam.shake_offset = Vec2::ZERO;
        }
        tr.translation.x = cam.shake_offset.x;
        tr.translation.y = cam.shake_offset.y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shake_takes_strongest_event_and_decays() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<ShakeEffect>()
            .add_systems(Update, (apply_shake_effects, update_camera_shake).chain());
        let cam = app
            .world_mut()
            .spawn((GameCamera::default(), Transform::default()))
            .id();
        app.world_mut().send_event(ShakeEffect { intensity: 3.0 });
        app.world_mut().send_event(ShakeEffect { intensity: 8.0 });
        app.update();
        let intensity = app.world().get::<GameCamera>(cam).unwrap().shake_intensity;
        assert!(intensity > 0.0 && intensity <= 8.0);

        for _ in 0..5 {
            app.update();
        }
        let after = app.world().get::<GameCamera>(cam).unwrap().shake_intensity;
        assert!(after <= intensity);
    }
}
