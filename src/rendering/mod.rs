//! Everything drawn: camera + shake, ball visuals, drop previews and the HUD.
//! Purely cosmetic; nothing here feeds back into the rules.

use bevy::prelude::*;

pub mod balls;
pub mod camera;
pub mod hud;
pub mod preview;

use crate::core::system::system_order::GameplaySet;

pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::srgb(0.08, 0.09, 0.12)))
            .add_systems(
                Startup,
                (
                    camera::spawn_camera,
                    balls::setup_ball_visuals,
                    preview::spawn_previews.after(balls::setup_ball_visuals),
                    hud::spawn_hud,
                ),
            )
            .add_systems(
                Update,
                (
                    balls::attach_ball_visuals.after(GameplaySet::Session),
                    camera::apply_shake_effects,
                    camera::update_camera_shake.after(camera::apply_shake_effects),
                    preview::update_previews.after(GameplaySet::Session),
                    hud::update_score_text,
                    hud::update_game_over_card.after(GameplaySet::Session),
                ),
            );
    }
}
