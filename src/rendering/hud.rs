use bevy::prelude::*;
use game_core::GameSession;

use crate::gameplay::{GameOverSummary, SubmissionStatus};

#[derive(Component, Debug, Clone, Copy)]
pub struct ScoreText;

/// Centre card shown only after game over.
#[derive(Component, Debug, Clone, Copy)]
pub struct GameOverCard;

pub fn spawn_hud(mut commands: Commands) {
    commands.spawn((
        ScoreText,
        Text::new("Score: 0"),
        TextFont {
            font_size: 22.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
    commands.spawn((
        GameOverCard,
        Text::new(""),
        TextFont {
            font_size: 26.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.95, 0.8)),
        TextLayout::new_with_justify(JustifyText::Center),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.75)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Percent(30.0),
            left: Val::Percent(10.0),
            width: Val::Percent(80.0),
            padding: UiRect::all(Val::Px(16.0)),
            ..default()
        },
        Visibility::Hidden,
    ));
}

pub fn update_score_text(session: Res<GameSession>, mut q: Query<&mut Text, With<ScoreText>>) {
    if !session.is_changed() {
        return;
    }
    for mut text in &mut q {
        text.0 = format!("Score: {}   Next: {}", session.score(), session.next_level());
    }
}

pub fn update_game_over_card(
    summary: Option<Res<GameOverSummary>>,
    status: Res<SubmissionStatus>,
    mut q: Query<(&mut Text, &mut Visibility), (With<GameOverCard>, Without<ScoreText>)>,
) {
    for (mut text, mut vis) in &mut q {
        match summary.as_deref() {
            Some(summary) => {
                let mut body = summary.card_text();
                if let Some(line) = status.label() {
                    body.push_str("\n\n");
                    body.push_str(&line);
                }
                if text.0 != body {
                    text.0 = body;
                }
                vis.set_if_neq(Visibility::Inherited);
            }
            None => {
                vis.set_if_neq(Visibility::Hidden);
            }
        }
    }
}
