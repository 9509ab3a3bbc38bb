//! HUD plugin (render-only): goal counter and controls hint.
//!
//! The counter is a pure sink for `GoalScored`; nothing reads it back.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;
use crate::plugins::projectiles::messages::GoalScored;

#[derive(Component)]
pub struct ScoreText;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::Pitch), spawn_pitch_hud)
        .add_systems(OnEnter(GameState::Sandbox), spawn_sandbox_hud)
        .add_systems(Update, show_goals.run_if(in_state(GameState::Pitch)));
}

pub fn score_label(total: u32) -> String {
    format!("Goals: {total}")
}

fn spawn_pitch_hud(mut commands: Commands) {
    commands
        .spawn((
            Name::new("Hud"),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(12.0),
                left: Val::Px(12.0),
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(4.0),
                ..default()
            },
            DespawnOnExit(GameState::Pitch),
        ))
        .with_children(|hud| {
            hud.spawn((ScoreText, Text::new(score_label(0)), TextFont::from_font_size(28.0)));
            hud.spawn((
                Text::new("Click to lock pointer, click to shoot, WASD + Space to move, Esc to release, Tab for sandbox"),
                TextFont::from_font_size(14.0),
            ));
        });
}

fn spawn_sandbox_hud(mut commands: Commands) {
    commands.spawn((
        Name::new("Hud"),
        Text::new("Drag worm segments with the mouse, Tab for pitch"),
        TextFont::from_font_size(14.0),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
        DespawnOnExit(GameState::Sandbox),
    ));
}

fn show_goals(mut reader: MessageReader<GoalScored>, mut q_text: Query<&mut Text, With<ScoreText>>) {
    let Some(latest) = reader.read().last() else { return; };
    for mut text in &mut q_text {
        text.0 = score_label(latest.total);
    }
}
