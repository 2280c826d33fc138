//! Control panel UI: start/end/submit buttons, status line, score and leaderboard list.
use bevy::prelude::*;

use crate::utils::objects::{
    LeaderboardList, LeaderboardSync, PanelButton, PlayerIdentity, ScoreText, SessionCommand,
    SessionState, StatusMessage, StatusText,
};
use shared::constants::ui_constants::{
    BUTTON_COLOR, BUTTON_DISABLED_COLOR, BUTTON_FONT_SIZE, BUTTON_HOVER_COLOR,
    LEADERBOARD_FONT_SIZE, PANEL_MARGIN_PX, STATUS_FONT_SIZE,
};

fn rgba(c: [f32; 4]) -> Color {
    Color::srgba(c[0], c[1], c[2], c[3])
}

/// Whether a panel button currently accepts clicks.
/// Submit is disabled without an identity, with a zero score, during a game, or while
/// a submission is in flight.
pub fn button_enabled(
    button: PanelButton,
    session: &SessionState,
    identity: &PlayerIdentity,
    sync: &LeaderboardSync,
) -> bool {
    match button {
        PanelButton::StartGame => !session.playing,
        PanelButton::EndGame => session.playing,
        PanelButton::Submit => {
            identity.0.is_some()
                && session.score > 0
                && !session.playing
                && !sync.submit_in_flight()
        }
    }
}

/// Start and end are mutually exclusive; submit is always shown.
pub fn button_visible(button: PanelButton, session: &SessionState) -> bool {
    match button {
        PanelButton::StartGame => !session.playing,
        PanelButton::EndGame => session.playing,
        PanelButton::Submit => true,
    }
}

fn spawn_button(parent: &mut ChildSpawnerCommands, button: PanelButton, label: &str) {
    parent
        .spawn((
            Button,
            Node {
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                margin: UiRect::bottom(Val::Px(6.0)),
                justify_content: JustifyContent::Center,
                ..default()
            },
            BackgroundColor(rgba(BUTTON_COLOR)),
            button,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font_size: BUTTON_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// Spawns the panel in the top-left corner.
pub fn spawn_control_panel(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(PANEL_MARGIN_PX),
                left: Val::Px(PANEL_MARGIN_PX),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                ..default()
            },
        ))
        .with_children(|panel| {
            spawn_button(panel, PanelButton::StartGame, "Start Game");
            spawn_button(panel, PanelButton::EndGame, "End Game");
            spawn_button(panel, PanelButton::Submit, "Submit Score");

            panel.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: STATUS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));
            panel.spawn((
                Text::new(""),
                TextFont {
                    font_size: STATUS_FONT_SIZE,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.8, 0.8)),
                StatusText,
            ));
            panel.spawn((
                Node {
                    flex_direction: FlexDirection::Column,
                    margin: UiRect::top(Val::Px(8.0)),
                    ..default()
                },
                LeaderboardList,
            ));
        });
}

/// Turns clicks on enabled buttons into session commands.
pub fn panel_button_clicks(
    interactions: Query<(&Interaction, &PanelButton), Changed<Interaction>>,
    session: Res<SessionState>,
    identity: Res<PlayerIdentity>,
    sync: Res<LeaderboardSync>,
    mut commands: MessageWriter<SessionCommand>,
) {
    for (interaction, button) in &interactions {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if !button_enabled(*button, &session, &identity, &sync) {
            continue;
        }
        commands.write(match button {
            PanelButton::StartGame => SessionCommand::Start,
            PanelButton::EndGame => SessionCommand::End,
            PanelButton::Submit => SessionCommand::Submit,
        });
    }
}

/// Keeps visibility and colors of the buttons in line with the session.
pub fn update_panel_buttons(
    mut buttons: Query<(&PanelButton, &Interaction, &mut Node, &mut BackgroundColor)>,
    session: Res<SessionState>,
    identity: Res<PlayerIdentity>,
    sync: Res<LeaderboardSync>,
) {
    for (button, interaction, mut node, mut background) in buttons.iter_mut() {
        let display = if button_visible(*button, &session) {
            Display::Flex
        } else {
            Display::None
        };
        if node.display != display {
            node.display = display;
        }
        let color = if !button_enabled(*button, &session, &identity, &sync) {
            BUTTON_DISABLED_COLOR
        } else if *interaction == Interaction::Hovered {
            BUTTON_HOVER_COLOR
        } else {
            BUTTON_COLOR
        };
        background.set_if_neq(BackgroundColor(rgba(color)));
    }
}

/// Mirrors the status message and score into their text nodes.
pub fn update_status_text(
    status: Res<StatusMessage>,
    session: Res<SessionState>,
    mut status_text: Query<&mut Text, (With<StatusText>, Without<ScoreText>)>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<StatusText>)>,
) {
    if status.is_changed() {
        for mut text in status_text.iter_mut() {
            text.0.clone_from(&status.0);
        }
    }
    if session.is_changed() {
        let label = if session.playing {
            "Playing...".to_string()
        } else {
            format!("Score: {}", session.score)
        };
        for mut text in score_text.iter_mut() {
            text.0.clone_from(&label);
        }
    }
}

/// One line per displayed entry: rank, identity, score.
pub fn leaderboard_rows(sync: &LeaderboardSync) -> Vec<String> {
    sync.entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| format!("{}. {}  {}", idx + 1, entry.identity, entry.score))
        .collect()
}

/// Rebuilds the leaderboard rows whenever the displayed snapshot changes.
pub fn update_leaderboard_list(
    mut commands: Commands,
    sync: Res<LeaderboardSync>,
    list: Query<Entity, With<LeaderboardList>>,
) {
    if !sync.is_changed() {
        return;
    }
    let rows = leaderboard_rows(&sync);
    for list in &list {
        commands.entity(list).despawn_related::<Children>();
        commands.entity(list).with_children(|parent| {
            for row in &rows {
                parent.spawn((
                    Text::new(row.clone()),
                    TextFont {
                        font_size: LEADERBOARD_FONT_SIZE,
                        ..default()
                    },
                    TextColor(Color::WHITE),
                ));
            }
        });
    }
}
