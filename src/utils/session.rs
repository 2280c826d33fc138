//! Session controller: start/end of the placeholder timed game.

use bevy::prelude::*;

use crate::log;
use crate::utils::objects::{SessionCommand, SessionState, StatusMessage};

/// Applies start/end commands against wall-clock time.
pub fn handle_session_commands(
    mut commands: MessageReader<SessionCommand>,
    time: Res<Time<Real>>,
    mut session: ResMut<SessionState>,
    mut status: ResMut<StatusMessage>,
) {
    for command in commands.read() {
        match command {
            SessionCommand::Start => {
                if session.playing {
                    debug!("Start while playing, resetting the running game");
                }
                session.start(time.elapsed());
                status.set("Game started");
                log!("🎮 Game started");
            }
            SessionCommand::End => match session.end(time.elapsed()) {
                Some(score) => {
                    status.set(format!("Game over, score: {score}"));
                    log!("🏁 Game over, score {}", score);
                }
                None => debug!("End requested while idle, ignoring"),
            },
            SessionCommand::Submit => {}
        }
    }
}
