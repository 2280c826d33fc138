//! Leaderboard sync: identity acquisition, the live subscription and score submission.

use bevy::prelude::*;

use crate::log;
use crate::utils::objects::{
    AppSettings, LeaderboardSync, PlayerIdentity, RemoteStore, SessionCommand, SessionState,
    StatusMessage,
};
use shared::identity::provider_from_config;
use shared::{AppError, AppResult, LeaderboardEntry, NewScore, Subscription};

/// Orders a snapshot for display: score descending. The sort is stable, so tied
/// scores keep the order in which the store delivered them.
pub fn sort_for_display(mut entries: Vec<LeaderboardEntry>) -> Vec<LeaderboardEntry> {
    entries.sort_by(|a, b| b.score.cmp(&a.score));
    entries
}

/// Checks whether the current session may be submitted and builds the record.
/// A zero score is refused first, whatever the identity state.
pub fn validate_submission(
    identity: Option<&str>,
    session: &SessionState,
    in_flight: bool,
) -> AppResult<NewScore> {
    if session.score == 0 {
        return Err(AppError::submit("score is zero"));
    }
    if session.playing {
        return Err(AppError::submit("game still in progress"));
    }
    if in_flight {
        return Err(AppError::submit("a submission is already in flight"));
    }
    let Some(identity) = identity else {
        return Err(AppError::submit("not signed in"));
    };
    Ok(NewScore {
        identity: identity.to_string(),
        score: session.score,
    })
}

/// Startup: acquire an identity from the configured provider.
pub fn acquire_identity(
    settings: Res<AppSettings>,
    mut identity: ResMut<PlayerIdentity>,
    mut status: ResMut<StatusMessage>,
) {
    let acquired = settings
        .0
        .identity()
        .and_then(|config| provider_from_config(config).acquire());
    match acquired {
        Ok(id) => {
            info!("Signed in as {id}");
            status.set(format!("Signed in as {id}"));
            identity.0 = Some(id);
        }
        Err(e) => {
            warn!("Identity unavailable: {e}");
            status.set(e.to_string());
        }
    }
}

/// Startup: open the live subscription on the configured collection.
pub fn connect_leaderboard(
    settings: Res<AppSettings>,
    store: Option<Res<RemoteStore>>,
    mut sync: ResMut<LeaderboardSync>,
    mut status: ResMut<StatusMessage>,
) {
    let connected = settings.0.leaderboard().and_then(|config| {
        let store = store.ok_or(AppError::ConfigMissing {
            subsystem: "leaderboard store",
        })?;
        let subscription = store.0.subscribe(&config.collection, config.max_entries)?;
        Ok((config.collection.clone(), config.max_entries, subscription))
    });
    match connected {
        Ok((collection, max_entries, subscription)) => {
            info!("Subscribed to {collection} (max {max_entries})");
            sync.collection = collection;
            sync.subscription = Some(subscription);
        }
        Err(e) => {
            warn!("Leaderboard disabled: {e}");
            status.set(e.to_string());
        }
    }
}

/// Drains the subscription, keeping only the newest snapshot.
/// A sync error ends the subscription; it is not restarted.
pub fn poll_leaderboard(mut sync: ResMut<LeaderboardSync>, mut status: ResMut<StatusMessage>) {
    let Some(delivery) = sync.subscription.as_ref().and_then(Subscription::latest) else {
        return;
    };
    match delivery {
        Ok(snapshot) => {
            debug!("Leaderboard snapshot with {} entries", snapshot.len());
            sync.entries = sort_for_display(snapshot);
        }
        Err(e) => {
            error!("Leaderboard subscription ended: {e}");
            status.set(e.to_string());
            if let Some(subscription) = sync.subscription.take() {
                subscription.unsubscribe();
            }
        }
    }
}

/// Stops leaderboard delivery; later snapshots no longer reach `LeaderboardSync`.
pub fn disconnect_leaderboard(sync: &mut LeaderboardSync) {
    if let Some(subscription) = sync.subscription.take() {
        subscription.unsubscribe();
        info!("Unsubscribed from {}", sync.collection);
    }
}

/// Accepts submit commands. Only one submission is accepted until the store answers.
pub fn queue_submission(
    mut commands: MessageReader<SessionCommand>,
    settings: Res<AppSettings>,
    identity: Res<PlayerIdentity>,
    session: Res<SessionState>,
    mut sync: ResMut<LeaderboardSync>,
    mut status: ResMut<StatusMessage>,
) {
    for command in commands.read() {
        if *command != SessionCommand::Submit {
            continue;
        }
        let accepted = settings.0.leaderboard().and_then(|_| {
            validate_submission(identity.0.as_deref(), &session, sync.submit_in_flight())
        });
        match accepted {
            Ok(record) => {
                status.set("Submitting score...");
                sync.pending_submit = Some(record);
            }
            Err(e) => {
                warn!("Submit refused: {e}");
                status.set(e.to_string());
            }
        }
    }
}

/// Sends the accepted submission to the store. Failures are terminal; the player
/// has to submit again.
pub fn send_submission(
    settings: Res<AppSettings>,
    store: Option<Res<RemoteStore>>,
    mut sync: ResMut<LeaderboardSync>,
    mut status: ResMut<StatusMessage>,
) {
    let Some(record) = sync.pending_submit.take() else {
        return;
    };
    let score = record.score;
    // The configured collection, even when the subscription never came up.
    let result = settings.0.leaderboard().and_then(|config| {
        let store = store.ok_or(AppError::ConfigMissing {
            subsystem: "leaderboard store",
        })?;
        store.0.append(&config.collection, record)
    });
    match result {
        Ok(id) => {
            status.set(format!("Score {score} submitted"));
            log!("🏆 Score {} submitted as record {}", score, id);
        }
        Err(e) => {
            error!("Submit failed: {e}");
            status.set(e.to_string());
        }
    }
}
