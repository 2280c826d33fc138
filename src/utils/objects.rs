//! This file defines the various objects, resources, and components used in the app.
use bevy::prelude::*;
use std::sync::Arc;
use std::time::Duration;

use shared::config::AppConfig;
use shared::constants::session_constants::POINTS_PER_SECOND;
use shared::{LeaderboardEntry, NewScore, RankedStore, Subscription};

/// Configuration handed to the app at startup
#[derive(Resource, Clone, Debug)]
pub struct AppSettings(pub AppConfig);

/// The ranked store backing the leaderboard
#[derive(Resource, Clone)]
pub struct RemoteStore(pub Arc<dyn RankedStore>);

/// Marks the container holding all cells; the only entity that rotates
#[derive(Component)]
pub struct CubeGroup;

/// Free-look orientation of the cube group, accumulated from gesture deltas
#[derive(Component, Clone, Copy, Debug, Default, PartialEq)]
pub struct GroupOrientation {
    pub yaw: f32,
    pub pitch: f32,
}

impl GroupOrientation {
    pub fn rotate_by(&mut self, yaw: f32, pitch: f32) {
        self.yaw += yaw;
        self.pitch += pitch;
    }

    pub fn to_quat(self) -> Quat {
        Quat::from_euler(EulerRot::XYZ, self.pitch, self.yaw, 0.0)
    }
}

/// One of the 27 cuboids, with its grid coordinate
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Cell {
    pub coord: UVec3,
}

/// Marks the camera owned by the scene host
#[derive(Component)]
pub struct SceneCamera;

/// Marks a light owned by the scene host
#[derive(Component)]
pub struct SceneLight;

/// Everything the scene host allocated, so teardown can release it
#[derive(Resource, Default)]
pub struct SceneHost {
    pub mounted: bool,
    /// Cleared first on teardown; gesture and resize systems only run while set
    pub listening: bool,
    pub cube_group: Option<Entity>,
    pub camera: Option<Entity>,
    pub lights: Vec<Entity>,
    pub meshes: Vec<Handle<Mesh>>,
    pub materials: Vec<Handle<StandardMaterial>>,
}

/// Latest known size of the drawable surface, in logical pixels
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceSize {
    pub width: f32,
    pub height: f32,
}

/// Request to tear the scene down (the host unmounting)
#[derive(Message, Clone, Copy, Debug, Default)]
pub struct UnmountScene;

/// Transient pointer drag record, owned by the gesture tracker
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct DragState {
    pub active: bool,
    pub last_position: Vec2,
    /// Touch that started the drag; `None` for the mouse
    pub touch_id: Option<u64>,
}

impl DragState {
    /// `idle -> dragging`: capture the initial pointer position.
    pub fn press(&mut self, position: Vec2) {
        self.active = true;
        self.last_position = position;
        self.touch_id = None;
    }

    /// `idle -> dragging` for a touch; only that touch moves or ends the drag.
    pub fn press_touch(&mut self, id: u64, position: Vec2) {
        self.press(position);
        self.touch_id = Some(id);
    }

    /// `dragging -> dragging`: delta against the previous sample, which becomes `position`.
    /// Returns `None` while idle.
    pub fn move_to(&mut self, position: Vec2) -> Option<Vec2> {
        if !self.active {
            return None;
        }
        let delta = position - self.last_position;
        self.last_position = position;
        Some(delta)
    }

    /// `dragging -> idle`, on release or when the pointer leaves the window.
    pub fn release(&mut self) {
        self.active = false;
        self.touch_id = None;
    }
}

/// Play/idle state and the derived score
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionState {
    pub score: u64,
    pub start_time: Option<Duration>,
    pub playing: bool,
}

impl SessionState {
    /// `idle -> playing`. Starting while already playing resets the running game.
    pub fn start(&mut self, now: Duration) {
        self.score = 0;
        self.start_time = Some(now);
        self.playing = true;
    }

    /// `playing -> idle`, deriving the score from whole elapsed seconds.
    /// Returns `None` (no-op) when no game is running.
    pub fn end(&mut self, now: Duration) -> Option<u64> {
        if !self.playing {
            return None;
        }
        let start = self.start_time?;
        let elapsed = now.saturating_sub(start);
        self.score = elapsed.as_secs() * POINTS_PER_SECOND;
        self.playing = false;
        Some(self.score)
    }
}

/// Identity issued by the identity provider, `None` until available
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct PlayerIdentity(pub Option<String>);

/// The single status line; last write wins
#[derive(Resource, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusMessage(pub String);

impl StatusMessage {
    pub fn set(&mut self, message: impl Into<String>) {
        self.0 = message.into();
    }
}

/// Leaderboard subscription and its latest displayed snapshot
#[derive(Resource, Default)]
pub struct LeaderboardSync {
    pub subscription: Option<Subscription>,
    /// Sorted by score, descending
    pub entries: Vec<LeaderboardEntry>,
    pub collection: String,
    /// Set when a submit is accepted, taken once the store is called
    pub pending_submit: Option<NewScore>,
}

impl LeaderboardSync {
    pub fn is_connected(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn submit_in_flight(&self) -> bool {
        self.pending_submit.is_some()
    }
}

/// Buttons on the control panel
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelButton {
    StartGame,
    EndGame,
    Submit,
}

/// Text showing the status message
#[derive(Component)]
pub struct StatusText;

/// Text showing the current score
#[derive(Component)]
pub struct ScoreText;

/// Container for the leaderboard rows
#[derive(Component)]
pub struct LeaderboardList;

/// Player commands coming from the control panel (or tests)
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Start,
    End,
    Submit,
}
