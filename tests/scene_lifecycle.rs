//! Headless lifecycle tests: the app plugin running against `MinimalPlugins` and an
//! in-process store, driven one `app.update()` at a time.

use std::sync::Arc;
use std::time::Duration;

use bevy::input::touch::{touch_screen_input_system, TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use bevy::window::{CursorLeft, PrimaryWindow, WindowResized};

use cube_leaderboard::utils::objects::*;
use cube_leaderboard::utils::systems_logic::CubeAppPlugin;
use shared::config::AppConfig;
use shared::{MemoryStore, NewScore, RankedStore};

const COLLECTION: &str = "leaderboard";

fn build_app(config: AppConfig, store: &MemoryStore, with_window: bool) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(
            1_500,
        )))
        .init_resource::<Assets<Mesh>>()
        .init_resource::<Assets<StandardMaterial>>()
        .init_resource::<ButtonInput<MouseButton>>()
        .init_resource::<Touches>()
        .add_message::<TouchInput>()
        .add_message::<WindowResized>()
        .add_message::<CursorLeft>()
        .add_systems(PreUpdate, touch_screen_input_system)
        .add_plugins(CubeAppPlugin::new(config).with_store(Arc::new(store.clone())));
    if with_window {
        app.world_mut().spawn((Window::default(), PrimaryWindow));
    }
    // Runs Startup: mount, identity, subscription.
    app.update();
    app
}

fn test_app(config: AppConfig, store: &MemoryStore) -> App {
    build_app(config, store, true)
}

fn set_cursor(app: &mut App, window: Entity, position: Option<Vec2>) {
    app.world_mut()
        .get_mut::<Window>(window)
        .unwrap()
        .set_cursor_position(position);
}

fn finger(app: &mut App, window: Entity, id: u64, phase: TouchPhase, position: Vec2) {
    app.world_mut().write_message(TouchInput {
        phase,
        position,
        window,
        force: None,
        id,
    });
    app.update();
}

fn touch(app: &mut App, window: Entity, phase: TouchPhase, position: Vec2) {
    finger(app, window, 0, phase, position);
}

fn primary_window(app: &mut App) -> Entity {
    app.world_mut()
        .query_filtered::<Entity, With<PrimaryWindow>>()
        .single(app.world())
        .unwrap()
}

fn send(app: &mut App, command: SessionCommand) {
    app.world_mut().write_message(command);
    app.update();
}

fn orientation(app: &mut App) -> GroupOrientation {
    *app.world_mut()
        .query_filtered::<&GroupOrientation, With<CubeGroup>>()
        .single(app.world())
        .unwrap()
}

#[test]
fn mount_builds_the_cube_under_one_group() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);

    let host = app.world().resource::<SceneHost>();
    assert!(host.mounted);
    assert!(host.listening);
    let group = host.cube_group.unwrap();

    let cells: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, With<Cell>>()
        .iter(app.world())
        .collect();
    assert_eq!(cells.len(), 27);
    for cell in cells {
        let parent = app.world().get::<ChildOf>(cell).unwrap();
        assert_eq!(parent.parent(), group);
    }
    assert_eq!(app.world().resource::<SurfaceSize>().width, 1280.0);
}

#[test]
fn resize_updates_surface_and_aspect_ratio() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);

    app.world_mut().write_message(WindowResized {
        window,
        width: 800.0,
        height: 400.0,
    });
    app.update();

    assert_eq!(
        *app.world().resource::<SurfaceSize>(),
        SurfaceSize {
            width: 800.0,
            height: 400.0
        }
    );
    let projection = app
        .world_mut()
        .query_filtered::<&Projection, With<SceneCamera>>()
        .single(app.world())
        .unwrap()
        .clone();
    let Projection::Perspective(perspective) = projection else {
        panic!("scene camera should use a perspective projection");
    };
    assert_eq!(perspective.aspect_ratio, 2.0);
}

#[test]
fn mouse_drag_rotates_the_group() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);

    set_cursor(&mut app, window, Some(Vec2::new(100.0, 100.0)));
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    assert!(app.world().resource::<DragState>().active);

    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
    set_cursor(&mut app, window, Some(Vec2::new(140.0, 120.0)));
    app.update();

    let rotated = orientation(&mut app);
    assert!((rotated.yaw - 0.2).abs() < 1e-5);
    assert!((rotated.pitch - 0.1).abs() < 1e-5);

    let mut mouse = app.world_mut().resource_mut::<ButtonInput<MouseButton>>();
    mouse.clear();
    mouse.release(MouseButton::Left);
    app.update();
    assert!(!app.world().resource::<DragState>().active);

    // Moves after release do nothing.
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
    set_cursor(&mut app, window, Some(Vec2::new(300.0, 300.0)));
    app.update();
    assert_eq!(orientation(&mut app), rotated);
}

#[test]
fn snapshots_arrive_sorted_by_score() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);

    for (who, score) in [("a", 30), ("b", 90), ("c", 60)] {
        store
            .append(
                COLLECTION,
                NewScore {
                    identity: who.into(),
                    score,
                },
            )
            .unwrap();
    }
    app.update();

    let scores: Vec<u64> = app
        .world()
        .resource::<LeaderboardSync>()
        .entries
        .iter()
        .map(|e| e.score)
        .collect();
    assert_eq!(scores, vec![90, 60, 30]);
}

#[test]
fn timed_game_submits_its_score() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    assert!(app.world().resource::<PlayerIdentity>().0.is_some());

    send(&mut app, SessionCommand::Start);
    assert!(app.world().resource::<SessionState>().playing);
    for _ in 0..3 {
        app.update();
    }
    // Four frames of 1.5 s since the start frame.
    send(&mut app, SessionCommand::End);
    assert_eq!(app.world().resource::<SessionState>().score, 60);

    send(&mut app, SessionCommand::Submit);
    assert_eq!(store.len(COLLECTION), 1);
    assert!(!app.world().resource::<LeaderboardSync>().submit_in_flight());

    app.update();
    let sync = app.world().resource::<LeaderboardSync>();
    assert_eq!(sync.entries.len(), 1);
    assert_eq!(sync.entries[0].score, 60);
}

#[test]
fn zero_score_submit_never_writes() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);

    send(&mut app, SessionCommand::Submit);

    assert!(store.is_empty(COLLECTION));
    assert_eq!(
        app.world().resource::<StatusMessage>().0,
        "submit failed: score is zero"
    );
}

#[test]
fn rejected_write_is_reported_on_the_status_line() {
    let store = MemoryStore::new();
    store.set_reject_writes(true);
    let mut app = test_app(AppConfig::default(), &store);

    send(&mut app, SessionCommand::Start);
    app.update();
    send(&mut app, SessionCommand::End);
    send(&mut app, SessionCommand::Submit);

    assert!(store.is_empty(COLLECTION));
    assert_eq!(
        app.world().resource::<StatusMessage>().0,
        "submit failed: write rejected by store"
    );
}

#[test]
fn unmount_releases_everything_and_stops_updates() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    assert_eq!(store.subscriber_count(), 1);
    let group = app.world().resource::<SceneHost>().cube_group.unwrap();

    app.world_mut().write_message(UnmountScene);
    app.update();

    let host = app.world().resource::<SceneHost>();
    assert!(!host.mounted);
    assert!(!host.listening);
    assert!(host.meshes.is_empty());
    assert!(app.world().get_entity(group).is_err());
    assert_eq!(
        app.world_mut()
            .query_filtered::<Entity, With<Cell>>()
            .iter(app.world())
            .count(),
        0
    );
    assert_eq!(store.subscriber_count(), 0);

    store
        .append(
            COLLECTION,
            NewScore {
                identity: "late".into(),
                score: 500,
            },
        )
        .unwrap();
    app.update();
    assert!(app.world().resource::<LeaderboardSync>().entries.is_empty());
}

#[test]
fn sync_failure_ends_the_subscription() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);

    store.disconnect(COLLECTION, "permission denied");
    app.update();

    let sync = app.world().resource::<LeaderboardSync>();
    assert!(!sync.is_connected());
    assert_eq!(
        app.world().resource::<StatusMessage>().0,
        "leaderboard sync failed: permission denied"
    );
}

#[test]
fn missing_sections_disable_identity_and_leaderboard() {
    let store = MemoryStore::new();
    let config = AppConfig::from_toml_str("[cube]\ncell_size = 1.0\n").unwrap();
    let mut app = test_app(config, &store);

    assert!(app.world().resource::<SceneHost>().mounted);
    assert!(app.world().resource::<PlayerIdentity>().0.is_none());
    assert!(!app.world().resource::<LeaderboardSync>().is_connected());
    assert_eq!(store.subscriber_count(), 0);
    assert_eq!(
        app.world().resource::<StatusMessage>().0,
        "leaderboard is not configured"
    );
}

#[test]
fn touch_drag_follows_the_first_touch() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);
    // A hovering mouse must not leak into the touch gesture.
    set_cursor(&mut app, window, Some(Vec2::new(600.0, 600.0)));

    touch(&mut app, window, TouchPhase::Started, Vec2::new(100.0, 100.0));
    assert!(app.world().resource::<DragState>().active);

    touch(&mut app, window, TouchPhase::Moved, Vec2::new(120.0, 110.0));
    let rotated = orientation(&mut app);
    assert!((rotated.yaw - 0.1).abs() < 1e-5);
    assert!((rotated.pitch - 0.05).abs() < 1e-5);

    touch(&mut app, window, TouchPhase::Ended, Vec2::new(120.0, 110.0));
    assert!(!app.world().resource::<DragState>().active);
    assert_eq!(orientation(&mut app), rotated);
}

#[test]
fn stationary_tap_does_not_rotate() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);
    set_cursor(&mut app, window, Some(Vec2::new(600.0, 600.0)));

    touch(&mut app, window, TouchPhase::Started, Vec2::new(100.0, 100.0));
    touch(&mut app, window, TouchPhase::Ended, Vec2::new(100.0, 100.0));

    assert!(!app.world().resource::<DragState>().active);
    assert_eq!(orientation(&mut app), GroupOrientation::default());
}

#[test]
fn leaving_the_window_ends_the_drag() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);

    set_cursor(&mut app, window, Some(Vec2::new(100.0, 100.0)));
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);
    app.update();
    assert!(app.world().resource::<DragState>().active);

    // The button stays held while the cursor leaves.
    app.world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .clear();
    set_cursor(&mut app, window, None);
    app.world_mut().write_message(CursorLeft { window });
    app.update();
    assert!(!app.world().resource::<DragState>().active);

    // Coming back with the button still held is not a new press.
    set_cursor(&mut app, window, Some(Vec2::new(300.0, 300.0)));
    app.update();
    assert_eq!(orientation(&mut app), GroupOrientation::default());
}

#[test]
fn unmount_without_container_still_unsubscribes() {
    let store = MemoryStore::new();
    let mut app = build_app(AppConfig::default(), &store, false);

    assert!(!app.world().resource::<SceneHost>().mounted);
    assert_eq!(store.subscriber_count(), 1);

    app.world_mut().write_message(UnmountScene);
    app.update();

    assert_eq!(store.subscriber_count(), 0);
    assert!(!app.world().resource::<LeaderboardSync>().is_connected());
}

#[test]
fn submit_after_sync_failure_targets_the_configured_collection() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);

    store.disconnect(COLLECTION, "network down");
    app.update();
    assert!(!app.world().resource::<LeaderboardSync>().is_connected());

    send(&mut app, SessionCommand::Start);
    app.update();
    send(&mut app, SessionCommand::End);
    send(&mut app, SessionCommand::Submit);

    assert_eq!(store.len(COLLECTION), 1);
    assert!(store.is_empty(""));
}

#[test]
fn canceled_touch_ends_the_drag() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);
    set_cursor(&mut app, window, Some(Vec2::new(600.0, 600.0)));

    touch(&mut app, window, TouchPhase::Started, Vec2::new(100.0, 100.0));
    touch(&mut app, window, TouchPhase::Canceled, Vec2::new(100.0, 100.0));
    assert!(!app.world().resource::<DragState>().active);

    // The hovering mouse does not pick the drag back up.
    app.update();
    assert!(!app.world().resource::<DragState>().active);
    assert_eq!(orientation(&mut app), GroupOrientation::default());
}

#[test]
fn second_finger_does_not_take_over_the_drag() {
    let store = MemoryStore::new();
    let mut app = test_app(AppConfig::default(), &store);
    let window = primary_window(&mut app);

    finger(&mut app, window, 0, TouchPhase::Started, Vec2::new(100.0, 100.0));
    for id in 1..=11 {
        finger(&mut app, window, id, TouchPhase::Started, Vec2::new(500.0, 500.0));
        finger(&mut app, window, id, TouchPhase::Moved, Vec2::new(520.0, 540.0));
        assert_eq!(orientation(&mut app), GroupOrientation::default(), "finger {id}");
        finger(&mut app, window, id, TouchPhase::Ended, Vec2::new(520.0, 540.0));
        assert!(app.world().resource::<DragState>().active);
    }

    finger(&mut app, window, 0, TouchPhase::Moved, Vec2::new(120.0, 100.0));
    let rotated = orientation(&mut app);
    assert!((rotated.yaw - 0.1).abs() < 1e-5);
    assert_eq!(rotated.pitch, 0.0);

    // Lifting the finger that started the drag ends it, even with another still down.
    finger(&mut app, window, 7, TouchPhase::Started, Vec2::new(300.0, 300.0));
    finger(&mut app, window, 0, TouchPhase::Ended, Vec2::new(120.0, 100.0));
    assert!(!app.world().resource::<DragState>().active);
    finger(&mut app, window, 7, TouchPhase::Moved, Vec2::new(400.0, 400.0));
    assert_eq!(orientation(&mut app), rotated);
}
