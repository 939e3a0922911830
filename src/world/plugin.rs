//! World plugin - builds the session and drives it from Bevy's schedules.

use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowFocused};

use crate::core::{GameConfig, GameState, InputSnapshot};

use super::data::DataRegistry;
use super::session::Session;

/// The running session, shared with the renderer and audio host.
#[derive(Resource, Deref, DerefMut)]
pub struct ActiveSession(pub Session);

/// World plugin - loads data, ticks the simulation, and mirrors its state
/// onto the window.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, start_session)
            .add_systems(
                FixedUpdate,
                tick_session.run_if(in_state(GameState::InGame)),
            )
            .add_systems(
                Update,
                (track_focus, sync_window).run_if(in_state(GameState::InGame)),
            );
    }
}

/// Load every data record and enter the start area.
fn start_session(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut next_state: ResMut<NextState<GameState>>,
    mut exit: EventWriter<AppExit>,
) {
    let session = DataRegistry::load_from_dir(&config.data_dir)
        .and_then(|registry| Session::new(registry, config.clone()));

    match session {
        Ok(session) => {
            info!("Session started in '{}'", session.current_area_id());
            commands.insert_resource(ActiveSession(session));
            next_state.set(GameState::InGame);
        }
        Err(e) => {
            error!("Failed to start session: {}", e);
            exit.send(AppExit::error());
        }
    }
}

/// Advance the simulation one step with the keys held right now.
fn tick_session(
    mut session: ResMut<ActiveSession>,
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    mut exit: EventWriter<AppExit>,
) {
    let input = InputSnapshot::from_keys(keys.get_pressed().copied())
        .with_mouse_left(mouse.pressed(MouseButton::Left));

    if let Err(e) = session.tick(&input) {
        error!("Simulation stopped: {}", e);
        exit.send(AppExit::error());
    }
}

fn track_focus(mut events: EventReader<WindowFocused>, mut session: ResMut<ActiveSession>) {
    for event in events.read() {
        session.set_focused(event.focused);
    }
}

/// Show the player's coordinates in the title and the cursor while a menu
/// is open.
fn sync_window(
    session: Res<ActiveSession>,
    mut window_query: Query<&mut Window, With<PrimaryWindow>>,
) {
    let Ok(mut window) = window_query.get_single_mut() else {
        return;
    };
    let title = session.title();
    if window.title != title {
        window.title = title;
    }
    let visible = session.flags().mouse_visible;
    if window.cursor_options.visible != visible {
        window.cursor_options.visible = visible;
    }
}
