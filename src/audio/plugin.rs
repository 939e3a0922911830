//! Music playback through kira.

use bevy::prelude::*;
use bevy_kira_audio::{Audio, AudioControl, AudioPlugin};

use super::AudioCue;
use crate::core::GameConfig;
use crate::world::ActiveSession;

/// Plays area music from the cues the session queues.
pub struct MusicPlugin;

impl Plugin for MusicPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(AudioPlugin)
            .init_resource::<MusicState>()
            .add_systems(
                Update,
                play_music_cues.run_if(resource_exists::<ActiveSession>),
            );
    }
}

/// Track currently playing, if any.
#[derive(Resource, Default)]
struct MusicState {
    track: Option<String>,
}

impl MusicState {
    /// Record `track` as playing. False if it already was.
    fn switch_to(&mut self, track: &str) -> bool {
        if self.track.as_deref() == Some(track) {
            return false;
        }
        self.track = Some(track.to_string());
        true
    }
}

fn play_music_cues(
    mut session: ResMut<ActiveSession>,
    mut state: ResMut<MusicState>,
    audio: Res<Audio>,
    asset_server: Res<AssetServer>,
    config: Res<GameConfig>,
) {
    for cue in session.drain_audio() {
        match cue {
            AudioCue::Play { track, looped } => {
                if !state.switch_to(&track) {
                    continue;
                }
                info!("Playing '{}'", track);
                audio.stop();
                let source = asset_server.load(format!("audio/music/{track}.ogg"));
                let mut command = audio.play(source);
                command.with_volume(config.music_volume);
                if looped {
                    command.looped();
                }
            }
            AudioCue::Pause => {
                audio.pause();
            }
            AudioCue::Resume => {
                audio.resume();
            }
        }
    }
}
