//! Audio module - music cues raised by the simulation and their playback.

mod plugin;

pub use plugin::MusicPlugin;

/// Music instruction queued by the session for the audio host.
#[derive(Debug, Clone, PartialEq)]
pub enum AudioCue {
    /// Start `track`, unless it is already the one playing.
    Play { track: String, looped: bool },
    Pause,
    Resume,
}
