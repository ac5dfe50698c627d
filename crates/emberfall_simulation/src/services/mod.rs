//! External collaborators: audio и animation
//!
//! Оба: fire-and-forget; отсутствие сервиса не ошибка.

pub mod animation;
pub mod audio;

pub use animation::{AnimationEventSink, AnimationPlayback, AnimationPlayer, AnimationRequested};
pub use audio::{dispatch_sfx, AudioPlayer, AudioService, RecordingAudio, SfxRequested, SoundCue};
