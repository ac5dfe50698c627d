//! Audio collaborator
//!
//! Симуляция не играет звук сама: она пишет `SfxRequested` события,
//! а `dispatch_sfx` отдаёт их в `AudioService` если host его вставил.
//! Нет сервиса → звуки молча отбрасываются.

use bevy::prelude::*;
use std::sync::{Arc, Mutex};

/// Ссылка на аудио клип (имя ассета на стороне host'а)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SoundCue {
    pub clip: String,
}

impl SoundCue {
    pub fn new(clip: impl Into<String>) -> Self {
        Self { clip: clip.into() }
    }
}

/// Fire-and-forget проигрыватель звуков (реализует host)
pub trait AudioPlayer: Send + Sync {
    fn play_sfx(&self, cue: &SoundCue);
}

/// Опциональный Resource с audio backend'ом
#[derive(Resource)]
pub struct AudioService(pub Box<dyn AudioPlayer>);

/// Событие: проиграть звук
#[derive(Event, Debug, Clone)]
pub struct SfxRequested {
    pub source: Entity,
    pub cue: SoundCue,
}

/// System: отдать накопленные звуки в AudioService (если он есть)
pub fn dispatch_sfx(mut requests: EventReader<SfxRequested>, audio: Option<Res<AudioService>>) {
    let Some(audio) = audio else {
        // Нет сервиса: просто вычитываем события
        requests.clear();
        return;
    };

    for request in requests.read() {
        audio.0.play_sfx(&request.cue);
    }
}

/// AudioPlayer который только запоминает клипы (headless runs, тесты)
#[derive(Clone, Default)]
pub struct RecordingAudio {
    played: Arc<Mutex<Vec<String>>>,
}

impl RecordingAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<String> {
        self.played.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

impl AudioPlayer for RecordingAudio {
    fn play_sfx(&self, cue: &SoundCue) {
        if let Ok(mut played) = self.played.lock() {
            played.push(cue.clip.clone());
        }
    }
}
