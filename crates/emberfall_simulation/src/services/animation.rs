//! Animation collaborator с дедупликацией
//!
//! Логика выбирает клип каждый тик; повторный запрос того же клипа
//! не должен перезапускать анимацию. `AnimationPlayback` помнит текущий
//! клип и пропускает дубликаты.

use bevy::prelude::*;

/// Проигрыватель анимаций (реализует host)
pub trait AnimationPlayer {
    fn play_animation(&mut self, name: &str);
}

/// Событие: host должен переключить анимацию entity
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationRequested {
    pub entity: Entity,
    pub clip: String,
}

/// Текущий клип актора
#[derive(Component, Debug, Clone, Default)]
pub struct AnimationPlayback {
    current: Option<String>,
}

impl AnimationPlayback {
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Запросить клип. Возвращает false если он уже играет.
    pub fn play(&mut self, name: &str, player: &mut dyn AnimationPlayer) -> bool {
        if self.current.as_deref() == Some(name) {
            return false;
        }
        player.play_animation(name);
        self.current = Some(name.to_string());
        true
    }
}

/// Адаптер: AnimationPlayer поверх EventWriter (ECS слой)
pub struct AnimationEventSink<'a, 'w> {
    pub entity: Entity,
    pub writer: &'a mut EventWriter<'w, AnimationRequested>,
}

impl AnimationPlayer for AnimationEventSink<'_, '_> {
    fn play_animation(&mut self, name: &str) {
        self.writer.write(AnimationRequested {
            entity: self.entity,
            clip: name.to_string(),
        });
    }
}

impl AnimationPlayer for Vec<String> {
    fn play_animation(&mut self, name: &str) {
        self.push(name.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_clip_twice_is_noop() {
        let mut playback = AnimationPlayback::default();
        let mut played: Vec<String> = Vec::new();

        assert!(playback.play("Player_run", &mut played));
        assert!(!playback.play("Player_run", &mut played));
        assert!(!playback.play("Player_run", &mut played));
        assert_eq!(played, vec!["Player_run"]);
        assert_eq!(playback.current(), Some("Player_run"));
    }

    #[test]
    fn test_change_then_back_replays() {
        let mut playback = AnimationPlayback::default();
        let mut played: Vec<String> = Vec::new();

        playback.play("Player_idle", &mut played);
        playback.play("Player_jump", &mut played);
        playback.play("Player_idle", &mut played);

        assert_eq!(played, vec!["Player_idle", "Player_jump", "Player_idle"]);
    }
}
