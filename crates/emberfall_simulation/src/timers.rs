//! Countdown таймеры (coyote time, jump buffer, cooldowns)
//!
//! Таймер "активен" пока значение > 0. Значения не клампятся к нулю:
//! отрицательное значение просто означает "неактивен".

use bevy::prelude::*;

/// Одиночный countdown таймер
#[derive(Debug, Clone, Copy, Default, PartialEq, Reflect)]
pub struct Countdown {
    pub remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    pub fn set(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn tick(&mut self, delta: f32) {
        self.remaining -= delta;
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Тикает и возвращает true ровно на тике истечения
    pub fn tick_expired(&mut self, delta: f32) -> bool {
        let was_active = self.is_active();
        self.tick(delta);
        was_active && !self.is_active()
    }
}

/// Набор именованных таймеров, которые декрементятся одним вызовом `tick`
///
/// Ключ: обычно enum владельца (`PlayerTimer`). Порядок вставки сохраняется,
/// чтобы snapshot'ы были детерминированными.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerSet<K> {
    entries: Vec<(K, Countdown)>,
}

impl<K> Default for TimerSet<K> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<K: Copy + PartialEq> TimerSet<K> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: K, seconds: f32) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, timer)) => timer.set(seconds),
            None => self.entries.push((key, Countdown::new(seconds))),
        }
    }

    /// Текущее значение (0.0 для никогда не выставленного таймера)
    pub fn get(&self, key: K) -> f32 {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, timer)| timer.remaining)
            .unwrap_or(0.0)
    }

    pub fn is_active(&self, key: K) -> bool {
        self.get(key) > 0.0
    }

    pub fn clear(&mut self, key: K) {
        self.set(key, 0.0);
    }

    pub fn tick(&mut self, delta: f32) {
        for (_, timer) in self.entries.iter_mut() {
            timer.tick(delta);
        }
    }
}
