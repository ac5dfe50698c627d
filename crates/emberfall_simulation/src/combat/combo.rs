//! Combo counter
//!
//! `step` растёт бесконечно, индексы в таблицы ресурсов (effects, sounds)
//! берутся по модулю длины КАЖДОЙ таблицы отдельно → таблицы разной длины
//! никогда не выходят за границы.

/// Состояние combo (step + время окончания последней атаки)
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComboState {
    pub step: u64,
    /// Clock время окончания последней атаки (None: атак ещё не было)
    pub last_attack_end: Option<f64>,
}

impl ComboState {
    /// Сброс step, если с конца последней атаки прошло больше `window`.
    ///
    /// Возвращает true если combo было сброшено.
    pub fn refresh(&mut self, now: f64, window: f32) -> bool {
        match self.last_attack_end {
            Some(end) if now - end > f64::from(window) => {
                self.step = 0;
                true
            }
            _ => false,
        }
    }

    /// Атака закончилась: следующий шаг combo
    pub fn advance(&mut self, now: f64) {
        self.step += 1;
        self.last_attack_end = Some(now);
    }
}

/// Индекс в таблицу длины `len` (None для пустой таблицы)
pub fn wrap_index(step: u64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some((step % len as u64) as usize)
}

/// Урон шага combo: finisher (последний слот effect-таблицы) × multiplier
pub fn combo_damage(base: u32, effect_index: Option<usize>, effect_count: usize, finisher_multiplier: u32) -> u32 {
    match effect_index {
        Some(index) if index + 1 == effect_count => base.saturating_mul(finisher_multiplier),
        _ => base,
    }
}
