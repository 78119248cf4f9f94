// src/time_ctrl/time_rules.rs
//! Конфигурация тайминга хода.
//!
//! Здесь описываем только "правила", без состояния и без привязки к конкретному столу.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Правила тайминга для одного стола.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeRules {
    /// Сколько секунд даётся на базовое решение (каждый ход).
    pub base_action_secs: u32,
    /// Сколько секунд time bank доступно каждому месту на сессию.
    pub bank_per_seat_secs: u32,
}

impl TimeRules {
    pub const fn new(base_action_secs: u32, bank_per_seat_secs: u32) -> Self {
        Self {
            base_action_secs,
            bank_per_seat_secs,
        }
    }

    /// Стандартный профиль: 20 сек на ход, 60 сек банка.
    pub const fn standard() -> Self {
        Self::new(20, 60)
    }

    pub fn base_action(&self) -> Duration {
        Duration::from_secs(self.base_action_secs as u64)
    }
}

impl Default for TimeRules {
    fn default() -> Self {
        Self::standard()
    }
}
