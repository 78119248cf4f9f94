// src/time_ctrl/mod.rs
//! Контроль времени на ход: базовое время + таймбанк места.
//!
//! Движок спрашивает `timeout_for(seat)` перед запросом действия и
//! `settle(seat, elapsed)` после ответа; истечение дедлайна = авто-фолд.

pub mod time_bank;
pub mod time_rules;

use std::time::Duration;

pub use time_bank::TimeBank;
pub use time_rules::TimeRules;

use crate::domain::SeatIndex;

/// Итог хода с точки зрения времени.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnTiming {
    /// Уложился в базовое время.
    InTime,
    /// Залез в таймбанк, но успел.
    UsedBank(Duration),
    /// Время и банк полностью исчерпаны – авто-фолд.
    TimedOut,
}

/// Высокоуровневый контроллер времени для стола.
#[derive(Clone, Debug)]
pub struct TimeController {
    pub rules: TimeRules,
    pub bank: TimeBank,
}

impl TimeController {
    pub fn new(rules: TimeRules) -> Self {
        Self {
            rules,
            bank: TimeBank::new(),
        }
    }

    /// Инициализировать банк для набора мест (обычно при первой раздаче).
    pub fn init_seats<I>(&mut self, seats: I)
    where
        I: IntoIterator<Item = SeatIndex>,
    {
        let initial = Duration::from_secs(self.rules.bank_per_seat_secs as u64);
        self.bank.init_for_seats(seats, initial);
    }

    /// Полный дедлайн хода: базовое время + остаток банка.
    pub fn timeout_for(&self, seat: SeatIndex) -> Duration {
        self.rules.base_action() + self.bank.remaining_for(seat)
    }

    /// Учесть фактически потраченное время.
    pub fn settle(&mut self, seat: SeatIndex, elapsed: Duration) -> TurnTiming {
        let base = self.rules.base_action();
        if elapsed <= base {
            return TurnTiming::InTime;
        }
        let overtime = elapsed - base;
        let available = self.bank.remaining_for(seat);
        let used = self.bank.consume(seat, overtime);
        if overtime > available {
            TurnTiming::TimedOut
        } else {
            TurnTiming::UsedBank(used)
        }
    }
}
