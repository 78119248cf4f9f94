// src/time_ctrl/time_bank.rs
//! Таймбанк мест: сколько дополнительного времени у кого осталось.

use std::collections::HashMap;
use std::time::Duration;

use crate::domain::SeatIndex;

/// Глобальный таймбанк стола.
#[derive(Clone, Debug, Default)]
pub struct TimeBank {
    seats: HashMap<SeatIndex, Duration>,
}

impl TimeBank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.seats.clear();
    }

    /// Выдать банк местам, у которых его ещё нет.
    pub fn init_for_seats<I>(&mut self, seats: I, initial: Duration)
    where
        I: IntoIterator<Item = SeatIndex>,
    {
        for seat in seats {
            self.seats.entry(seat).or_insert(initial);
        }
    }

    /// Остаток таймбанка у места.
    pub fn remaining_for(&self, seat: SeatIndex) -> Duration {
        self.seats.get(&seat).copied().unwrap_or(Duration::ZERO)
    }

    /// Списать `requested` из банка. Возвращает фактически списанное.
    pub fn consume(&mut self, seat: SeatIndex, requested: Duration) -> Duration {
        match self.seats.get_mut(&seat) {
            Some(left) => {
                let used = requested.min(*left);
                *left -= used;
                used
            }
            None => Duration::ZERO,
        }
    }
}
