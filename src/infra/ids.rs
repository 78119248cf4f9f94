use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{HandId, PlayerId, TableId};

/// Монотонный счётчик ID. Можно держать в `static`.
#[derive(Debug)]
pub struct IdSequence {
    counter: AtomicU64,
}

impl IdSequence {
    pub const fn new(start: u64) -> Self {
        Self {
            counter: AtomicU64::new(start),
        }
    }

    #[inline]
    pub fn next(&self) -> u64 {
        self.counter.fetch_add(1, Ordering::Relaxed)
    }
}

/// Генерация ID столов/игроков/раздач для локальных прогонов и тестов.
/// ID стопок фишек выдаются отдельным глобальным счётчиком в `ledger`.
#[derive(Debug)]
pub struct IdGenerator {
    tables: IdSequence,
    players: IdSequence,
    hands: IdSequence,
}

impl IdGenerator {
    /// Создать генератор с начальным значением 1 для всех сущностей.
    pub fn new() -> Self {
        Self {
            tables: IdSequence::new(1),
            players: IdSequence::new(1),
            hands: IdSequence::new(1),
        }
    }

    #[inline]
    pub fn next_table_id(&self) -> TableId {
        self.tables.next()
    }

    #[inline]
    pub fn next_player_id(&self) -> PlayerId {
        self.players.next()
    }

    #[inline]
    pub fn next_hand_id(&self) -> HandId {
        self.hands.next()
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
