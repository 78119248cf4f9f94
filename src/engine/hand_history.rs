use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::{HandId, SeatIndex, TableId};
use crate::engine::actions::SeatAction;
use crate::eval::HandScore;

/// Тип события в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub enum HandEventKind {
    /// Новая раздача началась.
    HandStarted {
        table_id: TableId,
        hand_id: HandId,
    },

    /// Кнопка/блайнды.
    BlindsPosted {
        dealer: SeatIndex,
        small_blind: Option<(SeatIndex, Chips)>,
        big_blind: Option<(SeatIndex, Chips)>,
        ante: Vec<(SeatIndex, Chips)>,
    },

    /// Игрок получил карманные карты.
    HoleCardsDealt {
        seat: SeatIndex,
        cards: Vec<Card>,
    },

    /// Открыты общие карты на борде.
    BoardDealt {
        street: Street,
        cards: Vec<Card>,
    },

    /// Решение места на улице.
    PlayerActed {
        seat: SeatIndex,
        street: Street,
        action: SeatAction,
        /// Итоговая ставка места на улице после решения.
        committed: Chips,
        stack_after: Chips,
        /// Фолд выставлен по таймауту, а не игроком.
        timed_out: bool,
    },

    /// Ставки улицы собраны в очередной центральный банк.
    SidePotCreated {
        pot_index: usize,
        amount: Chips,
        eligible_seats: Vec<SeatIndex>,
    },

    /// Шоудаун – открытие карт.
    ShowdownReveal {
        seat: SeatIndex,
        cards: Vec<Card>,
        score: HandScore,
    },

    /// Рейк с банка.
    RakeTaken {
        pot_index: usize,
        amount: Chips,
    },

    /// Выплата из банка.
    PotAwarded {
        seat: SeatIndex,
        pot_index: usize,
        amount: Chips,
    },

    /// Раздача прервана, ставки возвращены.
    RoundAborted {
        reason: String,
    },

    /// Раздача завершена.
    HandFinished {
        hand_id: HandId,
        table_id: TableId,
    },
}

/// Событие в раздаче с порядковым номером.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct HandEvent {
    pub index: u32,
    pub kind: HandEventKind,
}

/// Полная история раздачи.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct HandHistory {
    pub events: Vec<HandEvent>,
}

impl HandHistory {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn push(&mut self, kind: HandEventKind) {
        let idx = self.events.len() as u32;
        self.events.push(HandEvent { index: idx, kind });
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// События, подходящие под фильтр (удобно в тестах).
    pub fn filter<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a HandEventKind>
    where
        F: Fn(&HandEventKind) -> bool + 'a,
    {
        self.events.iter().map(|e| &e.kind).filter(move |k| pred(k))
    }

    /// Все действия игроков по порядку.
    pub fn actions(&self) -> Vec<(SeatIndex, SeatAction)> {
        self.events
            .iter()
            .filter_map(|e| match &e.kind {
                HandEventKind::PlayerActed { seat, action, .. } => Some((*seat, *action)),
                _ => None,
            })
            .collect()
    }

    /// Сериализация в JSON (для реплеера/логов).
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
