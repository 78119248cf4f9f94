use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::{HandId, PlayerId, SeatIndex, TableId};
use crate::eval::HandScore;

/// Улица раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Street {
    Preflop,
    Flop,
    Turn,
    River,
    Showdown,
}

impl Street {
    /// Сколько карт борда открывается при переходе на эту улицу.
    pub fn board_cards_to_deal(self) -> usize {
        match self {
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
            Street::Preflop | Street::Showdown => 0,
        }
    }

    pub fn next(self) -> Street {
        match self {
            Street::Preflop => Street::Flop,
            Street::Flop => Street::Turn,
            Street::Turn => Street::River,
            Street::River | Street::Showdown => Street::Showdown,
        }
    }
}

/// Слот под карту: пусто или карта уже сдана.
/// Используется и для борда (5 слотов), и для карманных карт (2 слота).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum CardSlot {
    #[default]
    Empty,
    Dealt(Card),
}

impl CardSlot {
    pub fn card(&self) -> Option<Card> {
        match self {
            CardSlot::Dealt(c) => Some(*c),
            CardSlot::Empty => None,
        }
    }

    pub fn is_dealt(&self) -> bool {
        matches!(self, CardSlot::Dealt(_))
    }
}

/// Только сданные карты из набора слотов (в порядке слотов).
pub fn dealt_cards(slots: &[CardSlot]) -> Vec<Card> {
    slots.iter().filter_map(CardSlot::card).collect()
}

/// Положить карту в первый пустой слот. false – свободных слотов нет.
pub fn fill_next_slot(slots: &mut [CardSlot], card: Card) -> bool {
    match slots.iter_mut().find(|s| !s.is_dealt()) {
        Some(slot) => {
            *slot = CardSlot::Dealt(card);
            true
        }
        None => false,
    }
}

/// Результат конкретного места в раздаче.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerHandResult {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    /// Итоговая рука (если карты вскрывались на шоудауне).
    pub score: Option<HandScore>,
    /// Сколько фишек место получило из банков.
    pub won: Chips,
    /// Является ли игрок победителем хотя бы одного банка (включая сплит).
    pub is_winner: bool,
}

/// Краткое описание завершённой раздачи. Удобно для истории/реплеера.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandSummary {
    pub hand_id: HandId,
    pub table_id: TableId,
    pub street_reached: Street,
    pub board: Vec<Card>,
    pub total_pot: Chips,
    pub rake: Chips,
    pub results: Vec<PlayerHandResult>,
}
