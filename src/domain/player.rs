use serde::{Deserialize, Serialize};

use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{dealt_cards, fill_next_slot, CardSlot};
use crate::domain::PlayerId;
use crate::engine::EngineError;
use crate::ledger::ChipStack;

/// Статус игрока именно в контексте стола/раздачи.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum PlayerStatus {
    /// Игрок активен в текущей раздаче.
    Active,
    /// Игрок сфолдил и больше не участвует в банке.
    Folded,
    /// Игрок в оллыне – не может больше делать ставки.
    AllIn,
    /// Игрок сидит за столом, но не участвует в раздаче (sit out).
    SittingOut,
    /// Игрок остался без фишек.
    Busted,
}

/// Состояние игрока за конкретным столом.
///
/// Стек и ставка текущей улицы – отдельные стопки фишек; ставка
/// переезжает в центральные банки только через разбиение на сайд-поты.
#[derive(Debug)]
pub struct PlayerAtTable {
    pub player_id: PlayerId,
    /// Фишки игрока за столом.
    pub stack: ChipStack,
    /// Ставка на текущей улице (ещё не собрана в банк).
    pub pending_bet: ChipStack,
    pub status: PlayerStatus,
    /// Карманные карты.
    pub pocket: [CardSlot; 2],
}

impl PlayerAtTable {
    pub fn new(player_id: PlayerId, stack: Chips) -> Self {
        Self {
            player_id,
            stack: ChipStack::from_value(stack),
            pending_bet: ChipStack::new(),
            status: PlayerStatus::Active,
            pocket: [CardSlot::Empty; 2],
        }
    }

    pub fn is_in_hand(&self) -> bool {
        matches!(self.status, PlayerStatus::Active | PlayerStatus::AllIn)
    }

    pub fn is_folded(&self) -> bool {
        self.status == PlayerStatus::Folded
    }

    pub fn has_cards(&self) -> bool {
        self.pocket.iter().any(CardSlot::is_dealt)
    }

    /// Может ли место сейчас действовать: в игре, с картами и не в оллыне.
    pub fn is_actionable(&self) -> bool {
        self.status == PlayerStatus::Active && self.has_cards() && !self.stack.is_empty()
    }

    pub fn pocket_cards(&self) -> Vec<Card> {
        dealt_cards(&self.pocket)
    }

    /// Выдать карманную карту. Третья карта – нарушение контракта раздачи.
    pub fn give_card(&mut self, card: Card) -> Result<(), EngineError> {
        if fill_next_slot(&mut self.pocket, card) {
            Ok(())
        } else {
            Err(EngineError::InvalidHandState("третья карманная карта"))
        }
    }

    pub fn clear_cards(&mut self) {
        self.pocket = [CardSlot::Empty; 2];
    }
}
