use thiserror::Error;

use crate::domain::{DeckError, SeatIndex};
use crate::ledger::LedgerError;

/// Ошибки движка покера.
///
/// Ошибки стопок и колоды фатальны для текущей раздачи, но не для процесса:
/// `play_hand` возвращает несобранные ставки в стеки и пробрасывает ошибку.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Место {0} не существует за столом")]
    InvalidSeat(SeatIndex),

    #[error("В этом месте нет игрока")]
    EmptySeat,

    #[error("Недостаточно активных игроков для раздачи")]
    NotEnoughPlayers,

    #[error("Раздача уже идёт")]
    HandAlreadyInProgress,

    #[error("Раздача не активна")]
    NoActiveHand,

    /// Нарушение контракта: третья карманная карта, переполненный борд и т.п.
    #[error("Некорректное состояние руки: {0}")]
    InvalidHandState(&'static str),

    #[error("Раунд отменён")]
    RoundCancelled,

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Deck(#[from] DeckError),
}
