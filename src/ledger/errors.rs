use thiserror::Error;

use crate::domain::chips::Chips;
use crate::ledger::denomination::Denomination;

/// Ошибки операций со стопкой фишек.
///
/// При любой ошибке стопка остаётся в исходном (согласованном) состоянии.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Недостаточно фишек: запрошено {requested}, в стопке {available}")]
    InsufficientFunds { requested: Chips, available: Chips },

    #[error("Нет нужных фишек номинала {denomination}: запрошено {requested}, есть {held}")]
    ChipsNotPresent {
        denomination: Denomination,
        requested: u64,
        held: u64,
    },
}
