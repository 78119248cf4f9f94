//! Учёт фишек: номиналы, стопки (ChipStack) и перевод стоимости между ними.
//!
//! Основные операции `ChipStack`:
//!   - `deposit` / `withdraw_value` / `withdraw_chips`
//!   - `move_value` / `move_all` – перенос в другую стопку
//!   - `recolorize` – пересобрать ту же сумму «игровым» набором номиналов

pub mod chip_stack;
pub mod denomination;
pub mod errors;

pub use chip_stack::{ChipStack, LedgerId, LedgerSnapshot};
pub use denomination::{
    chip_count, chips_to_value, max_count_for_denomination, merge_counts, recolorize_value, value_to_chips,
    ChipCounts, Denomination,
};
pub use errors::LedgerError;
