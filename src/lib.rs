//! Ядро правил Texas Hold'em.
//!
//! Три части:
//!   - `eval` – оценка силы руки (`HandScore`, полный порядок);
//!   - `ledger` – стопки фишек с номиналами и «перекраской»;
//!   - `engine` – раунд ставок, разбиение на сайд-поты, шоудаун.
//!
//! Вокруг них – доменная модель (`domain`), контроль времени хода
//! (`time_ctrl`) и RNG/ID (`infra`).

pub mod domain;
pub mod engine;
pub mod eval;
pub mod infra;
pub mod ledger;
pub mod time_ctrl;
