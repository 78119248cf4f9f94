//! Модуль оценки силы покерных рук (Texas Hold'em).
//!
//! Основная функция:
//!   `score(community, pocket) -> HandScore`
//!
//! Проверки идут каскадом сверху вниз (первое совпадение выигрывает):
//! стрит-флеш/роял → каре → фулл-хаус → флеш → стрит → сет →
//! две пары → пара → старшая карта.

pub mod evaluator;
pub mod hand_rank;
pub mod lookup_tables;

pub use evaluator::{score, score_slots};
pub use hand_rank::{HandCategory, HandScore};
