//! Покерный движок: раунд ставок, сайд-поты, шоудаун, цикл раздачи.
//!
//! Высокоуровневая операция: `play_hand`
//! Шаги, доступные по отдельности:
//!   - `start_hand` – кнопка, блайнды/анте, карманные карты
//!   - `run_betting_round` – одна улица торговли
//!   - `split_side_pots` – разбить ставки улицы на банки
//!   - `award_pots` – рейк и выплата банков

pub mod actions;
pub mod betting;
pub mod cancel;
pub mod errors;
pub mod game_loop;
pub mod hand_history;
pub mod positions;
pub mod showdown;
pub mod side_pots;
pub mod validation;

pub use actions::{ActionProvider, ActionRequest, ChannelActions, Decision, ScriptedActions, SeatAction};
pub use betting::{BettingRound, StageOutcome};
pub use cancel::CancelToken;
pub use errors::EngineError;
pub use game_loop::{
    abort_hand, collect_bets, deal_board, play_hand, post_blinds_and_antes, run_betting_round, start_hand,
    FinishedHand, HandEngine,
};
pub use hand_history::{HandEvent, HandEventKind, HandHistory};
pub use showdown::{award_pots, PotAward, ShowdownResult};
pub use side_pots::{split_side_pots, SidePotReport};
pub use validation::{raise_bounds, resolve_commitment, RaiseContext, Resolution};

/// RNG интерфейс для engine.
/// Реализации – в infra (обёртки над `rand`).
pub trait RandomSource {
    fn shuffle<T>(&mut self, slice: &mut [T]);
}
