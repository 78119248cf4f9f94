use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::SeatIndex;
use crate::engine::validation::Resolution;

/// Чем закончилась улица.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum StageOutcome {
    /// Торговля возможна и дальше – открываем следующую улицу.
    OpenNextStage,
    /// Ставить больше некому (все, кроме максимум одного, в оллыне) –
    /// докладываем борд и вскрываемся.
    RevealAllCards,
    /// Остался один претендент на банк.
    LastManStanding,
}

/// Состояние раунда ставок на одной улице. Живёт ровно одну улицу.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BettingRound {
    pub street: Street,
    /// До какой суммы должны дотянуться ставки, чтобы остаться в игре.
    pub call_value: Chips,
    /// Сколько решений принято на улице.
    pub bets_received: u32,
    /// Последнее место, поднявшее ставку.
    pub last_raiser: Option<SeatIndex>,
    /// Количество ставок/рейзов на улице (блайнд префлопа считается первой ставкой).
    pub raises: u32,
    /// Кто уже ответил на последнее повышение.
    acted: BTreeSet<SeatIndex>,
}

impl BettingRound {
    pub fn new(street: Street, call_value: Chips) -> Self {
        Self {
            street,
            call_value,
            bets_received: 0,
            last_raiser: None,
            raises: 0,
            acted: BTreeSet::new(),
        }
    }

    /// Префлоп: ставка уже задана большим блайндом.
    ///
    /// BB записан как `last_raiser`, но не как «ответивший»: если все
    /// просто уравняют, у него остаётся право хода (опция).
    pub fn preflop(call_value: Chips, big_blind_seat: Option<SeatIndex>) -> Self {
        let mut round = Self::new(Street::Preflop, call_value);
        round.last_raiser = big_blind_seat;
        round.raises = 1;
        round
    }

    /// Должно ли место ещё действовать на этой улице.
    pub fn owes_action(&self, seat: SeatIndex, committed: Chips) -> bool {
        !self.acted.contains(&seat) || committed < self.call_value
    }

    /// Учесть решение места. Возвращает true, если ставка выросла.
    pub fn record(&mut self, seat: SeatIndex, resolution: &Resolution) -> bool {
        self.bets_received += 1;
        self.acted.insert(seat);

        if resolution.target > self.call_value {
            self.call_value = resolution.target;
            self.last_raiser = Some(seat);
            self.raises += 1;
            // После повышения ответить заново должны все остальные.
            self.acted.clear();
            self.acted.insert(seat);
            return true;
        }
        false
    }
}
