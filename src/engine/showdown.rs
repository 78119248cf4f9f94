use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::{SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::engine::hand_history::{HandEventKind, HandHistory};
use crate::eval::{score_slots, HandScore};

/// Итог розыгрыша одного центрального банка.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct PotAward {
    pub pot_index: usize,
    /// Размер банка до рейка.
    pub amount: Chips,
    pub rake: Chips,
    pub winners: Vec<SeatIndex>,
    /// Доля каждого победителя.
    pub share: Chips,
    /// Неделимый остаток сплита, ушедший в house.
    pub remainder: Chips,
}

/// Итог шоудауна по всем банкам.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ShowdownResult {
    pub awards: Vec<PotAward>,
    /// Вскрытые руки (только если банк реально оспаривался).
    pub scores: BTreeMap<SeatIndex, HandScore>,
    pub rake: Chips,
}

impl ShowdownResult {
    /// Сколько всего получило место.
    pub fn won_by(&self, seat: SeatIndex) -> Chips {
        self.awards
            .iter()
            .filter(|a| a.winners.contains(&seat))
            .map(|a| a.share)
            .sum()
    }
}

/// Разыграть все центральные банки стола.
///
/// Претенденты банка – его участники, которые ещё в раздаче. Один
/// претендент забирает банк без вскрытия. Рейк берётся только если
/// открыт флоп, и только с банков, где было больше одного участника;
/// потолок действует на всю раздачу. После выплаты банки очищаются.
pub fn award_pots(table: &mut Table, history: &mut HandHistory) -> Result<ShowdownResult, EngineError> {
    let live = table.live_seats();
    let small_blind = table.config.stakes.small_blind;
    let rake_rules = table.config.rake.clone();
    let flop_seen = table.board_cards().len() >= 3;
    let mut rake_left = rake_rules.cap(small_blind);

    let mut result = ShowdownResult::default();

    for (pot_index, pot) in table.center_pots.iter().enumerate() {
        let amount = pot.value();
        if amount.is_zero() {
            continue;
        }

        let participants = pot.participants();
        let contenders: Vec<SeatIndex> = participants
            .iter()
            .copied()
            .filter(|s| live.contains(s))
            .collect();
        if contenders.is_empty() {
            // Ни один вкладчик слоя не дожил до конца – банк никому не положен.
            let dead = pot.move_all(&table.house, None);
            tracing::warn!(table = table.id, pot = pot_index, amount = dead.0, "pot without contenders moved to house");
            result.awards.push(PotAward {
                pot_index,
                amount,
                rake: Chips::ZERO,
                winners: Vec::new(),
                share: Chips::ZERO,
                remainder: dead,
            });
            continue;
        }

        let winners = if contenders.len() == 1 {
            contenders
        } else {
            for &seat in &contenders {
                if !result.scores.contains_key(&seat) {
                    let Some(p) = table.seat(seat) else {
                        return Err(EngineError::EmptySeat);
                    };
                    let score = score_slots(&table.board, &p.pocket);
                    history.push(HandEventKind::ShowdownReveal {
                        seat,
                        cards: p.pocket_cards(),
                        score: score.clone(),
                    });
                    result.scores.insert(seat, score);
                }
            }
            best_seats(&contenders, &result.scores)
        };

        let mut rake = Chips::ZERO;
        if flop_seen && participants.len() > 1 {
            rake = rake_rules.calculate_rake(amount, small_blind);
            if let Some(left) = rake_left.as_mut() {
                rake = rake.min(*left);
                *left -= rake;
            }
            if !rake.is_zero() {
                pot.transfer(&table.house, rake, None)?;
                tracing::debug!(table = table.id, pot = pot_index, rake = rake.0, "rake taken");
                history.push(HandEventKind::RakeTaken {
                    pot_index,
                    amount: rake,
                });
                result.rake += rake;
            }
        }

        let (share, remainder) = (amount - rake).split(winners.len() as u64);
        for &seat in &winners {
            let Some(p) = table.seat(seat) else {
                return Err(EngineError::EmptySeat);
            };
            pot.transfer(&p.stack, share, None)?;
            history.push(HandEventKind::PotAwarded {
                seat,
                pot_index,
                amount: share,
            });
        }
        let leftover = pot.move_all(&table.house, None);
        debug_assert_eq!(leftover, remainder);

        tracing::info!(
            table = table.id,
            pot = pot_index,
            amount = amount.0,
            winners = ?winners,
            share = share.0,
            "pot awarded"
        );

        result.awards.push(PotAward {
            pot_index,
            amount,
            rake,
            winners,
            share,
            remainder,
        });
    }

    table.center_pots.clear();
    Ok(result)
}

/// Места с лучшей рукой (несколько – сплит).
fn best_seats(contenders: &[SeatIndex], scores: &BTreeMap<SeatIndex, HandScore>) -> Vec<SeatIndex> {
    let best = contenders.iter().filter_map(|s| scores.get(s)).max();
    contenders
        .iter()
        .copied()
        .filter(|s| scores.get(s) == best)
        .collect()
}
