use serde::{Deserialize, Serialize};

use crate::domain::{chips::Chips, SeatIndex, Table};
use crate::engine::errors::EngineError;
use crate::ledger::ChipStack;

/// Отчёт о банке, созданном при разбиении ставок улицы.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SidePotReport {
    /// Индекс в `table.center_pots`.
    pub pot_index: usize,
    pub amount: Chips,
    /// Кто может выиграть этот банк (внёс фишки и не сфолдил).
    pub eligible_seats: Vec<SeatIndex>,
    /// Сколько внесло каждое место (включая сфолдивших).
    pub contributions: Vec<(SeatIndex, Chips)>,
}

/// Разбить несобранные ставки мест на центральные банки (основной + сайд-поты).
///
/// Слой за слоем: среди не сфолдивших мест с ненулевой ставкой ищем
/// минимум, из каждой ненулевой ставки переносим не больше этого минимума
/// в новый банк. Место в оллыне на меньшую сумму обнуляется на своём слое
/// и в следующие банки уже не попадает.
pub fn split_side_pots(table: &mut Table) -> Result<Vec<SidePotReport>, EngineError> {
    let mut reports = Vec::new();

    loop {
        let live_bets: Vec<Chips> = table
            .occupied()
            .filter(|(_, p)| !p.is_folded())
            .map(|(_, p)| p.pending_bet.value())
            .filter(|v| !v.is_zero())
            .collect();

        let (Some(&min), Some(&max)) = (live_bets.iter().min(), live_bets.iter().max()) else {
            break;
        };
        if max.is_zero() {
            break;
        }

        let pot = ChipStack::new();
        let mut contributions = Vec::new();
        for (seat, p) in table.occupied() {
            let pending = p.pending_bet.value();
            if pending.is_zero() {
                continue;
            }
            let take = pending.min(min);
            let participant = (!p.is_folded()).then_some(seat);
            p.pending_bet.transfer(&pot, take, participant)?;
            contributions.push((seat, take));
        }

        reports.push(push_pot(table, pot, contributions));
    }

    sweep_folded_leftovers(table, &mut reports)?;
    Ok(reports)
}

/// Ставки сфолдивших, которые не покрылись ни одним слоем, докладываем
/// в последний банк (или в новый, если банков ещё нет).
fn sweep_folded_leftovers(table: &mut Table, reports: &mut Vec<SidePotReport>) -> Result<(), EngineError> {
    if table.pending_total().is_zero() {
        return Ok(());
    }

    if table.center_pots.is_empty() {
        table.center_pots.push(ChipStack::new());
    }
    let last = table.center_pots.len() - 1;
    let mut extra = Vec::new();
    for (seat, p) in table.occupied() {
        let moved = p.pending_bet.move_all(&table.center_pots[last], None);
        if !moved.is_zero() {
            extra.push((seat, moved));
        }
    }

    let amount = table.center_pots[last].value();
    match reports.iter_mut().find(|r| r.pot_index == last) {
        Some(report) => {
            report.amount = amount;
            report.contributions.extend(extra);
        }
        None => reports.push(SidePotReport {
            pot_index: last,
            amount,
            eligible_seats: table.center_pots[last].participants().into_iter().collect(),
            contributions: extra,
        }),
    }
    Ok(())
}

fn push_pot(table: &mut Table, pot: ChipStack, contributions: Vec<(SeatIndex, Chips)>) -> SidePotReport {
    let report = SidePotReport {
        pot_index: table.center_pots.len(),
        amount: pot.value(),
        eligible_seats: pot.participants().into_iter().collect(),
        contributions,
    };
    tracing::debug!(
        table = table.id,
        pot = report.pot_index,
        amount = report.amount.0,
        eligible = ?report.eligible_seats,
        "side pot created"
    );
    table.center_pots.push(pot);
    report
}
