//! Правила лимитов и нормализация решения игрока.

use crate::domain::chips::Chips;
use crate::domain::hand::Street;
use crate::domain::table::LimitType;
use crate::engine::actions::SeatAction;

/// Всё, что нужно для расчёта границ рейза.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RaiseContext {
    pub limit: LimitType,
    pub street: Street,
    pub big_blind: Chips,
    /// Текущая ставка улицы.
    pub call_value: Chips,
    /// Сколько место уже поставило на улице.
    pub committed: Chips,
    /// Центральные банки + все несобранные ставки.
    pub pot_total: Chips,
    /// Сколько ставок/рейзов уже было на улице (для fixed-limit).
    pub raises_so_far: u32,
    pub raise_cap: u32,
}

/// Границы итоговой ставки при рейзе: (минимум, максимум).
///
/// Если рейз невозможен (fixed-limit упёрся в кап), обе границы равны `call_value`.
pub fn raise_bounds(ctx: &RaiseContext) -> (Chips, Chips) {
    // No-limit / pot-limit: минимум – удвоение текущей ставки, но не меньше BB.
    let min_open = ctx.call_value.times(2).max(ctx.big_blind);

    match ctx.limit {
        LimitType::NoLimit => (min_open, Chips(u64::MAX)),
        LimitType::PotLimit => {
            let to_call = ctx.call_value.saturating_sub(ctx.committed);
            let max = ctx.call_value + ctx.pot_total + to_call;
            (min_open, max.max(min_open))
        }
        LimitType::FixedLimit => {
            if ctx.raises_so_far >= ctx.raise_cap {
                return (ctx.call_value, ctx.call_value);
            }
            let size = match ctx.street {
                Street::Preflop | Street::Flop => ctx.big_blind,
                Street::Turn | Street::River | Street::Showdown => ctx.big_blind.times(2),
            };
            let total = ctx.call_value + size;
            (total, total)
        }
    }
}

/// Итог нормализации решения: что случилось и до какой суммы дотянута ставка.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub action: SeatAction,
    /// Итоговая ставка места на улице.
    pub target: Chips,
    /// Сколько фишек нужно перенести из стека в ставку.
    pub add: Chips,
}

impl Resolution {
    pub fn fold(committed: Chips) -> Self {
        Self {
            action: SeatAction::Folded,
            target: committed,
            add: Chips::ZERO,
        }
    }
}

/// Превратить «сырой» ответ игрока в допустимое действие.
///
/// - `None` или ставка меньше колла (не оллын) – фолд;
/// - ставка больше стека – оллын;
/// - рейз меньше минимума (не оллын) – колл, больше максимума – обрезаем.
pub fn resolve_commitment(
    requested: Option<Chips>,
    call_value: Chips,
    committed: Chips,
    stack: Chips,
    bounds: (Chips, Chips),
) -> Resolution {
    let Some(requested) = requested else {
        return Resolution::fold(committed);
    };

    let all_in_total = committed + stack;
    let mut target = requested.min(all_in_total);

    if target < call_value && target < all_in_total {
        return Resolution::fold(committed);
    }
    // Ставку назад не забирают.
    target = target.max(committed);

    if target > call_value {
        let (min_raise, max_raise) = bounds;
        if target < min_raise && target != all_in_total {
            target = call_value;
        } else if target > max_raise {
            target = max_raise.max(call_value);
        }
    }

    let add = target - committed;
    let action = if !stack.is_zero() && add == stack {
        SeatAction::AllIn
    } else if target > call_value {
        SeatAction::Raised
    } else {
        SeatAction::Called
    };

    Resolution {
        action,
        target,
        add,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::betting::BettingRound;

    fn ctx(limit: LimitType, call_value: u64, committed: u64, pot_total: u64) -> RaiseContext {
        RaiseContext {
            limit,
            street: Street::Flop,
            big_blind: Chips(20),
            call_value: Chips(call_value),
            committed: Chips(committed),
            pot_total: Chips(pot_total),
            raises_so_far: 1,
            raise_cap: 4,
        }
    }

    const NO_LIMIT: (Chips, Chips) = (Chips(200), Chips(u64::MAX));

    #[test]
    fn all_in_for_exact_call_is_not_a_raise() {
        let mut round = BettingRound::new(Street::Flop, Chips::ZERO);
        let bet = Resolution {
            action: SeatAction::Raised,
            target: Chips(100),
            add: Chips(100),
        };
        assert!(round.record(1, &bet));

        let r = resolve_commitment(Some(Chips(100)), Chips(100), Chips(20), Chips(80), NO_LIMIT);
        assert_eq!(r.action, SeatAction::AllIn);
        assert_eq!(r.target, Chips(100));
        assert_eq!(r.add, Chips(80));

        assert!(!round.record(0, &r));
        assert_eq!(round.call_value, Chips(100));
        assert_eq!(round.last_raiser, Some(1));
        assert_eq!(round.raises, 1);
        assert!(!round.owes_action(1, Chips(100)));
    }

    #[test]
    fn short_all_in_calls_instead_of_folding() {
        let r = resolve_commitment(Some(Chips(500)), Chips(100), Chips::ZERO, Chips(60), NO_LIMIT);
        assert_eq!(r.action, SeatAction::AllIn);
        assert_eq!(r.target, Chips(60));
        assert_eq!(r.add, Chips(60));

        // Меньше колла и не весь стек – фолд.
        let r = resolve_commitment(Some(Chips(40)), Chips(100), Chips::ZERO, Chips(60), NO_LIMIT);
        assert_eq!(r, Resolution::fold(Chips::ZERO));
    }

    #[test]
    fn raise_below_minimum_becomes_call() {
        let r = resolve_commitment(Some(Chips(150)), Chips(100), Chips::ZERO, Chips(1_000), NO_LIMIT);
        assert_eq!(r.action, SeatAction::Called);
        assert_eq!(r.target, Chips(100));
    }

    #[test]
    fn pot_limit_raise_is_clamped_to_pot() {
        let bounds = raise_bounds(&ctx(LimitType::PotLimit, 50, 0, 150));
        assert_eq!(bounds, (Chips(100), Chips(250)));

        let r = resolve_commitment(Some(Chips(1_000)), Chips(50), Chips::ZERO, Chips(1_000), bounds);
        assert_eq!(r.action, SeatAction::Raised);
        assert_eq!(r.target, Chips(250));
        assert_eq!(r.add, Chips(250));
    }

    #[test]
    fn fixed_limit_cap_leaves_only_call() {
        let mut c = ctx(LimitType::FixedLimit, 80, 40, 300);
        assert_eq!(raise_bounds(&c), (Chips(100), Chips(100)));

        c.raises_so_far = 4;
        let bounds = raise_bounds(&c);
        assert_eq!(bounds, (Chips(80), Chips(80)));

        let r = resolve_commitment(Some(Chips(120)), Chips(80), Chips(40), Chips(1_000), bounds);
        assert_eq!(r.action, SeatAction::Called);
        assert_eq!(r.target, Chips(80));
        assert_eq!(r.add, Chips(40));
    }
}
