//! Номиналы фишек и «алгебра» перевода суммы ↔ набор фишек.

use std::collections::BTreeMap;

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;

/// Номинал фишки. Порядок вариантов = порядок по номиналу.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Denomination {
    One,
    Five,
    Ten,
    TwentyFive,
    Fifty,
    OneHundred,
    FiveHundred,
    OneThousand,
    FiveThousand,
    TwentyFiveThousand,
    OneHundredThousand,
}

/// Набор фишек: номинал → количество. Нулевые количества не храним.
pub type ChipCounts = BTreeMap<Denomination, u64>;

/// Делитель «разброса»: номинала d берём не больше total / (d * SPREAD_DIVISOR).
pub const SPREAD_DIVISOR: u64 = 5;

/// Номиналы ниже этого порога ограничены абсолютным лимитом штук.
pub const LOW_VALUE_THRESHOLD: u64 = 100;

/// Абсолютный лимит фишек мелкого номинала в одной стопке.
pub const LOW_VALUE_MAX_COUNT: u64 = 20;

impl Denomination {
    /// Все номиналы по возрастанию.
    pub const ALL: [Denomination; 11] = [
        Denomination::One,
        Denomination::Five,
        Denomination::Ten,
        Denomination::TwentyFive,
        Denomination::Fifty,
        Denomination::OneHundred,
        Denomination::FiveHundred,
        Denomination::OneThousand,
        Denomination::FiveThousand,
        Denomination::TwentyFiveThousand,
        Denomination::OneHundredThousand,
    ];

    pub const fn face_value(self) -> u64 {
        match self {
            Denomination::One => 1,
            Denomination::Five => 5,
            Denomination::Ten => 10,
            Denomination::TwentyFive => 25,
            Denomination::Fifty => 50,
            Denomination::OneHundred => 100,
            Denomination::FiveHundred => 500,
            Denomination::OneThousand => 1_000,
            Denomination::FiveThousand => 5_000,
            Denomination::TwentyFiveThousand => 25_000,
            Denomination::OneHundredThousand => 100_000,
        }
    }

    pub fn from_face_value(v: u64) -> Option<Denomination> {
        Denomination::ALL.into_iter().find(|d| d.face_value() == v)
    }

    /// Номиналы от старшего к младшему.
    pub fn descending() -> impl Iterator<Item = Denomination> {
        Denomination::ALL.into_iter().rev()
    }
}

impl fmt::Display for Denomination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.face_value())
    }
}

/// Суммарная стоимость набора фишек.
pub fn chips_to_value(chips: &ChipCounts) -> Chips {
    chips
        .iter()
        .map(|(d, n)| Chips(d.face_value()).times(*n))
        .sum()
}

/// Жадный перевод суммы в фишки без ограничений: минимальное число фишек.
pub fn value_to_chips(value: Chips) -> ChipCounts {
    let mut out = ChipCounts::new();
    let mut remaining = value.0;
    for denom in Denomination::descending() {
        let face = denom.face_value();
        let count = remaining / face;
        if count > 0 {
            out.insert(denom, count);
            remaining -= count * face;
        }
    }
    out
}

/// Сколько фишек номинала `denom` допускается при общей сумме `total`.
pub fn max_count_for_denomination(denom: Denomination, total: Chips) -> u64 {
    let face = denom.face_value();
    let spread_cap = total.0 / (face * SPREAD_DIVISOR);
    if face < LOW_VALUE_THRESHOLD {
        spread_cap.min(LOW_VALUE_MAX_COUNT)
    } else {
        spread_cap
    }
}

/// «Перекраска»: та же сумма, но «игровой» разброс номиналов.
///
/// Первый проход идёт сверху вниз с лимитами `max_count_for_denomination`,
/// остаток (он появляется из-за лимитов) добивается через `value_to_chips`.
pub fn recolorize_value(total: Chips) -> ChipCounts {
    let mut out = ChipCounts::new();
    let mut remaining = total.0;

    for denom in Denomination::descending() {
        let face = denom.face_value();
        let fits = remaining / face;
        let count = fits.min(max_count_for_denomination(denom, total));
        if count > 0 {
            out.insert(denom, count);
            remaining -= count * face;
        }
    }

    if remaining > 0 {
        merge_counts(&mut out, &value_to_chips(Chips(remaining)));
    }
    out
}

/// Добавить `extra` к `into`.
pub fn merge_counts(into: &mut ChipCounts, extra: &ChipCounts) {
    for (denom, n) in extra {
        if *n > 0 {
            *into.entry(*denom).or_insert(0) += n;
        }
    }
}

/// Общее число фишек в наборе.
pub fn chip_count(chips: &ChipCounts) -> u64 {
    chips.values().sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spread_cap_limits_small_denominations() {
        assert_eq!(max_count_for_denomination(Denomination::One, Chips(10_000)), 20);
        assert_eq!(max_count_for_denomination(Denomination::OneHundred, Chips(10_000)), 20);
        assert_eq!(max_count_for_denomination(Denomination::OneThousand, Chips(10_000)), 2);
        assert_eq!(max_count_for_denomination(Denomination::FiveThousand, Chips(10_000)), 0);
    }

    #[test]
    fn recolorize_small_total_falls_back_to_greedy() {
        // Все лимиты нулевые → весь остаток уходит во второй проход.
        let chips = recolorize_value(Chips(3));
        assert_eq!(chips.get(&Denomination::One), Some(&3));
        assert_eq!(chips_to_value(&chips), Chips(3));
    }

    #[test]
    fn recolorize_hundred() {
        let chips = recolorize_value(Chips(100));
        assert_eq!(chips_to_value(&chips), Chips(100));
        assert_eq!(chips.get(&Denomination::One), Some(&20));
        assert_eq!(chips.get(&Denomination::OneHundred), None);
    }
}
