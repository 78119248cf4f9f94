use core::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::card::Rank;

/// Категория покерной руки по силе.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard = 0,
    OnePair = 1,
    TwoPair = 2,
    ThreeOfAKind = 3,
    Straight = 4,
    Flush = 5,
    FullHouse = 6,
    FourOfAKind = 7,
    StraightFlush = 8,
    RoyalFlush = 9,
}

impl HandCategory {
    pub fn name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High card",
            HandCategory::OnePair => "One pair",
            HandCategory::TwoPair => "Two pair",
            HandCategory::ThreeOfAKind => "Three of a kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full house",
            HandCategory::FourOfAKind => "Four of a kind",
            HandCategory::StraightFlush => "Straight flush",
            HandCategory::RoyalFlush => "Royal flush",
        }
    }
}

/// Сила руки: категория + ранги для разрешения ничьих.
///
/// Порядок полей важен: derive(Ord) сравнивает сначала категорию,
/// затем `tie_break` лексикографически. Полное равенство = сплит.
///
/// Содержимое `tie_break` по категориям:
///   - RoyalFlush / StraightFlush / Straight: [старшая карта] (для wheel – Five)
///   - FourOfAKind: [каре, кикер]
///   - FullHouse: [сет, пара]
///   - Flush / HighCard: 5 рангов по убыванию
///   - ThreeOfAKind: [сет, кикер, кикер]
///   - TwoPair: [старшая пара, младшая пара, кикер]
///   - OnePair: [пара, кикер, кикер, кикер]
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandScore {
    pub category: HandCategory,
    pub tie_break: Vec<Rank>,
}

impl HandScore {
    pub fn new(category: HandCategory, tie_break: Vec<Rank>) -> Self {
        Self {
            category,
            tie_break,
        }
    }

    /// Человеческое описание руки, например "Full house, 3s full of 2s".
    pub fn describe(&self) -> String {
        let r = |i: usize| self.tie_break.get(i).map(|r| r.to_string()).unwrap_or_default();
        let name = self.category.name();
        match self.category {
            HandCategory::RoyalFlush => name.to_string(),
            HandCategory::StraightFlush | HandCategory::Straight => {
                format!("{name}, {} high", r(0))
            }
            HandCategory::FourOfAKind => format!("{name}, {}s", r(0)),
            HandCategory::FullHouse => format!("{name}, {}s full of {}s", r(0), r(1)),
            HandCategory::Flush | HandCategory::HighCard => format!("{name}, {} high", r(0)),
            HandCategory::ThreeOfAKind => format!("{name}, {}s", r(0)),
            HandCategory::TwoPair => format!("{name}, {}s and {}s", r(0), r(1)),
            HandCategory::OnePair => format!("{name}, {}s", r(0)),
        }
    }
}

impl fmt::Display for HandScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
