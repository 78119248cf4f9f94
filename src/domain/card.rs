use core::cmp::Ordering;
use core::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Масть карты. Масти между собой не упорядочены.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Clubs,    // ♣
    Diamonds, // ♦
    Hearts,   // ♥
    Spades,   // ♠
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades];

    /// Индекс масти 0..=3 (используется в упакованном байте карты).
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn from_index(idx: u8) -> Option<Suit> {
        match idx {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Diamonds),
            2 => Some(Suit::Hearts),
            3 => Some(Suit::Spades),
            _ => None,
        }
    }
}

/// Ранг карты: 2..=14, туз старший.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, Ord, PartialOrd)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    /// Все ранги по возрастанию.
    pub const ALL: [Rank; 13] = [
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn value(self) -> u8 {
        self as u8
    }

    /// Обратное к `value()`: 2..=14 → Rank.
    pub const fn from_value(v: u8) -> Option<Rank> {
        if v < 2 || v > 14 {
            return None;
        }
        Some(Rank::ALL[(v - 2) as usize])
    }
}

/// Обычная покерная карта (52-карточная колода).
///
/// `PartialEq`/`Eq` — точное сравнение (ранг + масть).
/// Для сравнения «только по рангу» есть `cmp_rank` / `same_rank`.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub rank: Rank,
    pub suit: Suit,
}

/// Все 52 карты, строятся один раз на этапе компиляции.
/// Порядок: Clubs 2..A, Diamonds 2..A, Hearts 2..A, Spades 2..A.
static ALL_CARDS: [Card; 52] = build_all_cards();

const fn build_all_cards() -> [Card; 52] {
    let mut cards = [Card::new(Rank::Two, Suit::Clubs); 52];
    let mut s = 0;
    while s < 4 {
        let mut r = 0;
        while r < 13 {
            cards[s * 13 + r] = Card::new(Rank::ALL[r], Suit::ALL[s]);
            r += 1;
        }
        s += 1;
    }
    cards
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    /// Таблица всех карт колоды.
    pub fn all() -> &'static [Card; 52] {
        &ALL_CARDS
    }

    /// Позиция карты в `Card::all()`.
    pub const fn index(self) -> usize {
        self.suit.index() as usize * 13 + (self.rank.value() - 2) as usize
    }

    /// Упакованный байт: старший полубайт — ранг, младшие биты — масть.
    pub const fn to_byte(self) -> u8 {
        (self.rank.value() << 4) | self.suit.index()
    }

    pub fn from_byte(byte: u8) -> Option<Card> {
        let rank = Rank::from_value(byte >> 4)?;
        let suit = Suit::from_index(byte & 0x0F)?;
        Some(ALL_CARDS[Card::new(rank, suit).index()])
    }

    /// Сравнение только по рангу (масть не учитывается).
    pub fn cmp_rank(&self, other: &Card) -> Ordering {
        self.rank.cmp(&other.rank)
    }

    pub fn same_rank(&self, other: &Card) -> bool {
        self.rank == other.rank
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Suit::Clubs => 'c',
            Suit::Diamonds => 'd',
            Suit::Hearts => 'h',
            Suit::Spades => 's',
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ch = match self {
            Rank::Ten => 'T',
            Rank::Jack => 'J',
            Rank::Queen => 'Q',
            Rank::King => 'K',
            Rank::Ace => 'A',
            r => (b'0' + r.value()) as char,
        };
        write!(f, "{ch}")
    }
}

impl fmt::Display for Card {
    /// Формат вида `Ah`, `Td`, `7c`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// Парсинг строки вида "Ah", "Td", "7c".
impl FromStr for Card {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        let (Some(r_ch), Some(s_ch), None) = (chars.next(), chars.next(), chars.next()) else {
            return Err("Card string must have length 2".into());
        };

        let rank = match r_ch {
            '2' => Rank::Two,
            '3' => Rank::Three,
            '4' => Rank::Four,
            '5' => Rank::Five,
            '6' => Rank::Six,
            '7' => Rank::Seven,
            '8' => Rank::Eight,
            '9' => Rank::Nine,
            'T' | 't' => Rank::Ten,
            'J' | 'j' => Rank::Jack,
            'Q' | 'q' => Rank::Queen,
            'K' | 'k' => Rank::King,
            'A' | 'a' => Rank::Ace,
            _ => return Err(format!("Invalid rank: {r_ch}")),
        };

        let suit = match s_ch {
            'c' | 'C' => Suit::Clubs,
            'd' | 'D' => Suit::Diamonds,
            'h' | 'H' => Suit::Hearts,
            's' | 'S' => Suit::Spades,
            _ => return Err(format!("Invalid suit: {s_ch}")),
        };

        Ok(Card { rank, suit })
    }
}

/// Разобрать список карт через пробел: "Ah Kd 7c".
pub fn parse_cards(s: &str) -> Result<Vec<Card>, String> {
    s.split_whitespace().map(str::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_packing_covers_every_card() {
        for (i, card) in Card::all().iter().enumerate() {
            assert_eq!(card.index(), i);
            assert_eq!(Card::from_byte(card.to_byte()), Some(*card));
        }
        assert_eq!(Card::from_byte(0x14), None); // ранг 1
        assert_eq!(Card::from_byte(0x25), None); // масть 5
    }

    #[test]
    fn rank_only_ordering_ignores_suit() {
        let a = Card::new(Rank::Nine, Suit::Hearts);
        let b = Card::new(Rank::Nine, Suit::Spades);
        assert_eq!(a.cmp_rank(&b), Ordering::Equal);
        assert!(a.same_rank(&b));
        assert_ne!(a, b);
    }
}
