use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::card::Card;
use crate::engine::RandomSource;

/// Ошибки колоды.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// Карты закончились – раздачу нельзя продолжать без перетасовки.
    #[error("Колода пуста: нужно перетасовать перед продолжением")]
    Exhausted,
}

/// Колода карт. В домене — просто упорядоченный список карт,
/// верх колоды = конец вектора.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Deck {
    pub cards: Vec<Card>,
}

impl Deck {
    /// Стандартная 52-карточная колода в порядке `Card::all()`.
    pub fn standard_52() -> Self {
        Deck {
            cards: Card::all().to_vec(),
        }
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Вернуть в колоду все 52 карты (без перемешивания).
    pub fn reset(&mut self) {
        self.cards.clear();
        self.cards.extend_from_slice(Card::all());
    }

    /// Перемешать через RNG движка.
    pub fn shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        rng.shuffle(&mut self.cards);
    }

    /// Собрать полную колоду и сразу перемешать.
    pub fn reset_and_shuffle<R: RandomSource>(&mut self, rng: &mut R) {
        self.reset();
        self.shuffle(rng);
    }

    /// Взять одну карту сверху колоды.
    pub fn draw_card(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Exhausted)
    }

    /// Взять n карт сверху. Если карт не хватает — ошибка, колода не трогается.
    pub fn draw_n(&mut self, n: usize) -> Result<Vec<Card>, DeckError> {
        if self.cards.len() < n {
            return Err(DeckError::Exhausted);
        }
        let at = self.cards.len() - n;
        let mut taken = self.cards.split_off(at);
        taken.reverse();
        Ok(taken)
    }

    /// Убрать из колоды уже использованные карты.
    pub fn remove_cards(&mut self, to_remove: &[Card]) {
        self.cards.retain(|c| !to_remove.contains(c));
    }
}
