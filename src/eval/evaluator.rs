use crate::domain::card::{Card, Rank, Suit};
use crate::domain::hand::{dealt_cards, CardSlot};

use super::hand_rank::{HandCategory, HandScore};
use super::lookup_tables::{detect_straight, rank_mask};

/// Главная функция: лучшая рука из общих (0..=5) и карманных (0..=2) карт.
///
/// Ошибок нет: если карт меньше пяти, возвращается лучшая доступная
/// категория (пара, сет, старшая карта…) по тем картам, что есть.
pub fn score(community: &[Card], pocket: &[Card]) -> HandScore {
    let mut cards: Vec<Card> = Vec::with_capacity(community.len() + pocket.len());
    cards.extend_from_slice(community);
    cards.extend_from_slice(pocket);
    score_cards(cards)
}

/// То же самое, но по слотам (сданы не все карты борда – не беда).
pub fn score_slots(community: &[CardSlot], pocket: &[CardSlot]) -> HandScore {
    score(&dealt_cards(community), &dealt_cards(pocket))
}

fn score_cards(mut cards: Vec<Card>) -> HandScore {
    cards.sort_by(|a, b| b.cmp_rank(a));

    if let Some(s) = straight_flush(&cards) {
        return s;
    }

    let groups = rank_groups(&cards);

    if let Some(s) = four_of_a_kind(&cards, &groups) {
        return s;
    }
    if let Some(s) = full_house(&groups) {
        return s;
    }
    if let Some(s) = flush(&cards) {
        return s;
    }
    if let Some(high) = detect_straight(rank_mask(cards.iter().map(|c| c.rank))) {
        return HandScore::new(HandCategory::Straight, vec![high]);
    }
    if let Some(s) = three_of_a_kind(&cards, &groups) {
        return s;
    }
    if let Some(s) = two_pair(&cards, &groups) {
        return s;
    }
    if let Some(s) = one_pair(&cards, &groups) {
        return s;
    }

    HandScore::new(HandCategory::HighCard, kickers(&cards, &[], 5))
}

/// Ранги по убыванию вместе с количеством карт каждого ранга.
fn rank_groups(sorted: &[Card]) -> Vec<(Rank, u8)> {
    let mut groups: Vec<(Rank, u8)> = Vec::with_capacity(sorted.len());
    for card in sorted {
        match groups.last_mut() {
            Some((rank, n)) if *rank == card.rank => *n += 1,
            _ => groups.push((card.rank, 1)),
        }
    }
    groups
}

/// Ранги карт одной масти (уже по убыванию), если их хотя бы пять.
fn flush_ranks(sorted: &[Card]) -> Option<Vec<Rank>> {
    Suit::ALL.into_iter().find_map(|suit| {
        let ranks: Vec<Rank> = sorted
            .iter()
            .filter(|c| c.suit == suit)
            .map(|c| c.rank)
            .collect();
        (ranks.len() >= 5).then_some(ranks)
    })
}

/// Лучшие `n` рангов, не входящих в `exclude` (по убыванию).
fn kickers(sorted: &[Card], exclude: &[Rank], n: usize) -> Vec<Rank> {
    sorted
        .iter()
        .map(|c| c.rank)
        .filter(|r| !exclude.contains(r))
        .take(n)
        .collect()
}

fn straight_flush(sorted: &[Card]) -> Option<HandScore> {
    let ranks = flush_ranks(sorted)?;
    let high = detect_straight(rank_mask(ranks))?;
    Some(if high == Rank::Ace {
        HandScore::new(HandCategory::RoyalFlush, vec![Rank::Ace])
    } else {
        HandScore::new(HandCategory::StraightFlush, vec![high])
    })
}

fn four_of_a_kind(sorted: &[Card], groups: &[(Rank, u8)]) -> Option<HandScore> {
    let quad = groups.iter().find(|(_, n)| *n >= 4)?.0;
    let mut tie_break = vec![quad];
    tie_break.extend(kickers(sorted, &[quad], 1));
    Some(HandScore::new(HandCategory::FourOfAKind, tie_break))
}

fn full_house(groups: &[(Rank, u8)]) -> Option<HandScore> {
    let trips = groups.iter().find(|(_, n)| *n >= 3)?.0;
    // Вторым может быть и второй сет – от него берётся пара.
    let pair = groups.iter().find(|(r, n)| *r != trips && *n >= 2)?.0;
    Some(HandScore::new(HandCategory::FullHouse, vec![trips, pair]))
}

fn flush(sorted: &[Card]) -> Option<HandScore> {
    let mut ranks = flush_ranks(sorted)?;
    ranks.truncate(5);
    Some(HandScore::new(HandCategory::Flush, ranks))
}

fn three_of_a_kind(sorted: &[Card], groups: &[(Rank, u8)]) -> Option<HandScore> {
    let trips = groups.iter().find(|(_, n)| *n == 3)?.0;
    let mut tie_break = vec![trips];
    tie_break.extend(kickers(sorted, &[trips], 2));
    Some(HandScore::new(HandCategory::ThreeOfAKind, tie_break))
}

fn two_pair(sorted: &[Card], groups: &[(Rank, u8)]) -> Option<HandScore> {
    let mut pairs = groups.iter().filter(|(_, n)| *n == 2).map(|(r, _)| *r);
    let high = pairs.next()?;
    let low = pairs.next()?;
    let mut tie_break = vec![high, low];
    tie_break.extend(kickers(sorted, &[high, low], 1));
    Some(HandScore::new(HandCategory::TwoPair, tie_break))
}

fn one_pair(sorted: &[Card], groups: &[(Rank, u8)]) -> Option<HandScore> {
    let pair = groups.iter().find(|(_, n)| *n == 2)?.0;
    let mut tie_break = vec![pair];
    tie_break.extend(kickers(sorted, &[pair], 3));
    Some(HandScore::new(HandCategory::OnePair, tie_break))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::parse_cards;

    fn s(board: &str, pocket: &str) -> HandScore {
        score(&parse_cards(board).unwrap(), &parse_cards(pocket).unwrap())
    }

    #[test]
    fn rank_groups_are_descending() {
        let mut cards = parse_cards("2c 9d 2h Kc 9s").unwrap();
        cards.sort_by(|a, b| b.cmp_rank(a));
        assert_eq!(
            rank_groups(&cards),
            vec![(Rank::King, 1), (Rank::Nine, 2), (Rank::Two, 2)]
        );
    }

    #[test]
    fn paired_straight_is_not_double_counted() {
        let sc = s("8c 9d Th Js Qc", "9h 2d");
        assert_eq!(sc.category, HandCategory::Straight);
        assert_eq!(sc.tie_break, vec![Rank::Queen]);
    }

    #[test]
    fn empty_hand_is_empty_high_card() {
        let sc = score(&[], &[]);
        assert_eq!(sc.category, HandCategory::HighCard);
        assert!(sc.tie_break.is_empty());
    }
}
