//! Интеграционные тесты для оценки рук (crate::eval).
//!
//! Проверяем:
//! - эталонные сценарии (фулл-хаус на двух сетах, старшая карта);
//! - wheel-стрит и wheel-стрит-флеш;
//! - полный порядок категорий и равенство одинаковых рук разных мастей.

use poker_core::domain::card::{parse_cards, Card, Rank};
use poker_core::domain::hand::CardSlot;
use poker_core::eval::{score, score_slots, HandCategory, HandScore};

fn s(board: &str, pocket: &str) -> HandScore {
    score(&parse_cards(board).unwrap(), &parse_cards(pocket).unwrap())
}

//
// ====================== ЭТАЛОННЫЕ СЦЕНАРИИ ======================
//

/// Борд 3♦ 2♥ Q♥ 2♠ 3♠ + карман 3♥ 2♣ → фулл-хаус тройки на двойках.
#[test]
fn full_house_from_two_sets() {
    let sc = s("3d 2h Qh 2s 3s", "3h 2c");
    assert_eq!(sc.category, HandCategory::FullHouse);
    assert_eq!(sc.tie_break, vec![Rank::Three, Rank::Two]);
}

/// Борд 2♥ 3♦ 5♣ 7♠ 9♥ + карман 8♥ A♦ → старшая карта [A, 9, 8, 7, 5].
#[test]
fn high_card_takes_top_five() {
    let sc = s("2h 3d 5c 7s 9h", "8h Ad");
    assert_eq!(sc.category, HandCategory::HighCard);
    let values: Vec<u8> = sc.tie_break.iter().map(|r| r.value()).collect();
    assert_eq!(values, vec![14, 9, 8, 7, 5]);
}

//
// ====================== WHEEL ======================
//

#[test]
fn wheel_is_five_high_straight() {
    let sc = s("Ah 2d 3c 4s 9h", "5c Kd");
    assert_eq!(sc.category, HandCategory::Straight);
    assert_eq!(sc.tie_break, vec![Rank::Five]);

    // Шестёрка сверху – уже стрит до шестёрки.
    let six_high = s("Ah 2d 3c 4s 6h", "5c Kd");
    assert_eq!(six_high.tie_break, vec![Rank::Six]);
    assert!(six_high > sc);
}

#[test]
fn suited_wheel_is_straight_flush_not_royal() {
    let sc = s("Ah 2h 3h 4h 9c", "5h Kd");
    assert_eq!(sc.category, HandCategory::StraightFlush);
    assert_eq!(sc.tie_break, vec![Rank::Five]);
}

//
// ====================== ПОРЯДОК И НИЧЬИ ======================
//

#[test]
fn royal_flushes_of_different_suits_are_equal() {
    let hearts = s("Ah Kh Qh Jh Th", "2c 3d");
    let spades = s("As Ks Qs Js Ts", "2h 3h");
    assert_eq!(hearts.category, HandCategory::RoyalFlush);
    assert_eq!(hearts, spades);
}

#[test]
fn categories_are_totally_ordered() {
    let hands = [
        s("2h 5d 9c Js Kh", "3c 7d"), // старшая карта
        s("2h 2d 9c Js Kh", "3c 7d"), // пара
        s("2h 2d 9c 9s Kh", "3c 7d"), // две пары
        s("2h 2d 2c Js Kh", "3c 7d"), // сет
        s("2h 3d 4c 5s Kh", "6c 9d"), // стрит
        s("2h 5h 9h Jh Kd", "3h 7d"), // флеш
        s("2h 2d 2c Js Jh", "3c 7d"), // фулл-хаус
        s("2h 2d 2c 2s Kh", "3c 7d"), // каре
        s("2h 3h 4h 5h Kd", "6h 9d"), // стрит-флеш
        s("Ah Kh Qh Jh 2d", "Th 9d"), // роял
    ];
    for pair in hands.windows(2) {
        assert!(pair[0] < pair[1], "{} должно быть слабее {}", pair[0], pair[1]);
    }
    let categories: Vec<HandCategory> = hands.iter().map(|h| h.category).collect();
    let mut sorted = categories.clone();
    sorted.sort();
    sorted.dedup();
    assert_eq!(categories, sorted);
}

#[test]
fn kickers_break_ties_inside_category() {
    let better = s("Kh Kd 9c 5s 2h", "Ac 3d");
    let worse = s("Kh Kd 9c 5s 2h", "Qc 3d");
    assert_eq!(better.category, HandCategory::OnePair);
    assert_eq!(better.tie_break, vec![Rank::King, Rank::Ace, Rank::Nine, Rank::Five]);
    assert!(better > worse);

    let split_a = s("Kh Kd 9c 5s 2h", "3c 4d");
    let split_b = s("Kh Kd 9c 5s 2h", "3h 4s");
    assert_eq!(split_a, split_b);
}

#[test]
fn two_pair_keeps_best_two_of_three_pairs() {
    let sc = s("Jh Jd 4c 4s 9h", "9c Ad");
    assert_eq!(sc.category, HandCategory::TwoPair);
    assert_eq!(sc.tie_break, vec![Rank::Jack, Rank::Nine, Rank::Ace]);
}

#[test]
fn four_of_a_kind_beats_full_house_on_same_board() {
    let quads = s("7h 7d 7c Ks Kh", "7s 2d");
    let boat = s("7h 7d 7c Ks Kh", "Kd 2d");
    assert_eq!(quads.category, HandCategory::FourOfAKind);
    assert_eq!(quads.tie_break, vec![Rank::Seven, Rank::King]);
    assert_eq!(boat.category, HandCategory::FullHouse);
    assert_eq!(boat.tie_break, vec![Rank::King, Rank::Seven]);
    assert!(quads > boat);
}

//
// ====================== НЕПОЛНЫЙ БОРД ======================
//

/// Префлоп: только карманная пара.
#[test]
fn partial_board_scores_what_is_dealt() {
    let pocket = [
        CardSlot::Dealt("Qs".parse::<Card>().unwrap()),
        CardSlot::Dealt("Qd".parse::<Card>().unwrap()),
    ];
    let sc = score_slots(&[CardSlot::Empty; 5], &pocket);
    assert_eq!(sc.category, HandCategory::OnePair);
    assert_eq!(sc.tie_break, vec![Rank::Queen]);
    assert_eq!(sc.describe(), "One pair, Qs");
}
