//! Интеграционные тесты для доменной модели (crate::domain).

use poker_core::domain::*;
use poker_core::engine::positions::{blind_seats, next_actionable_seat, next_dealer};
use poker_core::engine::EngineError;
use poker_core::infra::DeterministicRng;

//
// ====================== КОНФИГ ======================
//

#[test]
fn table_config_loads_from_json_with_defaults() {
    let json = r#"{
        "max_seats": 6,
        "stakes": { "small_blind": 50, "big_blind": 100, "ante_type": "Classic", "ante": 10 },
        "limit": "PotLimit",
        "rake": { "percent_bp": 500, "cap_in_small_blinds": 3 }
    }"#;

    let config = TableConfig::from_json_str(json).unwrap();
    assert_eq!(config.max_seats, 6);
    assert_eq!(config.stakes.big_blind, Chips(100));
    assert_eq!(config.limit, LimitType::PotLimit);
    assert_eq!(config.fixed_limit_raise_cap, 4);
    assert_eq!(config.rake.cap(Chips(50)), Some(Chips(150)));
    assert_eq!(config.time.base_action_secs, 20);
}

#[test]
fn table_config_rejects_bad_values() {
    let bad_seats = r#"{ "max_seats": 1,
        "stakes": { "small_blind": 50, "big_blind": 100, "ante_type": "None", "ante": 0 } }"#;
    assert!(matches!(
        TableConfig::from_json_str(bad_seats),
        Err(ConfigError::Invalid(_))
    ));

    let bad_blinds = r#"{ "max_seats": 6,
        "stakes": { "small_blind": 100, "big_blind": 50, "ante_type": "None", "ante": 0 } }"#;
    assert!(matches!(
        TableConfig::from_json_str(bad_blinds),
        Err(ConfigError::Invalid(_))
    ));

    assert!(matches!(
        TableConfig::from_json_str("{ not json"),
        Err(ConfigError::Parse(_))
    ));
}

//
// ====================== БЛАЙНДЫ И РЕЙК ======================
//

/// Тестируем BlindStructure: first_level, level_by_number, level_for_elapsed_minutes.
#[test]
fn blind_structure_level_selection() {
    let levels = vec![
        BlindLevel::new(1, Chips(25), Chips(50), Chips(0), AnteType::None, 10),
        BlindLevel::new(2, Chips(50), Chips(100), Chips(10), AnteType::Classic, 10),
        BlindLevel::new(3, Chips(75), Chips(150), Chips(25), AnteType::BigBlind, 20),
    ];
    let s = BlindStructure::new(levels);
    assert!(s.validate().is_ok());

    assert_eq!(s.first_level().unwrap().small_blind, Chips(25));
    assert_eq!(s.level_by_number(2).unwrap().big_blind, Chips(100));
    assert!(s.level_by_number(999).is_none());

    // Минуты считаем кумулятивно: [0..10) -> 1, [10..20) -> 2, [20..40) -> 3, дальше -> 3.
    assert_eq!(s.level_for_elapsed_minutes(0).unwrap().level, 1);
    assert_eq!(s.level_for_elapsed_minutes(10).unwrap().level, 2);
    assert_eq!(s.level_for_elapsed_minutes(25).unwrap().level, 3);
    assert_eq!(s.level_for_elapsed_minutes(999).unwrap().level, 3);
    assert_eq!(s.total_duration_minutes(), 40);

    // По раздачам: 10 раздач на уровень.
    assert_eq!(s.level_for_round(0).unwrap().level, 1);
    assert_eq!(s.level_for_round(15).unwrap().level, 2);
    assert_eq!(s.level_for_round(500).unwrap().level, 3);

    let stakes = TableStakes::from_level(s.level_by_number(3).unwrap());
    assert_eq!(stakes.ante_type, AnteType::BigBlind);
    assert_eq!(stakes.ante, Chips(25));
}

#[test]
fn blind_structure_validation_catches_gaps() {
    let s = BlindStructure::new(vec![
        BlindLevel::new(1, Chips(25), Chips(50), Chips(0), AnteType::None, 10),
        BlindLevel::new(3, Chips(50), Chips(100), Chips(0), AnteType::None, 10),
    ]);
    assert!(s.validate().is_err());
    assert!(BlindStructure::new(Vec::new()).validate().is_err());
}

#[test]
fn rake_rules() {
    let r = RakeSchedule::new(500, 3);
    assert_eq!(r.calculate_rake(Chips(400), Chips(10)), Chips(20));
    assert_eq!(r.calculate_rake(Chips(10_000), Chips(10)), Chips(30));
    // Банк меньше малого блайнда не облагается.
    assert_eq!(r.calculate_rake(Chips(9), Chips(10)), Chips::ZERO);
    assert_eq!(RakeSchedule::default().calculate_rake(Chips(1_000), Chips(10)), Chips::ZERO);
}

//
// ====================== КАРТЫ И КОЛОДА ======================
//

#[test]
fn card_parse_and_display() {
    let cards = parse_cards("Ah td 7C").unwrap();
    let shown: Vec<String> = cards.iter().map(ToString::to_string).collect();
    assert_eq!(shown, vec!["Ah", "Td", "7c"]);
    assert!("1h".parse::<Card>().is_err());
    assert!("Ahh".parse::<Card>().is_err());
}

#[test]
fn deck_draws_until_exhausted() {
    let mut deck = Deck::standard_52();
    let mut rng = DeterministicRng::from_seed(99);
    deck.shuffle(&mut rng);
    assert_eq!(deck.len(), 52);

    let hand = deck.draw_n(50).unwrap();
    assert_eq!(hand.len(), 50);
    assert_eq!(deck.draw_n(3), Err(DeckError::Exhausted));
    assert_eq!(deck.len(), 2);

    deck.draw_card().unwrap();
    deck.draw_card().unwrap();
    assert_eq!(deck.draw_card(), Err(DeckError::Exhausted));

    deck.reset();
    assert_eq!(deck.len(), 52);
}

#[test]
fn same_seed_gives_same_shuffle() {
    let mut a = Deck::standard_52();
    let mut b = Deck::standard_52();
    a.shuffle(&mut DeterministicRng::from_seed(5));
    b.shuffle(&mut DeterministicRng::from_seed(5));
    assert_eq!(a, b);
    assert_ne!(a, Deck::standard_52());
}

#[test]
fn pocket_holds_two_cards_only() {
    let mut p = PlayerAtTable::new(1, Chips(100));
    let cards = parse_cards("As Kd Qh").unwrap();
    p.give_card(cards[0]).unwrap();
    p.give_card(cards[1]).unwrap();
    assert!(matches!(
        p.give_card(cards[2]),
        Err(EngineError::InvalidHandState(_))
    ));
    assert_eq!(p.pocket_cards(), vec![cards[0], cards[1]]);
}

//
// ====================== ПОЗИЦИИ ======================
//

fn table_with_seats(seats: &[SeatIndex]) -> Table {
    let stakes = TableStakes::new(Chips(10), Chips(20), AnteType::None, Chips::ZERO);
    let mut t = Table::new(1, "POS".into(), TableConfig::new(6, stakes));
    for &s in seats {
        assert!(t.sit(s, PlayerAtTable::new(s as u64 + 1, Chips(1_000))));
    }
    t
}

#[test]
fn dealer_and_blinds_skip_empty_seats() {
    let mut t = table_with_seats(&[1, 3, 5]);
    assert_eq!(next_dealer(&t), Some(1));
    assert_eq!(blind_seats(&t, 1), Some((3, 5)));

    t.dealer_button = Some(5);
    assert_eq!(next_dealer(&t), Some(1));

    // Сидящий без фишек не может получить кнопку.
    t.seat_mut(1).unwrap().stack.clear();
    assert_eq!(next_dealer(&t), Some(3));
    assert!(!t.sit(3, PlayerAtTable::new(99, Chips(1))));
}

#[test]
fn actionable_scan_wraps_and_skips() {
    let mut t = table_with_seats(&[0, 2, 4]);
    let card = parse_cards("2c 3c").unwrap();
    for s in [0u8, 2, 4] {
        let p = t.seat_mut(s).unwrap();
        p.give_card(card[0]).unwrap();
        p.give_card(card[1]).unwrap();
    }
    t.seat_mut(2).unwrap().status = PlayerStatus::Folded;

    assert_eq!(next_actionable_seat(&t, 0), Some(4));
    assert_eq!(next_actionable_seat(&t, 4), Some(0));

    t.seat_mut(0).unwrap().status = PlayerStatus::AllIn;
    // Остался один – полный круг возвращает его же.
    assert_eq!(next_actionable_seat(&t, 4), Some(4));
    t.seat_mut(4).unwrap().status = PlayerStatus::Folded;
    assert_eq!(next_actionable_seat(&t, 4), None);
}
