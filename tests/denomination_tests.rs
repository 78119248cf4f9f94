//! Тесты «алгебры номиналов» (crate::ledger::denomination).

use poker_core::domain::chips::Chips;
use poker_core::ledger::{
    chip_count, chips_to_value, max_count_for_denomination, recolorize_value, value_to_chips, ChipCounts,
    Denomination,
};

/// Набор разношёрстных кучек фишек для проверок.
fn sample_counts() -> Vec<ChipCounts> {
    vec![
        ChipCounts::new(),
        [(Denomination::One, 1)].into_iter().collect(),
        [(Denomination::One, 250), (Denomination::Five, 3)].into_iter().collect(),
        [(Denomination::OneHundredThousand, 2), (Denomination::TwentyFive, 7)]
            .into_iter()
            .collect(),
        Denomination::ALL.iter().map(|d| (*d, 3)).collect(),
    ]
}

#[test]
fn face_values_match_ladder() {
    let faces: Vec<u64> = Denomination::ALL.iter().map(|d| d.face_value()).collect();
    assert_eq!(
        faces,
        vec![1, 5, 10, 25, 50, 100, 500, 1_000, 5_000, 25_000, 100_000]
    );
    assert_eq!(Denomination::from_face_value(25), Some(Denomination::TwentyFive));
    assert_eq!(Denomination::from_face_value(2), None);
}

#[test]
fn recolorize_preserves_value_for_any_input() {
    for chips in sample_counts() {
        let value = chips_to_value(&chips);
        assert_eq!(chips_to_value(&recolorize_value(value)), value);
    }
    for v in [0u64, 1, 4, 99, 100, 101, 1_234, 99_999, 1_000_000] {
        assert_eq!(chips_to_value(&recolorize_value(Chips(v))), Chips(v), "value {v}");
    }
}

#[test]
fn value_to_chips_round_trip_keeps_value_not_structure() {
    for chips in sample_counts() {
        let back = value_to_chips(chips_to_value(&chips));
        assert_eq!(chips_to_value(&back), chips_to_value(&chips));
    }

    // 250 единичек превращаются в две сотни и полтинник.
    let ones: ChipCounts = [(Denomination::One, 250)].into_iter().collect();
    let back = value_to_chips(chips_to_value(&ones));
    assert_eq!(back.get(&Denomination::OneHundred), Some(&2));
    assert_eq!(back.get(&Denomination::Fifty), Some(&1));
    assert_eq!(chip_count(&back), 3);
}

#[test]
fn recolorize_respects_caps_before_remainder() {
    let total = Chips(10_000);
    let chips = recolorize_value(total);

    // Единички ограничены абсолютным лимитом, остаток их не добавляет.
    assert_eq!(chips.get(&Denomination::One), Some(&20));
    assert_eq!(chips_to_value(&chips), total);
    // Разброс: тысяч не больше 10 000 / (1000 * 5) в первом проходе.
    assert_eq!(max_count_for_denomination(Denomination::OneThousand, total), 2);
    assert!(chip_count(&chips) > chip_count(&value_to_chips(total)));
}
