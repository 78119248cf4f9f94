use crate::domain::card::Rank;

/// Битовая маска рангов.
///
/// Используем 13 бит (от 2 до A):
/// бит 0 = двойка, бит 12 = туз.
/// Повторяющиеся ранги схлопываются в один бит, поэтому пара внутри
/// стрита (две девятки в 8-9-T-J-Q) не ломает последовательность.
pub type RankMask = u16;

/// Маски всех возможных стритов, от wheel (A2345) до broadway (TJQKA).
/// Индекс + 5 = значение старшей карты стрита.
pub const STRAIGHT_MASKS: [RankMask; 10] = [
    // A2345 (wheel): туз считается единицей только здесь
    mask_from_ranks(&[Rank::Ace, Rank::Two, Rank::Three, Rank::Four, Rank::Five]),
    mask_from_ranks(&[Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six]),
    mask_from_ranks(&[Rank::Three, Rank::Four, Rank::Five, Rank::Six, Rank::Seven]),
    mask_from_ranks(&[Rank::Four, Rank::Five, Rank::Six, Rank::Seven, Rank::Eight]),
    mask_from_ranks(&[Rank::Five, Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine]),
    mask_from_ranks(&[Rank::Six, Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten]),
    mask_from_ranks(&[Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack]),
    mask_from_ranks(&[Rank::Eight, Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen]),
    mask_from_ranks(&[Rank::Nine, Rank::Ten, Rank::Jack, Rank::Queen, Rank::King]),
    mask_from_ranks(&[Rank::Ten, Rank::Jack, Rank::Queen, Rank::King, Rank::Ace]),
];

/// Получить битовую маску для одного ранга.
pub fn rank_to_bit(rank: Rank) -> RankMask {
    1u16 << (rank.value() - 2)
}

/// Маска по набору рангов.
pub fn rank_mask<I: IntoIterator<Item = Rank>>(ranks: I) -> RankMask {
    ranks.into_iter().fold(0, |m, r| m | rank_to_bit(r))
}

/// Построить маску из списка рангов (compile-time).
pub const fn mask_from_ranks(ranks: &[Rank]) -> RankMask {
    let mut mask: RankMask = 0;
    let mut i = 0;
    while i < ranks.len() {
        let idx = ranks[i] as u8 - 2;
        mask |= 1 << idx;
        i += 1;
    }
    mask
}

/// Найти стрит в битовой маске рангов.
/// Возвращает старшую карту стрита (для wheel – `Rank::Five`).
pub fn detect_straight(mask: RankMask) -> Option<Rank> {
    // Меньше пяти разных рангов – стрита быть не может.
    if mask.count_ones() < 5 {
        return None;
    }
    STRAIGHT_MASKS
        .iter()
        .enumerate()
        .rev()
        .find(|(_, sm)| mask & **sm == **sm)
        .and_then(|(i, _)| Rank::from_value(i as u8 + 5))
}
