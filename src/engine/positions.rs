use crate::domain::{PlayerAtTable, PlayerStatus, SeatIndex, Table};

/// Первое место по кругу от `start` (включая/исключая его), для которого
/// выполняется `pred`.
pub fn next_seat_where<F>(table: &Table, start: SeatIndex, include_start: bool, pred: F) -> Option<SeatIndex>
where
    F: Fn(&PlayerAtTable) -> bool,
{
    let max = table.seats.len();
    if max == 0 {
        return None;
    }

    let first = if include_start { 0 } else { 1 };
    (first..first + max)
        .map(|step| ((start as usize + step) % max) as SeatIndex)
        .find(|&idx| table.seat(idx).is_some_and(&pred))
}

/// Следующее место после `after`, которое может действовать
/// (не сфолдило, с картами, не в оллыне). Полный круг без находок – None.
/// Само `after` проверяется последним.
pub fn next_actionable_seat(table: &Table, after: SeatIndex) -> Option<SeatIndex> {
    next_seat_where(table, after, false, PlayerAtTable::is_actionable)
}

/// Места, играющие раздачу, по кругу начиная со `start`.
pub fn collect_participating_seats_from(table: &Table, start: SeatIndex) -> Vec<SeatIndex> {
    let max = table.seats.len();
    let participating = table.participating_seats();
    (0..max)
        .map(|step| ((start as usize + step) % max) as SeatIndex)
        .filter(|s| participating.contains(s))
        .collect()
}

/// Предложить следующую позицию дилера:
/// - если есть текущая кнопка – следующее играющее место;
/// - если нет – первое играющее место с 0.
pub fn next_dealer(table: &Table) -> Option<SeatIndex> {
    let can_play = |p: &PlayerAtTable| p.status != PlayerStatus::SittingOut && !p.stack.is_empty();
    match table.dealer_button {
        Some(button) => next_seat_where(table, button, false, can_play),
        None => next_seat_where(table, 0, true, can_play),
    }
}

/// Места блайндов для заданного дилера: (SB, BB).
/// Хедз-ап: дилер ставит малый блайнд.
pub fn blind_seats(table: &Table, dealer: SeatIndex) -> Option<(SeatIndex, SeatIndex)> {
    let order = collect_participating_seats_from(table, dealer);
    match order.len() {
        0 | 1 => None,
        2 => Some((order[0], order[1])),
        _ => Some((order[1], order[2])),
    }
}
