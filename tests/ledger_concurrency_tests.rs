//! Параллельный доступ к стопкам фишек.
//!
//! Переносы в противоположных направлениях между одними и теми же
//! стопками не должны зависать, сумма фишек не должна меняться.

use std::thread;

use poker_core::domain::chips::Chips;
use poker_core::ledger::ChipStack;

#[test]
fn opposite_transfers_do_not_deadlock() {
    let a = ChipStack::from_value(Chips(100_000));
    let b = ChipStack::from_value(Chips(100_000));

    thread::scope(|scope| {
        scope.spawn(|| {
            for _ in 0..2_000 {
                a.move_value(&b, Chips(7), None);
            }
        });
        scope.spawn(|| {
            for _ in 0..2_000 {
                b.move_value(&a, Chips(13), None);
            }
        });
        scope.spawn(|| {
            for _ in 0..2_000 {
                // Фоновое чтение (например, перерисовка стека).
                let _ = a.value() + b.value();
            }
        });
    });

    assert_eq!(a.value() + b.value(), Chips(200_000));
    assert_eq!(a.value(), Chips(100_000 - 2_000 * 7 + 2_000 * 13));
}

#[test]
fn ring_of_transfers_conserves_total() {
    let stacks: Vec<ChipStack> = (0..4).map(|_| ChipStack::from_value(Chips(50_000))).collect();

    thread::scope(|scope| {
        for i in 0..stacks.len() {
            let stacks = &stacks;
            scope.spawn(move || {
                let from = &stacks[i];
                let to = &stacks[(i + 1) % stacks.len()];
                for n in 0..1_000u64 {
                    from.move_value(to, Chips(n % 97 + 1), Some(i as u8));
                    if n % 100 == 0 {
                        to.recolorize();
                    }
                    if n % 250 == 0 {
                        to.move_all(from, None);
                    }
                }
            });
        }
    });

    let total: Chips = stacks.iter().map(ChipStack::value).sum();
    assert_eq!(total, Chips(200_000));
}
