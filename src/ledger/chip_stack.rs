use std::collections::BTreeSet;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::SeatIndex;
use crate::infra::ids::IdSequence;
use crate::ledger::denomination::{
    chips_to_value, merge_counts, recolorize_value, value_to_chips, ChipCounts, Denomination,
};
use crate::ledger::errors::LedgerError;

/// Стабильный идентификатор стопки. По нему упорядочивается захват
/// двух блокировок при переносе между стопками.
pub type LedgerId = u64;

static LEDGER_IDS: IdSequence = IdSequence::new(1);

/// Содержимое стопки. Все методы работают без блокировок –
/// вызывающий код уже держит мьютекс.
#[derive(Debug, Default)]
struct Holdings {
    chips: ChipCounts,
    value: Chips,
    participants: BTreeSet<SeatIndex>,
}

impl Holdings {
    fn deposit(&mut self, chips: &ChipCounts, participant: Option<SeatIndex>) {
        merge_counts(&mut self.chips, chips);
        self.value += chips_to_value(chips);
        if let Some(seat) = participant {
            self.participants.insert(seat);
        }
    }

    fn withdraw_value(&mut self, value: Chips) -> Result<ChipCounts, LedgerError> {
        if value > self.value {
            return Err(LedgerError::InsufficientFunds {
                requested: value,
                available: self.value,
            });
        }
        if value.is_zero() {
            return Ok(ChipCounts::new());
        }

        let taken = match self.plan_greedy(value) {
            Some(plan) => plan,
            None => {
                // Нужного «размена» нет – перекрашиваемся и пробуем ещё раз.
                self.recolorize();
                match self.plan_greedy(value) {
                    Some(plan) => plan,
                    None => return Ok(self.take_with_change(value)),
                }
            }
        };

        self.remove(&taken);
        Ok(taken)
    }

    /// Жадный план снятия ровно `value`, только из имеющихся фишек.
    fn plan_greedy(&self, value: Chips) -> Option<ChipCounts> {
        let mut plan = ChipCounts::new();
        let mut remaining = value.0;
        for (denom, held) in self.chips.iter().rev() {
            let face = denom.face_value();
            let n = (remaining / face).min(*held);
            if n > 0 {
                plan.insert(*denom, n);
                remaining -= n * face;
            }
        }
        (remaining == 0).then_some(plan)
    }

    /// Снять `value`, разменяв одну фишку. После жадного прохода все
    /// оставшиеся фишки дороже остатка, поэтому берём самую дешёвую из них,
    /// а сдачу кладём обратно.
    fn take_with_change(&mut self, value: Chips) -> ChipCounts {
        let mut taken = ChipCounts::new();
        let mut remaining = value.0;
        for (denom, held) in self.chips.iter().rev() {
            let face = denom.face_value();
            let n = (remaining / face).min(*held);
            if n > 0 {
                taken.insert(*denom, n);
                remaining -= n * face;
            }
        }
        self.remove(&taken);

        if remaining > 0 {
            let broken = self
                .chips
                .keys()
                .copied()
                .find(|d| d.face_value() > remaining);
            if let Some(denom) = broken {
                let mut one = ChipCounts::new();
                one.insert(denom, 1);
                self.remove(&one);
                let change = value_to_chips(Chips(denom.face_value() - remaining));
                merge_counts(&mut self.chips, &change);
                self.value += chips_to_value(&change);
                merge_counts(&mut taken, &value_to_chips(Chips(remaining)));
            }
        }
        taken
    }

    fn withdraw_chips(&mut self, wanted: &ChipCounts) -> Result<Chips, LedgerError> {
        for (denom, requested) in wanted {
            let held = self.chips.get(denom).copied().unwrap_or(0);
            if *requested > held {
                return Err(LedgerError::ChipsNotPresent {
                    denomination: *denom,
                    requested: *requested,
                    held,
                });
            }
        }
        self.remove(wanted);
        Ok(chips_to_value(wanted))
    }

    /// Снять заранее проверенный набор фишек.
    fn remove(&mut self, chips: &ChipCounts) {
        for (denom, n) in chips {
            if let Some(held) = self.chips.get_mut(denom) {
                *held -= (*n).min(*held);
                if *held == 0 {
                    self.chips.remove(denom);
                }
            }
        }
        self.value -= chips_to_value(chips);
    }

    fn recolorize(&mut self) {
        self.chips = recolorize_value(self.value);
    }

    fn clear(&mut self) -> Chips {
        let value = self.value;
        self.chips.clear();
        self.value = Chips::ZERO;
        self.participants.clear();
        value
    }
}

/// Стопка фишек (стек игрока, его ставка на улице, банк или сайд-пот).
///
/// Каждая стопка защищена своим мьютексом, все публичные операции
/// держат его до конца. Перенос между двумя стопками захватывает обе
/// блокировки в порядке возрастания `LedgerId`.
pub struct ChipStack {
    id: LedgerId,
    inner: Mutex<Holdings>,
}

/// Снимок стопки для истории/отладки.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerSnapshot {
    pub id: LedgerId,
    pub value: Chips,
    pub chips: Vec<(Denomination, u64)>,
    pub participants: Vec<SeatIndex>,
}

impl ChipStack {
    pub fn new() -> Self {
        Self {
            id: LEDGER_IDS.next(),
            inner: Mutex::new(Holdings::default()),
        }
    }

    /// Новая стопка на сумму `value` в «игровом» разбросе номиналов.
    pub fn from_value(value: Chips) -> Self {
        let stack = Self::new();
        stack.deposit(&recolorize_value(value), None);
        stack
    }

    pub fn id(&self) -> LedgerId {
        self.id
    }

    // Содержимое согласовано после каждой операции, поэтому после паники
    // в другом потоке мьютекс можно смело «отравленным» не считать.
    fn holdings(&self) -> MutexGuard<'_, Holdings> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Захватить две разные стопки в каноническом порядке.
    fn lock_pair<'a>(
        a: &'a ChipStack,
        b: &'a ChipStack,
    ) -> (MutexGuard<'a, Holdings>, MutexGuard<'a, Holdings>) {
        if a.id < b.id {
            let ga = a.holdings();
            let gb = b.holdings();
            (ga, gb)
        } else {
            let gb = b.holdings();
            let ga = a.holdings();
            (ga, gb)
        }
    }

    /// Текущая стоимость стопки.
    pub fn value(&self) -> Chips {
        self.holdings().value
    }

    pub fn is_empty(&self) -> bool {
        self.holdings().value.is_zero()
    }

    /// Копия набора фишек.
    pub fn chips(&self) -> ChipCounts {
        self.holdings().chips.clone()
    }

    /// Кто вносил фишки в эту стопку.
    pub fn participants(&self) -> BTreeSet<SeatIndex> {
        self.holdings().participants.clone()
    }

    pub fn add_participant(&self, seat: SeatIndex) {
        self.holdings().participants.insert(seat);
    }

    pub fn snapshot(&self) -> LedgerSnapshot {
        let h = self.holdings();
        LedgerSnapshot {
            id: self.id,
            value: h.value,
            chips: h.chips.iter().map(|(d, n)| (*d, *n)).collect(),
            participants: h.participants.iter().copied().collect(),
        }
    }

    /// Положить фишки и запомнить участника.
    pub fn deposit(&self, chips: &ChipCounts, participant: Option<SeatIndex>) {
        self.holdings().deposit(chips, participant);
    }

    /// Положить сумму (жадным набором номиналов).
    pub fn deposit_value(&self, value: Chips, participant: Option<SeatIndex>) {
        self.deposit(&value_to_chips(value), participant);
    }

    /// Снять фишки ровно на `value`, при необходимости разменяв.
    pub fn withdraw_value(&self, value: Chips) -> Result<ChipCounts, LedgerError> {
        self.holdings().withdraw_value(value)
    }

    /// Снять конкретные фишки. Без авто-размена: нет фишек – ошибка.
    pub fn withdraw_chips(&self, chips: &ChipCounts) -> Result<Chips, LedgerError> {
        self.holdings().withdraw_chips(chips)
    }

    /// Перенести `value` в `target`. false – если фишек не хватает
    /// (частичного переноса не бывает).
    pub fn move_value(&self, target: &ChipStack, value: Chips, participant: Option<SeatIndex>) -> bool {
        self.transfer(target, value, participant).is_ok()
    }

    /// То же, что `move_value`, но с причиной отказа.
    pub fn transfer(
        &self,
        target: &ChipStack,
        value: Chips,
        participant: Option<SeatIndex>,
    ) -> Result<(), LedgerError> {
        if self.id == target.id {
            let mut h = self.holdings();
            if value > h.value {
                return Err(LedgerError::InsufficientFunds {
                    requested: value,
                    available: h.value,
                });
            }
            if let Some(seat) = participant {
                h.participants.insert(seat);
            }
            return Ok(());
        }

        let (mut src, mut dst) = Self::lock_pair(self, target);
        let chips = src.withdraw_value(value)?;
        dst.deposit(&chips, participant);
        Ok(())
    }

    /// Перенести всё в `target`, очистив себя (включая участников).
    /// Возвращает перенесённую сумму.
    pub fn move_all(&self, target: &ChipStack, participant: Option<SeatIndex>) -> Chips {
        if self.id == target.id {
            return self.value();
        }

        let (mut src, mut dst) = Self::lock_pair(self, target);
        let chips = std::mem::take(&mut src.chips);
        let moved = src.clear();
        dst.deposit(&chips, participant);
        moved
    }

    /// Пересобрать текущую сумму «игровым» набором номиналов.
    pub fn recolorize(&self) {
        let mut h = self.holdings();
        h.recolorize();
        tracing::trace!(ledger = self.id, value = h.value.0, "recolorized");
    }

    /// Очистить стопку. Возвращает сумму, которая в ней была.
    pub fn clear(&self) -> Chips {
        self.holdings().clear()
    }
}

impl Default for ChipStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ChipStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let h = self.holdings();
        f.debug_struct("ChipStack")
            .field("id", &self.id)
            .field("value", &h.value)
            .field("chips", &h.chips)
            .field("participants", &h.participants)
            .finish()
    }
}
