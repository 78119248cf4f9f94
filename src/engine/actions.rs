use std::collections::{HashMap, VecDeque};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::hand::Street;
use crate::domain::{Chips, PlayerId, SeatIndex};

/// Чем закончился ход места.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum SeatAction {
    Folded,
    /// Call (или check, если доплачивать нечего).
    Called,
    Raised,
    /// Поставил весь стек (как колл, рейз или колл «на меньшее»).
    AllIn,
}

/// Запрос решения у игрока.
///
/// Все суммы – «итоговая ставка места на этой улице», а не доплата.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionRequest {
    pub seat: SeatIndex,
    pub player_id: PlayerId,
    pub street: Street,
    /// До какой суммы нужно дотянуть ставку, чтобы остаться в игре.
    pub call_value: Chips,
    /// Сколько место уже поставило на этой улице.
    pub committed: Chips,
    /// Стек места (без текущей ставки).
    pub stack: Chips,
    /// Минимальная итоговая ставка для рейза.
    pub min_raise: Chips,
    /// Максимальная итоговая ставка для рейза.
    pub max_raise: Chips,
    /// Дедлайн ответа; по истечении – фолд.
    pub timeout: Duration,
}

impl ActionRequest {
    /// Сколько нужно доплатить до колла.
    pub fn to_call(&self) -> Chips {
        self.call_value.saturating_sub(self.committed)
    }

    /// Итоговая ставка при оллыне.
    pub fn all_in_total(&self) -> Chips {
        self.committed + self.stack
    }

    pub fn can_raise(&self) -> bool {
        self.max_raise > self.call_value && self.all_in_total() > self.call_value
    }
}

/// Источник решений игроков.
///
/// Возвращает итоговую ставку места на улице, `None` – фолд.
/// Реализация может блокироваться, но не дольше `request.timeout`.
pub trait ActionProvider {
    fn request_action(&mut self, request: &ActionRequest) -> Option<Chips>;
}

impl<F> ActionProvider for F
where
    F: FnMut(&ActionRequest) -> Option<Chips>,
{
    fn request_action(&mut self, request: &ActionRequest) -> Option<Chips> {
        self(request)
    }
}

/// Заготовленное решение для `ScriptedActions`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    Fold,
    CheckCall,
    RaiseTo(Chips),
    AllIn,
    /// Ровно такая итоговая ставка (без интерпретации).
    Commit(Chips),
}

impl Decision {
    pub fn resolve(self, request: &ActionRequest) -> Option<Chips> {
        match self {
            Decision::Fold => None,
            Decision::CheckCall => Some(request.call_value),
            Decision::RaiseTo(total) | Decision::Commit(total) => Some(total),
            Decision::AllIn => Some(request.all_in_total()),
        }
    }
}

/// Сценарные решения по местам; когда очередь места пуста – check/call.
#[derive(Clone, Debug, Default)]
pub struct ScriptedActions {
    queues: HashMap<SeatIndex, VecDeque<Decision>>,
    /// Журнал всех запросов (удобно проверять в тестах).
    pub requests: Vec<ActionRequest>,
}

impl ScriptedActions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, seat: SeatIndex, decision: Decision) -> &mut Self {
        self.queues.entry(seat).or_default().push_back(decision);
        self
    }

    pub fn with(mut self, seat: SeatIndex, decisions: &[Decision]) -> Self {
        self.queues.entry(seat).or_default().extend(decisions.iter().copied());
        self
    }
}

impl ActionProvider for ScriptedActions {
    fn request_action(&mut self, request: &ActionRequest) -> Option<Chips> {
        self.requests.push(request.clone());
        let decision = self
            .queues
            .get_mut(&request.seat)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Decision::CheckCall);
        decision.resolve(request)
    }
}

/// Решения приходят по каналам (по одному на место), ожидание ограничено
/// дедлайном хода. Молчание или закрытый канал = фолд.
#[derive(Debug, Default)]
pub struct ChannelActions {
    receivers: HashMap<SeatIndex, Receiver<Option<Chips>>>,
}

impl ChannelActions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Подключить место; возвращает отправителя для его решений.
    pub fn connect(&mut self, seat: SeatIndex) -> Sender<Option<Chips>> {
        let (tx, rx) = mpsc::channel();
        self.receivers.insert(seat, rx);
        tx
    }
}

impl ActionProvider for ChannelActions {
    fn request_action(&mut self, request: &ActionRequest) -> Option<Chips> {
        let rx = self.receivers.get(&request.seat)?;

        match rx.recv_timeout(request.timeout) {
            Ok(decision) => decision,
            Err(RecvTimeoutError::Timeout) => {
                tracing::warn!(seat = request.seat, "action timed out");
                None
            }
            Err(RecvTimeoutError::Disconnected) => {
                tracing::warn!(seat = request.seat, "action channel closed");
                None
            }
        }
    }
}
