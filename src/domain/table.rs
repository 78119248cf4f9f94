use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::blinds::{AnteType, BlindLevel};
use crate::domain::card::Card;
use crate::domain::chips::Chips;
use crate::domain::hand::{dealt_cards, CardSlot, Street};
use crate::domain::player::{PlayerAtTable, PlayerStatus};
use crate::domain::rake::RakeSchedule;
use crate::domain::{HandId, TableId};
use crate::ledger::ChipStack;
use crate::time_ctrl::{TimeController, TimeRules};

/// Индекс места за столом (0..max_seats-1).
pub type SeatIndex = u8;

/// Ошибки конфигурации стола / структуры блайндов.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Не удалось разобрать конфиг: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Некорректный конфиг: {0}")]
    Invalid(String),
}

/// Тип лимита ставок.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum LimitType {
    /// Рейз любого размера, минимум – удвоение текущей ставки.
    #[default]
    NoLimit,
    /// Рейз не больше банка (с учётом колла).
    PotLimit,
    /// Фиксированный размер рейза и лимит рейзов на улицу.
    FixedLimit,
}

fn default_raise_cap() -> u32 {
    4
}

/// Конфиг стола: сколько мест, какие лимиты, анте, рейк и тайминг.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableConfig {
    /// Максимальное количество мест за столом (обычно 2–9).
    pub max_seats: u8,
    /// Размеры блайндов/анте.
    pub stakes: TableStakes,
    #[serde(default)]
    pub limit: LimitType,
    /// Для fixed-limit: сколько ставок/рейзов на улицу (bet, raise, re-raise, cap).
    #[serde(default = "default_raise_cap")]
    pub fixed_limit_raise_cap: u32,
    #[serde(default)]
    pub rake: RakeSchedule,
    #[serde(default)]
    pub time: TimeRules,
}

impl TableConfig {
    pub fn new(max_seats: u8, stakes: TableStakes) -> Self {
        Self {
            max_seats,
            stakes,
            limit: LimitType::NoLimit,
            fixed_limit_raise_cap: default_raise_cap(),
            rake: RakeSchedule::default(),
            time: TimeRules::default(),
        }
    }

    /// Загрузить конфиг из JSON и сразу проверить.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TableConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=10).contains(&self.max_seats) {
            return Err(ConfigError::Invalid(format!(
                "max_seats = {}, ожидается 2..=10",
                self.max_seats
            )));
        }
        if self.stakes.big_blind.is_zero() || self.stakes.big_blind < self.stakes.small_blind {
            return Err(ConfigError::Invalid(format!(
                "big_blind ({}) должен быть > 0 и >= small_blind ({})",
                self.stakes.big_blind, self.stakes.small_blind
            )));
        }
        if self.limit == LimitType::FixedLimit && self.fixed_limit_raise_cap == 0 {
            return Err(ConfigError::Invalid("fixed_limit_raise_cap = 0".into()));
        }
        self.rake.validate()
    }
}

/// Стейки стола (SB/BB/ante).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct TableStakes {
    pub small_blind: Chips,
    pub big_blind: Chips,
    pub ante_type: AnteType,
    pub ante: Chips,
}

impl TableStakes {
    pub fn new(sb: Chips, bb: Chips, ante_type: AnteType, ante: Chips) -> Self {
        Self {
            small_blind: sb,
            big_blind: bb,
            ante_type,
            ante,
        }
    }

    /// Стейки из уровня блайндов (турнирное расписание).
    pub fn from_level(level: &BlindLevel) -> Self {
        Self::new(level.small_blind, level.big_blind, level.ante_type, level.ante)
    }
}

/// Основное состояние стола.
///
/// Стол владеет местами и центральными банками; места ссылаются на
/// стол только через индекс `SeatIndex`.
#[derive(Debug)]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub config: TableConfig,

    /// Места за столом: индекс вектора = SeatIndex.
    /// None – место пустое.
    pub seats: Vec<Option<PlayerAtTable>>,

    /// Общие карты борда.
    pub board: [CardSlot; 5],

    pub dealer_button: Option<SeatIndex>,
    pub small_blind_seat: Option<SeatIndex>,
    pub big_blind_seat: Option<SeatIndex>,

    /// ID текущей раздачи (если она идёт).
    pub current_hand_id: Option<HandId>,
    pub street: Street,
    pub hand_in_progress: bool,

    /// Центральные банки (основной + сайд-поты) в порядке создания.
    pub center_pots: Vec<ChipStack>,
    /// Рейк и неделимые остатки сплитов.
    pub house: ChipStack,

    /// Таймбанки мест живут дольше одной раздачи.
    pub time: TimeController,
}

impl Table {
    /// Создать пустой стол с заданной конфигурацией.
    pub fn new(id: TableId, name: String, config: TableConfig) -> Self {
        let seats = (0..config.max_seats).map(|_| None).collect();
        let time = TimeController::new(config.time.clone());
        Self {
            id,
            name,
            config,
            seats,
            board: [CardSlot::Empty; 5],
            dealer_button: None,
            small_blind_seat: None,
            big_blind_seat: None,
            current_hand_id: None,
            street: Street::Preflop,
            hand_in_progress: false,
            center_pots: Vec::new(),
            house: ChipStack::new(),
            time,
        }
    }

    pub fn max_seats(&self) -> u8 {
        self.config.max_seats
    }

    pub fn seated_count(&self) -> usize {
        self.seats.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_seat_empty(&self, index: SeatIndex) -> bool {
        self.seat(index).is_none()
    }

    pub fn seat(&self, index: SeatIndex) -> Option<&PlayerAtTable> {
        self.seats.get(index as usize).and_then(Option::as_ref)
    }

    pub fn seat_mut(&mut self, index: SeatIndex) -> Option<&mut PlayerAtTable> {
        self.seats.get_mut(index as usize).and_then(Option::as_mut)
    }

    /// Посадить игрока. false – место занято или не существует.
    pub fn sit(&mut self, index: SeatIndex, player: PlayerAtTable) -> bool {
        match self.seats.get_mut(index as usize) {
            Some(slot) if slot.is_none() => {
                *slot = Some(player);
                true
            }
            _ => false,
        }
    }

    /// Занятые места вместе с индексами.
    pub fn occupied(&self) -> impl Iterator<Item = (SeatIndex, &PlayerAtTable)> {
        self.seats
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.as_ref().map(|p| (i as SeatIndex, p)))
    }

    /// Места, которые могут сыграть следующую раздачу.
    pub fn participating_seats(&self) -> Vec<SeatIndex> {
        self.occupied()
            .filter(|(_, p)| p.status != PlayerStatus::SittingOut && !p.stack.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// Места, ещё претендующие на банк (не сфолдили).
    pub fn live_seats(&self) -> Vec<SeatIndex> {
        self.occupied()
            .filter(|(_, p)| p.is_in_hand() && p.has_cards())
            .map(|(i, _)| i)
            .collect()
    }

    /// Места, которые ещё могут делать ставки.
    pub fn actionable_seats(&self) -> Vec<SeatIndex> {
        self.occupied()
            .filter(|(_, p)| p.is_actionable())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn board_cards(&self) -> Vec<Card> {
        dealt_cards(&self.board)
    }

    pub fn center_pot_total(&self) -> Chips {
        self.center_pots.iter().map(ChipStack::value).sum()
    }

    /// Сумма несобранных ставок текущей улицы.
    pub fn pending_total(&self) -> Chips {
        self.occupied().map(|(_, p)| p.pending_bet.value()).sum()
    }

    /// Максимальная ставка текущей улицы среди всех мест.
    pub fn max_pending(&self) -> Chips {
        self.occupied()
            .map(|(_, p)| p.pending_bet.value())
            .max()
            .unwrap_or(Chips::ZERO)
    }

    /// Все фишки на столе: стеки + ставки + банки + house.
    pub fn total_chips(&self) -> Chips {
        let seats: Chips = self
            .occupied()
            .map(|(_, p)| p.stack.value() + p.pending_bet.value())
            .sum();
        seats + self.center_pot_total() + self.house.value()
    }
}
