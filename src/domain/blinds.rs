//! Расписание блайндов/анте. Чистые данные + поиск уровня по интервалам.

use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::ConfigError;

/// Тип анте.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum AnteType {
    /// Без анте.
    None,
    /// Классическое анте с каждого игрока.
    Classic,
    /// Big Blind Ante – анте платит только биг-блайнд.
    BigBlind,
}

/// Один уровень блайндов.
/// Пример: level = 3, SB = 100, BB = 200, ante = 25, ante_type = BigBlind, duration_minutes = 10.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindLevel {
    /// Порядковый номер уровня (1, 2, 3, ...).
    pub level: u32,
    pub small_blind: Chips,
    pub big_blind: Chips,
    /// Размер анте в фишках (0, если нет).
    pub ante: Chips,
    pub ante_type: AnteType,
    /// Длительность уровня в минутах.
    pub duration_minutes: u32,
}

impl BlindLevel {
    pub fn new(
        level: u32,
        small_blind: Chips,
        big_blind: Chips,
        ante: Chips,
        ante_type: AnteType,
        duration_minutes: u32,
    ) -> Self {
        Self {
            level,
            small_blind,
            big_blind,
            ante,
            ante_type,
            duration_minutes,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.small_blind.is_zero() {
            return Err(ConfigError::Invalid(format!(
                "BlindLevel {}: small_blind = 0",
                self.level
            )));
        }
        if self.big_blind <= self.small_blind {
            return Err(ConfigError::Invalid(format!(
                "BlindLevel {}: big_blind ({}) <= small_blind ({})",
                self.level, self.big_blind, self.small_blind
            )));
        }
        if self.duration_minutes == 0 {
            return Err(ConfigError::Invalid(format!(
                "BlindLevel {}: duration_minutes = 0",
                self.level
            )));
        }
        Ok(())
    }
}

/// Структура уровней блайндов.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BlindStructure {
    pub levels: Vec<BlindLevel>,
    /// Сколько раздач длится уровень при переключении «по раздачам».
    #[serde(default = "default_hands_per_level")]
    pub hands_per_level: u32,
}

fn default_hands_per_level() -> u32 {
    10
}

impl BlindStructure {
    pub fn new(levels: Vec<BlindLevel>) -> Self {
        Self {
            levels,
            hands_per_level: default_hands_per_level(),
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let s: BlindStructure = serde_json::from_str(json)?;
        s.validate()?;
        Ok(s)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.levels.is_empty() {
            return Err(ConfigError::Invalid("BlindStructure: empty levels".into()));
        }
        if self.hands_per_level == 0 {
            return Err(ConfigError::Invalid("BlindStructure: hands_per_level = 0".into()));
        }

        for (i, lvl) in self.levels.iter().enumerate() {
            lvl.validate()?;
            let expected = i as u32 + 1;
            if lvl.level != expected {
                return Err(ConfigError::Invalid(format!(
                    "BlindStructure: expected level {}, got {}",
                    expected, lvl.level
                )));
            }
        }

        Ok(())
    }

    pub fn first_level(&self) -> Option<&BlindLevel> {
        self.levels.first()
    }

    pub fn level_by_number(&self, number: u32) -> Option<&BlindLevel> {
        self.levels.iter().find(|lvl| lvl.level == number)
    }

    pub fn total_duration_minutes(&self) -> u32 {
        self.levels.iter().map(|lvl| lvl.duration_minutes).sum()
    }

    /// Уровень по прошедшим минутам. После последнего уровня – последний.
    pub fn level_for_elapsed_minutes(&self, elapsed_minutes: u32) -> Option<&BlindLevel> {
        let mut acc = 0u32;
        for lvl in &self.levels {
            acc = acc.saturating_add(lvl.duration_minutes);
            if elapsed_minutes < acc {
                return Some(lvl);
            }
        }
        self.levels.last()
    }

    /// Уровень по номеру раздачи (0-based).
    pub fn level_for_round(&self, round: u32) -> Option<&BlindLevel> {
        let idx = (round / self.hands_per_level.max(1)) as usize;
        self.levels.get(idx).or_else(|| self.levels.last())
    }

    pub fn simple_demo_structure() -> Self {
        let levels = vec![
            BlindLevel::new(1, Chips::new(25), Chips::new(50), Chips::ZERO, AnteType::None, 10),
            BlindLevel::new(2, Chips::new(50), Chips::new(100), Chips::ZERO, AnteType::None, 10),
            BlindLevel::new(3, Chips::new(75), Chips::new(150), Chips::new(25), AnteType::BigBlind, 10),
        ];

        BlindStructure::new(levels)
    }
}
