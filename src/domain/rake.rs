use serde::{Deserialize, Serialize};

use crate::domain::chips::Chips;
use crate::domain::table::ConfigError;

/// Правило рейка: процент от банка (в базисных пунктах) с потолком,
/// выраженным в малых блайндах.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RakeSchedule {
    /// 500 = 5%. Ноль – рейк не берётся.
    pub percent_bp: u32,
    /// Потолок рейка за раздачу в малых блайндах. Ноль – без потолка.
    pub cap_in_small_blinds: u32,
}

impl RakeSchedule {
    pub fn new(percent_bp: u32, cap_in_small_blinds: u32) -> Self {
        Self {
            percent_bp,
            cap_in_small_blinds,
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.percent_bp > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "rake percent_bp = {} > 10000",
                self.percent_bp
            )));
        }
        Ok(())
    }

    /// Потолок рейка за раздачу.
    pub fn cap(&self, small_blind: Chips) -> Option<Chips> {
        (self.cap_in_small_blinds > 0).then(|| small_blind.times(self.cap_in_small_blinds as u64))
    }

    /// Рейк с банка `pot`. Банк меньше малого блайнда не облагается.
    pub fn calculate_rake(&self, pot: Chips, small_blind: Chips) -> Chips {
        if self.percent_bp == 0 || pot < small_blind {
            return Chips::ZERO;
        }
        let raw = Chips((pot.0 as u128 * self.percent_bp as u128 / 10_000) as u64);
        match self.cap(small_blind) {
            Some(cap) => raw.min(cap),
            None => raw,
        }
    }
}
