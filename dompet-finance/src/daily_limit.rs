//! Daily spending limit with threshold warnings.

use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};
use crate::ledger::{GOAL_CATEGORY, SAVINGS_CATEGORY};

pub const MIN_DAILY_LIMIT: f64 = 1_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Warnings {
    pub fifty: bool,
    pub seventy_five: bool,
    pub ninety: bool,
}

impl Default for Warnings {
    fn default() -> Self {
        Self {
            fifty: true,
            seventy_five: true,
            ninety: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailyLimit {
    pub enabled: bool,
    pub amount: f64,
    pub warnings: Warnings,
    /// Refuse expenses that would exceed the limit instead of only warning.
    pub block_exceed: bool,
    pub exclude_savings: bool,
    pub exclude_goals: bool,
}

impl Default for DailyLimit {
    fn default() -> Self {
        Self {
            enabled: false,
            amount: 50_000.0,
            warnings: Warnings::default(),
            block_exceed: true,
            exclude_savings: true,
            exclude_goals: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum WarningLevel {
    Fifty,
    SeventyFive,
    Ninety,
}

impl WarningLevel {
    pub fn fraction(&self) -> f64 {
        match self {
            WarningLevel::Fifty => 0.5,
            WarningLevel::SeventyFive => 0.75,
            WarningLevel::Ninety => 0.9,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            WarningLevel::Fifty => "Info: Anda telah menggunakan 50% dari batas harian.",
            WarningLevel::SeventyFive => "Perhatian! Anda telah menggunakan 75% dari batas harian.",
            WarningLevel::Ninety => "Peringatan! Anda telah menggunakan 90% dari batas harian!",
        }
    }
}

/// Outcome of checking one expense against the limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum LimitCheck {
    /// Limit disabled or category excluded.
    Unchecked,
    Within,
    /// A threshold was crossed by this expense.
    Warning(WarningLevel),
    /// `remaining` is what was left before this expense.
    Exceeded { remaining: f64 },
}

impl DailyLimit {
    /// Whether expenses in `category` count against the limit.
    pub fn applies_to(&self, category: &str) -> bool {
        !(self.exclude_savings && category == SAVINGS_CATEGORY)
            && !(self.exclude_goals && category == GOAL_CATEGORY)
    }

    /// Check an expense of `amount` given what was already spent today.
    pub fn check(&self, spent_today: f64, amount: f64, category: &str) -> LimitCheck {
        if !self.enabled || !self.applies_to(category) {
            return LimitCheck::Unchecked;
        }

        let new_total = spent_today + amount;
        if new_total > self.amount {
            return LimitCheck::Exceeded {
                remaining: (self.amount - spent_today).max(0.0),
            };
        }

        [
            (WarningLevel::Ninety, self.warnings.ninety),
            (WarningLevel::SeventyFive, self.warnings.seventy_five),
            (WarningLevel::Fifty, self.warnings.fifty),
        ]
        .into_iter()
        .find(|(level, enabled)| {
            let threshold = self.amount * level.fraction();
            *enabled && new_total >= threshold && spent_today < threshold
        })
        .map(|(level, _)| LimitCheck::Warning(level))
        .unwrap_or(LimitCheck::Within)
    }

    pub fn set_amount(&mut self, amount: f64) -> Result<()> {
        if !amount.is_finite() || amount < MIN_DAILY_LIMIT {
            return Err(LedgerError::LimitTooLow {
                minimum: MIN_DAILY_LIMIT,
            });
        }
        self.amount = amount;
        Ok(())
    }

    pub fn remaining(&self, spent_today: f64) -> f64 {
        (self.amount - spent_today).max(0.0)
    }
}
