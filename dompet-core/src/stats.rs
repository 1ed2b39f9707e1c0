//! Usage counters for executed chat actions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// File name the counters are persisted under.
pub const STATS_FILE: &str = "ai_stats.json";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AiStats {
    /// Lifetime count of executed actions.
    pub processed_count: u64,
    pub messages_total: u64,
    pub messages_today: u64,
    pub last_message_date: Option<NaiveDate>,
}

impl AiStats {
    /// Counters after one more executed action on `today`. The daily
    /// counter restarts at 1 on the first action of a new day.
    #[must_use]
    pub fn record_executed(self, today: NaiveDate) -> Self {
        let messages_today = if self.last_message_date == Some(today) {
            self.messages_today + 1
        } else {
            1
        };

        Self {
            processed_count: self.processed_count + 1,
            messages_total: self.messages_total + 1,
            messages_today,
            last_message_date: Some(today),
        }
    }

    /// Today's count as seen on `today`; stale counters read as zero.
    pub fn today_count(&self, today: NaiveDate) -> u64 {
        if self.last_message_date == Some(today) {
            self.messages_today
        } else {
            0
        }
    }
}

/// Where stats live between runs.
pub trait StatsStore {
    type Error;

    /// Missing data loads as [`AiStats::default`].
    fn load(&self) -> Result<AiStats, Self::Error>;
    fn save(&self, stats: &AiStats) -> Result<(), Self::Error>;
}
