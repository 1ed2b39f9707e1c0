//! dompet-core: Natural-language transaction parser for the Dompet finance tracker

pub mod normalize;
pub mod amount;
pub mod matcher;
pub mod lexicon;
pub mod intent;
pub mod dates;
pub mod currency;
pub mod response;
pub mod stats;

pub use amount::{extract_amount, parse_amount};
pub use currency::{format_currency, format_currency_short};
pub use dates::{
    DateRule, ResolvedDate, SearchDirection, Timeframe, calculate_date, extract_date,
    format_detected_date, resolve_weekday,
};
pub use intent::{Action, ActionMatch, OTHER_CATEGORY, describe, detect_action, detect_category};
pub use lexicon::{CategoryKeywords, KeywordTable, Lexicon};
pub use matcher::{contains_any, contains_direct, contains_exact, is_typo, levenshtein};
pub use normalize::{normalize_message, normalize_numeric};
pub use response::{ParseResult, clarification_prompt, process_message};
pub use stats::{AiStats, STATS_FILE, StatsStore};
