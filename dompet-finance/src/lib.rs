//! dompet-finance: ledger, daily spending limit, chat executor and rule-based advice

pub mod error;
pub mod ledger;
pub mod daily_limit;
pub mod executor;
pub mod advice;

pub use error::{LedgerError, Result};
pub use ledger::{
    Entry, Goal, Ledger, SavingsEntry, SavingsKind, Transaction, TransactionKind, Wallet,
    GOAL_CATEGORY, GOAL_WITHDRAWAL_CATEGORY, SAVINGS_CATEGORY, SAVINGS_WITHDRAWAL_CATEGORY,
};
pub use daily_limit::{DailyLimit, LimitCheck, WarningLevel, Warnings, MIN_DAILY_LIMIT};
pub use executor::{Executed, Outcome, Reply, execute, handle_message};
pub use advice::{Snapshot, Topic, consult, detect_topic, is_consultation};
