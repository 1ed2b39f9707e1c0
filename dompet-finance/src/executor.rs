//! Applies parsed chat messages to the ledger.

use chrono::{DateTime, FixedOffset, NaiveDate};
use tracing::{info, warn};

use dompet_core::{
    Action, AiStats, Lexicon, OTHER_CATEGORY, ParseResult, format_currency, process_message,
};

use crate::advice;
use crate::daily_limit::LimitCheck;
use crate::error::{LedgerError, Result};
use crate::ledger::{Entry, Ledger, Wallet};

/// A successfully applied message.
#[derive(Debug, Clone, PartialEq)]
pub struct Executed {
    pub action: Action,
    pub message: String,
    /// Stats after counting this action.
    pub stats: AiStats,
    pub limit: LimitCheck,
}

/// Apply an understood [`ParseResult`] to the ledger.
///
/// Chat entries go to the default wallet. Expenses pass through the same
/// daily-limit check as manual ones. `stats` is only advanced on success.
pub fn execute(
    ledger: &mut Ledger,
    result: &ParseResult,
    stats: AiStats,
    today: NaiveDate,
) -> Result<Executed> {
    let (Some(action), Some(date)) = (result.action, result.date) else {
        return Err(LedgerError::NotUnderstood(result.response.clone()));
    };
    if !result.understood {
        return Err(LedgerError::NotUnderstood(result.response.clone()));
    }

    let amount = result.amount;
    let description = result.description.clone().unwrap_or_default();
    let category = result
        .category
        .clone()
        .unwrap_or_else(|| OTHER_CATEGORY.to_string());
    let money = format_currency(amount);

    let (message, limit) = match action {
        Action::Expense => {
            let limit = ledger.add_expense(
                Entry {
                    amount,
                    category: category.clone(),
                    description,
                    wallet: Wallet::default(),
                    date,
                },
                today,
            )?;
            let mut message =
                format!("✅ Berhasil mencatat pengeluaran {money} untuk kategori {category}!");
            if let Some(note) = limit_note(ledger, limit, today) {
                message.push('\n');
                message.push_str(&note);
            }
            (message, limit)
        }
        Action::Income => {
            ledger.add_income(Entry {
                amount,
                category: category.clone(),
                description,
                wallet: Wallet::default(),
                date,
            })?;
            (
                format!("✅ Berhasil mencatat pemasukan {money} untuk kategori {category}!"),
                LimitCheck::Unchecked,
            )
        }
        Action::Savings => {
            ledger.deposit_savings(amount, &description, date)?;
            (
                format!("✅ Berhasil menambahkan {money} ke tabungan!"),
                LimitCheck::Unchecked,
            )
        }
        Action::Withdraw => {
            ledger.withdraw_savings(amount, &description, date)?;
            (
                format!("✅ Berhasil menarik {money} dari tabungan!"),
                LimitCheck::Unchecked,
            )
        }
    };

    info!(?action, amount, "chat action executed");
    Ok(Executed {
        action,
        message,
        stats: stats.record_executed(today),
        limit,
    })
}

fn limit_note(ledger: &Ledger, limit: LimitCheck, today: NaiveDate) -> Option<String> {
    let remaining = ledger.daily_limit.remaining(ledger.spent_today(today));
    match limit {
        LimitCheck::Warning(level) => Some(format!(
            "⚠️ {} Sisa limit: {}",
            level.message(),
            format_currency(remaining)
        )),
        LimitCheck::Exceeded { .. } => Some(format!(
            "⚠️ Pengeluaran hari ini melebihi batas harian ({}).",
            format_currency(ledger.daily_limit.amount)
        )),
        LimitCheck::Unchecked | LimitCheck::Within => None,
    }
}

/// How a chat message was handled.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Executed { action: Action, limit: LimitCheck },
    /// Understood, but the ledger refused it.
    Failed(LedgerError),
    Advice,
    Clarification,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub message: String,
    pub outcome: Outcome,
    pub stats: AiStats,
}

impl Reply {
    /// Whether the ledger changed and needs saving.
    pub fn changed_ledger(&self) -> bool {
        matches!(self.outcome, Outcome::Executed { .. })
    }
}

/// Full chat turn: parse, then execute, advise, or ask for clarification.
pub fn handle_message(
    ledger: &mut Ledger,
    lexicon: &Lexicon,
    text: &str,
    now: DateTime<FixedOffset>,
    stats: AiStats,
) -> Reply {
    let result = process_message(lexicon, text, now);

    if result.understood {
        return match execute(ledger, &result, stats, now.date_naive()) {
            Ok(done) => Reply {
                message: done.message,
                outcome: Outcome::Executed {
                    action: done.action,
                    limit: done.limit,
                },
                stats: done.stats,
            },
            Err(err) => {
                warn!(error = %err, "chat action rejected");
                Reply {
                    message: format!("Maaf, terjadi kesalahan saat memproses transaksi: {err}"),
                    outcome: Outcome::Failed(err),
                    stats,
                }
            }
        };
    }

    if advice::is_consultation(text) {
        return Reply {
            message: advice::consult(text, ledger),
            outcome: Outcome::Advice,
            stats,
        };
    }

    Reply {
        message: result.response,
        outcome: Outcome::Clarification,
        stats,
    }
}
