//! Ledger of transactions, savings movements and savings goals.
//!
//! Every movement of money is a [`Transaction`]; savings deposits and goal
//! contributions are expenses from the main balance, withdrawals are income
//! back into it. Lists are kept newest first and transactions are never
//! deleted individually.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::daily_limit::{DailyLimit, LimitCheck};
use crate::error::{LedgerError, Result};

pub const SAVINGS_CATEGORY: &str = "Tabungan";
pub const GOAL_CATEGORY: &str = "Target/Goal";
pub const SAVINGS_WITHDRAWAL_CATEGORY: &str = "Penarikan Tabungan";
pub const GOAL_WITHDRAWAL_CATEGORY: &str = "Penarikan Target";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionKind {
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "expense")]
    Expense,
}

impl TransactionKind {
    pub fn label(&self) -> &'static str {
        match self {
            TransactionKind::Income => "Pemasukan",
            TransactionKind::Expense => "Pengeluaran",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Wallet {
    #[default]
    #[serde(rename = "bank")]
    Bank,
    #[serde(rename = "cash")]
    Cash,
    #[serde(rename = "ewallet")]
    Ewallet,
}

impl Wallet {
    pub const ALL: [Wallet; 3] = [Wallet::Bank, Wallet::Cash, Wallet::Ewallet];

    pub fn as_str(&self) -> &'static str {
        match self {
            Wallet::Bank => "bank",
            Wallet::Cash => "cash",
            Wallet::Ewallet => "ewallet",
        }
    }
}

impl fmt::Display for Wallet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Wallet {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bank" => Ok(Wallet::Bank),
            "cash" | "tunai" => Ok(Wallet::Cash),
            "ewallet" | "e-wallet" => Ok(Wallet::Ewallet),
            other => Err(format!("unknown wallet '{other}' (expected bank, cash or ewallet)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub kind: TransactionKind,
    pub amount: f64,
    pub category: String,
    pub description: String,
    #[serde(default)]
    pub wallet: Wallet,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SavingsKind {
    #[serde(rename = "deposit")]
    Deposit,
    #[serde(rename = "withdraw")]
    Withdraw,
}

/// Movement in or out of the savings pot. `amount` is always positive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsEntry {
    pub id: String,
    pub kind: SavingsKind,
    pub amount: f64,
    pub description: String,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub target_date: Option<NaiveDate>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub saved_amount: f64,
    pub created_at: DateTime<FixedOffset>,
}

impl Goal {
    pub fn is_reached(&self) -> bool {
        self.saved_amount >= self.target_amount
    }

    /// Progress in percent, capped at 100.
    pub fn progress(&self) -> f64 {
        if self.target_amount <= 0.0 {
            return 0.0;
        }
        (self.saved_amount / self.target_amount * 100.0).min(100.0)
    }
}

/// Input for a manual or chat-created income/expense.
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub wallet: Wallet,
    pub date: DateTime<FixedOffset>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Ledger {
    pub transactions: Vec<Transaction>,
    pub savings: Vec<SavingsEntry>,
    pub goals: Vec<Goal>,
    pub daily_limit: DailyLimit,
    next_id: u64,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // --- queries ---------------------------------------------------------

    pub fn total(&self, kind: TransactionKind) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.amount)
            .sum()
    }

    /// Total income minus total expense.
    pub fn balance(&self) -> f64 {
        self.total(TransactionKind::Income) - self.total(TransactionKind::Expense)
    }

    pub fn savings_balance(&self) -> f64 {
        self.savings
            .iter()
            .map(|s| match s.kind {
                SavingsKind::Deposit => s.amount,
                SavingsKind::Withdraw => -s.amount,
            })
            .sum()
    }

    pub fn wallet_balance(&self, wallet: Wallet) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.wallet == wallet)
            .map(|t| match t.kind {
                TransactionKind::Income => t.amount,
                TransactionKind::Expense => -t.amount,
            })
            .sum()
    }

    /// Expense totals per category, largest first.
    pub fn expenses_by_category(&self) -> Vec<(String, f64)> {
        let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
        for t in self.transactions.iter().filter(|t| t.kind == TransactionKind::Expense) {
            *totals.entry(t.category.as_str()).or_default() += t.amount;
        }

        let mut sorted: Vec<(String, f64)> = totals
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        sorted.sort_by(|a, b| b.1.total_cmp(&a.1));
        sorted
    }

    /// Total of `kind` divided by the number of distinct months it occurs in.
    pub fn monthly_average(&self, kind: TransactionKind) -> f64 {
        let months: BTreeSet<String> = self
            .transactions
            .iter()
            .filter(|t| t.kind == kind)
            .map(|t| t.date.format("%Y-%m").to_string())
            .collect();

        if months.is_empty() {
            return 0.0;
        }
        self.total(kind) / months.len() as f64
    }

    /// Expenses dated `today` that count against the daily limit.
    pub fn spent_today(&self, today: NaiveDate) -> f64 {
        self.transactions
            .iter()
            .filter(|t| t.kind == TransactionKind::Expense && t.date.date_naive() == today)
            .filter(|t| self.daily_limit.applies_to(&t.category))
            .map(|t| t.amount)
            .sum()
    }

    pub fn goal(&self, key: &str) -> Option<&Goal> {
        self.goal_index(key).map(|i| &self.goals[i])
    }

    // --- income and expense ----------------------------------------------

    pub fn add_income(&mut self, entry: Entry) -> Result<&Transaction> {
        validate_amount(entry.amount)?;
        self.push_transaction(TransactionKind::Income, entry);
        Ok(&self.transactions[0])
    }

    /// Record an expense. Expenses dated `today` are checked against the
    /// daily limit and refused when it would be exceeded and blocking is on.
    pub fn add_expense(&mut self, entry: Entry, today: NaiveDate) -> Result<LimitCheck> {
        validate_amount(entry.amount)?;

        let check = if entry.date.date_naive() == today {
            self.daily_limit
                .check(self.spent_today(today), entry.amount, &entry.category)
        } else {
            LimitCheck::Unchecked
        };

        if let LimitCheck::Exceeded { remaining } = check {
            if self.daily_limit.block_exceed {
                warn!(amount = entry.amount, remaining, "expense refused by daily limit");
                return Err(LedgerError::DailyLimitExceeded { remaining });
            }
        }

        self.push_transaction(TransactionKind::Expense, entry);
        Ok(check)
    }

    // --- savings ---------------------------------------------------------

    /// Move money from the balance into savings.
    pub fn deposit_savings(
        &mut self,
        amount: f64,
        description: &str,
        date: DateTime<FixedOffset>,
    ) -> Result<()> {
        validate_amount(amount)?;
        if amount > self.balance() {
            return Err(LedgerError::InsufficientBalance("menabung"));
        }

        let description = or_default(description, "Menabung");
        self.push_transaction(
            TransactionKind::Expense,
            Entry {
                amount,
                category: SAVINGS_CATEGORY.to_string(),
                description: description.clone(),
                wallet: Wallet::Bank,
                date,
            },
        );
        self.push_savings(SavingsKind::Deposit, amount, description, date);
        Ok(())
    }

    /// Move money from savings back into the balance.
    pub fn withdraw_savings(
        &mut self,
        amount: f64,
        description: &str,
        date: DateTime<FixedOffset>,
    ) -> Result<()> {
        validate_amount(amount)?;
        if amount > self.savings_balance() {
            return Err(LedgerError::InsufficientSavings);
        }

        let description = or_default(description, "Penarikan tabungan");
        self.push_transaction(
            TransactionKind::Income,
            Entry {
                amount,
                category: SAVINGS_WITHDRAWAL_CATEGORY.to_string(),
                description: description.clone(),
                wallet: Wallet::Bank,
                date,
            },
        );
        self.push_savings(SavingsKind::Withdraw, amount, description, date);
        Ok(())
    }

    // --- goals -----------------------------------------------------------

    pub fn add_goal(
        &mut self,
        name: &str,
        target_amount: f64,
        target_date: Option<NaiveDate>,
        description: &str,
        now: DateTime<FixedOffset>,
    ) -> Result<&Goal> {
        let name = name.trim();
        if name.is_empty() {
            return Err(LedgerError::InvalidInput("Nama target harus diisi".to_string()));
        }
        validate_amount(target_amount)?;

        let goal = Goal {
            id: self.allocate_id("goal"),
            name: name.to_string(),
            target_amount,
            target_date,
            description: description.trim().to_string(),
            saved_amount: 0.0,
            created_at: now,
        };
        debug!(id = %goal.id, name = %goal.name, "goal added");
        self.goals.insert(0, goal);
        Ok(&self.goals[0])
    }

    /// Put `amount` from the balance towards a goal. Recorded as an expense
    /// in the goal category.
    pub fn contribute_to_goal(
        &mut self,
        key: &str,
        amount: f64,
        now: DateTime<FixedOffset>,
    ) -> Result<&Goal> {
        validate_amount(amount)?;
        let idx = self.require_goal(key)?;
        if amount > self.balance() {
            return Err(LedgerError::InsufficientBalance("kontribusi ini"));
        }

        let description = format!("Kontribusi untuk {}", self.goals[idx].name);
        self.push_transaction(
            TransactionKind::Expense,
            Entry {
                amount,
                category: GOAL_CATEGORY.to_string(),
                description,
                wallet: Wallet::Bank,
                date: now,
            },
        );
        self.goals[idx].saved_amount += amount;
        Ok(&self.goals[idx])
    }

    /// Return everything saved for a goal to the balance. Returns the amount.
    pub fn withdraw_from_goal(&mut self, key: &str, now: DateTime<FixedOffset>) -> Result<f64> {
        let idx = self.require_goal(key)?;
        let amount = self.goals[idx].saved_amount;
        if amount <= 0.0 {
            return Err(LedgerError::NothingToWithdraw);
        }

        let description = format!("Penarikan dari {}", self.goals[idx].name);
        self.push_goal_withdrawal(amount, description, now);
        self.goals[idx].saved_amount = 0.0;
        Ok(amount)
    }

    pub fn partial_withdraw_from_goal(
        &mut self,
        key: &str,
        amount: f64,
        now: DateTime<FixedOffset>,
    ) -> Result<&Goal> {
        let idx = self.require_goal(key)?;
        if self.goals[idx].saved_amount <= 0.0 {
            return Err(LedgerError::NothingToWithdraw);
        }
        validate_amount(amount)?;
        if amount > self.goals[idx].saved_amount {
            return Err(LedgerError::ExceedsGoalFunds);
        }

        let description = format!("Penarikan sebagian dari {}", self.goals[idx].name);
        self.push_goal_withdrawal(amount, description, now);
        self.goals[idx].saved_amount -= amount;
        Ok(&self.goals[idx])
    }

    /// Remove a goal. Funds already contributed stay spent; withdraw first to
    /// get them back.
    pub fn delete_goal(&mut self, key: &str) -> Result<Goal> {
        let idx = self.require_goal(key)?;
        Ok(self.goals.remove(idx))
    }

    /// Drop all data, including the daily limit settings.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    // --- internals -------------------------------------------------------

    fn allocate_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}-{}", self.next_id)
    }

    fn push_transaction(&mut self, kind: TransactionKind, entry: Entry) {
        let tx = Transaction {
            id: self.allocate_id("tx"),
            kind,
            amount: entry.amount,
            category: entry.category,
            description: entry.description,
            wallet: entry.wallet,
            date: entry.date,
        };
        debug!(id = %tx.id, ?kind, amount = tx.amount, category = %tx.category, "transaction recorded");
        self.transactions.insert(0, tx);
    }

    fn push_savings(
        &mut self,
        kind: SavingsKind,
        amount: f64,
        description: String,
        date: DateTime<FixedOffset>,
    ) {
        let entry = SavingsEntry {
            id: self.allocate_id("sv"),
            kind,
            amount,
            description,
            date,
        };
        self.savings.insert(0, entry);
    }

    fn push_goal_withdrawal(&mut self, amount: f64, description: String, now: DateTime<FixedOffset>) {
        self.push_transaction(
            TransactionKind::Income,
            Entry {
                amount,
                category: GOAL_WITHDRAWAL_CATEGORY.to_string(),
                description,
                wallet: Wallet::Bank,
                date: now,
            },
        );
    }

    /// Goals are addressed by id or by case-insensitive name.
    fn goal_index(&self, key: &str) -> Option<usize> {
        let key = key.trim();
        self.goals
            .iter()
            .position(|g| g.id == key)
            .or_else(|| self.goals.iter().position(|g| g.name.eq_ignore_ascii_case(key)))
    }

    fn require_goal(&self, key: &str) -> Result<usize> {
        self.goal_index(key)
            .ok_or_else(|| LedgerError::GoalNotFound(key.to_string()))
    }
}

fn validate_amount(amount: f64) -> Result<()> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        Err(LedgerError::InvalidAmount)
    }
}

fn or_default(description: &str, fallback: &str) -> String {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        fallback.to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, d, h, 0, 0)
            .unwrap()
    }

    fn entry(amount: f64, category: &str, date: DateTime<FixedOffset>) -> Entry {
        Entry {
            amount,
            category: category.to_string(),
            description: String::new(),
            wallet: Wallet::Bank,
            date,
        }
    }

    fn funded(amount: f64) -> Ledger {
        let mut ledger = Ledger::new();
        ledger.add_income(entry(amount, "Gaji", at(1, 9))).unwrap();
        ledger
    }

    #[test]
    fn test_balance_and_ordering() {
        let mut ledger = funded(1_000_000.0);
        ledger
            .add_expense(entry(250_000.0, "Makanan", at(2, 12)), at(2, 12).date_naive())
            .unwrap();

        assert_eq!(ledger.balance(), 750_000.0);
        assert_eq!(ledger.transactions[0].kind, TransactionKind::Expense);
        assert_eq!(ledger.transactions[0].id, "tx-2");
        assert_eq!(ledger.wallet_balance(Wallet::Bank), 750_000.0);
        assert_eq!(ledger.wallet_balance(Wallet::Cash), 0.0);
    }

    #[test]
    fn test_rejects_non_positive_amounts() {
        let mut ledger = Ledger::new();
        assert_eq!(
            ledger.add_income(entry(0.0, "Gaji", at(1, 9))).unwrap_err(),
            LedgerError::InvalidAmount
        );
        assert_eq!(
            ledger.add_income(entry(f64::NAN, "Gaji", at(1, 9))).unwrap_err(),
            LedgerError::InvalidAmount
        );
    }

    #[test]
    fn test_savings_round_trip() {
        let mut ledger = funded(500_000.0);
        ledger.deposit_savings(200_000.0, "", at(3, 8)).unwrap();

        assert_eq!(ledger.balance(), 300_000.0);
        assert_eq!(ledger.savings_balance(), 200_000.0);
        assert_eq!(ledger.transactions[0].category, SAVINGS_CATEGORY);
        assert_eq!(ledger.savings[0].description, "Menabung");

        ledger.withdraw_savings(50_000.0, "jajan", at(4, 8)).unwrap();
        assert_eq!(ledger.balance(), 350_000.0);
        assert_eq!(ledger.savings_balance(), 150_000.0);
        assert_eq!(ledger.transactions[0].category, SAVINGS_WITHDRAWAL_CATEGORY);
    }

    #[test]
    fn test_savings_guards() {
        let mut ledger = funded(100_000.0);
        assert_eq!(
            ledger.deposit_savings(150_000.0, "", at(3, 8)).unwrap_err(),
            LedgerError::InsufficientBalance("menabung")
        );
        assert_eq!(
            ledger.withdraw_savings(1_000.0, "", at(3, 8)).unwrap_err(),
            LedgerError::InsufficientSavings
        );
        assert_eq!(ledger.transactions.len(), 1);
    }

    #[test]
    fn test_daily_limit_blocks_today_only() {
        let mut ledger = funded(1_000_000.0);
        ledger.daily_limit.enabled = true;
        ledger.daily_limit.amount = 50_000.0;
        let today = at(5, 10).date_naive();

        ledger.add_expense(entry(40_000.0, "Makanan", at(5, 10)), today).unwrap();
        assert_eq!(
            ledger.add_expense(entry(20_000.0, "Makanan", at(5, 11)), today),
            Err(LedgerError::DailyLimitExceeded { remaining: 10_000.0 })
        );
        // backdated expenses are not checked
        assert_eq!(
            ledger.add_expense(entry(20_000.0, "Makanan", at(4, 11)), today),
            Ok(LimitCheck::Unchecked)
        );
        assert_eq!(ledger.spent_today(today), 40_000.0);
    }

    #[test]
    fn test_daily_limit_without_blocking_records_and_reports() {
        let mut ledger = funded(1_000_000.0);
        ledger.daily_limit.enabled = true;
        ledger.daily_limit.block_exceed = false;
        let today = at(5, 10).date_naive();

        let check = ledger
            .add_expense(entry(80_000.0, "Belanja", at(5, 10)), today)
            .unwrap();
        assert_eq!(check, LimitCheck::Exceeded { remaining: 50_000.0 });
        assert_eq!(ledger.spent_today(today), 80_000.0);
    }

    #[test]
    fn test_goal_lifecycle() {
        let mut ledger = funded(1_000_000.0);
        let id = ledger
            .add_goal("Laptop", 300_000.0, None, "kerja", at(1, 10))
            .unwrap()
            .id
            .clone();

        let goal = ledger.contribute_to_goal("laptop", 300_000.0, at(2, 10)).unwrap();
        assert!(goal.is_reached());
        assert_eq!(goal.progress(), 100.0);
        assert_eq!(ledger.balance(), 700_000.0);
        assert_eq!(ledger.transactions[0].category, GOAL_CATEGORY);

        let goal = ledger.partial_withdraw_from_goal(&id, 100_000.0, at(3, 10)).unwrap();
        assert_eq!(goal.saved_amount, 200_000.0);
        assert_eq!(
            ledger.partial_withdraw_from_goal(&id, 500_000.0, at(3, 10)).unwrap_err(),
            LedgerError::ExceedsGoalFunds
        );

        assert_eq!(ledger.withdraw_from_goal(&id, at(4, 10)).unwrap(), 200_000.0);
        assert_eq!(ledger.balance(), 1_000_000.0);
        assert_eq!(
            ledger.withdraw_from_goal(&id, at(4, 10)).unwrap_err(),
            LedgerError::NothingToWithdraw
        );

        assert_eq!(ledger.delete_goal("Laptop").unwrap().id, id);
        assert!(matches!(
            ledger.delete_goal(&id),
            Err(LedgerError::GoalNotFound(_))
        ));
    }

    #[test]
    fn test_goal_validation() {
        let mut ledger = funded(10_000.0);
        assert!(matches!(
            ledger.add_goal("  ", 1_000.0, None, "", at(1, 10)),
            Err(LedgerError::InvalidInput(_))
        ));
        ledger.add_goal("HP", 1_000_000.0, None, "", at(1, 10)).unwrap();
        assert_eq!(
            ledger.contribute_to_goal("HP", 50_000.0, at(1, 11)).unwrap_err(),
            LedgerError::InsufficientBalance("kontribusi ini")
        );
    }

    #[test]
    fn test_aggregates() {
        let mut ledger = Ledger::new();
        let may = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 5, 10, 9, 0, 0)
            .unwrap();
        ledger.add_income(entry(4_000_000.0, "Gaji", may)).unwrap();
        ledger.add_income(entry(6_000_000.0, "Gaji", at(10, 9))).unwrap();
        let today = at(20, 9).date_naive();
        ledger.add_expense(entry(100_000.0, "Makanan", at(11, 9)), today).unwrap();
        ledger.add_expense(entry(300_000.0, "Belanja", at(12, 9)), today).unwrap();
        ledger.add_expense(entry(50_000.0, "Makanan", at(13, 9)), today).unwrap();

        assert_eq!(ledger.monthly_average(TransactionKind::Income), 5_000_000.0);
        assert_eq!(ledger.monthly_average(TransactionKind::Expense), 450_000.0);
        assert_eq!(
            ledger.expenses_by_category(),
            vec![("Belanja".to_string(), 300_000.0), ("Makanan".to_string(), 150_000.0)]
        );
    }

    #[test]
    fn test_reset_and_json_round_trip() {
        let mut ledger = funded(100_000.0);
        ledger.daily_limit.enabled = true;

        let json = serde_json::to_string(&ledger).unwrap();
        let restored: Ledger = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, ledger);

        ledger.reset();
        assert!(ledger.transactions.is_empty());
        assert!(!ledger.daily_limit.enabled);
    }

    #[test]
    fn test_wallet_parse() {
        assert_eq!("Cash".parse::<Wallet>(), Ok(Wallet::Cash));
        assert_eq!("e-wallet".parse::<Wallet>(), Ok(Wallet::Ewallet));
        assert!("dompet".parse::<Wallet>().is_err());
    }
}
