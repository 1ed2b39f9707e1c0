//! Error types for ledger operations

use thiserror::Error;

use dompet_core::format_currency;

/// Rejections raised while applying an operation to the ledger. Messages are
/// shown to the user as-is.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LedgerError {
    #[error("Jumlah harus lebih dari 0")]
    InvalidAmount,

    #[error("Saldo tidak mencukupi untuk {0}.")]
    InsufficientBalance(&'static str),

    #[error("Saldo tabungan tidak mencukupi.")]
    InsufficientSavings,

    #[error("Target tidak ditemukan: {0}")]
    GoalNotFound(String),

    #[error("Tidak ada dana yang bisa ditarik dari target ini")]
    NothingToWithdraw,

    #[error("Jumlah penarikan melebihi dana yang tersedia")]
    ExceedsGoalFunds,

    #[error("Pengeluaran melebihi batas harian! Sisa limit: {}", rupiah(.remaining))]
    DailyLimitExceeded { remaining: f64 },

    #[error("Batas harian minimal {}", rupiah(.minimum))]
    LimitTooLow { minimum: f64 },

    #[error("Input tidak valid: {0}")]
    InvalidInput(String),

    #[error("Pesan belum dipahami: {0}")]
    NotUnderstood(String),
}

fn rupiah(amount: &f64) -> String {
    format_currency(*amount)
}

pub type Result<T> = std::result::Result<T, LedgerError>;
