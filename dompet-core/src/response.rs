//! Turns a raw chat message into a [`ParseResult`].

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use tracing::debug;

use crate::amount::extract_amount;
use crate::currency::format_currency;
use crate::dates::{DateRule, extract_date, format_detected_date};
use crate::intent::{Action, ActionMatch, describe, detect_action, detect_category};
use crate::lexicon::Lexicon;
use crate::normalize::{normalize_message, normalize_numeric, words};

/// Structured interpretation of one message.
///
/// When `understood` is false only `response` (a clarification prompt) and
/// `detection` are meaningful.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParseResult {
    pub understood: bool,
    pub action: Option<Action>,
    pub detection: ActionMatch,
    pub amount: f64,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<DateTime<FixedOffset>>,
    pub date_rule: Option<DateRule>,
    pub confidence: f64,
    pub response: String,
}

impl ParseResult {
    fn clarification(detection: ActionMatch) -> Self {
        Self {
            understood: false,
            action: None,
            detection,
            amount: 0.0,
            category: None,
            description: None,
            date: None,
            date_rule: None,
            confidence: 0.0,
            response: clarification_prompt(detection.action()).to_string(),
        }
    }
}

/// Parse a message against `lexicon`, resolving relative dates from `now`.
///
/// Pure: no I/O, no shared state. Messages without a positive amount come
/// back as a clarification prompt for the detected action.
pub fn process_message(lexicon: &Lexicon, text: &str, now: DateTime<FixedOffset>) -> ParseResult {
    let normalized = normalize_message(text);
    let tokens = words(&normalized);
    let amount = extract_amount(&normalize_numeric(text));
    let detection = detect_action(&tokens, lexicon);
    let action = detection.action();

    if amount <= 0.0 {
        debug!(?detection, "no amount found, asking for clarification");
        return ParseResult::clarification(detection);
    }

    let resolved = extract_date(&normalized, now, lexicon);
    let category = detect_category(&tokens, action, lexicon);
    let description = describe(&tokens, action, lexicon);

    let date_phrase = (resolved.at != now).then(|| format_detected_date(resolved.at, now));
    let response = render_response(action, amount, category.as_deref(), date_phrase.as_deref());

    debug!(
        ?action,
        amount,
        category = category.as_deref().unwrap_or("-"),
        rule = ?resolved.rule,
        "message understood"
    );

    ParseResult {
        understood: true,
        action: Some(action),
        detection,
        amount,
        category,
        description: Some(description),
        date: Some(resolved.at),
        date_rule: Some(resolved.rule),
        confidence: action.confidence(),
        response,
    }
}

fn render_response(action: Action, amount: f64, category: Option<&str>, date: Option<&str>) -> String {
    let money = format_currency(amount);
    let category = category.unwrap_or_default();

    match action {
        Action::Expense => format!(
            "Saya mendeteksi pengeluaran {money} untuk kategori {category}{}. Apakah sudah benar?",
            date.map(|d| format!(" pada {d}")).unwrap_or_default()
        ),
        Action::Income => format!(
            "Saya mendeteksi pemasukan {money} untuk kategori {category}{}. Apakah sudah benar?",
            date.map(|d| format!(" pada {d}")).unwrap_or_default()
        ),
        Action::Savings => format!(
            "Saya akan menambahkan {money} ke tabungan Anda{}.",
            date.map(|d| format!(" dengan tanggal {d}")).unwrap_or_default()
        ),
        Action::Withdraw => format!(
            "Saya akan menarik {money} dari tabungan Anda{}.",
            date.map(|d| format!(" dengan tanggal {d}")).unwrap_or_default()
        ),
    }
}

pub fn clarification_prompt(action: Action) -> &'static str {
    match action {
        Action::Withdraw => {
            "Berapa jumlah yang ingin Anda ambil dari tabungan? Contoh: 'ambil tabungan 50rb' atau 'tarik 100 ribu'."
        }
        Action::Savings => {
            "Berapa jumlah yang ingin Anda tabung? Contoh: 'nabung 50rb' atau 'simpan 100 ribu'."
        }
        Action::Income => {
            "Berapa jumlah pemasukan yang ingin dicatat? Contoh: 'gaji 5 juta' atau 'bonus 500rb'."
        }
        Action::Expense => {
            "Berapa jumlah pengeluaran yang ingin dicatat? Contoh: 'beli makanan 25rb' atau 'bayar listrik 150 ribu'."
        }
    }
}
