//! Amount extraction for Indonesian money expressions ("25rb", "5 juta", "25.000").

use regex::Regex;
use std::sync::LazyLock;

/// Magnitude units in detection order. A token containing several unit
/// fragments takes the first one listed here.
pub const MAGNITUDE_UNITS: &[(&str, f64)] = &[
    ("rb", 1_000.0),
    ("ribu", 1_000.0),
    ("jt", 1_000_000.0),
    ("juta", 1_000_000.0),
    ("ratus", 100.0),
    ("puluh", 10.0),
    ("k", 1_000.0),
    ("m", 1_000_000.0),
];

// <number><unit>, the unit must end the word ("5 mangkok" is not 5 million)
static UNIT_AMOUNT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\d+(?:[.,]\d+)*\s*(?:rb|ribu|jt|juta|k|m|ratus|puluh)\b")
        .expect("unit amount regex")
});

static GROUPED_AMOUNT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:[.,]\d{3})+").expect("grouped amount regex"));

static BARE_AMOUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\d+").expect("bare amount regex"));

static GROUPED_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{1,3}(?:[.,]\d{3})+$").expect("grouped number regex"));

/// Return the first strictly positive amount in the text, or 0.
///
/// Patterns are tried in order: unit suffixed numbers, grouped digits, then
/// any bare digit run.
pub fn extract_amount(text: &str) -> f64 {
    for pattern in [&*UNIT_AMOUNT, &*GROUPED_AMOUNT, &*BARE_AMOUNT] {
        for m in pattern.find_iter(text) {
            let amount = parse_amount(m.as_str());
            if amount > 0.0 {
                return amount;
            }
        }
    }
    0.0
}

/// Parse a single amount token such as "25rb", "2,5jt" or "100.000".
pub fn parse_amount(token: &str) -> f64 {
    let lowered = token.to_lowercase();
    let mut amount = 0.0;

    for (unit, multiplier) in MAGNITUDE_UNITS {
        if let Some(idx) = lowered.find(unit) {
            let number_part = format!("{}{}", &lowered[..idx], &lowered[idx + unit.len()..]);
            amount = parse_number(number_part.trim()) * multiplier;
            break;
        }
    }

    if amount <= 0.0 {
        amount = digits_only(&lowered);
    }
    amount
}

/// "1.500" is fifteen hundred, "2,5" is two and a half.
fn parse_number(s: &str) -> f64 {
    if GROUPED_NUMBER.is_match(s) {
        return digits_only(s);
    }
    s.replacen(',', ".", 1).parse().unwrap_or(0.0)
}

fn digits_only(s: &str) -> f64 {
    let digits: String = s.chars().filter(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0.0)
}
