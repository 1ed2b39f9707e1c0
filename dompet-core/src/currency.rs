//! Rupiah formatting for chat replies.

/// Format an amount as Indonesian Rupiah with two decimals: `Rp 25.000,00`.
pub fn format_currency(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}Rp {},{:02}", group_thousands(cents / 100), cents % 100)
}

/// Short form used in summaries: `Rp 2,5 jt`, `Rp 150 rb`.
pub fn format_currency_short(amount: f64) -> String {
    let abs = amount.abs();
    let sign = if amount < 0.0 { "-" } else { "" };
    if abs >= 1_000_000_000.0 {
        format!("{sign}Rp {} M", trim_decimal(abs / 1_000_000_000.0))
    } else if abs >= 1_000_000.0 {
        format!("{sign}Rp {} jt", trim_decimal(abs / 1_000_000.0))
    } else if abs >= 1_000.0 {
        format!("{sign}Rp {} rb", trim_decimal(abs / 1_000.0))
    } else {
        format!("{sign}Rp {}", trim_decimal(abs))
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

/// One decimal with a comma, dropped when it is zero.
fn trim_decimal(value: f64) -> String {
    let tenths = (value * 10.0).round() as u64;
    if tenths % 10 == 0 {
        (tenths / 10).to_string()
    } else {
        format!("{},{}", tenths / 10, tenths % 10)
    }
}
