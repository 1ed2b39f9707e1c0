//! Date resolution for chat messages ("kemarin", "3 hari lalu", "12 juni").
//!
//! Extraction is an ordered list of rules; the first rule that yields a real
//! calendar date wins and anything unrecognized resolves to `now`. All dates
//! are computed in the offset of `now`, so callers pick the timezone.

use chrono::{DateTime, Datelike, Days, Duration, FixedOffset, Months, TimeZone, Weekday};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;
use tracing::debug;

use crate::amount::MAGNITUDE_UNITS;
use crate::lexicon::Lexicon;
use crate::matcher::matches_exact;

/// Symbolic timeframe named by a fixed phrase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timeframe {
    Today,
    Yesterday,
    Tomorrow,
    DayAfterTomorrow,
    ThisWeek,
    LastWeek,
    /// The most recent Sunday strictly before today.
    LastSunday,
    NextWeek,
    ThisMonth,
    LastMonth,
    NextMonth,
    ThisYear,
    LastYear,
    NextYear,
    /// A weekday name; resolves to its next occurrence after today.
    Day(Weekday),
}

/// Which occurrence of a weekday to pick relative to the base date.
/// Both directions skip the base date itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDirection {
    Upcoming,
    Previous,
}

/// The rule that produced a resolved date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DateRule {
    MonthName,
    LastMonth,
    LastYear,
    RelativeOffset,
    Timeframe,
    Numeric,
    /// No temporal expression; the date is `now`.
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedDate {
    pub at: DateTime<FixedOffset>,
    pub rule: DateRule,
}

struct DateContext<'a> {
    text: &'a str,
    words: Vec<&'a str>,
    now: DateTime<FixedOffset>,
    lexicon: &'a Lexicon,
}

type RuleFn = fn(&DateContext<'_>) -> Option<DateTime<FixedOffset>>;

/// Evaluated top to bottom.
const DATE_RULES: &[(DateRule, RuleFn)] = &[
    (DateRule::MonthName, month_name_date),
    (DateRule::LastMonth, last_month),
    (DateRule::LastYear, last_year),
    (DateRule::RelativeOffset, relative_offset),
    (DateRule::Timeframe, timeframe_keyword),
    (DateRule::Numeric, numeric_date),
];

const MONTHS: &[(&str, u32)] = &[
    ("januari", 1),
    ("februari", 2),
    ("maret", 3),
    ("april", 4),
    ("mei", 5),
    ("juni", 6),
    ("juli", 7),
    ("agustus", 8),
    ("september", 9),
    ("oktober", 10),
    ("november", 11),
    ("desember", 12),
    ("jan", 1),
    ("feb", 2),
    ("mar", 3),
    ("apr", 4),
    ("jun", 6),
    ("jul", 7),
    ("agu", 8),
    ("sep", 9),
    ("okt", 10),
    ("nov", 11),
    ("des", 12),
];

static MONTH_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?i)\b(?P<day>\d{1,2})\s+",
        r"(?P<month>januari|februari|maret|april|mei|juni|juli|agustus|september|oktober|november|desember",
        r"|jan|feb|mar|apr|jun|jul|agu|sep|okt|nov|des)\b",
        r"(?:\s+(?P<year>\d{2,4})\b)?"
    ))
    .expect("month date regex")
});

static RELATIVE_OFFSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?P<n>\d+)\s*(?P<unit>hari|minggu|bulan|tahun)\s*(?:lalu|yang lalu|kemarin)")
        .expect("relative offset regex")
});

static NUMERIC_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?P<day>\d{1,2})[/\-\s](?P<month>\d{1,2})\b(?:[/\-\s](?P<year>\d{2,4})\b)?")
        .expect("numeric date regex")
});

/// Resolve the date a normalized message refers to.
pub fn extract_date(text: &str, now: DateTime<FixedOffset>, lexicon: &Lexicon) -> ResolvedDate {
    let ctx = DateContext {
        text,
        words: text.split(' ').filter(|w| !w.is_empty()).collect(),
        now,
        lexicon,
    };

    for (rule, handler) in DATE_RULES {
        if let Some(at) = handler(&ctx) {
            debug!(?rule, date = %at.to_rfc3339(), "date rule matched");
            return ResolvedDate { at, rule: *rule };
        }
    }

    ResolvedDate {
        at: now,
        rule: DateRule::Default,
    }
}

/// Apply a timeframe to a base date.
pub fn calculate_date(timeframe: Timeframe, base: DateTime<FixedOffset>) -> DateTime<FixedOffset> {
    let shifted = match timeframe {
        Timeframe::Today | Timeframe::ThisWeek | Timeframe::ThisMonth | Timeframe::ThisYear => {
            Some(base)
        }
        Timeframe::Yesterday => base.checked_sub_days(Days::new(1)),
        Timeframe::Tomorrow => base.checked_add_days(Days::new(1)),
        Timeframe::DayAfterTomorrow => base.checked_add_days(Days::new(2)),
        Timeframe::LastWeek => base.checked_sub_days(Days::new(7)),
        Timeframe::NextWeek => base.checked_add_days(Days::new(7)),
        Timeframe::LastMonth => base.checked_sub_months(Months::new(1)),
        Timeframe::NextMonth => base.checked_add_months(Months::new(1)),
        Timeframe::LastYear => base.checked_sub_months(Months::new(12)),
        Timeframe::NextYear => base.checked_add_months(Months::new(12)),
        Timeframe::LastSunday => Some(resolve_weekday(Weekday::Sun, base, SearchDirection::Previous)),
        Timeframe::Day(weekday) => Some(resolve_weekday(weekday, base, SearchDirection::Upcoming)),
    };
    shifted.unwrap_or(base)
}

/// Nearest occurrence of `weekday` strictly after (or before) the base date.
/// Naming today's weekday moves a full week.
pub fn resolve_weekday(
    weekday: Weekday,
    base: DateTime<FixedOffset>,
    direction: SearchDirection,
) -> DateTime<FixedOffset> {
    let current = i64::from(base.weekday().num_days_from_sunday());
    let target = i64::from(weekday.num_days_from_sunday());

    let offset = match direction {
        SearchDirection::Upcoming => match (target - current).rem_euclid(7) {
            0 => 7,
            d => d,
        },
        SearchDirection::Previous => match (current - target).rem_euclid(7) {
            0 => -7,
            d => -d,
        },
    };
    base + Duration::days(offset)
}

/// Human phrase for a resolved date: "hari ini", "kemarin", "besok", or a
/// long Indonesian date such as "Rabu, 12 Juni 2024".
pub fn format_detected_date(date: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> String {
    let (day, today) = (date.date_naive(), now.date_naive());

    if day == today {
        return "hari ini".to_string();
    }
    if today.pred_opt() == Some(day) {
        return "kemarin".to_string();
    }
    if today.succ_opt() == Some(day) {
        return "besok".to_string();
    }
    format_long_date(date)
}

pub fn format_long_date(date: DateTime<FixedOffset>) -> String {
    format!(
        "{}, {} {} {}",
        weekday_name(date.weekday()),
        date.day(),
        month_name(date.month()),
        date.year()
    )
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Senin",
        Weekday::Tue => "Selasa",
        Weekday::Wed => "Rabu",
        Weekday::Thu => "Kamis",
        Weekday::Fri => "Jumat",
        Weekday::Sat => "Sabtu",
        Weekday::Sun => "Minggu",
    }
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "Januari",
        2 => "Februari",
        3 => "Maret",
        4 => "April",
        5 => "Mei",
        6 => "Juni",
        7 => "Juli",
        8 => "Agustus",
        9 => "September",
        10 => "Oktober",
        11 => "November",
        _ => "Desember",
    }
}

fn month_name_date(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    let caps = MONTH_DATE.captures(ctx.text)?;
    let day: u32 = caps["day"].parse().ok()?;
    let name = caps["month"].to_lowercase();
    let month = MONTHS.iter().find(|(n, _)| *n == name).map(|(_, m)| *m)?;
    let year = match caps.name("year") {
        Some(y) => expand_year(y.as_str())?,
        None => ctx.now.year(),
    };
    local_midnight(ctx.now, year, month, day)
}

fn last_month(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    unquantified(&ctx.words, "bulan")
        .then(|| ctx.now.checked_sub_months(Months::new(1)))
        .flatten()
}

fn last_year(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    unquantified(&ctx.words, "tahun")
        .then(|| ctx.now.checked_sub_months(Months::new(12)))
        .flatten()
}

fn relative_offset(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    let caps = RELATIVE_OFFSET.captures(ctx.text)?;
    let n: u32 = caps["n"].parse().ok()?;

    match caps["unit"].to_lowercase().as_str() {
        "hari" => ctx.now.checked_sub_days(Days::new(u64::from(n))),
        "minggu" => ctx.now.checked_sub_days(Days::new(u64::from(n) * 7)),
        "bulan" => ctx.now.checked_sub_months(Months::new(n)),
        "tahun" => ctx.now.checked_sub_months(Months::new(n.checked_mul(12)?)),
        _ => None,
    }
}

/// Multi-word phrases first, then single words, each pass in table order.
/// "minggu kemarin" is last Sunday, not yesterday or the coming Sunday.
fn timeframe_keyword(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    for multi_word in [true, false] {
        for (timeframe, phrases) in ctx.lexicon.dates {
            let hit = phrases
                .iter()
                .filter(|p| p.contains(' ') == multi_word)
                .any(|p| matches_exact(&ctx.words, p));
            if hit {
                debug!(?timeframe, "timeframe phrase matched");
                return Some(calculate_date(*timeframe, ctx.now));
            }
        }
    }
    None
}

/// `DD MM [YY]`. A match followed by a magnitude unit is a decimal amount
/// that lost its separator ("1,5 juta" normalizes to "1 5 juta").
fn numeric_date(ctx: &DateContext<'_>) -> Option<DateTime<FixedOffset>> {
    let caps = NUMERIC_DATE.captures_iter(ctx.text).find(|caps| {
        let end = caps.get(0).map_or(0, |m| m.end());
        !starts_with_unit(&ctx.text[end..])
    })?;
    let day: u32 = caps["day"].parse().ok()?;
    let month: u32 = caps["month"].parse().ok()?;
    let year = match caps.name("year") {
        Some(y) => expand_year(y.as_str())?,
        None => ctx.now.year(),
    };
    local_midnight(ctx.now, year, month, day)
}

fn starts_with_unit(rest: &str) -> bool {
    rest.split_whitespace()
        .next()
        .is_some_and(|w| MAGNITUDE_UNITS.iter().any(|(unit, _)| *unit == w))
}

/// "bulan lalu" / "sebulan kemarin", but not "3 bulan lalu" which belongs
/// to the relative offset rule.
fn unquantified(words: &[&str], unit: &str) -> bool {
    words.windows(2).enumerate().any(|(i, pair)| {
        let quantified = i > 0 && words[i - 1].chars().all(|c| c.is_ascii_digit());
        pair[0].ends_with(unit) && matches!(pair[1], "lalu" | "kemarin") && !quantified
    })
}

/// Two-digit years are in the 2000s.
fn expand_year(raw: &str) -> Option<i32> {
    let year: i32 = raw.parse().ok()?;
    Some(if raw.len() == 2 { 2000 + year } else { year })
}

/// Midnight in the offset of `now`; `None` for dates that do not exist.
fn local_midnight(
    now: DateTime<FixedOffset>,
    year: i32,
    month: u32,
    day: u32,
) -> Option<DateTime<FixedOffset>> {
    now.timezone()
        .with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(y, m, d, h, 30, 0)
            .unwrap()
    }

    fn ymd(dt: DateTime<FixedOffset>) -> (i32, u32, u32) {
        (dt.year(), dt.month(), dt.day())
    }

    fn resolve(text: &str, now: DateTime<FixedOffset>) -> ResolvedDate {
        extract_date(text, now, &Lexicon::indonesian())
    }

    #[test]
    fn test_yesterday_across_leap_month_boundary() {
        let base = at(2024, 3, 1, 9);
        assert_eq!(ymd(calculate_date(Timeframe::Yesterday, base)), (2024, 2, 29));
    }

    #[test]
    fn test_calculate_relative_days() {
        // 2024-06-12 is a Wednesday
        let base = at(2024, 6, 12, 9);
        assert_eq!(calculate_date(Timeframe::Today, base), base);
        assert_eq!(ymd(calculate_date(Timeframe::Tomorrow, base)), (2024, 6, 13));
        assert_eq!(ymd(calculate_date(Timeframe::DayAfterTomorrow, base)), (2024, 6, 14));
        assert_eq!(ymd(calculate_date(Timeframe::LastWeek, base)), (2024, 6, 5));
        assert_eq!(ymd(calculate_date(Timeframe::NextWeek, base)), (2024, 6, 19));
        assert_eq!(ymd(calculate_date(Timeframe::LastYear, base)), (2023, 6, 12));
    }

    #[test]
    fn test_month_arithmetic_clamps() {
        let base = at(2024, 3, 31, 9);
        assert_eq!(ymd(calculate_date(Timeframe::LastMonth, base)), (2024, 2, 29));
        assert_eq!(ymd(calculate_date(Timeframe::NextMonth, base)), (2024, 4, 30));
    }

    #[test]
    fn test_weekday_upcoming_skips_today() {
        let wednesday = at(2024, 6, 12, 9);
        assert_eq!(
            ymd(resolve_weekday(Weekday::Mon, wednesday, SearchDirection::Upcoming)),
            (2024, 6, 17)
        );
        assert_eq!(
            ymd(resolve_weekday(Weekday::Fri, wednesday, SearchDirection::Upcoming)),
            (2024, 6, 14)
        );
        assert_eq!(
            ymd(resolve_weekday(Weekday::Wed, wednesday, SearchDirection::Upcoming)),
            (2024, 6, 19)
        );
    }

    #[test]
    fn test_last_sunday() {
        let wednesday = at(2024, 6, 12, 9);
        assert_eq!(ymd(calculate_date(Timeframe::LastSunday, wednesday)), (2024, 6, 9));
        let sunday = at(2024, 6, 16, 9);
        assert_eq!(ymd(calculate_date(Timeframe::LastSunday, sunday)), (2024, 6, 9));
        let monday = at(2024, 6, 17, 9);
        assert_eq!(ymd(calculate_date(Timeframe::LastSunday, monday)), (2024, 6, 16));
    }

    #[test]
    fn test_month_name_date() {
        let now = at(2024, 6, 20, 9);
        let r = resolve("beli baju 12 juni", now);
        assert_eq!(r.rule, DateRule::MonthName);
        assert_eq!(r.at, FixedOffset::east_opt(7 * 3600).unwrap().with_ymd_and_hms(2024, 6, 12, 0, 0, 0).unwrap());

        assert_eq!(ymd(resolve("gaji 15 januari 2023", now).at), (2023, 1, 15));
        assert_eq!(ymd(resolve("bayar 3 okt 22", now).at), (2022, 10, 3));
    }

    #[test]
    fn test_invalid_month_name_date_falls_through() {
        let now = at(2024, 6, 20, 9);
        let r = resolve("beli 31 februari", now);
        assert_eq!(r.rule, DateRule::Default);
        assert_eq!(r.at, now);
    }

    #[test]
    fn test_last_month_and_year_phrases() {
        let now = at(2024, 6, 20, 9);
        let r = resolve("bayar kos bulan lalu", now);
        assert_eq!(r.rule, DateRule::LastMonth);
        assert_eq!(ymd(r.at), (2024, 5, 20));

        let r = resolve("bonus tahun kemarin", now);
        assert_eq!(r.rule, DateRule::LastYear);
        assert_eq!(ymd(r.at), (2023, 6, 20));
    }

    #[test]
    fn test_relative_offsets() {
        let now = at(2024, 6, 20, 9);
        assert_eq!(ymd(resolve("makan 3 hari lalu", now).at), (2024, 6, 17));
        assert_eq!(ymd(resolve("makan 2 minggu yang lalu", now).at), (2024, 6, 6));
        let r = resolve("bayar 2 bulan lalu", now);
        assert_eq!(r.rule, DateRule::RelativeOffset);
        assert_eq!(ymd(r.at), (2024, 4, 20));
        assert_eq!(ymd(resolve("bonus 1 tahun kemarin", now).at), (2023, 6, 20));
    }

    #[test]
    fn test_timeframe_keywords() {
        let now = at(2024, 6, 12, 9);
        let r = resolve("beli makanan 25rb kemarin", now);
        assert_eq!(r.rule, DateRule::Timeframe);
        assert_eq!(ymd(r.at), (2024, 6, 11));
        assert_eq!(ymd(resolve("bayar besok", now).at), (2024, 6, 13));
        assert_eq!(ymd(resolve("lusa", now).at), (2024, 6, 14));
        assert_eq!(resolve("tadi makan", now).at, now);
    }

    #[test]
    fn test_multi_word_phrases_win_over_single_words() {
        let now = at(2024, 6, 12, 9);
        assert_eq!(ymd(resolve("belanja minggu lalu", now).at), (2024, 6, 5));
        assert_eq!(ymd(resolve("jajan minggu kemarin", now).at), (2024, 6, 9));
        assert_eq!(ymd(resolve("bayar minggu depan", now).at), (2024, 6, 19));
        assert_eq!(resolve("hemat minggu ini", now).at, now);
        // bare "minggu" is the coming Sunday
        assert_eq!(ymd(resolve("jalan minggu", now).at), (2024, 6, 16));
    }

    #[test]
    fn test_weekday_names_resolve_forward() {
        let now = at(2024, 6, 12, 9);
        assert_eq!(ymd(resolve("senin", now).at), (2024, 6, 17));
        assert_eq!(ymd(resolve("beli kopi sabtu", now).at), (2024, 6, 15));
    }

    #[test]
    fn test_numeric_dates() {
        let now = at(2024, 6, 20, 9);
        let r = resolve("bayar 15 06", now);
        assert_eq!(r.rule, DateRule::Numeric);
        assert_eq!(ymd(r.at), (2024, 6, 15));
        assert_eq!(ymd(resolve("gaji 1 2 23", now).at), (2023, 2, 1));
        assert_eq!(ymd(resolve("tgl 5 7 2022", now).at), (2022, 7, 5));
    }

    #[test]
    fn test_numeric_date_rejects_grouped_amounts() {
        let now = at(2024, 6, 20, 9);
        // "25 000" comes from a normalized "25.000", not a date
        assert_eq!(resolve("bayar 25 000", now).rule, DateRule::Default);
        assert_eq!(resolve("beli 31 02", now).rule, DateRule::Default);
    }

    #[test]
    fn test_numeric_date_skips_decimal_amounts() {
        let now = at(2024, 6, 20, 9);
        // normalized forms of "1,5 juta" and "2.5 rb"
        assert_eq!(resolve("gaji 1 5 juta", now).rule, DateRule::Default);
        assert_eq!(resolve("beli kopi 2 5 rb", now).rule, DateRule::Default);
        // a later real date still counts
        let r = resolve("gaji 1 5 juta tgl 3 6", now);
        assert_eq!(r.rule, DateRule::Numeric);
        assert_eq!(ymd(r.at), (2024, 6, 3));
    }

    #[test]
    fn test_no_temporal_expression_is_now() {
        let now = at(2024, 6, 20, 9);
        let r = resolve("gaji 5 juta", now);
        assert_eq!(r.rule, DateRule::Default);
        assert_eq!(r.at, now);
    }

    #[test]
    fn test_format_detected_date() {
        let now = at(2024, 6, 12, 9);
        assert_eq!(format_detected_date(now, now), "hari ini");
        assert_eq!(format_detected_date(at(2024, 6, 11, 0), now), "kemarin");
        assert_eq!(format_detected_date(at(2024, 6, 13, 23), now), "besok");
        assert_eq!(format_detected_date(at(2024, 6, 1, 0), now), "Sabtu, 1 Juni 2024");
    }
}
