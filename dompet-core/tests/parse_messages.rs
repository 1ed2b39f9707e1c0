use chrono::{DateTime, Datelike, FixedOffset, TimeZone};
use dompet_core::{
    Action, ActionMatch, AiStats, DateRule, Lexicon, clarification_prompt, process_message,
};

fn jakarta(y: i32, m: u32, d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(y, m, d, h, 15, 0)
        .unwrap()
}

#[test]
fn expense_yesterday_end_to_end() {
    let now = jakarta(2024, 3, 1, 8);
    let r = process_message(&Lexicon::indonesian(), "Beli makanan 25rb kemarin", now);

    assert!(r.understood);
    assert_eq!(r.action, Some(Action::Expense));
    assert_eq!(r.category.as_deref(), Some("Makanan"));
    assert_eq!(r.amount, 25_000.0);

    let date = r.date.unwrap();
    assert_eq!((date.year(), date.month(), date.day()), (2024, 2, 29));
    assert_eq!(r.date_rule, Some(DateRule::Timeframe));
}

#[test]
fn income_without_date_is_now() {
    let now = jakarta(2024, 6, 12, 9);
    let r = process_message(&Lexicon::indonesian(), "gaji 5 juta", now);

    assert_eq!(r.action, Some(Action::Income));
    assert_eq!(r.category.as_deref(), Some("Gaji"));
    assert_eq!(r.amount, 5_000_000.0);
    assert_eq!(r.date, Some(now));
}

#[test]
fn savings_has_no_category() {
    let now = jakarta(2024, 6, 12, 9);
    let r = process_message(&Lexicon::indonesian(), "nabung 50rb", now);

    assert_eq!(r.action, Some(Action::Savings));
    assert_eq!(r.amount, 50_000.0);
    assert_eq!(r.category, None);
    assert_eq!(r.date, Some(now));

    let json = serde_json::to_value(&r).unwrap();
    assert_eq!(json["action"], "savings");
    assert!(json["category"].is_null());
}

#[test]
fn gibberish_gets_expense_clarification() {
    let r = process_message(&Lexicon::indonesian(), "xyz qwerty", jakarta(2024, 6, 12, 9));

    assert!(!r.understood);
    assert_eq!(r.detection, ActionMatch::Fallback);
    assert_eq!(r.response, clarification_prompt(Action::Expense));
}

#[test]
fn punctuation_and_separators() {
    let now = jakarta(2024, 6, 12, 9);
    let lex = Lexicon::indonesian();

    let r = process_message(&lex, "Bayar listrik Rp. 150.000!", now);
    assert_eq!(r.amount, 150_000.0);
    assert_eq!(r.action, Some(Action::Expense));

    let r = process_message(&lex, "terima bonus 2,5jt", now);
    assert_eq!(r.amount, 2_500_000.0);
    assert_eq!(r.category.as_deref(), Some("Bonus"));
}

#[test]
fn dated_savings_message() {
    let now = jakarta(2024, 6, 20, 9);
    let r = process_message(&Lexicon::indonesian(), "setor 200rb tanggal 3 juni", now);

    assert_eq!(r.action, Some(Action::Savings));
    assert_eq!(r.date_rule, Some(DateRule::MonthName));
    assert!(r.response.ends_with("dengan tanggal Senin, 3 Juni 2024."));
}

#[test]
fn stats_follow_executed_actions() {
    let today = jakarta(2024, 6, 12, 9).date_naive();
    let stats = AiStats::default().record_executed(today);
    assert_eq!(stats.processed_count, 1);
    assert_eq!(stats.today_count(today), 1);
}
