use chrono::{DateTime, FixedOffset, TimeZone};
use dompet_core::{AiStats, Lexicon};
use dompet_finance::{
    GOAL_CATEGORY, Ledger, LedgerError, Outcome, SAVINGS_CATEGORY, TransactionKind,
    handle_message,
};

fn at(d: u32, h: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(7 * 3600)
        .unwrap()
        .with_ymd_and_hms(2024, 6, d, h, 0, 0)
        .unwrap()
}

#[test]
fn a_week_of_chat_messages() {
    let lex = Lexicon::indonesian();
    let mut ledger = Ledger::new();
    let mut stats = AiStats::default();

    for (text, when) in [
        ("gajian 5jt", at(10, 8)),
        ("beli makanan 25rb kemarin", at(10, 12)),
        ("isi bensin 50.000", at(11, 7)),
        ("nabung 1 juta", at(11, 20)),
        ("ambil tabungan 200rb", at(12, 9)),
    ] {
        let reply = handle_message(&mut ledger, &lex, text, when, stats);
        assert!(
            matches!(reply.outcome, Outcome::Executed { .. }),
            "{text}: {}",
            reply.message
        );
        stats = reply.stats;
    }

    assert_eq!(stats.processed_count, 5);
    assert_eq!(stats.messages_today, 1);
    assert_eq!(ledger.balance(), 5_000_000.0 - 25_000.0 - 50_000.0 - 1_000_000.0 + 200_000.0);
    assert_eq!(ledger.savings_balance(), 800_000.0);

    // the backdated expense keeps its date
    let food = ledger
        .transactions
        .iter()
        .find(|t| t.category == "Makanan")
        .unwrap();
    assert_eq!(food.date.date_naive(), at(9, 0).date_naive());

    let deposit = ledger
        .transactions
        .iter()
        .find(|t| t.category == SAVINGS_CATEGORY)
        .unwrap();
    assert_eq!(deposit.kind, TransactionKind::Expense);
}

#[test]
fn rejected_messages_do_not_count() {
    let lex = Lexicon::indonesian();
    let mut ledger = Ledger::new();

    let reply = handle_message(&mut ledger, &lex, "nabung 100rb", at(1, 9), AiStats::default());
    assert_eq!(
        reply.outcome,
        Outcome::Failed(LedgerError::InsufficientBalance("menabung"))
    );
    assert_eq!(reply.stats, AiStats::default());
    assert!(ledger.transactions.is_empty());
}

#[test]
fn goal_contributions_skip_the_daily_limit() {
    let mut ledger = Ledger::new();
    ledger.daily_limit.enabled = true;
    ledger.daily_limit.amount = 10_000.0;

    let lex = Lexicon::indonesian();
    handle_message(&mut ledger, &lex, "gaji 2 juta", at(3, 9), AiStats::default());

    ledger.add_goal("Motor", 1_000_000.0, None, "", at(3, 9)).unwrap();
    ledger.contribute_to_goal("motor", 500_000.0, at(3, 10)).unwrap();
    ledger.deposit_savings(100_000.0, "", at(3, 11)).unwrap();

    assert_eq!(ledger.transactions[1].category, GOAL_CATEGORY);
    assert_eq!(ledger.spent_today(at(3, 12).date_naive()), 0.0);
}

#[test]
fn decimal_amounts_stay_dated_today_and_hit_the_limit() {
    let mut ledger = Ledger::new();
    ledger.daily_limit.enabled = true;
    ledger.daily_limit.amount = 1_000_000.0;

    let lex = Lexicon::indonesian();
    let stats = handle_message(&mut ledger, &lex, "gaji 5 juta", at(4, 9), AiStats::default()).stats;

    let reply = handle_message(&mut ledger, &lex, "beli hp 1,5 juta", at(4, 10), stats);
    assert_eq!(
        reply.outcome,
        Outcome::Failed(LedgerError::DailyLimitExceeded { remaining: 1_000_000.0 })
    );
    assert_eq!(ledger.transactions.len(), 1);
}
