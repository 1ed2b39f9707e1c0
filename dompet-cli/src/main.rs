use anyhow::{bail, Context, Result};
use chrono::{DateTime, FixedOffset, NaiveDate};
use clap::{Parser, Subcommand};
use dompet_core::{format_currency, format_currency_short, process_message, Lexicon, StatsStore};
use dompet_finance::{Entry, Ledger, LimitCheck, TransactionKind, Wallet};
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod chat;
mod config;
mod export;
mod state;

use chat::Session;
use config::Config;

#[derive(Parser, Debug)]
#[command(
    name = "dompet",
    version = concat!(env!("CARGO_PKG_VERSION"), " (", env!("DOMPET_BUILD_SHA"), ")"),
    about = "Catat keuangan lewat chat bahasa Indonesia"
)]
struct Cli {
    /// Debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a message, apply it to the ledger and print the reply
    Say {
        #[arg(required = true)]
        message: Vec<String>,
    },

    /// Parse a message without touching the ledger
    Parse {
        #[arg(required = true)]
        message: Vec<String>,

        /// Print the full parse result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Interactive chat over stdin ("keluar" to quit)
    Chat,

    /// Record income manually
    Income(ManualEntry),

    /// Record an expense manually (daily limit applies)
    Expense(ManualEntry),

    /// Savings deposits and withdrawals
    Savings {
        #[command(subcommand)]
        command: SavingsCommand,
    },

    /// Savings goals
    Goal {
        #[command(subcommand)]
        command: GoalCommand,
    },

    /// Daily spending limit
    Limit {
        #[command(subcommand)]
        command: LimitCommand,
    },

    /// Balances per wallet, savings and goals
    Balance,

    /// Chat usage counters
    Stats,

    /// Export transactions to CSV
    Export {
        #[arg(long)]
        out: PathBuf,
    },

    /// Delete all transactions, savings, goals, limit settings and chat stats
    Reset {
        /// Required; there is no undo
        #[arg(long)]
        yes: bool,
    },

    /// Manage ~/.dompet/config.toml
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(clap::Args, Debug)]
struct ManualEntry {
    #[arg(long)]
    amount: f64,

    #[arg(long, default_value = "Lainnya")]
    category: String,

    #[arg(long, default_value = "")]
    description: String,

    /// bank, cash or ewallet (default from config)
    #[arg(long)]
    wallet: Option<Wallet>,
}

#[derive(Subcommand, Debug)]
enum SavingsCommand {
    /// Move money from the balance into savings
    Deposit {
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Move money from savings back into the balance
    Withdraw {
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "")]
        description: String,
    },
}

#[derive(Subcommand, Debug)]
enum GoalCommand {
    /// Create a goal
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        target: f64,
        /// YYYY-MM-DD
        #[arg(long)]
        deadline: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// List goals with progress
    List,
    /// Put money from the balance towards a goal
    Contribute {
        /// Goal id or name
        goal: String,
        #[arg(long)]
        amount: f64,
    },
    /// Take money back out of a goal (everything unless --amount)
    Withdraw {
        goal: String,
        #[arg(long)]
        amount: Option<f64>,
    },
    /// Remove a goal
    Delete { goal: String },
}

#[derive(Subcommand, Debug)]
enum LimitCommand {
    /// Enable the limit with a new daily amount
    Set {
        amount: f64,
        /// Record over-limit expenses instead of refusing them
        #[arg(long)]
        allow_exceed: bool,
    },
    /// Disable the limit
    Off,
    /// Show the limit and today's spending
    Show,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default config.toml if none exists
    Init,
    /// Print the effective config
    Show,
}

fn init_tracing(verbose: bool) {
    // RUST_LOG > --verbose > default
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact(),
        )
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let home = state::ensure_dompet_home()?;
    let cfg = config::load_config(&home)?;

    match cli.command {
        Command::Say { message } => {
            let mut session = Session::open(&home)?;
            let reply = session.say(&message.join(" "), cfg.now()?)?;
            println!("{}", reply.message);
        }

        Command::Parse { message, json } => {
            let result = process_message(&Lexicon::indonesian(), &message.join(" "), cfg.now()?);
            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{}", result.response);
            }
        }

        Command::Chat => {
            let mut session = Session::open(&home)?;
            let delay = Duration::from_millis(cfg.chat.typing_delay_ms);
            chat::run_repl(&mut session, io::stdin().lock(), io::stdout(), delay, || cfg.now())?;
        }

        Command::Income(entry) => {
            let mut ledger = state::load_ledger(&home)?;
            let entry = manual_entry(entry, &cfg)?;
            let (amount, category) = (entry.amount, entry.category.clone());
            ledger.add_income(entry)?;
            state::save_ledger(&home, &ledger)?;
            println!("Pemasukan {} ({category}) dicatat.", format_currency(amount));
        }

        Command::Expense(entry) => {
            let mut ledger = state::load_ledger(&home)?;
            let today = cfg.now()?.date_naive();
            let entry = manual_entry(entry, &cfg)?;
            let (amount, category) = (entry.amount, entry.category.clone());
            let check = ledger.add_expense(entry, today)?;
            state::save_ledger(&home, &ledger)?;
            println!("Pengeluaran {} ({category}) dicatat.", format_currency(amount));
            print_limit_check(&ledger, check, today);
        }

        Command::Savings { command } => {
            let mut ledger = state::load_ledger(&home)?;
            let now = cfg.now()?;
            match command {
                SavingsCommand::Deposit { amount, description } => {
                    ledger.deposit_savings(amount, &description, now)?;
                    println!("{} masuk ke tabungan.", format_currency(amount));
                }
                SavingsCommand::Withdraw { amount, description } => {
                    ledger.withdraw_savings(amount, &description, now)?;
                    println!("{} ditarik dari tabungan.", format_currency(amount));
                }
            }
            state::save_ledger(&home, &ledger)?;
            println!("Saldo tabungan: {}", format_currency(ledger.savings_balance()));
        }

        Command::Goal { command } => run_goal(&home, &cfg, command)?,

        Command::Limit { command } => {
            let mut ledger = state::load_ledger(&home)?;
            match command {
                LimitCommand::Set { amount, allow_exceed } => {
                    ledger.daily_limit.set_amount(amount)?;
                    ledger.daily_limit.enabled = true;
                    ledger.daily_limit.block_exceed = !allow_exceed;
                    state::save_ledger(&home, &ledger)?;
                    info!(amount, "daily limit set");
                    println!("Batas harian: {}", format_currency(amount));
                }
                LimitCommand::Off => {
                    ledger.daily_limit.enabled = false;
                    state::save_ledger(&home, &ledger)?;
                    println!("Batas harian dinonaktifkan.");
                }
                LimitCommand::Show => print_limit(&ledger, cfg.now()?.date_naive()),
            }
        }

        Command::Balance => {
            let ledger = state::load_ledger(&home)?;
            print_balance(&ledger);
        }

        Command::Stats => {
            let stats = state::JsonStatsStore::in_home(&home).load()?;
            let today = cfg.now()?.date_naive();
            println!("Transaksi via chat: {}", stats.processed_count);
            println!("Hari ini: {}", stats.today_count(today));
            if let Some(last) = stats.last_message_date {
                println!("Terakhir: {last}");
            }
        }

        Command::Export { out } => {
            let ledger = state::load_ledger(&home)?;
            let rows = export::export_csv(&ledger, &out)?;
            println!("Exported {rows} transactions to {}", out.display());
        }

        Command::Reset { yes } => {
            if !yes {
                bail!("reset deletes all data; pass --yes to confirm");
            }
            state::reset_all(&home)?;
            println!("Semua data dihapus.");
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(&home)?,
            ConfigCommand::Show => {
                println!("# {}", config::config_path(&home).display());
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn manual_entry(entry: ManualEntry, cfg: &Config) -> Result<Entry> {
    let wallet = match entry.wallet {
        Some(w) => w,
        None => cfg.default_wallet()?,
    };
    Ok(Entry {
        amount: entry.amount,
        category: entry.category,
        description: entry.description,
        wallet,
        date: cfg.now()?,
    })
}

fn run_goal(home: &Path, cfg: &Config, command: GoalCommand) -> Result<()> {
    let mut ledger = state::load_ledger(home)?;
    let now: DateTime<FixedOffset> = cfg.now()?;

    match command {
        GoalCommand::Add { name, target, deadline, description } => {
            let goal = ledger.add_goal(&name, target, deadline, &description, now)?;
            println!("Target \"{}\" ({}) dibuat: {}", goal.name, goal.id, format_currency(target));
        }
        GoalCommand::List => {
            if ledger.goals.is_empty() {
                println!("Belum ada target.");
            }
            for g in &ledger.goals {
                let deadline = g
                    .target_date
                    .map(|d| format!(" | s.d. {d}"))
                    .unwrap_or_default();
                println!(
                    "[{}] {} | {} / {} ({:.0}%){}{}",
                    g.id,
                    g.name,
                    format_currency_short(g.saved_amount),
                    format_currency_short(g.target_amount),
                    g.progress(),
                    deadline,
                    if g.is_reached() { " | tercapai" } else { "" }
                );
            }
            return Ok(());
        }
        GoalCommand::Contribute { goal, amount } => {
            let g = ledger.contribute_to_goal(&goal, amount, now)?;
            println!("{} ditambahkan ke \"{}\" ({:.0}%).", format_currency(amount), g.name, g.progress());
        }
        GoalCommand::Withdraw { goal, amount: Some(amount) } => {
            let g = ledger.partial_withdraw_from_goal(&goal, amount, now)?;
            println!("{} ditarik dari \"{}\".", format_currency(amount), g.name);
        }
        GoalCommand::Withdraw { goal, amount: None } => {
            let amount = ledger.withdraw_from_goal(&goal, now)?;
            println!("{} ditarik dari target.", format_currency(amount));
        }
        GoalCommand::Delete { goal } => {
            let removed = ledger.delete_goal(&goal)?;
            println!("Target \"{}\" dihapus.", removed.name);
        }
    }

    state::save_ledger(home, &ledger)
}

fn print_balance(ledger: &Ledger) {
    println!("Saldo: {}", format_currency(ledger.balance()));
    for wallet in Wallet::ALL {
        println!("  {:<8} {}", wallet.as_str(), format_currency(ledger.wallet_balance(wallet)));
    }
    println!("Pemasukan: {}", format_currency(ledger.total(TransactionKind::Income)));
    println!("Pengeluaran: {}", format_currency(ledger.total(TransactionKind::Expense)));
    println!("Tabungan: {}", format_currency(ledger.savings_balance()));
    let in_goals: f64 = ledger.goals.iter().map(|g| g.saved_amount).sum();
    if in_goals > 0.0 {
        println!("Dana target: {}", format_currency(in_goals));
    }
}

fn print_limit(ledger: &Ledger, today: NaiveDate) {
    let limit = &ledger.daily_limit;
    if !limit.enabled {
        println!("Batas harian tidak aktif.");
        return;
    }
    let spent = ledger.spent_today(today);
    println!("Batas harian: {}", format_currency(limit.amount));
    println!("Terpakai hari ini: {}", format_currency(spent));
    println!("Sisa: {}", format_currency(limit.remaining(spent)));
    if !limit.block_exceed {
        println!("(pengeluaran di atas batas tetap dicatat)");
    }
}

fn print_limit_check(ledger: &Ledger, check: LimitCheck, today: NaiveDate) {
    match check {
        LimitCheck::Warning(level) => println!(
            "⚠️ {} Sisa limit: {}",
            level.message(),
            format_currency(ledger.daily_limit.remaining(ledger.spent_today(today)))
        ),
        LimitCheck::Exceeded { .. } => println!("⚠️ Pengeluaran hari ini melebihi batas harian."),
        LimitCheck::Unchecked | LimitCheck::Within => {}
    }
}
