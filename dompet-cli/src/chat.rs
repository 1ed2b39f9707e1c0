use anyhow::Result;
use chrono::{DateTime, FixedOffset};
use dompet_core::{AiStats, Lexicon, StatsStore};
use dompet_finance::{Ledger, Reply, handle_message};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, warn};

use crate::state::{self, JsonStatsStore};

const GREETING: &str = "Halo! Ceritakan transaksimu, misalnya \"beli makan siang 25rb\". Ketik \"keluar\" untuk selesai.";
const FAREWELL: &str = "Sampai jumpa!";

/// Ledger and counters loaded from the state dir, saved after every
/// message that changed them.
pub struct Session {
    home: PathBuf,
    lexicon: Lexicon,
    pub ledger: Ledger,
    stats_store: JsonStatsStore,
    pub stats: AiStats,
}

impl Session {
    pub fn open(home: &Path) -> Result<Self> {
        let stats_store = JsonStatsStore::in_home(home);
        let stats = stats_store.load().unwrap_or_else(|e| {
            warn!(error = %e, "could not read stats, starting from zero");
            AiStats::default()
        });

        Ok(Self {
            home: home.to_path_buf(),
            lexicon: Lexicon::indonesian(),
            ledger: state::load_ledger(home)?,
            stats_store,
            stats,
        })
    }

    pub fn say(&mut self, text: &str, now: DateTime<FixedOffset>) -> Result<Reply> {
        let reply = handle_message(&mut self.ledger, &self.lexicon, text, now, self.stats);
        debug!(outcome = ?reply.outcome, "chat message handled");

        if reply.changed_ledger() {
            state::save_ledger(&self.home, &self.ledger)?;
        }
        if reply.stats != self.stats {
            self.stats = reply.stats;
            // best effort
            if let Err(e) = self.stats_store.save(&self.stats) {
                warn!(error = %e, "could not write stats");
            }
        }
        Ok(reply)
    }
}

fn is_exit(line: &str) -> bool {
    matches!(line.to_lowercase().as_str(), "exit" | "keluar" | "quit")
}

/// Line-oriented chat loop. Ends on `exit`/`keluar` or end of input.
pub fn run_repl<R, W, F>(
    session: &mut Session,
    input: R,
    mut out: W,
    typing_delay: Duration,
    mut now: F,
) -> Result<()>
where
    R: BufRead,
    W: Write,
    F: FnMut() -> Result<DateTime<FixedOffset>>,
{
    writeln!(out, "{GREETING}")?;
    write!(out, "> ")?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;
        let text = line.trim();
        if is_exit(text) {
            break;
        }
        if !text.is_empty() {
            let reply = session.say(text, now()?)?;
            if !typing_delay.is_zero() {
                std::thread::sleep(typing_delay);
            }
            writeln!(out, "{}\n", reply.message)?;
        }
        write!(out, "> ")?;
        out.flush()?;
    }

    writeln!(out, "{FAREWELL}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> Result<DateTime<FixedOffset>> {
        Ok(FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 12, 19, 30, 0)
            .unwrap())
    }

    #[test]
    fn test_repl_records_and_persists() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path()).unwrap();

        let input = "gaji 3 juta\n\nbeli bakso 20rb\nhalo\nkeluar\nnabung 1jt\n";
        let mut out = Vec::new();
        run_repl(&mut session, input.as_bytes(), &mut out, Duration::ZERO, now).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("✅ Berhasil mencatat pemasukan Rp 3.000.000,00 untuk kategori Gaji!"));
        assert!(text.contains("✅ Berhasil mencatat pengeluaran Rp 20.000,00 untuk kategori Makanan!"));
        assert!(text.trim_end().ends_with(FAREWELL));
        // input after "keluar" is ignored
        assert!(!text.contains("ke tabungan!"));

        let reopened = Session::open(dir.path()).unwrap();
        assert_eq!(reopened.ledger.balance(), 2_980_000.0);
        assert_eq!(reopened.stats.processed_count, 2);
    }

    #[test]
    fn test_failed_action_leaves_state_untouched() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::open(dir.path()).unwrap();

        let reply = session.say("tarik tabungan 50rb", now().unwrap()).unwrap();
        assert!(!reply.changed_ledger());
        assert!(!dir.path().join(state::LEDGER_FILE).exists());
        assert!(!dir.path().join(dompet_core::STATS_FILE).exists());
    }
}
