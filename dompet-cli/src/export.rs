use anyhow::{Context, Result};
use dompet_finance::Ledger;
use std::io::Write;
use std::path::Path;

const HEADERS: [&str; 6] = ["Tanggal", "Jenis", "Kategori", "Deskripsi", "Dompet", "Jumlah"];

/// Write every transaction, newest first. Returns the row count.
pub fn write_transactions<W: Write>(ledger: &Ledger, out: W) -> Result<usize> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(HEADERS)?;

    for t in &ledger.transactions {
        wtr.write_record([
            t.date.format("%Y-%m-%d").to_string(),
            t.kind.label().to_string(),
            t.category.clone(),
            t.description.clone(),
            t.wallet.to_string(),
            format!("{:.0}", t.amount),
        ])?;
    }

    wtr.flush().context("flush csv")?;
    Ok(ledger.transactions.len())
}

pub fn export_csv(ledger: &Ledger, path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path).with_context(|| format!("create {}", path.display()))?;
    write_transactions(ledger, file).with_context(|| format!("write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};
    use dompet_finance::{Entry, Wallet};

    #[test]
    fn test_export_rows() {
        let when = FixedOffset::east_opt(7 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 6, 3, 12, 0, 0)
            .unwrap();
        let mut ledger = Ledger::new();
        ledger
            .add_income(Entry {
                amount: 500_000.0,
                category: "Freelance".to_string(),
                description: "desain logo, revisi".to_string(),
                wallet: Wallet::Ewallet,
                date: when,
            })
            .unwrap();
        ledger.deposit_savings(100_000.0, "", when).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("transaksi.csv");
        assert_eq!(export_csv(&ledger, &path).unwrap(), 2);

        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Tanggal,Jenis,Kategori,Deskripsi,Dompet,Jumlah");
        assert_eq!(lines[1], "2024-06-03,Pengeluaran,Tabungan,Menabung,bank,100000");
        assert_eq!(
            lines[2],
            "2024-06-03,Pemasukan,Freelance,\"desain logo, revisi\",ewallet,500000"
        );
    }
}
