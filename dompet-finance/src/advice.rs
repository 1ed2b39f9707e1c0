//! Rule-based financial consultation for chat messages that are questions
//! rather than transactions ("saran pembagian gaji", "tips hemat", ...).

use dompet_core::format_currency;

use crate::ledger::{Ledger, TransactionKind};

/// Words that mark a message as a consultation request.
const CONSULTATION_KEYWORDS: &[&str] = &[
    "saran", "tips", "analisis", "konsultasi", "panduan", "strategi", "budget", "investasi",
    "hutang", "hemat",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Salary,
    Budget,
    Savings,
    Investment,
    Debt,
    SavingTips,
    Analysis,
    General,
}

type TopicRule = (Topic, fn(&str) -> bool);

/// Evaluated in order; [`Topic::General`] when nothing matches.
const TOPIC_RULES: &[TopicRule] = &[
    (Topic::Salary, |m| {
        m.contains("saran") && (m.contains("gaji") || m.contains("penghasilan"))
    }),
    (Topic::Budget, |m| m.contains("budget") || m.contains("anggaran")),
    (Topic::Savings, |m| m.contains("tabung") || m.contains("saving")),
    (Topic::Investment, |m| m.contains("investasi") || m.contains("invest")),
    (Topic::Debt, |m| m.contains("hutang") || m.contains("debt")),
    (Topic::SavingTips, |m| m.contains("hemat") || m.contains("saving money")),
    (Topic::Analysis, |m| m.contains("analisis") || m.contains("laporan")),
];

/// Recommended monthly share of income per expense category.
const CATEGORY_BUDGET: &[(&str, f64)] = &[
    ("Makanan", 0.15),
    ("Transportasi", 0.10),
    ("Tagihan", 0.15),
    ("Hiburan", 0.05),
    ("Belanja", 0.10),
    ("Kesehatan", 0.05),
];

pub fn is_consultation(message: &str) -> bool {
    let lowered = message.to_lowercase();
    CONSULTATION_KEYWORDS.iter().any(|k| lowered.contains(k))
}

pub fn detect_topic(message: &str) -> Topic {
    let lowered = message.to_lowercase();
    TOPIC_RULES
        .iter()
        .find(|(_, applies)| applies(&lowered))
        .map(|(topic, _)| *topic)
        .unwrap_or(Topic::General)
}

/// Ledger aggregates the advice is computed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub total_income: f64,
    pub total_expense: f64,
    pub total_savings: f64,
    pub monthly_income: f64,
    pub monthly_expense: f64,
    /// Largest first.
    pub expenses_by_category: Vec<(String, f64)>,
}

impl Snapshot {
    pub fn from_ledger(ledger: &Ledger) -> Self {
        Self {
            total_income: ledger.total(TransactionKind::Income),
            total_expense: ledger.total(TransactionKind::Expense),
            total_savings: ledger.savings_balance(),
            monthly_income: ledger.monthly_average(TransactionKind::Income),
            monthly_expense: ledger.monthly_average(TransactionKind::Expense),
            expenses_by_category: ledger.expenses_by_category(),
        }
    }

    fn category_total(&self, name: &str) -> f64 {
        self.expenses_by_category
            .iter()
            .find(|(c, _)| c == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }
}

/// Answer a consultation message from the current ledger.
pub fn consult(message: &str, ledger: &Ledger) -> String {
    let snapshot = Snapshot::from_ledger(ledger);
    advise(detect_topic(message), &snapshot)
}

pub fn advise(topic: Topic, s: &Snapshot) -> String {
    match topic {
        Topic::Salary => salary_advice(s),
        Topic::Budget => budget_advice(s),
        Topic::Savings => savings_advice(s),
        Topic::Investment => investment_advice(s),
        Topic::Debt => debt_advice(s),
        Topic::SavingTips => saving_tips(s),
        Topic::Analysis => financial_analysis(s),
        Topic::General => general_advice(s),
    }
}

fn percent(part: f64, whole: f64) -> f64 {
    if whole > 0.0 { part / whole * 100.0 } else { 0.0 }
}

fn salary_advice(s: &Snapshot) -> String {
    let income = s.monthly_income;
    if income <= 0.0 {
        return "Saya melihat belum ada pencatatan penghasilan bulanan. Untuk memberikan saran yang tepat, \
                mulai catat penghasilan Anda terlebih dahulu. Secara umum, alokasi ideal adalah:\n\n\
                50% untuk kebutuhan pokok\n30% untuk keinginan\n20% untuk tabungan dan investasi"
            .to_string();
    }

    let savings_rate = percent(s.total_savings, income);
    let expense_rate = percent(s.monthly_expense, income);

    let mut out = format!(
        "📊 **Analisis Penghasilan Bulanan Anda ({})**\n\n",
        format_currency(income)
    );
    out.push_str("💡 **Rekomendasi Alokasi (Aturan 50/30/20):**\n");
    out.push_str(&format!("• Kebutuhan Pokok: {} (50%)\n", format_currency(income * 0.5)));
    out.push_str(&format!("• Keinginan: {} (30%)\n", format_currency(income * 0.3)));
    out.push_str(&format!(
        "• Tabungan & Investasi: {} (20%)\n\n",
        format_currency(income * 0.2)
    ));

    out.push_str("📈 **Status Keuangan Anda Saat Ini:**\n");
    out.push_str(&format!(
        "• Pengeluaran: {} ({expense_rate:.1}%)\n",
        format_currency(s.monthly_expense)
    ));
    out.push_str(&format!("• Tingkat Tabungan: {savings_rate:.1}%\n\n"));

    if expense_rate > 80.0 {
        out.push_str(&format!(
            "⚠️ **Perhatian:** Pengeluaran Anda {expense_rate:.1}% dari penghasilan. Ini terlalu tinggi!\n"
        ));
        out.push_str("🎯 **Saran:** Kurangi pengeluaran tidak penting dan targetkan maksimal 70% untuk pengeluaran.\n\n");
    }
    if savings_rate < 10.0 {
        out.push_str("💰 **Tabungan Perlu Ditingkatkan**\n");
        out.push_str("Mulai dengan target 10% dari gaji, lalu tingkatkan bertahap ke 20%.\n\n");
    } else if savings_rate >= 20.0 {
        out.push_str(&format!(
            "🎉 **Excellent!** Tingkat tabungan Anda sudah ideal ({savings_rate:.1}%)\n\n"
        ));
    }

    out.push_str("📝 **Action Plan:**\n");
    out.push_str("1. Buat anggaran bulanan berdasarkan alokasi di atas\n");
    out.push_str("2. Pisahkan rekening untuk kebutuhan, keinginan, dan tabungan\n");
    out.push_str("3. Otomatisasi transfer ke tabungan setiap gajian\n");
    out.push_str("4. Review dan evaluasi setiap bulan");
    out
}

fn budget_advice(s: &Snapshot) -> String {
    let mut out = String::from("📋 **Analisis Anggaran Anda**\n\n");
    if s.expenses_by_category.is_empty() {
        out.push_str(
            "Belum ada data pengeluaran untuk dianalisis. Mulai catat pengeluaran Anda untuk mendapat saran anggaran yang tepat.",
        );
        return out;
    }

    out.push_str("💸 **Top 5 Kategori Pengeluaran:**\n");
    for (i, (category, amount)) in s.expenses_by_category.iter().take(5).enumerate() {
        out.push_str(&format!(
            "{}. {category}: {} ({:.1}%)\n",
            i + 1,
            format_currency(*amount),
            percent(*amount, s.monthly_income)
        ));
    }

    out.push_str("\n📊 **Rekomendasi Anggaran Bulanan:**\n");
    for (category, share) in CATEGORY_BUDGET {
        let recommended = s.monthly_income * share;
        let current = s.category_total(category);
        let over = current > recommended;
        out.push_str(&format!(
            "• {category}: {} {}\n",
            format_currency(recommended),
            if over { "⚠️" } else { "✅" }
        ));
        if over {
            out.push_str(&format!(
                "  Saat ini: {} - Kurangi {}\n",
                format_currency(current),
                format_currency(current - recommended)
            ));
        }
    }
    out
}

fn savings_advice(s: &Snapshot) -> String {
    let net = s.monthly_income - s.monthly_expense;
    let mut out = String::from("💰 **Strategi Menabung yang Efektif**\n\n");
    out.push_str("📊 **Status Tabungan Saat Ini:**\n");
    out.push_str(&format!("• Total Tabungan: {}\n", format_currency(s.total_savings)));
    out.push_str(&format!("• Sisa Bulanan: {}\n", format_currency(net)));
    out.push_str(&format!(
        "• Tingkat Tabungan: {:.1}%\n\n",
        percent(s.total_savings, s.monthly_income)
    ));

    if net <= 0.0 {
        out.push_str("⚠️ **Urgent:** Pengeluaran melebihi pemasukan!\n");
        out.push_str("🎯 **Action Plan:**\n");
        out.push_str("1. Audit semua pengeluaran dan eliminasi yang tidak penting\n");
        out.push_str("2. Cari sumber penghasilan tambahan\n");
        out.push_str("3. Fokus pada stabilitas keuangan dulu sebelum menabung\n");
        return out;
    }

    let emergency_fund = s.monthly_expense * 6.0;
    let monthly_target = s.monthly_income * 0.2;

    out.push_str("🎯 **Target Tabungan yang Disarankan:**\n");
    out.push_str(&format!(
        "• Dana Darurat: {} (6x pengeluaran bulanan)\n",
        format_currency(emergency_fund)
    ));
    out.push_str(&format!(
        "• Target Bulanan: {} (20% dari penghasilan)\n\n",
        format_currency(monthly_target)
    ));
    out.push_str("💡 **Strategi Menabung:**\n");
    out.push_str("1. **Pay Yourself First** - Sisihkan untuk tabungan sebelum pengeluaran lain\n");
    out.push_str("2. **Automated Savings** - Set auto transfer ke rekening tabungan\n");
    out.push_str("3. **50/30/20 Rule** - 50% kebutuhan, 30% keinginan, 20% tabungan\n");
    out.push_str("4. **Emergency Fund First** - Prioritaskan dana darurat sebelum investasi\n\n");

    if s.total_savings < emergency_fund {
        let months = ((emergency_fund - s.total_savings) / monthly_target).ceil();
        out.push_str(&format!(
            "⏰ **Priority:** Selesaikan dana darurat dalam {months} bulan\n"
        ));
        out.push_str(&format!(
            "Tabung {} per bulan untuk mencapai target.\n",
            format_currency(monthly_target)
        ));
    } else {
        out.push_str("🎉 **Great!** Dana darurat sudah terpenuhi!\n");
        out.push_str("Sekarang fokus pada investasi jangka panjang untuk masa depan.\n");
    }
    out
}

fn investment_advice(s: &Snapshot) -> String {
    let emergency_fund = s.monthly_expense * 6.0;
    let investable = (s.total_savings - emergency_fund).max(0.0);
    let monthly_capacity = (s.monthly_income - s.monthly_expense) * 0.7;

    let mut out = String::from("📈 **Panduan Investasi untuk Anda**\n\n");
    out.push_str("💰 **Kesiapan Investasi:**\n");
    out.push_str(&format!("• Dana Darurat Target: {}\n", format_currency(emergency_fund)));
    out.push_str(&format!("• Dana Siap Investasi: {}\n", format_currency(investable)));
    out.push_str(&format!(
        "• Kapasitas Investasi Bulanan: {}\n\n",
        format_currency(monthly_capacity)
    ));

    if s.total_savings < emergency_fund {
        out.push_str("⚠️ **Belum Siap Investasi**\n");
        out.push_str("Lengkapi dana darurat terlebih dahulu sebelum berinvestasi.\n");
        out.push_str("Dana darurat melindungi investasi Anda dari penarikan dini.\n\n");
        out.push_str(&format!(
            "🎯 **Fokus Sekarang:** Tabung {} lagi untuk dana darurat.",
            format_currency(emergency_fund - s.total_savings)
        ));
        return out;
    }

    out.push_str("✅ **Siap Berinvestasi!**\n\n📊 **Rekomendasi Alokasi Investasi:**\n");
    let allocation: &[&str] = if s.monthly_income < 5_000_000.0 {
        &[
            "**Untuk Penghasilan di bawah 5 juta:**",
            "• 60% Reksa Dana Saham (untuk pertumbuhan jangka panjang)",
            "• 30% Reksa Dana Pendapatan Tetap (untuk stabilitas)",
            "• 10% Emas/Obligasi (untuk proteksi inflasi)",
        ]
    } else if s.monthly_income < 10_000_000.0 {
        &[
            "**Untuk Penghasilan 5-10 juta:**",
            "• 50% Saham/Reksa Dana Saham",
            "• 25% Reksa Dana Pendapatan Tetap",
            "• 15% Properti/REITs",
            "• 10% Emas/Komoditas",
        ]
    } else {
        &[
            "**Untuk Penghasilan di atas 10 juta:**",
            "• 40% Saham Individual/Reksa Dana Saham",
            "• 25% Properti/REITs",
            "• 20% Obligasi/Sukuk",
            "• 10% Emas/Komoditas",
            "• 5% Alternatif (P2P, Crypto untuk risk taker)",
        ]
    };
    for line in allocation {
        out.push_str(line);
        out.push('\n');
    }

    out.push_str("\n⏰ **Timeline Investasi:**\n");
    out.push_str("• Jangka Pendek (1-3 tahun): Deposito, Reksa Dana Pasar Uang\n");
    out.push_str("• Jangka Menengah (3-5 tahun): Reksa Dana Campuran\n");
    out.push_str("• Jangka Panjang (5+ tahun): Saham, Reksa Dana Saham\n\n");
    out.push_str("💡 **Tips Investasi:**\n");
    out.push_str("1. Diversifikasi untuk mengurangi risiko\n");
    out.push_str("2. Investasi rutin (Dollar Cost Averaging)\n");
    out.push_str("3. Review portofolio setiap 6 bulan\n");
    out.push_str("4. Jangan panic selling saat market turun\n");
    out.push_str("5. Pelajari dulu sebelum investasi");
    out
}

fn debt_advice(s: &Snapshot) -> String {
    let available = s.monthly_income - s.monthly_expense;
    let mut out = String::from("💳 **Strategi Mengelola Hutang**\n\n");
    out.push_str("💰 **Kapasitas Pembayaran Hutang:**\n");
    out.push_str(&format!("• Sisa Penghasilan: {}\n\n", format_currency(available)));

    if available <= 0.0 {
        out.push_str("⚠️ **Situasi Darurat!**\n");
        out.push_str("Pengeluaran melebihi pemasukan. Ini adalah red flag finansial.\n\n");
        out.push_str("🆘 **Action Plan Darurat:**\n");
        out.push_str("1. Stop semua pengeluaran non-esensial\n");
        out.push_str("2. Negosiasi dengan kreditur untuk restrukturisasi\n");
        out.push_str("3. Cari penghasilan tambahan segera\n");
        out.push_str("4. Jual aset non-produktif jika perlu\n");
        out.push_str("5. Pertimbangkan konseling keuangan profesional");
        return out;
    }

    out.push_str("📋 **Strategi Pelunasan Hutang:**\n\n");
    out.push_str("**1. Metode Avalanche (Recommended):**\n");
    out.push_str("• Bayar minimum di semua hutang\n");
    out.push_str("• Fokus bayar extra di hutang dengan bunga tertinggi\n");
    out.push_str("• Menghemat biaya bunga total\n\n");
    out.push_str("**2. Metode Snowball (Motivasi):**\n");
    out.push_str("• Bayar minimum di semua hutang\n");
    out.push_str("• Fokus lunasi hutang terkecil dulu\n");
    out.push_str("• Memberikan motivasi psikologis\n\n");
    out.push_str("🎯 **Rekomendasi Alokasi:**\n");
    out.push_str(&format!(
        "• Pembayaran Hutang: {} (70%)\n",
        format_currency(available * 0.7)
    ));
    out.push_str(&format!("• Dana Darurat: {} (30%)\n\n", format_currency(available * 0.3)));
    out.push_str("⚠️ **Red Flags yang Harus Dihindari:**\n");
    out.push_str("• Hutang total > 40% penghasilan\n");
    out.push_str("• Bayar hutang dengan hutang baru\n");
    out.push_str("• Hanya bayar minimum terus-menerus\n");
    out.push_str("• Mengabaikan komunikasi dengan kreditur");
    out
}

/// Tip line and expected saving share for a category.
fn category_tip(category: &str) -> (&'static str, Option<(&'static str, f64)>) {
    match category.to_lowercase().as_str() {
        "makanan" => ("Masak di rumah, meal prep, kurangi delivery", Some(("20-30%", 0.25))),
        "transportasi" => (
            "Gunakan transportasi umum, carpooling, jalan kaki",
            Some(("15-25%", 0.2)),
        ),
        "hiburan" => ("Cari hiburan gratis, promo, hiburan di rumah", Some(("30-50%", 0.4))),
        "belanja" => (
            "Buat list belanja, hindari impulse buying, tunggu sale",
            Some(("25-40%", 0.3)),
        ),
        "tagihan" => ("Review paket internet/telp, hemat listrik, air", Some(("10-20%", 0.15))),
        _ => ("Evaluasi kebutuhan vs keinginan di kategori ini", None),
    }
}

fn potential_saving_rate(category: &str) -> f64 {
    match category.to_lowercase().as_str() {
        "hiburan" => 0.4,
        "belanja" => 0.3,
        "makanan" => 0.25,
        _ => 0.15,
    }
}

fn saving_tips(s: &Snapshot) -> String {
    let mut out = String::from("💡 **Tips Berhemat Berdasarkan Pengeluaran Anda**\n\n");
    if s.expenses_by_category.is_empty() {
        out.push_str("Mulai catat pengeluaran detail untuk mendapat tips berhemat yang personal.");
        return out;
    }

    out.push_str("📊 **Analisis Pengeluaran Terbesar:**\n");
    for (i, (category, amount)) in s.expenses_by_category.iter().take(3).enumerate() {
        out.push_str(&format!(
            "{}. {category}: {} ({:.1}%)\n",
            i + 1,
            format_currency(*amount),
            percent(*amount, s.monthly_expense)
        ));
        let (tip, target) = category_tip(category);
        out.push_str(&format!("   💡 Tips: {tip}\n"));
        match target {
            Some((range, share)) => out.push_str(&format!(
                "   🎯 Target penghematan: {range} atau {}\n\n",
                format_currency(amount * share)
            )),
            None => out.push('\n'),
        }
    }

    out.push_str("🎯 **Strategi Berhemat 50/30/20:**\n");
    out.push_str("• Kurangi pengeluaran \"wants\" dari 30% ke 20%\n");
    out.push_str("• Tingkatkan tabungan dari 20% ke 30%\n");
    out.push_str("• Maintain kebutuhan pokok di 50%\n\n");
    out.push_str("📱 **Tools & Teknik Berhemat:**\n");
    out.push_str("1. **Envelope Method**: Alokasi cash untuk setiap kategori\n");
    out.push_str("2. **24-Hour Rule**: Tunda pembelian non-urgent 24 jam\n");
    out.push_str("3. **Price Comparison**: Bandingkan harga sebelum beli\n");
    out.push_str("4. **Cashback Apps**: Gunakan aplikasi cashback\n");
    out.push_str("5. **Bulk Buying**: Beli dalam jumlah besar untuk kebutuhan pokok\n\n");

    let potential: f64 = s
        .expenses_by_category
        .iter()
        .map(|(category, amount)| amount * potential_saving_rate(category))
        .sum();
    out.push_str(&format!(
        "💰 **Potensi Penghematan Total: {}/bulan**\n",
        format_currency(potential)
    ));
    out.push_str("Ini bisa menjadi tambahan untuk tabungan atau investasi!");
    out
}

/// 0-100 score: positive balance, savings rate, expense rate and an
/// emergency fund of six months of (annualised) expenses, 25 points each.
pub fn health_score(s: &Snapshot) -> u32 {
    let balance = s.total_income - s.total_expense;
    let savings_rate = percent(s.total_savings, s.total_income);
    let expense_rate = percent(s.total_expense, s.total_income);

    let mut score = 0;
    if balance > 0.0 {
        score += 25;
    }
    score += match savings_rate {
        r if r >= 20.0 => 25,
        r if r >= 10.0 => 15,
        _ => 0,
    };
    score += match expense_rate {
        r if r <= 70.0 => 25,
        r if r <= 80.0 => 15,
        _ => 0,
    };
    if s.total_savings >= s.total_expense / 12.0 * 6.0 {
        score += 25;
    }
    score
}

fn financial_analysis(s: &Snapshot) -> String {
    let balance = s.total_income - s.total_expense;
    let savings_rate = percent(s.total_savings, s.total_income);
    let expense_rate = percent(s.total_expense, s.total_income);
    let score = health_score(s);

    let mut out = String::from("📊 **Analisis Keuangan Komprehensif**\n\n");
    out.push_str(&format!("🏥 **Skor Kesehatan Keuangan: {score}/100**\n"));
    out.push_str(match score {
        80.. => "🎉 Excellent! Keuangan Anda sangat sehat!\n\n",
        60..=79 => "👍 Good! Keuangan Anda dalam kondisi baik.\n\n",
        40..=59 => "⚠️ Fair. Ada beberapa area yang perlu diperbaiki.\n\n",
        _ => "🚨 Poor. Perlu perbaikan mendesak dalam pengelolaan keuangan.\n\n",
    });

    out.push_str("📈 **Ringkasan Keuangan:**\n");
    out.push_str(&format!("• Total Pemasukan: {}\n", format_currency(s.total_income)));
    out.push_str(&format!(
        "• Total Pengeluaran: {} ({expense_rate:.1}%)\n",
        format_currency(s.total_expense)
    ));
    out.push_str(&format!(
        "• Total Tabungan: {} ({savings_rate:.1}%)\n",
        format_currency(s.total_savings)
    ));
    out.push_str(&format!(
        "• Net Worth: {}\n\n",
        format_currency(balance + s.total_savings)
    ));

    if let Some((category, amount)) = s.expenses_by_category.first() {
        out.push_str("💸 **Kategori Pengeluaran Terbesar:**\n");
        out.push_str(&format!(
            "{category}: {} ({:.1}%)\n\n",
            format_currency(*amount),
            percent(*amount, s.total_expense)
        ));
    }

    out.push_str("🎯 **Rekomendasi Prioritas:**\n");
    out.push_str(if balance <= 0.0 {
        "1. 🚨 URGENT: Kurangi pengeluaran atau tingkatkan penghasilan\n"
    } else if savings_rate < 10.0 {
        "1. 💰 Tingkatkan tingkat tabungan minimal ke 10%\n"
    } else if savings_rate < 20.0 {
        "1. 💰 Tingkatkan tingkat tabungan ke target ideal 20%\n"
    } else {
        "1. 📈 Mulai fokus pada investasi untuk pertumbuhan wealth\n"
    });
    if expense_rate > 80.0 {
        out.push_str("2. ✂️ Kurangi pengeluaran, target maksimal 70% dari penghasilan\n");
    }
    let emergency_target = s.total_expense / 12.0 * 6.0;
    if s.total_savings < emergency_target {
        out.push_str(&format!(
            "3. 🛡️ Lengkapi dana darurat: {} lagi\n",
            format_currency(emergency_target - s.total_savings)
        ));
    }

    out.push_str("\n📅 **Langkah 30 Hari ke Depan:**\n");
    out.push_str("• Week 1: Audit semua pengeluaran dan identifikasi area pemborosan\n");
    out.push_str("• Week 2: Buat budget berdasarkan analisis ini\n");
    out.push_str("• Week 3: Implementasi strategi berhemat\n");
    out.push_str("• Week 4: Review progress dan adjust strategi\n");
    out
}

fn general_advice(s: &Snapshot) -> String {
    let mut out = String::from("🤖 **AI Financial Consultant**\n\n");
    out.push_str("Halo! Saya siap membantu Anda mengelola keuangan dengan lebih baik.\n\n");
    out.push_str("💡 **Apa yang bisa saya bantu?**\n");
    out.push_str("• \"Saran pembagian gaji\" - Cara ideal mengalokasikan penghasilan\n");
    out.push_str("• \"Tips berhemat\" - Strategi mengurangi pengeluaran\n");
    out.push_str("• \"Saran tabungan\" - Strategi menabung yang efektif\n");
    out.push_str("• \"Panduan investasi\" - Mulai berinvestasi dengan benar\n");
    out.push_str("• \"Analisis keuangan\" - Laporan kesehatan keuangan lengkap\n");
    out.push_str("• \"Strategi hutang\" - Cara mengelola dan melunasi hutang\n\n");

    if s.monthly_income > 0.0 || s.monthly_expense > 0.0 || s.total_savings > 0.0 {
        out.push_str("📊 **Quick Financial Overview:**\n");
        if s.monthly_income > 0.0 {
            out.push_str(&format!(
                "• Penghasilan bulanan rata-rata: {}\n",
                format_currency(s.monthly_income)
            ));
        }
        if s.monthly_expense > 0.0 {
            out.push_str(&format!(
                "• Pengeluaran bulanan rata-rata: {}\n",
                format_currency(s.monthly_expense)
            ));
        }
        if s.total_savings > 0.0 {
            out.push_str(&format!("• Total tabungan: {}\n", format_currency(s.total_savings)));
        }
        out.push_str("\nSilakan tanya hal spesifik yang ingin Anda konsultasikan!\n");
    } else {
        out.push_str("📝 **Mulai Pencatatan Keuangan:**\n");
        out.push_str("Untuk memberikan saran yang lebih personal, mulai catat:\n");
        out.push_str("• Pemasukan dan pengeluaran harian\n");
        out.push_str("• Kategorisasi pengeluaran\n");
        out.push_str("• Target dan tujuan keuangan\n\n");
        out.push_str("Semakin lengkap data Anda, semakin akurat saran yang bisa saya berikan!");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(income: f64, expense: f64, savings: f64) -> Snapshot {
        Snapshot {
            total_income: income,
            total_expense: expense,
            total_savings: savings,
            monthly_income: income,
            monthly_expense: expense,
            expenses_by_category: vec![
                ("Makanan".to_string(), expense * 0.6),
                ("Hiburan".to_string(), expense * 0.4),
            ],
        }
    }

    #[test]
    fn test_consultation_keywords() {
        assert!(is_consultation("Tips hemat dong"));
        assert!(is_consultation("minta SARAN"));
        assert!(!is_consultation("beli kopi"));
    }

    #[test]
    fn test_topic_precedence() {
        assert_eq!(detect_topic("saran pembagian gaji"), Topic::Salary);
        assert_eq!(detect_topic("saran budget gaji"), Topic::Salary);
        assert_eq!(detect_topic("tips budget bulanan"), Topic::Budget);
        assert_eq!(detect_topic("saran tabungan"), Topic::Savings);
        assert_eq!(detect_topic("panduan investasi"), Topic::Investment);
        assert_eq!(detect_topic("strategi hutang"), Topic::Debt);
        assert_eq!(detect_topic("tips hemat"), Topic::SavingTips);
        assert_eq!(detect_topic("analisis keuangan"), Topic::Analysis);
        assert_eq!(detect_topic("konsultasi"), Topic::General);
    }

    #[test]
    fn test_salary_advice_allocation() {
        let text = advise(Topic::Salary, &snapshot(10_000_000.0, 9_000_000.0, 0.0));
        assert!(text.contains("Kebutuhan Pokok: Rp 5.000.000,00 (50%)"));
        assert!(text.contains("Pengeluaran Anda 90.0% dari penghasilan"));
        assert!(text.contains("Tabungan Perlu Ditingkatkan"));
    }

    #[test]
    fn test_salary_advice_without_income() {
        let text = advise(Topic::Salary, &snapshot(0.0, 0.0, 0.0));
        assert!(text.starts_with("Saya melihat belum ada pencatatan penghasilan"));
    }

    #[test]
    fn test_budget_flags_overspent_category() {
        let text = advise(Topic::Budget, &snapshot(10_000_000.0, 5_000_000.0, 0.0));
        // Makanan 3.000.000 against a 1.500.000 recommendation
        assert!(text.contains("• Makanan: Rp 1.500.000,00 ⚠️"));
        assert!(text.contains("Kurangi Rp 1.500.000,00"));
        assert!(text.contains("• Tagihan: Rp 1.500.000,00 ✅"));
    }

    #[test]
    fn test_savings_emergency_fund_months() {
        let text = advise(Topic::Savings, &snapshot(10_000_000.0, 5_000_000.0, 0.0));
        // 30.000.000 emergency fund at 2.000.000 a month
        assert!(text.contains("Dana Darurat: Rp 30.000.000,00"));
        assert!(text.contains("dalam 15 bulan"));
    }

    #[test]
    fn test_health_score() {
        assert_eq!(health_score(&snapshot(10_000_000.0, 5_000_000.0, 3_000_000.0)), 100);
        assert_eq!(health_score(&snapshot(1_000_000.0, 2_000_000.0, 0.0)), 0);
    }

    #[test]
    fn test_general_advice_without_data() {
        let empty = Snapshot {
            expenses_by_category: Vec::new(),
            ..snapshot(0.0, 0.0, 0.0)
        };
        assert!(advise(Topic::General, &empty).contains("Mulai Pencatatan Keuangan"));
        assert!(advise(Topic::SavingTips, &empty).contains("Mulai catat pengeluaran detail"));
    }
}
