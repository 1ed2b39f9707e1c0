//! Keyword and date-phrase tables used by the parser.
//!
//! Tables are plain static data; a [`Lexicon`] bundles them so the parser
//! takes its vocabulary as an explicit, immutable argument.

use chrono::Weekday;

use crate::dates::Timeframe;
use crate::intent::Action;

/// Keywords for one sub-category ("Makanan", "Gaji", ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CategoryKeywords {
    pub name: &'static str,
    pub keywords: &'static [&'static str],
}

/// Trigger keywords for an action plus its ordered sub-categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordTable {
    pub triggers: &'static [&'static str],
    /// Declaration order is match order.
    pub categories: &'static [CategoryKeywords],
}

/// Everything the parser needs to know about the language it reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Lexicon {
    pub expense: KeywordTable,
    pub income: KeywordTable,
    pub savings: KeywordTable,
    pub withdraw: KeywordTable,
    /// Timeframe phrases, in match order.
    pub dates: &'static [(Timeframe, &'static [&'static str])],
    /// Words never used in generated descriptions.
    pub common_words: &'static [&'static str],
}

impl Lexicon {
    /// The built-in Indonesian vocabulary, abbreviations and common typos included.
    pub fn indonesian() -> Self {
        Self {
            expense: KeywordTable {
                triggers: EXPENSE_TRIGGERS,
                categories: EXPENSE_CATEGORIES,
            },
            income: KeywordTable {
                triggers: INCOME_TRIGGERS,
                categories: INCOME_CATEGORIES,
            },
            savings: KeywordTable {
                triggers: SAVINGS_TRIGGERS,
                categories: &[],
            },
            withdraw: KeywordTable {
                triggers: WITHDRAW_TRIGGERS,
                categories: &[],
            },
            dates: DATE_PHRASES,
            common_words: COMMON_WORDS,
        }
    }

    pub fn table(&self, action: Action) -> &KeywordTable {
        match action {
            Action::Expense => &self.expense,
            Action::Income => &self.income,
            Action::Savings => &self.savings,
            Action::Withdraw => &self.withdraw,
        }
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::indonesian()
    }
}

const EXPENSE_TRIGGERS: &[&str] = &[
    "beli", "bayar", "belanja", "buat", "untuk", "keluar", "habis", "spend", "buat beli", "utk",
    "byr", "bli", "blnja", "keluarin", "pake", "pakai", "pkai",
];

const EXPENSE_CATEGORIES: &[CategoryKeywords] = &[
    CategoryKeywords {
        name: "Makanan",
        keywords: &[
            "makan", "nasi", "bakso", "soto", "gudeg", "ayam", "ikan", "sayur", "buah", "jajan",
            "snack", "minum", "kopi", "teh", "restoran", "warung", "food", "cafe", "mkn", "mknan",
            "jjn", "kfe",
        ],
    },
    CategoryKeywords {
        name: "Transportasi",
        keywords: &[
            "bensin", "spbu", "ojek", "gojek", "grab", "bus", "taxi", "motor", "mobil", "parkir",
            "tol", "tiket", "transport", "bnsn", "ojol", "grb", "trnsprt", "isi bensin", "isi",
            "shell", "pertamina", "bbm", "solar", "premium", "pertalite",
        ],
    },
    CategoryKeywords {
        name: "Belanja",
        keywords: &[
            "baju", "celana", "sepatu", "tas", "kosmetik", "shopping", "mall", "toko", "online",
            "marketplace", "skincare", "bj", "sptu", "kosmetk", "shp", "ol",
        ],
    },
    CategoryKeywords {
        name: "Tagihan",
        keywords: &[
            "listrik", "air", "internet", "wifi", "pulsa", "token", "pln", "pdam", "telkom",
            "indihome", "tv", "kabel", "lstrk", "intrnt", "wf", "plsa", "tkn",
        ],
    },
    CategoryKeywords {
        name: "Hiburan",
        keywords: &[
            "film", "bioskop", "game", "konser", "wisata", "liburan", "rekreasi", "netflix",
            "spotify", "youtube", "flm", "bioskp", "gm", "wsta", "lbrn",
        ],
    },
    CategoryKeywords {
        name: "Kesehatan",
        keywords: &[
            "dokter", "obat", "apotek", "rumah sakit", "rs", "vitamin", "medical", "therapy",
            "checkup", "dktr", "obt", "aptk", "vtmn", "chckp",
        ],
    },
];

const INCOME_TRIGGERS: &[&str] = &[
    "gaji", "gajian", "terima", "dapat", "income", "masuk", "bayaran", "honor", "bonus", "untung",
    "profit", "duit", "uang masuk", "gj", "gjn", "trma", "dpt", "duit masuk", "uang", "duwit",
];

const INCOME_CATEGORIES: &[CategoryKeywords] = &[
    CategoryKeywords {
        name: "Gaji",
        keywords: &["gaji", "gajian", "salary", "bulanan", "tetap", "gj", "gjn", "slry"],
    },
    CategoryKeywords {
        name: "Freelance",
        keywords: &[
            "freelance", "project", "kerja", "jasa", "service", "frelnc", "prjct", "krj", "js",
            "srvc",
        ],
    },
    CategoryKeywords {
        name: "Bonus",
        keywords: &["bonus", "thr", "reward", "hadiah", "extra", "bns", "rwrd", "hdh", "xtr"],
    },
    CategoryKeywords {
        name: "Investasi",
        keywords: &[
            "investasi", "saham", "dividen", "bunga", "deposito", "reksadana", "invst", "shm",
            "dvdn", "bng", "dpst",
        ],
    },
];

const SAVINGS_TRIGGERS: &[&str] = &[
    "nabung", "menabung", "tabung", "simpan", "saving", "celengan", "setor", "masukin",
    "masukkan", "taruh tabungan",
];

const WITHDRAW_TRIGGERS: &[&str] = &[
    "ambil", "tarik", "withdraw", "keluar dari tabungan", "ambil tabungan", "keluarkan",
    "cairkan", "pake tabungan", "pakai tabungan", "gunakan tabungan",
];

const DATE_PHRASES: &[(Timeframe, &[&str])] = &[
    (Timeframe::Today, &["hari ini", "sekarang", "tadi", "skrg"]),
    (Timeframe::Yesterday, &["kemarin", "kemaren", "kmrn"]),
    (Timeframe::Tomorrow, &["besok", "esok"]),
    (Timeframe::DayAfterTomorrow, &["lusa", "tulat"]),
    (Timeframe::ThisWeek, &["minggu ini", "pekan ini"]),
    (Timeframe::LastWeek, &["minggu lalu", "pekan lalu", "seminggu lalu"]),
    (Timeframe::LastSunday, &["minggu kemarin"]),
    (Timeframe::NextWeek, &["minggu depan", "minggu besok", "pekan depan"]),
    (Timeframe::ThisMonth, &["bulan ini"]),
    (Timeframe::LastMonth, &["bulan lalu", "bulan kemarin", "sebulan lalu"]),
    (Timeframe::NextMonth, &["bulan depan", "bulan besok"]),
    (Timeframe::ThisYear, &["tahun ini"]),
    (Timeframe::LastYear, &["tahun lalu", "tahun kemarin", "setahun lalu"]),
    (Timeframe::NextYear, &["tahun depan", "tahun besok"]),
    (Timeframe::Day(Weekday::Mon), &["senin", "monday"]),
    (Timeframe::Day(Weekday::Tue), &["selasa", "tuesday"]),
    (Timeframe::Day(Weekday::Wed), &["rabu", "wednesday"]),
    (Timeframe::Day(Weekday::Thu), &["kamis", "thursday"]),
    (Timeframe::Day(Weekday::Fri), &["jumat", "friday"]),
    (Timeframe::Day(Weekday::Sat), &["sabtu", "saturday"]),
    (Timeframe::Day(Weekday::Sun), &["minggu", "sunday", "ahad"]),
];

const COMMON_WORDS: &[&str] = &[
    "saya", "aku", "mau", "ingin", "untuk", "dari", "ke", "di", "dan", "atau", "yang", "sudah",
    "akan", "bisa", "dapat",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_order_is_declared_order() {
        let lexicon = Lexicon::indonesian();
        let names: Vec<_> = lexicon.expense.categories.iter().map(|c| c.name).collect();
        assert_eq!(
            names,
            ["Makanan", "Transportasi", "Belanja", "Tagihan", "Hiburan", "Kesehatan"]
        );
        let names: Vec<_> = lexicon.income.categories.iter().map(|c| c.name).collect();
        assert_eq!(names, ["Gaji", "Freelance", "Bonus", "Investasi"]);
    }

    #[test]
    fn test_savings_and_withdraw_have_no_categories() {
        let lexicon = Lexicon::default();
        assert!(lexicon.table(Action::Savings).categories.is_empty());
        assert!(lexicon.table(Action::Withdraw).categories.is_empty());
        assert!(lexicon.table(Action::Expense).triggers.contains(&"byr"));
    }
}
