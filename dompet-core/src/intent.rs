//! Action and sub-category detection.

use serde::{Deserialize, Serialize};

use crate::amount::MAGNITUDE_UNITS;
use crate::lexicon::Lexicon;
use crate::matcher::{contains_any, contains_direct};

/// Label used when no sub-category keyword matches.
pub const OTHER_CATEGORY: &str = "Lainnya";

/// High-level intent of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    #[serde(rename = "expense")]
    Expense,
    #[serde(rename = "income")]
    Income,
    #[serde(rename = "savings")]
    Savings,
    #[serde(rename = "withdraw")]
    Withdraw,
}

impl Action {
    /// Fixed confidence reported with an understood message.
    pub fn confidence(&self) -> f64 {
        match self {
            Action::Expense | Action::Income => 0.9,
            Action::Savings | Action::Withdraw => 0.85,
        }
    }

    /// Description used when the message has no usable words left.
    pub fn default_description(&self) -> &'static str {
        match self {
            Action::Expense => "Pengeluaran via AI Chat",
            Action::Income => "Pemasukan via AI Chat",
            Action::Savings => "Tabungan via AI Chat",
            Action::Withdraw => "Penarikan via AI Chat",
        }
    }

    /// Whether this action carries a sub-category.
    pub fn has_category(&self) -> bool {
        matches!(self, Action::Expense | Action::Income)
    }
}

/// Outcome of action detection. `Fallback` is the explicit "nothing matched"
/// case and resolves to [`Action::Expense`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "source", content = "action")]
pub enum ActionMatch {
    #[serde(rename = "keyword")]
    Keyword(Action),
    #[serde(rename = "fallback")]
    Fallback,
}

impl ActionMatch {
    pub fn action(self) -> Action {
        match self {
            ActionMatch::Keyword(action) => action,
            ActionMatch::Fallback => Action::Expense,
        }
    }
}

/// Savings beats withdraw beats income beats expense, wherever the keyword
/// sits in the message.
const DETECTION_ORDER: [Action; 4] = [
    Action::Savings,
    Action::Withdraw,
    Action::Income,
    Action::Expense,
];

/// Category matching passes, strongest first. A word that literally
/// contains a category keyword outranks one that only fuzzily resembles an
/// earlier category, so "bayar listrik" is Tagihan rather than a typo of "ayam".
const MATCH_PASSES: [fn(&[&str], &[&str]) -> bool; 2] = [contains_direct, contains_any];

/// Multi-word trigger phrases ("ambil tabungan") claim their words first,
/// so a word inside a phrase only speaks for the phrase's action.
///
/// Actions are tried strictly in priority order, each with direct and fuzzy
/// matching. A word that already spells out a trigger of some action is kept
/// out of fuzzy matching: "bayar" contains the expense trigger itself and
/// must not count as a near miss of the income keyword "bayaran".
pub fn detect_action(words: &[&str], lexicon: &Lexicon) -> ActionMatch {
    let (phrase_hits, free_words) = claim_phrases(words, lexicon);
    let loose: Vec<&str> = free_words
        .iter()
        .copied()
        .filter(|w| {
            !DETECTION_ORDER
                .iter()
                .any(|a| contains_direct(&[*w], lexicon.table(*a).triggers))
        })
        .collect();

    DETECTION_ORDER
        .into_iter()
        .find(|action| {
            let triggers = lexicon.table(*action).triggers;
            phrase_hits.contains(action)
                || contains_direct(&free_words, triggers)
                || contains_any(&loose, triggers)
        })
        .map(ActionMatch::Keyword)
        .unwrap_or(ActionMatch::Fallback)
}

/// Actions with a matching multi-word trigger, and the words no phrase claimed.
fn claim_phrases<'a>(words: &[&'a str], lexicon: &Lexicon) -> (Vec<Action>, Vec<&'a str>) {
    let mut claimed = vec![false; words.len()];
    let mut hits = Vec::new();

    for action in DETECTION_ORDER {
        for phrase in lexicon.table(action).triggers.iter().filter(|t| t.contains(' ')) {
            let parts: Vec<&str> = phrase.split(' ').collect();
            for start in 0..words.len().saturating_sub(parts.len() - 1) {
                if words[start..start + parts.len()] == parts[..] {
                    claimed[start..start + parts.len()].fill(true);
                    if !hits.contains(&action) {
                        hits.push(action);
                    }
                }
            }
        }
    }

    let free = words
        .iter()
        .zip(&claimed)
        .filter(|(_, taken)| !**taken)
        .map(|(w, _)| *w)
        .collect();
    (hits, free)
}

/// First matching sub-category in declaration order, "Lainnya" when none
/// match, `None` for actions without sub-categories.
pub fn detect_category(words: &[&str], action: Action, lexicon: &Lexicon) -> Option<String> {
    if !action.has_category() {
        return None;
    }

    let categories = lexicon.table(action).categories;
    let name = MATCH_PASSES
        .iter()
        .find_map(|matches| categories.iter().find(|c| matches(words, c.keywords)))
        .map(|c| c.name)
        .unwrap_or(OTHER_CATEGORY);
    Some(name.to_string())
}

/// Short description from the first three meaningful words.
pub fn describe(words: &[&str], action: Action, lexicon: &Lexicon) -> String {
    let kept: Vec<&str> = words
        .iter()
        .copied()
        .filter(|w| !is_numeric_word(w) && !lexicon.common_words.contains(w) && w.chars().count() > 2)
        .take(3)
        .collect();

    if kept.is_empty() {
        action.default_description().to_string()
    } else {
        kept.join(" ")
    }
}

fn is_numeric_word(word: &str) -> bool {
    word.chars().any(|c| c.is_ascii_digit()) || MAGNITUDE_UNITS.iter().any(|(unit, _)| *unit == word)
}
