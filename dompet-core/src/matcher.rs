//! Keyword matching: fuzzy containment for actions and categories, strict
//! containment for date phrases.

/// Levenshtein edit distance over characters (insert, delete, substitute cost 1).
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Two words are a typo of each other when they are close in length, not
/// too short, and at most two edits apart (and at most 40% of the longer word).
pub fn is_typo(a: &str, b: &str) -> bool {
    let (la, lb) = (a.chars().count(), b.chars().count());
    if la.abs_diff(lb) > 2 || la < 3 || lb < 3 {
        return false;
    }

    let distance = levenshtein(a, b);
    distance <= 2 && distance as f64 / la.max(lb) as f64 <= 0.4
}

/// Fuzzy containment of a single word against a keyword.
///
/// A word shorter than three characters only matches a keyword it contains;
/// otherwise "di" or "ke" would hit every keyword spelled around them.
pub fn fuzzy_matches(word: &str, keyword: &str) -> bool {
    if word.contains(keyword) {
        return true;
    }
    if word.chars().count() >= 3 && keyword.contains(word) {
        return true;
    }
    is_typo(word, keyword)
}

/// True if any word fuzzily matches any keyword.
pub fn contains_any(words: &[&str], keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|kw| words.iter().any(|w| fuzzy_matches(w, kw)))
}

/// True if some word contains some keyword outright. Used as the first,
/// high-precision pass before [`contains_any`].
pub fn contains_direct(words: &[&str], keywords: &[&str]) -> bool {
    keywords
        .iter()
        .any(|kw| words.iter().any(|w| w.contains(kw)))
}

/// Strict variant for date keywords: no edit distance.
///
/// Single-word keywords match a word that equals or contains them. Multi-word
/// keywords must appear as consecutive whole words.
pub fn contains_exact(words: &[&str], keywords: &[&str]) -> bool {
    keywords.iter().any(|kw| matches_exact(words, kw))
}

pub(crate) fn matches_exact(words: &[&str], keyword: &str) -> bool {
    let parts: Vec<&str> = keyword.split(' ').collect();
    if parts.len() == 1 {
        return words.iter().any(|w| *w == keyword || w.contains(keyword));
    }
    words.windows(parts.len()).any(|window| window == parts.as_slice())
}
