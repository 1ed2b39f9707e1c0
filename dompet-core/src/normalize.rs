//! Message normalization shared by every extractor.

/// Characters replaced by a space before matching.
const PUNCTUATION: &[char] = &[
    '.', ',', '/', '#', '!', '$', '%', '^', '&', '*', ';', ':', '{', '}', '=', '-', '_', '`', '~',
    '(', ')',
];

/// Lower-case the message, replace punctuation with spaces and collapse whitespace.
pub fn normalize_message(text: &str) -> String {
    let replaced: String = text
        .to_lowercase()
        .chars()
        .map(|c| if PUNCTUATION.contains(&c) { ' ' } else { c })
        .collect();
    collapse_whitespace(&replaced)
}

/// Same as [`normalize_message`], but keeps `.` and `,` sitting between two
/// digits so "25.000" and "2,5jt" survive for the amount extractor.
pub fn normalize_numeric(text: &str) -> String {
    let lowered: Vec<char> = text.to_lowercase().chars().collect();
    let mut out = String::with_capacity(lowered.len());

    for (i, &c) in lowered.iter().enumerate() {
        let between_digits = i > 0
            && lowered[i - 1].is_ascii_digit()
            && lowered.get(i + 1).is_some_and(|n| n.is_ascii_digit());

        if PUNCTUATION.contains(&c) && !(matches!(c, '.' | ',') && between_digits) {
            out.push(' ');
        } else {
            out.push(c);
        }
    }

    collapse_whitespace(&out)
}

/// Split normalized text into words.
pub fn words(normalized: &str) -> Vec<&str> {
    normalized.split(' ').filter(|w| !w.is_empty()).collect()
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
