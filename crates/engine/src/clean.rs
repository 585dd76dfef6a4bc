use std::net::Ipv6Addr;

use regex::Regex;

use crate::model::{CleaningResult, NoiseKind, RemovedElement};
use crate::vocab::ManufacturerVocabulary;

/// Incidental English words seen in inventory exports. Only stripped from
/// purely alphabetic tokens longer than two characters.
const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "with", "from", "new", "old", "camera", "cameras", "video", "network",
    "device", "model", "series", "type", "indoor", "outdoor", "dome", "bullet",
];

/// Strip noise tokens from one raw label.
///
/// Trims the input, splits on whitespace runs, and tests each token in
/// priority order (IP, MAC, date, manufacturer, common word, punctuation),
/// dropping on first hit with a tagged reason. Month-name dates
/// (`Apr 01, 2023`) span whitespace and are extracted from the raw string
/// before tokenization. Empty/whitespace input yields an empty result;
/// this function never fails.
pub fn clean_label(raw: &str, vocab: &ManufacturerVocabulary) -> CleaningResult {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CleaningResult::empty();
    }

    let patterns = NoisePatterns::compile();
    let mut removed = Vec::new();

    let mut working = trimmed.to_string();
    let month_dates: Vec<String> = patterns
        .date_month
        .find_iter(&working)
        .map(|m| m.as_str().to_string())
        .collect();
    if !month_dates.is_empty() {
        working = patterns.date_month.replace_all(&working, " ").into_owned();
        for date in month_dates {
            removed.push(RemovedElement {
                kind: NoiseKind::Date,
                value: date,
            });
        }
    }

    let mut kept: Vec<&str> = Vec::new();
    for token in working.split_whitespace() {
        match classify_token(token, &patterns, vocab) {
            Some(kind) => removed.push(RemovedElement {
                kind,
                value: token.to_string(),
            }),
            None => kept.push(token),
        }
    }

    CleaningResult {
        original: trimmed.to_string(),
        cleaned: kept.join(" "),
        removed,
    }
}

/// First matching noise rule wins; `None` means the token survives.
fn classify_token(
    token: &str,
    patterns: &NoisePatterns,
    vocab: &ManufacturerVocabulary,
) -> Option<NoiseKind> {
    if patterns.is_ip(token) {
        return Some(NoiseKind::Ip);
    }
    if patterns.is_mac(token) {
        return Some(NoiseKind::Mac);
    }
    if patterns.is_date(token) {
        return Some(NoiseKind::Date);
    }
    if vocab.matches_token(token) {
        return Some(NoiseKind::Manufacturer);
    }
    if is_common_word(token) {
        return Some(NoiseKind::CommonWord);
    }
    if token.chars().all(|c| !c.is_alphanumeric()) {
        return Some(NoiseKind::Punctuation);
    }
    None
}

fn is_common_word(token: &str) -> bool {
    token.chars().count() > 2
        && token.chars().all(|c| c.is_alphabetic())
        && COMMON_WORDS.contains(&token.to_lowercase().as_str())
}

/// Compiled per cleaning call, reused across the label's tokens.
struct NoisePatterns {
    ipv4: Regex,
    mac_colon: Regex,
    mac_hyphen: Regex,
    mac_dotted: Regex,
    date_slash: Regex,
    date_hyphen: Regex,
    date_iso: Regex,
    date_dotted: Regex,
    date_month: Regex,
}

impl NoisePatterns {
    fn compile() -> Self {
        Self {
            ipv4: Regex::new(r"^\d{1,3}(?:\.\d{1,3}){3}$").unwrap(),
            mac_colon: Regex::new(r"^[0-9A-Fa-f]{2}(?::[0-9A-Fa-f]{2}){5}$").unwrap(),
            mac_hyphen: Regex::new(r"^[0-9A-Fa-f]{2}(?:-[0-9A-Fa-f]{2}){5}$").unwrap(),
            mac_dotted: Regex::new(r"^[0-9A-Fa-f]{4}(?:\.[0-9A-Fa-f]{4}){2}$").unwrap(),
            date_slash: Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(),
            date_hyphen: Regex::new(r"^\d{1,2}-\d{1,2}-\d{4}$").unwrap(),
            date_iso: Regex::new(r"^\d{4}-\d{1,2}-\d{1,2}$").unwrap(),
            date_dotted: Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").unwrap(),
            date_month: Regex::new(
                r"(?i)\b(?:jan|feb|mar|apr|may|jun|jul|aug|sep|oct|nov|dec)\s+\d{1,2},\s*\d{4}\b",
            )
            .unwrap(),
        }
    }

    /// Valid dotted-quad IPv4 (octets 0-255) or full/compressed IPv6.
    fn is_ip(&self, token: &str) -> bool {
        if self.ipv4.is_match(token) {
            return token.split('.').all(|octet| octet.parse::<u8>().is_ok());
        }
        token.contains(':') && token.parse::<Ipv6Addr>().is_ok()
    }

    /// Hex-pair colon/hyphen sextet, or Cisco dotted groups-of-four form.
    fn is_mac(&self, token: &str) -> bool {
        self.mac_colon.is_match(token)
            || self.mac_hyphen.is_match(token)
            || self.mac_dotted.is_match(token)
    }

    fn is_date(&self, token: &str) -> bool {
        self.date_slash.is_match(token)
            || self.date_hyphen.is_match(token)
            || self.date_iso.is_match(token)
            || self.date_dotted.is_match(token)
    }
}
