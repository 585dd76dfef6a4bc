use std::collections::BTreeSet;

use crate::model::ReferenceEntry;

/// Manufacturer-name stoplist derived from the reference catalog.
///
/// Holds every non-empty trimmed manufacturer string verbatim plus each of
/// its whitespace-split words longer than two characters. Case is preserved
/// at build time; membership tests lowercase both sides. Rebuild whenever
/// the catalog changes.
#[derive(Debug, Clone, Default)]
pub struct ManufacturerVocabulary {
    entries: BTreeSet<String>,
    /// Lowercase forms, precomputed once for containment tests.
    lowered: Vec<String>,
}

impl ManufacturerVocabulary {
    /// Build from catalog entries. Pure, idempotent, order-independent.
    pub fn build(catalog: &[ReferenceEntry]) -> Self {
        let mut entries = BTreeSet::new();
        for entry in catalog {
            let manufacturer = entry.manufacturer.trim();
            if manufacturer.is_empty() {
                continue;
            }
            entries.insert(manufacturer.to_string());
            for word in manufacturer.split_whitespace() {
                if word.chars().count() > 2 {
                    entries.insert(word.to_string());
                }
            }
        }
        let lowered = entries.iter().map(|e| e.to_lowercase()).collect();
        Self { entries, lowered }
    }

    /// True if the token equals, contains, or is contained in any
    /// vocabulary entry, case-insensitively.
    pub fn matches_token(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.lowered
            .iter()
            .any(|e| token == *e || token.contains(e.as_str()) || e.contains(token.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|s| s.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(manufacturer: &str, model: &str) -> ReferenceEntry {
        ReferenceEntry {
            manufacturer: manufacturer.into(),
            model_name: model.into(),
            minimum_firmware: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn full_string_and_long_words() {
        let vocab = ManufacturerVocabulary::build(&[entry("Hanwha Vision Co", "X1")]);
        let words: Vec<&str> = vocab.iter().collect();
        assert!(words.contains(&"Hanwha Vision Co"));
        assert!(words.contains(&"Hanwha"));
        assert!(words.contains(&"Vision"));
        // "Co" has only 2 chars, so only the full string carries it
        assert!(!words.contains(&"Co"));
    }

    #[test]
    fn empty_manufacturer_skipped() {
        let vocab = ManufacturerVocabulary::build(&[entry("   ", "X1"), entry("", "X2")]);
        assert!(vocab.is_empty());
    }

    #[test]
    fn duplicates_collapse() {
        let vocab = ManufacturerVocabulary::build(&[entry("Axis", "A"), entry("Axis", "B")]);
        assert_eq!(vocab.len(), 1);
    }

    #[test]
    fn token_match_is_case_insensitive() {
        let vocab = ManufacturerVocabulary::build(&[entry("Axis", "A")]);
        assert!(vocab.matches_token("AXIS"));
        assert!(vocab.matches_token("axis"));
    }

    #[test]
    fn containment_both_directions() {
        let vocab = ManufacturerVocabulary::build(&[entry("Axis", "A")]);
        // Token contains the entry
        assert!(vocab.matches_token("Axis-Communications"));
        // Entry contains the token
        assert!(vocab.matches_token("axi"));
        assert!(!vocab.matches_token("P3245"));
    }

    #[test]
    fn order_independent() {
        let a = ManufacturerVocabulary::build(&[entry("Axis", "A"), entry("Bosch", "B")]);
        let b = ManufacturerVocabulary::build(&[entry("Bosch", "B"), entry("Axis", "A")]);
        assert_eq!(a.iter().collect::<Vec<_>>(), b.iter().collect::<Vec<_>>());
    }
}
