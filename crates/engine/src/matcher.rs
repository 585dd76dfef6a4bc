use serde::Deserialize;

use crate::clean::clean_label;
use crate::compat::compatibility_for;
use crate::model::{MatchResult, MatchType, ReferenceEntry};
use crate::similarity::similarity_ratio;
use crate::vocab::ManufacturerVocabulary;

/// Acceptance thresholds for the potential pass.
///
/// The defaults (0.6 acceptance, 0.5 containment floor) are the behavioral
/// contract; the TOML knob exists for product-owner experimentation only.
#[derive(Debug, Clone, Deserialize)]
pub struct MatchThresholds {
    #[serde(default = "default_potential")]
    pub potential: f64,
    #[serde(default = "default_containment_floor")]
    pub containment_floor: f64,
}

fn default_potential() -> f64 {
    0.6
}

fn default_containment_floor() -> f64 {
    0.5
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            potential: default_potential(),
            containment_floor: default_containment_floor(),
        }
    }
}

/// Catalog entries with their model names cleaned once per
/// (catalog, vocabulary). Memoization only; results are identical to
/// re-cleaning per query.
#[derive(Debug, Clone)]
pub struct CleanedCatalog {
    entries: Vec<CleanedEntry>,
}

#[derive(Debug, Clone)]
struct CleanedEntry {
    reference: ReferenceEntry,
    cleaned: String,
    cleaned_lower: String,
}

impl CleanedCatalog {
    pub fn build(catalog: &[ReferenceEntry], vocab: &ManufacturerVocabulary) -> Self {
        let entries = catalog
            .iter()
            .map(|reference| {
                let cleaned = clean_label(&reference.model_name, vocab).cleaned;
                let cleaned_lower = cleaned.to_lowercase();
                CleanedEntry {
                    reference: reference.clone(),
                    cleaned,
                    cleaned_lower,
                }
            })
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Classify one aggregated label against the catalog.
///
/// Exact pass first: the first catalog-order entry whose cleaned model name
/// equals the cleaned input case-insensitively wins with similarity 1.0.
/// Otherwise a single in-order potential scan tracks the best candidate:
/// a candidate replaces the running best when its similarity beats it, or
/// when the two cleaned strings contain one another and the candidate's
/// similarity clears the containment floor. The containment clause may
/// install a candidate that scores below the running best; ties favor the
/// earliest qualifying entry. This asymmetric rule is a literal behavioral
/// contract and is pending product-owner review.
pub fn match_label(
    raw_label: &str,
    count: f64,
    vocab: &ManufacturerVocabulary,
    catalog: &CleanedCatalog,
    thresholds: &MatchThresholds,
) -> MatchResult {
    let cleaning = clean_label(raw_label, vocab);
    let cleaned_lower = cleaning.cleaned.to_lowercase();

    if cleaning.cleaned.is_empty() {
        return no_match(raw_label, cleaning.cleaned, count, cleaning.removed);
    }

    // Exact pass
    for entry in &catalog.entries {
        if entry.cleaned_lower == cleaned_lower {
            return MatchResult {
                model: raw_label.to_string(),
                cleaned_model: cleaning.cleaned,
                count,
                match_type: MatchType::Exact,
                matched_with: Some(entry.reference.model_name.clone()),
                similarity: Some(1.0),
                removed: cleaning.removed,
                compatibility: Some(compatibility_for(Some(&entry.reference))),
                reference: Some(entry.reference.clone()),
            };
        }
    }

    // Potential pass
    let mut best_sim = 0.0_f64;
    let mut best_idx: Option<usize> = None;
    for (i, entry) in catalog.entries.iter().enumerate() {
        let sim = similarity_ratio(&cleaning.cleaned, &entry.cleaned);
        let containment = cleaned_lower.contains(&entry.cleaned_lower)
            || entry.cleaned_lower.contains(&cleaned_lower);
        if sim > best_sim || (containment && sim > thresholds.containment_floor) {
            best_sim = sim;
            best_idx = Some(i);
        }
    }

    if best_sim > thresholds.potential {
        if let Some(i) = best_idx {
            let entry = &catalog.entries[i];
            return MatchResult {
                model: raw_label.to_string(),
                cleaned_model: cleaning.cleaned,
                count,
                match_type: MatchType::Potential,
                matched_with: Some(entry.reference.model_name.clone()),
                similarity: Some(best_sim),
                removed: cleaning.removed,
                compatibility: Some(compatibility_for(Some(&entry.reference))),
                reference: Some(entry.reference.clone()),
            };
        }
    }

    no_match(raw_label, cleaning.cleaned, count, cleaning.removed)
}

fn no_match(
    raw_label: &str,
    cleaned_model: String,
    count: f64,
    removed: Vec<crate::model::RemovedElement>,
) -> MatchResult {
    MatchResult {
        model: raw_label.to_string(),
        cleaned_model,
        count,
        match_type: MatchType::None,
        matched_with: None,
        similarity: None,
        removed,
        reference: None,
        compatibility: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CompatibilityType;

    fn entry(manufacturer: &str, model: &str, notes: &str) -> ReferenceEntry {
        ReferenceEntry {
            manufacturer: manufacturer.into(),
            model_name: model.into(),
            minimum_firmware: String::new(),
            notes: notes.into(),
        }
    }

    fn setup(catalog: Vec<ReferenceEntry>) -> (ManufacturerVocabulary, CleanedCatalog) {
        let vocab = ManufacturerVocabulary::build(&catalog);
        let cleaned = CleanedCatalog::build(&catalog, &vocab);
        (vocab, cleaned)
    }

    #[test]
    fn exact_match_after_cleaning() {
        let (vocab, catalog) = setup(vec![entry("Axis", "P3245-LVE", "")]);
        let result = match_label(
            "Axis P3245-LVE",
            2.0,
            &vocab,
            &catalog,
            &MatchThresholds::default(),
        );
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.matched_with.as_deref(), Some("P3245-LVE"));
        assert_eq!(result.similarity, Some(1.0));
        assert_eq!(result.cleaned_model, "P3245-LVE");
        assert_eq!(result.compatibility, Some(CompatibilityType::OnvifS));
    }

    #[test]
    fn exact_ties_resolve_to_first_catalog_entry() {
        let (vocab, catalog) = setup(vec![
            entry("Axis", "P3245-LVE", "first"),
            entry("Axis", "p3245-lve", "second"),
        ]);
        let result = match_label("P3245-LVE", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.reference.unwrap().notes, "first");
    }

    #[test]
    fn potential_match_via_levenshtein() {
        let (vocab, catalog) = setup(vec![entry("Axis", "P3245-LVE", "")]);
        let result = match_label("P3245LVE", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::Potential);
        assert_eq!(result.matched_with.as_deref(), Some("P3245-LVE"));
        assert!(result.similarity.unwrap() > 0.6);
    }

    #[test]
    fn similarity_exactly_at_threshold_is_none() {
        // "abcde" vs "abcxy": distance 2 over 5 chars = 0.6 exactly
        let (vocab, catalog) = setup(vec![entry("", "abcxy", "")]);
        let result = match_label("abcde", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::None);
        assert_eq!(result.similarity, None);
    }

    #[test]
    fn similarity_just_above_threshold_qualifies() {
        // distance 3 over 10 chars = 0.7
        let (vocab, catalog) = setup(vec![entry("", "abcdefghij", "")]);
        let result = match_label("abcdefgxyz", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::Potential);
    }

    #[test]
    fn containment_overrides_higher_running_best() {
        // First entry scores higher on raw similarity; the later entry is a
        // substring of the input with similarity above the floor, so it
        // takes over as best.
        let (vocab, catalog) = setup(vec![
            entry("", "Q1785-LE-3X", ""),
            entry("", "Q1785-LE", ""),
        ]);
        // "Q1785-LE-34" scores 10/11 against the first entry but only 8/11
        // against the second; containment still installs the second.
        let result = match_label("Q1785-LE-34", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::Potential);
        assert_eq!(result.matched_with.as_deref(), Some("Q1785-LE"));
        assert!((result.similarity.unwrap() - 8.0 / 11.0).abs() < 1e-9);
    }

    #[test]
    fn empty_cleaned_input_is_none() {
        let (vocab, catalog) = setup(vec![entry("Axis", "P3245-LVE", "")]);
        for label in ["", "   ", "Axis"] {
            let result = match_label(label, 1.0, &vocab, &catalog, &MatchThresholds::default());
            assert_eq!(result.match_type, MatchType::None, "label {label:?}");
            assert!(result.similarity.is_none());
            assert!(result.reference.is_none());
            assert!(result.compatibility.is_none());
        }
    }

    #[test]
    fn empty_catalog_yields_none() {
        let (vocab, catalog) = setup(vec![]);
        let result = match_label("P3245-LVE", 1.0, &vocab, &catalog, &MatchThresholds::default());
        assert_eq!(result.match_type, MatchType::None);
        assert!(result.similarity.is_none());
        assert!(result.reference.is_none());
    }

    #[test]
    fn rtsp_notes_set_compatibility() {
        let (vocab, catalog) = setup(vec![entry("", "DS-2CD2143G0-I", "RTSP support only")]);
        let result = match_label(
            "DS-2CD2143G0-I",
            1.0,
            &vocab,
            &catalog,
            &MatchThresholds::default(),
        );
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.compatibility, Some(CompatibilityType::Rtsp));
    }

    #[test]
    fn cleaned_catalog_matches_per_query_cleaning() {
        // Matching against the memoized catalog equals cleaning inline
        let catalog_entries = vec![entry("Axis", "Axis P3245-LVE", "")];
        let vocab = ManufacturerVocabulary::build(&catalog_entries);
        let catalog = CleanedCatalog::build(&catalog_entries, &vocab);
        let result = match_label("P3245-LVE", 1.0, &vocab, &catalog, &MatchThresholds::default());
        // Catalog name cleans to "P3245-LVE" (manufacturer token stripped)
        assert_eq!(result.match_type, MatchType::Exact);
    }
}
