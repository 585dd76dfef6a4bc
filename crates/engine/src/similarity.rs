/// Normalized case-insensitive Levenshtein similarity in `[0, 1]`.
///
/// `(max_len - distance) / max_len` over character counts, with unit-cost
/// insert/delete/substitute. Two empty strings score 1.0.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = strsim::levenshtein(&a, &b);
    (max_len - distance) as f64 / max_len as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identical_strings() {
        assert_eq!(similarity_ratio("P3245-LVE", "P3245-LVE"), 1.0);
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(similarity_ratio("p3245-lve", "P3245-LVE"), 1.0);
    }

    #[test]
    fn both_empty() {
        assert_eq!(similarity_ratio("", ""), 1.0);
    }

    #[test]
    fn one_empty() {
        assert_eq!(similarity_ratio("abc", ""), 0.0);
        assert_eq!(similarity_ratio("", "abc"), 0.0);
    }

    #[test]
    fn single_edit() {
        // distance 1 over max length 9
        let sim = similarity_ratio("P3245LVE", "P3245-LVE");
        assert!((sim - 8.0 / 9.0).abs() < 1e-9);
    }

    #[test]
    fn disjoint_strings() {
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
    }

    #[test]
    fn exact_three_fifths() {
        // distance 2 over max length 5 = 0.6 exactly
        assert_eq!(similarity_ratio("abcde", "abcxy"), 0.6);
    }
}
