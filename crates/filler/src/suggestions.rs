//! "Did you mean" suggestions for misspelled names.

use strsim::levenshtein;

/// Return up to three candidates close to `name`, closest first.
///
/// Short names tolerate one edit, longer names two.
pub fn compute_suggestions<S: AsRef<str>>(name: &str, candidates: &[S]) -> Vec<String> {
    let max_distance = if name.chars().count() <= 3 { 1 } else { 2 };
    let mut scored: Vec<(usize, &str)> = candidates
        .iter()
        .map(AsRef::as_ref)
        .map(|candidate| (levenshtein(name, candidate), candidate))
        .filter(|(distance, _)| *distance <= max_distance)
        .collect();
    scored.sort();
    scored
        .into_iter()
        .take(3)
        .map(|(_, candidate)| candidate.to_string())
        .collect()
}

/// Format suggestions as a trailing hint for error messages.
pub(crate) fn hint(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else {
        format!(", did you mean: {}?", suggestions.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_match() {
        assert_eq!(compute_suggestions("iff", &["if", "for", "elif"]), vec!["if"]);
    }

    #[test]
    fn test_no_match() {
        assert!(compute_suggestions("xyz", &["if", "for"]).is_empty());
    }

    #[test]
    fn test_closest_first() {
        let found = compute_suggestions("rnage", &["range", "len", "upper"]);
        assert_eq!(found, vec!["range"]);
    }

    #[test]
    fn test_hint_formatting() {
        assert_eq!(hint(&[]), "");
        assert_eq!(hint(&["if".to_string()]), ", did you mean: if?");
    }
}
