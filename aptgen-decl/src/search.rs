//! Fuzzy name suggestions for declarations that fail to resolve

use strsim::levenshtein;

/// A fuzzy match suggestion with candidate name and edit distance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Suggestion {
    pub candidate: String,
    pub distance: usize,
}

/// Suggest similar names from a list of candidates.
///
/// Exact matches are excluded. Case-insensitive matches rank at distance 0,
/// substring matches at 1, everything else at its Levenshtein distance.
/// Ties keep the candidates' original order.
pub fn suggest_similar(name: &str, candidates: &[&str], max_distance: usize) -> Vec<Suggestion> {
    let name_lower = name.to_lowercase();
    let mut suggestions: Vec<Suggestion> = candidates
        .iter()
        .filter(|&&candidate| candidate != name)
        .filter_map(|&candidate| {
            let candidate_lower = candidate.to_lowercase();
            let distance = if candidate_lower == name_lower {
                0
            } else if candidate_lower.contains(&name_lower) || name_lower.contains(&candidate_lower)
            {
                1
            } else {
                levenshtein(name, candidate)
            };
            (distance <= max_distance).then(|| Suggestion {
                candidate: candidate.to_string(),
                distance,
            })
        })
        .collect();

    suggestions.sort_by_key(|s| s.distance);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suggest_ranks_case_then_substring_then_edit() {
        let candidates = ["thing1", "Thing12", "Thing9", "Unrelated"];
        let suggestions = suggest_similar("Thing1", &candidates, 2);
        let names: Vec<&str> = suggestions.iter().map(|s| s.candidate.as_str()).collect();
        assert_eq!(names, vec!["thing1", "Thing12", "Thing9"]);
        assert_eq!(suggestions[0].distance, 0);
        assert_eq!(suggestions[1].distance, 1);
    }

    #[test]
    fn test_suggest_skips_exact_and_distant() {
        let candidates = ["Thing1", "Zebra"];
        assert!(suggest_similar("Thing1", &candidates, 2).is_empty());
    }
}
