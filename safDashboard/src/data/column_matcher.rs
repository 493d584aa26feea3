use std::collections::HashMap;
use tracing::debug;

use crate::config::constants::FUZZY_MATCH_CUTOFF;
use crate::error::DashboardError;

/// Gestalt pattern matching similarity, 2·M / T.
///
/// M is the number of characters in the matching blocks found by repeatedly
/// taking the longest common substring and recursing on both sides. Ties
/// between equally long substrings go to the earliest position in `a`, then in
/// `b`, which keeps scores identical to difflib's `SequenceMatcher.ratio`.
pub fn similarity_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    2.0 * matching_characters(&a, &b) as f64 / total as f64
}

fn matching_characters(a: &[char], b: &[char]) -> usize {
    let mut b2j: HashMap<char, Vec<usize>> = HashMap::new();
    for (j, ch) in b.iter().enumerate() {
        b2j.entry(*ch).or_default().push(j);
    }

    let mut matched = 0;
    let mut queue = vec![(0, a.len(), 0, b.len())];
    while let Some((alo, ahi, blo, bhi)) = queue.pop() {
        let (i, j, k) = longest_match(a, &b2j, alo, ahi, blo, bhi);
        if k == 0 {
            continue;
        }
        matched += k;
        if alo < i && blo < j {
            queue.push((alo, i, blo, j));
        }
        if i + k < ahi && j + k < bhi {
            queue.push((i + k, ahi, j + k, bhi));
        }
    }
    matched
}

fn longest_match(
    a: &[char],
    b2j: &HashMap<char, Vec<usize>>,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
) -> (usize, usize, usize) {
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);
    // Length of the match ending at a[i-1], b[j] keyed by j
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_j2len = HashMap::new();
        if let Some(positions) = b2j.get(&a[i]) {
            for &j in positions {
                if j < blo {
                    continue;
                }
                if j >= bhi {
                    break;
                }
                let k = j.checked_sub(1).and_then(|prev| j2len.get(&prev)).copied().unwrap_or(0) + 1;
                next_j2len.insert(j, k);
                if k > best_size {
                    best_i = i + 1 - k;
                    best_j = j + 1 - k;
                    best_size = k;
                }
            }
        }
        j2len = next_j2len;
    }

    (best_i, best_j, best_size)
}

/// Best candidates scoring at least `cutoff`, highest first.
///
/// Equal scores are ordered by the candidate string, larger first.
pub fn close_matches<'a>(word: &str, candidates: &'a [String], n: usize, cutoff: f64) -> Vec<&'a str> {
    let mut scored: Vec<(f64, &'a str)> = candidates
        .iter()
        .map(|candidate| (similarity_ratio(candidate, word), candidate.as_str()))
        .filter(|(score, _)| *score >= cutoff)
        .collect();

    scored.sort_by(|x, y| {
        y.0.partial_cmp(&x.0)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| y.1.cmp(x.1))
    });
    scored.into_iter().take(n).map(|(_, candidate)| candidate).collect()
}

pub fn best_match<'a>(word: &str, candidates: &'a [String]) -> Option<&'a str> {
    close_matches(word, candidates, 1, FUZZY_MATCH_CUTOFF).into_iter().next()
}

/// Resolves a user-supplied impact category against the sheet's columns.
///
/// Exact names win, then case-insensitive names, then the closest fuzzy match.
pub fn resolve_category(requested: Option<&str>, categories: &[String]) -> Result<String, DashboardError> {
    let requested = match requested {
        Some(name) => name.trim(),
        None => {
            return categories
                .first()
                .cloned()
                .ok_or_else(|| DashboardError::UnknownImpactCategory("<none>".to_string()));
        }
    };

    if let Some(exact) = categories.iter().find(|c| c.as_str() == requested) {
        return Ok(exact.clone());
    }
    if let Some(folded) = categories.iter().find(|c| c.eq_ignore_ascii_case(requested)) {
        return Ok(folded.clone());
    }
    if let Some(fuzzy) = best_match(requested, categories) {
        debug!(requested, matched = fuzzy, "impact category resolved by fuzzy match");
        return Ok(fuzzy.to_string());
    }

    Err(DashboardError::UnknownImpactCategory(format!(
        "{} (available: {})",
        requested,
        categories.join(", ")
    )))
}

/// "Land Use (Pt)" -> "Land Use": drops everything from the first " (".
pub fn strip_unit(name: &str) -> &str {
    match name.find(" (") {
        Some(index) => &name[..index],
        None => name,
    }
}

/// Removes a parenthesised unit together with the whitespace before it.
///
/// Everything from the first "(" to the last ")" is removed.
pub fn strip_parenthetical(name: &str) -> String {
    match (name.find('('), name.rfind(')')) {
        (Some(open), Some(close)) if open < close => {
            let head = name[..open].trim_end();
            format!("{}{}", head, &name[close + 1..])
        }
        _ => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ratio_matches_known_values() {
        // difflib.SequenceMatcher(None, "abcd", "bcde").ratio() == 0.75
        assert!((similarity_ratio("abcd", "bcde") - 0.75).abs() < 1e-12);
        assert_eq!(similarity_ratio("same", "same"), 1.0);
        assert_eq!(similarity_ratio("abc", "xyz"), 0.0);
        assert_eq!(similarity_ratio("", ""), 1.0);
        // "private Thread currentThread;" vs "private volatile Thread currentThread;" → 0.866...
        let r = similarity_ratio("private Thread currentThread;", "private volatile Thread currentThread;");
        assert!((r - 0.8656716417910447).abs() < 1e-12);
    }

    #[test]
    fn test_close_matches_orders_by_score() {
        let words = columns(&["ape", "apple", "peach", "puppy"]);
        assert_eq!(close_matches("appel", &words, 3, 0.6), vec!["apple", "ape"]);
    }

    #[test]
    fn test_monetization_names_find_sheet_columns() {
        let sheet = columns(&[
            "Climate change (kg CO2 eq)",
            "Acidification (mol H+ eq)",
            "Land use (Pt)",
            "Water use (m3 world eq. deprived)",
        ]);
        assert_eq!(best_match("Climate change (kg CO₂ eq.)", &sheet), Some("Climate change (kg CO2 eq)"));
        assert_eq!(best_match("Acidification (mol H⁺ eq.)", &sheet), Some("Acidification (mol H+ eq)"));
        assert_eq!(best_match("Land Use (Pt)", &sheet), Some("Land use (Pt)"));
        assert_eq!(best_match("Human Toxicity – Carcinogenic (CTUh)", &sheet), None);
    }

    #[test]
    fn test_resolve_category() {
        let sheet = columns(&["Climate change (kg CO2 eq)", "Land use (Pt)"]);
        assert_eq!(resolve_category(None, &sheet).unwrap(), "Climate change (kg CO2 eq)");
        assert_eq!(resolve_category(Some("land use (pt)"), &sheet).unwrap(), "Land use (Pt)");
        assert_eq!(resolve_category(Some("Climate change (kg CO2-eq)"), &sheet).unwrap(), "Climate change (kg CO2 eq)");
        assert!(resolve_category(Some("Ozone"), &sheet).is_err());
        assert!(resolve_category(None, &[]).is_err());
    }

    #[test]
    fn test_unit_stripping() {
        assert_eq!(strip_unit("Water Use (m³ world eq.)"), "Water Use");
        assert_eq!(strip_unit("Particulate matter"), "Particulate matter");
        assert_eq!(strip_parenthetical("Climate change (kg CO2 eq)"), "Climate change");
        assert_eq!(strip_parenthetical("Ionising radiation (kBq U-235 eq) (HH)"), "Ionising radiation");
        assert_eq!(strip_parenthetical("Land use"), "Land use");
    }
}
