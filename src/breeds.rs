//! Breed labels and matching of free-text breed strings against them.

use serde::Serialize;

/// Dashboard breed labels, in display order.
pub const CANONICAL_BREEDS: [&str; 6] = [
    "Broiler",
    "Natu Kodi (Country Chicken)",
    "Juttu Kodi (Crested)",
    "Kadaknath",
    "Layer",
    "Parent Stock",
];

/// Breed assumed when a batch carries none.
pub const DEFAULT_BREED: &str = "Broiler";

/// Breeds a vendor tallies in a field report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ReportBreed {
    pub id: &'static str,
    pub name: &'static str,
    pub hint: &'static str,
}

pub static REPORT_BREEDS: [ReportBreed; 6] = [
    ReportBreed { id: "leghorn", name: "Leghorn", hint: "White eggs" },
    ReportBreed { id: "rhode", name: "Rhode Island", hint: "Hardy" },
    ReportBreed { id: "sussex", name: "Sussex", hint: "Friendly" },
    ReportBreed { id: "plymouth", name: "Plymouth Rock", hint: "Cold Hardy" },
    ReportBreed { id: "wyandotte", name: "Wyandotte", hint: "Attractive plumage" },
    ReportBreed { id: "amberlink", name: "Amberlink", hint: "Commercial layer" },
];

pub fn report_breed(id: &str) -> Option<&'static ReportBreed> {
    REPORT_BREEDS.iter().find(|b| b.id == id)
}

/// Lowercased terms that identify a label: the label itself, the name before any
/// parenthesis, and the parenthesised alias.
fn match_terms(label: &str) -> Vec<String> {
    let lower = label.to_lowercase();
    let mut terms = vec![lower.clone()];

    if let Some((name, rest)) = lower.split_once('(') {
        let name = name.trim();
        let alias = rest.trim_end_matches(')').trim();
        if !name.is_empty() {
            terms.push(name.to_string());
        }
        if !alias.is_empty() {
            terms.push(alias.to_string());
        }
    }

    terms
}

/// Finds the canonical label for a free-text breed, case-insensitively.
///
/// A label matches when it contains the input, or when the input contains one of
/// the label's terms. Labels are tried in display order; blank input never matches.
pub fn match_breed(raw: &str) -> Option<&'static str> {
    let needle = raw.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }

    CANONICAL_BREEDS.iter().copied().find(|label| {
        label.to_lowercase().contains(&needle)
            || match_terms(label).iter().any(|term| needle.contains(term.as_str()))
    })
}

/// Bucket a batch's breed is counted under: the canonical label when one matches,
/// otherwise the trimmed raw string. Missing or blank breeds count as [`DEFAULT_BREED`].
pub fn bucket_for(raw: Option<&str>) -> String {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty()).unwrap_or(DEFAULT_BREED);
    match match_breed(raw) {
        Some(label) => label.to_string(),
        None => raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("country chicken mix", Some("Natu Kodi (Country Chicken)"))]
    #[case("Country Chicken", Some("Natu Kodi (Country Chicken)"))]
    #[case("natu kodi", Some("Natu Kodi (Country Chicken)"))]
    #[case("broiler", Some("Broiler"))]
    #[case("BROILER premium", Some("Broiler"))]
    #[case("crested", Some("Juttu Kodi (Crested)"))]
    #[case("kadak", Some("Kadaknath"))]
    #[case("Parent Stock", Some("Parent Stock"))]
    #[case("Leghorn", None)]
    #[case("   ", None)]
    fn matches_canonical_labels(#[case] raw: &str, #[case] expected: Option<&str>) {
        assert_eq!(match_breed(raw), expected);
    }

    #[test]
    fn short_fragments_take_the_first_label_in_order() {
        // "la" is inside "Layer" only; "er" is inside "Broiler" first
        assert_eq!(match_breed("la"), Some("Layer"));
        assert_eq!(match_breed("er"), Some("Broiler"));
    }

    #[test]
    fn buckets_default_and_dynamic() {
        assert_eq!(bucket_for(None), "Broiler");
        assert_eq!(bucket_for(Some("  ")), "Broiler");
        assert_eq!(bucket_for(Some("Aseel")), "Aseel");
        assert_eq!(bucket_for(Some("kadaknath")), "Kadaknath");
    }

    #[test]
    fn report_breeds_lookup() {
        assert_eq!(report_breed("rhode").map(|b| b.name), Some("Rhode Island"));
        assert!(report_breed("broiler").is_none());
    }
}
