use crate::lister::Entry;
use std::collections::HashSet;

fn name_matches(name: &str, query_lower: &str) -> bool {
    name.to_lowercase().contains(query_lower)
}

/// Keeps the entries whose name contains `query`, ignoring case. An empty
/// query keeps everything. Input order is preserved.
pub fn filter_entries(entries: &[Entry], query: &str) -> Vec<Entry> {
    if query.is_empty() {
        return entries.to_vec();
    }

    let q = query.to_lowercase();
    entries
        .iter()
        .filter(|e| name_matches(&e.name, &q))
        .cloned()
        .collect()
}

/// Char positions in `name` covered by the first case-insensitive match of
/// `query`. Empty when there is no match.
pub fn match_positions(name: &str, query: &str) -> HashSet<usize> {
    let mut out = HashSet::new();
    if query.is_empty() {
        return out;
    }

    let text_chars: Vec<char> = name.chars().collect();
    let q_chars: Vec<char> = query.chars().collect();
    if q_chars.len() > text_chars.len() {
        return out;
    }

    let chars_equal = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

    for start in 0..=text_chars.len() - q_chars.len() {
        if q_chars
            .iter()
            .enumerate()
            .all(|(offset, q)| chars_equal(text_chars[start + offset], *q))
        {
            out.extend(start..start + q_chars.len());
            return out;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn sample() -> Vec<Entry> {
        let dir = PathBuf::from("/tmp/docs");
        vec![
            Entry::new(&dir, "Reports", true),
            Entry::new(&dir, "annual-REPORT.pdf", false),
            Entry::new(&dir, "notes.txt", false),
            Entry::new(&dir, "report.txt", false),
        ]
    }

    #[test]
    fn empty_query_is_identity() {
        let entries = sample();
        assert_eq!(filter_entries(&entries, ""), entries);
    }

    #[test]
    fn substring_match_ignores_case_and_keeps_order() {
        let out = filter_entries(&sample(), "RePoRt");
        let names: Vec<&str> = out.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Reports", "annual-REPORT.pdf", "report.txt"]);
    }

    #[test]
    fn filtering_twice_with_same_query_is_idempotent() {
        let once = filter_entries(&sample(), "t.");
        let twice = filter_entries(&once, "t.");
        assert_eq!(once, twice);
    }

    #[test]
    fn no_match_yields_empty() {
        assert!(filter_entries(&sample(), "zzz").is_empty());
    }

    #[test]
    fn match_positions_cover_first_hit_only() {
        let positions = match_positions("report-report.txt", "REPORT");
        let mut sorted: Vec<usize> = positions.into_iter().collect();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![0, 1, 2, 3, 4, 5]);
    }

    #[test]
    fn match_positions_work_with_multibyte_names() {
        let name = "資料-テスト.txt";
        let positions = match_positions(name, "テスト");
        let highlighted: String = name
            .chars()
            .enumerate()
            .filter_map(|(idx, ch)| positions.contains(&idx).then_some(ch))
            .collect();
        assert_eq!(highlighted, "テスト");
    }

    #[test]
    fn match_positions_empty_for_missing_query() {
        assert!(match_positions("notes.txt", "zip").is_empty());
        assert!(match_positions("a", "abc").is_empty());
        assert!(match_positions("notes.txt", "").is_empty());
    }
}
