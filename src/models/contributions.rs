use crate::models::Snippet;
use chrono::Datelike;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Aggregate activity for one calendar month
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContributionStats {
    pub snippet_count: usize,
    /// Sum of raw newline counts, see [`Snippet::newline_count`]
    pub total_code_lines: usize,
    pub languages: BTreeSet<String>,
}

impl ContributionStats {
    fn record(&mut self, snippet: &Snippet) {
        self.snippet_count += 1;
        self.total_code_lines += snippet.newline_count();
        self.languages.insert(snippet.language.clone());
    }
}

/// Period key in `YYYY-MM` form
pub fn period_key(snippet: &Snippet) -> String {
    format!(
        "{}-{:02}",
        snippet.created_at.year(),
        snippet.created_at.month()
    )
}

/// Group snippets by creation month, keeping only those matching the
/// optional year and month filters.
pub fn aggregate<'a>(
    snippets: impl IntoIterator<Item = &'a Snippet>,
    year: Option<i32>,
    month: Option<u32>,
) -> BTreeMap<String, ContributionStats> {
    let mut periods: BTreeMap<String, ContributionStats> = BTreeMap::new();

    for snippet in snippets {
        let date = snippet.created_at;
        if year.is_some_and(|y| date.year() != y) || month.is_some_and(|m| date.month() != m) {
            continue;
        }
        periods
            .entry(period_key(snippet))
            .or_default()
            .record(snippet);
    }

    periods
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn snippet(title: &str, code: &str, language: &str, date: (i32, u32, u32)) -> Snippet {
        let mut s = Snippet::new(title.into(), code.into(), None, Some(language.into()));
        s.created_at = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();
        s
    }

    fn sample() -> Vec<Snippet> {
        vec![
            snippet("a", "a\nb\nc", "python", (2024, 1, 3)),
            snippet("b", "one line", "rust", (2024, 1, 20)),
            snippet("c", "x\ny", "python", (2024, 2, 1)),
            snippet("d", "\n\n\n", "go", (2023, 1, 9)),
        ]
    }

    #[test]
    fn groups_by_month() {
        let snippets = sample();
        let periods = aggregate(&snippets, None, None);

        let keys: Vec<&str> = periods.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["2023-01", "2024-01", "2024-02"]);

        let jan = &periods["2024-01"];
        assert_eq!(jan.snippet_count, 2);
        assert_eq!(jan.total_code_lines, 2);
        assert_eq!(
            jan.languages.iter().cloned().collect::<Vec<_>>(),
            vec!["python".to_string(), "rust".to_string()]
        );
    }

    #[test]
    fn filters_by_year_and_month() {
        let snippets = sample();

        let only_2024 = aggregate(&snippets, Some(2024), None);
        assert_eq!(only_2024.len(), 2);

        let all_januaries = aggregate(&snippets, None, Some(1));
        assert_eq!(
            all_januaries.keys().cloned().collect::<Vec<_>>(),
            vec!["2023-01".to_string(), "2024-01".to_string()]
        );
        assert_eq!(all_januaries["2023-01"].total_code_lines, 3);

        let exact = aggregate(&snippets, Some(2024), Some(2));
        assert_eq!(exact.len(), 1);
        assert_eq!(exact["2024-02"].snippet_count, 1);

        assert!(aggregate(&snippets, Some(1999), None).is_empty());
    }

    #[test]
    fn single_line_contributes_zero_lines() {
        let snippets = vec![snippet("a", "print(1)", "python", (2024, 5, 5))];
        assert_eq!(aggregate(&snippets, None, None)["2024-05"].total_code_lines, 0);
    }
}
