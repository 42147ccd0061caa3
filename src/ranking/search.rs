//! Username search: case-insensitive substring matching with relevance tiers.

use crate::error::ApiError;
use crate::models::{SearchEntry, UserRecord};

/// Fields a search can run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchField {
    Username,
    Id,
}

impl SearchField {
    pub fn parse(raw: Option<&str>) -> Result<Self, ApiError> {
        match raw.map(str::trim) {
            None | Some("") | Some("username") => Ok(SearchField::Username),
            Some("id") => Ok(SearchField::Id),
            Some(other) => Err(ApiError::Validation(format!(
                "unknown search field '{other}' (supported: username, id)"
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchField::Username => "username",
            SearchField::Id => "id",
        }
    }

    fn value<'a>(&self, record: &'a UserRecord) -> &'a str {
        match self {
            SearchField::Username => &record.username,
            SearchField::Id => &record.id,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub query: String,
    pub field: SearchField,
    pub limit: usize,
}

#[derive(Debug)]
pub struct SearchOutcome {
    pub results: Vec<SearchEntry>,
    pub total_matches: usize,
}

/// Relevance tier of a match; lower sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Tier {
    Exact,
    Prefix,
    Substring,
}

fn tier(value_lower: &str, query_lower: &str) -> Option<Tier> {
    if value_lower == query_lower {
        Some(Tier::Exact)
    } else if value_lower.starts_with(query_lower) {
        Some(Tier::Prefix)
    } else if value_lower.contains(query_lower) {
        Some(Tier::Substring)
    } else {
        None
    }
}

/// Search a snapshot of records.
///
/// Matching is case-insensitive substring containment; inactive records are
/// excluded. Ordering: exact matches, then prefix matches, then remaining
/// substring matches, each tier ordered by `lastActive` descending
/// (`createdAt`, then 0, as fallbacks). The secondary key inside the exact
/// and prefix tiers is our refinement; the substring tier's is contractual.
pub fn search(records: Vec<UserRecord>, query: &SearchQuery) -> Result<SearchOutcome, ApiError> {
    let needle = query.query.trim().to_lowercase();
    if needle.chars().count() < 2 {
        return Err(ApiError::Validation(
            "query must be at least 2 characters".to_string(),
        ));
    }

    let mut matches: Vec<(Tier, i64, UserRecord)> = records
        .into_iter()
        .filter(|r| r.is_active)
        .filter_map(|r| {
            let value = query.field.value(&r).to_lowercase();
            tier(&value, &needle).map(|t| (t, r.last_active_ms(), r))
        })
        .collect();

    matches.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

    let total_matches = matches.len();
    let results = matches
        .iter()
        .take(query.limit)
        .map(|(_, _, r)| SearchEntry::from(r))
        .collect();

    Ok(SearchOutcome {
        results,
        total_matches,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn record(id: &str, username: &str, last_active: Option<i64>) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: username.to_string(),
            points: 0,
            submissions: 0,
            created_at: Some(NOW - 86_400_000),
            last_active,
            is_active: true,
            email: None,
            password: None,
        }
    }

    fn query(q: &str) -> SearchQuery {
        SearchQuery {
            query: q.to_string(),
            field: SearchField::Username,
            limit: 20,
        }
    }

    #[test]
    fn test_substring_match_case_insensitive() {
        let records = vec![
            record("1", "alice", None),
            record("2", "bob", None),
            record("3", "CALIsta", None),
        ];
        let outcome = search(records, &query("al")).unwrap();
        assert_eq!(outcome.total_matches, 2);
        let names: Vec<&str> = outcome.results.iter().map(|r| r.username.as_str()).collect();
        assert!(names.contains(&"alice"));
        assert!(names.contains(&"CALIsta"));
    }

    #[test]
    fn test_exact_beats_prefix_beats_substring() {
        let records = vec![
            record("sub", "analice", Some(NOW)),
            record("prefix", "alice2", Some(NOW)),
            record("exact", "Alice", Some(0)),
        ];
        let outcome = search(records, &query("alice")).unwrap();
        assert_eq!(outcome.total_matches, 3);
        assert_eq!(outcome.results[0].id, "exact");
        assert_eq!(outcome.results[1].id, "prefix");
        assert_eq!(outcome.results[2].id, "sub");
    }

    #[test]
    fn test_substring_tier_orders_by_last_active_desc() {
        let records = vec![
            record("stale", "xxalicexx", Some(NOW - 10_000)),
            record("fresh", "yyaliceyy", Some(NOW)),
        ];
        let outcome = search(records, &query("alice")).unwrap();
        assert_eq!(outcome.results[0].id, "fresh");
        assert_eq!(outcome.results[1].id, "stale");
    }

    #[test]
    fn test_short_query_is_validation_error() {
        let err = search(Vec::new(), &query("a")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
        // Whitespace doesn't count toward the minimum.
        let err = search(Vec::new(), &query("  a  ")).unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[test]
    fn test_inactive_records_excluded() {
        let mut hidden = record("1", "alice", None);
        hidden.is_active = false;
        let outcome = search(vec![hidden], &query("alice")).unwrap();
        assert_eq!(outcome.total_matches, 0);
        assert!(outcome.results.is_empty());
    }

    #[test]
    fn test_limit_applied_after_counting() {
        let records: Vec<UserRecord> = (0..30i64)
            .map(|i| record(&i.to_string(), &format!("alice{i}"), Some(NOW - i)))
            .collect();
        let mut q = query("alice");
        q.limit = 5;
        let outcome = search(records, &q).unwrap();
        assert_eq!(outcome.results.len(), 5);
        assert_eq!(outcome.total_matches, 30);
    }

    #[test]
    fn test_search_by_id_field() {
        let records = vec![record("abc-123", "alice", None)];
        let q = SearchQuery {
            query: "abc".to_string(),
            field: SearchField::Id,
            limit: 20,
        };
        let outcome = search(records, &q).unwrap();
        assert_eq!(outcome.total_matches, 1);
    }

    #[test]
    fn test_field_parsing() {
        assert_eq!(SearchField::parse(None).unwrap(), SearchField::Username);
        assert_eq!(
            SearchField::parse(Some("username")).unwrap(),
            SearchField::Username
        );
        assert_eq!(SearchField::parse(Some("id")).unwrap(), SearchField::Id);
        assert!(SearchField::parse(Some("email")).is_err());
    }
}
