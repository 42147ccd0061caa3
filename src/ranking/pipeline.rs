//! The query pipeline: filter, score, sort, truncate, annotate rank.

use crate::error::ApiError;
use crate::models::{RankedEntry, UserRecord};
use crate::ranking::score::{round4, ScoreRegistry, ScoringContext};

const HOUR_MS: i64 = 3_600_000;
const DAY_MS: i64 = 86_400_000;

/// A recognized timeframe window. Unrecognized strings fall back to `All`
/// rather than erroring, matching how clients already call the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timeframe {
    Hours(i64),
    Days(i64),
    All,
}

impl Timeframe {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("1h") => Timeframe::Hours(1),
            Some("6h") => Timeframe::Hours(6),
            Some("12h") => Timeframe::Hours(12),
            Some("24h") | Some("today") => Timeframe::Hours(24),
            Some("7d") | Some("week") => Timeframe::Days(7),
            Some("30d") | Some("month") => Timeframe::Days(30),
            _ => Timeframe::All,
        }
    }

    /// Timestamp below which records are excluded, or None for no cutoff.
    pub fn cutoff_ms(&self, now_ms: i64) -> Option<i64> {
        match self {
            Timeframe::Hours(h) => Some(now_ms - h * HOUR_MS),
            Timeframe::Days(d) => Some(now_ms - d * DAY_MS),
            Timeframe::All => None,
        }
    }
}

/// Parameters for one ranking query, already normalized by the handler.
#[derive(Debug, Clone)]
pub struct RankQuery {
    pub algorithm: String,
    pub timeframe: Timeframe,
    pub min_points: Option<i64>,
    pub limit: usize,
}

/// A ranked result set plus the pre-truncation match count.
#[derive(Debug)]
pub struct Ranking {
    pub entries: Vec<RankedEntry>,
    pub total_analyzed: usize,
}

/// Rank a snapshot of records.
///
/// Filter order: inactive records, timeframe cutoff (which also drops
/// records missing `createdAt` when the algorithm needs it), then the
/// `minPoints` threshold. Scores are computed once against a single shared
/// `now`, sorted at full precision with a stable sort (equal scores keep
/// their snapshot order), truncated, and only then rounded for display.
pub fn rank(
    registry: &ScoreRegistry,
    records: Vec<UserRecord>,
    query: &RankQuery,
    now_ms: i64,
) -> Result<Ranking, ApiError> {
    let strategy = registry.resolve(&query.algorithm)?;
    let ctx = ScoringContext { now_ms };
    let cutoff = query.timeframe.cutoff_ms(now_ms);

    let mut scored: Vec<(f64, UserRecord)> = records
        .into_iter()
        .filter(|r| r.is_active)
        .filter(|r| match (r.created_at, cutoff) {
            (Some(created), Some(cutoff)) => created >= cutoff,
            (Some(_), None) => true,
            // Missing createdAt: a non-match when either the algorithm or
            // the timeframe needs it, never an error.
            (None, Some(_)) => false,
            (None, None) => !strategy.needs_created_at,
        })
        .filter(|r| match query.min_points {
            Some(min) => r.points >= min,
            None => true,
        })
        .map(|r| ((strategy.score)(&r, &ctx), r))
        .collect();

    // Stable sort: scores can legitimately collide (two zero-point brand-new
    // accounts), and ties must keep their original relative order.
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let total_analyzed = scored.len();
    scored.truncate(query.limit);

    let entries = scored
        .into_iter()
        .enumerate()
        .map(|(i, (score, r))| RankedEntry {
            rank: i + 1,
            id: r.id,
            username: r.username,
            points: r.points,
            submissions: r.submissions,
            score: round4(score),
            created_at: r.created_at,
            last_active: r.last_active,
        })
        .collect();

    Ok(Ranking {
        entries,
        total_analyzed,
    })
}

/// Lenient limit parsing: any non-positive or non-numeric value falls back
/// to the endpoint default. A malformed limit is never an error.
pub fn parse_limit(raw: Option<&str>, default: usize, max: usize) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&n| n > 0)
        .unwrap_or(default)
        .min(max)
}

/// Strict threshold parsing: present-but-malformed is a 400.
pub fn parse_min_points(raw: Option<&str>) -> Result<Option<i64>, ApiError> {
    match raw {
        None => Ok(None),
        Some(s) => s.trim().parse::<i64>().map(Some).map_err(|_| {
            ApiError::Validation(format!("minPoints must be an integer, got '{s}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000_000;

    fn record(id: &str, points: i64, submissions: i64, created_at: Option<i64>) -> UserRecord {
        UserRecord {
            id: id.to_string(),
            username: format!("user-{id}"),
            points,
            submissions,
            created_at,
            last_active: None,
            is_active: true,
            email: None,
            password: None,
        }
    }

    fn query(algorithm: &str) -> RankQuery {
        RankQuery {
            algorithm: algorithm.to_string(),
            timeframe: Timeframe::All,
            min_points: None,
            limit: 10,
        }
    }

    fn registry() -> ScoreRegistry {
        ScoreRegistry::with_defaults()
    }

    #[test]
    fn test_top_ranks_by_points() {
        // The worked example: alice 5 points (1h old), bob 50 points (2h old).
        let records = vec![
            record("1", 5, 1, Some(NOW - 3_600_000)),
            record("2", 50, 0, Some(NOW - 7_200_000)),
        ];
        let ranking = rank(&registry(), records, &query("top"), NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 2);
        assert_eq!(ranking.entries[0].rank, 1);
        assert_eq!(ranking.entries[0].id, "2");
        assert_eq!(ranking.entries[0].score, 50.0);
        assert_eq!(ranking.entries[1].rank, 2);
        assert_eq!(ranking.entries[1].id, "1");
        assert_eq!(ranking.entries[1].score, 5.0);
    }

    #[test]
    fn test_new_ranks_newest_first() {
        let records = vec![
            record("1", 5, 1, Some(NOW - 3_600_000)),
            record("2", 50, 0, Some(NOW - 7_200_000)),
        ];
        let ranking = rank(&registry(), records, &query("new"), NOW).unwrap();
        assert_eq!(ranking.entries[0].id, "1");
        assert_eq!(ranking.entries[1].id, "2");
    }

    #[test]
    fn test_inactive_records_never_ranked() {
        let mut hidden = record("3", 9_999, 100, Some(NOW));
        hidden.is_active = false;
        let records = vec![record("1", 5, 0, Some(NOW)), hidden];

        for algorithm in registry().available() {
            let ranking = rank(&registry(), records.clone(), &query(algorithm), NOW).unwrap();
            assert!(
                ranking.entries.iter().all(|e| e.id != "3"),
                "{algorithm} leaked an inactive record"
            );
        }
    }

    #[test]
    fn test_min_points_threshold() {
        let records = vec![
            record("1", 5, 1, Some(NOW - 3_600_000)),
            record("2", 50, 0, Some(NOW - 7_200_000)),
        ];
        let mut q = query("top");
        q.min_points = Some(10);
        let ranking = rank(&registry(), records, &q, NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 1);
        assert_eq!(ranking.entries.len(), 1);
        assert_eq!(ranking.entries[0].id, "2");
    }

    #[test]
    fn test_missing_created_at_filtered_unless_algorithm_allows() {
        let records = vec![record("1", 10, 3, None), record("2", 5, 1, Some(NOW))];

        // hackernews needs createdAt: record 1 is silently dropped.
        let ranking = rank(&registry(), records.clone(), &query("hackernews"), NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 1);
        assert_eq!(ranking.entries[0].id, "2");

        // top does not: both records rank.
        let ranking = rank(&registry(), records.clone(), &query("top"), NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 2);

        // But any timeframe cutoff drops it regardless of algorithm.
        let mut q = query("top");
        q.timeframe = Timeframe::Hours(24);
        let ranking = rank(&registry(), records, &q, NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 1);
    }

    #[test]
    fn test_timeframe_cutoff() {
        let records = vec![
            record("in", 1, 0, Some(NOW - 2 * 3_600_000)),
            record("out", 100, 0, Some(NOW - 30 * 3_600_000)),
        ];
        let mut q = query("top");
        q.timeframe = Timeframe::Hours(24);
        let ranking = rank(&registry(), records, &q, NOW).unwrap();
        assert_eq!(ranking.total_analyzed, 1);
        assert_eq!(ranking.entries[0].id, "in");
    }

    #[test]
    fn test_empty_input_is_success() {
        let ranking = rank(&registry(), Vec::new(), &query("hackernews"), NOW).unwrap();
        assert!(ranking.entries.is_empty());
        assert_eq!(ranking.total_analyzed, 0);
    }

    #[test]
    fn test_sorted_non_increasing_and_ranks_contiguous() {
        let records: Vec<UserRecord> = (0..25i64)
            .map(|i| record(&i.to_string(), (i * 7) % 13, i % 4, Some(NOW - i * HOUR_MS)))
            .collect();

        for algorithm in registry().available() {
            let mut q = query(algorithm);
            q.limit = 12;
            let ranking = rank(&registry(), records.clone(), &q, NOW).unwrap();
            assert!(ranking.entries.len() <= 12);
            assert!(ranking.total_analyzed >= ranking.entries.len());
            for (i, entry) in ranking.entries.iter().enumerate() {
                assert_eq!(entry.rank, i + 1);
            }
            for pair in ranking.entries.windows(2) {
                assert!(
                    pair[0].score >= pair[1].score,
                    "{algorithm} not sorted descending"
                );
            }
        }
    }

    #[test]
    fn test_ties_keep_snapshot_order() {
        // Two zero-point accounts created at the same instant score equally;
        // the stable sort must keep their input order.
        let records = vec![
            record("first", 0, 0, Some(NOW)),
            record("second", 0, 0, Some(NOW)),
        ];
        let ranking = rank(&registry(), records, &query("hackernews"), NOW).unwrap();
        assert_eq!(ranking.entries[0].id, "first");
        assert_eq!(ranking.entries[1].id, "second");
    }

    #[test]
    fn test_full_precision_sort_rounded_display() {
        // Scores differ only past the 4th decimal: ordering must still
        // reflect the full-precision values even though the displayed
        // scores are equal after rounding.
        let records = vec![
            record("lo", 10_000_000, 0, Some(NOW - 100_000 * 3_600_000)),
            record("hi", 10_000_001, 0, Some(NOW - 100_000 * 3_600_000)),
        ];
        let ranking = rank(&registry(), records, &query("simple"), NOW).unwrap();
        assert_eq!(ranking.entries[0].id, "hi");
        assert_eq!(ranking.entries[0].score, ranking.entries[1].score);
    }

    #[test]
    fn test_filtering_is_idempotent() {
        let records = vec![
            record("1", 5, 1, Some(NOW - 3_600_000)),
            record("2", 50, 0, Some(NOW - 7_200_000)),
            record("3", 20, 2, Some(NOW - 10 * 3_600_000)),
        ];
        let mut q = query("hackernews");
        q.timeframe = Timeframe::Hours(24);

        let first = rank(&registry(), records, &q, NOW).unwrap();
        // Re-rank the already-filtered survivors (re-hydrated as records).
        let survivors: Vec<UserRecord> = first
            .entries
            .iter()
            .map(|e| record(&e.id, e.points, e.submissions, e.created_at))
            .collect();
        let second = rank(&registry(), survivors, &q, NOW).unwrap();

        let first_ids: Vec<&str> = first.entries.iter().map(|e| e.id.as_str()).collect();
        let second_ids: Vec<&str> = second.entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn test_unknown_algorithm_is_error() {
        let err = rank(&registry(), Vec::new(), &query("bogus"), NOW).unwrap_err();
        assert!(matches!(err, ApiError::InvalidAlgorithm { .. }));
    }

    #[test]
    fn test_timeframe_parsing() {
        assert_eq!(Timeframe::parse(Some("1h")), Timeframe::Hours(1));
        assert_eq!(Timeframe::parse(Some("today")), Timeframe::Hours(24));
        assert_eq!(Timeframe::parse(Some("week")), Timeframe::Days(7));
        assert_eq!(Timeframe::parse(Some("30d")), Timeframe::Days(30));
        assert_eq!(Timeframe::parse(Some("all")), Timeframe::All);
        // Unrecognized values mean "no cutoff", not an error.
        assert_eq!(Timeframe::parse(Some("fortnight")), Timeframe::All);
        assert_eq!(Timeframe::parse(None), Timeframe::All);
    }

    #[test]
    fn test_parse_limit_lenient() {
        assert_eq!(parse_limit(Some("5"), 10, 100), 5);
        assert_eq!(parse_limit(Some("0"), 10, 100), 10);
        assert_eq!(parse_limit(Some("-3"), 10, 100), 10);
        assert_eq!(parse_limit(Some("abc"), 10, 100), 10);
        assert_eq!(parse_limit(None, 10, 100), 10);
        assert_eq!(parse_limit(Some("5000"), 10, 100), 100);
    }

    #[test]
    fn test_parse_min_points_strict() {
        assert_eq!(parse_min_points(None).unwrap(), None);
        assert_eq!(parse_min_points(Some("10")).unwrap(), Some(10));
        assert_eq!(parse_min_points(Some("-5")).unwrap(), Some(-5));
        assert!(parse_min_points(Some("lots")).is_err());
    }
}
