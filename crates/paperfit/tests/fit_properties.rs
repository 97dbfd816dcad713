//! Property tests for greedy context fitting.

use chrono::{DateTime, TimeZone, Utc};
use paperfit::prelude::*;
use proptest::prelude::*;

fn candidates_strategy() -> impl Strategy<Value = Vec<Candidate>> {
    prop::collection::vec((".{0,80}", 0i64..2_000_000_000), 0..12).prop_map(|items| {
        items
            .into_iter()
            .enumerate()
            .map(|(i, (text, secs))| {
                let ts: DateTime<Utc> = Utc.timestamp_opt(secs, 0).unwrap();
                Candidate::new(format!("c{i}"), text, ts)
            })
            .collect()
    })
}

fn sort_strategy() -> impl Strategy<Value = SortStrategy> {
    (0usize..SortStrategy::ALL.len()).prop_map(|i| SortStrategy::ALL[i])
}

proptest! {
    #[test]
    fn total_matches_sum_of_included(
        candidates in candidates_strategy(),
        prompt in ".{0,40}",
        ceiling in -100i64..400,
        reserve in 0i64..100,
        strategy in sort_strategy(),
    ) {
        let result = fit(&candidates, &prompt, ceiling, reserve, strategy);
        let sum: i64 = result.included.iter().map(|c| estimate_tokens(&c.text)).sum();
        prop_assert_eq!(result.total_tokens_included, sum);
    }

    #[test]
    fn never_exceeds_available(
        candidates in candidates_strategy(),
        prompt in ".{0,40}",
        ceiling in -100i64..400,
        reserve in 0i64..100,
        strategy in sort_strategy(),
    ) {
        let result = fit(&candidates, &prompt, ceiling, reserve, strategy);
        prop_assert_eq!(
            result.max_available_tokens,
            ceiling - result.prompt_tokens - reserve
        );
        if result.max_available_tokens < 0 {
            prop_assert!(result.included.is_empty());
        } else {
            prop_assert!(result.total_tokens_included <= result.max_available_tokens);
            prop_assert!(result.prompt_tokens + result.total_tokens_included + reserve <= ceiling);
        }
    }

    #[test]
    fn every_candidate_lands_exactly_once(
        candidates in candidates_strategy(),
        ceiling in -100i64..400,
        strategy in sort_strategy(),
    ) {
        let result = fit(&candidates, "", ceiling, 0, strategy);
        prop_assert_eq!(result.included.len() + result.excluded.len(), candidates.len());

        let mut seen: Vec<&str> = result
            .included
            .iter()
            .chain(&result.excluded)
            .map(|c| c.id.as_str())
            .collect();
        seen.sort_unstable();
        let mut expected: Vec<&str> = candidates.iter().map(|c| c.id.as_str()).collect();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }

    #[test]
    fn excluded_did_not_fit_when_evaluated(
        candidates in candidates_strategy(),
        ceiling in 0i64..200,
        strategy in sort_strategy(),
    ) {
        // Every excluded candidate is individually larger than what was left
        // at the end, since the running total only grows.
        let result = fit(&candidates, "", ceiling, 0, strategy);
        for c in &result.excluded {
            prop_assert!(
                estimate_tokens(&c.text) > result.max_available_tokens - result.total_tokens_included
            );
        }
    }

    #[test]
    fn date_order_is_most_recent_first(
        candidates in candidates_strategy(),
        ceiling in 0i64..400,
    ) {
        let result = fit(&candidates, "", ceiling, 0, SortStrategy::Date);
        for pair in result.included.windows(2) {
            prop_assert!(pair[0].timestamp >= pair[1].timestamp);
        }
    }

    #[test]
    fn size_order_is_smallest_first(
        candidates in candidates_strategy(),
        ceiling in 0i64..400,
    ) {
        let result = fit(&candidates, "", ceiling, 0, SortStrategy::Size);
        for pair in result.included.windows(2) {
            prop_assert!(pair[0].sort_size() <= pair[1].sort_size());
        }
    }

    #[test]
    fn fitting_is_idempotent(
        candidates in candidates_strategy(),
        prompt in ".{0,40}",
        ceiling in -100i64..400,
        strategy in sort_strategy(),
    ) {
        let first = fit(&candidates, &prompt, ceiling, 10, strategy);
        let second = fit(&candidates, &prompt, ceiling, 10, strategy);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn capacity_counts_match(
        candidates in candidates_strategy(),
        ceiling in -100i64..400,
        strategy in sort_strategy(),
    ) {
        let result = fit(&candidates, "", ceiling, 0, strategy);
        let cap = result.capacity();
        prop_assert_eq!(cap.can_fit, result.included.len());
        prop_assert_eq!(cap.total, candidates.len());
        prop_assert!(cap.percentage <= 100);
    }
}

fn dated(id: &str, y: i32, m: u32, d: u32) -> Candidate {
    Candidate::new(id, "x".repeat(40), Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap())
}

#[test]
fn one_slot_budget_takes_latest_summary() {
    let candidates = vec![
        dated("a", 2024, 1, 1),
        dated("b", 2024, 6, 1),
        dated("c", 2023, 1, 1),
    ];
    let config = FitConfig::default()
        .with_context_window(10)
        .with_output_reserve(0)
        .with_sort(SortStrategy::Date);
    let result = config
        .build_fitter()
        .fit(&candidates, "", &config.build_budget());
    assert_eq!(result.included_ids(), vec!["b"]);
    assert_eq!(result.capacity().percentage, 33);
}

#[test]
fn json_candidates_through_to_assembled_prompt() {
    let json = r#"[
        {"id": "smith", "text": "Smith argues X.", "timestamp": "2023-03-01T00:00:00Z"},
        {"id": "lee", "text": "Lee refutes X.", "timestamp": "2024-03-01T00:00:00Z"}
    ]"#;
    let candidates = parse_candidates(json).unwrap();
    let result = fit(&candidates, "Compare:", 4_100, 4_000, SortStrategy::Alphabetical);
    assert_eq!(result.included_ids(), vec!["lee", "smith"]);

    let prompt = augment_prompt("Compare:", &result);
    assert!(prompt.contains("[1] lee (2024-03-01)\nLee refutes X."));
    assert!(prompt.contains("[2] smith (2023-03-01)\nSmith argues X."));
}

#[test]
fn fit_result_serializes_for_callers() {
    let candidates = vec![dated("a", 2024, 1, 1)];
    let result = fit(&candidates, "", 100, 0, SortStrategy::Date);
    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["total_tokens_included"], 10);
    assert_eq!(value["max_available_tokens"], 100);
    assert_eq!(value["included"][0]["id"], "a");
    let back: FitResult = serde_json::from_value(value).unwrap();
    assert_eq!(back, result);
}
