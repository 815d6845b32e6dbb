// Property-based tests for published/draft reconciliation.
// CI: 256 cases (default). Soak: PROPTEST_CASES=10000 cargo test --release

use std::collections::HashSet;

use chrono::{DateTime, Duration, TimeZone, Utc};
use proptest::prelude::*;
use blogdesk_recon::model::{Classification, Source, VersionRecord};
use blogdesk_recon::reconcile;

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

fn config_256() -> ProptestConfig {
    ProptestConfig {
        cases: std::env::var("PROPTEST_CASES")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(256),
        failure_persistence: None,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Generators
// ---------------------------------------------------------------------------

fn day(offset: i64) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap() + Duration::days(offset)
}

/// Arbitrary timestamp: usually present, sometimes missing.
fn arb_timestamp() -> impl Strategy<Value = Option<DateTime<Utc>>> {
    prop_oneof![
        3 => (0i64..60).prop_map(|d| Some(day(d))),
        1 => Just(None),
    ]
}

/// Small id space so published and draft sets overlap often.
fn arb_logical_id() -> impl Strategy<Value = String> {
    r"[a-f]"
}

fn record(
    logical_id: String,
    source: Source,
    published_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
) -> VersionRecord {
    VersionRecord {
        id: None,
        title: format!("{logical_id} title"),
        slug: logical_id.clone(),
        logical_id,
        content: String::new(),
        excerpt: String::new(),
        published_at,
        updated_at,
        source,
    }
}

fn arb_published_set() -> impl Strategy<Value = Vec<VersionRecord>> {
    prop::collection::vec(
        (arb_logical_id(), arb_timestamp(), arb_timestamp())
            .prop_map(|(id, p, u)| record(id, Source::Published, p, u)),
        0..8,
    )
}

fn arb_draft_set() -> impl Strategy<Value = Vec<VersionRecord>> {
    prop::collection::vec(
        (arb_logical_id(), arb_timestamp())
            .prop_map(|(id, u)| record(id, Source::Draft, None, u)),
        0..8,
    )
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(config_256())]

    #[test]
    fn cardinality_matches_distinct_ids(p in arb_published_set(), d in arb_draft_set()) {
        let docs = reconcile(&p, &d);
        let distinct: HashSet<&str> = p.iter().chain(&d).map(|r| r.logical_id.as_str()).collect();
        prop_assert_eq!(docs.len(), distinct.len());

        let unique: HashSet<&str> = docs.iter().map(|d| d.logical_id.as_str()).collect();
        prop_assert_eq!(unique.len(), docs.len());
    }

    #[test]
    fn reconcile_is_idempotent(p in arb_published_set(), d in arb_draft_set()) {
        prop_assert_eq!(reconcile(&p, &d), reconcile(&p, &d));
    }

    #[test]
    fn sorted_by_published_desc_nulls_last(p in arb_published_set(), d in arb_draft_set()) {
        let docs = reconcile(&p, &d);
        let keys: Vec<Option<DateTime<Utc>>> =
            docs.iter().map(|d| d.representative.published_at).collect();

        let first_null = keys.iter().position(|k| k.is_none()).unwrap_or(keys.len());
        prop_assert!(keys[first_null..].iter().all(|k| k.is_none()));
        for pair in keys[..first_null].windows(2) {
            prop_assert!(pair[0] >= pair[1]);
        }
    }

    #[test]
    fn classification_invariants(p in arb_published_set(), d in arb_draft_set()) {
        for doc in reconcile(&p, &d) {
            prop_assert!(doc.source_count == 1 || doc.source_count == 2);
            match doc.classification {
                Classification::Draft => {
                    prop_assert!(doc.representative.published_at.is_none());
                    prop_assert_eq!(doc.source_count, 1);
                }
                Classification::Modified => {
                    prop_assert_eq!(doc.source_count, 2);
                    prop_assert!(doc.latest_published_at.is_some());
                }
                Classification::Published if doc.source_count == 1 => {
                    prop_assert!(doc.representative.published_at.is_some());
                }
                Classification::Published => {
                    // Duplicates within a set resolve last-wins by default.
                    let last = |set: &[VersionRecord]| {
                        set.iter().rev().find(|r| r.logical_id == doc.logical_id).cloned()
                    };
                    let (published, draft) = match (last(&p), last(&d)) {
                        (Some(published), Some(draft)) => (published, draft),
                        _ => return Err(TestCaseError::fail("pair without both snapshots")),
                    };
                    let latest_updated = published.updated_at.max(draft.updated_at);
                    if let (Some(lp), Some(lu)) = (doc.latest_published_at, latest_updated) {
                        prop_assert!(lu <= lp);
                    }
                    if doc.latest_published_at.is_none() {
                        prop_assert_eq!(doc.representative.updated_at, latest_updated);
                    }
                }
            }
        }
    }

    #[test]
    fn later_draft_edit_is_modified(
        id in arb_logical_id(),
        published in 0i64..30,
        gap in 1i64..30,
    ) {
        let p = vec![record(
            id.clone(),
            Source::Published,
            Some(day(published)),
            Some(day(published)),
        )];
        let d = vec![record(id, Source::Draft, None, Some(day(published + gap)))];
        let docs = reconcile(&p, &d);
        prop_assert_eq!(docs.len(), 1);
        prop_assert_eq!(docs[0].classification, Classification::Modified);
        prop_assert_eq!(docs[0].representative.updated_at, Some(day(published + gap)));
    }

    #[test]
    fn edits_before_publish_stay_published(
        id in arb_logical_id(),
        published in 30i64..60,
        back_p in 0i64..30,
        back_d in 0i64..30,
    ) {
        let p = vec![record(
            id.clone(),
            Source::Published,
            Some(day(published)),
            Some(day(published - back_p)),
        )];
        let d = vec![record(id, Source::Draft, None, Some(day(published - back_d)))];
        let docs = reconcile(&p, &d);
        prop_assert_eq!(docs.len(), 1);
        prop_assert_eq!(docs[0].classification, Classification::Published);
        prop_assert_eq!(docs[0].representative.source, Source::Published);
    }

    #[test]
    fn unpublished_pair_is_published_with_latest_update(
        id in arb_logical_id(),
        p_updated in 0i64..30,
        d_updated in 0i64..30,
    ) {
        let p = vec![record(id.clone(), Source::Published, None, Some(day(p_updated)))];
        let d = vec![record(id, Source::Draft, None, Some(day(d_updated)))];
        let docs = reconcile(&p, &d);
        prop_assert_eq!(docs.len(), 1);
        prop_assert_eq!(docs[0].classification, Classification::Published);
        prop_assert_eq!(docs[0].source_count, 2);
        prop_assert_eq!(docs[0].latest_published_at, None);
        prop_assert_eq!(docs[0].representative.updated_at, Some(day(p_updated.max(d_updated))));
    }

    #[test]
    fn lone_unpublished_is_draft(id in arb_logical_id(), updated in arb_timestamp()) {
        let d = vec![record(id, Source::Draft, None, updated)];
        let docs = reconcile(&[], &d);
        prop_assert_eq!(docs[0].classification, Classification::Draft);
    }
}
