use std::cmp::Ordering;
use std::collections::HashMap;

use crate::aggregate::aggregate;
use crate::classify::classify_group;
use crate::config::{ConsoleConfig, DuplicatePolicy};
use crate::model::{
    ConsoleInput, ConsoleReport, ReconciledDocument, ReportMeta, Source, VersionRecord,
};
use crate::present::to_row;

/// Reconcile, aggregate and render one console refresh.
pub fn run(config: &ConsoleConfig, input: &ConsoleInput) -> ConsoleReport {
    for source in &input.degraded_sources {
        log::warn!("{source} set unavailable; classifications may be degraded");
    }

    let documents = reconcile_with(&input.published, &input.drafts, config.reconcile.duplicates);
    let dashboard = aggregate(&documents, &input.session, input.platform_total, &config.dashboard);
    let rows = documents.iter().map(to_row).collect();

    ConsoleReport {
        meta: ReportMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            documents: documents.len(),
            degraded_sources: input.degraded_sources.clone(),
        },
        dashboard,
        rows,
    }
}

/// Reconcile published and draft snapshots with the default duplicate policy.
pub fn reconcile(published: &[VersionRecord], drafts: &[VersionRecord]) -> Vec<ReconciledDocument> {
    reconcile_with(published, drafts, DuplicatePolicy::default())
}

/// One slot per source set; a group never holds more than one snapshot per source.
struct Group<'a> {
    logical_id: String,
    published: Option<&'a VersionRecord>,
    draft: Option<&'a VersionRecord>,
}

impl<'a> Group<'a> {
    fn slot(&mut self, source: Source) -> &mut Option<&'a VersionRecord> {
        match source {
            Source::Published => &mut self.published,
            Source::Draft => &mut self.draft,
        }
    }

    fn members(&self) -> Vec<&'a VersionRecord> {
        self.published.into_iter().chain(self.draft).collect()
    }
}

/// Group snapshots by logical id, classify each group, and sort by the
/// representative's `published_at` (newest first, unpublished last in encounter order).
pub fn reconcile_with(
    published: &[VersionRecord],
    drafts: &[VersionRecord],
    policy: DuplicatePolicy,
) -> Vec<ReconciledDocument> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    let tagged = published
        .iter()
        .map(|r| (Source::Published, r))
        .chain(drafts.iter().map(|r| (Source::Draft, r)));

    for (position, (source, record)) in tagged.enumerate() {
        let key = if record.logical_id.is_empty() {
            let synthesized = format!("~unkeyed:{source}:{position}");
            log::warn!(
                "{source} snapshot {:?} has no logical id; keeping it alone as {synthesized}",
                record.id
            );
            synthesized
        } else {
            record.logical_id.clone()
        };

        let gi = *index.entry(key.clone()).or_insert_with(|| {
            groups.push(Group {
                logical_id: key.clone(),
                published: None,
                draft: None,
            });
            groups.len() - 1
        });

        let slot = groups[gi].slot(source);
        match *slot {
            None => *slot = Some(record),
            Some(existing) => {
                let replace = match policy {
                    DuplicatePolicy::LastWins => true,
                    DuplicatePolicy::MostRecent => record.recency() > existing.recency(),
                };
                log::warn!(
                    "duplicate {source} snapshot for '{key}' ({policy}): {}",
                    if replace { "replacing earlier" } else { "keeping earlier" }
                );
                if replace {
                    *slot = Some(record);
                }
            }
        }
    }

    let mut documents: Vec<ReconciledDocument> = groups
        .into_iter()
        .map(|group| {
            let members = group.members();
            let verdict = classify_group(&members);
            ReconciledDocument {
                latest_published_at: members.iter().filter_map(|m| m.published_at).max(),
                representative: members[verdict.representative].clone(),
                classification: verdict.classification,
                source_count: members.len(),
                logical_id: group.logical_id,
            }
        })
        .collect();

    // Stable: unpublished representatives keep encounter order.
    documents.sort_by(|a, b| {
        match (a.representative.published_at, b.representative.published_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });

    log::debug!(
        "reconciled {} published + {} draft snapshots into {} documents",
        published.len(),
        drafts.len(),
        documents.len()
    );
    documents
}
