use crate::model::{Classification, VersionRecord};

/// Outcome of classifying one logical-document group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupVerdict {
    pub classification: Classification,
    /// Index into the group's members of the snapshot to display.
    pub representative: usize,
}

/// Classify a group of snapshots sharing one logical id.
///
/// `members` is in encounter order (published slot first). The engine builds groups of
/// one or two snapshots; larger groups fall under the same rule as pairs.
pub fn classify_group(members: &[&VersionRecord]) -> GroupVerdict {
    match members {
        [only] => classify_single(only),
        _ => classify_versions(members),
    }
}

fn classify_single(only: &VersionRecord) -> GroupVerdict {
    let classification = if only.published_at.is_none() {
        Classification::Draft
    } else {
        Classification::Published
    };
    GroupVerdict {
        classification,
        representative: 0,
    }
}

/// Published snapshot plus a draft snapshot: Modified when the latest edit is
/// newer than the latest publish.
fn classify_versions(members: &[&VersionRecord]) -> GroupVerdict {
    let latest_published = members.iter().filter_map(|m| m.published_at).max();
    let latest_updated = members.iter().filter_map(|m| m.updated_at).max();

    let classification = match (latest_updated, latest_published) {
        (Some(updated), Some(published)) if updated > published => Classification::Modified,
        _ => Classification::Published,
    };

    // Representative: first snapshot carrying the group-wide latest timestamp.
    let latest = latest_published.max(latest_updated);
    let representative = members
        .iter()
        .position(|r| latest.is_some() && (r.published_at == latest || r.updated_at == latest))
        .unwrap_or(0);

    GroupVerdict {
        classification,
        representative,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Source;
    use crate::normalize::parse_timestamp;

    fn rec(source: Source, published: Option<&str>, updated: Option<&str>) -> VersionRecord {
        VersionRecord {
            id: None,
            logical_id: "x".into(),
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            excerpt: String::new(),
            published_at: published.and_then(parse_timestamp),
            updated_at: updated.and_then(parse_timestamp),
            source,
        }
    }

    #[test]
    fn single_unpublished_is_draft() {
        let d = rec(Source::Draft, None, Some("2024-01-01"));
        let v = classify_group(&[&d]);
        assert_eq!(v.classification, Classification::Draft);
        assert_eq!(v.representative, 0);
    }

    #[test]
    fn single_published_is_published() {
        let p = rec(Source::Published, Some("2024-01-01"), Some("2024-01-01"));
        assert_eq!(classify_group(&[&p]).classification, Classification::Published);
    }

    #[test]
    fn later_draft_edit_is_modified() {
        let p = rec(Source::Published, Some("2024-01-01"), Some("2024-01-01"));
        let d = rec(Source::Draft, None, Some("2024-02-01"));
        let v = classify_group(&[&p, &d]);
        assert_eq!(v.classification, Classification::Modified);
        assert_eq!(v.representative, 1);
    }

    #[test]
    fn edit_not_after_publish_stays_published() {
        let p = rec(Source::Published, Some("2024-03-01"), Some("2024-03-01"));
        let d = rec(Source::Draft, None, Some("2024-02-01"));
        let v = classify_group(&[&p, &d]);
        assert_eq!(v.classification, Classification::Published);
        assert_eq!(v.representative, 0);
    }

    #[test]
    fn equal_timestamps_keep_first() {
        let p = rec(Source::Published, Some("2024-03-01"), Some("2024-03-01"));
        let d = rec(Source::Draft, None, Some("2024-03-01"));
        let v = classify_group(&[&p, &d]);
        assert_eq!(v.classification, Classification::Published);
        assert_eq!(v.representative, 0);
    }

    #[test]
    fn pair_without_timestamps_is_published_first_kept() {
        let p = rec(Source::Published, None, None);
        let d = rec(Source::Draft, None, None);
        let v = classify_group(&[&p, &d]);
        assert_eq!(v.classification, Classification::Published);
        assert_eq!(v.representative, 0);
    }

    #[test]
    fn missing_updated_never_modified() {
        let p = rec(Source::Published, Some("2024-03-01"), None);
        let d = rec(Source::Draft, None, None);
        assert_eq!(classify_group(&[&p, &d]).classification, Classification::Published);
    }
}
