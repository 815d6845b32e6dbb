use crate::config::DashboardConfig;
use crate::model::{
    Classification, Dashboard, DashboardStats, PostRef, ReconciledDocument, SessionContext,
};

/// Fold reconciled documents and the author's own post list into dashboard counters.
///
/// `drafts` and `modified` come from the reconciled set. `published` and the recent list
/// come from the author profile, which is the ownership signal for the signed-in author.
/// `total` is the platform-wide count and is passed through untouched.
pub fn aggregate(
    documents: &[ReconciledDocument],
    session: &SessionContext,
    platform_total: u64,
    config: &DashboardConfig,
) -> Dashboard {
    let mut drafts = 0;
    let mut modified = 0;

    for doc in documents {
        match doc.classification {
            Classification::Draft => drafts += 1,
            Classification::Modified => modified += 1,
            Classification::Published => {}
        }
    }

    let owned = session.owned_posts();
    let published = owned.iter().filter(|p| p.published_at.is_some()).count();

    Dashboard {
        stats: DashboardStats {
            total: platform_total,
            published,
            drafts,
            modified,
            authors: usize::from(session.author.is_some()),
        },
        recent: recent_published(owned, config.recent_limit),
    }
}

/// Published posts, newest first by ISO-8601 text, at most `limit`.
pub fn recent_published(posts: &[PostRef], limit: usize) -> Vec<PostRef> {
    let mut recent: Vec<PostRef> = posts
        .iter()
        .filter(|p| p.published_at.is_some())
        .cloned()
        .collect();
    recent.sort_by(|a, b| b.published_at.cmp(&a.published_at));
    recent.truncate(limit);
    recent
}
