use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::present::RowView;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// Which CMS view a snapshot was fetched from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Published,
    Draft,
}

impl Source {
    /// Argument name used when a whole input set is rejected.
    pub fn argument_name(&self) -> &'static str {
        match self {
            Self::Published => "published_set",
            Self::Draft => "draft_set",
        }
    }
}

impl std::fmt::Display for Source {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Published => write!(f, "published"),
            Self::Draft => write!(f, "draft"),
        }
    }
}

/// One snapshot of a document, normalized from either the published or the draft view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VersionRecord {
    /// Provider snapshot id. Changes on republish.
    pub id: Option<u64>,
    /// Stable `documentId` shared by every snapshot of the same document.
    pub logical_id: String,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub source: Source,
}

impl VersionRecord {
    /// Latest of `published_at` / `updated_at`.
    pub fn recency(&self) -> Option<DateTime<Utc>> {
        self.published_at.max(self.updated_at)
    }
}

/// A post reference attached to an author profile. Timestamps stay as the
/// provider's ISO-8601 text; they are only ever ordered lexicographically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRef {
    pub id: Option<u64>,
    pub logical_id: String,
    pub title: String,
    pub slug: String,
    pub excerpt: String,
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorProfile {
    pub logical_id: String,
    pub name: String,
    pub blog_posts: Vec<PostRef>,
}

/// Identity of the signed-in author, passed explicitly to the dashboard fold.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionContext {
    pub author: Option<AuthorProfile>,
}

impl SessionContext {
    pub fn for_author(author: AuthorProfile) -> Self {
        Self { author: Some(author) }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn owned_posts(&self) -> &[PostRef] {
        self.author.as_ref().map(|a| a.blog_posts.as_slice()).unwrap_or(&[])
    }
}

/// Everything one console refresh needs, after both fetches have joined.
#[derive(Debug, Clone, Default)]
pub struct ConsoleInput {
    pub published: Vec<VersionRecord>,
    pub drafts: Vec<VersionRecord>,
    pub session: SessionContext,
    /// Platform-wide document count from pagination metadata.
    pub platform_total: u64,
    /// Sources whose fetch failed and were replaced by an empty set.
    pub degraded_sources: Vec<Source>,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Classification {
    Draft,
    Published,
    Modified,
}

impl std::fmt::Display for Classification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "Draft"),
            Self::Published => write!(f, "Published"),
            Self::Modified => write!(f, "Modified"),
        }
    }
}

/// Editorial actions that move a logical document between states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    CreateDraft,
    Publish,
    Edit,
    Delete,
}

impl Classification {
    /// Next state for `event` starting from `from` (`None` = no snapshot exists).
    /// Returns `None` when the transition is not allowed. The inner `None` means the
    /// document no longer exists.
    ///
    /// Modified has no delete edge: a published snapshot still exists and must not be
    /// orphaned. Unpublish is not modelled.
    pub fn next(from: Option<Self>, event: Lifecycle) -> Option<Option<Self>> {
        use Classification::*;
        match (from, event) {
            (None, Lifecycle::CreateDraft) => Some(Some(Draft)),
            (Some(Draft), Lifecycle::Publish) => Some(Some(Published)),
            (Some(Draft), Lifecycle::Delete) => Some(None),
            (Some(Published), Lifecycle::Edit) => Some(Some(Modified)),
            (Some(Modified), Lifecycle::Publish) => Some(Some(Published)),
            _ => None,
        }
    }

    pub fn can_transition(from: Option<Self>, to: Option<Self>) -> bool {
        [Lifecycle::CreateDraft, Lifecycle::Publish, Lifecycle::Edit, Lifecycle::Delete]
            .into_iter()
            .any(|event| Self::next(from, event) == Some(to))
    }
}

/// One logical document after reconciling its published and draft snapshots.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledDocument {
    pub logical_id: String,
    pub representative: VersionRecord,
    pub classification: Classification,
    /// Number of contributing snapshots (1 or 2).
    pub source_count: usize,
    /// Latest `published_at` across all contributing snapshots.
    pub latest_published_at: Option<DateTime<Utc>>,
}

// ---------------------------------------------------------------------------
// Dashboard + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardStats {
    pub total: u64,
    pub published: usize,
    pub drafts: usize,
    pub modified: usize,
    pub authors: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub recent: Vec<PostRef>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsoleReport {
    pub meta: ReportMeta,
    pub dashboard: Dashboard,
    pub rows: Vec<RowView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReportMeta {
    pub engine_version: String,
    pub run_at: String,
    pub documents: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded_sources: Vec<Source>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lifecycle_edges() {
        use Classification::*;
        assert_eq!(Classification::next(None, Lifecycle::CreateDraft), Some(Some(Draft)));
        assert_eq!(Classification::next(Some(Draft), Lifecycle::Publish), Some(Some(Published)));
        assert_eq!(Classification::next(Some(Published), Lifecycle::Edit), Some(Some(Modified)));
        assert_eq!(Classification::next(Some(Modified), Lifecycle::Publish), Some(Some(Published)));
        assert_eq!(Classification::next(Some(Draft), Lifecycle::Delete), Some(None));
    }

    #[test]
    fn forbidden_edges() {
        use Classification::*;
        assert_eq!(Classification::next(Some(Modified), Lifecycle::Delete), None);
        assert_eq!(Classification::next(Some(Published), Lifecycle::Delete), None);
        assert_eq!(Classification::next(None, Lifecycle::Publish), None);
        assert_eq!(Classification::next(Some(Draft), Lifecycle::Edit), None);
        assert_eq!(Classification::next(Some(Modified), Lifecycle::Edit), None);
        assert!(!Classification::can_transition(Some(Draft), Some(Draft)));
        assert!(!Classification::can_transition(Some(Modified), Some(Modified)));
        assert!(!Classification::can_transition(Some(Published), Some(Draft)));
        assert!(!Classification::can_transition(Some(Modified), None));
        assert!(Classification::can_transition(Some(Published), Some(Modified)));
        assert!(Classification::can_transition(Some(Draft), None));
    }

    #[test]
    fn recency_is_latest_timestamp() {
        let t1 = crate::normalize::parse_timestamp("2024-01-01");
        let t2 = crate::normalize::parse_timestamp("2024-02-01");
        let r = VersionRecord {
            id: None,
            logical_id: "x".into(),
            title: String::new(),
            slug: String::new(),
            content: String::new(),
            excerpt: String::new(),
            published_at: t1,
            updated_at: t2,
            source: Source::Published,
        };
        assert_eq!(r.recency(), t2);
    }

    #[test]
    fn session_owned_posts() {
        assert!(SessionContext::anonymous().owned_posts().is_empty());
    }
}
