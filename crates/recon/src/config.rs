use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub reconcile: ReconcileConfig,
    #[serde(default)]
    pub dashboard: DashboardConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
}

// ---------------------------------------------------------------------------
// Reconcile
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReconcileConfig {
    #[serde(default)]
    pub duplicates: DuplicatePolicy,
}

/// What to do when one source set carries more than one snapshot for the same
/// logical id. Either way a group keeps at most one snapshot per source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DuplicatePolicy {
    /// Later snapshot in input order replaces the earlier one.
    #[default]
    LastWins,
    /// Snapshot with the greater `max(published_at, updated_at)` is kept; ties keep the earlier.
    MostRecent,
}

impl std::fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LastWins => write!(f, "last_wins"),
            Self::MostRecent => write!(f, "most_recent"),
        }
    }
}

// ---------------------------------------------------------------------------
// Dashboard + Sources
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DashboardConfig {
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
}

fn default_recent_limit() -> usize {
    5
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            recent_limit: default_recent_limit(),
        }
    }
}

/// Exported list responses for the CLI. Relative paths resolve against the config file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourcesConfig {
    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub drafts: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub total: Option<String>,
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl ConsoleConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: ConsoleConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if self.dashboard.recent_limit == 0 {
            return Err(ReconError::ConfigValidation(
                "dashboard.recent_limit must be at least 1".into(),
            ));
        }

        let paths = [
            ("published", &self.sources.published),
            ("drafts", &self.sources.drafts),
            ("author", &self.sources.author),
            ("total", &self.sources.total),
        ];
        for (name, path) in paths {
            if matches!(path, Some(p) if p.trim().is_empty()) {
                return Err(ReconError::ConfigValidation(format!(
                    "sources.{name} must not be empty"
                )));
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
