//! Loading exported CMS list responses into a `ConsoleInput`.
//!
//! The published and draft sets are read concurrently and joined before the engine
//! runs. A set that cannot be read is replaced by an empty one (degraded run) unless
//! `--strict` is set. A set that is readable but not a list response always fails.

use std::path::{Path, PathBuf};
use std::thread::ScopedJoinHandle;

use blogdesk_recon::config::SourcesConfig;
use blogdesk_recon::model::{ConsoleInput, SessionContext, Source, VersionRecord};
use blogdesk_recon::normalize::{normalize_authors, normalize_records};
use blogdesk_recon::source::{pagination_total, parse_response};
use blogdesk_recon::ReconError;
use serde_json::Value;

use crate::exit_codes::{EXIT_SOURCE_NOT_LIST, EXIT_SOURCE_UNAVAILABLE, EXIT_USAGE};
use crate::CliError;

/// Source locations after merging config `[sources]` with command-line flags.
#[derive(Debug, Default, Clone)]
pub struct SourcePaths {
    pub published: Option<PathBuf>,
    pub drafts: Option<PathBuf>,
    pub author: Option<PathBuf>,
    pub total: Option<PathBuf>,
    pub total_count: Option<u64>,
}

impl SourcePaths {
    /// Paths from `[sources]`, resolved relative to the config file's directory.
    pub fn from_config(sources: &SourcesConfig, base_dir: &Path) -> Self {
        let resolve = |p: &Option<String>| p.as_ref().map(|p| base_dir.join(p));
        Self {
            published: resolve(&sources.published),
            drafts: resolve(&sources.drafts),
            author: resolve(&sources.author),
            total: resolve(&sources.total),
            total_count: None,
        }
    }

    /// Command-line values win over config values.
    pub fn overridden_by(self, flags: SourcePaths) -> Self {
        Self {
            published: flags.published.or(self.published),
            drafts: flags.drafts.or(self.drafts),
            author: flags.author.or(self.author),
            total: flags.total.or(self.total),
            total_count: flags.total_count.or(self.total_count),
        }
    }
}

fn read_json(path: &Path) -> Result<Value, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    parse_response(&text).map_err(|e| format!("cannot parse {}: {e}", path.display()))
}

fn not_a_list(e: ReconError, path: &Path) -> CliError {
    CliError {
        code: EXIT_SOURCE_NOT_LIST,
        message: e.to_string(),
        hint: Some(format!(
            "{} should be a CMS list response ({{\"data\": [...]}})",
            path.display()
        )),
    }
}

/// Outcome of one source fetch.
enum Fetched {
    NotConfigured,
    Ready(PathBuf, Value),
    Failed(String),
}

fn fetch(path: Option<&Path>) -> Fetched {
    match path {
        None => Fetched::NotConfigured,
        Some(p) => match read_json(p) {
            Ok(v) => Fetched::Ready(p.to_path_buf(), v),
            Err(e) => Fetched::Failed(e),
        },
    }
}

fn fetch_pair(published: Option<&Path>, drafts: Option<&Path>) -> (Fetched, Fetched) {
    std::thread::scope(|s| {
        let p = s.spawn(|| fetch(published));
        let d = s.spawn(|| fetch(drafts));
        (joined(p), joined(d))
    })
}

fn joined(handle: ScopedJoinHandle<'_, Fetched>) -> Fetched {
    handle
        .join()
        .unwrap_or_else(|_| Fetched::Failed("source reader panicked".into()))
}

fn version_set(
    fetched: Fetched,
    source: Source,
    strict: bool,
    degraded: &mut Vec<Source>,
) -> Result<Vec<VersionRecord>, CliError> {
    match fetched {
        Fetched::NotConfigured => Ok(Vec::new()),
        Fetched::Ready(path, raw) => {
            normalize_records(&raw, source).map_err(|e| not_a_list(e, &path))
        }
        Fetched::Failed(msg) if strict => Err(CliError {
            code: EXIT_SOURCE_UNAVAILABLE,
            message: msg,
            hint: Some("drop --strict to continue with an empty set".into()),
        }),
        Fetched::Failed(msg) => {
            log::warn!("{msg}; continuing with an empty {source} set");
            degraded.push(source);
            Ok(Vec::new())
        }
    }
}

/// Read and normalize every configured source.
pub fn load_console_input(paths: &SourcePaths, strict: bool) -> Result<ConsoleInput, CliError> {
    if paths.published.is_none() && paths.drafts.is_none() {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "no published or draft source given".into(),
            hint: Some("pass --published/--drafts or set [sources] in the config".into()),
        });
    }

    let (published_raw, drafts_raw) =
        fetch_pair(paths.published.as_deref(), paths.drafts.as_deref());

    let mut degraded = Vec::new();
    let published = version_set(published_raw, Source::Published, strict, &mut degraded)?;
    let drafts = version_set(drafts_raw, Source::Draft, strict, &mut degraded)?;

    let session = match fetch(paths.author.as_deref()) {
        Fetched::NotConfigured => SessionContext::anonymous(),
        Fetched::Ready(path, raw) => {
            let mut authors = normalize_authors(&raw).map_err(|e| not_a_list(e, &path))?;
            if authors.len() > 1 {
                log::warn!("{} authors in {}; using the first", authors.len(), path.display());
            }
            if authors.is_empty() {
                SessionContext::anonymous()
            } else {
                SessionContext::for_author(authors.swap_remove(0))
            }
        }
        Fetched::Failed(msg) if strict => {
            return Err(CliError { code: EXIT_SOURCE_UNAVAILABLE, message: msg, hint: None })
        }
        Fetched::Failed(msg) => {
            log::warn!("{msg}; dashboard will have no author-scoped counters");
            SessionContext::anonymous()
        }
    };

    let platform_total = match paths.total_count {
        Some(n) => n,
        None => match fetch(paths.total.as_deref()) {
            Fetched::NotConfigured => 0,
            Fetched::Ready(_, raw) => pagination_total(&raw),
            Fetched::Failed(msg) if strict => {
                return Err(CliError { code: EXIT_SOURCE_UNAVAILABLE, message: msg, hint: None })
            }
            Fetched::Failed(msg) => {
                log::warn!("{msg}; platform total set to 0");
                0
            }
        },
    };

    Ok(ConsoleInput {
        published,
        drafts,
        session,
        platform_total,
        degraded_sources: degraded,
    })
}
