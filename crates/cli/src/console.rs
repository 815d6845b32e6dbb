//! `blogdesk rows` / `blogdesk dashboard` / `blogdesk validate`.

use std::io::{self, Write};
use std::path::{Path, PathBuf};

use blogdesk_recon::model::ConsoleReport;
use blogdesk_recon::present::RowAction;
use blogdesk_recon::ConsoleConfig;
use serde_json::json;

use crate::exit_codes::{EXIT_CONFIG_INVALID, EXIT_CONFIG_READ, EXIT_ERROR};
use crate::sources::{load_console_input, SourcePaths};
use crate::CliError;

fn console_err(code: u8, msg: impl Into<String>) -> CliError {
    CliError { code, message: msg.into(), hint: None }
}

/// Load the config file if one was given; defaults otherwise. Returns the config and
/// the source paths declared in it.
pub fn load_config(path: Option<&Path>) -> Result<(ConsoleConfig, SourcePaths), CliError> {
    let Some(path) = path else {
        return Ok((ConsoleConfig::default(), SourcePaths::default()));
    };

    let config_str = std::fs::read_to_string(path).map_err(|e| {
        console_err(EXIT_CONFIG_READ, format!("cannot read config {}: {e}", path.display()))
    })?;
    let config = ConsoleConfig::from_toml(&config_str)
        .map_err(|e| console_err(EXIT_CONFIG_INVALID, e.to_string()))?;

    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let paths = SourcePaths::from_config(&config.sources, base_dir);
    Ok((config, paths))
}

fn build_report(
    config_path: Option<PathBuf>,
    flags: SourcePaths,
    strict: bool,
) -> Result<ConsoleReport, CliError> {
    let (config, config_paths) = load_config(config_path.as_deref())?;
    let paths = config_paths.overridden_by(flags);
    let input = load_console_input(&paths, strict)?;
    Ok(blogdesk_recon::run(&config, &input))
}

fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let json_str = serde_json::to_string_pretty(value)
        .map_err(|e| console_err(EXIT_ERROR, format!("JSON serialization error: {e}")))?;
    println!("{json_str}");
    Ok(())
}

fn action_list(actions: &[RowAction]) -> String {
    actions
        .iter()
        .map(|a| match a {
            RowAction::Edit => "edit",
            RowAction::Delete => "delete",
        })
        .collect::<Vec<_>>()
        .join(",")
}

fn report_degraded(report: &ConsoleReport) {
    for source in &report.meta.degraded_sources {
        eprintln!("note: {source} set unavailable; statuses may be incomplete");
    }
}

// ============================================================================
// rows
// ============================================================================

pub fn cmd_rows(
    config: Option<PathBuf>,
    flags: SourcePaths,
    json_output: bool,
    strict: bool,
) -> Result<(), CliError> {
    let report = build_report(config, flags, strict)?;

    if json_output {
        return print_json(&json!({ "meta": report.meta, "rows": report.rows }));
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: io::Error| console_err(EXIT_ERROR, e.to_string());

    writeln!(out, "{:<10} {:<32} {:<24} {:<10} ACTIONS", "STATUS", "TITLE", "SLUG", "MODE")
        .map_err(write_err)?;
    for row in &report.rows {
        writeln!(
            out,
            "{:<10} {:<32} {:<24} {:<10} {}",
            row.status.label,
            truncate(&row.title, 32),
            truncate(&row.slug, 24),
            row.edit_target.access_mode(),
            action_list(&row.actions),
        )
        .map_err(write_err)?;
    }

    report_degraded(&report);
    eprintln!("{} documents", report.meta.documents);
    Ok(())
}

fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else {
        let mut t: String = s.chars().take(width.saturating_sub(1)).collect();
        t.push('…');
        t
    }
}

// ============================================================================
// dashboard
// ============================================================================

pub fn cmd_dashboard(
    config: Option<PathBuf>,
    flags: SourcePaths,
    json_output: bool,
    strict: bool,
) -> Result<(), CliError> {
    let report = build_report(config, flags, strict)?;

    if json_output {
        return print_json(&json!({ "meta": report.meta, "dashboard": report.dashboard }));
    }

    let stats = &report.dashboard.stats;
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let write_err = |e: io::Error| console_err(EXIT_ERROR, e.to_string());

    writeln!(out, "total      {}", stats.total).map_err(write_err)?;
    writeln!(out, "published  {}", stats.published).map_err(write_err)?;
    writeln!(out, "drafts     {}", stats.drafts).map_err(write_err)?;
    writeln!(out, "modified   {}", stats.modified).map_err(write_err)?;
    writeln!(out, "authors    {}", stats.authors).map_err(write_err)?;

    if !report.dashboard.recent.is_empty() {
        writeln!(out, "\nrecently published:").map_err(write_err)?;
        for post in &report.dashboard.recent {
            writeln!(
                out,
                "  {}  {}",
                post.published_at.as_deref().unwrap_or(""),
                post.title
            )
            .map_err(write_err)?;
        }
    }

    report_degraded(&report);
    Ok(())
}

// ============================================================================
// validate
// ============================================================================

pub fn cmd_validate(config: PathBuf) -> Result<(), CliError> {
    let (cfg, paths) = load_config(Some(config.as_path()))?;
    eprintln!(
        "config ok: duplicates={}, recent_limit={}",
        cfg.reconcile.duplicates, cfg.dashboard.recent_limit
    );
    for (name, path) in [
        ("published", &paths.published),
        ("drafts", &paths.drafts),
        ("author", &paths.author),
        ("total", &paths.total),
    ] {
        if let Some(p) = path {
            if !p.exists() {
                eprintln!("warning: sources.{name} does not exist: {}", p.display());
            }
        }
    }
    Ok(())
}
