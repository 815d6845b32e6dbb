// Blogdesk CLI - headless published/draft reconciliation console

mod console;
mod exit_codes;
mod sources;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};

use exit_codes::EXIT_SUCCESS;
use sources::SourcePaths;

#[derive(Parser)]
#[command(name = "blogdesk")]
#[command(about = "Reconcile published and draft blog posts exported from the CMS")]
#[command(version)]
struct Cli {
    /// Log engine decisions (skipped records, duplicates) at debug level
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug, Default)]
struct SourceArgs {
    /// Console config (.toml); its [sources] paths resolve relative to it
    #[arg(long, short = 'c', env = "BLOGDESK_CONFIG")]
    config: Option<PathBuf>,

    /// Published-view list response (JSON)
    #[arg(long)]
    published: Option<PathBuf>,

    /// Draft-view list response (JSON)
    #[arg(long)]
    drafts: Option<PathBuf>,

    /// Output JSON to stdout instead of a human table
    #[arg(long)]
    json: bool,

    /// Fail when a source cannot be read instead of treating it as empty
    #[arg(long)]
    strict: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List one row per logical document with its status and permitted actions
    #[command(after_help = "\
Examples:
  blogdesk rows --published published.json --drafts drafts.json
  blogdesk rows -c console.toml --json")]
    Rows {
        #[command(flatten)]
        sources: SourceArgs,
    },

    /// Show dashboard counters and recently published posts
    #[command(after_help = "\
Examples:
  blogdesk dashboard -c console.toml
  blogdesk dashboard --published p.json --drafts d.json --author author.json --total-count 57 --json")]
    Dashboard {
        #[command(flatten)]
        sources: SourceArgs,

        /// Authors list response for the signed-in author (JSON)
        #[arg(long)]
        author: Option<PathBuf>,

        /// Any list response carrying meta.pagination.total for the whole platform
        #[arg(long, conflicts_with = "total_count")]
        total: Option<PathBuf>,

        /// Platform-wide document count, when already known
        #[arg(long)]
        total_count: Option<u64>,
    },

    /// Validate a console config without running
    #[command(after_help = "\
Examples:
  blogdesk validate console.toml")]
    Validate {
        /// Path to the console .toml file
        config: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Rows { sources } => {
            let flags = SourcePaths {
                published: sources.published,
                drafts: sources.drafts,
                ..SourcePaths::default()
            };
            console::cmd_rows(sources.config, flags, sources.json, sources.strict)
        }
        Commands::Dashboard {
            sources,
            author,
            total,
            total_count,
        } => {
            let flags = SourcePaths {
                published: sources.published,
                drafts: sources.drafts,
                author,
                total,
                total_count,
            };
            console::cmd_dashboard(sources.config, flags, sources.json, sources.strict)
        }
        Commands::Validate { config } => console::cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}
