//! `blogdesk-recon`: published/draft document reconciliation for the blog console.
//!
//! Pure engine crate: receives raw CMS list responses, returns classified documents,
//! dashboard counters and per-row view models. No CLI or IO dependencies.

pub mod aggregate;
pub mod classify;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod present;
pub mod source;

pub use config::ConsoleConfig;
pub use engine::{reconcile, reconcile_with, run};
pub use error::ReconError;
pub use model::{
    Classification, ConsoleInput, ConsoleReport, ReconciledDocument, SessionContext, Source,
    VersionRecord,
};
pub use present::{to_row, RowView};
