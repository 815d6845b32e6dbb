//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract. Scripts rely on them.
//!
//! # Exit Code Ranges
//!
//! | Range   | Domain           | Description                              |
//! |---------|------------------|------------------------------------------|
//! | 0       | Universal        | Success                                  |
//! | 1       | Universal        | General error (unspecified)              |
//! | 2       | Universal        | CLI usage error (bad args, missing file) |
//! | 3-9     | sources          | Reading exported CMS responses           |
//! | 10-19   | config           | Console config file                      |

// =============================================================================
// Universal (0-2)
// =============================================================================

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

// =============================================================================
// Sources (3-9)
// =============================================================================

/// A source file could not be read or parsed and `--strict` was given.
/// Without `--strict` the source is treated as empty and the run continues.
pub const EXIT_SOURCE_UNAVAILABLE: u8 = 3;

/// A source parsed as JSON but was not a list response (the engine cannot run).
pub const EXIT_SOURCE_NOT_LIST: u8 = 4;

// =============================================================================
// Config (10-19)
// =============================================================================

/// Config file could not be read.
pub const EXIT_CONFIG_READ: u8 = 10;

/// Config file failed to parse or validate.
pub const EXIT_CONFIG_INVALID: u8 = 11;
