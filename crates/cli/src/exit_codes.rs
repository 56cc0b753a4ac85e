//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract: scripts rely on them.
//!
//! | Code | Description                                             |
//! |------|---------------------------------------------------------|
//! | 0    | Success                                                 |
//! | 1    | Inventories differ (only with `--strict`)               |
//! | 2    | CLI usage error (bad args, format cannot be inferred)   |
//! | 3    | IO error (unreadable input, unwritable output)          |
//! | 4    | Parse error in an inventory file                        |
//! | 5    | Unsupported input format                                |
//! | 6    | Aggregation error (quantity out of range)               |
//! | 7    | Invalid job file or settings file                       |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into `recon_exit_code` or the relevant command

use fitdiff_recon::ReconError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Inventories differ. Like `diff(1)`, exit 1 means "inputs differ."
pub const EXIT_DIFFS: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Cannot read an input or write an output.
pub const EXIT_IO: u8 = 3;

/// A line does not match its declared format.
pub const EXIT_PARSE: u8 = 4;

/// Format tag not recognized.
pub const EXIT_UNSUPPORTED_FORMAT: u8 = 5;

/// Aggregated quantity out of range.
pub const EXIT_AGGREGATION: u8 = 6;

/// Job file or settings file invalid.
pub const EXIT_CONFIG: u8 = 7;

/// Map an engine error to its exit code.
pub fn recon_exit_code(err: &ReconError) -> u8 {
    match err {
        ReconError::UnsupportedFormat(_) => EXIT_UNSUPPORTED_FORMAT,
        ReconError::Parse { .. } => EXIT_PARSE,
        ReconError::Aggregation { .. } => EXIT_AGGREGATION,
        ReconError::ConfigParse(_) | ReconError::ConfigValidation(_) => EXIT_CONFIG,
        ReconError::Io(_) | ReconError::Json(_) => EXIT_IO,
    }
}
