//! CLI Exit Code Registry
//!
//! Single source of truth for all CLI exit codes. Exit codes are part of
//! the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                       |
//! |------|-----------------------------------------------|
//! | 0    | Success                                       |
//! | 1    | General error (unspecified)                   |
//! | 2    | CLI usage error (bad args, missing file)      |
//! | 3    | Invalid run config                            |
//! | 4    | Runtime error (unreadable input, bad CSV)     |
//! | 5    | Unmatched models found (only under --strict)  |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments, missing required options.
pub const EXIT_USAGE: u8 = 2;

/// Run config failed to parse or validate.
pub const EXIT_INVALID_CONFIG: u8 = 3;

/// Runtime error - unreadable files, malformed CSV, engine failure.
pub const EXIT_RUNTIME: u8 = 4;

/// One or more models classified as `none` while running with --strict.
pub const EXIT_UNMATCHED: u8 = 5;
