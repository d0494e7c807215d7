//! CLI Exit Code Registry
//!
//! Single source of truth for `tboard` exit codes. Scripts rely on them.
//!
//! | Code | Meaning                                          |
//! |------|--------------------------------------------------|
//! | 0    | Success                                          |
//! | 1    | General error (unspecified)                      |
//! | 2    | Usage error (bad arguments, bad date)            |
//! | 3    | An input file could not be read                  |
//! | 4    | Invalid configuration file                       |
//! | 5    | Export requested but the filtered set is empty   |
//! | 6    | Clipboard write failed                           |

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// General error - unspecified failure.
/// Avoid using this; prefer a specific error code.
pub const EXIT_ERROR: u8 = 1;

/// Usage error - bad arguments. Clap exits with the same code on parse errors.
pub const EXIT_USAGE: u8 = 2;

/// Owner or history file missing or unreadable.
pub const EXIT_INPUT: u8 = 3;

/// Config file unreadable, unparsable or failing validation.
pub const EXIT_CONFIG: u8 = 4;

/// Nothing to copy: the filters left no records.
pub const EXIT_NOTHING_TO_EXPORT: u8 = 5;

/// No clipboard tool available, or it rejected the write.
pub const EXIT_CLIPBOARD: u8 = 6;
