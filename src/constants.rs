//! Constants used throughout the application.
//!
//! This module contains all constants used in moo, organized into logical
//! groups. Having constants centralized makes them easier to find, modify, and
//! reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "moo";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A tiny date-indexed event journal kept in flat files";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Default log level. Listing output goes to stdout, so stay quiet unless asked.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose`.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Verb that appends an event.
pub const VERB_ADD: &str = "add";
/// Verb that deletes an event.
pub const VERB_DELETE: &str = "delete";
/// Verb that lists the coming week.
pub const VERB_WEEK: &str = "week";
/// Marker accepted by `delete` in place of a line number.
pub const DELETE_ALL_MARKER: &str = "all";
/// Days covered by the `week` verb.
pub const WEEK_RANGE_DAYS: i32 = 7;

// Configuration Keys & Environment Variables
/// Environment variable for the XDG data directory.
pub const ENV_VAR_XDG_DATA_HOME: &str = "XDG_DATA_HOME";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Store sub-directory inside `$XDG_DATA_HOME`.
pub const XDG_STORE_SUBDIR: &str = "moo";
/// Store sub-directory inside the home directory when XDG is not configured.
pub const HOME_STORE_SUBDIR: &str = ".local/share/moo";

// Delimiters
/// Default separator between year, month and day in file names.
pub const DEFAULT_FILE_DELIM: char = '-';
/// Default separator around the title inside a record line.
pub const DEFAULT_EVENT_DELIM: char = ':';

// Record Limits
/// Maximum number of bytes kept from a title.
pub const MAX_TITLE_LEN: usize = 49;
/// Maximum number of bytes kept from a description.
pub const MAX_DESCRIPTION_LEN: usize = 99;

// File System Parameters
/// Default POSIX permissions for a newly created store (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;

// Date Logic
/// Days per month; February is always 28.
pub const MONTH_DAYS: [i32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
/// Number of months in a year.
pub const MONTHS_PER_YEAR: i32 = 12;
/// Number of days in the (leap-free) year used by date addition.
pub const DAYS_PER_YEAR: i32 = 365;
