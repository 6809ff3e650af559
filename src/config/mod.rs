//! Configuration management for moo.
//!
//! The configuration is built once per invocation from the command line and
//! the environment, then handed by reference to every store operation.
//!
//! # Environment Variables
//!
//! - `XDG_DATA_HOME`: when set and non-empty, the store is `$XDG_DATA_HOME/moo`
//! - `HOME`: otherwise the store is `$HOME/.local/share/moo`

use crate::cli::CliArgs;
use crate::constants::{
    DEFAULT_EVENT_DELIM, DEFAULT_FILE_DELIM, ENV_VAR_HOME, ENV_VAR_XDG_DATA_HOME,
    HOME_STORE_SUBDIR, WEEK_RANGE_DAYS, XDG_STORE_SUBDIR,
};
use crate::errors::{AppError, AppResult};
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Configuration for a single moo invocation.
///
/// # Examples
///
/// ```
/// use moo::Config;
/// use std::path::PathBuf;
///
/// let config = Config {
///     store_dir: PathBuf::from("/tmp/moo"),
///     range: 7,
///     ..Config::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.file_delim, '-');
/// ```
#[derive(Clone)]
pub struct Config {
    /// Directory holding the event files.
    pub store_dir: PathBuf,

    /// Separator between year, month and day in file names.
    pub file_delim: char,

    /// Separator written around titles in new records.
    pub event_delim: char,

    /// Signed number of days for range queries; 0 selects exact prefix matching.
    pub range: i32,

    /// Signed number of days the query date is shifted by.
    pub offset: i32,

    /// Whether listed files are sorted by name.
    pub sort: bool,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("store_dir", &"[REDACTED_PATH]")
            .field("file_delim", &self.file_delim)
            .field("event_delim", &self.event_delim)
            .field("range", &self.range)
            .field("offset", &self.offset)
            .field("sort", &self.sort)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store_dir: PathBuf::new(),
            file_delim: DEFAULT_FILE_DELIM,
            event_delim: DEFAULT_EVENT_DELIM,
            range: 0,
            offset: 0,
            sort: true,
        }
    }
}

impl Config {
    /// Builds the configuration from parsed arguments and the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the store directory cannot be resolved
    /// or a value fails validation.
    pub fn load(args: &CliArgs) -> AppResult<Self> {
        let range = match args.range {
            Some(range) => range,
            None if args.is_week() => WEEK_RANGE_DAYS,
            None => 0,
        };

        let config = Config {
            store_dir: Config::resolve_store_dir(args.path.as_deref())?,
            file_delim: args.file_delim,
            event_delim: args.delim,
            range,
            offset: args.offset,
            sort: !args.no_sort,
        };
        config.validate()?;

        Ok(config)
    }

    /// Works out where the store lives.
    ///
    /// An explicit path wins and may use `~` or environment references. A
    /// relative explicit path is taken relative to the working directory.
    pub fn resolve_store_dir(explicit: Option<&str>) -> AppResult<PathBuf> {
        if let Some(path) = explicit {
            let expanded = shellexpand::full(path)
                .map_err(|e| AppError::Config(format!("Failed to expand path: {}", e)))?;
            let store_dir = PathBuf::from(expanded.into_owned());
            if store_dir.is_absolute() {
                return Ok(store_dir);
            }
            return Ok(env::current_dir()?.join(store_dir));
        }

        match env::var(ENV_VAR_XDG_DATA_HOME) {
            Ok(data) if !data.is_empty() => return Ok(PathBuf::from(data).join(XDG_STORE_SUBDIR)),
            _ => {}
        }

        let home = env::var(ENV_VAR_HOME).map_err(|_| {
            AppError::Config(format!(
                "{} is not set; pass --path to choose a store",
                ENV_VAR_HOME
            ))
        })?;
        Ok(PathBuf::from(home).join(HOME_STORE_SUBDIR))
    }

    /// Validates that the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` when:
    /// - the store path is empty or relative
    /// - a delimiter is not a single ASCII character, or is a newline
    /// - the file delimiter is a path separator or a digit
    pub fn validate(&self) -> AppResult<()> {
        if self.store_dir.as_os_str().is_empty() {
            return Err(AppError::Config("Store directory path is empty".to_string()));
        }

        if !self.store_dir.is_absolute() {
            return Err(AppError::Config(
                "Store directory must be an absolute path".to_string(),
            ));
        }

        for (name, delim) in [("event", self.event_delim), ("file", self.file_delim)] {
            if !delim.is_ascii() || delim == '\n' {
                return Err(AppError::Config(format!(
                    "The {} delimiter must be a single ASCII character other than newline",
                    name
                )));
            }
        }

        if self.file_delim == '/' || self.file_delim.is_ascii_digit() {
            return Err(AppError::Config(format!(
                "'{}' cannot be used as the file delimiter",
                self.file_delim
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use serial_test::serial;
    use std::path::Path;

    fn with_env<T>(xdg: Option<&str>, home: Option<&str>, body: impl FnOnce() -> T) -> T {
        let orig_xdg = env::var(ENV_VAR_XDG_DATA_HOME).ok();
        let orig_home = env::var(ENV_VAR_HOME).ok();

        match xdg {
            Some(val) => env::set_var(ENV_VAR_XDG_DATA_HOME, val),
            None => env::remove_var(ENV_VAR_XDG_DATA_HOME),
        }
        match home {
            Some(val) => env::set_var(ENV_VAR_HOME, val),
            None => env::remove_var(ENV_VAR_HOME),
        }

        let result = body();

        match orig_xdg {
            Some(val) => env::set_var(ENV_VAR_XDG_DATA_HOME, val),
            None => env::remove_var(ENV_VAR_XDG_DATA_HOME),
        }
        match orig_home {
            Some(val) => env::set_var(ENV_VAR_HOME, val),
            None => env::remove_var(ENV_VAR_HOME),
        }

        result
    }

    #[test]
    fn test_debug_impl_redacts_store_path() {
        let config = Config {
            store_dir: PathBuf::from("/home/username/private/moo"),
            ..Config::default()
        };

        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("[REDACTED_PATH]"));
        assert!(!debug_output.contains("/home/username/private/moo"));
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.file_delim, '-');
        assert_eq!(config.event_delim, ':');
        assert_eq!(config.range, 0);
        assert_eq!(config.offset, 0);
        assert!(config.sort);
    }

    #[test]
    #[serial]
    fn test_store_under_xdg_data_home() {
        let dir = with_env(Some("/data"), Some("/home/someone"), || {
            Config::resolve_store_dir(None).unwrap()
        });
        assert_eq!(dir, PathBuf::from("/data/moo"));
    }

    #[test]
    #[serial]
    fn test_empty_xdg_falls_back_to_home() {
        let dir = with_env(Some(""), Some("/home/someone"), || {
            Config::resolve_store_dir(None).unwrap()
        });
        assert_eq!(dir, PathBuf::from("/home/someone/.local/share/moo"));
    }

    #[test]
    #[serial]
    fn test_missing_home_is_config_error() {
        let result = with_env(None, None, || Config::resolve_store_dir(None));
        match result {
            Err(AppError::Config(msg)) => assert!(msg.contains("HOME")),
            other => panic!("Expected AppError::Config, got {:?}", other),
        }
    }

    #[test]
    #[serial]
    fn test_explicit_path_wins_and_expands() {
        let dir = with_env(Some("/data"), Some("/home/someone"), || {
            Config::resolve_store_dir(Some("~/journal")).unwrap()
        });
        assert_eq!(dir, PathBuf::from("/home/someone/journal"));
    }

    #[test]
    fn test_relative_path_is_made_absolute() {
        let dir = Config::resolve_store_dir(Some("relative/store")).unwrap();
        assert!(dir.is_absolute());
        assert!(dir.ends_with(Path::new("relative/store")));
    }

    #[test]
    fn test_validate_rejects_relative_store() {
        let config = Config {
            store_dir: PathBuf::from("relative"),
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_delimiters() {
        let base = Config {
            store_dir: PathBuf::from("/tmp/moo"),
            ..Config::default()
        };

        for file_delim in ['/', '7', '\n', 'é'] {
            let config = Config {
                file_delim,
                ..base.clone()
            };
            assert!(config.validate().is_err(), "file delimiter {:?}", file_delim);
        }

        let config = Config {
            event_delim: '\n',
            ..base.clone()
        };
        assert!(config.validate().is_err());

        let config = Config {
            event_delim: '|',
            file_delim: '_',
            ..base
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    #[serial]
    fn test_load_from_args() {
        let args = CliArgs::parse_from(["moo", "-p", "/tmp/moo", "-d", "|", "-f", "_", "--no-sort"]);
        let config = Config::load(&args).unwrap();
        assert_eq!(config.store_dir, PathBuf::from("/tmp/moo"));
        assert_eq!(config.event_delim, '|');
        assert_eq!(config.file_delim, '_');
        assert_eq!(config.range, 0);
        assert!(!config.sort);
    }

    #[test]
    #[serial]
    fn test_week_defaults_range() {
        let args = CliArgs::parse_from(["moo", "-p", "/tmp/moo", "week"]);
        assert_eq!(Config::load(&args).unwrap().range, WEEK_RANGE_DAYS);

        let args = CliArgs::parse_from(["moo", "-p", "/tmp/moo", "-r", "3", "week"]);
        assert_eq!(Config::load(&args).unwrap().range, 3);
    }
}
