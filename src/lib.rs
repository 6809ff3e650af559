/*!
# moo

moo is a tiny journal of dated events. Each event is a title and an optional
description filed under a calendar date, and every date gets one plain text
file in the store directory.

## Core Features

- Add an event to today or to any year, month or day
- List the events of a day, a month or a whole year
- List everything within a number of days of a date (`week` for the next 7)
- Delete one event by its line number, or all events of a file

## Architecture

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `constants`: Defaults and limits shared across modules
- `errors`: Error handling infrastructure
- `journal_core`: Dates, file names and records, without I/O
- `journal_io`: Selecting, reading and rewriting event files

## Usage Example

```rust,no_run
use moo::journal_core::{Event, PartialDate};
use moo::journal_io;
use moo::Config;
use std::path::PathBuf;

fn main() -> moo::AppResult<()> {
    let config = Config {
        store_dir: PathBuf::from("/tmp/moo"),
        ..Config::default()
    };
    let date = PartialDate::day(2023, 6, 1);

    journal_io::add_event(&config, &date, &Event::new("buy milk", "2%"))?;
    for file in journal_io::list_matches(&config, &date)? {
        println!("{}: {} event(s)", file.name, file.events.len());
    }
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Constants used throughout the application
pub mod constants;
/// Error types and utilities for error handling
pub mod errors;
/// Dates, file names and records without any I/O
pub mod journal_core;
/// Event store operations on disk
pub mod journal_io;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
