/*!
# moo - A Tiny Date-Indexed Event Journal

This file contains the main application flow: it parses the command line,
sets up logging, loads the configuration and hands the request to the event
store.

## Usage

```
moo [OPTIONS] [year [month [day]]] [add [title [description]] | delete <line|all>]
moo [OPTIONS] week

Options:
  -d, --delim <DELIM>            Title-description delimiter for new records [default: :]
  -f, --file-delim <FILE_DELIM>  File name delimiter [default: -]
  -p, --path <PATH>              Store directory
  -r, --range <RANGE>            List every file within this many days of the date
  -o, --offset <OFFSET>          Shift the date by this many days [default: 0]
      --no-sort                  Keep listed files in directory order
  -v, --verbose                  Print verbose output
      --log-format <LOG_FORMAT>  Log output format [default: text] [possible values: text, json]
```

## Configuration

- `XDG_DATA_HOME`: the store defaults to `$XDG_DATA_HOME/moo` when set
- `HOME`: otherwise the store defaults to `~/.local/share/moo`
- `RUST_LOG`: overrides the log filter
*/

use chrono::{Local, NaiveDate};
use clap::Parser;
use moo::cli::{self, CliArgs, Command, QueryDate};
use moo::config::Config;
use moo::constants::{APP_NAME, DEFAULT_LOG_LEVEL, LOG_FORMAT_JSON, VERBOSE_LOG_LEVEL};
use moo::errors::{AppError, AppResult};
use moo::journal_core::PartialDate;
use moo::journal_io;
use std::io::{self, Write};
use std::process::ExitCode;
use tracing::{debug, info, info_span};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Installs the global tracing subscriber. Logs go to stderr so listings on
/// stdout stay clean.
fn init_tracing(args: &CliArgs) {
    let level = if args.verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);

    if args.log_format == LOG_FORMAT_JSON {
        builder.json().with_current_span(true).init();
    } else {
        builder.init();
    }
}

/// Runs one invocation against the store.
///
/// Arguments and configuration are fully validated before the store is
/// touched.
fn run(args: &CliArgs, today: NaiveDate) -> AppResult<()> {
    let invocation = args.invocation()?;
    debug!("Invocation: {:?}", invocation);

    let config = Config::load(args)?;
    debug!("Configuration: {:?}", config);

    let date = match invocation.date {
        QueryDate::Today => PartialDate::from(today),
        QueryDate::Given(date) => date,
    };
    let date = date.add_days(config.offset).ok_or_else(|| {
        AppError::Config("an offset needs a full year, month and day".to_string())
    })?;

    journal_io::ensure_store_directory_exists(&config.store_dir)?;

    match invocation.command {
        Command::List => {
            let files = journal_io::list_matches(&config, &date)?;
            io::stdout()
                .lock()
                .write_all(cli::render_listing(&files).as_bytes())?;
        }
        Command::Add { title, description } => {
            let event = cli::prompt_for_event(
                &mut io::stdin().lock(),
                &mut io::stdout(),
                title,
                description,
            )?;
            journal_io::add_event(&config, &date, &event)?;
        }
        Command::Delete(target) => {
            let outcome = journal_io::delete_line(&config, &date, target)?;
            debug!("Delete outcome: {:?}", outcome);
        }
    }

    Ok(())
}

fn main() -> ExitCode {
    // Obtain the current date once at the beginning
    let today = Local::now().date_naive();

    let args = CliArgs::parse();
    init_tracing(&args);

    let correlation_id = Uuid::new_v4();
    let span = info_span!("app_invocation", correlation_id = %correlation_id);
    let _guard = span.enter();

    info!("Starting {}", APP_NAME);
    match run(&args, today) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Reported once, here at the boundary.
            eprintln!("{}: {}", APP_NAME, e);
            ExitCode::FAILURE
        }
    }
}
