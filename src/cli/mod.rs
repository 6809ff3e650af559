use crate::constants::{
    APP_DESCRIPTION, DEFAULT_EVENT_DELIM, DEFAULT_FILE_DELIM, DELETE_ALL_MARKER, LOG_FORMAT_JSON,
    LOG_FORMAT_TEXT, VERB_ADD, VERB_DELETE, VERB_WEEK,
};
use crate::errors::{AppError, AppResult};
use crate::journal_core::{Event, PartialDate};
use crate::journal_io::{EventFile, LineTarget};
use clap::Parser;
use std::io::{BufRead, Write};

/// A tiny date-indexed event journal kept in flat files
#[derive(Parser, Debug)]
#[clap(name = "moo", about = APP_DESCRIPTION)]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// [year [month [day]]] [add [title [description]] | delete <line|all>], or `week`
    #[clap(value_name = "WORDS")]
    pub words: Vec<String>,

    /// Title-description delimiter for new records
    #[clap(short = 'd', long = "delim", default_value_t = DEFAULT_EVENT_DELIM)]
    pub delim: char,

    /// File name delimiter
    #[clap(short = 'f', long = "file-delim", default_value_t = DEFAULT_FILE_DELIM)]
    pub file_delim: char,

    /// Store directory (defaults to $XDG_DATA_HOME/moo or ~/.local/share/moo)
    #[clap(short = 'p', long)]
    pub path: Option<String>,

    /// List every file within this many days of the date (negative looks back)
    #[clap(short = 'r', long, allow_negative_numbers = true)]
    pub range: Option<i32>,

    /// Shift the date by this many days
    #[clap(short = 'o', long, default_value_t = 0, allow_negative_numbers = true)]
    pub offset: i32,

    /// Keep listed files in directory order
    #[clap(long)]
    pub no_sort: bool,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,

    /// Log output format
    #[clap(long, default_value = LOG_FORMAT_TEXT, value_parser = [LOG_FORMAT_TEXT, LOG_FORMAT_JSON])]
    pub log_format: String,
}

/// Which date an invocation is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryDate {
    /// Nothing given on the command line; the caller supplies the local date.
    Today,
    Given(PartialDate),
}

/// What an invocation does with the selected date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    /// Missing fields are asked for interactively.
    Add {
        title: Option<String>,
        description: Option<String>,
    },
    Delete(LineTarget),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub date: QueryDate,
    pub command: Command,
}

fn is_verb(word: &str) -> bool {
    word == VERB_ADD || word == VERB_DELETE || word == VERB_WEEK
}

fn parse_component(word: &str, name: &str, max: u32) -> AppResult<u32> {
    match word.parse::<u32>() {
        Ok(value) if (1..=max).contains(&value) => Ok(value),
        _ => Err(AppError::Config(format!("invalid {}", name))),
    }
}

impl CliArgs {
    /// Whether the `week` verb was used.
    pub fn is_week(&self) -> bool {
        self.words.first().map(String::as_str) == Some(VERB_WEEK)
    }

    /// Interprets the positional words.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` for unparsable date components, a missing or
    /// invalid delete line, or words that are not understood.
    ///
    /// # Examples
    ///
    /// ```
    /// use clap::Parser;
    /// use moo::cli::{CliArgs, Command, QueryDate};
    /// use moo::journal_core::PartialDate;
    ///
    /// let args = CliArgs::parse_from(["moo", "2023", "6", "add", "buy milk"]);
    /// let invocation = args.invocation().unwrap();
    /// assert_eq!(invocation.date, QueryDate::Given(PartialDate::month(2023, 6)));
    /// assert_eq!(
    ///     invocation.command,
    ///     Command::Add { title: Some("buy milk".to_string()), description: None }
    /// );
    /// ```
    pub fn invocation(&self) -> AppResult<Invocation> {
        let mut words = self.words.iter().map(String::as_str).peekable();

        let date = match words.peek().copied() {
            None => QueryDate::Today,
            Some(VERB_WEEK) => {
                words.next();
                QueryDate::Today
            }
            Some(word) if is_verb(word) => QueryDate::Today,
            Some(_) => {
                let year = words
                    .next()
                    .and_then(|word| word.parse::<i32>().ok())
                    .filter(|year| *year != 0)
                    .ok_or_else(|| AppError::Config("invalid year".to_string()))?;
                let mut date = PartialDate::year(year);

                if let Some(word) = words.next_if(|word| !is_verb(word)) {
                    date.month = Some(parse_component(word, "month", 12)?);
                    if let Some(word) = words.next_if(|word| !is_verb(word)) {
                        date.day = Some(parse_component(word, "day", 31)?);
                    }
                }
                QueryDate::Given(date)
            }
        };

        let command = match words.next() {
            None => Command::List,
            Some(VERB_ADD) => Command::Add {
                title: words.next().map(str::to_string),
                description: words.next().map(str::to_string),
            },
            Some(VERB_DELETE) => {
                let target = match words.next() {
                    Some(DELETE_ALL_MARKER) => LineTarget::All,
                    Some(word) => word
                        .parse::<usize>()
                        .ok()
                        .filter(|line| *line > 0)
                        .map(LineTarget::Line)
                        .ok_or_else(|| AppError::Config("invalid line".to_string()))?,
                    None => return Err(AppError::Config("invalid line".to_string())),
                };
                Command::Delete(target)
            }
            Some(word) => {
                return Err(AppError::Config(format!("unknown command '{}'", word)));
            }
        };

        if let Some(word) = words.next() {
            return Err(AppError::Config(format!("unexpected argument '{}'", word)));
        }

        Ok(Invocation { date, command })
    }
}

/// Completes an event, asking on `output`/`input` for whatever is missing.
///
/// The description is only asked for when the title was missing too; a title
/// given without a description records an empty one.
pub fn prompt_for_event<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    title: Option<String>,
    description: Option<String>,
) -> AppResult<Event> {
    let (title, description) = match title.filter(|title| !title.is_empty()) {
        Some(title) => (title, description.unwrap_or_default()),
        None => {
            let title = prompt_line(input, output, "title: ")?;
            let description = match description {
                Some(description) => description,
                None => prompt_line(input, output, "description: ")?,
            };
            (title, description)
        }
    };

    let event = Event::new(title, description);
    if event.has_empty_title() {
        return Err(AppError::Config("title cannot be empty".to_string()));
    }
    Ok(event)
}

fn prompt_line<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> AppResult<String> {
    write!(output, "{}", label)?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line)
}

/// Formats listed files the way `moo` prints them.
///
/// ```text
/// 2023-06-01
///     1 buy milk
///          2%
/// ```
pub fn render_listing(files: &[EventFile]) -> String {
    let mut out = String::new();
    for file in files {
        out.push_str(&file.name);
        out.push('\n');
        for (index, event) in file.events.iter().enumerate() {
            out.push_str(&format!("    {} {}\n", index + 1, event.title));
            if !event.description.is_empty() {
                out.push_str(&format!("         {}\n", event.description));
            }
        }
    }
    out
}
