//! Event records and their one-line encoding.
//!
//! A record is `<delim><title><delim><description>\n`. Nothing is escaped, so
//! a title containing the delimiter or a newline will not read back intact.
//!
//! When reading, the delimiter of each record is whatever byte starts that
//! record, not the configured one. Records written under an older delimiter
//! stay readable after it changes.

use crate::constants::{MAX_DESCRIPTION_LEN, MAX_TITLE_LEN};
use std::io::{self, BufRead, Read};

/// A single journal entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub title: String,
    pub description: String,
}

/// Cuts `text` down to at most `max_bytes` bytes, backing off to the last
/// character boundary that fits.
fn truncate_bytes(mut text: String, max_bytes: usize) -> String {
    if text.len() > max_bytes {
        let mut end = max_bytes;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        text.truncate(end);
    }
    text
}

impl Event {
    /// Builds an event, dropping one trailing newline from each field and
    /// capping both fields to their maximum length.
    ///
    /// # Examples
    ///
    /// ```
    /// use moo::journal_core::Event;
    ///
    /// let event = Event::new("buy milk\n", "2%");
    /// assert_eq!(event.title, "buy milk");
    /// assert!(!event.has_empty_title());
    /// ```
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        let trim = |mut text: String| {
            if text.ends_with('\n') {
                text.pop();
            }
            text
        };
        Event {
            title: truncate_bytes(trim(title.into()), MAX_TITLE_LEN),
            description: truncate_bytes(trim(description.into()), MAX_DESCRIPTION_LEN),
        }
    }

    pub fn has_empty_title(&self) -> bool {
        self.title.is_empty()
    }
}

/// Serializes an event into one record line.
///
/// # Examples
///
/// ```
/// use moo::journal_core::{encode_record, Event};
///
/// let line = encode_record(&Event::new("buy milk", ""), ':');
/// assert_eq!(line, ":buy milk:\n");
/// ```
pub fn encode_record(event: &Event, event_delim: char) -> String {
    format!(
        "{delim}{}{delim}{}\n",
        event.title,
        event.description,
        delim = event_delim
    )
}

/// Sequential reader of records from a byte stream.
///
/// Iteration stops at end of input or at the first truncated record.
pub struct RecordReader<R> {
    reader: R,
    finished: bool,
}

impl<R: BufRead> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            reader,
            finished: false,
        }
    }

    fn read_record(&mut self) -> io::Result<Option<Event>> {
        let mut delim = [0u8; 1];
        if self.reader.read(&mut delim)? == 0 {
            return Ok(None);
        }

        let mut title = Vec::new();
        self.reader.read_until(delim[0], &mut title)?;
        if title.pop() != Some(delim[0]) {
            return Ok(None);
        }

        let mut description = Vec::new();
        if self.reader.read_until(b'\n', &mut description)? == 0 {
            return Ok(None);
        }
        if description.last() == Some(&b'\n') {
            description.pop();
        }

        Ok(Some(Event {
            title: String::from_utf8_lossy(&title).into_owned(),
            description: String::from_utf8_lossy(&description).into_owned(),
        }))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = io::Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(Some(event)) => Some(Ok(event)),
            Ok(None) => {
                self.finished = true;
                None
            }
            Err(e) => {
                self.finished = true;
                Some(Err(e))
            }
        }
    }
}

/// Parses every record in an in-memory file.
pub fn parse_records(content: &[u8]) -> Vec<Event> {
    // Reading from a slice cannot fail.
    RecordReader::new(content).filter_map(Result::ok).collect()
}
