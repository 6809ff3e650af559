//! Core journal functionality without I/O operations.
//!
//! This module contains the pure pieces of the event store: the date type and
//! its arithmetic, the file name codec and the record codec. Nothing in here
//! touches the filesystem; see `journal_io` for that.

pub mod date;
pub mod filename;
pub mod record;

pub use date::{Date, DateWindow, PartialDate};
pub use filename::{decode, encode_prefix};
pub use record::{encode_record, parse_records, Event, RecordReader};
