//! Error handling utilities for moo.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents failures of the event store on disk.
///
/// Every variant carries the path that was being touched and the underlying
/// I/O error, so the message printed at the application boundary points the
/// user at the offending file or directory.
///
/// # Examples
///
/// ```
/// use moo::errors::StoreError;
/// use std::io::{self, ErrorKind};
/// use std::path::PathBuf;
///
/// let error = StoreError::OpenFile {
///     path: PathBuf::from("/store/2023-06-01"),
///     source: io::Error::new(ErrorKind::NotFound, "no such file"),
/// };
///
/// assert!(format!("{}", error).contains("/store/2023-06-01"));
/// assert!(format!("{}", error).contains("no such file"));
/// ```
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store directory did not exist and could not be created.
    #[error("Failed to create store {path}: {source}")]
    CreateStore {
        /// The store directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The store directory could not be enumerated.
    #[error("Failed to read store '{path}': {source}")]
    ReadStore {
        /// The store directory
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An event file could not be opened or read.
    #[error("Failed to open '{path}': {source}")]
    OpenFile {
        /// The event file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An event file could not be written.
    #[error("Failed to write '{path}': {source}")]
    WriteFile {
        /// The event file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An emptied event file could not be removed.
    #[error("Failed to remove '{path}': {source}")]
    RemoveFile {
        /// The event file
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents all possible errors that can occur in moo.
///
/// Configuration errors are raised before anything on disk is touched. Store
/// errors are fatal for the invocation that hit them.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use moo::errors::AppError;
///
/// let error = AppError::Config("invalid year".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: invalid year");
/// ```
///
/// Converting from an IO error:
/// ```
/// use moo::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to arguments, dates or configuration values.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors that are not tied to a store path.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors raised while touching the store directory or its files.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
pub type AppResult<T> = Result<T, AppError>;
