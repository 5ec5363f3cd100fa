// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Error types.
//!
//! Two families. `SearchError` is what the page-load flow can raise: a
//! missing element means the markup is wrong, an invalid argument means a
//! display value that is not a string made it past the store boundary.
//! Neither is recoverable and neither is retried.
//!
//! `StoreError` covers reading and validating store files.

use std::fmt;

/// Failures of the query-and-render flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// A required DOM element could not be found.
    MissingElement { id: String },
    /// A value that must be a string was something else.
    InvalidArgument {
        context: String,
        expected: &'static str,
        found: String,
    },
}

impl SearchError {
    pub fn missing(id: impl Into<String>) -> Self {
        SearchError::MissingElement { id: id.into() }
    }

    pub fn invalid(context: impl Into<String>, expected: &'static str, found: impl Into<String>) -> Self {
        SearchError::InvalidArgument {
            context: context.into(),
            expected,
            found: found.into(),
        }
    }
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::MissingElement { id } => {
                write!(f, "unable to locate element '{}'", id)
            }
            SearchError::InvalidArgument {
                context,
                expected,
                found,
            } => {
                write!(f, "{}: expected {}, found {}", context, expected, found)
            }
        }
    }
}

impl std::error::Error for SearchError {}

/// Failures while loading or decoding a record store.
#[derive(Debug)]
pub enum StoreError {
    Io(std::io::Error),
    Json(serde_json::Error),
    /// A record failed validation.
    Invalid(SearchError),
    /// The envelope checksum does not match its records.
    ChecksumMismatch { stored: String, computed: String },
    UnsupportedVersion { version: u64, supported: u32 },
    DuplicateRef { reference: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io(e) => write!(f, "failed to read store: {}", e),
            StoreError::Json(e) => write!(f, "invalid store JSON: {}", e),
            StoreError::Invalid(e) => write!(f, "invalid record: {}", e),
            StoreError::ChecksumMismatch { stored, computed } => {
                write!(
                    f,
                    "store checksum mismatch (stored {}, computed {})",
                    stored, computed
                )
            }
            StoreError::UnsupportedVersion { version, supported } => {
                write!(
                    f,
                    "unsupported store version {} (this build reads version {})",
                    version, supported
                )
            }
            StoreError::DuplicateRef { reference } => {
                write!(f, "duplicate record for '{}'", reference)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io(e) => Some(e),
            StoreError::Json(e) => Some(e),
            StoreError::Invalid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for StoreError {
    fn from(e: std::io::Error) -> Self {
        StoreError::Io(e)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::Json(e)
    }
}

impl From<SearchError> for StoreError {
    fn from(e: SearchError) -> Self {
        StoreError::Invalid(e)
    }
}
