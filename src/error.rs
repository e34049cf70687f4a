//! Error types for sessions, field extraction and whole runs.

use std::{io, time::Duration};

use thirtyfour::error::WebDriverError;
use thiserror::Error;

use crate::snapshot::Field;

/// Errors raised by the browser collaborator.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("could not start a browser session at {url}: {source}")]
    Launch {
        url: String,
        #[source]
        source: WebDriverError,
    },

    #[error("webdriver command failed: {0}")]
    Command(String),
}

impl From<WebDriverError> for SessionError {
    fn from(err: WebDriverError) -> Self {
        SessionError::Command(err.to_string())
    }
}

/// Errors raised while extracting a page.
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("timed out after {waited:?} waiting for {field} ({xpath})")]
    Timeout {
        field: Field,
        xpath: String,
        waited: Duration,
    },

    #[error("failed to read {field}: {source}")]
    Session {
        field: Field,
        #[source]
        source: SessionError,
    },

    #[error("failed to navigate to {url}: {source}")]
    Navigation {
        url: String,
        #[source]
        source: SessionError,
    },
}

impl ExtractError {
    /// The field this error belongs to, if it is tied to one.
    pub fn field(&self) -> Option<Field> {
        match self {
            ExtractError::Timeout { field, .. } | ExtractError::Session { field, .. } => {
                Some(*field)
            }
            ExtractError::Navigation { .. } => None,
        }
    }

    /// Whether the element never showed up within the wait window.
    pub fn is_timeout(&self) -> bool {
        matches!(self, ExtractError::Timeout { .. })
    }
}

/// Top-level failure of a run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Extract(#[from] ExtractError),

    #[error("failed to write report: {0}")]
    Io(#[from] io::Error),
}
