use std::{io, result};

use thiserror::Error;

/// Outcome of a harness operation that did not complete normally.
#[derive(Error, Debug)]
pub enum Error {
    /// The scenario must abort: unexpected job state, failed command, timeout.
    #[error("{0}")]
    Failure(String),
    /// A precondition does not hold; the caller should skip, not fail.
    #[error("assumption failed: {0}")]
    Skipped(String),
    /// The device could not be reached at all.
    #[error("device transport error: {0}")]
    Transport(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub fn is_skip(&self) -> bool {
        matches!(self, Error::Skipped(_))
    }
}

pub type Result<T> = result::Result<T, Error>;
