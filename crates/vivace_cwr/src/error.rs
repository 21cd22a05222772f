//! Host-level errors.
//!
//! Content findings (bad fields, broken structure, failed validation rules)
//! are never surfaced here; they become [`crate::diagnostic::Diagnostic`]s on
//! the parse report. This enum covers only the failures that prevent an
//! operation from producing a report at all.

use std::io;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CwrError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("lookup table import error: {0}")]
    Csv(#[from] csv::Error),

    #[error("{0}")]
    BadFormat(String),
}
