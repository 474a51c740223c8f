//! Error types shared by every layer of the engine.
//!
//! Validation and configuration problems are reported synchronously at the
//! call site, so nothing malformed ever reaches the command queue. The only
//! error a running animation can produce is an [`Error::InvariantViolation`]
//! (an engine bug) or an I/O failure from the render surface.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the typewriter engine.
#[derive(Debug, Error)]
pub enum Error {
    /// The engine or a surface was constructed with unusable settings.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// A builder call received an argument it cannot queue.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A color string did not match any accepted form.
    #[error(transparent)]
    Color(#[from] ColorError),

    /// A buffer index escaped its bounds.
    #[error("Invariant violation in {operation}: index {index} outside buffer of length {len}")]
    InvariantViolation {
        /// The buffer operation that was attempted.
        operation: &'static str,
        /// The offending index.
        index: usize,
        /// Buffer length at the time of the call.
        len: usize,
    },

    /// The render surface failed to write.
    #[error("Surface I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Color parsing failures, naming the textual form that failed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ColorError {
    /// Input looked like `rgb(...)` / `rgba(...)` but was malformed.
    #[error("invalid rgb color {input:?}: {reason} (expected e.g. 'rgb(0, 0, 0)')")]
    Rgb {
        /// The rejected input.
        input: String,
        /// Why the functional form did not parse.
        reason: String,
    },

    /// Input looked like `#RRGGBB` but was malformed.
    #[error("invalid hex color {input:?}: {reason} (expected e.g. '#000000')")]
    Hex {
        /// The rejected input.
        input: String,
        /// Why the hex form did not parse.
        reason: String,
    },

    /// Input matched neither the functional nor the hex form.
    #[error("unrecognized color {input:?}: expected 'rgb(0, 0, 0)' or '#000000'")]
    UnrecognizedForm {
        /// The rejected input.
        input: String,
    },
}
