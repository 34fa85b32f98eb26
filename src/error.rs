//! # Error Types
//!
//! This module defines error types used throughout the termica library.
//!
//! | Variant | When |
//! |---------|------|
//! | [`PrinterError::Configuration`] | No or ambiguous connection target, bad settings |
//! | [`PrinterError::Connection`] | Serial port, device file or socket could not be opened |
//! | [`PrinterError::Transmission`] | A write failed part way through a flush |
//! | [`PrinterError::Image`] | Raster input does not match its declared size |
//! | [`PrinterError::Io`] | Any other I/O failure (e.g. reading a settings file) |

use std::io;

use thiserror::Error;

/// Main error type for termica operations
#[derive(Debug, Error)]
pub enum PrinterError {
    /// Connection settings are missing, ambiguous or invalid
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The transport could not be opened
    #[error("Connection to {target} failed: {source}")]
    Connection {
        target: String,
        #[source]
        source: io::Error,
    },

    /// A write to an open transport failed.
    ///
    /// `sent` counts bytes confirmed written during the failing flush,
    /// `retained` counts bytes still held in the command buffer afterwards.
    #[error("Transmission failed after {sent} bytes ({retained} bytes retained): {source}")]
    Transmission {
        sent: usize,
        retained: usize,
        #[source]
        source: io::Error,
    },

    /// Image processing error
    #[error("Image error: {0}")]
    Image(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl PrinterError {
    pub(crate) fn connection(target: impl Into<String>, source: io::Error) -> Self {
        Self::Connection {
            target: target.into(),
            source,
        }
    }
}

/// Convenience alias used across the crate
pub type Result<T, E = PrinterError> = std::result::Result<T, E>;
