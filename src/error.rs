//! # Error Types
//!
//! This module defines the error types used throughout the escp library.
//!
//! ESC/P has no acknowledgement channel, so nothing is ever retried: a failed
//! write means the channel itself is broken and the session is finished.

use std::io;

use thiserror::Error;

/// Main error type for escp operations
#[derive(Debug, Error)]
pub enum EscpError {
    /// The printer channel could not be opened (device missing, permission
    /// denied, refused by the backend)
    #[error("Failed to open channel {target}: {source}")]
    ChannelOpenFailed {
        /// Human-readable description of what was being opened
        target: String,
        #[source]
        source: io::Error,
    },

    /// A write, flush or close on an open channel failed.
    ///
    /// The printer is left in an undefined state; the session must be closed
    /// and the device reset out-of-band.
    #[error("Write failed: {0}")]
    WriteFailed(#[source] io::Error),

    /// Duplex status read failed or the channel is write-only
    #[error("Read failed: {0}")]
    ReadFailed(#[source] io::Error),

    /// Operation invoked on a session that can no longer accept commands
    #[error("Invalid state: {0}")]
    InvalidState(&'static str),

    /// Invalid printer profile or command-line input
    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    /// I/O error outside of a session (job files, device scans)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for escp operations
pub type EscpResult<T> = Result<T, EscpError>;
