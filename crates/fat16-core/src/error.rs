//! The shared error type.
//!
//! Per the decoder's error-handling policy, this type only ever surfaces
//! construction-time and precondition failures. Steady-state conditions —
//! a short read while streaming a file, reaching the end of a directory —
//! are values (a byte count, a `bool`), never an `Err`. See `fat16-fs` for
//! where that line is drawn.

use thiserror::Error;

/// The error type for `fat16-core` and `fat16-fs` operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The boot block was too short to read, or its geometry fields were
    /// zero where the format requires them to be non-zero.
    #[error("malformed boot block: {0}")]
    MalformedBootBlock(String),

    /// `first_entry_of` was called on an entry whose directory attribute
    /// bit is not set.
    #[error("not a directory")]
    NotADirectory,

    /// Underlying I/O failure from the image source (not a short read —
    /// an actual error return from `read`/`seek`).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias used throughout this workspace.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a [`Error::MalformedBootBlock`] from any message-like value.
    pub fn malformed_boot_block(msg: impl Into<String>) -> Self {
        Error::MalformedBootBlock(msg.into())
    }
}
