//! Error types for pageflow
//!
//! The coordinator absorbs transport failures internally (a failed page fetch
//! only flips the loading indicator back to false), so the public error
//! surface is deliberately small: callers can only fail by talking to a pager
//! whose driver task has already shut down.

use thiserror::Error;

/// The main error type for pageflow
#[derive(Error, Debug)]
pub enum Error {
    /// The pager's driver task is gone; no further commands can be delivered.
    #[error("pager has shut down")]
    Closed,
}

/// Result type alias for pageflow
pub type Result<T> = std::result::Result<T, Error>;
