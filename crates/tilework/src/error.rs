//! Error type for the tilework library.
//!
//! The geometry pipelines themselves never fail: degenerate input degrades
//! the output instead. Errors only arise when textual input (selector names
//! coming from a parameter layer or config file) cannot be interpreted.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A selector name did not match any variant of `kind`.
    #[error("invalid {kind}: {name}")]
    UnknownVariant { kind: &'static str, name: String },
}

pub type Result<T> = std::result::Result<T, Error>;
