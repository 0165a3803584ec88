//! Error types raised by this crate.
//!
//! Fallible functions return [`anyhow::Result`]; errors originating here are
//! always built from [`Error`], so callers can recover the kind with
//! [`anyhow::Error::downcast_ref`].
//!
//! ```
//! use loudstrie::{Error, LoudsTrie, PatriciaTrie, Trie};
//!
//! let mut trie = LoudsTrie::build(&PatriciaTrie::from_iter(["a"])).unwrap();
//! let e = trie.insert("b").unwrap_err();
//! assert!(matches!(e.downcast_ref::<Error>(), Some(Error::UnsupportedOperation(_))));
//! ```
use thiserror::Error;

/// Error kinds.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The source trie handed to a builder is malformed.
    #[error("malformed source trie: {0}")]
    Construction(String),

    /// A mutation was requested on a read-only structure.
    #[error("unsupported operation: {0}")]
    UnsupportedOperation(&'static str),

    /// Persisted bytes are truncated, inconsistent, or of another format version.
    #[error("invalid serialized data: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn construction<S: Into<String>>(msg: S) -> anyhow::Error {
        Self::Construction(msg.into()).into()
    }

    pub(crate) fn serialization<S: Into<String>>(msg: S) -> anyhow::Error {
        Self::Serialization(msg.into()).into()
    }
}
