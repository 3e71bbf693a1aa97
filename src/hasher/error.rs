use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("{0}")]
    IO(#[from] io::Error),
    #[error("Hasher error: {0}")]
    Hasher(String),
    #[error("Unknown hashing algorithm: {0}")]
    UnknownAlgorithm(String),
    #[error("Operation has been aborted")]
    Aborted,
}

impl E {
    pub fn hasher<Er: std::error::Error>(err: Er) -> E {
        E::Hasher(err.to_string())
    }

    /// Returns `true` for I/O errors which might pass on a repeated attempt.
    pub fn is_transient(&self) -> bool {
        match self {
            E::IO(err) => matches!(
                err.kind(),
                io::ErrorKind::Interrupted | io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ),
            _ => false,
        }
    }
}
