use crate::hasher;
use std::path::PathBuf;

/// Outcome of hashing one file. Created by a hashing worker for every path it takes from the work
/// queue and handed over (by value) to the `Sink`, so each record is consumed exactly once.
///
/// A record carries either a digest or an error, never both.
#[derive(Debug)]
pub struct Record {
    pub path: PathBuf,
    pub digest: Result<String, hasher::E>,
}

impl Record {
    pub fn new(path: PathBuf, digest: Result<String, hasher::E>) -> Self {
        Self { path, digest }
    }

    /// Lowercase hex digest, if hashing succeeded.
    pub fn digest(&self) -> Option<&str> {
        self.digest.as_deref().ok()
    }

    /// The error, if hashing failed.
    pub fn error(&self) -> Option<&hasher::E> {
        self.digest.as_ref().err()
    }

    pub fn is_ok(&self) -> bool {
        self.digest.is_ok()
    }
}
