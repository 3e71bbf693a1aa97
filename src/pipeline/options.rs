use super::Pipeline;
use crate::{
    error::E,
    hasher::Algorithm,
    pool::{Hashing, MAX_WORKERS},
    walker::Walker,
};
use glob::Pattern;
use std::{
    mem,
    path::{Path, PathBuf},
};

/// Settings of a `Pipeline`.
///
/// - `root`: folder (or single file) to hash; required by `Pipeline::run()`.
/// - `workers`: number of hashing workers, `1..=MAX_WORKERS`; by default equal to the number
///   of available cores.
/// - `capacity`: capacity of the work queue and of the result stream; `0` (default) means that
///   every path and every record is handed over directly.
/// - `algorithm`: hashing algorithm, `sha256` by default.
/// - `retries`: how many times a file is re-read after a transient I/O error, `0` by default.
/// - `exclude`: glob patterns of paths to skip while walking.
#[derive(Debug, Clone, Default)]
pub struct Options {
    pub(crate) root: Option<PathBuf>,
    pub(crate) workers: Option<usize>,
    pub(crate) capacity: usize,
    pub(crate) hashing: Hashing,
    pub(crate) exclude: Vec<Pattern>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn root<P: AsRef<Path>>(&mut self, root: P) -> &mut Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    pub fn workers(&mut self, workers: usize) -> Result<&mut Self, E> {
        if workers == 0 || workers > MAX_WORKERS {
            return Err(E::InvalidWorkersNumber(workers, MAX_WORKERS));
        }
        self.workers = Some(workers);
        Ok(self)
    }

    pub fn capacity(&mut self, capacity: usize) -> &mut Self {
        self.capacity = capacity;
        self
    }

    pub fn algorithm(&mut self, algorithm: Algorithm) -> &mut Self {
        self.hashing.algorithm = algorithm;
        self
    }

    pub fn retries(&mut self, retries: usize) -> &mut Self {
        self.hashing.retries = retries;
        self
    }

    pub fn exclude<T: AsRef<str>>(&mut self, pattern: T) -> Result<&mut Self, E> {
        let mut patterns = Walker::patterns(&[pattern])?;
        for pattern in patterns.drain(..) {
            if !self.exclude.contains(&pattern) {
                self.exclude.push(pattern);
            }
        }
        Ok(self)
    }

    pub fn pipeline(&mut self) -> Result<Pipeline, E> {
        Pipeline::new(Options {
            root: self.root.take(),
            workers: self.workers.take(),
            capacity: self.capacity,
            hashing: self.hashing,
            exclude: mem::take(&mut self.exclude),
        })
    }
}
