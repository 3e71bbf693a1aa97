mod error;
mod worker;

use crate::{breaker::Breaker, hasher::Algorithm, record::Record};
use crossbeam_channel::{Receiver, Sender};
pub use error::E;
use std::path::PathBuf;
pub use worker::Worker;

/// The most workers a pool accepts.
pub const MAX_WORKERS: usize = 512;

/// Settings each worker applies to a file.
#[derive(Debug, Clone, Copy, Default)]
pub struct Hashing {
    pub algorithm: Algorithm,
    /// How many times a file is re-read after a transient I/O error.
    pub retries: usize,
}

/// Fixed set of hashing workers. All of them share one work queue and one result stream; workers
/// never talk to each other.
pub struct Pool {
    workers: Vec<Worker>,
}

impl Pool {
    /// Spawns `count` workers. Each worker gets its own clone of both channel ends, so the work
    /// queue's receiving side and the result stream's sending side stay with the caller.
    pub fn new(
        count: usize,
        rx_queue: &Receiver<PathBuf>,
        tx_results: &Sender<Record>,
        hashing: Hashing,
        breaker: &Breaker,
    ) -> Result<Self, E> {
        if count == 0 {
            return Err(E::NoAvailableWorkers);
        }
        let mut workers: Vec<Worker> = Vec::with_capacity(count);
        for id in 0..count {
            workers.push(Worker::run(
                id,
                rx_queue.clone(),
                tx_results.clone(),
                hashing,
                breaker.clone(),
            )?);
        }
        Ok(Self { workers })
    }

    pub fn len(&self) -> usize {
        self.workers.len()
    }

    pub fn is_all_down(&self) -> bool {
        !self.workers.iter().any(|w| w.is_running())
    }

    /// Joins every worker and returns the number of paths each one processed. All workers are
    /// joined even if one of them has failed; the first failure is returned.
    pub fn wait(&mut self) -> Result<Vec<usize>, E> {
        let mut processed = Vec::with_capacity(self.workers.len());
        let mut failure = None;
        for worker in self.workers.iter_mut() {
            match worker.wait() {
                Ok(count) => processed.push(count),
                Err(err) => {
                    processed.push(0);
                    failure.get_or_insert(err);
                }
            }
        }
        match failure {
            Some(err) => Err(err),
            None => Ok(processed),
        }
    }
}
