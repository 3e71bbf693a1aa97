use super::{Hashing, E};
use crate::{breaker::Breaker, hasher, record::Record};
use crossbeam_channel::{Receiver, Sender};
use log::{debug, error};
use std::{
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    thread::{self, JoinHandle},
};

/// Flips the worker's state to terminated when the worker's thread leaves its loop, including
/// unwinding after a panic.
struct Terminated(Arc<AtomicBool>);

impl Drop for Terminated {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// `Worker` owns one thread which pulls paths from the shared work queue, hashes each file and
/// sends one `Record` per path into the result stream. The loop ends when the work queue is closed
/// and drained.
///
/// Error handling: a failure to hash a file doesn't stop the loop; it becomes an error record for
/// that path. The loop ends early only if the result stream has no receiver anymore.
///
/// After `Breaker` has been aborted, the worker still takes the paths which are in flight, but
/// reports each of them with `hasher::E::Aborted` instead of reading the file.
pub struct Worker {
    pub id: usize,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<usize>>,
}

impl Worker {
    /// Spawns a new `Worker` thread.
    ///
    /// # Parameters
    ///
    /// - `id`: Worker's ID, used in the thread's name and logs.
    /// - `rx_queue`: The receiving side of the work queue.
    /// - `tx_results`: The sending side of the result stream.
    /// - `hashing`: Algorithm and retry settings.
    /// - `breaker`: The breaker to handle interruptions.
    pub fn run(
        id: usize,
        rx_queue: Receiver<PathBuf>,
        tx_results: Sender<Record>,
        hashing: Hashing,
        breaker: Breaker,
    ) -> Result<Self, E> {
        let running = Arc::new(AtomicBool::new(true));
        let guard = Terminated(running.clone());
        let handle = thread::Builder::new()
            .name(format!("hashwalk-worker-{id}"))
            .spawn(move || {
                let _guard = guard;
                let mut processed: usize = 0;
                for path in rx_queue.iter() {
                    let digest = if breaker.is_aborted() {
                        Err(hasher::E::Aborted)
                    } else {
                        hashing
                            .algorithm
                            .digest(&path, hashing.retries, &breaker)
                    };
                    if let Err(err) = &digest {
                        debug!("entry: {}; error: {err}", path.display());
                    }
                    processed += 1;
                    if tx_results.send(Record::new(path, digest)).is_err() {
                        error!(
                            "Hashing worker #{id} cannot communicate with collector. Channel error. Worker will be closed"
                        );
                        break;
                    }
                }
                debug!("Hashing worker #{id} has been shutdown; processed: {processed}");
                processed
            })
            .map_err(E::Spawn)?;
        Ok(Self {
            id,
            running,
            handle: Some(handle),
        })
    }

    /// Checks if the worker's loop is still running.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Blocks until the worker's thread is finished and returns the number of processed paths.
    /// Repeated calls return `0`.
    pub fn wait(&mut self) -> Result<usize, E> {
        let Some(handle) = self.handle.take() else {
            return Ok(0);
        };
        handle
            .join()
            .map_err(|e| E::JoinError(self.id, format!("{e:?}")))
    }
}
