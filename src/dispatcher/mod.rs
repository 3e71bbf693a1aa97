use crate::{
    collector::Sink,
    error::E,
    pipeline::{Stage, Stages},
    walker,
};
use crossbeam_channel::Sender;
use log::{debug, warn};
use std::{
    path::PathBuf,
    sync::Arc,
    thread::{self, JoinHandle},
    time::Instant,
};

/// `Dispatcher` moves a lazy sequence of paths (normally a `Walker`) onto the work queue from its
/// own thread. Every path is announced to the sink before it is queued.
///
/// The dispatcher owns the only sending side of the work queue. As soon as the sequence ends,
/// successfully or with an error, the sender is dropped, which closes the queue exactly once and
/// lets the workers drain it. The walk error isn't swallowed: it comes back from `wait()`.
pub struct Dispatcher {
    handle: Option<JoinHandle<Result<usize, walker::E>>>,
}

impl Dispatcher {
    pub fn run<I, S>(
        paths: I,
        tx_queue: Sender<PathBuf>,
        sink: Arc<S>,
        stages: Stages,
    ) -> Result<Self, E>
    where
        I: Iterator<Item = Result<PathBuf, walker::E>> + Send + 'static,
        S: Sink + ?Sized + 'static,
    {
        let handle = thread::Builder::new()
            .name("hashwalk-dispatcher".to_owned())
            .spawn(move || {
                let now = Instant::now();
                let mut dispatched: usize = 0;
                let mut outcome: Result<(), walker::E> = Ok(());
                for next in paths {
                    let path = match next {
                        Ok(path) => path,
                        Err(err) => {
                            debug!("walking is stopped: {err}");
                            outcome = Err(err);
                            break;
                        }
                    };
                    sink.discovered(&path);
                    if tx_queue.send(path).is_err() {
                        warn!("No hashing workers are listening. Walking is stopped");
                        break;
                    }
                    dispatched += 1;
                }
                // Recorded before the close, so it always precedes `Done`.
                stages.enter(Stage::Draining);
                drop(tx_queue);
                debug!(
                    "dispatched {dispatched} paths in {}µs / {}ms / {}s",
                    now.elapsed().as_micros(),
                    now.elapsed().as_millis(),
                    now.elapsed().as_secs()
                );
                outcome.map(|_| dispatched)
            })
            .map_err(|err| E::Spawn(String::from("dispatcher"), err))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Waits for the dispatcher and returns the number of queued paths or the walk error.
    pub fn wait(&mut self) -> Result<usize, E> {
        let Some(handle) = self.handle.take() else {
            return Ok(0);
        };
        Ok(handle
            .join()
            .map_err(|e| E::JoinError(String::from("dispatcher"), format!("{e:?}")))??)
    }
}
