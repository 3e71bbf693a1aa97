mod options;
mod stage;

use crate::{
    breaker::Breaker,
    collector::{self, Sink, Watcher},
    dispatcher::Dispatcher,
    error::E,
    pool::{Pool, MAX_WORKERS},
    record::Record,
    walker::{self, Walker},
};
use crossbeam_channel::bounded;
use log::{debug, error};
pub use options::Options;
pub use stage::{Stage, Stages};
use std::{path::PathBuf, sync::Arc, thread, time::Instant};

/// Result of a finished run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Paths found by the walk and queued for hashing.
    pub discovered: usize,
    /// Records with a digest.
    pub hashed: usize,
    /// Records with an error.
    pub failed: usize,
    /// Paths processed by each worker.
    pub processed: Vec<usize>,
    /// Stage history of the run.
    pub stages: Vec<Stage>,
}

/// `Pipeline` hashes every file beneath a root with a fixed pool of workers and streams the
/// outcome to a `Sink` as soon as each file is done.
///
/// One run involves the following threads:
/// - dispatcher: walks the root and pushes paths onto the work queue, closes the queue at the end;
/// - N hashing workers: pull paths until the queue is closed and drained, send one record each;
/// - watcher: waits for all workers to terminate and then closes the result stream;
/// - the caller's thread: hands every record to the sink until the stream is closed.
///
/// Records arrive in any order. A file which cannot be read is reported as an error record and
/// doesn't affect other files. A walk error stops discovering new paths; paths found before it are
/// still hashed and reported, after which `run()` returns the walk error.
///
/// A run can be stopped with the `Breaker` returned by `breaker()`; in this case `run()` returns
/// `E::Aborted` once all threads are down. The breaker is reset when a run is over, never at its
/// start: an abort requested before `run()` is called stops that run.
///
/// # Example
///
/// ```no_run
/// use hashwalk::{Options, Printer};
/// use std::{env::temp_dir, io, sync::Arc};
///
/// let pipeline = Options::new()
///     .root(temp_dir())
///     .workers(4)
///     .unwrap()
///     .pipeline()
///     .unwrap();
/// let result = pipeline.run(Arc::new(Printer::new(io::sink())));
/// println!("{result:?}");
/// ```
#[derive(Debug)]
pub struct Pipeline {
    opt: Options,
    workers: usize,
    breaker: Breaker,
}

impl Pipeline {
    pub fn new(opt: Options) -> Result<Self, E> {
        let workers = match opt.workers {
            Some(workers) => workers,
            None => thread::available_parallelism()
                .ok()
                .map(|n| n.get().min(MAX_WORKERS))
                .ok_or(E::OptimalThreadsNumber)?,
        };
        if workers == 0 || workers > MAX_WORKERS {
            return Err(E::InvalidWorkersNumber(workers, MAX_WORKERS));
        }
        Ok(Self {
            opt,
            workers,
            breaker: Breaker::new(),
        })
    }

    /// Returns a `Breaker` bound with this pipeline. Calling `abort()` stops the walk and makes
    /// workers report the remaining paths as aborted.
    pub fn breaker(&self) -> Breaker {
        self.breaker.clone()
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Walks the configured root and hashes every file found.
    pub fn run<S: Sink + ?Sized + 'static>(&self, sink: Arc<S>) -> Result<Summary, E> {
        let root = self.opt.root.as_ref().ok_or(E::NoRoot)?;
        let walker = Walker::new(root, &self.breaker).exclude(&self.opt.exclude);
        self.feed(walker, sink)
    }

    /// Runs the pipeline over any sequence of paths. The first `Err` in `paths` is treated as a
    /// walk error.
    pub fn feed<I, S>(&self, paths: I, sink: Arc<S>) -> Result<Summary, E>
    where
        I: IntoIterator<Item = Result<PathBuf, walker::E>>,
        I::IntoIter: Send + 'static,
        S: Sink + ?Sized + 'static,
    {
        let result = self.execute(paths, sink);
        // All threads of the run are down at this point.
        self.breaker.reset();
        result
    }

    fn execute<I, S>(&self, paths: I, sink: Arc<S>) -> Result<Summary, E>
    where
        I: IntoIterator<Item = Result<PathBuf, walker::E>>,
        I::IntoIter: Send + 'static,
        S: Sink + ?Sized + 'static,
    {
        let now = Instant::now();
        let stages = Stages::new();
        stages.enter(Stage::Walking);
        let (tx_queue, rx_queue) = bounded::<PathBuf>(self.opt.capacity);
        let (tx_results, rx_results) = bounded::<Record>(self.opt.capacity);
        let pool = Pool::new(
            self.workers,
            &rx_queue,
            &tx_results,
            self.opt.hashing,
            &self.breaker,
        )?;
        // Workers hold the only receivers of the work queue.
        drop(rx_queue);
        debug!(
            "Created pool with {} workers for hashing ({})",
            self.workers, self.opt.hashing.algorithm
        );
        let mut watcher = Watcher::run(pool, tx_results, stages.clone())?;
        let mut dispatcher =
            match Dispatcher::run(paths.into_iter(), tx_queue, sink.clone(), stages.clone()) {
                Ok(dispatcher) => dispatcher,
                Err(err) => {
                    let _ = watcher.wait();
                    return Err(err);
                }
            };
        let consumed = collector::consume(rx_results, sink.as_ref());
        if let Err(err) = &consumed {
            error!("Fail to report hashing results: {err}. Pipeline will be stopped");
            self.breaker.abort();
        }
        let walked = dispatcher.wait();
        let processed = watcher.wait();
        let tally = consumed?;
        stages.enter(Stage::Reported);
        let processed = processed?;
        debug!(
            "hashing of {} paths ({} failed) in {}µs / {}ms / {}s",
            tally.total(),
            tally.failed,
            now.elapsed().as_micros(),
            now.elapsed().as_millis(),
            now.elapsed().as_secs()
        );
        let discovered = walked?;
        if self.breaker.is_aborted() {
            return Err(E::Aborted);
        }
        if discovered != tally.total() {
            error!(
                "discovered {discovered} paths, but {} records have been reported",
                tally.total()
            );
        }
        Ok(Summary {
            discovered,
            hashed: tally.hashed,
            failed: tally.failed,
            processed,
            stages: stages.history(),
        })
    }
}
