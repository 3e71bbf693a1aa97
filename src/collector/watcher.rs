use crate::{
    error::E,
    pipeline::{Stage, Stages},
    pool::Pool,
    record::Record,
};
use crossbeam_channel::Sender;
use log::debug;
use std::thread::{self, JoinHandle};

/// Completion watcher. Holds the last sending side of the result stream: it waits until every
/// worker of the pool has terminated and only then drops the sender, which closes the stream.
/// Workers' own senders are dropped with their threads, so the close always happens after the
/// final send.
pub struct Watcher {
    handle: Option<JoinHandle<Result<Vec<usize>, E>>>,
}

impl Watcher {
    pub fn run(mut pool: Pool, tx_results: Sender<Record>, stages: Stages) -> Result<Self, E> {
        let handle = thread::Builder::new()
            .name("hashwalk-watcher".to_owned())
            .spawn(move || {
                let processed = pool.wait();
                drop(tx_results);
                stages.enter(Stage::Done);
                debug!("all {} hashing workers are down", pool.len());
                processed.map_err(E::from)
            })
            .map_err(|err| E::Spawn(String::from("watcher"), err))?;
        Ok(Self {
            handle: Some(handle),
        })
    }

    /// Waits for the watcher and returns the number of paths processed by each worker.
    pub fn wait(&mut self) -> Result<Vec<usize>, E> {
        let Some(handle) = self.handle.take() else {
            return Ok(Vec::new());
        };
        handle
            .join()
            .map_err(|e| E::JoinError(String::from("watcher"), format!("{e:?}")))?
    }
}
