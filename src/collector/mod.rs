mod sink;
mod watcher;

use crate::record::Record;
use crossbeam_channel::Receiver;
use log::debug;
pub use sink::{Printer, Sink};
use std::{io, time::Instant};
pub use watcher::Watcher;

/// Number of consumed records, split by outcome.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub hashed: usize,
    pub failed: usize,
}

impl Tally {
    pub fn total(&self) -> usize {
        self.hashed + self.failed
    }
}

/// Hands every record of the result stream to `sink` until the stream is closed. Error records
/// are reported like any other and don't stop consuming; only a failing sink does. In that case
/// the receiver is dropped on return, so workers fail to send and stop.
pub fn consume<S: Sink + ?Sized>(rx_results: Receiver<Record>, sink: &S) -> io::Result<Tally> {
    let now = Instant::now();
    let mut tally = Tally::default();
    for record in rx_results.iter() {
        if record.is_ok() {
            tally.hashed += 1;
        } else {
            tally.failed += 1;
        }
        sink.report(record)?;
    }
    debug!(
        "consumed {} records ({} failed) in {}µs / {}ms / {}s",
        tally.total(),
        tally.failed,
        now.elapsed().as_micros(),
        now.elapsed().as_millis(),
        now.elapsed().as_secs()
    );
    Ok(tally)
}
