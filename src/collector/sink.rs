use crate::record::Record;
use log::warn;
use std::{
    fmt,
    io::{self, Write},
    path::Path,
    sync::Mutex,
};

/// Receiver of the pipeline's output.
///
/// `discovered()` is called from the dispatcher's thread at the moment a path is found, before the
/// path is queued for hashing. `report()` is called from the thread which runs the pipeline, once
/// per record, in order of arrival. Both can be called concurrently.
pub trait Sink: Send + Sync {
    fn discovered(&self, _path: &Path) {}

    /// An error stops the pipeline.
    fn report(&self, record: Record) -> io::Result<()>;
}

/// Writes one line per event:
///
/// - discovered path: `Hashing: <path>`
/// - hashed file: `<digest-hex>  <path>`
/// - failed file: `ERR: <path> (<error message>)`
pub struct Printer<W: Write + Send> {
    out: Mutex<W>,
    announce: bool,
}

impl<W: Write + Send> Printer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out: Mutex::new(out),
            announce: true,
        }
    }

    /// Enables or disables the `Hashing: <path>` lines. Enabled by default.
    pub fn announce(mut self, announce: bool) -> Self {
        self.announce = announce;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn line(&self, line: fmt::Arguments<'_>) -> io::Result<()> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| io::Error::other("output is poisoned"))?;
        out.write_fmt(line)?;
        out.write_all(b"\n")?;
        out.flush()
    }
}

impl<W: Write + Send> Sink for Printer<W> {
    fn discovered(&self, path: &Path) {
        if !self.announce {
            return;
        }
        if let Err(err) = self.line(format_args!("Hashing: {}", path.display())) {
            warn!("Fail to announce {}: {err}", path.display());
        }
    }

    fn report(&self, record: Record) -> io::Result<()> {
        match &record.digest {
            Ok(digest) => self.line(format_args!("{digest}  {}", record.path.display())),
            Err(err) => self.line(format_args!("ERR: {} ({err})", record.path.display())),
        }
    }
}
