pub mod blake;
mod error;
pub mod sha256;

use crate::breaker::Breaker;
pub use error::E;
use log::{debug, warn};
use std::{
    error::Error as StdError,
    fmt,
    fs::File,
    io::{self, Read},
    path::Path,
    str::FromStr,
};

const BUFFER_SIZE: usize = 1024 * 32;

/// A trait that defines the behavior of a hasher, which is used to compute the digest of a single
/// file. Implementers of this trait must also implement `Send` and `Sync`.
///
/// For each file a worker:
/// - Creates a fresh instance of `Hasher` (with method `new()`).
/// - Adds the file's content chunk by chunk (with method `absorb(..)`).
/// - Finalizes the digest (with method `finish()`).
/// - Requests the digest (with method `hash()`).
pub trait Hasher: Send + Sync {
    /// The type of error that can occur during operations.
    type Error: StdError + Into<E>;

    /// Creates a hasher with a clean state.
    fn new() -> Self
    where
        Self: Sized;

    /// Absorbs data into the hasher. This method might be called multiple times during the
    /// reading of a file.
    fn absorb(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Finalizes the hashing process. Called exactly once, after all data has been absorbed.
    fn finish(&mut self) -> Result<(), Self::Error>;

    /// Retrieves the computed hash. Available only after `finish()`.
    fn hash(&self) -> Result<&[u8], Self::Error>;
}

/// Runtime choice of the hashing algorithm.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Algorithm {
    #[default]
    Sha256,
    Blake3,
}

impl Algorithm {
    /// Hashes the file at `path`, retrying up to `retries` times on transient I/O errors.
    pub fn digest(&self, path: &Path, retries: usize, breaker: &Breaker) -> Result<String, E> {
        match self {
            Self::Sha256 => digest::<sha256::Sha256>(path, retries, breaker),
            Self::Blake3 => digest::<blake::Blake>(path, retries, breaker),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Sha256 => "sha256",
                Self::Blake3 => "blake3",
            }
        )
    }
}

impl FromStr for Algorithm {
    type Err = E;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sha256" | "sha-256" => Ok(Self::Sha256),
            "blake3" | "blake" => Ok(Self::Blake3),
            _ => Err(E::UnknownAlgorithm(s.to_owned())),
        }
    }
}

/// Opens the file at `path` and streams it through a fresh `H`. The file handle lives only inside
/// one attempt, so it is released on every exit path. Errors which are considered transient
/// (see `E::is_transient`) are retried from scratch up to `retries` times.
pub fn digest<H: Hasher>(path: &Path, retries: usize, breaker: &Breaker) -> Result<String, E> {
    digest_with::<H, _, _>(path, || File::open(path), retries, breaker)
}

/// Same as `digest()`, but every attempt gets its source from `open`. `path` is used for logs only.
pub fn digest_with<H, R, F>(
    path: &Path,
    mut open: F,
    retries: usize,
    breaker: &Breaker,
) -> Result<String, E>
where
    H: Hasher,
    R: Read,
    F: FnMut() -> io::Result<R>,
{
    let mut attempt = 0;
    loop {
        let result = open()
            .map_err(E::from)
            .and_then(|source| digest_reader::<H, _>(source, breaker));
        match result {
            Err(err) if err.is_transient() && attempt < retries => {
                attempt += 1;
                warn!(
                    "entry: {}; transient error: {err}; retry {attempt} of {retries}",
                    path.display()
                );
            }
            Err(err) => {
                debug!("entry: {}; error: {err}", path.display());
                return Err(err);
            }
            Ok(digest) => return Ok(digest),
        }
    }
}

/// Streams `reader` through a fresh `H` and returns the finalized digest as lowercase hex.
pub fn digest_reader<H: Hasher, R: Read>(mut reader: R, breaker: &Breaker) -> Result<String, E> {
    let mut hasher = H::new();
    let mut buffer = [0u8; BUFFER_SIZE];
    loop {
        if breaker.is_aborted() {
            return Err(E::Aborted);
        }
        let bytes_read = match reader.read(&mut buffer) {
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        if bytes_read == 0 {
            break;
        }
        hasher.absorb(&buffer[..bytes_read]).map_err(Into::<E>::into)?;
    }
    hasher.finish().map_err(Into::<E>::into)?;
    Ok(hex::encode(hasher.hash().map_err(Into::<E>::into)?))
}
