mod error;

use super::Hasher;
use error::E;
use sha2::{Digest, Sha256 as Origin};

/// Hasher based on `sha2` crate. Used by default.
pub struct Sha256 {
    hasher: Option<Origin>,
    hash: Option<Vec<u8>>,
}

impl Default for Sha256 {
    /// Creates a default instance of `Sha256` hasher.
    fn default() -> Self {
        Sha256 {
            hasher: Some(Origin::new()),
            hash: None,
        }
    }
}

impl Hasher for Sha256 {
    type Error = E;

    /// Creates a new instance of `Sha256` hasher.
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::default()
    }

    /// Returns the computed hash.
    ///
    /// # Returns
    ///
    /// - `Ok(&[u8])` containing the hash bytes if hashing is finished.
    /// - `Err(E)` if the hash is not yet finalized.
    fn hash(&self) -> Result<&[u8], E> {
        Ok(self.hash.as_ref().ok_or(E::NotFinished)?)
    }

    /// Absorbs input data into the hasher.
    fn absorb(&mut self, data: &[u8]) -> Result<(), E> {
        let Some(hasher) = self.hasher.as_mut() else {
            return Err(E::AlreadyFinished);
        };
        hasher.update(data);
        Ok(())
    }

    /// Finalizes the hash computation and stores the result.
    fn finish(&mut self) -> Result<(), E> {
        let Some(hasher) = self.hasher.take() else {
            return Err(E::AlreadyFinished);
        };
        self.hash = Some(hasher.finalize().to_vec());
        Ok(())
    }
}
