mod error;

use super::Hasher;
use blake3::{Hash, Hasher as BlakeHasher};
use error::E;

/// BLAKE3 hasher based on `blake3` crate.
pub struct Blake {
    hasher: BlakeHasher,
    hash: Option<Hash>,
}

impl Default for Blake {
    fn default() -> Self {
        Blake {
            hasher: BlakeHasher::new(),
            hash: None,
        }
    }
}

impl Hasher for Blake {
    type Error = E;
    fn new() -> Self
    where
        Self: Sized,
    {
        Self::default()
    }
    fn hash(&self) -> Result<&[u8], E> {
        Ok(self.hash.as_ref().ok_or(E::NotFinished)?.as_bytes())
    }
    fn absorb(&mut self, data: &[u8]) -> Result<(), E> {
        self.hasher.update(data);
        Ok(())
    }
    fn finish(&mut self) -> Result<(), E> {
        self.hash = Some(self.hasher.finalize());
        Ok(())
    }
}
