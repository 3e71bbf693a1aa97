use thiserror::Error;

use crate::hasher;

#[derive(Error, Debug)]
pub enum E {
    #[error("Hashing not finished")]
    NotFinished,
    #[error("Hashing already finished")]
    AlreadyFinished,
}

impl From<E> for hasher::E {
    fn from(val: E) -> Self {
        hasher::E::hasher(val)
    }
}
