use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("No available workers")]
    NoAvailableWorkers,
    #[error("Fail to spawn hashing worker: {0}")]
    Spawn(io::Error),
    #[error("Hashing worker #{0} has failed: {1}")]
    JoinError(usize, String),
}
