use crate::{pool, walker};
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("{0}")]
    Walker(walker::E),
    #[error("{0}")]
    Pool(pool::E),
    #[error("IO: {0}")]
    IO(#[from] io::Error),
    #[error("Fail to get feedback from {0} thread: {1}")]
    JoinError(String, String),
    #[error("Fail to spawn {0} thread: {1}")]
    Spawn(String, io::Error),
    #[error("Root path to walk isn't set")]
    NoRoot,
    #[error("Number of workers should be in range 1..={1}; given: {0}")]
    InvalidWorkersNumber(usize, usize),
    #[error("Fail to get optimal threads number")]
    OptimalThreadsNumber,
    #[error("Operation has been aborted")]
    Aborted,
}

impl From<walker::E> for E {
    fn from(err: walker::E) -> Self {
        match err {
            walker::E::Aborted => E::Aborted,
            err => E::Walker(err),
        }
    }
}

impl From<pool::E> for E {
    fn from(err: pool::E) -> Self {
        E::Pool(err)
    }
}
