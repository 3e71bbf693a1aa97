use glob::PatternError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum E {
    #[error("Fail to parse pattern {0}: {1}")]
    PatternError(String, PatternError),
    #[error("Fail to walk {0}: {1}")]
    IOError(PathBuf, io::Error),
    #[error("Operation has been aborted")]
    Aborted,
}

impl From<(String, PatternError)> for E {
    fn from(err: (String, PatternError)) -> Self {
        E::PatternError(err.0, err.1)
    }
}

impl From<(PathBuf, io::Error)> for E {
    fn from(err: (PathBuf, io::Error)) -> Self {
        E::IOError(err.0, err.1)
    }
}
