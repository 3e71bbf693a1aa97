#![doc = include_str!("../README.md")]

mod breaker;
pub mod collector;
pub mod dispatcher;
mod error;
pub mod hasher;
pub mod pipeline;
pub mod pool;
pub mod record;
pub mod walker;

pub use breaker::Breaker;
pub use collector::{Printer, Sink};
pub use error::E;
pub use hasher::{Algorithm, Hasher};
pub use pipeline::{Options, Pipeline, Stage, Summary};
pub use record::Record;
pub use walker::Walker;
