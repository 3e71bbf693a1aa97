use log::debug;
use std::{
    fmt,
    sync::{Arc, Mutex},
};

/// Pipeline-level state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// The walk is running and paths are being queued.
    Walking,
    /// The work queue has been closed; workers are finishing.
    Draining,
    /// All workers have terminated and the result stream has been closed.
    Done,
    /// The sink has consumed every record.
    Reported,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Self::Walking => "walking",
                Self::Draining => "draining",
                Self::Done => "done",
                Self::Reported => "reported",
            }
        )
    }
}

/// Shared history of stage transitions. Each closing of a channel is recorded here by the actor
/// which performed it, so the history shows how many times each channel has been closed.
#[derive(Debug, Clone, Default)]
pub struct Stages {
    history: Arc<Mutex<Vec<Stage>>>,
}

impl Stages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&self, stage: Stage) {
        debug!("pipeline stage: {stage}");
        if let Ok(mut history) = self.history.lock() {
            history.push(stage);
        }
    }

    pub fn history(&self) -> Vec<Stage> {
        self.history
            .lock()
            .map(|history| history.clone())
            .unwrap_or_default()
    }
}
