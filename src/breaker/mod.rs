use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

/// `Breaker` is used for stopping a running pipeline. It is observed by the directory walk (before
/// each step), by every hashing worker (in the pull loop) and by the hasher itself (before each
/// chunk of a file is read). Take into account, `Pipeline` resets the state of `Breaker` to its
/// initial state as soon as a run is over.
///
/// Cloning: An instance of `Breaker` can be cloned; the cloned instance will be bound with the parent
/// instance. `Breaker` is safe to be shared between threads.
#[derive(Default, Debug, Clone)]
pub struct Breaker {
    state: Arc<AtomicBool>,
}

impl Breaker {
    /// Creates a new instance of `Breaker`.
    pub fn new() -> Self {
        Self {
            state: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Resets the instance of `Breaker` to its initial state.
    ///
    /// This method is typically used internally within the `Pipeline`.
    pub(crate) fn reset(&self) {
        self.state.store(false, Ordering::SeqCst)
    }

    /// Returns a closure that, when called, will abort the operation. Handy for signal handlers.
    pub fn breaker(&self) -> impl Fn() + Send + 'static {
        let signal = self.state.clone();
        move || signal.store(true, Ordering::SeqCst)
    }

    /// Checks if the operation has been aborted.
    pub fn is_aborted(&self) -> bool {
        self.state.load(Ordering::SeqCst)
    }

    /// Aborts the operation by setting the internal state to `true`.
    pub fn abort(&self) {
        self.state.store(true, Ordering::SeqCst)
    }
}
