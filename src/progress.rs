use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// Progress and cancellation of a running analysis
///
/// The analysis itself is synchronous. Callers that run it on another
/// thread share the `Progress` (e.g. in an [`std::sync::Arc`]) to follow
/// its progress or to cancel it. Cancellation is cooperative: the analysis
/// checks the flag before each protein and before each GO term.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use goea::Progress;
///
/// let progress = Arc::new(Progress::new());
/// let worker = Arc::clone(&progress);
///
/// let handle = std::thread::spawn(move || {
///     worker.set_total(10);
///     for _ in 0..10 {
///         if worker.is_canceled() {
///             break;
///         }
///         worker.increment();
///     }
/// });
/// handle.join().unwrap();
///
/// assert_eq!(progress.processed(), 10);
/// assert_eq!(progress.total(), 10);
/// ```
#[derive(Debug, Default)]
pub struct Progress {
    canceled: AtomicBool,
    processed: AtomicUsize,
    total: AtomicUsize,
}

impl Progress {
    /// Constructs a new, not canceled `Progress`
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests the analysis to stop as soon as possible
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::Release);
    }

    /// Returns `true` if cancellation was requested
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Acquire)
    }

    /// Starts a new step with `total` items and resets the processed counter
    pub fn set_total(&self, total: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.processed.store(0, Ordering::Relaxed);
    }

    /// Marks one more item as processed
    pub fn increment(&self) {
        self.processed.fetch_add(1, Ordering::Relaxed);
    }

    /// The number of processed items of the current step
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// The number of items of the current step, `0` if unknown
    pub fn total(&self) -> usize {
        self.total.load(Ordering::Relaxed)
    }

    /// Clears cancellation and counters, so the `Progress` can be reused
    pub fn reset(&self) {
        self.canceled.store(false, Ordering::Release);
        self.set_total(0);
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn cancel_and_reset() {
        let progress = Progress::new();
        assert!(!progress.is_canceled());
        progress.cancel();
        assert!(progress.is_canceled());

        progress.increment();
        progress.reset();
        assert!(!progress.is_canceled());
        assert_eq!(progress.processed(), 0);
    }

    #[test]
    fn new_step_resets_counter() {
        let progress = Progress::new();
        progress.set_total(3);
        progress.increment();
        progress.increment();
        assert_eq!(progress.processed(), 2);

        progress.set_total(5);
        assert_eq!(progress.processed(), 0);
        assert_eq!(progress.total(), 5);
    }
}
