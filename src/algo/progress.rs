//! Progress reporting for long-running algorithms.
//!
//! Subdivision batches report once before each step and once when the batch
//! completes, so a caller can drive a progress bar or a status line.
//!
//! # Example
//!
//! ```
//! use subsurf::algo::Progress;
//!
//! let progress = Progress::new(|current, total, message| {
//!     println!("[{}/{}] {}", current, total, message);
//! });
//! progress.report(0, 2, "loop");
//! ```

/// A progress callback that receives updates during long-running operations.
///
/// The callback receives:
/// - `current`: Steps completed so far
/// - `total`: Total number of steps
/// - `message`: Description of the current operation
pub struct Progress {
    callback: Box<dyn Fn(usize, usize, &str) + Send + Sync>,
}

impl Progress {
    /// Create a new progress reporter with the given callback.
    pub fn new<F>(callback: F) -> Self
    where
        F: Fn(usize, usize, &str) + Send + Sync + 'static,
    {
        Self {
            callback: Box::new(callback),
        }
    }

    /// Report progress.
    #[inline]
    pub fn report(&self, current: usize, total: usize, message: &str) {
        (self.callback)(current, total, message);
    }

    /// Create a no-op progress reporter that discards all updates.
    pub fn none() -> Self {
        Self::new(|_, _, _| {})
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for Progress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Progress").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_report_forwards_to_callback() {
        let last = Arc::new(AtomicUsize::new(0));
        let sink = Arc::clone(&last);
        let progress = Progress::new(move |current, total, _| {
            sink.store(current * 10 + total, Ordering::SeqCst);
        });

        progress.report(2, 5, "step");
        assert_eq!(last.load(Ordering::SeqCst), 25);
    }

    #[test]
    fn test_none_is_silent() {
        let progress = Progress::default();
        progress.report(1, 1, "ignored");
        assert_eq!(format!("{:?}", progress), "Progress { .. }");
    }
}
