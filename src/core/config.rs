//! # Session configuration.
//!
//! Provides [`FeedConfig`], the centralized settings for one feed session.
//!
//! ## Sentinel values
//! - `generate_timeout = 0s` → generations are never timed out
//! - `queue_depth` → clamped to a minimum of 1 by the queue

use std::time::Duration;

/// Configuration for one feed session.
///
/// ## Field semantics
/// - `queue_depth`: fan-in queue bound (min 1; clamped)
/// - `generate_timeout`: per-cycle cap on a single generation (`0s` = none)
/// - `grace`: maximum wait for scheduling tasks to stop after the writer exits
///
/// ## Notes
/// All fields are public for flexibility. Prefer the helper accessors to
/// avoid sprinkling sentinel checks across the codebase.
#[derive(Clone, Debug)]
pub struct FeedConfig {
    /// Depth of the fan-in event queue.
    ///
    /// Deliberately small: a full queue suspends producers instead of
    /// buffering or dropping events, so a slow client applies backpressure
    /// all the way to the generation schedules.
    pub queue_depth: usize,

    /// Per-cycle cap on one `generate` call.
    ///
    /// - `Duration::ZERO` = no cap
    /// - `> 0` = an elapsed cap fails the cycle like any other generation
    ///   error: reported, skipped, schedule continues
    pub generate_timeout: Duration,

    /// Maximum wait for scheduling tasks to terminate once the writer has
    /// stopped. Exceeding it aborts the stragglers and surfaces
    /// [`FeedError::GraceExceeded`](crate::FeedError::GraceExceeded).
    pub grace: Duration,
}

impl FeedConfig {
    /// Returns the queue depth clamped to a minimum of 1.
    #[inline]
    pub fn queue_depth_clamped(&self) -> usize {
        self.queue_depth.max(1)
    }

    /// Returns the per-cycle generation timeout as an `Option`.
    ///
    /// - `None` → no timeout
    /// - `Some(d)` → cap applied per generation
    #[inline]
    pub fn generation_timeout(&self) -> Option<Duration> {
        if self.generate_timeout == Duration::ZERO {
            None
        } else {
            Some(self.generate_timeout)
        }
    }
}

impl Default for FeedConfig {
    /// Default configuration:
    ///
    /// - `queue_depth = 1` (pure backpressure, no buffering)
    /// - `generate_timeout = 0s` (no cap)
    /// - `grace = 30s` (reasonable shutdown window)
    fn default() -> Self {
        Self {
            queue_depth: 1,
            generate_timeout: Duration::ZERO,
            grace: Duration::from_secs(30),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_timeout_means_disabled() {
        let cfg = FeedConfig::default();
        assert!(cfg.generation_timeout().is_none());

        let cfg = FeedConfig {
            generate_timeout: Duration::from_secs(5),
            ..FeedConfig::default()
        };
        assert_eq!(cfg.generation_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_queue_depth_clamped() {
        let cfg = FeedConfig {
            queue_depth: 0,
            ..FeedConfig::default()
        };
        assert_eq!(cfg.queue_depth_clamped(), 1);
    }
}
