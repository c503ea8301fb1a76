//! Two-phase frame scheduling.
//!
//! After each frame the loop first waits for the delay the frame callback
//! returned, then for the next display refresh tick, and only then runs the
//! next frame.

use log::warn;
use std::time::{Duration, Instant};

/// Where the loop currently is between two frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// No iteration is in flight
    Idle,
    /// Waiting out the delay returned by the last frame
    TimedWait { delay: Duration },
    /// Delay elapsed; waiting for the next refresh tick
    AwaitingRefresh,
}

/// State machine behind the frame loop.
#[derive(Debug, Clone)]
pub struct FrameScheduler {
    phase: LoopPhase,
    frames: u64,
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameScheduler {
    pub fn new() -> Self {
        Self {
            phase: LoopPhase::Idle,
            frames: 0,
        }
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Number of frame callbacks run so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Whether an iteration is scheduled.
    pub fn in_flight(&self) -> bool {
        self.phase != LoopPhase::Idle
    }

    /// Records a finished frame callback and enters the timed wait.
    ///
    /// `returned` is the callback's result in seconds. Returns the delay to wait.
    pub fn frame_completed(&mut self, returned: Option<f64>) -> Duration {
        let delay = delay_from_seconds(returned);
        self.frames += 1;
        self.phase = LoopPhase::TimedWait { delay };
        delay
    }

    /// Ends the timed wait. Returns `false` if no timed wait was in progress.
    pub fn timer_elapsed(&mut self) -> bool {
        match self.phase {
            LoopPhase::TimedWait { .. } => {
                self.phase = LoopPhase::AwaitingRefresh;
                true
            }
            other => {
                warn!("Timer elapsed while {:?}; ignoring", other);
                false
            }
        }
    }

    /// Ends the refresh wait. Returns `true` when the next frame should run.
    pub fn refresh_fired(&mut self) -> bool {
        match self.phase {
            LoopPhase::AwaitingRefresh => {
                self.phase = LoopPhase::Idle;
                true
            }
            other => {
                warn!("Refresh tick while {:?}; ignoring", other);
                false
            }
        }
    }
}

/// Converts a frame callback's return value (seconds) to a delay.
///
/// `None` means no delay. Negative, NaN and unrepresentable values are treated
/// as zero.
pub fn delay_from_seconds(seconds: Option<f64>) -> Duration {
    let Some(seconds) = seconds else {
        return Duration::ZERO;
    };
    if seconds.is_nan() || seconds < 0.0 {
        warn!("Frame delay {} is not a positive number, using 0", seconds);
        return Duration::ZERO;
    }
    Duration::try_from_secs_f64(seconds).unwrap_or_else(|_| {
        warn!("Frame delay {} out of range, using 0", seconds);
        Duration::ZERO
    })
}

/// Fixed-rate clock standing in for the display's refresh signal.
#[derive(Debug, Clone, Copy)]
pub struct RefreshClock {
    origin: Instant,
    interval: Duration,
}

impl RefreshClock {
    /// Ticks `rate_hz` times per second, starting now.
    pub fn new(rate_hz: f64) -> Self {
        Self::with_origin(Instant::now(), rate_hz)
    }

    /// Ticks `rate_hz` times per second, with a tick at `origin`.
    pub fn with_origin(origin: Instant, rate_hz: f64) -> Self {
        let rate = if rate_hz.is_finite() && rate_hz > 0.0 {
            rate_hz
        } else {
            60.0
        };
        Self {
            origin,
            interval: Duration::from_secs_f64(1.0 / rate),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// First tick strictly after `now`.
    pub fn next_tick_after(&self, now: Instant) -> Instant {
        let elapsed = now.saturating_duration_since(self.origin).as_nanos();
        let interval = self.interval.as_nanos().max(1);
        let ticks = elapsed / interval + 1;
        let offset = u64::try_from(ticks * interval).unwrap_or(u64::MAX);
        self.origin + Duration::from_nanos(offset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_second_return_waits_500ms() {
        let mut scheduler = FrameScheduler::new();
        let delay = scheduler.frame_completed(Some(0.5));
        assert_eq!(delay, Duration::from_millis(500));
        assert_eq!(
            scheduler.phase(),
            LoopPhase::TimedWait {
                delay: Duration::from_millis(500)
            }
        );
    }

    #[test]
    fn phases_advance_in_order() {
        let mut scheduler = FrameScheduler::new();
        assert!(!scheduler.in_flight());
        assert!(!scheduler.refresh_fired());

        scheduler.frame_completed(None);
        assert!(!scheduler.refresh_fired());
        assert!(scheduler.timer_elapsed());
        assert_eq!(scheduler.phase(), LoopPhase::AwaitingRefresh);
        assert!(!scheduler.timer_elapsed());
        assert!(scheduler.refresh_fired());
        assert_eq!(scheduler.phase(), LoopPhase::Idle);
        assert_eq!(scheduler.frames(), 1);
    }

    #[test]
    fn odd_delays_become_zero() {
        assert_eq!(delay_from_seconds(None), Duration::ZERO);
        assert_eq!(delay_from_seconds(Some(0.0)), Duration::ZERO);
        assert_eq!(delay_from_seconds(Some(-1.0)), Duration::ZERO);
        assert_eq!(delay_from_seconds(Some(f64::NAN)), Duration::ZERO);
        assert_eq!(delay_from_seconds(Some(f64::INFINITY)), Duration::ZERO);
        assert_eq!(delay_from_seconds(Some(2.0)), Duration::from_secs(2));
    }

    #[test]
    fn refresh_ticks_align_to_interval() {
        let origin = Instant::now();
        let clock = RefreshClock::with_origin(origin, 100.0);
        assert_eq!(clock.interval(), Duration::from_millis(10));

        assert_eq!(clock.next_tick_after(origin), origin + Duration::from_millis(10));
        assert_eq!(
            clock.next_tick_after(origin + Duration::from_millis(13)),
            origin + Duration::from_millis(20)
        );
        assert_eq!(
            clock.next_tick_after(origin + Duration::from_millis(20)),
            origin + Duration::from_millis(30)
        );
    }
}
