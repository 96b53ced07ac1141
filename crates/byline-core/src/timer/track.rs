//! Local interpolation of a sparsely sampled server timer.

use super::model::{TimerSample, TimerStatus};
use std::time::Instant;

#[derive(Debug, Clone, Copy)]
enum TrackState {
    Idle,
    Running {
        /// Server-reported elapsed seconds at the last sample
        elapsed_at_sample: f64,
        /// Local clock anchor taken when the sample was applied
        sampled_at: Instant,
    },
    Stopped {
        elapsed_secs: f64,
    },
}

/// Interpolation state for one server timer.
///
/// Between samples, a running timer advances against the local clock:
/// the displayed value is the reported elapsed time plus however long
/// the local clock has moved since the sample was applied. A stopped
/// timer freezes at the reported duration; an idle timer reads zero.
///
/// The math is deliberately free of any timer or I/O machinery so the
/// poller's display refresh rate stays decoupled from the sampling
/// rate.
#[derive(Debug, Clone, Copy)]
pub struct TimerTrack {
    state: TrackState,
}

impl Default for TimerTrack {
    fn default() -> Self {
        Self {
            state: TrackState::Idle,
        }
    }
}

impl TimerTrack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Applies a fresh server sample, re-anchoring against `now`.
    pub fn apply_sample(&mut self, sample: &TimerSample, now: Instant) {
        self.state = match sample.status {
            TimerStatus::Running => TrackState::Running {
                elapsed_at_sample: sample.elapsed_secs,
                sampled_at: now,
            },
            TimerStatus::Stopped => TrackState::Stopped {
                elapsed_secs: sample.elapsed_secs,
            },
            TimerStatus::Idle => TrackState::Idle,
        };
    }

    /// The interpolated display value at `now`, in seconds.
    pub fn display_secs(&self, now: Instant) -> f64 {
        match self.state {
            TrackState::Idle => 0.0,
            TrackState::Running {
                elapsed_at_sample,
                sampled_at,
            } => elapsed_at_sample + now.saturating_duration_since(sampled_at).as_secs_f64(),
            TrackState::Stopped { elapsed_secs } => elapsed_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn idle_track_reads_zero() {
        let track = TimerTrack::new();
        assert_eq!(track.display_secs(Instant::now()), 0.0);
    }

    #[test]
    fn running_sample_interpolates_against_local_clock() {
        let now = Instant::now();
        let mut track = TimerTrack::new();
        track.apply_sample(&TimerSample::running(5.0), now);

        // 200ms later, with no new sample, the display has advanced
        let later = now + Duration::from_millis(200);
        let display = track.display_secs(later);
        assert!((display - 5.2).abs() < 1e-9, "got {display}");
    }

    #[test]
    fn stopped_sample_freezes_the_display() {
        let now = Instant::now();
        let mut track = TimerTrack::new();
        track.apply_sample(&TimerSample::stopped(2.5), now);

        let later = now + Duration::from_secs(10);
        assert_eq!(track.display_secs(later), 2.5);
    }

    #[test]
    fn idle_sample_resets_a_running_track() {
        let now = Instant::now();
        let mut track = TimerTrack::new();
        track.apply_sample(&TimerSample::running(5.0), now);
        track.apply_sample(&TimerSample::idle(), now + Duration::from_secs(1));

        assert_eq!(track.display_secs(now + Duration::from_secs(2)), 0.0);
    }

    #[test]
    fn fresh_sample_reanchors_the_interpolation() {
        let now = Instant::now();
        let mut track = TimerTrack::new();
        track.apply_sample(&TimerSample::running(5.0), now);

        // A later sample supersedes whatever was interpolated so far
        let resampled = now + Duration::from_secs(3);
        track.apply_sample(&TimerSample::running(6.0), resampled);

        let display = track.display_secs(resampled + Duration::from_millis(500));
        assert!((display - 6.5).abs() < 1e-9, "got {display}");
    }
}
