use super::gateway::TimerGateway;
use super::model::TimerKind;
use super::track::TimerTrack;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;

/// Interpolated display values for both server timers.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TimerDisplay {
    pub query_secs: f64,
    pub response_secs: f64,
}

/// Sampling and display cadence.
///
/// The sampling interval bounds the network rate; the tick interval
/// only drives local interpolation, so it can be much faster without
/// touching the server.
#[derive(Debug, Clone, Copy)]
pub struct PollerConfig {
    pub sample_interval: Duration,
    pub tick_interval: Duration,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self {
            sample_interval: Duration::from_millis(1500),
            tick_interval: Duration::from_millis(100),
        }
    }
}

#[derive(Default)]
struct Tracks {
    query: TimerTrack,
    response: TimerTrack,
}

/// Samples the server timers at a bounded rate and publishes a
/// smoothly-advancing display value.
///
/// Two tasks run independently: the sampler fetches both timers each
/// sampling interval, and the display updater publishes interpolated
/// values on every tick through a watch channel. Both tasks belong to
/// the poller and are cancelled together on
/// [`shutdown`](Self::shutdown) or drop, so no timer outlives the view
/// that owns it.
pub struct StatusPoller {
    display: watch::Receiver<TimerDisplay>,
    tasks: Vec<JoinHandle<()>>,
}

impl StatusPoller {
    /// Spawns the sampler and display tasks.
    pub fn start(gateway: Arc<dyn TimerGateway>, config: PollerConfig) -> Self {
        let (tx, rx) = watch::channel(TimerDisplay::default());
        let tracks = Arc::new(Mutex::new(Tracks::default()));

        let sampler = {
            let tracks = Arc::clone(&tracks);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(config.sample_interval);
                loop {
                    ticker.tick().await;
                    Self::sample_both(gateway.as_ref(), &tracks).await;
                }
            })
        };

        let updater = {
            let tracks = Arc::clone(&tracks);
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(config.tick_interval);
                loop {
                    ticker.tick().await;
                    let now = Instant::now();
                    let display = {
                        let tracks = tracks.lock().await;
                        TimerDisplay {
                            query_secs: tracks.query.display_secs(now),
                            response_secs: tracks.response.display_secs(now),
                        }
                    };
                    if tx.send(display).is_err() {
                        break;
                    }
                }
            })
        };

        Self {
            display: rx,
            tasks: vec![sampler, updater],
        }
    }

    async fn sample_both(gateway: &dyn TimerGateway, tracks: &Mutex<Tracks>) {
        for kind in [TimerKind::Query, TimerKind::Response] {
            match gateway.timer_sample(kind).await {
                Ok(sample) => {
                    let now = Instant::now();
                    let mut tracks = tracks.lock().await;
                    match kind {
                        TimerKind::Query => tracks.query.apply_sample(&sample, now),
                        TimerKind::Response => tracks.response.apply_sample(&sample, now),
                    }
                }
                Err(err) => {
                    // Transient: keep interpolating from the last good
                    // sample and retry on the next tick.
                    tracing::debug!(
                        target: "status_poll",
                        timer = kind.label(),
                        error = %err,
                        "timer sample failed"
                    );
                }
            }
        }
    }

    /// A receiver for the published display values.
    pub fn display(&self) -> watch::Receiver<TimerDisplay> {
        self.display.clone()
    }

    /// The most recently published display value.
    pub fn current(&self) -> TimerDisplay {
        *self.display.borrow()
    }

    /// Cancels both tasks together.
    pub fn shutdown(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for StatusPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::timer::model::TimerSample;
    use async_trait::async_trait;

    struct FixedTimerGateway {
        query: TimerSample,
        response: TimerSample,
    }

    #[async_trait]
    impl TimerGateway for FixedTimerGateway {
        async fn timer_sample(&self, timer: TimerKind) -> Result<TimerSample> {
            Ok(match timer {
                TimerKind::Query => self.query,
                TimerKind::Response => self.response,
            })
        }
    }

    fn fast_config() -> PollerConfig {
        PollerConfig {
            sample_interval: Duration::from_millis(20),
            tick_interval: Duration::from_millis(5),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn publishes_interpolated_values_for_running_timers() {
        let gateway = Arc::new(FixedTimerGateway {
            query: TimerSample::running(5.0),
            response: TimerSample::stopped(2.5),
        });
        let mut poller = StatusPoller::start(gateway, fast_config());

        tokio::time::sleep(Duration::from_millis(100)).await;

        let display = poller.current();
        assert!(display.query_secs >= 5.0, "got {}", display.query_secs);
        assert!(
            (display.response_secs - 2.5).abs() < 0.25,
            "got {}",
            display.response_secs
        );
        poller.shutdown();
    }

    #[tokio::test(start_paused = true)]
    async fn idle_timers_read_zero() {
        let gateway = Arc::new(FixedTimerGateway {
            query: TimerSample::idle(),
            response: TimerSample::idle(),
        });
        let poller = StatusPoller::start(gateway, fast_config());

        tokio::time::sleep(Duration::from_millis(100)).await;

        let display = poller.current();
        assert!(display.query_secs < 0.25, "got {}", display.query_secs);
        assert!(
            display.response_secs < 0.25,
            "got {}",
            display.response_secs
        );
    }

    #[tokio::test(start_paused = true)]
    async fn shutdown_cancels_both_tasks_together() {
        let gateway = Arc::new(FixedTimerGateway {
            query: TimerSample::running(1.0),
            response: TimerSample::running(1.0),
        });
        let mut poller = StatusPoller::start(gateway, fast_config());

        tokio::time::sleep(Duration::from_millis(50)).await;
        let mut display = poller.display();
        poller.shutdown();
        tokio::time::sleep(Duration::from_millis(50)).await;

        // The display task held the sender; cancellation closes the channel
        display.mark_unchanged();
        assert!(display.has_changed().is_err());
    }
}
