//! Timer domain models.

/// The two independently tracked server-side timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Time spent querying the index
    Query,
    /// Time spent generating the response
    Response,
}

impl TimerKind {
    pub fn label(&self) -> &'static str {
        match self {
            TimerKind::Query => "query",
            TimerKind::Response => "response",
        }
    }
}

/// Reported state of one server timer.
///
/// Anything the server reports outside "running"/"stopped" maps to
/// `Idle`, which resets the display to zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimerStatus {
    #[default]
    Idle,
    Running,
    Stopped,
}

/// One sample of a server timer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimerSample {
    pub status: TimerStatus,
    /// Elapsed seconds as reported by the server at sampling time
    pub elapsed_secs: f64,
}

impl TimerSample {
    pub fn idle() -> Self {
        Self {
            status: TimerStatus::Idle,
            elapsed_secs: 0.0,
        }
    }

    pub fn running(elapsed_secs: f64) -> Self {
        Self {
            status: TimerStatus::Running,
            elapsed_secs,
        }
    }

    pub fn stopped(elapsed_secs: f64) -> Self {
        Self {
            status: TimerStatus::Stopped,
            elapsed_secs,
        }
    }
}
