//! Server timer sampling and display interpolation.
//!
//! The answering service tracks two timers ("query" and "response").
//! Instead of hammering the server for every display refresh, the
//! poller samples at a modest interval and interpolates a
//! continuously-advancing display value against the local clock.

mod gateway;
mod model;
mod poller;
mod track;

// Re-export public API
pub use gateway::TimerGateway;
pub use model::{TimerKind, TimerSample, TimerStatus};
pub use poller::{PollerConfig, StatusPoller, TimerDisplay};
pub use track::TimerTrack;
