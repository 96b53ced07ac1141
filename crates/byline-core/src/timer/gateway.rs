//! Timer sampling gateway trait.

use super::model::{TimerKind, TimerSample};
use crate::error::Result;
use async_trait::async_trait;

/// Remote gateway for the server timer endpoints.
#[async_trait]
pub trait TimerGateway: Send + Sync {
    /// Fetches the current state of one server timer.
    async fn timer_sample(&self, timer: TimerKind) -> Result<TimerSample>;
}
