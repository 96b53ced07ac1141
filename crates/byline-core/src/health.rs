//! Service health banner.

use crate::error::Result;
use async_trait::async_trait;

/// Health banner reported by the answering service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceHealth {
    /// Human-readable status message
    pub message: String,
    /// Name of the model currently serving answers
    pub model: String,
}

/// Remote gateway for the health banner endpoint.
#[async_trait]
pub trait HealthGateway: Send + Sync {
    async fn service_health(&self) -> Result<ServiceHealth>;
}
