//! Query dispatch gateway trait.

use super::model::{QueryAnswer, QueryRequest};
use crate::error::Result;
use async_trait::async_trait;

/// Remote gateway for query dispatch.
#[async_trait]
pub trait QueryGateway: Send + Sync {
    /// Dispatches one query carrying the current credential.
    ///
    /// # Returns
    ///
    /// - `Ok(QueryAnswer)`: 200 response with the answer body
    /// - `Err(BylineError::Unauthorized)`: the service answered 401
    /// - `Err(BylineError::Transient)`: any other failure
    async fn query(&self, request: &QueryRequest, token: &str) -> Result<QueryAnswer>;
}
