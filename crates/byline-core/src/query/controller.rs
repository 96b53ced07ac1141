use super::gateway::QueryGateway;
use super::model::{QueryOutcome, QueryRequest, SubmitRejection};
use crate::error::BylineError;
use crate::session::SessionManager;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Index queried when none is configured.
pub const DEFAULT_INDEX: &str = "main";

/// One human-readable message per transient failure, never the raw error.
const TRANSIENT_MESSAGE: &str = "An error occurred. Please try again later.";

/// Accepts one query at a time and tracks its outcome.
///
/// State machine: `Idle -> Pending -> {Answered, Unauthorized, Failed}`;
/// a new submission always re-enters `Pending` before resolving. At most
/// one submission is in flight per controller instance: concurrent
/// submissions are rejected, not queued.
///
/// Remote failures never escape [`submit`](Self::submit) as errors; they
/// are classified into [`QueryOutcome`] variants and handed back as
/// data. The unauthorized path is the only place this controller
/// mutates session state, through a single
/// [`SessionManager::force_teardown`] call site.
pub struct QueryController {
    gateway: Arc<dyn QueryGateway>,
    sessions: Arc<SessionManager>,
    index: String,
    in_flight: AtomicBool,
    outcome: RwLock<QueryOutcome>,
}

impl QueryController {
    /// Creates a controller over the default index.
    pub fn new(gateway: Arc<dyn QueryGateway>, sessions: Arc<SessionManager>) -> Self {
        Self {
            gateway,
            sessions,
            index: DEFAULT_INDEX.to_string(),
            in_flight: AtomicBool::new(false),
            outcome: RwLock::new(QueryOutcome::Idle),
        }
    }

    /// Overrides the index after construction.
    pub fn with_index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    /// The current outcome. `Pending` while a submission is in flight.
    pub async fn current_outcome(&self) -> QueryOutcome {
        self.outcome.read().await.clone()
    }

    /// Submits one query.
    ///
    /// Fails fast, without any network call, when the trimmed text is
    /// empty or when a prior submission is still pending. Every entry
    /// path (button, keyboard, one-shot command, interactive loop) must
    /// funnel through here.
    pub async fn submit(
        &self,
        text: &str,
    ) -> std::result::Result<QueryOutcome, SubmitRejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(SubmitRejection::EmptyQuery);
        }
        if self.in_flight.swap(true, Ordering::SeqCst) {
            return Err(SubmitRejection::InFlight);
        }

        let outcome = self.dispatch(trimmed).await;
        self.in_flight.store(false, Ordering::SeqCst);
        Ok(outcome)
    }

    async fn dispatch(&self, text: &str) -> QueryOutcome {
        // Interim placeholder so callers can show a waiting indicator
        // before the network call resolves.
        *self.outcome.write().await = QueryOutcome::Pending;

        let token = self.sessions.current_token().await.unwrap_or_default();
        let request = QueryRequest::new(text, self.index.clone());

        let outcome = match self.gateway.query(&request, &token).await {
            Ok(answer) => {
                tracing::debug!(
                    target: "query",
                    query_time = ?answer.query_time,
                    response_time = ?answer.response_time,
                    "query answered"
                );
                QueryOutcome::Answered {
                    answer: answer.answer,
                    query_time: answer.query_time,
                    response_time: answer.response_time,
                }
            }
            Err(BylineError::Unauthorized) => {
                tracing::warn!(target: "query", "query rejected as unauthorized");
                self.sessions.force_teardown().await;
                QueryOutcome::Unauthorized
            }
            Err(err) => {
                tracing::warn!(target: "query", error = %err, "query failed");
                QueryOutcome::Failed {
                    message: TRANSIENT_MESSAGE.to_string(),
                }
            }
        };

        *self.outcome.write().await = outcome.clone();
        outcome
    }
}
