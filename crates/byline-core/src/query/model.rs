//! Query domain models.

use std::fmt;

/// A validated query ready for dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Free-text question, already trimmed and non-empty
    pub text: String,
    /// Name of the remote index to query against
    pub index: String,
}

impl QueryRequest {
    pub fn new(text: impl Into<String>, index: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            index: index.into(),
        }
    }
}

/// A successful answer from the remote service.
///
/// The answer body is carried verbatim; rendering it is a presentation
/// concern. The timing fields are forwarded exactly as reported by the
/// server, when present.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryAnswer {
    pub answer: String,
    pub query_time: Option<f64>,
    pub response_time: Option<f64>,
}

/// The current result of one query submission.
///
/// Exactly one outcome is current at any time; a new submission
/// replaces it, passing through `Pending` first.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum QueryOutcome {
    /// No submission has run yet (or the last one was superseded by an edit)
    #[default]
    Idle,
    /// A submission is in flight; callers may show a waiting indicator
    Pending,
    /// The service answered
    Answered {
        answer: String,
        query_time: Option<f64>,
        response_time: Option<f64>,
    },
    /// The service refused the credential; the session has been torn down
    Unauthorized,
    /// Any other failure; the session is untouched and no retry is made
    Failed { message: String },
}

impl QueryOutcome {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }
}

/// Why a submission was refused before any network call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejection {
    /// The query text was empty or whitespace-only
    EmptyQuery,
    /// A prior submission from this controller is still pending
    InFlight,
}

impl fmt::Display for SubmitRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SubmitRejection::EmptyQuery => write!(f, "Query text is empty"),
            SubmitRejection::InFlight => write!(f, "A query is already in flight"),
        }
    }
}

impl std::error::Error for SubmitRejection {}
