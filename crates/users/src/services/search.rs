//! User search with an observable loading state.

use chatsync_api::{ApiError, ApiResult, AuthToken, ChatApi, OperationStatus, User};
use tracing::{debug, warn};

use crate::types::{SearchTicket, UserError, UserResult};

/// Search state as seen by presentation.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SearchState {
    #[default]
    Idle,
    Loading {
        query: String,
        ticket: SearchTicket,
    },
    Ready {
        query: String,
        results: Vec<User>,
    },
    Failed {
        query: String,
        error: ApiError,
    },
}

/// Queries the remote directory for users matching a text fragment.
///
/// Searches are split into [`begin`](Self::begin) and
/// [`complete`](Self::complete) so overlapping requests can be issued; only
/// the result for the most recent ticket is ever applied.
#[derive(Debug)]
pub struct UserSearchController {
    state: SearchState,
    issued: u64,
    max_results: usize,
}

impl Default for UserSearchController {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}

impl UserSearchController {
    pub fn new(max_results: usize) -> Self {
        Self {
            state: SearchState::Idle,
            issued: 0,
            max_results,
        }
    }

    pub fn state(&self) -> &SearchState {
        &self.state
    }

    /// The search state as the shared operation signal.
    pub fn status(&self) -> OperationStatus<ApiError> {
        match &self.state {
            SearchState::Idle => OperationStatus::Idle,
            SearchState::Loading { .. } => OperationStatus::Pending,
            SearchState::Ready { .. } => OperationStatus::Succeeded,
            SearchState::Failed { error, .. } => OperationStatus::Failed(error.clone()),
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SearchState::Loading { .. })
    }

    /// Results of the last successful search, empty otherwise.
    pub fn results(&self) -> &[User] {
        match &self.state {
            SearchState::Ready { results, .. } => results,
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&ApiError> {
        match &self.state {
            SearchState::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    /// Validate `query` and enter `Loading`.
    ///
    /// An empty (or whitespace-only) query fails without touching state.
    pub fn begin(&mut self, query: &str) -> UserResult<SearchTicket> {
        let query = query.trim();
        if query.is_empty() {
            debug!("rejecting empty user search");
            return Err(UserError::validation("Search query cannot be empty"));
        }

        self.issued += 1;
        let ticket = SearchTicket(self.issued);
        self.state = SearchState::Loading {
            query: query.to_string(),
            ticket,
        };
        debug!(query, ticket = ticket.0, "user search started");
        Ok(ticket)
    }

    /// Apply the outcome of the search identified by `ticket`.
    ///
    /// Returns `false` when the ticket has been superseded (or the search was
    /// reset) and the outcome was dropped.
    pub fn complete(&mut self, ticket: SearchTicket, outcome: ApiResult<Vec<User>>) -> bool {
        let query = match &self.state {
            SearchState::Loading { query, ticket: current } if *current == ticket => query.clone(),
            _ => {
                debug!(ticket = ticket.0, "discarding stale user search result");
                return false;
            }
        };

        self.state = match outcome {
            Ok(mut results) => {
                results.truncate(self.max_results);
                debug!(query, count = results.len(), "user search ready");
                SearchState::Ready { query, results }
            }
            Err(error) => {
                warn!(query, %error, "user search failed");
                SearchState::Failed { query, error }
            }
        };
        true
    }

    /// Run a complete search against `api`.
    pub async fn search(
        &mut self,
        api: &dyn ChatApi,
        token: &AuthToken,
        query: &str,
    ) -> UserResult<&[User]> {
        let ticket = self.begin(query)?;
        let outcome = api.search_users(token, query.trim()).await;
        let failure = outcome.as_ref().err().cloned();

        self.complete(ticket, outcome);

        match failure {
            Some(err) => Err(err.into()),
            None => Ok(self.results()),
        }
    }

    /// Back to `Idle`; any in-flight result will be discarded.
    pub fn reset(&mut self) {
        self.state = SearchState::Idle;
    }
}
