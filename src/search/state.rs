use std::sync::Arc;

use crate::domain::SearchResult;

/// Heartbeat messages shown while a search is in flight. They rotate on a
/// timer and do not reflect actual progress.
pub const LOADING_MESSAGES: [&str; 3] = [
    "Fetching top articles...",
    "Extracting news...",
    "Summarizing...",
];

pub const ERROR_MESSAGE: &str = "An error occurred while fetching results. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading {
        message_index: usize,
    },
    /// An empty result means the backend had nothing for the query; it is
    /// shown as "no results", not as an error.
    Success {
        result: Arc<SearchResult>,
    },
    Error {
        message: String,
    },
}

impl LifecycleState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LifecycleState::Loading { .. })
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            LifecycleState::Success { .. } | LifecycleState::Error { .. }
        )
    }

    pub fn loading_message(&self) -> Option<&'static str> {
        match self {
            LifecycleState::Loading { message_index } => {
                Some(LOADING_MESSAGES[message_index % LOADING_MESSAGES.len()])
            }
            _ => None,
        }
    }

    pub fn result(&self) -> Option<&SearchResult> {
        match self {
            LifecycleState::Success { result } => Some(result),
            _ => None,
        }
    }
}
