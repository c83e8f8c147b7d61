//! Retrieval state machine for a single search query.
//!
//! ```text
//! Idle --start(q)--> Loading{0} --tick/2s--> Loading{1} ... --fetch settles--> Success | Error
//!                        ^                                                           |
//!                        +------------------ start(q') / retry() -------------------+
//! ```

mod lifecycle;
mod state;

pub use lifecycle::{SearchLifecycle, MESSAGE_INTERVAL};
pub use state::{LifecycleState, ERROR_MESSAGE, LOADING_MESSAGES};
