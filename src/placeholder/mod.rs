//! Typewriter-style animated placeholder for the search input.
//!
//! [`PlaceholderCycler`] is the pure, restartable frame sequence;
//! [`PlaceholderAnimator`] plays it back on a single rescheduled timer.

mod animator;
mod cycler;

pub use animator::PlaceholderAnimator;
pub use cycler::{PlaceholderCycler, PlaceholderFrame, PlaceholderState, PlaceholderTiming};
