//! Pre-fetched article feed with a category projection.

mod projector;

pub use projector::{ArticleFeedProjector, FeedView};
