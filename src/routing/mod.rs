//! Query encoding and in-process navigation.
//!
//! The search screen never reads ambient location state: the router hands
//! out [`RouteParams`] which callers pass into the search lifecycle.

pub mod codec;
pub mod router;

pub use codec::QueryCodec;
pub use router::{AppRouter, Navigator, Route, RouteParams};
