use tracing::debug;

use crate::routing::codec::{QueryCodec, QUERY_PARAM, SEARCH_PATH};

/// Anything that can be asked to move to another path.
pub trait Navigator {
    fn navigate(&mut self, path: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Search { query: String },
}

impl Route {
    /// Parse a path such as `/` or `/search?query=Global%20Warming`.
    /// Unknown paths fall back to `Home`.
    pub fn parse(path: &str) -> Self {
        let (base, query_string) = match path.split_once('?') {
            Some((base, qs)) => (base, Some(qs)),
            None => (path, None),
        };

        if base.trim_end_matches('/') != SEARCH_PATH {
            return Route::Home;
        }

        let query = query_string
            .into_iter()
            .flat_map(|qs| qs.split('&'))
            .filter_map(|pair| pair.split_once('='))
            .find(|(key, _)| *key == QUERY_PARAM)
            .map(|(_, value)| QueryCodec::decode(value))
            .unwrap_or_default();

        Route::Search { query }
    }

    pub fn params(&self) -> RouteParams {
        match self {
            Route::Home => RouteParams::default(),
            Route::Search { query } => RouteParams {
                query: Some(query.clone()),
            },
        }
    }
}

/// Snapshot of the current location's query parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
    pub query: Option<String>,
}

impl RouteParams {
    pub fn with_query(query: impl Into<String>) -> Self {
        Self {
            query: Some(query.into()),
        }
    }
}

/// In-process router with a back stack.
#[derive(Debug, Clone)]
pub struct AppRouter {
    history: Vec<Route>,
    revision: u64,
}

impl AppRouter {
    pub fn new() -> Self {
        Self::starting_at(Route::Home)
    }

    pub fn starting_at(route: Route) -> Self {
        Self {
            history: vec![route],
            revision: 0,
        }
    }

    pub fn current(&self) -> &Route {
        // history is never empty
        &self.history[self.history.len() - 1]
    }

    pub fn current_params(&self) -> RouteParams {
        self.current().params()
    }

    /// Incremented on every navigation, so callers can detect changes.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Go back one entry. Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.history.len() > 1 {
            self.history.pop();
            self.revision += 1;
            true
        } else {
            false
        }
    }
}

impl Default for AppRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator for AppRouter {
    fn navigate(&mut self, path: &str) {
        let route = Route::parse(path);
        debug!("Navigating to {} ({:?})", path, route);
        self.history.push(route);
        self.revision += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_home() {
        assert_eq!(Route::parse("/"), Route::Home);
        assert_eq!(Route::parse(""), Route::Home);
        assert_eq!(Route::parse("/unknown?query=x"), Route::Home);
    }

    #[test]
    fn test_parse_search_decodes_query() {
        assert_eq!(
            Route::parse("/search?query=Global%20Warming"),
            Route::Search {
                query: "Global Warming".into()
            }
        );
        assert_eq!(
            Route::parse("/search?page=2&query=a%26b"),
            Route::Search {
                query: "a&b".into()
            }
        );
    }

    #[test]
    fn test_parse_search_without_query() {
        assert_eq!(
            Route::parse("/search"),
            Route::Search {
                query: String::new()
            }
        );
    }

    #[test]
    fn test_navigate_and_back() {
        let mut router = AppRouter::new();
        assert_eq!(router.current_params(), RouteParams::default());

        router.navigate(&QueryCodec::search_path("Elon Musk"));
        assert_eq!(router.revision(), 1);
        assert_eq!(router.current_params(), RouteParams::with_query("Elon Musk"));

        assert!(router.back());
        assert_eq!(router.current(), &Route::Home);
        assert_eq!(router.revision(), 2);
        assert!(!router.back());
        assert_eq!(router.revision(), 2);
    }
}
