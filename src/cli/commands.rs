use tracing::info;

use crate::app::{AppContext, ClarityError, Result};
use crate::domain::{Category, SearchResult};
use crate::feed::{ArticleFeedProjector, FeedView};
use crate::routing::RouteParams;
use crate::search::{LifecycleState, SearchLifecycle};

/// Run one search to completion, echoing the loading messages to stderr.
pub async fn search(ctx: &AppContext, words: &[String]) -> Result<()> {
    let query = words.join(" ");
    if query.trim().is_empty() {
        return Err(ClarityError::Other("Search query must not be blank".into()));
    }

    let lifecycle = SearchLifecycle::new(ctx.api.clone(), &RouteParams::with_query(query.trim()));
    let mut rx = lifecycle.subscribe();
    let mut last_message = None;

    let state = loop {
        let state = rx.borrow_and_update().clone();
        if state.is_terminal() {
            break state;
        }
        if let Some(message) = state.loading_message() {
            if last_message != Some(message) {
                eprintln!("{}", message);
                last_message = Some(message);
            }
        }
        if rx.changed().await.is_err() {
            break lifecycle.state();
        }
    };

    match state {
        LifecycleState::Success { result } => {
            print!("{}", format_summary(query.trim(), &result));
            Ok(())
        }
        LifecycleState::Error { message } => Err(ClarityError::Other(message)),
        other => Err(ClarityError::Other(format!(
            "Search ended without a result: {:?}",
            other
        ))),
    }
}

/// Load the article feed and print the articles in one category.
pub async fn list_articles(ctx: &AppContext, category: Option<&str>) -> Result<()> {
    let feed = ArticleFeedProjector::new(ctx.api.clone());
    if let Some(name) = category {
        match Category::from_value(name) {
            Some(category) => feed.set_category(category),
            None => {
                feed.set_category_by_name(name);
            }
        }
    }

    feed.load();
    feed.settled().await;

    if let Some(e) = feed.last_error() {
        return Err(e.into());
    }

    let view = feed.visible();
    info!("Listing {} articles in {}", view.len(), view.category());
    print!("{}", format_articles(&view));
    Ok(())
}

pub fn format_summary(query: &str, result: &SearchResult) -> String {
    if result.is_empty() {
        return format!("No results found for \"{}\".\n", query);
    }

    let mut out = format!("Summarized news on \"{}\"\n\n", query);
    out.push_str(&result.display_title());
    out.push_str("\n\n");
    for paragraph in result.display_paragraphs() {
        out.push_str(&paragraph);
        out.push_str("\n\n");
    }

    if !result.related_search.is_empty() {
        out.push_str("Related Topics:\n");
        for term in &result.related_search {
            out.push_str(&format!("  - {}\n", html_escape::decode_html_entities(term)));
        }
    }
    out
}

pub fn format_articles(view: &FeedView) -> String {
    if view.is_empty() {
        return format!("No articles in {}.\n", view.category());
    }

    let mut out = format!("{} ({} articles)\n", view.category(), view.len());
    for article in view.iter() {
        out.push_str(&format!("  [{}] {}\n", article.id, article.display_title()));
    }
    out
}
