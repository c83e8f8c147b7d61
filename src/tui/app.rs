use ratatui::widgets::ListState;

use crate::domain::{Article, SearchResult};
use crate::feed::FeedView;
use crate::routing::{AppRouter, Navigator, QueryCodec, Route};

pub const PAGE_SIZE: usize = 10;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Home,
    Search,
}

pub struct TuiApp {
    pub router: AppRouter,
    pub input: String,
    pub explore_open: bool,
    pub article_index: usize,
    pub related_index: Option<usize>,
    pub trending: Vec<String>,
    pub trending_index: Option<usize>,
    pub summary_scroll: u16,
    pub spinner_tick: usize,
    pub should_quit: bool,
    pub status_message: Option<String>,
    // List states for scrolling
    pub article_list_state: ListState,
    pub related_list_state: ListState,
    pub trending_list_state: ListState,
    seen_revision: Option<u64>,
}

impl TuiApp {
    pub fn new() -> Self {
        Self::with_router(AppRouter::new())
    }

    pub fn with_router(router: AppRouter) -> Self {
        let mut article_list_state = ListState::default();
        article_list_state.select(Some(0));

        Self {
            router,
            input: String::new(),
            explore_open: false,
            article_index: 0,
            related_index: None,
            trending: Vec::new(),
            trending_index: None,
            summary_scroll: 0,
            spinner_tick: 0,
            should_quit: false,
            status_message: None,
            article_list_state,
            related_list_state: ListState::default(),
            trending_list_state: ListState::default(),
            seen_revision: None,
        }
    }

    /// Quick searches listed under the search box on the home screen.
    pub fn with_trending(mut self, trending: Vec<String>) -> Self {
        self.trending = trending;
        self
    }

    pub fn screen(&self) -> Screen {
        match self.router.current() {
            Route::Home => Screen::Home,
            Route::Search { .. } => Screen::Search,
        }
    }

    /// The route entered since the last call, if any. The first call always
    /// reports the starting route.
    pub fn take_route_change(&mut self) -> Option<Route> {
        let revision = self.router.revision();
        if self.seen_revision == Some(revision) {
            return None;
        }
        self.seen_revision = Some(revision);

        let route = self.router.current().clone();
        match &route {
            Route::Home => {
                self.input.clear();
                self.select_trending(None);
            }
            Route::Search { query } => {
                self.input = query.clone();
                self.explore_open = false;
                self.summary_scroll = 0;
                self.select_related(None);
                self.select_trending(None);
            }
        }
        Some(route)
    }

    /// Act on the Enter key. Returns true if a navigation happened.
    ///
    /// An open drawer searches for the selected article's title, a selected
    /// related topic or trending search goes to that query, otherwise the
    /// typed query is submitted. Blank input does nothing.
    pub fn submit(&mut self, feed: &FeedView, result: Option<&SearchResult>) -> bool {
        if self.explore_open {
            let title = match self.selected_article(feed) {
                Some(article) => article.display_title().into_owned(),
                None => return false,
            };
            return self.search_for(&title);
        }

        if let Some(term) = self.selected_trending() {
            let term = term.to_string();
            return self.search_for(&term);
        }

        if let Some(term) = self.selected_related(result) {
            let term = term.to_string();
            self.input = term.clone();
            return self.search_for(&term);
        }

        let query = self.input.trim().to_string();
        self.search_for(&query)
    }

    fn search_for(&mut self, query: &str) -> bool {
        if query.trim().is_empty() {
            return false;
        }
        self.router.navigate(&QueryCodec::search_path(query));
        true
    }

    /// Close the drawer, or step back through history.
    pub fn back(&mut self) -> bool {
        if self.explore_open {
            self.explore_open = false;
            return true;
        }
        self.router.back()
    }

    pub fn toggle_explore(&mut self) {
        if self.screen() == Screen::Home {
            self.explore_open = !self.explore_open;
        }
    }

    pub fn selected_article<'a>(&self, feed: &'a FeedView) -> Option<&'a Article> {
        feed.get(self.article_index)
    }

    pub fn selected_related<'a>(&self, result: Option<&'a SearchResult>) -> Option<&'a str> {
        let index = self.related_index?;
        result?.related_search.get(index).map(String::as_str)
    }

    pub fn selected_trending(&self) -> Option<&str> {
        self.trending
            .get(self.trending_index?)
            .map(String::as_str)
    }

    pub fn move_up(&mut self) {
        if self.explore_open {
            self.select_article(self.article_index.saturating_sub(1));
            return;
        }
        match self.screen() {
            Screen::Search => self.select_related(step_up(self.related_index)),
            Screen::Home => self.select_trending(step_up(self.trending_index)),
        }
    }

    pub fn move_down(&mut self, article_count: usize, related_count: usize) {
        if self.explore_open {
            if article_count > 0 && self.article_index < article_count - 1 {
                self.select_article(self.article_index + 1);
            }
        } else if self.screen() == Screen::Search {
            self.select_related(step_down(self.related_index, related_count));
        } else {
            self.select_trending(step_down(self.trending_index, self.trending.len()));
        }
    }

    pub fn page_up(&mut self) {
        if self.explore_open {
            self.select_article(self.article_index.saturating_sub(PAGE_SIZE));
        } else {
            self.summary_scroll = self.summary_scroll.saturating_sub(PAGE_SIZE as u16);
        }
    }

    pub fn page_down(&mut self, article_count: usize) {
        if self.explore_open {
            if article_count > 0 {
                let target = (self.article_index + PAGE_SIZE).min(article_count - 1);
                self.select_article(target);
            }
        } else {
            self.summary_scroll = self.summary_scroll.saturating_add(PAGE_SIZE as u16);
        }
    }

    /// Keep the article cursor inside a list that may have shrunk.
    pub fn clamp_article(&mut self, article_count: usize) {
        let max = article_count.saturating_sub(1);
        if self.article_index > max {
            self.select_article(max);
        }
    }

    pub fn reset_article_selection(&mut self) {
        self.select_article(0);
    }

    fn select_article(&mut self, index: usize) {
        self.article_index = index;
        self.article_list_state.select(Some(index));
    }

    fn select_related(&mut self, index: Option<usize>) {
        self.related_index = index;
        self.related_list_state.select(index);
    }

    fn select_trending(&mut self, index: Option<usize>) {
        self.trending_index = index;
        self.trending_list_state.select(index);
    }

    pub fn push_char(&mut self, c: char) {
        self.input.push(c);
        self.focus_input();
    }

    pub fn delete_char(&mut self) {
        self.input.pop();
        self.focus_input();
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.focus_input();
    }

    /// Whether keystrokes go to the search box rather than a list.
    pub fn input_focused(&self) -> bool {
        !self.explore_open && self.related_index.is_none() && self.trending_index.is_none()
    }

    fn focus_input(&mut self) {
        self.select_related(None);
        self.select_trending(None);
    }

    pub fn on_tick(&mut self) {
        self.spinner_tick = self.spinner_tick.wrapping_add(1);
    }

    pub fn spinner(&self) -> &'static str {
        SPINNER_FRAMES[self.spinner_tick % SPINNER_FRAMES.len()]
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Moving up from the first entry returns focus to the search box.
fn step_up(index: Option<usize>) -> Option<usize> {
    match index {
        Some(0) | None => None,
        Some(i) => Some(i - 1),
    }
}

fn step_down(index: Option<usize>, count: usize) -> Option<usize> {
    if count == 0 {
        return None;
    }
    Some(index.map_or(0, |i| (i + 1).min(count - 1)))
}

impl Default for TuiApp {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ArticleId, Category};
    use std::sync::Arc;

    fn feed(titles: &[&str]) -> FeedView {
        let articles: Vec<Article> = titles
            .iter()
            .enumerate()
            .map(|(i, title)| Article {
                id: ArticleId::new(i.to_string()),
                title: title.to_string(),
                img_url: String::new(),
                category: "top".to_string(),
            })
            .collect();
        FeedView::new(Arc::from(articles), Category::Top)
    }

    fn result_with_related(related: &[&str]) -> SearchResult {
        SearchResult {
            title: "Summary".into(),
            content: vec!["Body".into()],
            related_search: related.iter().map(|s| s.to_string()).collect(),
        }
    }

    fn typed(app: &mut TuiApp, text: &str) {
        for c in text.chars() {
            app.push_char(c);
        }
    }

    #[test]
    fn test_first_route_change_reports_start() {
        let mut app = TuiApp::new();
        assert_eq!(app.take_route_change(), Some(Route::Home));
        assert_eq!(app.take_route_change(), None);
    }

    #[test]
    fn test_submit_navigates_to_encoded_search() {
        let mut app = TuiApp::new();
        app.take_route_change();
        typed(&mut app, "  Global Warming ");

        assert!(app.submit(&feed(&[]), None));
        assert_eq!(
            app.take_route_change(),
            Some(Route::Search {
                query: "Global Warming".into()
            })
        );
        assert_eq!(app.screen(), Screen::Search);
        assert_eq!(app.input, "Global Warming");
    }

    #[test]
    fn test_blank_submit_is_ignored() {
        let mut app = TuiApp::new();
        app.take_route_change();
        typed(&mut app, "   ");

        assert!(!app.submit(&feed(&[]), None));
        assert_eq!(app.take_route_change(), None);
        assert_eq!(app.screen(), Screen::Home);
    }

    #[test]
    fn test_submit_from_drawer_searches_article_title() {
        let mut app = TuiApp::new();
        app.toggle_explore();
        let view = feed(&["First", "Rates &amp; Bonds"]);
        app.move_down(view.len(), 0);

        assert!(app.submit(&view, None));
        assert_eq!(
            app.router.current(),
            &Route::Search {
                query: "Rates & Bonds".into()
            }
        );
        app.take_route_change();
        assert!(!app.explore_open);
    }

    #[test]
    fn test_related_topic_selection_and_submit() {
        let mut app = TuiApp::with_router(AppRouter::starting_at(Route::Search {
            query: "Economy".into(),
        }));
        app.take_route_change();
        let result = result_with_related(&["Inflation", "Interest Rates"]);

        app.move_down(0, 2);
        app.move_down(0, 2);
        app.move_down(0, 2);
        assert_eq!(app.related_index, Some(1));
        assert_eq!(app.selected_related(Some(&result)), Some("Interest Rates"));

        assert!(app.submit(&feed(&[]), Some(&result)));
        app.take_route_change();
        assert_eq!(app.input, "Interest Rates");
        assert_eq!(app.related_index, None);
    }

    #[test]
    fn test_typing_clears_related_selection() {
        let mut app = TuiApp::with_router(AppRouter::starting_at(Route::Search {
            query: "Economy".into(),
        }));
        app.take_route_change();
        app.move_down(0, 3);
        assert_eq!(app.related_index, Some(0));

        app.push_char('s');
        assert_eq!(app.related_index, None);
        assert_eq!(app.input, "Economys");

        app.move_down(0, 3);
        app.move_up();
        assert_eq!(app.related_index, None);
    }

    #[test]
    fn test_back_closes_drawer_before_history() {
        let mut app = TuiApp::new();
        typed(&mut app, "ai");
        app.submit(&feed(&[]), None);
        app.take_route_change();

        app.toggle_explore();
        assert!(!app.explore_open, "drawer only opens on the home screen");

        assert!(app.back());
        assert_eq!(app.take_route_change(), Some(Route::Home));
        assert!(app.input.is_empty());

        app.toggle_explore();
        assert!(app.back());
        assert!(!app.explore_open);
        assert!(!app.back());
    }

    #[test]
    fn test_article_paging_is_clamped() {
        let mut app = TuiApp::new();
        app.toggle_explore();

        app.page_down(15);
        assert_eq!(app.article_index, 10);
        app.page_down(15);
        assert_eq!(app.article_index, 14);
        app.page_up();
        assert_eq!(app.article_index, 4);

        app.clamp_article(2);
        assert_eq!(app.article_index, 1);
        assert_eq!(app.article_list_state.selected(), Some(1));
    }

    #[test]
    fn test_spinner_cycles() {
        let mut app = TuiApp::new();
        let first = app.spinner();
        for _ in 0..SPINNER_FRAMES.len() {
            app.on_tick();
        }
        assert_eq!(app.spinner(), first);
    }

    #[test]
    fn test_trending_selection_navigates() {
        let mut app = TuiApp::new().with_trending(vec![
            "Trump reclassifies 50,000 federal worker...".to_string(),
            "elon musk says AI will transform humanity...".to_string(),
        ]);
        app.take_route_change();
        assert!(app.input_focused());

        app.move_down(0, 0);
        app.move_down(0, 0);
        app.move_down(0, 0);
        assert_eq!(app.trending_index, Some(1));
        assert!(!app.input_focused());

        assert!(app.submit(&feed(&[]), None));
        assert_eq!(
            app.router.current(),
            &Route::parse(&QueryCodec::search_path(
                "elon musk says AI will transform humanity..."
            ))
        );
        assert_eq!(
            app.take_route_change(),
            Some(Route::Search {
                query: "elon musk says AI will transform humanity...".into()
            })
        );
        assert_eq!(app.trending_index, None);
    }

    #[test]
    fn test_typing_returns_focus_from_trending() {
        let mut app = TuiApp::new().with_trending(vec!["Markets".to_string()]);
        app.take_route_change();
        app.move_down(0, 0);
        assert_eq!(app.selected_trending(), Some("Markets"));

        app.move_up();
        assert!(app.input_focused());

        app.move_down(0, 0);
        typed(&mut app, "ai");
        assert!(app.input_focused());
        assert!(app.submit(&feed(&[]), None));
        assert_eq!(
            app.router.current(),
            &Route::Search { query: "ai".into() }
        );
    }

    #[test]
    fn test_no_trending_keeps_input_focus() {
        let mut app = TuiApp::new();
        app.take_route_change();
        app.move_down(0, 0);
        assert!(app.input_focused());
        assert_eq!(app.selected_trending(), None);
    }
}
