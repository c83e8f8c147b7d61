pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, warn};

use crate::app::{AppContext, Result};
use crate::feed::ArticleFeedProjector;
use crate::placeholder::PlaceholderAnimator;
use crate::routing::Route;
use crate::search::{LifecycleState, SearchLifecycle};

use self::app::{Screen, TuiApp};
use self::event::{Action, AppEvent, EventHandler};
use self::layout::Snapshot;

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

/// Background components owned by the screen loop. The search lifecycle
/// exists only while the search screen is shown.
struct Screens {
    placeholder: PlaceholderAnimator,
    feed: ArticleFeedProjector,
    search: Option<SearchLifecycle>,
}

impl Screens {
    fn snapshot(&self) -> Snapshot {
        Snapshot {
            placeholder: self.placeholder.current(),
            search: self
                .search
                .as_ref()
                .map(SearchLifecycle::state)
                .unwrap_or_default(),
            feed: self.feed.visible(),
            feed_loading: self.feed.is_loading(),
            feed_failed: self.feed.last_error().is_some(),
        }
    }

    fn enter(&mut self, route: &Route, ctx: &AppContext) {
        match route {
            Route::Home => {
                self.search = None;
                self.placeholder.restart();
            }
            Route::Search { .. } => {
                self.placeholder.stop();
                let params = route.params();
                match &self.search {
                    Some(search) => {
                        search.sync(&params);
                    }
                    None => {
                        self.search = Some(SearchLifecycle::new(ctx.api.clone(), &params));
                    }
                }
            }
        }
    }

    fn shutdown(&mut self) {
        self.placeholder.stop();
        if let Some(search) = self.search.take() {
            search.shutdown();
        }
    }
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>) -> Result<()> {
    let mut tui_app = TuiApp::new().with_trending(ctx.config.home.trending.clone());
    let event_handler = EventHandler::new(Duration::from_millis(50));

    let mut screens = Screens {
        placeholder: PlaceholderAnimator::new(ctx.config.placeholder.cycler()?),
        feed: ArticleFeedProjector::new(ctx.api.clone()),
        search: None,
    };
    screens.feed.load();

    let result: Result<()> = loop {
        if let Some(route) = tui_app.take_route_change() {
            debug!("Entering {:?}", route);
            screens.enter(&route, &ctx);
        }

        let snapshot = screens.snapshot();
        tui_app.clamp_article(snapshot.feed.len());

        if let Err(e) =
            terminal.draw(|frame| layout::render(frame, &mut tui_app, &snapshot, &ctx.config))
        {
            break Err(e.into());
        }

        let event = match event_handler.next() {
            Ok(event) => event,
            Err(e) => break Err(e),
        };

        match event {
            AppEvent::Key(key) => {
                tui_app.clear_status();
                let action = ctx.config.keybindings.get_action(&key);
                handle_action(action, &mut tui_app, &screens, &snapshot);
            }
            AppEvent::Tick => {
                tui_app.on_tick();
            }
        }

        if tui_app.should_quit {
            break Ok(());
        }
    };

    screens.shutdown();
    result
}

fn handle_action(action: Action, tui_app: &mut TuiApp, screens: &Screens, snapshot: &Snapshot) {
    let article_count = snapshot.feed.len();
    let related_count = snapshot
        .search
        .result()
        .map_or(0, |result| result.related_search.len());

    match action {
        Action::Quit => {
            tui_app.should_quit = true;
        }
        Action::Back => {
            tui_app.back();
        }
        Action::Submit => {
            tui_app.submit(&snapshot.feed, snapshot.search.result());
        }
        Action::ToggleExplore => {
            tui_app.toggle_explore();
        }
        Action::NextCategory | Action::PrevCategory if tui_app.explore_open => {
            let current = screens.feed.category();
            let category = if action == Action::NextCategory {
                current.next()
            } else {
                current.prev()
            };
            screens.feed.set_category(category);
            tui_app.reset_article_selection();
        }
        Action::NextCategory | Action::PrevCategory => {}
        Action::MoveUp => {
            tui_app.move_up();
        }
        Action::MoveDown => {
            tui_app.move_down(article_count, related_count);
        }
        Action::PageUp => {
            tui_app.page_up();
        }
        Action::PageDown => {
            tui_app.page_down(article_count);
        }
        Action::Retry => match tui_app.screen() {
            Screen::Search => {
                let retried = screens
                    .search
                    .as_ref()
                    .is_some_and(|search| {
                        matches!(search.state(), LifecycleState::Error { .. }) && search.retry()
                    });
                if retried {
                    tui_app.set_status("Retrying...".to_string());
                }
            }
            Screen::Home => {
                if !screens.feed.is_loading() {
                    screens.feed.load();
                    tui_app.set_status("Reloading articles...".to_string());
                }
            }
        },
        Action::OpenImage => {
            if !tui_app.explore_open {
                return;
            }
            let img_url = tui_app
                .selected_article(&snapshot.feed)
                .map(|article| article.img_url.clone());
            match img_url {
                Some(url) if !url.is_empty() => {
                    if let Err(e) = open::that(&url) {
                        warn!("Failed to open {}: {}", url, e);
                        tui_app.set_status(format!("Failed to open image: {}", e));
                    }
                }
                Some(_) => tui_app.set_status("Article has no image".to_string()),
                None => {}
            }
        }
        Action::DeleteChar => {
            tui_app.delete_char();
        }
        Action::ClearInput => {
            tui_app.clear_input();
        }
        Action::Input(c) => {
            if !tui_app.explore_open {
                tui_app.push_char(c);
            }
        }
        Action::None => {}
    }
}
