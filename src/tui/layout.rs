use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame,
};

use crate::config::{ColorConfig, Config};
use crate::domain::{Category, SearchResult};
use crate::feed::FeedView;
use crate::search::LifecycleState;
use crate::tui::app::{Screen, TuiApp};

const BANNER: &str = "C L A R I T Y";
const TAGLINE: &str = "World news just a search away...";

/// Everything the frame needs from the background components, captured
/// once per draw.
pub struct Snapshot {
    pub placeholder: String,
    pub search: LifecycleState,
    pub feed: FeedView,
    pub feed_loading: bool,
    pub feed_failed: bool,
}

pub fn render(frame: &mut Frame, app: &mut TuiApp, snapshot: &Snapshot, config: &Config) {
    match app.screen() {
        Screen::Home => render_home(frame, app, snapshot, config),
        Screen::Search => render_search(frame, app, snapshot, config),
    }
}

fn render_home(frame: &mut Frame, app: &mut TuiApp, snapshot: &Snapshot, config: &Config) {
    let colors = &config.colors;
    let top = if app.explore_open {
        Constraint::Length(1)
    } else {
        Constraint::Percentage(30)
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            top,
            Constraint::Length(2), // Banner and tagline
            Constraint::Length(3), // Search box
            Constraint::Min(0),    // Drawer or hint
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let banner = Text::from(vec![
        Line::from(Span::styled(
            BANNER,
            Style::default()
                .fg(colors.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(TAGLINE, Style::default().fg(colors.muted))),
    ]);
    frame.render_widget(
        Paragraph::new(banner).alignment(Alignment::Center),
        chunks[1],
    );

    render_input(frame, app, &snapshot.placeholder, " Search ", chunks[2], colors);

    if app.explore_open {
        render_drawer(frame, app, snapshot, chunks[3], colors);
    } else {
        let trending_height = if app.trending.is_empty() {
            0
        } else {
            app.trending.len() as u16 + 2
        };
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(trending_height), // Trending searches
                Constraint::Min(0),                  // Hint
            ])
            .split(chunks[3]);

        render_trending(frame, app, rows[0], colors);

        let hint = Paragraph::new(Span::styled(
            "Press Tab to explore today's articles",
            Style::default().fg(colors.muted),
        ))
        .alignment(Alignment::Center);
        frame.render_widget(hint, rows[1]);
    }

    render_status_bar(frame, app, chunks[4], colors);
}

fn render_input(
    frame: &mut Frame,
    app: &TuiApp,
    placeholder: &str,
    title: &str,
    area: Rect,
    colors: &ColorConfig,
) {
    let focused = app.input_focused();
    let border_style = if focused {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    };

    let content = if app.input.is_empty() {
        Span::styled(placeholder.to_string(), Style::default().fg(colors.muted))
    } else {
        Span::styled(app.input.clone(), Style::default().fg(colors.text))
    };

    let block = Block::default()
        .title(title.to_string())
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(content).block(block), area);

    if focused {
        let offset = app.input.chars().count() as u16;
        let x = (area.x + 1 + offset).min(area.right().saturating_sub(2));
        frame.set_cursor_position((x, area.y + 1));
    }
}

fn render_trending(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    if app.trending.is_empty() {
        return;
    }

    let border_style = if app.trending_index.is_some() {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    };

    let items: Vec<ListItem> = app
        .trending
        .iter()
        .map(|term| ListItem::new(term.clone()).style(Style::default().fg(colors.related_topic)))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Trending ")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.trending_list_state);
}

fn render_drawer(
    frame: &mut Frame,
    app: &mut TuiApp,
    snapshot: &Snapshot,
    area: Rect,
    colors: &ColorConfig,
) {
    let block = Block::default()
        .title(" Discover News ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors.active_border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Category tabs
            Constraint::Length(1),
            Constraint::Min(0), // Articles
        ])
        .split(inner);

    let category = snapshot.feed.category();
    let tabs = Tabs::new(Category::ALL.iter().map(|c| c.display_name()))
        .select(category.index())
        .style(Style::default().fg(colors.inactive_category))
        .highlight_style(
            Style::default()
                .fg(colors.active_category)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
        )
        .divider("|");
    frame.render_widget(tabs, chunks[0]);

    if snapshot.feed.is_empty() {
        let message = if snapshot.feed_loading {
            Span::styled(
                format!("{} Loading articles...", app.spinner()),
                Style::default().fg(colors.muted),
            )
        } else if snapshot.feed_failed {
            Span::styled(
                "Could not load articles.",
                Style::default().fg(colors.error),
            )
        } else {
            Span::styled(
                format!("No articles in {}.", category),
                Style::default().fg(colors.muted),
            )
        };
        frame.render_widget(
            Paragraph::new(message).alignment(Alignment::Center),
            chunks[2],
        );
        return;
    }

    let items: Vec<ListItem> = snapshot
        .feed
        .iter()
        .map(|article| {
            ListItem::new(article.display_title().into_owned())
                .style(Style::default().fg(colors.text))
        })
        .collect();

    let list = List::new(items)
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[2], &mut app.article_list_state);
}

fn render_search(frame: &mut Frame, app: &mut TuiApp, snapshot: &Snapshot, config: &Config) {
    let colors = &config.colors;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search box
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let query = app.router.current_params().query.unwrap_or_default();
    let title = format!(" Summarized news on \"{}\" ", query);
    render_input(frame, app, "", &title, chunks[0], colors);

    match &snapshot.search {
        LifecycleState::Idle => {
            render_centered(
                frame,
                chunks[1],
                vec![Line::from(Span::styled(
                    "Type a query and press Enter.",
                    Style::default().fg(colors.muted),
                ))],
            );
        }
        LifecycleState::Loading { .. } => {
            let message = snapshot.search.loading_message().unwrap_or_default();
            render_centered(
                frame,
                chunks[1],
                vec![Line::from(Span::styled(
                    format!("{} {}", app.spinner(), message),
                    Style::default().fg(colors.text),
                ))],
            );
        }
        LifecycleState::Error { message } => {
            let retry = config
                .keybindings
                .retry
                .first()
                .map(String::as_str)
                .unwrap_or("retry");
            render_centered(
                frame,
                chunks[1],
                vec![
                    Line::from(Span::styled(
                        message.clone(),
                        Style::default().fg(colors.error),
                    )),
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("[ Try Again ] ({})", retry),
                        Style::default()
                            .fg(colors.active_border)
                            .add_modifier(Modifier::BOLD),
                    )),
                ],
            );
        }
        LifecycleState::Success { result } if result.is_empty() => {
            render_centered(
                frame,
                chunks[1],
                vec![Line::from(Span::styled(
                    format!("No results found for \"{}\".", query),
                    Style::default().fg(colors.muted),
                ))],
            );
        }
        LifecycleState::Success { result } => {
            render_result(frame, app, result, chunks[1], colors);
        }
    }

    render_status_bar(frame, app, chunks[2], colors);
}

fn render_centered(frame: &mut Frame, area: Rect, lines: Vec<Line>) {
    let top = area.height.saturating_sub(wrapped_height(&lines, area.width)) / 2;
    // Runs to the bottom of the area so wrapped text is never cut off.
    let target = Rect {
        y: area.y + top,
        height: area.height - top,
        ..area
    };
    frame.render_widget(
        Paragraph::new(Text::from(lines))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        target,
    );
}

/// Rows the lines need once wrapped to `width` columns.
fn wrapped_height(lines: &[Line], width: u16) -> u16 {
    let width = usize::from(width.max(1));
    let rows: usize = lines
        .iter()
        .map(|line| line.width().div_ceil(width).max(1))
        .sum();
    u16::try_from(rows).unwrap_or(u16::MAX)
}

fn render_result(
    frame: &mut Frame,
    app: &mut TuiApp,
    result: &SearchResult,
    area: Rect,
    colors: &ColorConfig,
) {
    let show_related = !result.related_search.is_empty();
    let constraints = if show_related {
        [Constraint::Percentage(70), Constraint::Percentage(30)]
    } else {
        [Constraint::Percentage(100), Constraint::Length(0)]
    };
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    let mut lines = vec![
        Line::from(Span::styled(
            result.display_title().into_owned(),
            Style::default()
                .fg(colors.title)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    for paragraph in result.display_paragraphs() {
        lines.push(Line::from(Span::styled(
            paragraph.into_owned(),
            Style::default().fg(colors.text),
        )));
        lines.push(Line::from(""));
    }

    let summary = Paragraph::new(Text::from(lines))
        .block(
            Block::default()
                .title(" Summary ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors.inactive_border)),
        )
        .wrap(Wrap { trim: false })
        .scroll((app.summary_scroll, 0));
    frame.render_widget(summary, chunks[0]);

    if !show_related {
        return;
    }

    let border_style = if app.related_index.is_some() {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    };

    let items: Vec<ListItem> = result
        .related_search
        .iter()
        .map(|term| {
            ListItem::new(html_escape::decode_html_entities(term).into_owned())
                .style(Style::default().fg(colors.related_topic))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .title(" Related Topics ")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(colors.selection_bg)
                .fg(colors.selection_fg)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, chunks[1], &mut app.related_list_state);
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if let Some(ref msg) = app.status_message {
        msg.clone()
    } else {
        match app.screen() {
            Screen::Home if app.explore_open => {
                "Up/Down:Select  Left/Right:Category  Enter:Search title  Ctrl+o:Image  Esc:Close"
                    .to_string()
            }
            Screen::Home => "Enter:Search  Up/Down:Trending  Tab:Explore  Ctrl+c:Quit".to_string(),
            Screen::Search => {
                "Enter:Search  Up/Down:Related  PgUp/PgDn:Scroll  Ctrl+r:Retry  Esc:Back  Ctrl+c:Quit"
                    .to_string()
            }
        }
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Article;
    use crate::routing::{AppRouter, Route};
    use ratatui::{backend::TestBackend, Terminal};
    use std::sync::Arc;

    fn snapshot(search: LifecycleState) -> Snapshot {
        let articles: Arc<[Article]> = Arc::from(Vec::new());
        Snapshot {
            placeholder: "Find news about...".into(),
            search,
            feed: FeedView::new(articles, Category::Top),
            feed_loading: false,
            feed_failed: false,
        }
    }

    fn draw(width: u16, height: u16, app: &mut TuiApp, snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal
            .draw(|frame| render(frame, app, snapshot, &Config::default()))
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_wrapped_height() {
        let lines = vec![Line::from("x".repeat(59)), Line::from(""), Line::from("abc")];
        assert_eq!(wrapped_height(&lines, 80), 3);
        assert_eq!(wrapped_height(&lines, 30), 4);
        assert_eq!(wrapped_height(&lines, 0), 63);
    }

    #[test]
    fn test_retry_hint_survives_narrow_terminal() {
        let mut app = TuiApp::with_router(AppRouter::starting_at(Route::Search {
            query: "economy".into(),
        }));
        app.take_route_change();
        let error = snapshot(LifecycleState::Error {
            message: crate::search::ERROR_MESSAGE.to_string(),
        });

        let screen = draw(30, 14, &mut app, &error);
        assert!(screen.contains("Try Again"), "{}", screen);
    }

    #[test]
    fn test_home_shows_placeholder_when_input_empty() {
        let mut app = TuiApp::new();
        app.take_route_change();
        let screen = draw(60, 20, &mut app, &snapshot(LifecycleState::Idle));
        assert!(screen.contains("C L A R I T Y"));
        assert!(screen.contains("Find news about..."));
    }

    #[test]
    fn test_home_lists_trending_searches() {
        let mut app = TuiApp::new().with_trending(vec!["Markets rally".to_string()]);
        app.take_route_change();
        let screen = draw(60, 24, &mut app, &snapshot(LifecycleState::Idle));
        assert!(screen.contains("Trending"));
        assert!(screen.contains("Markets rally"));
    }
}
