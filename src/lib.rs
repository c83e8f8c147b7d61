//! # Clarity
//!
//! A terminal client for a news search and summarization backend.
//!
//! ## Architecture
//!
//! ```text
//! UI intents → Router → SearchLifecycle ─┐
//!                                        ├→ NewsApi (HTTP)
//!              ArticleFeedProjector ─────┘
//! PlaceholderAnimator → Scheduler
//! ```
//!
//! The core components own all timing and state; the [`tui`] layer only
//! renders their snapshots and forwards key presses.
//!
//! ## Quick Start
//!
//! ```bash
//! # Launch the TUI
//! clarity
//!
//! # One-shot search
//! clarity search global warming
//!
//! # List articles in a category
//! clarity articles --category Finance
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires the backend client to
/// the loaded configuration.
pub mod app;

/// Backend access.
///
/// - [`NewsApi`](api::NewsApi): Async trait for the article and search endpoints
/// - [`HttpNewsApi`](api::HttpNewsApi): reqwest-based implementation
pub mod api;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `search <query...>` - Print a summary
/// - `articles [--category]` - List articles
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/clarity/config.toml`, supporting:
/// - Backend URL and timeout
/// - Placeholder phrases and timing
/// - Custom colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Core domain models: articles, categories and search results.
pub mod domain;

pub mod feed;

pub mod placeholder;

/// Query encoding and navigation.
pub mod routing;

/// Cancellable timers on the tokio runtime.
pub mod scheduler;

pub mod search;

/// Terminal user interface.
///
/// Home screen with the animated search box and the Explore drawer;
/// search screen with the summary and related topics.
pub mod tui;
