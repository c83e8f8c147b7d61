use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use std::time::Duration;

use crate::app::Result;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
}

pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        Self { tick_rate }
    }

    pub fn next(&self) -> Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                // Some terminals report releases as separate events.
                if key.kind == KeyEventKind::Press {
                    return Ok(AppEvent::Key(key));
                }
            }
        }
        Ok(AppEvent::Tick)
    }
}

/// User intents, resolved from key events by
/// [`KeybindingConfig`](crate::config::KeybindingConfig).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Back,
    Submit,
    ToggleExplore,
    NextCategory,
    PrevCategory,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    Retry,
    OpenImage,
    DeleteChar,
    ClearInput,
    Input(char),
    None,
}
