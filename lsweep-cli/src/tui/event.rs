use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyEvent};

/// Input events the sweep loop reacts to
#[derive(Debug)]
pub enum AppEvent {
    /// Key press
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Nothing happened within the tick window
    Tick,
}

/// Polls the terminal for input, emitting a tick when the window elapses so
/// the loop keeps folding deletion progress even while the user is idle.
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    pub fn new(tick_rate_ms: u64) -> Self {
        Self {
            tick_rate: Duration::from_millis(tick_rate_ms),
        }
    }

    /// Block for at most one tick window and return the next event
    pub fn next(&self) -> color_eyre::Result<AppEvent> {
        if event::poll(self.tick_rate)? {
            Ok(map_event(event::read()?))
        } else {
            Ok(AppEvent::Tick)
        }
    }
}

/// Keys and resizes are the only inputs the sweep UI consumes; anything else
/// (mouse, focus, paste) degrades to a tick.
fn map_event(event: CrosstermEvent) -> AppEvent {
    match event {
        CrosstermEvent::Key(key) => AppEvent::Key(key),
        CrosstermEvent::Resize(width, height) => AppEvent::Resize(width, height),
        _ => AppEvent::Tick,
    }
}
