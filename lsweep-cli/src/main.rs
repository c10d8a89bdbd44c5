mod app;
mod sim;
mod store;
mod tui;
mod ui;

use std::io::{self, stdout};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use clap::Parser;
use color_eyre::Result;
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use lsweep_core::{DeletionScope, MemoryStore, PipelineConfig, StateStore, SweepEngine};
use ratatui::{Terminal, backend::CrosstermBackend, style::Style, widgets::Widget};
use tracing_subscriber::EnvFilter;

use app::{Action, AppMode, AppState, FilterField, NoticeBoard};
use sim::SimPage;
use store::{FileStore, default_state_path};
use tui::{AppEvent, EventHandler, handle_key};
use ui::{
    AppLayout, ConfirmDeleteView, DeleteProgressView, FilterBar, Footer, Header, HelpView,
    ListView, StatsView, Theme,
};

/// LSWEEP - Interactive bulk playlist cleanup
#[derive(Parser, Debug)]
#[command(name = "lsweep")]
#[command(about = "Bulk-select and delete items from a simulated playlist page")]
#[command(version)]
struct Args {
    /// JSON playlist file (array of {"id", "title"} objects); omit for demo data
    #[arg(short, long)]
    playlist: Option<PathBuf>,

    /// Number of demo items when no playlist is given
    #[arg(short = 'n', long, default_value_t = 40)]
    count: usize,

    /// Make every Nth removal fail once, to exercise the retry path
    #[arg(long)]
    fail_every: Option<usize>,

    /// Settle delay between removal trigger and verification, in milliseconds
    #[arg(long, default_value_t = 250)]
    settle_ms: u64,

    /// State file path (defaults to the platform data directory)
    #[arg(long)]
    state_file: Option<PathBuf>,

    /// Disable persistence (state kept in memory only)
    #[arg(long)]
    no_state: bool,

    /// Append logs to this file (set RUST_LOG to adjust verbosity)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let args = Args::parse();

    if let Some(ref path) = args.log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
            .with_writer(file)
            .with_ansi(false)
            .init();
    }

    // Build the simulated page
    let page = match &args.playlist {
        Some(path) => SimPage::from_json_file(path)?,
        None => SimPage::demo(args.count),
    };
    let page = Arc::new(Mutex::new(page));

    // Persistence
    let store: Box<dyn StateStore> = if args.no_state {
        Box::new(MemoryStore::new())
    } else {
        match args.state_file.clone().or_else(default_state_path) {
            Some(path) => Box::new(FileStore::new(path)),
            None => Box::new(MemoryStore::new()),
        }
    };

    let notice = NoticeBoard::default();
    let mut engine = SweepEngine::create(store, Box::new(notice.clone()));
    engine.set_pipeline_config(PipelineConfig {
        settle_delay: Duration::from_millis(args.settle_ms),
        ..PipelineConfig::default()
    });

    let mut state = AppState::new(engine, page, notice, args.fail_every);
    state.sync_page();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run app
    let result = run_app(&mut terminal, &mut state);

    // Restore terminal
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;

    state.shutdown();
    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut AppState,
) -> Result<()> {
    let theme = Theme::default();
    let event_handler = EventHandler::new(50); // 50ms tick rate

    loop {
        // Fold deletion progress into the engine and refresh the render
        state.poll();
        state.sync_page();

        let notice = state.notice.latest();

        terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::new(area);

            // Background
            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            // Update visible height for scrolling
            state.visible_height = layout.list.height as usize;

            Header::new(state, &theme).render(layout.header, frame.buffer_mut());
            FilterBar::new(state, &theme).render(layout.filter_bar, frame.buffer_mut());

            let items = state.visible_items();
            ListView::new(
                &state.engine,
                &items,
                state.cursor,
                state.scroll_offset,
                &theme,
            )
            .render(layout.list, frame.buffer_mut());

            // Overlays
            match state.mode {
                AppMode::Help => {
                    HelpView::new(&theme).render(area, frame.buffer_mut());
                }
                AppMode::Stats => {
                    StatsView::new(state.engine.stats(), state.engine.session(), &theme)
                        .render(area, frame.buffer_mut());
                }
                AppMode::ConfirmDelete => {
                    if let Some(scope) = state.pending_scope {
                        ConfirmDeleteView::new(scope, state.pending_count, &theme)
                            .render(area, frame.buffer_mut());
                    }
                }
                AppMode::Deleting => {
                    DeleteProgressView::new(&state.job, &theme).render(area, frame.buffer_mut());
                }
                AppMode::Browsing | AppMode::EditFilter(_) => {}
            }

            Footer::new(state.mode, &theme, notice.as_deref())
                .render(layout.footer, frame.buffer_mut());
        })?;

        // Handle events
        match event_handler.next()? {
            AppEvent::Key(key) => {
                let action = handle_key(key, state.mode);
                handle_action(state, action);
            }
            AppEvent::Resize(_, _) => {
                // Terminal will redraw on next loop
            }
            AppEvent::Tick => {}
        }

        if state.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_action(state: &mut AppState, action: Action) {
    match action {
        Action::MoveUp => state.move_up(),
        Action::MoveDown => state.move_down(),
        Action::PageUp => state.page_up(),
        Action::PageDown => state.page_down(),
        Action::GoToFirst => state.go_to_first(),
        Action::GoToLast => state.go_to_last(),
        Action::ToggleItem => state.toggle_current(),
        Action::ToggleBulkMode => state.toggle_bulk_mode(),
        Action::SelectAll => state.select_all(),
        Action::DeselectAll => state.deselect_all(),
        Action::InvertSelection => state.invert_selection(),
        Action::EditTitleFilter => state.begin_edit(FilterField::Title),
        Action::EditRangeFilter => state.begin_edit(FilterField::Range),
        Action::ClearFilters => state.clear_filters(),
        Action::DeleteSelected => state.request_delete(DeletionScope::Selected),
        Action::DeleteAllVisible => state.request_delete(DeletionScope::AllVisible),
        Action::ConfirmDelete => state.confirm_delete(),
        Action::CancelDialog => {
            if matches!(state.mode, AppMode::EditFilter(_)) {
                state.cancel_edit();
            } else {
                state.cancel_dialog();
            }
        }
        Action::CancelDeletion => state.cancel_deletion(),
        Action::Input(c) => state.input_char(c),
        Action::Backspace => state.backspace(),
        Action::ApplyFilter => state.apply_filter(),
        Action::ShowHelp => state.show_help(),
        Action::HideHelp => state.close_overlay(),
        Action::ShowStats => state.show_stats(),
        Action::HideStats => state.close_overlay(),
        Action::Quit => state.quit(),
        Action::Tick => {}
    }
}
