pub mod app;
pub mod ui;

use std::io;

use crossterm::{
    event::{Event, EventStream, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures_util::StreamExt;
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tokio::sync::mpsc;
use tracing::debug;

use crate::error::Result;
use crate::view::{Action, Outcome, TaskView};
use app::{App, InputMode};
use ui::ui;

pub async fn run_tui(view: TaskView) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(view);

    let res = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

/// Spawns `action` on the runtime; its outcome arrives on `tx`.
fn dispatch(app: &mut App, tx: &mpsc::UnboundedSender<Outcome>, action: Action) {
    let action = app.begin(action);
    let client = app.view.client().clone();
    let tx = tx.clone();
    debug!(%action, "dispatching");
    tokio::spawn(async move {
        let outcome = Outcome::run(&client, action).await;
        // The receiver is gone once the UI quits; nothing left to update.
        let _ = tx.send(outcome);
    });
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    let mut events = EventStream::new();

    dispatch(app, &tx, Action::FetchAll);

    loop {
        terminal.draw(|f| ui(f, app))?;

        tokio::select! {
            maybe_event = events.next() => match maybe_event {
                Some(Ok(Event::Key(key))) => {
                    if handle_key(app, &tx, key) {
                        return Ok(());
                    }
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => return Err(e.into()),
                None => return Ok(()),
            },
            Some(outcome) = rx.recv() => {
                if let Some(next) = app.apply(outcome) {
                    dispatch(app, &tx, next);
                }
            }
        }
    }
}

/// Returns `true` when the user asked to quit.
fn handle_key(app: &mut App, tx: &mpsc::UnboundedSender<Outcome>, key: KeyEvent) -> bool {
    if key.kind != KeyEventKind::Press {
        return false;
    }
    match app.input_mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Down | KeyCode::Char('j') => app.next(),
            KeyCode::Up | KeyCode::Char('k') => app.previous(),
            KeyCode::Char('g') => dispatch(app, tx, Action::Generate),
            KeyCode::Char('r') => dispatch(app, tx, Action::FetchAll),
            KeyCode::Char('s') | KeyCode::Enter => app.open_picker(),
            _ => {}
        },
        InputMode::Picking(_) => match key.code {
            KeyCode::Down | KeyCode::Char('j') => app.picker_next(),
            KeyCode::Up | KeyCode::Char('k') => app.picker_previous(),
            KeyCode::Enter => {
                if let Some(action) = app.confirm_picker() {
                    dispatch(app, tx, action);
                }
            }
            KeyCode::Esc => app.close_picker(),
            _ => {}
        },
    }
    false
}
