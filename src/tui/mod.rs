pub mod app;
pub mod input;
pub mod message;
pub mod strip;
mod ui;

use crate::buttons::{ButtonManager, Dispatcher, JsonStore, ResolveContext};
use crate::config::Config;
use crate::host::UiLink;
use crate::terminal::TmuxHost;
use crate::watcher::StoreWatcher;
use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, MouseButton, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;
use tracing::warn;

pub use app::{App, ModalState};
pub use message::Message;

pub async fn run(config: Config, store: JsonStore, workspace_root: Option<String>) -> Result<()> {
    // Check if stdout is a terminal
    if !std::io::IsTerminal::is_terminal(&io::stdout()) {
        anyhow::bail!("launchdeck requires an interactive terminal");
    }

    let watcher = if config.watch_store {
        match StoreWatcher::new(store.path()) {
            Ok(watcher) => Some(watcher),
            Err(err) => {
                warn!("Failed to watch button store, falling back to manual refresh: {err:#}");
                None
            }
        }
    } else {
        None
    };

    let (ui, ui_rx) = UiLink::channel();
    let terminal_host = Arc::new(TmuxHost::new(workspace_root.clone()));
    let dispatcher = Arc::new(Dispatcher::new(
        terminal_host,
        ui,
        ResolveContext::new(workspace_root),
    ));
    let manager = ButtonManager::new(Box::new(store), dispatcher);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state and register the initial bindings
    let mut app = App::new(config, manager, ui_rx, watcher);
    let size = terminal.size()?;
    app.set_viewport(size.width, size.height);
    app.reload_from_store();

    let result = run_app(&mut terminal, &mut app).await;

    // Release live bindings before giving the terminal back
    app.dispose_bindings();

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let tick_rate = Duration::from_millis(app.config.tick_rate_ms.max(50));
    let mut last_tick = std::time::Instant::now();
    let mut input_state = input::InputState::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        if event::poll(timeout)? {
            match event::read()? {
                Event::Resize(width, height) => {
                    app.set_viewport(width, height);
                }
                Event::Key(key) => {
                    let msg = input::dispatch(app, &mut input_state, key);
                    if app.update(msg).await? {
                        return Ok(()); // Quit requested
                    }
                }
                Event::Mouse(mouse) => {
                    if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
                        let msg = Message::Click {
                            column: mouse.column,
                            row: mouse.row,
                        };
                        if app.update(msg).await? {
                            return Ok(());
                        }
                    }
                }
                _ => {}
            }
        }

        // Handle pending chord timeout (non-blocking)
        if input_state.has_timed_out() {
            input_state.clear();
        }

        if last_tick.elapsed() >= tick_rate {
            app.on_tick().await;
            last_tick = std::time::Instant::now();
        }
    }
}
