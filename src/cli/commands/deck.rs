use std::io::{self, Stdout};
use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, info};

use crate::state::Config;
use crate::tui::{input, ui, App, WidgetSet};

type Term = Terminal<CrosstermBackend<Stdout>>;

/// Upper bound on how long the loop waits for input when no clock is running.
const IDLE_POLL: Duration = Duration::from_millis(250);

pub async fn run(dir: &Path, widgets: WidgetSet) -> Result<()> {
    let config = Config::load_or_default(dir)?;
    info!(?widgets, "starting deck");

    tokio::task::spawn_blocking(move || {
        let mut app = App::new(&config, widgets);
        let mut terminal = setup_terminal()?;
        let result = event_loop(&mut terminal, &mut app);
        restore_terminal(&mut terminal)?;
        result
    })
    .await
    .context("Deck task panicked")?
}

fn setup_terminal() -> Result<Term> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
        .context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(stdout)).context("Failed to create terminal")
}

fn restore_terminal(terminal: &mut Term) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

fn event_loop(terminal: &mut Term, app: &mut App) -> Result<()> {
    loop {
        let now = Instant::now();
        app.on_time(now);
        terminal.draw(|f| ui::draw(f, app))?;

        let timeout = app.poll_timeout(Instant::now(), IDLE_POLL);
        if event::poll(timeout)? {
            let action = match event::read()? {
                Event::Key(key) => input::map_key(key),
                Event::Mouse(mouse) => {
                    let area = terminal.get_frame().area();
                    input::map_mouse(mouse, ui::seek_bar(area, app))
                }
                _ => None,
            };

            if let Some(action) = action {
                debug!(?action, "input");
                app.clear_message();
                app.apply(action);
            }
        }

        if app.should_quit {
            info!("deck closed");
            return Ok(());
        }
    }
}
