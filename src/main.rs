//! postboard — a live view of the latest posts for the terminal.
//!
//! ## Architecture overview
//!
//! ```text
//! ┌──────────┐  PollMsg   ┌──────────┐ render_posts ┌───────────┐  draw()  ┌───────┐
//! │  poll.rs │ ─────────► │  app.rs  │ ───────────► │ render.rs │ ───────► │ ui.rs │
//! │ (thread) │  (channel) │ (state)  │              │(container)│          │       │
//! └──────────┘            └──────────┘              └───────────┘          └───────┘
//!      ▲ refresh()             ▲
//!      │                       │ handle_key_event()
//!      └──── main loop    ┌──────────┐
//!                         │ input.rs │
//!                         └──────────┘
//! ```
//!
//! * **`source/`** — the `PostSource` trait, the `PostRecord` type and the
//!   HTTP source for `GET /api/posts`.
//! * **`render`** — turns records into the container's post cards.
//! * **`poll`** — background thread that refreshes on start, on a timer and
//!   on demand.
//! * **`app`** — owns the container, selection and status.
//! * **`ui`** — pure drawing of `App` state.
//! * **`input`** — maps key events to `App` mutations.
//! * **`config`** / **`logging`** — environment, flags and diagnostics.

mod app;
mod config;
mod input;
mod logging;
mod poll;
mod render;
mod source;
mod ui;

use std::io;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use app::App;
use config::{Cli, Config};
use poll::PollMsg;
use source::HttpPostSource;

// ---------------------------------------------------------------------------
// RAII terminal guard — idiomatic cleanup even on panic
// ---------------------------------------------------------------------------

/// Manages terminal raw-mode and alternate-screen lifetime via [`Drop`].
struct TerminalGuard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalGuard {
    fn new() -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;
        Ok(Self { terminal })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Install a panic hook that restores the terminal before printing the
/// panic message.  Without this, a panic inside the event loop or on the
/// poller thread would leave raw mode enabled and the alternate screen active.
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(info);
    }));
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<()> {
    let config = Config::from_env(Cli::parse());
    logging::init_logging(config.log_file.as_deref())?;
    install_panic_hook();

    let endpoint = config.posts_endpoint();
    info!(%endpoint, interval_secs = config.refresh_interval.as_secs(), "starting");

    // -- start background polling --------------------------------------------
    let source = HttpPostSource::new(endpoint)?;
    let (poller, rx) = poll::spawn(Box::new(source), config.refresh_interval);

    // -- terminal setup (RAII — Drop restores on exit or panic) --------------
    let mut guard = TerminalGuard::new()?;
    let mut app = App::new();

    // -- main event loop -----------------------------------------------------
    // Runs at ~10 fps (100 ms tick).  Each iteration:
    //   1. Render any completed refreshes.
    //   2. Draw the UI.
    //   3. Poll for keyboard input (non-blocking, up to tick_rate).
    //   4. Forward a manual refresh request to the poller.
    let tick_rate = Duration::from_millis(100);

    loop {
        while let Ok(msg) = rx.try_recv() {
            match msg {
                PollMsg::Posts { posts, fetched_at } => app.show_posts(&posts, fetched_at),
            }
        }

        guard.terminal.draw(|f| ui::draw(&mut app, f))?;

        if event::poll(tick_rate)? {
            if let Event::Key(key) = event::read()? {
                input::handle_key_event(&mut app, key);
            }
        }

        if app.refresh_requested {
            app.refresh_requested = false;
            poller.refresh();
        }

        if app.quit {
            break;
        }
    }

    // Restore the terminal first; stopping may wait on an in-flight request.
    drop(guard);
    poller.stop();
    info!("exiting");
    Ok(())
}
