use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::prelude::*;
use std::{
    env,
    io::{self, Stdout},
    path::PathBuf,
    process,
    time::Duration,
};
use tracing::{info, warn};

mod app;
mod clipboard;
mod command;
mod commit_line;
mod config;
mod events;
mod flags;
mod git_loader;
mod git_ops;
mod keymap;
mod scroll;
mod sidebar;
mod theme;
mod ui;

use app::{App, PendingFetch, Viewport};
use events::KeyEventResult;
use git_loader::GitLoader;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> io::Result<()> {
    let _ = dotenvy::dotenv();

    // Handle --version / -V
    if let Some(arg) = env::args().nth(1)
        && (arg == "--version" || arg == "-V")
    {
        println!("igl {}", VERSION);
        return Ok(());
    }

    let settings = config::Settings::from_env();
    if let Err(e) = config::init_logging(&settings) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let workdir = env::current_dir()?;
    if !git_ops::is_repository(&workdir) {
        eprintln!("Error: Not a git repository (or any of the parent directories)");
        eprintln!("Run igl from inside a git working tree.");
        process::exit(1);
    }
    info!(version = VERSION, workdir = %workdir.display(), "starting");

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, workdir).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = &result {
        warn!(error = %e, "event loop failed");
    }
    result
}

async fn run(terminal: &mut Terminal<CrosstermBackend<Stdout>>, workdir: PathBuf) -> io::Result<()> {
    let (_, height) = crossterm::terminal::size()?;
    let mut app = App::new(Viewport::for_terminal(height));

    let (loader, mut git_result_rx) = GitLoader::new(workdir);
    let mut event_stream = EventStream::new();

    loop {
        dispatch_fetches(&mut app, &loader);
        app.maybe_expire_status();

        terminal.draw(|f| ui::draw_ui(f, &app))?;

        let poll_timeout = tokio::time::sleep(Duration::from_millis(100));
        tokio::pin!(poll_timeout);

        tokio::select! {
            Some(result) = git_result_rx.recv() => {
                app.handle_git_result(result);
            }
            Some(event_result) = event_stream.next() => {
                match event_result? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => {
                        if events::handle_key_event(&mut app, key) == KeyEventResult::Quit {
                            app.should_quit = true;
                        }
                    }
                    Event::Resize(_, height) => app.set_viewport(Viewport::for_terminal(height)),
                    _ => {}
                }
            }
            _ = &mut poll_timeout => {}
        }

        if let Some(text) = app.take_pending_clipboard()
            && !clipboard::copy_to_clipboard(terminal.backend_mut(), &text)
        {
            warn!("clipboard copy failed on every channel");
        }

        if app.should_quit {
            info!("quitting");
            return Ok(());
        }
    }
}

fn dispatch_fetches(app: &mut App, loader: &GitLoader) {
    for fetch in app.take_pending_fetches() {
        // The loader cancels superseded work itself.
        match fetch {
            PendingFetch::Log { request_id, args } => {
                loader.request_log(request_id, args);
            }
            PendingFetch::Show { request_id, hash } => {
                loader.request_show(request_id, hash);
            }
        }
    }
}
