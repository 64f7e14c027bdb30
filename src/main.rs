use std::io;
use std::sync::Arc;
use std::time::Duration;

use color_eyre::Result;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

use specdeck::adapters::ReqwestHttpClient;
use specdeck::app::{App, AppMessage};
use specdeck::config::GeminiConfig;
use specdeck::document::DOCUMENT;
use specdeck::genai::GenAiClient;
use specdeck::{logging, ui};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation calls can take a while; give the HTTP client plenty of room.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(300);

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("specdeck {VERSION}");
        return Ok(());
    }

    color_eyre::install()?;
    logging::init();
    tracing::info!(version = VERSION, "starting specdeck");

    let config = GeminiConfig::load();
    let http = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map(ReqwestHttpClient::with_client)
        .unwrap_or_default();
    let client = Arc::new(GenAiClient::new(Arc::new(http), config));

    let (tx, mut rx) = mpsc::unbounded_channel::<AppMessage>();
    let mut app = App::new(&DOCUMENT, client, tx);

    let mut terminal = setup_terminal()?;
    let run_result = run(&mut terminal, &mut app, &mut rx).await;
    restore_terminal()?;

    tracing::info!("specdeck exiting");
    run_result
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    rx: &mut mpsc::UnboundedReceiver<AppMessage>,
) -> Result<()> {
    let mut events = EventStream::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::render(frame, app))?;

        tokio::select! {
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        // Redrawn on the next loop turn.
                    }
                    Some(Ok(_)) => {}
                    Some(Err(err)) => {
                        tracing::error!(error = %err, "terminal event stream error");
                        app.should_quit = true;
                    }
                    None => app.should_quit = true,
                }
            }
            Some(message) = rx.recv() => {
                app.handle_message(message);
            }
        }
    }

    Ok(())
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Restore the terminal even when a draw panics.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        default_hook(info);
    }));

    Ok(Terminal::new(CrosstermBackend::new(io::stdout()))?)
}

fn restore_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen)?;
    Ok(())
}
