//! Zonefall terminal runner (default binary).
//!
//! Uses crossterm for input and the framebuffer renderer from `zonefall-term`
//! (no widget/layout library). One loop iteration is one frame: poll keys,
//! advance the session by the elapsed time, draw.

use std::fs::File;
use std::path::PathBuf;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};

use zonefall::input::{handle_key_event, should_quit, Command, KeyContext};
use zonefall::session::{FlowConfig, FlowState, JsonFileStore, Session};
use zonefall::term::{FrameBuffer, GameView, TerminalRenderer, Viewport};

const FRAME: Duration = Duration::from_millis(16);

/// Longest step fed to the session, so a stalled terminal doesn't skip play.
const MAX_FRAME_SECS: f32 = 0.1;

#[derive(Parser, Debug)]
#[command(name = "zonefall", version, about = "Falling blocks, colored zones")]
struct Args {
    /// RNG seed (defaults to the current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory for the score history
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Write logs to this file (stderr would corrupt the screen)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.log_file.as_deref())?;

    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let data_dir = args
        .data_dir
        .or_else(|| dirs::data_dir().map(|d| d.join("zonefall")))
        .unwrap_or_else(|| PathBuf::from("."));
    log::info!("starting zonefall: seed={} data_dir={}", seed, data_dir.display());

    let mut session = Session::new(seed as u32, JsonFileStore::new(data_dir), FlowConfig::default());

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, &mut session);

    // Always try to restore terminal state.
    let _ = term.exit();
    result
}

fn init_logging(log_file: Option<&std::path::Path>) -> Result<()> {
    let env = env_logger::Env::default().default_filter_or("info");
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            env_logger::Builder::from_env(env)
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        }
        None if std::env::var_os("RUST_LOG").is_some() => {
            env_logger::Builder::from_env(env).init();
        }
        None => {}
    }
    Ok(())
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(1)
}

fn key_context(state: FlowState) -> KeyContext {
    match state {
        FlowState::Playing => KeyContext::Playing,
        FlowState::NameEntry => KeyContext::NameEntry,
        FlowState::Idle | FlowState::Intro | FlowState::GameOver | FlowState::Scoreboard => {
            KeyContext::Menu
        }
    }
}

fn apply_command(session: &mut Session<JsonFileStore>, command: Command) {
    match command {
        Command::Game(input) => {
            session.handle_input(input);
        }
        Command::ForceBonus => {
            session.force_bonus();
        }
        Command::Start => {
            session.press_start();
        }
        Command::NameChar(c) => {
            session.type_char(c);
        }
        Command::NameBackspace => {
            session.backspace();
        }
        Command::NameConfirm => {
            session.confirm_name();
        }
    }
}

fn run(term: &mut TerminalRenderer, session: &mut Session<JsonFileStore>) -> Result<()> {
    let view = GameView::default();
    let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
    let mut viewport = Viewport::new(w, h);
    let mut fb = FrameBuffer::new(w, h);
    let mut last_frame = Instant::now();

    loop {
        view.render_session_into(session, viewport, &mut fb);
        term.draw_swap(&mut fb)?;

        // Input with timeout until the next frame.
        let mut timeout = FRAME.saturating_sub(last_frame.elapsed());
        while event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(command) = handle_key_event(key, key_context(session.state())) {
                        apply_command(session, command);
                    }
                }
                Event::Resize(w, h) => {
                    viewport = Viewport::new(w, h);
                    term.invalidate();
                }
                _ => {}
            }
            timeout = FRAME.saturating_sub(last_frame.elapsed());
        }

        let now = Instant::now();
        let dt = now.duration_since(last_frame).as_secs_f32().min(MAX_FRAME_SECS);
        last_frame = now;
        session.update(dt);

        for event in session.drain_events() {
            log::debug!("event: {:?}", event);
        }
    }
}
