use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::info;
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use snekboard::tui::{self, KeyAction};
use snekboard::{Engine, EngineConfig, FileBackend, FrameClock, HighScoreStore, SystemClock};
use std::fs::File;
use std::io::{self, Stdout};
use std::time::Duration;

const HIGH_SCORE_FILE: &str = ".snekboard_high_score.txt";
const LOG_FILE: &str = "snekboard.log";
const FRAME_INTERVAL: Duration = Duration::from_millis(16);

fn main() -> Result<(), io::Error> {
    // Set up logging before anything else
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)
        .map_err(io::Error::other)?;

    info!("Starting snekboard");

    let store = HighScoreStore::load(Box::new(FileBackend::new(HIGH_SCORE_FILE)));
    let mut engine = Engine::new(EngineConfig::default(), store);

    // Setup terminal
    enable_raw_mode()?;
    let mut terminal = tui::undo_on_error(enter_terminal, || {
        let _ = disable_raw_mode();
    })?;

    let result = run(&mut terminal, &mut engine, &SystemClock::new());

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    info!("Exiting with high score {}", engine.high_score());
    result
}

fn enter_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, io::Error> {
    execute!(io::stdout(), EnterAlternateScreen)?;
    tui::undo_on_error(
        || Terminal::new(CrosstermBackend::new(io::stdout())),
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
        },
    )
}

/// One iteration per frame: advance, draw, then wait up to a frame for input.
fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    engine: &mut Engine,
    clock: &impl FrameClock,
) -> Result<(), io::Error> {
    loop {
        engine.advance(clock.now());
        let snapshot = engine.snapshot();
        terminal.draw(|f| tui::render(f, &snapshot))?;

        if !event::poll(FRAME_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match tui::action_for_key(key, &snapshot) {
                KeyAction::Command(command) => engine.apply(command),
                KeyAction::Quit => return Ok(()),
                KeyAction::None => {}
            }
        }
    }
}
