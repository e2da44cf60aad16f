//! Terminal front end: turns key presses into engine commands and draws snapshots.

use crate::engine::{Command, GameState, Snapshot};
use crate::geometry::{Coordinate, Direction, CELLS_PER_AXIS, STEP};
use crate::speed::Difficulty;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame,
};
use std::io;

const FOOD_SYMBOL: &str = "♣";
const FRESH_FOOD_SYMBOL: &str = "★";
const HEAD_SYMBOL: &str = "@";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    Command(Command),
    Quit,
    None,
}

/// Maps a key press to an action. The snapshot supplies the values that relative keys
/// (speed up/down, start vs. restart) are based on.
pub fn action_for_key(key: KeyEvent, snapshot: &Snapshot) -> KeyAction {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return KeyAction::Quit;
    }

    let command = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Command::Move(Direction::Right)
        }
        KeyCode::Char('p') | KeyCode::Char('P') => Command::TogglePause,
        KeyCode::Char(' ') | KeyCode::Enter => match snapshot.state {
            GameState::GameOver => Command::Restart,
            _ => Command::Start,
        },
        KeyCode::Char('1') => Command::SetDifficulty(Difficulty::Easy),
        KeyCode::Char('2') => Command::SetDifficulty(Difficulty::Medium),
        KeyCode::Char('3') => Command::SetDifficulty(Difficulty::Hard),
        KeyCode::Char('+') | KeyCode::Char('=') => {
            Command::SetSpeedFactor(snapshot.speed_factor as i32 + 1)
        }
        KeyCode::Char('-') => Command::SetSpeedFactor(snapshot.speed_factor as i32 - 1),
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return KeyAction::Quit,
        _ => return KeyAction::None,
    };
    KeyAction::Command(command)
}

/// Runs `setup`, calling `undo` before its error is handed back. Used to leave raw mode and
/// the alternate screen when terminal setup fails halfway.
pub fn undo_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce(),
) -> io::Result<T> {
    setup().map_err(|e| {
        undo();
        e
    })
}

pub fn status_text(snapshot: &Snapshot) -> String {
    format!(
        "SNEK    Score: {}    High Score: {}\nDifficulty: {}    Speed Factor: {}",
        snapshot.score, snapshot.high_score, snapshot.difficulty, snapshot.speed_factor
    )
}

fn overlay_text(snapshot: &Snapshot) -> Option<String> {
    match snapshot.state {
        GameState::NotStarted => Some(
            "Press SPACE to start\n1/2/3 pick difficulty, +/- change speed".to_string(),
        ),
        GameState::Paused => Some("Paused. Press P to continue".to_string()),
        GameState::GameOver => Some(format!(
            "GAME OVER\nFinal Score: {}\nPress SPACE to play again",
            snapshot.score
        )),
        GameState::Running => None,
    }
}

pub fn render(frame: &mut Frame, snapshot: &Snapshot) {
    let layout = Layout::vertical([Constraint::Length(4), Constraint::Min(0)]).split(frame.area());

    frame.render_widget(
        Paragraph::new(status_text(snapshot))
            .alignment(Alignment::Left)
            .block(Block::default().borders(Borders::ALL)),
        layout[0],
    );

    let block = Block::default().borders(Borders::ALL);
    let inner_area = block.inner(layout[1]);
    frame.render_widget(block, layout[1]);
    frame.render_widget(BoardView::new(snapshot), inner_area);

    if let Some(text) = overlay_text(snapshot) {
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), inner_area);
    }
}

/// Draws the board, scaling the grid to whatever area it is given.
pub struct BoardView<'a> {
    snapshot: &'a Snapshot,
}

impl<'a> BoardView<'a> {
    pub fn new(snapshot: &'a Snapshot) -> Self {
        BoardView { snapshot }
    }
}

fn cell_position(pos: Coordinate, area: Rect) -> Option<(u16, u16)> {
    if area.is_empty() {
        return None;
    }
    let col = (pos.x / STEP).clamp(0, CELLS_PER_AXIS - 1) as u32;
    let row = (pos.y / STEP).clamp(0, CELLS_PER_AXIS - 1) as u32;
    let x = area.x as u32 + col * area.width as u32 / CELLS_PER_AXIS as u32;
    let y = area.y as u32 + row * area.height as u32 / CELLS_PER_AXIS as u32;
    Some((x as u16, y as u16))
}

impl Widget for BoardView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((head, body)) = self.snapshot.snake.split_last() else {
            return;
        };

        for pos in body {
            if let Some(cell) = cell_position(*pos, area) {
                buf[cell].set_symbol(" ").set_bg(Color::Green);
            }
        }

        if let Some(cell) = cell_position(*head, area) {
            let color = if self.snapshot.just_ate {
                Color::LightGreen
            } else {
                Color::Yellow
            };
            buf[cell].set_symbol(HEAD_SYMBOL).set_fg(color);
        }

        if let Some(cell) = cell_position(self.snapshot.food, area) {
            let (symbol, style) = if self.snapshot.just_spawned {
                (
                    FRESH_FOOD_SYMBOL,
                    Style::default().fg(Color::LightRed).add_modifier(Modifier::BOLD),
                )
            } else {
                (FOOD_SYMBOL, Style::default().fg(Color::LightRed))
            };
            buf[cell].set_symbol(symbol).set_style(style);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Engine, EngineConfig};
    use crate::score::HighScoreStore;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn snapshot() -> Snapshot {
        Engine::with_rng(
            EngineConfig::default(),
            HighScoreStore::in_memory(),
            StdRng::seed_from_u64(5),
        )
        .snapshot()
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_arrow_and_wasd_keys() {
        let snap = snapshot();
        for (code, direction) in [
            (KeyCode::Up, Direction::Up),
            (KeyCode::Char('w'), Direction::Up),
            (KeyCode::Down, Direction::Down),
            (KeyCode::Char('s'), Direction::Down),
            (KeyCode::Left, Direction::Left),
            (KeyCode::Char('a'), Direction::Left),
            (KeyCode::Right, Direction::Right),
            (KeyCode::Char('d'), Direction::Right),
        ] {
            assert_eq!(
                action_for_key(press(code), &snap),
                KeyAction::Command(Command::Move(direction))
            );
        }
    }

    #[test]
    fn test_control_keys() {
        let mut snap = snapshot();
        assert_eq!(
            action_for_key(press(KeyCode::Char('p')), &snap),
            KeyAction::Command(Command::TogglePause)
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char(' ')), &snap),
            KeyAction::Command(Command::Start)
        );
        assert_eq!(action_for_key(press(KeyCode::Esc), &snap), KeyAction::Quit);
        assert_eq!(
            action_for_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL), &snap),
            KeyAction::Quit
        );
        assert_eq!(action_for_key(press(KeyCode::Char('x')), &snap), KeyAction::None);

        snap.state = GameState::GameOver;
        assert_eq!(
            action_for_key(press(KeyCode::Enter), &snap),
            KeyAction::Command(Command::Restart)
        );
    }

    #[test]
    fn test_speed_and_difficulty_keys() {
        let mut snap = snapshot();
        snap.speed_factor = 4;
        assert_eq!(
            action_for_key(press(KeyCode::Char('+')), &snap),
            KeyAction::Command(Command::SetSpeedFactor(5))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('-')), &snap),
            KeyAction::Command(Command::SetSpeedFactor(3))
        );
        assert_eq!(
            action_for_key(press(KeyCode::Char('3')), &snap),
            KeyAction::Command(Command::SetDifficulty(Difficulty::Hard))
        );
    }

    #[test]
    fn test_board_view_draws_snake_and_food() {
        let mut snap = snapshot();
        snap.food = Coordinate::new(0, 98);
        let area = Rect::new(0, 0, 50, 50);
        let mut buf = Buffer::empty(area);

        BoardView::new(&snap).render(area, &mut buf);

        assert_eq!(buf[(26, 25)].symbol(), HEAD_SYMBOL);
        assert_eq!(buf[(26, 25)].fg, Color::Yellow);
        assert_eq!(buf[(25, 25)].bg, Color::Green);
        assert_eq!(buf[(0, 49)].symbol(), FOOD_SYMBOL);
    }

    #[test]
    fn test_board_view_scales_down() {
        let mut snap = snapshot();
        snap.food = Coordinate::new(0, 0);
        let area = Rect::new(2, 1, 25, 10);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 12));

        BoardView::new(&snap).render(area, &mut buf);

        // (52, 50) is column 26 and row 25 of 50
        assert_eq!(buf[(2 + 13, 1 + 5)].symbol(), HEAD_SYMBOL);
    }

    #[test]
    fn test_undo_on_error_only_runs_on_failure() {
        use std::cell::Cell;

        let undone = Cell::new(false);
        let result = undo_on_error(
            || Err::<(), _>(io::Error::new(io::ErrorKind::Other, "no tty")),
            || undone.set(true),
        );
        assert!(result.is_err());
        assert!(undone.get(), "failed setup must be undone");

        undone.set(false);
        let result = undo_on_error(|| Ok(7), || undone.set(true));
        assert_eq!(result.unwrap(), 7);
        assert!(!undone.get());
    }

    #[test]
    fn test_status_text() {
        let mut snap = snapshot();
        snap.score = 3;
        snap.high_score = 11;
        let text = status_text(&snap);
        assert!(text.contains("Score: 3"));
        assert!(text.contains("High Score: 11"));
        assert!(text.contains("Difficulty: Medium"));
    }
}
