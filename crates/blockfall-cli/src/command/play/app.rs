use std::time::Duration;

use blockfall_engine::{Board, Command, RowRemovalRequest};
use blockfall_runtime::{App, RenderMode, Runtime, TimerId};
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Flex, Layout},
    widgets::{Block as BlockWidget, BorderType},
};

use crate::view::widgets::{BoardDisplay, KeyBinding, KeyBindingDisplay};

const TICK_RATE: f64 = 120.0;

const PLAYING_BINDINGS: &[KeyBinding] = &[
    (&["←", "→"], "Move"),
    (&["↓"], "Soft Drop"),
    (&["↑"], "Rotate"),
    (&["R"], "Restart"),
    (&["Q", "Esc"], "Quit"),
];
const GAME_OVER_BINDINGS: &[KeyBinding] = &[(&["R"], "Restart"), (&["Q", "Esc"], "Quit")];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Game(Command),
    Quit,
}

impl Action {
    fn from_key_event(event: &KeyEvent) -> Option<Self> {
        if event.kind == KeyEventKind::Release {
            return None;
        }
        let action = match event.code {
            KeyCode::Up => Self::Game(Command::RotateClockwise),
            KeyCode::Left => Self::Game(Command::MoveLeft),
            KeyCode::Right => Self::Game(Command::MoveRight),
            KeyCode::Down => Self::Game(Command::SoftDrop),
            KeyCode::Char('r' | 'R') => Self::Game(Command::RestartGame),
            KeyCode::Char('q' | 'Q') | KeyCode::Esc => Self::Quit,
            _ => return None,
        };
        Some(action)
    }
}

#[derive(Debug)]
pub struct PlayApp {
    board: Board,
    removal_timers: Vec<TimerId>,
    is_exiting: bool,
}

impl PlayApp {
    pub fn new(board: Board) -> Self {
        Self {
            board,
            removal_timers: vec![],
            is_exiting: false,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    fn schedule_removal(&mut self, runtime: &mut Runtime, request: Option<RowRemovalRequest>) {
        if let Some(request) = request {
            let timer = runtime.schedule_once(request.delay);
            self.removal_timers.push(timer);
        }
    }

    fn step(&mut self, runtime: &mut Runtime, now: Duration) {
        let report = self.board.advance_frame(now);
        self.schedule_removal(runtime, report.row_removal);
    }

    fn apply(&mut self, runtime: &mut Runtime, command: Command) {
        if command == Command::RestartGame {
            // Rows pending in the old game must not be removed from the new one.
            for timer in self.removal_timers.drain(..) {
                runtime.cancel_timer(timer);
            }
        }
        self.board.handle_command(command);
    }
}

impl App for PlayApp {
    fn init(&mut self, runtime: &mut Runtime) {
        runtime.set_tick_rate(Some(TICK_RATE));
        runtime.set_render_mode(RenderMode::OnDirty);
    }

    fn should_exit(&self) -> bool {
        self.is_exiting
    }

    fn handle_event(&mut self, runtime: &mut Runtime, event: Event) {
        let Some(action) = event.as_key_event().and_then(|e| Action::from_key_event(&e)) else {
            return;
        };
        match action {
            Action::Game(command) => self.apply(runtime, command),
            Action::Quit => self.is_exiting = true,
        }
    }

    fn draw(&self, frame: &mut Frame) {
        let board_display = BoardDisplay::new(&self.board).block(
            BlockWidget::bordered()
                .border_type(BorderType::Rounded)
                .title(self.board.caption()),
        );
        let bindings = if self.board.is_valid() {
            PLAYING_BINDINGS
        } else {
            GAME_OVER_BINDINGS
        };
        let help = KeyBindingDisplay::new(bindings);

        let [board_area, help_area] = Layout::vertical([
            Constraint::Length(board_display.height()),
            Constraint::Length(1),
        ])
        .flex(Flex::Center)
        .areas(frame.area());
        let [board_area] = Layout::horizontal([Constraint::Length(board_display.width())])
            .flex(Flex::Center)
            .areas(board_area);

        frame.render_widget(&board_display, board_area);
        frame.render_widget(help, help_area);
    }

    fn update(&mut self, runtime: &mut Runtime) {
        let now = runtime.clock();
        self.step(runtime, now);
    }

    fn on_timer(&mut self, runtime: &mut Runtime, timer: TimerId) {
        let Some(index) = self.removal_timers.iter().position(|t| *t == timer) else {
            return;
        };
        self.removal_timers.remove(index);
        let request = self.board.remove_completed_rows();
        self.schedule_removal(runtime, request);
    }
}

#[cfg(test)]
mod tests {
    use blockfall_engine::{BoardConfig, PieceSeed};
    use crossterm::event::KeyModifiers;

    use super::*;

    fn app() -> PlayApp {
        let seed = PieceSeed::from_bytes([9; 16]);
        PlayApp::new(Board::with_seed(BoardConfig::default(), seed).unwrap())
    }

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn test_key_mapping() {
        let cases = [
            (KeyCode::Up, Some(Action::Game(Command::RotateClockwise))),
            (KeyCode::Left, Some(Action::Game(Command::MoveLeft))),
            (KeyCode::Right, Some(Action::Game(Command::MoveRight))),
            (KeyCode::Down, Some(Action::Game(Command::SoftDrop))),
            (KeyCode::Char('r'), Some(Action::Game(Command::RestartGame))),
            (KeyCode::Char('q'), Some(Action::Quit)),
            (KeyCode::Esc, Some(Action::Quit)),
            (KeyCode::Char(' '), None),
        ];
        for (code, expected) in cases {
            let event = KeyEvent::new(code, KeyModifiers::NONE);
            assert_eq!(Action::from_key_event(&event), expected, "{code:?}");
        }
    }

    #[test]
    fn test_key_release_is_ignored() {
        let event =
            KeyEvent::new_with_kind(KeyCode::Left, KeyModifiers::NONE, KeyEventKind::Release);
        assert_eq!(Action::from_key_event(&event), None);
    }

    #[test]
    fn test_keys_drive_board() {
        let mut runtime = Runtime::new();
        let mut app = app();
        let x = app.board().active_piece().unwrap().x_target();

        app.handle_event(&mut runtime, key(KeyCode::Left));
        assert_eq!(app.board().active_piece().unwrap().x_target(), x - 1);
        app.handle_event(&mut runtime, key(KeyCode::Right));
        app.handle_event(&mut runtime, key(KeyCode::Right));
        assert_eq!(app.board().active_piece().unwrap().x_target(), x + 1);

        assert!(!app.should_exit());
        app.handle_event(&mut runtime, key(KeyCode::Char('q')));
        assert!(app.should_exit());
    }

    #[test]
    fn test_soft_drop_until_lock() {
        let mut runtime = Runtime::new();
        let mut app = app();
        for _ in 0..40 {
            app.handle_event(&mut runtime, key(KeyCode::Down));
        }
        app.step(&mut runtime, Duration::ZERO);
        app.step(&mut runtime, Duration::from_secs(1));

        assert_eq!(app.board().stats().locked_pieces(), 1);
        // Every shape has four cells and none fills a row alone.
        assert_eq!(app.board().grid().occupied_count(), 4);
    }

    #[test]
    fn test_restart_cancels_pending_removals() {
        let mut runtime = Runtime::new();
        let mut app = app();
        let timer = runtime.schedule_once(Duration::from_secs(60));
        app.removal_timers.push(timer);

        app.handle_event(&mut runtime, key(KeyCode::Char('r')));
        assert!(app.removal_timers.is_empty());
        assert!(!runtime.cancel_timer(timer));
    }

    #[test]
    fn test_unknown_timer_is_ignored() {
        let mut runtime = Runtime::new();
        let mut app = app();
        let foreign = runtime.schedule_once(Duration::ZERO);
        let before = app.board().grid().clone();
        app.on_timer(&mut runtime, foreign);
        assert_eq!(*app.board().grid(), before);

        let ours = runtime.schedule_once(Duration::ZERO);
        app.removal_timers.push(ours);
        app.on_timer(&mut runtime, ours);
        assert!(app.removal_timers.is_empty());
    }
}
