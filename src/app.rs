//! App: terminal init, frame loop, key handling and the score display.

use crate::input::{Action, key_to_action};
use crate::theme::Theme;
use crate::ui::{self, View};
use anyhow::Result;
use blocktris::{DropResult, GameConfig, GameState, Rotation, ScoreSink, Spawn};
use crossterm::event::{self, Event, KeyEventKind};
use ratatui::DefaultTerminal;
use std::time::{Duration, Instant};
use tachyonfx::Effect;

/// Frame budget (~60 FPS).
const FRAME_MS: u64 = 16;

/// Score display: the score last pushed by the game and the session best.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u64,
    pub best: u64,
}

impl ScoreSink for ScoreBoard {
    fn show_score(&mut self, score: u64) {
        self.score = score;
        self.best = self.best.max(score);
    }
}

pub struct App {
    state: GameState,
    theme: Theme,
    scores: ScoreBoard,
    paused: bool,
    no_animation: bool,
    /// Origin of the millisecond timestamps fed to the game.
    clock_start: Instant,
    /// Set when a spawn wiped the board; cleared when the flash has finished.
    flash_active: bool,
    flash_effect: Option<Effect>,
    flash_process_time: Option<Instant>,
}

impl App {
    pub fn new(config: GameConfig, theme: Theme, no_animation: bool) -> Self {
        Self {
            state: GameState::new(&config),
            theme,
            scores: ScoreBoard::default(),
            paused: false,
            no_animation,
            clock_start: Instant::now(),
            flash_active: false,
            flash_effect: None,
            flash_process_time: None,
        }
    }

    /// Milliseconds since the loop started.
    fn timestamp(&self, now: Instant) -> u64 {
        now.saturating_duration_since(self.clock_start).as_millis() as u64
    }

    fn on_drop(&mut self, result: DropResult) {
        if let DropResult::Locked {
            spawn: Spawn::GameOver,
            ..
        } = result
        {
            if !self.no_animation {
                self.flash_active = true;
                self.flash_effect = None;
                self.flash_process_time = None;
            }
        }
    }

    fn apply_action(&mut self, action: Action) {
        match action {
            Action::MoveLeft => {
                self.state.shift(-1);
            }
            Action::MoveRight => {
                self.state.shift(1);
            }
            Action::RotateCcw => {
                self.state.rotate(Rotation::CounterClockwise);
            }
            Action::RotateCw => {
                self.state.rotate(Rotation::Clockwise);
            }
            Action::SoftDrop => {
                let result = self.state.drop_piece();
                self.on_drop(result);
            }
            Action::Pause | Action::Quit | Action::None => {}
        }
        self.state.flush_score(&mut self.scores);
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if !self.paused {
            // Time spent paused must not count towards the next drop.
            let now = self.timestamp(Instant::now());
            self.state.timer.rebase(now);
        }
    }

    pub fn run(&mut self) -> Result<()> {
        use crossterm::{
            execute,
            terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
        };

        enable_raw_mode()?;
        let mut stdout = std::io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let mut terminal =
            ratatui::DefaultTerminal::new(ratatui::backend::CrosstermBackend::new(stdout))?;

        self.clock_start = Instant::now();
        let result = self.run_loop(&mut terminal);

        // Restore
        execute!(std::io::stdout(), LeaveAlternateScreen)?;
        disable_raw_mode()?;

        result
    }

    fn run_loop(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        loop {
            let now = Instant::now();
            if !self.paused {
                let time = self.timestamp(now);
                if let Some(result) = self.state.update(time) {
                    self.on_drop(result);
                }
            }
            self.state.flush_score(&mut self.scores);

            terminal.draw(|f| {
                let view = View {
                    state: &self.state,
                    theme: &self.theme,
                    scores: &self.scores,
                    paused: self.paused,
                };
                ui::draw(f, &view);
                if self.flash_active {
                    ui::apply_game_over_flash(
                        f,
                        &self.state,
                        &self.theme,
                        &mut self.flash_effect,
                        &mut self.flash_process_time,
                        now,
                    );
                }
            })?;

            if self.flash_effect.as_ref().is_some_and(|e| e.done()) {
                self.flash_active = false;
                self.flash_effect = None;
                self.flash_process_time = None;
            }

            let timeout = Duration::from_millis(FRAME_MS).saturating_sub(now.elapsed());
            if event::poll(timeout)? {
                while event::poll(Duration::ZERO)? {
                    let Event::Key(key) = event::read()? else {
                        continue;
                    };
                    if key.kind == KeyEventKind::Release {
                        continue;
                    }
                    match key_to_action(key) {
                        Action::Quit => return Ok(()),
                        Action::Pause => self.toggle_pause(),
                        action if !self.paused => self.apply_action(action),
                        _ => {}
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_board_tracks_best() {
        let mut board = ScoreBoard::default();
        board.show_score(30);
        board.show_score(70);
        board.show_score(0);
        assert_eq!(board, ScoreBoard { score: 0, best: 70 });
    }

    #[test]
    fn test_pause_rebases_timer() {
        let mut app = App::new(GameConfig::default(), Theme::classic(), true);
        app.state.timer.last_time = 0;
        app.state.timer.counter = 400;
        app.toggle_pause();
        assert!(app.paused);
        app.toggle_pause();
        assert!(!app.paused);
        assert_eq!(app.state.timer.counter, 400);
        let now = app.timestamp(Instant::now());
        assert!(app.state.timer.last_time <= now);
    }

    #[test]
    fn test_move_actions_shift_piece() {
        let mut app = App::new(GameConfig::default(), Theme::classic(), true);
        let x = app.state.player.pos.x;
        app.apply_action(Action::MoveLeft);
        assert_eq!(app.state.player.pos.x, x - 1);
        app.apply_action(Action::MoveRight);
        app.apply_action(Action::MoveRight);
        assert_eq!(app.state.player.pos.x, x + 1);
    }

    #[test]
    fn test_soft_drop_action_moves_piece() {
        let mut app = App::new(GameConfig::default(), Theme::classic(), true);
        let y = app.state.player.pos.y;
        app.apply_action(Action::SoftDrop);
        assert_eq!(app.state.player.pos.y, y + 1);
        assert_eq!(app.scores, ScoreBoard::default());
    }
}
