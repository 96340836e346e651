//! Layout and drawing: playfield, active piece, sidebar, pause overlay, game-over flash.

use crate::app::ScoreBoard;
use crate::theme::Theme;
use blocktris::{GameState, Matrix, Position};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Widget};
use std::time::Instant;
use tachyonfx::{Duration as TfxDuration, Effect, EffectRenderer, Interpolation, fx};

/// Each arena cell is two terminal columns wide so cells look square.
const CELL_WIDTH: u16 = 2;
const SIDEBAR_WIDTH: u16 = 24;
/// Duration of the board flash after a game ends.
const GAME_OVER_FLASH_MS: u32 = 500;

/// Everything the renderer reads for one frame.
pub struct View<'a> {
    pub state: &'a GameState,
    pub theme: &'a Theme,
    pub scores: &'a ScoreBoard,
    pub paused: bool,
}

/// Playfield size in terminal cells, border included.
fn playfield_size(state: &GameState) -> (u16, u16) {
    let w = to_u16(state.arena.width()).saturating_mul(CELL_WIDTH);
    let h = to_u16(state.arena.height());
    (w.saturating_add(2), h.saturating_add(2))
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Board and sidebar rects, centred in `area`.
fn layout(area: Rect, state: &GameState) -> (Rect, Rect) {
    let (pw, ph) = playfield_size(state);
    let horiz = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(pw.saturating_add(SIDEBAR_WIDTH)),
            Constraint::Fill(1),
        ])
        .split(area);
    let vert = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(ph),
            Constraint::Fill(1),
        ])
        .split(horiz[1]);
    let inner = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(pw), Constraint::Length(SIDEBAR_WIDTH)])
        .split(vert[1]);
    (inner[0], inner[1])
}

/// Inner board rect (inside the border) for the given frame area.
fn board_rect(area: Rect, state: &GameState) -> Rect {
    let (playfield, _) = layout(area, state);
    Block::default().borders(Borders::ALL).inner(playfield)
}

/// Draw the whole frame. Clears the previous frame, then the arena, then the
/// active piece on top.
pub fn draw(frame: &mut Frame, view: &View) {
    let area = frame.area();
    let bg = Style::default().bg(view.theme.bg);
    frame.buffer_mut().set_style(area, bg);

    let (playfield, sidebar) = layout(area, view.state);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(view.theme.div_line).bg(view.theme.bg))
        .title(Span::styled(" Blocktris ", view.theme.title));
    let board = block.inner(playfield);
    block.render(playfield, frame.buffer_mut());

    draw_matrix(frame, view.theme, board, view.state.arena.cells(), Position::default());
    draw_matrix(
        frame,
        view.theme,
        board,
        &view.state.player.matrix,
        view.state.player.pos,
    );

    draw_sidebar(frame, view, sidebar);
    if view.paused {
        draw_pause_overlay(frame, view.theme, playfield);
    }
}

/// Fill one double-width cell per occupied matrix cell, offset by `offset`.
/// Cells outside the board are skipped.
fn draw_matrix(frame: &mut Frame, theme: &Theme, board: Rect, matrix: &Matrix, offset: Position) {
    let buf = frame.buffer_mut();
    for (x, y, value) in matrix.occupied() {
        let (gx, gy) = (offset.x + x, offset.y + y);
        if gx < 0 || gy < 0 {
            continue;
        }
        let Some(color) = theme.cell_color(value) else {
            continue;
        };
        let (Ok(gx), Ok(gy)) = (u16::try_from(gx), u16::try_from(gy)) else {
            continue;
        };
        let rx = u32::from(board.x) + u32::from(gx) * u32::from(CELL_WIDTH);
        let ry = u32::from(board.y) + u32::from(gy);
        if rx + u32::from(CELL_WIDTH) > u32::from(board.x) + u32::from(board.width)
            || ry >= u32::from(board.y) + u32::from(board.height)
        {
            continue;
        }
        let (rx, ry) = (rx as u16, ry as u16);
        for dx in 0..CELL_WIDTH {
            buf[(rx + dx, ry)]
                .set_symbol("█")
                .set_style(Style::default().fg(color).bg(theme.bg));
        }
    }
}

fn draw_sidebar(frame: &mut Frame, view: &View, area: Rect) {
    let theme = view.theme;
    let title_style = Style::default().fg(theme.title);
    let fg_style = Style::default().fg(theme.main_fg);
    let help_style = Style::default().fg(theme.inactive_fg);
    let border_style = Style::default().fg(theme.div_line).bg(theme.bg);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Stats
            Constraint::Length(1), // gap
            Constraint::Length(3), // Gravity
            Constraint::Length(1), // gap
            Constraint::Length(8), // Keys
        ])
        .split(area);

    let stats_block = Block::default().borders(Borders::ALL).border_style(border_style);
    let stats_inner = stats_block.inner(chunks[0]);
    stats_block.render(chunks[0], frame.buffer_mut());
    let stat = |label: &'static str, value: String| {
        Line::from(vec![
            Span::styled(label, title_style),
            Span::styled(value, fg_style),
        ])
    };
    let stats = vec![
        stat("Score: ", view.scores.score.to_string()),
        stat("Best:  ", view.scores.best.to_string()),
        stat("Lines: ", view.state.lines_cleared.to_string()),
        stat("Games: ", (view.state.games_over + 1).to_string()),
    ];
    Paragraph::new(Text::from(stats)).render(stats_inner, frame.buffer_mut());

    let timer = &view.state.timer;
    let ratio = if timer.interval > 0 {
        (timer.counter as f64 / timer.interval as f64).clamp(0.0, 1.0)
    } else {
        0.0
    };
    Gauge::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style)
                .title(Span::styled(" Drop ", title_style)),
        )
        .ratio(ratio)
        .label("")
        .gauge_style(Style::default().fg(theme.pieces[4]).bg(theme.bg))
        .render(chunks[2], frame.buffer_mut());

    let keys = vec![
        Line::from(Span::styled("←/→  move", help_style)),
        Line::from(Span::styled("↓    soft drop", help_style)),
        Line::from(Span::styled("Q    rotate ccw", help_style)),
        Line::from(Span::styled("W/↑  rotate cw", help_style)),
        Line::from(Span::styled("P    pause", help_style)),
        Line::from(Span::styled("Esc  quit", help_style)),
    ];
    Paragraph::new(Text::from(keys))
        .block(Block::default().borders(Borders::ALL).border_style(border_style))
        .render(chunks[4], frame.buffer_mut());
}

fn draw_pause_overlay(frame: &mut Frame, theme: &Theme, area: Rect) {
    let popup_w = 20u16;
    let popup_h = 5u16;
    let popup = Rect {
        x: area.x + area.width.saturating_sub(popup_w) / 2,
        y: area.y + area.height.saturating_sub(popup_h) / 2,
        width: popup_w.min(area.width),
        height: popup_h.min(area.height),
    };
    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            " Paused ",
            Style::default().fg(Color::Black).bg(theme.title).bold(),
        )),
        Line::from(Span::styled(" P — Resume ", Style::default().fg(theme.main_fg))),
    ];
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme.div_line).bg(theme.bg)),
        )
        .style(Style::default().bg(theme.bg))
        .render(popup, frame.buffer_mut());
}

/// Create or advance the game-over flash (TachyonFX: board fades in from the
/// first piece colour to the background).
pub fn apply_game_over_flash(
    frame: &mut Frame,
    state: &GameState,
    theme: &Theme,
    effect: &mut Option<Effect>,
    process_time: &mut Option<Instant>,
    now: Instant,
) {
    let board = board_rect(frame.area(), state);
    let delta = process_time
        .map(|t| now.saturating_duration_since(t))
        .unwrap_or(std::time::Duration::ZERO);
    let delta_ms = delta.as_millis().min(u32::MAX as u128) as u32;
    *process_time = Some(now);

    let effect = effect.get_or_insert_with(|| {
        let flash = theme.pieces[0];
        fx::fade_from(flash, flash, (GAME_OVER_FLASH_MS, Interpolation::Linear)).with_area(board)
    });
    frame.render_effect(effect, board, TfxDuration::from_millis(delta_ms));
}
