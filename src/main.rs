//! Blocktris — classic falling-block puzzle game in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::Result;
use app::App;
use blocktris::config::{DEFAULT_DROP_INTERVAL_MS, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use blocktris::GameConfig;
use clap::{Parser, ValueEnum};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> Result<()> {
    let args = Args::parse();
    let theme = theme::Theme::load(args.theme.as_deref(), args.palette)?;
    let seed = args.seed.unwrap_or_else(clock_seed);
    let config = GameConfig::new(args.width, args.height, args.drop_interval, seed)?;
    let mut app = App::new(config, theme, args.no_animation);
    app.run()?;
    Ok(())
}

fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x1234_5678)
}

/// Classic falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "blocktris",
    version,
    about = "Classic falling-block puzzle in the terminal. Clear full rows to score.",
    long_about = "Blocktris drops one piece at a time into a fixed playfield. Fill a row \
        edge-to-edge to clear it; clearing several rows with one piece doubles the bonus \
        for every extra row. When a new piece cannot enter, the board is wiped and the \
        score starts again.\n\n\
        CONTROLS:\n  Left/Right or h/l  Move    Down or j  Soft drop\n  \
        Q  Rotate CCW    W / Up / k  Rotate CW\n  P  Pause    Esc / Ctrl-C  Quit"
)]
pub struct Args {
    /// Playfield width in columns.
    #[arg(long, default_value_t = DEFAULT_WIDTH, value_name = "COLS")]
    pub width: usize,

    /// Playfield height in rows.
    #[arg(long, default_value_t = DEFAULT_HEIGHT, value_name = "ROWS")]
    pub height: usize,

    /// Milliseconds between automatic drops.
    #[arg(long, default_value_t = DEFAULT_DROP_INTERVAL_MS, value_name = "MS")]
    pub drop_interval: u64,

    /// Seed for piece selection (defaults to the system clock).
    #[arg(long, value_name = "N")]
    pub seed: Option<u64>,

    /// Path to theme file (btop-style theme[key]="value", keys piece1..piece7, bg, div_line, main_fg, title).
    #[arg(short, long, value_name = "FILE")]
    pub theme: Option<std::path::PathBuf>,

    /// Colour palette: normal (theme), high-contrast, or colorblind.
    #[arg(long, default_value = "normal")]
    pub palette: Palette,

    /// Disable the board flash when a game ends.
    #[arg(long)]
    pub no_animation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Normal,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}
