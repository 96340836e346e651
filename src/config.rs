//! Validated game settings.

use thiserror::Error;

pub const DEFAULT_WIDTH: usize = 12;
pub const DEFAULT_HEIGHT: usize = 20;
pub const DEFAULT_DROP_INTERVAL_MS: u64 = 1000;

/// Smallest arena side that still fits the 4x4 I piece.
pub const MIN_SIDE: usize = 4;

/// Largest arena side; keeps the double-width playfield within terminal
/// coordinates.
pub const MAX_SIDE: usize = 1024;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("arena width {0} is below the minimum of {MIN_SIDE}")]
    WidthTooSmall(usize),
    #[error("arena height {0} is below the minimum of {MIN_SIDE}")]
    HeightTooSmall(usize),
    #[error("arena width {0} is above the maximum of {MAX_SIDE}")]
    WidthTooLarge(usize),
    #[error("arena height {0} is above the maximum of {MAX_SIDE}")]
    HeightTooLarge(usize),
    #[error("drop interval must be greater than 0 ms")]
    ZeroDropInterval,
}

/// Arena size, gravity interval and the seed for piece selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub width: usize,
    pub height: usize,
    pub drop_interval_ms: u64,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            drop_interval_ms: DEFAULT_DROP_INTERVAL_MS,
            seed: 0x1234_5678,
        }
    }
}

impl GameConfig {
    pub fn new(
        width: usize,
        height: usize,
        drop_interval_ms: u64,
        seed: u64,
    ) -> Result<Self, ConfigError> {
        if width < MIN_SIDE {
            return Err(ConfigError::WidthTooSmall(width));
        }
        if height < MIN_SIDE {
            return Err(ConfigError::HeightTooSmall(height));
        }
        if width > MAX_SIDE {
            return Err(ConfigError::WidthTooLarge(width));
        }
        if height > MAX_SIDE {
            return Err(ConfigError::HeightTooLarge(height));
        }
        if drop_interval_ms == 0 {
            return Err(ConfigError::ZeroDropInterval);
        }
        Ok(Self {
            width,
            height,
            drop_interval_ms,
            seed,
        })
    }
}
