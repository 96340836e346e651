//! Theme loading: btop-style `theme[key]="value"` and hex → ratatui Color.

use blocktris::CellValue;
use ratatui::style::Color;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Default piece colours, indexed by cell value 1..=7.
const CLASSIC_PIECES: [&str; 7] = [
    "#FF0D72", "#0DC2FF", "#0DFF72", "#F538FF", "#FF8E0D", "#FFE138", "#3877FF",
];

/// Piece colours and UI colours, optionally loaded from a theme file.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Piece colours for cell values 1..=7 (index 0 is value 1).
    pub pieces: [Color; 7],
    /// Playfield background.
    pub bg: Color,
    /// Grid / border.
    pub div_line: Color,
    /// Text (score, lines).
    pub main_fg: Color,
    /// Highlight / titles.
    pub title: Color,
    /// Secondary text (key help).
    pub inactive_fg: Color,
}

#[derive(Debug, Error)]
pub enum ThemeError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

impl Default for Theme {
    fn default() -> Self {
        Self::classic()
    }
}

fn hex_palette(hex: [&str; 7]) -> [Color; 7] {
    hex.map(|h| parse_hex(h).unwrap_or(Color::White))
}

impl Theme {
    /// Black board with the classic seven piece colours.
    pub fn classic() -> Self {
        Self {
            pieces: hex_palette(CLASSIC_PIECES),
            bg: Color::Rgb(0, 0, 0),
            div_line: Color::Rgb(0x3F, 0x44, 0x4F),
            main_fg: Color::Rgb(0xAB, 0xB2, 0xBF),
            title: Color::Rgb(0xE5, 0xC0, 0x7B),
            inactive_fg: Color::Rgb(0x5C, 0x63, 0x70),
        }
    }

    /// Load theme from a btop-style file: `theme[key]="value"` or `theme[key]='value'`.
    /// Falls back to defaults if path is None or the file is missing.
    pub fn load(path: Option<&Path>, palette: crate::Palette) -> Result<Self, ThemeError> {
        let path = match path {
            Some(p) if p.exists() => p,
            _ => return Ok(Self::default_for_palette(palette)),
        };
        let s = std::fs::read_to_string(path)?;
        let map = parse_theme_file(&s);
        let mut theme = Self::from_map(&map);
        theme.apply_palette(palette);
        Ok(theme)
    }

    fn default_for_palette(palette: crate::Palette) -> Self {
        let mut t = Self::classic();
        t.apply_palette(palette);
        t
    }

    /// Override piece colours for high-contrast or colorblind play.
    pub fn apply_palette(&mut self, palette: crate::Palette) {
        match palette {
            crate::Palette::Normal => {}
            crate::Palette::HighContrast => {
                self.pieces = hex_palette([
                    "#FF0000", "#00FFFF", "#00FF00", "#FF00FF", "#FF8800", "#FFFF00", "#0055FF",
                ]);
            }
            crate::Palette::Colorblind => {
                // Okabe-Ito
                self.pieces = hex_palette([
                    "#D55E00", "#56B4E9", "#009E73", "#CC79A7", "#E69F00", "#F0E442", "#0072B2",
                ]);
            }
        }
    }

    fn from_map(map: &HashMap<String, String>) -> Self {
        let get = |key: &str| {
            map.get(key)
                .and_then(|v| parse_hex(v.trim_matches('"').trim_matches('\'').trim()).ok())
        };
        let defaults = Self::classic();
        let mut pieces = defaults.pieces;
        for (i, slot) in pieces.iter_mut().enumerate() {
            if let Some(c) = get(&format!("piece{}", i + 1)) {
                *slot = c;
            }
        }
        Self {
            pieces,
            bg: get("bg").or_else(|| get("main_bg")).unwrap_or(defaults.bg),
            div_line: get("div_line").unwrap_or(defaults.div_line),
            main_fg: get("main_fg").unwrap_or(defaults.main_fg),
            title: get("title").unwrap_or(defaults.title),
            inactive_fg: get("inactive_fg").unwrap_or(defaults.inactive_fg),
        }
    }

    /// Colour for an occupied cell value; `None` for empty.
    #[inline]
    pub fn cell_color(&self, value: CellValue) -> Option<Color> {
        match value {
            0 => None,
            v => Some(self.pieces[(v as usize - 1) % 7]),
        }
    }
}

/// Parse btop-style theme file into key -> value map.
fn parse_theme_file(s: &str) -> HashMap<String, String> {
    let mut map = HashMap::new();
    for line in s.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some(stripped) = line.strip_prefix("theme[") {
            if let Some(end) = stripped.find(']') {
                let key = stripped[..end].trim();
                let rest = stripped[end + 1..].trim();
                if let Some(eq) = rest.find('=') {
                    let value = rest[eq + 1..]
                        .trim()
                        .trim_matches('"')
                        .trim_matches('\'')
                        .to_string();
                    if !value.is_empty() {
                        map.insert(key.to_string(), value);
                    }
                }
            }
        }
    }
    map
}

/// Parse hex colour "#RRGGBB" or "#RGB" into ratatui Color.
pub fn parse_hex(s: &str) -> Result<Color, ThemeError> {
    let s = s.trim().trim_start_matches('#');
    if !s.is_ascii() {
        return Err(ThemeError::InvalidHex(s.to_string()));
    }
    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&s[range], 16).map_err(|_| ThemeError::InvalidHex(s.to_string()))
    };
    let (r, g, b) = match s.len() {
        6 => (channel(0..2)?, channel(2..4)?, channel(4..6)?),
        3 => (channel(0..1)? * 17, channel(1..2)? * 17, channel(2..3)? * 17),
        _ => return Err(ThemeError::InvalidHex(s.to_string())),
    };
    Ok(Color::Rgb(r, g, b))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_6() {
        let c = parse_hex("#FF0D72").unwrap();
        assert!(matches!(c, Color::Rgb(0xFF, 0x0D, 0x72)));
    }

    #[test]
    fn test_parse_hex_3() {
        let c = parse_hex("#FFF").unwrap();
        assert!(matches!(c, Color::Rgb(255, 255, 255)));
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(parse_hex("#12").is_err());
        assert!(parse_hex("#GG0000").is_err());
    }

    #[test]
    fn test_parse_theme_line() {
        let map = parse_theme_file(r##"theme[piece3]="#31353F""##);
        assert_eq!(map.get("piece3"), Some(&"#31353F".to_string()));
    }

    #[test]
    fn test_theme_file_overrides_one_piece() {
        let map = parse_theme_file("theme[piece2]='#000080'\n# comment\n");
        let theme = Theme::from_map(&map);
        assert_eq!(theme.cell_color(2), Some(Color::Rgb(0, 0, 0x80)));
        assert_eq!(theme.cell_color(1), Theme::classic().cell_color(1));
    }

    #[test]
    fn test_empty_cell_has_no_colour() {
        let theme = Theme::classic();
        assert_eq!(theme.cell_color(0), None);
        let distinct: std::collections::HashSet<_> =
            (1..=7).filter_map(|v| theme.cell_color(v)).map(|c| format!("{:?}", c)).collect();
        assert_eq!(distinct.len(), 7);
    }
}
