//! Piece kinds and their starting matrices.

use crate::matrix::{CellValue, Matrix};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Tetromino kinds (I, O, T, S, Z, J, L).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("unknown piece kind: {0:?}")]
    UnknownKind(char),
    #[error("piece kind must be a single character, got {0:?}")]
    NotOneChar(String),
}

impl PieceKind {
    /// Catalogue order used for random selection.
    pub const ALL: [Self; 7] = [Self::I, Self::L, Self::J, Self::O, Self::T, Self::S, Self::Z];

    /// Colour index carried by every occupied cell of this kind.
    pub fn color_index(self) -> CellValue {
        match self {
            Self::T => 1,
            Self::O => 2,
            Self::L => 3,
            Self::J => 4,
            Self::I => 5,
            Self::S => 6,
            Self::Z => 7,
        }
    }

    pub fn from_char(c: char) -> Result<Self, ShapeError> {
        match c.to_ascii_uppercase() {
            'I' => Ok(Self::I),
            'O' => Ok(Self::O),
            'T' => Ok(Self::T),
            'S' => Ok(Self::S),
            'Z' => Ok(Self::Z),
            'J' => Ok(Self::J),
            'L' => Ok(Self::L),
            _ => Err(ShapeError::UnknownKind(c)),
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::I => 'I',
            Self::O => 'O',
            Self::T => 'T',
            Self::S => 'S',
            Self::Z => 'Z',
            Self::J => 'J',
            Self::L => 'L',
        }
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl FromStr for PieceKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::from_char(c),
            _ => Err(ShapeError::NotOneChar(s.to_string())),
        }
    }
}

/// Fresh matrix for `kind`; every call allocates its own copy.
pub fn create_piece(kind: PieceKind) -> Matrix {
    let rows: Vec<Vec<CellValue>> = match kind {
        PieceKind::T => vec![vec![0, 0, 0], vec![1, 1, 1], vec![0, 1, 0]],
        PieceKind::O => vec![vec![2, 2], vec![2, 2]],
        PieceKind::L => vec![vec![0, 3, 0], vec![0, 3, 0], vec![0, 3, 3]],
        PieceKind::J => vec![vec![0, 4, 0], vec![0, 4, 0], vec![4, 4, 0]],
        PieceKind::I => vec![
            vec![0, 5, 0, 0],
            vec![0, 5, 0, 0],
            vec![0, 5, 0, 0],
            vec![0, 5, 0, 0],
        ],
        PieceKind::S => vec![vec![0, 6, 6], vec![6, 6, 0], vec![0, 0, 0]],
        PieceKind::Z => vec![vec![7, 7, 0], vec![0, 7, 7], vec![0, 0, 0]],
    };
    Matrix::from_rows(rows)
}

/// `create_piece` by single-letter name, e.g. `"T"`.
pub fn create_piece_named(name: &str) -> Result<Matrix, ShapeError> {
    name.parse::<PieceKind>().map(create_piece)
}
