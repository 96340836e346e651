//! Active piece: matrix, position and score, with collision-checked moves.

use crate::arena::{Arena, Position};
use crate::matrix::{Matrix, Rotation};
use crate::shape::{PieceKind, create_piece};

#[derive(Debug, Clone)]
pub struct Player {
    pub kind: PieceKind,
    pub matrix: Matrix,
    pub pos: Position,
    pub score: u64,
}

impl Player {
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            matrix: create_piece(kind),
            pos: Position::default(),
            score: 0,
        }
    }

    /// Column that centres a piece of `piece_width` in an arena of `arena_width`.
    pub fn spawn_x(arena_width: usize, piece_width: usize) -> i32 {
        (arena_width / 2) as i32 - (piece_width / 2) as i32
    }

    /// Replace the piece with a fresh `kind` at the top, horizontally centred.
    /// Returns false if the spawn position already collides.
    pub fn spawn(&mut self, arena: &Arena, kind: PieceKind) -> bool {
        self.kind = kind;
        self.matrix = create_piece(kind);
        self.pos = Position::new(Self::spawn_x(arena.width(), self.matrix.width()), 0);
        !self.collides(arena)
    }

    #[inline]
    pub fn collides(&self, arena: &Arena) -> bool {
        arena.collides(&self.matrix, self.pos)
    }

    /// Shift by `dir` columns; reverted if the result collides.
    pub fn shift(&mut self, arena: &Arena, dir: i32) -> bool {
        self.pos.x += dir;
        if self.collides(arena) {
            self.pos.x -= dir;
            return false;
        }
        true
    }

    /// Rotate in place, then kick sideways until the piece fits.
    ///
    /// Kick offsets alternate +1, -1, +2, -2, ... around the starting column; the
    /// search gives up once the next offset exceeds the matrix width, restoring
    /// both orientation and column. Returns whether the rotation stood.
    pub fn rotate(&mut self, arena: &Arena, rotation: Rotation) -> bool {
        let start_x = self.pos.x;
        let mut offset: i32 = 1;
        self.matrix.rotate(rotation);
        while self.collides(arena) {
            self.pos.x += offset;
            offset = -(offset + offset.signum());
            if offset > self.matrix.width() as i32 {
                self.matrix.rotate(rotation.inverse());
                self.pos.x = start_x;
                return false;
            }
        }
        true
    }

    /// Move one row down. On collision the row is restored and false returned.
    pub fn step_down(&mut self, arena: &Arena) -> bool {
        self.pos.y += 1;
        if self.collides(arena) {
            self.pos.y -= 1;
            return false;
        }
        true
    }
}
