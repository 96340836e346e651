//! Arena: the settled-cell playfield, collision, merge and line sweep.

use crate::matrix::{CellValue, EMPTY, Matrix};

/// Points for the first row of a sweep; each further row doubles.
pub const LINE_SCORE: u64 = 10;

/// Top-left offset of a piece matrix in arena coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Result of one sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sweep {
    pub rows: u32,
    pub score: u64,
}

/// Playfield. y=0 is the top row; dimensions are fixed at creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arena {
    cells: Matrix,
}

impl Arena {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            cells: Matrix::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.cells.width()
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.cells.height()
    }

    pub fn cells(&self) -> &Matrix {
        &self.cells
    }

    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellValue> {
        self.cells.get(x, y)
    }

    /// Direct cell write, mainly for setting up positions. Out of bounds is ignored.
    pub fn set(&mut self, x: i32, y: i32, value: CellValue) -> bool {
        self.cells.set(x, y, value)
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Wipe every settled cell.
    pub fn clear(&mut self) {
        self.cells.fill_empty();
    }

    /// True if any occupied piece cell lands on a settled cell or off the arena.
    /// Positions outside the arena count as occupied.
    pub fn collides(&self, piece: &Matrix, pos: Position) -> bool {
        piece
            .occupied()
            .any(|(x, y, _)| self.get(pos.x + x, pos.y + y) != Some(EMPTY))
    }

    /// Write the piece's occupied cells into the arena at `pos`.
    pub fn merge(&mut self, piece: &Matrix, pos: Position) {
        for (x, y, value) in piece.occupied() {
            self.cells.set(pos.x + x, pos.y + y, value);
        }
    }

    /// Clear full rows bottom-up, stopping above row 0.
    ///
    /// A cleared row moves to the top as an empty row, so the same index is
    /// examined again. Each clear scores `row_count * LINE_SCORE` and doubles
    /// `row_count`, which starts at 1 per call: N rows give `10 * (2^N - 1)`.
    pub fn sweep(&mut self) -> Sweep {
        let mut result = Sweep::default();
        let mut row_count: u64 = 1;
        let mut y = self.height().saturating_sub(1);
        while y > 0 {
            if !self.cells.is_row_full(y) {
                y -= 1;
                continue;
            }
            self.cells.recycle_row_to_top(y);
            result.rows += 1;
            result.score = result
                .score
                .saturating_add(row_count.saturating_mul(LINE_SCORE));
            row_count = row_count.saturating_mul(2);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{PieceKind, create_piece};

    fn fill_row(arena: &mut Arena, y: i32, value: CellValue) {
        for x in 0..arena.width() as i32 {
            arena.set(x, y, value);
        }
    }

    #[test]
    fn test_new_arena_is_empty() {
        let arena = Arena::new(12, 20);
        assert_eq!(arena.width(), 12);
        assert_eq!(arena.height(), 20);
        assert!(arena.is_empty());
    }

    #[test]
    fn test_collides_with_walls_and_floor() {
        let arena = Arena::new(12, 20);
        let o = create_piece(PieceKind::O);
        assert!(!arena.collides(&o, Position::new(0, 0)));
        assert!(!arena.collides(&o, Position::new(10, 18)));
        assert!(arena.collides(&o, Position::new(-1, 0)));
        assert!(arena.collides(&o, Position::new(11, 0)));
        assert!(arena.collides(&o, Position::new(0, 19)));
        assert!(arena.collides(&o, Position::new(0, -1)));
    }

    #[test]
    fn test_empty_piece_cells_may_hang_off_the_edge() {
        let arena = Arena::new(12, 20);
        // I piece occupies column 1 of its 4x4 matrix only.
        let i = create_piece(PieceKind::I);
        assert!(!arena.collides(&i, Position::new(-1, 0)));
        assert!(arena.collides(&i, Position::new(-2, 0)));
        assert!(!arena.collides(&i, Position::new(10, 0)));
        assert!(arena.collides(&i, Position::new(11, 0)));
    }

    #[test]
    fn test_collides_with_settled_cell() {
        let mut arena = Arena::new(12, 20);
        arena.set(5, 5, 3);
        let o = create_piece(PieceKind::O);
        assert!(arena.collides(&o, Position::new(4, 4)));
        assert!(arena.collides(&o, Position::new(5, 5)));
        assert!(!arena.collides(&o, Position::new(6, 5)));
        assert!(!arena.collides(&o, Position::new(3, 4)));
    }

    #[test]
    fn test_merge_writes_values() {
        let mut arena = Arena::new(12, 20);
        let t = create_piece(PieceKind::T);
        arena.merge(&t, Position::new(2, 3));
        assert_eq!(arena.get(2, 4), Some(1));
        assert_eq!(arena.get(3, 4), Some(1));
        assert_eq!(arena.get(4, 4), Some(1));
        assert_eq!(arena.get(3, 5), Some(1));
        assert_eq!(arena.get(2, 3), Some(0));
        assert_eq!(arena.cells().occupied().count(), 4);
    }

    #[test]
    fn test_sweep_empty_is_noop() {
        let mut arena = Arena::new(12, 20);
        assert_eq!(arena.sweep(), Sweep::default());
    }

    #[test]
    fn test_sweep_single_row() {
        let mut arena = Arena::new(4, 5);
        fill_row(&mut arena, 4, 2);
        arena.set(0, 3, 6);
        let sweep = arena.sweep();
        assert_eq!(sweep, Sweep { rows: 1, score: 10 });
        assert_eq!(arena.get(0, 4), Some(6));
        assert!(arena.cells().rows()[0].iter().all(|&v| v == 0));
    }

    #[test]
    fn test_sweep_escalating_score() {
        for n in 0..=6u32 {
            let mut arena = Arena::new(5, 6);
            for k in 0..n {
                fill_row(&mut arena, 5 - k as i32, 4);
            }
            let sweep = arena.sweep();
            assert_eq!(sweep.rows, n);
            assert_eq!(sweep.score, 10 * ((1u64 << n) - 1), "n={}", n);
            assert!(arena.is_empty());
        }
    }

    #[test]
    fn test_sweep_non_adjacent_rows_keep_order() {
        let mut arena = Arena::new(3, 6);
        fill_row(&mut arena, 5, 1);
        arena.set(0, 4, 2);
        fill_row(&mut arena, 3, 1);
        arena.set(1, 2, 3);
        let sweep = arena.sweep();
        assert_eq!(sweep, Sweep { rows: 2, score: 30 });
        assert_eq!(arena.get(0, 5), Some(2));
        assert_eq!(arena.get(1, 4), Some(3));
        assert_eq!(arena.cells().occupied().count(), 2);
    }

    #[test]
    fn test_sweep_is_idempotent() {
        let mut arena = Arena::new(4, 6);
        fill_row(&mut arena, 5, 1);
        fill_row(&mut arena, 4, 1);
        arena.set(2, 3, 7);
        arena.sweep();
        let after = arena.clone();
        assert_eq!(arena.sweep(), Sweep::default());
        assert_eq!(arena, after);
    }

    #[test]
    fn test_sweep_zero_width_is_noop() {
        let mut arena = Arena::new(0, 4);
        assert_eq!(arena.sweep(), Sweep::default());
        assert_eq!(arena.height(), 4);
    }

    #[test]
    fn test_sweep_does_not_examine_top_row() {
        let mut arena = Arena::new(3, 4);
        fill_row(&mut arena, 0, 5);
        assert_eq!(arena.sweep(), Sweep::default());
        assert!(arena.cells().is_row_full(0));
    }
}
