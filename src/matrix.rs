//! Rectangular cell matrix shared by the arena and the falling piece.

/// Cell value: 0 is empty, 1..=7 is a settled or falling colour index.
pub type CellValue = u8;

/// Empty cell.
pub const EMPTY: CellValue = 0;

/// Quarter-turn direction.
///
/// Rotation is a transpose followed by either reversing every row (clockwise)
/// or reversing the order of the rows (counter-clockwise).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    pub fn inverse(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// Row-major grid of cell values. `rows[y][x]`, y=0 is the top row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    rows: Vec<Vec<CellValue>>,
    width: usize,
}

impl Matrix {
    /// All-empty matrix of `width` columns by `height` rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            rows: (0..height).map(|_| vec![EMPTY; width]).collect(),
            width,
        }
    }

    /// Build from literal rows. Short rows are padded with empty cells up to
    /// the longest row.
    pub fn from_rows(mut rows: Vec<Vec<CellValue>>) -> Self {
        let width = rows.iter().map(Vec::len).max().unwrap_or(0);
        for row in &mut rows {
            row.resize(width, EMPTY);
        }
        Self { rows, width }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    /// Signed lookup; `None` when (x, y) lies outside the matrix.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> Option<CellValue> {
        if x < 0 || y < 0 {
            return None;
        }
        self.rows
            .get(y as usize)
            .and_then(|row| row.get(x as usize))
            .copied()
    }

    /// Signed write; returns false (and writes nothing) when out of bounds.
    #[inline]
    pub fn set(&mut self, x: i32, y: i32, value: CellValue) -> bool {
        if x < 0 || y < 0 {
            return false;
        }
        match self
            .rows
            .get_mut(y as usize)
            .and_then(|row| row.get_mut(x as usize))
        {
            Some(cell) => {
                *cell = value;
                true
            }
            None => false,
        }
    }

    /// Non-empty cells as (x, y, value), row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (i32, i32, CellValue)> + '_ {
        self.rows.iter().enumerate().flat_map(|(y, row)| {
            row.iter()
                .enumerate()
                .filter(|(_, v)| **v != EMPTY)
                .map(move |(x, v)| (x as i32, y as i32, *v))
        })
    }

    /// A zero-width row is never full.
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| !row.is_empty() && row.iter().all(|&v| v != EMPTY))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().flatten().all(|&v| v == EMPTY)
    }

    /// Set every cell to empty. Dimensions are unchanged.
    pub fn fill_empty(&mut self) {
        for row in &mut self.rows {
            row.fill(EMPTY);
        }
    }

    /// Remove row `y`, zero it and reinsert it at the top; rows above `y`
    /// shift down by one. Returns false if `y` is out of range.
    pub fn recycle_row_to_top(&mut self, y: usize) -> bool {
        if y >= self.rows.len() {
            return false;
        }
        let mut row = self.rows.remove(y);
        row.fill(EMPTY);
        self.rows.insert(0, row);
        true
    }

    /// Rotate a quarter turn in place.
    ///
    /// Square matrices are transposed by swapping across the diagonal. A
    /// rectangular matrix is transposed into a new buffer (its width and height
    /// swap); piece matrices are always square.
    pub fn rotate(&mut self, rotation: Rotation) {
        if self.width == self.rows.len() {
            let n = self.width;
            for y in 0..n {
                for x in 0..y {
                    let a = self.rows[y][x];
                    self.rows[y][x] = self.rows[x][y];
                    self.rows[x][y] = a;
                }
            }
        } else {
            let (w, h) = (self.width, self.rows.len());
            let transposed: Vec<Vec<CellValue>> = (0..w)
                .map(|x| (0..h).map(|y| self.rows[y][x]).collect())
                .collect();
            self.rows = transposed;
            self.width = h;
        }

        match rotation {
            Rotation::Clockwise => self.rows.iter_mut().for_each(|row| row.reverse()),
            Rotation::CounterClockwise => self.rows.reverse(),
        }
    }
}
