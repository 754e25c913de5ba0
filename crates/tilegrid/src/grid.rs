use crate::GridError;

/// Row-major 2D raster. Row 0 is the northern edge.
///
/// The shape is fixed at construction; every accessor relies on
/// `data.len() == rows * cols`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid<T> {
    rows: usize,
    cols: usize,
    data: Vec<T>,
}

impl<T: Clone> Grid<T> {
    /// A `rows x cols` grid filled with `value`.
    pub fn filled(rows: usize, cols: usize, value: T) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }
}

impl<T> Grid<T> {
    /// Wrap row-major `data` as a `rows x cols` grid.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<T>) -> Result<Self, GridError> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(GridError::DataLength {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build a grid from nested rows, north first.
    pub fn from_rows(rows: Vec<Vec<T>>) -> Result<Self, GridError> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        if let Some(row) = rows.iter().find(|r| r.len() != n_cols) {
            return Err(GridError::ShapeMismatch {
                expected_rows: n_rows,
                expected_cols: n_cols,
                rows: n_rows,
                cols: row.len(),
            });
        }
        let data: Vec<T> = rows.into_iter().flatten().collect();
        Self::from_vec(n_rows, n_cols, data)
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    #[inline]
    pub fn data(&self) -> &[T] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<&T> {
        if row < self.rows && col < self.cols {
            self.data.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// Apply `f` to every cell, keeping the shape.
    pub fn map<U, F: FnMut(&T) -> U>(&self, f: F) -> Grid<U> {
        Grid {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    /// Rows as slices, north to south.
    pub fn row_slices(&self) -> impl Iterator<Item = &[T]> + '_ {
        self.data.chunks(self.cols.max(1)).take(self.rows)
    }
}
