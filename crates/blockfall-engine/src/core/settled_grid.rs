use super::color::Rgb;

/// One row of settled cells; `None` is an empty cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridRow {
    cells: Vec<Option<Rgb>>,
}

impl GridRow {
    fn empty(columns: usize) -> Self {
        Self {
            cells: vec![None; columns],
        }
    }

    #[must_use]
    pub fn cells(&self) -> &[Option<Rgb>] {
        &self.cells
    }

    /// Checks whether every cell of the row is occupied.
    #[must_use]
    pub fn is_filled(&self) -> bool {
        self.cells.iter().all(Option::is_some)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

/// The pile of locked cells, `rows × columns`, row 0 at the top.
///
/// Cells only change in two ways: an empty cell receives a color when a
/// piece locks, or a whole row is removed and an empty row enters at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettledGrid {
    columns: usize,
    rows: Vec<GridRow>,
}

impl SettledGrid {
    #[must_use]
    pub fn new(columns: usize, rows: usize) -> Self {
        Self {
            columns,
            rows: vec![GridRow::empty(columns); rows],
        }
    }

    #[must_use]
    pub fn columns(&self) -> usize {
        self.columns
    }

    #[must_use]
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn rows(&self) -> impl Iterator<Item = &GridRow> {
        self.rows.iter()
    }

    #[must_use]
    pub fn row(&self, row: usize) -> &GridRow {
        &self.rows[row]
    }

    /// Color of the cell at `(row, col)`, or `None` if it is empty or lies
    /// outside the grid.
    #[must_use]
    pub fn get(&self, row: i32, col: i32) -> Option<Rgb> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.rows.get(row)?.cells.get(col).copied().flatten()
    }

    /// Checks whether `(row, col)` is inside the grid and occupied.
    #[must_use]
    pub fn is_occupied(&self, row: i32, col: i32) -> bool {
        self.get(row, col).is_some()
    }

    /// Writes a color into an empty cell.
    ///
    /// # Panics
    ///
    /// Panics if the cell is outside the grid or already occupied.
    pub fn fill(&mut self, row: usize, col: usize, color: Rgb) {
        let cell = &mut self.rows[row].cells[col];
        assert!(cell.is_none(), "settled cell ({row}, {col}) is already occupied");
        *cell = Some(color);
    }

    /// Indices of completely filled rows, top to bottom.
    pub fn filled_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter_map(|(i, row)| row.is_filled().then_some(i))
    }

    /// Removes one row and inserts an empty row at the top; rows above the
    /// removed one shift down by one.
    pub fn remove_row(&mut self, row: usize) {
        self.rows.remove(row);
        self.rows.insert(0, GridRow::empty(self.columns));
    }

    /// Number of occupied cells in the whole grid.
    #[must_use]
    pub fn occupied_count(&self) -> usize {
        self.rows
            .iter()
            .map(|row| row.cells.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}
