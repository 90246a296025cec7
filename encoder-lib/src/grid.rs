use crate::*;

/// Fixed `width × height` cell layout shared by every frame of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    width: u32,
    height: u32,
}

impl Grid {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::invalid_params(format!(
                "grid must have at least one cell, got {}x{}",
                width, height
            )));
        }

        if (width as u64) * (height as u64) > u32::MAX as u64 {
            return Err(Error::invalid_params(format!(
                "grid {}x{} has too many cells",
                width, height
            )));
        }

        Ok(Self { width, height })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn cells(&self) -> usize {
        (self.width as usize) * (self.height as usize)
    }

    /// `(row, col)` of a linear cell index.
    pub fn cell_pos(&self, cell: usize) -> (u32, u32) {
        let width = self.width as usize;

        ((cell / width) as u32, (cell % width) as u32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_are_row_major() {
        let grid = Grid::new(3, 2).unwrap();

        assert_eq!(grid.cells(), 6);
        assert_eq!(grid.cell_pos(2), (0, 2));
        assert_eq!(grid.cell_pos(3), (1, 0));
        assert_eq!(grid.cell_pos(4), (1, 1));

        for cell in 0..grid.cells() {
            let (row, col) = grid.cell_pos(cell);

            assert_eq!(row as usize * 3 + col as usize, cell);
        }
    }

    #[test]
    fn empty_grid_is_rejected() {
        assert!(matches!(Grid::new(0, 5), Err(Error::InvalidParams(_))));
        assert!(matches!(Grid::new(5, 0), Err(Error::InvalidParams(_))));
    }
}
