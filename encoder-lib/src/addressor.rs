use crate::*;
use std::num::NonZeroU64;

/// Identifier layout for one grid and palette.
///
/// Cells and actions share a single positive-integer space: cell `c` (in
/// row-major order) is `c + 1`, and its bank of `K` actions follows all cells,
/// at `C + 1 + c·K + k`. Banks are therefore contiguous per cell and ordered
/// by palette index, and no two entities ever share an identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Addresses {
    cells: u64,
    palette_len: u64,
}

impl Addresses {
    pub fn new(grid: Grid, palette_len: usize, max_token_len: Option<usize>) -> Result<Self> {
        if palette_len == 0 {
            return Err(Error::invalid_palette("palette has no colors"));
        }

        let this = Self {
            cells: grid.cells() as u64,
            palette_len: palette_len as u64,
        };

        if let Some(max) = max_token_len {
            let id = this.last_id();
            let len = token::len(id);

            if len > max {
                return Err(Error::AddressSpaceExhausted {
                    id: id.get(),
                    len,
                    max,
                });
            }
        }

        Ok(this)
    }

    pub fn cells(&self) -> usize {
        self.cells as usize
    }

    pub fn palette_len(&self) -> usize {
        self.palette_len as usize
    }

    pub fn cell_id(&self, cell: usize) -> NonZeroU64 {
        NonZeroU64::MIN.saturating_add(cell as u64)
    }

    pub fn bank_start(&self, cell: usize) -> NonZeroU64 {
        NonZeroU64::MIN.saturating_add(self.cells + (cell as u64) * self.palette_len)
    }

    pub fn action_id(&self, cell: usize, index: u8) -> NonZeroU64 {
        self.bank_start(cell).saturating_add(index as u64)
    }

    /// The largest identifier handed out, i.e. the total entity count.
    pub fn last_id(&self) -> NonZeroU64 {
        NonZeroU64::MIN.saturating_add(self.cells * (self.palette_len + 1) - 1)
    }

    pub fn cell_token(&self, cell: usize) -> String {
        token::encode(self.cell_id(cell))
    }

    pub fn action_token(&self, cell: usize, index: u8) -> String {
        token::encode(self.action_id(cell, index))
    }
}
