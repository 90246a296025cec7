use crate::*;

/// Ticks per second the playback engine schedules delays in.
pub const DEFAULT_TICK_RATE: u32 = 30;

pub const DEFAULT_FRAME_RATE: u32 = 15;

/// Side of one cell in playback-engine units.
pub const DEFAULT_PIXEL_SIZE: u32 = 8;

#[derive(Clone, Debug)]
pub struct Params {
    pub(crate) grid: Grid,
    pub(crate) frame_rate: u32,
    pub(crate) tick_rate: u32,
    pub(crate) pixel_size: u32,
    pub(crate) weights: Weights,
    pub(crate) filters: Vec<FilterSpec>,
    pub(crate) max_token_len: Option<usize>,
    pub(crate) bootstrap: Bootstrap,
}

impl Params {
    pub fn new(grid: Grid, frame_rate: u32, tick_rate: u32, pixel_size: u32) -> Result<Self> {
        if frame_rate == 0 {
            return Err(Error::invalid_params("frame rate must be positive"));
        }

        if tick_rate == 0 {
            return Err(Error::invalid_params("tick rate must be positive"));
        }

        if pixel_size == 0 {
            return Err(Error::invalid_params("pixel size must be positive"));
        }

        Ok(Self {
            grid,
            frame_rate,
            tick_rate,
            pixel_size,
            weights: Weights::default(),
            filters: Vec::new(),
            max_token_len: None,
            bootstrap: Bootstrap::default(),
        })
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_filters(mut self, filters: Vec<FilterSpec>) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_max_token_len(mut self, max_token_len: Option<usize>) -> Self {
        self.max_token_len = max_token_len;
        self
    }

    pub fn with_bootstrap(mut self, bootstrap: Bootstrap) -> Self {
        self.bootstrap = bootstrap;
        self
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn tick_rate(&self) -> u32 {
        self.tick_rate
    }

    pub fn pixel_size(&self) -> u32 {
        self.pixel_size
    }

    pub fn weights(&self) -> Weights {
        self.weights
    }

    pub fn filters(&self) -> &[FilterSpec] {
        &self.filters
    }

    pub fn max_token_len(&self) -> Option<usize> {
        self.max_token_len
    }

    pub fn bootstrap(&self) -> &Bootstrap {
        &self.bootstrap
    }

    /// Ticks between two consecutive frames; halves round to even and the
    /// result never drops below one tick.
    pub fn tick_delta(&self) -> u64 {
        let ratio = (self.tick_rate as f64) / (self.frame_rate as f64);

        (ratio.round_ties_even() as u64).max(1)
    }

    pub(crate) fn half_width(&self) -> i64 {
        (self.grid.width() / 2) as i64 * self.pixel_size as i64
    }

    pub(crate) fn half_height(&self) -> i64 {
        (self.grid.height() / 2) as i64 * self.pixel_size as i64
    }

    /// Left edge of a cell column, with the grid centered on the origin.
    pub(crate) fn cell_x(&self, col: u32) -> i64 {
        col as i64 * self.pixel_size as i64 - self.half_width()
    }

    /// Top edge of a cell row, with the grid centered on the origin.
    pub(crate) fn cell_y(&self, row: u32) -> i64 {
        row as i64 * self.pixel_size as i64 - self.half_height()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(frame_rate: u32, tick_rate: u32) -> Params {
        Params::new(Grid::new(4, 3).unwrap(), frame_rate, tick_rate, 8).unwrap()
    }

    #[test]
    fn tick_delta_rounds_to_whole_ticks() {
        assert_eq!(params(15, 30).tick_delta(), 2);
        assert_eq!(params(30, 30).tick_delta(), 1);
        assert_eq!(params(10, 30).tick_delta(), 3);
        assert_eq!(params(7, 30).tick_delta(), 4);
    }

    #[test]
    fn tick_delta_rounds_halves_to_even() {
        assert_eq!(params(12, 30).tick_delta(), 2);
        assert_eq!(params(4, 30).tick_delta(), 8);
    }

    #[test]
    fn tick_delta_never_drops_below_one() {
        assert_eq!(params(60, 30).tick_delta(), 1);
        assert_eq!(params(1000, 30).tick_delta(), 1);
    }

    #[test]
    fn cells_are_centered_on_the_origin() {
        let params = params(15, 30);

        assert_eq!(params.cell_x(0), -16);
        assert_eq!(params.cell_x(2), 0);
        assert_eq!(params.cell_y(0), -8);
        assert_eq!(params.cell_y(2), 8);
    }

    #[test]
    fn zero_rates_are_rejected() {
        let grid = Grid::new(1, 1).unwrap();

        assert!(Params::new(grid, 0, 30, 8).is_err());
        assert!(Params::new(grid, 15, 0, 8).is_err());
        assert!(Params::new(grid, 15, 30, 0).is_err());
    }
}
