use crate::*;
use std::num::NonZeroU64;
use tracing::{debug, warn};

/// One scheduled "set this cell to this color" invocation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DelayedEvent {
    pub frame: usize,
    pub cell: usize,
    pub index: u8,
    pub action: NonZeroU64,
    pub delay: u64,
}

/// Last emitted palette index per cell; `None` until the cell's first event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CellState {
    last: Vec<Option<u8>>,
}

impl CellState {
    pub fn new(cells: usize) -> Self {
        Self {
            last: vec![None; cells],
        }
    }

    pub fn len(&self) -> usize {
        self.last.len()
    }

    pub fn is_empty(&self) -> bool {
        self.last.is_empty()
    }

    pub fn get(&self, cell: usize) -> Option<u8> {
        self.last.get(cell).copied().flatten()
    }
}

/// Turns the quantized frame sequence into change-only delayed events.
///
/// Frames must be pushed in temporal order; each push compares every cell
/// against the state left by the previous frame and emits at most one event
/// per cell, all carrying that frame's delay.
#[derive(Clone, Debug)]
pub struct DeltaCompiler {
    grid: Grid,
    addresses: Addresses,
    tick_delta: u64,
    state: CellState,
    events: Vec<DelayedEvent>,
    frames: usize,
}

impl DeltaCompiler {
    pub fn new(grid: Grid, addresses: Addresses, tick_delta: u64) -> Self {
        Self::resume(grid, addresses, tick_delta, CellState::new(grid.cells()), 0)
    }

    /// Continues from an earlier run's state, `frames` frames in.
    pub fn resume(
        grid: Grid,
        addresses: Addresses,
        tick_delta: u64,
        state: CellState,
        frames: usize,
    ) -> Self {
        Self {
            grid,
            addresses,
            tick_delta: tick_delta.max(1),
            state,
            events: Vec::new(),
            frames,
        }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn events(&self) -> &[DelayedEvent] {
        &self.events
    }

    pub fn state(&self) -> &CellState {
        &self.state
    }

    pub fn delay(&self, frame: usize) -> u64 {
        (frame as u64) * self.tick_delta
    }

    /// Compiles the next frame and returns how many events it produced.
    ///
    /// A frame that doesn't match the grid is rejected before any state is
    /// touched, so everything compiled so far stays valid.
    pub fn push(&mut self, frame: &QuantizedFrame) -> Result<usize> {
        let t = self.frames;

        if frame.dimensions() != self.grid.dimensions() || frame.len() != self.grid.cells() {
            warn!(frame = t, "rejecting frame with mismatched size");

            return Err(Error::FrameSizeMismatch {
                frame: t,
                expected: self.grid.dimensions(),
                actual: frame.dimensions(),
            });
        }

        if self.state.len() != self.grid.cells() {
            return Err(Error::invalid_params(format!(
                "cell state tracks {} cells, grid has {}",
                self.state.len(),
                self.grid.cells()
            )));
        }

        if let Some(&index) = frame
            .indices()
            .iter()
            .find(|&&index| index as usize >= self.addresses.palette_len())
        {
            return Err(Error::invalid_params(format!(
                "frame {}: palette index {} is outside a {}-color palette",
                t,
                index,
                self.addresses.palette_len()
            )));
        }

        let delay = self.delay(t);
        let before = self.events.len();

        for (cell, (&index, last)) in frame
            .indices()
            .iter()
            .zip(self.state.last.iter_mut())
            .enumerate()
        {
            if *last == Some(index) {
                continue;
            }

            self.events.push(DelayedEvent {
                frame: t,
                cell,
                index,
                action: self.addresses.action_id(cell, index),
                delay,
            });

            *last = Some(index);
        }

        self.frames += 1;

        let emitted = self.events.len() - before;

        debug!(frame = t, delay, emitted, "compiled frame");

        Ok(emitted)
    }

    pub fn finish(self) -> (CellState, Vec<DelayedEvent>) {
        (self.state, self.events)
    }
}
