mod addressor;
mod compiler;
mod config;
mod error;
mod filters;
mod frame;
mod grid;
mod palette;
mod params;
mod quantizer;
mod serializer;
mod source;
mod stats;
pub mod token;

pub use ::image::{Rgb, RgbImage};
use rayon::iter::{IndexedParallelIterator, IntoParallelRefIterator, ParallelIterator};
use tracing::info;

pub use self::{
    addressor::*, compiler::*, config::*, error::*, filters::*, frame::*, grid::*, palette::*,
    params::*, quantizer::*, serializer::*, source::*, stats::*,
};

/// Quantizes raster frames and compiles them into a playback map.
///
/// Frames are accepted in order through [`Encoder::add`] / [`Encoder::push`];
/// a rejected frame leaves everything accepted before it intact, and
/// [`Encoder::finish`] still renders that prefix.
#[derive(Debug)]
pub struct Encoder<'a> {
    params: &'a Params,
    palette: &'a PaletteSpace,
    addresses: Addresses,
    filters: FilterChain,
    quantizer: Quantizer<'a>,
    compiler: DeltaCompiler,
    stats: Stats,
}

impl<'a> Encoder<'a> {
    pub fn new(params: &'a Params, palette: &'a PaletteSpace) -> Result<Self> {
        let grid = params.grid();
        let addresses = Addresses::new(grid, palette.len(), params.max_token_len())?;
        let quantizer = Quantizer::new(palette, params.weights())?;
        let compiler = DeltaCompiler::new(grid, addresses, params.tick_delta());

        info!(
            width = grid.width(),
            height = grid.height(),
            colors = palette.len(),
            tick_delta = params.tick_delta(),
            filters = params.filters().len(),
            "encoder ready"
        );

        Ok(Self {
            params,
            palette,
            addresses,
            filters: FilterChain::new(params.filters()),
            quantizer,
            compiler,
            stats: Default::default(),
        })
    }

    pub fn addresses(&self) -> &Addresses {
        &self.addresses
    }

    pub fn events(&self) -> &[DelayedEvent] {
        self.compiler.events()
    }

    pub fn frames(&self) -> usize {
        self.compiler.frames()
    }

    /// Filters and quantizes frame `t`; pure, so frames may be processed in
    /// any order or in parallel.
    pub fn quantize(&self, t: usize, img: &RgbImage) -> Result<QuantizedFrame> {
        let expected = self.params.grid().dimensions();

        if img.dimensions() != expected {
            return Err(Error::FrameSizeMismatch {
                frame: t,
                expected,
                actual: img.dimensions(),
            });
        }

        let img = self.filters.apply(img);

        Ok(self.quantizer.quantize(&img))
    }

    /// Compiles the next frame in sequence.
    pub fn push(&mut self, frame: QuantizedFrame) -> Result<()> {
        self.stats.events += self.compiler.push(&frame)?;
        self.stats.frames += 1;

        Ok(())
    }

    pub fn add(&mut self, img: &RgbImage) -> Result<()> {
        let frame = self.quantize(self.frames(), img)?;

        self.push(frame)
    }

    /// Quantizes `images` in parallel, then compiles them in order; stops at
    /// the first frame that fails.
    pub fn add_all(&mut self, images: &[RgbImage]) -> Result<()> {
        let start = self.frames();

        let frames: Vec<_> = images
            .par_iter()
            .enumerate()
            .map(|(idx, img)| self.quantize(start + idx, img))
            .collect();

        for frame in frames {
            self.push(frame?)?;
        }

        Ok(())
    }

    pub fn finish(self) -> Result<(Stats, String)> {
        let mut stats = self.stats;
        let (_, events) = self.compiler.finish();
        let map = serializer::render(self.params, self.palette, &self.addresses, &events)?;

        stats.record(&events);
        stats.bytes = map.len();

        info!(
            frames = stats.frames,
            events = stats.events,
            bytes = stats.bytes,
            "map rendered"
        );

        Ok((stats, map))
    }
}
