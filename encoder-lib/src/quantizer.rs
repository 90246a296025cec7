use crate::*;
use ::palette::Lab;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-axis weights of the squared CIELAB distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Weights {
    pub l: f32,
    pub a: f32,
    pub b: f32,
}

impl Default for Weights {
    /// Chroma slightly above lightness, which keeps flat colors from
    /// collapsing into grays.
    fn default() -> Self {
        Self {
            l: 0.8,
            a: 1.15,
            b: 1.15,
        }
    }
}

impl Weights {
    fn validate(&self) -> Result<()> {
        let finite_positive = |w: f32| w.is_finite() && w > 0.0;

        if finite_positive(self.l) && finite_positive(self.a) && finite_positive(self.b) {
            Ok(())
        } else {
            Err(Error::invalid_params(format!(
                "quantizer weights must be positive, got {:?}",
                self
            )))
        }
    }
}

/// Nearest-palette-color search under the weighted CIELAB metric.
#[derive(Clone, Debug)]
pub struct Quantizer<'a> {
    palette: &'a PaletteSpace,
    weights: Weights,
}

impl<'a> Quantizer<'a> {
    pub fn new(palette: &'a PaletteSpace, weights: Weights) -> Result<Self> {
        weights.validate()?;

        Ok(Self { palette, weights })
    }

    pub fn distance(&self, color: Lab, entry: &PaletteEntry) -> f32 {
        let target = entry.lab();
        let dl = color.l - target.l;
        let da = color.a - target.a;
        let db = color.b - target.b;

        self.weights.l * dl * dl + self.weights.a * da * da + self.weights.b * db * db
    }

    /// Index of the closest palette entry; exact ties go to the lowest index.
    pub fn nearest(&self, color: Lab) -> u8 {
        let mut best = 0;
        let mut best_distance = f32::INFINITY;

        for entry in self.palette.entries() {
            let distance = self.distance(color, entry);

            if distance < best_distance {
                best = entry.index();
                best_distance = distance;
            }
        }

        best
    }

    pub fn nearest_rgb(&self, rgb: Rgb<u8>) -> u8 {
        self.nearest(crate::palette::to_lab(rgb))
    }

    /// Maps every pixel, row-major, to its palette index.
    pub fn quantize(&self, img: &RgbImage) -> QuantizedFrame {
        let mut memo: HashMap<[u8; 3], u8> = HashMap::new();

        let indices = img
            .pixels()
            .map(|pixel| {
                *memo
                    .entry(pixel.0)
                    .or_insert_with(|| self.nearest_rgb(*pixel))
            })
            .collect();

        QuantizedFrame::new(img.width(), img.height(), indices)
    }
}
