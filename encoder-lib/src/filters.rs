//! Optional image-to-image passes applied before quantization.

use crate::*;
use ::palette::{FromColor, Hsv, Srgb};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt::Debug;

pub trait Filter: Debug + Send + Sync {
    fn apply(&self, img: &RgbImage) -> RgbImage;
}

const BAYER_4X4: [[f32; 4]; 4] = [
    [0.0, 8.0, 2.0, 10.0],
    [12.0, 4.0, 14.0, 6.0],
    [3.0, 11.0, 1.0, 9.0],
    [15.0, 7.0, 13.0, 5.0],
];

/// Ordered (Bayer 4×4) dithering of CIELAB lightness.
///
/// Each pixel's `L*` moves by `2 · amplitude · (m − 0.5)`, `m` being the
/// matrix entry scaled into `0..1`, so `amplitude = 1.0` gives roughly ±1 L*.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderedDither {
    pub amplitude: f32,
}

impl Filter for OrderedDither {
    fn apply(&self, img: &RgbImage) -> RgbImage {
        RgbImage::from_fn(img.width(), img.height(), |x, y| {
            let m = BAYER_4X4[(y % 4) as usize][(x % 4) as usize] / 17.0;
            let mut lab = crate::palette::to_lab(*img.get_pixel(x, y));

            lab.l = (lab.l + 2.0 * self.amplitude * (m - 0.5)).clamp(0.0, 100.0);

            crate::palette::from_lab(lab)
        })
    }
}

/// Scales HSV saturation by `amount`, clamped to the valid range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SaturationBoost {
    pub amount: f32,
}

impl Filter for SaturationBoost {
    fn apply(&self, img: &RgbImage) -> RgbImage {
        RgbImage::from_fn(img.width(), img.height(), |x, y| {
            let [r, g, b] = img.get_pixel(x, y).0;
            let mut hsv: Hsv = Hsv::from_color(Srgb::new(r, g, b).into_format::<f32>());

            hsv.saturation = (hsv.saturation * self.amount).clamp(0.0, 1.0);

            let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();

            Rgb([rgb.red, rgb.green, rgb.blue])
        })
    }
}

/// Serializable description of one filter stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FilterSpec {
    Dither {
        #[serde(default = "default_dither_amplitude")]
        amplitude: f32,
    },
    SaturationBoost {
        #[serde(default = "default_saturation_amount")]
        amount: f32,
    },
}

fn default_dither_amplitude() -> f32 {
    1.0
}

fn default_saturation_amount() -> f32 {
    1.3
}

impl FilterSpec {
    pub fn build(&self) -> Box<dyn Filter> {
        match *self {
            FilterSpec::Dither { amplitude } => Box::new(OrderedDither { amplitude }),
            FilterSpec::SaturationBoost { amount } => Box::new(SaturationBoost { amount }),
        }
    }
}

/// Enabled filters, applied in order.
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn Filter>>,
}

impl FilterChain {
    pub fn new(specs: &[FilterSpec]) -> Self {
        Self {
            filters: specs.iter().map(FilterSpec::build).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    pub fn apply<'a>(&self, img: &'a RgbImage) -> Cow<'a, RgbImage> {
        self.filters
            .iter()
            .fold(Cow::Borrowed(img), |img, filter| {
                Cow::Owned(filter.apply(&img))
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &RgbImage, b: &RgbImage) {
        for (pa, pb) in a.pixels().zip(b.pixels()) {
            for (ca, cb) in pa.0.iter().zip(pb.0.iter()) {
                assert!(ca.abs_diff(*cb) <= 1, "{:?} vs {:?}", pa, pb);
            }
        }
    }

    fn gradient() -> RgbImage {
        RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 120]))
    }

    #[test]
    fn empty_chain_borrows_the_input() {
        let img = gradient();
        let chain = FilterChain::new(&[]);

        assert!(matches!(chain.apply(&img), Cow::Borrowed(_)));
    }

    #[test]
    fn dither_only_nudges_lightness() {
        let img = gradient();
        let out = OrderedDither { amplitude: 1.0 }.apply(&img);

        assert_eq!(out.dimensions(), img.dimensions());

        for (a, b) in img.pixels().zip(out.pixels()) {
            let la = crate::palette::to_lab(*a);
            let lb = crate::palette::to_lab(*b);

            assert!((la.l - lb.l).abs() < 2.0, "{:?} -> {:?}", a, b);
        }
    }

    #[test]
    fn dither_with_zero_amplitude_is_identity() {
        let img = gradient();

        assert_close(&OrderedDither { amplitude: 0.0 }.apply(&img), &img);
    }

    #[test]
    fn saturation_boost_leaves_grays_alone() {
        let img = RgbImage::from_fn(4, 1, |x, _| {
            let v = (x * 80) as u8;
            Rgb([v, v, v])
        });

        assert_close(&SaturationBoost { amount: 1.3 }.apply(&img), &img);
    }

    #[test]
    fn saturation_boost_pushes_colors_apart() {
        let img = RgbImage::from_pixel(1, 1, Rgb([160, 120, 120]));
        let out = SaturationBoost { amount: 1.5 }.apply(&img);
        let [r, g, b] = out.get_pixel(0, 0).0;

        assert!(r.abs_diff(160) <= 1);
        assert!(g < 115 && b < 115);
    }

    #[test]
    fn specs_deserialize_with_defaults() {
        let specs: Vec<FilterSpec> =
            serde_json::from_str(r#"[{"kind": "dither"}, {"kind": "saturation_boost", "amount": 2.0}]"#)
                .unwrap();

        assert_eq!(
            specs,
            vec![
                FilterSpec::Dither { amplitude: 1.0 },
                FilterSpec::SaturationBoost { amount: 2.0 },
            ]
        );
        assert_eq!(FilterChain::new(&specs).len(), 2);
    }
}
