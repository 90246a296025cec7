use crate::*;
use ::image::ImageReader;
use anyhow::Context;
pub use std::path::Path;
use tracing::info;

/// Sampled video frames, in playback order.
#[derive(Debug, Default)]
pub struct Source {
    images: Vec<RgbImage>,
}

impl Source {
    /// Loads every `*.png` in `path`; file names sort into playback order.
    pub fn from_dir(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let pattern = path.as_ref().join("*.png");
        let paths = glob::glob(&pattern.to_string_lossy()).context("Couldn't find frames")?;

        let mut paths = paths
            .map(|frame| frame.context("Couldn't find frame"))
            .collect::<anyhow::Result<Vec<_>>>()?;

        paths.sort();

        let images = paths.into_iter().map(|path| -> anyhow::Result<RgbImage> {
            let image = ImageReader::open(&path)
                .with_context(|| format!("Couldn't open frame: {}", path.display()))?
                .decode()
                .with_context(|| format!("Couldn't decode frame: {}", path.display()))?;

            Ok(image.to_rgb8())
        });

        let this = Self {
            images: images.collect::<anyhow::Result<_>>()?,
        };

        info!(
            frames = this.len(),
            dir = %path.as_ref().display(),
            "loaded frames"
        );

        Ok(this)
    }

    pub fn as_slice(&self) -> &[RgbImage] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Dimensions of the first frame, which every later frame must share.
    pub fn dimensions(&self) -> Option<(u32, u32)> {
        self.images.first().map(|image| image.dimensions())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("frameplay_{}_{}", name, std::process::id()))
    }

    #[test]
    fn frames_load_in_name_order() {
        let dir = temp_dir("source_order");
        std::fs::create_dir_all(&dir).unwrap();

        for (name, shade) in [("frame_0002.png", 200u8), ("frame_0000.png", 0), ("frame_0001.png", 100)] {
            RgbImage::from_pixel(3, 2, Rgb([shade, shade, shade]))
                .save(dir.join(name))
                .unwrap();
        }

        std::fs::write(dir.join("notes.txt"), "not a frame").unwrap();

        let source = Source::from_dir(&dir).unwrap();
        let shades: Vec<u8> = source.as_slice().iter().map(|img| img.get_pixel(0, 0).0[0]).collect();

        assert_eq!(shades, vec![0, 100, 200]);
        assert_eq!(source.dimensions(), Some((3, 2)));

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_dir_has_no_dimensions() {
        let dir = temp_dir("source_empty");
        std::fs::create_dir_all(&dir).unwrap();

        let source = Source::from_dir(&dir).unwrap();

        assert!(source.is_empty());
        assert_eq!(source.dimensions(), None);

        std::fs::remove_dir_all(&dir).ok();
    }
}
