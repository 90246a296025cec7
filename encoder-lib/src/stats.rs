use crate::*;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Default)]
pub struct Stats {
    pub frames: usize,
    pub events: usize,
    pub bytes: usize,
    /// Events per palette index.
    pub colors: BTreeMap<u8, usize>,
}

impl Stats {
    pub(crate) fn record(&mut self, events: &[DelayedEvent]) {
        for event in events {
            *self.colors.entry(event.index).or_default() += 1;
        }
    }
}

/// Human-readable run summary; informational only.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Report {
    pub width: u32,
    pub height: u32,
    pub frame_rate: u32,
    pub frames: usize,
    pub palette_len: usize,
}

impl Report {
    pub fn new(params: &Params, palette_len: usize, frames: usize) -> Self {
        Self {
            width: params.grid().width(),
            height: params.grid().height(),
            frame_rate: params.frame_rate(),
            frames,
            palette_len,
        }
    }

    /// Whole seconds of playback.
    pub fn seconds(&self) -> usize {
        self.frames / self.frame_rate as usize
    }

    pub fn aspect_ratio(&self) -> (u32, u32) {
        let divisor = gcd(self.width, self.height).max(1);

        (self.width / divisor, self.height / divisor)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let seconds = self.seconds();
        let (aspect_w, aspect_h) = self.aspect_ratio();

        writeln!(f, "Video information:")?;
        writeln!(f)?;
        writeln!(
            f,
            "{}x{} = {} pixels",
            self.width,
            self.height,
            self.width as u64 * self.height as u64
        )?;
        writeln!(f, "{}:{} aspect ratio", aspect_w, aspect_h)?;
        writeln!(f, "{} FPS", self.frame_rate)?;
        writeln!(f, "{} frames", self.frames)?;
        writeln!(
            f,
            "Video Length: {}/{} = {}s = {}:{:02}",
            self.frames,
            self.frame_rate,
            seconds,
            seconds / 60,
            seconds % 60
        )?;
        writeln!(f, "Palette size: {}", self.palette_len)
    }
}

fn gcd(a: u32, b: u32) -> u32 {
    if b == 0 {
        a
    } else {
        gcd(b, a % b)
    }
}
