use crate::*;
use ::image::Rgb;
use ::palette::{FromColor, Lab, Srgb};

/// Palette indices are stored as `u8`, so a palette holds at most this many colors.
pub const MAX_COLORS: usize = 256;

/// The 16-color anime / cartoon table the reference maps were built with.
pub const DEFAULT_PALETTE: [&str; 16] = [
    "000000", "2B2B2B", "6B6B6B", "E0E0E0", // linework, shading
    "8E3A20", "D67B52", "FFD6A5", // skin, warm tones
    "1C3FAA", "3E8BFF", "A6D8FF", // sky, water
    "285C2A", "54A24B", "A6E27C", // vegetation
    "F5C211", "E03C31", "C13CAD", // accents
];

#[derive(Clone, Debug, PartialEq)]
pub struct PaletteEntry {
    index: u8,
    rgb: Rgb<u8>,
    lab: Lab,
    hex: String,
}

impl PaletteEntry {
    pub fn index(&self) -> u8 {
        self.index
    }

    pub fn rgb(&self) -> Rgb<u8> {
        self.rgb
    }

    pub fn lab(&self) -> Lab {
        self.lab
    }

    /// `RRGGBB` as configured, without the leading `#`.
    pub fn hex(&self) -> &str {
        &self.hex
    }
}

/// The fixed color table, converted to CIELAB once.
#[derive(Clone, Debug, PartialEq)]
pub struct PaletteSpace {
    entries: Vec<PaletteEntry>,
}

impl PaletteSpace {
    /// Builds the table from raw colors, spelled as upper-case hex in the map.
    pub fn new(colors: &[Rgb<u8>]) -> Result<Self> {
        let colors = colors.iter().map(|&rgb| {
            let [r, g, b] = rgb.0;

            (rgb, format!("{:02X}{:02X}{:02X}", r, g, b))
        });

        Self::build(colors.collect())
    }

    /// Parses `RRGGBB` / `#RRGGBB` entries; each keeps its configured spelling.
    pub fn from_hex<S: AsRef<str>>(colors: &[S]) -> Result<Self> {
        let colors = colors
            .iter()
            .enumerate()
            .map(|(idx, hex)| {
                let hex = hex.as_ref();
                let rgb = parse_hex(hex).ok_or_else(|| {
                    Error::invalid_palette(format!(
                        "color #{} is not a hex RGB triple: {:?}",
                        idx, hex
                    ))
                })?;

                Ok((rgb, hex.strip_prefix('#').unwrap_or(hex).to_owned()))
            })
            .collect::<Result<Vec<_>>>()?;

        Self::build(colors)
    }

    fn build(colors: Vec<(Rgb<u8>, String)>) -> Result<Self> {
        if colors.is_empty() {
            return Err(Error::invalid_palette("palette has no colors"));
        }

        if colors.len() > MAX_COLORS {
            return Err(Error::invalid_palette(format!(
                "palette has {} colors, at most {} are supported",
                colors.len(),
                MAX_COLORS
            )));
        }

        let entries = colors
            .into_iter()
            .enumerate()
            .map(|(index, (rgb, hex))| PaletteEntry {
                index: index as u8,
                rgb,
                lab: to_lab(rgb),
                hex,
            })
            .collect();

        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[PaletteEntry] {
        &self.entries
    }

    pub fn entry(&self, index: u8) -> Option<&PaletteEntry> {
        self.entries.get(index as usize)
    }
}

/// Parses `RRGGBB` or `#RRGGBB`.
pub fn parse_hex(hex: &str) -> Option<Rgb<u8>> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).ok();

    Some(Rgb([channel(0)?, channel(2)?, channel(4)?]))
}

pub(crate) fn to_lab(rgb: Rgb<u8>) -> Lab {
    let [r, g, b] = rgb.0;

    Lab::from_color(Srgb::new(r, g, b).into_format::<f32>())
}

pub(crate) fn from_lab(lab: Lab) -> Rgb<u8> {
    let rgb: Srgb<u8> = Srgb::<f32>::from_color(lab).into_format();

    Rgb([rgb.red, rgb.green, rgb.blue])
}
