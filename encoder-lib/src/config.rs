use crate::*;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// User-facing run configuration, read from JSON. Every field is optional.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Hex RGB triples; position is the palette index.
    pub palette: Vec<String>,
    pub frame_rate: u32,
    pub tick_rate: u32,
    pub pixel_size: u32,
    /// Grid override; the first frame's size is used otherwise.
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub weights: Weights,
    pub filters: Vec<FilterSpec>,
    /// Longest identifier token the playback engine accepts.
    pub max_token_len: Option<usize>,
    pub player_name: String,
    pub zoom: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|hex| hex.to_string()).collect(),
            frame_rate: DEFAULT_FRAME_RATE,
            tick_rate: DEFAULT_TICK_RATE,
            pixel_size: DEFAULT_PIXEL_SIZE,
            width: None,
            height: None,
            weights: Weights::default(),
            filters: Vec::new(),
            max_token_len: None,
            player_name: DEFAULT_PLAYER_NAME.to_owned(),
            zoom: DEFAULT_ZOOM,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Couldn't read config: {}", path.display()))?;

        Self::from_json(&json).with_context(|| format!("Couldn't parse config: {}", path.display()))
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn palette_space(&self) -> Result<PaletteSpace> {
        PaletteSpace::from_hex(&self.palette)
    }

    /// Picks the configured grid, falling back to the source's frame size.
    pub fn grid(&self, source: Option<(u32, u32)>) -> Result<Grid> {
        match (self.width, self.height, source) {
            (Some(width), Some(height), _) => Grid::new(width, height),
            (None, None, Some((width, height))) => Grid::new(width, height),
            (None, None, None) => Err(Error::invalid_params(
                "no frames to take the grid size from; set width and height",
            )),
            _ => Err(Error::invalid_params(
                "width and height must be configured together",
            )),
        }
    }

    pub fn params(&self, grid: Grid) -> Result<Params> {
        Ok(Params::new(grid, self.frame_rate, self.tick_rate, self.pixel_size)?
            .with_weights(self.weights)
            .with_filters(self.filters.clone())
            .with_max_token_len(self.max_token_len)
            .with_bootstrap(Bootstrap {
                player_name: self.player_name.clone(),
                zoom: self.zoom,
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_the_defaults() {
        let config = Config::from_json("{}").unwrap();

        assert_eq!(config, Config::default());
        assert_eq!(config.palette.len(), 16);
        assert_eq!(config.palette_space().unwrap().len(), 16);
    }

    #[test]
    fn fields_override_defaults() {
        let config = Config::from_json(
            r##"{
                "palette": ["000000", "#FFFFFF"],
                "frame_rate": 10,
                "weights": {"l": 1.0, "a": 1.0, "b": 1.0},
                "filters": [{"kind": "saturation_boost"}],
                "player_name": "Viewer"
            }"##,
        )
        .unwrap();

        let params = config.params(Grid::new(4, 3).unwrap()).unwrap();

        assert_eq!(config.palette_space().unwrap().len(), 2);
        assert_eq!(params.tick_delta(), 3);
        assert_eq!(params.weights().l, 1.0);
        assert_eq!(
            params.filters(),
            &[FilterSpec::SaturationBoost { amount: 1.3 }]
        );
        assert_eq!(params.bootstrap().player_name, "Viewer");
        assert_eq!(params.bootstrap().zoom, DEFAULT_ZOOM);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(Config::from_json(r#"{"fps": 10}"#).is_err());
    }

    #[test]
    fn grid_prefers_configuration_over_frames() {
        let mut config = Config::default();

        assert_eq!(config.grid(Some((44, 33))).unwrap().dimensions(), (44, 33));
        assert!(config.grid(None).is_err());

        config.width = Some(8);
        assert!(config.grid(Some((44, 33))).is_err());

        config.height = Some(6);
        assert_eq!(config.grid(Some((44, 33))).unwrap().dimensions(), (8, 6));
        assert_eq!(config.grid(None).unwrap().dimensions(), (8, 6));
    }
}
