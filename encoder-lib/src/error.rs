use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid palette: {0}")]
    InvalidPalette(String),

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error(
        "frame {frame}: expected {}x{} pixels, got {}x{}",
        .expected.0, .expected.1, .actual.0, .actual.1
    )]
    FrameSizeMismatch {
        frame: usize,
        expected: (u32, u32),
        actual: (u32, u32),
    },

    #[error("identifier {id} needs a {len}-letter token, the format allows at most {max}")]
    AddressSpaceExhausted { id: u64, len: usize, max: usize },

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub fn invalid_palette(msg: impl Into<String>) -> Self {
        Self::InvalidPalette(msg.into())
    }

    pub fn invalid_params(msg: impl Into<String>) -> Self {
        Self::InvalidParams(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_size_mismatch_names_frame_and_dimensions() {
        let err = Error::FrameSizeMismatch {
            frame: 7,
            expected: (44, 33),
            actual: (40, 30),
        };

        assert_eq!(err.to_string(), "frame 7: expected 44x33 pixels, got 40x30");
    }

    #[test]
    fn other_preserves_source() {
        let err = Error::from(anyhow::anyhow!("boom"));

        assert!(err.to_string().contains("boom"));
    }
}
