use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    /// A brand image (logo or footer banner) is absent or cannot be read.
    #[error("missing asset: {}", path.display())]
    MissingAsset { path: PathBuf },

    /// Content still overflows the frame at the smallest allowed scale.
    #[error(
        "content does not fit on one page: needs scale {required_scale:.3}, minimum is {min_scale:.3}"
    )]
    Overflow { required_scale: f32, min_scale: f32 },

    #[error("image error: {0}")]
    Image(String),

    #[error("invalid record: {0}")]
    InvalidRecord(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
