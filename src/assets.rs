use std::io::Cursor;
use std::path::{Path, PathBuf};

use crate::error::Error;
use crate::model::{EmbeddedImage, ImageFormat};

pub const LOGO_FILE: &str = "tru_herb_logo.png";
pub const FOOTER_FILE: &str = "footer.png";
const DEFAULT_DIR: &str = "images";

/// Locations of the brand images composited onto every certificate.
#[derive(Clone, Debug, PartialEq)]
pub struct Assets {
    pub logo: PathBuf,
    pub footer: PathBuf,
}

pub(crate) struct BrandImages {
    pub(crate) logo: EmbeddedImage,
    pub(crate) footer: EmbeddedImage,
}

impl Assets {
    pub fn new(logo: impl Into<PathBuf>, footer: impl Into<PathBuf>) -> Self {
        Self {
            logo: logo.into(),
            footer: footer.into(),
        }
    }

    pub fn from_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(LOGO_FILE), dir.join(FOOTER_FILE))
    }

    /// `$COA_ASSETS` when set, otherwise `./images`.
    pub fn default_dir() -> PathBuf {
        std::env::var_os("COA_ASSETS")
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DIR))
    }

    /// Read both images. Any absent file aborts before anything is rendered.
    pub(crate) fn load(&self) -> Result<BrandImages, Error> {
        Ok(BrandImages {
            logo: load_image(&self.logo)?,
            footer: load_image(&self.footer)?,
        })
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::from_dir(Self::default_dir())
    }
}

fn load_image(path: &Path) -> Result<EmbeddedImage, Error> {
    // Absent, unreadable or not a file: all the same failure for a brand image.
    let data = std::fs::read(path).map_err(|e| {
        log::warn!("cannot read asset {}: {}", path.display(), e);
        Error::MissingAsset {
            path: path.to_path_buf(),
        }
    })?;

    let format = match image::guess_format(&data) {
        Ok(image::ImageFormat::Png) => ImageFormat::Png,
        Ok(image::ImageFormat::Jpeg) => ImageFormat::Jpeg,
        Ok(other) => {
            return Err(Error::Image(format!(
                "{}: unsupported image format {other:?}",
                path.display()
            )));
        }
        Err(e) => return Err(Error::Image(format!("{}: {e}", path.display()))),
    };

    let (pixel_width, pixel_height) = image::ImageReader::new(Cursor::new(&data))
        .with_guessed_format()
        .map_err(|e| Error::Image(format!("{}: {e}", path.display())))?
        .into_dimensions()
        .map_err(|e| Error::Image(format!("{}: {e}", path.display())))?;

    log::debug!(
        "asset {}: {:?} {}x{}",
        path.display(),
        format,
        pixel_width,
        pixel_height
    );

    Ok(EmbeddedImage {
        data,
        format,
        pixel_width,
        pixel_height,
    })
}
