mod assemble;
mod assets;
mod compose;
mod error;
mod fonts;
pub mod model;
mod options;
mod pdf;
mod record;
pub mod schema;

pub use assemble::{Section, assemble_sections, assemble_with_schema};
pub use assets::{Assets, FOOTER_FILE, LOGO_FILE};
pub use compose::{compose, compose_sections};
pub use error::Error;
pub use fonts::StandardFont;
pub use options::{OverflowPolicy, PageGeometry, Placement, RenderOptions};
pub use pdf::Fit;
pub use record::{AllergenStatement, FieldRecord, Row, SectionKind, add_row, remove_row};

use std::path::Path;
use std::time::Instant;

const FALLBACK_FILE_NAME: &str = "COA.pdf";

/// A finished single-page certificate.
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    bytes: Vec<u8>,
    fit: Fit,
    file_name: String,
}

impl RenderedDocument {
    pub const MEDIA_TYPE: &'static str = "application/pdf";

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Uniform shrink factor applied to the body.
    pub fn scale(&self) -> f32 {
        self.fit.scale
    }

    pub fn is_clipped(&self) -> bool {
        self.fit.clipped
    }

    /// Suggested download name: the product name, or `COA.pdf` when blank.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }
}

fn download_name(product: &str) -> String {
    let cleaned: String = product
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    let cleaned = cleaned.trim().trim_matches('.');
    if cleaned.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        format!("{cleaned}.pdf")
    }
}

/// Render `record` into a one-page PDF held in memory.
///
/// Brand images are read before any layout happens, so a missing logo or
/// footer fails the call without producing bytes.
pub fn render_coa(
    record: &FieldRecord,
    assets: &Assets,
    options: &RenderOptions,
) -> Result<RenderedDocument, Error> {
    let t0 = Instant::now();

    let images = assets.load()?;
    let t_assets = t0.elapsed();

    let doc = compose(record, options.uppercase_title);
    let t_compose = t0.elapsed();

    let product = record.product_name();
    let title = if product.is_empty() {
        schema::TITLE.to_string()
    } else {
        format!("{} - {}", schema::TITLE, product)
    };
    let (bytes, fit) = pdf::render(&doc, &images, &title, options)?;
    let t_render = t0.elapsed();

    log::info!(
        "Timing: assets={:.1}ms, compose={:.1}ms, render={:.1}ms, total={:.1}ms (output {} bytes)",
        t_assets.as_secs_f64() * 1000.0,
        (t_compose - t_assets).as_secs_f64() * 1000.0,
        (t_render - t_compose).as_secs_f64() * 1000.0,
        t_render.as_secs_f64() * 1000.0,
        bytes.len(),
    );

    Ok(RenderedDocument {
        bytes,
        fit,
        file_name: download_name(product),
    })
}

/// Render and write the PDF to `output`.
pub fn write_coa_pdf(
    record: &FieldRecord,
    assets: &Assets,
    options: &RenderOptions,
    output: &Path,
) -> Result<RenderedDocument, Error> {
    let rendered = render_coa(record, assets, options)?;
    std::fs::write(output, rendered.as_bytes()).map_err(Error::Io)?;
    log::info!("Wrote {}", output.display());
    Ok(rendered)
}
