//! Single-page fitting: lay the body out at its natural size, then shrink it
//! uniformly into the printable frame.

use pdf_writer::Content;

use crate::error::Error;
use crate::model::{Block, Document};
use crate::options::{OverflowPolicy, PageGeometry};

use super::layout::{ParagraphLayout, layout_paragraph, render_paragraph_lines};
use super::table::{TableLayout, layout_table, render_table};

pub(super) enum BlockLayout {
    Paragraph(ParagraphLayout),
    Table(TableLayout),
    Spacer(f32),
}

impl BlockLayout {
    fn height(&self) -> f32 {
        match self {
            BlockLayout::Paragraph(p) => p.height(),
            BlockLayout::Table(t) => t.height,
            BlockLayout::Spacer(h) => *h,
        }
    }
}

pub(super) struct BodyLayout {
    blocks: Vec<BlockLayout>,
    pub(super) width: f32,
    pub(super) height: f32,
}

/// Result of fitting the body into the frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    /// Uniform factor applied to the body, in `(0, 1]`.
    pub scale: f32,
    /// True when content below the frame was cut off.
    pub clipped: bool,
}

/// Lay out every block at natural size for a frame `frame_width` wide.
pub(super) fn layout_body(doc: &Document, frame_width: f32) -> BodyLayout {
    let blocks: Vec<BlockLayout> = doc
        .blocks
        .iter()
        .map(|block| match block {
            Block::Paragraph(p) => BlockLayout::Paragraph(layout_paragraph(p, frame_width)),
            Block::Table(t) => BlockLayout::Table(layout_table(t)),
            Block::Spacer(h) => BlockLayout::Spacer(h.max(0.0)),
        })
        .collect();

    let width = blocks
        .iter()
        .filter_map(|b| match b {
            BlockLayout::Table(t) => Some(t.width),
            _ => None,
        })
        .fold(frame_width, f32::max);
    let height = blocks.iter().map(BlockLayout::height).sum();

    BodyLayout {
        blocks,
        width,
        height,
    }
}

/// Pick the largest scale at which a `natural_width` x `natural_height` body
/// fits a `frame_width` x `frame_height` frame, never enlarging it.
pub(super) fn fit_scale(
    natural_width: f32,
    natural_height: f32,
    frame_width: f32,
    frame_height: f32,
    min_scale: f32,
    policy: OverflowPolicy,
) -> Result<Fit, Error> {
    let floor = if min_scale.is_finite() && min_scale > 0.0 {
        min_scale.min(1.0)
    } else {
        crate::options::RenderOptions::DEFAULT_MIN_SCALE
    };

    let mut required = 1.0f32;
    if natural_width > 0.0 {
        required = required.min(frame_width / natural_width);
    }
    if natural_height > 0.0 {
        required = required.min(frame_height / natural_height);
    }
    let required = required.max(0.0);

    if required >= floor {
        return Ok(Fit {
            scale: required,
            clipped: false,
        });
    }

    match policy {
        OverflowPolicy::Clip => {
            log::warn!(
                "body needs scale {:.3} but the floor is {:.3}; content below the frame is clipped",
                required,
                floor
            );
            Ok(Fit {
                scale: floor,
                clipped: true,
            })
        }
        OverflowPolicy::Fail => Err(Error::Overflow {
            required_scale: required,
            min_scale: floor,
        }),
    }
}

/// Page position of the body's top-left corner. A shrunk body stays
/// horizontally centred in the frame and keeps its top edge on the frame top.
pub(super) fn body_origin(geometry: &PageGeometry, body_width: f32, scale: f32) -> (f32, f32) {
    let slack = (geometry.frame_width() - body_width * scale).max(0.0);
    (geometry.margin_left + slack / 2.0, geometry.frame_top())
}

/// Emit the body into `content`, scaled by `fit.scale` and clipped to the frame.
pub(super) fn render_body(
    content: &mut Content,
    doc: &Document,
    layout: &BodyLayout,
    geometry: &PageGeometry,
    fit: Fit,
) {
    let frame_left = geometry.margin_left;
    let frame_top = geometry.frame_top();
    let frame_w = geometry.frame_width();
    let frame_h = geometry.frame_height();
    let s = fit.scale;

    content.save_state();
    content.rect(frame_left, frame_top - frame_h, frame_w, frame_h);
    content.clip_nonzero();
    content.end_path();

    // Body coordinates: origin at the body's top-left, y grows downwards as negative.
    let (origin_x, origin_y) = body_origin(geometry, layout.width, s);
    content.transform([s, 0.0, 0.0, s, origin_x, origin_y]);

    let mut cursor_y = 0.0f32;
    for (block, block_layout) in doc.blocks.iter().zip(&layout.blocks) {
        match (block, block_layout) {
            (Block::Paragraph(p), BlockLayout::Paragraph(pl)) => {
                render_paragraph_lines(content, pl, p.alignment, 0.0, layout.width, cursor_y);
            }
            (Block::Table(t), BlockLayout::Table(tl)) => {
                let left = (layout.width - tl.width) / 2.0;
                render_table(t, tl, content, left, cursor_y);
            }
            _ => {}
        }
        cursor_y -= block_layout.height();
    }

    content.restore_state();
}
