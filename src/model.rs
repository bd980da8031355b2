use crate::fonts::StandardFont;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Alignment {
    Left,
    Center,
    Right,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Run {
    pub text: String,
    pub font: StandardFont,
    pub font_size: f32,
}

impl Run {
    pub fn new(text: impl Into<String>, font: StandardFont, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font,
            font_size,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Paragraph {
    pub runs: Vec<Run>,
    pub alignment: Alignment,
    /// Baseline-to-baseline distance in points.
    pub leading: f32,
    pub space_after: f32,
}

impl Paragraph {
    pub fn new(run: Run) -> Self {
        let leading = run.font_size * 1.2;
        Self {
            runs: vec![run],
            alignment: Alignment::Left,
            leading,
            space_after: 0.0,
        }
    }

    pub fn aligned(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn leading(mut self, leading: f32) -> Self {
        self.leading = leading;
        self
    }

    pub fn space_after(mut self, space: f32) -> Self {
        self.space_after = space;
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn is_text_empty(&self) -> bool {
        self.runs.iter().all(|r| r.text.trim().is_empty())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellMargins {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Default for CellMargins {
    fn default() -> Self {
        Self {
            top: 3.0,
            left: 6.0,
            bottom: 3.0,
            right: 6.0,
        }
    }
}

impl CellMargins {
    pub const NONE: CellMargins = CellMargins {
        top: 0.0,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };
}

/// Rules drawn around every cell of a table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Grid {
    pub width: f32,
    pub color: [u8; 3],
}

#[derive(Clone, Debug, PartialEq)]
pub struct Table {
    pub col_widths: Vec<f32>, // points
    pub rows: Vec<TableRow>,
    pub cell_margins: CellMargins,
    pub grid: Option<Grid>,
}

impl Table {
    pub fn width(&self) -> f32 {
        self.col_widths.iter().sum()
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
    pub shading: Option<[u8; 3]>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self {
            cells,
            shading: None,
        }
    }

    pub fn shaded(mut self, color: [u8; 3]) -> Self {
        self.shading = Some(color);
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TableCell {
    pub paragraphs: Vec<Paragraph>,
    pub grid_span: u16,
}

impl TableCell {
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraphs: vec![paragraph],
            grid_span: 1,
        }
    }

    pub fn empty() -> Self {
        Self {
            paragraphs: vec![],
            grid_span: 1,
        }
    }

    pub fn spanning(paragraph: Paragraph, grid_span: u16) -> Self {
        Self {
            paragraphs: vec![paragraph],
            grid_span,
        }
    }

    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
    Spacer(f32),
}

/// The certificate body as a flat list of blocks, top to bottom.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Table(t) => Some(t),
            _ => None,
        })
    }

    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(|b| match b {
            Block::Paragraph(p) => Some(p),
            _ => None,
        })
    }

    pub fn runs(&self) -> impl Iterator<Item = &Run> {
        self.blocks.iter().flat_map(|b| -> Box<dyn Iterator<Item = &Run> + '_> {
            match b {
                Block::Paragraph(p) => Box::new(p.runs.iter()),
                Block::Table(t) => Box::new(
                    t.rows
                        .iter()
                        .flat_map(|row| row.cells.iter())
                        .flat_map(|cell| cell.paragraphs.iter())
                        .flat_map(|p| p.runs.iter()),
                ),
                Block::Spacer(_) => Box::new(std::iter::empty()),
            }
        })
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ImageFormat {
    Jpeg,
    Png,
}

#[derive(Clone)]
pub struct EmbeddedImage {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub pixel_width: u32,
    pub pixel_height: u32,
}
