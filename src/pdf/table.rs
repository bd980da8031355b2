use pdf_writer::Content;

use crate::model::Table;

use super::layout::{ParagraphLayout, layout_paragraph, render_paragraph_lines};

struct CellLayout {
    x: f32, // relative to the table's left edge
    width: f32,
    paragraphs: Vec<ParagraphLayout>,
}

struct RowLayout {
    height: f32,
    cells: Vec<CellLayout>,
}

pub(super) struct TableLayout {
    rows: Vec<RowLayout>,
    pub(super) width: f32,
    pub(super) height: f32,
}

fn span_width(col_widths: &[f32], grid_col: usize, span: usize) -> f32 {
    let end = col_widths.len().min(grid_col + span);
    col_widths[grid_col.min(end)..end].iter().sum()
}

/// Wrap every cell to its column width and size each row to its tallest cell.
pub(super) fn layout_table(table: &Table) -> TableLayout {
    let cm = &table.cell_margins;
    let rows: Vec<RowLayout> = table
        .rows
        .iter()
        .enumerate()
        .map(|(ri, row)| {
            let mut grid_col = 0usize;
            let mut max_h: f32 = 0.0;
            let cells: Vec<CellLayout> = row
                .cells
                .iter()
                .map(|cell| {
                    let span = cell.grid_span.max(1) as usize;
                    let x: f32 = table.col_widths[..grid_col.min(table.col_widths.len())]
                        .iter()
                        .sum();
                    let width = span_width(&table.col_widths, grid_col, span);
                    grid_col += span;

                    let text_w = (width - cm.left - cm.right).max(1.0);
                    let paragraphs: Vec<ParagraphLayout> = cell
                        .paragraphs
                        .iter()
                        .map(|p| layout_paragraph(p, text_w))
                        .collect();
                    let content_h: f32 = paragraphs.iter().map(ParagraphLayout::height).sum();
                    max_h = max_h.max(cm.top + content_h + cm.bottom);

                    CellLayout {
                        x,
                        width,
                        paragraphs,
                    }
                })
                .collect();

            log::debug!("TABLE row={} row_h={:.2} cells={}", ri, max_h, cells.len());
            RowLayout {
                height: max_h,
                cells,
            }
        })
        .collect();

    TableLayout {
        width: table.width(),
        height: rows.iter().map(|r| r.height).sum(),
        rows,
    }
}

/// Draw a laid-out table with its top-left corner at (`left`, `top`).
pub(super) fn render_table(
    table: &Table,
    layout: &TableLayout,
    content: &mut Content,
    left: f32,
    top: f32,
) {
    let cm = &table.cell_margins;
    let mut row_top = top;

    for (row, row_layout) in table.rows.iter().zip(&layout.rows) {
        let row_h = row_layout.height;
        let row_bottom = row_top - row_h;

        if let Some([r, g, b]) = row.shading {
            content.save_state();
            content.set_fill_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            content.rect(left, row_bottom, layout.width, row_h);
            content.fill_nonzero();
            content.restore_state();
        }

        for (cell, cell_layout) in row.cells.iter().zip(&row_layout.cells) {
            let text_x = left + cell_layout.x + cm.left;
            let text_w = (cell_layout.width - cm.left - cm.right).max(0.0);
            let mut para_top = row_top - cm.top;
            for (para, para_layout) in cell.paragraphs.iter().zip(&cell_layout.paragraphs) {
                render_paragraph_lines(
                    content,
                    para_layout,
                    para.alignment,
                    text_x,
                    text_w,
                    para_top,
                );
                para_top -= para_layout.height();
            }
        }

        if let Some(grid) = table.grid {
            let [r, g, b] = grid.color;
            content.save_state();
            content.set_line_width(grid.width);
            content.set_stroke_rgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0);
            for cell_layout in &row_layout.cells {
                content.rect(left + cell_layout.x, row_bottom, cell_layout.width, row_h);
            }
            content.stroke();
            content.restore_state();
        }

        row_top = row_bottom;
    }
}

/// True when every wrapped line sits inside its cell's text box.
#[cfg(test)]
pub(super) fn cells_fit(table: &Table, layout: &TableLayout) -> bool {
    let cm = &table.cell_margins;
    layout.rows.iter().all(|row| {
        row.cells.iter().all(|cell| {
            let text_w = cell.width - cm.left - cm.right;
            cell.paragraphs
                .iter()
                .all(|p| p.max_line_width() <= text_w + 1e-3)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fonts::StandardFont;
    use crate::model::{CellMargins, Paragraph, Run, TableCell, TableRow};

    fn cell(text: &str) -> TableCell {
        TableCell::new(Paragraph::new(Run::new(text, StandardFont::TimesRoman, 10.0)).leading(12.0))
    }

    fn table(rows: Vec<TableRow>) -> Table {
        Table {
            col_widths: vec![100.0, 200.0],
            rows,
            cell_margins: CellMargins::default(),
            grid: None,
        }
    }

    #[test]
    fn row_height_is_tallest_cell() {
        let long = "word ".repeat(60);
        let t = table(vec![
            TableRow::new(vec![cell("Moisture"), cell("NMT 5%")]),
            TableRow::new(vec![cell(&long), cell("x")]),
        ]);
        let layout = layout_table(&t);
        assert!((layout.rows[0].height - 18.0).abs() < 1e-4);
        assert!(layout.rows[1].height > 18.0);
        assert!((layout.height - layout.rows.iter().map(|r| r.height).sum::<f32>()).abs() < 1e-4);
        assert!(cells_fit(&t, &layout));
    }

    #[test]
    fn spanning_cell_uses_full_width() {
        let t = table(vec![TableRow::new(vec![TableCell::spanning(
            Paragraph::new(Run::new("Physical", StandardFont::HelveticaBold, 10.0)),
            2,
        )])]);
        let layout = layout_table(&t);
        assert_eq!(layout.rows[0].cells[0].width, 300.0);
        assert_eq!(layout.width, 300.0);
    }

    #[test]
    fn empty_cell_only_takes_margins() {
        let t = table(vec![TableRow::new(vec![TableCell::empty(), TableCell::empty()])]);
        assert_eq!(layout_table(&t).height, 6.0);
    }
}
