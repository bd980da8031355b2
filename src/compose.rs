//! Turns a record into the certificate's block list: title, product table,
//! specification table, remarks and declaration.

use crate::assemble::{Section, assemble_sections};
use crate::fonts::StandardFont;
use crate::model::{Alignment, Block, CellMargins, Document, Grid, Paragraph, Run, Table, TableCell, TableRow};
use crate::record::FieldRecord;
use crate::schema::{
    COMPLIANCE, DECLARATION, DECLARATION_HEADING, PRODUCT_INFO, REMARKS, SPEC_HEADERS, TITLE,
};

const BODY_SIZE: f32 = 10.0;
const BODY_LEADING: f32 = 12.0;
const TITLE_SIZE: f32 = 12.0;

const TABLE_WIDTH: f32 = 500.0;
const INFO_COLUMNS: [f32; 2] = [140.0, 360.0];
const SPEC_COLUMN_SHARES: [f32; 4] = [0.23, 0.39, 0.18, 0.20];
const DECLARATION_COLUMNS: [f32; 5] = [80.0, 150.0, 75.0, 100.0, 95.0];

const GRID: Grid = Grid {
    width: 0.5,
    color: [0, 0, 0],
};
const HEADER_SHADING: [u8; 3] = [211, 211, 211];

fn body(text: impl Into<String>) -> Paragraph {
    Paragraph::new(Run::new(text, StandardFont::TimesRoman, BODY_SIZE)).leading(BODY_LEADING)
}

fn styled(text: impl Into<String>, font: StandardFont) -> Paragraph {
    Paragraph::new(Run::new(text, font, BODY_SIZE)).leading(BODY_LEADING)
}

fn title(text: impl Into<String>, size: f32) -> Paragraph {
    Paragraph::new(Run::new(text, StandardFont::TimesBold, size))
        .aligned(Alignment::Center)
        .leading(BODY_LEADING)
}

pub fn compose(record: &FieldRecord, uppercase_title: bool) -> Document {
    let sections = assemble_sections(record);
    compose_sections(record, &sections, uppercase_title)
}

pub fn compose_sections(
    record: &FieldRecord,
    sections: &[Section],
    uppercase_title: bool,
) -> Document {
    let mut blocks = vec![
        Block::Spacer(3.0),
        Block::Paragraph(title(TITLE, TITLE_SIZE).space_after(1.0)),
    ];

    let product = record.product_name();
    if !product.is_empty() {
        let line = if uppercase_title {
            product.to_uppercase()
        } else {
            product.to_string()
        };
        blocks.push(Block::Paragraph(title(line, TITLE_SIZE).space_after(1.0)));
    }
    blocks.push(Block::Spacer(3.0));

    if let Some(info) = product_info_table(record) {
        blocks.push(Block::Table(info));
    }

    blocks.push(Block::Table(specification_table(sections)));
    blocks.push(Block::Spacer(2.0));

    blocks.push(Block::Paragraph(title(DECLARATION_HEADING, BODY_SIZE)));
    blocks.push(Block::Table(declaration_table(record)));
    blocks.push(Block::Spacer(3.0));

    Document { blocks }
}

/// Label/value rows for every product field with a non-blank value.
fn product_info_table(record: &FieldRecord) -> Option<Table> {
    let rows: Vec<TableRow> = PRODUCT_INFO
        .iter()
        .filter_map(|field| {
            let value = record.get(field.key).trim();
            if value.is_empty() {
                return None;
            }
            let font = if field.italic {
                StandardFont::TimesItalic
            } else {
                StandardFont::TimesRoman
            };
            Some(TableRow::new(vec![
                TableCell::new(body(field.label)),
                TableCell::new(styled(value, font)),
            ]))
        })
        .collect();

    if rows.is_empty() {
        return None;
    }
    Some(Table {
        col_widths: INFO_COLUMNS.to_vec(),
        rows,
        cell_margins: CellMargins::default(),
        grid: Some(GRID),
    })
}

fn specification_table(sections: &[Section]) -> Table {
    let ncols = SPEC_HEADERS.len() as u16;
    let mut rows = vec![
        TableRow::new(SPEC_HEADERS.iter().map(|h| TableCell::new(body(*h))).collect())
            .shaded(HEADER_SHADING),
    ];

    for section in sections {
        rows.push(TableRow::new(vec![TableCell::spanning(
            styled(section.title(), StandardFont::HelveticaBold),
            ncols,
        )]));
        for row in &section.rows {
            rows.push(TableRow::new(
                [&row.parameter, &row.specification, &row.result, &row.method]
                    .into_iter()
                    .map(|cell| TableCell::new(body(cell.trim())))
                    .collect(),
            ));
        }
    }

    rows.push(TableRow::new(vec![TableCell::spanning(body(REMARKS), ncols)]));
    rows.push(TableRow::new(vec![TableCell::spanning(
        styled(COMPLIANCE, StandardFont::HelveticaBold).aligned(Alignment::Center),
        ncols,
    )]));

    Table {
        col_widths: SPEC_COLUMN_SHARES
            .iter()
            .map(|s| (TABLE_WIDTH * s).round())
            .collect(),
        rows,
        cell_margins: CellMargins::default(),
        grid: Some(GRID),
    }
}

fn declaration_table(record: &FieldRecord) -> Table {
    let rows = DECLARATION
        .iter()
        .map(|line| {
            let right_value = line
                .right_value
                .unwrap_or(record.allergen_statement.as_str());
            TableRow::new(vec![
                TableCell::new(styled(line.left_label, StandardFont::Helvetica)),
                TableCell::new(body(line.left_value)),
                TableCell::empty(),
                TableCell::new(styled(line.right_label, StandardFont::Helvetica)),
                TableCell::new(body(right_value)),
            ])
        })
        .collect();

    Table {
        col_widths: DECLARATION_COLUMNS.to_vec(),
        rows,
        cell_margins: CellMargins::NONE,
        grid: None,
    }
}
