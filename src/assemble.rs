use crate::record::{FieldRecord, Row, SectionKind};
use crate::schema::{SECTIONS, SectionSchema};

/// A section that made it into the report: at least one complete row.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub rows: Vec<Row>,
}

impl Section {
    pub fn title(&self) -> &'static str {
        self.kind.title()
    }
}

pub fn assemble_sections(record: &FieldRecord) -> Vec<Section> {
    assemble_with_schema(record, SECTIONS)
}

/// Base rows in schema order, then the record's extra rows in insertion order,
/// keeping only complete rows. Sections left empty are dropped.
pub fn assemble_with_schema(record: &FieldRecord, schema: &[SectionSchema]) -> Vec<Section> {
    schema
        .iter()
        .filter_map(|section| {
            let base_rows = section
                .rows
                .iter()
                .map(|base| record.base_row(base.label, base.key));
            let extra_rows = record.extra_rows(section.kind).iter().cloned();

            let rows: Vec<Row> = base_rows
                .chain(extra_rows)
                .filter(Row::is_complete)
                .collect();

            log::debug!(
                "section {:?}: {} complete row(s)",
                section.kind,
                rows.len()
            );

            (!rows.is_empty()).then_some(Section {
                kind: section.kind,
                rows,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn described() -> FieldRecord {
        FieldRecord::new()
            .with("description_spec", "Brown powder")
            .with("description_result", "Complies")
            .with("description_method", "Visual")
    }

    #[test]
    fn single_complete_base_row() {
        let sections = assemble_sections(&described());
        assert_eq!(
            sections,
            vec![Section {
                kind: SectionKind::Physical,
                rows: vec![Row::new("Description", "Brown powder", "Complies", "Visual")],
            }]
        );
    }

    #[test]
    fn partial_base_row_is_dropped() {
        let record = described().with("description_result", "");
        assert!(assemble_sections(&record).is_empty());
    }

    #[test]
    fn extra_rows_follow_base_rows_in_order() {
        let record = described().with_extra_rows(
            SectionKind::Physical,
            vec![
                Row::new("Colour", "Brown", "Brown", "Visual"),
                Row::new("Odour", "Characteristic", "", "Organoleptic"),
                Row::new("Taste", "Bitter", "Bitter", "Organoleptic"),
            ],
        );
        let params: Vec<String> = assemble_sections(&record)[0]
            .rows
            .iter()
            .map(|r| r.parameter.clone())
            .collect();
        assert_eq!(params, vec!["Description", "Colour", "Taste"]);
    }

    #[test]
    fn extra_rows_alone_create_a_section() {
        let record = FieldRecord::new().with_extra_rows(
            SectionKind::ResidualSolvent,
            vec![Row::new("Ethanol", "NMT 5000 ppm", "120 ppm", "GC-HS")],
        );
        let sections = assemble_sections(&record);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title(), "Residual Solvent");
    }

    #[test]
    fn incomplete_extra_rows_leave_no_section() {
        let record = FieldRecord::new().with_extra_rows(
            SectionKind::Assays,
            vec![
                Row::new("Withanolides", "NLT 2.5%", "", "HPLC"),
                Row::new("Withaferin A", "NLT 1%", "1.2%", ""),
            ],
        );
        assert!(assemble_sections(&record).is_empty());
    }

    #[test]
    fn sections_keep_report_order() {
        let record = FieldRecord::new()
            .with("coliforms_spec", "NMT 10 cfu/g")
            .with("coliforms_result", "<10 cfu/g")
            .with("coliforms_method", "USP<62>")
            .with("lead_spec", "NMT 1 ppm")
            .with("lead_result", "0.2 ppm")
            .with("lead_method", "ICP-MS");
        let kinds: Vec<SectionKind> = assemble_sections(&record).iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Others, SectionKind::MicrobiologicalProfile]
        );
    }

    #[test]
    fn template_defaults_only_complete_rows_survive() {
        let sections = assemble_sections(&FieldRecord::template());
        let physical = &sections[0];
        assert_eq!(physical.kind, SectionKind::Physical);
        let params: Vec<&str> = physical.rows.iter().map(|r| r.parameter.as_str()).collect();
        assert_eq!(params, vec!["Description", "Identification"]);
        assert!(sections.iter().all(|s| s.kind != SectionKind::Others));
    }
}
