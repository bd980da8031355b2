use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::schema;

/// Specification sections in the order they appear in the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SectionKind {
    Physical,
    Others,
    Assays,
    Pesticides,
    ResidualSolvent,
    MicrobiologicalProfile,
}

impl SectionKind {
    pub const ALL: [SectionKind; 6] = [
        SectionKind::Physical,
        SectionKind::Others,
        SectionKind::Assays,
        SectionKind::Pesticides,
        SectionKind::ResidualSolvent,
        SectionKind::MicrobiologicalProfile,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Physical => "Physical",
            SectionKind::Others => "Others",
            SectionKind::Assays => "Assays",
            SectionKind::Pesticides => "Pesticides",
            SectionKind::ResidualSolvent => "Residual Solvent",
            SectionKind::MicrobiologicalProfile => "Microbiological Profile",
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AllergenStatement {
    #[default]
    #[serde(rename = "Free from allergen")]
    FreeFromAllergen,
    #[serde(rename = "Contains Allergen")]
    ContainsAllergen,
}

impl AllergenStatement {
    pub fn as_str(self) -> &'static str {
        match self {
            AllergenStatement::FreeFromAllergen => "Free from allergen",
            AllergenStatement::ContainsAllergen => "Contains Allergen",
        }
    }
}

/// One line of the specification table: parameter, specification, result, method.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Row {
    pub parameter: String,
    pub specification: String,
    pub result: String,
    pub method: String,
}

impl Row {
    pub fn new(
        parameter: impl Into<String>,
        specification: impl Into<String>,
        result: impl Into<String>,
        method: impl Into<String>,
    ) -> Self {
        Self {
            parameter: parameter.into(),
            specification: specification.into(),
            result: result.into(),
            method: method.into(),
        }
    }

    /// A row reaches the table only when specification, result and method all
    /// carry text. The parameter name is not part of the rule.
    pub fn is_complete(&self) -> bool {
        [&self.specification, &self.result, &self.method]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

/// Returns `rows` with `row` appended.
pub fn add_row(rows: &[Row], row: Row) -> Vec<Row> {
    let mut out = rows.to_vec();
    out.push(row);
    out
}

/// Returns `rows` without the entry at `index`. Out-of-range indices leave the list unchanged.
pub fn remove_row(rows: &[Row], index: usize) -> Vec<Row> {
    rows.iter()
        .enumerate()
        .filter(|&(i, _)| i != index)
        .map(|(_, r)| r.clone())
        .collect()
}

/// Flat set of named form values plus the user-added rows of each section.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldRecord {
    pub fields: BTreeMap<String, String>,
    pub extra_rows: BTreeMap<SectionKind, Vec<Row>>,
    pub allergen_statement: AllergenStatement,
}

impl FieldRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record pre-filled with the values the entry form starts out with.
    pub fn template() -> Self {
        let mut record = Self::new();
        for &(key, value) in schema::FORM_DEFAULTS {
            record.set(key, value);
        }
        for section in schema::SECTIONS {
            for base in section.rows {
                for suffix in schema::ROW_SUFFIXES {
                    let key = format!("{}_{}", base.key, suffix);
                    record.fields.entry(key).or_default();
                }
            }
        }
        for info in schema::PRODUCT_INFO {
            record.fields.entry(info.key.to_string()).or_default();
        }
        record
    }

    pub fn from_json(text: &str) -> Result<Self, Error> {
        serde_json::from_str(text).map_err(|e| Error::InvalidRecord(e.to_string()))
    }

    pub fn to_json(&self) -> Result<String, Error> {
        serde_json::to_string_pretty(self).map_err(|e| Error::InvalidRecord(e.to_string()))
    }

    /// Value of `key`; absent keys read as an empty string.
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(key.into(), value.into());
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(key, value);
        self
    }

    pub fn with_extra_rows(mut self, section: SectionKind, rows: Vec<Row>) -> Self {
        self.extra_rows.insert(section, rows);
        self
    }

    pub fn with_allergen(mut self, statement: AllergenStatement) -> Self {
        self.allergen_statement = statement;
        self
    }

    pub fn extra_rows(&self, section: SectionKind) -> &[Row] {
        self.extra_rows
            .get(&section)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// The base row stored under `prefix_spec`, `prefix_result` and `prefix_method`.
    pub fn base_row(&self, label: &str, prefix: &str) -> Row {
        Row::new(
            label,
            self.get(&format!("{prefix}_spec")),
            self.get(&format!("{prefix}_result")),
            self.get(&format!("{prefix}_method")),
        )
    }

    /// Returns a copy with the three cells of one base row emptied.
    pub fn clear_base_row(&self, prefix: &str) -> Self {
        let mut out = self.clone();
        for suffix in schema::ROW_SUFFIXES {
            out.set(format!("{prefix}_{suffix}"), "");
        }
        out
    }

    pub fn product_name(&self) -> &str {
        self.get("product_name").trim()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn completeness_requires_all_three_cells() {
        assert!(Row::new("Moisture", "NMT 5%", "3.2%", "USP<921>").is_complete());
        assert!(Row::new("", "NMT 5%", "3.2%", "USP<921>").is_complete());
        assert!(!Row::new("Moisture", "NMT 5%", "", "USP<921>").is_complete());
        assert!(!Row::new("Moisture", "NMT 5%", "3.2%", "   ").is_complete());
        assert!(!Row::default().is_complete());
    }

    #[test]
    fn add_and_remove_return_new_lists() {
        let rows = vec![Row::new("A", "1", "1", "1")];
        let added = add_row(&rows, Row::new("B", "2", "2", "2"));
        assert_eq!(rows.len(), 1);
        assert_eq!(added.len(), 2);
        assert_eq!(added[1].parameter, "B");

        let removed = remove_row(&added, 0);
        assert_eq!(removed, vec![Row::new("B", "2", "2", "2")]);
        assert_eq!(remove_row(&added, 7), added);
    }

    #[test]
    fn missing_keys_read_empty() {
        let record = FieldRecord::new().with("batch_no", "B1");
        assert_eq!(record.get("batch_no"), "B1");
        assert_eq!(record.get("product_code"), "");
        assert!(record.extra_rows(SectionKind::Assays).is_empty());
    }

    #[test]
    fn clear_base_row_empties_triplet_only() {
        let record = FieldRecord::template();
        let cleared = record.clear_base_row("description");
        assert_eq!(cleared.get("description_spec"), "");
        assert_eq!(cleared.get("description_result"), "");
        assert_eq!(cleared.get("description_method"), "");
        assert_eq!(cleared.get("identification_spec"), record.get("identification_spec"));
        assert!(!record.get("description_spec").is_empty());
    }

    #[test]
    fn json_round_trip_uses_readable_names() {
        let json = r#"{
            "fields": { "product_name": "Ashwagandha Extract" },
            "extra_rows": {
                "microbiological_profile": [
                    { "parameter": "Listeria", "specification": "Absent", "result": "Absent", "method": "USP<62>" }
                ]
            },
            "allergen_statement": "Contains Allergen"
        }"#;
        let record = FieldRecord::from_json(json).unwrap();
        assert_eq!(record.product_name(), "Ashwagandha Extract");
        assert_eq!(record.allergen_statement, AllergenStatement::ContainsAllergen);
        assert_eq!(
            record.extra_rows(SectionKind::MicrobiologicalProfile)[0].parameter,
            "Listeria"
        );

        let back = FieldRecord::from_json(&record.to_json().unwrap()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn malformed_json_is_invalid_record() {
        let err = FieldRecord::from_json("{ not json").unwrap_err();
        assert!(matches!(err, Error::InvalidRecord(_)));
    }
}
