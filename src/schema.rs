//! Fixed layout of the certificate: which base rows each section knows about,
//! which product fields are printed, and the boilerplate text.

use crate::record::SectionKind;

pub(crate) const ROW_SUFFIXES: [&str; 3] = ["spec", "result", "method"];

/// A predefined specification row; its cells live under `<key>_spec`,
/// `<key>_result` and `<key>_method`.
pub struct BaseRow {
    pub label: &'static str,
    pub key: &'static str,
}

pub struct SectionSchema {
    pub kind: SectionKind,
    pub rows: &'static [BaseRow],
}

const fn base(label: &'static str, key: &'static str) -> BaseRow {
    BaseRow { label, key }
}

pub static SECTIONS: &[SectionSchema] = &[
    SectionSchema {
        kind: SectionKind::Physical,
        rows: &[
            base("Description", "description"),
            base("Identification", "identification"),
            base("Loss on Drying", "loss_on_drying"),
            base("Moisture", "moisture"),
            base("Particle Size", "particle_size"),
            base("Ash Contents", "ash_contents"),
            base("Residue on Ignition", "residue_on_ignition"),
            base("Bulk Density", "bulk_density"),
            base("Tapped Density", "tapped_density"),
            base("Solubility", "solubility"),
            base("pH", "ph"),
            base("Chlorides of NaCl", "chlorides_nacl"),
            base("Sulphates", "sulphates"),
            base("Fats", "fats"),
            base("Protein", "protein"),
            base("Total IgG", "total_ig_g"),
            base("Sodium", "sodium"),
            base("Gluten", "gluten"),
        ],
    },
    SectionSchema {
        kind: SectionKind::Others,
        rows: &[
            base("Lead", "lead"),
            base("Cadmium", "cadmium"),
            base("Arsenic", "arsenic"),
            base("Mercury", "mercury"),
        ],
    },
    SectionSchema {
        kind: SectionKind::Assays,
        rows: &[base("Assays", "assays")],
    },
    SectionSchema {
        kind: SectionKind::Pesticides,
        rows: &[base("Pesticide", "pesticide")],
    },
    SectionSchema {
        kind: SectionKind::ResidualSolvent,
        rows: &[base("Residual Solvent", "residual_solvent")],
    },
    SectionSchema {
        kind: SectionKind::MicrobiologicalProfile,
        rows: &[
            base("Total Plate Count", "total_plate_count"),
            base("Yeasts & Mould Count", "yeasts_mould"),
            base("Salmonella", "salmonella"),
            base("Escherichia coli", "e_coli"),
            base("Coliforms", "coliforms"),
        ],
    },
];

pub struct InfoField {
    pub label: &'static str,
    pub key: &'static str,
    pub italic: bool,
}

const fn info(label: &'static str, key: &'static str) -> InfoField {
    InfoField {
        label,
        key,
        italic: false,
    }
}

pub static PRODUCT_INFO: &[InfoField] = &[
    info("Product Name", "product_name"),
    info("Product Code", "product_code"),
    info("Batch No.", "batch_no"),
    info("Date of Manufacturing", "manufacturing_date"),
    info("Date of Reanalysis", "reanalysis_date"),
    InfoField {
        label: "Botanical Name",
        key: "botanical_name",
        italic: true,
    },
    info("Extraction Ratio", "extraction_ratio"),
    info("Extraction Solvents", "solvent"),
    info("Plant Parts", "plant_part"),
    info("CAS No.", "cas_no"),
    info("Chemical Name", "chemical_name"),
    info("Quantity", "quantity"),
    info("Country of Origin", "origin"),
];

/// Non-empty starting values of the entry form. Keys not listed start blank.
pub(crate) static FORM_DEFAULTS: &[(&str, &str)] = &[
    ("origin", "India"),
    ("description_spec", "X with Characteristic taste and odour"),
    ("description_result", "Compiles"),
    ("description_method", "Physical"),
    ("identification_spec", "To comply by TLC"),
    ("identification_result", "Compiles"),
    ("identification_method", "TLC"),
    ("loss_on_drying_spec", "Not more than X"),
    ("loss_on_drying_method", "USP<731>"),
    ("moisture_spec", "Not more than X"),
    ("moisture_method", "USP<921>"),
    ("particle_size_method", "USP<786>"),
    ("ash_contents_spec", "Not more than X"),
    ("ash_contents_method", "USP<561>"),
    ("residue_on_ignition_spec", "Not more than X"),
    ("residue_on_ignition_method", "USP<281>"),
    ("bulk_density_spec", "Between 0.3g/ml to 0.6g/ml"),
    ("bulk_density_method", "USP<616>"),
    ("tapped_density_spec", "Between 0.4g/ml to 0.8g/ml"),
    ("tapped_density_method", "USP<616>"),
    ("solubility_method", "USP<1236>"),
    ("ph_method", "USP<791>"),
    ("chlorides_nacl_method", "USP<221>"),
    ("sulphates_method", "USP<221>"),
    ("fats_method", "USP<731>"),
    ("protein_method", "Kjeldahl"),
    ("total_ig_g_method", "HPLC"),
    ("sodium_method", "ICP-MS"),
    ("gluten_spec", "NMT X"),
    ("gluten_method", "ELISA"),
    ("lead_spec", "Not more than X ppm"),
    ("lead_method", "ICP-MS"),
    ("cadmium_spec", "Not more than X ppm"),
    ("cadmium_method", "ICP-MS"),
    ("arsenic_spec", "Not more than X ppm"),
    ("arsenic_method", "ICP-MS"),
    ("mercury_spec", "Not more than X ppm"),
    ("mercury_method", "ICP-MS"),
    ("pesticide_spec", "Meet USP<561>"),
    ("pesticide_result", "Compiles"),
    ("pesticide_method", "USP<561>"),
    ("residual_solvent_result", "Compiles"),
    ("total_plate_count_spec", "Not more than X cfu/g"),
    ("total_plate_count_result", "X cfu/g"),
    ("total_plate_count_method", "USP<61>"),
    ("yeasts_mould_spec", "Not more than X cfu/g"),
    ("yeasts_mould_result", "X cfu/g"),
    ("yeasts_mould_method", "USP<61>"),
    ("salmonella_spec", "Absent/25g"),
    ("salmonella_result", "Absent"),
    ("salmonella_method", "USP<62>"),
    ("e_coli_spec", "Absent/10g"),
    ("e_coli_result", "Absent"),
    ("e_coli_method", "USP<62>"),
    ("coliforms_spec", "NMT X cfu/g"),
    ("coliforms_method", "USP<62>"),
];

pub const TITLE: &str = "CERTIFICATE OF ANALYSIS";
pub const SPEC_HEADERS: [&str; 4] = ["Parameter", "Specification", "Result", "Method"];
pub const REMARKS: &str = "Since the product is derived from natural origin, there is likely to be minor color \
variation because of the geographical and seasonal variations of the raw material";
pub const COMPLIANCE: &str = "REMARKS: COMPLIES WITH IN HOUSE SPECIFICATIONS";
pub const DECLARATION_HEADING: &str = "Declaration";

pub struct DeclarationLine {
    pub left_label: &'static str,
    pub left_value: &'static str,
    pub right_label: &'static str,
    /// `None` takes the record's allergen selection.
    pub right_value: Option<&'static str>,
}

pub static DECLARATION: [DeclarationLine; 3] = [
    DeclarationLine {
        left_label: "GMO Status:",
        left_value: "Free from GMO",
        right_label: "Allergen statement:",
        right_value: None,
    },
    DeclarationLine {
        left_label: "Irradiation status:",
        left_value: "Non \u{2013} Irradiated",
        right_label: "Storage condition:",
        right_value: Some("At room temperature"),
    },
    DeclarationLine {
        left_label: "Prepared by",
        left_value: "Executive \u{2013} QC",
        right_label: "Approved by",
        right_value: Some("Head-QC/QA"),
    },
];
