//! Static tables: the dataset registry and the South American country list.

use std::collections::HashMap;

use once_cell::sync::Lazy;

use crate::types::{DatasetDescriptor, DatasetKey};

/// Flat file feeding the minimum-wage vs. average-income chart.
pub const MINIMUM_WAGE_PATH: &str = "/dataset/datos_sudamerica_2025.csv";

const DESCRIPTORS: [DatasetDescriptor; 5] = [
    DatasetDescriptor {
        key: DatasetKey::Employment,
        file_path: "/dataset/datos_sudamerica/tasa_de_empleo_por_sexo_edad_sudamerica.csv",
        title: "Tasa de Empleo",
        unit: "%",
        color: "#3B82F6",
    },
    DatasetDescriptor {
        key: DatasetKey::Unemployment,
        file_path: "/dataset/datos_sudamerica/tasa_de_desempleo_por_sexo_edad_sudamerica.csv",
        title: "Tasa de Desempleo",
        unit: "%",
        color: "#EF4444",
    },
    DatasetDescriptor {
        key: DatasetKey::Informal,
        file_path: "/dataset/datos_sudamerica/tasa_de_empleo_informal_por_sexo_edad_sudamerica.csv",
        title: "Tasa de Empleo Informal",
        unit: "%",
        color: "#F59E0B",
    },
    DatasetDescriptor {
        key: DatasetKey::LaborForce,
        file_path: "/dataset/datos_sudamerica/poblacion_economicamente_activa_por_sexo_edad_sudamerica.csv",
        title: "Tasa de Participación en la Fuerza Laboral",
        unit: "%",
        color: "#10B981",
    },
    DatasetDescriptor {
        key: DatasetKey::Salary,
        file_path: "/dataset/datos_sudamerica/salarios_promedio_mensuales_por_sexo_sudamerica.csv",
        title: "Salario Promedio Mensual",
        unit: " USD",
        color: "#8B5CF6",
    },
];

/// Allow-listed ILO area labels with their ISO-3 codes.
const SOUTH_AMERICA: [(&str, &str); 12] = [
    ("Argentina", "ARG"),
    ("Bolivia (Plurinational State of)", "BOL"),
    ("Brazil", "BRA"),
    ("Chile", "CHL"),
    ("Colombia", "COL"),
    ("Ecuador", "ECU"),
    ("Guyana", "GUY"),
    ("Paraguay", "PRY"),
    ("Peru", "PER"),
    ("Suriname", "SUR"),
    ("Uruguay", "URY"),
    ("Venezuela (Bolivarian Republic of)", "VEN"),
];

static ISO3_BY_LABEL: Lazy<HashMap<&'static str, &'static str>> =
    Lazy::new(|| SOUTH_AMERICA.iter().copied().collect());

/// Series palette cycled by chart builders.
pub const PALETTE: [&str; 12] = [
    "#3B82F6", "#10B981", "#EF4444", "#F59E0B", "#8B5CF6", "#EC4899", "#6366F1", "#F97316",
    "#06B6D4", "#D946EF", "#22C55E", "#EAB308",
];

pub fn descriptor(key: DatasetKey) -> &'static DatasetDescriptor {
    // DESCRIPTORS is ordered like DatasetKey::ALL.
    &DESCRIPTORS[key as usize]
}

pub fn descriptors() -> &'static [DatasetDescriptor] {
    &DESCRIPTORS
}

/// Exact-label membership in the South American allow-list.
pub fn is_south_american(label: &str) -> bool {
    ISO3_BY_LABEL.contains_key(label)
}

pub fn iso3_code(label: &str) -> Option<&'static str> {
    ISO3_BY_LABEL.get(label).copied()
}

/// Strip parenthetical qualifiers: `"Bolivia (Plurinational State of)"`
/// becomes `"Bolivia"`. Computed on demand, never written back.
pub fn display_name(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    let mut depth = 0usize;
    for c in label.chars() {
        match c {
            '(' => depth += 1,
            ')' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }
    out.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn palette_color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}
