//! Item models and code generation

use chrono::{DateTime, Utc};
use serde::Deserialize;
use validator::Validate;

use crate::types::DEFAULT_CATEGORY;

/// Input for creating an item
///
/// Arrives as multipart form fields; defaults mirror the create form.
/// Negative stock and cost values are rejected here, a deliberate guard over
/// the permissive behavior of earlier versions of the system.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateItemInput {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub nome: String,
    #[validate(range(min = 0, message = "estoque inicial não pode ser negativo"))]
    pub estoque_inicial: i64,
    #[serde(default = "default_min_stock")]
    #[validate(range(min = 0, message = "estoque mínimo não pode ser negativo"))]
    pub estoque_minimo: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "custo não pode ser negativo"))]
    pub custo_unitario: f64,
    #[serde(default = "default_category")]
    pub categoria: String,
    #[serde(default)]
    pub localizacao: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub fabricante: String,
}

/// Input for updating an item
///
/// A wholesale replace of the editable fields. `estoque_atual` is directly
/// settable, which can desynchronize the materialized stock from the movement
/// ledger; callers that care should check `LedgerService::ledger_delta`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateItemInput {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub nome: String,
    #[validate(range(min = 0, message = "estoque não pode ser negativo"))]
    pub estoque_atual: i64,
    #[validate(range(min = 0, message = "estoque mínimo não pode ser negativo"))]
    pub estoque_minimo: i64,
    #[serde(default)]
    #[validate(range(min = 0.0, message = "custo não pode ser negativo"))]
    pub custo_unitario: f64,
    #[serde(default)]
    pub marca: String,
    #[serde(default)]
    pub modelo: String,
    #[serde(default)]
    pub fabricante: String,
    #[serde(default)]
    pub serial_number: String,
    #[serde(default)]
    pub part_number: String,
    #[serde(default)]
    pub remover_imagem: bool,
}

fn default_min_stock() -> i64 {
    5
}

fn default_category() -> String {
    DEFAULT_CATEGORY.to_string()
}

/// Generate an item code from the creation instant, `ITM-<yyyymmddHHMMSS>`.
///
/// Two items created within the same wall-clock second collide; the UNIQUE
/// constraint on the column turns that into a conflict error. Known
/// limitation inherited from the original numbering scheme.
pub fn generate_item_code(now: DateTime<Utc>) -> String {
    format!("ITM-{}", now.format("%Y%m%d%H%M%S"))
}

/// Generate a code for an imported row, `IMP-<yyyymmddHHMM>-<row>`.
pub fn generate_import_code(now: DateTime<Utc>, row: usize) -> String {
    format!("IMP-{}-{}", now.format("%Y%m%d%H%M"), row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_item_code_format() {
        let now = Utc.with_ymd_and_hms(2024, 12, 23, 9, 30, 15).unwrap();
        assert_eq!(generate_item_code(now), "ITM-20241223093015");
    }

    #[test]
    fn test_import_code_format() {
        let now = Utc.with_ymd_and_hms(2024, 12, 23, 9, 30, 15).unwrap();
        assert_eq!(generate_import_code(now, 7), "IMP-202412230930-7");
    }

    #[test]
    fn test_negative_initial_stock_rejected() {
        let input = CreateItemInput {
            nome: "Parafuso".into(),
            estoque_inicial: -1,
            estoque_minimo: 5,
            custo_unitario: 0.0,
            categoria: DEFAULT_CATEGORY.into(),
            localizacao: String::new(),
            serial_number: String::new(),
            part_number: String::new(),
            marca: String::new(),
            modelo: String::new(),
            fabricante: String::new(),
        };
        assert!(input.validate().is_err());
    }
}
