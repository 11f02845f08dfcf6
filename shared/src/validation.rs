//! Validation and coercion helpers for spreadsheet import
//!
//! The import format is forgiving about integer columns and strict about the
//! cost column; these helpers pin that contract down in one place.

/// Coerce a spreadsheet cell to an integer quantity.
///
/// Accepts plain integers and decimal notation ("20", "20.5" → 20); anything
/// non-numeric, including an empty cell, coerces to 0.
pub fn coerce_quantity(value: &str) -> i64 {
    value
        .trim()
        .parse::<f64>()
        .map(|v| v.trunc() as i64)
        .unwrap_or(0)
}

/// Parse a spreadsheet cost cell strictly.
///
/// A non-numeric value (including an empty cell) is an error; the importer
/// aborts the whole batch on it.
pub fn parse_cost(value: &str) -> Result<f64, String> {
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| format!("custo inválido: '{}'", value.trim()))
}

/// True when a name cell should cause the row to be skipped.
pub fn is_blank_name(value: &str) -> bool {
    value.trim().is_empty()
}
