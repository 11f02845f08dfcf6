//! Stock movement models

use serde::Deserialize;
use validator::Validate;

use crate::types::MovementKind;

/// Input for recording a stock movement (`POST /movimentar`)
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MovementInput {
    #[validate(length(min = 1, message = "matrícula obrigatória"))]
    pub matricula_usuario: String,
    #[validate(length(min = 1, message = "código do item obrigatório"))]
    pub codigo_qr_item: String,
    pub tipo: MovementKind,
    #[serde(default)]
    pub motivo: String,
    #[validate(range(min = 1, message = "quantidade deve ser positiva"))]
    pub quantidade: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_zero_quantity_rejected() {
        let input = MovementInput {
            matricula_usuario: "admin".into(),
            codigo_qr_item: "ITM-20240101000000".into(),
            tipo: MovementKind::Saida,
            motivo: "uso em campo".into(),
            quantidade: 0,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_movement_input_parses_wire_shape() {
        let input: MovementInput = serde_json::from_str(
            r#"{"matricula_usuario":"admin","codigo_qr_item":"ITM-1","tipo":"entrada","motivo":"compra","quantidade":10}"#,
        )
        .unwrap();
        assert_eq!(input.tipo, MovementKind::Entrada);
        assert_eq!(input.quantidade, 10);
    }
}
