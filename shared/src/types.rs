//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Company label applied to users when none is given
pub const DEFAULT_COMPANY: &str = "Kinross";

/// Category assigned to items created without one
pub const DEFAULT_CATEGORY: &str = "Geral";

/// Categories seeded on first read of an empty category table
pub const DEFAULT_CATEGORIES: [&str; 8] = [
    "Geral",
    "EPI",
    "Ferramentas",
    "Consumíveis",
    "Elétrica",
    "Hidráulica",
    "TI",
    "Mecânica",
];

/// User roles
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    Comum,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Comum => "comum",
        }
    }
}

/// Direction of a stock movement
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Inbound stock (entrada)
    Entrada,
    /// Outbound stock (saída)
    Saida,
}

impl MovementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Entrada => "entrada",
            MovementKind::Saida => "saida",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_kind_wire_format() {
        assert_eq!(
            serde_json::to_string(&MovementKind::Saida).unwrap(),
            "\"saida\""
        );
        let parsed: MovementKind = serde_json::from_str("\"entrada\"").unwrap();
        assert_eq!(parsed, MovementKind::Entrada);
    }

    #[test]
    fn test_default_role_is_comum() {
        assert_eq!(Role::default(), Role::Comum);
    }

    #[test]
    fn test_seeded_categories() {
        assert_eq!(DEFAULT_CATEGORIES.len(), 8);
        assert!(DEFAULT_CATEGORIES.contains(&DEFAULT_CATEGORY));
    }
}
