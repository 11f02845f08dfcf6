//! User account models

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::{Role, DEFAULT_COMPANY};

/// Credentials presented to `POST /login`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "matricula obrigatória"))]
    pub matricula: String,
    #[validate(length(min = 1, message = "senha obrigatória"))]
    pub senha: String,
}

/// Input for creating or updating a user
///
/// On update, an empty `senha` keeps the stored password hash.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub nome: String,
    #[validate(length(min = 1, message = "matricula obrigatória"))]
    pub matricula: String,
    #[serde(default)]
    pub senha: String,
    #[serde(default)]
    pub tipo: Role,
    #[serde(default = "default_company")]
    pub empresa: String,
}

fn default_company() -> String {
    DEFAULT_COMPANY.to_string()
}

/// Profile returned after a successful login
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub nome: String,
    pub tipo: String,
    pub matricula: String,
    pub empresa: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_input_defaults() {
        let input: UserInput =
            serde_json::from_str(r#"{"nome":"Ana","matricula":"A100","senha":"s3cret"}"#).unwrap();
        assert_eq!(input.tipo, Role::Comum);
        assert_eq!(input.empresa, DEFAULT_COMPANY);
    }

    #[test]
    fn test_blank_matricula_rejected() {
        use validator::Validate;
        let input = LoginInput {
            matricula: String::new(),
            senha: "x".into(),
        };
        assert!(input.validate().is_err());
    }
}
