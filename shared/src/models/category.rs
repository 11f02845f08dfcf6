//! Category models

use serde::Deserialize;
use validator::Validate;

/// Input for creating or renaming a category
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CategoryInput {
    #[validate(length(min = 1, message = "nome obrigatório"))]
    pub nome: String,
}
