//! Item handlers
//!
//! Item create/update arrive as multipart forms because they can carry a
//! photo; the text fields are collected into the typed inputs by hand.

use std::collections::HashMap;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    Json,
};
use shared::models::{CreateItemInput, UpdateItemInput};
use shared::types::DEFAULT_CATEGORY;

use crate::error::{AppError, AppResult};
use crate::services::item::{Item, PhotoUpload};
use crate::services::ItemService;
use crate::AppState;

/// GET /itens
pub async fn list_items(State(state): State<AppState>) -> AppResult<Json<Vec<Item>>> {
    let items = item_service(&state).list().await?;
    Ok(Json(items))
}

/// POST /itens
pub async fn create_item(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<Item>> {
    let (fields, foto) = read_form(&mut multipart).await?;

    let input = CreateItemInput {
        nome: required_text(&fields, "nome")?,
        estoque_inicial: required_i64(&fields, "estoque_inicial")?,
        estoque_minimo: i64_or(&fields, "estoque_minimo", 5)?,
        custo_unitario: f64_or(&fields, "custo_unitario", 0.0)?,
        categoria: text_or(&fields, "categoria", DEFAULT_CATEGORY),
        localizacao: text_or(&fields, "localizacao", ""),
        serial_number: text_or(&fields, "serial_number", ""),
        part_number: text_or(&fields, "part_number", ""),
        marca: text_or(&fields, "marca", ""),
        modelo: text_or(&fields, "modelo", ""),
        fabricante: text_or(&fields, "fabricante", ""),
    };

    let item = item_service(&state).create(input, foto).await?;
    Ok(Json(item))
}

/// PUT /itens/:item_id
pub async fn update_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
    mut multipart: Multipart,
) -> AppResult<Json<Item>> {
    let (fields, foto) = read_form(&mut multipart).await?;

    let input = UpdateItemInput {
        nome: required_text(&fields, "nome")?,
        estoque_atual: required_i64(&fields, "estoque_atual")?,
        estoque_minimo: required_i64(&fields, "estoque_minimo")?,
        custo_unitario: f64_or(&fields, "custo_unitario", 0.0)?,
        marca: text_or(&fields, "marca", ""),
        modelo: text_or(&fields, "modelo", ""),
        fabricante: text_or(&fields, "fabricante", ""),
        serial_number: text_or(&fields, "serial_number", ""),
        part_number: text_or(&fields, "part_number", ""),
        remover_imagem: bool_flag(&fields, "remover_imagem"),
    };

    let item = item_service(&state).update(item_id, input, foto).await?;
    Ok(Json(item))
}

/// DELETE /itens/:item_id
pub async fn delete_item(
    State(state): State<AppState>,
    Path(item_id): Path<i64>,
) -> AppResult<Json<()>> {
    item_service(&state).delete(item_id).await?;
    Ok(Json(()))
}

fn item_service(state: &AppState) -> ItemService {
    ItemService::new(state.db.clone(), state.config.uploads.dir.clone())
}

/// Drain a multipart form into its text fields plus the optional photo.
async fn read_form(
    multipart: &mut Multipart,
) -> AppResult<(HashMap<String, String>, Option<PhotoUpload>)> {
    let mut fields = HashMap::new();
    let mut foto = None;

    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "foto" {
            let filename = field.file_name().map(str::to_string);
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            if let Some(filename) = filename {
                if !bytes.is_empty() {
                    foto = Some(PhotoUpload {
                        filename,
                        bytes: bytes.to_vec(),
                    });
                }
            }
        } else {
            let value = field.text().await.map_err(bad_multipart)?;
            fields.insert(name, value);
        }
    }

    Ok((fields, foto))
}

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation {
        field: "multipart".into(),
        message: e.to_string(),
    }
}

fn required_text(fields: &HashMap<String, String>, key: &str) -> AppResult<String> {
    fields
        .get(key)
        .filter(|v| !v.trim().is_empty())
        .cloned()
        .ok_or_else(|| AppError::Validation {
            field: key.to_string(),
            message: format!("{} obrigatório", key),
        })
}

fn text_or(fields: &HashMap<String, String>, key: &str, default: &str) -> String {
    match fields.get(key) {
        Some(v) if !v.trim().is_empty() => v.clone(),
        _ => default.to_string(),
    }
}

fn required_i64(fields: &HashMap<String, String>, key: &str) -> AppResult<i64> {
    let raw = fields.get(key).ok_or_else(|| AppError::Validation {
        field: key.to_string(),
        message: format!("{} obrigatório", key),
    })?;
    parse_i64(raw, key)
}

fn i64_or(fields: &HashMap<String, String>, key: &str, default: i64) -> AppResult<i64> {
    match fields.get(key) {
        Some(raw) if !raw.trim().is_empty() => parse_i64(raw, key),
        _ => Ok(default),
    }
}

fn f64_or(fields: &HashMap<String, String>, key: &str, default: f64) -> AppResult<f64> {
    match fields.get(key) {
        Some(raw) if !raw.trim().is_empty() => {
            raw.trim().parse::<f64>().map_err(|_| AppError::Validation {
                field: key.to_string(),
                message: format!("{} deve ser numérico", key),
            })
        }
        _ => Ok(default),
    }
}

fn parse_i64(raw: &str, key: &str) -> AppResult<i64> {
    raw.trim().parse::<i64>().map_err(|_| AppError::Validation {
        field: key.to_string(),
        message: format!("{} deve ser um número inteiro", key),
    })
}

fn bool_flag(fields: &HashMap<String, String>, key: &str) -> bool {
    matches!(
        fields.get(key).map(|v| v.trim().to_ascii_lowercase()),
        Some(v) if v == "true" || v == "1" || v == "on"
    )
}
