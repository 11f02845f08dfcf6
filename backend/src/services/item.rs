//! Item registry service

use chrono::Utc;
use serde::Serialize;
use shared::models::{generate_item_code, CreateItemInput, UpdateItemInput};
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use crate::db::is_unique_violation;
use crate::error::{AppError, AppResult};
use crate::storage;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Item {
    pub id: i64,
    pub nome: String,
    pub codigo_qr: String,
    pub custo_unitario: f64,
    pub estoque_atual: i64,
    pub estoque_minimo: i64,
    pub categoria: String,
    pub localizacao: String,
    pub serial_number: Option<String>,
    pub part_number: Option<String>,
    pub marca: Option<String>,
    pub modelo: Option<String>,
    pub fabricante: Option<String>,
    pub imagem_url: Option<String>,
}

/// An uploaded photo, as received from the multipart form.
#[derive(Debug, Clone)]
pub struct PhotoUpload {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Clone)]
pub struct ItemService {
    db: SqlitePool,
    uploads_dir: String,
}

impl ItemService {
    pub fn new(db: SqlitePool, uploads_dir: String) -> Self {
        Self { db, uploads_dir }
    }

    pub async fn list(&self) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>("SELECT * FROM itens ORDER BY nome ASC")
            .fetch_all(&self.db)
            .await?;
        Ok(items)
    }

    /// Register a new item. The code is minted from the creation instant and
    /// the initial stock lands directly on the item without a ledger entry.
    pub async fn create(
        &self,
        input: CreateItemInput,
        foto: Option<PhotoUpload>,
    ) -> AppResult<Item> {
        input.validate()?;

        let taken: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM itens WHERE nome = ?1")
            .bind(&input.nome)
            .fetch_one(&self.db)
            .await?;
        if taken > 0 {
            return Err(AppError::Conflict {
                resource: "nome".into(),
                message: format!("Item '{}' já cadastrado", input.nome),
            });
        }

        let codigo_qr = generate_item_code(Utc::now());

        let imagem_url = match foto {
            Some(foto) => Some(
                storage::store_item_photo(&self.uploads_dir, &codigo_qr, &foto.filename, &foto.bytes)
                    .await?,
            ),
            None => None,
        };

        let item = sqlx::query_as::<_, Item>(
            "INSERT INTO itens (nome, codigo_qr, custo_unitario, estoque_atual, estoque_minimo,
                                categoria, localizacao, serial_number, part_number, marca,
                                modelo, fabricante, imagem_url)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)
             RETURNING *",
        )
        .bind(&input.nome)
        .bind(&codigo_qr)
        .bind(input.custo_unitario)
        .bind(input.estoque_inicial)
        .bind(input.estoque_minimo)
        .bind(&input.categoria)
        .bind(&input.localizacao)
        .bind(&input.serial_number)
        .bind(&input.part_number)
        .bind(&input.marca)
        .bind(&input.modelo)
        .bind(&input.fabricante)
        .bind(&imagem_url)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                // same-second code collision
                AppError::Conflict {
                    resource: "codigo_qr".into(),
                    message: format!("Código '{}' já emitido, tente novamente", codigo_qr),
                }
            } else {
                e.into()
            }
        })?;

        tracing::info!(codigo_qr = %item.codigo_qr, nome = %item.nome, "item created");
        Ok(item)
    }

    /// Replace the editable fields of an item. Stock set here bypasses the
    /// movement ledger.
    pub async fn update(
        &self,
        item_id: i64,
        input: UpdateItemInput,
        foto: Option<PhotoUpload>,
    ) -> AppResult<Item> {
        input.validate()?;

        let existing = sqlx::query_as::<_, Item>("SELECT * FROM itens WHERE id = ?1")
            .bind(item_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".into()))?;

        let imagem_url = if input.remover_imagem {
            None
        } else {
            match foto {
                Some(foto) => Some(
                    storage::store_item_photo(
                        &self.uploads_dir,
                        &existing.codigo_qr,
                        &foto.filename,
                        &foto.bytes,
                    )
                    .await?,
                ),
                None => existing.imagem_url,
            }
        };

        let item = sqlx::query_as::<_, Item>(
            "UPDATE itens SET nome = ?1, estoque_atual = ?2, estoque_minimo = ?3,
                              custo_unitario = ?4, marca = ?5, modelo = ?6, fabricante = ?7,
                              serial_number = ?8, part_number = ?9, imagem_url = ?10
             WHERE id = ?11
             RETURNING *",
        )
        .bind(&input.nome)
        .bind(input.estoque_atual)
        .bind(input.estoque_minimo)
        .bind(input.custo_unitario)
        .bind(&input.marca)
        .bind(&input.modelo)
        .bind(&input.fabricante)
        .bind(&input.serial_number)
        .bind(&input.part_number)
        .bind(&imagem_url)
        .bind(item_id)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict {
                    resource: "nome".into(),
                    message: format!("Item '{}' já cadastrado", input.nome),
                }
            } else {
                e.into()
            }
        })?;

        Ok(item)
    }

    /// Delete an item. Absent ids are a no-op; movement history keeps its
    /// weak reference.
    pub async fn delete(&self, item_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM itens WHERE id = ?1")
            .bind(item_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}
