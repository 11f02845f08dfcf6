//! Stock movement ledger service
//!
//! Every entrada/saída lands as an immutable row in `movimentacoes` while the
//! item's materialized stock is adjusted in the same transaction. Outbound
//! movements use a conditional update so two concurrent withdrawals can never
//! drive the stock negative.

use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::models::MovementInput;
use shared::types::MovementKind;
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use crate::error::{AppError, AppResult};

/// How many rows `recent` returns.
const HISTORY_LIMIT: i64 = 50;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Movement {
    pub id: i64,
    pub item_id: i64,
    pub usuario_id: i64,
    pub tipo: String,
    pub quantidade: i64,
    pub motivo: String,
    pub data_hora: DateTime<Utc>,
}

/// History row with user and item names resolved. Either side may have been
/// deleted since the movement was recorded, so both names are optional.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct MovementView {
    pub data_hora: DateTime<Utc>,
    pub usuario: Option<String>,
    pub item: Option<String>,
    pub tipo: String,
    pub quantidade: i64,
    pub motivo: String,
}

/// Timestamps are stored as second-precision TEXT so that lexicographic
/// comparison and SQLite's date() agree with chronological order.
pub(crate) fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%d %H:%M:%S").to_string()
}

#[derive(Clone)]
pub struct LedgerService {
    db: SqlitePool,
}

impl LedgerService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Record a movement and adjust the item's stock atomically.
    pub async fn record(&self, input: MovementInput) -> AppResult<Movement> {
        input.validate()?;

        let usuario_id: i64 = sqlx::query_scalar("SELECT id FROM usuarios WHERE matricula = ?1")
            .bind(&input.matricula_usuario)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Usuário".into()))?;

        let item_id: i64 = sqlx::query_scalar("SELECT id FROM itens WHERE codigo_qr = ?1")
            .bind(&input.codigo_qr_item)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Item".into()))?;

        let mut tx = self.db.begin().await?;

        let adjusted = match input.tipo {
            // The stock guard lives in the WHERE clause: zero rows touched
            // means another writer got there first or stock was already low.
            MovementKind::Saida => {
                sqlx::query(
                    "UPDATE itens SET estoque_atual = estoque_atual - ?1
                     WHERE id = ?2 AND estoque_atual >= ?1",
                )
                .bind(input.quantidade)
                .bind(item_id)
                .execute(&mut *tx)
                .await?
                .rows_affected()
            }
            MovementKind::Entrada => {
                sqlx::query("UPDATE itens SET estoque_atual = estoque_atual + ?1 WHERE id = ?2")
                    .bind(input.quantidade)
                    .bind(item_id)
                    .execute(&mut *tx)
                    .await?
                    .rows_affected()
            }
        };

        if adjusted == 0 {
            return match input.tipo {
                MovementKind::Saida => Err(AppError::InsufficientStock(format!(
                    "Estoque insuficiente para saída de {}",
                    input.quantidade
                ))),
                MovementKind::Entrada => Err(AppError::NotFound("Item".into())),
            };
        }

        let movement = sqlx::query_as::<_, Movement>(
            "INSERT INTO movimentacoes (item_id, usuario_id, tipo, quantidade, motivo, data_hora)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING *",
        )
        .bind(item_id)
        .bind(usuario_id)
        .bind(input.tipo.as_str())
        .bind(input.quantidade)
        .bind(&input.motivo)
        .bind(format_timestamp(Utc::now()))
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            item_id,
            usuario_id,
            tipo = input.tipo.as_str(),
            quantidade = input.quantidade,
            "movement recorded"
        );

        Ok(movement)
    }

    /// The most recent movements, newest first, with names resolved where the
    /// referenced rows still exist.
    pub async fn recent(&self) -> AppResult<Vec<MovementView>> {
        let rows = sqlx::query_as::<_, MovementView>(
            "SELECT m.data_hora, u.nome AS usuario, i.nome AS item,
                    m.tipo, m.quantidade, m.motivo
             FROM movimentacoes m
             LEFT JOIN usuarios u ON u.id = m.usuario_id
             LEFT JOIN itens i ON i.id = m.item_id
             ORDER BY m.data_hora DESC, m.id DESC
             LIMIT ?1",
        )
        .bind(HISTORY_LIMIT)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    /// Net ledger balance for one item, entradas minus saídas. Lets callers
    /// check the materialized stock against the movement history.
    pub async fn ledger_delta(&self, item_id: i64) -> AppResult<i64> {
        let delta: i64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(CASE WHEN tipo = 'entrada' THEN quantidade ELSE -quantidade END), 0)
             FROM movimentacoes WHERE item_id = ?1",
        )
        .bind(item_id)
        .fetch_one(&self.db)
        .await?;
        Ok(delta)
    }
}
