//! CSV import and export service
//!
//! Import is a two phase batch: every row is parsed and validated first, then
//! all writes happen in a single transaction. A bad cost value anywhere
//! aborts the whole file.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use shared::models::generate_import_code;
use shared::validation::{coerce_quantity, is_blank_name, parse_cost};
use sqlx::SqlitePool;

use crate::error::{AppError, AppResult};

/// Fallback minimum when the file has no Minimo column.
const DEFAULT_MIN_STOCK: i64 = 5;

/// One raw spreadsheet row. Missing columns deserialize as None.
#[derive(Debug, Deserialize)]
struct ImportRow {
    #[serde(rename = "Nome", default)]
    nome: Option<String>,
    #[serde(rename = "Estoque", default)]
    estoque: Option<String>,
    #[serde(rename = "Minimo", default)]
    minimo: Option<String>,
    #[serde(rename = "Custo", default)]
    custo: Option<String>,
}

#[derive(Debug)]
struct ParsedRow {
    row: usize,
    nome: String,
    estoque: i64,
    minimo: i64,
    custo: f64,
}

#[derive(Debug, Serialize)]
pub struct ImportSummary {
    pub msg: String,
    pub criados: i64,
    pub atualizados: i64,
}

#[derive(Clone)]
pub struct SpreadsheetService {
    db: SqlitePool,
}

impl SpreadsheetService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Import a CSV batch. Rows matching an existing item by name overwrite
    /// its stock numbers; the rest become new items with IMP codes. Import
    /// writes stock directly and creates no movement rows.
    pub async fn import(&self, bytes: &[u8]) -> AppResult<ImportSummary> {
        let parsed = parse_rows(bytes)?;

        let now = Utc::now();
        let mut criados = 0i64;
        let mut atualizados = 0i64;

        let mut tx = self.db.begin().await?;

        for row in &parsed {
            let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM itens WHERE nome = ?1")
                .bind(&row.nome)
                .fetch_optional(&mut *tx)
                .await?;

            match existing {
                Some(id) => {
                    sqlx::query(
                        "UPDATE itens SET estoque_atual = ?1, estoque_minimo = ?2, custo_unitario = ?3
                         WHERE id = ?4",
                    )
                    .bind(row.estoque)
                    .bind(row.minimo)
                    .bind(row.custo)
                    .bind(id)
                    .execute(&mut *tx)
                    .await?;
                    atualizados += 1;
                }
                None => {
                    sqlx::query(
                        "INSERT INTO itens (nome, codigo_qr, estoque_atual, estoque_minimo, custo_unitario)
                         VALUES (?1, ?2, ?3, ?4, ?5)",
                    )
                    .bind(&row.nome)
                    .bind(generate_import_code(now, row.row))
                    .bind(row.estoque)
                    .bind(row.minimo)
                    .bind(row.custo)
                    .execute(&mut *tx)
                    .await?;
                    criados += 1;
                }
            }
        }

        tx.commit().await?;

        tracing::info!(criados, atualizados, "spreadsheet imported");

        Ok(ImportSummary {
            msg: format!("Criados: {}, Atualizados: {}", criados, atualizados),
            criados,
            atualizados,
        })
    }

    /// Current stock as CSV, one line per item.
    pub async fn export_items(&self) -> AppResult<String> {
        let items: Vec<(String, i64, f64)> =
            sqlx::query_as("SELECT nome, estoque_atual, custo_unitario FROM itens ORDER BY id ASC")
                .fetch_all(&self.db)
                .await?;

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record(["Nome", "Estoque", "Custo"])
            .map_err(|e| AppError::Internal(e.to_string()))?;
        for (nome, estoque, custo) in items {
            wtr.write_record([nome, estoque.to_string(), custo.to_string()])
                .map_err(|e| AppError::Internal(e.to_string()))?;
        }
        into_csv_string(wtr)
    }

    /// The full movement ledger as CSV.
    pub async fn export_movements(&self) -> AppResult<String> {
        let rows: Vec<(i64, i64, i64, String, i64, String, String)> = sqlx::query_as(
            "SELECT id, item_id, usuario_id, tipo, quantidade, motivo, data_hora
             FROM movimentacoes ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;

        let mut wtr = csv::Writer::from_writer(Vec::new());
        wtr.write_record([
            "id",
            "item_id",
            "usuario_id",
            "tipo",
            "quantidade",
            "motivo",
            "data_hora",
        ])
        .map_err(|e| AppError::Internal(e.to_string()))?;
        for (id, item_id, usuario_id, tipo, quantidade, motivo, data_hora) in rows {
            wtr.write_record([
                id.to_string(),
                item_id.to_string(),
                usuario_id.to_string(),
                tipo,
                quantidade.to_string(),
                motivo,
                data_hora,
            ])
            .map_err(|e| AppError::Internal(e.to_string()))?;
        }
        into_csv_string(wtr)
    }
}

fn parse_rows(bytes: &[u8]) -> AppResult<Vec<ParsedRow>> {
    let mut reader = csv::Reader::from_reader(bytes);
    let mut parsed = Vec::new();

    for (idx, result) in reader.deserialize::<ImportRow>().enumerate() {
        let record = result.map_err(|e| AppError::ImportFailure(e.to_string()))?;

        let nome = record.nome.unwrap_or_default();
        if is_blank_name(&nome) {
            continue;
        }

        // Quantities are coerced leniently; a bad cost aborts the batch.
        let estoque = coerce_quantity(record.estoque.as_deref().unwrap_or("0"));
        let minimo = match &record.minimo {
            Some(s) => coerce_quantity(s),
            None => DEFAULT_MIN_STOCK,
        };
        let custo = match &record.custo {
            Some(s) => parse_cost(s).map_err(|e| {
                AppError::ImportFailure(format!("linha {}: {}", idx + 2, e))
            })?,
            None => 0.0,
        };

        parsed.push(ParsedRow {
            row: idx,
            nome: nome.trim().to_string(),
            estoque,
            minimo,
            custo,
        });
    }

    Ok(parsed)
}

fn into_csv_string(wtr: csv::Writer<Vec<u8>>) -> AppResult<String> {
    let bytes = wtr
        .into_inner()
        .map_err(|e| AppError::Internal(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| AppError::Internal(e.to_string()))
}
