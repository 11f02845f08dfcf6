//! Dashboard reporting service
//!
//! Aggregates the KPI numbers, the critical stock list and the three chart
//! series consumed by the dashboard screen.

use chrono::{Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, SqlitePool};

use crate::error::AppResult;
use crate::services::ledger::format_timestamp;

/// Days of movement history covered by the activity trend chart.
const TREND_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Serialize)]
pub struct DashboardStats {
    pub kpis: DashboardKpis,
    pub lista_criticos: Vec<CriticalItem>,
    pub graficos: DashboardCharts,
}

#[derive(Debug, Serialize)]
pub struct DashboardKpis {
    pub total_itens: i64,
    pub total_users: i64,
    pub qtd_criticos: i64,
    pub valuation: f64,
}

/// Item whose stock sits below its configured minimum.
#[derive(Debug, Serialize, FromRow)]
pub struct CriticalItem {
    pub nome: String,
    pub atual: i64,
    pub min: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardCharts {
    pub tendencia: ChartSeries<i64>,
    pub top5: ChartSeries<i64>,
    pub financeiro: ChartSeries<f64>,
}

/// Parallel label/value arrays, the shape chart libraries consume directly.
#[derive(Debug, Serialize)]
pub struct ChartSeries<T> {
    pub labels: Vec<String>,
    pub data: Vec<T>,
}

impl<T> ChartSeries<T> {
    fn from_pairs(pairs: Vec<(String, T)>) -> Self {
        let mut labels = Vec::with_capacity(pairs.len());
        let mut data = Vec::with_capacity(pairs.len());
        for (label, value) in pairs {
            labels.push(label);
            data.push(value);
        }
        Self { labels, data }
    }
}

#[derive(Clone)]
pub struct ReportingService {
    db: SqlitePool,
}

impl ReportingService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn dashboard_stats(&self) -> AppResult<DashboardStats> {
        let total_itens: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM itens")
            .fetch_one(&self.db)
            .await?;

        let total_users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.db)
            .await?;

        let lista_criticos = sqlx::query_as::<_, CriticalItem>(
            "SELECT nome, estoque_atual AS atual, estoque_minimo AS min
             FROM itens WHERE estoque_atual < estoque_minimo
             ORDER BY nome ASC",
        )
        .fetch_all(&self.db)
        .await?;

        let valuation: f64 = sqlx::query_scalar(
            "SELECT COALESCE(SUM(estoque_atual * custo_unitario), 0.0) FROM itens",
        )
        .fetch_one(&self.db)
        .await?;

        // Sparse series: days without movements produce no label.
        let since = format_timestamp(Utc::now() - Duration::days(TREND_WINDOW_DAYS));
        let tendencia: Vec<(String, i64)> = sqlx::query_as(
            "SELECT date(data_hora) AS dia, COUNT(id) AS total
             FROM movimentacoes WHERE data_hora >= ?1
             GROUP BY dia ORDER BY dia ASC",
        )
        .bind(&since)
        .fetch_all(&self.db)
        .await?;

        let top5: Vec<(String, i64)> = sqlx::query_as(
            "SELECT i.nome, COUNT(m.id) AS qtd
             FROM itens i JOIN movimentacoes m ON m.item_id = i.id
             GROUP BY i.id ORDER BY qtd DESC LIMIT 5",
        )
        .fetch_all(&self.db)
        .await?;

        let financeiro: Vec<(String, f64)> = sqlx::query_as(
            "SELECT categoria, COALESCE(SUM(estoque_atual * custo_unitario), 0.0) AS valor
             FROM itens GROUP BY categoria ORDER BY categoria ASC",
        )
        .fetch_all(&self.db)
        .await?;

        Ok(DashboardStats {
            kpis: DashboardKpis {
                total_itens,
                total_users,
                qtd_criticos: lista_criticos.len() as i64,
                valuation,
            },
            lista_criticos,
            graficos: DashboardCharts {
                tendencia: ChartSeries::from_pairs(tendencia),
                top5: ChartSeries::from_pairs(top5),
                financeiro: ChartSeries::from_pairs(financeiro),
            },
        })
    }
}
