//! Category management service
//!
//! Item rows carry the category by name, so a rename must propagate to every
//! item in the same transaction and a delete is refused while items still
//! point at the name.

use serde::Serialize;
use shared::models::CategoryInput;
use shared::types::DEFAULT_CATEGORIES;
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use crate::db::is_unique_violation;
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
    pub id: i64,
    pub nome: String,
}

#[derive(Clone)]
pub struct CategoryService {
    db: SqlitePool,
}

impl CategoryService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// List categories, seeding the default set the first time the table is
    /// read empty.
    pub async fn list(&self) -> AppResult<Vec<Category>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categorias")
            .fetch_one(&self.db)
            .await?;

        if total == 0 {
            let mut tx = self.db.begin().await?;
            for nome in DEFAULT_CATEGORIES {
                sqlx::query("INSERT OR IGNORE INTO categorias (nome) VALUES (?1)")
                    .bind(nome)
                    .execute(&mut *tx)
                    .await?;
            }
            tx.commit().await?;
            tracing::info!("seeded default categories");
        }

        let categories =
            sqlx::query_as::<_, Category>("SELECT id, nome FROM categorias ORDER BY id ASC")
                .fetch_all(&self.db)
                .await?;
        Ok(categories)
    }

    pub async fn create(&self, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;

        let category = sqlx::query_as::<_, Category>(
            "INSERT INTO categorias (nome) VALUES (?1) RETURNING id, nome",
        )
        .bind(&input.nome)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict {
                    resource: "nome".into(),
                    message: format!("Categoria '{}' já existe", input.nome),
                }
            } else {
                e.into()
            }
        })?;

        Ok(category)
    }

    /// Rename a category and repoint every item that carries the old name.
    pub async fn rename(&self, category_id: i64, input: CategoryInput) -> AppResult<Category> {
        input.validate()?;

        let mut tx = self.db.begin().await?;

        let existing = sqlx::query_as::<_, Category>(
            "SELECT id, nome FROM categorias WHERE id = ?1",
        )
        .bind(category_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoria".into()))?;

        if existing.nome == input.nome {
            tx.commit().await?;
            return Ok(existing);
        }

        let taken: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM categorias WHERE nome = ?1 AND id != ?2")
                .bind(&input.nome)
                .bind(category_id)
                .fetch_one(&mut *tx)
                .await?;
        if taken > 0 {
            return Err(AppError::Conflict {
                resource: "nome".into(),
                message: format!("Categoria '{}' já existe", input.nome),
            });
        }

        sqlx::query("UPDATE categorias SET nome = ?1 WHERE id = ?2")
            .bind(&input.nome)
            .bind(category_id)
            .execute(&mut *tx)
            .await?;

        sqlx::query("UPDATE itens SET categoria = ?1 WHERE categoria = ?2")
            .bind(&input.nome)
            .bind(&existing.nome)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(from = %existing.nome, to = %input.nome, "category renamed");

        Ok(Category {
            id: category_id,
            nome: input.nome,
        })
    }

    /// Delete a category. Refused while any item still carries its name.
    pub async fn delete(&self, category_id: i64) -> AppResult<()> {
        let existing = sqlx::query_as::<_, Category>(
            "SELECT id, nome FROM categorias WHERE id = ?1",
        )
        .bind(category_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Categoria".into()))?;

        let in_use: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM itens WHERE categoria = ?1")
            .bind(&existing.nome)
            .fetch_one(&self.db)
            .await?;
        if in_use > 0 {
            return Err(AppError::InUse(format!("Categoria '{}'", existing.nome)));
        }

        sqlx::query("DELETE FROM categorias WHERE id = ?1")
            .bind(category_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use shared::types::DEFAULT_CATEGORY;

    async fn seed_item(pool: &SqlitePool, nome: &str, categoria: &str) {
        sqlx::query(
            "INSERT INTO itens (nome, codigo_qr, categoria, estoque_atual, estoque_minimo)
             VALUES (?1, ?2, ?3, 0, 5)",
        )
        .bind(nome)
        .bind(format!("QR-{}", nome))
        .bind(categoria)
        .execute(pool)
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn test_first_list_seeds_defaults() {
        let service = CategoryService::new(test_pool().await);

        let categories = service.list().await.unwrap();
        assert_eq!(categories.len(), DEFAULT_CATEGORIES.len());
        assert!(categories.iter().any(|c| c.nome == DEFAULT_CATEGORY));

        // second read does not reseed
        let again = service.list().await.unwrap();
        assert_eq!(again.len(), DEFAULT_CATEGORIES.len());
    }

    #[tokio::test]
    async fn test_duplicate_name_conflicts() {
        let service = CategoryService::new(test_pool().await);
        service
            .create(CategoryInput { nome: "EPI".into() })
            .await
            .unwrap();

        let err = service
            .create(CategoryInput { nome: "EPI".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_rename_propagates_to_items() {
        let pool = test_pool().await;
        let service = CategoryService::new(pool.clone());
        let created = service
            .create(CategoryInput { nome: "EPI".into() })
            .await
            .unwrap();
        seed_item(&pool, "Capacete", "EPI").await;
        seed_item(&pool, "Parafuso", "Geral").await;

        service
            .rename(created.id, CategoryInput { nome: "Seguranca".into() })
            .await
            .unwrap();

        let moved: String =
            sqlx::query_scalar("SELECT categoria FROM itens WHERE nome = 'Capacete'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(moved, "Seguranca");

        let untouched: String =
            sqlx::query_scalar("SELECT categoria FROM itens WHERE nome = 'Parafuso'")
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(untouched, "Geral");
    }

    #[tokio::test]
    async fn test_rename_to_taken_name_conflicts() {
        let service = CategoryService::new(test_pool().await);
        let epi = service
            .create(CategoryInput { nome: "EPI".into() })
            .await
            .unwrap();
        service
            .create(CategoryInput { nome: "TI".into() })
            .await
            .unwrap();

        let err = service
            .rename(epi.id, CategoryInput { nome: "TI".into() })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_delete_refused_while_in_use() {
        let pool = test_pool().await;
        let service = CategoryService::new(pool.clone());
        let created = service
            .create(CategoryInput { nome: "EPI".into() })
            .await
            .unwrap();
        seed_item(&pool, "Capacete", "EPI").await;

        let err = service.delete(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::InUse(_)));

        sqlx::query("DELETE FROM itens").execute(&pool).await.unwrap();
        service.delete(created.id).await.unwrap();

        let err = service.delete(created.id).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
