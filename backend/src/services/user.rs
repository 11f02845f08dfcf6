//! User account management service

use serde::Serialize;
use shared::models::UserInput;
use sqlx::{FromRow, SqlitePool};
use validator::Validate;

use crate::db::is_unique_violation;
use crate::error::{AppError, AppResult};

/// Full user row, including the password hash. Never serialized.
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: i64,
    pub nome: String,
    pub matricula: String,
    pub senha_hash: String,
    pub tipo: String,
    pub empresa: String,
}

/// Caller-facing view of a user; the hash stays out of every response.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserView {
    pub id: i64,
    pub nome: String,
    pub matricula: String,
    pub tipo: String,
    pub empresa: String,
}

#[derive(Clone)]
pub struct UserService {
    db: SqlitePool,
}

impl UserService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    pub async fn list(&self) -> AppResult<Vec<UserView>> {
        let users = sqlx::query_as::<_, UserView>(
            "SELECT id, nome, matricula, tipo, empresa FROM usuarios ORDER BY id ASC",
        )
        .fetch_all(&self.db)
        .await?;
        Ok(users)
    }

    pub async fn create(&self, input: UserInput) -> AppResult<UserView> {
        input.validate()?;
        if input.senha.is_empty() {
            return Err(AppError::Validation {
                field: "senha".into(),
                message: "senha obrigatória".into(),
            });
        }

        let hash = bcrypt::hash(&input.senha, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = sqlx::query_as::<_, UserView>(
            "INSERT INTO usuarios (nome, matricula, senha_hash, tipo, empresa)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, nome, matricula, tipo, empresa",
        )
        .bind(&input.nome)
        .bind(&input.matricula)
        .bind(&hash)
        .bind(input.tipo.as_str())
        .bind(&input.empresa)
        .fetch_one(&self.db)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict {
                    resource: "matricula".into(),
                    message: format!("Matrícula '{}' já cadastrada", input.matricula),
                }
            } else {
                e.into()
            }
        })?;

        tracing::info!(matricula = %user.matricula, "user created");
        Ok(user)
    }

    /// Replace a user's profile fields. An empty `senha` keeps the stored
    /// hash; a non-empty one is re-hashed.
    pub async fn update(&self, user_id: i64, input: UserInput) -> AppResult<UserView> {
        input.validate()?;

        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios WHERE id = ?1")
            .bind(user_id)
            .fetch_one(&self.db)
            .await?;
        if exists == 0 {
            return Err(AppError::NotFound("Usuário".into()));
        }

        let map_conflict = |e: sqlx::Error| {
            if is_unique_violation(&e) {
                AppError::Conflict {
                    resource: "matricula".into(),
                    message: format!("Matrícula '{}' já cadastrada", input.matricula),
                }
            } else {
                e.into()
            }
        };

        let user = if input.senha.is_empty() {
            sqlx::query_as::<_, UserView>(
                "UPDATE usuarios SET nome = ?1, matricula = ?2, tipo = ?3, empresa = ?4
                 WHERE id = ?5
                 RETURNING id, nome, matricula, tipo, empresa",
            )
            .bind(&input.nome)
            .bind(&input.matricula)
            .bind(input.tipo.as_str())
            .bind(&input.empresa)
            .bind(user_id)
            .fetch_one(&self.db)
            .await
            .map_err(map_conflict)?
        } else {
            let hash = bcrypt::hash(&input.senha, bcrypt::DEFAULT_COST)
                .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;
            sqlx::query_as::<_, UserView>(
                "UPDATE usuarios SET nome = ?1, matricula = ?2, senha_hash = ?3, tipo = ?4, empresa = ?5
                 WHERE id = ?6
                 RETURNING id, nome, matricula, tipo, empresa",
            )
            .bind(&input.nome)
            .bind(&input.matricula)
            .bind(&hash)
            .bind(input.tipo.as_str())
            .bind(&input.empresa)
            .bind(user_id)
            .fetch_one(&self.db)
            .await
            .map_err(map_conflict)?
        };

        Ok(user)
    }

    /// Delete a user. Deleting an absent id is a no-op; movement history
    /// keeps its weak reference either way.
    pub async fn delete(&self, user_id: i64) -> AppResult<()> {
        sqlx::query("DELETE FROM usuarios WHERE id = ?1")
            .bind(user_id)
            .execute(&self.db)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;
    use shared::types::Role;

    fn input(nome: &str, matricula: &str, senha: &str) -> UserInput {
        UserInput {
            nome: nome.into(),
            matricula: matricula.into(),
            senha: senha.into(),
            tipo: Role::Comum,
            empresa: "Kinross".into(),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_omits_password_hash() {
        let service = UserService::new(test_pool().await);

        let created = service.create(input("Ana", "A100", "s3cret")).await.unwrap();
        assert_eq!(created.tipo, "comum");

        let listed = service.list().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].matricula, "A100");
        let json = serde_json::to_value(&listed[0]).unwrap();
        assert!(json.get("senha_hash").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_matricula_conflicts() {
        let service = UserService::new(test_pool().await);
        service.create(input("Ana", "A100", "x")).await.unwrap();

        let err = service.create(input("Beto", "A100", "y")).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn test_update_keeps_hash_when_senha_empty() {
        let pool = test_pool().await;
        let service = UserService::new(pool.clone());
        let created = service.create(input("Ana", "A100", "s3cret")).await.unwrap();

        let before: String =
            sqlx::query_scalar("SELECT senha_hash FROM usuarios WHERE id = ?1")
                .bind(created.id)
                .fetch_one(&pool)
                .await
                .unwrap();

        let updated = service
            .update(created.id, input("Ana Maria", "A100", ""))
            .await
            .unwrap();
        assert_eq!(updated.nome, "Ana Maria");

        let after: String = sqlx::query_scalar("SELECT senha_hash FROM usuarios WHERE id = ?1")
            .bind(created.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(before, after);
    }

    #[tokio::test]
    async fn test_update_missing_user_not_found() {
        let service = UserService::new(test_pool().await);
        let err = service.update(99, input("Ana", "A100", "")).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_delete_is_permissive() {
        let service = UserService::new(test_pool().await);
        service.delete(42).await.unwrap();
    }
}
