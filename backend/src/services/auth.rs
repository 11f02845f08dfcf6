//! Authentication service

use shared::models::{LoginInput, UserProfile};
use sqlx::SqlitePool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::services::user::UserRow;

/// Account seeded on first login against an empty user table, so a fresh
/// install is reachable without manual database edits.
const BOOTSTRAP_MATRICULA: &str = "admin";
const BOOTSTRAP_SENHA: &str = "admin123";

#[derive(Clone)]
pub struct AuthService {
    db: SqlitePool,
}

impl AuthService {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Verify credentials and return the user's profile.
    ///
    /// Unknown matricula and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> AppResult<UserProfile> {
        input.validate()?;

        self.seed_bootstrap_admin().await?;

        let user = sqlx::query_as::<_, UserRow>(
            "SELECT id, nome, matricula, senha_hash, tipo, empresa FROM usuarios WHERE matricula = ?1",
        )
        .bind(&input.matricula)
        .fetch_optional(&self.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

        let valid = bcrypt::verify(&input.senha, &user.senha_hash)
            .map_err(|e| AppError::Internal(format!("Password verification failed: {}", e)))?;
        if !valid {
            return Err(AppError::InvalidCredentials);
        }

        tracing::info!(matricula = %user.matricula, "login accepted");

        Ok(UserProfile {
            nome: user.nome,
            tipo: user.tipo,
            matricula: user.matricula,
            empresa: user.empresa,
        })
    }

    async fn seed_bootstrap_admin(&self) -> AppResult<()> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.db)
            .await?;
        if total > 0 {
            return Ok(());
        }

        let hash = bcrypt::hash(BOOTSTRAP_SENHA, bcrypt::DEFAULT_COST)
            .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?;

        sqlx::query(
            "INSERT INTO usuarios (nome, matricula, senha_hash, tipo, empresa)
             VALUES ('Administrador', ?1, ?2, 'admin', 'Kinross')",
        )
        .bind(BOOTSTRAP_MATRICULA)
        .bind(&hash)
        .execute(&self.db)
        .await?;

        tracing::warn!("empty user table, seeded bootstrap admin account");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_pool;

    fn creds(matricula: &str, senha: &str) -> LoginInput {
        LoginInput {
            matricula: matricula.into(),
            senha: senha.into(),
        }
    }

    #[tokio::test]
    async fn test_first_login_seeds_bootstrap_admin() {
        let service = AuthService::new(test_pool().await);

        let profile = service.login(creds("admin", "admin123")).await.unwrap();
        assert_eq!(profile.nome, "Administrador");
        assert_eq!(profile.tipo, "admin");
        assert_eq!(profile.empresa, "Kinross");
    }

    #[tokio::test]
    async fn test_bootstrap_skipped_once_users_exist() {
        let pool = test_pool().await;
        sqlx::query(
            "INSERT INTO usuarios (nome, matricula, senha_hash, tipo, empresa)
             VALUES ('Ana', 'A100', ?1, 'comum', 'Kinross')",
        )
        .bind(bcrypt::hash("s3cret", 4).unwrap())
        .execute(&pool)
        .await
        .unwrap();

        let service = AuthService::new(pool);
        let err = service.login(creds("admin", "admin123")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let service = AuthService::new(test_pool().await);
        service.login(creds("admin", "admin123")).await.unwrap();

        let err = service.login(creds("admin", "nope")).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_blank_credentials_rejected() {
        let service = AuthService::new(test_pool().await);
        let err = service.login(creds("", "")).await.unwrap_err();
        assert!(matches!(err, AppError::ValidationErrors(_)));
    }
}
