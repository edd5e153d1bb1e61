use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use crate::auth::password::hash_password_blocking;
use crate::db::RepoError;
use crate::users::repo_types::User;

impl User {
    /// Hash the password and insert a new user with an application-generated id.
    pub async fn create(db: &PgPool, username: &str, password: &str) -> Result<User, RepoError> {
        let id = Uuid::new_v4();
        let password_hash = hash_password_blocking(password.to_owned())
            .await
            .map_err(|e| {
                error!(error = %e, "hashing password failed");
                RepoError::Hashing(e.to_string())
            })?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, username, password_hash
            "#,
        )
        .bind(id)
        .bind(username)
        .bind(&password_hash)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, %username, "create user failed");
            RepoError::from(e)
        })?;
        debug!(user_id = %user.id, "user created");
        Ok(user)
    }

    pub async fn list(db: &PgPool) -> Result<Vec<User>, RepoError> {
        sqlx::query_as::<_, User>(r#"SELECT id, username, password_hash FROM users"#)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "list users failed");
                RepoError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::password::verify_password_blocking;
    use crate::db::initialize_schema;

    async fn find_by_username(db: &PgPool, username: &str) -> Option<User> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, password_hash
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(db)
        .await
        .unwrap()
    }

    /// The user, only when `password` matches the stored hash.
    async fn verify_credentials(db: &PgPool, username: &str, password: &str) -> Option<User> {
        let user = find_by_username(db, username).await?;
        let ok = verify_password_blocking(password.to_owned(), user.password_hash.clone())
            .await
            .unwrap();
        ok.then_some(user)
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn create_never_stores_plaintext(pool: PgPool) {
        initialize_schema(&pool).await.unwrap();

        let user = User::create(&pool, "alice", "pw123").await.unwrap();
        assert_eq!(user.username, "alice");
        assert_ne!(user.password_hash, "pw123");

        let stored: (String,) = sqlx::query_as("SELECT password_hash FROM users WHERE id = $1")
            .bind(user.id)
            .fetch_one(&pool)
            .await
            .unwrap();
        assert!(!stored.0.contains("pw123"));

        assert!(verify_credentials(&pool, "alice", "pw123")
            .await
            .is_some());
        assert!(verify_credentials(&pool, "alice", "pw124")
            .await
            .is_none());
        assert!(verify_credentials(&pool, "bob", "pw123")
            .await
            .is_none());
    }

    #[sqlx::test(migrations = false)]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn duplicate_username_is_a_conflict(pool: PgPool) {
        initialize_schema(&pool).await.unwrap();

        User::create(&pool, "alice", "pw123").await.unwrap();
        let err = User::create(&pool, "alice", "other").await.unwrap_err();
        assert!(matches!(err, RepoError::Conflict(_)));
        assert_eq!(User::list(&pool).await.unwrap().len(), 1);
    }
}
