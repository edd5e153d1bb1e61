use sqlx::PgPool;
use tracing::{debug, error, warn};
use uuid::Uuid;

use crate::db::RepoError;
use crate::favorites::repo_types::Favorite;

impl Favorite {
    /// Insert a favorite. Referenced rows are not pre-checked; the foreign keys decide.
    pub async fn create(
        db: &PgPool,
        user_id: Uuid,
        product_id: Uuid,
    ) -> Result<Favorite, RepoError> {
        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (id, user_id, product_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, product_id
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(product_id)
        .fetch_one(db)
        .await
        .map_err(|e| {
            let err = RepoError::from(e);
            match &err {
                RepoError::Conflict(_) | RepoError::MissingReference(_) => {
                    warn!(error = %err, %user_id, %product_id, "create favorite rejected")
                }
                _ => error!(error = %err, %user_id, %product_id, "create favorite failed"),
            }
            err
        })?;
        debug!(favorite_id = %favorite.id, %user_id, "favorite created");
        Ok(favorite)
    }

    pub async fn list_for_user(db: &PgPool, user_id: Uuid) -> Result<Vec<Favorite>, RepoError> {
        sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, user_id, product_id
            FROM favorites
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_all(db)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, "list favorites failed");
            RepoError::from(e)
        })
    }

    /// Delete the favorite owned by `user_id`. Returns rows removed; zero is not an error.
    pub async fn delete(db: &PgPool, user_id: Uuid, favorite_id: Uuid) -> Result<u64, RepoError> {
        let res = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(favorite_id)
        .bind(user_id)
        .execute(db)
        .await
        .map_err(|e| {
            error!(error = %e, %user_id, %favorite_id, "delete favorite failed");
            RepoError::from(e)
        })?;
        Ok(res.rows_affected())
    }
}
