use rust_decimal::Decimal;
use sqlx::PgPool;
use tracing::{debug, error};
use uuid::Uuid;

use crate::db::RepoError;
use crate::products::repo_types::Product;

impl Product {
    pub async fn create(db: &PgPool, name: &str, price: Decimal) -> Result<Product, RepoError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (id, name, price)
            VALUES ($1, $2, $3)
            RETURNING id, name, price
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(price)
        .fetch_one(db)
        .await
        .map_err(|e| {
            error!(error = %e, %name, "create product failed");
            RepoError::from(e)
        })?;
        debug!(product_id = %product.id, "product created");
        Ok(product)
    }

    pub async fn list(db: &PgPool) -> Result<Vec<Product>, RepoError> {
        sqlx::query_as::<_, Product>(r#"SELECT id, name, price FROM products"#)
            .fetch_all(db)
            .await
            .map_err(|e| {
                error!(error = %e, "list products failed");
                RepoError::from(e)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize_schema;
    use std::str::FromStr;

    #[sqlx::test(migrations = false)]
    #[ignore = "needs a live Postgres via DATABASE_URL"]
    async fn created_product_shows_up_in_list(pool: PgPool) {
        initialize_schema(&pool).await.unwrap();

        let cases = [("Widget", "9.99"), ("Gadget", "0.00"), ("Gizmo", "99999999.99")];
        for (name, price) in cases {
            let price = Decimal::from_str(price).unwrap();
            let created = Product::create(&pool, name, price).await.unwrap();
            assert_eq!(created.name, name);
            assert_eq!(created.price, price);
        }

        let listed = Product::list(&pool).await.unwrap();
        assert_eq!(listed.len(), cases.len());
        for (name, price) in cases {
            let price = Decimal::from_str(price).unwrap();
            assert!(listed.iter().any(|p| p.name == name && p.price == price));
        }
    }
}
