use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::drink::{Drink, NewDrink};
use crate::database::store::{DrinkStore, StoreError};

/// PostgreSQL-backed drink store.
#[derive(Clone)]
pub struct PgDrinkStore {
    pool: PgPool,
}

impl PgDrinkStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Maps unique-constraint violations on `title` to [`StoreError::DuplicateTitle`].
fn map_write_error(err: sqlx::Error, title: &str) -> StoreError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            StoreError::DuplicateTitle(title.to_string())
        }
        _ => StoreError::Sqlx(err),
    }
}

#[async_trait]
impl DrinkStore for PgDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let drinks = sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drink ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(drinks)
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        let drink = sqlx::query_as::<_, Drink>("SELECT id, title, recipe FROM drink WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(drink)
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        sqlx::query_as::<_, Drink>(
            "INSERT INTO drink (title, recipe) VALUES ($1, $2) RETURNING id, title, recipe",
        )
        .bind(&drink.title)
        .bind(&drink.recipe)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &drink.title))
    }

    async fn update(&self, drink: &Drink) -> Result<Drink, StoreError> {
        let updated = sqlx::query_as::<_, Drink>(
            "UPDATE drink SET title = $2, recipe = $3 WHERE id = $1 RETURNING id, title, recipe",
        )
        .bind(drink.id)
        .bind(&drink.title)
        .bind(&drink.recipe)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| map_write_error(e, &drink.title))?;

        updated.ok_or(StoreError::NotFound(drink.id))
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM drink WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound(id));
        }
        Ok(())
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("Closed database pool");
    }
}
