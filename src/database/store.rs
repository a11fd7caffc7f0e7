use async_trait::async_trait;
use thiserror::Error;

use crate::database::models::drink::{Drink, NewDrink};

/// Errors raised by a [`DrinkStore`] implementation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("a drink titled '{0}' already exists")]
    DuplicateTitle(String),

    #[error("drink {0} does not exist")]
    NotFound(i32),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

/// Persistence operations on the drink menu.
#[async_trait]
pub trait DrinkStore: Send + Sync {
    /// All drinks ordered by id ascending.
    async fn list(&self) -> Result<Vec<Drink>, StoreError>;

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError>;

    /// Inserts a drink and returns it with its assigned id.
    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError>;

    /// Overwrites title and recipe of an existing drink.
    async fn update(&self, drink: &Drink) -> Result<Drink, StoreError>;

    async fn delete(&self, id: i32) -> Result<(), StoreError>;

    /// Cheap connectivity probe used by the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;

    /// Releases held resources on shutdown.
    async fn close(&self) {}
}
