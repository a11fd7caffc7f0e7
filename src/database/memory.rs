use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::database::models::drink::{Drink, NewDrink};
use crate::database::store::{DrinkStore, StoreError};

/// Process-local drink store with the same uniqueness rules as the `drink` table.
#[derive(Debug, Default)]
pub struct MemoryDrinkStore {
    inner: RwLock<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    next_id: i32,
    drinks: BTreeMap<i32, Drink>,
}

impl Inner {
    fn title_taken(&self, title: &str, except: Option<i32>) -> bool {
        self.drinks
            .values()
            .any(|d| d.title == title && Some(d.id) != except)
    }
}

impl MemoryDrinkStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DrinkStore for MemoryDrinkStore {
    async fn list(&self) -> Result<Vec<Drink>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.drinks.values().cloned().collect())
    }

    async fn find(&self, id: i32) -> Result<Option<Drink>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.drinks.get(&id).cloned())
    }

    async fn insert(&self, drink: NewDrink) -> Result<Drink, StoreError> {
        let mut inner = self.inner.write().await;
        if inner.title_taken(&drink.title, None) {
            return Err(StoreError::DuplicateTitle(drink.title));
        }

        inner.next_id += 1;
        let stored = Drink {
            id: inner.next_id,
            title: drink.title,
            recipe: drink.recipe,
        };
        inner.drinks.insert(stored.id, stored.clone());
        Ok(stored)
    }

    async fn update(&self, drink: &Drink) -> Result<Drink, StoreError> {
        let mut inner = self.inner.write().await;
        if !inner.drinks.contains_key(&drink.id) {
            return Err(StoreError::NotFound(drink.id));
        }
        if inner.title_taken(&drink.title, Some(drink.id)) {
            return Err(StoreError::DuplicateTitle(drink.title.clone()));
        }

        inner.drinks.insert(drink.id, drink.clone());
        Ok(drink.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        inner
            .drinks
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound(id))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
