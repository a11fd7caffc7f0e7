use serde_json::Value;
use thiserror::Error;

use crate::database::models::drink::{encode_recipe, Drink, NewDrink};
use crate::database::{DrinkStore, StoreError};

/// Outcome of a failed drink operation.
#[derive(Debug, Error)]
pub enum DrinkError {
    /// Body empty, not an object, or without `title`/`recipe`.
    #[error("request body was empty or valid keys are missing")]
    InvalidBody,

    #[error("malformed JSON body: {0}")]
    MalformedJson(String),

    #[error("drink not found")]
    NotFound,

    /// Valid request that could not be applied; the message is for logs only.
    #[error("unprocessable: {0}")]
    Unprocessable(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Fields recognized in a create or update body.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DrinkChanges {
    pub title: Option<Value>,
    pub recipe: Option<Value>,
}

impl DrinkChanges {
    /// Accepts a JSON object holding at least one of `title` or `recipe`.
    pub fn from_body(body: Option<Value>) -> Result<Self, DrinkError> {
        let mut fields = match body {
            Some(Value::Object(fields)) => fields,
            _ => return Err(DrinkError::InvalidBody),
        };

        if !fields.contains_key("title") && !fields.contains_key("recipe") {
            return Err(DrinkError::InvalidBody);
        }

        Ok(Self {
            title: fields.remove("title"),
            recipe: fields.remove("recipe"),
        })
    }

    /// Both fields are required to build a new drink.
    pub fn into_new_drink(self) -> Result<NewDrink, DrinkError> {
        let title = self
            .title
            .ok_or_else(|| DrinkError::Unprocessable("missing title".to_string()))?;
        let recipe = self
            .recipe
            .ok_or_else(|| DrinkError::Unprocessable("missing recipe".to_string()))?;

        Ok(NewDrink {
            title: title_text(title)?,
            recipe: recipe_text(&recipe)?,
        })
    }

    /// Overwrites only the supplied fields.
    pub fn apply_to(self, drink: &mut Drink) -> Result<(), DrinkError> {
        if let Some(title) = self.title {
            drink.title = title_text(title)?;
        }
        if let Some(recipe) = self.recipe {
            drink.recipe = recipe_text(&recipe)?;
        }
        Ok(())
    }
}

fn title_text(title: Value) -> Result<String, DrinkError> {
    match title {
        Value::String(text) => Ok(text),
        other => Err(DrinkError::Unprocessable(format!("title must be a string, got {other}"))),
    }
}

fn recipe_text(recipe: &Value) -> Result<String, DrinkError> {
    encode_recipe(recipe).map_err(|e| DrinkError::Unprocessable(e.to_string()))
}

/// Raw request body to JSON. An empty body is `None`, not an error.
pub fn parse_body(raw: &[u8]) -> Result<Option<Value>, DrinkError> {
    if raw.iter().all(u8::is_ascii_whitespace) {
        return Ok(None);
    }
    serde_json::from_slice(raw)
        .map(Some)
        .map_err(|e| DrinkError::MalformedJson(e.to_string()))
}

/// All drinks by id. An empty menu is reported as [`DrinkError::NotFound`].
pub async fn list_drinks(store: &dyn DrinkStore) -> Result<Vec<Drink>, DrinkError> {
    let drinks = store.list().await?;
    if drinks.is_empty() {
        return Err(DrinkError::NotFound);
    }
    Ok(drinks)
}

pub async fn create_drink(store: &dyn DrinkStore, raw: &[u8]) -> Result<Drink, DrinkError> {
    let changes = DrinkChanges::from_body(parse_body(raw)?)?;
    let new_drink = changes.into_new_drink()?;

    let drink = store
        .insert(new_drink)
        .await
        .map_err(|e| DrinkError::Unprocessable(e.to_string()))?;

    tracing::info!("Created drink {} '{}'", drink.id, drink.title);
    Ok(drink)
}

/// Looks the drink up before the body is even parsed, so a missing id wins over a bad body.
pub async fn update_drink(store: &dyn DrinkStore, id: i32, raw: &[u8]) -> Result<Drink, DrinkError> {
    let mut drink = find_drink(store, id).await?;

    let changes = DrinkChanges::from_body(parse_body(raw)?)?;
    changes.apply_to(&mut drink)?;

    let drink = store
        .update(&drink)
        .await
        .map_err(|e| DrinkError::Unprocessable(e.to_string()))?;

    tracing::info!("Updated drink {}", drink.id);
    Ok(drink)
}

pub async fn delete_drink(store: &dyn DrinkStore, id: i32) -> Result<i32, DrinkError> {
    find_drink(store, id).await?;

    store
        .delete(id)
        .await
        .map_err(|e| DrinkError::Unprocessable(e.to_string()))?;

    tracing::info!("Deleted drink {}", id);
    Ok(id)
}

async fn find_drink(store: &dyn DrinkStore, id: i32) -> Result<Drink, DrinkError> {
    store.find(id).await?.ok_or(DrinkError::NotFound)
}
