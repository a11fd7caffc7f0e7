use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;

/// Recipe keys kept by the short view.
const SHORT_RECIPE_KEYS: &[&str] = &["color", "parts"];

/// A row of the `drink` table. The recipe is always held as text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Drink {
    pub id: i32,
    pub title: String,
    pub recipe: String,
}

/// A drink that has not been persisted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDrink {
    pub title: String,
    pub recipe: String,
}

/// Wire representation of a drink, shared by the short and long views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrinkView {
    pub id: i32,
    pub title: String,
    pub recipe: Value,
}

impl Drink {
    /// Public listing view: each recipe object is reduced to `color` and `parts`.
    pub fn short(&self) -> DrinkView {
        DrinkView {
            id: self.id,
            title: self.title.clone(),
            recipe: summarize_recipe(decode_recipe(&self.recipe)),
        }
    }

    /// Detail view with the full recipe.
    pub fn long(&self) -> DrinkView {
        DrinkView {
            id: self.id,
            title: self.title.clone(),
            recipe: decode_recipe(&self.recipe),
        }
    }
}

/// Strings are stored verbatim, anything else as compact JSON.
pub fn encode_recipe(recipe: &Value) -> Result<String, serde_json::Error> {
    match recipe {
        Value::String(text) => Ok(text.clone()),
        other => serde_json::to_string(other),
    }
}

/// Parses stored text as JSON. Text that is not JSON is returned as a JSON string,
/// so a string recipe that happens to be JSON (`"42"`) comes back as that value.
pub fn decode_recipe(stored: &str) -> Value {
    serde_json::from_str(stored).unwrap_or_else(|_| Value::String(stored.to_string()))
}

fn summarize_recipe(recipe: Value) -> Value {
    match recipe {
        Value::Array(parts) => Value::Array(parts.into_iter().map(summarize_part).collect()),
        other => summarize_part(other),
    }
}

fn summarize_part(part: Value) -> Value {
    match part {
        Value::Object(fields) => {
            let kept: Map<String, Value> = fields
                .into_iter()
                .filter(|(key, _)| SHORT_RECIPE_KEYS.contains(&key.as_str()))
                .collect();
            Value::Object(kept)
        }
        other => other,
    }
}
