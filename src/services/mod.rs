pub mod drink_service;

pub use drink_service::{DrinkChanges, DrinkError};
