pub mod auth;
pub mod response;

pub use auth::{require_permission, PermissionGate};
pub use response::{ApiResponse, ApiResult, Deleted, DrinkList};
