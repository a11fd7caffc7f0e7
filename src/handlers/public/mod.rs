// handlers/public/mod.rs - endpoints that need no token
pub mod drinks;
pub mod health;

pub use drinks::list as drinks_list;
pub use health::get as health_get;
