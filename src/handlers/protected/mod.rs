// handlers/protected/mod.rs - endpoints behind the permission gate
//
// Each handler receives the decoded token claims through Extension<Claims>.
pub mod drinks;

pub use drinks::create as drinks_create;
pub use drinks::delete as drinks_delete;
pub use drinks::detail as drinks_detail;
pub use drinks::update as drinks_update;
