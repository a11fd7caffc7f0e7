use std::sync::Arc;

use crate::auth::TokenVerifier;
use crate::database::DrinkStore;
use crate::middleware::PermissionGate;

/// Shared application state, built once at startup and handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DrinkStore>,
    pub verifier: Arc<TokenVerifier>,
}

impl AppState {
    pub fn new(store: Arc<dyn DrinkStore>, verifier: TokenVerifier) -> Self {
        Self {
            store,
            verifier: Arc::new(verifier),
        }
    }

    /// Gate state for a route that requires `permission`.
    pub fn gate(&self, permission: &'static str) -> PermissionGate {
        PermissionGate::new(self.verifier.clone(), permission)
    }
}
