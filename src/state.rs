//! Shared application state for all routes. Built once at startup.

use crate::auth::{AuthService, SessionKeys};
use crate::config::AuthSettings;
use crate::store::Gateway;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<dyn Gateway>,
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(gateway: Arc<dyn Gateway>, auth_settings: &AuthSettings) -> Self {
        let auth = AuthService::new(gateway.clone(), SessionKeys::new(auth_settings));
        AppState {
            gateway,
            auth: Arc::new(auth),
        }
    }

    pub fn db(&self) -> &dyn Gateway {
        &*self.gateway
    }
}
