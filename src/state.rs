//! Shared application state for all routes.

use crate::store::ClinicStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ClinicStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: ClinicStore + 'static,
    {
        Self {
            store: Arc::new(store),
        }
    }
}
