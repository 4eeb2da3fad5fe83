use std::sync::Arc;

use crate::auth::TokenService;
use crate::services::{AccountService, TaskService};
use crate::store::{TaskStore, UserStore};

/// Shared application state, registered once as `web::Data<AppState>`.
///
/// Nothing in here is mutated after startup; the stores handle their own
/// synchronisation.
#[derive(Clone)]
pub struct AppState {
    pub accounts: AccountService,
    pub tasks: TaskService,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        tasks: Arc<dyn TaskStore>,
        tokens: TokenService,
    ) -> Self {
        Self {
            accounts: AccountService::new(users, tokens.clone()),
            tasks: TaskService::new(tasks),
            tokens,
        }
    }
}
