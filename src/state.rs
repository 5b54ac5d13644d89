//! Shared application state, constructed once at startup and passed to all routes.

use crate::auth::TokenService;
use crate::config::AdminCredential;
use sqlx::PgPool;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub tokens: TokenService,
    pub admin: AdminCredential,
}
