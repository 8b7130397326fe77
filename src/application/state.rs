use sea_orm::DatabaseConnection;

/// Database connection type alias
pub type DbConn = DatabaseConnection;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
}

impl AppState {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}
