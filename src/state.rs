use sea_orm::DatabaseConnection;

/// Shared handles passed to every handler through axum state. The database
/// connection is the only cross-request resource.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}
