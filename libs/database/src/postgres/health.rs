use sea_orm::DatabaseConnection;

use crate::common::{DatabaseError, DatabaseResult};

/// Ping the database to verify the connection is alive.
pub async fn check_health(db: &DatabaseConnection) -> DatabaseResult<()> {
    db.ping()
        .await
        .map_err(|e| DatabaseError::HealthCheckFailed(e.to_string()))
}
