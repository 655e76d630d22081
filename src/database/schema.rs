use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::catalog::Category;
use crate::error::AppError;

pub const USERS_SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL DEFAULT ''
);
"#;

/// Full schema: the credential store followed by one table per category.
pub fn get_schema_string() -> String {
    let mut schema = String::from(USERS_SCHEMA);
    for category in Category::ALL {
        schema.push('\n');
        schema.push_str(&category.create_table_sql());
    }
    schema
}

#[instrument(skip(pool))]
pub async fn apply_schema(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    info!("Creating missing tables");
    sqlx::raw_sql(&get_schema_string()).execute(pool).await?;
    info!("Schema ready");
    Ok(())
}
