use sqlx::sqlite::SqliteRow;
use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::admin::RowFilter;
use crate::auth::DbUser;
use crate::catalog::{Category, DEPARTMENT_COLUMN};
use crate::department::Department;
use crate::error::AppError;

#[instrument(skip(pool))]
pub async fn find_user_by_username(
    pool: &Pool<Sqlite>,
    username: &str,
) -> Result<Option<DbUser>, AppError> {
    info!("Getting user by username");
    let row = sqlx::query_as::<_, DbUser>(
        "SELECT id, username, password FROM users WHERE username = ?",
    )
    .bind(username)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}

#[instrument(skip(pool, password_digest))]
pub async fn insert_user(
    pool: &Pool<Sqlite>,
    username: &str,
    password_digest: &str,
) -> Result<i64, AppError> {
    info!("Inserting new user");
    let res = sqlx::query("INSERT INTO users (username, password) VALUES (?, ?)")
        .bind(username)
        .bind(password_digest)
        .execute(pool)
        .await
        .map_err(|err| match err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::DuplicateUser(username.to_string())
            }
            other => AppError::QueryFailed(other),
        })?;

    Ok(res.last_insert_rowid())
}

/// Inserts one record. `values` are bound in the order of
/// [`Category::fields`].
#[instrument(skip(pool, values))]
pub async fn insert_record(
    pool: &Pool<Sqlite>,
    category: Category,
    department: Department,
    values: &[&str],
) -> Result<i64, AppError> {
    info!("Inserting record");
    let fields = category.fields();
    if values.len() != fields.len() {
        return Err(AppError::Internal(format!(
            "{} expects {} values, got {}",
            category.table(),
            fields.len(),
            values.len()
        )));
    }

    let columns = category.columns().join(", ");
    let placeholders = vec!["?"; fields.len() + 1].join(", ");
    let sql = format!(
        "INSERT INTO {} ({}) VALUES ({})",
        category.table(),
        columns,
        placeholders
    );

    let mut query = sqlx::query(&sql).bind(department.id());
    for value in values {
        query = query.bind(*value);
    }

    let res = query.execute(pool).await?;
    Ok(res.last_insert_rowid())
}

#[instrument(skip(pool))]
pub async fn count_records(
    pool: &Pool<Sqlite>,
    category: Category,
    department: Department,
) -> Result<i64, AppError> {
    let sql = format!(
        "SELECT COUNT(*) FROM {} WHERE {} = ?",
        category.table(),
        DEPARTMENT_COLUMN
    );

    let count = sqlx::query_scalar::<_, i64>(&sql)
        .bind(department.id())
        .fetch_one(pool)
        .await?;

    Ok(count)
}

#[instrument(skip(pool))]
pub async fn fetch_records(
    pool: &Pool<Sqlite>,
    category: Category,
    filter: &RowFilter,
) -> Result<Vec<SqliteRow>, AppError> {
    info!("Fetching records");
    let select = crate::admin::build_select(category, filter);

    let query = sqlx::query(&select.sql);
    let query = match &filter {
        RowFilter::All => query,
        RowFilter::Department(department) => query.bind(department.id()),
        RowFilter::Column { value, .. } => query.bind(value.as_str()),
    };

    let rows = query.fetch_all(pool).await?;
    Ok(rows)
}
