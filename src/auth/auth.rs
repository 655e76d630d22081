use sqlx::{Pool, Sqlite};
use tracing::{info, instrument};

use crate::db::{find_user_by_username, insert_user};
use crate::error::AppError;
use crate::validation::ValidateInput;

use super::{LoginCredentials, NewCredentials, User, digest_password, verify_password};

/// Creates an account and returns its id.
#[instrument(skip_all, fields(username = %username))]
pub async fn register(pool: &Pool<Sqlite>, username: &str, password: &str) -> Result<i64, AppError> {
    let credentials = NewCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }
    .validate_input()?;

    if find_user_by_username(pool, &credentials.username)
        .await?
        .is_some()
    {
        return Err(AppError::DuplicateUser(credentials.username));
    }

    let digest = digest_password(&credentials.password);
    let id = insert_user(pool, &credentials.username, &digest).await?;

    info!(user_id = id, "Registered new user");
    Ok(id)
}

/// Checks a username and password against the credential store.
///
/// An empty username is rejected before the store is touched.
#[instrument(skip_all, fields(username = %username))]
pub async fn login(pool: &Pool<Sqlite>, username: &str, password: &str) -> Result<User, AppError> {
    let credentials = LoginCredentials {
        username: username.to_string(),
        password: password.to_string(),
    }
    .validate_input()?;

    let stored = find_user_by_username(pool, &credentials.username)
        .await?
        .ok_or_else(|| AppError::UserNotFound(credentials.username.clone()))?;

    let digest = stored.password.clone().unwrap_or_default();
    if !verify_password(&credentials.password, &digest) {
        return Err(AppError::InvalidCredentials);
    }

    let user = User::from(stored);
    info!(user_id = user.id, "Authentication successful");
    Ok(user)
}
