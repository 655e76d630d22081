#[cfg(test)]
mod tests {
    use crate::auth::{digest_password, login, register};
    use crate::db::{find_user_by_username, insert_user};
    use crate::error::AppError;
    use crate::test::test_utils::{STANDARD_PASSWORD, TestDbBuilder, empty_pool};

    async fn empty_store() -> crate::test::test_utils::TestDb {
        TestDbBuilder::new()
            .build()
            .await
            .expect("Failed to build test database")
    }

    #[rocket::async_test]
    async fn test_register_then_login() {
        let test_db = empty_store().await;

        let id = register(&test_db.pool, "alice", "secret")
            .await
            .expect("Failed to register");
        assert!(id > 0, "User ID should be positive");

        let user = login(&test_db.pool, "alice", "secret")
            .await
            .expect("Login should succeed");
        assert_eq!(user.id, id);
        assert_eq!(user.username, "alice");

        match login(&test_db.pool, "alice", "wrong").await {
            Err(AppError::InvalidCredentials) => {}
            other => panic!("Expected InvalidCredentials, got {:?}", other),
        }
    }

    #[rocket::async_test]
    async fn test_stored_password_is_hex_digest() {
        let test_db = empty_store().await;

        register(&test_db.pool, "alice", "secret")
            .await
            .expect("Failed to register");

        let stored = find_user_by_username(&test_db.pool, "alice")
            .await
            .expect("Failed to query user")
            .expect("User should exist");

        assert_eq!(stored.password, Some(digest_password("secret")));
        assert_ne!(stored.password.as_deref(), Some("secret"));
    }

    #[rocket::async_test]
    async fn test_register_rejects_username_equal_to_password() {
        let test_db = empty_store().await;

        match register(&test_db.pool, "bob", "bob").await {
            Err(AppError::InvalidInput(msg)) => {
                assert_eq!(msg, "Password must differ from username")
            }
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let missing = find_user_by_username(&test_db.pool, "bob")
            .await
            .expect("Failed to query user");
        assert!(missing.is_none());
    }

    #[rocket::async_test]
    async fn test_register_rejects_empty_username() {
        let test_db = empty_store().await;

        match register(&test_db.pool, "", "secret").await {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "Username is required"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }
    }

    #[rocket::async_test]
    async fn test_register_rejects_duplicate_username() {
        let test_db = TestDbBuilder::new()
            .user("carol")
            .build()
            .await
            .expect("Failed to build test database");
        let existing_id = test_db.user_id("carol").expect("carol should be registered");

        match register(&test_db.pool, "carol", "another").await {
            Err(AppError::DuplicateUser(name)) => assert_eq!(name, "carol"),
            other => panic!("Expected DuplicateUser, got {:?}", other),
        }

        let user = login(&test_db.pool, "carol", STANDARD_PASSWORD)
            .await
            .expect("First password should still work");
        assert_eq!(user.id, existing_id);
    }

    #[rocket::async_test]
    async fn test_unique_violation_maps_to_duplicate_user() {
        let test_db = empty_store().await;

        insert_user(&test_db.pool, "dave", &digest_password("one"))
            .await
            .expect("First insert should succeed");

        match insert_user(&test_db.pool, "dave", &digest_password("two")).await {
            Err(AppError::DuplicateUser(name)) => assert_eq!(name, "dave"),
            other => panic!("Expected DuplicateUser, got {:?}", other),
        }
    }

    #[rocket::async_test]
    async fn test_login_unknown_user() {
        let test_db = empty_store().await;

        match login(&test_db.pool, "nobody", "secret").await {
            Err(AppError::UserNotFound(name)) => assert_eq!(name, "nobody"),
            other => panic!("Expected UserNotFound, got {:?}", other),
        }
    }

    #[rocket::async_test]
    async fn test_login_with_empty_username_never_queries_store() {
        // No tables at all: any query would fail with QueryFailed.
        let pool = empty_pool().await.expect("Failed to open database");

        match login(&pool, "", "anything").await {
            Err(AppError::InvalidInput(msg)) => assert_eq!(msg, "Invalid username"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        match login(&pool, "someone", "anything").await {
            Err(AppError::QueryFailed(_)) => {}
            other => panic!("Expected QueryFailed without a users table, got {:?}", other),
        }
    }
}
