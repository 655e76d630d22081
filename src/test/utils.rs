#[cfg(test)]
pub mod test_utils {
    use crate::auth::register;
    use crate::catalog::Category;
    use crate::database::apply_schema;
    use crate::db::insert_record;
    use crate::department::Department;
    use crate::error::AppError;
    use crate::init_rocket;
    use rocket::http::{ContentType, Status};
    use rocket::local::asynchronous::{Client, LocalResponse};
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::{Pool, Sqlite};
    use std::collections::HashMap;
    use std::sync::Once;

    static INIT: Once = Once::new();
    pub static STANDARD_PASSWORD: &str = "password123";

    pub struct TestUser {
        pub username: String,
        pub password: String,
    }

    pub struct TestRecord {
        pub category: Category,
        pub department: Department,
        pub values: Vec<String>,
    }

    #[derive(Default)]
    pub struct TestDbBuilder {
        users: Vec<TestUser>,
        records: Vec<TestRecord>,
    }

    impl TestDbBuilder {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn user(mut self, username: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                password: STANDARD_PASSWORD.to_string(),
            });
            self
        }

        pub fn user_with_password(mut self, username: &str, password: &str) -> Self {
            self.users.push(TestUser {
                username: username.to_string(),
                password: password.to_string(),
            });
            self
        }

        /// Adds a record; missing trailing values are stored as empty strings.
        pub fn record(mut self, category: Category, department: Department, values: &[&str]) -> Self {
            let mut values: Vec<String> = values.iter().map(|v| v.to_string()).collect();
            values.resize(category.fields().len(), String::new());

            self.records.push(TestRecord {
                category,
                department,
                values,
            });
            self
        }

        pub async fn build(self) -> Result<TestDb, AppError> {
            INIT.call_once(|| {
                let _ = env_logger::builder()
                    .parse_filters("debug")
                    .is_test(true)
                    .try_init();
            });

            let pool = empty_pool().await?;
            apply_schema(&pool).await?;

            let mut user_id_map: HashMap<String, i64> = HashMap::new();

            for user in &self.users {
                let user_id = register(&pool, &user.username, &user.password).await?;
                user_id_map.insert(user.username.clone(), user_id);
            }

            for record in &self.records {
                let values: Vec<&str> = record.values.iter().map(String::as_str).collect();
                insert_record(&pool, record.category, record.department, &values).await?;
            }

            Ok(TestDb { pool, user_id_map })
        }
    }

    pub struct TestDb {
        pub pool: Pool<Sqlite>,
        pub user_id_map: HashMap<String, i64>,
    }

    impl TestDb {
        pub fn user_id(&self, username: &str) -> Option<i64> {
            self.user_id_map.get(username).copied()
        }

        pub async fn drop_table(&self, category: Category) {
            sqlx::query(&format!("DROP TABLE {}", category.table()))
                .execute(&self.pool)
                .await
                .expect("Failed to drop table");
        }

        pub async fn row_count(&self, category: Category) -> i64 {
            sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {}", category.table()))
                .fetch_one(&self.pool)
                .await
                .expect("Failed to count rows")
        }
    }

    /// In-memory database without any tables.
    pub async fn empty_pool() -> Result<Pool<Sqlite>, AppError> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Ok(pool)
    }

    /// One user plus a handful of records spread across departments:
    /// two CSE journals, one AIML journal, one ISE conference paper and one
    /// MECH patent.
    pub async fn create_standard_test_db() -> TestDb {
        TestDbBuilder::new()
            .user_with_password("alice", "secret")
            .record(
                Category::Journal,
                Department::Cse,
                &["Ada Lovelace", "2021", "Analytical Engines", "Computing Review"],
            )
            .record(
                Category::Journal,
                Department::Cse,
                &["Grace Hopper", "2019", "Compilers", "Computing Review"],
            )
            .record(
                Category::Journal,
                Department::Aiml,
                &["Alan Turing", "2021", "Thinking Machines", "Mind"],
            )
            .record(
                Category::Conference,
                Department::Ise,
                &["2020", "Barbara Liskov", "Substitution"],
            )
            .record(Category::Patent, Department::Mech, &["James Watt", "Steam Engine"])
            .build()
            .await
            .expect("Failed to build test database")
    }

    pub async fn setup_test_client(test_db: TestDb) -> (Client, TestDb) {
        let rocket = init_rocket(test_db.pool.clone());
        let client = Client::tracked(rocket)
            .await
            .expect("valid rocket instance");
        (client, test_db)
    }

    pub async fn post_form<'c>(client: &'c Client, uri: &str, body: &str) -> LocalResponse<'c> {
        client
            .post(uri.to_string())
            .header(ContentType::Form)
            .body(body.to_string())
            .dispatch()
            .await
    }

    pub async fn body_of(response: LocalResponse<'_>) -> (Status, String) {
        let status = response.status();
        let body = response.into_string().await.unwrap_or_default();
        (status, body)
    }
}
