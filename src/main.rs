#[macro_use]
extern crate rocket;

mod admin;
mod auth;
mod catalog;
mod database;
mod db;
mod department;
mod env;
mod error;
mod routes;
mod submission;
mod telemetry;
#[cfg(test)]
mod test;
mod validation;

use error::AppError;
use rocket::{Build, Rocket};
use rocket_dyn_templates::Template;
use routes::{
    admin_page, admin_submit, create_user_page, create_user_submit, health, index, landing,
    landing_submit, login_page, login_submit, user_page, user_submit,
};
use sqlx::SqlitePool;
use sqlx::sqlite::SqlitePoolOptions;
use telemetry::TelemetryFairing;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Anyhow(anyhow::Error),
    #[error("{0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("Application error: {0}")]
    App(#[from] AppError),
    #[error("Rocket error: {0}")]
    Rocket(Box<rocket::Error>),
}

impl From<anyhow::Error> for Error {
    fn from(value: anyhow::Error) -> Self {
        Error::Anyhow(value)
    }
}

impl From<rocket::Error> for Error {
    fn from(value: rocket::Error) -> Self {
        Error::Rocket(Box::new(value))
    }
}

#[rocket::main]
async fn main() -> Result<(), Error> {
    env::load_environment()?;
    let config = env::AppConfig::from_env()?;
    telemetry::init_tracing(&config);

    info!(database_url = %config.database_url, "Connecting to database");
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    database::apply_schema(&pool).await?;

    let _rocket = init_rocket(pool).launch().await?;

    telemetry::shutdown_telemetry();
    Ok(())
}

pub fn init_rocket(pool: SqlitePool) -> Rocket<Build> {
    info!("Starting research records portal");

    rocket::build()
        .manage(pool)
        .mount(
            "/",
            routes![
                index,
                landing,
                landing_submit,
                login_page,
                login_submit,
                create_user_page,
                create_user_submit,
                admin_page,
                admin_submit,
                user_page,
                user_submit,
                health,
            ],
        )
        .attach(Template::fairing())
        .attach(TelemetryFairing)
}
