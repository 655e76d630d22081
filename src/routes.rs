use rocket::State;
use rocket::{FromForm, Responder};
use rocket::form::Form;
use rocket::response::Redirect;
use rocket_dyn_templates::{Template, context};
use serde::Serialize;
use sqlx::{Pool, Sqlite};
use tracing::{info, warn};

use crate::admin::{department_counts, list_rows};
use crate::auth;
use crate::catalog::Category;
use crate::department::Department;
use crate::error::AppError;
use crate::submission::{SubmissionForm, submit_records};

#[derive(Responder)]
pub enum Page {
    Rendered(Template),
    Redirect(Redirect),
}

#[derive(Serialize)]
struct FieldView {
    label: &'static str,
    name: String,
}

#[derive(Serialize)]
struct CategoryView {
    name: &'static str,
    table: &'static str,
    fields: Vec<FieldView>,
}

fn category_views() -> Vec<CategoryView> {
    Category::ALL
        .into_iter()
        .map(|category| CategoryView {
            name: category.form_prefix(),
            table: category.table(),
            fields: category
                .fields()
                .iter()
                .map(|field| FieldView {
                    label: field.label,
                    name: category.form_field(field.label),
                })
                .collect(),
        })
        .collect()
}

fn department_names() -> Vec<&'static str> {
    Department::ALL.iter().map(|d| d.as_str()).collect()
}

#[get("/")]
pub fn index() -> Redirect {
    Redirect::found(uri!(landing))
}

#[get("/Templates")]
pub fn landing() -> Template {
    Template::render(
        "landing_page",
        context! {
            title: "Research Records Portal",
        },
    )
}

#[post("/Templates")]
pub fn landing_submit() -> Redirect {
    Redirect::found(uri!(login_page))
}

fn login_template(message: Option<&str>) -> Template {
    Template::render(
        "login",
        context! {
            title: "Login - Research Records Portal",
            message: message,
        },
    )
}

#[get("/login")]
pub fn login_page() -> Template {
    login_template(None)
}

#[derive(FromForm)]
pub struct LoginForm {
    username: Option<String>,
    password: Option<String>,
}

#[post("/login", data = "<form>")]
pub async fn login_submit(
    form: Form<LoginForm>,
    db: &State<Pool<Sqlite>>,
) -> Result<Template, AppError> {
    let username = form.username.as_deref().unwrap_or_default();
    let password = form.password.as_deref().unwrap_or_default();
    info!("Login attempt: {}", username);

    match auth::login(db, username, password).await {
        Ok(user) => Ok(Template::render(
            "home",
            context! {
                title: "Research Records Portal",
                user: user,
            },
        )),
        Err(err @ (AppError::InvalidInput(_) | AppError::UserNotFound(_))) => {
            err.log_and_record("POST /login");
            Ok(login_template(Some("Invalid username")))
        }
        Err(err @ AppError::InvalidCredentials) => {
            err.log_and_record("POST /login");
            Ok(login_template(Some("Invalid password")))
        }
        Err(err) => Err(err),
    }
}

fn create_user_template(message: Option<&str>) -> Template {
    Template::render(
        "create_user",
        context! {
            title: "Create Account - Research Records Portal",
            message: message,
        },
    )
}

#[get("/create_user")]
pub fn create_user_page() -> Template {
    create_user_template(None)
}

#[derive(FromForm)]
pub struct CreateUserForm {
    new_username: Option<String>,
    new_password: Option<String>,
}

#[post("/create_user", data = "<form>")]
pub async fn create_user_submit(
    form: Form<CreateUserForm>,
    db: &State<Pool<Sqlite>>,
) -> Result<Page, AppError> {
    let username = form.new_username.as_deref().unwrap_or_default();
    let password = form.new_password.as_deref().unwrap_or_default();

    match auth::register(db, username, password).await {
        Ok(_) => Ok(Page::Redirect(Redirect::found(uri!(login_page)))),
        Err(err @ AppError::InvalidInput(_)) => {
            err.log_and_record("POST /create_user");
            Ok(Page::Rendered(create_user_template(Some("Invalid entry"))))
        }
        Err(err @ AppError::DuplicateUser(_)) => {
            err.log_and_record("POST /create_user");
            Ok(Page::Rendered(create_user_template(Some(
                "Username already exists",
            ))))
        }
        Err(err) => Err(err),
    }
}

#[get("/admin")]
pub fn admin_page() -> Template {
    Template::render(
        "admin",
        context! {
            title: "Admin - Research Records Portal",
            departments: department_names(),
            categories: category_views(),
        },
    )
}

#[derive(FromForm)]
pub struct AdminForm {
    department: Option<String>,
    info: Option<String>,
    filter: Option<String>,
    #[field(name = "text-input")]
    text_input: Option<String>,
}

#[post("/admin", data = "<form>")]
pub async fn admin_submit(
    form: Form<AdminForm>,
    db: &State<Pool<Sqlite>>,
) -> Result<Template, AppError> {
    let department = form.department.as_deref().unwrap_or_default();
    let info = form.info.as_deref().unwrap_or_default();

    if !department.is_empty() {
        let counts = department_counts(db, department).await?;

        return Ok(Template::render(
            "admin",
            context! {
                title: "Admin - Research Records Portal",
                departments: department_names(),
                categories: category_views(),
                department: counts.department,
                counts: counts.values().join(","),
                table_counts: &counts.counts,
            },
        ));
    }

    if !info.is_empty() {
        let listing = list_rows(
            db,
            info,
            form.filter.as_deref().unwrap_or_default(),
            form.text_input.as_deref().unwrap_or_default(),
        )
        .await?;

        let data: Vec<Vec<String>> = listing
            .rows
            .iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect();

        return Ok(Template::render(
            "admin",
            context! {
                title: "Admin - Research Records Portal",
                departments: department_names(),
                categories: category_views(),
                selected_table: listing.table,
                columns: &listing.columns,
                data: data,
            },
        ));
    }

    Ok(admin_page())
}

fn user_template(message: &str, failed: Vec<String>) -> Template {
    Template::render(
        "user",
        context! {
            title: "Submit Records - Research Records Portal",
            message: message,
            failed: failed,
            departments: department_names(),
            categories: category_views(),
        },
    )
}

#[get("/user")]
pub fn user_page() -> Template {
    user_template("Input not found", Vec::new())
}

#[post("/user", data = "<form>")]
pub async fn user_submit(
    form: Form<SubmissionForm>,
    db: &State<Pool<Sqlite>>,
) -> Result<Template, AppError> {
    match submit_records(db, &form).await {
        Ok(report) => {
            if !report.is_complete() {
                warn!(
                    inserted = report.inserted.len(),
                    failed = report.failed.len(),
                    "Submission partially failed"
                );
            }

            let failed = report
                .failed
                .iter()
                .map(|failure| failure.category.to_string())
                .collect();

            Ok(user_template("Data submitted successfully!", failed))
        }
        Err(err @ AppError::InvalidDepartment(_)) => {
            err.log_and_record("POST /user");
            Ok(user_template("Invalid department", Vec::new()))
        }
        Err(err) => Err(err),
    }
}

#[get("/health")]
pub fn health() -> &'static str {
    "OK"
}
