use opentelemetry_semantic_conventions::{attribute::OTEL_STATUS_CODE, trace::ERROR_TYPE};
use rocket::http::Status;
use rocket::response::status;
use thiserror::Error;
use tracing::{Span, error, warn};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid department: {0}")]
    InvalidDepartment(String),

    #[error("User not found: {0}")]
    UserNotFound(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Username already exists: {0}")]
    DuplicateUser(String),

    #[error("Query failed: {0}")]
    QueryFailed(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn log_and_record(&self, ctx: &str) {
        let current_span = Span::current();
        let is_valid_span = !current_span.is_none();

        let message = self.to_string();
        let error_kind = match self {
            AppError::InvalidInput(msg) => {
                warn!(message = %msg, context = %ctx, "Invalid input");
                "invalid_input"
            }
            AppError::InvalidDepartment(name) => {
                warn!(department = %name, context = %ctx, "Invalid department");
                "invalid_department"
            }
            AppError::UserNotFound(username) => {
                warn!(username = %username, context = %ctx, "User not found");
                "user_not_found"
            }
            AppError::InvalidCredentials => {
                warn!(context = %ctx, "Invalid credentials");
                "invalid_credentials"
            }
            AppError::DuplicateUser(username) => {
                warn!(username = %username, context = %ctx, "Duplicate user");
                "duplicate_user"
            }
            AppError::QueryFailed(err) => {
                error!(error = %message, context = %ctx, db_error = %err, "Query failed");
                "query_failed"
            }
            AppError::Internal(msg) => {
                error!(message = %msg, context = %ctx, "Internal server error");
                "internal_error"
            }
        };

        if is_valid_span {
            current_span.record("error", tracing::field::display(true));
            current_span.record(ERROR_TYPE, tracing::field::display(error_kind));
            current_span.record("error.message", tracing::field::display(&message));

            if self.is_server_error() {
                current_span.record(OTEL_STATUS_CODE, tracing::field::display("ERROR"));
            }
        }
    }

    pub fn is_server_error(&self) -> bool {
        matches!(self, AppError::QueryFailed(_) | AppError::Internal(_))
    }

    pub fn status_code(&self) -> Status {
        match self {
            AppError::InvalidInput(_) => Status::BadRequest,
            AppError::InvalidDepartment(_) => Status::BadRequest,
            AppError::UserNotFound(_) => Status::Unauthorized,
            AppError::InvalidCredentials => Status::Unauthorized,
            AppError::DuplicateUser(_) => Status::Conflict,
            AppError::QueryFailed(_) => Status::InternalServerError,
            AppError::Internal(_) => Status::InternalServerError,
        }
    }

    pub fn to_status_with_log(&self, context: &str) -> Status {
        self.log_and_record(context);
        self.status_code()
    }
}

impl<'r> rocket::response::Responder<'r, 'static> for AppError {
    fn respond_to(self, req: &'r rocket::Request<'_>) -> rocket::response::Result<'static> {
        let status = self.to_status_with_log(&format!("Request to {} {}", req.method(), req.uri()));
        status::Custom(status, self.to_string()).respond_to(req)
    }
}

impl From<AppError> for Status {
    fn from(err: AppError) -> Self {
        err.to_status_with_log("Error conversion into Status")
    }
}
