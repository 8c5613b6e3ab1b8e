use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use serde::Serialize;
use validator::ValidationErrors;

pub const MISSING_FIELDS_MESSAGE: &str = "All fields are required";
pub const INVALID_EMAIL_MESSAGE: &str = "Please provide a valid email address";
const GENERIC_SERVER_MESSAGE: &str = "Internal server error. Please try again later.";

#[derive(Debug, Display)]
pub enum AppError {
    #[display("validation error: {message}")]
    ValidationError {
        message: String,
        errors: Vec<FieldError>,
    },

    #[display("Not found: {_0}")]
    NotFound(String),

    #[display("Dependency failure: {_0}")]
    DependencyError(String),

    #[display("Internal server error: {_0}")]
    InternalError(String),
}

impl std::error::Error for AppError {}

impl AppError {
    /// The message shown to clients. Server-side failures never expose their detail.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError { message, .. } => message.clone(),
            AppError::NotFound(msg) => msg.clone(),
            AppError::DependencyError(_) | AppError::InternalError(_) => {
                GENERIC_SERVER_MESSAGE.to_string()
            }
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            AppError::ValidationError { message, errors } => {
                serde_json::json!({
                    "success": false,
                    "message": message,
                    "errors": errors
                })
            }
            AppError::DependencyError(_) | AppError::InternalError(_) => {
                tracing::error!(error = %self, "Request failed");
                serde_json::json!({
                    "success": false,
                    "message": self.public_message()
                })
            }
            AppError::NotFound(_) => {
                serde_json::json!({
                    "success": false,
                    "message": self.public_message()
                })
            }
        };
        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(body)
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DependencyError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut missing = false;

        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(|e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| "Invalid value".to_string()),
                    code: e.code.to_string(),
                })
            })
            .collect();

        if field_errors.iter().any(|e| e.code == "length") {
            missing = true;
            // An empty email also fails the pattern; report only the absence
            field_errors.retain(|e| e.code == "length");
        }
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        let message = if missing {
            MISSING_FIELDS_MESSAGE
        } else {
            INVALID_EMAIL_MESSAGE
        };

        AppError::ValidationError {
            message: message.to_string(),
            errors: field_errors,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            _ => AppError::DependencyError(format!("Database error: {}", err))
        }
    }
}

/// Failures of the outbound mail relay. These never reach a client.
#[derive(Debug, Display)]
pub enum MailError {
    #[display("Mail relay is not configured")]
    NotConfigured,

    #[display("Mail relay request failed: {_0}")]
    Request(reqwest::Error),

    #[display("Mail relay rejected the message with status {_0}")]
    Rejected(u16),

    #[display("Invalid mail relay settings: {_0}")]
    InvalidSettings(String),
}

impl std::error::Error for MailError {}

impl From<reqwest::Error> for MailError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => MailError::Rejected(status.as_u16()),
            None => MailError::Request(err),
        }
    }
}

/// Failures while opening or verifying the persistence service at startup.
#[derive(Debug, Display)]
pub enum StoreError {
    #[display("Database connection failed: {_0}")]
    Connection(sqlx::Error),

    #[display("Configured table `{_0}` does not exist")]
    MissingTable(String),
}

impl std::error::Error for StoreError {}

#[derive(Debug, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
    #[serde(skip)]
    pub code: String,
}
