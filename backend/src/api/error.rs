//! HTTP error payloads and mapping from validation failures.
//!
//! Keep the forms layer free of transport concerns by translating
//! [`FormError`] into Actix responses here.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};
use utoipa::ToSchema;

use crate::domain::ports::CredentialVerifierError;
use crate::forms::FormError;

/// Stable machine-readable error code describing the failure category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[non_exhaustive]
#[serde(rename_all = "snake_case")]
pub enum ApiErrorCode {
    /// The submission was rejected with per-field messages.
    ValidationFailed,
    /// A collaborator needed during validation is temporarily unavailable.
    ServiceUnavailable,
    /// An unexpected error occurred while validating.
    InternalError,
}

/// Standard error envelope returned by HTTP adapters.
///
/// Internal failure messages are logged at construction and never
/// serialized; clients only ever see the canonical internal-error text.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "validation_failed")]
    code: ApiErrorCode,
    #[schema(example = "Submission failed validation")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ApiErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    /// Per-field messages for rejected submissions.
    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }

    fn to_status_code(&self) -> StatusCode {
        match self.code {
            ApiErrorCode::ValidationFailed => StatusCode::UNPROCESSABLE_ENTITY,
            ApiErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ApiErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn service_unavailable() -> Self {
        Self {
            code: ApiErrorCode::ServiceUnavailable,
            message: "A required service is unavailable".to_owned(),
            details: None,
        }
    }

    fn internal() -> Self {
        Self {
            code: ApiErrorCode::InternalError,
            message: "Internal server error".to_owned(),
            details: None,
        }
    }
}

impl From<FormError> for ApiError {
    fn from(error: FormError) -> Self {
        match error {
            FormError::Rejected(errors) => {
                debug!(messages = errors.message_count(), "submission rejected");
                Self {
                    code: ApiErrorCode::ValidationFailed,
                    message: "Submission failed validation".to_owned(),
                    details: Some(errors.to_value()),
                }
            }
            FormError::Directory(err) => {
                error!(error = %err, "administrator directory unavailable");
                Self::service_unavailable()
            }
            FormError::Credentials(err @ CredentialVerifierError::Unavailable { .. }) => {
                error!(error = %err, "credential store unavailable");
                Self::service_unavailable()
            }
            FormError::Credentials(err) => {
                error!(error = %err, "credential lookup failed during validation");
                Self::internal()
            }
            FormError::Internal { message } => {
                error!(%message, "validation failed internally");
                Self::internal()
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.to_status_code()
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use backend::api::ApiResult;
/// use backend::forms::{Form, RegistrationForm, Submission};
///
/// fn register(submission: &Submission) -> ApiResult<HttpResponse> {
///     let registration = RegistrationForm.validate(submission)?;
///     Ok(HttpResponse::Created().json(registration.email()))
/// }
/// ```
pub type ApiResult<T> = Result<T, ApiError>;
