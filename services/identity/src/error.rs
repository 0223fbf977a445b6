use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Identity service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum IdentityServiceError {
    #[error("role not found")]
    RoleNotFound,
    #[error("user not found")]
    UserNotFound,
    #[error("employee not found")]
    EmployeeNotFound,
    #[error("role name must not be blank")]
    InvalidRoleName,
    #[error("role with this name already exists")]
    RoleNameTaken,
    #[error("system roles cannot be deleted or deactivated")]
    SystemRoleProtected,
    #[error("role is inactive")]
    RoleInactive,
    #[error("user account is already linked to another employee")]
    UserAlreadyLinked,
    #[error("an account with this email already exists")]
    EmailAlreadyRegistered,
    /// The gateway's deny outcome. Opaque on purpose: it never says whether
    /// the module is unmodeled or the action disallowed.
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl IdentityServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::RoleNotFound => "ROLE_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::EmployeeNotFound => "EMPLOYEE_NOT_FOUND",
            Self::InvalidRoleName => "INVALID_ROLE_NAME",
            Self::RoleNameTaken => "ROLE_NAME_TAKEN",
            Self::SystemRoleProtected => "SYSTEM_ROLE_PROTECTED",
            Self::RoleInactive => "ROLE_INACTIVE",
            Self::UserAlreadyLinked => "USER_ALREADY_LINKED",
            Self::EmailAlreadyRegistered => "EMAIL_ALREADY_REGISTERED",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for IdentityServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::RoleNotFound | Self::UserNotFound | Self::EmployeeNotFound => {
                StatusCode::NOT_FOUND
            }
            Self::InvalidRoleName | Self::RoleInactive => StatusCode::BAD_REQUEST,
            Self::RoleNameTaken
            | Self::SystemRoleProtected
            | Self::UserAlreadyLinked
            | Self::EmailAlreadyRegistered => StatusCode::CONFLICT,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx (including the frequent FORBIDDEN) are expected outcomes, not faults.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
