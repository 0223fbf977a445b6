use axum::{Json, extract::State};
use serde::Serialize;

use girder_core::identity::Identity;
use girder_domain::legacy::LegacyRole;
use girder_domain::permission::PermissionMatrix;

use crate::error::IdentityServiceError;
use crate::state::AppState;
use crate::usecase::resolve::CurrentUserUseCase;

// ── GET /auth/me ─────────────────────────────────────────────────────────────

/// The caller's account plus the effective permission matrix the frontend
/// gates on. Always resolved fresh from storage, never cached.
#[derive(Serialize)]
pub struct CurrentUserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub legacy_role: LegacyRole,
    pub role_id: Option<String>,
    pub role_name: Option<String>,
    pub permissions: PermissionMatrix,
    pub is_admin: bool,
    #[serde(serialize_with = "girder_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_me(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<CurrentUserResponse>, IdentityServiceError> {
    let usecase = CurrentUserUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let current = usecase.execute(identity.user_id).await?;
    Ok(Json(CurrentUserResponse {
        id: current.user.id.to_string(),
        name: current.user.name,
        email: current.user.email,
        legacy_role: current.user.legacy_role,
        role_id: current.user.assigned_role_id.map(|id| id.to_string()),
        role_name: current.role_name,
        permissions: current.permissions,
        is_admin: current.is_admin,
        created_at: current.user.created_at,
    }))
}
