use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use girder_core::identity::Identity;
use girder_domain::legacy::LegacyRole;

use crate::error::IdentityServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::assignment::{AssignRoleUseCase, ClearRoleUseCase, ListUsersUseCase};
use crate::usecase::stats::RoleStatsUseCase;

// ── GET /rbac/users ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserRow {
    pub id: String,
    pub name: String,
    pub email: String,
    pub legacy_role: LegacyRole,
    pub role_id: Option<String>,
    pub role_name: Option<String>,
    #[serde(serialize_with = "girder_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

pub async fn get_users(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<UserRow>>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = ListUsersUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let users = usecase.execute().await?;
    Ok(Json(
        users
            .into_iter()
            .map(|row| UserRow {
                id: row.user.id.to_string(),
                name: row.user.name,
                email: row.user.email,
                legacy_role: row.user.legacy_role,
                role_id: row.user.assigned_role_id.map(|id| id.to_string()),
                role_name: row.role_name,
                created_at: row.user.created_at,
            })
            .collect(),
    ))
}

// ── POST /rbac/assign-role ───────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct AssignRoleRequest {
    pub user_id: Uuid,
    pub role_id: Uuid,
}

pub async fn assign_role(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<AssignRoleRequest>,
) -> Result<StatusCode, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = AssignRoleUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    usecase.execute(body.user_id, body.role_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /rbac/users/{user_id}/role ────────────────────────────────────────

pub async fn clear_role(
    identity: Identity,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = ClearRoleUseCase {
        users: state.user_repo(),
    };
    usecase.execute(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /rbac/stats ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct RoleStatsResponse {
    pub total_roles: u64,
    pub active_roles: u64,
    pub total_users: u64,
    pub users_with_assigned_role: u64,
    pub users_with_legacy_only: u64,
    pub users_per_role: Vec<RoleUserCount>,
}

#[derive(Serialize)]
pub struct RoleUserCount {
    pub role_name: String,
    pub users: u64,
}

pub async fn get_stats(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<RoleStatsResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = RoleStatsUseCase {
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let stats = usecase.execute().await?;
    Ok(Json(RoleStatsResponse {
        total_roles: stats.total_roles,
        active_roles: stats.active_roles,
        total_users: stats.total_users,
        users_with_assigned_role: stats.users_with_assigned_role,
        users_with_legacy_only: stats.users_with_legacy_only,
        users_per_role: stats
            .users_per_role
            .into_iter()
            .map(|(role_name, users)| RoleUserCount { role_name, users })
            .collect(),
    }))
}
