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
use crate::usecase::employee::{
    LinkEmployeeUseCase, ListEmployeesUseCase, UnlinkEmployeeUseCase,
};

// ── GET /rbac/employees ──────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct LinkedAccountResponse {
    pub user_id: String,
    pub name: String,
    pub email: String,
    pub legacy_role: LegacyRole,
    pub role_name: Option<String>,
}

#[derive(Serialize)]
pub struct EmployeeRow {
    pub id: String,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub account: Option<LinkedAccountResponse>,
}

pub async fn get_employees(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<Vec<EmployeeRow>>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = ListEmployeesUseCase {
        employees: state.employee_repo(),
        users: state.user_repo(),
        roles: state.role_repo(),
    };
    let rows = usecase.execute().await?;
    Ok(Json(
        rows.into_iter()
            .map(|row| EmployeeRow {
                id: row.employee.id.to_string(),
                employee_code: row.employee.employee_code,
                name: row.employee.name,
                email: row.employee.email,
                department: row.employee.department,
                designation: row.employee.designation,
                account: row.account.map(|a| LinkedAccountResponse {
                    user_id: a.user.id.to_string(),
                    name: a.user.name,
                    email: a.user.email,
                    legacy_role: a.user.legacy_role,
                    role_name: a.role_name,
                }),
            })
            .collect(),
    ))
}

// ── POST /employees/{employee_id}/link-user ──────────────────────────────────

#[derive(Deserialize, Default)]
pub struct LinkUserRequest {
    /// Omitted: provision a fresh account from the employee record.
    pub user_id: Option<Uuid>,
}

#[derive(Serialize)]
pub struct LinkUserResponse {
    pub user_id: String,
}

pub async fn link_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
    Json(body): Json<LinkUserRequest>,
) -> Result<Json<LinkUserResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = LinkEmployeeUseCase {
        employees: state.employee_repo(),
        users: state.user_repo(),
    };
    let user_id = usecase.execute(employee_id, body.user_id).await?;
    Ok(Json(LinkUserResponse {
        user_id: user_id.to_string(),
    }))
}

// ── DELETE /employees/{employee_id}/unlink-user ──────────────────────────────

pub async fn unlink_user(
    identity: Identity,
    State(state): State<AppState>,
    Path(employee_id): Path<Uuid>,
) -> Result<StatusCode, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = UnlinkEmployeeUseCase {
        employees: state.employee_repo(),
    };
    usecase.execute(employee_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
