use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use girder_core::identity::Identity;
use girder_domain::module::Module;
use girder_domain::permission::{ActionSet, PermissionMatrix};

use crate::domain::types::Role;
use crate::error::IdentityServiceError;
use crate::handlers::require_admin;
use crate::state::AppState;
use crate::usecase::role::{
    CreateRoleInput, CreateRoleUseCase, DeleteRoleUseCase, GetRoleUseCase,
    InitializeSystemRolesUseCase, ListRolesUseCase, UpdateRoleInput, UpdateRoleUseCase,
};

// ── Wire types ───────────────────────────────────────────────────────────────

/// One module's grants on the wire. Ungranted modules are simply absent,
/// so a role body only carries the modules it actually opens.
#[derive(Serialize, Deserialize)]
pub struct ModulePermission {
    pub module: Module,
    #[serde(default)]
    pub view: bool,
    #[serde(default)]
    pub create: bool,
    #[serde(default)]
    pub edit: bool,
    #[serde(default)]
    pub delete: bool,
}

#[derive(Serialize)]
pub struct RoleResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub permissions: Vec<ModulePermission>,
    pub is_system_role: bool,
    pub is_active: bool,
    #[serde(serialize_with = "girder_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "girder_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Role> for RoleResponse {
    fn from(role: Role) -> Self {
        Self {
            id: role.id.to_string(),
            name: role.name,
            description: role.description,
            permissions: role
                .permissions
                .granted_modules()
                .map(|(module, actions)| ModulePermission {
                    module,
                    view: actions.view,
                    create: actions.create,
                    edit: actions.edit,
                    delete: actions.delete,
                })
                .collect(),
            is_system_role: role.is_system_role,
            is_active: role.is_active,
            created_at: role.created_at,
            updated_at: role.updated_at,
        }
    }
}

fn matrix_from_wire(permissions: Vec<ModulePermission>) -> PermissionMatrix {
    permissions
        .into_iter()
        .map(|p| (p.module, ActionSet::new(p.view, p.create, p.edit, p.delete)))
        .collect()
}

// ── POST /rbac/roles ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<ModulePermission>,
}

pub async fn create_role(
    identity: Identity,
    State(state): State<AppState>,
    Json(body): Json<CreateRoleRequest>,
) -> Result<(StatusCode, Json<RoleResponse>), IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = CreateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(CreateRoleInput {
            name: body.name,
            description: body.description,
            permissions: matrix_from_wire(body.permissions),
        })
        .await?;
    Ok((StatusCode::CREATED, Json(role.into())))
}

// ── GET /rbac/roles ──────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
pub struct ListRolesQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

pub async fn get_roles(
    identity: Identity,
    State(state): State<AppState>,
    Query(query): Query<ListRolesQuery>,
) -> Result<Json<Vec<RoleResponse>>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = ListRolesUseCase {
        repo: state.role_repo(),
    };
    let roles = usecase.execute(query.include_inactive).await?;
    Ok(Json(roles.into_iter().map(RoleResponse::from).collect()))
}

// ── GET /rbac/roles/{role_id} ────────────────────────────────────────────────

pub async fn get_role(
    identity: Identity,
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<RoleResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = GetRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase.execute(role_id).await?;
    Ok(Json(role.into()))
}

// ── PUT /rbac/roles/{role_id} ────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateRoleRequest {
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub permissions: Vec<ModulePermission>,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}

pub async fn update_role(
    identity: Identity,
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
    Json(body): Json<UpdateRoleRequest>,
) -> Result<Json<RoleResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = UpdateRoleUseCase {
        repo: state.role_repo(),
    };
    let role = usecase
        .execute(
            role_id,
            UpdateRoleInput {
                name: body.name,
                description: body.description,
                permissions: matrix_from_wire(body.permissions),
                is_active: body.is_active,
            },
        )
        .await?;
    Ok(Json(role.into()))
}

// ── DELETE /rbac/roles/{role_id} ─────────────────────────────────────────────

#[derive(Serialize)]
pub struct DeleteRoleResponse {
    /// Accounts that fell back to their legacy role when the binding was
    /// cleared.
    pub reverted_users: u64,
}

pub async fn delete_role(
    identity: Identity,
    State(state): State<AppState>,
    Path(role_id): Path<Uuid>,
) -> Result<Json<DeleteRoleResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = DeleteRoleUseCase {
        repo: state.role_repo(),
    };
    let reverted_users = usecase.execute(role_id).await?;
    Ok(Json(DeleteRoleResponse { reverted_users }))
}

// ── POST /rbac/init ──────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InitRolesResponse {
    pub created: u64,
}

pub async fn init_roles(
    identity: Identity,
    State(state): State<AppState>,
) -> Result<Json<InitRolesResponse>, IdentityServiceError> {
    require_admin(&state, &identity).await?;
    let usecase = InitializeSystemRolesUseCase {
        repo: state.role_repo(),
    };
    let created = usecase.execute().await?;
    Ok(Json(InitRolesResponse { created }))
}
