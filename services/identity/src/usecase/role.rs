use chrono::Utc;
use uuid::Uuid;

use girder_domain::permission::PermissionMatrix;

use crate::domain::repository::RoleRepository;
use crate::domain::types::{Role, system_role_seeds};
use crate::error::IdentityServiceError;

// ── CreateRole ───────────────────────────────────────────────────────────────

pub struct CreateRoleInput {
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionMatrix,
}

pub struct CreateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> CreateRoleUseCase<R> {
    pub async fn execute(&self, input: CreateRoleInput) -> Result<Role, IdentityServiceError> {
        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(IdentityServiceError::InvalidRoleName);
        }
        if self.repo.find_by_name(&name).await?.is_some() {
            return Err(IdentityServiceError::RoleNameTaken);
        }
        let now = Utc::now();
        let role = Role {
            id: Uuid::now_v7(),
            name,
            description: input.description,
            permissions: input.permissions,
            is_system_role: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&role).await?;
        Ok(role)
    }
}

// ── GetRole / ListRoles ──────────────────────────────────────────────────────

pub struct GetRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> GetRoleUseCase<R> {
    pub async fn execute(&self, role_id: Uuid) -> Result<Role, IdentityServiceError> {
        self.repo
            .find_by_id(role_id)
            .await?
            .ok_or(IdentityServiceError::RoleNotFound)
    }
}

pub struct ListRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> ListRolesUseCase<R> {
    pub async fn execute(&self, include_inactive: bool) -> Result<Vec<Role>, IdentityServiceError> {
        self.repo.list(include_inactive).await
    }
}

// ── UpdateRole ───────────────────────────────────────────────────────────────

/// Full replace: name, description, matrix, and active flag together.
/// There is deliberately no partial-merge path for the matrix.
pub struct UpdateRoleInput {
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionMatrix,
    pub is_active: bool,
}

pub struct UpdateRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> UpdateRoleUseCase<R> {
    pub async fn execute(
        &self,
        role_id: Uuid,
        input: UpdateRoleInput,
    ) -> Result<Role, IdentityServiceError> {
        let existing = self
            .repo
            .find_by_id(role_id)
            .await?
            .ok_or(IdentityServiceError::RoleNotFound)?;

        let name = input.name.trim().to_owned();
        if name.is_empty() {
            return Err(IdentityServiceError::InvalidRoleName);
        }
        if let Some(clash) = self.repo.find_by_name(&name).await? {
            if clash.id != role_id {
                return Err(IdentityServiceError::RoleNameTaken);
            }
        }
        // System roles stay available: they can be edited but never switched off.
        if existing.is_system_role && !input.is_active {
            return Err(IdentityServiceError::SystemRoleProtected);
        }

        let role = Role {
            id: existing.id,
            name,
            description: input.description,
            permissions: input.permissions,
            is_system_role: existing.is_system_role,
            is_active: input.is_active,
            created_at: existing.created_at,
            updated_at: Utc::now(),
        };
        self.repo.update(&role).await?;
        Ok(role)
    }
}

// ── DeleteRole ───────────────────────────────────────────────────────────────

pub struct DeleteRoleUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> DeleteRoleUseCase<R> {
    /// Returns how many users were reverted to their legacy role by the
    /// delete (bindings are cleared in the same transaction as the delete).
    pub async fn execute(&self, role_id: Uuid) -> Result<u64, IdentityServiceError> {
        let role = self
            .repo
            .find_by_id(role_id)
            .await?
            .ok_or(IdentityServiceError::RoleNotFound)?;
        if role.is_system_role {
            return Err(IdentityServiceError::SystemRoleProtected);
        }
        self.repo.delete_and_unbind(role_id).await
    }
}

// ── InitializeSystemRoles ────────────────────────────────────────────────────

pub struct InitializeSystemRolesUseCase<R: RoleRepository> {
    pub repo: R,
}

impl<R: RoleRepository> InitializeSystemRolesUseCase<R> {
    /// Idempotent by name: seeds missing presets, never touches an existing
    /// role — admin edits under a seeded name survive re-runs.
    pub async fn execute(&self) -> Result<u64, IdentityServiceError> {
        let mut created = 0;
        for seed in system_role_seeds() {
            if self.repo.find_by_name(seed.name).await?.is_some() {
                continue;
            }
            let now = Utc::now();
            let role = Role {
                id: Uuid::now_v7(),
                name: seed.name.to_owned(),
                description: Some(seed.description.to_owned()),
                permissions: seed.permissions,
                is_system_role: seed.is_system_role,
                is_active: true,
                created_at: now,
                updated_at: now,
            };
            self.repo.create(&role).await?;
            created += 1;
        }
        Ok(created)
    }
}
