use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::User;
use crate::error::IdentityServiceError;

// ── AssignRole ───────────────────────────────────────────────────────────────

pub struct AssignRoleUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AssignRoleUseCase<U, R> {
    /// Bind a registry role to an account. Inactive roles are rejected
    /// outright rather than bound inert — a binding that silently grants
    /// nothing is an admin trap.
    pub async fn execute(&self, user_id: Uuid, role_id: Uuid) -> Result<(), IdentityServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        let role = self
            .roles
            .find_by_id(role_id)
            .await?
            .ok_or(IdentityServiceError::RoleNotFound)?;
        if !role.is_active {
            return Err(IdentityServiceError::RoleInactive);
        }
        self.users.set_assigned_role(user_id, Some(role_id)).await
    }
}

// ── ClearRole ────────────────────────────────────────────────────────────────

pub struct ClearRoleUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> ClearRoleUseCase<U> {
    /// Sever the registry binding; the very next authorization check reads
    /// the legacy table (nothing is cached anywhere to invalidate).
    pub async fn execute(&self, user_id: Uuid) -> Result<(), IdentityServiceError> {
        self.users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        self.users.set_assigned_role(user_id, None).await
    }
}

// ── ListUsers ────────────────────────────────────────────────────────────────

/// Account row for the admin role-management screen.
#[derive(Debug, Clone)]
pub struct UserWithRole {
    pub user: User,
    pub role_name: Option<String>,
}

pub struct ListUsersUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> ListUsersUseCase<U, R> {
    pub async fn execute(&self) -> Result<Vec<UserWithRole>, IdentityServiceError> {
        let roles = self.roles.list(true).await?;
        let names: HashMap<Uuid, String> =
            roles.into_iter().map(|r| (r.id, r.name)).collect();
        let users = self.users.list().await?;
        Ok(users
            .into_iter()
            .map(|user| UserWithRole {
                role_name: user.assigned_role_id.and_then(|id| names.get(&id).cloned()),
                user,
            })
            .collect())
    }
}
