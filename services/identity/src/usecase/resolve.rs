use uuid::Uuid;

use girder_domain::module::{Action, Module};

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::domain::types::{CurrentUser, Role};
use crate::error::IdentityServiceError;

async fn load_assigned_role<R: RoleRepository>(
    roles: &R,
    role_id: Option<Uuid>,
) -> Result<Option<Role>, IdentityServiceError> {
    match role_id {
        // A dangling reference resolves to no role, which the precedence
        // rule turns into the legacy fallback — never an error on this path.
        Some(id) => roles.find_by_id(id).await,
        None => Ok(None),
    }
}

// ── CurrentUserWithPermissions ───────────────────────────────────────────────

pub struct CurrentUserUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> CurrentUserUseCase<U, R> {
    /// The session-refresh query: account plus freshly resolved matrix.
    pub async fn execute(&self, user_id: Uuid) -> Result<CurrentUser, IdentityServiceError> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::UserNotFound)?;
        let assigned = load_assigned_role(&self.roles, user.assigned_role_id).await?;
        Ok(CurrentUser::resolve(user, assigned.as_ref()))
    }
}

// ── Authorize (the gateway) ──────────────────────────────────────────────────

/// The single enforcement point for protected operations. Resolves the
/// caller's matrix from storage on every call — an in-flight session sees
/// a role edit or binding change on its very next request.
pub struct AuthorizeUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> AuthorizeUseCase<U, R> {
    async fn resolve(&self, user_id: Uuid) -> Result<CurrentUser, IdentityServiceError> {
        // Fail closed: an unknown caller id denies, it does not 404 — this
        // path sits in front of every protected action.
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(IdentityServiceError::Forbidden)?;
        let assigned = load_assigned_role(&self.roles, user.assigned_role_id).await?;
        Ok(CurrentUser::resolve(user, assigned.as_ref()))
    }

    /// `can(caller, module, action)` with deny surfaced as `Forbidden`.
    pub async fn execute(
        &self,
        user_id: Uuid,
        module: Module,
        action: Action,
    ) -> Result<CurrentUser, IdentityServiceError> {
        let current = self.resolve(user_id).await?;
        if !current.permissions.allows(module, action) {
            return Err(IdentityServiceError::Forbidden);
        }
        Ok(current)
    }

    /// Gate for the role-administration surface.
    pub async fn require_admin(
        &self,
        user_id: Uuid,
    ) -> Result<CurrentUser, IdentityServiceError> {
        let current = self.resolve(user_id).await?;
        if !current.is_admin {
            return Err(IdentityServiceError::Forbidden);
        }
        Ok(current)
    }
}
