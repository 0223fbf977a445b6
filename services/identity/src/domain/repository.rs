#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Employee, Role, User};
use crate::error::IdentityServiceError;

/// Repository for registry roles and their permission matrices.
pub trait RoleRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, IdentityServiceError>;

    /// Exact, case-sensitive name match.
    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityServiceError>;

    /// Roles ordered by creation time. Re-queries current state on each call.
    async fn list(&self, include_inactive: bool) -> Result<Vec<Role>, IdentityServiceError>;

    async fn create(&self, role: &Role) -> Result<(), IdentityServiceError>;

    /// Full replace of the role row and its permission rows, one transaction.
    async fn update(&self, role: &Role) -> Result<(), IdentityServiceError>;

    /// Delete the role and clear `assigned_role_id` on every bound user in
    /// the same transaction. Returns how many users reverted to legacy.
    async fn delete_and_unbind(&self, id: Uuid) -> Result<u64, IdentityServiceError>;
}

/// Repository for login accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError>;
    async fn list(&self) -> Result<Vec<User>, IdentityServiceError>;

    /// Insert an account; `password` is hashed by the implementation.
    async fn create(&self, user: &User, password: &str) -> Result<(), IdentityServiceError>;

    /// Set or clear the registry binding. Re-checks role existence inside
    /// the same transaction so a concurrent role delete cannot leave a
    /// dangling binding.
    async fn set_assigned_role(
        &self,
        user_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError>;
}

/// Repository for HR employee records (link state only; HR CRUD is
/// another service's concern).
pub trait EmployeeRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, IdentityServiceError>;

    /// Reverse lookup for the one-account-one-employee invariant.
    async fn find_by_linked_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Employee>, IdentityServiceError>;

    async fn list(&self) -> Result<Vec<Employee>, IdentityServiceError>;

    async fn set_linked_user(
        &self,
        employee_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError>;
}
