use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{EmployeeRepository, RoleRepository, UserRepository};
use crate::domain::types::{DEFAULT_PASSWORD, Employee, PROVISIONED_LEGACY_ROLE, User};
use crate::error::IdentityServiceError;

// ── LinkEmployee ─────────────────────────────────────────────────────────────

pub struct LinkEmployeeUseCase<E: EmployeeRepository, U: UserRepository> {
    pub employees: E,
    pub users: U,
}

impl<E: EmployeeRepository, U: UserRepository> LinkEmployeeUseCase<E, U> {
    /// Attach an account to an employee, or provision one when `user_id` is
    /// absent. Returns the linked account id.
    pub async fn execute(
        &self,
        employee_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<Uuid, IdentityServiceError> {
        let employee = self
            .employees
            .find_by_id(employee_id)
            .await?
            .ok_or(IdentityServiceError::EmployeeNotFound)?;

        let user_id = match user_id {
            Some(id) => {
                self.users
                    .find_by_id(id)
                    .await?
                    .ok_or(IdentityServiceError::UserNotFound)?;
                // One account maps to one employee, in both directions.
                if let Some(other) = self.employees.find_by_linked_user(id).await? {
                    if other.id != employee_id {
                        return Err(IdentityServiceError::UserAlreadyLinked);
                    }
                }
                id
            }
            None => {
                if self.users.find_by_email(&employee.email).await?.is_some() {
                    // An existing account must be linked explicitly, not
                    // shadowed by a fresh one under the same email.
                    return Err(IdentityServiceError::EmailAlreadyRegistered);
                }
                let user = User {
                    id: Uuid::now_v7(),
                    name: employee.name.clone(),
                    email: employee.email.clone(),
                    legacy_role: PROVISIONED_LEGACY_ROLE,
                    assigned_role_id: None,
                    created_at: Utc::now(),
                };
                self.users.create(&user, DEFAULT_PASSWORD).await?;
                user.id
            }
        };

        self.employees
            .set_linked_user(employee_id, Some(user_id))
            .await?;
        Ok(user_id)
    }
}

// ── UnlinkEmployee ───────────────────────────────────────────────────────────

pub struct UnlinkEmployeeUseCase<E: EmployeeRepository> {
    pub employees: E,
}

impl<E: EmployeeRepository> UnlinkEmployeeUseCase<E> {
    /// Severs the link only; the account survives. Unlinking an unlinked
    /// employee is a no-op.
    pub async fn execute(&self, employee_id: Uuid) -> Result<(), IdentityServiceError> {
        self.employees
            .find_by_id(employee_id)
            .await?
            .ok_or(IdentityServiceError::EmployeeNotFound)?;
        self.employees.set_linked_user(employee_id, None).await
    }
}

// ── ListEmployees ────────────────────────────────────────────────────────────

/// Linked-account summary for the RBAC management screen.
#[derive(Debug, Clone)]
pub struct LinkedAccount {
    pub user: User,
    pub role_name: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EmployeeWithAccount {
    pub employee: Employee,
    pub account: Option<LinkedAccount>,
}

pub struct ListEmployeesUseCase<E: EmployeeRepository, U: UserRepository, R: RoleRepository> {
    pub employees: E,
    pub users: U,
    pub roles: R,
}

impl<E: EmployeeRepository, U: UserRepository, R: RoleRepository>
    ListEmployeesUseCase<E, U, R>
{
    pub async fn execute(&self) -> Result<Vec<EmployeeWithAccount>, IdentityServiceError> {
        let role_names: HashMap<Uuid, String> = self
            .roles
            .list(true)
            .await?
            .into_iter()
            .map(|r| (r.id, r.name))
            .collect();
        let accounts: HashMap<Uuid, User> = self
            .users
            .list()
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(self
            .employees
            .list()
            .await?
            .into_iter()
            .map(|employee| {
                let account = employee
                    .linked_user_id
                    .and_then(|id| accounts.get(&id))
                    .map(|user| LinkedAccount {
                        role_name: user
                            .assigned_role_id
                            .and_then(|id| role_names.get(&id).cloned()),
                        user: user.clone(),
                    });
                EmployeeWithAccount { employee, account }
            })
            .collect())
    }
}
