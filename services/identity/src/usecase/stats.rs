use std::collections::HashMap;

use uuid::Uuid;

use crate::domain::repository::{RoleRepository, UserRepository};
use crate::error::IdentityServiceError;

/// Role/user counts for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleStats {
    pub total_roles: u64,
    pub active_roles: u64,
    pub total_users: u64,
    pub users_with_assigned_role: u64,
    pub users_with_legacy_only: u64,
    /// Bound-user count per role name, unnamed dangling bindings excluded.
    pub users_per_role: Vec<(String, u64)>,
}

pub struct RoleStatsUseCase<U: UserRepository, R: RoleRepository> {
    pub users: U,
    pub roles: R,
}

impl<U: UserRepository, R: RoleRepository> RoleStatsUseCase<U, R> {
    pub async fn execute(&self) -> Result<RoleStats, IdentityServiceError> {
        let roles = self.roles.list(true).await?;
        let users = self.users.list().await?;

        let total_roles = roles.len() as u64;
        let active_roles = roles.iter().filter(|r| r.is_active).count() as u64;
        let total_users = users.len() as u64;
        let users_with_assigned_role =
            users.iter().filter(|u| u.assigned_role_id.is_some()).count() as u64;

        let mut per_role_id: HashMap<Uuid, u64> = HashMap::new();
        for user in &users {
            if let Some(role_id) = user.assigned_role_id {
                *per_role_id.entry(role_id).or_default() += 1;
            }
        }
        let users_per_role = roles
            .iter()
            .filter_map(|role| {
                per_role_id
                    .get(&role.id)
                    .map(|count| (role.name.clone(), *count))
            })
            .collect();

        Ok(RoleStats {
            total_roles,
            active_roles,
            total_users,
            users_with_assigned_role,
            users_with_legacy_only: total_users - users_with_assigned_role,
            users_per_role,
        })
    }
}
