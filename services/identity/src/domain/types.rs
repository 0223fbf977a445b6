use chrono::{DateTime, Utc};
use uuid::Uuid;

use girder_domain::legacy::LegacyRole;
use girder_domain::module::Module;
use girder_domain::permission::{ActionSet, PermissionMatrix};
use girder_domain::resolve::{AssignedGrant, is_admin, resolve_permissions};

/// Registry role with its full permission matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub permissions: PermissionMatrix,
    pub is_system_role: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Role {
    /// View of this role for the pure resolver.
    pub fn grant(&self) -> AssignedGrant<'_> {
        AssignedGrant {
            matrix: &self.permissions,
            is_active: self.is_active,
        }
    }
}

/// Login account. The legacy role is mandatory; the registry binding is not.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub legacy_role: LegacyRole,
    pub assigned_role_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// HR employee record; carries no permission until linked to an account.
#[derive(Debug, Clone)]
pub struct Employee {
    pub id: Uuid,
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    pub linked_user_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

/// A caller with their effective permissions, resolved fresh per request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user: User,
    pub permissions: PermissionMatrix,
    /// Name of the assigned registry role, if the binding resolves (kept
    /// even when inactive, for admin screens).
    pub role_name: Option<String>,
    pub is_admin: bool,
}

impl CurrentUser {
    /// Build from an account plus its assigned role row (if any). The sole
    /// precedence point: assigned-and-active wins, anything else falls back
    /// to the legacy table.
    pub fn resolve(user: User, assigned: Option<&Role>) -> Self {
        let permissions =
            resolve_permissions(user.legacy_role, assigned.map(|role| role.grant()));
        let is_admin = is_admin(user.legacy_role, &permissions);
        Self {
            role_name: assigned.map(|role| role.name.clone()),
            user,
            permissions,
            is_admin,
        }
    }
}

/// Fixed default credential for accounts provisioned by the employee
/// linker; the employee is expected to change it at first login.
pub const DEFAULT_PASSWORD: &str = "Welcome@123";

/// Legacy role given to accounts the linker provisions.
pub const PROVISIONED_LEGACY_ROLE: LegacyRole = LegacyRole::SiteEngineer;

/// Preset for one seeded role.
#[derive(Debug, Clone)]
pub struct RoleSeed {
    pub name: &'static str,
    pub description: &'static str,
    pub is_system_role: bool,
    pub permissions: PermissionMatrix,
}

/// The fixed role presets created by `POST /rbac/init`, matched by name and
/// never overwritten once present.
pub fn system_role_seeds() -> Vec<RoleSeed> {
    vec![
        RoleSeed {
            name: "Administrator",
            description: "Full system access",
            is_system_role: true,
            permissions: PermissionMatrix::full(),
        },
        RoleSeed {
            name: "HR Manager",
            description: "Human Resources management",
            is_system_role: false,
            permissions: PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Hrms, ActionSet::ALL)
                .grant(Module::Reports, ActionSet::new(true, true, false, false)),
        },
        RoleSeed {
            name: "Project Manager",
            description: "Project management and oversight",
            is_system_role: false,
            permissions: PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Projects, ActionSet::new(true, true, true, false))
                .grant(Module::Procurement, ActionSet::VIEW)
                .grant(Module::Reports, ActionSet::new(true, true, false, false))
                .grant(Module::AiAssistant, ActionSet::new(true, true, false, false)),
        },
        RoleSeed {
            name: "Accountant",
            description: "Financial operations and compliance",
            is_system_role: false,
            permissions: PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Financial, ActionSet::new(true, true, true, false))
                .grant(Module::Compliance, ActionSet::new(true, true, true, false))
                .grant(Module::Einvoicing, ActionSet::new(true, true, true, false))
                .grant(Module::Reports, ActionSet::new(true, true, false, false)),
        },
        RoleSeed {
            name: "Site Engineer",
            description: "On-site project execution",
            is_system_role: false,
            permissions: PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Projects, ActionSet::new(true, true, true, false))
                .grant(Module::Reports, ActionSet::VIEW)
                .grant(Module::AiAssistant, ActionSet::new(true, true, false, false)),
        },
        RoleSeed {
            name: "Procurement Officer",
            description: "Procurement and vendor management",
            is_system_role: false,
            permissions: PermissionMatrix::empty()
                .grant(Module::Dashboard, ActionSet::VIEW)
                .grant(Module::Procurement, ActionSet::ALL)
                .grant(Module::Projects, ActionSet::VIEW)
                .grant(Module::Reports, ActionSet::VIEW),
        },
    ]
}
