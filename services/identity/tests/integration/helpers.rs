use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use girder_domain::legacy::LegacyRole;
use girder_domain::permission::PermissionMatrix;
use girder_identity::domain::repository::{
    EmployeeRepository, RoleRepository, UserRepository,
};
use girder_identity::domain::types::{Employee, Role, User};
use girder_identity::error::IdentityServiceError;

// ── MockStore ────────────────────────────────────────────────────────────────

/// In-memory stand-in for the database. The three repositories share the
/// same backing vectors, so cross-repository effects (delete-and-unbind,
/// account provisioning) are observable from the outside.
pub struct MockStore {
    pub roles: Arc<Mutex<Vec<Role>>>,
    pub users: Arc<Mutex<Vec<User>>>,
    pub employees: Arc<Mutex<Vec<Employee>>>,
    pub provisioned_passwords: Arc<Mutex<Vec<String>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            roles: Arc::new(Mutex::new(vec![])),
            users: Arc::new(Mutex::new(vec![])),
            employees: Arc::new(Mutex::new(vec![])),
            provisioned_passwords: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn add_role(&self, role: Role) {
        self.roles.lock().unwrap().push(role);
    }

    pub fn add_user(&self, user: User) {
        self.users.lock().unwrap().push(user);
    }

    pub fn add_employee(&self, employee: Employee) {
        self.employees.lock().unwrap().push(employee);
    }

    pub fn role_repo(&self) -> MockRoleRepo {
        MockRoleRepo {
            roles: Arc::clone(&self.roles),
            users: Arc::clone(&self.users),
        }
    }

    pub fn user_repo(&self) -> MockUserRepo {
        MockUserRepo {
            users: Arc::clone(&self.users),
            roles: Arc::clone(&self.roles),
            provisioned_passwords: Arc::clone(&self.provisioned_passwords),
        }
    }

    pub fn employee_repo(&self) -> MockEmployeeRepo {
        MockEmployeeRepo {
            employees: Arc::clone(&self.employees),
        }
    }
}

// ── MockRoleRepo ─────────────────────────────────────────────────────────────

pub struct MockRoleRepo {
    pub roles: Arc<Mutex<Vec<Role>>>,
    pub users: Arc<Mutex<Vec<User>>>,
}

impl RoleRepository for MockRoleRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, IdentityServiceError> {
        Ok(self.roles.lock().unwrap().iter().find(|r| r.id == id).cloned())
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityServiceError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.name == name)
            .cloned())
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Role>, IdentityServiceError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .filter(|r| include_inactive || r.is_active)
            .cloned()
            .collect())
    }

    async fn create(&self, role: &Role) -> Result<(), IdentityServiceError> {
        self.roles.lock().unwrap().push(role.clone());
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), IdentityServiceError> {
        let mut roles = self.roles.lock().unwrap();
        if let Some(existing) = roles.iter_mut().find(|r| r.id == role.id) {
            *existing = role.clone();
        }
        Ok(())
    }

    async fn delete_and_unbind(&self, id: Uuid) -> Result<u64, IdentityServiceError> {
        let mut reverted = 0;
        for user in self.users.lock().unwrap().iter_mut() {
            if user.assigned_role_id == Some(id) {
                user.assigned_role_id = None;
                reverted += 1;
            }
        }
        self.roles.lock().unwrap().retain(|r| r.id != id);
        Ok(reverted)
    }
}

// ── MockUserRepo ─────────────────────────────────────────────────────────────

pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
    pub roles: Arc<Mutex<Vec<Role>>>,
    pub provisioned_passwords: Arc<Mutex<Vec<String>>>,
}

impl UserRepository for MockUserRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, IdentityServiceError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn create(&self, user: &User, password: &str) -> Result<(), IdentityServiceError> {
        self.users.lock().unwrap().push(user.clone());
        self.provisioned_passwords
            .lock()
            .unwrap()
            .push(password.to_owned());
        Ok(())
    }

    async fn set_assigned_role(
        &self,
        user_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError> {
        if let Some(role_id) = role_id {
            // Same contract as the database implementation: the role must
            // still exist at write time.
            if !self.roles.lock().unwrap().iter().any(|r| r.id == role_id) {
                return Err(IdentityServiceError::RoleNotFound);
            }
        }
        if let Some(user) = self
            .users
            .lock()
            .unwrap()
            .iter_mut()
            .find(|u| u.id == user_id)
        {
            user.assigned_role_id = role_id;
        }
        Ok(())
    }
}

// ── MockEmployeeRepo ─────────────────────────────────────────────────────────

pub struct MockEmployeeRepo {
    pub employees: Arc<Mutex<Vec<Employee>>>,
}

impl EmployeeRepository for MockEmployeeRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, IdentityServiceError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id == id)
            .cloned())
    }

    async fn find_by_linked_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Employee>, IdentityServiceError> {
        Ok(self
            .employees
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.linked_user_id == Some(user_id))
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Employee>, IdentityServiceError> {
        Ok(self.employees.lock().unwrap().clone())
    }

    async fn set_linked_user(
        &self,
        employee_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError> {
        if let Some(employee) = self
            .employees
            .lock()
            .unwrap()
            .iter_mut()
            .find(|e| e.id == employee_id)
        {
            employee.linked_user_id = user_id;
        }
        Ok(())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_role(name: &str, permissions: PermissionMatrix) -> Role {
    let now = Utc::now();
    Role {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        description: None,
        permissions,
        is_system_role: false,
        is_active: true,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_system_role(name: &str, permissions: PermissionMatrix) -> Role {
    Role {
        is_system_role: true,
        ..test_role(name, permissions)
    }
}

pub fn test_user(name: &str, legacy_role: LegacyRole) -> User {
    User {
        id: Uuid::new_v4(),
        name: name.to_owned(),
        email: format!("{}@girder.test", name.to_lowercase().replace(' ', ".")),
        legacy_role,
        assigned_role_id: None,
        created_at: Utc::now(),
    }
}

pub fn test_employee(employee_code: &str, name: &str) -> Employee {
    Employee {
        id: Uuid::new_v4(),
        employee_code: employee_code.to_owned(),
        name: name.to_owned(),
        email: format!("{employee_code}@girder.test").to_lowercase(),
        department: Some("Projects".to_owned()),
        designation: None,
        linked_user_id: None,
        created_at: Utc::now(),
    }
}
