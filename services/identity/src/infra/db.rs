use std::collections::HashMap;

use anyhow::Context as _;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use girder_domain::legacy::LegacyRole;
use girder_domain::module::Module;
use girder_domain::permission::{ActionSet, PermissionMatrix};
use girder_identity_schema::{employees, role_permissions, roles, users};

use crate::domain::repository::{EmployeeRepository, RoleRepository, UserRepository};
use crate::domain::types::{Employee, Role, User};
use crate::error::IdentityServiceError;
use crate::infra::credential::hash_password;

// ── Role repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbRoleRepository {
    pub db: DatabaseConnection,
}

impl RoleRepository for DbRoleRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Role>, IdentityServiceError> {
        let Some(model) = roles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find role by id")?
        else {
            return Ok(None);
        };
        let perms = self.load_permissions(id).await?;
        Ok(Some(role_from_models(model, perms)))
    }

    async fn find_by_name(&self, name: &str) -> Result<Option<Role>, IdentityServiceError> {
        let Some(model) = roles::Entity::find()
            .filter(roles::Column::Name.eq(name))
            .one(&self.db)
            .await
            .context("find role by name")?
        else {
            return Ok(None);
        };
        let perms = self.load_permissions(model.id).await?;
        Ok(Some(role_from_models(model, perms)))
    }

    async fn list(&self, include_inactive: bool) -> Result<Vec<Role>, IdentityServiceError> {
        let mut query = roles::Entity::find().order_by_asc(roles::Column::CreatedAt);
        if !include_inactive {
            query = query.filter(roles::Column::IsActive.eq(true));
        }
        let models = query.all(&self.db).await.context("list roles")?;

        let ids: Vec<Uuid> = models.iter().map(|m| m.id).collect();
        let mut grouped: HashMap<Uuid, Vec<role_permissions::Model>> = HashMap::new();
        for perm in role_permissions::Entity::find()
            .filter(role_permissions::Column::RoleId.is_in(ids))
            .all(&self.db)
            .await
            .context("list role permissions")?
        {
            grouped.entry(perm.role_id).or_default().push(perm);
        }

        Ok(models
            .into_iter()
            .map(|model| {
                let perms = grouped.remove(&model.id).unwrap_or_default();
                role_from_models(model, perms)
            })
            .collect())
    }

    async fn create(&self, role: &Role) -> Result<(), IdentityServiceError> {
        let txn = self.db.begin().await.context("begin create role")?;
        roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
            is_system_role: Set(role.is_system_role),
            is_active: Set(role.is_active),
            created_at: Set(role.created_at),
            updated_at: Set(role.updated_at),
        }
        .insert(&txn)
        .await
        .context("insert role")?;
        insert_permission_rows(&txn, role).await?;
        txn.commit().await.context("commit create role")?;
        Ok(())
    }

    async fn update(&self, role: &Role) -> Result<(), IdentityServiceError> {
        // Full replace: the matrix rows are rewritten wholesale with the
        // role row, one transaction, no partial merge.
        let txn = self.db.begin().await.context("begin update role")?;
        roles::ActiveModel {
            id: Set(role.id),
            name: Set(role.name.clone()),
            description: Set(role.description.clone()),
            is_system_role: Set(role.is_system_role),
            is_active: Set(role.is_active),
            created_at: Set(role.created_at),
            updated_at: Set(role.updated_at),
        }
        .update(&txn)
        .await
        .context("update role")?;
        role_permissions::Entity::delete_many()
            .filter(role_permissions::Column::RoleId.eq(role.id))
            .exec(&txn)
            .await
            .context("clear role permissions")?;
        insert_permission_rows(&txn, role).await?;
        txn.commit().await.context("commit update role")?;
        Ok(())
    }

    async fn delete_and_unbind(&self, id: Uuid) -> Result<u64, IdentityServiceError> {
        let txn = self.db.begin().await.context("begin delete role")?;
        let reverted = users::Entity::update_many()
            .col_expr(users::Column::AssignedRoleId, Expr::value(Option::<Uuid>::None))
            .filter(users::Column::AssignedRoleId.eq(id))
            .exec(&txn)
            .await
            .context("clear role bindings")?
            .rows_affected;
        roles::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .context("delete role")?;
        txn.commit().await.context("commit delete role")?;
        Ok(reverted)
    }
}

impl DbRoleRepository {
    async fn load_permissions(
        &self,
        role_id: Uuid,
    ) -> Result<Vec<role_permissions::Model>, IdentityServiceError> {
        Ok(role_permissions::Entity::find()
            .filter(role_permissions::Column::RoleId.eq(role_id))
            .all(&self.db)
            .await
            .context("load role permissions")?)
    }
}

async fn insert_permission_rows<C: ConnectionTrait>(
    conn: &C,
    role: &Role,
) -> Result<(), IdentityServiceError> {
    let rows: Vec<role_permissions::ActiveModel> = role
        .permissions
        .granted_modules()
        .map(|(module, actions)| role_permissions::ActiveModel {
            role_id: Set(role.id),
            module: Set(module.as_str().to_owned()),
            view: Set(actions.view),
            create: Set(actions.create),
            edit: Set(actions.edit),
            delete: Set(actions.delete),
        })
        .collect();
    if !rows.is_empty() {
        role_permissions::Entity::insert_many(rows)
            .exec(conn)
            .await
            .context("insert role permissions")?;
    }
    Ok(())
}

fn role_from_models(model: roles::Model, perms: Vec<role_permissions::Model>) -> Role {
    // Module rows are validated on write; a row that no longer parses is
    // simply dropped, which lands on the deny-by-default path.
    let permissions: PermissionMatrix = perms
        .into_iter()
        .filter_map(|p| {
            Module::from_str(&p.module)
                .map(|m| (m, ActionSet::new(p.view, p.create, p.edit, p.delete)))
        })
        .collect();
    Role {
        id: model.id,
        name: model.name,
        description: model.description,
        permissions,
        is_system_role: model.is_system_role,
        is_active: model.is_active,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── User repository ──────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        model.map(user_from_model).transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, IdentityServiceError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        model.map(user_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<User>, IdentityServiceError> {
        users::Entity::find()
            .order_by_asc(users::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list users")?
            .into_iter()
            .map(user_from_model)
            .collect()
    }

    async fn create(&self, user: &User, password: &str) -> Result<(), IdentityServiceError> {
        let password_hash = hash_password(password)?;
        users::ActiveModel {
            id: Set(user.id),
            name: Set(user.name.clone()),
            email: Set(user.email.clone()),
            legacy_role: Set(user.legacy_role.as_str().to_owned()),
            assigned_role_id: Set(user.assigned_role_id),
            password_hash: Set(password_hash),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("insert user")?;
        Ok(())
    }

    async fn set_assigned_role(
        &self,
        user_id: Uuid,
        role_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError> {
        let txn = self.db.begin().await.context("begin set assigned role")?;
        if let Some(role_id) = role_id {
            // Re-checked inside the transaction so a concurrent role delete
            // cannot leave the binding dangling.
            roles::Entity::find_by_id(role_id)
                .one(&txn)
                .await
                .context("check role for assignment")?
                .ok_or(IdentityServiceError::RoleNotFound)?;
        }
        users::Entity::update_many()
            .col_expr(users::Column::AssignedRoleId, Expr::value(role_id))
            .filter(users::Column::Id.eq(user_id))
            .exec(&txn)
            .await
            .context("set assigned role")?;
        txn.commit().await.context("commit set assigned role")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> Result<User, IdentityServiceError> {
    let legacy_role = LegacyRole::from_str(&model.legacy_role).ok_or_else(|| {
        anyhow::anyhow!("unknown legacy role '{}' on user {}", model.legacy_role, model.id)
    })?;
    Ok(User {
        id: model.id,
        name: model.name,
        email: model.email,
        legacy_role,
        assigned_role_id: model.assigned_role_id,
        created_at: model.created_at,
    })
}

// ── Employee repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbEmployeeRepository {
    pub db: DatabaseConnection,
}

impl EmployeeRepository for DbEmployeeRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Employee>, IdentityServiceError> {
        let model = employees::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find employee by id")?;
        Ok(model.map(employee_from_model))
    }

    async fn find_by_linked_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Employee>, IdentityServiceError> {
        let model = employees::Entity::find()
            .filter(employees::Column::LinkedUserId.eq(user_id))
            .one(&self.db)
            .await
            .context("find employee by linked user")?;
        Ok(model.map(employee_from_model))
    }

    async fn list(&self) -> Result<Vec<Employee>, IdentityServiceError> {
        Ok(employees::Entity::find()
            .order_by_asc(employees::Column::EmployeeCode)
            .all(&self.db)
            .await
            .context("list employees")?
            .into_iter()
            .map(employee_from_model)
            .collect())
    }

    async fn set_linked_user(
        &self,
        employee_id: Uuid,
        user_id: Option<Uuid>,
    ) -> Result<(), IdentityServiceError> {
        employees::Entity::update_many()
            .col_expr(employees::Column::LinkedUserId, Expr::value(user_id))
            .filter(employees::Column::Id.eq(employee_id))
            .exec(&self.db)
            .await
            .context("set linked user")?;
        Ok(())
    }
}

fn employee_from_model(model: employees::Model) -> Employee {
    Employee {
        id: model.id,
        employee_code: model.employee_code,
        name: model.name,
        email: model.email,
        department: model.department,
        designation: model.designation,
        linked_user_id: model.linked_user_id,
        created_at: model.created_at,
    }
}
