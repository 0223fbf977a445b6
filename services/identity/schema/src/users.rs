use sea_orm::entity::prelude::*;

/// Login account. `legacy_role` is the mandatory fallback permission
/// source; `assigned_role_id` is the optional registry binding.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub email: String,
    pub legacy_role: String,
    pub assigned_role_id: Option<Uuid>,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::roles::Entity",
        from = "Column::AssignedRoleId",
        to = "super::roles::Column::Id"
    )]
    AssignedRole,
    #[sea_orm(has_many = "super::employees::Entity")]
    Employees,
}

impl Related<super::roles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::AssignedRole.def()
    }
}

impl Related<super::employees::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Employees.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
