use sea_orm::entity::prelude::*;

/// HR employee record, independent of login identity until linked.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub department: Option<String>,
    pub designation: Option<String>,
    /// Nullable bridge to a login account; severed on unlink, never deletes
    /// the account.
    pub linked_user_id: Option<Uuid>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::LinkedUserId",
        to = "super::users::Column::Id"
    )]
    LinkedUser,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LinkedUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
