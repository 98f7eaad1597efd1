//! `system_user_role` association table

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_user_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub user_id: i64,
    pub role_id: i64,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::role::Entity",
        from = "Column::RoleId",
        to = "super::role::Column::Id"
    )]
    Role,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Role.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        super::stamp_times(&mut self.create_time, &mut self.update_time, insert);
        Ok(self)
    }
}

/// A link row ready for bulk insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewUserRole {
    pub user_id: i64,
    pub role_id: i64,
}

impl IntoActiveModel<ActiveModel> for NewUserRole {
    fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            user_id: Set(self.user_id),
            role_id: Set(self.role_id),
            create_time: Set(now),
            update_time: Set(now),
            ..Default::default()
        }
    }
}
