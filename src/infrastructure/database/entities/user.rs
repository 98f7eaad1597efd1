//! `system_user` table

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::domain::user::{NewUser, UserQuery};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_user")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub username: String,
    /// bcrypt hash
    #[serde(skip_serializing)]
    pub password: String,
    pub nickname: Option<String>,
    pub create_time: DateTime<Utc>,
    pub update_time: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_role::Entity")]
    UserRoles,
}

impl Related<super::user_role::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserRoles.def()
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

// Bulk inserts bypass `before_save`, so timestamps are filled here.
impl IntoActiveModel<ActiveModel> for NewUser {
    fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            username: Set(self.username),
            password: Set(self.password_hash),
            nickname: Set(self.nickname),
            create_time: Set(now),
            update_time: Set(now),
            ..Default::default()
        }
    }
}

impl From<Model> for UserQuery {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            nickname: model.nickname,
            create_time: model.create_time,
            update_time: model.update_time,
        }
    }
}
