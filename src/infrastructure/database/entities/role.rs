//! `system_role` table

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{IntoActiveModel, Set};
use serde::{Deserialize, Serialize};

use crate::domain::role::{RoleCreateCmd, RoleQuery};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "system_role")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub role_name: String,
    #[sea_orm(unique)]
    pub role_code: String,
    pub description: Option<String>,
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

impl IntoActiveModel<ActiveModel> for RoleCreateCmd {
    fn into_active_model(self) -> ActiveModel {
        let now = Utc::now();
        ActiveModel {
            role_name: Set(self.role_name),
            role_code: Set(self.role_code),
            description: Set(self.description),
            create_time: Set(now),
            update_time: Set(now),
            ..Default::default()
        }
    }
}

impl From<Model> for RoleQuery {
    fn from(model: Model) -> Self {
        Self {
            id: model.id,
            role_name: model.role_name,
            role_code: model.role_code,
            description: model.description,
            create_time: model.create_time,
            update_time: model.update_time,
        }
    }
}
