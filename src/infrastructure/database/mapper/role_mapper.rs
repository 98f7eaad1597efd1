use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use super::{Mapper, RowEntity};
use crate::infrastructure::database::entities::role;

pub type RoleMapper = Mapper<role::Entity>;

impl RowEntity for role::Entity {
    const TABLE: &'static str = "system_role";

    fn id_column() -> role::Column {
        role::Column::Id
    }
}

impl RoleMapper {
    pub async fn get_role_by_code<C>(
        &self,
        db: &C,
        role_code: &str,
    ) -> Result<Option<role::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        role::Entity::find()
            .filter(role::Column::RoleCode.eq(role_code))
            .one(db)
            .await
    }
}
