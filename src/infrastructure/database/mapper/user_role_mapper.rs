use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

use super::{Mapper, RowEntity};
use crate::infrastructure::database::entities::user_role;

pub type UserRoleMapper = Mapper<user_role::Entity>;

impl RowEntity for user_role::Entity {
    const TABLE: &'static str = "system_user_role";

    fn id_column() -> user_role::Column {
        user_role::Column::Id
    }
}

impl UserRoleMapper {
    pub async fn select_by_user_id<C>(
        &self,
        db: &C,
        user_id: i64,
    ) -> Result<Vec<user_role::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        user_role::Entity::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .order_by_asc(user_role::Column::RoleId)
            .all(db)
            .await
    }

    pub async fn delete_by_user_id<C>(&self, db: &C, user_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = user_role::Entity::delete_many()
            .filter(user_role::Column::UserId.eq(user_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_role_id<C>(&self, db: &C, role_id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let result = user_role::Entity::delete_many()
            .filter(user_role::Column::RoleId.eq(role_id))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }
}
