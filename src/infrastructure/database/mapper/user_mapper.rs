use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use super::{Mapper, RowEntity, DEFAULT_BATCH_SIZE};
use crate::infrastructure::database::entities::user;

pub type UserMapper = Mapper<user::Entity>;

impl RowEntity for user::Entity {
    const TABLE: &'static str = "system_user";

    fn id_column() -> user::Column {
        user::Column::Id
    }
}

impl UserMapper {
    pub async fn get_user_by_username<C>(
        &self,
        db: &C,
        username: &str,
    ) -> Result<Option<user::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        user::Entity::find()
            .filter(user::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// Every stored user whose name is in `usernames`.
    pub async fn get_user_by_usernames<C>(
        &self,
        db: &C,
        usernames: &[String],
    ) -> Result<Vec<user::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut found = Vec::new();
        for chunk in usernames.chunks(DEFAULT_BATCH_SIZE) {
            let mut rows = user::Entity::find()
                .filter(user::Column::Username.is_in(chunk.iter().cloned()))
                .all(db)
                .await?;
            found.append(&mut rows);
        }
        Ok(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::NewUser;
    use crate::infrastructure::database::memory_database;

    #[tokio::test]
    async fn looks_users_up_by_name() {
        let db = memory_database().await;
        let mapper = UserMapper::new();
        let names = ["alice", "bob", "carol"];
        for name in names {
            mapper
                .insert(
                    &db,
                    NewUser {
                        username: name.to_string(),
                        password_hash: "hash".to_string(),
                        nickname: None,
                    },
                )
                .await
                .unwrap();
        }

        let bob = mapper.get_user_by_username(&db, "bob").await.unwrap().unwrap();
        assert_eq!(bob.username, "bob");
        assert!(mapper.get_user_by_username(&db, "dave").await.unwrap().is_none());

        let wanted = vec!["carol".to_string(), "dave".to_string(), "alice".to_string()];
        let mut found: Vec<_> = mapper
            .get_user_by_usernames(&db, &wanted)
            .await
            .unwrap()
            .into_iter()
            .map(|user| user.username)
            .collect();
        found.sort();
        assert_eq!(found, ["alice", "carol"]);
    }

    #[tokio::test]
    async fn duplicate_username_violates_unique_index() {
        let db = memory_database().await;
        let mapper = UserMapper::new();
        let user = NewUser {
            username: "alice".to_string(),
            password_hash: "hash".to_string(),
            nickname: None,
        };
        mapper.insert(&db, user.clone()).await.unwrap();
        assert!(mapper.insert(&db, user).await.is_err());
    }
}
