//! Generic data mapper
//!
//! [`Mapper<E>`] implements row-level CRUD and paging once for every entity
//! that names its identifier column through [`RowEntity`]. All operations
//! take the connection to run on, so callers decide whether a statement runs
//! on the pool or inside an open transaction.
//!
//! Per-entity lookups live in inherent impls on the concrete aliases
//! ([`UserMapper`], [`RoleMapper`], [`UserRoleMapper`]).

mod role_mapper;
mod user_mapper;
mod user_role_mapper;

pub use role_mapper::RoleMapper;
pub use user_mapper::UserMapper;
pub use user_role_mapper::UserRoleMapper;

use std::fmt;
use std::marker::PhantomData;

use sea_orm::{
    ActiveModelBehavior, ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr,
    EntityName, EntityTrait, IdenStatic, IntoActiveModel, Iterable, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::shared::pagination::{PageParams, PaginatedResult, SortOrder};

/// Default chunk size for `IN (...)` lookups.
pub const DEFAULT_BATCH_SIZE: usize = 1000;

/// A table-backed entity with a surrogate `i64` identifier.
pub trait RowEntity: EntityTrait {
    /// Table name, used in not-found reports.
    const TABLE: &'static str;

    fn id_column() -> Self::Column;
}

impl From<SortOrder> for Order {
    fn from(order: SortOrder) -> Self {
        match order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        }
    }
}

pub struct Mapper<E> {
    _entity: PhantomData<fn() -> E>,
}

impl<E> Mapper<E> {
    pub const fn new() -> Self {
        Self {
            _entity: PhantomData,
        }
    }
}

impl<E> Default for Mapper<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for Mapper<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for Mapper<E> {}

impl<E: EntityName> fmt::Debug for Mapper<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper")
            .field("table", &E::default().table_name())
            .finish()
    }
}

impl<E> Mapper<E>
where
    E: RowEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    /// Persist one row and return it with its generated id.
    pub async fn insert<C, A>(&self, db: &C, data: A) -> Result<E::Model, DbErr>
    where
        C: ConnectionTrait,
        A: IntoActiveModel<E::ActiveModel>,
    {
        data.into_active_model().insert(db).await
    }

    /// One bulk `INSERT`; returns the number of rows submitted.
    pub async fn insert_batch<C, A, I>(&self, db: &C, rows: I) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
        A: IntoActiveModel<E::ActiveModel>,
        I: IntoIterator<Item = A>,
    {
        let models: Vec<E::ActiveModel> = rows
            .into_iter()
            .map(IntoActiveModel::into_active_model)
            .collect();
        if models.is_empty() {
            return Ok(0);
        }

        let count = models.len() as u64;
        E::insert_many(models).exec_without_returning(db).await?;
        Ok(count)
    }

    pub async fn select_by_id<C>(&self, db: &C, id: i64) -> Result<Option<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find().filter(E::id_column().eq(id)).one(db).await
    }

    /// Look rows up in chunks of `batch_size` ids. Result order across
    /// chunks is unspecified.
    pub async fn select_by_ids<C>(
        &self,
        db: &C,
        ids: &[i64],
        batch_size: usize,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut found = Vec::with_capacity(ids.len());
        for chunk in ids.chunks(batch_size.max(1)) {
            let mut rows = E::find()
                .filter(E::id_column().is_in(chunk.iter().copied()))
                .all(db)
                .await?;
            found.append(&mut rows);
        }
        Ok(found)
    }

    pub async fn select_count<C>(&self, db: &C) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        E::find().count(db).await
    }

    /// One page of rows. Without a query rows come in id order; a caller
    /// query keeps its own filters and ordering, with paging applied on top.
    pub async fn select_list<C>(
        &self,
        db: &C,
        page: u64,
        size: u64,
        query: Option<Select<E>>,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let params = PageParams::new(page, size);
        query
            .unwrap_or_else(Self::default_query)
            .offset(params.offset())
            .limit(params.size)
            .all(db)
            .await
    }

    /// Like [`select_list`](Self::select_list), ordered by `order_by`.
    /// Unknown or missing column names fall back to the id column.
    pub async fn select_list_ordered<C>(
        &self,
        db: &C,
        page: u64,
        size: u64,
        query: Option<Select<E>>,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> Result<Vec<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let params = PageParams::new(page, size);
        query
            .unwrap_or_else(E::find)
            .order_by(Self::resolve_column(order_by), sort_order.into())
            .offset(params.offset())
            .limit(params.size)
            .all(db)
            .await
    }

    pub async fn select_list_page<C>(
        &self,
        db: &C,
        params: PageParams,
        query: Option<Select<E>>,
    ) -> Result<PaginatedResult<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        Self::fetch_page(db, params, query.unwrap_or_else(Self::default_query)).await
    }

    pub async fn select_list_page_ordered<C>(
        &self,
        db: &C,
        params: PageParams,
        query: Option<Select<E>>,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> Result<PaginatedResult<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let query = query
            .unwrap_or_else(E::find)
            .order_by(Self::resolve_column(order_by), sort_order.into());
        Self::fetch_page(db, params, query).await
    }

    /// Copy every set, non-id attribute of `data` onto the stored row.
    /// Returns 0 when `data` carries no id or no such row exists.
    pub async fn update_by_id<C>(&self, db: &C, data: E::ActiveModel) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let id_column = E::id_column();
        let Some(id) = data.get(id_column).into_value() else {
            return Ok(0);
        };
        let Some(row) = E::find().filter(id_column.eq(id)).one(db).await? else {
            return Ok(0);
        };

        let mut active = row.into_active_model();
        for column in E::Column::iter() {
            if column.as_str() == id_column.as_str() {
                continue;
            }
            if let ActiveValue::Set(value) = data.get(column) {
                active.set(column, value);
            }
        }
        active.update(db).await?;
        Ok(1)
    }

    /// One `UPDATE ... WHERE id = ?` per row, touching only the set columns
    /// plus the save hooks (`update_time`). Rows without an id or without
    /// changes issue nothing. Returns the number of inputs processed.
    pub async fn update_batch_by_ids<C>(
        &self,
        db: &C,
        rows: Vec<E::ActiveModel>,
    ) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let id_column = E::id_column();
        let processed = rows.len() as u64;
        for mut row in rows {
            let Some(id) = row.get(id_column).into_value() else {
                continue;
            };
            row.not_set(id_column);
            if !row.is_changed() {
                continue;
            }
            let row = row.before_save(db, false).await?;

            E::update_many()
                .set(row)
                .filter(id_column.eq(id))
                .exec(db)
                .await?;
        }
        Ok(processed)
    }

    /// Delete one row. A missing row is a `RecordNotFound` error.
    pub async fn delete_by_id<C>(&self, db: &C, id: i64) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        let row = self.select_by_id(db, id).await?.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "{} with id {} not found",
                E::TABLE,
                id
            ))
        })?;
        let result = row.into_active_model().delete(db).await?;
        Ok(result.rows_affected)
    }

    pub async fn delete_batch_by_ids<C>(&self, db: &C, ids: &[i64]) -> Result<u64, DbErr>
    where
        C: ConnectionTrait,
    {
        if ids.is_empty() {
            return Ok(0);
        }
        let result = E::delete_many()
            .filter(E::id_column().is_in(ids.iter().copied()))
            .exec(db)
            .await?;
        Ok(result.rows_affected)
    }

    /// Map a caller-supplied column name onto a real column, defaulting to id.
    pub fn resolve_column(name: Option<&str>) -> E::Column {
        name.and_then(|name| E::Column::iter().find(|column| column.as_str() == name))
            .unwrap_or_else(E::id_column)
    }

    fn default_query() -> Select<E> {
        E::find().order_by_asc(E::id_column())
    }

    async fn fetch_page<C>(
        db: &C,
        params: PageParams,
        query: Select<E>,
    ) -> Result<PaginatedResult<E::Model>, DbErr>
    where
        C: ConnectionTrait,
    {
        let params = PageParams::new(params.page, params.size);
        let paginator = query.paginate(db, params.size);
        let total = paginator.num_items().await?;
        let items = paginator.fetch_page(params.page - 1).await?;
        Ok(PaginatedResult::new(items, total, params.page, params.size))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::NewUser;
    use crate::infrastructure::database::entities::user;
    use crate::infrastructure::database::memory_database;
    use sea_orm::Set;

    fn new_user(name: &str) -> NewUser {
        NewUser {
            username: name.to_string(),
            password_hash: "hash".to_string(),
            nickname: Some(format!("{name}-nick")),
        }
    }

    async fn seed(db: &sea_orm::DatabaseConnection, names: &[&str]) -> Vec<user::Model> {
        let mapper = UserMapper::new();
        let mut rows = Vec::new();
        for name in names {
            rows.push(mapper.insert(db, new_user(name)).await.unwrap());
        }
        rows
    }

    #[tokio::test]
    async fn insert_assigns_id_and_timestamps() {
        let db = memory_database().await;
        let mapper = UserMapper::new();

        let row = mapper.insert(&db, new_user("alice")).await.unwrap();

        assert!(row.id > 0);
        assert_eq!(row.username, "alice");
        assert!(row.update_time >= row.create_time);
        assert_eq!(mapper.select_by_id(&db, row.id).await.unwrap(), Some(row));
    }

    #[tokio::test]
    async fn insert_batch_returns_input_count() {
        let db = memory_database().await;
        let mapper = UserMapper::new();

        let inserted = mapper
            .insert_batch(&db, ["a", "b", "c"].map(new_user))
            .await
            .unwrap();

        assert_eq!(inserted, 3);
        assert_eq!(mapper.select_count(&db).await.unwrap(), 3);
        assert_eq!(mapper.insert_batch(&db, Vec::<NewUser>::new()).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn select_by_ids_spans_chunks() {
        let db = memory_database().await;
        let rows = seed(&db, &["a", "b", "c", "d", "e"]).await;
        let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
        let mapper = UserMapper::new();

        let mut found = mapper.select_by_ids(&db, &ids, 2).await.unwrap();
        found.sort_by_key(|row| row.id);
        assert_eq!(found, rows);

        let zero_batch = mapper.select_by_ids(&db, &ids[..2], 0).await.unwrap();
        assert_eq!(zero_batch.len(), 2);
    }

    #[tokio::test]
    async fn select_list_pages_in_id_order() {
        let db = memory_database().await;
        seed(&db, &["a", "b", "c", "d", "e"]).await;
        let mapper = UserMapper::new();

        let second = mapper.select_list(&db, 2, 2, None).await.unwrap();
        let names: Vec<_> = second.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, ["c", "d"]);

        let custom = user::Entity::find()
            .filter(user::Column::Username.ne("a"))
            .order_by_desc(user::Column::Id);
        let first = mapper.select_list(&db, 1, 2, Some(custom)).await.unwrap();
        let names: Vec<_> = first.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, ["e", "d"]);
    }

    #[tokio::test]
    async fn unknown_order_column_falls_back_to_id() {
        let db = memory_database().await;
        seed(&db, &["b", "a", "c"]).await;
        let mapper = UserMapper::new();

        let by_name = mapper
            .select_list_ordered(&db, 1, 10, None, Some("username"), SortOrder::Desc)
            .await
            .unwrap();
        let names: Vec<_> = by_name.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, ["c", "b", "a"]);

        let fallback = mapper
            .select_list_ordered(&db, 1, 10, None, Some("no_such; DROP"), SortOrder::Asc)
            .await
            .unwrap();
        let names: Vec<_> = fallback.iter().map(|row| row.username.as_str()).collect();
        assert_eq!(names, ["b", "a", "c"]);
    }

    #[tokio::test]
    async fn select_list_page_reports_totals() {
        let db = memory_database().await;
        seed(&db, &["a", "b", "c", "d", "e"]).await;
        let mapper = UserMapper::new();

        let page = mapper
            .select_list_page(&db, PageParams::new(3, 2), None)
            .await
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].username, "e");

        let ordered = mapper
            .select_list_page_ordered(&db, PageParams::new(1, 2), None, Some("id"), SortOrder::Desc)
            .await
            .unwrap();
        assert_eq!(ordered.items[0].username, "e");
    }

    #[tokio::test]
    async fn update_by_id_applies_only_set_fields() {
        let db = memory_database().await;
        let row = seed(&db, &["alice"]).await.remove(0);
        let mapper = UserMapper::new();

        let changes = user::ActiveModel {
            id: Set(row.id),
            nickname: Set(Some("Al".to_string())),
            ..Default::default()
        };
        assert_eq!(mapper.update_by_id(&db, changes).await.unwrap(), 1);

        let stored = mapper.select_by_id(&db, row.id).await.unwrap().unwrap();
        assert_eq!(stored.nickname.as_deref(), Some("Al"));
        assert_eq!(stored.username, "alice");
        assert_eq!(stored.password, row.password);
    }

    #[tokio::test]
    async fn update_by_id_on_missing_row_is_zero() {
        let db = memory_database().await;
        let mapper = UserMapper::new();

        let changes = user::ActiveModel {
            id: Set(42),
            nickname: Set(Some("ghost".to_string())),
            ..Default::default()
        };
        assert_eq!(mapper.update_by_id(&db, changes).await.unwrap(), 0);
        assert_eq!(mapper.select_count(&db).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn update_batch_counts_every_input() {
        let db = memory_database().await;
        let rows = seed(&db, &["a", "b"]).await;
        let mapper = UserMapper::new();

        let updates = vec![
            user::ActiveModel {
                id: Set(rows[0].id),
                nickname: Set(Some("first".to_string())),
                ..Default::default()
            },
            user::ActiveModel {
                id: Set(rows[1].id),
                ..Default::default()
            },
            user::ActiveModel {
                nickname: Set(Some("no id".to_string())),
                ..Default::default()
            },
        ];
        assert_eq!(mapper.update_batch_by_ids(&db, updates).await.unwrap(), 3);

        let first = mapper.select_by_id(&db, rows[0].id).await.unwrap().unwrap();
        let second = mapper.select_by_id(&db, rows[1].id).await.unwrap().unwrap();
        assert_eq!(first.nickname.as_deref(), Some("first"));
        assert_eq!(second, rows[1]);
    }

    #[tokio::test]
    async fn update_batch_refreshes_update_time() {
        let db = memory_database().await;
        let row = seed(&db, &["alice"]).await.remove(0);
        let mapper = UserMapper::new();
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;

        let update = user::ActiveModel {
            id: Set(row.id),
            nickname: Set(Some("renamed".to_string())),
            ..Default::default()
        };
        mapper.update_batch_by_ids(&db, vec![update]).await.unwrap();

        let after = mapper.select_by_id(&db, row.id).await.unwrap().unwrap();
        assert_eq!(after.nickname.as_deref(), Some("renamed"));
        assert_eq!(after.create_time, row.create_time);
        assert!(after.update_time > row.update_time);
    }

    #[test]
    fn table_constants_match_entities() {
        use crate::infrastructure::database::entities::{role, user_role};
        assert_eq!(user::Entity::TABLE, user::Entity.table_name());
        assert_eq!(role::Entity::TABLE, role::Entity.table_name());
        assert_eq!(user_role::Entity::TABLE, user_role::Entity.table_name());
    }

    #[tokio::test]
    async fn delete_by_id_then_select_is_none() {
        let db = memory_database().await;
        let row = seed(&db, &["alice"]).await.remove(0);
        let mapper = UserMapper::new();

        assert!(mapper.select_by_id(&db, row.id).await.unwrap().is_some());
        assert_eq!(mapper.delete_by_id(&db, row.id).await.unwrap(), 1);
        assert_eq!(mapper.select_by_id(&db, row.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_by_id_on_missing_row_fails() {
        let db = memory_database().await;
        let err = UserMapper::new().delete_by_id(&db, 7).await.unwrap_err();
        assert!(matches!(err, DbErr::RecordNotFound(_)));
    }

    #[tokio::test]
    async fn delete_batch_reports_rows_affected() {
        let db = memory_database().await;
        let rows = seed(&db, &["a", "b", "c"]).await;
        let mapper = UserMapper::new();

        let deleted = mapper
            .delete_batch_by_ids(&db, &[rows[0].id, rows[2].id, 999])
            .await
            .unwrap();
        assert_eq!(deleted, 2);
        assert_eq!(mapper.delete_batch_by_ids(&db, &[]).await.unwrap(), 0);
        assert_eq!(mapper.select_count(&db).await.unwrap(), 1);
    }

    #[test]
    fn resolve_column_matches_real_columns_only() {
        assert!(matches!(
            UserMapper::resolve_column(Some("nickname")),
            user::Column::Nickname
        ));
        assert!(matches!(UserMapper::resolve_column(Some("bogus")), user::Column::Id));
        assert!(matches!(UserMapper::resolve_column(None), user::Column::Id));
    }
}
