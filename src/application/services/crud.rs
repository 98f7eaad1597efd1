//! Pass-through CRUD shared by every entity service

use sea_orm::{ActiveModelBehavior, DatabaseConnection, DbErr, IntoActiveModel, Select};

use crate::infrastructure::database::mapper::{Mapper, RowEntity, DEFAULT_BATCH_SIZE};
use crate::shared::errors::{AppResult, DomainError};
use crate::shared::pagination::{PageParams, PaginatedResult, SortOrder};

/// Generic service over one entity, running every call on the pool.
pub struct CrudService<E> {
    db: DatabaseConnection,
    mapper: Mapper<E>,
}

impl<E> Clone for CrudService<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            mapper: self.mapper,
        }
    }
}

impl<E> CrudService<E>
where
    E: RowEntity,
    E::Model: IntoActiveModel<E::ActiveModel> + Sync,
    E::ActiveModel: ActiveModelBehavior + Send,
{
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            mapper: Mapper::new(),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    pub fn mapper(&self) -> &Mapper<E> {
        &self.mapper
    }

    pub async fn save<A>(&self, data: A) -> AppResult<E::Model>
    where
        A: IntoActiveModel<E::ActiveModel>,
    {
        Ok(self.mapper.insert(&self.db, data).await?)
    }

    pub async fn save_batch<A, I>(&self, rows: I) -> AppResult<u64>
    where
        A: IntoActiveModel<E::ActiveModel>,
        I: IntoIterator<Item = A>,
    {
        Ok(self.mapper.insert_batch(&self.db, rows).await?)
    }

    pub async fn get_by_id(&self, id: i64) -> AppResult<Option<E::Model>> {
        Ok(self.mapper.select_by_id(&self.db, id).await?)
    }

    pub async fn get_by_ids(&self, ids: &[i64]) -> AppResult<Vec<E::Model>> {
        Ok(self
            .mapper
            .select_by_ids(&self.db, ids, DEFAULT_BATCH_SIZE)
            .await?)
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(self.mapper.select_count(&self.db).await?)
    }

    pub async fn list(
        &self,
        page: u64,
        size: u64,
        query: Option<Select<E>>,
    ) -> AppResult<Vec<E::Model>> {
        Ok(self.mapper.select_list(&self.db, page, size, query).await?)
    }

    pub async fn list_ordered(
        &self,
        page: u64,
        size: u64,
        query: Option<Select<E>>,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> AppResult<Vec<E::Model>> {
        Ok(self
            .mapper
            .select_list_ordered(&self.db, page, size, query, order_by, sort_order)
            .await?)
    }

    pub async fn list_page(
        &self,
        params: PageParams,
        query: Option<Select<E>>,
    ) -> AppResult<PaginatedResult<E::Model>> {
        Ok(self.mapper.select_list_page(&self.db, params, query).await?)
    }

    pub async fn list_page_ordered(
        &self,
        params: PageParams,
        query: Option<Select<E>>,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> AppResult<PaginatedResult<E::Model>> {
        Ok(self
            .mapper
            .select_list_page_ordered(&self.db, params, query, order_by, sort_order)
            .await?)
    }

    /// Returns 0 when the row does not exist.
    pub async fn update_by_id(&self, data: E::ActiveModel) -> AppResult<u64> {
        Ok(self.mapper.update_by_id(&self.db, data).await?)
    }

    pub async fn update_batch_by_ids(&self, rows: Vec<E::ActiveModel>) -> AppResult<u64> {
        Ok(self.mapper.update_batch_by_ids(&self.db, rows).await?)
    }

    /// A missing row surfaces as [`DomainError::NotFound`].
    pub async fn remove_by_id(&self, id: i64) -> AppResult<u64> {
        match self.mapper.delete_by_id(&self.db, id).await {
            Ok(deleted) => Ok(deleted),
            Err(DbErr::RecordNotFound(_)) => {
                Err(DomainError::not_found(E::TABLE, id).into())
            }
            Err(err) => Err(err.into()),
        }
    }

    pub async fn remove_batch_by_ids(&self, ids: &[i64]) -> AppResult<u64> {
        Ok(self.mapper.delete_batch_by_ids(&self.db, ids).await?)
    }
}
