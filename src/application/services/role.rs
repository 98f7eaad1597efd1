//! Role management service

use sea_orm::{DatabaseConnection, DbErr, Set, SqlErr, TransactionTrait};
use tracing::info;

use super::crud::CrudService;
use crate::domain::role::{RoleCreateCmd, RoleQuery, RoleUpdateCmd};
use crate::infrastructure::database::entities::role;
use crate::infrastructure::database::mapper::{RoleMapper, UserRoleMapper};
use crate::shared::errors::{AppResult, DomainError};
use crate::shared::pagination::{PageParams, PaginatedResult, SortOrder};

#[derive(Clone)]
pub struct RoleService {
    base: CrudService<role::Entity>,
    user_roles: UserRoleMapper,
}

impl RoleService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            base: CrudService::new(db),
            user_roles: UserRoleMapper::new(),
        }
    }

    pub fn base(&self) -> &CrudService<role::Entity> {
        &self.base
    }

    fn roles(&self) -> &RoleMapper {
        self.base.mapper()
    }

    pub async fn create_role(&self, cmd: RoleCreateCmd) -> AppResult<RoleQuery> {
        let db = self.base.db();
        if self.roles().get_role_by_code(db, &cmd.role_code).await?.is_some() {
            return Err(DomainError::RoleCodeExists(cmd.role_code).into());
        }

        let code = cmd.role_code.clone();
        let row = match self.roles().insert(db, cmd).await {
            Ok(row) => row,
            Err(err) if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(DomainError::RoleCodeExists(code).into());
            }
            Err(err) => return Err(err.into()),
        };

        info!(role_id = row.id, role_code = %row.role_code, "Role created");
        Ok(row.into())
    }

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<RoleQuery>> {
        Ok(self.base.get_by_id(id).await?.map(RoleQuery::from))
    }

    pub async fn list_role(
        &self,
        params: PageParams,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> AppResult<PaginatedResult<RoleQuery>> {
        let page = self
            .base
            .list_page_ordered(params, None, order_by, sort_order)
            .await?;
        Ok(page.map(RoleQuery::from))
    }

    /// Returns 0 when the role is absent.
    pub async fn update_role(&self, id: i64, cmd: RoleUpdateCmd) -> AppResult<u64> {
        let mut changes = role::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(role_name) = cmd.role_name {
            changes.role_name = Set(role_name);
        }
        if let Some(description) = cmd.description {
            changes.description = Set(Some(description));
        }
        self.base.update_by_id(changes).await
    }

    /// Delete a role and unlink it from every user.
    pub async fn remove_role(&self, id: i64) -> AppResult<u64> {
        let txn = self.base.db().begin().await?;
        let unlinked = self.user_roles.delete_by_role_id(&txn, id).await?;
        let deleted = match self.roles().delete_by_id(&txn, id).await {
            Ok(deleted) => deleted,
            Err(DbErr::RecordNotFound(_)) => {
                return Err(DomainError::not_found("system_role", id).into())
            }
            Err(err) => return Err(err.into()),
        };
        txn.commit().await?;

        info!(role_id = id, unlinked, "Role removed");
        Ok(deleted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::memory_database;
    use crate::shared::errors::AppError;

    fn create_cmd(code: &str) -> RoleCreateCmd {
        RoleCreateCmd {
            role_name: code.to_uppercase(),
            role_code: code.to_string(),
            description: Some(format!("{code} role")),
        }
    }

    #[tokio::test]
    async fn duplicate_code_is_rejected() {
        let service = RoleService::new(memory_database().await);
        service.create_role(create_cmd("admin")).await.unwrap();

        let err = service.create_role(create_cmd("admin")).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::RoleCodeExists(code)) if code == "admin"
        ));
    }

    #[tokio::test]
    async fn update_and_list() {
        let service = RoleService::new(memory_database().await);
        let ops = service.create_role(create_cmd("ops")).await.unwrap();
        service.create_role(create_cmd("audit")).await.unwrap();

        let updated = service
            .update_role(
                ops.id,
                RoleUpdateCmd {
                    role_name: Some("Operators".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let found = service.find_by_id(ops.id).await.unwrap().unwrap();
        assert_eq!(found.role_name, "Operators");
        assert_eq!(found.role_code, "ops");
        assert_eq!(found.description.as_deref(), Some("ops role"));

        let page = service
            .list_role(PageParams::default(), Some("role_code"), SortOrder::Asc)
            .await
            .unwrap();
        let codes: Vec<_> = page.items.iter().map(|role| role.role_code.as_str()).collect();
        assert_eq!(codes, ["audit", "ops"]);
    }

    #[tokio::test]
    async fn remove_missing_role_is_not_found() {
        let service = RoleService::new(memory_database().await);
        let err = service.remove_role(3).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
    }
}
