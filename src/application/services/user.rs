//! User management service
//!
//! Registration, login and session tokens, listing, updates, Excel import
//! and export, and role assignment. HTTP handlers stay thin and delegate
//! here.

use std::collections::HashSet;

use sea_orm::{DatabaseConnection, DbErr, Set, SqlErr, TransactionTrait};
use tracing::{info, warn};

use super::crud::CrudService;
use crate::domain::role::RoleQuery;
use crate::domain::user::{
    user_cache_key, LoginCmd, NewUser, UserCreateCmd, UserExport, UserImport, UserQuery,
    UserUpdateCmd,
};
use crate::domain::Token;
use crate::infrastructure::cache::SharedCache;
use crate::infrastructure::crypto::{
    create_token, hash_password_with_cost, verify_password, verify_token, JwtConfig, TokenType,
};
use crate::infrastructure::database::entities::user;
use crate::infrastructure::database::entities::user_role::NewUserRole;
use crate::infrastructure::database::mapper::{
    RoleMapper, UserMapper, UserRoleMapper, DEFAULT_BATCH_SIZE,
};
use crate::infrastructure::excel::{self, write_workbook};
use crate::shared::errors::{AppError, AppResult, DomainError, InfraError};
use crate::shared::pagination::{PageParams, PaginatedResult, SortOrder};

const ENTITY: &str = "system_user";

#[derive(Clone)]
pub struct UserService {
    base: CrudService<user::Entity>,
    user_roles: UserRoleMapper,
    roles: RoleMapper,
    cache: SharedCache,
    jwt_config: JwtConfig,
    bcrypt_cost: u32,
}

impl UserService {
    pub fn new(
        db: DatabaseConnection,
        cache: SharedCache,
        jwt_config: JwtConfig,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            base: CrudService::new(db),
            user_roles: UserRoleMapper::new(),
            roles: RoleMapper::new(),
            cache,
            jwt_config,
            bcrypt_cost,
        }
    }

    /// Generic CRUD over `system_user`.
    pub fn base(&self) -> &CrudService<user::Entity> {
        &self.base
    }

    fn db(&self) -> &DatabaseConnection {
        self.base.db()
    }

    fn users(&self) -> &UserMapper {
        self.base.mapper()
    }

    fn hash(&self, password: &str) -> Result<String, InfraError> {
        hash_password_with_cost(password, self.bcrypt_cost)
            .map_err(|e| InfraError::Crypto(format!("Failed to hash password: {e}")))
    }

    // ── Queries ─────────────────────────────────────────────────

    pub async fn find_by_id(&self, id: i64) -> AppResult<Option<UserQuery>> {
        Ok(self.base.get_by_id(id).await?.map(UserQuery::from))
    }

    pub async fn list_user(
        &self,
        page: u64,
        size: u64,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> AppResult<Vec<UserQuery>> {
        let rows = self
            .base
            .list_ordered(page, size, None, order_by, sort_order)
            .await?;
        Ok(rows.into_iter().map(UserQuery::from).collect())
    }

    pub async fn list_user_page(
        &self,
        params: PageParams,
        order_by: Option<&str>,
        sort_order: SortOrder,
    ) -> AppResult<PaginatedResult<UserQuery>> {
        let page = self
            .base
            .list_page_ordered(params, None, order_by, sort_order)
            .await?;
        Ok(page.map(UserQuery::from))
    }

    // ── Registration ────────────────────────────────────────────

    /// Create a user. An existing username is rejected before anything is
    /// written.
    pub async fn register(&self, cmd: UserCreateCmd) -> AppResult<UserQuery> {
        let password_hash = self.hash(&cmd.password)?;

        let txn = self.db().begin().await?;
        if self
            .users()
            .get_user_by_username(&txn, &cmd.username)
            .await?
            .is_some()
        {
            return Err(DomainError::UsernameExists(vec![cmd.username]).into());
        }

        let new_user = NewUser {
            username: cmd.username.clone(),
            password_hash,
            nickname: cmd.nickname,
        };
        let row = self
            .users()
            .insert(&txn, new_user)
            .await
            .map_err(|err| unique_violation_as(err, || vec![cmd.username.clone()]))?;
        txn.commit().await?;

        info!(user_id = row.id, username = %row.username, "New user registered");
        Ok(row.into())
    }

    /// Register the configured administrator when the user table is empty.
    pub async fn create_default_admin(
        &self,
        username: &str,
        password: &str,
        nickname: &str,
    ) -> AppResult<Option<UserQuery>> {
        if self.base.count().await? > 0 {
            return Ok(None);
        }
        let admin = self
            .register(UserCreateCmd {
                username: username.to_string(),
                password: password.to_string(),
                nickname: (!nickname.is_empty()).then(|| nickname.to_string()),
            })
            .await?;
        warn!(username = %admin.username, "Created default administrator, change its password");
        Ok(Some(admin))
    }

    // ── Authentication ──────────────────────────────────────────

    /// Check credentials and open a session. Failures never touch the cache.
    pub async fn login(&self, cmd: LoginCmd) -> AppResult<Token> {
        let Some(user) = self
            .users()
            .get_user_by_username(self.db(), &cmd.username)
            .await?
        else {
            return Err(DomainError::AuthFailed.into());
        };

        let valid = verify_password(&cmd.password, &user.password).unwrap_or(false);
        if !valid {
            warn!(username = %cmd.username, "Login rejected: wrong password");
            return Err(DomainError::AuthFailed.into());
        }

        let token = self.open_session(user.id).await?;
        info!(user_id = user.id, "User logged in");
        Ok(token)
    }

    /// Exchange a refresh token for a new token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> AppResult<Token> {
        let claims = verify_token(refresh_token, TokenType::Refresh, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| DomainError::Unauthorized(e.to_string()))?;

        if self.base.get_by_id(user_id).await?.is_none() {
            return Err(DomainError::Unauthorized("user no longer exists".into()).into());
        }
        self.open_session(user_id).await
    }

    pub async fn logout(&self, user_id: i64) -> AppResult<()> {
        self.cache.delete(&user_cache_key(user_id)).await?;
        info!(user_id, "User logged out");
        Ok(())
    }

    /// Resolve a bearer access token to its user id. The token must be the
    /// one currently cached for that user.
    pub async fn authenticate(&self, access_token: &str) -> AppResult<i64> {
        let claims = verify_token(access_token, TokenType::Access, &self.jwt_config)
            .map_err(|e| DomainError::Unauthorized(e.to_string()))?;
        let user_id = claims
            .user_id()
            .map_err(|e| DomainError::Unauthorized(e.to_string()))?;

        match self.cache.get(&user_cache_key(user_id)).await? {
            Some(current) if current == access_token => Ok(user_id),
            _ => Err(DomainError::Unauthorized("session expired or logged out".into()).into()),
        }
    }

    async fn open_session(&self, user_id: i64) -> AppResult<Token> {
        let access_ttl = self.jwt_config.access_lifetime();
        let refresh_ttl = self.jwt_config.refresh_lifetime();

        let access_token = create_token(user_id, TokenType::Access, access_ttl, &self.jwt_config)
            .map_err(|e| InfraError::Crypto(format!("Failed to create token: {e}")))?;
        let refresh_token =
            create_token(user_id, TokenType::Refresh, refresh_ttl, &self.jwt_config)
                .map_err(|e| InfraError::Crypto(format!("Failed to create token: {e}")))?;

        self.cache
            .set(&user_cache_key(user_id), &access_token, access_ttl)
            .await?;

        Ok(Token {
            access_token,
            expired_at: access_ttl.as_secs() as i64,
            token_type: Token::BEARER.to_string(),
            refresh_token,
            re_expired_at: refresh_ttl.as_secs() as i64,
        })
    }

    // ── Mutations ───────────────────────────────────────────────

    /// Change nickname and/or password. Returns 0 when the user is absent.
    pub async fn update_user(&self, id: i64, cmd: UserUpdateCmd) -> AppResult<u64> {
        let mut changes = user::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(nickname) = cmd.nickname {
            changes.nickname = Set(Some(nickname));
        }
        if let Some(password) = cmd.password {
            changes.password = Set(self.hash(&password)?);
        }
        self.base.update_by_id(changes).await
    }

    /// Delete a user together with its role links.
    pub async fn remove_user(&self, id: i64) -> AppResult<u64> {
        let txn = self.db().begin().await?;
        self.user_roles.delete_by_user_id(&txn, id).await?;
        let deleted = match self.users().delete_by_id(&txn, id).await {
            Ok(deleted) => deleted,
            Err(DbErr::RecordNotFound(_)) => return Err(DomainError::not_found(ENTITY, id).into()),
            Err(err) => return Err(err.into()),
        };
        txn.commit().await?;

        self.cache.delete(&user_cache_key(id)).await?;
        info!(user_id = id, "User removed");
        Ok(deleted)
    }

    // ── Excel ───────────────────────────────────────────────────

    /// Import users from the first worksheet of an `.xlsx` file. The batch
    /// is all-or-nothing: any username that already exists, or repeats in
    /// the file, rejects every row.
    pub async fn import_user(&self, bytes: &[u8]) -> AppResult<u64> {
        let records = excel::read_records(bytes)?;

        let mut rows = Vec::with_capacity(records.len());
        let mut seen = HashSet::new();
        let mut repeated = Vec::new();
        for record in &records {
            let row = UserImport::from_record(&record.fields, record.row as usize)?;
            if !seen.insert(row.username.clone()) && !repeated.contains(&row.username) {
                repeated.push(row.username.clone());
            }
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(DomainError::Validation("import file contains no users".into()).into());
        }
        if !repeated.is_empty() {
            return Err(DomainError::UsernameExists(repeated).into());
        }

        let mut new_users = Vec::with_capacity(rows.len());
        for row in rows {
            new_users.push(NewUser {
                password_hash: self.hash(&row.password)?,
                username: row.username,
                nickname: row.nickname,
            });
        }
        let usernames: Vec<String> = new_users.iter().map(|u| u.username.clone()).collect();

        let txn = self.db().begin().await?;
        let existing = self.users().get_user_by_usernames(&txn, &usernames).await?;
        if !existing.is_empty() {
            let taken: HashSet<String> = existing.into_iter().map(|u| u.username).collect();
            let collisions = usernames
                .into_iter()
                .filter(|name| taken.contains(name))
                .collect();
            return Err(DomainError::UsernameExists(collisions).into());
        }

        let imported = self
            .users()
            .insert_batch(&txn, new_users)
            .await
            .map_err(|err| unique_violation_as(err, Vec::new))?;
        txn.commit().await?;

        info!(imported, "Users imported");
        Ok(imported)
    }

    /// One page of users rendered as a workbook.
    pub async fn export_user(&self, params: PageParams) -> AppResult<Vec<u8>> {
        let page = self.base.list_page(params, None).await?;
        let rows: Vec<UserExport> = page
            .items
            .into_iter()
            .map(|row| UserExport::from(UserQuery::from(row)))
            .collect();
        Ok(write_workbook("user", &rows)?)
    }

    /// Header-only workbook matching the import layout.
    pub fn export_user_template(&self) -> AppResult<Vec<u8>> {
        Ok(write_workbook::<UserImport>("user_template", &[])?)
    }

    // ── Roles ───────────────────────────────────────────────────

    pub async fn list_user_roles(&self, user_id: i64) -> AppResult<Vec<RoleQuery>> {
        self.require_user(user_id).await?;
        let role_ids: Vec<i64> = self
            .user_roles
            .select_by_user_id(self.db(), user_id)
            .await?
            .into_iter()
            .map(|link| link.role_id)
            .collect();

        let mut roles = self
            .roles
            .select_by_ids(self.db(), &role_ids, DEFAULT_BATCH_SIZE)
            .await?;
        roles.sort_by_key(|role| role.id);
        Ok(roles.into_iter().map(RoleQuery::from).collect())
    }

    /// Replace the user's roles with `role_ids`. Unknown role ids are
    /// rejected before any link changes.
    pub async fn assign_roles(&self, user_id: i64, role_ids: Vec<i64>) -> AppResult<Vec<RoleQuery>> {
        self.require_user(user_id).await?;

        let mut wanted = role_ids;
        wanted.sort_unstable();
        wanted.dedup();

        let roles = self
            .roles
            .select_by_ids(self.db(), &wanted, DEFAULT_BATCH_SIZE)
            .await?;
        if let Some(missing) = wanted
            .iter()
            .find(|id| !roles.iter().any(|role| role.id == **id))
        {
            return Err(DomainError::not_found("system_role", *missing).into());
        }

        let txn = self.db().begin().await?;
        self.user_roles.delete_by_user_id(&txn, user_id).await?;
        self.user_roles
            .insert_batch(
                &txn,
                wanted
                    .iter()
                    .map(|&role_id| NewUserRole { user_id, role_id }),
            )
            .await?;
        txn.commit().await?;

        info!(user_id, roles = ?wanted, "User roles assigned");
        self.list_user_roles(user_id).await
    }

    async fn require_user(&self, user_id: i64) -> AppResult<()> {
        match self.base.get_by_id(user_id).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found(ENTITY, user_id).into()),
        }
    }

    // ── Health ──────────────────────────────────────────────────

    /// Exercise read and delete paths on user 1 inside a transaction that is
    /// always rolled back.
    pub async fn check_readiness(&self) -> AppResult<()> {
        let txn = self.db().begin().await?;
        let probe = async {
            self.users().select_by_id(&txn, 1).await?;
            self.users().delete_batch_by_ids(&txn, &[1]).await?;
            self.users().select_by_id(&txn, 1).await?;
            Ok::<_, DbErr>(())
        }
        .await;
        txn.rollback().await?;
        Ok(probe?)
    }
}

/// A unique-index violation means a concurrent writer took the username.
fn unique_violation_as(err: DbErr, usernames: impl FnOnce() -> Vec<String>) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            DomainError::UsernameExists(usernames()).into()
        }
        _ => err.into(),
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::domain::role::RoleCreateCmd;
    use crate::infrastructure::cache::{Cache, InMemoryCache};
    use crate::infrastructure::database::entities::role;
    use crate::infrastructure::database::memory_database;
    use crate::infrastructure::excel::write_workbook;

    /// In-memory cache that remembers every `set` call.
    #[derive(Default)]
    struct RecordingCache {
        inner: InMemoryCache,
        sets: Mutex<Vec<(String, String, Duration)>>,
    }

    #[async_trait]
    impl Cache for RecordingCache {
        async fn get(&self, key: &str) -> Result<Option<String>, InfraError> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str, ttl: Duration) -> Result<(), InfraError> {
            self.sets
                .lock()
                .unwrap()
                .push((key.to_string(), value.to_string(), ttl));
            self.inner.set(key, value, ttl).await
        }

        async fn delete(&self, key: &str) -> Result<(), InfraError> {
            self.inner.delete(key).await
        }
    }

    fn jwt_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret".to_string(),
            issuer: "admin-service-test".to_string(),
            access_token_expire_minutes: 30,
            refresh_token_expire_minutes: 120,
        }
    }

    async fn service() -> (UserService, Arc<RecordingCache>) {
        let cache = Arc::new(RecordingCache::default());
        let service = UserService::new(memory_database().await, cache.clone(), jwt_config(), 4);
        (service, cache)
    }

    fn create_cmd(username: &str) -> UserCreateCmd {
        UserCreateCmd {
            username: username.to_string(),
            password: "secret123".to_string(),
            nickname: None,
        }
    }

    fn login_cmd(username: &str, password: &str) -> LoginCmd {
        LoginCmd {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn register_rejects_existing_username() {
        let (service, _) = service().await;
        service.register(create_cmd("alice")).await.unwrap();

        let err = service.register(create_cmd("alice")).await.unwrap_err();
        assert!(matches!(
            err,
            AppError::Domain(DomainError::UsernameExists(_))
        ));
        assert_eq!(service.base().count().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn registered_password_is_hashed() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();

        let row = service.base().get_by_id(user.id).await.unwrap().unwrap();
        assert_ne!(row.password, "secret123");
        assert!(verify_password("secret123", &row.password).unwrap());
    }

    #[tokio::test]
    async fn login_caches_access_token_for_its_lifetime() {
        let (service, cache) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();

        let token = service.login(login_cmd("alice", "secret123")).await.unwrap();

        assert_eq!(token.token_type, "bearer");
        assert_eq!(token.expired_at, 30 * 60);
        assert_eq!(token.re_expired_at, 120 * 60);
        let sets = cache.sets.lock().unwrap().clone();
        assert_eq!(
            sets,
            vec![(
                format!("user:{}", user.id),
                token.access_token.clone(),
                Duration::from_secs(30 * 60)
            )]
        );
        assert_eq!(service.authenticate(&token.access_token).await.unwrap(), user.id);
    }

    #[tokio::test]
    async fn wrong_password_fails_without_cache_write() {
        let (service, cache) = service().await;
        service.register(create_cmd("alice")).await.unwrap();

        let wrong = service.login(login_cmd("alice", "nope")).await.unwrap_err();
        let unknown = service.login(login_cmd("bob", "secret123")).await.unwrap_err();

        assert!(matches!(wrong, AppError::Domain(DomainError::AuthFailed)));
        assert!(matches!(unknown, AppError::Domain(DomainError::AuthFailed)));
        assert!(cache.sets.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn logout_invalidates_the_session() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();
        let token = service.login(login_cmd("alice", "secret123")).await.unwrap();

        service.logout(user.id).await.unwrap();

        let err = service.authenticate(&token.access_token).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn refresh_issues_a_new_session() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();
        let token = service.login(login_cmd("alice", "secret123")).await.unwrap();

        let refreshed = service.refresh_token(&token.refresh_token).await.unwrap();
        assert_eq!(service.authenticate(&refreshed.access_token).await.unwrap(), user.id);

        let err = service.refresh_token(&token.access_token).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::Unauthorized(_))));
    }

    #[tokio::test]
    async fn update_user_changes_only_given_fields() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();

        let updated = service
            .update_user(
                user.id,
                UserUpdateCmd {
                    nickname: Some("Al".to_string()),
                    password: None,
                },
            )
            .await
            .unwrap();
        assert_eq!(updated, 1);

        let found = service.find_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(found.nickname.as_deref(), Some("Al"));
        assert!(service.login(login_cmd("alice", "secret123")).await.is_ok());

        assert_eq!(service.update_user(999, UserUpdateCmd::default()).await.unwrap(), 0);
    }

    fn import_file(rows: &[(&str, &str)]) -> Vec<u8> {
        let rows: Vec<UserImport> = rows
            .iter()
            .map(|(username, password)| UserImport {
                username: username.to_string(),
                password: password.to_string(),
                nickname: None,
            })
            .collect();
        write_workbook("user", &rows).unwrap()
    }

    #[tokio::test]
    async fn import_inserts_every_row() {
        let (service, _) = service().await;
        let file = import_file(&[("alice", "secret1"), ("bob", "secret2")]);

        assert_eq!(service.import_user(&file).await.unwrap(), 2);
        assert!(service.login(login_cmd("bob", "secret2")).await.is_ok());
    }

    #[tokio::test]
    async fn import_with_collision_rejects_whole_batch() {
        let (service, _) = service().await;
        service.register(create_cmd("bob")).await.unwrap();
        service.register(create_cmd("dave")).await.unwrap();
        let file = import_file(&[
            ("alice", "secret1"),
            ("bob", "secret2"),
            ("carol", "secret3"),
            ("dave", "secret4"),
        ]);

        let err = service.import_user(&file).await.unwrap_err();

        assert_eq!(err.to_string(), "Username already exists,bob,dave");
        assert_eq!(service.base().count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn import_rejects_repeated_names_in_file() {
        let (service, _) = service().await;
        let file = import_file(&[("alice", "secret1"), ("alice", "secret2")]);

        let err = service.import_user(&file).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::UsernameExists(_))));
        assert_eq!(service.base().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn import_errors_name_the_sheet_row() {
        let (service, _) = service().await;
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "username").unwrap();
        sheet.write_string(0, 1, "password").unwrap();
        sheet.write_string(1, 0, "alice").unwrap();
        sheet.write_string(1, 1, "secret1").unwrap();
        sheet.write_string(3, 0, "bob").unwrap();
        let file = workbook.save_to_buffer().unwrap();

        let err = service.import_user(&file).await.unwrap_err();
        assert_eq!(err.to_string(), "Parameter error: row 4: password is required");
        assert_eq!(service.base().count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn export_renders_users() {
        let (service, _) = service().await;
        service.register(create_cmd("alice")).await.unwrap();

        let bytes = service.export_user(PageParams::default()).await.unwrap();
        let records = excel::read_records(&bytes).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].fields["username"], "alice");
        assert!(!records[0].fields.contains_key("password"));

        let template = service.export_user_template().unwrap();
        assert!(excel::read_records(&template).unwrap().is_empty());
    }

    #[tokio::test]
    async fn assign_and_remove_roles() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();
        let roles = CrudService::<role::Entity>::new(service.db().clone());
        let admin = roles
            .save(RoleCreateCmd {
                role_name: "Admin".to_string(),
                role_code: "admin".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let assigned = service
            .assign_roles(user.id, vec![admin.id, admin.id])
            .await
            .unwrap();
        assert_eq!(assigned.len(), 1);
        assert_eq!(assigned[0].role_code, "admin");

        let err = service.assign_roles(user.id, vec![999]).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
        assert_eq!(service.list_user_roles(user.id).await.unwrap().len(), 1);

        assert_eq!(service.remove_user(user.id).await.unwrap(), 1);
        let err = service.remove_user(user.id).await.unwrap_err();
        assert!(matches!(err, AppError::Domain(DomainError::NotFound { .. })));
    }

    #[tokio::test]
    async fn readiness_leaves_data_untouched() {
        let (service, _) = service().await;
        let user = service.register(create_cmd("alice")).await.unwrap();
        assert_eq!(user.id, 1);

        service.check_readiness().await.unwrap();

        assert!(service.find_by_id(1).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn readiness_fails_without_user_table() {
        use sea_orm::ConnectionTrait;

        let (service, _) = service().await;
        service.db().execute_unprepared("DROP TABLE system_user_role").await.unwrap();
        service.db().execute_unprepared("DROP TABLE system_user").await.unwrap();

        let err = service.check_readiness().await.unwrap_err();
        assert!(matches!(err, AppError::Infra(InfraError::Database(_))));
    }

    #[tokio::test]
    async fn default_admin_only_on_empty_table() {
        let (service, _) = service().await;
        let admin = service
            .create_default_admin("admin", "admin123", "Administrator")
            .await
            .unwrap();
        assert!(admin.is_some());
        assert!(service
            .create_default_admin("admin", "admin123", "Administrator")
            .await
            .unwrap()
            .is_none());
    }
}
