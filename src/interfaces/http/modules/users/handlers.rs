//! User API handlers
//!
//! Thin wrappers delegating to `UserService`.

use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Extension, Json,
};

use super::dto::{AssignRolesRequest, ExportParams, ImportForm, ImportResult, RefreshRequest};
use crate::application::UserService;
use crate::domain::role::RoleQuery;
use crate::domain::user::{LoginCmd, UserCreateCmd, UserQuery, UserUpdateCmd};
use crate::domain::Token;
use crate::interfaces::http::common::{AffectedRows, ApiResponse, ListParams, ValidatedJson};
use crate::interfaces::http::middleware::AuthenticatedUser;
use crate::shared::errors::{AppError, DomainError, ResponseCode};
use crate::shared::pagination::PaginatedResult;

const XLSX_CONTENT_TYPE: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const IMPORT_FIELD: &str = "file";

#[derive(Clone)]
pub struct UserHandlerState {
    pub user_service: Arc<UserService>,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

fn xlsx_attachment(file_name: &str, bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{file_name}.xlsx\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

// ── Authentication ──────────────────────────────────────────────

#[utoipa::path(
    post,
    path = "/v1/user/login",
    tag = "Users",
    request_body = LoginCmd,
    responses(
        (status = 200, description = "Token pair", body = ApiResponse<Token>),
        (status = 401, description = "Username or password error")
    )
)]
pub async fn login(
    State(state): State<UserHandlerState>,
    ValidatedJson(cmd): ValidatedJson<LoginCmd>,
) -> ApiResult<Token> {
    let token = state.user_service.login(cmd).await?;
    Ok(Json(ApiResponse::success(token)))
}

#[utoipa::path(
    post,
    path = "/v1/user/register",
    tag = "Users",
    request_body = UserCreateCmd,
    responses(
        (status = 200, description = "User created", body = ApiResponse<UserQuery>),
        (status = 409, description = "Username already exists")
    )
)]
pub async fn register(
    State(state): State<UserHandlerState>,
    ValidatedJson(cmd): ValidatedJson<UserCreateCmd>,
) -> ApiResult<UserQuery> {
    let user = state.user_service.register(cmd).await?;
    Ok(Json(ApiResponse::success(user)))
}

#[utoipa::path(
    post,
    path = "/v1/user/refresh",
    tag = "Users",
    request_body = RefreshRequest,
    responses(
        (status = 200, description = "New token pair", body = ApiResponse<Token>),
        (status = 401, description = "Invalid refresh token")
    )
)]
pub async fn refresh(
    State(state): State<UserHandlerState>,
    ValidatedJson(body): ValidatedJson<RefreshRequest>,
) -> ApiResult<Token> {
    let token = state.user_service.refresh_token(&body.refresh_token).await?;
    Ok(Json(ApiResponse::success(token)))
}

#[utoipa::path(
    post,
    path = "/v1/user/logout",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Session closed"))
)]
pub async fn logout(
    State(state): State<UserHandlerState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> ApiResult<()> {
    state.user_service.logout(user.user_id).await?;
    Ok(Json(ApiResponse::from_code(ResponseCode::Success)))
}

// ── Queries ─────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/v1/user/users",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "One page of users", body = ApiResponse<Vec<UserQuery>>))
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListParams>,
) -> ApiResult<Vec<UserQuery>> {
    let users = state
        .user_service
        .list_user(
            params.page,
            params.size,
            params.order_by.as_deref(),
            params.sort_order,
        )
        .await?;
    Ok(Json(ApiResponse::success(users)))
}

#[utoipa::path(
    get,
    path = "/v1/user/page",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Users with totals", body = ApiResponse<PaginatedResult<UserQuery>>))
)]
pub async fn page_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResult<UserQuery>> {
    let page = state
        .user_service
        .list_user_page(
            params.page_params(),
            params.order_by.as_deref(),
            params.sort_order,
        )
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

#[utoipa::path(
    get,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<UserQuery>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<UserQuery> {
    match state.user_service.find_by_id(id).await? {
        Some(user) => Ok(Json(ApiResponse::success(user))),
        None => Err(DomainError::not_found("system_user", id).into()),
    }
}

// ── Mutations ───────────────────────────────────────────────────

#[utoipa::path(
    put,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = UserUpdateCmd,
    responses(
        (status = 200, description = "User updated", body = ApiResponse<AffectedRows>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(cmd): ValidatedJson<UserUpdateCmd>,
) -> ApiResult<AffectedRows> {
    let affected = state.user_service.update_user(id, cmd).await?;
    if affected == 0 {
        return Err(DomainError::not_found("system_user", id).into());
    }
    Ok(Json(ApiResponse::success(AffectedRows { affected })))
}

#[utoipa::path(
    delete,
    path = "/v1/user/{id}",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses(
        (status = 200, description = "User removed", body = ApiResponse<AffectedRows>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<AffectedRows> {
    let affected = state.user_service.remove_user(id).await?;
    Ok(Json(ApiResponse::success(AffectedRows { affected })))
}

// ── Roles ───────────────────────────────────────────────────────

#[utoipa::path(
    get,
    path = "/v1/user/{id}/roles",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    responses((status = 200, description = "Roles of the user", body = ApiResponse<Vec<RoleQuery>>))
)]
pub async fn get_user_roles(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<Vec<RoleQuery>> {
    let roles = state.user_service.list_user_roles(id).await?;
    Ok(Json(ApiResponse::success(roles)))
}

#[utoipa::path(
    put,
    path = "/v1/user/{id}/roles",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "User ID")),
    request_body = AssignRolesRequest,
    responses(
        (status = 200, description = "Roles replaced", body = ApiResponse<Vec<RoleQuery>>),
        (status = 404, description = "Unknown user or role")
    )
)]
pub async fn assign_user_roles(
    State(state): State<UserHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(body): ValidatedJson<AssignRolesRequest>,
) -> ApiResult<Vec<RoleQuery>> {
    let roles = state.user_service.assign_roles(id, body.role_ids).await?;
    Ok(Json(ApiResponse::success(roles)))
}

// ── Excel ───────────────────────────────────────────────────────

/// Upload an `.xlsx` file in the multipart field `file`.
#[utoipa::path(
    post,
    path = "/v1/user/import",
    tag = "Users",
    security(("bearer_auth" = [])),
    request_body(content = ImportForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Users imported", body = ApiResponse<ImportResult>),
        (status = 409, description = "Some usernames already exist")
    )
)]
pub async fn import_users(
    State(state): State<UserHandlerState>,
    mut multipart: Multipart,
) -> ApiResult<ImportResult> {
    let mut file = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| DomainError::Validation(e.body_text()))?
    {
        if field.name() == Some(IMPORT_FIELD) {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| DomainError::Validation(e.body_text()))?;
            file = Some(bytes);
            break;
        }
    }
    let Some(file) = file else {
        return Err(DomainError::Validation(format!("multipart field `{IMPORT_FIELD}` is required")).into());
    };

    let imported = state.user_service.import_user(&file).await?;
    Ok(Json(ApiResponse::success(ImportResult { imported })))
}

#[utoipa::path(
    get,
    path = "/v1/user/export",
    tag = "Users",
    security(("bearer_auth" = [])),
    params(ExportParams),
    responses((status = 200, description = "Workbook `user.xlsx`"))
)]
pub async fn export_users(
    State(state): State<UserHandlerState>,
    Query(params): Query<ExportParams>,
) -> Result<Response, AppError> {
    let bytes = state.user_service.export_user((&params).into()).await?;
    Ok(xlsx_attachment("user", bytes))
}

#[utoipa::path(
    get,
    path = "/v1/user/export-template",
    tag = "Users",
    security(("bearer_auth" = [])),
    responses((status = 200, description = "Header-only workbook `user_template.xlsx`"))
)]
pub async fn export_template(State(state): State<UserHandlerState>) -> Result<Response, AppError> {
    let bytes = state.user_service.export_user_template()?;
    Ok(xlsx_attachment("user_template", bytes))
}
