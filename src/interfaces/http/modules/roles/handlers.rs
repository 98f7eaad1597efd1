use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::application::RoleService;
use crate::domain::role::{RoleCreateCmd, RoleQuery, RoleUpdateCmd};
use crate::interfaces::http::common::{AffectedRows, ApiResponse, ListParams, ValidatedJson};
use crate::shared::errors::{AppError, DomainError};
use crate::shared::pagination::PaginatedResult;

#[derive(Clone)]
pub struct RoleHandlerState {
    pub role_service: Arc<RoleService>,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, AppError>;

#[utoipa::path(
    get,
    path = "/v1/role",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(ListParams),
    responses((status = 200, description = "Roles with totals", body = ApiResponse<PaginatedResult<RoleQuery>>))
)]
pub async fn list_roles(
    State(state): State<RoleHandlerState>,
    Query(params): Query<ListParams>,
) -> ApiResult<PaginatedResult<RoleQuery>> {
    let page = state
        .role_service
        .list_role(
            params.page_params(),
            params.order_by.as_deref(),
            params.sort_order,
        )
        .await?;
    Ok(Json(ApiResponse::success(page)))
}

#[utoipa::path(
    post,
    path = "/v1/role",
    tag = "Roles",
    security(("bearer_auth" = [])),
    request_body = RoleCreateCmd,
    responses(
        (status = 200, description = "Role created", body = ApiResponse<RoleQuery>),
        (status = 409, description = "Role code already exists")
    )
)]
pub async fn create_role(
    State(state): State<RoleHandlerState>,
    ValidatedJson(cmd): ValidatedJson<RoleCreateCmd>,
) -> ApiResult<RoleQuery> {
    let role = state.role_service.create_role(cmd).await?;
    Ok(Json(ApiResponse::success(role)))
}

#[utoipa::path(
    get,
    path = "/v1/role/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role details", body = ApiResponse<RoleQuery>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<RoleQuery> {
    let role = state
        .role_service
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("system_role", id))?;
    Ok(Json(ApiResponse::success(role)))
}

#[utoipa::path(
    put,
    path = "/v1/role/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Role ID")),
    request_body = RoleUpdateCmd,
    responses(
        (status = 200, description = "Role updated", body = ApiResponse<AffectedRows>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<i64>,
    ValidatedJson(cmd): ValidatedJson<RoleUpdateCmd>,
) -> ApiResult<AffectedRows> {
    let affected = state.role_service.update_role(id, cmd).await?;
    if affected == 0 {
        return Err(DomainError::not_found("system_role", id).into());
    }
    Ok(Json(ApiResponse::success(AffectedRows { affected })))
}

#[utoipa::path(
    delete,
    path = "/v1/role/{id}",
    tag = "Roles",
    security(("bearer_auth" = [])),
    params(("id" = i64, Path, description = "Role ID")),
    responses(
        (status = 200, description = "Role removed", body = ApiResponse<AffectedRows>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_role(
    State(state): State<RoleHandlerState>,
    Path(id): Path<i64>,
) -> ApiResult<AffectedRows> {
    let affected = state.role_service.remove_role(id).await?;
    Ok(Json(ApiResponse::success(AffectedRows { affected })))
}
