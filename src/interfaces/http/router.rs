//! API Router with Swagger UI

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, FromRef},
    http::HeaderValue,
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::warn;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::{RoleService, UserService};
use crate::domain::role::{RoleCreateCmd, RoleQuery, RoleUpdateCmd};
use crate::domain::user::{LoginCmd, UserCreateCmd, UserQuery, UserUpdateCmd};
use crate::domain::Token;
use crate::interfaces::http::common::{AffectedRows, ApiResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::metrics::{
    http_metrics_middleware, prometheus_metrics, MetricsState,
};
use crate::interfaces::http::modules::probe::{self, ProbeState};
use crate::interfaces::http::modules::request_id::request_id_middleware;
use crate::interfaces::http::modules::roles::{self, RoleHandlerState};
use crate::interfaces::http::modules::users::{self, UserHandlerState};
use crate::shared::pagination::{PaginatedResult, SortOrder};

const IMPORT_BODY_LIMIT: usize = 10 * 1024 * 1024;

/// Everything the HTTP layer needs. Handlers pull their own slice via
/// `FromRef`.
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub role_service: Arc<RoleService>,
    pub metrics: PrometheusHandle,
}

impl FromRef<AppState> for UserHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for RoleHandlerState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            role_service: Arc::clone(&s.role_service),
        }
    }
}

impl FromRef<AppState> for ProbeState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for AuthState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            user_service: Arc::clone(&s.user_service),
        }
    }
}

impl FromRef<AppState> for MetricsState {
    fn from_ref(s: &AppState) -> Self {
        Self {
            handle: s.metrics.clone(),
        }
    }
}

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Access token returned by /v1/user/login"))
                        .build(),
                ),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        probe::liveness,
        probe::readiness,
        users::login,
        users::register,
        users::refresh,
        users::logout,
        users::list_users,
        users::page_users,
        users::get_user,
        users::update_user,
        users::delete_user,
        users::get_user_roles,
        users::assign_user_roles,
        users::import_users,
        users::export_users,
        users::export_template,
        roles::list_roles,
        roles::create_role,
        roles::get_role,
        roles::update_role,
        roles::delete_role,
    ),
    components(
        schemas(
            ApiResponse<String>,
            AffectedRows,
            SortOrder,
            Token,
            LoginCmd,
            UserCreateCmd,
            UserUpdateCmd,
            UserQuery,
            PaginatedResult<UserQuery>,
            RoleCreateCmd,
            RoleUpdateCmd,
            RoleQuery,
            PaginatedResult<RoleQuery>,
            users::RefreshRequest,
            users::AssignRolesRequest,
            users::ImportForm,
            users::ImportResult,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Probe", description = "Liveness and readiness probes"),
        (name = "Users", description = "Authentication, user management and Excel import/export"),
        (name = "Roles", description = "Role management"),
    ),
    info(
        title = "Admin Service API",
        description = "CRUD admin backend: users, roles and sessions",
    )
)]
pub struct ApiDoc;

fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if origins.is_empty() {
        return base.allow_origin(Any);
    }
    let parsed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(parsed)
}

/// Build the full HTTP surface. An empty `cors_origins` allows any origin.
pub fn create_api_router(state: AppState, cors_origins: &[String]) -> Router {
    let auth_state = AuthState::from_ref(&state);

    let public_routes = Router::new()
        .route("/v1/probe/liveness", get(probe::liveness))
        .route("/v1/probe/readiness", get(probe::readiness))
        .route("/v1/user/login", post(users::login))
        .route("/v1/user/register", post(users::register))
        .route("/v1/user/refresh", post(users::refresh))
        .route("/metrics", get(prometheus_metrics));

    let protected_routes = Router::new()
        .route("/v1/user/logout", post(users::logout))
        .route("/v1/user/users", get(users::list_users))
        .route("/v1/user/page", get(users::page_users))
        .route(
            "/v1/user/import",
            post(users::import_users).layer(DefaultBodyLimit::max(IMPORT_BODY_LIMIT)),
        )
        .route("/v1/user/export", get(users::export_users))
        .route("/v1/user/export-template", get(users::export_template))
        .route(
            "/v1/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .route(
            "/v1/user/{id}/roles",
            get(users::get_user_roles).put(users::assign_user_roles),
        )
        .route("/v1/role", get(roles::list_roles).post(roles::create_role))
        .route(
            "/v1/role/{id}",
            get(roles::get_role)
                .put(roles::update_role)
                .delete(roles::delete_role),
        )
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let swagger_routes =
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(middleware::from_fn(http_metrics_middleware))
        .with_state(state)
        .merge(swagger_routes)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(cors_origins))
        .layer(TraceLayer::new_for_http())
}
