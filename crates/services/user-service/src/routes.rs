//! Route configuration.
//!
//! Routes are declared as an explicit `(path, method router)` table and
//! folded into the router. Entries sharing a path are merged by method.

use axum::{
    routing::{delete, get, post, put, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::config::ApiVariant;
use crate::handlers::{
    add_user, count_users, delete_all_users, delete_user, get_user, list_users, update_user,
};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Documentation paths have two segments so they never shadow `/:login`
pub const SWAGGER_UI_PATH: &str = "/_docs/swagger-ui";
pub const OPENAPI_JSON_PATH: &str = "/_docs/openapi.json";

/// Route table for the given variant.
pub fn route_table(variant: ApiVariant) -> Vec<(&'static str, MethodRouter<AppState>)> {
    let mut table = vec![
        ("/count", get(count_users)),
        ("/", get(list_users)),
        ("/:login", get(get_user)),
        ("/", post(add_user)),
        ("/", delete(delete_all_users)),
    ];

    if variant.is_extended() {
        table.push(("/:login", put(update_user)));
        table.push(("/:login", delete(delete_user)));
    }

    table
}

/// Create user routes
pub fn user_routes(variant: ApiVariant) -> Router<AppState> {
    route_table(variant)
        .into_iter()
        .fold(Router::new(), |router, (path, handler)| router.route(path, handler))
}

/// Create the main router with all routes.
pub fn create_router(state: AppState, variant: ApiVariant) -> Router {
    user_routes(variant)
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_table_has_five_routes() {
        assert_eq!(route_table(ApiVariant::Base).len(), 5);
    }

    #[test]
    fn test_extended_table_adds_update_and_delete_by_login() {
        let table = route_table(ApiVariant::Extended);

        assert_eq!(table.len(), 7);
        assert_eq!(
            table.iter().filter(|(path, _)| *path == "/:login").count(),
            3
        );
    }
}
