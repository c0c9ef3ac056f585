use axum::{
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handlers::{auth, products, stores};
use crate::middleware::{
    authenticate, authorize, validate_body, validate_path, RoleGate, OWNER_ONLY, STORE_MEMBERS,
};
use crate::state::AppState;
use crate::validation::schemas;

/// Build the full application router. Guards compose per route in a fixed
/// order: authenticate, path-validate, authorize, body-validate, handler.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .merge(auth_routes())
        .merge(store_routes(&state))
        .merge(product_routes(&state))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/auth/register",
            post(auth::register).layer(from_fn_with_state(&schemas::CREDENTIALS, validate_body)),
        )
        .route(
            "/auth/login",
            post(auth::login).layer(from_fn_with_state(&schemas::CREDENTIALS, validate_body)),
        )
}

fn store_routes(state: &AppState) -> Router<AppState> {
    let owner = RoleGate::new(state.clone(), OWNER_ONLY);
    let member = RoleGate::new(state.clone(), STORE_MEMBERS);

    Router::new()
        .route("/stores", get(stores::list))
        .route(
            "/stores",
            post(stores::create).layer(from_fn_with_state(&schemas::CREATE_STORE, validate_body)),
        )
        .route(
            "/stores/:store_id",
            get(stores::get_by_id).layer(from_fn_with_state(member, authorize)),
        )
        .route(
            "/stores/:store_id",
            put(stores::update)
                .layer(from_fn_with_state(&schemas::UPDATE_STORE, validate_body))
                .layer(from_fn_with_state(owner.clone(), authorize)),
        )
        .route(
            "/stores/:store_id",
            delete(stores::delete).layer(from_fn_with_state(owner, authorize)),
        )
        .layer(axum::middleware::from_fn(validate_path))
        .layer(from_fn_with_state(state.clone(), authenticate))
}

fn product_routes(state: &AppState) -> Router<AppState> {
    let member = RoleGate::new(state.clone(), STORE_MEMBERS);

    Router::new()
        .route("/stores/:store_id/products", get(products::list))
        .route(
            "/stores/:store_id/products",
            post(products::create)
                .layer(from_fn_with_state(&schemas::CREATE_PRODUCT, validate_body)),
        )
        .route("/stores/:store_id/products/:id", get(products::get_by_id))
        .route(
            "/stores/:store_id/products/:id",
            put(products::update)
                .layer(from_fn_with_state(&schemas::UPDATE_PRODUCT, validate_body)),
        )
        .route("/stores/:store_id/products/:id", delete(products::delete))
        .layer(from_fn_with_state(member, authorize))
        .layer(axum::middleware::from_fn(validate_path))
        .layer(from_fn_with_state(state.clone(), authenticate))
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Hello World!" }))
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "OK" }))
}
