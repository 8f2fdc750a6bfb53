pub mod config;

use axum::middleware::from_fn_with_state;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use stucode_api::middleware::require_auth;
use stucode_api::state::AppState;
use stucode_api::{accounts, articles, auth, likes, users};

/// Assemble the application router under the /v1 prefix.
///
/// Registration and login are mounted under both /user and /auth; the
/// console drives the former, older clients the latter.
pub fn app(state: AppState) -> Router {
    let public = Router::new()
        .route("/user/register", post(auth::register))
        .route("/auth/register", post(auth::register))
        .route("/user/login", post(auth::login))
        .route("/auth/login", post(auth::login))
        .route("/user", get(users::list_users))
        .route(
            "/article",
            post(articles::create_article).get(articles::list_articles),
        )
        .route(
            "/article/{id}",
            get(articles::get_article)
                .put(articles::update_article)
                .delete(articles::delete_article),
        )
        .route("/like/user/{user_id}", get(likes::list_by_user))
        .route(
            "/like/{article_id}",
            post(likes::create_like)
                .get(likes::list_by_article)
                .delete(likes::delete_like),
        )
        .route(
            "/account/{id}",
            get(accounts::get_account).delete(accounts::delete_account),
        )
        .with_state(state.clone());

    let protected = Router::new()
        .route(
            "/user/{id}",
            get(users::get_user)
                .put(users::update_user)
                .delete(users::delete_user),
        )
        .layer(from_fn_with_state(state.clone(), require_auth))
        .with_state(state);

    Router::new()
        .nest("/v1", public.merge(protected))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
