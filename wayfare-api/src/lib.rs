use axum::{http::Method, Router};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod auth;
pub mod error;
pub mod flights;
pub mod health;
pub mod middleware;
pub mod pois;
pub mod prices;
pub mod reservations;
pub mod state;
pub mod users;
pub mod vehicles;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    // CORS Middleware
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    // Reservations and profile require a session; everything else is open.
    let protected = Router::new()
        .merge(reservations::routes())
        .merge(users::routes())
        .route_layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::customer_auth_middleware,
        ));

    Router::new()
        .merge(health::routes())
        .merge(prices::routes())
        .merge(auth::routes())
        .merge(flights::routes())
        .merge(pois::routes())
        .merge(vehicles::routes())
        .merge(protected)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
