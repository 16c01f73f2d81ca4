use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::delete;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::create_motor::create_motor;
use super::handlers::delete_account::delete_account;
use super::handlers::delete_motor::delete_motor;
use super::handlers::estimate_price::estimate_price;
use super::handlers::forgot_password::forgot_password;
use super::handlers::get_account::get_account;
use super::handlers::list_motors::list_motors;
use super::handlers::login::login;
use super::handlers::recognize_image::recognize_image;
use super::handlers::register::register;
use super::handlers::reset_password::reset_password;
use super::handlers::resolve_reset::resolve_reset;
use super::handlers::update_account::update_account;
use super::handlers::update_photo::update_photo;
use super::middleware::authenticate as auth_middleware;
use crate::domain::account::service::AccountService;
use crate::domain::clock::SystemClock;
use crate::domain::motor::service::MotorService;
use crate::domain::reset::service::ResetService;
use crate::outbound::email::SmtpResetMailer;
use crate::outbound::predict::HttpModelGateway;
use crate::outbound::repositories::PostgresAccountRepository;
use crate::outbound::repositories::PostgresMotorRepository;
use crate::outbound::repositories::PostgresResetTokenRepository;
use crate::outbound::storage::HttpObjectStore;

pub type SharedAccountService = AccountService<PostgresAccountRepository, HttpObjectStore>;
pub type SharedResetService = ResetService<
    PostgresResetTokenRepository,
    PostgresAccountRepository,
    SmtpResetMailer,
    SystemClock,
>;
pub type SharedMotorService = MotorService<PostgresMotorRepository>;

#[derive(Clone)]
pub struct AppState {
    pub account_service: Arc<SharedAccountService>,
    pub reset_service: Arc<SharedResetService>,
    pub motor_service: Arc<SharedMotorService>,
    pub authenticator: Arc<Authenticator>,
    pub model_gateway: Arc<HttpModelGateway>,
    pub object_store: Arc<HttpObjectStore>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/api/accounts", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/auth/forgot-password", post(forgot_password))
        .route(
            "/api/auth/reset-password/:token_id",
            get(resolve_reset).post(reset_password),
        );

    let protected_routes = Router::new()
        .route(
            "/api/accounts/me",
            get(get_account).patch(update_account).delete(delete_account),
        )
        .route("/api/accounts/me/photo", put(update_photo))
        .route("/api/motors", post(create_motor).get(list_motors))
        .route("/api/motors/:motor_id", delete(delete_motor))
        .route("/api/predictions/motor-image", post(recognize_image))
        .route("/api/predictions/motor-price", post(estimate_price))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
