use std::sync::Arc;
use std::time::Duration;

use auth::TokenIssuer;
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

use super::handlers::bulk_issue_certificates::bulk_issue_certificates;
use super::handlers::create_institution::create_institution;
use super::handlers::delete_institution::delete_institution;
use super::handlers::get_institution::get_institution;
use super::handlers::get_profile::get_profile;
use super::handlers::issue_certificate::issue_certificate;
use super::handlers::list_auth_logs::list_auth_logs;
use super::handlers::list_institutions::list_institutions;
use super::handlers::login::login;
use super::handlers::logout::logout;
use super::handlers::signup::signup;
use super::handlers::update_institution::update_institution;
use super::handlers::update_profile::update_profile;
use super::handlers::verify_certificate::verify_certificate;
use super::handlers::verify_email::verify_email;
use super::middleware::authenticate as auth_middleware;
use crate::domain::audit::ports::AuditLog;
use crate::domain::auth::ports::AuthServicePort;
use crate::domain::certificate::ports::CertificateServicePort;
use crate::domain::institution::ports::InstitutionServicePort;

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub institution_service: Arc<dyn InstitutionServicePort>,
    pub certificate_service: Arc<dyn CertificateServicePort>,
    pub audit_log: Arc<dyn AuditLog>,
    pub token_issuer: Arc<TokenIssuer>,
}

pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/auth/signup", post(signup))
        .route("/auth/login", post(login))
        .route("/auth/verify-email", post(verify_email))
        .route("/certificates/:certificate_id/verify", get(verify_certificate));

    let protected_routes = Router::new()
        .route("/auth/logout", post(logout))
        .route("/auth/me", get(get_profile))
        .route("/auth/profile", put(update_profile))
        .route("/auth/logs", get(list_auth_logs))
        .route("/institutions", post(create_institution))
        .route("/institutions", get(list_institutions))
        .route("/institutions/:institution_id", get(get_institution))
        .route("/institutions/:institution_id", put(update_institution))
        .route("/institutions/:institution_id", delete(delete_institution))
        .route("/certificates", post(issue_certificate))
        .route("/certificates/bulk", post(bulk_issue_certificates))
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
