//! HTTP routes.

use std::sync::Arc;

use authn_provider::{
    AuthnProviderConfig, BasicAuthState, ProviderManager, RestAuthenticationProvider, Service,
    basic_auth_middleware,
};
use authn_provider_sdk::IdentityToken;
use axum::extract::Request;
use axum::middleware::from_fn_with_state;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use static_authn_plugin::StaticAuthNPlugin;

/// Body of `GET /api/status`.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub authenticated: bool,
    pub email: Option<String>,
    pub authorities: Vec<String>,
}

async fn status(req: Request) -> Json<StatusResponse> {
    let body = match req.extensions().get::<IdentityToken>() {
        Some(token) => StatusResponse {
            authenticated: true,
            email: Some(token.principal().to_owned()),
            authorities: token
                .authorities()
                .iter()
                .map(|a| a.as_str().to_owned())
                .collect(),
        },
        None => StatusResponse {
            authenticated: false,
            email: None,
            authorities: Vec::new(),
        },
    };
    Json(body)
}

/// Wire the credential authenticator to the static plugin and build the
/// provider chain.
#[must_use]
pub fn auth_state(plugin: &StaticAuthNPlugin, cfg: &AuthnProviderConfig) -> BasicAuthState {
    let service = Service::new(plugin.authentication_service(), plugin.session_factory());
    let provider = RestAuthenticationProvider::new(Arc::new(service));
    let manager = ProviderManager::default().with_provider(Arc::new(provider));
    BasicAuthState::new(Arc::new(manager), cfg)
}

#[must_use]
pub fn router(state: BasicAuthState) -> Router {
    Router::new()
        .route("/api/status", get(status))
        .layer(from_fn_with_state(state, basic_auth_middleware))
}
