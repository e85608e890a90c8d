//! HTTP Basic authentication middleware for the REST API.

use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use authn_provider_sdk::{AuthProviderError, AuthenticationRequest, Credential, RequestAttributes};
use axum::extract::{ConnectInfo, Request, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use secrecy::SecretString;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::AuthnProviderConfig;
use crate::domain::ProviderManager;

const X_FORWARDED_FOR: &str = "x-forwarded-for";
const X_REQUEST_ID: &str = "x-request-id";

/// Shared state for the authentication middleware.
#[derive(Clone)]
pub struct BasicAuthState {
    pub manager: Arc<ProviderManager>,
    pub realm: Arc<str>,
    pub trust_forwarded_for: bool,
}

impl BasicAuthState {
    #[must_use]
    pub fn new(manager: Arc<ProviderManager>, cfg: &AuthnProviderConfig) -> Self {
        Self {
            manager,
            realm: Arc::from(cfg.realm.as_str()),
            trust_forwarded_for: cfg.trust_forwarded_for,
        }
    }
}

/// Authentication middleware that runs HTTP Basic credentials through the
/// provider chain.
///
/// For each request:
/// 1. No Basic credentials: continues anonymously
/// 2. Malformed Basic header, including a bare `Basic`: 401
/// 3. Authenticated: inserts the `IdentityToken`, credentials erased, into
///    request extensions
/// 4. Rejected: 401 with a generic detail
/// 5. No provider decided: continues anonymously
pub async fn basic_auth_middleware(
    State(state): State<BasicAuthState>,
    mut req: Request,
    next: Next,
) -> Response {
    let credential = match extract_basic_credential(req.headers()) {
        BasicHeader::Missing => return next.run(req).await,
        BasicHeader::Malformed => {
            return unauthorized(&state.realm, "Malformed Authorization header");
        }
        BasicHeader::Present(credential) => credential,
    };

    let attrs = request_attributes(&req, state.trust_forwarded_for);
    let manager = state.manager.clone();
    let request = AuthenticationRequest::UsernamePassword(credential);

    // Providers talk to blocking user stores.
    let outcome =
        tokio::task::spawn_blocking(move || manager.authenticate(&request, &attrs)).await;

    match outcome {
        Ok(Ok(token)) => {
            // Handlers get the identity, never the submitted password.
            req.extensions_mut().insert(token.erase_credentials());
            next.run(req).await
        }
        Ok(Err(AuthProviderError::BadCredentials(_))) => {
            unauthorized(&state.realm, "Authentication failed")
        }
        Ok(Err(AuthProviderError::NoProviderDecided)) => {
            debug!("No authentication decision, continuing anonymously");
            next.run(req).await
        }
        Err(e) => {
            error!(error = %e, "Authentication task failed");
            next.run(req).await
        }
    }
}

#[derive(Debug)]
enum BasicHeader {
    Missing,
    Malformed,
    Present(Credential),
}

/// Extract Basic credentials from the Authorization header.
///
/// Other schemes (e.g. Bearer) count as missing so that they reach their own
/// middleware untouched.
fn extract_basic_credential(headers: &HeaderMap) -> BasicHeader {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BasicHeader::Missing;
    };
    let Ok(value) = value.to_str() else {
        return BasicHeader::Malformed;
    };
    let Some((scheme, encoded)) = value.split_once(' ') else {
        if value.trim().eq_ignore_ascii_case("basic") {
            return BasicHeader::Malformed;
        }
        return BasicHeader::Missing;
    };
    if !scheme.eq_ignore_ascii_case("basic") {
        return BasicHeader::Missing;
    }

    let Ok(decoded) = STANDARD.decode(encoded.trim()) else {
        return BasicHeader::Malformed;
    };
    let Ok(decoded) = String::from_utf8(decoded) else {
        return BasicHeader::Malformed;
    };
    let Some((name, secret)) = decoded.split_once(':') else {
        return BasicHeader::Malformed;
    };

    BasicHeader::Present(Credential::new(name, SecretString::from(secret.to_owned())))
}

fn request_attributes(req: &Request, trust_forwarded_for: bool) -> RequestAttributes {
    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip());
    let forwarded = if trust_forwarded_for {
        forwarded_for(req.headers())
    } else {
        None
    };

    let mut attrs = RequestAttributes::new();
    if let Some(addr) = forwarded.or(peer) {
        attrs = attrs.with_remote_addr(addr);
    }
    if let Some(id) = req.headers().get(X_REQUEST_ID).and_then(|v| v.to_str().ok()) {
        attrs = attrs.with_session_id(id);
    }
    for (name, value) in req.headers() {
        if name == header::AUTHORIZATION || name == header::COOKIE {
            continue;
        }
        if let Ok(value) = value.to_str() {
            attrs = attrs.with_header(name.as_str(), value);
        }
    }

    attrs
}

/// First hop of `X-Forwarded-For`, i.e. the original client.
fn forwarded_for(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(X_FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}

/// RFC-9457 problem body.
#[derive(Serialize)]
struct Problem<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    title: &'a str,
    status: u16,
    detail: &'a str,
}

fn unauthorized(realm: &str, detail: &str) -> Response {
    let problem = Problem {
        kind: "about:blank",
        title: "Unauthorized",
        status: StatusCode::UNAUTHORIZED.as_u16(),
        detail,
    };
    let body = serde_json::to_string(&problem).unwrap_or_default();

    let mut response = (
        StatusCode::UNAUTHORIZED,
        [(header::CONTENT_TYPE, "application/problem+json")],
        body,
    )
        .into_response();
    if let Ok(challenge) = HeaderValue::from_str(&format!("Basic realm=\"{realm}\"")) {
        response
            .headers_mut()
            .insert(header::WWW_AUTHENTICATE, challenge);
    }
    response
}
