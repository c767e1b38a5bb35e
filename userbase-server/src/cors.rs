//! Cross-origin request policy.
//!
//! The policy is configured as a space-separated list of origins. A lone
//! `*` opens the API to every origin. Otherwise a request passes when it
//! carries no `Origin`, when its origin is listed, or when the origin's
//! host is `localhost`.

use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::convert::Infallible;
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

const ALLOWED_METHODS: &str = "GET, HEAD, POST";
const DEFAULT_ALLOWED_HEADERS: &str = "content-type";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    AllowAll,
    AllowList(Vec<String>),
}

/// Outcome of checking a request origin against a [`CorsPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorsDecision {
    /// Allowed; answer with `access-control-allow-origin: *`.
    Wildcard,
    /// Allowed; echo the request origin back.
    Reflect,
    /// Same-origin or non-browser request; no CORS headers needed.
    NoOrigin,
    Forbidden,
}

impl CorsPolicy {
    pub fn parse(origins: &str) -> Self {
        let list: Vec<String> = origins.split_whitespace().map(str::to_owned).collect();
        if list.len() == 1 && list[0] == "*" {
            Self::AllowAll
        } else {
            Self::AllowList(list)
        }
    }

    pub fn check(&self, origin: Option<&str>) -> CorsDecision {
        let allowed = match self {
            Self::AllowAll => return CorsDecision::Wildcard,
            Self::AllowList(allowed) => allowed,
        };
        let Some(origin) = origin else {
            return CorsDecision::NoOrigin;
        };
        if allowed.iter().any(|a| a == origin) || is_localhost(origin) {
            CorsDecision::Reflect
        } else {
            CorsDecision::Forbidden
        }
    }
}

impl FromStr for CorsPolicy {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

fn is_localhost(origin: &str) -> bool {
    origin
        .parse::<Uri>()
        .ok()
        .and_then(|uri| uri.host().map(|h| h.eq_ignore_ascii_case("localhost")))
        .unwrap_or(false)
}

/// Axum middleware enforcing `policy` and answering preflight requests.
pub async fn cors_middleware(
    State(policy): State<Arc<CorsPolicy>>,
    request: Request,
    next: Next,
) -> Response {
    let origin = request.headers().get(header::ORIGIN).cloned();
    let origin_str = origin
        .as_ref()
        .map(|v| String::from_utf8_lossy(v.as_bytes()).into_owned());

    let decision = policy.check(origin_str.as_deref());
    if decision == CorsDecision::Forbidden {
        warn!(
            "Rejected request from origin {}",
            origin_str.as_deref().unwrap_or_default()
        );
        return ApiError::Forbidden.into_response();
    }

    let preflight = request.method() == Method::OPTIONS
        && request
            .headers()
            .contains_key(header::ACCESS_CONTROL_REQUEST_METHOD);
    let requested_headers = request
        .headers()
        .get(header::ACCESS_CONTROL_REQUEST_HEADERS)
        .cloned();

    let mut response = if preflight {
        StatusCode::NO_CONTENT.into_response()
    } else {
        next.run(request).await
    };

    let headers = response.headers_mut();
    match (decision, origin) {
        (CorsDecision::Wildcard, _) => {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_ORIGIN,
                HeaderValue::from_static("*"),
            );
        }
        (CorsDecision::Reflect, Some(origin)) => {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, origin);
            headers.append(header::VARY, HeaderValue::from_static("origin"));
        }
        _ => {}
    }

    if preflight {
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_METHODS,
            HeaderValue::from_static(ALLOWED_METHODS),
        );
        headers.insert(
            header::ACCESS_CONTROL_ALLOW_HEADERS,
            requested_headers.unwrap_or(HeaderValue::from_static(DEFAULT_ALLOWED_HEADERS)),
        );
    }

    response
}
