//! Middleware for the API server
//!
//! Every route gets request ids, an HTTP span and a timeout. The API routes
//! additionally get CORS and a global rate limit.

use std::sync::Arc;
use std::time::Duration;

use academy_common::{CorsConfig, RateLimitConfig};
use axum::{
    body::Body,
    http::{header, header::HeaderName, HeaderValue, Method, Request, StatusCode},
    Router,
};
use tower::ServiceBuilder;
use tower_governor::{governor::GovernorConfigBuilder, key_extractor::GlobalKeyExtractor, GovernorLayer};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{info, warn, Level};

use crate::state::AppState;

/// Header carrying the request id, generated when the client sends none
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Long enough for a round trip to the payment gateway
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

fn request_id_header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

fn http_span(request: &Request<Body>) -> tracing::Span {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    tracing::info_span!(
        "http_request",
        method = %request.method(),
        uri = %request.uri(),
        request_id = %request_id,
    )
}

/// Request id, tracing and timeout; outermost layer first
pub fn apply_middleware(router: Router<AppState>) -> Router<AppState> {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(request_id_header(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(request_id_header()))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(http_span)
                    .on_request(DefaultOnRequest::new().level(Level::INFO))
                    .on_response(DefaultOnResponse::new().level(Level::INFO)),
            )
            .layer(TimeoutLayer::with_status_code(
                StatusCode::SERVICE_UNAVAILABLE,
                REQUEST_TIMEOUT,
            )),
    )
}

/// The base stack plus CORS inside it and the rate limiter outside it
pub fn apply_middleware_with_config(
    router: Router<AppState>,
    rate_limit_config: &RateLimitConfig,
    cors_config: &CorsConfig,
    is_production: bool,
) -> Router<AppState> {
    let router = apply_middleware(router.layer(cors_layer(cors_config, is_production)));

    // One bucket for the whole server, not per client
    let governor = GovernorConfigBuilder::default()
        .per_second(rate_limit_config.requests_per_second.into())
        .burst_size(rate_limit_config.burst)
        .key_extractor(GlobalKeyExtractor)
        .finish();

    let Some(governor) = governor else {
        warn!(
            requests_per_second = rate_limit_config.requests_per_second,
            burst = rate_limit_config.burst,
            "Invalid rate limit configuration, rate limiting disabled"
        );
        return router;
    };
    router.layer(GovernorLayer {
        config: Arc::new(governor),
    })
}

fn cors_layer(config: &CorsConfig, is_production: bool) -> CorsLayer {
    CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::AUTHORIZATION,
            header::CONTENT_TYPE,
            header::ACCEPT,
            request_id_header(),
        ])
        .expose_headers([request_id_header()])
        .allow_origin(allowed_origins(config, is_production))
}

/// Configured origins; any origin only in development with none configured
fn allowed_origins(config: &CorsConfig, is_production: bool) -> AllowOrigin {
    if config.allowed_origins.is_empty() {
        if is_production {
            warn!("No CORS origins configured in production, browser requests will be blocked");
            return AllowOrigin::list(Vec::<HeaderValue>::new());
        }
        warn!("Allowing any CORS origin; set CORS_ALLOWED_ORIGINS to restrict");
        return Any.into();
    }

    let origins: Vec<HeaderValue> = config
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    info!(count = origins.len(), "CORS origins configured");
    AllowOrigin::list(origins)
}
