//! HTTP listener, middleware and shutdown

use crate::config::ServerConfig;
use anyhow::{Context, Result};
use axum::Router;
use http::{request::Parts, HeaderValue};
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

/// Configured origin: exact, or with a single `*` standing for a non-empty host label run
#[derive(Debug, Clone, PartialEq, Eq)]
enum OriginPattern {
    Exact(String),
    Wildcard { prefix: String, suffix: String },
}

impl OriginPattern {
    fn parse(origin: &str) -> Self {
        let origin = origin.trim().trim_end_matches('/');
        match origin.split_once('*') {
            Some((prefix, suffix)) => Self::Wildcard {
                prefix: prefix.to_string(),
                suffix: suffix.to_string(),
            },
            None => Self::Exact(origin.to_string()),
        }
    }

    fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Exact(expected) => expected == origin,
            Self::Wildcard { prefix, suffix } => {
                origin.len() > prefix.len() + suffix.len()
                    && origin.starts_with(prefix.as_str())
                    && origin.ends_with(suffix.as_str())
                    && !origin[prefix.len()..origin.len() - suffix.len()].contains('/')
            }
        }
    }
}

/// CORS for the configured origins with credentials; methods and headers mirror the preflight
pub fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let patterns: Vec<OriginPattern> = allowed_origins
        .iter()
        .map(|origin| OriginPattern::parse(origin))
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _parts: &Parts| {
                origin
                    .to_str()
                    .map(|origin| patterns.iter().any(|p| p.matches(origin)))
                    .unwrap_or(false)
            },
        ))
        .allow_credentials(true)
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
}

/// Wrap the API router with request tracing and CORS
pub fn app(config: &ServerConfig, router: Router) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_allowed_origins))
}

/// Bind and serve until Ctrl-C or SIGTERM
pub async fn serve(config: &ServerConfig, router: Router) -> Result<()> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    let local_addr = listener.local_addr()?;

    tracing::info!(address = %local_addr, "Inventory server listening");

    axum::serve(listener, app(config, router))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Inventory server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::routing::get;
    use http::{header, Method, Request, StatusCode};
    use tower::ServiceExt;

    #[test]
    fn test_exact_origin() {
        let pattern = OriginPattern::parse("http://localhost:3000/");
        assert!(pattern.matches("http://localhost:3000"));
        assert!(!pattern.matches("http://localhost:3001"));
    }

    #[test]
    fn test_wildcard_subdomain() {
        let pattern = OriginPattern::parse("https://*.onrender.com");
        assert!(pattern.matches("https://ds-inventory-frontend.onrender.com"));
        assert!(!pattern.matches("https://.onrender.com"));
        assert!(!pattern.matches("http://shop.onrender.com"));
        assert!(!pattern.matches("https://evil.com/x.onrender.com"));
        assert!(!pattern.matches("https://onrender.com.evil.net"));
    }

    fn test_app() -> Router {
        let config = ServerConfig {
            cors_allowed_origins: vec!["https://*.onrender.com".to_string()],
            ..ServerConfig::default()
        };
        app(&config, Router::new().route("/health", get(|| async { "ok" })))
    }

    #[tokio::test]
    async fn test_preflight_for_allowed_origin() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .method(Method::OPTIONS)
                    .uri("/health")
                    .header(header::ORIGIN, "https://shop.onrender.com")
                    .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                    .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let headers = response.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "https://shop.onrender.com"
        );
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[tokio::test]
    async fn test_unknown_origin_gets_no_cors_headers() {
        let response = test_app()
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .header(header::ORIGIN, "https://elsewhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none());
    }
}
