//! API server initialization

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::get;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use super::middleware::{self, AllowedOrigins};
use super::openapi::{openapi_json, swagger_ui_html};
use super::routes::{authors, books, health};
use crate::core::CoreApp;
use crate::core::constants::DEFAULT_BODY_LIMIT;
use crate::data::TransactionalService;

pub struct ApiServer {
    app: CoreApp,
    allowed_origins: AllowedOrigins,
}

impl ApiServer {
    pub fn new(app: CoreApp) -> Self {
        let allowed_origins = AllowedOrigins::new(&app.config.server.host, app.config.server.port);
        Self {
            app,
            allowed_origins,
        }
    }

    /// Returns CoreApp for graceful shutdown
    pub async fn start(self) -> Result<CoreApp> {
        let Self {
            app,
            allowed_origins,
        } = self;

        let shutdown = app.shutdown.clone();
        let addr = SocketAddr::new(app.config.server.host.parse()?, app.config.server.port);

        let router = build_router(app.database.clone(), &allowed_origins);

        let listener = TcpListener::bind(addr).await?;
        tracing::debug!("Listening on {}", addr);
        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown.wait())
        .await?;

        Ok(app)
    }
}

/// Full application router with middleware applied
pub fn build_router(database: Arc<TransactionalService>, allowed_origins: &AllowedOrigins) -> Router {
    Router::new()
        .route(
            "/api/health",
            get(health::health).with_state(database.clone()),
        )
        .route("/api/openapi.json", get(openapi_json))
        .route("/api/docs", get(swagger_ui_html))
        .route("/api/docs/", get(swagger_ui_html))
        .nest("/api/authors", authors::routes(database.clone()))
        .nest("/api/books", books::routes(database))
        .fallback(middleware::handle_404)
        .layer(CompressionLayer::new())
        .layer(middleware::cors(allowed_origins))
        .layer(middleware::trace())
        .layer(DefaultBodyLimit::max(DEFAULT_BODY_LIMIT))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::routes::test_support::send;
    use axum::body::{Body, to_bytes};
    use axum::http::{Method, Request, StatusCode, header};
    use tower::ServiceExt;

    async fn router() -> Router {
        let database = Arc::new(TransactionalService::in_memory().await);
        build_router(database, &AllowedOrigins::new("127.0.0.1", 5390))
    }

    #[tokio::test]
    async fn test_health() {
        let res = send(&router().await, Method::GET, "/api/health", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["status"], "ok");
        assert_eq!(res.body["version"], env!("CARGO_PKG_VERSION"));
        assert_eq!(res.body["database"], "ok");
    }

    #[tokio::test]
    async fn test_health_reports_closed_database() {
        let database = Arc::new(TransactionalService::in_memory().await);
        let router = build_router(database.clone(), &AllowedOrigins::new("127.0.0.1", 5390));
        database.close().await;

        let res = send(&router, Method::GET, "/api/health", None).await;
        assert_eq!(res.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(res.body["database"], "unavailable");
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let res = send(&router().await, Method::GET, "/api/publishers", None).await;
        assert_eq!(res.status, StatusCode::NOT_FOUND);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_openapi_document_served() {
        let res = send(&router().await, Method::GET, "/api/openapi.json", None).await;
        assert_eq!(res.status, StatusCode::OK);
        assert_eq!(res.body["info"]["title"], "Libris API");
    }

    #[tokio::test]
    async fn test_swagger_page_served() {
        let response = router()
            .await
            .oneshot(Request::get("/api/docs").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(String::from_utf8_lossy(&bytes).contains("swagger-ui"));
    }

    #[tokio::test]
    async fn test_oversized_body_rejected() {
        let name = "x".repeat(DEFAULT_BODY_LIMIT + 1);
        let body = serde_json::json!({ "name": name }).to_string();
        let response = router()
            .await
            .oneshot(
                Request::post("/api/authors")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_cors_exposes_total_count() {
        let response = router()
            .await
            .oneshot(
                Request::get("/api/authors")
                    .header(header::ORIGIN, "http://localhost:5390")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "http://localhost:5390"
        );
        let exposed = response
            .headers()
            .get(header::ACCESS_CONTROL_EXPOSE_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string();
        assert!(exposed.contains("x-total-count"));
    }
}
