//! Dashboard router.
//!
//! Returns a composable `Router`: JSON endpoints under `/api/`, plus the
//! dashboard page and its assets when a static directory is configured.

use axum::http::{header, HeaderValue};
use axum::routing::get;
use axum::Router;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::set_header::SetResponseHeaderLayer;

use crate::api::endpoints;
use crate::api::middleware;
use crate::api::types::ApiContext;

/// Build the dashboard router.
///
/// Routes:
/// - `GET /api/data`  : dashboard payload
/// - `GET /api/health`: liveness
/// - `GET /`          : `index.html` from the static directory
/// - `GET /static/*`  : page assets
pub fn dashboard_router(ctx: ApiContext) -> Router {
    // API responses are computed per request and must not be cached.
    let api = Router::new()
        .route("/data", get(endpoints::data::dashboard_data))
        .route("/health", get(endpoints::health::check))
        .with_state(ctx.clone())
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ));

    let mut app = Router::new().nest("/api", api);

    if let Some(dir) = ctx.static_dir.as_ref() {
        app = app
            .route_service("/", ServeFile::new(dir.join("index.html")))
            .nest_service("/static", ServeDir::new(dir));
    }

    app.layer(axum::middleware::from_fn(middleware::audit::log_access))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    use super::*;
    use crate::models::record::fixtures::{day, record};
    use crate::source::InMemorySource;

    fn test_context() -> ApiContext {
        let records = vec![
            record(day(1), "ICU-A", "Low", "ER", 10.0, Some(2.0)),
            record(day(2), "ICU-B", "High", "Transfer", 12.0, Some(4.0)),
        ];
        ApiContext::new(Arc::new(InMemorySource::new(records)))
    }

    fn make_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    async fn body_text(resp: axum::response::Response) -> String {
        let body = resp.into_body().collect().await.unwrap().to_bytes();
        String::from_utf8_lossy(&body).into_owned()
    }

    #[tokio::test]
    async fn health_returns_ok_with_version() {
        let app = dashboard_router(test_context());
        let resp = app.oneshot(make_request("/api/health")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["version"], crate::config::APP_VERSION);
    }

    #[tokio::test]
    async fn api_responses_are_not_cacheable() {
        let app = dashboard_router(test_context());
        let resp = app.oneshot(make_request("/api/data")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers().get("Cache-Control").unwrap(), "no-store");
    }

    #[tokio::test]
    async fn data_route_is_mounted_under_api() {
        let app = dashboard_router(test_context());
        let resp = app
            .oneshot(make_request("/api/data?date_range=All&unit=ICU-B"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json: serde_json::Value = serde_json::from_str(&body_text(resp).await).unwrap();
        assert_eq!(json["kpis"]["patient_census"], 12.0);
        assert_eq!(json["charts"]["admission_source"]["labels"][1], "Transfer");
    }

    #[tokio::test]
    async fn unknown_route_returns_404() {
        let app = dashboard_router(test_context());
        let resp = app.oneshot(make_request("/nonexistent")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn page_not_mounted_without_static_dir() {
        let app = dashboard_router(test_context());
        let resp = app.oneshot(make_request("/")).await.unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn serves_page_and_assets_from_static_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>ICU Dashboard</h1>").unwrap();
        std::fs::create_dir(dir.path().join("js")).unwrap();
        std::fs::write(dir.path().join("js").join("script.js"), "fetchData();").unwrap();

        let ctx = test_context().with_static_dir(dir.path());

        let resp = dashboard_router(ctx.clone())
            .oneshot(make_request("/"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(body_text(resp).await.contains("ICU Dashboard"));

        let resp = dashboard_router(ctx)
            .oneshot(make_request("/static/js/script.js"))
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(body_text(resp).await, "fetchData();");
    }
}
