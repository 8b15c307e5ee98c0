//! HTTP surface for the node map
//!
//! Serves the page, the map scene, the chart and the dataset. The dataset is
//! loaded once before the server starts and shared read-only by all workers.

mod handlers;
pub mod models;
mod routes;
mod server;

use actix_web::web;

pub use models::AppState;
pub use routes::ApiDoc;
pub use server::run_server;

/// Initialize page and API routes
pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(handlers::index))
        .route("/api-docs/openapi.json", web::get().to(handlers::openapi_json))
        .service(
            web::scope("/api/v1")
                .configure(routes::config_dataset_routes)
                .configure(routes::config_render_routes)
                .configure(routes::config_stats_routes),
        );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{ChartConfig, MapConfig};
    use crate::service::loader::parse_nodes;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::Value;

    const SCENARIO: &[u8] = br#"[
        {"ip":"1.1.1.1","asn":"A1","location":{"Latitude":10,"Longitude":20}},
        {"ip":"2.2.2.2","asn":"A1","location":{"Latitude":30,"Longitude":40}},
        {"ip":"3.3.3.3","asn":"A2","location":{"Latitude":0,"Longitude":0}}
    ]"#;

    fn state() -> web::Data<AppState> {
        web::Data::new(AppState::new(
            parse_nodes(SCENARIO).unwrap(),
            MapConfig::default(),
            ChartConfig::default(),
            "memory".to_string(),
        ))
    }

    #[actix_web::test]
    async fn test_health_and_nodes() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["nodes"], 3);

        let req = test::TestRequest::get().uri("/api/v1/nodes").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["type"], "FeatureCollection");
        assert_eq!(body["features"][1]["geometry"]["coordinates"][0], 40.0);
    }

    #[actix_web::test]
    async fn test_map_and_chart() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/map").to_request();
        let scene: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(scene["nodeLayer"]["paint"]["circle-color"], "#552cb7");
        assert_eq!(scene["zoom"], 7.0);
        assert_eq!(
            scene["nodeSource"]["data"]["features"][2]["properties"]["tooltip"],
            "3.3.3.3 A2"
        );

        let req = test::TestRequest::get().uri("/api/v1/chart").to_request();
        let chart: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(chart["layout"]["height"], 63.0);
        assert_eq!(chart["summary"]["asns_line"], "Number of ASN: 2");
        assert_eq!(chart["bars"][0]["label"]["placement"], "inside");
        assert_eq!(chart["bars"][1]["label"]["placement"], "inside");

        let req = test::TestRequest::get().uri("/api/v1/chart.svg").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get("content-type").unwrap(),
            "image/svg+xml"
        );
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains("2 - A1"));
    }

    #[actix_web::test]
    async fn test_stats_limits() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/stats?limit=1").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["total_nodes"], 3);
        assert_eq!(body["total_asns"], 2);
        assert_eq!(body["top_asns"].as_array().unwrap().len(), 1);
        assert_eq!(body["top_asns"][0]["asn"], "A1");
        assert_eq!(body["top_asns"][0]["count"], 2);

        let req = test::TestRequest::get().uri("/api/v1/stats").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["top_asns"].as_array().unwrap().len(), 2);

        for limit in ["0", "101", "abc", "-1", ""] {
            let uri = format!("/api/v1/stats?limit={}", limit);
            let req = test::TestRequest::get().uri(&uri).to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "limit={}", limit);
            assert_eq!(
                resp.headers().get("content-type").unwrap(),
                "application/json"
            );
            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body["code"], "INVALID_LIMIT", "limit={}", limit);
            assert!(body["error"].is_string());
        }
    }

    #[actix_web::test]
    async fn test_ndjson_export() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/api/v1/export/ndjson").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let text = std::str::from_utf8(&body).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        let first: Value = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first["properties"]["ip"], "1.1.1.1");
    }

    #[actix_web::test]
    async fn test_index_and_openapi() {
        let app = test::init_service(App::new().app_data(state()).configure(init_routes)).await;

        let req = test::TestRequest::get().uri("/").to_request();
        let body = test::call_and_read_body(&app, req).await;
        let page = std::str::from_utf8(&body).unwrap();
        assert!(page.contains(r#"fetch("/api/v1/map")"#));

        let req = test::TestRequest::get().uri("/api-docs/openapi.json").to_request();
        let doc: Value = test::call_and_read_body_json(&app, req).await;
        assert!(doc["paths"]["/api/v1/stats"].is_object());
    }
}
