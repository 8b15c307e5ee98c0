//! API route definitions
//!
//! This module defines all API routes and their configurations.

use actix_web::web;
use utoipa::OpenApi;

use crate::api::handlers;
use crate::api::models;

/// Configure dataset routes
pub fn config_dataset_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/health", web::get().to(handlers::health))
        .route("/nodes", web::get().to(handlers::get_nodes))
        .service(
            web::scope("/export").route("/ndjson", web::get().to(handlers::export_ndjson)),
        );
}

/// Configure map and chart routes
pub fn config_render_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/map", web::get().to(handlers::get_map_scene))
        .route("/chart", web::get().to(handlers::get_chart))
        .route("/chart.svg", web::get().to(handlers::get_chart_svg))
        .route("/chart.html", web::get().to(handlers::get_chart_html));
}

/// Configure statistics routes
pub fn config_stats_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/stats", web::get().to(handlers::get_stats));
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::health,
        handlers::get_nodes,
        handlers::get_map_scene,
        handlers::get_chart,
        handlers::get_chart_svg,
        handlers::get_chart_html,
        handlers::get_stats,
        handlers::export_ndjson,
    ),
    components(
        schemas(
            models::HealthResponse,
            models::AsnCount,
            models::StatsResponse,
            models::ErrorResponse,
            models::StatsQuery,
        )
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Dataset", description = "Node dataset endpoints"),
        (name = "Render", description = "Map scene and chart endpoints"),
        (name = "Statistics", description = "Statistics endpoints"),
    )
)]
pub struct ApiDoc;
