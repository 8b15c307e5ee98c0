//! API request handlers
//!
//! This module contains the request handlers for all API endpoints.

use actix_web::{web, HttpResponse, Responder};
use futures::stream;
use tracing::error;

use crate::api::models::*;
use crate::api::routes::ApiDoc;
use crate::model::FeatureCollection;
use crate::render::aggregate::{group_by_asn, rank_groups};
use crate::render::{render_chart, render_map, render_page, PageUrls};

/// Health check
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "ok".to_string(),
        nodes: state.features.len(),
    })
}

/// All nodes as a GeoJSON feature collection
#[utoipa::path(
    get,
    path = "/api/v1/nodes",
    responses(
        (status = 200, description = "GeoJSON FeatureCollection of all nodes", content_type = "application/geo+json")
    ),
    tag = "Dataset"
)]
pub async fn get_nodes(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("application/geo+json")
        .json(FeatureCollection::new(&state.features))
}

/// Map scene: basemap style, node source and marker layer
#[utoipa::path(
    get,
    path = "/api/v1/map",
    responses(
        (status = 200, description = "Map scene", content_type = "application/json")
    ),
    tag = "Render"
)]
pub async fn get_map_scene(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(render_map(&state.features, &state.map))
}

/// Chart layout: summary, ranked bars and axis
#[utoipa::path(
    get,
    path = "/api/v1/chart",
    responses(
        (status = 200, description = "Chart layout", content_type = "application/json")
    ),
    tag = "Render"
)]
pub async fn get_chart(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(render_chart(&state.features, &state.chart))
}

/// Chart as an SVG document
#[utoipa::path(
    get,
    path = "/api/v1/chart.svg",
    responses(
        (status = 200, description = "Chart SVG", content_type = "image/svg+xml")
    ),
    tag = "Render"
)]
pub async fn get_chart_svg(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("image/svg+xml")
        .body(render_chart(&state.features, &state.chart).to_svg())
}

/// Summary lines and chart SVG as an HTML fragment
#[utoipa::path(
    get,
    path = "/api/v1/chart.html",
    responses(
        (status = 200, description = "Chart HTML fragment", content_type = "text/html")
    ),
    tag = "Render"
)]
pub async fn get_chart_html(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_chart(&state.features, &state.chart).to_html())
}

/// Get dataset statistics
#[utoipa::path(
    get,
    path = "/api/v1/stats",
    params(StatsQuery),
    responses(
        (status = 200, description = "Successfully retrieved statistics", body = StatsResponse),
        (status = 400, description = "Invalid limit parameter", body = ErrorResponse)
    ),
    tag = "Statistics"
)]
pub async fn get_stats(state: web::Data<AppState>, query: web::Query<StatsQuery>) -> impl Responder {
    let limit = match query.limit() {
        Ok(limit) => limit,
        Err(err) => {
            return HttpResponse::BadRequest().json(ErrorResponse {
                error: err,
                code: Some("INVALID_LIMIT".to_string()),
            });
        }
    };

    let total_nodes = state.features.len();
    let mut groups = group_by_asn(&state.features);
    rank_groups(&mut groups);

    let top_asns = groups
        .iter()
        .take(limit)
        .map(|group| {
            let percentage = if total_nodes > 0 {
                (group.len() as f64 / total_nodes as f64) * 100.0
            } else {
                0.0
            };
            AsnCount {
                asn: group.asn.to_string(),
                count: group.len(),
                percentage,
            }
        })
        .collect();

    HttpResponse::Ok().json(StatsResponse {
        total_nodes,
        total_asns: groups.len(),
        top_asns,
        source: state.source.clone(),
        loaded_at: state.loaded_at.clone(),
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

/// Export nodes as NDJSON, one GeoJSON feature per line
#[utoipa::path(
    get,
    path = "/api/v1/export/ndjson",
    responses(
        (status = 200, description = "NDJSON export successful", content_type = "application/x-ndjson")
    ),
    tag = "Dataset"
)]
pub async fn export_ndjson(state: web::Data<AppState>) -> impl Responder {
    const BATCH_SIZE: usize = 1000;
    let features = state.features.clone();

    let stream = stream::unfold(0usize, move |offset| {
        let features = features.clone();

        async move {
            if offset >= features.len() {
                return None;
            }

            let end = (offset + BATCH_SIZE).min(features.len());
            let mut ndjson_chunk = String::new();

            for feature in &features[offset..end] {
                match serde_json::to_string(feature) {
                    Ok(line) => {
                        ndjson_chunk.push_str(&line);
                        ndjson_chunk.push('\n');
                    }
                    Err(e) => {
                        error!("Failed to serialize node {}: {}", feature.ip(), e);
                        return None;
                    }
                }
            }

            Some((
                Ok::<_, actix_web::Error>(web::Bytes::from(ndjson_chunk)),
                end,
            ))
        }
    });

    HttpResponse::Ok()
        .content_type("application/x-ndjson")
        .append_header((
            "Content-Disposition",
            "attachment; filename=\"nodes.ndjson\"",
        ))
        .streaming(stream)
}

/// Page hosting the map and the chart
pub async fn index(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(render_page(&state.map, &state.chart, &PageUrls::api()))
}

/// OpenAPI document
pub async fn openapi_json() -> impl Responder {
    use utoipa::OpenApi;
    HttpResponse::Ok().json(ApiDoc::openapi())
}
