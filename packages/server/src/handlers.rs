//! HTTP handler functions for the earthquake map API.

use actix_web::{HttpResponse, web};
use geojson::JsonObject;
use quake_map_server_models::{ApiError, ApiHealth};

use crate::AppState;

/// `GET /api/health`
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ApiHealth {
        healthy: state.feed.error.is_none(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        feed: state.feed.clone(),
    })
}

/// `GET /api/earthquakes`
///
/// Returns the styled marker `FeatureCollection`. If the startup fetch
/// failed the collection is empty and carries a `feedError` member.
pub async fn earthquakes(state: web::Data<AppState>) -> HttpResponse {
    match state.document.feature_collection() {
        Ok(mut collection) => {
            if let Some(error) = &state.feed.error {
                let mut members = JsonObject::new();
                members.insert("feedError".to_string(), error.clone().into());
                collection.foreign_members = Some(members);
            }
            HttpResponse::Ok().json(collection)
        }
        Err(e) => {
            log::error!("Failed to serialize earthquake features: {e}");
            HttpResponse::InternalServerError().json(ApiError {
                error: "Failed to serialize earthquake features".to_string(),
            })
        }
    }
}

/// `GET /api/markers`
///
/// Returns the raw (style, popup, coordinates) marker list.
pub async fn markers(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(&state.document.markers)
}

/// `GET /api/legend`
pub async fn legend(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.document.legend_document())
}

/// `GET /api/legend.html`
pub async fn legend_html(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.document.legend_html.clone())
}

/// `GET /api/map`
///
/// Returns the initial view, base layers, and overlay name.
pub async fn map(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(state.document.map_settings())
}
