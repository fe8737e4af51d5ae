//! HTTP request handlers for the sections transformer
//!
//! Section lookups, count/id listings, reload, and the health and
//! good-to-go probes.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;

use crate::core::error::TransformerError;
use crate::core::services::Services;
use crate::core::types::*;
use crate::http::error::json_error;

const SYSTEM_CODE: &str = "sections-transformer";
const PANIC_GUIDE: &str = "https://sites.google.com/a/ft.com/ft-technology-service-transition/home/run-book-library/sections-transfomer";
const CHECK_ID: &str = "tme-connectivity";

/// Health report handler
///
/// Always answers 200; the check outcome is in the body.
pub async fn health_handler(State(services): State<Arc<Services>>) -> Json<HealthResponse> {
    let (output, result) = services.check_tme().await;
    let ok = result.is_ok();

    let check = HealthCheck {
        id: CHECK_ID.to_string(),
        name: "Check connectivity to TME".to_string(),
        ok,
        severity: 1,
        business_impact: "Unable to respond to request for the section data from TME".to_string(),
        technical_summary: "Cannot connect to TME to be able to supply sections".to_string(),
        panic_guide: PANIC_GUIDE.to_string(),
        check_output: output,
        last_updated: Utc::now(),
    };

    Json(HealthResponse {
        schema_version: 1,
        system_code: SYSTEM_CODE.to_string(),
        name: "Sections Transformer".to_string(),
        description: format!(
            "Transforms TME {} terms into sections",
            services.store.taxonomy_name()
        ),
        ok,
        checks: vec![check],
    })
}

/// Good-to-go handler
///
/// 503 when TME is unreachable, so load balancers stop routing here.
pub async fn gtg_handler(State(services): State<Arc<Services>>) -> StatusCode {
    match services.check_tme().await {
        (_, Ok(())) => StatusCode::OK,
        (output, Err(_)) => {
            tracing::warn!(check_output = %output, "Good-to-go check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

/// All sections handler
///
/// # Returns
///
/// Every section of the current snapshot, or 404 before the first
/// successful load
pub async fn sections_handler(State(services): State<Arc<Services>>) -> Response {
    match services.store.get_all() {
        Some(sections) => Json(sections).into_response(),
        None => json_error(StatusCode::NOT_FOUND, "Sections not loaded"),
    }
}

/// Single section handler
pub async fn section_by_uuid_handler(
    State(services): State<Arc<Services>>,
    Path(uuid): Path<String>,
) -> Response {
    match services.store.get_by_id(&uuid) {
        Some(section) => Json(section).into_response(),
        None => json_error(
            StatusCode::NOT_FOUND,
            format!("Section not found: {uuid}"),
        ),
    }
}

/// Section count as plain text
pub async fn count_handler(State(services): State<Arc<Services>>) -> String {
    services.store.get_count().to_string()
}

/// Section ids, one `{"id": ...}` object per line
pub async fn ids_handler(State(services): State<Arc<Services>>) -> impl IntoResponse {
    let mut body = String::new();

    for id in services.store.get_ids() {
        match serde_json::to_string(&SectionId { id }) {
            Ok(line) => {
                body.push_str(&line);
                body.push('\n');
            }
            Err(e) => tracing::warn!(error = %e, "Couldn't encode section id"),
        }
    }

    ([(header::CONTENT_TYPE, "text/plain")], body)
}

/// Reload handler
///
/// # Errors
///
/// - `ReloadInProgress`: another reload is running (409)
/// - `SourceUnavailable`: TME fetch failed, previous data kept (500)
pub async fn reload_handler(
    State(services): State<Arc<Services>>,
) -> Result<Json<ReloadStats>, TransformerError> {
    match services.store.reload().await {
        Ok(stats) => Ok(Json(stats)),
        Err(e) => {
            tracing::warn!(error = %e, "Problem reloading terms from TME");
            Err(e)
        }
    }
}
