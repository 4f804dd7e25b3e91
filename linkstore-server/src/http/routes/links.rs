//! Link endpoint - one path, method-multiplexed
//!
//! - POST creates and returns `{"insertedID": ...}`
//! - GET reads `{id, label, data}` by `?id=`
//! - PUT overwrites `data` (and `label` when given)
//! - DELETE removes by `?id=`
//!
//! PUT and DELETE do not check that the row exists; an unknown id is a
//! successful no-op. GET is the only verb that answers 404.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
    routing::get,
    Json, Router,
};
use serde::Serialize;
use serde_json::Value as JsonValue;
use tower_http::cors::{Any, CorsLayer};

use crate::http::error::ApiError;
use crate::http::extractors::{LinkBody, OptionalLinkId, RequiredLinkId};
use crate::http::server::{AppState, LinkHandlerConfig};
use crate::models::{Label, LinkId, ValidationError};

/// Path the link endpoint is mounted on
pub const LINK_PATH: &str = "/api/link";

/// POST response
#[derive(Serialize)]
pub struct InsertedResponse {
    #[serde(rename = "insertedID")]
    pub inserted_id: LinkId,
}

/// GET response
#[derive(Serialize)]
pub struct LinkResponse {
    pub id: LinkId,
    pub label: String,
    pub data: JsonValue,
}

fn encode_data(data: &JsonValue) -> Result<Vec<u8>, ValidationError> {
    serde_json::to_vec(data).map_err(|_| ValidationError::InvalidFormat {
        field: "data",
        reason: "could not be serialized",
    })
}

/// POST /api/link
async fn create_link(
    State(state): State<Arc<AppState>>,
    body: LinkBody,
) -> Result<Json<InsertedResponse>, ApiError> {
    let label = Label::from_json(body.label)?
        .ok_or(ValidationError::Missing { field: "label" })?;
    let blob = encode_data(&body.data)?;

    let id = state.store.insert(&label, &blob).await?;
    tracing::debug!(%id, "link created");

    Ok(Json(InsertedResponse { inserted_id: id }))
}

/// GET /api/link?id=
async fn read_link(
    State(state): State<Arc<AppState>>,
    RequiredLinkId(raw): RequiredLinkId,
) -> Result<Json<LinkResponse>, ApiError> {
    let not_found = || ApiError::NotFound {
        resource: "Link",
        id: raw.clone(),
    };

    let id = state.store.id_strategy().parse_id(&raw).ok_or_else(not_found)?;
    let link = state.store.fetch(&id).await?.ok_or_else(not_found)?;

    let data = serde_json::from_slice(&link.data).map_err(|e| ApiError::Internal {
        message: format!("stored data for link '{}' is not valid JSON: {}", link.id, e),
    })?;

    Ok(Json(LinkResponse {
        id: link.id,
        label: link.label,
        data,
    }))
}

/// PUT /api/link?id=
async fn update_link(
    State(state): State<Arc<AppState>>,
    RequiredLinkId(raw): RequiredLinkId,
    body: LinkBody,
) -> Result<&'static str, ApiError> {
    let label = Label::from_json(body.label)?;
    if label.is_none() && state.links.require_label_on_update {
        return Err(ValidationError::Missing { field: "label" }.into());
    }
    let blob = encode_data(&body.data)?;

    match state.store.id_strategy().parse_id(&raw) {
        Some(id) => {
            let rows = state.store.update(&id, label.as_ref(), &blob).await?;
            if rows == 0 {
                tracing::debug!(%id, "update matched no rows");
            }
        }
        None => tracing::debug!(id = %raw, "update for unparseable id skipped"),
    }

    Ok("Data updated successfully")
}

/// DELETE /api/link?id=
async fn delete_link(
    State(state): State<Arc<AppState>>,
    OptionalLinkId(raw): OptionalLinkId,
) -> Result<&'static str, ApiError> {
    match state.store.id_strategy().parse_id(&raw) {
        Some(id) => {
            let rows = state.store.delete(&id).await?;
            if rows == 0 {
                tracing::debug!(%id, "delete matched no rows");
            }
        }
        None => tracing::debug!(id = %raw, "delete for unparseable id skipped"),
    }

    Ok("Data deleted successfully")
}

/// Methods and headers advertised on every link response
const CORS_METHODS: &str = "GET, POST, PUT, DELETE";
const CORS_HEADERS: &str = "Content-Type";

/// Repeat the allowed methods and headers on non-preflight responses
async fn cors_headers(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_METHODS)
        .or_insert(HeaderValue::from_static(CORS_METHODS));
    headers
        .entry(header::ACCESS_CONTROL_ALLOW_HEADERS)
        .or_insert(HeaderValue::from_static(CORS_HEADERS));
    response
}

/// Open CORS for the link path only.
///
/// `CorsLayer` answers every OPTIONS request and adds the allow-origin header.
fn with_cors(router: Router<Arc<AppState>>) -> Router<Arc<AppState>> {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE]);

    router
        .layer(axum::middleware::from_fn(cors_headers))
        .layer(cors)
}

/// Link routes
pub fn router(config: &LinkHandlerConfig) -> Router<Arc<AppState>> {
    let allow = config.allowed_methods();

    let methods = get(read_link)
        .post(create_link)
        .put(update_link)
        .delete(delete_link)
        .fallback(move |method: Method| async move {
            ApiError::MethodNotAllowed { method, allow }
        });

    let router = Router::new().route(LINK_PATH, methods);
    if config.cors {
        with_cors(router)
    } else {
        router
    }
}
