use std::collections::BTreeMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use serde::Serialize;
use shelf_sdk::Attributes;

use crate::endpoint::{HealthResponse, NAME_HEADER};
use crate::error::{ServerError, ServerResult};
use crate::router::AppState;

/// Raw query parameters, in request order.
type Params = Query<Vec<(String, String)>>;

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub list: Vec<String>,
}

/// One single-key object per file: `{"<name>": {<attributes>}}`.
#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub info: Vec<BTreeMap<String, Attributes>>,
}

/// Landing page.
pub async fn index_handler() -> &'static str {
    "Main page\n\
     Valid methods and endpoints:\n\
     POST /post\n\
     GET /download\n\
     GET /list\n\
     GET /info\n"
}

/// Health check handler.
pub async fn health_handler(State(state): State<AppState>) -> ServerResult<Json<HealthResponse>> {
    Ok(Json(HealthResponse::ok(state.shelf.len()?)))
}

/// Upload handler. The name comes from the `name` header, else the `name`
/// query parameter.
pub async fn post_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Params,
    body: Bytes,
) -> ServerResult<StatusCode> {
    let name = headers
        .get(NAME_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
        .or_else(|| last_value(&params, "name"))
        .ok_or(ServerError::MissingName)?;

    // Extraction scans the whole body; keep it off the async workers.
    let shelf = Arc::clone(&state.shelf);
    tokio::task::spawn_blocking(move || shelf.submit(&name, body))
        .await
        .map_err(|err| ServerError::Internal(err.to_string()))??;
    Ok(StatusCode::CREATED)
}

/// Download handler: the payload of the single matching file.
pub async fn download_handler(
    State(state): State<AppState>,
    Query(params): Params,
) -> ServerResult<Response> {
    let query = shelf_sdk::Query::from_pairs(params)?;
    let payload = state.shelf.resolve_download(&query)?;
    Ok(([(header::CONTENT_TYPE, "application/octet-stream")], payload).into_response())
}

/// List handler: names of the matching files.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Params,
) -> ServerResult<Json<ListResponse>> {
    let query = shelf_sdk::Query::from_pairs(params)?;
    let list = state.shelf.resolve_list(&query)?;
    Ok(Json(ListResponse { list }))
}

/// Info handler: attributes of the matching files.
pub async fn info_handler(
    State(state): State<AppState>,
    Query(params): Params,
) -> ServerResult<Json<InfoResponse>> {
    let query = shelf_sdk::Query::from_pairs(params)?;
    let info = state
        .shelf
        .resolve_info(&query)?
        .into_iter()
        .map(|(name, attrs)| BTreeMap::from([(name, attrs)]))
        .collect();
    Ok(Json(InfoResponse { info }))
}

fn last_value(params: &[(String, String)], key: &str) -> Option<String> {
    params
        .iter()
        .rev()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_value_wins() {
        let params = vec![
            ("name".to_string(), "first".to_string()),
            ("other".to_string(), "x".to_string()),
            ("name".to_string(), "second".to_string()),
        ];
        assert_eq!(last_value(&params, "name").as_deref(), Some("second"));
        assert_eq!(last_value(&params, "missing"), None);
    }

    #[tokio::test]
    async fn index_lists_endpoints() {
        let page = index_handler().await;
        assert!(page.starts_with("Main page\n"));
        assert!(page.contains("POST /post\n"));
        assert!(page.ends_with("GET /info\n"));
    }
}
