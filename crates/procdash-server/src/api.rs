use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use procdash_core::{
    DashError, Envelope, ErrorBody, LoginCredentials, LoginOutcome, ProcessAction,
    ProcessMetadata, ProcessSummary,
};

use crate::server::AppState;
use crate::upstream::Lifecycle;

/// The browser's raw `Cookie` header, forwarded verbatim to the backend.
fn cookie_header(headers: &HeaderMap) -> Option<&str> {
    headers.get(header::COOKIE).and_then(|v| v.to_str().ok())
}

/// Read the parts of an upstream response we pass back to the browser:
/// status, content-type, any `Set-Cookie` headers, and the body bytes.
async fn read_parts(resp: reqwest::Response) -> Result<(StatusCode, HeaderMap, Bytes), DashError> {
    let status = resp.status();

    let mut headers = HeaderMap::new();
    if let Some(ct) = resp.headers().get(header::CONTENT_TYPE) {
        headers.insert(header::CONTENT_TYPE, ct.clone());
    }
    for set_cookie in resp.headers().get_all(header::SET_COOKIE) {
        headers.append(header::SET_COOKIE, set_cookie.clone());
    }

    let body = resp
        .bytes()
        .await
        .map_err(|e| DashError::Upstream(e.to_string()))?;

    Ok((status, headers, body))
}

/// Convert an upstream failure into the single generic error the view
/// shows. The detail goes to the log, not the browser.
fn bad_gateway(err: DashError) -> Response {
    tracing::warn!("upstream request failed: {}", err);
    (
        StatusCode::BAD_GATEWAY,
        Json(ErrorBody::new("Supervisor backend unavailable")),
    )
        .into_response()
}

/// `POST /api/auth/login`
pub async fn login(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(credentials): Json<LoginCredentials>,
) -> Response {
    let resp = match state
        .upstream
        .login(cookie_header(&headers), &credentials)
        .await
    {
        Ok(resp) => resp,
        Err(e) => return bad_gateway(e),
    };

    match read_parts(resp).await {
        Ok((status, fwd_headers, body)) => {
            if status.is_success() {
                match serde_json::from_slice::<LoginOutcome>(&body) {
                    Ok(outcome) if outcome.success => {
                        tracing::info!(email = %credentials.email, "login accepted")
                    }
                    _ => tracing::info!(email = %credentials.email, "login rejected"),
                }
            }
            (status, fwd_headers, body).into_response()
        }
        Err(e) => bad_gateway(e),
    }
}

/// `GET /api/auth/logout`
pub async fn logout(State(state): State<AppState>, headers: HeaderMap) -> Response {
    proxy(state.upstream.logout(cookie_header(&headers)).await).await
}

/// `GET /api/dashboard/processes`
pub async fn list_processes(State(state): State<AppState>, headers: HeaderMap) -> Response {
    let resp = match state.upstream.list_processes(cookie_header(&headers)).await {
        Ok(resp) => resp,
        Err(e) => return bad_gateway(e),
    };

    match read_parts(resp).await {
        Ok((status, fwd_headers, body)) => {
            if status.is_success() {
                // Body passes through untouched; the typed parse is only
                // for logging and shape drift detection.
                match serde_json::from_slice::<Envelope<Vec<ProcessSummary>>>(&body) {
                    Ok(envelope) => {
                        tracing::debug!(count = envelope.data.len(), "fetched process list");
                    }
                    Err(e) => {
                        tracing::warn!("process list did not match expected shape: {}", e);
                    }
                }
            }
            (status, fwd_headers, body).into_response()
        }
        Err(e) => bad_gateway(e),
    }
}

/// `GET /api/dashboard/process-by-id/{uuid}`
pub async fn process_by_id(
    State(state): State<AppState>,
    Path(uuid): Path<Uuid>,
    headers: HeaderMap,
) -> Response {
    proxy(
        state
            .upstream
            .process_by_id(cookie_header(&headers), uuid)
            .await,
    )
    .await
}

/// `GET /api/dashboard/process/{name}`
pub async fn process_metadata(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Response {
    proxy(
        state
            .upstream
            .process_metadata(cookie_header(&headers), &name)
            .await,
    )
    .await
}

/// `PUT /api/dashboard/process/{name}/update-meta-data`
pub async fn update_metadata(
    State(state): State<AppState>,
    Path(name): Path<String>,
    headers: HeaderMap,
    Json(metadata): Json<ProcessMetadata>,
) -> Response {
    tracing::info!(process = %name, "updating process metadata");
    proxy(
        state
            .upstream
            .update_metadata(cookie_header(&headers), &name, &metadata)
            .await,
    )
    .await
}

/// `POST /api/dashboard/process/start`
pub async fn start_process(
    state: State<AppState>,
    headers: HeaderMap,
    body: Json<ProcessAction>,
) -> Response {
    run_lifecycle(state, headers, Lifecycle::Start, body).await
}

/// `POST /api/dashboard/process/stop`
pub async fn stop_process(
    state: State<AppState>,
    headers: HeaderMap,
    body: Json<ProcessAction>,
) -> Response {
    run_lifecycle(state, headers, Lifecycle::Stop, body).await
}

/// `POST /api/dashboard/process/restart`
pub async fn restart_process(
    state: State<AppState>,
    headers: HeaderMap,
    body: Json<ProcessAction>,
) -> Response {
    run_lifecycle(state, headers, Lifecycle::Restart, body).await
}

async fn run_lifecycle(
    State(state): State<AppState>,
    headers: HeaderMap,
    action: Lifecycle,
    Json(body): Json<ProcessAction>,
) -> Response {
    tracing::info!(process = %body.name, action = action.as_str(), "process lifecycle request");
    proxy(
        state
            .upstream
            .lifecycle(cookie_header(&headers), action, &body)
            .await,
    )
    .await
}

/// Pass an upstream response through unchanged, or surface the generic
/// error if the backend could not be reached.
async fn proxy(result: Result<reqwest::Response, DashError>) -> Response {
    match result {
        Ok(resp) => match read_parts(resp).await {
            Ok((status, headers, body)) => (status, headers, body).into_response(),
            Err(e) => bad_gateway(e),
        },
        Err(e) => bad_gateway(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_header_extraction() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, "admincookie=tok; theme=dark".parse().unwrap());
        assert_eq!(cookie_header(&headers), Some("admincookie=tok; theme=dark"));
        assert_eq!(cookie_header(&HeaderMap::new()), None);
    }

    #[test]
    fn test_bad_gateway_shape() {
        let response = bad_gateway(DashError::Upstream("connection refused".to_string()));
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_read_parts_forwards_only_content_type_and_set_cookie() {
        let upstream = axum::http::Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .header(header::SET_COOKIE, "admincookie=tok; Path=/; HttpOnly")
            .header(header::SET_COOKIE, "refresh=abc; Path=/")
            .header("x-backend-host", "pm2-node-3")
            .body(r#"{"success":true}"#.to_string())
            .unwrap();

        let (status, headers, body) = read_parts(reqwest::Response::from(upstream))
            .await
            .unwrap();

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            headers.get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        // Both session cookies pass through.
        let cookies: Vec<_> = headers.get_all(header::SET_COOKIE).iter().collect();
        assert_eq!(cookies.len(), 2);
        assert_eq!(cookies[0], "admincookie=tok; Path=/; HttpOnly");
        // Backend-internal headers are dropped.
        assert!(!headers.contains_key("x-backend-host"));
        assert_eq!(&body[..], br#"{"success":true}"#);
    }

    #[tokio::test]
    async fn test_read_parts_body_passes_through_unmodified() {
        let payload = r#"{"data":[{"process_id":0,"name":"api","status":"online","memory":1,"cpu":0.0,"pm_id":0}]}"#;
        let upstream = axum::http::Response::builder()
            .status(StatusCode::OK)
            .header(header::CONTENT_TYPE, "application/json")
            .body(payload.to_string())
            .unwrap();

        let (_, _, body) = read_parts(reqwest::Response::from(upstream))
            .await
            .unwrap();
        assert_eq!(&body[..], payload.as_bytes());
    }
}
