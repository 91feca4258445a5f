//! HTTP surface: the upload form and the report endpoint.
//!
//! Routes:
//! - `GET /`: upload form
//! - `POST /`: multipart upload with a `file` field, answered with the report
//! - `GET /healthz`: liveness probe
//!
//! Each request parses and renders its own upload; the only shared state is
//! the read-only configuration.

use std::sync::Arc;
use std::time::Instant;

use axum::Router;
use axum::body::{Body, Bytes};
use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{DefaultBodyLimit, Multipart, State};
use axum::http::{Request, StatusCode};
use axum::middleware::{Next, from_fn};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::get;
use tokio::net::TcpListener;
use tracing::{Instrument, debug, info, warn};

use crate::config::AppConfig;
use crate::report::{generate_report, render_results_page, render_upload_page};
use crate::{ReportError, ReportResult};

/// Name of the multipart field carrying the CSV export.
pub const UPLOAD_FIELD: &str = "file";

#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        AppState {
            config: Arc::new(config),
        }
    }
}

pub fn build_router(config: AppConfig) -> Router {
    let max_body = config.server.max_upload_bytes;
    Router::new()
        .route("/", get(upload_form_handler).post(upload_handler))
        .route("/healthz", get(healthz_handler))
        .layer(from_fn(request_tracing_middleware))
        .layer(DefaultBodyLimit::max(max_body))
        .with_state(AppState::new(config))
}

async fn request_tracing_middleware(request: Request<Body>, next: Next) -> Response {
    let span = tracing::info_span!(
        "http.request",
        method = %request.method(),
        route = %request.uri().path(),
    );
    let started = Instant::now();
    async move {
        let response = next.run(request).await;
        info!(
            status = response.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request completed"
        );
        response
    }
    .instrument(span)
    .await
}

async fn healthz_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

async fn upload_form_handler() -> Html<String> {
    Html(render_upload_page(None))
}

async fn upload_handler(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let mut multipart = match multipart {
        Ok(m) => m,
        Err(rejection) => {
            debug!(reason = %rejection.body_text(), "POST without multipart body, showing form");
            return Html(render_upload_page(None)).into_response();
        }
    };

    let upload = match read_upload(&mut multipart).await {
        Ok(Some(bytes)) => bytes,
        Ok(None) => {
            debug!("no file in upload, showing form");
            return Html(render_upload_page(None)).into_response();
        }
        Err(e) => {
            warn!(error = %e.body_text(), "malformed upload");
            let message = format!("Upload could not be read: {}", e.body_text());
            return (e.status(), Html(render_upload_page(Some(&message)))).into_response();
        }
    };

    info!(bytes = upload.len(), "processing upload");
    let layout = state.config.charts;
    let report = tokio::task::spawn_blocking(move || generate_report(&upload, &layout))
        .await
        .map_err(|e| ReportError::Message(format!("report worker failed: {e}")))
        .and_then(|result| result);
    match report {
        Ok(bundle) => Html(render_results_page(&bundle)).into_response(),
        Err(ReportError::Message(message)) => {
            warn!(error = %message, "report generation aborted");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Html(render_upload_page(Some(&message))),
            )
                .into_response()
        }
        Err(e) => {
            warn!(error = %e, "upload rejected");
            (
                StatusCode::UNPROCESSABLE_ENTITY,
                Html(render_upload_page(Some(&e.to_string()))),
            )
                .into_response()
        }
    }
}

/// Read the `file` field. An absent or empty field is `None`.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<Bytes>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some(UPLOAD_FIELD) {
            let bytes = field.bytes().await?;
            return Ok((!bytes.is_empty()).then_some(bytes));
        }
    }
    Ok(None)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "could not install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("shutdown requested");
}

/// Bind and serve until Ctrl-C.
pub async fn serve(config: AppConfig) -> ReportResult<()> {
    let addr = config.bind_addr()?;
    let listener = TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, build_router(config))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

/// Run the `serve` command.
///
/// # Arguments
/// * `config` - Loaded configuration
/// * `bind` - Optional address overriding `server.bind`
pub fn run(mut config: AppConfig, bind: Option<String>) -> ReportResult<()> {
    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    config.validate()?;
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| ReportError::Message(format!("failed to start runtime: {e}")))?;
    runtime.block_on(serve(config))
}
