//! HTTP surface: translation trigger, blog index and health check.

use crate::i18n::Language;
use crate::listing::list_articles;
use crate::pipeline::{PipelineError, TranslationPipeline};
use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::{header::HeaderName, HeaderValue, StatusCode},
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::error;

const TRANSLATE_METHODS: &str = "POST, OPTIONS";
const LISTING_METHODS: &str = "GET, OPTIONS";
const ALLOWED_HEADERS: &str = "Content-Type, Authorization";

/// Shared, immutable request state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<TranslationPipeline>,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/api/translate",
            post(translate)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(middleware::map_response(|response: Response| {
                    with_cors(response, TRANSLATE_METHODS)
                })),
        )
        .route(
            "/api/blog",
            get(list_blog)
                .options(preflight)
                .fallback(method_not_allowed)
                .layer(middleware::map_response(|response: Response| {
                    with_cors(response, LISTING_METHODS)
                })),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn with_cors(mut response: Response, methods: &'static str) -> Response {
    let headers = response.headers_mut();
    headers.insert(
        HeaderName::from_static("access-control-allow-origin"),
        HeaderValue::from_static("*"),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-methods"),
        HeaderValue::from_static(methods),
    );
    headers.insert(
        HeaderName::from_static("access-control-allow-headers"),
        HeaderValue::from_static(ALLOWED_HEADERS),
    );
    response
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

async fn method_not_allowed() -> Response {
    failure(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

fn failure(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(json!({ "success": false, "message": message.into() })),
    )
        .into_response()
}

/// JSON error response for a failed translation.
pub struct ApiError(PipelineError);

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match &self.0 {
            PipelineError::InvalidRequest { .. } | PipelineError::EmptyDocument => {
                StatusCode::BAD_REQUEST
            }
            PipelineError::NotFound { .. } => StatusCode::NOT_FOUND,
            PipelineError::Configuration(_)
            | PipelineError::MalformedDocument { .. }
            | PipelineError::TranslationFailed(_)
            | PipelineError::StoreUnavailable(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PipelineError> for ApiError {
    fn from(err: PipelineError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let mut body = Map::new();
        body.insert("success".into(), Value::Bool(false));
        body.insert("message".into(), Value::String(self.0.to_string()));
        match self.0 {
            PipelineError::InvalidRequest {
                received: Some(received),
                ..
            } => {
                body.insert("received".into(), received);
            }
            PipelineError::NotFound { file_name } => {
                body.insert("fileName".into(), Value::String(file_name));
            }
            _ => {}
        }

        (status, Json(Value::Object(body))).into_response()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslateBody {
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    target_lang: Option<String>,
}

async fn translate(
    State(state): State<AppState>,
    payload: Result<Json<TranslateBody>, JsonRejection>,
) -> Result<Json<Value>, ApiError> {
    let Json(payload) = payload.map_err(|rejection| {
        ApiError(PipelineError::InvalidRequest {
            message: format!("Invalid request body: {}", rejection.body_text()),
            received: None,
        })
    })?;

    let outcome = state
        .pipeline
        .translate(payload.slug.as_deref(), payload.target_lang.as_deref())
        .await?;

    let mut response = json!({
        "success": true,
        "message": format!("Translation to {} completed successfully", outcome.target),
        "url": outcome.article.url,
        "fileName": outcome.article.file_name,
    });
    if let Some(reason) = outcome.metadata_degraded {
        response["metadataWarning"] = Value::String(reason);
    }

    Ok(Json(response))
}

#[derive(Debug, Deserialize)]
struct BlogQuery {
    lang: Option<String>,
}

async fn list_blog(State(state): State<AppState>, Query(query): Query<BlogQuery>) -> Response {
    let lang = match query.lang.as_deref() {
        None | Some("") => Language::canonical(),
        Some(code) => match Language::from_code(&code.to_lowercase()) {
            Ok(lang) => lang,
            Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
        },
    };

    match list_articles(state.pipeline.store().as_ref(), lang).await {
        Ok(articles) => Json(json!({ "success": true, "data": articles })).into_response(),
        Err(e) => {
            error!(lang = %lang, error = %e, "Failed to list articles");
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}
