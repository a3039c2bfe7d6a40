//! HTTP surface of the assistant.
//!
//! Routes:
//!
//! - `GET /health`: liveness
//! - `POST /api/chat`: [`ChatRequest`] in, [`AssistantReply`] out
//! - `POST /api/recommendations`: [`RecommendationRequest`] in,
//!   [`RecommendationList`] out
//!
//! The proxy is stateless: tasks arrive with each request and are never
//! stored. CORS is permissive so a browser client on any origin can call it.
//! Bodies that fail to decode are answered with the same [`ErrorBody`]
//! shape as assistant failures.

use crate::assistant::domain::{
    AssistantError, AssistantReply, ChatRequest, RecommendationList, RecommendationRequest,
};
use crate::assistant::ports::LanguageModel;
use crate::assistant::services::AssistantService;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request, State};
use axum::http::{HeaderValue, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Shared handler state.
pub type ProxyState<M, C> = Arc<AssistantService<M, C>>;

/// Liveness answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Health {
    /// Always `ok`.
    pub status: String,
}

/// Error body returned for assistant failures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    /// User-facing message.
    pub error: String,
    /// Seconds to wait before retrying, for rate-limited requests.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

/// Assistant failure rendered as an HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError(pub AssistantError);

impl From<AssistantError> for ApiError {
    fn from(err: AssistantError) -> Self {
        Self(err)
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self(AssistantError::InvalidRequest(rejection.body_text()))
    }
}

impl ApiError {
    /// Returns the response status.
    #[must_use]
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.0.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Returns the response body.
    #[must_use]
    pub fn body(&self) -> ErrorBody {
        let retry_after = match self.0 {
            AssistantError::RateLimited { retry_after } => retry_after,
            _ => None,
        };
        ErrorBody {
            error: self.0.user_message(),
            retry_after,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = self.body();
        let mut response = (self.status(), Json(&body)).into_response();
        if let Some(seconds) = body.retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(seconds));
        }
        response
    }
}

/// JSON body extractor whose rejection is an [`ApiError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}

/// Builds the proxy router around `service`.
#[must_use]
pub fn router<M, C>(service: ProxyState<M, C>) -> Router
where
    M: LanguageModel + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(chat::<M, C>))
        .route("/api/recommendations", post(recommendations::<M, C>))
        .layer(CorsLayer::permissive())
        .with_state(service)
}

/// `GET /health`.
#[expect(clippy::unused_async, reason = "axum routes take async handlers")]
pub async fn health() -> Json<Health> {
    Json(Health {
        status: "ok".to_owned(),
    })
}

/// `POST /api/chat`.
///
/// # Errors
///
/// Returns the assistant failure as an [`ApiError`].
pub async fn chat<M, C>(
    State(service): State<ProxyState<M, C>>,
    ApiJson(request): ApiJson<ChatRequest>,
) -> Result<Json<AssistantReply>, ApiError>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    Ok(Json(service.ask(&request).await?))
}

/// `POST /api/recommendations`.
///
/// # Errors
///
/// Returns the assistant failure as an [`ApiError`].
pub async fn recommendations<M, C>(
    State(service): State<ProxyState<M, C>>,
    ApiJson(request): ApiJson<RecommendationRequest>,
) -> Result<Json<RecommendationList>, ApiError>
where
    M: LanguageModel,
    C: Clock + Send + Sync,
{
    Ok(Json(service.recommend(&request).await?))
}
