use crate::models::{Card, CardFilters, RawCreateCardRequest, RawListCardsQuery, UpdateCardRequest};
use crate::service::{CardError, CardService};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use common::AppState;
use serde_json::json;
use std::sync::Arc;

impl IntoResponse for CardError {
    fn into_response(self) -> Response {
        let (status, msg) = match self {
            CardError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            CardError::NotFound => (StatusCode::NOT_FOUND, "Card not found".to_string()),
            CardError::Infrastructure(detail) => {
                tracing::error!("Infrastructure error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "error": msg }))).into_response()
    }
}

impl From<JsonRejection> for CardError {
    fn from(rejection: JsonRejection) -> Self {
        tracing::debug!("Rejected request body: {}", rejection.body_text());
        CardError::InvalidInput("Invalid request body".to_string())
    }
}

/// JSON API, nested under `/api/cards`.
pub fn cards_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_cards).post(create_card))
        .route("/{id}", get(get_card).put(update_card).delete(delete_card))
        .with_state(state)
}

async fn list_cards(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawListCardsQuery>,
) -> Result<Json<Vec<Card>>, CardError> {
    let filters = CardFilters::new(params).map_err(CardError::InvalidInput)?;
    let cards = CardService::list_cards(&state.db, &filters).await?;
    Ok(Json(cards))
}

async fn get_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Card>, CardError> {
    let card = CardService::get_card(&state.db, &id).await?;
    Ok(Json(card))
}

async fn create_card(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<RawCreateCardRequest>, JsonRejection>,
) -> Result<impl IntoResponse, CardError> {
    let Json(payload) = payload?;
    let card = CardService::create_card(&state.db, payload).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn update_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateCardRequest>, JsonRejection>,
) -> Result<Json<Card>, CardError> {
    let Json(payload) = payload?;
    let card = CardService::update_card(&state.db, &id, payload).await?;
    Ok(Json(card))
}

async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Card>, CardError> {
    let card = CardService::delete_card(&state.db, &id).await?;
    Ok(Json(card))
}
