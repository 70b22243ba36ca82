use crate::state::{CardForm, CardItemView, FieldErrors, FormMode, ListControls, RawListControls, SelectOption};
use askama::Template;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    routing::get,
    Form, Router,
};
use cards::service::{CardError, CardService};
use common::AppState;
use std::sync::Arc;

const SAVE_FAILED: &str = "Failed to save card";

#[derive(Template)]
#[template(path = "card_list.html")]
pub struct CardListTemplate {
    pub sort_fields: Vec<SelectOption>,
    pub sort_orders: Vec<SelectOption>,
    pub color_filters: Vec<SelectOption>,
    pub cards: Vec<CardItemView>,
}

#[derive(Template)]
#[template(path = "card_form.html")]
pub struct CardFormTemplate {
    pub heading: String,
    pub action: String,
    pub title: String,
    pub description: String,
    pub colors: Vec<SelectOption>,
    pub title_error: String,
    pub fill_color_error: String,
    pub error: String,
}

impl CardFormTemplate {
    fn new(mode: &FormMode, form: &CardForm, errors: FieldErrors, error: Option<&str>) -> Self {
        Self {
            heading: mode.heading().to_string(),
            action: mode.action(),
            title: form.title.clone(),
            description: form.description.clone(),
            colors: form.color_options(),
            title_error: errors.title.unwrap_or_default(),
            fill_color_error: errors.fill_color.unwrap_or_default(),
            error: error.unwrap_or_default().to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub message: String,
}

fn render<T: Template>(status: StatusCode, template: T) -> Response {
    match template.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Template error: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Template Error").into_response()
        }
    }
}

fn error_page(status: StatusCode, message: &str) -> Response {
    render(status, ErrorTemplate { message: message.to_string() })
}

pub fn ui_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_view))
        .route("/cards/new", get(new_form).post(submit_new))
        .route("/cards/{id}/edit", get(edit_form).post(submit_edit))
        .with_state(state)
}

async fn list_view(
    State(state): State<Arc<AppState>>,
    Query(params): Query<RawListControls>,
) -> Response {
    let controls = ListControls::from_query(params);

    let cards = match CardService::list_cards(&state.db, &controls.to_filters()).await {
        Ok(cards) => cards,
        Err(e) => {
            tracing::error!("Failed to fetch cards: {}", e);
            return error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch cards");
        }
    };

    let template = CardListTemplate {
        sort_fields: controls.sort_field_options(),
        sort_orders: controls.sort_order_options(),
        color_filters: controls.color_filter_options(),
        cards: cards.into_iter().map(CardItemView::from).collect(),
    };
    render(StatusCode::OK, template)
}

async fn new_form() -> Response {
    let template = CardFormTemplate::new(&FormMode::Create, &CardForm::blank(), FieldErrors::default(), None);
    render(StatusCode::OK, template)
}

async fn edit_form(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Response {
    match CardService::get_card(&state.db, &id).await {
        Ok(card) => {
            let mode = FormMode::Edit { id };
            let template = CardFormTemplate::new(&mode, &CardForm::from_card(&card), FieldErrors::default(), None);
            render(StatusCode::OK, template)
        }
        Err(CardError::NotFound) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::error!("Failed to fetch card {}: {}", id, e);
            error_page(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch card")
        }
    }
}

async fn submit_new(
    State(state): State<Arc<AppState>>,
    Form(form): Form<CardForm>,
) -> Response {
    submit(&state, FormMode::Create, form).await
}

async fn submit_edit(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Form(form): Form<CardForm>,
) -> Response {
    submit(&state, FormMode::Edit { id }, form).await
}

/// Validate, then create or update with the full form; back to the list on success.
async fn submit(state: &AppState, mode: FormMode, form: CardForm) -> Response {
    if let Err(errors) = form.validate() {
        let template = CardFormTemplate::new(&mode, &form, errors, None);
        return render(StatusCode::UNPROCESSABLE_ENTITY, template);
    }

    let result = match &mode {
        FormMode::Create => CardService::create_card(&state.db, form.clone().into_create_request())
            .await
            .map(|_| ()),
        FormMode::Edit { id } => CardService::update_card(&state.db, id, form.clone().into_update_request())
            .await
            .map(|_| ()),
    };

    match result {
        Ok(()) => Redirect::to("/").into_response(),
        Err(e) => {
            tracing::warn!("Failed to save card: {}", e);
            let status = match e {
                CardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                CardError::NotFound => StatusCode::NOT_FOUND,
                CardError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
            };
            let template = CardFormTemplate::new(&mode, &form, FieldErrors::default(), Some(SAVE_FAILED));
            render(status, template)
        }
    }
}
