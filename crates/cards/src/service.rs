use crate::models::{Card, CardFilters, CardPatch, CreateCardRequest, RawCreateCardRequest, UpdateCardRequest};
use crate::repository::CardRepository;
use database::{Database, RepositoryError};
use tracing::instrument;

#[derive(Debug, thiserror::Error)]
pub enum CardError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Database error: {0}")]
    Infrastructure(String),
    #[error("Card not found")]
    NotFound,
}

impl From<RepositoryError> for CardError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => CardError::NotFound,
            RepositoryError::Infrastructure(e) => CardError::Infrastructure(e.to_string()),
            // Ids are generated server side, so a clash is an internal failure.
            RepositoryError::UniqueViolation(msg) => CardError::Infrastructure(msg),
        }
    }
}

pub struct CardService;

impl CardService {
    #[instrument(skip(db))]
    pub async fn list_cards(db: &Database, filters: &CardFilters) -> Result<Vec<Card>, CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let cards = repo.list(filters).await?;
        Ok(cards)
    }

    #[instrument(skip(db))]
    pub async fn get_card(db: &Database, id: &str) -> Result<Card, CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let card = repo.find_by_id(id).await?
            .ok_or(CardError::NotFound)?;

        Ok(card)
    }

    #[instrument(skip(db))]
    pub async fn create_card(db: &Database, raw: RawCreateCardRequest) -> Result<Card, CardError> {
        let req = CreateCardRequest::new(raw).map_err(CardError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let card = repo.create(&req).await?;

        uow.commit().await?;
        tracing::info!(card_id = %card.id, "card created");

        Ok(card)
    }

    #[instrument(skip(db))]
    pub async fn update_card(db: &Database, id: &str, raw: UpdateCardRequest) -> Result<Card, CardError> {
        let patch = CardPatch::new(raw).map_err(CardError::InvalidInput)?;

        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let card = repo.update(id, &patch).await?;

        uow.commit().await?;
        Ok(card)
    }

    #[instrument(skip(db))]
    pub async fn delete_card(db: &Database, id: &str) -> Result<Card, CardError> {
        let mut uow = db.begin().await?;
        let mut repo = CardRepository::new(uow.connection());

        let card = repo.delete(id).await?;

        uow.commit().await?;
        tracing::info!(card_id = %card.id, "card deleted");

        Ok(card)
    }
}
